pub(crate) mod errors;
pub mod handlers;
mod middlewares;
pub mod models;
mod routes;
pub mod schemas;
mod tests;
pub mod utils;
pub use middlewares::{RequireAuth, RoleValidation};
pub use routes::user_route;
