pub(crate) mod errors;
pub mod handlers;
pub mod models;
mod routes;
pub mod schemas;
pub mod utils;
pub use routes::campaign_route;
