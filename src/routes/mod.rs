pub mod campaign;
pub mod donation;
pub mod ngo;
pub mod notification;
pub mod payment;
pub mod user;
pub mod volunteer;

pub mod routes;
pub use routes::{health_check, main_route};
