mod donation;
mod health_check;
mod helpers;
mod payment;
