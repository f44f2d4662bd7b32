pub mod bank;
pub mod topics;
