pub mod cors;
pub mod logging;

pub use cors::{cors_layer, enforce_origin};
pub use logging::log_request;
