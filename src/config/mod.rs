mod defaults;
mod env;
mod schema;
mod validate;

pub use env::load_config;
pub use schema::{Alerts, Config};
pub use validate::ConfigError;
