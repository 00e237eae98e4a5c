//! Layered configuration: command-line flags over `--set` values over the TOML file over the
//! built-in defaults.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::build_config;
pub use models::AppConfig;
