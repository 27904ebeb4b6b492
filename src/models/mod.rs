pub mod config;
pub mod data;

pub use config::ValidatorConfig;
pub use data::*;
