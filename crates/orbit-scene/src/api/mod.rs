pub mod config;
pub mod error;
pub mod host;
pub mod orbit;
pub mod types;
