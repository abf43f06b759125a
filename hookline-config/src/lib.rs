//! Configuration loading for Hookline.
//!
//! Values are layered: a `.env` file (optional), a TOML file (optional), then
//! process environment variables, with later layers winning.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader};
pub use models::{
    Config, ConfigMetadata, DatabaseConfig, ServerConfig, ViewConfig,
    sources::{EnvConfig, FileConfig},
};
pub use validation::{ConfigWarning, ConfigWarnings};
