//! Configuration for the Areo planetary cross-section generator.
//!
//! Settings persist to disk as RON, accept CLI overrides via clap, and detect
//! on-disk changes for hot reload. Every section uses `#[serde(default)]` so
//! older or partial files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AnimationConfig, Config, DebugConfig, OutputConfig, RenderConfig, SceneConfig, SceneVariant,
    WindowConfig, default_config_dir,
};
pub use error::ConfigError;
