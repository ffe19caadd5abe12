//! Configuration module for Interview Practice.
//!
//! Provides `AppConfig` (top-level settings), `AppPaths` for cross-platform
//! data directories, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, RecordingConfig, UiConfig};
