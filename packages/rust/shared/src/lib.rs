//! Shared types, error model, and configuration for artifactview.
//!
//! This crate is the foundation depended on by all other artifactview crates.
//! It provides:
//! - [`ArtifactViewError`] — the unified error type
//! - Domain types ([`RunRef`], run URL parsing)
//! - Configuration ([`AppConfig`], config loading, token resolution)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, GithubApiConfig, ServerConfig, config_dir, config_file_path,
    load_config, load_config_from, resolve_token,
};
pub use error::{ArtifactViewError, Result};
pub use types::{DEFAULT_API_BASE, RUN_URL_FORMAT, RunRef};
