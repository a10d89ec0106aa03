//! Application configuration for artifactview.
//!
//! User config lives at `~/.artifactview/artifactview.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactViewError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "artifactview.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".artifactview";

// ---------------------------------------------------------------------------
// Config structs (matching artifactview.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// GitHub API settings.
    #[serde(default)]
    pub github: GithubApiConfig,

    /// Static file server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Output root for downloaded artifacts. Relative paths resolve against
    /// the working directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> String {
    "artifacts".into()
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubApiConfig {
    /// Name of the env var holding the API token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// REST API base URL (override for GitHub Enterprise hosts).
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for GithubApiConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            api_base: default_api_base(),
        }
    }
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".into()
}
fn default_api_base() -> String {
    crate::types::DEFAULT_API_BASE.into()
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Command spawned to serve the output root.
    #[serde(default = "default_server_command")]
    pub command: String,

    /// Arguments placed before the output root path.
    #[serde(default = "default_server_args")]
    pub args: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: default_server_command(),
            args: default_server_args(),
        }
    }
}

fn default_server_command() -> String {
    "npx".into()
}
fn default_server_args() -> Vec<String> {
    vec!["live-server".into()]
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.artifactview/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ArtifactViewError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.artifactview/artifactview.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ArtifactViewError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        ArtifactViewError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Read the GitHub token from the env var named by the config.
///
/// Resolved before anything touches the network; a missing or empty variable
/// is a fatal configuration error.
pub fn resolve_token(config: &AppConfig) -> Result<String> {
    let var_name = &config.github.token_env;
    match std::env::var(var_name) {
        Ok(val) if !val.is_empty() => Ok(val),
        _ => Err(ArtifactViewError::config(format!(
            "GitHub token not found. Set the {var_name} environment variable."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("output_dir"));
        assert!(toml_str.contains("GITHUB_TOKEN"));
        assert!(toml_str.contains("live-server"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.output_dir, "artifacts");
        assert_eq!(parsed.github.token_env, "GITHUB_TOKEN");
        assert_eq!(parsed.github.api_base, "https://api.github.com");
        assert_eq!(parsed.server.command, "npx");
        assert_eq!(parsed.server.args, vec!["live-server".to_string()]);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[github]
token_env = "GH_PAT"

[server]
command = "miniserve"
args = []
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.github.token_env, "GH_PAT");
        assert_eq!(config.github.api_base, "https://api.github.com");
        assert_eq!(config.server.command, "miniserve");
        assert!(config.server.args.is_empty());
        assert_eq!(config.defaults.output_dir, "artifacts");
    }

    #[test]
    fn malformed_config_file_is_a_usage_error() {
        let dir =
            std::env::temp_dir().join(format!("artifactview-config-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[github\ntoken_env = ").expect("write config");

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ArtifactViewError::Config { .. }));
        assert!(err.is_usage_error());
        assert!(err.to_string().contains("failed to parse"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn token_resolution_missing_var() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.github.token_env = "AV_TEST_NONEXISTENT_TOKEN_9321".into();
        let result = resolve_token(&config);
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("AV_TEST_NONEXISTENT_TOKEN_9321"));
        assert!(message.contains("token not found"));
    }

    #[test]
    fn token_resolution_reads_value() {
        let mut config = AppConfig::default();
        config.github.token_env = "AV_TEST_TOKEN_PRESENT_9321".into();
        unsafe { std::env::set_var("AV_TEST_TOKEN_PRESENT_9321", "ghp_testvalue") };

        let token = resolve_token(&config).expect("token resolves");
        assert_eq!(token, "ghp_testvalue");

        unsafe { std::env::remove_var("AV_TEST_TOKEN_PRESENT_9321") };
    }
}
