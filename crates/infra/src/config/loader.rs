//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! The result is always validated with [`ClientConfig::validate`].
//!
//! ## Environment Variables
//! - `CREDIFY_ORGANIZATION_ID`: Organization the client acts for
//! - `CREDIFY_TOKEN_URL`: OAuth2 token endpoint
//! - `CREDIFY_CLIENT_ID`: Client-credentials id
//! - `CREDIFY_CLIENT_SECRET`: Client-credentials secret
//! - `CREDIFY_BASE_URL`: Platform base URL (optional)
//! - `CREDIFY_TIMEOUT_MS`: Request timeout in milliseconds (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./credify.toml`, `./credify.json` (current working directory)
//! 2. `../credify.toml`, `../credify.json` (parent directory)

use std::path::{Path, PathBuf};

use credify_domain::{AuthConfig, ClientConfig, CredifyError, Result};

pub const ENV_ORGANIZATION_ID: &str = "CREDIFY_ORGANIZATION_ID";
pub const ENV_TOKEN_URL: &str = "CREDIFY_TOKEN_URL";
pub const ENV_CLIENT_ID: &str = "CREDIFY_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "CREDIFY_CLIENT_SECRET";
pub const ENV_BASE_URL: &str = "CREDIFY_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "CREDIFY_TIMEOUT_MS";

const CONFIG_FILE_NAMES: [&str; 2] = ["credify.toml", "credify.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `CredifyError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `CredifyError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<ClientConfig> {
    let organization_id = env_var(ENV_ORGANIZATION_ID)?;
    let auth = AuthConfig {
        token_url: env_var(ENV_TOKEN_URL)?,
        client_id: env_var(ENV_CLIENT_ID)?,
        client_secret: env_var(ENV_CLIENT_SECRET)?,
    };

    let mut config = ClientConfig::new(organization_id, auth);

    if let Some(base_url) = optional_env_var(ENV_BASE_URL) {
        config = config.with_base_url(base_url);
    }
    if let Some(timeout) = optional_env_var(ENV_TIMEOUT_MS) {
        let timeout_ms = timeout.parse::<u64>().map_err(|e| {
            CredifyError::config(format!("Invalid {ENV_TIMEOUT_MS} value {timeout:?}: {e}"))
        })?;
        config = config.with_timeout_ms(timeout_ms);
    }

    config.validate()?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CredifyError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CredifyError::config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CredifyError::config("No config file found in any of the standard locations")
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CredifyError::config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content, format chosen by extension
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CredifyError::config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CredifyError::config(format!("Invalid JSON format: {e}"))),
        _ => Err(CredifyError::config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    probe_from(&cwd)
}

fn probe_from(dir: &Path) -> Option<PathBuf> {
    let parent = dir.join("..");
    let found = [dir, parent.as_path()]
        .into_iter()
        .flat_map(|base| CONFIG_FILE_NAMES.iter().map(move |name| base.join(name)))
        .find(|path| path.exists());
    found
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    optional_env_var(key).ok_or_else(|| {
        CredifyError::config(format!("Missing required environment variable: {key}"))
    })
}

/// Non-blank environment variable, if set
fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::TempDir;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 6] = [
        ENV_ORGANIZATION_ID,
        ENV_TOKEN_URL,
        ENV_CLIENT_ID,
        ENV_CLIENT_SECRET,
        ENV_BASE_URL,
        ENV_TIMEOUT_MS,
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn set_required_env() {
        std::env::set_var(ENV_ORGANIZATION_ID, "org-env");
        std::env::set_var(ENV_TOKEN_URL, "https://auth.example/oauth/token");
        std::env::set_var(ENV_CLIENT_ID, "client-env");
        std::env::set_var(ENV_CLIENT_SECRET, "secret-env");
    }

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_from_env_required_vars() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required_env();

        let config = load_from_env().unwrap();
        assert_eq!(config.organization_id, "org-env");
        assert_eq!(config.auth.client_id, "client-env");
        assert_eq!(config.base_url, credify_domain::constants::DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, credify_domain::constants::DEFAULT_TIMEOUT_MS);

        clear_env();
    }

    #[test]
    fn test_load_from_env_optional_overrides() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required_env();
        std::env::set_var(ENV_BASE_URL, "http://localhost:9000");
        std::env::set_var(ENV_TIMEOUT_MS, "1500");

        let config = load_from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.timeout_ms, 1500);

        clear_env();
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required_env();
        std::env::remove_var(ENV_CLIENT_SECRET);

        let err = load_from_env().unwrap_err();
        assert_eq!(
            err,
            CredifyError::config("Missing required environment variable: CREDIFY_CLIENT_SECRET")
        );

        clear_env();
    }

    #[test]
    fn test_load_from_env_invalid_timeout() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();
        set_required_env();
        std::env::set_var(ENV_TIMEOUT_MS, "soon");

        assert!(matches!(load_from_env(), Err(CredifyError::Config { .. })));

        std::env::set_var(ENV_TIMEOUT_MS, "0");
        assert_eq!(
            load_from_env().unwrap_err(),
            CredifyError::config("timeout_ms must be greater than zero")
        );

        clear_env();
    }

    #[test]
    fn test_load_from_file_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "credify.toml",
            r#"
organization_id = "org-toml"
base_url = "http://localhost:8080"
timeout_ms = 5000

[auth]
token_url = "https://auth.example/oauth/token"
client_id = "id"
client_secret = "secret"
"#,
        );

        let config = load_from_file(Some(path)).unwrap();
        assert_eq!(config.organization_id, "org-toml");
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.auth.client_secret, "secret");
    }

    #[test]
    fn test_load_from_file_json_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "credify.json",
            r#"{
                "organization_id": "org-json",
                "auth": {
                    "token_url": "https://auth.example/oauth/token",
                    "client_id": "id",
                    "client_secret": "secret"
                }
            }"#,
        );

        let config = load_from_file(Some(path)).unwrap();
        assert_eq!(config.organization_id, "org-json");
        assert_eq!(config.timeout_ms, credify_domain::constants::DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_load_from_file_validates() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "credify.json",
            r#"{
                "organization_id": "org-json",
                "auth": { "token_url": "https://auth.example", "client_id": "id", "client_secret": "" }
            }"#,
        );

        assert_eq!(
            load_from_file(Some(path)).unwrap_err(),
            CredifyError::config("auth.client_secret is required")
        );
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/credify.json")));
        assert!(matches!(result, Err(CredifyError::Config { .. })));
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "credify.json", r#"{ "this is": "not valid json" "#);
        assert!(load_from_file(Some(path)).is_err());
    }

    #[test]
    fn test_parse_config_unsupported_extension() {
        let err = parse_config("organization_id: x", Path::new("credify.yaml")).unwrap_err();
        assert_eq!(err, CredifyError::config("Unsupported config format: yaml"));
    }

    #[test]
    fn test_probe_prefers_current_dir_then_parent() {
        let root = TempDir::new().unwrap();
        let child = root.path().join("app");
        std::fs::create_dir(&child).unwrap();

        assert_eq!(probe_from(&child), None);

        std::fs::write(root.path().join("credify.json"), "{}").unwrap();
        let found = probe_from(&child).unwrap();
        assert!(found.ends_with("../credify.json"));

        std::fs::write(child.join("credify.toml"), "").unwrap();
        assert_eq!(probe_from(&child), Some(child.join("credify.toml")));
    }
}
