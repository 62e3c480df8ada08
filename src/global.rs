//! Global configuration for PhishGuard
//!
//! Settings live in a per-user `config.toml`. The API credential itself is
//! never written to disk: the config only names the environment variable
//! that carries it, and resolving that variable is a hard precondition for
//! any command that talks to the backend.

use std::path::PathBuf;

use miette::{Context as _, IntoDiagnostic as _};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub backend: BackendConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the generative AI API.
    pub endpoint: String,
    /// Model used for both analysis and chat requests.
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl BackendConfig {
    /// Resolves the API credential from the configured environment variable.
    ///
    /// Absence of the credential is the one fatal, user-visible error in the
    /// tool: callers must check this before showing any scanning UI instead
    /// of failing later at request time.
    pub fn resolve_api_key(&self) -> miette::Result<String> {
        std::env::var(&self.api_key_env).map_err(|_| {
            miette::miette!(
                help = format!(
                    "Export your API key before scanning: `export {}=<your-key>`. \
                     Run `phishguard config` to see which variable is expected.",
                    self.api_key_env
                ),
                "missing API credential: environment variable '{}' is not set",
                self.api_key_env
            )
        })
    }
}

pub fn config_dir() -> miette::Result<PathBuf> {
    if let Ok(home) = std::env::var("PHISHGUARD_HOME") {
        return Ok(PathBuf::from(home));
    }

    let base = dirs::config_dir()
        .ok_or_else(|| miette::miette!("failed to resolve the platform config directory"))?;

    Ok(base.join("phishguard"))
}

pub fn config_path() -> miette::Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn ensure_global_config() -> miette::Result<()> {
    let path = config_path()?;

    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .into_diagnostic()
                .context("creating phishguard config directory")?;
        }

        save_config(&Config::default())?;
    }

    Ok(())
}

pub fn read_config() -> miette::Result<Config> {
    let path = config_path()?;
    let contents = std::fs::read_to_string(&path)
        .into_diagnostic()
        .with_context(|| format!("reading {}", path.display()))?;
    let config: Config = toml::from_str(&contents).into_diagnostic()?;

    Ok(config)
}

pub fn save_config(config: &Config) -> miette::Result<()> {
    let path = config_path()?;
    let contents = toml::to_string_pretty(config).into_diagnostic()?;
    std::fs::write(&path, contents)
        .into_diagnostic()
        .context("saving phishguard config.toml file")?;

    Ok(())
}
