use accesslog_store::{BatchPolicy, CreationPolicy};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "ACCESSLOG_CONFIG";

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. ACCESSLOG_CONFIG environment variable (with tilde expansion)
/// 3. `<config dir>/accesslog/config.toml`
///
/// Returns `None` only when no config directory can be determined.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(expand_tilde(&path.to_string_lossy()));
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return Some(expand_tilde(&env_path));
    }

    dirs::config_dir().map(|dir| dir.join("accesslog").join("config.toml"))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default)]
    pub on_error: BatchPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub public_env: String,
    pub private_env: String,
    /// Refuse to create a new log unless both variables are set
    pub require_on_create: bool,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            public_env: "ACCESSLOG_PUBLIC_KEY".to_string(),
            private_env: "ACCESSLOG_PRIVATE_KEY".to_string(),
            require_on_create: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

impl Config {
    /// Load from the resolved path, falling back to defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn creation_policy(&self) -> CreationPolicy {
        if self.keys.require_on_create {
            CreationPolicy::RequireEnv {
                public_var: self.keys.public_env.clone(),
                private_var: self.keys.private_env.clone(),
            }
        } else {
            CreationPolicy::Allow
        }
    }
}
