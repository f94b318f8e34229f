use super::VikingConfig;
use super::jsonc::strip_jsonc_comments;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAMES: [&str; 2] = ["viking_memory.jsonc", "viking_memory.json"];

impl VikingConfig {
    /// `~/.config/opencode`, the directory searched by [`VikingConfig::load`].
    pub fn default_config_dir() -> Option<PathBuf> {
        UserDirs::new().map(|u| u.home_dir().join(".config").join("opencode"))
    }

    /// Load from the default directory, then fill missing credentials from
    /// the environment.
    pub fn load() -> Self {
        let mut config = Self::default_config_dir()
            .map(|dir| Self::load_from_dir(&dir))
            .unwrap_or_default();
        config.apply_env_fallbacks();
        config
    }

    /// First candidate file in `dir` that parses wins. Unreadable or
    /// invalid files are skipped with a warning; no file at all yields
    /// defaults.
    pub fn load_from_dir(dir: &Path) -> Self {
        for name in CONFIG_FILE_NAMES {
            let path = dir.join(name);
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded viking memory config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "ignoring invalid config file"
                    );
                }
            }
        }
        Self::default()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_jsonc(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_jsonc(contents: &str) -> Result<Self> {
        let json = strip_jsonc_comments(contents);
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}
