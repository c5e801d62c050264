//! Configuration file loading.
//!
//! `$TYPOLENS_CONFIG` names the file when set; otherwise
//! `~/.typolens/config.toml` is used. A missing file is not an error.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::Deserialize;
use typolens_core::TrackerConfig;
use typolens_source::SourceConfig;

/// Environment variable overriding the config location.
pub const CONFIG_ENV: &str = "TYPOLENS_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct TypolensConfig {
    /// Which typo source to run and how.
    pub source: Option<SourceConfig>,
    pub tracker: Option<TrackerConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Replace every `${VAR}` with the variable's value (empty when unset).
///
/// An unclosed `${` is kept verbatim.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let Some(end_rel) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &rest[start + 2..start + 2 + end_rel];
        if !var.is_empty() {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &rest[start + 2 + end_rel + 1..];
    }

    out.push_str(rest);
    out
}

impl TypolensConfig {
    /// Load from the default location. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            tracing::debug!("No config at {:?}", path);
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Load an explicit file; a missing file is a read error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };
        Self::parse(&content).map_err(|err| {
            tracing::warn!("Failed to parse config at {:?}: {}", path, err);
            ConfigError::Parse {
                path: path.to_path_buf(),
                source: err,
            }
        })
    }

    /// Parse TOML text and expand `${VAR}` in the source's command,
    /// arguments and dictionary path.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        if let Some(source) = config.source.as_mut() {
            source.command = source.command.as_deref().map(expand_env_vars);
            for arg in &mut source.args {
                *arg = expand_env_vars(arg);
            }
            source.dictionary = source
                .dictionary
                .as_deref()
                .map(|p| PathBuf::from(expand_env_vars(&p.to_string_lossy())));
        }
        Ok(config)
    }

    #[must_use]
    pub fn source(&self) -> SourceConfig {
        self.source.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn tracker(&self) -> TrackerConfig {
        self.tracker.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|home| home.join(".typolens").join("config.toml"))
}
