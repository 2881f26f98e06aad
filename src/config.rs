use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pattern::PatternKind;
use crate::session::{SessionConfig, DEFAULT_DURATION_SECS, DEFAULT_SPEED};

/// Last-used settings persisted between runs. Session results are
/// deliberately not recorded, only the knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub pattern: PatternKind,
    pub duration_secs: f64,
    pub speed: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: PatternKind::Circle,
            duration_secs: DEFAULT_DURATION_SECS,
            speed: DEFAULT_SPEED,
        }
    }
}

impl From<&SessionConfig> for Config {
    fn from(sc: &SessionConfig) -> Self {
        Self {
            pattern: sc.pattern,
            duration_secs: sc.duration_secs,
            speed: sc.speed,
        }
    }
}

impl From<&Config> for SessionConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            pattern: cfg.pattern,
            duration_secs: cfg.duration_secs,
            speed: cfg.speed,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "respiro") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("respiro_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
