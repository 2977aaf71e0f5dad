use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toll_app::JoinStrategy;

const CONFIG_DIR_NAME: &str = "toll-reports";
const CONFIG_FILE_NAME: &str = "config.toml";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND: &str = "127.0.0.1";
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub port: u16,
    pub bind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<String>,
    pub join_strategy: JoinStrategy,
    pub store_timeout_secs: u64,
    pub log_filter: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            db_path: None,
            join_strategy: JoinStrategy::default(),
            store_timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl CliConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.store_timeout_secs == 0 {
            return Err("store_timeout_secs must be at least 1".to_string());
        }
        Ok(())
    }

    /// Configured database path with a leading `~` expanded.
    pub fn db_path(&self) -> Option<PathBuf> {
        self.db_path.as_deref().map(expand_home)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

pub fn load_or_create(explicit: Option<&Path>) -> Result<ConfigLoad, String> {
    let file = match explicit {
        Some(path) => path.to_path_buf(),
        None => config_dir()?.join(CONFIG_FILE_NAME),
    };
    load_or_create_at(file)
}

fn load_or_create_at(file: PathBuf) -> Result<ConfigLoad, String> {
    if file.exists() {
        let contents = fs::read_to_string(&file)
            .map_err(|err| format!("read config {}: {}", file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", file.display(), err))?;
        config
            .validate()
            .map_err(|err| format!("invalid config {}: {}", file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    if let Some(dir) = file.parent() {
        fs::create_dir_all(dir)
            .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    }
    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&file, contents)
        .map_err(|err| format!("write config {}: {}", file.display(), err))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

fn config_dir() -> Result<PathBuf, String> {
    if let Some(base) = std::env::var_os("XDG_CONFIG_HOME").filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(base).join(CONFIG_DIR_NAME));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}

fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(raw),
    };
    match std::env::var_os("HOME") {
        Some(home) if rest.is_empty() => PathBuf::from(home),
        Some(home) => PathBuf::from(home).join(rest),
        None => PathBuf::from(raw),
    }
}
