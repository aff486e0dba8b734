use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use leadgate_core::domain::{DatasetFormat, MIN_PHONE_DIGITS_FLOOR};
use leadgate_core::rules::RulePolicy;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "leadgate";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_DATASET_PATH: &str = "data/submissions.csv";
pub const DEFAULT_LOG_PATH: &str = "logs/decisions.log";

pub const ENV_DATASET_PATH: &str = "DATASET_PATH";
pub const ENV_DATASET_FORMAT: &str = "DATASET_FORMAT";
pub const ENV_BLOCK_ACROSS_ANY_OFFER: &str = "BLOCK_ACROSS_ANY_OFFER";
pub const ENV_RECENT_THROTTLE_MINUTES: &str = "RECENT_THROTTLE_MINUTES";
pub const ENV_LOG_PATH: &str = "LOG_PATH";
pub const ENV_MIN_PHONE_DIGITS: &str = "MIN_PHONE_DIGITS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub dataset: DatasetConfig,
    pub rules: RulePolicy,
    pub min_phone_digits: usize,
    /// `None` sends decision lines to the log output instead of a file.
    pub log_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub format: DatasetFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig {
                path: PathBuf::from(DEFAULT_DATASET_PATH),
                format: DatasetFormat::Csv,
            },
            rules: RulePolicy::default(),
            min_phone_digits: MIN_PHONE_DIGITS_FLOOR,
            log_path: Some(PathBuf::from(DEFAULT_LOG_PATH)),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("invalid {field} value: {value}")]
    InvalidField { field: &'static str, value: i64 },
    #[error("failed to resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    min_phone_digits: Option<i64>,
    log_path: Option<PathBuf>,
    dataset: Option<DatasetFile>,
    rules: Option<RulesFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetFile {
    path: Option<PathBuf>,
    format: Option<DatasetFormat>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesFile {
    block_across_any_offer: Option<bool>,
    recent_throttle_minutes: Option<i64>,
}

/// Loads the config file (if any), then applies environment overrides.
///
/// Relative paths resolve against the directory of the config file that was
/// read, or the current directory when no file was found.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    load_with_env(config_path, |name| env::var(name).ok())
}

pub fn load_with_env<F>(config_path: Option<PathBuf>, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => Some(path),
        Err(ConfigError::MissingHomeDir) if !required => None,
        Err(ConfigError::InvalidConfigPath(_)) if !required => None,
        Err(err) => return Err(err),
    };

    let loaded = match path {
        Some(path) => load_at_path(&path, required)?.map(|parsed| (path, parsed)),
        None => None,
    };
    let (base_dir, parsed) = match loaded {
        Some((path, parsed)) => (config_dir(&path)?, parsed),
        None => (
            env::current_dir().map_err(ConfigError::CurrentDir)?,
            ConfigFile::default(),
        ),
    };

    let mut config = merge_config(parsed)?;
    apply_env(&mut config, &lookup)?;
    resolve_paths(&mut config, &base_dir);
    Ok(config)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

/// Accepts the usual truthy spellings; everything else is false.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parsed))
}

fn config_dir(path: &Path) -> Result<PathBuf> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => env::current_dir().map_err(ConfigError::CurrentDir),
    }
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(digits) = parsed.min_phone_digits {
        config.min_phone_digits = min_phone_digits(digits);
    }

    if let Some(log_path) = parsed.log_path {
        config.log_path = non_empty_path(log_path);
    }

    if let Some(dataset) = parsed.dataset {
        if let Some(path) = dataset.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            config.dataset.path = path;
        }
        if let Some(format) = dataset.format {
            config.dataset.format = format;
        }
    }

    if let Some(rules) = parsed.rules {
        if let Some(enabled) = rules.block_across_any_offer {
            config.rules.block_across_any_offer = enabled;
        }
        if let Some(minutes) = rules.recent_throttle_minutes {
            config.rules.recent_throttle_minutes = throttle_minutes(minutes)
                .ok_or(ConfigError::InvalidField {
                    field: "recent_throttle_minutes",
                    value: minutes,
                })?;
        }
    }

    Ok(config)
}

fn apply_env<F>(config: &mut AppConfig, lookup: &F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(ENV_DATASET_PATH) {
        if !path.trim().is_empty() {
            config.dataset.path = PathBuf::from(path.trim());
        }
    }

    if let Some(format) = lookup(ENV_DATASET_FORMAT) {
        config.dataset.format = DatasetFormat::parse_lenient(&format);
    }

    if let Some(flag) = lookup(ENV_BLOCK_ACROSS_ANY_OFFER) {
        config.rules.block_across_any_offer = parse_flag(&flag);
    }

    if let Some(raw) = lookup(ENV_RECENT_THROTTLE_MINUTES) {
        config.rules.recent_throttle_minutes = parse_env_int(ENV_RECENT_THROTTLE_MINUTES, &raw)
            .and_then(|minutes| {
                throttle_minutes(minutes).ok_or(ConfigError::InvalidEnv {
                    name: ENV_RECENT_THROTTLE_MINUTES,
                    value: raw.clone(),
                })
            })?;
    }

    if let Some(raw) = lookup(ENV_MIN_PHONE_DIGITS) {
        config.min_phone_digits = min_phone_digits(parse_env_int(ENV_MIN_PHONE_DIGITS, &raw)?);
    }

    if let Some(path) = lookup(ENV_LOG_PATH) {
        config.log_path = non_empty_path(PathBuf::from(path.trim()));
    }

    Ok(())
}

fn parse_env_int(name: &'static str, raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: raw.to_string(),
    })
}

/// Negative windows mean "off"; values beyond `u32` are rejected.
fn throttle_minutes(value: i64) -> Option<u32> {
    u32::try_from(value.max(0)).ok()
}

fn min_phone_digits(value: i64) -> usize {
    usize::try_from(value)
        .unwrap_or(MIN_PHONE_DIGITS_FLOOR)
        .max(MIN_PHONE_DIGITS_FLOOR)
}

fn non_empty_path(path: PathBuf) -> Option<PathBuf> {
    if path.as_os_str().is_empty() {
        None
    } else {
        Some(path)
    }
}

fn resolve_paths(config: &mut AppConfig, base_dir: &Path) {
    config.dataset.path = absolutize(base_dir, &config.dataset.path);
    if let Some(log_path) = config.log_path.as_mut() {
        *log_path = absolutize(base_dir, log_path);
    }
}

fn absolutize(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
