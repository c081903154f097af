//! Optional user configuration, read from `config.toml`.

use directories::ProjectDirs;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_PRECISION: usize = 2;
const MAX_PRECISION: usize = 17;

/// Settings for the command line, after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Logging level used when `RUST_LOG` is not set.
    pub log_level: Option<LevelFilter>,
    /// Decimal places for non-integral numbers.
    pub precision: usize,
    /// Pretty-print JSON on save.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: None,
            precision: DEFAULT_PRECISION,
            pretty: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    log_level: Option<String>,
    precision: Option<usize>,
    pretty: Option<bool>,
}

/// Load the config from `config_file`, or from the user config dir when no
/// path is given. Problems are returned as warnings and the defaults are kept.
pub fn load_config(config_file: Option<&Path>) -> (Config, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = config_file.map(Path::to_path_buf).or_else(user_config_path);

    let Some(path) = config_path else {
        return (Config::default(), warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (Config::default(), warnings);
    }

    let file = match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<ConfigFile>(&content) {
            Ok(parsed) => parsed,
            Err(err) => {
                warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                ConfigFile::default()
            }
        },
        Err(err) => {
            warnings.push(format!("Failed to read {}: {}", path.display(), err));
            ConfigFile::default()
        }
    };

    (apply(file, &mut warnings), warnings)
}

fn apply(file: ConfigFile, warnings: &mut Vec<String>) -> Config {
    let mut config = Config::default();

    if let Some(level) = file.log_level {
        match level.trim().parse::<LevelFilter>() {
            Ok(filter) => config.log_level = Some(filter),
            Err(_) => warnings.push(format!("Unknown log_level '{}'", level)),
        }
    }
    if let Some(precision) = file.precision {
        if precision <= MAX_PRECISION {
            config.precision = precision;
        } else {
            warnings.push(format!(
                "precision {} is out of range (0-{}), using {}",
                precision, MAX_PRECISION, DEFAULT_PRECISION
            ));
        }
    }
    if let Some(pretty) = file.pretty {
        config.pretty = pretty;
    }
    config
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "sheetcalc")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
