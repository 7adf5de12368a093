use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use mazecore::Dims;
use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.ron");

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load/save settings file: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse settings file: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const ORDER: [LogLevel; 6] = [
        LogLevel::Off,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Raises the level by `verbose` steps, or drops to errors only when `quiet`.
    pub fn adjusted(self, verbose: u8, quiet: bool) -> LogLevel {
        if quiet {
            return LogLevel::Error.min(self);
        }

        let idx = self as usize + verbose as usize;
        Self::ORDER[idx.min(Self::ORDER.len() - 1)]
    }

    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub size: Option<Dims>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub show_plain: Option<bool>,
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_size(mut self, value: Dims) -> Self {
        self.size = Some(value);
        self
    }

    pub fn get_size(&self) -> Option<Dims> {
        self.size
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_show_plain(mut self, value: bool) -> Self {
        self.show_plain = Some(value);
        self
    }

    pub fn get_show_plain(&self) -> bool {
        self.show_plain.unwrap_or(true)
    }

    pub fn set_log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mazesolv")
            .join("settings.ron")
    }

    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
    }

    pub fn from_ron(text: &str) -> Result<Self, SettingsError> {
        Ok(Self::options().from_str(text)?)
    }

    /// Loads settings from `path`, writing the default settings there first if the file
    /// doesn't exist yet.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_ron(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("Creating default settings at {}", path.display());
                Self::reset_config(path)?;
                Self::from_ron(DEFAULT_SETTINGS)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}
