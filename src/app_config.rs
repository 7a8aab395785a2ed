use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the codec configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Language tag assigned to captions read from WebVTT
    #[serde(default = "default_language")]
    pub language: String,

    /// Reader options
    #[serde(default)]
    pub reader: ReaderConfig,

    /// Writer options
    #[serde(default)]
    pub writer: WriterConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// WebVTT reader options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ReaderConfig {
    /// Reject inverted cues and start times that go backwards
    #[serde(default)]
    pub strict_timing: bool,
}

impl ReaderConfig {
    pub fn strict() -> Self {
        Self { strict_timing: true }
    }
}

/// WebVTT writer options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WriterConfig {
    /// Convert absolute positioning to percentages of the video frame.
    /// When off, absolute positioning is dropped from the output.
    #[serde(default = "default_true")]
    pub relativize: bool,

    /// Clamp relativized positioning to the visible frame
    #[serde(default = "default_true")]
    pub fit_to_screen: bool,

    /// Video width in pixels, needed to relativize horizontal pixel values
    #[serde(default)]
    pub video_width: Option<u32>,

    /// Video height in pixels, needed to relativize vertical pixel values
    #[serde(default)]
    pub video_height: Option<u32>,
}

impl WriterConfig {
    pub fn with_video_size(mut self, width: u32, height: u32) -> Self {
        self.video_width = Some(width);
        self.video_height = Some(height);
        self
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            relativize: default_true(),
            fit_to_screen: default_true(),
            video_width: None,
            video_height: None,
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_tag(&self.language)?;

        if self.writer.video_width == Some(0) {
            return Err(anyhow!("Video width must be greater than zero"));
        }
        if self.writer.video_height == Some(0) {
            return Err(anyhow!("Video height must be greater than zero"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            reader: ReaderConfig::default(),
            writer: WriterConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
