use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::encoding::{DEFAULT_CANDIDATES, EncodingDetector, TextEncoding};
use crate::subtitle::VttOptions;

/// Application configuration module
/// This module handles loading, validating and saving the media library
/// settings. Every field has a serde default so partial files are accepted.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Directory shown at the top of the library
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Subtitle conversion settings
    #[serde(default)]
    pub subtitles: SubtitleConfig,

    /// Directory listing settings
    #[serde(default)]
    pub listing: ListingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Configuration for subtitle conversion
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SubtitleConfig {
    /// Encodings tried in order when sniffing a subtitle file
    #[serde(default = "default_encoding_candidates")]
    pub encoding_candidates: Vec<TextEncoding>,

    /// Files larger than this are served untouched instead of converted
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: u64,

    /// Whether WebVTT output repeats the SRT cue numbers
    #[serde(default)]
    pub include_cue_ids: bool,

    /// Content type used when a subtitle is served unconverted
    #[serde(default = "default_fallback_content_type")]
    pub fallback_content_type: String,
}

impl Default for SubtitleConfig {
    fn default() -> Self {
        Self {
            encoding_candidates: default_encoding_candidates(),
            max_input_bytes: default_max_input_bytes(),
            include_cue_ids: false,
            fallback_content_type: default_fallback_content_type(),
        }
    }
}

impl SubtitleConfig {
    // @returns: Detector using the configured candidate order
    pub fn detector(&self) -> EncodingDetector {
        EncodingDetector::new(self.encoding_candidates.clone())
    }

    // @returns: Writer options derived from this config
    pub fn vtt_options(&self) -> VttOptions {
        VttOptions {
            include_cue_ids: self.include_cue_ids,
        }
    }
}

/// Configuration for directory listings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ListingConfig {
    /// Attach a sibling image with the same stem as a video's poster
    #[serde(default = "default_true")]
    pub load_posters: bool,

    /// Image extensions considered as posters, in priority order
    #[serde(default = "default_poster_extensions")]
    pub poster_extensions: Vec<String>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            load_posters: true,
            poster_extensions: default_poster_extensions(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
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
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_encoding_candidates() -> Vec<TextEncoding> {
    DEFAULT_CANDIDATES.to_vec()
}

fn default_max_input_bytes() -> u64 {
    10 * 1024 * 1024 // SRT files are rarely above a few hundred KB
}

fn default_fallback_content_type() -> String {
    "text/plain".to_string()
}

fn default_poster_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a JSON configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            warn!("Config file not found at '{}', using defaults.", path.display());
            Ok(Self::default())
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.root_dir.as_os_str().is_empty() {
            return Err(anyhow!("Root directory must not be empty"));
        }

        if self.subtitles.encoding_candidates.is_empty() {
            return Err(anyhow!("At least one subtitle encoding candidate is required"));
        }

        if self.subtitles.max_input_bytes == 0 {
            return Err(anyhow!("Subtitle max_input_bytes must be greater than zero"));
        }

        if self.subtitles.fallback_content_type.trim().is_empty() {
            return Err(anyhow!("Subtitle fallback content type must not be empty"));
        }

        if self.listing.poster_extensions.iter().any(|ext| ext.trim().is_empty()) {
            return Err(anyhow!("Poster extensions must not be empty strings"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            root_dir: default_root_dir(),
            subtitles: SubtitleConfig::default(),
            listing: ListingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
