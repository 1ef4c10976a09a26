/*!
 * Tests for application configuration functionality
 */

use anyhow::Result;
use std::path::PathBuf;

use cinema_family::app_config::{Config, LogLevel};
use cinema_family::encoding::{DEFAULT_CANDIDATES, TextEncoding};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.root_dir, PathBuf::from("."));
    assert_eq!(config.subtitles.encoding_candidates, DEFAULT_CANDIDATES.to_vec());
    assert_eq!(config.subtitles.max_input_bytes, 10 * 1024 * 1024);
    assert!(!config.subtitles.include_cue_ids);
    assert_eq!(config.subtitles.fallback_content_type, "text/plain");
    assert!(config.listing.load_posters);
    assert_eq!(config.listing.poster_extensions, vec!["jpg", "jpeg", "png"]);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.root_dir = PathBuf::new();
    assert!(config.validate().is_err());
    config.root_dir = PathBuf::from("/media");

    config.subtitles.encoding_candidates.clear();
    assert!(config.validate().is_err());
    config.subtitles.encoding_candidates = vec![TextEncoding::Utf8];

    config.subtitles.max_input_bytes = 0;
    assert!(config.validate().is_err());
    config.subtitles.max_input_bytes = 1;

    config.subtitles.fallback_content_type = "  ".to_string();
    assert!(config.validate().is_err());
    config.subtitles.fallback_content_type = "text/plain".to_string();

    config.listing.poster_extensions.push(String::new());
    assert!(config.validate().is_err());
    config.listing.poster_extensions.pop();

    assert!(config.validate().is_ok());
}

/// Test that a partial JSON file is completed with defaults
#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{
            "root_dir": "/srv/media",
            "subtitles": { "encoding_candidates": ["windows-1252", "UTF-8"], "include_cue_ids": true },
            "log_level": "debug"
        }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.root_dir, PathBuf::from("/srv/media"));
    assert_eq!(
        config.subtitles.encoding_candidates,
        vec![TextEncoding::Windows1252, TextEncoding::Utf8]
    );
    assert!(config.subtitles.include_cue_ids);
    assert!(config.subtitles.vtt_options().include_cue_ids);
    assert_eq!(config.subtitles.max_input_bytes, 10 * 1024 * 1024);
    assert!(config.listing.load_posters);
    assert_eq!(config.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that an unknown charset name is rejected
#[test]
fn test_from_file_withUnknownEncoding_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{ "subtitles": { "encoding_candidates": ["EBCDIC"] } }"#,
    )?;

    assert!(Config::from_file(&path).is_err());
    Ok(())
}

/// Test that a missing file yields the defaults
#[test]
fn test_load_or_default_withMissingFile_shouldReturnDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let config = Config::load_or_default(temp_dir.path().join("absent.json"))?;

    assert_eq!(config.root_dir, PathBuf::from("."));
    Ok(())
}

/// Test save and reload
#[test]
fn test_save_withModifiedConfig_shouldReloadSameValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("saved.json");

    let mut config = Config::default();
    config.root_dir = PathBuf::from("/data/videos");
    config.subtitles.encoding_candidates = vec![TextEncoding::Utf16, TextEncoding::Iso8859_1];
    config.listing.load_posters = false;
    config.log_level = LogLevel::Trace;
    config.save(&path)?;

    let reloaded = Config::from_file(&path)?;
    assert_eq!(reloaded.root_dir, config.root_dir);
    assert_eq!(reloaded.subtitles.encoding_candidates, config.subtitles.encoding_candidates);
    assert!(!reloaded.listing.load_posters);
    assert_eq!(reloaded.log_level, LogLevel::Trace);
    Ok(())
}

/// Test the detector built from the configuration
#[test]
fn test_detector_withCustomCandidates_shouldUseConfiguredOrder() {
    let mut config = Config::default();
    config.subtitles.encoding_candidates = vec![TextEncoding::UsAscii, TextEncoding::Windows1252];

    let detector = config.subtitles.detector();

    assert_eq!(detector.candidates(), &[TextEncoding::UsAscii, TextEncoding::Windows1252]);
    assert_eq!(detector.detect(&[0x93]), TextEncoding::Windows1252);
}

/// Test log level mapping
#[test]
fn test_log_level_to_level_filter_shouldMapEachLevel() {
    assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    assert_eq!(LogLevel::Info.to_level_filter(), log::LevelFilter::Info);
    assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
}
