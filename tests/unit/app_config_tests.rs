/*!
 * Tests for application configuration
 */

use uzmirror::app_config::{Config, LogLevel};

#[test]
fn test_config_default_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.source_language, "ru");
    assert_eq!(config.target_language, "uz");
    assert_eq!(config.target_subdir, "uz");
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_fromEmptyJson_shouldUseDefaults() {
    let config: Config = serde_json::from_str("{}").unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.translation.batch_size, 80);
    assert_eq!(config.translation.max_chars_per_batch, 9000);
    assert_eq!(config.translation.requests_per_minute, 300);
    assert_eq!(config.translation.max_attempts, 6);
}

#[test]
fn test_config_fromPartialJson_shouldOverrideOnlyGivenFields() {
    let config: Config = serde_json::from_str(
        r#"{"target_language": "kk", "translation": {"batch_size": 10}, "log_level": "debug"}"#,
    )
    .unwrap();
    assert_eq!(config.target_language, "kk");
    assert_eq!(config.translation.batch_size, 10);
    assert_eq!(config.translation.requests_per_minute, 300);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_validate_withBadLanguageCode_shouldFail() {
    let mut config = Config::default();
    config.source_language = "russian".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withSameLanguages_shouldFail() {
    let mut config = Config::default();
    config.target_language = "ru".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withSlashInSubdir_shouldFail() {
    let mut config = Config::default();
    config.target_subdir = "uz/latin".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withZeroBatchSize_shouldFail() {
    let mut config = Config::default();
    config.translation.batch_size = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_linkSettings_shouldMirrorConfigFields() {
    let config = Config::default();
    let settings = config.link_settings();
    assert_eq!(settings.source_language, "ru");
    assert_eq!(settings.target_language, "uz");
    assert_eq!(settings.target_subdir, "uz");
    assert_eq!(settings.source_label, "Русский");
    assert_eq!(settings.target_label, "O'zbekcha");
}

#[test]
fn test_translationOptions_shouldMirrorConfigFields() {
    let mut config = Config::default();
    config.translation.batch_size = 7;
    config.translation.requests_per_minute = 42;

    let options = config.translation_options();
    assert_eq!(options.batch_size, 7);
    assert_eq!(options.requests_per_minute, 42);
}
