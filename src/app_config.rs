use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::html::LinkSettings;
use crate::translation::TranslationOptions;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO 639-1)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Mirror subdirectory name below the site root
    #[serde(default = "default_target_subdir")]
    pub target_subdir: String,

    /// Switcher label on translated pages, linking back to the original
    #[serde(default = "default_source_label")]
    pub source_label: String,

    /// Switcher label on source pages, linking to the mirror
    #[serde(default = "default_target_label")]
    pub target_label: String,

    /// Translation API settings
    #[serde(default)]
    pub translation: TranslationSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation API settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationSettings {
    // @field: Override for the API endpoint (empty uses the public API)
    #[serde(default)]
    pub endpoint: String,

    // @field: Max texts per request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    // @field: Max cumulative characters per request
    #[serde(default = "default_max_chars_per_batch")]
    pub max_chars_per_batch: usize,

    // @field: Request budget per minute
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,

    // @field: Attempts per batch before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    // @field: Timeout seconds per request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            batch_size: default_batch_size(),
            max_chars_per_batch: default_max_chars_per_batch(),
            requests_per_minute: default_requests_per_minute(),
            max_attempts: default_max_attempts(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Default level
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything
    Trace,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            target_language: default_target_language(),
            target_subdir: default_target_subdir(),
            source_label: default_source_label(),
            target_label: default_target_label(),
            translation: TranslationSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if isolang::Language::from_639_1(&self.source_language).is_none() {
            return Err(anyhow!(
                "Invalid source language code: {}",
                self.source_language
            ));
        }
        if isolang::Language::from_639_1(&self.target_language).is_none() {
            return Err(anyhow!(
                "Invalid target language code: {}",
                self.target_language
            ));
        }
        if self.source_language == self.target_language {
            return Err(anyhow!(
                "Source and target language are both '{}'",
                self.source_language
            ));
        }

        if self.target_subdir.is_empty()
            || self.target_subdir.contains('/')
            || self.target_subdir.contains('\\')
            || self.target_subdir == "."
            || self.target_subdir == ".."
        {
            return Err(anyhow!(
                "Target subdirectory must be a single path segment, got '{}'",
                self.target_subdir
            ));
        }

        if self.translation.batch_size == 0 {
            return Err(anyhow!("batch_size must be at least 1"));
        }
        if self.translation.max_chars_per_batch == 0 {
            return Err(anyhow!("max_chars_per_batch must be at least 1"));
        }
        if self.translation.requests_per_minute == 0 {
            return Err(anyhow!("requests_per_minute must be at least 1"));
        }
        if self.translation.max_attempts == 0 {
            return Err(anyhow!("max_attempts must be at least 1"));
        }

        Ok(())
    }

    /// Link-injection settings derived from this configuration
    pub fn link_settings(&self) -> LinkSettings {
        LinkSettings {
            source_language: self.source_language.clone(),
            target_language: self.target_language.clone(),
            target_subdir: self.target_subdir.clone(),
            source_label: self.source_label.clone(),
            target_label: self.target_label.clone(),
        }
    }

    /// Translation-service tunables derived from this configuration
    pub fn translation_options(&self) -> TranslationOptions {
        TranslationOptions {
            batch_size: self.translation.batch_size,
            max_chars_per_batch: self.translation.max_chars_per_batch,
            requests_per_minute: self.translation.requests_per_minute,
            max_attempts: self.translation.max_attempts,
            ..TranslationOptions::default()
        }
    }
}

fn default_source_language() -> String {
    "ru".to_string()
}

fn default_target_language() -> String {
    "uz".to_string()
}

fn default_target_subdir() -> String {
    "uz".to_string()
}

fn default_source_label() -> String {
    "Русский".to_string()
}

fn default_target_label() -> String {
    "O'zbekcha".to_string()
}

fn default_batch_size() -> usize {
    80
}

fn default_max_chars_per_batch() -> usize {
    9000
}

fn default_requests_per_minute() -> u32 {
    300
}

fn default_max_attempts() -> u32 {
    6
}

fn default_timeout_secs() -> u64 {
    60
}
