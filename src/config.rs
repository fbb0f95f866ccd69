//! Validation limits and supported languages
//!
//! The built-in defaults mirror the WhatsApp Business Platform. A TOML file
//! can override any subset of them:
//!
//! ```toml
//! [metadata]
//! name = "strict"
//!
//! [limits]
//! body_text = 900
//!
//! [languages]
//! codes = ["en_US", "es"]
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Length and cardinality limits, in characters and items
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub name: usize,
    pub body_text: usize,
    pub header_text: usize,
    pub footer_text: usize,
    pub button_text: usize,
    pub copy_code: usize,
    pub buttons: usize,
    pub url_buttons: usize,
    pub phone_buttons: usize,
    pub copy_code_buttons: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            name: 512,
            body_text: 1024,
            header_text: 60,
            footer_text: 60,
            button_text: 25,
            copy_code: 15,
            buttons: 10,
            url_buttons: 2,
            phone_buttons: 1,
            copy_code_buttons: 1,
        }
    }
}

/// Locale codes accepted by the platform
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "af", "sq", "ar", "az", "bn", "bg", "ca", "zh_CN", "zh_HK", "zh_TW", "hr", "cs", "da", "nl",
    "en", "en_GB", "en_US", "et", "fil", "fi", "fr", "ka", "de", "el", "gu", "ha", "he", "hi",
    "hu", "id", "ga", "it", "ja", "kn", "kk", "rw_RW", "ko", "ky_KG", "lo", "lv", "lt", "mk",
    "ms", "ml", "mr", "nb", "fa", "pl", "pt_BR", "pt_PT", "pa", "ro", "ru", "sr", "sk", "sl",
    "es", "es_AR", "es_ES", "es_MX", "sw", "sv", "ta", "te", "th", "tr", "uk", "ur", "uz", "vi",
    "zu",
];

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Optional name for the profile
    pub name: Option<String>,
    pub limits: Limits,
    /// Accepted language codes
    pub languages: Vec<String>,
}

/// TOML structure for deserializing configs
#[derive(Deserialize)]
struct TomlConfig {
    metadata: Option<TomlMetadata>,
    limits: Option<Limits>,
    languages: Option<TomlLanguages>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

#[derive(Deserialize)]
struct TomlLanguages {
    codes: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: None,
            limits: Limits::default(),
            languages: SUPPORTED_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EngineConfig {
    /// Create a configuration with platform defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load config from TOML string; omitted values keep their defaults
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        Ok(EngineConfig {
            name: parsed.metadata.and_then(|m| m.name),
            limits: parsed.limits.unwrap_or(defaults.limits),
            languages: parsed
                .languages
                .map(|l| l.codes)
                .unwrap_or(defaults.languages),
        })
    }

    /// Replace the limits
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Replace the accepted language codes
    pub fn with_languages<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = codes.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_supported_language(&self, code: &str) -> bool {
        self.languages.iter().any(|l| l == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.limits.body_text, 1024);
        assert_eq!(config.limits.url_buttons, 2);
        assert!(config.is_supported_language("en_US"));
        assert!(config.is_supported_language("pt_BR"));
        assert!(!config.is_supported_language("xx"));
    }

    #[test]
    fn test_partial_limits_keep_defaults() {
        let config = EngineConfig::from_str(
            r#"
[limits]
body_text = 900
"#,
        )
        .expect("Should parse");
        assert_eq!(config.limits.body_text, 900);
        assert_eq!(config.limits.header_text, 60);
        assert!(config.is_supported_language("en"));
    }

    #[test]
    fn test_parse_toml_with_metadata_and_languages() {
        let config = EngineConfig::from_str(
            r#"
[metadata]
name = "latam"

[languages]
codes = ["es", "pt_BR"]
"#,
        )
        .expect("Should parse");
        assert_eq!(config.name, Some("latam".to_string()));
        assert!(config.is_supported_language("es"));
        assert!(!config.is_supported_language("en"));
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new().with_languages(["de"]).with_limits(Limits {
            buttons: 3,
            ..Limits::default()
        });
        assert_eq!(config.limits.buttons, 3);
        assert_eq!(config.languages, vec!["de".to_string()]);
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = EngineConfig::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
