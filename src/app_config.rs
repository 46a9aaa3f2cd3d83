use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

use crate::translation::classifier::{HeuristicClassifier, DEFAULT_MIN_TEXT_LENGTH};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    pub source_language: String,

    /// Target language code (ISO)
    pub target_language: String,

    /// Translation config
    pub translation: TranslationConfig,

    /// Code-likeness classifier settings
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Input file constraints
    #[serde(default)]
    pub files: FileConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Anthropic
    #[default]
    Anthropic,
    // @provider: Offline mock, tags texts instead of translating them
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Anthropic => "Anthropic",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Anthropic => "anthropic".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Environment variables checked, in order, when no API key is configured
pub const API_KEY_ENV_VARS: [&str; 2] = ["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"];

/// Anthropic service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnthropicConfig {
    /// Model name
    #[serde(default = "default_anthropic_model")]
    pub model: String,

    /// API key for the service, falls back to the environment when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL
    #[serde(default = "default_anthropic_endpoint")]
    pub endpoint: String,

    /// Maximum number of tokens in the reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            model: default_anthropic_model(),
            api_key: String::new(),
            endpoint: default_anthropic_endpoint(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

impl AnthropicConfig {
    /// Resolve the API key from the config, then from the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key using a custom environment lookup
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.api_key.trim().is_empty() {
            return Some(self.api_key.trim().to_string());
        }

        API_KEY_ENV_VARS.iter()
            .filter_map(|name| lookup(*name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Anthropic settings
    #[serde(default)]
    pub anthropic: AnthropicConfig,
}

impl TranslationConfig {
    /// Whether the active provider has what it needs to run
    pub fn is_configured(&self) -> bool {
        match self.provider {
            TranslationProvider::Anthropic => self.anthropic.resolve_api_key().is_some(),
            TranslationProvider::Mock => true,
        }
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        match self.provider {
            TranslationProvider::Anthropic => self.anthropic.model.clone(),
            TranslationProvider::Mock => "mock".to_string(),
        }
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        match self.provider {
            TranslationProvider::Anthropic => self.anthropic.endpoint.clone(),
            TranslationProvider::Mock => String::new(),
        }
    }
}

/// Classifier settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClassifierConfig {
    /// Texts shorter than this many characters are never translated
    #[serde(default = "default_min_text_length")]
    pub min_text_length: usize,

    /// Extra regular expressions marking text as code-like
    #[serde(default)]
    pub extra_code_patterns: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_text_length: default_min_text_length(),
            extra_code_patterns: Vec::new(),
        }
    }
}

impl ClassifierConfig {
    /// Build the heuristic classifier described by these settings
    pub fn build(&self) -> Result<HeuristicClassifier> {
        HeuristicClassifier::new()
            .with_min_text_length(self.min_text_length)
            .with_patterns(self.extra_code_patterns.as_slice())
    }
}

/// Input file constraints
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FileConfig {
    /// Largest accepted input, in bytes
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,

    /// Accepted file extensions, without the dot
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// Log verbosity level
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
    /// Matching `log` filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-sonnet-20240229".to_string()
}

fn default_min_text_length() -> usize {
    DEFAULT_MIN_TEXT_LENGTH
}

fn default_max_file_size_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["mui".to_string()]
}

impl Config {
    /// Validate the configuration for consistency and required values.
    ///
    /// A missing API key is not a validation error: it surfaces as
    /// "service not configured" when a translation is attempted.
    pub fn validate(&self) -> Result<()> {
        // Validate languages
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        if crate::language_utils::language_codes_match(&self.source_language, &self.target_language) {
            return Err(anyhow!(
                "Source and target language are the same: {} / {}",
                self.source_language,
                self.target_language
            ));
        }

        if self.translation.anthropic.max_tokens == 0 {
            return Err(anyhow!("max_tokens must be greater than zero"));
        }

        if let Some(temperature) = self.translation.anthropic.temperature {
            if !(0.0..=1.0).contains(&temperature) {
                return Err(anyhow!("temperature must be between 0.0 and 1.0, got {}", temperature));
            }
        }

        self.classifier.build()?;

        if self.files.allowed_extensions.is_empty() {
            return Err(anyhow!("At least one allowed file extension is required"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: "en".to_string(),
            target_language: "pl".to_string(),
            translation: TranslationConfig::default(),
            classifier: ClassifierConfig::default(),
            files: FileConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
