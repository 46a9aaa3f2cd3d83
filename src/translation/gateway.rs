/*!
 * Translation gateway: the boundary between the pipeline and an AI provider.
 *
 * The pipeline hands over an ordered list of texts and gets back an
 * ordered list of translations. Providers are free to answer with the
 * wrong number of lines; `reconcile_translations` restores the one-to-one
 * alignment the reconstructor relies on.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::app_config::{Config, TranslationProvider};
use crate::errors::{PipelineError, ProviderError};
use crate::language_utils;
use crate::providers::Provider;
use crate::providers::anthropic::Anthropic;
use crate::providers::mock::MockProvider;
use crate::translation::prompts::PromptTemplate;

/// Ordered-list-in, ordered-list-out translation capability
#[async_trait]
pub trait TranslationGateway: Send + Sync {
    /// Translate `texts`, one output line per input line where possible
    async fn translate(&self, texts: &[String]) -> Result<Vec<String>, ProviderError>;

    /// Short description for logs, e.g. provider and model
    fn describe(&self) -> String;
}

/// Gateway that prompts a `Provider` with the label translation template
#[derive(Debug)]
pub struct ProviderGateway<P: Provider> {
    provider: P,
    template: PromptTemplate,
    source_language: String,
    target_language: String,
    description: String,
}

impl<P: Provider> ProviderGateway<P> {
    /// Create a gateway translating between the given language names
    pub fn new(provider: P, source_language: impl Into<String>, target_language: impl Into<String>) -> Self {
        let description = std::any::type_name::<P>()
            .rsplit("::")
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            provider,
            template: PromptTemplate::default(),
            source_language: source_language.into(),
            target_language: target_language.into(),
            description,
        }
    }

    /// Replace the prompt template
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Override the description used in logs
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Build the prompt sent for `texts`
    pub fn prompt(&self, texts: &[String]) -> String {
        self.template.render(&self.source_language, &self.target_language, texts)
    }
}

#[async_trait]
impl<P: Provider> TranslationGateway for ProviderGateway<P> {
    async fn translate(&self, texts: &[String]) -> Result<Vec<String>, ProviderError> {
        // the answer is parsed line by line, so each text must occupy exactly one prompt line
        let lines: Vec<String> = texts.iter().map(|text| single_line(text)).collect();
        let prompt = self.prompt(&lines);
        debug!("Prompt is {} characters for {} texts", prompt.len(), lines.len());

        let request = self.provider.build_request(&prompt, &lines);
        let response = self.provider.complete(request).await?;
        let text = P::extract_text(&response)
            .ok_or_else(|| ProviderError::ParseError("Response contained no text content".to_string()))?;

        Ok(split_response_lines(&text))
    }

    fn describe(&self) -> String {
        self.description.clone()
    }
}

/// Collapse every whitespace run, line breaks included, into a single space
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a provider response into trimmed, non-empty lines
pub fn split_response_lines(text: &str) -> Vec<String> {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Align translations with the source texts.
///
/// Missing entries are backfilled with the corresponding source text and
/// surplus entries are dropped, so the result always has `sources.len()` items.
pub fn reconcile_translations(sources: &[String], mut translations: Vec<String>) -> Vec<String> {
    if translations.len() != sources.len() {
        warn!(
            "Translation count ({}) does not match text count ({})",
            translations.len(),
            sources.len()
        );
    }

    if translations.len() > sources.len() {
        translations.truncate(sources.len());
    } else {
        let start = translations.len();
        translations.extend(sources[start..].iter().cloned());
    }
    translations
}

/// Build the gateway selected by the configuration.
///
/// Fails with `ServiceNotConfigured` before any network access when the
/// selected provider needs credentials that are missing.
pub fn gateway_from_config(config: &Config) -> Result<Box<dyn TranslationGateway>, PipelineError> {
    let source = language_utils::get_language_name(&config.source_language)
        .map_err(|e| PipelineError::ServiceNotConfigured(e.to_string()))?;
    let target = language_utils::get_language_name(&config.target_language)
        .map_err(|e| PipelineError::ServiceNotConfigured(e.to_string()))?;

    match config.translation.provider {
        TranslationProvider::Anthropic => {
            let settings = &config.translation.anthropic;
            let api_key = settings.resolve_api_key().ok_or_else(|| {
                PipelineError::ServiceNotConfigured(
                    "No Anthropic API key. Set it in the config or via ANTHROPIC_API_KEY / CLAUDE_API_KEY".to_string(),
                )
            })?;

            let client = Anthropic::with_timeout(
                api_key,
                settings.endpoint.clone(),
                Duration::from_secs(settings.timeout_secs),
            )?
            .model(settings.model.clone())
            .max_tokens(settings.max_tokens)
            .temperature(settings.temperature);

            info!("Using Anthropic model {} ({} -> {})", settings.model, source, target);
            Ok(Box::new(
                ProviderGateway::new(client, source, target)
                    .with_description(format!("Anthropic ({})", settings.model)),
            ))
        }
        TranslationProvider::Mock => {
            info!("Using mock provider ({} -> {})", source, target);
            Ok(Box::new(
                ProviderGateway::new(MockProvider::working(), source, target)
                    .with_description("Mock"),
            ))
        }
    }
}
