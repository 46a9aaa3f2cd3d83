/*!
 * Provider implementations for the translation service.
 *
 * This module contains client implementations for LLM providers:
 * - Anthropic: Anthropic messages API integration
 * - Mock: Offline provider with scripted behaviors, for dry runs and tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all LLM providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably behind the translation gateway.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Build a single-turn request for the given prompt
    ///
    /// # Arguments
    /// * `prompt` - The full user prompt
    /// * `texts` - The source lines embedded in the prompt, in order
    fn build_request(&self, prompt: &str, texts: &[String]) -> Self::Request;

    /// Complete a request using this provider
    ///
    /// # Returns
    /// * `Result<Self::Response, ProviderError>` - The response from the provider or an error
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Extract text from the provider response
    ///
    /// Returns `None` when the response carries no text content at all.
    fn extract_text(response: &Self::Response) -> Option<String>;
}

pub mod anthropic;
pub mod mock;
