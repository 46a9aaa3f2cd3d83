/*!
 * Mock provider implementations for dry runs and testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Tags every line as translated
 * - `MockProvider::echo()` - Returns the source lines unchanged
 * - `MockProvider::short(n)` - Returns only the first `n` lines
 * - `MockProvider::failing()` - Always fails with an error
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Mock request for testing
#[derive(Debug, Clone)]
pub struct MockRequest {
    /// The full prompt that would have been sent
    pub prompt: String,
    /// The source lines embedded in the prompt
    pub lines: Vec<String>,
}

/// Mock response for testing
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// The translated text, `None` simulates a response without text blocks
    pub text: Option<String>,
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds, prefixing each line with a marker
    Working,
    /// Returns every source line unchanged
    Echo,
    /// Returns only the first `keep` lines
    Short { keep: usize },
    /// Returns every line plus a trailing commentary line
    Overlong,
    /// Always fails with an API error
    Failing,
    /// Returns an empty text block
    Empty,
    /// Returns no text block at all
    NoContent,
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Custom line translator (optional)
    custom_line: Option<fn(&str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_line: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that returns the input untouched
    pub fn echo() -> Self {
        Self::new(MockBehavior::Echo)
    }

    /// Create a mock that drops all but the first `keep` lines
    pub fn short(keep: usize) -> Self {
        Self::new(MockBehavior::Short { keep })
    }

    /// Create a mock that appends an unrequested line
    pub fn overlong() -> Self {
        Self::new(MockBehavior::Overlong)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns an empty text
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Create a mock whose response has no text content
    pub fn no_content() -> Self {
        Self::new(MockBehavior::NoContent)
    }

    /// Set a custom per-line translator used by the working behavior
    pub fn with_custom_line(mut self, translator: fn(&str) -> String) -> Self {
        self.custom_line = Some(translator);
        self
    }

    /// Number of requests completed so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn translate_line(&self, line: &str) -> String {
        match self.custom_line {
            Some(translator) => translator(line),
            None => format!("[TRANSLATED] {}", line),
        }
    }
}

impl Clone for MockProvider {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            request_count: Arc::clone(&self.request_count),
            custom_line: self.custom_line,
        }
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = MockRequest;
    type Response = MockResponse;

    fn build_request(&self, prompt: &str, texts: &[String]) -> Self::Request {
        MockRequest {
            prompt: prompt.to_string(),
            lines: texts.to_vec(),
        }
    }

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        let text = match self.behavior {
            MockBehavior::Working => request.lines.iter()
                .map(|line| self.translate_line(line))
                .collect::<Vec<_>>()
                .join("\n"),
            MockBehavior::Echo => request.lines.join("\n"),
            MockBehavior::Short { keep } => request.lines.iter()
                .take(keep)
                .map(|line| self.translate_line(line))
                .collect::<Vec<_>>()
                .join("\n"),
            MockBehavior::Overlong => {
                let mut lines: Vec<String> = request.lines.iter()
                    .map(|line| self.translate_line(line))
                    .collect();
                lines.push("Note: all labels translated.".to_string());
                lines.join("\n")
            }
            MockBehavior::Failing => {
                return Err(ProviderError::ApiError {
                    message: "Simulated provider failure".to_string(),
                    status_code: 500,
                });
            }
            MockBehavior::Empty => String::new(),
            MockBehavior::NoContent => return Ok(MockResponse { text: None }),
        };

        Ok(MockResponse { text: Some(text) })
    }

    fn extract_text(response: &Self::Response) -> Option<String> {
        response.text.clone()
    }
}
