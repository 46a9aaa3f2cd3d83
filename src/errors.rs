/*!
 * Error types for the muilate application.
 *
 * This module contains custom error types for the different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 * Library stages return these typed errors; the binary and the controller
 * work with `anyhow` at the edge.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised by the extraction / translation / reconstruction pipeline.
///
/// Every stage fails fast with one of these; nothing is retried.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input is not well-formed markup
    #[error("Invalid file format: {0}")]
    Parse(String),

    /// Extraction produced zero nodes
    #[error("No translatable text found in file")]
    NoTranslatableContent,

    /// No credentials for the translation service
    #[error("Translation service not configured: {0}")]
    ServiceNotConfigured(String),

    /// The translation gateway failed or returned a malformed payload
    #[error("Translation failed: {0}")]
    Gateway(#[from] ProviderError),

    /// The substituted document no longer parses
    #[error("Reconstruction failed, file structure was damaged: {0}")]
    Reconstruction(String),
}

impl PipelineError {
    /// Short message suitable for showing to the person who submitted the file
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Parse(_) => "Invalid file format: the file is not well-formed markup",
            Self::NoTranslatableContent => "No translatable text found in the file",
            Self::ServiceNotConfigured(_) => {
                "Translation service is not configured (missing API key)"
            }
            Self::Gateway(_) => "The translation service failed to translate the texts",
            Self::Reconstruction(_) => {
                "Could not rebuild the file: its structure would have been damaged"
            }
        }
    }
}
