/*!
 * # muilate - label file translation with AI
 *
 * A Rust library for translating the user-visible labels of `.mui` files
 * used by laser cutting and engraving software.
 *
 * ## Features
 *
 * - Extract human-readable element texts, skipping identifiers and numbers
 * - Translate them in one request through the Anthropic API
 * - Put translations back into the raw file, keeping every byte of structure
 * - Validate the rebuilt file before handing it out
 * - Write an audit report pairing originals with translations
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `translation`: The label translation pipeline:
 *   - `translation::classifier`: Code-likeness rules
 *   - `translation::extractor`: Translatable text extraction
 *   - `translation::gateway`: Provider-backed translation and reconciliation
 *   - `translation::reconstructor`: Substitution into the raw document
 *   - `translation::report`: Translation report
 *   - `translation::pipeline`: Stage orchestration
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for LLM providers:
 *   - `providers::anthropic`: Anthropic API client
 *   - `providers::mock`: Offline provider for dry runs and tests
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod translation;
pub mod app_controller;
pub mod language_utils;
pub mod providers;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use translation::{LabelPipeline, PipelineConfig, PipelineOutput, TranslatableNode};
pub use language_utils::{language_codes_match, normalize_to_part2t, get_language_name};
pub use errors::{PipelineError, ProviderError};
