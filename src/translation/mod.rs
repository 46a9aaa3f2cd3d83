/*!
 * Label file translation.
 *
 * This module contains the extraction / reconstruction core and the
 * gateway to the AI provider. It is split into several submodules:
 *
 * - `classifier`: Decides which texts look like code and stay untranslated
 * - `extractor`: Collects translatable element texts in document order
 * - `gateway`: Sends texts to a provider and reconciles the answer
 * - `prompts`: The label translation prompt template
 * - `reconstructor`: Puts translations back into the raw document
 * - `report`: Audit report pairing originals and translations
 * - `pipeline`: Runs the stages for one file
 */

// Re-export main types for easier usage
pub use self::classifier::{is_code_like, CodeClassifier, HeuristicClassifier};
pub use self::extractor::{extract, Extraction, Extractor, LabelDocument, TranslatableNode};
pub use self::gateway::{gateway_from_config, reconcile_translations, ProviderGateway, TranslationGateway};
pub use self::pipeline::{LabelPipeline, PipelineConfig, PipelineOutput, PipelineStats};
pub use self::prompts::PromptTemplate;
pub use self::reconstructor::{reconstruct, reconstruct_with_stats, Reconstruction};
pub use self::report::{generate_report, ReportGenerator};

// Submodules
pub mod classifier;
pub mod extractor;
pub mod gateway;
pub mod pipeline;
pub mod prompts;
pub mod reconstructor;
pub mod report;
