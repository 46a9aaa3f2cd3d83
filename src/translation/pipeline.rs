/*!
 * Label translation pipeline.
 *
 * One pipeline run handles one file: extract → translate → reconcile →
 * reconstruct → report. Every stage fails fast with a `PipelineError`;
 * the only tolerated irregularities are short gateway responses (backfilled
 * with the originals) and snippets that can no longer be found (skipped).
 */

use std::time::{Duration, Instant};

use log::info;

use crate::errors::PipelineError;
use crate::translation::classifier::{CodeClassifier, HeuristicClassifier};
use crate::translation::extractor::{Extraction, Extractor, TranslatableNode};
use crate::translation::gateway::{reconcile_translations, TranslationGateway};
use crate::translation::reconstructor::reconstruct_with_stats;
use crate::translation::report::ReportGenerator;

/// Everything a pipeline needs, passed in explicitly
pub struct PipelineConfig {
    /// Translation capability
    pub gateway: Box<dyn TranslationGateway>,
    /// Code-likeness policy used during extraction
    pub classifier: Box<dyn CodeClassifier>,
    /// File name shown in the report header
    pub source_name: Option<String>,
}

impl PipelineConfig {
    /// Create a configuration with the default heuristic classifier
    pub fn new(gateway: Box<dyn TranslationGateway>) -> Self {
        Self {
            gateway,
            classifier: Box::new(HeuristicClassifier::default()),
            source_name: None,
        }
    }

    /// Replace the classifier
    pub fn with_classifier(mut self, classifier: Box<dyn CodeClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the file name shown in the report
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }
}

/// Substitution statistics of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    /// Nodes extracted
    pub extracted: usize,
    /// Lines returned by the gateway before reconciliation
    pub received: usize,
    /// Nodes substituted into the document
    pub substituted: usize,
    /// Indices of nodes whose snippet could not be found
    pub skipped: Vec<usize>,
    /// Time spent waiting for the gateway
    pub gateway_duration: Duration,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Rebuilt document text
    pub document: String,
    /// Audit report text
    pub report: String,
    /// Extracted nodes, in canonical order
    pub nodes: Vec<TranslatableNode>,
    /// Reconciled translations, index-aligned with `nodes`
    pub translations: Vec<String>,
    /// Run statistics
    pub stats: PipelineStats,
}

/// Translates one label document
pub struct LabelPipeline {
    config: PipelineConfig,
}

impl LabelPipeline {
    /// Create a pipeline from its configuration
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Description of the gateway in use
    pub fn gateway_description(&self) -> String {
        self.config.gateway.describe()
    }

    /// Run extraction only, without contacting the gateway
    pub fn extract_only(&self, content: &str) -> Result<Extraction, PipelineError> {
        Extractor::new(self.config.classifier.as_ref()).extract(content)
    }

    /// Run the whole pipeline on raw file content
    pub async fn run(&self, content: &str) -> Result<PipelineOutput, PipelineError> {
        info!("Parsing label file");
        let Extraction { document, nodes } = self.extract_only(content)?;
        if nodes.is_empty() {
            return Err(PipelineError::NoTranslatableContent);
        }

        info!("Translating {} texts with {}", nodes.len(), self.config.gateway.describe());
        let sources: Vec<String> = nodes.iter().map(|n| n.original_text.clone()).collect();
        let started = Instant::now();
        let received = self.config.gateway.translate(&sources).await?;
        let gateway_duration = started.elapsed();
        let received_count = received.len();
        let translations = reconcile_translations(&sources, received);

        info!("Rebuilding file with translations");
        let reconstruction = reconstruct_with_stats(document.raw(), &nodes, &translations)?;

        let mut generator = ReportGenerator::new(&nodes, &translations)
            .skipped(&reconstruction.skipped);
        if let Some(name) = self.config.source_name.as_deref() {
            generator = generator.source_name(name);
        }
        let report = generator.render();

        let stats = PipelineStats {
            extracted: nodes.len(),
            received: received_count,
            substituted: reconstruction.substituted,
            skipped: reconstruction.skipped,
            gateway_duration,
        };

        Ok(PipelineOutput {
            document: reconstruction.text,
            report,
            nodes,
            translations,
            stats,
        })
    }
}
