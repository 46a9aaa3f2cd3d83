use anyhow::{Result, anyhow};
use log::{warn, info, debug};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::language_utils;
use crate::translation::{gateway_from_config, LabelPipeline, PipelineConfig, PipelineStats, TranslatableNode};

// @module: Application controller for label file translation

/// Files produced by a successful translation run
#[derive(Debug, Clone)]
pub struct TranslationOutcome {
    /// Translated label file
    pub document_path: PathBuf,
    /// Audit report
    pub report_path: PathBuf,
    /// Pipeline statistics
    pub stats: PipelineStats,
}

/// Translation service status as reported by `check`
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceStatus {
    pub configured: bool,
    pub provider: String,
    pub model: String,
    pub endpoint: String,
    pub source_language: String,
    pub target_language: String,
}

/// Main application controller for label translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Build a pipeline for one input file.
    ///
    /// Fails with "service not configured" when the active provider has
    /// no credentials; nothing touches the network here.
    pub fn build_pipeline(&self, source_name: &str) -> Result<LabelPipeline> {
        let gateway = gateway_from_config(&self.config)?;
        let classifier = self.config.classifier.build()?;

        let config = PipelineConfig::new(gateway)
            .with_classifier(Box::new(classifier))
            .with_source_name(source_name);

        Ok(LabelPipeline::new(config))
    }

    /// Translate one label file and write the translated file and report.
    ///
    /// Nothing is written unless the whole pipeline succeeded.
    pub async fn run(&self, input_file: PathBuf, output_dir: Option<PathBuf>, force_overwrite: bool) -> Result<TranslationOutcome> {
        let start_time = Instant::now();

        FileManager::validate_input(&input_file, &self.config.files)?;

        let output_dir = output_dir.unwrap_or_else(|| {
            input_file.parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        });

        let document_path = FileManager::translated_output_path(&input_file, &output_dir);
        if FileManager::file_exists(&document_path) && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?} (use -f to force overwrite)",
                document_path
            ));
        }

        let content = FileManager::read_to_string(&input_file)?;
        let source_name = Self::display_name(&input_file);
        let pipeline = self.build_pipeline(&source_name)?;

        info!(
            "Translating {} from {} to {}",
            source_name,
            language_utils::get_language_name(&self.config.source_language)?,
            language_utils::get_language_name(&self.config.target_language)?
        );

        let spinner = Self::create_spinner(&pipeline.gateway_description());
        let result = pipeline.run(&content).await;
        spinner.finish_and_clear();
        let output = result?;

        FileManager::ensure_dir(&output_dir)?;
        let report_path = FileManager::report_output_path(&output_dir, chrono::Local::now());
        FileManager::write_to_file(&document_path, &output.document)?;
        FileManager::write_to_file(&report_path, &output.report)?;

        let stats = output.stats;
        if !stats.skipped.is_empty() {
            warn!("{} element(s) could not be placed back into the file", stats.skipped.len());
        }
        debug!("Gateway answered in {}", Self::format_duration(stats.gateway_duration));
        info!(
            "Translated {}/{} elements in {}",
            stats.substituted,
            stats.extracted,
            Self::format_duration(start_time.elapsed())
        );
        info!("Success: {:?}", document_path);
        info!("Report: {:?}", report_path);

        Ok(TranslationOutcome {
            document_path,
            report_path,
            stats,
        })
    }

    /// Dry run: list the texts that would be translated
    pub fn extract(&self, input_file: &Path) -> Result<Vec<TranslatableNode>> {
        FileManager::validate_input(input_file, &self.config.files)?;
        let content = FileManager::read_to_string(input_file)?;

        let classifier = self.config.classifier.build()?;
        let extraction = crate::translation::Extractor::new(&classifier).extract(&content)?;

        info!("Found {} translatable element(s) in {:?}", extraction.nodes.len(), input_file);
        Ok(extraction.nodes)
    }

    /// Report whether the translation service can be used
    pub fn check(&self) -> ServiceStatus {
        let translation = &self.config.translation;
        ServiceStatus {
            configured: translation.is_configured(),
            provider: translation.provider.display_name().to_string(),
            model: translation.get_model(),
            endpoint: translation.get_endpoint(),
            source_language: self.config.source_language.clone(),
            target_language: self.config.target_language.clone(),
        }
    }

    fn display_name(input_file: &Path) -> String {
        input_file.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| input_file.display().to_string())
    }

    fn create_spinner(gateway: &str) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(format!("Waiting for {}", gateway));
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    }

    /// Format a duration in a human-readable form
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
