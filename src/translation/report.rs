/*!
 * Human-readable audit report pairing original and translated texts.
 */

use chrono::{DateTime, Local};

use crate::translation::extractor::TranslatableNode;

/// Default report title
pub const REPORT_TITLE: &str = "=== MUI FILE TRANSLATION REPORT ===";

/// Builds the translation report for one request
#[derive(Debug, Clone)]
pub struct ReportGenerator<'a> {
    nodes: &'a [TranslatableNode],
    translations: &'a [String],
    source_name: Option<&'a str>,
    skipped: &'a [usize],
}

impl<'a> ReportGenerator<'a> {
    /// Create a generator over index-aligned nodes and translations
    pub fn new(nodes: &'a [TranslatableNode], translations: &'a [String]) -> Self {
        Self {
            nodes,
            translations,
            source_name: None,
            skipped: &[],
        }
    }

    /// Name of the translated file, shown in the header
    pub fn source_name(mut self, name: &'a str) -> Self {
        self.source_name = Some(name);
        self
    }

    /// Indices of nodes whose translation could not be placed
    pub fn skipped(mut self, skipped: &'a [usize]) -> Self {
        self.skipped = skipped;
        self
    }

    /// Render the report with the current local time
    pub fn render(&self) -> String {
        self.render_at(Local::now())
    }

    /// Render the report with an explicit generation time
    pub fn render_at(&self, generated_at: DateTime<Local>) -> String {
        let mut lines = vec![
            REPORT_TITLE.to_string(),
            format!("Date: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        ];
        if let Some(name) = self.source_name {
            lines.push(format!("File: {}", name));
        }
        lines.push(format!("Translated elements: {}", self.translations.len()));
        if !self.skipped.is_empty() {
            lines.push(format!("Elements not placed: {}", self.skipped.len()));
        }
        lines.push(String::new());
        lines.push("TRANSLATION DETAILS:".to_string());
        lines.push(String::new());

        for (index, (node, translation)) in self.nodes.iter().zip(self.translations).enumerate() {
            lines.push(format!("Element: {}", node.tag));
            lines.push(format!("Original: {}", node.original_text));
            lines.push(format!("Translation: {}", translation));
            lines.push(format!("Path: {}", node.path));
            if self.skipped.contains(&index) {
                lines.push("Status: not placed (snippet not found)".to_string());
            }
            lines.push("---".to_string());
        }

        lines.join("\n")
    }
}

/// Generate a report for index-aligned nodes and translations
pub fn generate_report(nodes: &[TranslatableNode], translations: &[String]) -> String {
    ReportGenerator::new(nodes, translations).render()
}
