/*!
 * Extraction of translatable text nodes from a label document.
 *
 * The raw text stays the source of truth. The parsed tree is only used to
 * walk elements in document order and find their direct text; each emitted
 * node carries the exact `<tag>text</tag>` snippet the reconstructor later
 * looks for in the raw buffer.
 */

use log::{debug, info};
use roxmltree::{Node, ParsingOptions};
use serde::Serialize;

use crate::errors::PipelineError;
use crate::translation::classifier::{CodeClassifier, HeuristicClassifier};

/// Byte order mark
const BOM: char = '\u{feff}';

/// The raw text of a label file, normalized for parsing
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDocument {
    raw: String,
}

impl LabelDocument {
    /// Normalize and validate raw file content.
    ///
    /// Strips every byte order mark, then checks that the result parses.
    pub fn parse(content: &str) -> Result<Self, PipelineError> {
        let document = Self {
            raw: content.replace(BOM, ""),
        };
        document.tree()?;
        Ok(document)
    }

    /// The normalized raw text
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parse the raw text into a tree view
    pub fn tree(&self) -> Result<roxmltree::Document<'_>, PipelineError> {
        parse_markup(&self.raw)
    }
}

/// Parse markup text, mapping failures to `PipelineError::Parse`
pub(crate) fn parse_markup(text: &str) -> Result<roxmltree::Document<'_>, PipelineError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(text, options)
        .map_err(|e| PipelineError::Parse(e.to_string()))
}

/// One element whose direct text was selected for translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatableNode {
    /// Slash-joined ancestor tag chain, for reporting
    pub path: String,
    /// Element name as written in the source
    pub tag: String,
    /// Trimmed direct text of the element
    pub original_text: String,
    /// `<tag>original_text</tag>`, used to locate the node in the raw text
    pub match_snippet: String,
}

impl TranslatableNode {
    /// Create a node, deriving its match snippet
    pub fn new(path: impl Into<String>, tag: impl Into<String>, text: impl Into<String>) -> Self {
        let tag = tag.into();
        let original_text = text.into();
        let match_snippet = element_snippet(&tag, &original_text);
        Self {
            path: path.into(),
            tag,
            original_text,
            match_snippet,
        }
    }
}

/// Build the `<tag>text</tag>` form used for matching and substitution
pub fn element_snippet(tag: &str, text: &str) -> String {
    format!("<{}>{}</{}>", tag, text, tag)
}

/// Result of extraction: the normalized document plus its nodes in order
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Normalized document the nodes were taken from
    pub document: LabelDocument,
    /// Nodes in pre-order, depth-first document order
    pub nodes: Vec<TranslatableNode>,
}

/// Walks a label document and collects translatable nodes
pub struct Extractor<'c> {
    classifier: &'c dyn CodeClassifier,
}

impl<'c> Extractor<'c> {
    /// Create an extractor using the given classifier
    pub fn new(classifier: &'c dyn CodeClassifier) -> Self {
        Self { classifier }
    }

    /// Extract translatable nodes from raw file content
    pub fn extract(&self, content: &str) -> Result<Extraction, PipelineError> {
        let document = LabelDocument::parse(content)?;
        let nodes = {
            let tree = document.tree()?;
            let mut nodes = Vec::new();
            self.collect(document.raw(), tree.root_element(), "", &mut nodes);
            nodes
        };

        info!("Found {} texts to translate", nodes.len());
        Ok(Extraction { document, nodes })
    }

    fn collect(&self, raw: &str, parent: Node<'_, '_>, path: &str, nodes: &mut Vec<TranslatableNode>) {
        for child in parent.children().filter(|n| n.is_element()) {
            let tag = source_tag_name(raw, child);
            let current_path = if path.is_empty() {
                tag.clone()
            } else {
                format!("{}/{}", path, tag)
            };

            let text = leading_text(child);
            let text = text.trim();
            if !text.is_empty() {
                if self.classifier.is_code_like(text) {
                    debug!("Skipping code-like text at {}: {}", current_path, text);
                } else {
                    nodes.push(TranslatableNode::new(current_path.as_str(), tag.as_str(), text));
                }
            }

            self.collect(raw, child, &current_path, nodes);
        }
    }
}

/// Extract with the default heuristic classifier
pub fn extract(content: &str) -> Result<Extraction, PipelineError> {
    let classifier = HeuristicClassifier::default();
    Extractor::new(&classifier).extract(content)
}

/// Text that appears inside an element before its first child element.
///
/// Comments and processing instructions are skipped over.
fn leading_text(element: Node<'_, '_>) -> String {
    let mut text = String::new();
    for child in element.children() {
        if child.is_element() {
            break;
        }
        if let Some(chunk) = child.text().filter(|_| child.is_text()) {
            text.push_str(chunk);
        }
    }
    text
}

/// Element name exactly as written in the source, prefix included
fn source_tag_name(raw: &str, element: Node<'_, '_>) -> String {
    let start = element.range().start;
    raw.get(start + 1..)
        .map(|rest| {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(rest.len());
            &rest[..end]
        })
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| element.tag_name().name().to_string())
}
