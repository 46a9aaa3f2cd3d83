/*!
 * Reinsertion of translated text into the raw label document.
 *
 * Substitution works on the raw text, never on a re-serialized tree, so
 * whitespace, attribute order and entity spelling are kept byte for byte.
 * Each node replaces the first occurrence of its match snippet that no
 * earlier node has already consumed. The result must parse again or the
 * whole reconstruction fails.
 */

use log::{debug, info, warn, error};

use crate::errors::PipelineError;
use crate::translation::extractor::{element_snippet, parse_markup, TranslatableNode};

/// Outcome of a successful reconstruction
#[derive(Debug, Clone, PartialEq)]
pub struct Reconstruction {
    /// The rebuilt document text
    pub text: String,
    /// Number of nodes whose snippet was replaced
    pub substituted: usize,
    /// Indices of nodes whose snippet could not be found
    pub skipped: Vec<usize>,
}

/// Working text plus the byte ranges already written by substitutions
struct SubstitutionBuffer {
    text: String,
    consumed: Vec<(usize, usize)>,
}

impl SubstitutionBuffer {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            consumed: Vec::new(),
        }
    }

    fn overlaps_consumed(&self, start: usize, end: usize) -> bool {
        self.consumed.iter().any(|&(s, e)| start < e && s < end)
    }

    /// First occurrence of `needle` not touching a consumed range
    fn find_remaining(&self, needle: &str) -> Option<usize> {
        if needle.is_empty() {
            return None;
        }
        let step = needle.chars().next().map_or(1, char::len_utf8);
        let mut from = 0;
        while let Some(offset) = self.text.get(from..).and_then(|rest| rest.find(needle)) {
            let start = from + offset;
            let end = start + needle.len();
            if !self.overlaps_consumed(start, end) {
                return Some(start);
            }
            from = start + step;
        }
        None
    }

    /// Replace the first remaining occurrence, marking the replacement consumed
    fn replace_first_remaining(&mut self, needle: &str, replacement: &str) -> bool {
        let Some(start) = self.find_remaining(needle) else {
            return false;
        };
        let end = start + needle.len();
        self.text.replace_range(start..end, replacement);

        let new_end = start + replacement.len();
        for range in self.consumed.iter_mut().filter(|(s, _)| *s >= end) {
            range.0 = range.0 - end + new_end;
            range.1 = range.1 - end + new_end;
        }
        self.consumed.push((start, new_end));
        true
    }
}

/// Substitute translations into `raw`, returning the text and statistics.
///
/// Nodes without a translation at their index are left untouched. Nodes
/// whose snippet is no longer present are skipped and reported in
/// `Reconstruction::skipped`.
pub fn reconstruct_with_stats(
    raw: &str,
    nodes: &[TranslatableNode],
    translations: &[String],
) -> Result<Reconstruction, PipelineError> {
    let mut buffer = SubstitutionBuffer::new(raw);
    let mut substituted = 0;
    let mut skipped = Vec::new();

    for (index, (node, translation)) in nodes.iter().zip(translations).enumerate() {
        let replacement = element_snippet(&node.tag, translation);
        if buffer.replace_first_remaining(&node.match_snippet, &replacement) {
            substituted += 1;
        } else {
            debug!("Snippet not found for node {} at {}: {}", index, node.path, node.match_snippet);
            skipped.push(index);
        }
    }

    if !skipped.is_empty() {
        warn!("{} of {} translations could not be placed and were skipped", skipped.len(), nodes.len());
    }

    if let Err(e) = parse_markup(&buffer.text) {
        error!("Reconstructed document failed validation: {}", e);
        return Err(PipelineError::Reconstruction(e.to_string()));
    }
    info!("Reconstructed document validated successfully");

    Ok(Reconstruction {
        text: buffer.text,
        substituted,
        skipped,
    })
}

/// Substitute translations into `raw`, returning only the rebuilt text
pub fn reconstruct(
    raw: &str,
    nodes: &[TranslatableNode],
    translations: &[String],
) -> Result<String, PipelineError> {
    reconstruct_with_stats(raw, nodes, translations).map(|r| r.text)
}
