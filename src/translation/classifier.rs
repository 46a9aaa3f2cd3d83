/*!
 * Code-likeness classification for label text.
 *
 * Label files mix human-readable captions with identifiers, numbers,
 * colors and variable references. Anything classified as code-like is
 * left out of translation. The rules are heuristics tuned to machine
 * control label files, exposed behind the `CodeClassifier` trait so a
 * stricter policy can be swapped in without touching the extractor.
 */

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;

/// UPPER_CASE constants and identifiers
static UPPER_IDENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_][A-Z0-9_]*$").expect("Invalid identifier regex")
});

/// Digits only
static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+$").expect("Invalid digits regex")
});

/// Dotted keys, file names, version strings
static DOTTED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+\.[a-zA-Z0-9._-]+$").expect("Invalid dotted key regex")
});

/// Hex colors such as #FF00AA
static HEX_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]+$").expect("Invalid hex color regex")
});

/// `$name` variable references (prefix match)
static VARIABLE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\$[a-zA-Z_]").expect("Invalid variable regex")
});

/// Default minimum length, in characters, for translatable text
pub const DEFAULT_MIN_TEXT_LENGTH: usize = 2;

/// Decides whether a string should be excluded from translation
pub trait CodeClassifier: Send + Sync {
    /// Returns true when `text` looks like code rather than prose
    fn is_code_like(&self, text: &str) -> bool;
}

impl<F> CodeClassifier for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_code_like(&self, text: &str) -> bool {
        self(text)
    }
}

/// Pattern based classifier used for .mui label files
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    /// Texts with fewer characters than this are code-like
    min_text_length: usize,
    /// Additional patterns, any match marks the text as code-like
    extra_patterns: Vec<Regex>,
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self {
            min_text_length: DEFAULT_MIN_TEXT_LENGTH,
            extra_patterns: Vec::new(),
        }
    }
}

impl HeuristicClassifier {
    /// Create the default heuristic classifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the minimum translatable length
    pub fn with_min_text_length(mut self, min_text_length: usize) -> Self {
        self.min_text_length = min_text_length;
        self
    }

    /// Add extra code patterns
    pub fn with_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            let regex = Regex::new(pattern.as_ref())
                .map_err(|e| anyhow!("Invalid code pattern '{}': {}", pattern.as_ref(), e))?;
            self.extra_patterns.push(regex);
        }
        Ok(self)
    }

    /// Number of extra patterns configured
    pub fn extra_pattern_count(&self) -> usize {
        self.extra_patterns.len()
    }
}

impl CodeClassifier for HeuristicClassifier {
    fn is_code_like(&self, text: &str) -> bool {
        let builtin = [
            &*UPPER_IDENT_REGEX,
            &*DIGITS_REGEX,
            &*DOTTED_REGEX,
            &*HEX_COLOR_REGEX,
            &*VARIABLE_REGEX,
        ];

        if builtin.iter().any(|re| re.is_match(text)) {
            return true;
        }

        if self.extra_patterns.iter().any(|re| re.is_match(text)) {
            return true;
        }

        text.chars().count() < self.min_text_length
    }
}

/// Classify with the default heuristic rules
pub fn is_code_like(text: &str) -> bool {
    static DEFAULT: Lazy<HeuristicClassifier> = Lazy::new(HeuristicClassifier::default);
    DEFAULT.is_code_like(text)
}
