use anyhow::{Result, Context, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Local};

use crate::app_config::FileConfig;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Check extension and size of an input label file
    pub fn validate_input<P: AsRef<Path>>(path: P, limits: &FileConfig) -> Result<()> {
        let path = path.as_ref();

        if !Self::file_exists(path) {
            return Err(anyhow!("Input file does not exist: {:?}", path));
        }

        let extension = path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let allowed = limits.allowed_extensions.iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(&extension));
        if !allowed {
            return Err(anyhow!(
                "File must have one of these extensions: {}",
                limits.allowed_extensions.iter()
                    .map(|ext| format!(".{}", ext.trim_start_matches('.')))
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        let size = fs::metadata(path)
            .with_context(|| format!("Failed to read file metadata: {:?}", path))?
            .len();
        if size > limits.max_file_size_bytes {
            return Err(anyhow!(
                "File is too large ({} bytes). Maximum size is {} bytes",
                size,
                limits.max_file_size_bytes
            ));
        }

        Ok(())
    }

    /// Read a file as UTF-8 text
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))?;
        String::from_utf8(bytes)
            .with_context(|| format!("File is not valid UTF-8: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @generates: Output path for a translated label file
    pub fn translated_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(input_file: P1, output_dir: P2) -> PathBuf {
        let file_name = input_file.as_ref()
            .file_name()
            .map(|name| sanitize_file_name(&name.to_string_lossy()))
            .unwrap_or_else(|| "labels.mui".to_string());

        output_dir.as_ref().join(format!("translated_{}", file_name))
    }

    // @generates: Timestamped output path for a translation report
    // Appends `_2`, `_3`, ... when a report with the same timestamp already exists
    pub fn report_output_path<P: AsRef<Path>>(output_dir: P, generated_at: DateTime<Local>) -> PathBuf {
        let stamp = generated_at.format("%Y%m%d_%H%M%S").to_string();
        let mut path = output_dir.as_ref().join(format!("report_{}.txt", stamp));
        let mut counter = 2;
        while path.exists() {
            path = output_dir.as_ref().join(format!("report_{}_{}.txt", stamp, counter));
            counter += 1;
        }
        path
    }
}

/// Keep only characters that are safe in a file name
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_').to_string();
    if cleaned.is_empty() {
        "labels.mui".to_string()
    } else {
        cleaned
    }
}
