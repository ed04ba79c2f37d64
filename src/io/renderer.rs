//! Template renderers
//!
//! Two implementations of [`TemplateRenderer`]:
//!
//! - [`PlaceholderRenderer`] fills `${key}` placeholders in a text template
//! - [`CsvSlotRenderer`] writes the slot mapping as a `slot,value` CSV, for
//!   runs without a template
//!
//! Both write into a single output directory, created on first use.

use crate::core::field_mapper::SlotMap;
use crate::core::traits::{RenderedDocument, TemplateRenderer};
use crate::types::StatementError;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\$\{(\w+)\}").expect("placeholder pattern is valid"))
}

fn ensure_dir(dir: &Path) -> Result<(), StatementError> {
    fs::create_dir_all(dir).map_err(|e| StatementError::IoError {
        message: format!("cannot create output directory {}: {}", dir.display(), e),
    })
}

/// Fills `${key}` placeholders in a text template
///
/// Placeholders without a matching slot are a render failure, so a template
/// and a document strategy that disagree are caught instead of shipping a
/// half-filled document.
#[derive(Debug, Clone)]
pub struct PlaceholderRenderer {
    template: String,
    extension: String,
    output_dir: PathBuf,
}

impl PlaceholderRenderer {
    pub fn new(template: String, extension: &str, output_dir: impl Into<PathBuf>) -> Self {
        PlaceholderRenderer {
            template,
            extension: extension.trim_start_matches('.').to_string(),
            output_dir: output_dir.into(),
        }
    }

    /// Load a template file; the output extension follows the template's
    pub fn from_file(path: &Path, output_dir: impl Into<PathBuf>) -> Result<Self, StatementError> {
        let template = fs::read_to_string(path).map_err(|e| StatementError::IoError {
            message: format!("cannot read template {}: {}", path.display(), e),
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("txt");
        Ok(PlaceholderRenderer::new(template, extension, output_dir))
    }

    /// Substitute every placeholder in the template
    pub fn fill(&self, slots: &SlotMap) -> Result<String, StatementError> {
        if let Some(missing) = placeholder()
            .captures_iter(&self.template)
            .map(|c| c[1].to_string())
            .find(|key| !slots.contains_key(key))
        {
            return Err(StatementError::render_failure(format!(
                "no value for placeholder '{missing}'"
            )));
        }

        Ok(placeholder()
            .replace_all(&self.template, |c: &Captures| slots[&c[1]].clone())
            .into_owned())
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(
        &self,
        slots: &SlotMap,
        output_stem: &str,
    ) -> Result<RenderedDocument, StatementError> {
        let body = self.fill(slots)?;
        ensure_dir(&self.output_dir)?;

        let file_name = format!("{}.{}", output_stem, self.extension);
        let path = self.output_dir.join(&file_name);
        fs::write(&path, body)?;
        Ok(RenderedDocument { file_name, path })
    }
}

/// Writes the slot mapping itself as CSV
#[derive(Debug, Clone)]
pub struct CsvSlotRenderer {
    output_dir: PathBuf,
}

impl CsvSlotRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        CsvSlotRenderer {
            output_dir: output_dir.into(),
        }
    }
}

impl TemplateRenderer for CsvSlotRenderer {
    fn render(
        &self,
        slots: &SlotMap,
        output_stem: &str,
    ) -> Result<RenderedDocument, StatementError> {
        ensure_dir(&self.output_dir)?;

        let file_name = format!("{output_stem}.csv");
        let path = self.output_dir.join(&file_name);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["slot", "value"])?;
        for (slot, value) in slots {
            writer.write_record([slot, value])?;
        }
        writer.flush()?;
        Ok(RenderedDocument { file_name, path })
    }
}
