//! Core traits
//!
//! The template renderer is the only I/O-bound collaborator of the generator.
//! It sits behind a trait so the document-format dependency stays isolated and
//! tests can substitute an in-memory or failing renderer.

use crate::core::field_mapper::SlotMap;
use crate::types::StatementError;
use std::path::PathBuf;

/// A document written by a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// File name relative to the renderer's output area
    pub file_name: String,
    /// Full path of the written file
    pub path: PathBuf,
}

/// Turns a slot mapping into an output document
pub trait TemplateRenderer {
    /// Render `slots` into a document named after `output_stem`
    ///
    /// Any failure is reported as `TemplateRenderFailure` or `IoError` and is
    /// recorded against the single record being rendered.
    fn render(&self, slots: &SlotMap, output_stem: &str)
        -> Result<RenderedDocument, StatementError>;
}
