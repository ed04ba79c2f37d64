//! Document strategies
//!
//! Each supported document type is one [`DocumentStrategy`]: the transaction
//! pattern its ledger follows, the display conventions its template expects,
//! and how its output files are named. Adding a document type means adding a
//! row here rather than another copy of the generation pipeline.

use crate::cli::DocumentKind;
use crate::core::field_mapper::MappingStyle;
use crate::core::pattern::{TransactionPattern, CANONICAL, COMPACT};
use regex::Regex;
use std::sync::OnceLock;

/// Everything that varies between document types
#[derive(Debug, Clone)]
pub struct DocumentStrategy {
    pub kind: DocumentKind,
    pub pattern: &'static TransactionPattern,
    pub style: MappingStyle,
    /// Prepended to every output file stem
    pub file_prefix: &'static str,
}

impl DocumentStrategy {
    /// Output stem for a caller-supplied file name
    ///
    /// Characters outside `[A-Za-z0-9_.-]` become underscores, and dashes are
    /// folded to underscores so stems stay shell- and URL-friendly.
    pub fn output_stem(&self, filename: &str) -> String {
        static UNSAFE: OnceLock<Regex> = OnceLock::new();
        let unsafe_chars =
            UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("pattern is valid"));
        let safe = unsafe_chars.replace_all(filename.trim(), "_").replace('-', "_");
        format!("{}_{}", self.file_prefix, safe.to_lowercase())
    }
}

/// Create the strategy for a document type
pub fn create_strategy(kind: DocumentKind) -> DocumentStrategy {
    match kind {
        DocumentKind::WordStatement => DocumentStrategy {
            kind,
            pattern: &CANONICAL,
            style: MappingStyle {
                currency_prefix: Some("$"),
                ..MappingStyle::default()
            },
            file_prefix: "statement",
        },
        DocumentKind::Spreadsheet => DocumentStrategy {
            kind,
            pattern: &COMPACT,
            style: MappingStyle {
                currency_prefix: None,
                line_date_format: "%d.%m.%Y",
                caption_format: "%b %d",
                issue_date_format: "%d.%m.%Y",
            },
            file_prefix: "sheet",
        },
    }
}
