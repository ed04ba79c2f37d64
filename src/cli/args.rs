use crate::core::GeneratorConfig;
use chrono::{NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Generate synthetic statements from JSON request records
#[derive(Parser, Debug)]
#[command(name = "statement-generator")]
#[command(about = "Generate synthetic statements from JSON request records", long_about = None)]
pub struct CliArgs {
    /// Input JSON file: an array of records or a single record
    #[arg(value_name = "INPUT", help = "Path to the input JSON file")]
    pub input_file: PathBuf,

    /// Document type to generate
    #[arg(
        long = "kind",
        value_name = "KIND",
        default_value = "word-statement",
        help = "Document type: 'word-statement' (11 lines) or 'spreadsheet' (8 lines)"
    )]
    pub kind: DocumentKind,

    /// Placeholder template; slot CSVs are written when absent
    #[arg(long = "template", value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Directory generated files are written to
    #[arg(long = "output-dir", value_name = "DIR", default_value = "generated")]
    pub output_dir: PathBuf,

    /// Base URL reported for generated files
    #[arg(
        long = "base-url",
        value_name = "URL",
        default_value = "http://localhost/generated"
    )]
    pub base_url: String,

    /// Seed for reproducible output
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Issue date (YYYY-MM-DD); today when absent
    #[arg(long = "issued-on", value_name = "DATE")]
    pub issued_on: Option<NaiveDate>,
}

/// Supported document types
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    WordStatement,
    Spreadsheet,
}

impl CliArgs {
    /// Build the generator configuration from CLI arguments
    pub fn to_generator_config(&self) -> GeneratorConfig {
        let issued_on = self.issued_on.unwrap_or_else(|| Utc::now().date_naive());
        GeneratorConfig::new(self.seed, &self.base_url, issued_on)
    }
}
