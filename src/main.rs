//! Statement Generator CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run -- records.json > envelope.json
//! cargo run -- --kind spreadsheet --seed 7 records.json
//! cargo run -- --template statement.txt --output-dir out --base-url https://files.example/out records.json
//! ```
//!
//! Each record in the input file becomes one generated document in the output
//! directory. The batch envelope (generated files and per-record failures) is
//! written to stdout as JSON. Logs go to stderr and follow `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: The batch ran (individual records may still have failed)
//! - 1: Fatal error (input unreadable, template unreadable, output unwritable)

use statement_generator::cli;
use statement_generator::core::{BatchProcessor, TemplateRenderer};
use statement_generator::io::{read_records, write_envelope, CsvSlotRenderer, PlaceholderRenderer};
use statement_generator::strategy;
use statement_generator::StatementError;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        tracing::error!(error = %e, "statement generation failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<(), StatementError> {
    let strategy = strategy::create_strategy(args.kind);
    let records = read_records(&args.input_file)?;

    let renderer: Box<dyn TemplateRenderer> = match &args.template {
        Some(path) => Box::new(PlaceholderRenderer::from_file(path, &args.output_dir)?),
        None => Box::new(CsvSlotRenderer::new(&args.output_dir)),
    };

    let processor = BatchProcessor::new(&strategy, renderer.as_ref(), args.to_generator_config());
    let envelope = processor.process(records);

    let mut output = std::io::stdout();
    write_envelope(&envelope, &mut output)
}
