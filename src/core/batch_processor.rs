//! Batch processing
//!
//! Runs every record of a request through the same pipeline, one at a time:
//!
//! 1. Parse the raw record into a [`StatementRequest`]
//! 2. Resolve its statement period (previous month when absent)
//! 3. Generate a ledger with the strategy's transaction pattern
//! 4. Map identity fields and ledger onto template slots
//! 5. Render the document
//!
//! A failure at any step is captured against that record, with the record
//! echoed back, and processing moves on to the next record.

use crate::core::field_mapper::map_fields;
use crate::core::ledger_generator::LedgerGenerator;
use crate::core::traits::TemplateRenderer;
use crate::io::request_format::parse_request;
use crate::io::response_format::{BatchEnvelope, FailureEntry, SuccessEntry};
use crate::strategy::DocumentStrategy;
use crate::types::{StatementError, StatementPeriod};
use chrono::{NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Run-wide generation settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Seed for the random source; fresh entropy when absent
    pub seed: Option<u64>,
    /// Base URL under which rendered files are published
    pub base_url: String,
    /// Issue date printed on documents and used to default periods
    pub issued_on: NaiveDate,
}

impl GeneratorConfig {
    pub fn new(seed: Option<u64>, base_url: &str, issued_on: NaiveDate) -> Self {
        GeneratorConfig {
            seed,
            base_url: base_url.trim_end_matches('/').to_string(),
            issued_on,
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn file_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url, file_name)
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::new(None, "http://localhost/generated", Utc::now().date_naive())
    }
}

/// Sequential per-record orchestration
pub struct BatchProcessor<'a, T: TemplateRenderer + ?Sized> {
    strategy: &'a DocumentStrategy,
    renderer: &'a T,
    config: GeneratorConfig,
}

impl<'a, T: TemplateRenderer + ?Sized> BatchProcessor<'a, T> {
    pub fn new(strategy: &'a DocumentStrategy, renderer: &'a T, config: GeneratorConfig) -> Self {
        BatchProcessor {
            strategy,
            renderer,
            config,
        }
    }

    /// Process all records with the configured random source
    pub fn process(&self, records: Vec<Value>) -> BatchEnvelope {
        let mut rng = self.config.rng();
        self.process_with(&mut rng, records)
    }

    /// Process all records drawing randomness from `rng`
    pub fn process_with<R: Rng + ?Sized>(&self, rng: &mut R, records: Vec<Value>) -> BatchEnvelope {
        let mut files = Vec::new();
        let mut failures = Vec::new();
        let record_count = records.len();

        for (index, record) in records.into_iter().enumerate() {
            match self.process_record(rng, &record) {
                Ok(entry) => {
                    debug!(record = index, file = %entry.file, "record generated");
                    files.push(entry);
                }
                Err(e) => {
                    warn!(record = index, kind = e.kind(), error = %e, "record failed");
                    failures.push(FailureEntry::new(&e, record));
                }
            }
        }

        info!(
            kind = ?self.strategy.kind,
            records = record_count,
            generated = files.len(),
            failed = failures.len(),
            "batch complete"
        );
        BatchEnvelope::new(files, failures, Utc::now())
    }

    /// Run the full pipeline for one raw record
    pub fn process_record<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        record: &Value,
    ) -> Result<SuccessEntry, StatementError> {
        let request = parse_request(record)?;
        let period =
            StatementPeriod::resolve(request.statement_period.as_deref(), self.config.issued_on)?;

        let ledger = LedgerGenerator::new(self.strategy.pattern).generate(
            rng,
            request.opening_balance,
            &period,
        )?;
        let slots = map_fields(
            &request.identity,
            &period,
            &ledger,
            &self.strategy.style,
            self.config.issued_on,
        );

        let document = self
            .renderer
            .render(&slots, &self.strategy.output_stem(&request.filename))?;
        Ok(SuccessEntry {
            file_url: self.config.file_url(&document.file_name),
            file: document.file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::DocumentKind;
    use crate::core::field_mapper::SlotMap;
    use crate::core::traits::RenderedDocument;
    use crate::strategy::create_strategy;
    use serde_json::json;
    use std::cell::RefCell;
    use std::path::PathBuf;

    /// Keeps rendered slot maps in memory; fails for stems containing "broken"
    #[derive(Default)]
    struct MemoryRenderer {
        rendered: RefCell<Vec<SlotMap>>,
    }

    impl TemplateRenderer for MemoryRenderer {
        fn render(
            &self,
            slots: &SlotMap,
            output_stem: &str,
        ) -> Result<RenderedDocument, StatementError> {
            if output_stem.contains("broken") {
                return Err(StatementError::render_failure("disk full"));
            }
            self.rendered.borrow_mut().push(slots.clone());
            Ok(RenderedDocument {
                file_name: format!("{output_stem}.txt"),
                path: PathBuf::from(format!("/tmp/{output_stem}.txt")),
            })
        }
    }

    fn config() -> GeneratorConfig {
        GeneratorConfig::new(
            Some(7),
            "http://localhost/generated/",
            NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        )
    }

    fn record(filename: &str, period: Option<&str>) -> Value {
        let mut record = json!({
            "filename": filename,
            "fullname": "Ana Souza",
            "addressOne": "12 Example Street",
            "addressTwo": "Sampletown",
            "accountNumber": "BR12345678901234",
            "openingBalance": 28375.76
        });
        if let Some(period) = period {
            record["statementPeriod"] = json!(period);
        }
        record
    }

    #[test]
    fn test_reversed_period_fails_only_its_record() {
        let strategy = create_strategy(DocumentKind::WordStatement);
        let renderer = MemoryRenderer::default();
        let processor = BatchProcessor::new(&strategy, &renderer, config());

        let bad = record("two", Some("31/Mar/2025 to 01/Mar/2025"));
        let envelope = processor.process(vec![
            record("one", Some("01/Mar/2025 to 31/Mar/2025")),
            bad.clone(),
            record("three", None),
        ]);

        assert_eq!(envelope.files.len(), 2);
        assert_eq!(envelope.failures.len(), 1);
        assert_eq!(envelope.failures[0].kind, "InvalidPeriod");
        assert_eq!(envelope.failures[0].data, bad);
        assert_eq!(envelope.files[0].file, "statement_one.txt");
        assert_eq!(
            envelope.files[1].file_url,
            "http://localhost/generated/statement_three.txt"
        );
        assert!(envelope.success);
    }

    #[test]
    fn test_absent_period_defaults_to_previous_month() {
        let strategy = create_strategy(DocumentKind::WordStatement);
        let renderer = MemoryRenderer::default();
        let processor = BatchProcessor::new(&strategy, &renderer, config());

        processor.process(vec![record("one", None)]);

        let rendered = renderer.rendered.borrow();
        assert_eq!(rendered[0]["statementPeriod"], "01/Mar/2025 to 31/Mar/2025");
        assert_eq!(rendered[0]["date1"], "01/03/2025");
        assert_eq!(rendered[0]["date11"], "31/03/2025");
        assert_eq!(rendered[0]["totalOn"], "$28,375.76");
    }

    #[test]
    fn test_render_and_parse_failures_are_captured() {
        let strategy = create_strategy(DocumentKind::Spreadsheet);
        let renderer = MemoryRenderer::default();
        let processor = BatchProcessor::new(&strategy, &renderer, config());

        let envelope = processor.process(vec![
            record("broken", None),
            json!({"filename": "incomplete"}),
            record("fine", None),
        ]);

        let kinds: Vec<_> = envelope.failures.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec!["TemplateRenderFailure", "InvalidRecord"]);
        assert_eq!(envelope.files.len(), 1);
        assert_eq!(envelope.files[0].file, "sheet_fine.txt");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let strategy = create_strategy(DocumentKind::WordStatement);
        let first = MemoryRenderer::default();
        let second = MemoryRenderer::default();

        BatchProcessor::new(&strategy, &first, config()).process(vec![record("a", None)]);
        BatchProcessor::new(&strategy, &second, config()).process(vec![record("a", None)]);

        assert_eq!(*first.rendered.borrow(), *second.rendered.borrow());
    }
}
