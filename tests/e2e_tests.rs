//! End-to-end integration tests
//!
//! These tests drive the whole pipeline the way the CLI does: JSON records in,
//! rendered files on disk, and a batch envelope out. Each test writes into its
//! own temporary directory.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use regex::Regex;
    use rstest::rstest;
    use serde_json::{json, Value};
    use statement_generator::cli::DocumentKind;
    use statement_generator::core::{BatchProcessor, GeneratorConfig};
    use statement_generator::io::{parse_records, write_envelope, CsvSlotRenderer, PlaceholderRenderer};
    use statement_generator::strategy::create_strategy;
    use statement_generator::Money;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &str = "\
${fullname} / ${accountName}
${addressOne}
${addressTwo}
Account ${accountNumber}
Period ${statementPeriod} (balance as of ${month})
Opening ${totalOn} In ${totalIn} Out ${totalOut} Closing ${balanceOn}
${date1} ${withdra1} ${balance2}
${date11} ${withdra7} ${balance12}
";

    fn config() -> GeneratorConfig {
        GeneratorConfig::new(
            Some(2025),
            "http://localhost/generated",
            NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
        )
    }

    fn record(filename: &str, period: &str) -> Value {
        json!({
            "filename": filename,
            "fullname": "Ana Souza",
            "addressOne": "12 Example Street",
            "addressTwo": "Sampletown 00000",
            "accountNumber": "BR12345678901234",
            "openingBalance": 28375.76,
            "statementPeriod": period
        })
    }

    fn read_slots(path: &std::path::Path) -> HashMap<String, String> {
        let mut reader = csv::Reader::from_path(path).unwrap();
        reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].to_string(), r[1].to_string())
            })
            .collect()
    }

    #[test]
    fn test_three_record_batch_with_invalid_period() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("statement.txt");
        fs::write(&template, TEMPLATE).unwrap();
        let renderer = PlaceholderRenderer::from_file(&template, dir.path().join("out")).unwrap();
        let strategy = create_strategy(DocumentKind::WordStatement);

        let input = serde_json::to_string(&json!([
            record("first", "01/Mar/2025 to 31/Mar/2025"),
            record("second", "31/Mar/2025 to 01/Mar/2025"),
            record("third", "01/Feb/2025 to 28/Feb/2025"),
        ]))
        .unwrap();
        let records = parse_records(&input).unwrap();
        let envelope = BatchProcessor::new(&strategy, &renderer, config()).process(records);

        assert_eq!(envelope.files.len(), 2);
        assert_eq!(envelope.failures.len(), 1);
        assert_eq!(envelope.failures[0].kind, "InvalidPeriod");
        assert_eq!(
            envelope.failures[0].data,
            record("second", "31/Mar/2025 to 01/Mar/2025")
        );

        let first = fs::read_to_string(dir.path().join("out/statement_first.txt")).unwrap();
        assert!(first.starts_with("ANA SOUZA / ANA SOUZA\n"));
        assert!(first.contains("Account 123456*****901234"));
        assert!(first.contains("Period 01/Mar/2025 to 31/Mar/2025 (balance as of Mar 01)"));
        assert!(first.contains("Opening $28,375.76"));
        assert!(first.contains("\n01/03/2025 "));
        assert!(first.contains("\n31/03/2025 "));
        assert!(!dir.path().join("out/statement_second.txt").exists());

        let mut out = Vec::new();
        write_envelope(&envelope, &mut out).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total"], 2);
        assert_eq!(
            value["files"][1]["file_url"],
            "http://localhost/generated/statement_third.txt"
        );
    }

    #[rstest]
    fn test_generated_slots_reconcile(
        #[values(DocumentKind::WordStatement, DocumentKind::Spreadsheet)] kind: DocumentKind,
        #[values(1, 2, 3)] seed: u64,
    ) {
        let dir = TempDir::new().unwrap();
        let renderer = CsvSlotRenderer::new(dir.path());
        let strategy = create_strategy(kind);
        let config = GeneratorConfig {
            seed: Some(seed),
            ..config()
        };

        let envelope = BatchProcessor::new(&strategy, &renderer, config)
            .process(vec![record("slots", "01/Mar/2025 to 31/Mar/2025")]);
        assert_eq!(envelope.files.len(), 1, "{:?}", envelope.failures);

        let slots = read_slots(&dir.path().join(&envelope.files[0].file));
        let money = |key: &str| Money::from_display_str(&slots[key]).unwrap();

        let lines = strategy.pattern.len();
        assert_eq!(
            money("balanceOn"),
            money("totalOn") + money("totalIn") - money("totalOut")
        );
        assert_eq!(money(&format!("balance{}", lines + 1)), money("balanceOn"));
        assert_eq!(money("balance1"), money("totalOn"));

        let mask = Regex::new(r"^\d{6}\*{5}\d{6}$").unwrap();
        assert!(mask.is_match(&slots["accountNumber"]));
        assert!(slots.values().all(|v| v != "0.00"));
    }
}
