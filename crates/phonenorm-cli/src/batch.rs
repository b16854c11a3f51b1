//! # Batch Subcommand
//!
//! Normalizes a file of inputs, one per line, and summarizes the failures
//! by code. Blank lines are skipped. `-` reads from stdin.
//!
//! ```bash
//! phonenorm batch numbers.txt --country PT
//! phonenorm batch - --country ES --json < numbers.txt
//! ```

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use phonenorm_core::{NormalizationOutcome, Normalizer};

use crate::{EXIT_OK, EXIT_REJECTED};

/// Arguments for the batch subcommand.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// File with one phone number per line, or `-` for stdin.
    pub file: PathBuf,

    /// Country hint applied to every line.
    #[arg(short, long)]
    pub country: String,

    /// Emit one JSON record per line instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// One processed line.
#[derive(Debug, Serialize)]
pub struct BatchRecord {
    /// 1-based line number in the input.
    pub line: usize,
    /// Input as read, trimmed.
    pub input: String,
    /// Normalization outcome.
    #[serde(flatten)]
    pub outcome: NormalizationOutcome,
}

/// Aggregate counts for a batch run.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Non-blank lines processed.
    pub total: usize,
    /// Lines that normalized.
    pub succeeded: usize,
    /// Failure count per wire code.
    pub failures: BTreeMap<String, usize>,
}

/// Execute the batch subcommand.
pub fn run_batch(args: &BatchArgs, normalizer: &Normalizer<'_>) -> Result<u8> {
    let lines = read_lines(&args.file)?;
    let (records, summary) = process(&lines, &args.country, normalizer);

    for record in &records {
        if args.json {
            println!("{}", serde_json::to_string(record)?);
        } else {
            let result = match &record.outcome {
                NormalizationOutcome::Success { e164, .. } => e164.clone(),
                NormalizationOutcome::Failure { code, message } => format!("{code}: {message}"),
            };
            println!("{:>5}  {:<24} {}", record.line, record.input, result);
        }
    }

    tracing::info!(
        total = summary.total,
        succeeded = summary.succeeded,
        "batch complete"
    );
    if !args.json {
        println!();
        println!("{}", render_summary(&summary));
    }

    Ok(if summary.succeeded == summary.total {
        EXIT_OK
    } else {
        EXIT_REJECTED
    })
}

/// Normalize every non-blank line.
pub fn process(
    lines: &[String],
    country: &str,
    normalizer: &Normalizer<'_>,
) -> (Vec<BatchRecord>, BatchSummary) {
    let mut records = Vec::new();
    let mut summary = BatchSummary::default();

    for (idx, raw) in lines.iter().enumerate() {
        let input = raw.trim();
        if input.is_empty() {
            continue;
        }
        let outcome = NormalizationOutcome::from(normalizer.normalize(Some(input), country));
        summary.total += 1;
        match outcome.code() {
            None => summary.succeeded += 1,
            Some(code) => *summary.failures.entry(code.to_string()).or_default() += 1,
        }
        records.push(BatchRecord {
            line: idx + 1,
            input: input.to_string(),
            outcome,
        });
    }

    (records, summary)
}

/// Render a summary block.
pub fn render_summary(summary: &BatchSummary) -> String {
    let mut out = format!(
        "Total: {}  succeeded: {}  failed: {}",
        summary.total,
        summary.succeeded,
        summary.total - summary.succeeded
    );
    for (code, count) in &summary.failures {
        out.push_str(&format!("\n  {code:<16} {count}"));
    }
    out
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        return std::io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .context("failed to read stdin");
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read batch file: {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn process_counts_by_code() {
        let input = lines(&["+351 912 345 678", "", "12345", "0912345678", "9123456789"]);
        let (records, summary) = process(&input, "PT", &Normalizer::builtin());
        assert_eq!(records.len(), 4);
        assert_eq!(records[1].line, 3);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failures.get("TOO_SHORT"), Some(&1));
        assert_eq!(summary.failures.get("TOO_LONG"), Some(&1));
    }

    #[test]
    fn record_json_is_flat() {
        let (records, _) = process(&lines(&["912345678"]), "PT", &Normalizer::builtin());
        let value = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(value["line"], 1);
        assert_eq!(value["status"], "success");
        assert_eq!(value["e164"], "+351912345678");
    }

    #[test]
    fn run_batch_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("numbers.txt");
        std::fs::write(&path, "912345678\n+34 612 345 678\n").unwrap();
        let args = BatchArgs {
            file: path.clone(),
            country: "PT".to_string(),
            json: false,
        };
        assert_eq!(run_batch(&args, &Normalizer::builtin()).unwrap(), EXIT_OK);

        std::fs::write(&path, "912345678\nabc\n").unwrap();
        assert_eq!(
            run_batch(&args, &Normalizer::builtin()).unwrap(),
            EXIT_REJECTED
        );
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = BatchArgs {
            file: dir.path().join("missing.txt"),
            country: "PT".to_string(),
            json: true,
        };
        assert!(run_batch(&args, &Normalizer::builtin()).is_err());
    }

    #[test]
    fn summary_rendering() {
        let mut summary = BatchSummary {
            total: 3,
            succeeded: 1,
            ..Default::default()
        };
        summary.failures.insert("TOO_SHORT".to_string(), 2);
        assert_eq!(
            render_summary(&summary),
            "Total: 3  succeeded: 1  failed: 2\n  TOO_SHORT        2"
        );
    }
}
