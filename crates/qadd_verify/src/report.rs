//! Verification records, aggregate report, and formatting
//!
//! A [`VerificationReport`] holds one [`VerificationRecord`] per input pair,
//! in the order (0,0), (0,1), (1,0), (1,1). [`Reporter`] renders it as
//! plain text, Markdown, or JSON.

use crate::config::TiePolicy;
use crate::majority::majority_vote;
use qadd_core::{truth_table, Bit, Counts, InputPair, QaddError, QaddResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::path::Path;

// ============================================================================
// Record
// ============================================================================

/// Outcome of verifying one input pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Input A
    pub a: Bit,

    /// Input B
    pub b: Bit,

    /// Majority bitstring (CARRY then SUM), absent when the row failed
    pub observed: Option<String>,

    /// Count of the majority bitstring
    pub observed_count: u64,

    /// Arithmetically correct bitstring
    pub expected: String,

    /// `observed == expected`
    pub passed: bool,

    /// Full outcome table (empty when sampling failed)
    pub counts: Counts,

    /// Failure message, if the row could not be decided
    pub error: Option<String>,
}

impl VerificationRecord {
    /// Decide a row from its outcome table
    pub fn from_counts(pair: InputPair, counts: Counts, policy: TiePolicy) -> Self {
        match majority_vote(&counts, policy) {
            Ok(majority) => {
                if majority.is_tie() {
                    log::warn!(
                        "{}: tie between {:?}, taking {}",
                        pair,
                        majority.tied,
                        majority.bitstring
                    );
                }
                let expected = truth_table::expected_for(pair);
                Self {
                    a: pair.a,
                    b: pair.b,
                    passed: majority.bitstring == expected,
                    observed: Some(majority.bitstring),
                    observed_count: majority.count,
                    expected: expected.to_string(),
                    counts,
                    error: None,
                }
            }
            Err(err) => Self::failed(pair, &err, counts),
        }
    }

    /// Failed row; `counts` is kept for diagnosis
    pub fn failed(pair: InputPair, err: &QaddError, counts: Counts) -> Self {
        Self {
            a: pair.a,
            b: pair.b,
            observed: None,
            observed_count: 0,
            expected: truth_table::expected_for(pair).to_string(),
            passed: false,
            counts,
            error: Some(err.to_string()),
        }
    }

    /// Input pair of this row
    pub fn pair(&self) -> InputPair {
        InputPair::from_bits(self.a, self.b)
    }

    /// Whether sampling or voting failed
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Total shots in the table
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl fmt::Display for VerificationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A={} B={}  best={}  expected={}  PASS={}  counts={}",
            self.a,
            self.b,
            self.observed.as_deref().unwrap_or("--"),
            self.expected,
            self.passed,
            format_counts(&self.counts)
        )?;
        if let Some(err) = &self.error {
            write!(f, "  error={}", err)?;
        }
        Ok(())
    }
}

// ============================================================================
// Report
// ============================================================================

/// Aggregate result of a verification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Shots per input pair
    pub shots: u64,

    /// Backend that produced the tables
    pub backend: String,

    /// Tie policy used by the vote
    pub tie_policy: TiePolicy,

    /// One record per input pair
    pub records: Vec<VerificationRecord>,
}

impl VerificationReport {
    /// Create a report
    pub fn new(
        shots: u64,
        backend: impl Into<String>,
        tie_policy: TiePolicy,
        records: Vec<VerificationRecord>,
    ) -> Self {
        Self {
            shots,
            backend: backend.into(),
            tie_policy,
            records,
        }
    }

    /// True iff every row passed
    pub fn all_passed(&self) -> bool {
        !self.records.is_empty() && self.records.iter().all(|r| r.passed)
    }

    /// Number of passing rows
    pub fn passed_count(&self) -> usize {
        self.records.iter().filter(|r| r.passed).count()
    }

    /// Rows that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &VerificationRecord> {
        self.records.iter().filter(|r| !r.passed)
    }

    /// Record for a given pair
    pub fn record(&self, pair: InputPair) -> Option<&VerificationRecord> {
        self.records.iter().find(|r| r.pair() == pair)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QaddResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> QaddResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VerificationReport(shots={}, passed={}/{}, all_passed={})",
            self.shots,
            self.passed_count(),
            self.records.len(),
            self.all_passed()
        )
    }
}

// ============================================================================
// Reporter
// ============================================================================

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Plain text, one line per row
    #[default]
    Text,
    /// Markdown table
    Markdown,
    /// JSON
    Json,
}

impl ReportFormat {
    /// File extension for saved reports
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Markdown => "md",
            ReportFormat::Json => "json",
        }
    }
}

/// Verification reporter
pub struct Reporter;

impl Reporter {
    /// Render in the given format
    pub fn report(report: &VerificationReport, format: ReportFormat) -> String {
        match format {
            ReportFormat::Text => Self::to_text(report),
            ReportFormat::Markdown => Self::to_markdown(report),
            ReportFormat::Json => Self::to_json(report),
        }
    }

    /// Plain text report
    pub fn to_text(report: &VerificationReport) -> String {
        let mut output = String::new();

        writeln!(
            output,
            "Half-Adder Full Verification (shots={})\n",
            report.shots
        )
        .unwrap();

        for record in &report.records {
            writeln!(output, "{}", record).unwrap();
        }

        writeln!(
            output,
            "\nALL PASS={}  ({}/{})",
            report.all_passed(),
            report.passed_count(),
            report.records.len()
        )
        .unwrap();

        output
    }

    /// Markdown report
    pub fn to_markdown(report: &VerificationReport) -> String {
        let mut output = String::new();

        writeln!(output, "# Half-Adder Verification\n").unwrap();
        writeln!(output, "- **Shots**: {}", report.shots).unwrap();
        writeln!(output, "- **Backend**: {}", report.backend).unwrap();
        writeln!(output, "- **Tie policy**: {}", report.tie_policy).unwrap();
        writeln!(
            output,
            "- **Passed**: {}/{}\n",
            report.passed_count(),
            report.records.len()
        )
        .unwrap();

        writeln!(output, "| A | B | Observed | Expected | Majority | Pass |").unwrap();
        writeln!(output, "|---|---|----------|----------|----------|------|").unwrap();

        for record in &report.records {
            let share = if report.shots > 0 {
                record.observed_count as f64 / report.shots as f64 * 100.0
            } else {
                0.0
            };
            writeln!(
                output,
                "| {} | {} | {} | {} | {:.1}% | {} |",
                record.a,
                record.b,
                record.observed.as_deref().unwrap_or("--"),
                record.expected,
                share,
                if record.passed { "✓" } else { "✗" }
            )
            .unwrap();
        }

        let errors: Vec<_> = report.records.iter().filter(|r| r.is_error()).collect();
        if !errors.is_empty() {
            writeln!(output, "\n## Errors\n").unwrap();
            for record in errors {
                writeln!(
                    output,
                    "- A={} B={}: {}",
                    record.a,
                    record.b,
                    record.error.as_deref().unwrap_or_default()
                )
                .unwrap();
            }
        }

        output
    }

    /// JSON report with an `all_passed` summary field
    pub fn to_json(report: &VerificationReport) -> String {
        let value = serde_json::json!({
            "all_passed": report.all_passed(),
            "passed": report.passed_count(),
            "report": report,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    /// ASCII histogram of an outcome table
    pub fn histogram(counts: &Counts, width: usize) -> String {
        let mut output = String::new();
        let total: u64 = counts.values().sum();
        let max = counts.values().copied().max().unwrap_or(0);

        for (bitstring, &count) in counts {
            let bar = if max > 0 {
                (count as usize * width) / max as usize
            } else {
                0
            };
            let pct = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            writeln!(
                output,
                "{} | {:<width$} {} ({:.1}%)",
                bitstring,
                "#".repeat(bar),
                count,
                pct,
                width = width
            )
            .unwrap();
        }

        output
    }

    /// Render and write to `path`
    pub fn save(
        report: &VerificationReport,
        format: ReportFormat,
        path: impl AsRef<Path>,
    ) -> QaddResult<()> {
        std::fs::write(path, Self::report(report, format))?;
        Ok(())
    }
}

/// `{"00": 3, "10": 4093}`
fn format_counts(counts: &Counts) -> String {
    let body: Vec<String> = counts
        .iter()
        .map(|(bs, c)| format!("\"{}\": {}", bs, c))
        .collect();
    format!("{{{}}}", body.join(", "))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, u64)]) -> Counts {
        pairs.iter().map(|(b, c)| (b.to_string(), *c)).collect()
    }

    fn passing_report() -> VerificationReport {
        let records = InputPair::ALL
            .iter()
            .map(|&pair| {
                let expected = truth_table::expected_for(pair);
                VerificationRecord::from_counts(pair, table(&[(expected, 8)]), TiePolicy::default())
            })
            .collect();
        VerificationReport::new(8, "static", TiePolicy::default(), records)
    }

    #[test]
    fn test_record_pass() {
        let pair = InputPair::new(1, 1).unwrap();
        let record =
            VerificationRecord::from_counts(pair, table(&[("10", 7), ("00", 1)]), TiePolicy::Reject);

        assert!(record.passed);
        assert_eq!(record.observed.as_deref(), Some("10"));
        assert_eq!(record.observed_count, 7);
        assert_eq!(record.total(), 8);
        assert_eq!(record.pair(), pair);
    }

    #[test]
    fn test_record_wrong_answer() {
        let pair = InputPair::new(0, 1).unwrap();
        let record = VerificationRecord::from_counts(pair, table(&[("11", 4)]), TiePolicy::default());

        assert!(!record.passed);
        assert!(!record.is_error());
        assert_eq!(record.expected, "01");
    }

    #[test]
    fn test_record_tie_rejected() {
        let pair = InputPair::new(0, 0).unwrap();
        let record =
            VerificationRecord::from_counts(pair, table(&[("00", 2), ("11", 2)]), TiePolicy::Reject);

        assert!(!record.passed);
        assert!(record.observed.is_none());
        assert!(record.error.as_deref().unwrap().contains("Ambiguous majority"));
        assert_eq!(record.counts.len(), 2);
    }

    #[test]
    fn test_record_tie_smallest_passes() {
        let pair = InputPair::new(0, 0).unwrap();
        let record = VerificationRecord::from_counts(
            pair,
            table(&[("00", 2), ("11", 2)]),
            TiePolicy::LexicographicSmallest,
        );
        assert!(record.passed);
    }

    #[test]
    fn test_report_all_passed() {
        let report = passing_report();
        assert!(report.all_passed());
        assert_eq!(report.passed_count(), 4);
        assert_eq!(report.failures().count(), 0);
        assert!(!VerificationReport::new(1, "x", TiePolicy::default(), vec![]).all_passed());
    }

    #[test]
    fn test_text_format() {
        let text = Reporter::to_text(&passing_report());

        assert!(text.starts_with("Half-Adder Full Verification (shots=8)"));
        assert!(text.contains("A=1 B=1  best=10  expected=10  PASS=true  counts={\"10\": 8}"));
        assert!(text.contains("ALL PASS=true"));
    }

    #[test]
    fn test_text_format_error_row() {
        let pair = InputPair::new(1, 0).unwrap();
        let err = QaddError::execution("boom");
        let record = VerificationRecord::failed(pair, &err, Counts::new());

        let line = record.to_string();
        assert!(line.contains("best=--"));
        assert!(line.contains("PASS=false"));
        assert!(line.contains("error=Execution failure: boom"));
    }

    #[test]
    fn test_markdown_format() {
        let md = Reporter::to_markdown(&passing_report());
        assert!(md.contains("| A | B |"));
        assert!(md.contains("100.0%"));
        assert!(!md.contains("## Errors"));
    }

    #[test]
    fn test_json_format() {
        let json = Reporter::to_json(&passing_report());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["all_passed"], true);
        assert_eq!(value["report"]["records"][3]["expected"], "10");
        assert_eq!(value["report"]["records"][3]["a"], 1);
    }

    #[test]
    fn test_report_json_roundtrip() {
        let report = passing_report();
        let restored = VerificationReport::from_json(&report.to_json().unwrap()).unwrap();
        assert_eq!(report, restored);
    }

    #[test]
    fn test_histogram() {
        let hist = Reporter::histogram(&table(&[("00", 1), ("10", 3)]), 6);
        let lines: Vec<_> = hist.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00 | ##    "));
        assert!(lines[1].contains("###### 3 (75.0%)"));
    }

    #[test]
    fn test_save() {
        let path = std::env::temp_dir().join(format!("qadd_report_{}.txt", std::process::id()));
        Reporter::save(&passing_report(), ReportFormat::Text, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(text.contains("PASS=true"));
    }
}
