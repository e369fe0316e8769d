//! Report records produced by tests and summaries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether a report came from a test or from a summary over test reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Test,
    Summary,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Test => write!(f, "test"),
            Self::Summary => write!(f, "summary"),
        }
    }
}

/// Result of a single test or summary.
///
/// Serializes as one flat record: the fixed fields next to the
/// test-specific metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub name: String,
    pub kind: ReportKind,
    /// The assumption this score is conditioned on.
    pub message: String,
    #[serde(flatten)]
    pub metrics: BTreeMap<String, f64>,
    /// Estimated likelihood of randomness under this report's assumption.
    ///
    /// Nominally in [0, 1]; extreme inputs may push it outside. Clamp for
    /// display only.
    pub is_random_probability: f64,
}

impl Report {
    pub fn test(name: &str, message: &str, is_random_probability: f64) -> Self {
        Self::new(name, ReportKind::Test, message, is_random_probability)
    }

    pub fn summary(name: &str, message: &str, is_random_probability: f64) -> Self {
        Self::new(name, ReportKind::Summary, message, is_random_probability)
    }

    fn new(name: &str, kind: ReportKind, message: &str, is_random_probability: f64) -> Self {
        Self {
            name: name.to_string(),
            kind,
            message: message.to_string(),
            metrics: BTreeMap::new(),
            is_random_probability,
        }
    }

    /// Attach a named metric.
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.metrics.insert(key.to_string(), value);
        self
    }

    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).copied()
    }

    pub fn is_summary(&self) -> bool {
        self.kind == ReportKind::Summary
    }

    /// Score clamped to [0, 1] for display.
    pub fn display_score(&self) -> f64 {
        if self.is_random_probability.is_nan() {
            0.0
        } else {
            self.is_random_probability.clamp(0.0, 1.0)
        }
    }

    /// Letter grade of the clamped score.
    ///
    /// - A: >= 0.99
    /// - B: >= 0.95
    /// - C: >= 0.80
    /// - D: >= 0.50
    /// - F: otherwise
    pub fn grade(&self) -> char {
        match self.display_score() {
            s if s >= 0.99 => 'A',
            s if s >= 0.95 => 'B',
            s if s >= 0.80 => 'C',
            s if s >= 0.50 => 'D',
            _ => 'F',
        }
    }
}
