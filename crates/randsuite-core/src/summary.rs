//! Aggregation of test reports into one score.

use crate::error::{ConfigurationError, Result};
use crate::report::Report;

/// A registered summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Summary {
    /// Arithmetic mean of the test scores.
    Average,
    /// Worst test score.
    Minimum,
}

impl Summary {
    pub const NAMES: [&'static str; 2] = ["average_summary", "minimum_summary"];

    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "average_summary" => Ok(Self::Average),
            "minimum_summary" => Ok(Self::Minimum),
            _ => Err(ConfigurationError::UnknownSummary(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Average => "average_summary",
            Self::Minimum => "minimum_summary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Average => "Mean of all test scores",
            Self::Minimum => "Lowest test score",
        }
    }

    /// Aggregate `reports`. An empty set scores 0.
    pub fn run(&self, reports: &[Report]) -> Report {
        let scores = reports.iter().map(|r| r.is_random_probability);
        let score = if reports.is_empty() {
            0.0
        } else {
            match self {
                Self::Average => scores.sum::<f64>() / reports.len() as f64,
                Self::Minimum => scores.fold(f64::INFINITY, f64::min),
            }
        };
        let message = match self {
            Self::Average => "Mean of the randomness probability of every test",
            Self::Minimum => "Randomness probability of the weakest test",
        };
        Report::summary(self.name(), message, score).with("tests", reports.len() as f64)
    }
}
