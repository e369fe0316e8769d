//! Suite configuration, loadable from JSON.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::battery::RandomnessTest;
use crate::error::{ConfigurationError, Result};
use crate::registry::Registry;
use crate::sample::DEFAULT_SAMPLES;
use crate::summary::Summary;

/// Divisor used to turn bucket counts into frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    /// Divide by the number of buckets. Reproduces the established scores.
    #[default]
    BucketCount,
    /// Divide by the sample size: the textbook statistic.
    SampleSize,
}

impl std::fmt::Display for Normalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BucketCount => write!(f, "bucket_count"),
            Self::SampleSize => write!(f, "sample_size"),
        }
    }
}

/// How values are grouped into frequency buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucketing {
    /// One bucket per distinct value. Only observed buckets count.
    #[default]
    Exact,
    /// `floor(v * bins)`; all `bins` buckets count, empty ones included.
    Bins(usize),
}

/// Options shared by the frequency-based tests (entropy, chi-squared).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FrequencyOptions {
    pub bucketing: Bucketing,
    pub normalization: Normalization,
}

/// Everything needed to build a suite besides the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Number of values drawn from the generator.
    pub samples: usize,
    /// Test names in run order. `None` keeps the placeholder default.
    pub tests: Option<Vec<String>>,
    /// Summary names in run order. `None` means `average_summary`.
    pub summaries: Option<Vec<String>>,
    pub monte_carlo_radius: f64,
    pub normalization: Normalization,
    /// Quantize into this many bins instead of exact-equality buckets.
    pub bins: Option<usize>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            tests: None,
            summaries: None,
            monte_carlo_radius: 1.0,
            normalization: Normalization::default(),
            bins: None,
        }
    }
}

impl SuiteConfig {
    /// Read a JSON configuration file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!("loaded suite configuration from {}", path.display());
        Ok(config)
    }

    pub fn frequency_options(&self) -> FrequencyOptions {
        FrequencyOptions {
            bucketing: self.bins.map_or(Bucketing::Exact, Bucketing::Bins),
            normalization: self.normalization,
        }
    }

    /// Reject values no suite can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.samples == 0 {
            return Err(ConfigurationError::EmptySample);
        }
        if self.bins == Some(0) {
            return Err(ConfigurationError::Invalid(
                "bins must be at least 1".to_string(),
            ));
        }
        if !self.monte_carlo_radius.is_finite() || self.monte_carlo_radius <= 0.0 {
            return Err(ConfigurationError::Invalid(format!(
                "monte_carlo_radius must be positive and finite, got {}",
                self.monte_carlo_radius
            )));
        }
        self.registry().map(|_| ())
    }

    /// Resolve the configured names into a registry.
    pub fn registry(&self) -> Result<Registry> {
        let mut registry = match &self.tests {
            None => Registry::default(),
            Some(names) => {
                let mut registry = Registry::empty();
                for name in names {
                    registry = registry.with_test(RandomnessTest::from_name(name, self)?);
                }
                registry
            }
        };
        if let Some(names) = &self.summaries {
            registry = registry.without_summaries();
            for name in names {
                registry = registry.with_summary(Summary::from_name(name)?);
            }
        }
        Ok(registry)
    }
}
