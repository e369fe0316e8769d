//! The uniformity test battery.
//!
//! Every test is a pure function over a validated sample of floats in
//! [0.0, 1.0) and returns a [`Report`] whose `is_random_probability` is the
//! likelihood of randomness under that test's lone assumption.
//!
//! [`RandomnessTest`] is the tagged variant the registry stores; each variant
//! dispatches to one of the free functions below.

use std::f64::consts::PI;

use rustfft::{FftPlanner, num_complex::Complex};
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::config::{Bucketing, FrequencyOptions, Normalization, SuiteConfig};
use crate::error::{ConfigurationError, Result};
use crate::report::Report;
use crate::sample::{self, Sample};

/// Error scale of the Monte Carlo estimate: an error of 0.1 scores zero.
const PI_TOLERANCE: f64 = 0.1;

// ═══════════════════════════════════════════════════════════════════════════════
// Registry variants
// ═══════════════════════════════════════════════════════════════════════════════

/// A registered test with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RandomnessTest {
    Placeholder,
    MonteCarloPi { radius: f64 },
    Average,
    Entropy(FrequencyOptions),
    ChiSquared(FrequencyOptions),
    SerialCorrelation,
}

impl RandomnessTest {
    /// Every test identifier, in battery order.
    pub const NAMES: [&'static str; 6] = [
        "placeholder",
        "monte_carlo_pi",
        "average",
        "entropy",
        "chi_squared",
        "serial_correlation",
    ];

    /// The ENT-style battery with parameters taken from `config`.
    pub fn ent_battery(config: &SuiteConfig) -> Vec<Self> {
        let frequency = config.frequency_options();
        vec![
            Self::MonteCarloPi {
                radius: config.monte_carlo_radius,
            },
            Self::Average,
            Self::Entropy(frequency),
            Self::ChiSquared(frequency),
            Self::SerialCorrelation,
        ]
    }

    /// Build a test from its identifier.
    pub fn from_name(name: &str, config: &SuiteConfig) -> Result<Self> {
        let frequency = config.frequency_options();
        match name.trim().to_lowercase().as_str() {
            "placeholder" => Ok(Self::Placeholder),
            "monte_carlo_pi" => Ok(Self::MonteCarloPi {
                radius: config.monte_carlo_radius,
            }),
            "average" => Ok(Self::Average),
            "entropy" => Ok(Self::Entropy(frequency)),
            "chi_squared" => Ok(Self::ChiSquared(frequency)),
            "serial_correlation" => Ok(Self::SerialCorrelation),
            _ => Err(ConfigurationError::UnknownTest(name.to_string())),
        }
    }

    /// Stable identifier, used as the report name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Placeholder => "placeholder",
            Self::MonteCarloPi { .. } => "monte_carlo_pi",
            Self::Average => "average",
            Self::Entropy(_) => "entropy",
            Self::ChiSquared(_) => "chi_squared",
            Self::SerialCorrelation => "serial_correlation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Placeholder => "Example test; always scores 0",
            Self::MonteCarloPi { .. } => "Estimate pi from consecutive (x, y) pairs",
            Self::Average => "Sample mean against the midpoint 0.5",
            Self::Entropy(_) => "Shannon entropy of value buckets against the maximum",
            Self::ChiSquared(_) => "Chi-squared goodness of fit of value buckets",
            Self::SerialCorrelation => "FFT autocorrelation across all lags",
        }
    }

    pub fn run(&self, sample: &Sample) -> Report {
        match *self {
            Self::Placeholder => placeholder(sample),
            Self::MonteCarloPi { radius } => monte_carlo_pi(sample, radius),
            Self::Average => average(sample),
            Self::Entropy(options) => entropy(sample, options),
            Self::ChiSquared(options) => chi_squared(sample, options),
            Self::SerialCorrelation => serial_correlation(sample),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// `1 - clamp(x, 0, 1)`.
fn complement_clamped(x: f64) -> f64 {
    1.0 - x.clamp(0.0, 1.0)
}

/// Zero-score report when the sample is too short for the test.
fn insufficient(name: &str, message: &str, needed: usize, got: usize) -> Report {
    Report::test(name, message, 0.0)
        .with("needed", needed as f64)
        .with("got", got as f64)
}

/// Bucket counts, in ascending value order.
fn bucket_counts(data: &[f64], bucketing: Bucketing) -> Vec<u64> {
    match bucketing {
        Bucketing::Exact => {
            let mut sorted = data.to_vec();
            sorted.sort_by(f64::total_cmp);
            let mut counts = Vec::new();
            let mut current = f64::NAN;
            for v in sorted {
                if v == current {
                    if let Some(last) = counts.last_mut() {
                        *last += 1;
                    }
                } else {
                    counts.push(1);
                    current = v;
                }
            }
            counts
        }
        Bucketing::Bins(bins) => {
            let bins = bins.max(1);
            let mut counts = vec![0u64; bins];
            for &v in data {
                let idx = ((v * bins as f64) as usize).min(bins - 1);
                counts[idx] += 1;
            }
            counts
        }
    }
}

/// Divisor turning bucket counts into frequencies.
fn frequency_divisor(normalization: Normalization, buckets: usize, n: usize) -> f64 {
    match normalization {
        Normalization::BucketCount => buckets as f64,
        Normalization::SampleSize => n as f64,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 1. PLACEHOLDER
// ═══════════════════════════════════════════════════════════════════════════════

/// Example test: never claims randomness.
pub fn placeholder(_data: &[f64]) -> Report {
    Report::test(
        "placeholder",
        "This test is a placeholder to exemplify tests, therefore is not random",
        0.0,
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// 2. MONTE CARLO PI
// ═══════════════════════════════════════════════════════════════════════════════

/// Monte Carlo pi: non-overlapping (x, y) pairs mapped onto a square of side
/// `2 * radius`; the fraction inside the inscribed circle approaches pi/4.
pub fn monte_carlo_pi(data: &[f64], radius: f64) -> Report {
    let name = "monte_carlo_pi";
    let message = "A uniform generator gives a good Monte Carlo estimate of pi from consecutive (x, y) pairs";
    let pairs = data.len() / 2;
    if pairs == 0 {
        return insufficient(name, message, 2, data.len())
            .with("enginePi", PI)
            .with("estimatedPi", 0.0);
    }

    let radius_sq = radius * radius;
    let hits = data
        .chunks_exact(2)
        .filter(|pair| {
            let dx = pair[0] * radius * 2.0 - radius;
            let dy = pair[1] * radius * 2.0 - radius;
            dx * dx + dy * dy < radius_sq
        })
        .count();

    let estimated = 4.0 * hits as f64 / pairs as f64;
    let error = (estimated - PI) / PI_TOLERANCE;
    Report::test(name, message, complement_clamped(error * error))
        .with("enginePi", PI)
        .with("estimatedPi", estimated)
        .with("pairs", pairs as f64)
        .with("hits", hits as f64)
}

// ═══════════════════════════════════════════════════════════════════════════════
// 3. AVERAGE
// ═══════════════════════════════════════════════════════════════════════════════

/// Mean against the midpoint of [0, 1). A constant stream scores 0 whatever
/// its value.
///
/// Constancy is decided on the values themselves: the variance of a constant
/// stream is a rounding remainder, not exactly zero.
pub fn average(data: &[f64]) -> Report {
    let name = "average";
    let message = "A uniform generator averages (MIN_VALUE + MAX_VALUE) / 2";
    let expected = 0.5;
    let n = data.len() as f64;
    let mean = sample::mean(data);
    let variance = data.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;

    let score = if sample::is_constant(data) || variance == 0.0 {
        0.0
    } else {
        let relative_error = (mean - expected) / expected;
        1.0 - relative_error * relative_error
    };
    Report::test(name, message, score)
        .with("expectedAverage", expected)
        .with("actualAverage", mean)
        .with("expectedVariance", 1.0 / 12.0)
        .with("actualVariance", variance)
}

// ═══════════════════════════════════════════════════════════════════════════════
// 4. FREQUENCY TESTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Shannon entropy (natural log) of the bucket frequencies against `ln(k)`.
pub fn entropy(data: &[f64], options: FrequencyOptions) -> Report {
    let name = "entropy";
    let message = "A uniform generator reaches the maximal Shannon entropy over its buckets";
    let counts = bucket_counts(data, options.bucketing);
    let k = counts.len();
    let divisor = frequency_divisor(options.normalization, k, data.len());

    let h: f64 = counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / divisor;
            -p * p.ln()
        })
        .sum();
    let h_ideal = (k as f64).ln();

    // A single bucket has no entropy to reach.
    let score = if k < 2 {
        0.0
    } else {
        let relative = (h - h_ideal) / h_ideal;
        complement_clamped(relative * relative)
    };
    Report::test(name, message, score)
        .with("entropy", h)
        .with("idealEntropy", h_ideal)
        .with("buckets", k as f64)
}

/// Chi-squared distance between bucket frequencies and the flat `1/k`.
///
/// Also reports the upper-tail p-value of the count-based Pearson statistic
/// with `k - 1` degrees of freedom.
pub fn chi_squared(data: &[f64], options: FrequencyOptions) -> Report {
    let name = "chi_squared";
    let message = "A uniform generator fills every bucket with the same frequency";
    let counts = bucket_counts(data, options.bucketing);
    let k = counts.len();
    let n = data.len();
    let divisor = frequency_divisor(options.normalization, k, n);

    let expected = 1.0 / k as f64;
    let chi2: f64 = counts
        .iter()
        .map(|&c| {
            let diff = c as f64 / divisor - expected;
            diff * diff / expected
        })
        .sum();

    let mut report = Report::test(name, message, complement_clamped(chi2 * chi2))
        .with("chiSquared", chi2)
        .with("buckets", k as f64);

    if k >= 2 {
        let expected_count = n as f64 / k as f64;
        let pearson: f64 = counts
            .iter()
            .map(|&c| {
                let diff = c as f64 - expected_count;
                diff * diff / expected_count
            })
            .sum();
        if let Ok(dist) = ChiSquared::new((k - 1) as f64) {
            report = report.with("pValue", dist.sf(pearson));
        }
    }
    report
}

// ═══════════════════════════════════════════════════════════════════════════════
// 5. SERIAL CORRELATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Serial correlation from the power spectrum (Wiener-Khinchin).
///
/// The sample is centered with a mean taken over the padded length, zero
/// padded to the next power of two, transformed, squared in magnitude and
/// transformed back into the circular autocovariance. The estimate is the
/// mean autocovariance magnitude over all lags relative to lag 0.
pub fn serial_correlation(data: &[f64]) -> Report {
    let name = "serial_correlation";
    let message = "A uniform generator's values do not predict their neighbours";
    let n = data.len();
    let m = n.next_power_of_two();
    let mean = data.iter().sum::<f64>() / m as f64;

    let mut buffer: Vec<Complex<f64>> = data
        .iter()
        .map(|&v| Complex { re: v - mean, im: 0.0 })
        .chain(std::iter::repeat_n(Complex { re: 0.0, im: 0.0 }, m - n))
        .collect();

    let mut planner = FftPlanner::new();
    planner.plan_fft_forward(m).process(&mut buffer);
    for c in buffer.iter_mut() {
        *c = Complex {
            re: c.norm_sqr(),
            im: 0.0,
        };
    }
    planner.plan_fft_inverse(m).process(&mut buffer);

    // Unnormalized forward + inverse scale the autocovariance by m^2.
    let scale = (m as f64) * (m as f64);
    let variance = buffer[0].re / scale;
    let autocorrelation = if sample::is_constant(data) || variance == 0.0 {
        1.0
    } else {
        let mean_magnitude = buffer.iter().map(|c| c.norm() / scale).sum::<f64>() / m as f64;
        mean_magnitude / variance
    };

    Report::test(
        name,
        message,
        1.0 - autocorrelation * autocorrelation,
    )
    .with("autocorrelation", autocorrelation)
    .with("variance", variance)
    .with("paddedLength", m as f64)
}
