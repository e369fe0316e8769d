//! # randsuite-core
//!
//! **Does your generator really behave like uniform noise over [0, 1)?**
//!
//! `randsuite-core` draws a fixed-size batch from a generator, validates every
//! value, and runs a battery of statistical tests over it. Each test returns a
//! score in [0, 1] estimating how random the batch looks under that test's
//! single assumption; summaries fold those scores into one number.
//!
//! ## Quick Start
//!
//! ```
//! use randsuite_core::{Registry, SuiteConfig, TestSuite};
//!
//! let mut state: u64 = 0x2545_F491_4F6C_DD1D;
//! let suite = TestSuite::builder()
//!     .samples(4096)
//!     .registry(Registry::ent(&SuiteConfig::default()))
//!     .build_with(move || {
//!         state ^= state << 13;
//!         state ^= state >> 7;
//!         state ^= state << 17;
//!         (state >> 11) as f64 / (1u64 << 53) as f64
//!     })
//!     .expect("xorshift output stays in [0, 1)");
//!
//! for report in suite.run() {
//!     println!("{:<20} {:.4}", report.name, report.is_random_probability);
//! }
//! ```
//!
//! ## Architecture
//!
//! Generator → Sample (validated, ordered) → Tests → Summaries → Reports
//!
//! The tests:
//! - **Monte Carlo pi**: pairs of values as points in a square.
//! - **Average**: mean against 0.5, constant streams score 0.
//! - **Entropy**: Shannon entropy of value buckets.
//! - **Chi-squared**: flatness of value buckets.
//! - **Serial correlation**: autocovariance through the power spectrum.
//!
//! Sampling is the only fallible step. A value outside [0, 1) aborts suite
//! construction with a [`ConfigurationError`] before any test runs.

pub mod battery;
pub mod config;
pub mod error;
pub mod registry;
pub mod report;
pub mod sample;
pub mod source;
pub mod suite;
pub mod summary;

pub use battery::RandomnessTest;
pub use config::{Bucketing, FrequencyOptions, Normalization, SuiteConfig};
pub use error::{ConfigurationError, Result};
pub use registry::Registry;
pub use report::{Report, ReportKind};
pub use sample::{DEFAULT_SAMPLES, Sample};
pub use source::{FnSource, GeneratorError, UniformSource, from_fn};
pub use suite::{TestSuite, TestSuiteBuilder};
pub use summary::Summary;

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
