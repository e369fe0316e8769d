//! Suite orchestration: draw once, run tests, then summaries.

use crate::config::SuiteConfig;
use crate::error::Result;
use crate::registry::Registry;
use crate::report::Report;
use crate::sample::{DEFAULT_SAMPLES, Sample};
use crate::source::{UniformSource, from_fn};

/// A validated sample bound to the tests and summaries to run over it.
#[derive(Debug, Clone)]
pub struct TestSuite {
    sample: Sample,
    registry: Registry,
}

/// Builder for [`TestSuite`].
#[derive(Debug, Clone)]
pub struct TestSuiteBuilder {
    samples: usize,
    registry: Registry,
}

impl Default for TestSuiteBuilder {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            registry: Registry::default(),
        }
    }
}

impl TestSuiteBuilder {
    /// Number of values to draw (default 2^20).
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Draw the sample from `source`.
    pub fn build<S: UniformSource + ?Sized>(self, source: &mut S) -> Result<TestSuite> {
        let sample = Sample::draw(source, self.samples)?;
        Ok(TestSuite::from_sample(sample, self.registry))
    }

    /// Draw the sample from a closure instead of a generator type.
    pub fn build_with<F: FnMut() -> f64>(self, next: F) -> Result<TestSuite> {
        self.build(&mut from_fn(next))
    }
}

impl TestSuite {
    pub fn builder() -> TestSuiteBuilder {
        TestSuiteBuilder::default()
    }

    /// Build from a configuration. Without configured tests the ENT battery
    /// runs, not the placeholder.
    pub fn from_config<S: UniformSource + ?Sized>(
        source: &mut S,
        config: &SuiteConfig,
    ) -> Result<Self> {
        config.validate()?;
        let configured = config.registry()?;
        let registry = match config.tests {
            Some(_) => configured,
            None => configured
                .summaries()
                .iter()
                .copied()
                .fold(Registry::ent(config).without_summaries(), Registry::with_summary),
        };
        Self::builder()
            .samples(config.samples)
            .registry(registry)
            .build(source)
    }

    /// Bind an existing sample.
    pub fn from_sample(sample: Sample, registry: Registry) -> Self {
        Self { sample, registry }
    }

    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run every test in registry order, then every summary over all test
    /// reports.
    pub fn run(&self) -> Vec<Report> {
        let reports: Vec<Report> = self
            .registry
            .tests()
            .iter()
            .map(|test| test.run(&self.sample))
            .collect();
        self.with_summaries(reports)
    }

    /// Same reports as [`run`](Self::run), with each test on its own thread.
    pub fn run_parallel(&self) -> Vec<Report> {
        let reports = std::thread::scope(|s| {
            let handles: Vec<_> = self
                .registry
                .tests()
                .iter()
                .map(|test| s.spawn(move || test.run(&self.sample)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect::<Vec<_>>()
        });
        self.with_summaries(reports)
    }

    /// Run a single registered test by name.
    pub fn run_test(&self, name: &str) -> Option<Report> {
        self.registry.test(name).map(|test| test.run(&self.sample))
    }

    fn with_summaries(&self, mut reports: Vec<Report>) -> Vec<Report> {
        let summaries: Vec<Report> = self
            .registry
            .summaries()
            .iter()
            .map(|summary| summary.run(&reports))
            .collect();
        reports.extend(summaries);
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::RandomnessTest;
    use crate::error::ConfigurationError;
    use crate::report::ReportKind;
    use crate::summary::Summary;

    /// Deterministic LCG floats in [0, 1).
    fn lcg(seed: u64) -> impl FnMut() -> f64 {
        let mut state = seed;
        move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    fn ent_suite(samples: usize) -> TestSuite {
        TestSuite::builder()
            .samples(samples)
            .registry(Registry::ent(&SuiteConfig::default()))
            .build_with(lcg(42))
            .unwrap()
    }

    #[test]
    fn default_suite_runs_placeholder_then_summary() {
        let suite = TestSuite::builder().samples(64).build_with(lcg(1)).unwrap();
        let reports = suite.run();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name, "placeholder");
        assert_eq!(reports[0].kind, ReportKind::Test);
        assert_eq!(reports[1].name, "average_summary");
        assert_eq!(reports[1].is_random_probability, 0.0);
    }

    #[test]
    fn report_count_is_tests_plus_summaries() {
        let suite = ent_suite(4096);
        let registry = suite.registry();
        let reports = suite.run();
        assert_eq!(
            reports.len(),
            registry.tests().len() + registry.summaries().len()
        );
        assert!(reports[..5].iter().all(|r| !r.is_summary()));
        assert!(reports[5].is_summary());
    }

    #[test]
    fn run_is_deterministic() {
        let suite = ent_suite(8192);
        assert_eq!(suite.run(), suite.run());
    }

    #[test]
    fn parallel_matches_sequential() {
        let suite = ent_suite(8192);
        assert_eq!(suite.run_parallel(), suite.run());
    }

    #[test]
    fn summary_sees_every_test_report() {
        let suite = ent_suite(4096);
        let reports = suite.run();
        let mean = reports[..5]
            .iter()
            .map(|r| r.is_random_probability)
            .sum::<f64>()
            / 5.0;
        assert_eq!(reports[5].is_random_probability, mean);
        assert_eq!(reports[5].metric("tests"), Some(5.0));
    }

    #[test]
    fn run_single_test_by_name() {
        let suite = ent_suite(4096);
        let report = suite.run_test("average").unwrap();
        assert_eq!(report.name, "average");
        assert!(suite.run_test("placeholder").is_none());
    }

    #[test]
    fn invalid_value_aborts_construction() {
        let mut n = 0;
        let result = TestSuite::builder().samples(100).build_with(|| {
            n += 1;
            if n == 50 { 1.0 } else { 0.5 }
        });
        assert!(matches!(
            result,
            Err(ConfigurationError::OutOfRange { index: 49, .. })
        ));
    }

    #[test]
    fn sample_has_requested_length() {
        let suite = ent_suite(1000);
        assert_eq!(suite.sample().len(), 1000);
    }

    #[test]
    fn from_config_defaults_to_ent_battery() {
        let config = SuiteConfig {
            samples: 2048,
            summaries: Some(vec!["minimum_summary".into()]),
            ..SuiteConfig::default()
        };
        let suite = TestSuite::from_config(&mut from_fn(lcg(7)), &config).unwrap();
        assert_eq!(suite.registry().tests().len(), 5);
        assert_eq!(suite.registry().summaries(), &[Summary::Minimum]);
        assert_eq!(suite.sample().len(), 2048);
    }

    #[test]
    fn from_config_honours_explicit_tests() {
        let config = SuiteConfig {
            samples: 256,
            tests: Some(vec!["average".into()]),
            ..SuiteConfig::default()
        };
        let suite = TestSuite::from_config(&mut from_fn(lcg(7)), &config).unwrap();
        assert_eq!(suite.registry().tests(), &[RandomnessTest::Average]);
        assert_eq!(suite.registry().summary_names(), vec!["average_summary"]);
    }

    #[test]
    fn from_config_validates_first() {
        let config = SuiteConfig {
            samples: 0,
            ..SuiteConfig::default()
        };
        let mut calls = 0;
        let result = TestSuite::from_config(
            &mut from_fn(|| {
                calls += 1;
                0.5
            }),
            &config,
        );
        assert!(matches!(result, Err(ConfigurationError::EmptySample)));
        assert_eq!(calls, 0);
    }
}
