//! End-to-end scenarios for randsuite-core.
//!
//! These tests drive the full pipeline:
//! generator → sample validation → ENT battery → average summary.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use randsuite_core::{
    ConfigurationError, DEFAULT_SAMPLES, Normalization, Registry, Report, SuiteConfig, TestSuite,
    UniformSource,
};

fn ent_suite(samples: usize, next: impl FnMut() -> f64) -> TestSuite {
    TestSuite::builder()
        .samples(samples)
        .registry(Registry::ent(&SuiteConfig::default()))
        .build_with(next)
        .expect("generator output is in [0, 1)")
}

fn find<'a>(reports: &'a [Report], name: &str) -> &'a Report {
    reports
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no report named {name}"))
}

#[test]
fn uniform_generator_scores_high() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let suite = ent_suite(DEFAULT_SAMPLES, move || rng.random::<f64>());
    let reports = suite.run();
    assert_eq!(reports.len(), 6);

    let summary = find(&reports, "average_summary");
    assert!(
        summary.is_random_probability >= 0.99,
        "average summary {}",
        summary.is_random_probability
    );

    let monte_carlo = find(&reports, "monte_carlo_pi");
    let pi = monte_carlo.metric("estimatedPi").unwrap();
    assert!((pi - 3.14159).abs() < 0.01, "pi estimate {pi}");
    assert!(monte_carlo.is_random_probability >= 0.99);

    assert!(find(&reports, "average").is_random_probability >= 0.99);
    assert!(find(&reports, "serial_correlation").is_random_probability >= 0.99);
}

#[test]
fn constant_generator_scores_low() {
    let suite = ent_suite(DEFAULT_SAMPLES, || 0.999999);
    let reports = suite.run();

    assert!(find(&reports, "average_summary").is_random_probability <= 0.01);
    assert!(find(&reports, "average").is_random_probability <= 0.01);
    assert!(find(&reports, "serial_correlation").is_random_probability <= 0.01);
}

#[test]
fn constant_sample_is_degenerate() {
    for c in [0.001, 0.25, 0.5, 0.75] {
        let suite = ent_suite(5000, move || c);
        let average = suite.run_test("average").unwrap();
        assert_eq!(average.is_random_probability, 0.0);
        let serial = suite.run_test("serial_correlation").unwrap();
        assert_eq!(serial.metric("autocorrelation"), Some(1.0));
        assert_eq!(serial.is_random_probability, 0.0);
    }
}

#[test]
fn period_two_stream_is_serially_correlated() {
    let mut flip = false;
    let suite = ent_suite(1 << 16, move || {
        flip = !flip;
        if flip { 0.0 } else { 0.5 }
    });
    let serial = suite.run_test("serial_correlation").unwrap();
    assert!(
        serial.is_random_probability < 0.01,
        "serial score {}",
        serial.is_random_probability
    );
}

#[test]
fn out_of_range_value_aborts_before_any_test() {
    struct Overshooting(u32);

    impl UniformSource for Overshooting {
        fn next_value(&mut self) -> Result<f64, randsuite_core::GeneratorError> {
            self.0 += 1;
            Ok(if self.0 == 10 { 1.0 } else { 0.3 })
        }
    }

    let mut source = Overshooting(0);
    let err = TestSuite::builder()
        .samples(100)
        .registry(Registry::ent(&SuiteConfig::default()))
        .build(&mut source)
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::OutOfRange { index: 9, .. }));
    // Drawing stopped at the offending value.
    assert_eq!(source.0, 10);
}

#[test]
fn reruns_are_bit_identical() {
    let mut rng = StdRng::seed_from_u64(99);
    let suite = ent_suite(1 << 14, move || rng.random::<f64>());
    let first = serde_json::to_string(&suite.run()).unwrap();
    let second = serde_json::to_string(&suite.run()).unwrap();
    assert_eq!(first, second);
    assert_eq!(suite.run_parallel(), suite.run());
}

#[test]
fn corrected_normalization_with_bins() {
    let config = SuiteConfig {
        samples: 1 << 16,
        normalization: Normalization::SampleSize,
        bins: Some(256),
        ..SuiteConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(3);
    let mut source = randsuite_core::from_fn(move || rng.random::<f64>());
    let suite = TestSuite::from_config(&mut source, &config).unwrap();
    let reports = suite.run();

    let entropy = find(&reports, "entropy");
    assert_eq!(entropy.metric("buckets"), Some(256.0));
    assert!(entropy.is_random_probability > 0.99);

    let chi = find(&reports, "chi_squared");
    assert!(chi.is_random_probability > 0.99);
    assert!(chi.metric("pValue").unwrap() > 1e-4);
}

#[test]
fn reports_serialize_as_flat_records() {
    let suite = ent_suite(1024, {
        let mut rng = StdRng::seed_from_u64(11);
        move || rng.random::<f64>()
    });
    let json = serde_json::to_value(suite.run()).unwrap();
    let first = &json[0];
    assert_eq!(first["name"], "monte_carlo_pi");
    assert_eq!(first["kind"], "test");
    assert!(first["isRandomProbability"].is_f64());
    assert!(first["estimatedPi"].is_f64());
    assert_eq!(json[5]["kind"], "summary");
}
