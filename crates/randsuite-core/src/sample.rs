//! The shared, validated input of every test.

use std::ops::Deref;
use std::sync::Arc;

use log::{debug, warn};

use crate::error::{ConfigurationError, Result};
use crate::source::UniformSource;

/// Default number of values drawn per suite: 2^20.
pub const DEFAULT_SAMPLES: usize = 1 << 20;

/// Ordered, immutable sequence of generator outputs, all in [0.0, 1.0).
///
/// Cloning is cheap; clones share the same buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    values: Arc<[f64]>,
}

impl Sample {
    /// Drain `source` exactly `count` times, in call order.
    ///
    /// Fails on the first value that is not a number in [0.0, 1.0) or on the
    /// first generator error. Nothing drawn so far is kept.
    pub fn draw<S: UniformSource + ?Sized>(source: &mut S, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(ConfigurationError::EmptySample);
        }
        let mut values = Vec::with_capacity(count);
        for index in 0..count {
            let value = source.next_value().map_err(|e| {
                warn!("{}: generator error at value #{index}: {e}", source.name());
                ConfigurationError::Generator {
                    index,
                    reason: e.to_string(),
                }
            })?;
            check_value(index, value).inspect_err(|e| warn!("{}: {e}", source.name()))?;
            values.push(value);
        }
        debug!("{}: drew {count} values", source.name());
        Ok(Self {
            values: values.into(),
        })
    }

    /// Validate an already materialized sequence.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(ConfigurationError::EmptySample);
        }
        for (index, &value) in values.iter().enumerate() {
            check_value(index, value)?;
        }
        Ok(Self {
            values: values.into(),
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Arithmetic mean of the values.
    pub fn mean(&self) -> f64 {
        mean(&self.values)
    }

    /// True when every value equals the first one.
    pub fn is_constant(&self) -> bool {
        is_constant(&self.values)
    }
}

/// Arithmetic mean of `values`.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// True when `values` is non-empty and every value equals the first one.
pub(crate) fn is_constant(values: &[f64]) -> bool {
    values
        .first()
        .is_some_and(|&first| values.iter().all(|&v| v == first))
}

impl Deref for Sample {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

fn check_value(index: usize, value: f64) -> Result<()> {
    if value.is_nan() {
        return Err(ConfigurationError::NotANumber { index });
    }
    if !(0.0..1.0).contains(&value) {
        return Err(ConfigurationError::OutOfRange { index, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{GeneratorError, from_fn};

    #[test]
    fn draw_preserves_call_order() {
        let mut i = 0u32;
        let mut src = from_fn(move || {
            i += 1;
            f64::from(i) / 10.0
        });
        let sample = Sample::draw(&mut src, 5).unwrap();
        assert_eq!(sample.values(), &[0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(sample.len(), 5);
    }

    #[test]
    fn draw_rejects_one_and_above() {
        let mut values = vec![0.1, 0.2, 1.0, 0.3].into_iter();
        let mut src = from_fn(move || values.next().unwrap_or(0.0));
        let err = Sample::draw(&mut src, 4).unwrap_err();
        assert!(matches!(err, ConfigurationError::OutOfRange { index: 2, value } if value == 1.0));
        assert_eq!(err.value_index(), Some(2));
    }

    #[test]
    fn draw_rejects_negative_and_nan() {
        let mut src = from_fn(|| -0.5);
        assert!(matches!(
            Sample::draw(&mut src, 3),
            Err(ConfigurationError::OutOfRange { index: 0, .. })
        ));

        let mut src = from_fn(|| f64::NAN);
        assert!(matches!(
            Sample::draw(&mut src, 3),
            Err(ConfigurationError::NotANumber { index: 0 })
        ));
    }

    #[test]
    fn draw_accepts_zero_and_largest_below_one() {
        let below_one = 1.0 - f64::EPSILON / 2.0;
        let mut values = vec![0.0, below_one].into_iter();
        let mut src = from_fn(move || values.next().unwrap_or(0.0));
        let sample = Sample::draw(&mut src, 2).unwrap();
        assert_eq!(sample.values(), &[0.0, below_one]);
    }

    #[test]
    fn draw_reports_generator_errors() {
        struct Broken(usize);
        impl UniformSource for Broken {
            fn next_value(&mut self) -> std::result::Result<f64, GeneratorError> {
                self.0 += 1;
                if self.0 > 3 {
                    Err("entropy pool exhausted".into())
                } else {
                    Ok(0.5)
                }
            }
        }

        let err = Sample::draw(&mut Broken(0), 10).unwrap_err();
        match err {
            ConfigurationError::Generator { index, reason } => {
                assert_eq!(index, 3);
                assert!(reason.contains("exhausted"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn draw_stops_pulling_after_first_violation() {
        let mut calls = 0;
        let mut src = from_fn(|| {
            calls += 1;
            2.0
        });
        assert!(Sample::draw(&mut src, 100).is_err());
        drop(src);
        assert_eq!(calls, 1);
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut src = from_fn(|| 0.5);
        assert!(matches!(
            Sample::draw(&mut src, 0),
            Err(ConfigurationError::EmptySample)
        ));
        assert!(matches!(
            Sample::from_values(Vec::new()),
            Err(ConfigurationError::EmptySample)
        ));
    }

    #[test]
    fn constant_detection_and_mean() {
        let sample = Sample::from_values(vec![0.25; 8]).unwrap();
        assert!(sample.is_constant());
        assert!((sample.mean() - 0.25).abs() < 1e-15);

        let sample = Sample::from_values(vec![0.0, 0.5]).unwrap();
        assert!(!sample.is_constant());
        assert!((sample.mean() - 0.25).abs() < 1e-15);

        // A spread far below float noise on the mean is still a spread.
        let sample = Sample::from_values(vec![0.5, 0.5 + 1e-12]).unwrap();
        assert!(!sample.is_constant());
        assert!(!is_constant(&[]));
    }
}
