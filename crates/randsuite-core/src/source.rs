//! Generator abstraction consumed by the sampler.
//!
//! Anything that can hand out floats claiming to be uniform over [0.0, 1.0)
//! implements [`UniformSource`]. The suite never trusts the claim: every value
//! is range-checked while the sample is drawn.

/// Boxed error a generator may return instead of a value.
pub type GeneratorError = Box<dyn std::error::Error + Send + Sync>;

/// A generator exposing a zero-argument "next value" operation.
pub trait UniformSource {
    /// Produce the next value. Expected in [0.0, 1.0).
    fn next_value(&mut self) -> Result<f64, GeneratorError>;

    /// Short identifier used in log lines.
    fn name(&self) -> &str {
        "generator"
    }
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_value(&mut self) -> Result<f64, GeneratorError> {
        (**self).next_value()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: UniformSource + ?Sized> UniformSource for Box<S> {
    fn next_value(&mut self) -> Result<f64, GeneratorError> {
        (**self).next_value()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Adapter turning an infallible closure into a [`UniformSource`].
///
/// This is the override path: a caller with no generator type of its own can
/// pass `|| rng.random()` straight to the suite builder.
pub struct FnSource<F> {
    next: F,
}

impl<F: FnMut() -> f64> FnSource<F> {
    pub fn new(next: F) -> Self {
        Self { next }
    }
}

impl<F: FnMut() -> f64> UniformSource for FnSource<F> {
    fn next_value(&mut self) -> Result<f64, GeneratorError> {
        Ok((self.next)())
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Wrap a closure as a [`UniformSource`].
pub fn from_fn<F: FnMut() -> f64>(next: F) -> FnSource<F> {
    FnSource::new(next)
}
