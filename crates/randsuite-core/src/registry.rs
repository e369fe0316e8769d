//! Which tests and summaries a suite runs, in order.

use crate::battery::RandomnessTest;
use crate::config::SuiteConfig;
use crate::summary::Summary;

/// Ordered tests and summaries, keyed by name.
///
/// Registering a name that is already present replaces that entry in place,
/// so insertion order stays the run order.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    tests: Vec<RandomnessTest>,
    summaries: Vec<Summary>,
}

impl Default for Registry {
    /// The placeholder test and the average summary.
    fn default() -> Self {
        Self::empty()
            .with_test(RandomnessTest::Placeholder)
            .with_summary(Summary::Average)
    }
}

impl Registry {
    /// No tests, no summaries.
    pub fn empty() -> Self {
        Self {
            tests: Vec::new(),
            summaries: Vec::new(),
        }
    }

    /// The five ENT-style tests and the average summary.
    pub fn ent(config: &SuiteConfig) -> Self {
        RandomnessTest::ent_battery(config)
            .into_iter()
            .fold(Self::empty(), Self::with_test)
            .with_summary(Summary::Average)
    }

    pub fn with_test(mut self, test: RandomnessTest) -> Self {
        match self.tests.iter_mut().find(|t| t.name() == test.name()) {
            Some(existing) => *existing = test,
            None => self.tests.push(test),
        }
        self
    }

    pub fn with_summary(mut self, summary: Summary) -> Self {
        if !self.summaries.contains(&summary) {
            self.summaries.push(summary);
        }
        self
    }

    pub fn without_summaries(mut self) -> Self {
        self.summaries.clear();
        self
    }

    pub fn tests(&self) -> &[RandomnessTest] {
        &self.tests
    }

    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    pub fn test(&self, name: &str) -> Option<&RandomnessTest> {
        self.tests.iter().find(|t| t.name() == name)
    }

    pub fn test_names(&self) -> Vec<&'static str> {
        self.tests.iter().map(RandomnessTest::name).collect()
    }

    pub fn summary_names(&self) -> Vec<&'static str> {
        self.summaries.iter().map(Summary::name).collect()
    }
}
