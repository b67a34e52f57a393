//! Per-verification configuration bundle.

use std::sync::Arc;

use crate::reporters::{ConsoleReporter, Reporter};
use crate::scrubbers::{self, Scrubber};

/// Immutable configuration for one verification call: a scrubber applied to
/// the artifact before it is written, and the fallback reporter used when
/// the front-loaded reporter declines.
///
/// Deriving a variant preserves the rest of the bundle: `with_reporter`
/// keeps the scrubber, `with_scrubber` keeps the reporter.
#[derive(Clone)]
pub struct Options {
    scrubber: Scrubber,
    reporter: Arc<dyn Reporter>,
}

impl Options {
    pub fn new() -> Self {
        Self {
            scrubber: scrubbers::identity(),
            reporter: Arc::new(ConsoleReporter),
        }
    }

    pub fn with_scrubber(self, scrubber: Scrubber) -> Self {
        Self { scrubber, ..self }
    }

    pub fn with_reporter(self, reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter, ..self }
    }

    /// Apply the configured scrubber to `input`.
    pub fn scrub(&self, input: &str) -> String {
        (self.scrubber)(input)
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
