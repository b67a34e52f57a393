//! Shared helpers for the integration suites.

#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use greenlight::reporters::Reporter;

/// Serializes tests that touch process-wide state (the comparator registry,
/// the front-loaded reporter slot, the test-passed notification). Overrides
/// are scoped with disposers, but the slots themselves are shared across the
/// whole test binary.
pub static GLOBAL_STATE: Mutex<()> = Mutex::new(());

pub fn global_state_lock() -> std::sync::MutexGuard<'static, ()> {
    GLOBAL_STATE.lock().unwrap_or_else(|e| e.into_inner())
}

/// A reporter that records its invocation into a shared log and returns a
/// scripted outcome.
pub struct RecordingReporter {
    pub label: &'static str,
    pub outcome: bool,
    pub log: Arc<Mutex<Vec<&'static str>>>,
}

impl RecordingReporter {
    pub fn new(label: &'static str, outcome: bool, log: &Arc<Mutex<Vec<&'static str>>>) -> Arc<Self> {
        Arc::new(Self {
            label,
            outcome,
            log: Arc::clone(log),
        })
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, _received: &Path, _approved: &Path) -> bool {
        self.log
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(self.label);
        self.outcome
    }
}

pub fn new_log() -> Arc<Mutex<Vec<&'static str>>> {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn log_entries(log: &Arc<Mutex<Vec<&'static str>>>) -> Vec<&'static str> {
    log.lock().unwrap_or_else(|e| e.into_inner()).clone()
}
