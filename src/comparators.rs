//! Comparator capabilities and the process-wide extension registry.
//!
//! A comparator decides whether two artifact files are equivalent under a
//! type-specific rule. Comparators are registered per file extension
//! (leading dot, case-sensitive); lookup never fails — unregistered
//! extensions fall back to exact content equality.
//!
//! Registration returns a [`ComparatorDisposer`] that restores the previous
//! registration when dropped, so a test can override the comparator for an
//! extension inside a scope without leaking the override into other tests.
//! Overrides must be serialized by the caller (single-threaded setup or
//! teardown); the registry lock only protects map integrity, not the
//! ordering of concurrent override/restore pairs.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use once_cell::sync::Lazy;

use crate::errors::ApprovalResult;
use crate::fs_util;

/// Decides content equivalence of two artifact files.
///
/// Implementations must be side-effect-free. The verifier checks that both
/// files exist before invoking the comparator, so implementations may assume
/// the existence precondition.
pub trait ApprovalComparator: Send + Sync {
    fn contents_equivalent(&self, received: &Path, approved: &Path) -> ApprovalResult<bool>;
}

/// The default comparator: exact byte-for-byte equality.
pub struct ExactMatchComparator;

impl ApprovalComparator for ExactMatchComparator {
    fn contents_equivalent(&self, received: &Path, approved: &Path) -> ApprovalResult<bool> {
        Ok(fs_util::read_bytes(received)? == fs_util::read_bytes(approved)?)
    }
}

/// Structural equivalence for JSON documents: two files compare equal when
/// they parse to the same `serde_json::Value`, regardless of formatting or
/// object key order. Files that fail to parse fall back to exact byte
/// equality.
pub struct JsonComparator;

impl ApprovalComparator for JsonComparator {
    fn contents_equivalent(&self, received: &Path, approved: &Path) -> ApprovalResult<bool> {
        let received_text = fs_util::read_text(received)?;
        let approved_text = fs_util::read_text(approved)?;
        let received_json = serde_json::from_str::<serde_json::Value>(&received_text);
        let approved_json = serde_json::from_str::<serde_json::Value>(&approved_text);
        match (received_json, approved_json) {
            (Ok(a), Ok(b)) => Ok(a == b),
            _ => Ok(received_text.as_bytes() == approved_text.as_bytes()),
        }
    }
}

type ComparatorMap = HashMap<String, Arc<dyn ApprovalComparator>>;

static COMPARATORS: Lazy<Mutex<ComparatorMap>> = Lazy::new(|| Mutex::new(HashMap::new()));

static DEFAULT_COMPARATOR: Lazy<Arc<dyn ApprovalComparator>> =
    Lazy::new(|| Arc::new(ExactMatchComparator));

fn registry() -> MutexGuard<'static, ComparatorMap> {
    COMPARATORS.lock().unwrap_or_else(|e| e.into_inner())
}

/// Register `comparator` for `extension_with_dot` (e.g. `".json"`).
///
/// Returns a disposer that restores the previous registration for the
/// extension when dropped. Disposers nest: registering twice and dropping in
/// reverse order walks back through each prior state.
#[must_use = "dropping the disposer immediately undoes the registration"]
pub fn register_comparator(
    extension_with_dot: &str,
    comparator: Arc<dyn ApprovalComparator>,
) -> ComparatorDisposer {
    let previous = registry().insert(extension_with_dot.to_string(), comparator);
    ComparatorDisposer {
        extension: extension_with_dot.to_string(),
        previous,
    }
}

/// Resolve the comparator for `path` by its extension. Unregistered
/// extensions (and extension-less paths) get the exact-match default.
pub fn comparator_for(path: &Path) -> Arc<dyn ApprovalComparator> {
    let key = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"));
    match key {
        Some(key) => registry()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&DEFAULT_COMPARATOR)),
        None => Arc::clone(&DEFAULT_COMPARATOR),
    }
}

/// Scoped handle for a comparator registration. Dropping it reinstates the
/// comparator that was active immediately before the registration, or clears
/// the extension if there was none.
pub struct ComparatorDisposer {
    extension: String,
    previous: Option<Arc<dyn ApprovalComparator>>,
}

impl Drop for ComparatorDisposer {
    fn drop(&mut self) {
        let mut map = registry();
        match self.previous.take() {
            Some(previous) => {
                map.insert(self.extension.clone(), previous);
            }
            None => {
                map.remove(&self.extension);
            }
        }
    }
}
