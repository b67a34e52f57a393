//! Writers materialize a test's artifact at a namer-derived path.

use std::path::Path;

use crate::errors::ApprovalResult;
use crate::fs_util;

/// A capability that knows how to produce the received artifact, what its
/// canonical extension is, and how to clean up after a successful
/// verification.
pub trait ApprovalWriter {
    /// The artifact's file extension, including the leading dot.
    fn file_extension_with_dot(&self) -> &str;

    /// Materialize the artifact at `path`.
    fn write(&self, path: &Path) -> ApprovalResult<()>;

    /// Remove a received file after a pass. Best-effort: a failure to delete
    /// must not turn a passing verification into a failure.
    fn cleanup_received(&self, path: &Path) {
        fs_util::remove_file_best_effort(path);
    }
}

/// Writes an in-memory string as the received artifact. The extension
/// defaults to `.txt`.
pub struct StringWriter {
    contents: String,
    extension_with_dot: String,
}

impl StringWriter {
    pub fn new(contents: impl Into<String>) -> Self {
        Self::with_extension(contents, ".txt")
    }

    pub fn with_extension(contents: impl Into<String>, extension_with_dot: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            extension_with_dot: extension_with_dot.into(),
        }
    }
}

impl ApprovalWriter for StringWriter {
    fn file_extension_with_dot(&self) -> &str {
        &self.extension_with_dot
    }

    fn write(&self, path: &Path) -> ApprovalResult<()> {
        fs_util::write_text(path, &self.contents)
    }
}
