//! Namers derive received/approved artifact paths from a test identity.
//!
//! The crate never guesses the calling test's name or source location; the
//! identity is supplied explicitly, which keeps path derivation pure and the
//! namer usable from any test runner.

use std::path::{Path, PathBuf};

/// Maps a file extension (with leading dot) to the received and approved
/// artifact paths for one test identity. Both functions must be pure: the
/// same namer and extension always yield the same paths.
pub trait ApprovalNamer {
    fn approved_path(&self, extension_with_dot: &str) -> PathBuf;
    fn received_path(&self, extension_with_dot: &str) -> PathBuf;
}

/// Standard namer: artifacts live next to each other in one directory, named
/// `<test_name>.approved<ext>` / `<test_name>.received<ext>`, with an
/// optional variant index for parameterized tests
/// (`<test_name>.<index>.approved<ext>`).
#[derive(Debug, Clone)]
pub struct TestNamer {
    directory: PathBuf,
    test_name: String,
    index: Option<usize>,
}

impl TestNamer {
    pub fn new(directory: impl Into<PathBuf>, test_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            test_name: test_name.into(),
            index: None,
        }
    }

    /// A sibling namer for the `index`-th variant of the same test.
    pub fn indexed(&self, index: usize) -> Self {
        Self {
            directory: self.directory.clone(),
            test_name: self.test_name.clone(),
            index: Some(index),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_name(&self, kind: &str, extension_with_dot: &str) -> String {
        match self.index {
            Some(index) => format!("{}.{index}.{kind}{extension_with_dot}", self.test_name),
            None => format!("{}.{kind}{extension_with_dot}", self.test_name),
        }
    }
}

impl ApprovalNamer for TestNamer {
    fn approved_path(&self, extension_with_dot: &str) -> PathBuf {
        self.directory
            .join(self.file_name("approved", extension_with_dot))
    }

    fn received_path(&self, extension_with_dot: &str) -> PathBuf {
        self.directory
            .join(self.file_name("received", extension_with_dot))
    }
}
