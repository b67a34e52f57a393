//! Greenlight error handling.
//!
//! Every failure surfaced by the verification engine is an [`ApprovalError`].
//! The two approval conditions (`Missing`, `Mismatch`) carry both artifact
//! paths so the enclosing test framework can print a precise diagnostic;
//! `Io` covers writer and comparator filesystem failures.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type ApprovalResult<T> = Result<T, ApprovalError>;

/// Unified failure type for approval verification.
///
/// `Missing` and `Mismatch` are the approval conditions proper: the verifier
/// never recovers from them locally, it reports (best-effort) and then
/// propagates them to the caller. `Io` wraps filesystem errors from writers
/// and comparators.
#[derive(Error, Diagnostic, Debug)]
pub enum ApprovalError {
    /// One of the two required files does not exist. `missing` names the
    /// absent file, `reference` the one that was found.
    #[error("approval file not found: {}\n(compared against: {})", missing.display(), reference.display())]
    #[diagnostic(
        code(greenlight::approval::missing),
        help("no baseline yet — inspect the received file and move it over the approved path to accept it")
    )]
    Missing { missing: PathBuf, reference: PathBuf },

    /// Both files exist but their contents are not equivalent under the
    /// active comparator. The received file is left on disk for inspection.
    #[error("received file does not match approved: {}\n(approved: {})", received.display(), approved.display())]
    #[diagnostic(
        code(greenlight::approval::mismatch),
        help("review the reported diff; move the received file over the approved path to accept the change")
    )]
    Mismatch { received: PathBuf, approved: PathBuf },

    /// A writer or comparator could not read or write an artifact.
    #[error("approval I/O failure on {}", path.display())]
    #[diagnostic(code(greenlight::approval::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApprovalError {
    /// The path this failure is primarily about: the absent file for
    /// `Missing`, the received file for `Mismatch`, the touched file for
    /// `Io`.
    pub fn subject_path(&self) -> &PathBuf {
        match self {
            ApprovalError::Missing { missing, .. } => missing,
            ApprovalError::Mismatch { received, .. } => received,
            ApprovalError::Io { path, .. } => path,
        }
    }

    /// True for the two approval conditions, false for plumbing failures.
    pub fn is_approval_failure(&self) -> bool {
        matches!(
            self,
            ApprovalError::Missing { .. } | ApprovalError::Mismatch { .. }
        )
    }
}
