//! The verification engine: write received, locate approved, compare,
//! report-or-pass, clean up.
//!
//! Verification is a one-shot, synchronous state machine per call:
//! `Start → Written → Located → Compared → {Passed | Reported-Failure}`.
//! Approval failures are never recovered locally — they are reported
//! (best-effort, see [`crate::reporters`]) and then surfaced to the caller.

use std::path::Path;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::comparators::{comparator_for, ApprovalComparator};
use crate::errors::{ApprovalError, ApprovalResult};
use crate::fs_util;
use crate::namers::ApprovalNamer;
use crate::options::Options;
use crate::reporters::report_approval_failure;
use crate::writers::ApprovalWriter;

type TestPassedNotification = Arc<dyn Fn() + Send + Sync>;

// Process-wide hook fired after every successful verification. Reassignable
// for the lifetime of the process; never torn down.
static TEST_PASSED: Lazy<RwLock<TestPassedNotification>> =
    Lazy::new(|| RwLock::new(Arc::new(|| {})));

/// Replace the notification invoked after every passing verification.
pub fn set_test_passed_notification(notification: impl Fn() + Send + Sync + 'static) {
    let mut slot = TEST_PASSED.write().unwrap_or_else(|e| e.into_inner());
    *slot = Arc::new(notification);
}

fn notify_test_passed() {
    let notification = Arc::clone(&TEST_PASSED.read().unwrap_or_else(|e| e.into_inner()));
    notification();
}

/// Orchestrates a single approval verification.
pub struct FileApprover;

impl FileApprover {
    /// Full verification flow: materialize the received artifact, compare it
    /// against the approved baseline with the extension-resolved comparator,
    /// report on failure, clean up on success.
    pub fn verify(
        namer: &dyn ApprovalNamer,
        writer: &dyn ApprovalWriter,
        options: &Options,
    ) -> ApprovalResult<()> {
        let comparator = comparator_for(&namer.received_path(writer.file_extension_with_dot()));
        Self::verify_with_comparator(namer, writer, options, comparator.as_ref())
    }

    /// Like [`FileApprover::verify`], with an explicit comparator override
    /// instead of the registry lookup.
    pub fn verify_with_comparator(
        namer: &dyn ApprovalNamer,
        writer: &dyn ApprovalWriter,
        options: &Options,
        comparator: &dyn ApprovalComparator,
    ) -> ApprovalResult<()> {
        let extension = writer.file_extension_with_dot();
        let received = namer.received_path(extension);
        let approved = namer.approved_path(extension);

        writer.write(&received)?;

        match Self::verify_paths_with(&received, &approved, comparator) {
            Ok(()) => {
                // Only the approved baseline stays on disk after a pass.
                writer.cleanup_received(&received);
                notify_test_passed();
                Ok(())
            }
            Err(err) if err.is_approval_failure() => {
                report_approval_failure(&received, &approved, options.reporter());
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Compare two already-materialized files with the registry-resolved
    /// comparator. No reporting, no cleanup, no notification.
    pub fn verify_paths(received: &Path, approved: &Path) -> ApprovalResult<()> {
        Self::verify_paths_with(received, approved, comparator_for(received).as_ref())
    }

    /// Existence checks plus comparator dispatch. Both files are
    /// independently required; the error names whichever is absent.
    pub fn verify_paths_with(
        received: &Path,
        approved: &Path,
        comparator: &dyn ApprovalComparator,
    ) -> ApprovalResult<()> {
        if !fs_util::file_exists(approved) {
            return Err(ApprovalError::Missing {
                missing: approved.to_path_buf(),
                reference: received.to_path_buf(),
            });
        }
        if !fs_util::file_exists(received) {
            return Err(ApprovalError::Missing {
                missing: received.to_path_buf(),
                reference: approved.to_path_buf(),
            });
        }
        if !comparator.contents_equivalent(received, approved)? {
            return Err(ApprovalError::Mismatch {
                received: received.to_path_buf(),
                approved: approved.to_path_buf(),
            });
        }
        Ok(())
    }
}
