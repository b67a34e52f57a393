//! End-to-end verification flows: write → locate → compare → report-or-pass
//! → cleanup, plus comparator registry scoping and reporter dispatch order.

mod common;

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{global_state_lock, log_entries, new_log, RecordingReporter};
use greenlight::approver::{set_test_passed_notification, FileApprover};
use greenlight::comparators::{
    comparator_for, register_comparator, ApprovalComparator, JsonComparator,
};
use greenlight::errors::{ApprovalError, ApprovalResult};
use greenlight::namers::{ApprovalNamer, TestNamer};
use greenlight::options::Options;
use greenlight::reporters::set_front_loaded_reporter;
use greenlight::writers::{ApprovalWriter, StringWriter};

fn write_approved(namer: &TestNamer, extension: &str, contents: &str) {
    std::fs::write(namer.approved_path(extension), contents).unwrap();
}

#[test]
fn missing_baseline_fails_naming_the_approved_path() {
    let _guard = global_state_lock();
    let log = new_log();
    let _front = set_front_loaded_reporter(RecordingReporter::new("front", true, &log));

    let dir = tempfile::tempdir().unwrap();
    let namer = TestNamer::new(dir.path(), "no_baseline");
    let options = Options::default();

    let err = greenlight::verify("fresh output\n", &namer, &options).unwrap_err();
    match err {
        ApprovalError::Missing { missing, reference } => {
            assert_eq!(missing, namer.approved_path(".txt"));
            assert_eq!(reference, namer.received_path(".txt"));
        }
        other => panic!("expected Missing, got {other:?}"),
    }

    // The received file stays on disk so it can be inspected and approved.
    assert!(namer.received_path(".txt").exists());
    // Reporting ran for the missing baseline too.
    assert_eq!(log_entries(&log), ["front"]);
}

#[test]
fn missing_received_file_is_distinguished_from_missing_baseline() {
    let _guard = global_state_lock();
    let log = new_log();
    let _front = set_front_loaded_reporter(RecordingReporter::new("front", true, &log));

    /// A writer that claims an extension but never materializes the file.
    struct PhantomWriter;
    impl ApprovalWriter for PhantomWriter {
        fn file_extension_with_dot(&self) -> &str {
            ".txt"
        }
        fn write(&self, _path: &Path) -> ApprovalResult<()> {
            Ok(())
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let namer = TestNamer::new(dir.path(), "phantom");
    write_approved(&namer, ".txt", "baseline\n");

    let err = FileApprover::verify(&namer, &PhantomWriter, &Options::default()).unwrap_err();
    match err {
        ApprovalError::Missing { missing, reference } => {
            assert_eq!(missing, namer.received_path(".txt"));
            assert_eq!(reference, namer.approved_path(".txt"));
        }
        other => panic!("expected Missing, got {other:?}"),
    }
}

#[test]
fn identical_contents_pass_delete_received_and_notify_once() {
    let _guard = global_state_lock();

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_clone = Arc::clone(&fired);
    set_test_passed_notification(move || {
        fired_clone.fetch_add(1, Ordering::SeqCst);
    });

    let dir = tempfile::tempdir().unwrap();
    let namer = TestNamer::new(dir.path(), "stable_output");
    write_approved(&namer, ".txt", "line one\nline two\n");

    greenlight::verify("line one\nline two\n", &namer, &Options::default()).unwrap();

    assert!(!namer.received_path(".txt").exists());
    assert!(namer.approved_path(".txt").exists());
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    set_test_passed_notification(|| {});
}

#[test]
fn mismatch_reports_front_loaded_then_fallback_and_keeps_received() {
    let _guard = global_state_lock();
    let log = new_log();
    let _front = set_front_loaded_reporter(RecordingReporter::new("front", false, &log));
    let options = Options::new().with_reporter(RecordingReporter::new("fallback", true, &log));

    let dir = tempfile::tempdir().unwrap();
    let namer = TestNamer::new(dir.path(), "drifted_output");
    write_approved(&namer, ".txt", "old\n");

    let err = greenlight::verify("new\n", &namer, &options).unwrap_err();
    match err {
        ApprovalError::Mismatch { received, approved } => {
            assert_eq!(received, namer.received_path(".txt"));
            assert_eq!(approved, namer.approved_path(".txt"));
        }
        other => panic!("expected Mismatch, got {other:?}"),
    }

    // Front-loaded declined, so the configured fallback ran after it.
    assert_eq!(log_entries(&log), ["front", "fallback"]);
    // The received file survives for manual inspection.
    assert_eq!(
        std::fs::read_to_string(namer.received_path(".txt")).unwrap(),
        "new\n"
    );
}

#[test]
fn successful_front_loaded_reporter_suppresses_the_fallback() {
    let _guard = global_state_lock();
    let log = new_log();
    let _front = set_front_loaded_reporter(RecordingReporter::new("front", true, &log));
    let options = Options::new().with_reporter(RecordingReporter::new("fallback", true, &log));

    let dir = tempfile::tempdir().unwrap();
    let namer = TestNamer::new(dir.path(), "front_takes_it");
    write_approved(&namer, ".txt", "old\n");

    greenlight::verify("new\n", &namer, &options).unwrap_err();
    assert_eq!(log_entries(&log), ["front"]);
}

/// Comparator that calls every pair of existing files equivalent.
struct AlwaysEquivalent;
impl ApprovalComparator for AlwaysEquivalent {
    fn contents_equivalent(&self, _received: &Path, _approved: &Path) -> ApprovalResult<bool> {
        Ok(true)
    }
}

#[test]
fn comparator_registration_is_scoped_by_its_disposer() {
    let _guard = global_state_lock();
    let probe = Path::new("anything.scoped-ext");

    let before = comparator_for(probe);
    let outer: Arc<dyn ApprovalComparator> = Arc::new(AlwaysEquivalent);
    let inner: Arc<dyn ApprovalComparator> = Arc::new(AlwaysEquivalent);

    {
        let _outer_registration = register_comparator(".scoped-ext", Arc::clone(&outer));
        assert!(Arc::ptr_eq(&comparator_for(probe), &outer));

        {
            let _inner_registration = register_comparator(".scoped-ext", Arc::clone(&inner));
            assert!(Arc::ptr_eq(&comparator_for(probe), &inner));
        }

        // Inner disposer restored the outer registration, not the default.
        assert!(Arc::ptr_eq(&comparator_for(probe), &outer));
    }

    // Fully unwound: back to whatever was active before the overrides.
    assert!(Arc::ptr_eq(&comparator_for(probe), &before));
}

#[test]
fn registered_comparator_decides_equivalence_for_its_extension() {
    let _guard = global_state_lock();
    let _registration = register_comparator(".lax", Arc::new(AlwaysEquivalent));

    let dir = tempfile::tempdir().unwrap();
    let namer = TestNamer::new(dir.path(), "lax_compare");
    write_approved(&namer, ".lax", "completely different\n");

    let writer = StringWriter::with_extension("anything at all\n", ".lax");
    FileApprover::verify(&namer, &writer, &Options::default()).unwrap();
    assert!(!namer.received_path(".lax").exists());
}

#[test]
fn explicit_comparator_override_bypasses_the_registry() {
    // Passing verifications fire the process-wide notification.
    let _guard = global_state_lock();
    let dir = tempfile::tempdir().unwrap();
    let namer = TestNamer::new(dir.path(), "explicit_override");
    write_approved(&namer, ".txt", "old\n");

    let writer = StringWriter::new("new\n");
    FileApprover::verify_with_comparator(&namer, &writer, &Options::default(), &AlwaysEquivalent)
        .unwrap();
}

#[test]
fn scrubber_normalizes_the_artifact_before_write_and_compare() {
    let _guard = global_state_lock();
    let log = new_log();
    let _front = set_front_loaded_reporter(RecordingReporter::new("front", true, &log));

    let options =
        Options::new().with_scrubber(greenlight::scrubbers::regex_scrubber(r"\d+ ms", "[elapsed]"));

    let dir = tempfile::tempdir().unwrap();
    let namer = TestNamer::new(dir.path(), "scrubbed_timings");
    write_approved(&namer, ".txt", "finished in [elapsed]\n");

    // Different raw timings, identical after scrubbing.
    greenlight::verify("finished in 123 ms\n", &namer, &options).unwrap();

    // On a first run the received file holds the scrubbed form, so approving
    // it produces a stable baseline.
    let fresh = TestNamer::new(dir.path(), "scrubbed_first_run");
    greenlight::verify("finished in 99 ms\n", &fresh, &options).unwrap_err();
    assert_eq!(
        std::fs::read_to_string(fresh.received_path(".txt")).unwrap(),
        "finished in [elapsed]\n"
    );
}

#[test]
fn json_artifacts_compare_structurally_when_registered() {
    let _guard = global_state_lock();
    let _registration = register_comparator(".json", Arc::new(JsonComparator));

    let dir = tempfile::tempdir().unwrap();
    let namer = TestNamer::new(dir.path(), "config_snapshot");
    write_approved(&namer, ".json", "{\n  \"b\": 2,\n  \"a\": 1\n}\n");

    greenlight::verify_with_extension(
        r#"{"a": 1, "b": 2}"#,
        ".json",
        &namer,
        &Options::default(),
    )
    .unwrap();
}

#[test]
fn io_failure_on_write_is_not_an_approval_failure() {
    let dir = tempfile::tempdir().unwrap();
    // A received path that collides with an existing directory cannot be
    // written as a file.
    let blocked = dir.path().join("occupied");
    std::fs::create_dir_all(blocked.join("occupied.received.txt")).unwrap();
    let namer = TestNamer::new(blocked.clone(), "occupied");

    let err = greenlight::verify("data", &namer, &Options::default()).unwrap_err();
    match err {
        ApprovalError::Io { path, .. } => assert_eq!(path, namer.received_path(".txt")),
        other => panic!("expected Io, got {other:?}"),
    }
}
