//! Reporters present an approval failure to a human.
//!
//! A reporter receives the received/approved paths and returns whether it
//! managed to present them (launched a diff tool, printed a usable diff) —
//! never whether the contents matched; that decision is already made by the
//! time a reporter runs. Reporting is strictly best-effort: a missing tool
//! or a failed process launch is swallowed here and the approval failure
//! still propagates to the caller.
//!
//! Dispatch order on a failure: the process-wide *front-loaded* reporter is
//! tried first; if it declines, the reporter configured on the verification
//! call's [`crate::options::Options`] runs.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, RwLock};

use difference::Changeset;
use once_cell::sync::Lazy;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::fs_util;

/// Presents an approval failure to a human.
pub trait Reporter: Send + Sync {
    /// Returns `true` if the failure was successfully presented (the
    /// reporter took ownership of notifying a human).
    fn report(&self, received: &Path, approved: &Path) -> bool;
}

// ============================================================================
// CONSOLE REPORTER
// ============================================================================

/// The default reporter: prints both paths and a colored line diff to
/// stderr. Always succeeds — printing is presentation enough.
pub struct ConsoleReporter;

impl ConsoleReporter {
    fn color_choice() -> ColorChoice {
        if atty::is(atty::Stream::Stderr) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, received: &Path, approved: &Path) -> bool {
        let mut stderr = StandardStream::stderr(Self::color_choice());
        let _ = writeln!(stderr, "Approval failure:");
        let _ = writeln!(stderr, "  received: {}", received.display());
        let _ = writeln!(stderr, "  approved: {}", approved.display());

        // Only text artifacts get a diff; anything unreadable still got its
        // paths printed above.
        if let (Ok(approved_text), Ok(received_text)) =
            (fs_util::read_text(approved), fs_util::read_text(received))
        {
            let changeset = Changeset::new(&approved_text, &received_text, "\n");
            print_changeset(&mut stderr, &changeset);
        }
        true
    }
}

fn print_changeset(stderr: &mut StandardStream, changeset: &Changeset) {
    for diff in &changeset.diffs {
        match diff {
            difference::Difference::Same(ref x) => {
                let _ = stderr.reset();
                let _ = writeln!(stderr, " {}", x);
            }
            difference::Difference::Add(ref x) => {
                let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = writeln!(stderr, "+{}", x);
            }
            difference::Difference::Rem(ref x) => {
                let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = writeln!(stderr, "-{}", x);
            }
        }
    }
    let _ = stderr.reset();
}

// ============================================================================
// EXTERNAL DIFF TOOLS
// ============================================================================

/// Launches an external diff tool on the two files, blocking until the tool
/// exits. Reports success only when the executable was found and launched;
/// every launch failure is swallowed and reported as a decline.
pub struct DiffToolReporter {
    program: String,
    leading_args: Vec<String>,
}

impl DiffToolReporter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// Arguments inserted before the received/approved paths, for tools that
    /// need a mode flag (e.g. `code --diff --wait`).
    pub fn with_args(program: impl Into<String>, leading_args: &[&str]) -> Self {
        Self {
            program: program.into(),
            leading_args: leading_args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn is_installed(&self) -> bool {
        find_executable(&self.program).is_some()
    }
}

impl Reporter for DiffToolReporter {
    fn report(&self, received: &Path, approved: &Path) -> bool {
        let Some(executable) = find_executable(&self.program) else {
            return false;
        };
        Command::new(executable)
            .args(&self.leading_args)
            .arg(received)
            .arg(approved)
            .status()
            .is_ok()
    }
}

/// Locate `name` on `PATH`. Names containing a path separator are checked
/// directly instead.
fn find_executable(name: &str) -> Option<PathBuf> {
    let as_path = Path::new(name);
    if as_path.components().count() > 1 {
        return as_path.is_file().then(|| as_path.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Tries a list of reporters in order; the first that reports success wins.
pub struct FirstWorkingReporter {
    reporters: Vec<Arc<dyn Reporter>>,
}

impl FirstWorkingReporter {
    pub fn new(reporters: Vec<Arc<dyn Reporter>>) -> Self {
        Self { reporters }
    }
}

impl Reporter for FirstWorkingReporter {
    fn report(&self, received: &Path, approved: &Path) -> bool {
        self.reporters.iter().any(|r| r.report(received, approved))
    }
}

// ============================================================================
// FRONT-LOADED REPORTER
// ============================================================================

// Candidate table, not algorithm: first installed tool wins. Replace the
// whole slot via set_front_loaded_reporter to change the policy.
fn detected_diff_tools() -> Vec<Arc<dyn Reporter>> {
    vec![
        Arc::new(DiffToolReporter::with_args("code", &["--diff", "--wait"])),
        Arc::new(DiffToolReporter::new("meld")),
        Arc::new(DiffToolReporter::new("kdiff3")),
        Arc::new(DiffToolReporter::new("opendiff")),
    ]
}

static FRONT_LOADED: Lazy<RwLock<Arc<dyn Reporter>>> =
    Lazy::new(|| RwLock::new(Arc::new(FirstWorkingReporter::new(detected_diff_tools()))));

/// The reporter tried before the one configured on `Options`.
pub fn front_loaded_reporter() -> Arc<dyn Reporter> {
    Arc::clone(&FRONT_LOADED.read().unwrap_or_else(|e| e.into_inner()))
}

/// Replace the front-loaded reporter, returning a disposer that restores the
/// previous one when dropped.
#[must_use = "dropping the disposer immediately restores the previous reporter"]
pub fn set_front_loaded_reporter(reporter: Arc<dyn Reporter>) -> FrontLoadedReporterDisposer {
    let mut slot = FRONT_LOADED.write().unwrap_or_else(|e| e.into_inner());
    let previous = std::mem::replace(&mut *slot, reporter);
    FrontLoadedReporterDisposer { previous: Some(previous) }
}

/// Scoped handle restoring the prior front-loaded reporter on drop.
pub struct FrontLoadedReporterDisposer {
    previous: Option<Arc<dyn Reporter>>,
}

impl Drop for FrontLoadedReporterDisposer {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let mut slot = FRONT_LOADED.write().unwrap_or_else(|e| e.into_inner());
            *slot = previous;
        }
    }
}

/// Reporting dispatch for a failed verification: front-loaded reporter
/// first, then the caller's fallback if it declined. Never fails — the
/// approval error itself is propagated by the verifier regardless of what
/// happens here.
pub fn report_approval_failure(received: &Path, approved: &Path, fallback: &dyn Reporter) {
    if !front_loaded_reporter().report(received, approved) {
        fallback.report(received, approved);
    }
}
