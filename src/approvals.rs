//! Top-level verification conveniences for string artifacts.

use crate::approver::FileApprover;
use crate::errors::ApprovalResult;
use crate::namers::ApprovalNamer;
use crate::options::Options;
use crate::writers::StringWriter;

/// Verify `data` as a `.txt` artifact: scrub, write received, compare
/// against the approved baseline, report on failure.
pub fn verify(data: &str, namer: &dyn ApprovalNamer, options: &Options) -> ApprovalResult<()> {
    verify_with_extension(data, ".txt", namer, options)
}

/// Verify `data` under a caller-chosen extension, which also selects the
/// comparator (e.g. `".json"` with a registered structural comparator).
pub fn verify_with_extension(
    data: &str,
    extension_with_dot: &str,
    namer: &dyn ApprovalNamer,
    options: &Options,
) -> ApprovalResult<()> {
    let scrubbed = options.scrub(data);
    let writer = StringWriter::with_extension(scrubbed, extension_with_dot);
    FileApprover::verify(namer, &writer, options)
}
