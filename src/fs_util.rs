//! Small filesystem helpers shared by writers, comparators, and the
//! verifier. All errors are mapped into [`ApprovalError::Io`] with the
//! offending path attached.

use std::fs;
use std::path::Path;

use crate::errors::{ApprovalError, ApprovalResult};

/// Whether `path` exists and is a regular file.
pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Read a file's full contents as bytes.
pub fn read_bytes(path: &Path) -> ApprovalResult<Vec<u8>> {
    fs::read(path).map_err(|source| ApprovalError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a file's full contents as UTF-8 text.
pub fn read_text(path: &Path) -> ApprovalResult<String> {
    fs::read_to_string(path).map_err(|source| ApprovalError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_text(path: &Path, contents: &str) -> ApprovalResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ApprovalError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(path, contents).map_err(|source| ApprovalError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Delete `path`, ignoring any failure. Used to clean up received files
/// after a pass; a file that cannot be deleted must not mask the pass.
pub fn remove_file_best_effort(path: &Path) {
    let _ = fs::remove_file(path);
}
