//! Greenlight: approval testing for Rust.
//!
//! A test produces an artifact, greenlight writes it to a `*.received.*`
//! file and compares it against the accepted `*.approved.*` baseline via an
//! extension-keyed comparator. On a mismatch the failure is handed to a
//! reporter (an installed diff tool, or a colored console diff) and then
//! surfaced to the test framework; on a pass the received file is removed.
//!
//! The cartesian module is an independent utility for generating exhaustive
//! artifacts over combinatorial inputs; `combinations` wires it into the
//! verification flow.

pub use crate::approvals::{verify, verify_with_extension};
pub use crate::approver::{set_test_passed_notification, FileApprover};
pub use crate::errors::{ApprovalError, ApprovalResult};
pub use crate::options::Options;

pub mod approvals;
pub mod approver;
pub mod cartesian;
pub mod combinations;
pub mod comparators;
pub mod errors;
mod fs_util;
pub mod namers;
pub mod options;
pub mod reporters;
pub mod scrubbers;
pub mod writers;
