//! Recoverable errors.
//!
//! Programmer-contract violations (invariant breaches, a missing edge
//! endpoint, a bad orientation code, a coverage/reads-size mismatch) are not
//! represented here: they are fatal, non-recoverable faults and are raised
//! as panics at the point of violation. Only I/O failures on the emitters
//! are recoverable.

use thiserror::Error;

/// An error produced while writing one of the two emitted artifacts.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to write {what} to {path}: {source}")]
    Io {
        what: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}
