//! Error types for metalinv-inventory

use thiserror::Error;

use metalinv_client::ClientError;

/// Errors that can occur while assembling the inventory document.
///
/// The variants carry the fatal/recoverable split: a failed machine fetch
/// aborts the run, a failed group fetch only costs the custom groups.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The machine list could not be fetched. Without it there is no
    /// inventory to emit.
    #[error("failed to fetch machines: {0}")]
    Machines(#[source] ClientError),

    /// A custom group or its membership could not be fetched. The builder
    /// logs a warning and emits the document without custom groups.
    #[error("failed to fetch custom groups: {0}")]
    Groups(#[source] ClientError),
}
