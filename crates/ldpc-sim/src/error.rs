//! Error type for the simulation harness.

use ldpc_core::LdpcError;

/// Result type for harness operations.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised while setting up or driving a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// An underlying code operation failed.
    #[error(transparent)]
    Code(#[from] LdpcError),

    /// No degree defaults exist for the requested block lengths.
    #[error("no supported code family for k = {k}, n = {n}")]
    UnsupportedRate { k: usize, n: usize },

    /// A test index outside the contest table.
    #[error("test index {index} out of range (the table has {count} entries)")]
    UnknownTest { index: usize, count: usize },
}
