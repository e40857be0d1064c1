//! Core types for LDPC encoding and decoding.
//!
//! This module defines the bit and log-likelihood-ratio (LLR) representations
//! used throughout the crate, together with the crate-wide error type.
//!
//! ## LLR sign convention
//!
//! An LLR is `log P(bit = 0 | y) - log P(bit = 1 | y)`: a positive value
//! favors bit 0, a negative value favors bit 1, and the magnitude encodes
//! confidence. Hard decisions map `llr <= 0` to bit 1.

use std::path::PathBuf;

/// A single codeword or information bit (0 or 1).
pub type Bit = u8;

/// A soft log-likelihood ratio. Positive favors bit 0.
pub type Llr = f64;

/// Result type for LDPC operations.
pub type LdpcResult<T> = Result<T, LdpcError>;

/// Errors that can occur while constructing, persisting, or using a code.
#[derive(Debug, thiserror::Error)]
pub enum LdpcError {
    /// A file could not be opened, read, or written.
    #[error("cannot access {path}: {source}")]
    Io {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The alist data is malformed beyond the lenient skip-and-continue path.
    #[error("malformed alist data at line {line}: {reason}")]
    AlistFormat {
        /// 1-based line number in the input.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// Row and column degree sequences do not describe the same edge count.
    #[error("degree sums differ: rows sum to {row_sum}, columns sum to {col_sum}")]
    DegreeSumMismatch { row_sum: usize, col_sum: usize },

    /// No simple stub pairing was found within the retry budget. The last
    /// (non-simple) attempt is retained on the code object so the caller can
    /// inspect it or retry with different degrees.
    #[error("no simple graph found after {attempts} pairing attempts")]
    ConstructionExhausted { attempts: usize },

    /// `encode` was called before `create_encoder` produced a generator.
    #[error("encode called before create_encoder built a parity generator")]
    EncoderNotBuilt,

    /// An input buffer length does not match the code dimensions.
    #[error("{what}: expected length {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}
