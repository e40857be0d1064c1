//! # LDPC Simulation Harness
//!
//! Monte-Carlo benchmarking for [`ldpc_core`]: a BPSK/AWGN channel that
//! emits per-bit LLRs, an `[n, k]`-keyed encoder/decoder adapter with
//! fixed-point LLR quantization, per-block statistics, and a runner that
//! sweeps the standard benchmark table.
//!
//! ## Signal flow
//!
//! ```text
//! info bits -> encode -> BPSK + AWGN -> LLR quantize -> decode -> stats
//! ```
//!
//! ## Example
//!
//! ```
//! use ldpc_sim::adapter::AdapterConfig;
//! use ldpc_sim::runner::{run_test, RunConfig, TestPoint};
//!
//! let point = TestPoint { k: 32, n: 64, esno: 5.0, n_blocks: 10 };
//! let config = RunConfig {
//!     seed: Some(1),
//!     adapter: AdapterConfig { code_dir: None, ..AdapterConfig::default() },
//!     ..RunConfig::default()
//! };
//! let stats = run_test(point, &config).unwrap();
//! assert_eq!(stats.n_samples(), 10);
//! ```

pub mod adapter;
pub mod channel;
pub mod error;
pub mod runner;
pub mod stats;

pub use adapter::{AdapterConfig, CodeAdapter, DecodeVerdict};
pub use channel::AwgnBpskChannel;
pub use error::{SimError, SimResult};
pub use runner::{run_test, RunConfig, TestPoint, CONTEST_TABLE};
pub use stats::{BlockSample, DecoderStats, RunTotals};
