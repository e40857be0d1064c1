//! BPSK transmission over a simulated AWGN channel.
//!
//! Codeword bits are mapped `0 -> +1, 1 -> -1` and observed through additive
//! white Gaussian noise at a given symbol SNR (Es/N0, linear). The channel
//! emits per-bit LLRs directly, in either of two equivalent scalings:
//!
//! - [`llrs`](AwgnBpskChannel::llrs): the matched-filter LLR
//!   `4 * Es/N0 * y`, drawn as the transmitted sign times
//!   `Normal(4 * Es/N0, sqrt(8 * Es/N0))`. This is the quantity a decoder
//!   wants to consume.
//! - [`unit_llrs`](AwgnBpskChannel::unit_llrs): the raw observation
//!   `+-1 + Normal(0, sqrt(1 / (2 * Es/N0)))`, useful when the caller
//!   applies its own LLR scaling.
//!
//! ## Example
//!
//! ```
//! use ldpc_sim::channel::AwgnBpskChannel;
//!
//! let mut channel = AwgnBpskChannel::with_seed(5.0, 42);
//! let llr = channel.llrs(&[0, 1, 0, 0]);
//! assert_eq!(llr.len(), 4);
//! ```

use ldpc_core::{Bit, Llr};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// AWGN channel with BPSK mapping, parameterized by linear Es/N0.
#[derive(Debug)]
pub struct AwgnBpskChannel {
    esno: f64,
    rng: StdRng,
}

impl AwgnBpskChannel {
    /// Create a channel at the given Es/N0 (linear, not dB), seeded from
    /// system entropy.
    pub fn new(esno: f64) -> Self {
        Self {
            esno,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible channel for tests and regression runs.
    pub fn with_seed(esno: f64, seed: u64) -> Self {
        Self {
            esno,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The configured Es/N0 (linear).
    pub fn esno(&self) -> f64 {
        self.esno
    }

    /// Transmit a codeword and return matched-filter LLRs, distributed as
    /// the transmitted sign times `Normal(4 * Es/N0, sqrt(8 * Es/N0))`.
    pub fn llrs(&mut self, cw: &[Bit]) -> Vec<Llr> {
        let dist = Normal::new(4.0 * self.esno, (8.0 * self.esno).sqrt()).unwrap();
        cw.iter()
            .map(|&b| bpsk(b) * dist.sample(&mut self.rng))
            .collect()
    }

    /// Transmit a codeword and return the unscaled observation
    /// `+-1 + Normal(0, sqrt(1 / (2 * Es/N0)))`.
    pub fn unit_llrs(&mut self, cw: &[Bit]) -> Vec<Llr> {
        let dist = Normal::new(0.0, (1.0 / (2.0 * self.esno)).sqrt()).unwrap();
        cw.iter()
            .map(|&b| bpsk(b) + dist.sample(&mut self.rng))
            .collect()
    }
}

/// BPSK mapping: bit 0 -> +1, bit 1 -> -1.
#[inline]
fn bpsk(bit: Bit) -> f64 {
    if bit == 0 {
        1.0
    } else {
        -1.0
    }
}
