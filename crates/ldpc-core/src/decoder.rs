//! Iterative message-passing decoder for codes on Tanner graphs.
//!
//! Belief propagation in the LLR domain, with two check-node update rules:
//!
//! - **Sum-Product**: exact `tanh`/`atanh` updates. Input magnitudes are
//!   clamped into `[min_llr, max_llr]` each iteration, which keeps the
//!   per-edge division away from `atanh(+-1)`.
//! - **Min-Sum with offset**: tracks the smallest and second-smallest
//!   incoming magnitude per check in a single pass, together with the parity
//!   of the incoming signs, then subtracts a fixed offset from the selected
//!   magnitude to compensate for min-sum's overestimate.
//!
//! All messages are indexed by edge, in edge-list order: the check-node and
//! variable-node updates are straight linear passes over the edge list, and
//! the extrinsic ("exclude this edge") sum is formed by accumulating the
//! full per-variable total and subtracting each edge's own contribution.
//!
//! Every iteration evaluates a parity-satisfaction test from the check-node
//! state; the decoder exits early once the test passes and a posterior
//! exists, and always reports the test result of the last executed
//! iteration. The decoder itself never fails on channel data — it only
//! reports whether the hard decisions settled on a codeword.
//!
//! ## Example
//!
//! ```
//! use ldpc_core::{DecoderConfig, LdpcCode};
//!
//! let mut code = LdpcCode::from_edges(2, 4, &[(0, 0), (0, 1), (0, 3), (1, 1), (1, 2), (1, 3)]);
//! code.create_encoder().unwrap();
//! let cw = code.encode(&[1, 1]).unwrap();
//!
//! // Clean channel: strong LLRs of the right sign.
//! let llr: Vec<f64> = cw.iter().map(|&b| if b == 1 { -4.0 } else { 4.0 }).collect();
//! let out = code.decode(&llr, 20, &DecoderConfig::default()).unwrap();
//! assert!(out.satisfied);
//! assert_eq!(out.hard_decision(), cw);
//! ```

use serde::{Deserialize, Serialize};

use crate::code::LdpcCode;
use crate::types::{Bit, LdpcError, LdpcResult, Llr};

/// Check-node update rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DecodeAlgorithm {
    /// Exact sum-product (tanh-domain belief propagation).
    SumProduct,
    /// Offset min-sum: signed minimum of the other magnitudes, less a fixed
    /// offset. The offset is subtracted after selection and is deliberately
    /// not clamped at zero, matching the reference behavior for magnitudes
    /// below the offset.
    MinSum {
        /// Correction subtracted from the selected magnitude.
        offset: f64,
    },
}

impl DecodeAlgorithm {
    /// Min-sum with the usual 0.3 offset.
    pub fn min_sum() -> Self {
        DecodeAlgorithm::MinSum { offset: 0.3 }
    }
}

impl Default for DecodeAlgorithm {
    fn default() -> Self {
        DecodeAlgorithm::SumProduct
    }
}

/// Scalar knobs of the iterative decoder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Check-node update rule.
    pub algorithm: DecodeAlgorithm,
    /// Lower magnitude clamp for sum-product bit messages. Lifts zeros off
    /// the origin so the tanh-product division stays finite.
    pub min_llr: f64,
    /// Upper magnitude clamp; also the min-sum second-minimum sentinel.
    pub max_llr: f64,
    /// Scale applied between the posterior accumulator and the outgoing bit
    /// messages. 1.0 leaves messages untouched.
    pub bit_node_scale: f64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            algorithm: DecodeAlgorithm::SumProduct,
            min_llr: 0.001,
            max_llr: 15.0,
            bit_node_scale: 1.0,
        }
    }
}

impl DecoderConfig {
    /// Offset min-sum configuration with default clamps.
    pub fn min_sum() -> Self {
        Self {
            algorithm: DecodeAlgorithm::min_sum(),
            ..Self::default()
        }
    }
}

/// Outcome of a decode call.
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    /// Posterior LLR per variable node. Positive favors bit 0.
    pub posterior: Vec<Llr>,
    /// Whether the parity-satisfaction test passed on the final executed
    /// iteration.
    pub satisfied: bool,
    /// Number of iterations executed (early termination included).
    pub iterations: usize,
}

impl DecodeOutcome {
    /// Hard decisions from the posterior: `llr <= 0` maps to bit 1.
    pub fn hard_decision(&self) -> Vec<Bit> {
        self.posterior
            .iter()
            .map(|&l| if l <= 0.0 { 1 } else { 0 })
            .collect()
    }

    /// First `k` hard decisions — the information estimate of a systematic
    /// code.
    pub fn info_estimate(&self, k: usize) -> Vec<Bit> {
        let mut bits = self.hard_decision();
        bits.truncate(k);
        bits
    }
}

/// Reusable decoder scratch state.
///
/// All buffers are sized from the code on the first call and reused
/// afterwards; nothing allocates inside the iteration loop. A `Decoder` may
/// be shared across any number of decode calls but not across threads —
/// run parallel decodes with one `Decoder` each.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
    /// Variable-to-check messages, indexed by edge.
    bit_message: Vec<Llr>,
    /// Check-to-variable messages, indexed by edge.
    check_message: Vec<Llr>,
    /// Posterior accumulator per variable node.
    bit_accum: Vec<Llr>,
    /// Sum-product: running tanh product per check.
    /// Min-sum: smallest incoming magnitude per check.
    check_accum: Vec<Llr>,
    /// Min-sum only: second-smallest incoming magnitude per check.
    check_accum2: Vec<Llr>,
    /// Min-sum only: XOR of incoming sign bits per check.
    check_sign: Vec<u8>,
}

impl Decoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Replace the configuration (buffers are kept).
    pub fn set_config(&mut self, config: DecoderConfig) {
        self.config = config;
    }

    /// Run up to `n_iter` iterations of message passing on `code` for the
    /// channel observations `llr_in`.
    ///
    /// With `n_iter = 0` no message passing happens: the posterior is the
    /// sign-preserving clamp of the input and the result is unsatisfied.
    pub fn decode(
        &mut self,
        code: &LdpcCode,
        llr_in: &[Llr],
        n_iter: usize,
    ) -> LdpcResult<DecodeOutcome> {
        let n = code.n_cols;
        let r = code.n_rows;
        let m = code.n_edges();
        if llr_in.len() != n {
            return Err(LdpcError::DimensionMismatch {
                what: "llr_in",
                expected: n,
                actual: llr_in.len(),
            });
        }

        let cfg = self.config;
        if n_iter == 0 {
            let posterior = llr_in
                .iter()
                .map(|&x| clamp_llr(x, cfg.min_llr, cfg.max_llr))
                .collect();
            return Ok(DecodeOutcome {
                posterior,
                satisfied: false,
                iterations: 0,
            });
        }

        self.bit_message.resize(m, 0.0);
        self.check_message.resize(m, 0.0);
        self.bit_accum.resize(n, 0.0);
        self.check_accum.resize(r, 0.0);
        if matches!(cfg.algorithm, DecodeAlgorithm::MinSum { .. }) {
            self.check_accum2.resize(r, 0.0);
            self.check_sign.resize(r, 0);
        }

        for e in 0..m {
            self.bit_message[e] = llr_in[code.col[e]];
        }

        let mut satisfied = false;
        let mut executed = 0;
        for iter in 0..n_iter {
            satisfied = match cfg.algorithm {
                DecodeAlgorithm::SumProduct => self.check_update_sum_product(code, &cfg),
                DecodeAlgorithm::MinSum { offset } => {
                    self.check_update_min_sum(code, &cfg, offset)
                }
            };
            executed = iter + 1;

            // Early exit needs a posterior, which only exists once a
            // variable-node update has run; the first iteration always
            // falls through to it.
            if iter >= 1 && satisfied {
                break;
            }

            // Variable-node update: accumulate the full posterior, then peel
            // each edge's own contribution back off to form the extrinsic
            // message for the next iteration.
            let scale = cfg.bit_node_scale;
            for v in 0..n {
                self.bit_accum[v] = llr_in[v] / scale;
            }
            for e in 0..m {
                self.bit_accum[code.col[e]] += self.check_message[e];
            }
            for e in 0..m {
                self.bit_message[e] = scale * (self.bit_accum[code.col[e]] - self.check_message[e]);
            }
        }

        tracing::debug!(
            iterations = executed,
            satisfied,
            "decode finished"
        );
        Ok(DecodeOutcome {
            posterior: self.bit_accum.clone(),
            satisfied,
            iterations: executed,
        })
    }

    /// Sum-product check-node update. Returns whether every check's tanh
    /// product came out positive (the parity-satisfaction test).
    fn check_update_sum_product(&mut self, code: &LdpcCode, cfg: &DecoderConfig) -> bool {
        let m = code.n_edges();

        for msg in &mut self.bit_message[..m] {
            *msg = clamp_llr(*msg, cfg.min_llr, cfg.max_llr);
        }

        self.check_accum.fill(1.0);
        for e in 0..m {
            self.check_accum[code.row[e]] *= (self.bit_message[e] * 0.5).tanh();
        }
        for e in 0..m {
            let own = (self.bit_message[e] * 0.5).tanh();
            self.check_message[e] = 2.0 * (self.check_accum[code.row[e]] / own).atanh();
        }

        self.check_accum.iter().all(|&p| p > 0.0)
    }

    /// Offset min-sum check-node update with running two-smallest
    /// accumulation. Returns whether every check's sign parity is even.
    fn check_update_min_sum(&mut self, code: &LdpcCode, cfg: &DecoderConfig, offset: f64) -> bool {
        let m = code.n_edges();

        self.check_accum.fill(cfg.max_llr);
        self.check_accum2.fill(cfg.max_llr);
        self.check_sign.fill(0);
        for e in 0..m {
            let i = code.row[e];
            let msg = self.bit_message[e];
            if msg < 0.0 {
                self.check_sign[i] ^= 1;
            }
            let mag = msg.abs();
            if mag < self.check_accum[i] {
                self.check_accum2[i] = self.check_accum[i];
                self.check_accum[i] = mag;
            } else if mag < self.check_accum2[i] {
                self.check_accum2[i] = mag;
            }
        }
        for e in 0..m {
            let i = code.row[e];
            let msg = self.bit_message[e];
            // The minimum over the *other* edges: this edge's own magnitude
            // only masks the smallest slot when it equals it.
            let selected = if msg.abs() == self.check_accum[i] {
                self.check_accum2[i]
            } else {
                self.check_accum[i]
            };
            let magnitude = selected - offset;
            let flip = self.check_sign[i] ^ u8::from(msg < 0.0);
            self.check_message[e] = if flip == 1 { -magnitude } else { magnitude };
        }

        self.check_sign.iter().all(|&s| s == 0)
    }
}

impl LdpcCode {
    /// One-shot decode with a transient [`Decoder`].
    ///
    /// Callers decoding many frames should hold a `Decoder` and reuse its
    /// buffers instead.
    pub fn decode(
        &self,
        llr_in: &[Llr],
        n_iter: usize,
        config: &DecoderConfig,
    ) -> LdpcResult<DecodeOutcome> {
        Decoder::new(*config).decode(self, llr_in, n_iter)
    }
}

/// Clamp a bit message's magnitude into `[min_llr, max_llr]`, preserving the
/// sign and treating an exact zero as positive.
#[inline]
fn clamp_llr(x: Llr, min_llr: f64, max_llr: f64) -> Llr {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    sign * x.abs().clamp(min_llr, max_llr)
}
