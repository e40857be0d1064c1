//! # Binary LDPC Codes
//!
//! This crate implements the core of a binary Low-Density Parity-Check
//! error-correcting toolkit: sparse Tanner-graph codes held as flat edge
//! lists, random construction from degree sequences, systematic encoder
//! generation by GF(2) elimination, iterative soft-decision decoding, and
//! `alist`-format persistence.
//!
//! ## Overview
//!
//! An `[n, k]` code is defined by a sparse `r x n` parity-check matrix **H**
//! (`r = n - k`); codewords are exactly the vectors with `H . c = 0` over
//! GF(2). The pieces fit together as:
//!
//! ```text
//! random() / read_alist()  ->  edge list (Tanner graph)
//! create_encoder()         ->  parity generator + systematic column order
//! encode(info)             ->  n-bit codeword
//! decode(channel LLRs)     ->  posterior LLRs + parity-satisfaction flag
//! ```
//!
//! The decoder runs belief propagation over the graph's edge list, either
//! exact sum-product or offset min-sum, with early termination as soon as
//! the running check-node state says the hard decisions form a codeword.
//!
//! ## Example
//!
//! ```
//! use ldpc_core::{DecoderConfig, LdpcCode};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // A small rate-1/2 code with column degree 3 and row degree 6.
//! let mut code = LdpcCode::new();
//! let mut rng = StdRng::seed_from_u64(1);
//! code.random_with_rng(10, 20, &vec![6; 10], &vec![3; 20], &mut rng)
//!     .unwrap();
//! code.create_encoder().unwrap();
//!
//! let info = vec![1, 0, 1, 1, 0, 0, 1, 0, 1, 0];
//! let cw = code.encode(&info).unwrap();
//! assert!(code.syndrome_ok(&cw));
//!
//! // Noiseless BPSK observation of the codeword.
//! let llr: Vec<f64> = cw.iter().map(|&b| if b == 1 { -2.0 } else { 2.0 }).collect();
//! let out = code.decode(&llr, 20, &DecoderConfig::min_sum()).unwrap();
//! assert!(out.satisfied);
//! assert_eq!(out.info_estimate(10), info);
//! ```

pub mod alist;
pub mod code;
pub mod decoder;
pub mod encoder;
pub mod random;
pub mod types;

pub use code::LdpcCode;
pub use decoder::{DecodeAlgorithm, DecodeOutcome, Decoder, DecoderConfig};
pub use types::{Bit, LdpcError, LdpcResult, Llr};
