//! Encoder/decoder adapter for `[n, k]` block-length driven benchmarking.
//!
//! [`CodeAdapter`] is the thin layer a test harness talks to: it owns one
//! code per `[n, k]` pair, sourcing it from an on-disk alist library when
//! available and falling back to random construction with per-rate degree
//! defaults. It also performs the fixed-point LLR quantization used on the
//! decoder input path, so the harness can exercise the same integer LLR
//! interface a hardware decoder would present.
//!
//! Code files are looked up as `<code_dir>/ldpc_{n}_{k}.alist`. The degree
//! defaults cover the benchmarked rate set:
//!
//! | Rate | (d_v, d_c) |
//! |------|-----------|
//! | 1/4  | (3, 4)    |
//! | 1/2  | (3, 6)    |
//! | 4/5  | (4, 20)   |
//!
//! ## Example
//!
//! ```
//! use ldpc_sim::adapter::{AdapterConfig, CodeAdapter};
//!
//! let mut adapter = CodeAdapter::init_seeded(32, 64, AdapterConfig::default(), 7).unwrap();
//! let info = vec![1; 32];
//! let cw = adapter.encode(&info).unwrap();
//!
//! // Perfect-channel integer LLRs.
//! let llr: Vec<i32> = cw
//!     .iter()
//!     .map(|&b| CodeAdapter::llr2int(if b == 1 { -4.0 } else { 4.0 }))
//!     .collect();
//! let verdict = adapter.decode(&llr).unwrap();
//! assert!(verdict.ok);
//! assert_eq!(verdict.info_est, info);
//! ```

use std::path::PathBuf;

use ldpc_core::{Bit, Decoder, DecoderConfig, LdpcCode, Llr};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Fixed-point LLR scale: one LLR unit is `25 / 32768` of a logit.
pub const LLR_INT_SCALE: f64 = 32768.0 / 25.0;

/// Adapter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Directory searched for `ldpc_{n}_{k}.alist` files. `None` always
    /// constructs random codes.
    pub code_dir: Option<PathBuf>,
    /// Maximum decoder iterations per frame.
    pub n_iter: usize,
    /// Decoder configuration handed to the core.
    pub decoder: DecoderConfig,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            code_dir: Some(PathBuf::from("codes")),
            n_iter: 50,
            decoder: DecoderConfig::default(),
        }
    }
}

/// Result of decoding one frame of integer LLRs.
#[derive(Debug, Clone)]
pub struct DecodeVerdict {
    /// Hard-decision codeword estimate.
    pub cw_est: Vec<Bit>,
    /// First `k` positions of the codeword estimate.
    pub info_est: Vec<Bit>,
    /// Whether the decoder settled on a valid codeword. `false` is a
    /// detected frame error.
    pub ok: bool,
}

/// One encoder/decoder pair bound to a specific `[n, k]` code.
///
/// Each adapter owns its code and decoder scratch; build one per block
/// length rather than sharing a global instance.
#[derive(Debug)]
pub struct CodeAdapter {
    code: LdpcCode,
    decoder: Decoder,
    n_iter: usize,
    k: usize,
    n: usize,
}

impl CodeAdapter {
    /// Set up an encoder/decoder for an `[n, k]` code, loading
    /// `<code_dir>/ldpc_{n}_{k}.alist` when it exists and otherwise drawing
    /// a random code with the rate's degree defaults. Entropy-seeded.
    pub fn init(k: usize, n: usize, config: AdapterConfig) -> SimResult<Self> {
        Self::init_with_rng(k, n, config, &mut StdRng::from_entropy())
    }

    /// [`init`](Self::init) with a fixed construction seed.
    pub fn init_seeded(k: usize, n: usize, config: AdapterConfig, seed: u64) -> SimResult<Self> {
        Self::init_with_rng(k, n, config, &mut StdRng::seed_from_u64(seed))
    }

    fn init_with_rng<R: Rng>(
        k: usize,
        n: usize,
        config: AdapterConfig,
        rng: &mut R,
    ) -> SimResult<Self> {
        if k >= n {
            return Err(SimError::UnsupportedRate { k, n });
        }
        let r = n - k;
        let mut code = LdpcCode::new();

        let library_file = config
            .code_dir
            .as_ref()
            .map(|dir| dir.join(format!("ldpc_{n}_{k}.alist")))
            .filter(|path| path.is_file());

        if let Some(path) = library_file {
            tracing::info!(path = %path.display(), "loading code from library");
            code.read_alist(&path, false)?;
        } else {
            let (dv, dc) = degree_defaults(k, n).ok_or(SimError::UnsupportedRate { k, n })?;
            tracing::info!(k, n, dv, dc, "constructing random code");
            code.random_with_rng(r, n, &vec![dc; r], &vec![dv; n], rng)?;
        }
        code.create_encoder()?;

        Ok(Self {
            code,
            decoder: Decoder::new(config.decoder),
            n_iter: config.n_iter,
            k,
            n,
        })
    }

    /// Quantize a real LLR to the decoder's fixed-point representation.
    pub fn llr2int(llr: Llr) -> i32 {
        (LLR_INT_SCALE * llr).round() as i32
    }

    /// Recover a real LLR from its fixed-point representation.
    pub fn int2llr(q: i32) -> Llr {
        q as f64 / LLR_INT_SCALE
    }

    /// Information length `k`.
    pub fn info_len(&self) -> usize {
        self.k
    }

    /// Codeword length `n`.
    pub fn codeword_len(&self) -> usize {
        self.n
    }

    /// The underlying code.
    pub fn code(&self) -> &LdpcCode {
        &self.code
    }

    /// Encode `k` information bits into an `n`-bit codeword.
    pub fn encode(&self, info: &[Bit]) -> SimResult<Vec<Bit>> {
        Ok(self.code.encode(info)?)
    }

    /// Decode one frame of integer LLRs into codeword and information
    /// estimates.
    pub fn decode(&mut self, llr: &[i32]) -> SimResult<DecodeVerdict> {
        let float_llr: Vec<Llr> = llr.iter().map(|&q| Self::int2llr(q)).collect();
        let out = self.decoder.decode(&self.code, &float_llr, self.n_iter)?;
        let cw_est = out.hard_decision();
        let info_est = cw_est[..self.k].to_vec();
        Ok(DecodeVerdict {
            cw_est,
            info_est,
            ok: out.satisfied,
        })
    }
}

/// Degree defaults `(d_v, d_c)` for the benchmarked rate set.
fn degree_defaults(k: usize, n: usize) -> Option<(usize, usize)> {
    if n == 4 * k {
        Some((3, 4)) // R = 1/4
    } else if n == 2 * k {
        Some((3, 6)) // R = 1/2
    } else if 4 * n == 5 * k {
        Some((4, 20)) // R = 4/5
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_defaults_cover_rate_set() {
        assert_eq!(degree_defaults(64, 256), Some((3, 4)));
        assert_eq!(degree_defaults(128, 256), Some((3, 6)));
        assert_eq!(degree_defaults(64, 80), Some((4, 20)));
        assert_eq!(degree_defaults(100, 300), None);
    }

    #[test]
    fn test_degree_defaults_balance_edge_counts() {
        for (k, n) in [(64, 256), (128, 256), (64, 80)] {
            let (dv, dc) = degree_defaults(k, n).unwrap();
            assert_eq!((n - k) * dc, n * dv, "unbalanced degrees for [{n}, {k}]");
        }
    }

    #[test]
    fn test_unsupported_rate_is_rejected() {
        let config = AdapterConfig {
            code_dir: None,
            ..AdapterConfig::default()
        };
        let err = CodeAdapter::init_seeded(100, 300, config, 1).unwrap_err();
        assert!(matches!(err, SimError::UnsupportedRate { k: 100, n: 300 }));
    }

    #[test]
    fn test_quantization_roundtrip() {
        assert_eq!(CodeAdapter::llr2int(1.0), 1311); // round(32768 / 25)
        assert_eq!(CodeAdapter::llr2int(-1.0), -1311);
        assert_eq!(CodeAdapter::llr2int(0.0), 0);
        for &x in &[0.0, 0.5, -3.25, 12.0] {
            let back = CodeAdapter::int2llr(CodeAdapter::llr2int(x));
            assert!((back - x).abs() < 0.5 / LLR_INT_SCALE + 1e-12);
        }
    }

    #[test]
    fn test_clean_frame_roundtrip_through_quantization() {
        let config = AdapterConfig {
            code_dir: None,
            ..AdapterConfig::default()
        };
        let mut adapter = CodeAdapter::init_seeded(32, 64, config, 2).unwrap();
        let info: Vec<Bit> = (0..32).map(|i| (i % 3 == 0) as Bit).collect();
        let cw = adapter.encode(&info).unwrap();
        assert_eq!(&cw[..32], &info[..]);

        let llr: Vec<i32> = cw
            .iter()
            .map(|&b| CodeAdapter::llr2int(if b == 1 { -4.0 } else { 4.0 }))
            .collect();
        let verdict = adapter.decode(&llr).unwrap();
        assert!(verdict.ok);
        assert_eq!(verdict.cw_est, cw);
        assert_eq!(verdict.info_est, info);
    }

    #[test]
    fn test_library_code_is_loaded_when_present() {
        let dir = std::env::temp_dir().join("ldpc_sim_codes_test");
        std::fs::create_dir_all(&dir).unwrap();

        // Stock the library with a rate-1/2 [20, 10] code.
        let mut stocked = LdpcCode::new();
        let mut rng = StdRng::seed_from_u64(3);
        stocked
            .random_with_rng(10, 20, &vec![6; 10], &vec![3; 20], &mut rng)
            .unwrap();
        stocked.write_alist(dir.join("ldpc_20_10.alist"), false).unwrap();

        let config = AdapterConfig {
            code_dir: Some(dir.clone()),
            ..AdapterConfig::default()
        };
        let adapter = CodeAdapter::init_seeded(10, 20, config, 4).unwrap();
        assert_eq!(adapter.code().n_rows, 10);
        assert_eq!(adapter.code().n_cols, 20);
        assert_eq!(adapter.code().n_edges(), stocked.n_edges());

        std::fs::remove_file(dir.join("ldpc_20_10.alist")).ok();
        std::fs::remove_dir(dir).ok();
    }
}
