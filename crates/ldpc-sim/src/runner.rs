//! Monte-Carlo benchmark runner over the standard test table.
//!
//! Each [`TestPoint`] names a block length pair, an operating Es/N0, and a
//! block count. Per block the runner draws random information bits, encodes,
//! transmits over the AWGN/BPSK channel, quantizes the observed LLRs through
//! the adapter's fixed-point interface, decodes, and records detection,
//! bit-error, and timing statistics.

use std::time::Instant;

use ldpc_core::Bit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::adapter::{AdapterConfig, CodeAdapter};
use crate::channel::AwgnBpskChannel;
use crate::error::{SimError, SimResult};
use crate::stats::{BlockSample, DecoderStats};

/// One benchmark configuration: code size plus test conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestPoint {
    /// Number of information bits.
    pub k: usize,
    /// Number of codeword bits.
    pub n: usize,
    /// Operating Es/N0 (linear).
    pub esno: f64,
    /// Number of blocks to simulate.
    pub n_blocks: usize,
}

/// The benchmark table: k in {64, 128, 256, 512} at rates 1/4, 1/2, 4/5.
pub const CONTEST_TABLE: [TestPoint; 12] = [
    TestPoint { k: 64, n: 256, esno: 1.0, n_blocks: 2000 },
    TestPoint { k: 128, n: 512, esno: 0.1, n_blocks: 2000 },
    TestPoint { k: 256, n: 1024, esno: 0.1, n_blocks: 2000 },
    TestPoint { k: 512, n: 2048, esno: 0.1, n_blocks: 2000 },
    TestPoint { k: 64, n: 128, esno: 1.0, n_blocks: 2000 },
    TestPoint { k: 128, n: 256, esno: 1.0, n_blocks: 2000 },
    TestPoint { k: 256, n: 512, esno: 1.0, n_blocks: 2000 },
    TestPoint { k: 512, n: 1024, esno: 1.0, n_blocks: 2000 },
    TestPoint { k: 64, n: 80, esno: 3.0, n_blocks: 2000 },
    TestPoint { k: 128, n: 160, esno: 3.0, n_blocks: 2000 },
    TestPoint { k: 256, n: 320, esno: 3.0, n_blocks: 2000 },
    TestPoint { k: 512, n: 640, esno: 3.0, n_blocks: 2000 },
];

/// Overrides and reproducibility knobs for a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Replace the table's Es/N0.
    pub esno: Option<f64>,
    /// Replace the table's block count.
    pub n_blocks: Option<usize>,
    /// Seed for code construction, message generation, and the channel.
    /// `None` uses system entropy.
    pub seed: Option<u64>,
    /// Adapter (code library, iteration budget, decoder) settings.
    pub adapter: AdapterConfig,
}

/// Look up a table entry by index.
pub fn test_point(index: usize) -> SimResult<TestPoint> {
    CONTEST_TABLE
        .get(index)
        .copied()
        .ok_or(SimError::UnknownTest {
            index,
            count: CONTEST_TABLE.len(),
        })
}

/// Simulate one test point and return the collected statistics.
pub fn run_test(point: TestPoint, config: &RunConfig) -> SimResult<DecoderStats> {
    let esno = config.esno.unwrap_or(point.esno);
    let n_blocks = config.n_blocks.unwrap_or(point.n_blocks);

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut channel = AwgnBpskChannel::with_seed(esno, rng.gen());
    let mut adapter =
        CodeAdapter::init_seeded(point.k, point.n, config.adapter.clone(), rng.gen())?;

    tracing::info!(k = point.k, n = point.n, esno, n_blocks, "running test point");

    let mut stats = DecoderStats::new();
    let mut info = vec![0 as Bit; point.k];
    for _ in 0..n_blocks {
        for bit in info.iter_mut() {
            *bit = rng.gen_range(0..2);
        }

        let enc_start = Instant::now();
        let cw = adapter.encode(&info)?;
        let encode_ns = enc_start.elapsed().as_nanos() as u64;

        let float_llr = channel.llrs(&cw);
        let int_llr: Vec<i32> = float_llr.iter().map(|&x| CodeAdapter::llr2int(x)).collect();

        let dec_start = Instant::now();
        let verdict = adapter.decode(&int_llr)?;
        let decode_ns = dec_start.elapsed().as_nanos() as u64;

        let bit_errors = info
            .iter()
            .zip(verdict.info_est.iter())
            .filter(|(a, b)| a != b)
            .count();

        stats.record(BlockSample {
            detected: !verdict.ok,
            bit_errors,
            encode_ns,
            decode_ns,
        });
    }

    Ok(stats)
}
