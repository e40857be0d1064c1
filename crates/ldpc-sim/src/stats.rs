//! Per-block statistics for Monte-Carlo decoder runs.
//!
//! Each decoded block contributes one [`BlockSample`]: whether the frame
//! error was detected, how many information bits came out wrong, and how
//! long encode and decode took. [`DecoderStats`] accumulates samples and
//! answers the summary questions the runner prints.

/// Measurements from one encoded/decoded block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSample {
    /// The decoder flagged the frame as failed (parity unsatisfied).
    pub detected: bool,
    /// Number of wrong information bits after decoding.
    pub bit_errors: usize,
    /// Wall-clock encode time in nanoseconds.
    pub encode_ns: u64,
    /// Wall-clock decode time in nanoseconds.
    pub decode_ns: u64,
}

/// Accumulated totals over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTotals {
    /// Blocks with a detected frame error.
    pub frame_errors: usize,
    /// Total wrong information bits.
    pub bit_errors: usize,
    /// Total encode time in nanoseconds.
    pub encode_ns: u64,
    /// Total decode time in nanoseconds.
    pub decode_ns: u64,
}

/// Sample collector for one test point.
#[derive(Debug, Clone, Default)]
pub struct DecoderStats {
    samples: Vec<BlockSample>,
}

impl DecoderStats {
    /// Empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Record one block.
    pub fn record(&mut self, sample: BlockSample) {
        self.samples.push(sample);
    }

    /// Number of recorded blocks.
    pub fn n_samples(&self) -> usize {
        self.samples.len()
    }

    /// Sum every field over the recorded blocks.
    pub fn totals(&self) -> RunTotals {
        let mut totals = RunTotals::default();
        for s in &self.samples {
            totals.frame_errors += usize::from(s.detected);
            totals.bit_errors += s.bit_errors;
            totals.encode_ns += s.encode_ns;
            totals.decode_ns += s.decode_ns;
        }
        totals
    }

    /// Detected-frame-error rate over the run.
    pub fn frame_error_rate(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.totals().frame_errors as f64 / self.samples.len() as f64
    }

    /// Information-bit error rate over the run, given `k` bits per block.
    pub fn bit_error_rate(&self, k: usize) -> f64 {
        let bits = self.samples.len() * k;
        if bits == 0 {
            return 0.0;
        }
        self.totals().bit_errors as f64 / bits as f64
    }

    /// Mean encode time per block in nanoseconds.
    pub fn mean_encode_ns(&self) -> f64 {
        self.mean(|t| t.encode_ns as f64)
    }

    /// Mean decode time per block in nanoseconds.
    pub fn mean_decode_ns(&self) -> f64 {
        self.mean(|t| t.decode_ns as f64)
    }

    fn mean(&self, field: impl Fn(&RunTotals) -> f64) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        field(&self.totals()) / self.samples.len() as f64
    }
}
