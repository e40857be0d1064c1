//! Systematic encoder construction via GF(2) Gauss-Jordan elimination.
//!
//! [`create_encoder`](crate::LdpcCode::create_encoder) row-reduces a dense
//! copy of **H** with column pivoting. The pivoting is tracked in a column
//! permutation rather than by moving data: after reduction the first `r`
//! permuted columns form the identity and the remaining `k` form a matrix
//! **A**, so under that permutation H row-reduces to `[I_r | A]`. The
//! permutation is then rotated so information columns come first, inverted,
//! and applied to the edge list, leaving the code in systematic
//! `[info | parity]` column order with `parity_generator = A^T`.
//!
//! Row reduction only changes the row space, so a codeword built from the
//! reduced system satisfies the original (relabeled) **H** as well. An alist
//! file written after `create_encoder` reflects the relabeled column order
//! and is not interchangeable with pre-relabel files.
//!
//! ## Example
//!
//! ```
//! use ldpc_core::LdpcCode;
//!
//! let mut code = LdpcCode::from_edges(2, 4, &[(0, 0), (0, 1), (0, 3), (1, 1), (1, 2), (1, 3)]);
//! code.create_encoder().unwrap();
//! let cw = code.encode(&[1, 0]).unwrap();
//! assert_eq!(&cw[..2], &[1, 0]);
//! assert!(code.syndrome_ok(&cw));
//! ```

use crate::code::LdpcCode;
use crate::types::{Bit, LdpcError, LdpcResult};

/// Dense GF(2) matrix with rows packed into 64-bit words.
///
/// Row operations (the hot path of elimination) are word-wide XORs; single
/// bits are only probed during pivot search.
struct BitMatrix {
    words_per_row: usize,
    words: Vec<u64>,
}

impl BitMatrix {
    fn zero(n_rows: usize, n_cols: usize) -> Self {
        let words_per_row = n_cols.div_ceil(64);
        Self {
            words_per_row,
            words: vec![0; n_rows * words_per_row],
        }
    }

    #[inline]
    fn get(&self, r: usize, c: usize) -> bool {
        self.words[r * self.words_per_row + c / 64] >> (c % 64) & 1 == 1
    }

    #[inline]
    fn set(&mut self, r: usize, c: usize) {
        self.words[r * self.words_per_row + c / 64] |= 1 << (c % 64);
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for w in 0..self.words_per_row {
            self.words.swap(a * self.words_per_row + w, b * self.words_per_row + w);
        }
    }

    /// `dst ^= src` over the whole row.
    fn xor_row_into(&mut self, src: usize, dst: usize) {
        for w in 0..self.words_per_row {
            let v = self.words[src * self.words_per_row + w];
            self.words[dst * self.words_per_row + w] ^= v;
        }
    }
}

impl LdpcCode {
    /// Build a systematic encoder from the current parity-check matrix.
    ///
    /// Performs GF(2) Gauss-Jordan elimination with column pivoting,
    /// producing the parity-generator table and relabeling the edge list so
    /// that columns `[0, k)` carry the information bits and `[k, n)` the
    /// parity bits. Stops early when H is rank deficient (the `rank` field
    /// records how far it got; trailing reduced rows are implicitly zero and
    /// the code remains usable). Idempotent: calling it on a code whose
    /// generator is already built is a no-op.
    pub fn create_encoder(&mut self) -> LdpcResult<()> {
        if self.is_encoder_built() {
            return Ok(());
        }
        let r = self.n_rows;
        let n = self.n_cols;
        if n <= r {
            return Err(LdpcError::DimensionMismatch {
                what: "n_cols (systematic form needs n_cols > n_rows)",
                expected: r + 1,
                actual: n,
            });
        }
        let k = n - r;

        let mut d = BitMatrix::zero(r, n);
        for (ri, ci) in self.edges() {
            d.set(ri, ci);
        }

        // Column pivoting: `perm[i]` names the column currently standing in
        // permuted position i. Data never moves between columns.
        let mut perm: Vec<usize> = (0..n).collect();
        let mut rank = r;
        for i in 0..r {
            let pivot = (i..n).find_map(|kk| {
                (i..r).find(|&j| d.get(j, perm[kk])).map(|j| (j, kk))
            });
            let Some((j, kk)) = pivot else {
                // Remaining submatrix is all zero: H has rank i.
                rank = i;
                break;
            };
            perm.swap(i, kk);
            d.swap_rows(i, j);
            for other in 0..r {
                if other != i && d.get(other, perm[i]) {
                    d.xor_row_into(i, other);
                }
            }
        }
        if rank < r {
            tracing::warn!(rank, n_rows = r, "parity-check matrix is rank deficient");
        }

        // parity_generator = A^T: info bit j feeds parity bit i iff the
        // reduced row i has a 1 in the j-th non-pivot column.
        let mut parity_generator = vec![vec![0 as Bit; r]; k];
        for (j, row) in parity_generator.iter_mut().enumerate() {
            for (i, bit) in row.iter_mut().enumerate() {
                *bit = d.get(i, perm[r + j]) as Bit;
            }
        }

        // Rotate the permutation so information columns land in [0, k) and
        // pivot (parity) columns in [k, n), then relabel the edge list by
        // the inverse map.
        let mut invperm = vec![0usize; n];
        for (pos, &c) in perm[r..].iter().chain(perm[..r].iter()).enumerate() {
            invperm[c] = pos;
        }
        for c in self.col.iter_mut() {
            *c = invperm[*c];
        }

        self.rank = rank;
        self.parity_generator = parity_generator;
        Ok(())
    }

    /// Encode `k` information bits into an `n`-bit systematic codeword.
    ///
    /// `cw[0..k)` is a copy of `info`; each parity bit is the XOR of the
    /// information bits selected by its `parity_generator` column. The
    /// result satisfies `H . c = 0` in the relabeled column order.
    pub fn encode(&self, info: &[Bit]) -> LdpcResult<Vec<Bit>> {
        if !self.is_encoder_built() {
            return Err(LdpcError::EncoderNotBuilt);
        }
        let (n, k, r) = self.dimensions();
        if info.len() != k {
            return Err(LdpcError::DimensionMismatch {
                what: "info bits",
                expected: k,
                actual: info.len(),
            });
        }

        let mut cw = vec![0 as Bit; n];
        cw[..k].copy_from_slice(info);
        for (j, generator_row) in self.parity_generator.iter().enumerate() {
            if info[j] & 1 == 1 {
                for i in 0..r {
                    cw[k + i] ^= generator_row[i];
                }
            }
        }
        Ok(cw)
    }
}
