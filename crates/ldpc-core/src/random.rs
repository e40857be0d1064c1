//! Random Tanner-graph construction from prescribed degree sequences.
//!
//! Builds an edge list with the configuration model: every row `i`
//! contributes `rd[i]` stubs, every column `j` contributes `cd[j]` stubs,
//! both stub sequences are shuffled independently, and the `k`-th row stub is
//! paired with the `k`-th column stub. A pairing that produces a parallel
//! edge (duplicate `(row, col)` pair) is rejected and redrawn, so a
//! successful construction is always a simple bipartite graph.
//!
//! ## Example
//!
//! ```
//! use ldpc_core::LdpcCode;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut code = LdpcCode::new();
//! code.random_with_rng(10, 20, &vec![6; 10], &vec![3; 20], &mut rng)
//!     .unwrap();
//! assert_eq!(code.n_edges(), 60);
//! ```

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::code::LdpcCode;
use crate::types::{LdpcError, LdpcResult};

/// How many shuffled pairings to try before giving up.
const RETRY_BUDGET: usize = 10_000;

impl LdpcCode {
    /// Populate the edge list with a random simple graph whose row and
    /// column degrees follow `rd` and `cd`. Entropy-seeded.
    ///
    /// Any previous edges and generator are discarded. On
    /// [`LdpcError::ConstructionExhausted`] the last (non-simple) pairing is
    /// retained so the caller can inspect it; everything else about the code
    /// is well-formed.
    pub fn random(&mut self, r: usize, n: usize, rd: &[usize], cd: &[usize]) -> LdpcResult<()> {
        self.random_with_rng(r, n, rd, cd, &mut StdRng::from_entropy())
    }

    /// Like [`random`](Self::random) but with a caller-supplied RNG, for
    /// reproducible constructions.
    pub fn random_with_rng<R: Rng>(
        &mut self,
        r: usize,
        n: usize,
        rd: &[usize],
        cd: &[usize],
        rng: &mut R,
    ) -> LdpcResult<()> {
        if rd.len() != r {
            return Err(LdpcError::DimensionMismatch {
                what: "row degree sequence",
                expected: r,
                actual: rd.len(),
            });
        }
        if cd.len() != n {
            return Err(LdpcError::DimensionMismatch {
                what: "column degree sequence",
                expected: n,
                actual: cd.len(),
            });
        }
        let row_sum: usize = rd.iter().sum();
        let col_sum: usize = cd.iter().sum();
        if row_sum != col_sum {
            return Err(LdpcError::DegreeSumMismatch { row_sum, col_sum });
        }

        self.clear();
        self.n_rows = r;
        self.n_cols = n;

        // One stub per incident edge, repeated per the degree sequences.
        let mut row_stubs: Vec<usize> = Vec::with_capacity(row_sum);
        for (i, &d) in rd.iter().enumerate() {
            row_stubs.extend(std::iter::repeat(i).take(d));
        }
        let mut col_stubs: Vec<usize> = Vec::with_capacity(col_sum);
        for (j, &d) in cd.iter().enumerate() {
            col_stubs.extend(std::iter::repeat(j).take(d));
        }

        let mut seen: HashSet<(usize, usize)> = HashSet::with_capacity(row_sum);
        for attempt in 1..=RETRY_BUDGET {
            row_stubs.shuffle(rng);
            col_stubs.shuffle(rng);

            seen.clear();
            let simple = row_stubs
                .iter()
                .zip(col_stubs.iter())
                .all(|(&r, &c)| seen.insert((r, c)));

            self.row.clear();
            self.col.clear();
            self.row.extend_from_slice(&row_stubs);
            self.col.extend_from_slice(&col_stubs);

            if simple {
                tracing::debug!(
                    n_rows = r,
                    n_cols = n,
                    n_edges = row_sum,
                    attempt,
                    "random construction succeeded"
                );
                return Ok(());
            }
        }

        tracing::warn!(
            n_rows = r,
            n_cols = n,
            attempts = RETRY_BUDGET,
            "no simple pairing found; retaining last attempt"
        );
        Err(LdpcError::ConstructionExhausted {
            attempts: RETRY_BUDGET,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_degrees_are_honored() {
        let mut code = LdpcCode::new();
        let rd = vec![6; 10];
        let cd = vec![3; 20];
        code.random_with_rng(10, 20, &rd, &cd, &mut seeded()).unwrap();
        assert_eq!(code.n_rows, 10);
        assert_eq!(code.n_cols, 20);
        assert_eq!(code.n_edges(), 60);
        assert_eq!(code.row_weights(), rd);
        assert_eq!(code.col_weights(), cd);
    }

    #[test]
    fn test_graph_is_simple() {
        let mut code = LdpcCode::new();
        code.random_with_rng(10, 20, &vec![6; 10], &vec![3; 20], &mut seeded())
            .unwrap();
        let mut seen = HashSet::new();
        for pair in code.edges() {
            assert!(seen.insert(pair), "duplicate edge {pair:?}");
        }
    }

    #[test]
    fn test_degree_sum_mismatch_is_fatal() {
        let mut code = LdpcCode::new();
        let err = code
            .random_with_rng(10, 20, &vec![6; 10], &vec![2; 20], &mut seeded())
            .unwrap_err();
        assert!(matches!(
            err,
            LdpcError::DegreeSumMismatch {
                row_sum: 60,
                col_sum: 40
            }
        ));
    }

    #[test]
    fn test_degree_length_mismatch_is_fatal() {
        let mut code = LdpcCode::new();
        let err = code
            .random_with_rng(10, 20, &vec![6; 9], &vec![3; 20], &mut seeded())
            .unwrap_err();
        assert!(matches!(err, LdpcError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_repopulation_replaces_previous_graph() {
        let mut code = LdpcCode::new();
        code.random_with_rng(10, 20, &vec![6; 10], &vec![3; 20], &mut seeded())
            .unwrap();
        code.random_with_rng(5, 10, &vec![4; 5], &vec![2; 10], &mut seeded())
            .unwrap();
        assert_eq!(code.n_rows, 5);
        assert_eq!(code.n_cols, 10);
        assert_eq!(code.n_edges(), 20);
    }

    // Dense degree sequences either pair up simply or exhaust the budget
    // loudly; a corrupt edge list is never returned as success.
    #[test]
    fn test_dense_construction_never_silently_corrupt() {
        let mut code = LdpcCode::new();
        match code.random_with_rng(3, 6, &vec![6; 3], &vec![3; 6], &mut seeded()) {
            Ok(()) => {
                let mut seen = HashSet::new();
                for pair in code.edges() {
                    assert!(seen.insert(pair), "duplicate edge {pair:?}");
                }
            }
            Err(LdpcError::ConstructionExhausted { attempts }) => {
                assert_eq!(attempts, RETRY_BUDGET);
                // Last attempt retained, dimensions still coherent.
                assert_eq!(code.n_edges(), 18);
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
