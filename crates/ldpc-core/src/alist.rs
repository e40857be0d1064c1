//! Reader and writer for the `alist` sparse-matrix format.
//!
//! `alist` is the textual, whitespace-separated format widely used to
//! exchange LDPC parity-check matrices:
//!
//! ```text
//! n_cols n_rows
//! max_col_weight max_row_weight
//! col_weight[0] .. col_weight[n-1]
//! row_weight[0] .. row_weight[r-1]
//! <for each column: 1-based row indices of its 1-entries>
//! <for each row:    1-based column indices of its 1-entries>
//! ```
//!
//! Two variants exist in the wild. In the **variable-length** variant each
//! column/row list has exactly its weight's worth of entries; in the
//! **zero-padded** variant every list is padded with `0` up to the maximum
//! weight, and a `0` terminates that list's logical content. Both are
//! supported through the `zero_pad` flag.
//!
//! The header is written and read as `n_cols` first, `n_rows` second; the
//! transposed convention found in some other tools is not accepted.
//!
//! The reader builds the edge list from the column section alone. The row
//! section is redundant (it is recomputed from the edge list on write) and
//! is not consumed. Out-of-range entries are logged and skipped; structural
//! damage (a truncated or unparsable header or list) is an error.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::code::LdpcCode;
use crate::types::{LdpcError, LdpcResult};

/// Whitespace token scanner that remembers the 1-based line of each token,
/// so format diagnostics can point at the offending input line.
struct Tokens<'a> {
    lines: std::str::Lines<'a>,
    current: std::str::SplitWhitespace<'a>,
    line_no: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            current: "".split_whitespace(),
            line_no: 0,
        }
    }

    fn next(&mut self) -> Option<(usize, &'a str)> {
        loop {
            if let Some(tok) = self.current.next() {
                return Some((self.line_no, tok));
            }
            let line = self.lines.next()?;
            self.line_no += 1;
            self.current = line.split_whitespace();
        }
    }

    /// Next token parsed as a signed integer, or an `AlistFormat` error
    /// naming `what` and the line it was expected on.
    fn next_int(&mut self, what: &str) -> LdpcResult<(usize, i64)> {
        match self.next() {
            Some((line, tok)) => match tok.parse::<i64>() {
                Ok(v) => Ok((line, v)),
                Err(_) => Err(LdpcError::AlistFormat {
                    line,
                    reason: format!("expected {what}, got `{tok}`"),
                }),
            },
            None => Err(LdpcError::AlistFormat {
                line: self.line_no,
                reason: format!("input ended while reading {what}"),
            }),
        }
    }

    fn next_usize(&mut self, what: &str) -> LdpcResult<usize> {
        let (line, v) = self.next_int(what)?;
        usize::try_from(v).map_err(|_| LdpcError::AlistFormat {
            line,
            reason: format!("{what} must be non-negative, got {v}"),
        })
    }
}

impl LdpcCode {
    /// Read a code from an alist file, replacing any previous contents.
    ///
    /// `zero_pad` selects the zero-padded variant, in which every column
    /// list holds `max_col_weight` entries and a `0` ends the logical
    /// entries early. The previous edge list is cleared before the file is
    /// touched, so a failed read leaves an empty code.
    pub fn read_alist(&mut self, path: impl AsRef<Path>, zero_pad: bool) -> LdpcResult<()> {
        let path = path.as_ref();
        self.clear();

        let text = fs::read_to_string(path).map_err(|source| LdpcError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_alist(&text, zero_pad).inspect_err(|_| self.clear())
    }

    fn parse_alist(&mut self, text: &str, zero_pad: bool) -> LdpcResult<()> {
        let mut tokens = Tokens::new(text);

        let n_cols = tokens.next_usize("n_cols")?;
        let n_rows = tokens.next_usize("n_rows")?;
        let max_col_weight = tokens.next_usize("max_col_weight")?;
        let _max_row_weight = tokens.next_usize("max_row_weight")?;

        let mut col_weights = Vec::with_capacity(n_cols);
        for j in 0..n_cols {
            col_weights.push(tokens.next_usize(&format!("col_weight[{j}]"))?);
        }
        for i in 0..n_rows {
            tokens.next_usize(&format!("row_weight[{i}]"))?;
        }

        self.n_cols = n_cols;
        self.n_rows = n_rows;

        // The column section alone defines the edge list; the row section is
        // redundant and never consumed.
        for (j, &weight) in col_weights.iter().enumerate() {
            let entries = if zero_pad { max_col_weight } else { weight };
            let mut terminated = false;
            for _ in 0..entries {
                let (line, index) = tokens.next_int(&format!("entry of column {j}"))?;
                if zero_pad && index == 0 {
                    terminated = true;
                    continue;
                }
                if terminated {
                    // Padding after the terminator carries no content.
                    continue;
                }
                if index <= 0 || index as usize > n_rows {
                    tracing::warn!(
                        line,
                        column = j,
                        index,
                        n_rows,
                        "row index out of range, entry skipped"
                    );
                    continue;
                }
                self.col.push(j);
                self.row.push(index as usize - 1);
            }
        }

        Ok(())
    }

    /// Write the code to an alist file, overwriting any existing file.
    ///
    /// Column and row weights are recomputed from the edge list; each
    /// column/row list is emitted in edge-list order, zero-padded to the
    /// maximum weight when `zero_pad` is set.
    pub fn write_alist(&self, path: impl AsRef<Path>, zero_pad: bool) -> LdpcResult<()> {
        let path = path.as_ref();
        self.write_alist_inner(path, zero_pad)
            .map_err(|source| LdpcError::Io {
                path: path.to_path_buf(),
                source,
            })
    }

    fn write_alist_inner(&self, path: &Path, zero_pad: bool) -> std::io::Result<()> {
        let col_weights = self.col_weights();
        let row_weights = self.row_weights();
        let max_col_weight = col_weights.iter().copied().max().unwrap_or(0);
        let max_row_weight = row_weights.iter().copied().max().unwrap_or(0);

        // Bucket the 1-based counterpart indices per column and per row,
        // preserving edge-list order within each bucket.
        let mut by_col: Vec<Vec<usize>> = vec![Vec::new(); self.n_cols];
        let mut by_row: Vec<Vec<usize>> = vec![Vec::new(); self.n_rows];
        for (r, c) in self.edges() {
            by_col[c].push(r + 1);
            by_row[r].push(c + 1);
        }

        let mut out = std::io::BufWriter::new(fs::File::create(path)?);
        writeln!(out, "{} {}", self.n_cols, self.n_rows)?;
        writeln!(out, "{max_col_weight} {max_row_weight}")?;
        writeln!(out, "{}", join(&col_weights))?;
        writeln!(out, "{}", join(&row_weights))?;
        for entries in &by_col {
            writeln!(out, "{}", padded(entries, max_col_weight, zero_pad))?;
        }
        for entries in &by_row {
            writeln!(out, "{}", padded(entries, max_row_weight, zero_pad))?;
        }
        out.flush()
    }
}

fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn padded(entries: &[usize], width: usize, zero_pad: bool) -> String {
    if !zero_pad {
        return join(entries);
    }
    let mut padded = entries.to_vec();
    padded.resize(width, 0);
    join(&padded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(name)
    }

    fn sample_code() -> LdpcCode {
        let mut code = LdpcCode::new();
        let mut rng = StdRng::seed_from_u64(42);
        code.random_with_rng(10, 20, &vec![6; 10], &vec![3; 20], &mut rng)
            .unwrap();
        code
    }

    #[test]
    fn test_roundtrip_variable_length() {
        let path = temp_path("ldpc_roundtrip_var.alist");
        let mut original = sample_code();
        original.write_alist(&path, false).unwrap();

        let mut restored = LdpcCode::new();
        restored.read_alist(&path, false).unwrap();

        original.sort_edges();
        restored.sort_edges();
        assert_eq!(original.n_rows, restored.n_rows);
        assert_eq!(original.n_cols, restored.n_cols);
        assert_eq!(original.n_edges(), restored.n_edges());
        assert_eq!(original.row, restored.row);
        assert_eq!(original.col, restored.col);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_roundtrip_zero_padded() {
        let path = temp_path("ldpc_roundtrip_pad.alist");
        let mut original = sample_code();
        original.write_alist(&path, true).unwrap();

        let mut restored = LdpcCode::new();
        restored.read_alist(&path, true).unwrap();

        original.sort_edges();
        restored.sort_edges();
        assert_eq!(original.row, restored.row);
        assert_eq!(original.col, restored.col);

        fs::remove_file(path).ok();
    }

    // The two on-disk variants describe the same edge set.
    #[test]
    fn test_zero_pad_equivalence() {
        let plain = temp_path("ldpc_eq_var.alist");
        let padded = temp_path("ldpc_eq_pad.alist");
        let code = sample_code();
        code.write_alist(&plain, false).unwrap();
        code.write_alist(&padded, true).unwrap();

        let mut from_plain = LdpcCode::new();
        from_plain.read_alist(&plain, false).unwrap();
        let mut from_padded = LdpcCode::new();
        from_padded.read_alist(&padded, true).unwrap();

        from_plain.sort_edges();
        from_padded.sort_edges();
        assert_eq!(from_plain.row, from_padded.row);
        assert_eq!(from_plain.col, from_padded.col);

        fs::remove_file(plain).ok();
        fs::remove_file(padded).ok();
    }

    #[test]
    fn test_header_is_cols_then_rows() {
        let path = temp_path("ldpc_header.alist");
        let code = sample_code();
        code.write_alist(&path, false).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let header: Vec<usize> = text
            .split_whitespace()
            .take(4)
            .map(|t| t.parse().unwrap())
            .collect();
        assert_eq!(header[0], 20); // n_cols first
        assert_eq!(header[1], 10); // n_rows second
        assert_eq!(header[2], 3); // max column weight
        assert_eq!(header[3], 6); // max row weight

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_out_of_range_entry_is_skipped() {
        let path = temp_path("ldpc_lenient.alist");
        // 2x2 matrix; column 0 claims rows 1 and 9 (9 is out of range),
        // column 1 row 2. Row section present but never consumed.
        fs::write(
            &path,
            "2 2\n2 1\n2 1\n2 1\n1 9\n2\n1\n1 2\n",
        )
        .unwrap();

        let mut code = LdpcCode::new();
        code.read_alist(&path, false).unwrap();
        assert_eq!(code.n_edges(), 2);
        let mut edges: Vec<_> = code.edges().collect();
        edges.sort();
        assert_eq!(edges, vec![(0, 0), (1, 1)]);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_zero_terminates_padded_column() {
        let path = temp_path("ldpc_zero_term.alist");
        // Zero-padded variant: max_col_weight 3, column 0 has entries
        // {1}, then the 0 terminator, then padding.
        fs::write(
            &path,
            "2 2\n3 2\n1 2\n1 2\n1 0 0\n1 2 0\n1 2\n2\n",
        )
        .unwrap();

        let mut code = LdpcCode::new();
        code.read_alist(&path, true).unwrap();
        let mut edges: Vec<_> = code.edges().collect();
        edges.sort();
        assert_eq!(edges, vec![(0, 0), (0, 1), (1, 1)]);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_reports_path() {
        let mut code = LdpcCode::new();
        let err = code
            .read_alist("/nonexistent/dir/code.alist", false)
            .unwrap_err();
        assert!(matches!(err, LdpcError::Io { .. }));
        assert!(err.to_string().contains("code.alist"));
        // The failed read leaves an empty code.
        assert_eq!(code.n_edges(), 0);
        assert_eq!(code.n_cols, 0);
    }

    #[test]
    fn test_truncated_header_is_an_error() {
        let path = temp_path("ldpc_truncated.alist");
        fs::write(&path, "20 10\n3\n").unwrap();

        let mut code = LdpcCode::new();
        let err = code.read_alist(&path, false).unwrap_err();
        assert!(matches!(err, LdpcError::AlistFormat { .. }));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_read_clears_previous_state() {
        let path = temp_path("ldpc_clears.alist");
        let small = LdpcCode::from_edges(1, 2, &[(0, 0), (0, 1)]);
        small.write_alist(&path, false).unwrap();

        let mut code = sample_code();
        code.read_alist(&path, false).unwrap();
        assert_eq!(code.n_rows, 1);
        assert_eq!(code.n_cols, 2);
        assert_eq!(code.n_edges(), 2);

        fs::remove_file(path).ok();
    }
}
