// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Conversions between the trait's CSC exchange format and the row-major
//! sparse storage every backend in this crate keeps internally (mutators
//! like `add_row`/`delete_rows` are naturally row-wise).

use crate::lp::backend::CscMatrix;

pub type SparseRow = Vec<(usize, f64)>;

pub fn csc_to_rows(num_rows: usize, num_cols: usize, m: &CscMatrix) -> Vec<SparseRow> {
    let mut rows: Vec<SparseRow> = vec![Vec::new(); num_rows];
    for col in 0..num_cols {
        let start = m.start[col];
        let end = m.start.get(col + 1).copied().unwrap_or(m.index.len());
        for k in start..end {
            rows[m.index[k]].push((col, m.value[k]));
        }
    }
    rows
}

pub fn rows_to_csc(num_cols: usize, rows: &[SparseRow]) -> CscMatrix {
    let mut by_col: Vec<Vec<(usize, f64)>> = vec![Vec::new(); num_cols];
    for (row_idx, row) in rows.iter().enumerate() {
        for &(col, value) in row {
            by_col[col].push((row_idx, value));
        }
    }

    let mut start = Vec::with_capacity(num_cols + 1);
    let mut index = Vec::new();
    let mut value = Vec::new();
    for col_entries in &by_col {
        start.push(index.len());
        for &(row_idx, v) in col_entries {
            index.push(row_idx);
            value.push(v);
        }
    }
    start.push(index.len());
    CscMatrix { start, index, value }
}

pub fn dense_row(row: &SparseRow, num_cols: usize) -> Vec<f64> {
    let mut out = vec![0.0; num_cols];
    for &(col, value) in row {
        out[col] = value;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csc_round_trips_through_rows() {
        let m = CscMatrix { start: vec![0, 1, 2], index: vec![0, 0], value: vec![1.0, 1.0] };
        let rows = csc_to_rows(1, 2, &m);
        let back = rows_to_csc(2, &rows);
        assert_eq!(back.start, m.start);
        assert_eq!(back.index, m.index);
        assert_eq!(back.value, m.value);
    }
}
