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

//! A small, deliberately naive [`LpBackend`] used only by this crate's own
//! test suite: it solves the LP relaxation by enumerating the vertices of
//! the bounded polytope (every combination of `n` tight facets, solved by
//! Gaussian elimination) rather than running a simplex method. Exact,
//! trivially auditable, and cheap enough for the handful of variables any
//! unit test needs — not a substitute for [`crate::lp::HighsBackend`] on
//! anything of real size.

use itertools::Itertools;

use crate::error::Result;
use crate::lp::backend::{Basis, LpBackend, LpInfo, LpReadback, LpSolutionValues, ModelBlob};
use crate::lp::sparse::{self, SparseRow};
use crate::model::SolutionStatus;

/// Above this many candidate facets, vertex enumeration's `C(k, n)` blowup
/// stops being "cheap for a unit test"; the backend reports `Unknown`
/// rather than hang.
const MAX_FACETS: usize = 24;
const FEASIBILITY_TOLERANCE: f64 = 1e-7;
const PIVOT_TOLERANCE: f64 = 1e-9;

struct Facet {
    coeffs: Vec<f64>,
    rhs: f64,
}

#[derive(Debug, Default, Clone)]
pub struct EnumBackend {
    col_lower: Vec<f64>,
    col_upper: Vec<f64>,
    row_lower: Vec<f64>,
    row_upper: Vec<f64>,
    objective: Vec<f64>,
    integrality: Vec<bool>,
    col_names: Vec<String>,
    rows: Vec<SparseRow>,

    status: SolutionStatus,
    objective_value: f64,
    solution: Vec<f64>,
}

impl EnumBackend {
    pub fn new() -> Self {
        EnumBackend { status: SolutionStatus::Unknown, ..Default::default() }
    }

    fn num_cols(&self) -> usize {
        self.col_lower.len()
    }

    fn num_rows(&self) -> usize {
        self.row_lower.len()
    }

    fn dense_row(&self, row: usize) -> Vec<f64> {
        sparse::dense_row(&self.rows[row], self.num_cols())
    }

    fn facets(&self) -> Vec<Facet> {
        let n = self.num_cols();
        let mut facets = Vec::new();

        for j in 0..n {
            if self.col_lower[j].is_finite() {
                let mut coeffs = vec![0.0; n];
                coeffs[j] = 1.0;
                facets.push(Facet { coeffs, rhs: self.col_lower[j] });
            }
            if self.col_upper[j].is_finite() {
                let mut coeffs = vec![0.0; n];
                coeffs[j] = 1.0;
                facets.push(Facet { coeffs, rhs: self.col_upper[j] });
            }
        }
        for i in 0..self.num_rows() {
            let row = self.dense_row(i);
            if self.row_lower[i].is_finite() {
                facets.push(Facet { coeffs: row.clone(), rhs: self.row_lower[i] });
            }
            if self.row_upper[i].is_finite() {
                facets.push(Facet { coeffs: row, rhs: self.row_upper[i] });
            }
        }
        facets
    }

    fn is_feasible(&self, x: &[f64]) -> bool {
        for j in 0..self.num_cols() {
            if x[j] < self.col_lower[j] - FEASIBILITY_TOLERANCE || x[j] > self.col_upper[j] + FEASIBILITY_TOLERANCE {
                return false;
            }
        }
        for i in 0..self.num_rows() {
            let activity: f64 = self.rows[i].iter().map(|&(col, coeff)| coeff * x[col]).sum();
            if activity < self.row_lower[i] - FEASIBILITY_TOLERANCE || activity > self.row_upper[i] + FEASIBILITY_TOLERANCE {
                return false;
            }
        }
        true
    }

    fn solve_relaxation(&mut self) {
        let n = self.num_cols();
        if n == 0 {
            self.status = SolutionStatus::Optimal;
            self.objective_value = 0.0;
            self.solution = Vec::new();
            return;
        }

        let facets = self.facets();
        if facets.len() < n || facets.len() > MAX_FACETS {
            self.status = SolutionStatus::Unknown;
            return;
        }

        let mut best: Option<(f64, Vec<f64>)> = None;
        for combo in facets.iter().combinations(n) {
            let mut a: Vec<Vec<f64>> = combo.iter().map(|f| f.coeffs.clone()).collect();
            let mut b: Vec<f64> = combo.iter().map(|f| f.rhs).collect();
            let Some(x) = solve_square_system(&mut a, &mut b) else { continue };
            if !self.is_feasible(&x) {
                continue;
            }
            let obj: f64 = self.objective.iter().zip(&x).map(|(c, v)| c * v).sum();
            if best.as_ref().map(|(best_obj, _)| obj < *best_obj).unwrap_or(true) {
                best = Some((obj, x));
            }
        }

        match best {
            Some((obj, x)) => {
                self.status = SolutionStatus::Optimal;
                self.objective_value = obj;
                self.solution = x;
            }
            None => {
                self.status = SolutionStatus::Infeasible;
            }
        }
    }
}

/// Gauss-Jordan elimination with partial pivoting. `None` if the system is
/// singular (the chosen facets don't determine a unique point).
fn solve_square_system(a: &mut [Vec<f64>], b: &mut [f64]) -> Option<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let pivot_row = (col..n).max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))?;
        if a[pivot_row][col].abs() < PIVOT_TOLERANCE {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        let pivot = a[col][col];
        for k in col..n {
            a[col][k] /= pivot;
        }
        b[col] /= pivot;

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }
    Some(b.to_vec())
}

impl LpBackend for EnumBackend {
    fn new_like(&self) -> Box<dyn LpBackend> {
        Box::new(EnumBackend::new())
    }

    fn read_model(&mut self, _path: &std::path::Path) -> Result<()> {
        Err(crate::error::MipError::SolverBackendError {
            detail: "EnumBackend cannot read model files; build it via pass_model instead".to_string(),
        })
    }

    fn pass_model(&mut self, model: &ModelBlob) {
        self.col_lower = model.col_lower.clone();
        self.col_upper = model.col_upper.clone();
        self.row_lower = model.row_lower.clone();
        self.row_upper = model.row_upper.clone();
        self.objective = model.objective.clone();
        self.integrality = model.integrality.clone();
        self.col_names = model.col_names.clone();
        self.rows = sparse::csc_to_rows(self.row_lower.len(), self.col_lower.len(), &model.matrix);
        self.status = SolutionStatus::Unknown;
    }

    fn get_model(&self) -> ModelBlob {
        ModelBlob {
            col_lower: self.col_lower.clone(),
            col_upper: self.col_upper.clone(),
            row_lower: self.row_lower.clone(),
            row_upper: self.row_upper.clone(),
            objective: self.objective.clone(),
            integrality: self.integrality.clone(),
            col_names: self.col_names.clone(),
            matrix: sparse::rows_to_csc(self.num_cols(), &self.rows),
        }
    }

    fn change_col_bounds(&mut self, i: usize, lower: f64, upper: f64) {
        self.col_lower[i] = lower;
        self.col_upper[i] = upper;
    }

    fn change_row_bounds(&mut self, i: usize, lower: f64, upper: f64) {
        self.row_lower[i] = lower;
        self.row_upper[i] = upper;
    }

    fn add_row(&mut self, lower: f64, upper: f64, indices: &[usize], coeffs: &[f64]) {
        self.row_lower.push(lower);
        self.row_upper.push(upper);
        self.rows.push(indices.iter().copied().zip(coeffs.iter().copied()).collect());
    }

    fn delete_rows(&mut self, idxs: &[usize]) {
        let mut idxs = idxs.to_vec();
        idxs.sort_unstable_by(|a, b| b.cmp(a));
        for row in idxs {
            self.row_lower.remove(row);
            self.row_upper.remove(row);
            self.rows.remove(row);
        }
    }

    fn set_basis(&mut self, _basis: Basis) {}

    fn get_basis(&self) -> Basis {
        Basis::default()
    }

    fn run(&mut self) -> Result<()> {
        self.solve_relaxation();
        Ok(())
    }

    fn get_model_status(&self) -> SolutionStatus {
        self.status
    }

    fn get_info(&self) -> LpInfo {
        LpInfo { objective_function_value: self.objective_value }
    }

    fn get_solution(&self) -> LpSolutionValues {
        LpSolutionValues { col_value: self.solution.clone() }
    }

    fn get_lp(&self) -> LpReadback {
        LpReadback {
            col_lower: self.col_lower.clone(),
            col_upper: self.col_upper.clone(),
            row_lower: self.row_lower.clone(),
            row_upper: self.row_upper.clone(),
            matrix: sparse::rows_to_csc(self.num_cols(), &self.rows),
            integrality: self.integrality.clone(),
            col_names: self.col_names.clone(),
        }
    }

    fn set_integer(&mut self, i: usize) {
        self.integrality[i] = true;
    }

    fn set_continuous(&mut self, i: usize) {
        self.integrality[i] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::backend::CscMatrix;

    fn blob_two_var_box() -> ModelBlob {
        // min x + y  s.t.  x + y >= 2, 0 <= x,y <= 5
        ModelBlob {
            col_lower: vec![0.0, 0.0],
            col_upper: vec![5.0, 5.0],
            row_lower: vec![2.0],
            row_upper: vec![f64::INFINITY],
            objective: vec![1.0, 1.0],
            integrality: vec![false, false],
            col_names: vec!["x".into(), "y".into()],
            matrix: CscMatrix { start: vec![0, 1, 2], index: vec![0, 0], value: vec![1.0, 1.0] },
        }
    }

    #[test]
    fn finds_the_optimal_vertex() {
        let mut backend = EnumBackend::new();
        backend.pass_model(&blob_two_var_box());
        backend.run().unwrap();
        assert_eq!(backend.get_model_status(), SolutionStatus::Optimal);
        assert!((backend.get_info().objective_function_value - 2.0).abs() < 1e-6);
    }

    #[test]
    fn infeasible_row_is_reported() {
        let mut backend = EnumBackend::new();
        let mut blob = blob_two_var_box();
        blob.row_lower = vec![20.0];
        backend.pass_model(&blob);
        backend.run().unwrap();
        assert_eq!(backend.get_model_status(), SolutionStatus::Infeasible);
    }

    #[test]
    fn change_col_bounds_shifts_the_optimum() {
        let mut backend = EnumBackend::new();
        backend.pass_model(&blob_two_var_box());
        backend.change_col_bounds(0, 3.0, 3.0);
        backend.run().unwrap();
        assert_eq!(backend.get_model_status(), SolutionStatus::Optimal);
        assert!((backend.get_info().objective_function_value - 3.0).abs() < 1e-6);
    }

    #[test]
    fn round_trip_through_get_model_preserves_matrix() {
        let mut backend = EnumBackend::new();
        backend.pass_model(&blob_two_var_box());
        let blob = backend.get_model();
        let mut rebuilt = EnumBackend::new();
        rebuilt.pass_model(&blob);
        rebuilt.run().unwrap();
        assert_eq!(rebuilt.get_model_status(), SolutionStatus::Optimal);
        assert!((rebuilt.get_info().objective_function_value - 2.0).abs() < 1e-6);
    }
}
