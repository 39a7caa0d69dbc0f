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

//! The production [`LpBackend`]: a thin adapter over the `highs` crate's
//! `ColProblem` builder.
//!
//! `highs` exposes a build-then-solve API (`ColProblem::add_col`/`add_row`
//! followed by `optimise(...).solve()`) rather than a mutable simplex
//! object with column/row bound setters and basis import/export. So this
//! backend keeps its own copy of the model state (mirroring
//! [`crate::lp::EnumBackend`]) and rebuilds a fresh `ColProblem` on every
//! `run()`; `set_basis`/`get_basis` are no-ops since HiGHS's basis is not
//! part of the crate's public surface at the version this pack uses.

use std::path::Path;

use highs::{ColProblem, HighsModelStatus, Sense};

use crate::error::{MipError, Result};
use crate::lp::backend::{Basis, LpBackend, LpInfo, LpReadback, LpSolutionValues, ModelBlob};
use crate::lp::sparse::{self, SparseRow};
use crate::model::SolutionStatus;

#[derive(Debug, Default, Clone)]
pub struct HighsBackend {
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

impl HighsBackend {
    pub fn new() -> Self {
        HighsBackend { status: SolutionStatus::Unknown, ..Default::default() }
    }

    fn num_cols(&self) -> usize {
        self.col_lower.len()
    }
}

fn map_status(status: HighsModelStatus) -> SolutionStatus {
    match status {
        HighsModelStatus::Optimal => SolutionStatus::Optimal,
        HighsModelStatus::Infeasible => SolutionStatus::Infeasible,
        HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => SolutionStatus::Unbounded,
        _ => SolutionStatus::Unknown,
    }
}

impl LpBackend for HighsBackend {
    fn new_like(&self) -> Box<dyn LpBackend> {
        Box::new(HighsBackend::new())
    }

    fn read_model(&mut self, path: &Path) -> Result<()> {
        // `highs` has no public MPS/LP-file reader in this pack's version;
        // loading happens through `pass_model` instead, built by the caller
        // from whatever file format `LpModel::from_file` parses.
        Err(MipError::InputError {
            path: path.to_path_buf(),
            detail: "HighsBackend cannot read a model file directly; load it through pass_model".to_string(),
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
        let mut problem = ColProblem::default();
        let row_handles: Vec<_> =
            self.row_lower.iter().zip(&self.row_upper).map(|(&lo, &hi)| problem.add_row(lo..=hi, [])).collect();

        for col in 0..self.num_cols() {
            let entries: Vec<_> = self
                .rows
                .iter()
                .enumerate()
                .filter_map(|(r, row)| row.iter().find(|&&(c, _)| c == col).map(|&(_, v)| (row_handles[r], v)))
                .collect();
            problem.add_col(self.objective[col], self.col_lower[col]..=self.col_upper[col], entries);
        }

        let mut model = problem.optimise(Sense::Minimise);
        model.set_option("parallel", "off");
        let solved = model.solve();

        self.status = map_status(solved.status());
        if self.status == SolutionStatus::Optimal {
            let solution = solved.get_solution();
            self.solution = solution.columns().to_vec();
            self.objective_value = self.objective.iter().zip(&self.solution).map(|(c, v)| c * v).sum();
        }
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
