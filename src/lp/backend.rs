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

//! The sole external dependency of the whole solver: a black-box LP
//! relaxation solver. Everything in this module is an interface — the
//! actual simplex algorithm lives outside this crate's concern, in
//! whichever type implements [`LpBackend`].

use std::path::Path;

use crate::error::Result;
use crate::model::SolutionStatus;

/// A column-compressed sparse matrix, as read back from the backend.
#[derive(Debug, Clone, Default)]
pub struct CscMatrix {
    pub start: Vec<usize>,
    pub index: Vec<usize>,
    pub value: Vec<f64>,
}

/// A read-back of the backend's current model: column/row bounds, the
/// coefficient matrix, integrality flags and names.
#[derive(Debug, Clone, Default)]
pub struct LpReadback {
    pub col_lower: Vec<f64>,
    pub col_upper: Vec<f64>,
    pub row_lower: Vec<f64>,
    pub row_upper: Vec<f64>,
    pub matrix: CscMatrix,
    pub integrality: Vec<bool>,
    pub col_names: Vec<String>,
}

/// Everything needed to report a solve's outcome.
#[derive(Debug, Clone, Default)]
pub struct LpInfo {
    pub objective_function_value: f64,
}

#[derive(Debug, Clone, Default)]
pub struct LpSolutionValues {
    pub col_value: Vec<f64>,
}

/// A complete, backend-agnostic description of an LP: everything needed
/// to either build a model from scratch or deep-copy one without
/// re-parsing a file. Despite the name (kept for continuity with the
/// solver's `pass_model`/`get_model` pair), this is plain structured data
/// rather than an opaque byte blob — simpler, and every backend in this
/// crate already needs every field individually.
#[derive(Debug, Clone, Default)]
pub struct ModelBlob {
    pub col_lower: Vec<f64>,
    pub col_upper: Vec<f64>,
    pub row_lower: Vec<f64>,
    pub row_upper: Vec<f64>,
    pub objective: Vec<f64>,
    pub integrality: Vec<bool>,
    pub col_names: Vec<String>,
    pub matrix: CscMatrix,
}

/// An opaque, backend-specific simplex basis, used to warm-start a child
/// LP from its parent's basis.
#[derive(Debug, Clone, Default)]
pub struct Basis {
    pub col_status: Vec<i8>,
    pub row_status: Vec<i8>,
}

/// The external LP solver contract (§6). A concrete backend wraps one
/// real solver instance; [`crate::lp::LpModel`] is the only caller.
pub trait LpBackend {
    /// Creates a fresh, unloaded instance of the same concrete backend
    /// type. Used by [`crate::lp::LpModel::copy`] to spawn a child solver
    /// instance before `pass_model`/`set_basis` populate it.
    fn new_like(&self) -> Box<dyn LpBackend>;

    fn read_model(&mut self, path: &Path) -> Result<()>;
    fn pass_model(&mut self, model: &ModelBlob);
    fn get_model(&self) -> ModelBlob;

    fn change_col_bounds(&mut self, i: usize, lower: f64, upper: f64);
    fn change_row_bounds(&mut self, i: usize, lower: f64, upper: f64);
    fn add_row(&mut self, lower: f64, upper: f64, indices: &[usize], coeffs: &[f64]);
    fn delete_rows(&mut self, idxs: &[usize]);

    fn set_basis(&mut self, basis: Basis);
    fn get_basis(&self) -> Basis;

    fn run(&mut self) -> Result<()>;
    fn get_model_status(&self) -> SolutionStatus;
    fn get_info(&self) -> LpInfo;
    fn get_solution(&self) -> LpSolutionValues;
    fn get_lp(&self) -> LpReadback;

    fn set_integer(&mut self, i: usize);
    fn set_continuous(&mut self, i: usize);
}
