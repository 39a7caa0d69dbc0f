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

//! [`LpModel`]: a node's private view of the MIP — its variables,
//! constraints, conflict graph and cached [`Solution`] — wrapped around one
//! [`LpBackend`] instance. Every other module in the search talks to the LP
//! relaxation only through this type.

use std::path::Path;

use crate::config::SolverConfig;
use crate::cuts::GraphCut;
use crate::error::Result;
use crate::graph::ImplicationGraph;
use crate::lp::backend::{LpBackend, ModelBlob};
use crate::lp::sparse::{self, SparseRow};
use crate::model::{read_mps, Constraint, ParsedInstance, Solution, SolutionStatus, Variable};
use crate::propagate::{PropagationOutcome, Propagator};

/// The outcome of a [`LpModel::solve`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveRes {
    /// The model was not dirty; the cached [`Solution`] is still current.
    NoChange,
    /// Resolved, and the objective moved by at least the configured
    /// tolerance (or this is the first solve, or the node became
    /// infeasible).
    ResolvedAndChanged,
    /// Resolved, but the objective is within tolerance of its previous
    /// value — typically a propagation-only re-solve after a cut that
    /// didn't bind this particular node.
    ResolvedAndUnchanged,
}

/// Encapsulates one LP relaxation: variables, constraints, current bounds,
/// last solution, owned conflict graph, and the backend solver instance.
pub struct LpModel {
    pub vars: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    pub graph: ImplicationGraph,
    pub solution: Solution,

    backend: Box<dyn LpBackend>,
    dirty: bool,
    propagator: Propagator,
    presolve_enabled: bool,
    objective_change_tolerance: f64,
}

impl LpModel {
    pub fn from_parsed(parsed: ParsedInstance, mut backend: Box<dyn LpBackend>, config: &SolverConfig) -> LpModel {
        let num_cols = parsed.variables.len();
        let rows: Vec<SparseRow> =
            parsed.constraints.iter().map(|c| c.coeffs.iter().map(|(&v, &coeff)| (v, coeff)).collect()).collect();

        let blob = ModelBlob {
            col_lower: parsed.variables.iter().map(|v| v.lower).collect(),
            col_upper: parsed.variables.iter().map(|v| v.upper).collect(),
            row_lower: parsed.constraints.iter().map(|c| c.lower).collect(),
            row_upper: parsed.constraints.iter().map(|c| c.upper).collect(),
            objective: parsed.objective,
            integrality: parsed.variables.iter().map(|v| v.is_integer).collect(),
            col_names: parsed.variables.iter().map(|v| v.name.clone()).collect(),
            matrix: sparse::rows_to_csc(num_cols, &rows),
        };
        backend.pass_model(&blob);

        LpModel {
            vars: parsed.variables,
            constraints: parsed.constraints,
            graph: ImplicationGraph::new(),
            solution: Solution::unknown(),
            backend,
            dirty: true,
            propagator: Propagator::new(config.max_sweeps),
            presolve_enabled: config.presolve_enabled,
            objective_change_tolerance: config.objective_change_tolerance,
        }
    }

    pub fn from_file(path: &Path, backend: Box<dyn LpBackend>, config: &SolverConfig) -> Result<LpModel> {
        let parsed = read_mps(path)?;
        Ok(LpModel::from_parsed(parsed, backend, config))
    }

    /// Runs propagation (if enabled) and the LP relaxation. `branched_var`,
    /// when given, opens a new depth in the conflict graph before
    /// propagating — callers pass it exactly once, right after branching.
    pub fn solve(&mut self, branched_var: Option<usize>) -> Result<SolveRes> {
        if !self.dirty && branched_var.is_none() {
            return Ok(SolveRes::NoChange);
        }

        if let Some(var) = branched_var {
            self.graph.new_depth(var, self.vars[var].bound());
        }

        if self.presolve_enabled {
            let outcome = self.propagator.propagate(&mut self.vars, &mut self.constraints, &mut self.graph);
            for v in &self.vars {
                self.backend.change_col_bounds(v.index, v.lower, v.upper);
            }
            if outcome == PropagationOutcome::Infeasible {
                self.solution = Solution { objective: None, assignment: Vec::new(), status: SolutionStatus::Infeasible };
                self.dirty = false;
                return Ok(SolveRes::ResolvedAndChanged);
            }
        }

        let previous_objective = self.solution.objective;
        self.backend.run()?;
        let status = self.backend.get_model_status();
        self.solution = Solution {
            objective: (status == SolutionStatus::Optimal).then(|| self.backend.get_info().objective_function_value),
            assignment: self.backend.get_solution().col_value,
            status,
        };
        self.dirty = false;

        Ok(match (previous_objective, self.solution.objective) {
            (Some(prev), Some(now)) if (now - prev).abs() < self.objective_change_tolerance => {
                SolveRes::ResolvedAndUnchanged
            }
            _ => SolveRes::ResolvedAndChanged,
        })
    }

    pub fn change_var_bounds(&mut self, v: usize, lower: f64, upper: f64) {
        self.vars[v].lower = lower;
        self.vars[v].upper = upper;
        self.backend.change_col_bounds(v, lower, upper);
        self.dirty = true;
    }

    /// Adds `cut` as a new constraint row. No-op on an empty cut.
    pub fn add_row(&mut self, cut: &GraphCut) {
        if cut.is_empty() {
            return;
        }
        let coeffs: Vec<f64> = cut.values.iter().map(|&v| v as f64).collect();
        self.backend.add_row(cut.rhs(), f64::INFINITY, &cut.indices, &coeffs);

        let mut constraint = Constraint::new(self.constraints.len(), cut.rhs(), f64::INFINITY);
        for (&idx, &coeff) in cut.indices.iter().zip(&coeffs) {
            constraint.add_term(idx, coeff);
        }
        self.constraints.push(constraint);
        self.dirty = true;
    }

    /// Removes the row most recently added by [`Self::add_row`]. Used by
    /// cut validation to undo its own scratch row, and by the solver to
    /// restore a node's LP after a rejected cut.
    pub fn delete_last_row(&mut self) {
        let Some(idx) = self.constraints.len().checked_sub(1) else { return };
        self.backend.delete_rows(&[idx]);
        self.constraints.pop();
        self.dirty = true;
    }

    /// Temporarily fixes every variable in `cut` to the value that would
    /// violate it, re-solves, and accepts the cut only if that forced
    /// assignment is infeasible. Bounds are restored either way.
    pub fn validate_cut(&mut self, cut: &GraphCut) -> bool {
        if cut.is_empty() {
            return true;
        }

        let saved: Vec<(f64, f64)> = cut.indices.iter().map(|&i| (self.vars[i].lower, self.vars[i].upper)).collect();
        for (&idx, &value) in cut.indices.iter().zip(&cut.values) {
            let forced = if value > 0 { 0.0 } else { 1.0 };
            self.vars[idx].lower = forced;
            self.vars[idx].upper = forced;
            self.backend.change_col_bounds(idx, forced, forced);
        }

        let ran = self.backend.run().is_ok();
        let forced_infeasible = ran && self.backend.get_model_status() == SolutionStatus::Infeasible;

        for (&idx, &(lower, upper)) in cut.indices.iter().zip(&saved) {
            self.vars[idx].lower = lower;
            self.vars[idx].upper = upper;
            self.backend.change_col_bounds(idx, lower, upper);
        }
        self.dirty = true;

        forced_infeasible
    }

    /// Deep-clones variables, constraints and the conflict graph, and
    /// copies the solver's basis so the child LP warm-starts from the
    /// parent's. Every reference in the clone has been remapped by index —
    /// in practice a no-op, since indices rather than pointers are the only
    /// form of reference this crate's model types ever hold.
    pub fn copy(&self) -> LpModel {
        let mut backend = self.backend.new_like();
        backend.pass_model(&self.backend.get_model());
        backend.set_basis(self.backend.get_basis());

        LpModel {
            vars: self.vars.clone(),
            constraints: self.constraints.clone(),
            graph: self.graph.clone(),
            solution: self.solution.clone(),
            backend,
            dirty: self.dirty,
            propagator: self.propagator,
            presolve_enabled: self.presolve_enabled,
            objective_change_tolerance: self.objective_change_tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::EnumBackend;
    use crate::model::Bound;

    fn two_var_instance() -> ParsedInstance {
        // min x + y  s.t.  x + y >= 2, x,y in [0,5] binary-free continuous
        let mut c = Constraint::new(0, 2.0, f64::INFINITY);
        c.add_term(0, 1.0);
        c.add_term(1, 1.0);
        let mut x = Variable::new(0, "x", 0.0, 5.0, false);
        x.incident_constraints.push(0);
        let mut y = Variable::new(1, "y", 0.0, 5.0, false);
        y.incident_constraints.push(0);
        ParsedInstance { variables: vec![x, y], constraints: vec![c], objective: vec![1.0, 1.0] }
    }

    fn model_with(config: &SolverConfig) -> LpModel {
        LpModel::from_parsed(two_var_instance(), Box::new(EnumBackend::new()), config)
    }

    #[test]
    fn first_solve_is_resolved_and_changed() {
        let mut m = model_with(&SolverConfig::default());
        let res = m.solve(None).unwrap();
        assert_eq!(res, SolveRes::ResolvedAndChanged);
        assert!((m.solution.objective.unwrap() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn clean_resolve_without_branching_is_a_no_op() {
        let mut m = model_with(&SolverConfig::default());
        m.solve(None).unwrap();
        assert_eq!(m.solve(None).unwrap(), SolveRes::NoChange);
    }

    #[test]
    fn tightening_a_bound_marks_dirty_and_moves_the_objective() {
        let mut m = model_with(&SolverConfig::default());
        m.solve(None).unwrap();
        m.change_var_bounds(0, 3.0, 3.0);
        let res = m.solve(None).unwrap();
        assert_eq!(res, SolveRes::ResolvedAndChanged);
        assert!((m.solution.objective.unwrap() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn copy_isolates_bound_changes_between_clones() {
        let mut m = model_with(&SolverConfig::default());
        m.solve(None).unwrap();
        let mut left = m.copy();
        let mut right = m.copy();
        left.change_var_bounds(0, 3.0, 3.0);
        left.solve(None).unwrap();
        right.solve(None).unwrap();
        assert!((right.solution.objective.unwrap() - 2.0).abs() < 1e-6);
        assert_eq!(right.vars[0].bound(), Bound::new(0.0, 5.0));
    }

    #[test]
    fn add_row_then_delete_last_row_restores_the_objective() {
        let mut m = model_with(&SolverConfig::default());
        m.solve(None).unwrap();
        let cut = GraphCut { indices: vec![0], values: vec![1], num_negative: 0, is_trivial: true };
        m.add_row(&cut); // x >= 1, non-binding here
        let with_cut = m.solve(None).unwrap();
        assert_eq!(with_cut, SolveRes::ResolvedAndUnchanged);
        m.delete_last_row();
        let restored = m.solve(None).unwrap();
        assert_eq!(restored, SolveRes::ResolvedAndUnchanged);
        assert!((m.solution.objective.unwrap() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn validate_cut_accepts_a_cut_whose_violation_is_infeasible() {
        let mut m = model_with(&SolverConfig::default());
        m.solve(None).unwrap();
        // x + y >= 2 forbids x = 0 AND y = 0 simultaneously when the box is
        // [0,5]x[0,5] only if both are fixed to 0 (forcing sum 0 < 2).
        let cut = GraphCut { indices: vec![0, 1], values: vec![1, 1], num_negative: 0, is_trivial: false };
        assert!(m.validate_cut(&cut));
        // bounds are restored afterwards
        assert_eq!(m.vars[0].bound(), Bound::new(0.0, 5.0));
    }
}
