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

//! The solver's running primal/dual bounds and termination state.

use std::fmt;

use fxhash::FxHashMap;

use crate::search::Branchability;

/// Where the overall search stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    InSolving,
    Converged,
    Infeasible,
}

/// Counts how many nodes have been classified into each [`Branchability`]
/// outcome over the run, for the CLI's closing report.
#[derive(Debug, Clone, Default)]
pub struct BranchabilityStatistic {
    counts: FxHashMap<Branchability, usize>,
}

impl BranchabilityStatistic {
    pub fn record(&mut self, outcome: Branchability) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    pub fn count(&self, outcome: Branchability) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }
}

impl fmt::Display for BranchabilityStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "branchable={} int_feasible={} infeasible={} dropped={} unknown={}",
            self.count(Branchability::Branchable),
            self.count(Branchability::IntFeasible),
            self.count(Branchability::Infeasible),
            self.count(Branchability::Dropped),
            self.count(Branchability::Unknown),
        )
    }
}

/// The search's bounds, best known assignment, and bookkeeping counters.
/// `primal` only ever improves (strictly); `dual` is always replaced by the
/// frontier's latest minimum, which is monotone nondecreasing by
/// construction.
#[derive(Debug, Clone)]
pub struct MipState {
    pub primal: Option<f64>,
    pub dual: Option<f64>,
    pub incumbent: Vec<f64>,
    pub state: State,
    pub convergence_tolerance: f64,

    pub branch_count: usize,
    pub relaxation_count: usize,
    pub cut_count: usize,
    pub non_trivial_cut_count: usize,
    pub resolved_node_count: usize,
    pub objective_change_count: usize,
    pub branchability: BranchabilityStatistic,
}

impl MipState {
    pub fn new(convergence_tolerance: f64) -> Self {
        MipState {
            primal: None,
            dual: None,
            incumbent: Vec::new(),
            state: State::InSolving,
            convergence_tolerance,
            branch_count: 0,
            relaxation_count: 0,
            cut_count: 0,
            non_trivial_cut_count: 0,
            resolved_node_count: 0,
            objective_change_count: 0,
            branchability: BranchabilityStatistic::default(),
        }
    }

    /// Accepts `candidate` as the new incumbent iff it strictly improves
    /// the current primal bound, then re-checks convergence.
    pub fn update_primal(&mut self, candidate: f64, assignment: &[f64]) {
        let improves = self.primal.map(|p| candidate < p).unwrap_or(true);
        if improves {
            self.primal = Some(candidate);
            self.incumbent = assignment.to_vec();
        }
        self.check_convergence();
    }

    /// Always adopts `frontier_min` as the new dual bound, then re-checks
    /// convergence.
    pub fn update_dual(&mut self, frontier_min: f64) {
        self.dual = Some(frontier_min);
        self.check_convergence();
    }

    fn check_convergence(&mut self) {
        if self.state != State::InSolving {
            return;
        }
        let (Some(primal), Some(dual)) = (self.primal, self.dual) else { return };
        let gap_closed = primal <= dual
            || (primal - dual).abs() / primal.abs().max(dual.abs()).max(1.0) < self.convergence_tolerance;
        if gap_closed {
            self.dual = Some(primal);
            self.state = State::Converged;
        }
    }

    pub fn mark_infeasible(&mut self) {
        self.state = State::Infeasible;
    }
}

impl fmt::Display for MipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 20;
        let preview: Vec<String> = self.incumbent.iter().take(PREVIEW).map(|v| format!("{v:.4}")).collect();
        let truncated = if self.incumbent.len() > PREVIEW { ", ..." } else { "" };
        writeln!(f, "MipState {{")?;
        writeln!(f, "  state: {:?}", self.state)?;
        writeln!(f, "  primal: {:?}", self.primal)?;
        writeln!(f, "  dual: {:?}", self.dual)?;
        writeln!(f, "  incumbent: [{}{}]", preview.join(", "), truncated)?;
        writeln!(
            f,
            "  branches: {}  relaxations: {}  cuts: {} (non_trivial: {})  resolved_nodes: {}  objective_changes: {}",
            self.branch_count,
            self.relaxation_count,
            self.cut_count,
            self.non_trivial_cut_count,
            self.resolved_node_count,
            self.objective_change_count
        )?;
        writeln!(f, "  {}", self.branchability)?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primal_only_accepts_strict_improvement() {
        let mut s = MipState::new(1e-4);
        s.update_primal(10.0, &[1.0]);
        s.update_primal(12.0, &[2.0]);
        assert_eq!(s.primal, Some(10.0));
        assert_eq!(s.incumbent, vec![1.0]);
    }

    #[test]
    fn converges_when_gap_closes() {
        let mut s = MipState::new(0.01);
        s.update_primal(10.0, &[]);
        s.update_dual(9.95);
        assert_eq!(s.state, State::Converged);
        assert_eq!(s.dual, Some(10.0));
    }

    #[test]
    fn stays_in_solving_with_an_open_gap() {
        let mut s = MipState::new(1e-6);
        s.update_primal(10.0, &[]);
        s.update_dual(5.0);
        assert_eq!(s.state, State::InSolving);
    }

    #[test]
    fn dual_crossing_primal_converges_even_without_tolerance() {
        let mut s = MipState::new(1e-9);
        s.update_primal(10.0, &[]);
        s.update_dual(10.0);
        assert_eq!(s.state, State::Converged);
    }
}
