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

use std::cmp::Ordering;

use crate::config::SolverConfig;
use crate::lp::LpModel;
use crate::model::SolutionStatus;

/// How a node classifies after propagation and its LP relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branchability {
    Branchable,
    IntFeasible,
    Infeasible,
    Dropped,
    Unknown,
}

/// One search-tree node: an owned LP relaxation plus its classification.
pub struct Node {
    pub lp: LpModel,
    pub branchability: Branchability,
}

impl Node {
    pub fn new(lp: LpModel) -> Self {
        Node { lp, branchability: Branchability::Unknown }
    }

    /// Classifies the node from its current (already solved) LP relaxation
    /// against the incumbent primal bound.
    pub fn classify(&mut self, config: &SolverConfig, incumbent: Option<f64>) {
        self.branchability = match self.lp.solution.status {
            SolutionStatus::Infeasible => Branchability::Infeasible,
            SolutionStatus::Optimal => {
                if self.lp.solution.is_primal(&self.lp.vars, config.primal_tolerance) {
                    Branchability::IntFeasible
                } else if could_improve(self.lp.solution.objective, incumbent, config.convergence_tolerance) {
                    Branchability::Branchable
                } else {
                    Branchability::Dropped
                }
            }
            SolutionStatus::Unbounded | SolutionStatus::Unknown => Branchability::Unknown,
        };
    }

    /// The most-fractional integer variable still open (closest to 0.5),
    /// or `None` if no integer variable has a fractional relaxation value.
    pub fn branching_variable(&self, primal_tolerance: f64) -> Option<usize> {
        self.lp
            .vars
            .iter()
            .filter(|v| v.is_integer && !v.is_fixed(primal_tolerance))
            .filter_map(|v| {
                let val = *self.lp.solution.assignment.get(v.index)?;
                let frac = val - val.floor();
                (frac > primal_tolerance && frac < 1.0 - primal_tolerance).then_some((v.index, frac))
            })
            .min_by(|(_, a), (_, b)| (a - 0.5).abs().total_cmp(&(b - 0.5).abs()))
            .map(|(idx, _)| idx)
    }

    /// Splits `var`'s domain into `(left_bounds, right_bounds)` per the
    /// three cases of the branching rule: boundary-at-lower (the relaxation
    /// value already sits at the lower bound, within `primal_tolerance`),
    /// boundary-at-upper (symmetric), and the general floor/ceil split
    /// (preferring a midpoint split when the remaining domain is wide).
    /// The two boundary cases are genuine ties — val equal to an endpoint —
    /// not "close to" one; a fractional value merely near an endpoint (e.g.
    /// 0.5 in a binary domain) falls through to the general case.
    pub fn branch_bounds(&self, var: usize, primal_tolerance: f64) -> ((f64, f64), (f64, f64)) {
        let v = &self.lp.vars[var];
        let val = self.lp.solution.assignment[var];
        let (lower, upper) = (v.lower, v.upper);
        let both_finite = lower.is_finite() && upper.is_finite();

        if both_finite && (val - lower).abs() <= primal_tolerance {
            let bound = ((lower + upper) / 2.0).floor();
            return ((lower + 1.0, bound), (bound + 1.0, upper));
        }
        if both_finite && (val - upper).abs() <= primal_tolerance {
            let bound = ((lower + upper) / 2.0).floor() - 1.0;
            return ((lower, bound), (bound + 1.0, upper - 1.0));
        }

        let bound = if both_finite && (upper - lower) > 10.0 {
            ((lower + upper) / 2.0).floor()
        } else {
            val.floor()
        };
        ((lower, bound), (bound + 1.0, upper))
    }
}

fn could_improve(node_objective: Option<f64>, incumbent: Option<f64>, tolerance: f64) -> bool {
    match (incumbent, node_objective) {
        (None, _) => true,
        (_, None) => false,
        (Some(primal), Some(node)) => {
            (primal - node) / primal.abs().max(node.abs()).max(1.0) > tolerance
        }
    }
}

fn rank(b: Branchability) -> u8 {
    match b {
        Branchability::IntFeasible => 0,
        Branchability::Branchable => 1,
        Branchability::Infeasible => 2,
        Branchability::Dropped => 3,
        Branchability::Unknown => 4,
    }
}

/// Orders two siblings for the LIFO stack: returns `(push_first,
/// push_second)` so that `push_second` — the more promising of the two —
/// is popped next. "More promising" ranks `IntFeasible` over `Branchable`
/// over `Infeasible` over `Dropped` over `Unknown`; two `Branchable`
/// siblings are tie-broken by lower LP objective.
///
/// The original source carries a `sort_nodes` function whose body is a
/// bare `return left_node, right_node` followed by unreachable code — a
/// dead, inconsistent alternative. This implements the ordering described
/// in prose instead of that dead code.
pub fn sort_nodes(left: Node, right: Node) -> (Node, Node) {
    let left_more_promising = match rank(left.branchability).cmp(&rank(right.branchability)) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => {
            let lo = left.lp.solution.objective.unwrap_or(f64::INFINITY);
            let ro = right.lp.solution.objective.unwrap_or(f64::INFINITY);
            lo <= ro
        }
    };
    if left_more_promising {
        (right, left)
    } else {
        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::EnumBackend;
    use crate::model::{Constraint, ParsedInstance, Variable};

    fn binary_instance() -> ParsedInstance {
        let mut c = Constraint::new(0, 2.0, 2.0);
        c.add_term(0, 1.0);
        c.add_term(1, 1.0);
        c.add_term(2, 1.0);
        let vars = (0..3).map(|i| Variable::new(i, format!("x{i}"), 0.0, 1.0, true)).collect();
        ParsedInstance { variables: vars, constraints: vec![c], objective: vec![1.0, 1.0, 1.0] }
    }

    fn node_for(config: &SolverConfig) -> Node {
        let lp = LpModel::from_parsed(binary_instance(), Box::new(EnumBackend::new()), config);
        Node::new(lp)
    }

    #[test]
    fn int_feasible_outranks_branchable_in_sort_nodes() {
        let config = SolverConfig::default();
        let mut int_feasible = node_for(&config);
        int_feasible.branchability = Branchability::IntFeasible;
        let mut branchable = node_for(&config);
        branchable.branchability = Branchability::Branchable;

        let (first, second) = sort_nodes(branchable, int_feasible);
        assert_eq!(second.branchability, Branchability::IntFeasible);
        assert_eq!(first.branchability, Branchability::Branchable);
    }

    #[test]
    fn classify_marks_integral_solution_as_int_feasible() {
        let config = SolverConfig::default();
        let mut node = node_for(&config);
        node.lp.solve(None).unwrap();
        node.classify(&config, None);
        assert_eq!(node.branchability, Branchability::IntFeasible);
    }

    #[test]
    fn a_binary_variable_fractional_at_one_half_splits_on_floor_not_the_boundary_rule() {
        let config = SolverConfig::default();
        let mut node = node_for(&config);
        node.lp.solution.assignment = vec![0.5, 0.5, 1.0];
        let (left, right) = node.branch_bounds(0, config.primal_tolerance);
        assert_eq!(left, (0.0, 0.0));
        assert_eq!(right, (1.0, 1.0));
    }

    #[test]
    fn a_value_sitting_exactly_on_the_lower_bound_takes_the_boundary_split() {
        let config = SolverConfig::default();
        let mut node = node_for(&config);
        node.lp.vars[0].lower = 0.0;
        node.lp.vars[0].upper = 10.0;
        node.lp.solution.assignment = vec![0.0, 0.0, 0.0];
        let (left, right) = node.branch_bounds(0, config.primal_tolerance);
        assert_eq!(left, (1.0, 5.0));
        assert_eq!(right, (6.0, 10.0));
    }
}
