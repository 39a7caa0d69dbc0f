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

//! Bound-tightening ("presolve") by row-activity propagation.

use log::trace;

use crate::model::{Bound, Constraint, Variable};

/// Where propagation records what it did. Implemented directly by
/// [`crate::graph::ImplicationGraph`]; the propagator never constructs a
/// graph node itself.
pub trait PropagationObserver {
    fn bound_tightened(&mut self, var: usize, row_vars: &[usize], new_bound: Bound);
    fn next_iteration(&mut self);
}

/// A no-op observer for callers that only want tightened bounds, with no
/// conflict-graph bookkeeping (e.g. cut validation's scratch re-solve).
#[derive(Debug, Default)]
pub struct NullObserver;

impl PropagationObserver for NullObserver {
    fn bound_tightened(&mut self, _var: usize, _row_vars: &[usize], _new_bound: Bound) {}
    fn next_iteration(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationOutcome {
    Unchanged,
    Tightened,
    Infeasible,
}

/// Repeatedly tightens variable bounds from row activity until a sweep
/// produces no change, or `max_sweeps` is reached.
#[derive(Debug, Clone, Copy)]
pub struct Propagator {
    pub max_sweeps: usize,
}

impl Propagator {
    pub fn new(max_sweeps: usize) -> Self {
        Propagator { max_sweeps }
    }

    pub fn propagate(
        &self,
        vars: &mut [Variable],
        constraints: &mut [Constraint],
        observer: &mut dyn PropagationObserver,
    ) -> PropagationOutcome {
        let mut any_applied = false;

        for sweep in 0..self.max_sweeps {
            let mut changed_this_sweep = false;

            for constraint in constraints.iter_mut() {
                let row_vars: Vec<usize> = constraint.vars().collect();
                let mut pending: Vec<(usize, Bound)> = Vec::new();

                for &j in &row_vars {
                    let coeff = constraint.coeffs[&j];
                    let (min_wo, max_wo) = constraint.activity(vars, Some(j));
                    let (raw_lower, raw_upper) = if coeff > 0.0 {
                        ((constraint.lower - max_wo) / coeff, (constraint.upper - min_wo) / coeff)
                    } else {
                        ((constraint.upper - min_wo) / coeff, (constraint.lower - max_wo) / coeff)
                    };

                    if let Some(tightened) = vars[j].tighter_bound(raw_lower, raw_upper) {
                        if tightened.is_empty() {
                            trace!("propagation infeasible: var {j} tightened to empty bound by row {}", constraint.index);
                            return PropagationOutcome::Infeasible;
                        }
                        pending.push((j, tightened));
                    }
                }

                if pending.is_empty() {
                    continue;
                }

                changed_this_sweep = true;
                any_applied = true;
                for (j, bound) in pending {
                    vars[j].lower = bound.lower;
                    vars[j].upper = bound.upper;
                    observer.bound_tightened(j, &row_vars, bound);
                }
                constraint.tighten_by_activity(vars);
            }

            observer.next_iteration();

            if !changed_this_sweep {
                break;
            }
            if sweep + 1 == self.max_sweeps {
                trace!("propagator hit max_sweeps ({}) without reaching fixpoint", self.max_sweeps);
            }
        }

        if any_applied {
            PropagationOutcome::Tightened
        } else {
            PropagationOutcome::Unchanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tightens_a_single_binding_row() {
        let mut vars = vec![
            Variable::new(0, "x0", 0.0, 10.0, false),
            Variable::new(1, "x1", 0.0, 10.0, false),
        ];
        let mut c = Constraint::new(0, 5.0, 5.0);
        c.add_term(0, 1.0);
        c.add_term(1, 1.0);
        vars[1].lower = 8.0; // forces x0 <= -3 .. but let's use a feasible tightening instead
        vars[1].lower = 0.0;
        vars[1].upper = 2.0; // x0 in [3,10] n [0,10] -> x0 >= 3
        let mut constraints = vec![c];
        let mut obs = NullObserver;
        let outcome = Propagator::new(10).propagate(&mut vars, &mut constraints, &mut obs);
        assert_eq!(outcome, PropagationOutcome::Tightened);
        assert_eq!(vars[0].lower, 3.0);
    }

    #[test]
    fn detects_infeasible_row() {
        let mut vars = vec![
            Variable::new(0, "x0", 5.0, 10.0, false),
            Variable::new(1, "x1", 5.0, 10.0, false),
        ];
        let mut c = Constraint::new(0, 0.0, 1.0);
        c.add_term(0, 1.0);
        c.add_term(1, 1.0);
        let mut constraints = vec![c];
        let mut obs = NullObserver;
        let outcome = Propagator::new(10).propagate(&mut vars, &mut constraints, &mut obs);
        assert_eq!(outcome, PropagationOutcome::Infeasible);
    }

    #[test]
    fn fixpoint_is_idempotent() {
        let mut vars = vec![
            Variable::new(0, "x0", 0.0, 10.0, true),
            Variable::new(1, "x1", 0.0, 2.0, true),
        ];
        let mut c = Constraint::new(0, 5.0, 5.0);
        c.add_term(0, 1.0);
        c.add_term(1, 1.0);
        let mut constraints = vec![c];
        let mut obs = NullObserver;
        let p = Propagator::new(10);
        p.propagate(&mut vars, &mut constraints, &mut obs);
        let snapshot: Vec<(f64, f64)> = vars.iter().map(|v| (v.lower, v.upper)).collect();
        let outcome = p.propagate(&mut vars, &mut constraints, &mut obs);
        assert_eq!(outcome, PropagationOutcome::Unchanged);
        let snapshot2: Vec<(f64, f64)> = vars.iter().map(|v| (v.lower, v.upper)).collect();
        assert_eq!(snapshot, snapshot2);
    }
}
