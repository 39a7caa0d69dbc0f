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

use crate::model::Variable;

/// The outcome of solving an LP relaxation, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    Optimal,
    Infeasible,
    Unbounded,
    Unknown,
}

/// A (possibly fractional) assignment returned by the LP backend, together
/// with the status that makes it meaningful to read at all.
#[derive(Debug, Clone)]
pub struct Solution {
    pub objective: Option<f64>,
    pub assignment: Vec<f64>,
    pub status: SolutionStatus,
}

impl Solution {
    pub fn unknown() -> Self {
        Solution { objective: None, assignment: Vec::new(), status: SolutionStatus::Unknown }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolutionStatus::Optimal
    }

    pub fn is_infeasible(&self) -> bool {
        self.status == SolutionStatus::Infeasible
    }

    /// True iff the LP is optimal and every integer variable's value is
    /// integral within `primal_tolerance`.
    pub fn is_primal(&self, vars: &[Variable], primal_tolerance: f64) -> bool {
        if !self.is_optimal() {
            return false;
        }
        vars.iter().all(|v| {
            if !v.is_integer {
                return true;
            }
            let val = self.assignment[v.index];
            (val - val.round()).abs() <= primal_tolerance
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infeasible_is_never_primal() {
        let s = Solution { objective: None, assignment: vec![], status: SolutionStatus::Infeasible };
        assert!(!s.is_primal(&[], 1e-9));
    }

    #[test]
    fn fractional_integer_var_fails_primal_check() {
        let vars = vec![Variable::new(0, "x", 0.0, 1.0, true)];
        let s = Solution { objective: Some(0.5), assignment: vec![0.5], status: SolutionStatus::Optimal };
        assert!(!s.is_primal(&vars, 1e-9));
    }

    #[test]
    fn integral_assignment_is_primal() {
        let vars = vec![Variable::new(0, "x", 0.0, 1.0, true), Variable::new(1, "y", 0.0, 5.0, false)];
        let s = Solution { objective: Some(1.0), assignment: vec![1.0, 2.5], status: SolutionStatus::Optimal };
        assert!(s.is_primal(&vars, 1e-9));
    }
}
