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

use fxhash::FxHashMap;

use crate::model::Variable;

/// A linear row `lower <= sum(coeff * var) <= upper`.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub index: usize,
    pub lower: f64,
    pub upper: f64,
    pub coeffs: FxHashMap<usize, f64>,
}

impl Constraint {
    pub fn new(index: usize, lower: f64, upper: f64) -> Self {
        Constraint { index, lower, upper, coeffs: FxHashMap::default() }
    }

    pub fn add_term(&mut self, var: usize, coeff: f64) {
        self.coeffs.insert(var, coeff);
    }

    pub fn vars(&self) -> impl Iterator<Item = usize> + '_ {
        self.coeffs.keys().copied()
    }

    /// `(min_activity, max_activity)` of the row given the current bounds
    /// of `vars`, optionally excluding one variable's contribution.
    pub fn activity(&self, vars: &[Variable], without: Option<usize>) -> (f64, f64) {
        let mut min_act = 0.0;
        let mut max_act = 0.0;
        for (&idx, &coeff) in self.coeffs.iter() {
            if Some(idx) == without {
                continue;
            }
            let v = &vars[idx];
            let lo_term = coeff * v.lower;
            let hi_term = coeff * v.upper;
            if lo_term <= hi_term {
                min_act += lo_term;
                max_act += hi_term;
            } else {
                min_act += hi_term;
                max_act += lo_term;
            }
        }
        (min_act, max_act)
    }

    /// Re-tightens this row's own `[lower, upper]` from the activity
    /// implied by the current variable bounds (never widens).
    pub fn tighten_by_activity(&mut self, vars: &[Variable]) {
        let (min_act, max_act) = self.activity(vars, None);
        if min_act > self.lower {
            self.lower = min_act;
        }
        if max_act < self.upper {
            self.upper = max_act;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> Vec<Variable> {
        vec![
            Variable::new(0, "x0", 0.0, 5.0, false),
            Variable::new(1, "x1", -2.0, 3.0, false),
        ]
    }

    #[test]
    fn activity_with_positive_and_negative_coeffs() {
        let mut c = Constraint::new(0, 0.0, 10.0);
        c.add_term(0, 2.0);
        c.add_term(1, -1.0);
        let vars = vars();
        let (lo, hi) = c.activity(&vars, None);
        // x0 in [0,5] * 2 -> [0,10]; x1 in [-2,3] * -1 -> [-3,2]
        assert_eq!(lo, -3.0);
        assert_eq!(hi, 12.0);
    }

    #[test]
    fn activity_excludes_given_variable() {
        let mut c = Constraint::new(0, 0.0, 10.0);
        c.add_term(0, 2.0);
        c.add_term(1, -1.0);
        let vars = vars();
        let (lo, hi) = c.activity(&vars, Some(0));
        assert_eq!((lo, hi), (-3.0, 2.0));
    }

    #[test]
    fn tighten_by_activity_never_widens() {
        let mut c = Constraint::new(0, -100.0, 100.0);
        c.add_term(0, 1.0);
        c.add_term(1, 1.0);
        let vars = vars();
        c.tighten_by_activity(&vars);
        assert_eq!(c.lower, -2.0);
        assert_eq!(c.upper, 8.0);
    }
}
