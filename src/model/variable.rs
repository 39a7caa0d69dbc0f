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

use crate::model::Bound;

/// A decision variable of the MIP: its domain, its integrality flag, and
/// the rows it appears in.
///
/// Two variables are identity-equal iff their `index` match; variables are
/// never compared by name or bounds.
#[derive(Debug, Clone)]
pub struct Variable {
    pub index: usize,
    pub name: String,
    pub lower: f64,
    pub upper: f64,
    pub is_integer: bool,
    pub incident_constraints: Vec<usize>,
}

impl Variable {
    pub fn new(index: usize, name: impl Into<String>, lower: f64, upper: f64, is_integer: bool) -> Self {
        Variable {
            index,
            name: name.into(),
            lower,
            upper,
            is_integer,
            incident_constraints: Vec::new(),
        }
    }

    pub fn bound(&self) -> Bound {
        Bound::new(self.lower, self.upper)
    }

    /// A variable is fixed once its domain has collapsed within `tolerance`.
    pub fn is_fixed(&self, tolerance: f64) -> bool {
        self.bound().is_fixed(tolerance)
    }

    /// The collapsed value, if the domain is fixed; `None` otherwise.
    pub fn value(&self, tolerance: f64) -> Option<f64> {
        if !self.is_fixed(tolerance) {
            return None;
        }
        Some(if self.is_integer {
            self.lower
        } else {
            self.bound().midpoint()
        })
    }

    /// Tightens `[lower, upper]` towards `(new_lower, new_upper)`, rounding
    /// integer domains outward-in (ceil the lower end, floor the upper
    /// end) and leaving infinite endpoints unrounded. Returns the tightened
    /// bound iff at least one endpoint strictly improved; `self` is left
    /// untouched either way — the caller applies the update once it has
    /// decided to accept it (this mirrors the propagator's two-phase
    /// "compute pending updates, then apply" structure).
    pub fn tighter_bound(&self, new_lower: f64, new_upper: f64) -> Option<Bound> {
        let candidate_lower = if self.is_integer && new_lower.is_finite() {
            new_lower.ceil()
        } else {
            new_lower
        };
        let candidate_upper = if self.is_integer && new_upper.is_finite() {
            new_upper.floor()
        } else {
            new_upper
        };

        let lower = if candidate_lower > self.lower { candidate_lower } else { self.lower };
        let upper = if candidate_upper < self.upper { candidate_upper } else { self.upper };

        if lower == self.lower && upper == self.upper {
            None
        } else {
            Some(Bound::new(lower, upper))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_tightening_rounds_inward() {
        let v = Variable::new(0, "x", 0.0, 10.0, true);
        let tightened = v.tighter_bound(2.3, 7.8).unwrap();
        assert_eq!(tightened.lower, 3.0);
        assert_eq!(tightened.upper, 7.0);
    }

    #[test]
    fn continuous_tightening_does_not_round() {
        let v = Variable::new(0, "x", 0.0, 10.0, false);
        let tightened = v.tighter_bound(2.3, 7.8).unwrap();
        assert_eq!(tightened.lower, 2.3);
        assert_eq!(tightened.upper, 7.8);
    }

    #[test]
    fn infinite_endpoints_are_never_rounded() {
        let v = Variable::new(0, "x", f64::NEG_INFINITY, f64::INFINITY, true);
        let tightened = v.tighter_bound(f64::NEG_INFINITY, f64::INFINITY);
        assert!(tightened.is_none());
    }

    #[test]
    fn no_update_when_not_strictly_tighter() {
        let v = Variable::new(0, "x", 1.0, 5.0, false);
        assert!(v.tighter_bound(0.0, 6.0).is_none());
    }

    #[test]
    fn fixed_value_for_integer_is_the_lower_bound() {
        let v = Variable::new(0, "x", 3.0, 3.0, true);
        assert_eq!(v.value(1e-6), Some(3.0));
    }
}
