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

/// A closed interval `[lower, upper]` a variable or row is allowed to take.
/// Either end may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub lower: f64,
    pub upper: f64,
}

impl Default for Bound {
    /// The empty bound `[0, 0]` is not a meaningful default for solving —
    /// only used as a placeholder when a graph node lookup fails.
    fn default() -> Self {
        Bound::new(0.0, 0.0)
    }
}

impl Bound {
    pub fn new(lower: f64, upper: f64) -> Self {
        Bound { lower, upper }
    }

    pub fn free() -> Self {
        Bound::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// A bound is fixed once its width has collapsed to within `tolerance`.
    pub fn is_fixed(&self, tolerance: f64) -> bool {
        self.upper - self.lower <= tolerance
    }

    /// The midpoint of the bound; only meaningful when both ends are finite.
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.lower > self.upper
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_bound_within_tolerance() {
        let b = Bound::new(1.0, 1.0 + 1e-7);
        assert!(b.is_fixed(1e-6));
        assert!(!b.is_fixed(1e-8));
    }

    #[test]
    fn empty_bound_is_detected() {
        assert!(Bound::new(2.0, 1.0).is_empty());
        assert!(!Bound::new(1.0, 2.0).is_empty());
    }
}
