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

/// A globally valid cut, encoding `sum(values[i] * x[indices[i]]) >= 1 - num_negative`.
#[derive(Debug, Clone, Default)]
pub struct GraphCut {
    pub indices: Vec<usize>,
    pub values: Vec<i8>,
    pub num_negative: usize,
    pub is_trivial: bool,
}

impl GraphCut {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The right-hand side of the cut's `>=` inequality.
    pub fn rhs(&self) -> f64 {
        1.0 - self.num_negative as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cut_is_empty() {
        assert!(GraphCut::default().is_empty());
    }

    #[test]
    fn rhs_accounts_for_negative_literals() {
        let cut = GraphCut { indices: vec![0, 1], values: vec![-1, -1], num_negative: 2, is_trivial: false };
        assert_eq!(cut.rhs(), -1.0);
    }
}
