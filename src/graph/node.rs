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

/// Identifies a node by the triple the whole graph is keyed on: branching
/// depth, propagation iteration within that depth, and the variable whose
/// bound-tightening the node records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphNodeId {
    pub depth: usize,
    pub iteration: usize,
    pub var: usize,
}

/// One bound-tightening event. `out_edges` point at later nodes this one
/// caused; a node with no `out_edges` is a drain (current frontier).
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: GraphNodeId,
    pub bound: Bound,
    pub in_edges: Vec<GraphNodeId>,
    pub out_edges: Vec<GraphNodeId>,
}

impl GraphNode {
    pub fn new(id: GraphNodeId, bound: Bound) -> Self {
        GraphNode { id, bound, in_edges: Vec::new(), out_edges: Vec::new() }
    }

    pub fn is_drain(&self) -> bool {
        self.out_edges.is_empty()
    }
}
