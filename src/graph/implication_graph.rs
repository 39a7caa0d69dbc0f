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

use fxhash::{FxHashMap, FxHashSet};

use crate::graph::node::{GraphNode, GraphNodeId};
use crate::model::Bound;
use crate::propagate::PropagationObserver;

/// A DAG recording propagation history across branching depth and
/// propagation iteration, so that an infeasible node's cause can be
/// traced back to the branching decisions that forced it.
///
/// Every reference inside this graph is a plain `usize` variable index,
/// never a pointer into another LPModel's variable set — so `Clone` is a
/// correct, complete deep copy with no remapping step required.
#[derive(Debug, Clone)]
pub struct ImplicationGraph {
    current_depth: usize,
    current_iteration: usize,
    nodes: FxHashMap<GraphNodeId, GraphNode>,
    last_node_for_var: FxHashMap<usize, GraphNodeId>,
    drains: Vec<FxHashSet<GraphNodeId>>,
    origins: Vec<GraphNodeId>,
}

impl ImplicationGraph {
    pub fn new() -> Self {
        ImplicationGraph {
            current_depth: 0,
            current_iteration: 0,
            nodes: FxHashMap::default(),
            last_node_for_var: FxHashMap::default(),
            drains: vec![FxHashSet::default()],
            origins: Vec::new(),
        }
    }

    pub fn current_depth(&self) -> usize {
        self.current_depth
    }

    pub fn current_iteration(&self) -> usize {
        self.current_iteration
    }

    pub fn node(&self, id: &GraphNodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    pub fn drains_at(&self, depth: usize) -> impl Iterator<Item = &GraphNodeId> {
        self.drains.get(depth).into_iter().flatten()
    }

    pub fn origins(&self) -> &[GraphNodeId] {
        &self.origins
    }

    /// Opens a new branching depth: the branching variable itself becomes
    /// the depth's origin node at iteration 0, then the iteration counter
    /// advances to 1 so that propagation events recorded by the following
    /// sweeps do not collide with the origin.
    pub fn new_depth(&mut self, branching_var: usize, bound: Bound) -> GraphNodeId {
        self.current_depth += 1;
        self.current_iteration = 0;
        self.drains.push(FxHashSet::default());

        let id = GraphNodeId { depth: self.current_depth, iteration: 0, var: branching_var };
        self.nodes.insert(id, GraphNode::new(id, bound));
        self.drains[self.current_depth].insert(id);
        self.last_node_for_var.insert(branching_var, id);
        self.origins.push(id);

        self.current_iteration = 1;
        id
    }

    pub fn next_iteration(&mut self) {
        self.current_iteration += 1;
    }

    /// Records that `var`'s bound was tightened by row `row_vars`, wiring
    /// a causal edge from each other row variable's most recent node to
    /// the new one.
    pub fn add_connection(&mut self, var: usize, row_vars: &[usize], bound: Bound) -> GraphNodeId {
        let id = GraphNodeId { depth: self.current_depth, iteration: self.current_iteration, var };
        self.nodes.insert(id, GraphNode::new(id, bound));

        for &w in row_vars {
            if w == var {
                continue;
            }
            if let Some(&cause_id) = self.last_node_for_var.get(&w) {
                if let Some(cause) = self.nodes.get_mut(&cause_id) {
                    cause.out_edges.push(id);
                }
                self.drains[cause_id.depth].remove(&cause_id);
                if let Some(effect) = self.nodes.get_mut(&id) {
                    effect.in_edges.push(cause_id);
                }
            }
        }

        self.drains[self.current_depth].insert(id);
        self.last_node_for_var.insert(var, id);
        id
    }
}

impl Default for ImplicationGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PropagationObserver for ImplicationGraph {
    fn bound_tightened(&mut self, var: usize, row_vars: &[usize], new_bound: Bound) {
        self.add_connection(var, row_vars, new_bound);
    }

    fn next_iteration(&mut self) {
        ImplicationGraph::next_iteration(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_depth_creates_an_origin_drain() {
        let mut g = ImplicationGraph::new();
        let origin = g.new_depth(0, Bound::new(1.0, 1.0));
        assert_eq!(g.current_depth(), 1);
        assert_eq!(g.current_iteration(), 1);
        assert_eq!(g.origins(), &[origin]);
        assert!(g.drains_at(1).any(|&id| id == origin));
    }

    #[test]
    fn add_connection_wires_cause_to_effect_and_updates_drains() {
        let mut g = ImplicationGraph::new();
        let origin = g.new_depth(0, Bound::new(1.0, 1.0));
        let effect = g.add_connection(1, &[0, 1], Bound::new(0.0, 0.0));

        assert!(g.node(&origin).unwrap().out_edges.contains(&effect));
        assert!(g.node(&effect).unwrap().in_edges.contains(&origin));
        assert!(!g.drains_at(1).any(|&id| id == origin));
        assert!(g.drains_at(1).any(|&id| id == effect));
    }

    #[test]
    fn clone_is_a_complete_independent_copy() {
        let mut g = ImplicationGraph::new();
        g.new_depth(0, Bound::new(1.0, 1.0));
        let mut copy = g.clone();
        copy.add_connection(1, &[0, 1], Bound::new(0.0, 0.0));
        assert_eq!(g.drains_at(1).count(), 1);
        assert_eq!(copy.drains_at(1).count(), 1);
    }
}
