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

use log::{debug, info};

use crate::config::SolverConfig;
use crate::cuts::{CuttingMode, FuipExtractor, GraphCut};
use crate::error::Result;
use crate::lp::LpModel;
use crate::search::node::{sort_nodes, Branchability, Node};
use crate::state::{MipState, State};

/// Drives the branch-and-bound search over a LIFO stack of open nodes,
/// deriving and broadcasting FUIP cuts from nodes that close without
/// yielding an integer-feasible solution.
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Solver { config }
    }

    /// Runs the search to completion, consuming `root` (already
    /// constructed, not yet solved). A second copy of the root LP is kept
    /// aside, read-only except during cut validation, for the lifetime of
    /// the run.
    pub fn run(&self, mut root: LpModel) -> Result<MipState> {
        let fuip = FuipExtractor::new(self.config.fuip_size);
        let mut state = MipState::new(self.config.convergence_tolerance);

        root.solve(None)?;
        state.relaxation_count += 1;
        if root.solution.is_infeasible() {
            state.mark_infeasible();
            return Ok(state);
        }

        if !self.config.solver_enabled {
            if root.solution.is_primal(&root.vars, self.config.primal_tolerance) {
                state.update_primal(root.solution.objective.unwrap(), &root.solution.assignment);
            }
            state.update_dual(root.solution.objective.unwrap_or(f64::NEG_INFINITY));
            return Ok(state);
        }

        let mut root_for_validation = root.copy();

        let mut stack: Vec<Node> = Vec::new();
        let mut root_node = Node::new(root);
        root_node.classify(&self.config, state.primal);
        state.branchability.record(root_node.branchability);
        self.handle_leaf_or_push(root_node, &mut stack, &mut state, &mut root_for_validation, &fuip);

        while let Some(mut node) = stack.pop() {
            let res = node.lp.solve(None)?;
            if res != crate::lp::SolveRes::NoChange {
                state.resolved_node_count += 1;
            }
            if res == crate::lp::SolveRes::ResolvedAndChanged {
                state.objective_change_count += 1;
            }
            node.classify(&self.config, state.primal);
            state.branchability.record(node.branchability);

            match node.branchability {
                Branchability::Branchable => {
                    self.branch(node, &mut stack, &mut state, &mut root_for_validation, &fuip)?
                }
                _ => self.handle_leaf(node, &mut stack, &mut state, &mut root_for_validation, &fuip),
            }

            let frontier_min =
                stack.iter().filter_map(|n| n.lp.solution.objective).fold(f64::INFINITY, f64::min);
            if frontier_min.is_finite() {
                state.update_dual(frontier_min);
            }
            if !self.config.silent {
                debug!("stack_size={} {}", stack.len(), state);
            }
            if state.state != State::InSolving {
                break;
            }
        }

        if state.state == State::InSolving {
            if state.primal.is_some() {
                state.dual = state.primal;
                state.state = State::Converged;
            } else {
                state.mark_infeasible();
            }
        }
        if !self.config.silent {
            info!("search finished: {}", state);
        }

        Ok(state)
    }

    /// A freshly produced node (root or a branch child) that hasn't yet
    /// been pushed anywhere: branchable nodes go on the stack, everything
    /// else is handled immediately (primal update or cut derivation).
    fn handle_leaf_or_push(
        &self,
        node: Node,
        stack: &mut Vec<Node>,
        state: &mut MipState,
        root_for_validation: &mut LpModel,
        fuip: &FuipExtractor,
    ) {
        if node.branchability == Branchability::Branchable {
            stack.push(node);
        } else {
            self.handle_leaf(node, stack, state, root_for_validation, fuip);
        }
    }

    fn branch(
        &self,
        node: Node,
        stack: &mut Vec<Node>,
        state: &mut MipState,
        root_for_validation: &mut LpModel,
        fuip: &FuipExtractor,
    ) -> Result<()> {
        let Some(var) = node.branching_variable(self.config.primal_tolerance) else {
            // No fractional integer variable despite Branchable classification
            // (shouldn't happen given `classify`, but fail safe by dropping).
            return Ok(());
        };
        let (left_bounds, right_bounds) = node.branch_bounds(var, self.config.primal_tolerance);

        let mut left_lp = node.lp.copy();
        left_lp.change_var_bounds(var, left_bounds.0, left_bounds.1);
        left_lp.solve(Some(var))?;
        let mut left = Node::new(left_lp);
        left.classify(&self.config, state.primal);

        let mut right_lp = node.lp.copy();
        right_lp.change_var_bounds(var, right_bounds.0, right_bounds.1);
        right_lp.solve(Some(var))?;
        let mut right = Node::new(right_lp);
        right.classify(&self.config, state.primal);

        state.branch_count += 1;
        state.relaxation_count += 2;
        state.branchability.record(left.branchability);
        state.branchability.record(right.branchability);

        let (push_first, push_second) = sort_nodes(left, right);
        for child in [push_first, push_second] {
            self.handle_leaf_or_push(child, stack, state, root_for_validation, fuip);
        }
        Ok(())
    }

    fn handle_leaf(
        &self,
        node: Node,
        stack: &mut [Node],
        state: &mut MipState,
        root_for_validation: &mut LpModel,
        fuip: &FuipExtractor,
    ) {
        match node.branchability {
            Branchability::IntFeasible => {
                state.update_primal(node.lp.solution.objective.unwrap(), &node.lp.solution.assignment);
            }
            Branchability::Infeasible => self.derive_and_broadcast_cut(&node, stack, state, root_for_validation, fuip),
            Branchability::Dropped if self.config.use_dropped => {
                self.derive_and_broadcast_cut(&node, stack, state, root_for_validation, fuip)
            }
            Branchability::Dropped | Branchability::Unknown | Branchability::Branchable => {}
        }
    }

    fn derive_and_broadcast_cut(
        &self,
        node: &Node,
        stack: &mut [Node],
        state: &mut MipState,
        root_for_validation: &mut LpModel,
        fuip: &FuipExtractor,
    ) {
        let Some(cut) = fuip.extract_with(&node.lp.graph, self.config.cutting_mode) else { return };
        if !self.accept_cut(&cut, root_for_validation) {
            return;
        }
        state.cut_count += 1;
        if !cut.is_trivial {
            state.non_trivial_cut_count += 1;
        }
        for other in stack.iter_mut() {
            other.lp.add_row(&cut);
        }
    }

    fn accept_cut(&self, cut: &GraphCut, root_for_validation: &mut LpModel) -> bool {
        if cut.is_empty() || self.config.cutting_mode == CuttingMode::None {
            return false;
        }
        if cut.is_trivial && !self.config.trivial_graph_cut {
            return false;
        }
        if !self.config.cutting_check {
            return true;
        }
        let accepted = root_for_validation.validate_cut(cut);
        if !accepted {
            debug!("cut rejected by validation: indices={:?}", cut.indices);
        }
        accepted
    }
}
