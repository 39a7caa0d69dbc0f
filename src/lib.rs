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

//! A branch-and-bound solver for mixed-integer linear programs, with
//! presolve bound propagation and FUIP conflict-cut derivation from an
//! implication graph built up over the search.
//!
//! [`model`] holds the instance data, [`lp`] wraps the external LP
//! backend behind [`lp::LpBackend`], [`propagate`] and [`graph`] build the
//! implication graph during presolve, [`cuts`] turns a closed node's graph
//! into a cut, [`search`] drives the branch-and-bound loop, and
//! [`state`] tracks the running primal/dual bounds.

pub mod cli;
pub mod config;
pub mod cuts;
pub mod error;
pub mod graph;
pub mod lp;
pub mod model;
pub mod propagate;
pub mod search;
pub mod state;

pub use config::SolverConfig;
pub use error::{MipError, Result};
pub use search::Solver;
pub use state::MipState;
