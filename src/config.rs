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

use crate::cuts::CuttingMode;

/// Every knob the search loop consults, gathered in one place so
/// [`crate::cli::CliArgs`] has a single conversion target and tests can
/// build a config without going through argument parsing.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub solver_enabled: bool,
    pub presolve_enabled: bool,
    pub cutting_mode: CuttingMode,
    pub cutting_check: bool,
    pub trivial_graph_cut: bool,
    pub use_dropped: bool,
    pub silent: bool,
    pub fuip_size: usize,

    pub max_sweeps: usize,
    pub primal_tolerance: f64,
    pub convergence_tolerance: f64,
    pub objective_change_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            solver_enabled: true,
            presolve_enabled: true,
            cutting_mode: CuttingMode::Fuip,
            cutting_check: false,
            trivial_graph_cut: true,
            use_dropped: false,
            silent: true,
            fuip_size: 1,

            max_sweeps: 10,
            primal_tolerance: 1e-6,
            convergence_tolerance: 1e-4,
            objective_change_tolerance: 1e-4,
        }
    }
}
