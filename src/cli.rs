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

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::SolverConfig;
use crate::cuts::CuttingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    Enable,
    Disable,
}

impl Toggle {
    fn is_enabled(self) -> bool {
        self == Toggle::Enable
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CuttingArg {
    Root,
    Fuip,
    Disable,
}

impl From<CuttingArg> for CuttingMode {
    fn from(value: CuttingArg) -> Self {
        match value {
            CuttingArg::Root => CuttingMode::Root,
            CuttingArg::Fuip => CuttingMode::Fuip,
            CuttingArg::Disable => CuttingMode::None,
        }
    }
}

/// A branch-and-bound MIP solver with presolve propagation and FUIP
/// conflict cuts.
#[derive(Debug, Parser)]
#[command(name = "mipbb", rename_all = "kebab-case")]
pub struct CliArgs {
    /// Path to the MIP instance (free-format MPS).
    pub instance: PathBuf,

    #[arg(long, value_enum, default_value = "enable")]
    pub solver: Toggle,

    #[arg(long, value_enum, default_value = "enable")]
    pub presolve: Toggle,

    #[arg(long, value_enum, default_value = "fuip")]
    pub cutting: CuttingArg,

    #[arg(long, value_enum, default_value = "disable")]
    pub cutting_check: Toggle,

    #[arg(long, value_enum, default_value = "enable")]
    pub trivial_graph_cut: Toggle,

    #[arg(long, value_enum, default_value = "disable")]
    pub use_dropped: Toggle,

    #[arg(long, value_enum, default_value = "enable")]
    pub silent: Toggle,

    #[arg(long, default_value_t = 1)]
    pub fuip_size: usize,
}

impl CliArgs {
    pub fn to_config(&self) -> SolverConfig {
        SolverConfig {
            solver_enabled: self.solver.is_enabled(),
            presolve_enabled: self.presolve.is_enabled(),
            cutting_mode: self.cutting.into(),
            cutting_check: self.cutting_check.is_enabled(),
            trivial_graph_cut: self.trivial_graph_cut.is_enabled(),
            use_dropped: self.use_dropped.is_enabled(),
            silent: self.silent.is_enabled(),
            fuip_size: self.fuip_size,
            ..SolverConfig::default()
        }
    }
}
