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

use std::process::ExitCode;

use clap::Parser;
use log::error;

use mipbb::cli::CliArgs;
use mipbb::lp::LpBackend;
use mipbb::lp::LpModel;
use mipbb::{MipError, Solver};

#[cfg(feature = "highs-backend")]
fn backend() -> Box<dyn LpBackend> {
    Box::new(mipbb::lp::HighsBackend::new())
}

#[cfg(not(feature = "highs-backend"))]
fn backend() -> Box<dyn LpBackend> {
    Box::new(mipbb::lp::EnumBackend::new())
}

fn run() -> Result<(), MipError> {
    env_logger::init();
    let args = CliArgs::parse();
    let config = args.to_config();

    let root = LpModel::from_file(&args.instance, backend(), &config)?;
    let state = Solver::new(config).run(root)?;

    println!("{state}");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
