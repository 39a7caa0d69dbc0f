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

//! Error kinds for the solver (see the "error handling" design in the
//! project notes). Only input and backend-initialization failures abort a
//! run; infeasibility of a node is a routine classification, never an
//! error.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading or running the solver.
#[derive(Debug, Error)]
pub enum MipError {
    /// The model file is missing, unreadable, or the backend rejected it.
    #[error("could not load model `{path}`: {detail}")]
    InputError { path: PathBuf, detail: String },

    /// The LP backend returned `Unknown`/`Error` for a request that must
    /// succeed (root solve, cut validation). Non-root occurrences of this
    /// condition are caught by the caller and turned into an `Infeasible`
    /// classification instead of propagating here.
    #[error("LP backend error: {detail}")]
    SolverBackendError { detail: String },
}

pub type Result<T> = std::result::Result<T, MipError>;
