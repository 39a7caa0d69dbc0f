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

//! Everything that talks to an LP relaxation: the backend trait, two
//! concrete backends, and [`LpModel`], the only type the search ever calls
//! directly.

pub mod backend;
pub mod enum_backend;
#[cfg(feature = "highs-backend")]
pub mod highs_backend;
mod model;
pub mod sparse;

pub use backend::{Basis, CscMatrix, LpBackend, LpInfo, LpReadback, LpSolutionValues, ModelBlob};
pub use enum_backend::EnumBackend;
#[cfg(feature = "highs-backend")]
pub use highs_backend::HighsBackend;
pub use model::{LpModel, SolveRes};
