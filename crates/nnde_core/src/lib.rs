//! The `nnde_core` crate trains single-hidden-layer sigmoid networks as trial
//! solutions of differential equations.
//!
//! A trial function `Yt = A + P·N` satisfies the boundary or initial data for
//! every parameter value; training minimises the squared residual of the
//! equation over a fixed set of points with a per-parameter Newton step.
//!
//! Key components:
//! - **Jets**: `Dual` and `Jet2` forward-mode numbers, nested to carry mixed
//!   input/parameter derivatives up to fourth order.
//! - **Boundary**: anchor/envelope constructions for initial values, 1-D
//!   Dirichlet data and the unit square.
//! - **Equation**: one capability trait per equation class, gathered in `Problem`.
//! - **Trainer**: the epoch loop with double-buffered parameter updates.

pub mod activation;
pub mod boundary;
pub mod equation;
pub mod error;
pub mod formulation;
pub mod grid;
pub mod jet;
pub mod network;
pub mod objective;
pub mod problem;
pub mod problems;
pub mod settings;
pub mod solution;
pub mod trainer;
pub mod traits;
pub mod trial;
pub mod update;

pub use error::{NndeError, Result};
pub use grid::TrainingSet;
pub use problem::Problem;
pub use settings::{TrainingSettings, UpdateRule};
pub use solution::{Comparison, Solution};
pub use trial::Evaluation;
