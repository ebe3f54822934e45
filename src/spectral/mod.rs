//! Spectral collocation solver for the self-similar heat equation.
//!
//! The semi-infinite conduction problem `∂T/∂τ = α ∂²T/∂X²` with a step
//! change of surface temperature reduces, under `η = X / (2√(ατ))` and
//! `x = exp(−η)`, to the linear boundary-value problem
//!
//! ```text
//! x·y''(x) + (1 + 2 ln x)·y'(x) = 0,    y(0) = 1,  y(1) = 0
//! ```
//!
//! whose exact solution is `y = erf(−ln x)`. The pipeline is:
//!
//! 1. [`gauss_legendre_nodes`]: `n` Gauss–Legendre nodes mapped to `[0, 1]`
//!    plus both endpoints.
//! 2. [`DifferentiationStrategy`]: first- and second-derivative matrices on
//!    those nodes, by Vandermonde inversion ([`Vandermonde`]) or barycentric
//!    formulas ([`Barycentric`]), switched at a size [`Crossover`].
//! 3. [`BoundaryValueSystem`]: the interior `n × n` system with the two
//!    Dirichlet values folded into the right-hand side, solved by LU.
//! 4. [`ReconstructedField`]: a continuous `η ↦ y` built from the nodal
//!    values with a selectable [`Reconstruction`].
//! 5. [`Comparator`]: temperatures `T(X, τ)` from the field and from
//!    `erf`, single profiles and full error grids.
//!
//! [`Collocation`] runs steps 1–3 from a [`CollocationSettings`].
//!
//! # Example
//!
//! ```
//! use collocation::{Collocation, CollocationSettings, HeatParams};
//!
//! let settings = CollocationSettings::<f64>::default();
//! let solved = Collocation::solve(6, &settings).unwrap();
//! let field = solved.field().unwrap();
//!
//! // y = 0 at the surface (η = 0), y → 1 in the far field
//! assert!((field.eval(0.0) - 0.0).abs() < 1e-12);
//! assert!((field.eval(f64::INFINITY) - 1.0).abs() < 1e-12);
//!
//! let cmp = solved.compare(HeatParams::default()).unwrap();
//! let profile = cmp.profile(0.5, 101).unwrap();
//! assert!(profile.max_abs_error() < 1.0);
//! ```

mod bvp;
mod compare;
mod nodes;
mod operators;
mod reconstruct;
mod solver;

#[cfg(test)]
mod tests;

pub use bvp::{
    first_derivative_coeff, second_derivative_coeff, BoundaryValueSystem, NodalSolution,
    FAR_FIELD_VALUE, SURFACE_VALUE,
};
pub use compare::{
    similarity_variable, Comparator, ErrorField, HeatParams, Profile, ProfileRow,
};
pub use nodes::{gauss_legendre_nodes, GaussLegendre, NodeMethod, NodeSet};
pub use operators::{
    Barycentric, Branch, Crossover, DiffOperators, DifferentiationStrategy, Vandermonde,
    DEFAULT_THRESHOLD,
};
pub use reconstruct::{ReconstructedField, Reconstruction};
pub use solver::{Collocation, CollocationSettings};

use core::fmt;

use crate::interp::InterpError;
use crate::linalg::LinalgError;

/// Which input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// Fewer than one interior collocation node was requested.
    TooFewNodes,
    /// A parameter or coordinate is NaN or infinite.
    NonFinite(&'static str),
    /// A parameter that must be strictly positive is not.
    NotPositive(&'static str),
    /// The logarithm floor is not in `(0, x₁)`, where `x₁` is the smallest
    /// interior node.
    LnFloorOutOfRange,
    /// A custom node set does not start at 0 and end at 1.
    Endpoints,
    /// An evaluation grid has no points.
    EmptyGrid,
    /// Node and value counts differ.
    LengthMismatch,
    /// A position lies outside the slab `[0, L]`.
    OutsideSlab,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewNodes => write!(f, "at least one interior node is required"),
            Self::NonFinite(what) => write!(f, "{what} must be finite"),
            Self::NotPositive(what) => write!(f, "{what} must be strictly positive"),
            Self::LnFloorOutOfRange => {
                write!(f, "logarithm floor must lie between 0 and the smallest interior node")
            }
            Self::Endpoints => write!(f, "node set must start at 0 and end at 1"),
            Self::EmptyGrid => write!(f, "evaluation grid is empty"),
            Self::LengthMismatch => write!(f, "node and value counts differ"),
            Self::OutsideSlab => write!(f, "position must lie within [0, L]"),
        }
    }
}

/// Errors from the collocation pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollocationError {
    /// Rejected input; nothing was computed.
    InvalidInput(InputError),
    /// Collocation nodes are not pairwise distinct and increasing; `index` is
    /// the first node that does not exceed its predecessor.
    DegenerateNodes { index: usize },
    /// The Vandermonde matrix or the boundary-value system is singular, or
    /// its solution is not finite.
    SingularSystem,
    /// A reconstructed value or query point is not finite.
    NumericOverflow,
    /// An iterative eigenvalue solve did not converge (Golub–Welsch nodes).
    ConvergenceFailure,
}

impl fmt::Display for CollocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(e) => write!(f, "invalid input: {e}"),
            Self::DegenerateNodes { index } => {
                write!(f, "collocation node {index} does not exceed its predecessor")
            }
            Self::SingularSystem => write!(f, "linear system is singular or numerically unstable"),
            Self::NumericOverflow => write!(f, "value is not finite"),
            Self::ConvergenceFailure => write!(f, "eigenvalue iteration did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CollocationError {}

impl From<InputError> for CollocationError {
    fn from(e: InputError) -> Self {
        Self::InvalidInput(e)
    }
}

impl From<LinalgError> for CollocationError {
    fn from(e: LinalgError) -> Self {
        match e {
            LinalgError::Singular => Self::SingularSystem,
            LinalgError::ConvergenceFailure => Self::ConvergenceFailure,
        }
    }
}

impl From<InterpError> for CollocationError {
    fn from(e: InterpError) -> Self {
        match e {
            InterpError::TooFewPoints => Self::InvalidInput(InputError::TooFewNodes),
            // Knots are distinct nodes mapped through a monotone function;
            // a collapse means the logarithm floor swallowed interior nodes.
            InterpError::NotSorted => Self::InvalidInput(InputError::LnFloorOutOfRange),
            InterpError::LengthMismatch => Self::InvalidInput(InputError::LengthMismatch),
        }
    }
}
