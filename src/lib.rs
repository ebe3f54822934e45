//! # collocation
//!
//! Gauss–Legendre spectral collocation for the self-similar heat equation,
//! no-std compatible (with `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use collocation::{Collocation, CollocationSettings, HeatParams};
//!
//! // Six interior nodes, default operators and reconstruction
//! let solved = Collocation::solve(6, &CollocationSettings::<f64>::default()).unwrap();
//! let cmp = solved.compare(HeatParams::default()).unwrap();
//!
//! let profile = cmp.profile(0.5, 1001).unwrap();
//! assert!(profile.max_abs_error() < 1.0); // kelvin
//! ```
//!
//! ## Modules
//!
//! - [`spectral`] — The solver pipeline: Gauss–Legendre node sets,
//!   Vandermonde / barycentric differentiation operators behind the
//!   [`DifferentiationStrategy`] trait, the boundary-value system, the
//!   reconstructed similarity profile and the comparison against the `erf`
//!   solution. Everything is re-exported at the crate root.
//!
//! - [`dynmatrix`] — Heap-allocated, column-major `DynMatrix<T>` with runtime
//!   dimensions and the [`DynVector<T>`] newtype. Implements
//!   [`MatrixRef`] / [`MatrixMut`], so the linalg free functions apply.
//!   Convenience methods: `a.solve(&b)` and `a.inverse()`.
//!
//! - [`linalg`] — LU with partial pivoting and a symmetric tridiagonal
//!   implicit-QR eigen-solver (Golub–Welsch quadrature).
//!
//! - [`interp`] — Piecewise linear, natural cubic spline and barycentric
//!   Lagrange interpolation with an explicit extrapolation policy.
//!
//! - [`special`] — Error function `erf`.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`), used by every algorithm
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access for algorithms
//!
//! ## Logging
//!
//! Operator selection, system solves and grid evaluation report through the
//! [`log`](https://docs.rs/log) facade (`debug!`, `trace!` for non-finite grid
//! cells, `warn!` for Vandermonde operators past the crossover size). No
//! logger is installed.
//!
//! ## Cargo features
//!
//! | Feature    | Default  | Description |
//! |------------|----------|-------------|
//! | `std`      | yes      | Hardware FPU via system libm, `std::error::Error` impls |
//! | `parallel` | no       | Evaluate error grids across threads with `rayon` (implies `std`) |
//!
//! Without `std` the crate is `no_std + alloc` and floats go through the
//! pure-Rust `libm` fallback of `num-traits`.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dynmatrix;
pub mod interp;
pub mod linalg;
pub mod special;
pub mod spectral;
pub mod traits;

pub use spectral::{
    first_derivative_coeff, gauss_legendre_nodes, second_derivative_coeff, similarity_variable,
    Barycentric, BoundaryValueSystem, Branch, Collocation, CollocationError, CollocationSettings,
    Comparator, Crossover, DiffOperators, DifferentiationStrategy, ErrorField, GaussLegendre,
    HeatParams, InputError, NodalSolution, NodeMethod, NodeSet, Profile, ProfileRow,
    ReconstructedField, Reconstruction, Vandermonde, DEFAULT_THRESHOLD, FAR_FIELD_VALUE,
    SURFACE_VALUE,
};
pub use dynmatrix::{DynMatrix, DynVector};
pub use special::erf;
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
