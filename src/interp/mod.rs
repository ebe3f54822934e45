//! One-dimensional interpolation: linear, natural cubic spline and
//! barycentric Lagrange.
//!
//! All interpolants are constructed from strictly increasing knots and support
//! evaluation at arbitrary points. What happens outside the knot range is an
//! explicit [`Extrapolation`] policy: `Extend` continues the nearest boundary
//! segment (or the polynomial), `Clamp` returns the value at the nearest knot.
//!
//! # Examples
//!
//! ```
//! use collocation::interp::{Extrapolation, LinearInterp};
//!
//! let interp = LinearInterp::new(vec![0.0_f64, 1.0, 2.0], vec![0.0, 1.0, 0.0]).unwrap();
//! assert!((interp.eval(0.5) - 0.5).abs() < 1e-14);
//! assert!((interp.eval(3.0) + 1.0).abs() < 1e-14);
//!
//! let clamped = interp.with_extrapolation(Extrapolation::Clamp);
//! assert_eq!(clamped.eval(3.0), 0.0);
//! ```

mod lagrange;
mod linear;
mod spline;


pub use lagrange::{barycentric_weights, LagrangeInterp};
pub use linear::LinearInterp;
pub use spline::CubicSpline;

use crate::traits::FloatScalar;

/// Errors from interpolant construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterpError {
    /// Not enough data points for the interpolation method.
    TooFewPoints,
    /// The `xs` array is not strictly increasing.
    NotSorted,
    /// `xs` and `ys` have different lengths.
    LengthMismatch,
}

impl core::fmt::Display for InterpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterpError::TooFewPoints => write!(f, "not enough data points for interpolation"),
            InterpError::NotSorted => write!(f, "x values must be strictly increasing"),
            InterpError::LengthMismatch => write!(f, "xs and ys must have the same length"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InterpError {}

/// Behaviour of an interpolant outside `[xs[0], xs[n-1]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Continue the boundary segment (linear, spline) or the polynomial.
    #[default]
    Extend,
    /// Return the value at the nearest knot.
    Clamp,
}

/// Validate knots and values shared by every interpolant.
fn validate<T: FloatScalar>(xs: &[T], ys: &[T], min_points: usize) -> Result<(), InterpError> {
    if xs.len() != ys.len() {
        return Err(InterpError::LengthMismatch);
    }
    if xs.len() < min_points {
        return Err(InterpError::TooFewPoints);
    }
    validate_sorted(xs)
}

/// Validate that a slice is strictly increasing (NaN knots are rejected).
fn validate_sorted<T: FloatScalar>(xs: &[T]) -> Result<(), InterpError> {
    if xs.iter().any(|x| x.is_nan()) {
        return Err(InterpError::NotSorted);
    }
    for i in 1..xs.len() {
        if xs[i] <= xs[i - 1] {
            return Err(InterpError::NotSorted);
        }
    }
    Ok(())
}

/// Knot value to return instead of evaluating, if the policy pins `x` to an
/// end of the knot range. NaN is never pinned.
fn pinned_value<T: FloatScalar>(xs: &[T], ys: &[T], x: T, policy: Extrapolation) -> Option<T> {
    match policy {
        Extrapolation::Extend => None,
        Extrapolation::Clamp => {
            let last = xs.len() - 1;
            if x <= xs[0] {
                Some(ys[0])
            } else if x >= xs[last] {
                Some(ys[last])
            } else {
                None
            }
        }
    }
}

/// Binary search for the interval containing `x` in a sorted slice.
///
/// Returns index `i` such that `xs[i] <= x < xs[i+1]`, clamped to
/// `[0, xs.len() - 2]` for extrapolation beyond boundaries.
fn find_interval<T: FloatScalar>(xs: &[T], x: T) -> usize {
    debug_assert!(xs.len() >= 2);
    let n = xs.len();
    if x <= xs[0] {
        return 0;
    }
    if x >= xs[n - 1] {
        return n - 2;
    }
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if x < xs[mid] {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    lo
}
