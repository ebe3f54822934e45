use alloc::vec::Vec;

use super::{find_interval, pinned_value, validate, Extrapolation, InterpError};
use crate::traits::FloatScalar;

/// Piecewise linear interpolant.
///
/// Requires at least 2 points.
///
/// # Example
///
/// ```
/// use collocation::interp::LinearInterp;
///
/// let interp = LinearInterp::new(
///     vec![0.0_f64, 1.0, 2.0],
///     vec![0.0, 2.0, 1.0],
/// ).unwrap();
/// assert!((interp.eval(0.5) - 1.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterp<T> {
    xs: Vec<T>,
    ys: Vec<T>,
    extrapolation: Extrapolation,
}

impl<T: FloatScalar> LinearInterp<T> {
    /// Construct a linear interpolant from sorted knots.
    pub fn new(xs: Vec<T>, ys: Vec<T>) -> Result<Self, InterpError> {
        validate(&xs, &ys, 2)?;
        Ok(Self {
            xs,
            ys,
            extrapolation: Extrapolation::Extend,
        })
    }

    /// Replace the extrapolation policy.
    pub fn with_extrapolation(mut self, policy: Extrapolation) -> Self {
        self.extrapolation = policy;
        self
    }

    /// Evaluate the interpolant at `x`.
    pub fn eval(&self, x: T) -> T {
        if let Some(y) = pinned_value(&self.xs, &self.ys, x, self.extrapolation) {
            return y;
        }
        let i = find_interval(&self.xs, x);
        let h = self.xs[i + 1] - self.xs[i];
        let t = (x - self.xs[i]) / h;
        self.ys[i] + t * (self.ys[i + 1] - self.ys[i])
    }

    /// The knot x-values.
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// The knot y-values.
    pub fn ys(&self) -> &[T] {
        &self.ys
    }
}
