use alloc::vec;
use alloc::vec::Vec;

use super::{pinned_value, validate, Extrapolation, InterpError};
use crate::traits::FloatScalar;

/// Barycentric weights `w_j = 1 / Π_{k≠j} c·(x_j − x_k)` with
/// `c = 4 / (max x − min x)`.
///
/// Shared by [`LagrangeInterp`] and the barycentric differentiation matrix.
/// The common factor `c^{1−n}` cancels in both uses; without it the weights
/// grow like `4ⁿ` on a unit interval and overflow past a few hundred points.
/// Duplicate points produce infinite weights; callers validate distinctness
/// first.
///
/// ```
/// use collocation::interp::barycentric_weights;
///
/// let w = barycentric_weights(&[0.0_f64, 0.5, 1.0]);
/// assert_eq!(w, vec![0.125, -0.25, 0.125]);
/// ```
pub fn barycentric_weights<T: FloatScalar>(xs: &[T]) -> Vec<T> {
    let n = xs.len();
    let (lo, hi) = xs
        .iter()
        .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let range = hi - lo;
    let c = if range > T::zero() && range.is_finite() {
        T::from(4.0).unwrap() / range
    } else {
        T::one()
    };

    let mut ws = vec![T::one(); n];
    for j in 0..n {
        for k in 0..n {
            if k != j {
                ws[j] = ws[j] / (c * (xs[j] - xs[k]));
            }
        }
    }
    ws
}

/// Barycentric Lagrange interpolant: the unique polynomial of degree
/// `n − 1` through `n` points, evaluated in the second (true) barycentric
/// form.
///
/// Requires at least 2 points.
///
/// # Example
///
/// ```
/// use collocation::interp::LagrangeInterp;
///
/// let interp = LagrangeInterp::new(
///     vec![0.0_f64, 1.0, 2.0],
///     vec![0.0, 1.0, 4.0],
/// ).unwrap();
/// assert!((interp.eval(1.5) - 2.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LagrangeInterp<T> {
    xs: Vec<T>,
    ys: Vec<T>,
    ws: Vec<T>,
    extrapolation: Extrapolation,
}

impl<T: FloatScalar> LagrangeInterp<T> {
    /// Construct a barycentric Lagrange interpolant.
    pub fn new(xs: Vec<T>, ys: Vec<T>) -> Result<Self, InterpError> {
        validate(&xs, &ys, 2)?;
        let ws = barycentric_weights(&xs);
        Ok(Self {
            xs,
            ys,
            ws,
            extrapolation: Extrapolation::Extend,
        })
    }

    /// Replace the extrapolation policy.
    pub fn with_extrapolation(mut self, policy: Extrapolation) -> Self {
        self.extrapolation = policy;
        self
    }

    /// Evaluate the interpolant at `x`.
    ///
    /// `L(x) = (Σ w_j·y_j/(x−x_j)) / (Σ w_j/(x−x_j))`; a query within a few
    /// hundred ulps of a knot returns that knot's value.
    pub fn eval(&self, x: T) -> T {
        if let Some(y) = pinned_value(&self.xs, &self.ys, x, self.extrapolation) {
            return y;
        }
        let eps = T::epsilon() * T::from(1e3).unwrap();
        let mut numer = T::zero();
        let mut denom = T::zero();

        for j in 0..self.xs.len() {
            let diff = x - self.xs[j];
            if diff.abs() < eps {
                return self.ys[j];
            }
            let term = self.ws[j] / diff;
            numer = numer + term * self.ys[j];
            denom = denom + term;
        }
        numer / denom
    }

    /// The knot x-values.
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// The knot y-values.
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// The barycentric weights.
    pub fn weights(&self) -> &[T] {
        &self.ws
    }
}
