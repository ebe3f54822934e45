use alloc::vec;
use alloc::vec::Vec;

use super::{find_interval, pinned_value, validate, Extrapolation, InterpError};
use crate::traits::FloatScalar;

/// Natural cubic spline interpolant (second derivative zero at both ends).
///
/// Requires at least 3 points. Each segment stores `[a, b, c, d]` with
/// `s(x) = a + b·dx + c·dx² + d·dx³`, `dx = x − xs[i]`.
///
/// # Example
///
/// ```
/// use collocation::interp::CubicSpline;
///
/// let xs = vec![0.0_f64, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 0.0, 1.0];
/// let spline = CubicSpline::new(xs, ys).unwrap();
/// assert!((spline.eval(1.0) - 1.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSpline<T> {
    xs: Vec<T>,
    ys: Vec<T>,
    coeffs: Vec<[T; 4]>,
    extrapolation: Extrapolation,
}

impl<T: FloatScalar> CubicSpline<T> {
    /// Construct a natural cubic spline from sorted knots.
    pub fn new(xs: Vec<T>, ys: Vec<T>) -> Result<Self, InterpError> {
        validate(&xs, &ys, 3)?;

        let n = xs.len();
        let two = T::one() + T::one();
        let three = two + T::one();
        let six = three + three;

        let mut h = vec![T::zero(); n - 1];
        let mut delta = vec![T::zero(); n - 1];
        for i in 0..n - 1 {
            h[i] = xs[i + 1] - xs[i];
            delta[i] = (ys[i + 1] - ys[i]) / h[i];
        }

        // Second derivatives m[1..n-1] from the tridiagonal system
        //   h[i-1]·m[i-1] + 2(h[i-1]+h[i])·m[i] + h[i]·m[i+1] = 6(δ[i] − δ[i-1])
        // with m[0] = m[n-1] = 0, solved by the Thomas algorithm.
        let mut m = vec![T::zero(); n];
        let mut cp = vec![T::zero(); n];
        let mut dp = vec![T::zero(); n];
        for i in 1..n - 1 {
            let diag = two * (h[i - 1] + h[i]) - h[i - 1] * cp[i - 1];
            let rhs = six * (delta[i] - delta[i - 1]) - h[i - 1] * dp[i - 1];
            cp[i] = h[i] / diag;
            dp[i] = rhs / diag;
        }
        for i in (1..n - 1).rev() {
            m[i] = dp[i] - cp[i] * m[i + 1];
        }

        let coeffs = (0..n - 1)
            .map(|i| {
                let a = ys[i];
                let b = delta[i] - h[i] * (two * m[i] + m[i + 1]) / six;
                let c = m[i] / two;
                let d = (m[i + 1] - m[i]) / (six * h[i]);
                [a, b, c, d]
            })
            .collect();

        Ok(Self {
            xs,
            ys,
            coeffs,
            extrapolation: Extrapolation::Extend,
        })
    }

    /// Replace the extrapolation policy.
    pub fn with_extrapolation(mut self, policy: Extrapolation) -> Self {
        self.extrapolation = policy;
        self
    }

    /// Evaluate the spline at `x`.
    pub fn eval(&self, x: T) -> T {
        if let Some(y) = pinned_value(&self.xs, &self.ys, x, self.extrapolation) {
            return y;
        }
        let i = find_interval(&self.xs, x);
        let dx = x - self.xs[i];
        let [a, b, c, d] = self.coeffs[i];
        a + dx * (b + dx * (c + dx * d))
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
