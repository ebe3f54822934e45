use alloc::vec::Vec;

use log::debug;

use super::{CollocationError, InputError, NodalSolution, NodeSet};
use crate::dynmatrix::{DynMatrix, DynVector};
use crate::interp::{CubicSpline, Extrapolation, LagrangeInterp, LinearInterp};
use crate::traits::FloatScalar;

/// How nodal values become a continuous function of `η`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Reconstruction {
    /// Monomial coefficients from `Q·d = y`, evaluated by Horner in
    /// `z = exp(−η)`.
    Polynomial,
    /// The same interpolating polynomial in `z = exp(−η)`, evaluated in
    /// barycentric form over the nodes.
    #[default]
    Barycentric,
    /// Piecewise linear over the knots `(η_i, y_i)`.
    Linear,
    /// Natural cubic spline over the knots `(η_i, y_i)`.
    CubicSpline,
}

#[derive(Debug, Clone)]
enum Interpolant<T> {
    Polynomial {
        coeffs: Vec<T>,
        far_field: T,
        surface: T,
    },
    Barycentric(LagrangeInterp<T>),
    Linear(LinearInterp<T>),
    Spline(CubicSpline<T>),
}

/// Continuous similarity profile `η ↦ y`, built once from a nodal solution.
///
/// Boundedness: the polynomial forms clamp `η` to `[0, ∞)`, so
/// `z = exp(−η)` always lies in the node range `[0, 1]`; `η = +∞` gives
/// `y_0`. The piecewise forms hold the end knot values outside
/// `[0, −ln ε]`: `y_{n+1}` below, `y_0` above.
///
/// Read-only after construction and shareable across threads.
///
/// ```
/// use collocation::{Collocation, CollocationSettings, Reconstruction};
///
/// let mut settings = CollocationSettings::<f64>::default();
/// settings.reconstruction = Reconstruction::Linear;
/// let field = Collocation::solve(6, &settings).unwrap().field().unwrap();
///
/// assert_eq!(field.eval(-3.0), 0.0);
/// assert_eq!(field.eval(1e6), 1.0);
/// assert!(field.eval(f64::NAN).is_nan());
/// assert!(field.try_eval(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ReconstructedField<T> {
    method: Reconstruction,
    interp: Interpolant<T>,
}

impl<T: FloatScalar> ReconstructedField<T> {
    /// Build a field from `solution` on `nodes`.
    ///
    /// `ln_floor` must be positive and below the smallest interior node so
    /// that every node keeps a distinct `η`.
    pub fn new(
        nodes: &NodeSet<T>,
        solution: &NodalSolution<T>,
        method: Reconstruction,
        ln_floor: T,
    ) -> Result<Self, CollocationError> {
        if nodes.len() != solution.len() {
            return Err(InputError::LengthMismatch.into());
        }
        if !ln_floor.is_finite() {
            return Err(InputError::NonFinite("ln_floor").into());
        }
        if ln_floor <= T::zero() || ln_floor >= nodes[1] {
            return Err(InputError::LnFloorOutOfRange.into());
        }
        if solution.values().iter().any(|v| !v.is_finite()) {
            return Err(CollocationError::NumericOverflow);
        }

        let xs = nodes.as_slice();
        let ys = solution.values();
        let interp = match method {
            Reconstruction::Polynomial => {
                let m = xs.len();
                let q = DynMatrix::from_fn(m, m, |i, j| xs[i].powi(j as i32));
                let coeffs = q.solve(&DynVector::from_slice(ys))?;
                if !coeffs.is_finite() {
                    return Err(CollocationError::SingularSystem);
                }
                Interpolant::Polynomial {
                    coeffs: coeffs.into_vec(),
                    far_field: solution.far_field(),
                    surface: solution.surface(),
                }
            }
            Reconstruction::Barycentric => Interpolant::Barycentric(
                LagrangeInterp::new(xs.to_vec(), ys.to_vec())?
                    .with_extrapolation(Extrapolation::Clamp),
            ),
            Reconstruction::Linear => {
                let (etas, vals) = similarity_knots(nodes, solution, ln_floor);
                Interpolant::Linear(
                    LinearInterp::new(etas, vals)?.with_extrapolation(Extrapolation::Clamp),
                )
            }
            Reconstruction::CubicSpline => {
                let (etas, vals) = similarity_knots(nodes, solution, ln_floor);
                Interpolant::Spline(
                    CubicSpline::new(etas, vals)?.with_extrapolation(Extrapolation::Clamp),
                )
            }
        };
        debug!("reconstruction: {:?} over {} nodes", method, xs.len());
        Ok(Self { method, interp })
    }

    /// Reconstruction in use.
    pub fn method(&self) -> Reconstruction {
        self.method
    }

    /// `y(η)`. NaN in, NaN out; otherwise bounded by the policy above.
    pub fn eval(&self, eta: T) -> T {
        if eta.is_nan() {
            return eta;
        }
        match &self.interp {
            Interpolant::Polynomial {
                coeffs,
                far_field,
                surface,
            } => {
                let z = (-eta.max(T::zero())).exp();
                if z == T::zero() {
                    *far_field
                } else if z == T::one() {
                    *surface
                } else {
                    coeffs.iter().rev().fold(T::zero(), |acc, &c| acc * z + c)
                }
            }
            Interpolant::Barycentric(lag) => lag.eval((-eta.max(T::zero())).exp()),
            Interpolant::Linear(lin) => lin.eval(eta),
            Interpolant::Spline(spl) => spl.eval(eta),
        }
    }

    /// [`eval`](Self::eval) that reports a NaN query or a non-finite result
    /// as [`CollocationError::NumericOverflow`].
    pub fn try_eval(&self, eta: T) -> Result<T, CollocationError> {
        if eta.is_nan() {
            return Err(CollocationError::NumericOverflow);
        }
        let v = self.eval(eta);
        if v.is_finite() {
            Ok(v)
        } else {
            Err(CollocationError::NumericOverflow)
        }
    }

    /// [`eval`](Self::eval) at each point.
    pub fn eval_many(&self, etas: &[T]) -> Vec<T> {
        etas.iter().map(|&eta| self.eval(eta)).collect()
    }
}

/// `(η_i, y_i)` with `η_i = −ln(max(x_i, ε))`, reordered so `η` ascends.
fn similarity_knots<T: FloatScalar>(
    nodes: &NodeSet<T>,
    solution: &NodalSolution<T>,
    ln_floor: T,
) -> (Vec<T>, Vec<T>) {
    let mut etas = nodes.similarity(ln_floor);
    etas.reverse();
    let mut vals = solution.values().to_vec();
    vals.reverse();
    (etas, vals)
}
