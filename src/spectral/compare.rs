use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{CollocationError, InputError, ReconstructedField};
use crate::dynmatrix::DynMatrix;
use crate::special::erf;
use crate::traits::FloatScalar;

/// Physical parameters of the conduction problem.
///
/// `T(X, τ) = To + (Ts − To)·f(η)` with `f → 1` as `η → ∞`, so the
/// profile starts at `To` at `X = 0` and approaches `Ts` deep in the slab
/// or at early times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatParams<T> {
    /// `To` in kelvin (default: 273).
    pub initial_temp: T,
    /// `Ts` in kelvin (default: 373).
    pub surface_temp: T,
    /// Thermal diffusivity `α` in m²/s (default: 1e-5).
    pub alpha: T,
    /// Slab length `L` in metres; profiles span `[0, L]` (default: 1).
    pub length: T,
}

impl Default for HeatParams<f64> {
    fn default() -> Self {
        Self {
            initial_temp: 273.0,
            surface_temp: 373.0,
            alpha: 1e-5,
            length: 1.0,
        }
    }
}

impl Default for HeatParams<f32> {
    fn default() -> Self {
        Self {
            initial_temp: 273.0,
            surface_temp: 373.0,
            alpha: 1e-5,
            length: 1.0,
        }
    }
}

impl<T: FloatScalar> HeatParams<T> {
    /// Validated parameters.
    pub fn new(
        initial_temp: T,
        surface_temp: T,
        alpha: T,
        length: T,
    ) -> Result<Self, CollocationError> {
        let params = Self {
            initial_temp,
            surface_temp,
            alpha,
            length,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check every field is finite and `alpha`, `length` are positive.
    pub fn validate(&self) -> Result<(), CollocationError> {
        let fields = [
            ("initial_temp", self.initial_temp),
            ("surface_temp", self.surface_temp),
            ("alpha", self.alpha),
            ("length", self.length),
        ];
        for (name, v) in fields {
            if !v.is_finite() {
                return Err(InputError::NonFinite(name).into());
            }
        }
        if self.alpha <= T::zero() {
            return Err(InputError::NotPositive("alpha").into());
        }
        if self.length <= T::zero() {
            return Err(InputError::NotPositive("length").into());
        }
        Ok(())
    }
}

/// `η = X / (2·√(max(α·τ, MIN_POSITIVE)))`.
///
/// The floor keeps `τ → 0⁺` finite: `η` grows without bound instead of
/// dividing by zero.
///
/// ```
/// use collocation::similarity_variable;
///
/// assert_eq!(similarity_variable(0.2_f64, 1.0, 0.01), 1.0);
/// assert!(similarity_variable(1.0_f64, 0.0, 1e-5).is_finite());
/// ```
pub fn similarity_variable<T: FloatScalar>(x: T, tau: T, alpha: T) -> T {
    let two = T::one() + T::one();
    x / (two * (alpha * tau).max(T::min_positive_value()).sqrt())
}

/// Numerical and analytical temperatures from one reconstructed field.
#[derive(Debug, Clone)]
pub struct Comparator<T> {
    field: ReconstructedField<T>,
    params: HeatParams<T>,
}

impl<T: FloatScalar> Comparator<T> {
    pub fn new(
        field: ReconstructedField<T>,
        params: HeatParams<T>,
    ) -> Result<Self, CollocationError> {
        params.validate()?;
        Ok(Self { field, params })
    }

    pub fn field(&self) -> &ReconstructedField<T> {
        &self.field
    }

    pub fn params(&self) -> &HeatParams<T> {
        &self.params
    }

    /// `To + (Ts − To)·f(η)` from the reconstructed field.
    ///
    /// `x` must lie in `[0, L]` and `tau` must be positive.
    ///
    /// ```
    /// use collocation::{Collocation, CollocationSettings, HeatParams};
    ///
    /// let cmp = Collocation::solve(6, &CollocationSettings::<f64>::default())
    ///     .unwrap()
    ///     .compare(HeatParams::default())
    ///     .unwrap();
    /// assert_eq!(cmp.numerical(0.0, 0.5).unwrap(), 273.0);
    /// assert!(cmp.numerical(0.5, -1.0).is_err());
    /// ```
    pub fn numerical(&self, x: T, tau: T) -> Result<T, CollocationError> {
        self.check_point(x, tau)?;
        Ok(self.numerical_at(x, tau))
    }

    /// `To + (Ts − To)·erf(η)`, under the same input rules as
    /// [`numerical`](Self::numerical).
    pub fn analytical(&self, x: T, tau: T) -> Result<T, CollocationError> {
        self.check_point(x, tau)?;
        Ok(self.analytical_at(x, tau))
    }

    fn check_point(&self, x: T, tau: T) -> Result<(), CollocationError> {
        self.check_x(x)?;
        check_tau(tau)
    }

    fn check_x(&self, x: T) -> Result<(), CollocationError> {
        if !x.is_finite() {
            return Err(InputError::NonFinite("x").into());
        }
        if x < T::zero() || x > self.params.length {
            return Err(InputError::OutsideSlab.into());
        }
        Ok(())
    }

    fn numerical_at(&self, x: T, tau: T) -> T {
        let p = &self.params;
        let eta = similarity_variable(x, tau, p.alpha);
        p.initial_temp + (p.surface_temp - p.initial_temp) * self.field.eval(eta)
    }

    fn analytical_at(&self, x: T, tau: T) -> T {
        let p = &self.params;
        let eta = similarity_variable(x, tau, p.alpha);
        p.initial_temp + (p.surface_temp - p.initial_temp) * erf(eta)
    }

    /// Both temperatures at `points` evenly spaced positions over `[0, L]`.
    pub fn profile(&self, tau: T, points: usize) -> Result<Profile<T>, CollocationError> {
        check_tau(tau)?;
        if points == 0 {
            return Err(InputError::EmptyGrid.into());
        }
        let rows = linspace(T::zero(), self.params.length, points)
            .into_iter()
            .map(|x| ProfileRow {
                x,
                numerical: self.numerical_at(x, tau),
                analytical: self.analytical_at(x, tau),
            })
            .collect();
        Ok(Profile { tau, rows })
    }

    /// `T_exact − T_num` at every `(xs[i], taus[j])`.
    ///
    /// Every position must lie in `[0, L]`. Non-finite cells are kept and
    /// counted, not treated as errors.
    pub fn error_field(&self, xs: &[T], taus: &[T]) -> Result<ErrorField<T>, CollocationError> {
        if xs.is_empty() || taus.is_empty() {
            return Err(InputError::EmptyGrid.into());
        }
        for &x in xs {
            self.check_x(x)?;
        }
        for &tau in taus {
            check_tau(tau)?;
        }

        let column = |tau: T| -> Vec<T> {
            xs.iter()
                .map(|&x| self.analytical_at(x, tau) - self.numerical_at(x, tau))
                .collect()
        };
        #[cfg(feature = "parallel")]
        let columns: Vec<Vec<T>> = taus.par_iter().map(|&tau| column(tau)).collect();
        #[cfg(not(feature = "parallel"))]
        let columns: Vec<Vec<T>> = taus.iter().map(|&tau| column(tau)).collect();

        let values = DynMatrix::from_vec(xs.len(), taus.len(), columns.concat());
        let mut non_finite = 0;
        for j in 0..taus.len() {
            for i in 0..xs.len() {
                if !values[(i, j)].is_finite() {
                    trace!("error field: non-finite cell at X = {}, tau = {}", xs[i], taus[j]);
                    non_finite += 1;
                }
            }
        }
        debug!(
            "error field: {}x{} grid, {} non-finite cells",
            xs.len(),
            taus.len(),
            non_finite
        );
        Ok(ErrorField {
            xs: xs.to_vec(),
            taus: taus.to_vec(),
            values,
            non_finite,
        })
    }

    /// [`error_field`](Self::error_field) over `x_points` positions in
    /// `[0, L]` and `tau_points` times `τ_max/k, 2τ_max/k, …, τ_max`.
    pub fn error_grid(
        &self,
        x_points: usize,
        tau_max: T,
        tau_points: usize,
    ) -> Result<ErrorField<T>, CollocationError> {
        check_tau(tau_max)?;
        if x_points == 0 || tau_points == 0 {
            return Err(InputError::EmptyGrid.into());
        }
        let xs = linspace(T::zero(), self.params.length, x_points);
        let k = T::from(tau_points).unwrap();
        let taus: Vec<T> = (1..=tau_points)
            .map(|j| tau_max * T::from(j).unwrap() / k)
            .collect();
        self.error_field(&xs, &taus)
    }
}

fn check_tau<T: FloatScalar>(tau: T) -> Result<(), CollocationError> {
    if !tau.is_finite() {
        return Err(InputError::NonFinite("tau").into());
    }
    if tau <= T::zero() {
        return Err(InputError::NotPositive("tau").into());
    }
    Ok(())
}

/// `n` evenly spaced points from `a` to `b` inclusive; `[a]` for `n = 1`.
fn linspace<T: FloatScalar>(a: T, b: T, n: usize) -> Vec<T> {
    if n == 1 {
        return alloc::vec![a];
    }
    let last = T::from(n - 1).unwrap();
    (0..n)
        .map(|k| {
            if k == n - 1 {
                b
            } else {
                a + (b - a) * T::from(k).unwrap() / last
            }
        })
        .collect()
}

/// One row of a [`Profile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileRow<T> {
    pub x: T,
    pub numerical: T,
    pub analytical: T,
}

impl<T: FloatScalar> ProfileRow<T> {
    /// `analytical − numerical`.
    pub fn error(&self) -> T {
        self.analytical - self.numerical
    }
}

/// Temperatures along `X` at one time `τ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile<T> {
    tau: T,
    rows: Vec<ProfileRow<T>>,
}

impl<T: FloatScalar> Profile<T> {
    pub fn tau(&self) -> T {
        self.tau
    }

    pub fn rows(&self) -> &[ProfileRow<T>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Largest `|T_exact − T_num|`; NaN rows are skipped.
    pub fn max_abs_error(&self) -> T {
        self.rows
            .iter()
            .fold(T::zero(), |acc, r| acc.max(r.error().abs()))
    }

    /// Rows as `X, T_numerical, T_analytical` with six decimals.
    ///
    /// ```
    /// use collocation::{Collocation, CollocationSettings, HeatParams};
    ///
    /// let cmp = Collocation::solve(6, &CollocationSettings::<f64>::default())
    ///     .unwrap()
    ///     .compare(HeatParams::default())
    ///     .unwrap();
    /// let mut csv = String::new();
    /// cmp.profile(0.5, 3).unwrap().write_csv(&mut csv).unwrap();
    /// let mut lines = csv.lines();
    /// assert_eq!(lines.next(), Some("X, T_numerical, T_analytical"));
    /// assert_eq!(lines.next(), Some("0.000000,273.000000,273.000000"));
    /// ```
    pub fn write_csv<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        writeln!(w, "X, T_numerical, T_analytical")?;
        for r in &self.rows {
            writeln!(w, "{:.6},{:.6},{:.6}", r.x, r.numerical, r.analytical)?;
        }
        Ok(())
    }
}

/// `T_exact − T_num` over positions (rows) and times (columns).
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorField<T> {
    xs: Vec<T>,
    taus: Vec<T>,
    values: DynMatrix<T>,
    non_finite: usize,
}

impl<T: FloatScalar> ErrorField<T> {
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    pub fn taus(&self) -> &[T] {
        &self.taus
    }

    /// The `xs.len() × taus.len()` grid.
    pub fn values(&self) -> &DynMatrix<T> {
        &self.values
    }

    /// Error at `(xs[i], taus[j])`.
    pub fn get(&self, i: usize, j: usize) -> T {
        self.values[(i, j)]
    }

    /// Number of NaN or infinite cells.
    pub fn non_finite_count(&self) -> usize {
        self.non_finite
    }

    /// Largest absolute finite cell.
    pub fn max_abs(&self) -> T {
        self.values
            .as_slice()
            .iter()
            .filter(|v| v.is_finite())
            .fold(T::zero(), |acc, &v| acc.max(v.abs()))
    }

    /// Header `X,τ₁,τ₂,…`, then one row per position, all with six decimals.
    pub fn write_csv<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write!(w, "X")?;
        for tau in &self.taus {
            write!(w, ",{:.6}", tau)?;
        }
        writeln!(w)?;
        for (i, x) in self.xs.iter().enumerate() {
            write!(w, "{:.6}", x)?;
            for j in 0..self.taus.len() {
                write!(w, ",{:.6}", self.values[(i, j)])?;
            }
            writeln!(w)?;
        }
        Ok(())
    }
}
