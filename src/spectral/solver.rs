use log::debug;

use super::{
    BoundaryValueSystem, CollocationError, Comparator, Crossover, DiffOperators,
    DifferentiationStrategy, HeatParams, InputError, NodalSolution, NodeMethod, NodeSet,
    ReconstructedField, Reconstruction, DEFAULT_THRESHOLD,
};
use crate::traits::FloatScalar;

/// Settings for [`Collocation::solve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollocationSettings<T> {
    /// Interior node count from which barycentric operators replace
    /// Vandermonde ones (default: 20, 7 for `f32`, where Vandermonde
    /// operators degrade past 6 interior nodes). Zero always selects
    /// barycentric.
    pub threshold: usize,
    /// Floor `ε` applied before every logarithm (default: 1e-12, 1e-6 for
    /// `f32`). Must be positive and below the smallest interior node.
    pub ln_floor: T,
    /// How nodal values become a continuous field (default: barycentric).
    pub reconstruction: Reconstruction,
    /// Legendre root finder (default: Newton).
    pub node_method: NodeMethod,
}

impl Default for CollocationSettings<f64> {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            ln_floor: 1e-12,
            reconstruction: Reconstruction::Barycentric,
            node_method: NodeMethod::Newton,
        }
    }
}

impl Default for CollocationSettings<f32> {
    fn default() -> Self {
        Self {
            threshold: 7,
            ln_floor: 1e-6,
            reconstruction: Reconstruction::Barycentric,
            node_method: NodeMethod::Newton,
        }
    }
}

impl<T: FloatScalar> CollocationSettings<T> {
    /// Reject a non-finite or non-positive `ln_floor`.
    pub fn validate(&self) -> Result<(), CollocationError> {
        if !self.ln_floor.is_finite() {
            return Err(InputError::NonFinite("ln_floor").into());
        }
        if self.ln_floor <= T::zero() {
            return Err(InputError::NotPositive("ln_floor").into());
        }
        Ok(())
    }
}

/// A solved collocation problem: nodes, operators and nodal values.
///
/// ```
/// use collocation::{Branch, Collocation, CollocationSettings};
///
/// let settings = CollocationSettings::<f64>::default();
/// let small = Collocation::solve(6, &settings).unwrap();
/// assert_eq!(small.operators().branch(), Branch::Vandermonde);
/// assert_eq!(small.solution().len(), 8);
///
/// let large = Collocation::solve(30, &settings).unwrap();
/// assert_eq!(large.operators().branch(), Branch::Barycentric);
///
/// assert!(Collocation::solve(0, &settings).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Collocation<T> {
    settings: CollocationSettings<T>,
    nodes: NodeSet<T>,
    operators: DiffOperators<T>,
    solution: NodalSolution<T>,
}

impl<T: FloatScalar> Collocation<T> {
    /// Solve on `n` Gauss–Legendre interior nodes, choosing operators by
    /// [`Crossover`] at `settings.threshold`.
    pub fn solve(n: usize, settings: &CollocationSettings<T>) -> Result<Self, CollocationError> {
        settings.validate()?;
        let nodes = NodeSet::gauss_legendre(n, settings.node_method)?;
        let strategy = Crossover {
            threshold: settings.threshold,
        };
        Self::solve_with(nodes, &strategy, settings)
    }

    /// Solve on a given node set with any differentiation strategy.
    pub fn solve_with(
        nodes: NodeSet<T>,
        strategy: &dyn DifferentiationStrategy<T>,
        settings: &CollocationSettings<T>,
    ) -> Result<Self, CollocationError> {
        settings.validate()?;
        if settings.ln_floor >= nodes[1] {
            return Err(InputError::LnFloorOutOfRange.into());
        }
        let operators = strategy.build(nodes.as_slice())?;
        let system = BoundaryValueSystem::assemble(&nodes, &operators, settings.ln_floor)?;
        let solution = system.solve()?;
        debug!(
            "collocation: n = {}, {:?} operators, solved",
            nodes.interior_len(),
            operators.branch()
        );
        Ok(Self {
            settings: *settings,
            nodes,
            operators,
            solution,
        })
    }

    pub fn settings(&self) -> &CollocationSettings<T> {
        &self.settings
    }

    pub fn nodes(&self) -> &NodeSet<T> {
        &self.nodes
    }

    pub fn operators(&self) -> &DiffOperators<T> {
        &self.operators
    }

    pub fn solution(&self) -> &NodalSolution<T> {
        &self.solution
    }

    /// Field with the configured reconstruction.
    pub fn field(&self) -> Result<ReconstructedField<T>, CollocationError> {
        self.field_with(self.settings.reconstruction)
    }

    /// Field with an explicit reconstruction.
    pub fn field_with(
        &self,
        method: Reconstruction,
    ) -> Result<ReconstructedField<T>, CollocationError> {
        ReconstructedField::new(&self.nodes, &self.solution, method, self.settings.ln_floor)
    }

    /// Comparator over the configured field.
    pub fn compare(&self, params: HeatParams<T>) -> Result<Comparator<T>, CollocationError> {
        Comparator::new(self.field()?, params)
    }
}
