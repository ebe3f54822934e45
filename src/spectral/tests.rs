use super::*;
use crate::dynmatrix::DynVector;
use crate::special::erf;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{msg}: {a} vs {b}, diff = {}, tol = {tol}",
        (a - b).abs()
    );
}

fn solve(n: usize) -> Collocation<f64> {
    Collocation::solve(n, &CollocationSettings::default()).unwrap()
}

fn solve_with_reconstruction(n: usize, method: Reconstruction) -> Collocation<f64> {
    let settings = CollocationSettings {
        reconstruction: method,
        ..CollocationSettings::<f64>::default()
    };
    Collocation::solve(n, &settings).unwrap()
}

/// Largest `|y_i − erf(−ln x_i)|` over the interior nodes.
fn nodal_error(c: &Collocation<f64>) -> f64 {
    c.nodes()
        .interior()
        .iter()
        .zip(c.solution().interior())
        .fold(0.0, |acc, (&x, &y)| acc.max((y - erf(-x.ln())).abs()))
}

const ALL_METHODS: [Reconstruction; 4] = [
    Reconstruction::Polynomial,
    Reconstruction::Barycentric,
    Reconstruction::Linear,
    Reconstruction::CubicSpline,
];

// ======================== Nodes ========================

#[test]
fn node_set_shape() {
    for n in [1, 2, 6, 20, 50] {
        let nodes = gauss_legendre_nodes::<f64>(n).unwrap();
        assert_eq!(nodes.len(), n + 2);
        assert_eq!(nodes.interior_len(), n);
        assert_eq!(nodes[0], 0.0);
        assert_eq!(nodes[n + 1], 1.0);
        for i in 1..nodes.len() {
            assert!(nodes[i] > nodes[i - 1], "n = {n}, node {i}");
        }
        // Legendre roots are symmetric about the midpoint
        for i in 1..=n {
            assert_near(nodes[i] + nodes[n + 1 - i], 1.0, 1e-14, "symmetry");
        }
    }
}

#[test]
fn n6_nodes() {
    let expected = [
        0.0,
        0.033765242898423975,
        0.1693953067668677,
        0.3806904069584015,
        0.6193095930415985,
        0.8306046932331324,
        0.966234757101576,
        1.0,
    ];
    let nodes = gauss_legendre_nodes::<f64>(6).unwrap();
    for (i, &e) in expected.iter().enumerate() {
        assert_near(nodes[i], e, 1e-14, "n = 6 node");
    }
}

#[test]
fn golub_welsch_matches_newton() {
    for n in [1, 2, 5, 20, 60] {
        let newton = GaussLegendre::<f64>::with_method(n, NodeMethod::Newton).unwrap();
        let gw = GaussLegendre::<f64>::with_method(n, NodeMethod::GolubWelsch).unwrap();
        for i in 0..n {
            assert_near(gw.nodes()[i], newton.nodes()[i], 1e-12, "node");
            assert_near(gw.weights()[i], newton.weights()[i], 1e-12, "weight");
        }
    }
}

#[test]
fn quadrature_weights_and_exactness() {
    for n in [1, 4, 12] {
        let rule = GaussLegendre::<f64>::new(n).unwrap();
        let total: f64 = rule.weights().iter().sum();
        assert_near(total, 2.0, 1e-13, "weight sum");
        // Degree 2n − 1 on [0, 1]: ∫ x^(2n−1) = 1/(2n)
        let deg = 2 * n as i32 - 1;
        let v = rule.integrate(0.0, 1.0, |x| x.powi(deg));
        assert_near(v, 1.0 / (2.0 * n as f64), 1e-13, "exactness");
    }
}

#[test]
fn golub_welsch_node_set() {
    let gw = NodeSet::<f64>::gauss_legendre(6, NodeMethod::GolubWelsch).unwrap();
    let newton = gauss_legendre_nodes::<f64>(6).unwrap();
    for i in 0..8 {
        assert_near(gw[i], newton[i], 1e-13, "node set");
    }
}

#[test]
fn zero_nodes_rejected() {
    assert_eq!(
        gauss_legendre_nodes::<f64>(0).unwrap_err(),
        CollocationError::InvalidInput(InputError::TooFewNodes)
    );
    assert_eq!(
        GaussLegendre::<f64>::new(0).unwrap_err(),
        CollocationError::InvalidInput(InputError::TooFewNodes)
    );
}

#[test]
fn custom_node_set_validation() {
    assert!(NodeSet::from_points(vec![0.0_f64, 0.4, 1.0]).is_ok());
    assert_eq!(
        NodeSet::from_points(vec![0.0_f64, 1.0]).unwrap_err(),
        CollocationError::InvalidInput(InputError::TooFewNodes)
    );
    assert_eq!(
        NodeSet::from_points(vec![0.1_f64, 0.4, 1.0]).unwrap_err(),
        CollocationError::InvalidInput(InputError::Endpoints)
    );
    assert_eq!(
        NodeSet::from_points(vec![0.0_f64, 0.4, 0.4, 1.0]).unwrap_err(),
        CollocationError::DegenerateNodes { index: 2 }
    );
    assert_eq!(
        NodeSet::from_points(vec![0.0_f64, f64::NAN, 1.0]).unwrap_err(),
        CollocationError::InvalidInput(InputError::NonFinite("node"))
    );
}

// ======================== Operators ========================

#[test]
fn barycentric_row_sums_vanish() {
    for n in [1, 6, 20, 40] {
        let nodes = gauss_legendre_nodes::<f64>(n).unwrap();
        let ops = Barycentric.build(nodes.as_slice()).unwrap();
        for (i, s) in ops.first().row_sums().into_iter().enumerate() {
            assert!(s.abs() < 1e-8, "n = {n}, row {i}: {s}");
        }
    }
}

#[test]
fn barycentric_second_is_square_of_first() {
    let nodes = gauss_legendre_nodes::<f64>(12).unwrap();
    let ops = Barycentric.build(nodes.as_slice()).unwrap();
    let squared = ops.first() * ops.first();
    assert_eq!(ops.second().max_abs_diff(&squared), 0.0);
    assert_eq!(ops.branch(), Branch::Barycentric);
}

#[test]
fn operators_exact_on_polynomials() {
    // p(x) = x⁶ − 2x³ + x has degree n + 1 for n = 5
    let nodes = gauss_legendre_nodes::<f64>(5).unwrap();
    let xs = nodes.as_slice();
    let p = DynVector::from_vec(xs.iter().map(|&x| x.powi(6) - 2.0 * x.powi(3) + x).collect());
    let strategies: [&dyn DifferentiationStrategy<f64>; 2] = [&Vandermonde, &Barycentric];
    for strategy in strategies {
        let ops = strategy.build(xs).unwrap();
        let dp = ops.first() * &p;
        let d2p = ops.second() * &p;
        for (i, &x) in xs.iter().enumerate() {
            assert_near(dp[i], 6.0 * x.powi(5) - 6.0 * x * x + 1.0, 1e-9, "p'");
            assert_near(d2p[i], 30.0 * x.powi(4) - 12.0 * x, 1e-9, "p''");
        }
    }
}

#[test]
fn strategies_agree_for_small_n() {
    let nodes = gauss_legendre_nodes::<f64>(6).unwrap();
    let v = Vandermonde.build(nodes.as_slice()).unwrap();
    let b = Barycentric.build(nodes.as_slice()).unwrap();
    assert_eq!(v.branch(), Branch::Vandermonde);
    assert!(v.first().max_abs_diff(b.first()) < 1e-8);
    assert!(v.second().max_abs_diff(b.second()) < 1e-6);
}

#[test]
fn crossover_selects_by_interior_count() {
    assert_eq!(solve(19).operators().branch(), Branch::Vandermonde);
    assert_eq!(solve(20).operators().branch(), Branch::Barycentric);

    let settings = CollocationSettings {
        threshold: 0,
        ..CollocationSettings::<f64>::default()
    };
    let c = Collocation::solve(1, &settings).unwrap();
    assert_eq!(c.operators().branch(), Branch::Barycentric);
}

#[test]
fn ill_conditioned_vandermonde_is_singular() {
    let nodes = gauss_legendre_nodes::<f64>(25).unwrap();
    assert_eq!(
        Vandermonde.build(nodes.as_slice()).unwrap_err(),
        CollocationError::SingularSystem
    );
    // still accepted just below the default crossover
    let nodes = gauss_legendre_nodes::<f64>(19).unwrap();
    assert_eq!(Vandermonde.build(nodes.as_slice()).unwrap().branch(), Branch::Vandermonde);
}

#[test]
fn raised_threshold_reports_singular_system() {
    let settings = CollocationSettings {
        threshold: 100,
        ..CollocationSettings::<f64>::default()
    };
    for n in [25, 30] {
        assert_eq!(
            Collocation::solve(n, &settings).unwrap_err(),
            CollocationError::SingularSystem,
            "n = {n}"
        );
    }
    assert!(nodal_error(&Collocation::solve(10, &settings).unwrap()) < 1e-3);
}

#[test]
fn barycentric_builds_on_many_nodes() {
    let nodes = gauss_legendre_nodes::<f64>(600).unwrap();
    let ops = Barycentric.build(nodes.as_slice()).unwrap();
    assert_eq!(ops.size(), 602);
    assert!(ops.first().is_finite());
    assert!(ops.second().is_finite());
}

#[test]
fn duplicate_nodes_are_degenerate() {
    let nodes = [0.0_f64, 0.2, 0.5, 0.5, 0.8, 1.0];
    let crossover = Crossover::default();
    let strategies: [&dyn DifferentiationStrategy<f64>; 3] = [&Vandermonde, &Barycentric, &crossover];
    for strategy in strategies {
        assert_eq!(
            strategy.build(&nodes).unwrap_err(),
            CollocationError::DegenerateNodes { index: 3 }
        );
    }
}

// ======================== Boundary-value solve ========================

#[test]
fn boundary_values_are_fixed() {
    for n in [1, 2, 6, 19, 20, 30] {
        let c = solve(n);
        let y = c.solution();
        assert_eq!(y.len(), n + 2);
        assert_eq!(y[0], 1.0, "n = {n}");
        assert_eq!(y[n + 1], 0.0, "n = {n}");
    }
}

#[test]
fn n6_solution_values() {
    let expected = [
        1.0,
        0.9987967087537822,
        0.9885492649220677,
        0.8276877121493538,
        0.5019964175855807,
        0.20704618936543462,
        0.03870357850093274,
        0.0,
    ];
    let c = solve(6);
    for (i, &e) in expected.iter().enumerate() {
        assert_near(c.solution()[i], e, 1e-9, "n = 6 solution");
    }
}

#[test]
fn nodal_solution_converges_to_erf() {
    assert!(nodal_error(&solve(1)) < 0.08);
    assert!(nodal_error(&solve(6)) < 2e-3);
    assert!(nodal_error(&solve(10)) < 1e-4);
    assert!(nodal_error(&solve(20)) < 1e-6);
    assert!(nodal_error(&solve(30)) < 1e-8);
}

#[test]
fn single_interior_node_system() {
    let c = solve(1);
    let system =
        BoundaryValueSystem::assemble(c.nodes(), c.operators(), c.settings().ln_floor).unwrap();
    assert_eq!(system.size(), 1);
    assert_eq!(system.matrix().nrows(), 1);
    assert_eq!(system.matrix().ncols(), 1);
    assert_eq!(c.solution().len(), 3);
}

#[test]
fn solve_with_custom_nodes() {
    let nodes = NodeSet::from_points(vec![0.0_f64, 0.1, 0.3, 0.6, 0.9, 1.0]).unwrap();
    let c = Collocation::solve_with(nodes, &Barycentric, &CollocationSettings::default()).unwrap();
    assert_eq!(c.solution().far_field(), 1.0);
    assert_eq!(c.solution().surface(), 0.0);
    assert!(nodal_error(&c) < 0.1);
}

#[test]
fn invalid_settings() {
    let mut settings = CollocationSettings::<f64>::default();
    settings.ln_floor = 0.0;
    assert_eq!(
        Collocation::solve(6, &settings).unwrap_err(),
        CollocationError::InvalidInput(InputError::NotPositive("ln_floor"))
    );
    settings.ln_floor = f64::NAN;
    assert_eq!(
        Collocation::solve(6, &settings).unwrap_err(),
        CollocationError::InvalidInput(InputError::NonFinite("ln_floor"))
    );
    // Above the smallest interior node (≈ 0.0338 for n = 6)
    settings.ln_floor = 0.05;
    assert_eq!(
        Collocation::solve(6, &settings).unwrap_err(),
        CollocationError::InvalidInput(InputError::LnFloorOutOfRange)
    );
}

// ======================== Reconstruction ========================

#[test]
fn round_trip_at_nodes() {
    // Q is too ill-conditioned at n = 25 for monomial coefficients
    let cases = ALL_METHODS.iter().map(|&m| (6, m)).chain(
        ALL_METHODS[1..].iter().map(|&m| (25, m)),
    );
    for (n, method) in cases {
        let c = solve_with_reconstruction(n, method);
        let field = c.field().unwrap();
        assert_eq!(field.method(), method);
        for (&x, &y) in c.nodes().interior().iter().zip(c.solution().interior()) {
            assert_near(field.eval(-x.ln()), y, 1e-9, "round trip");
        }
    }
}

#[test]
fn field_limits() {
    for method in ALL_METHODS {
        let field = solve_with_reconstruction(6, method).field().unwrap();
        assert_eq!(field.eval(0.0), 0.0, "{method:?} at surface");
        assert_eq!(field.eval(f64::INFINITY), 1.0, "{method:?} at infinity");
        assert_eq!(field.eval(-2.0), 0.0, "{method:?} below range");
        assert!(field.eval(f64::NAN).is_nan());
        assert_eq!(
            field.try_eval(f64::NAN).unwrap_err(),
            CollocationError::NumericOverflow
        );
        assert!(field.try_eval(1.5).unwrap().is_finite());
    }
}

#[test]
fn piecewise_fields_clamp_past_last_knot() {
    for method in [Reconstruction::Linear, Reconstruction::CubicSpline] {
        let field = solve_with_reconstruction(6, method).field().unwrap();
        // −ln(1e-12) ≈ 27.6 is the last knot
        assert_eq!(field.eval(30.0), 1.0);
        assert_eq!(field.eval(1e300), 1.0);
    }
}

#[test]
fn polynomial_forms_agree() {
    let c = solve(10);
    let bary = c.field_with(Reconstruction::Barycentric).unwrap();
    let poly = c.field_with(Reconstruction::Polynomial).unwrap();
    let etas: Vec<f64> = (0..50).map(|k| 0.1 * k as f64).collect();
    for (a, b) in bary.eval_many(&etas).into_iter().zip(poly.eval_many(&etas)) {
        assert_near(a, b, 1e-9, "barycentric vs polynomial");
    }
}

#[test]
fn field_rejects_bad_ln_floor() {
    let c = solve(6);
    assert_eq!(
        ReconstructedField::new(c.nodes(), c.solution(), Reconstruction::Linear, 0.5).unwrap_err(),
        CollocationError::InvalidInput(InputError::LnFloorOutOfRange)
    );
}

// ======================== Comparator ========================

#[test]
fn scenario_n6_tau_half() {
    for method in [Reconstruction::Barycentric, Reconstruction::Polynomial] {
        let cmp = solve_with_reconstruction(6, method)
            .compare(HeatParams::default())
            .unwrap();
        let profile = cmp.profile(0.5, 1001).unwrap();
        assert_eq!(profile.len(), 1001);
        assert_eq!(profile.tau(), 0.5);

        let first = profile.rows()[0];
        assert_eq!(first.x, 0.0);
        assert_near(first.numerical, 273.0, 1e-9, "T_num at X = 0");
        assert_near(first.analytical, 273.0, 1e-9, "T_exact at X = 0");
        assert_eq!(profile.rows()[1000].x, 1.0);

        let err = profile.max_abs_error();
        assert!(err < 0.2, "{method:?}: max error {err} K");
    }
}

#[test]
fn linear_reconstruction_is_coarser() {
    let c = solve(6);
    let coarse = Comparator::new(
        c.field_with(Reconstruction::Linear).unwrap(),
        HeatParams::default(),
    )
    .unwrap();
    let fine = c.compare(HeatParams::default()).unwrap();
    let e_lin = coarse.profile(0.5, 1001).unwrap().max_abs_error();
    let e_bary = fine.profile(0.5, 1001).unwrap().max_abs_error();
    assert!(e_lin > e_bary);
    assert!(e_lin < 5.0);
}

#[test]
fn early_time_tends_to_ts() {
    let cmp = solve(6).compare(HeatParams::default()).unwrap();
    for x in [0.01, 0.5, 1.0] {
        assert_near(cmp.numerical(x, 1e-12).unwrap(), 373.0, 1e-9, "T_num");
        assert_near(cmp.analytical(x, 1e-12).unwrap(), 373.0, 1e-9, "T_exact");
    }
}

#[test]
fn temperatures_decrease_with_tau() {
    let cmp = solve(6).compare(HeatParams::default()).unwrap();
    let taus = [0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 1000.0];
    let x = 0.01;
    let num: Vec<f64> = taus.iter().map(|&t| cmp.numerical(x, t).unwrap()).collect();
    let exact: Vec<f64> = taus.iter().map(|&t| cmp.analytical(x, t).unwrap()).collect();
    for series in [&num, &exact] {
        for w in series.windows(2) {
            assert!(w[1] < w[0] - 1e-9, "not decreasing: {} then {}", w[0], w[1]);
        }
        for &t in series.iter() {
            assert!((273.0..=373.0).contains(&t));
        }
    }
}

#[test]
fn profile_rejects_bad_input() {
    let cmp = solve(6).compare(HeatParams::default()).unwrap();
    assert_eq!(
        cmp.profile(0.5, 0).unwrap_err(),
        CollocationError::InvalidInput(InputError::EmptyGrid)
    );
    assert_eq!(
        cmp.profile(-1.0, 10).unwrap_err(),
        CollocationError::InvalidInput(InputError::NotPositive("tau"))
    );
    assert_eq!(
        cmp.profile(f64::NAN, 10).unwrap_err(),
        CollocationError::InvalidInput(InputError::NonFinite("tau"))
    );
    let bad = HeatParams {
        alpha: -1.0,
        ..HeatParams::default()
    };
    assert_eq!(
        solve(6).compare(bad).unwrap_err(),
        CollocationError::InvalidInput(InputError::NotPositive("alpha"))
    );
}

#[test]
fn pointwise_temperatures_reject_bad_input() {
    let cmp = solve(6).compare(HeatParams::default()).unwrap();
    let cases = [
        (0.5, -1.0, InputError::NotPositive("tau")),
        (0.5, 0.0, InputError::NotPositive("tau")),
        (0.5, f64::INFINITY, InputError::NonFinite("tau")),
        (f64::NAN, 1.0, InputError::NonFinite("x")),
        (-0.5, 1.0, InputError::OutsideSlab),
        (2.0, 1.0, InputError::OutsideSlab),
    ];
    for (x, tau, err) in cases {
        let expected = CollocationError::InvalidInput(err);
        assert_eq!(cmp.numerical(x, tau).unwrap_err(), expected, "X = {x}, tau = {tau}");
        assert_eq!(cmp.analytical(x, tau).unwrap_err(), expected, "X = {x}, tau = {tau}");
    }
    // both slab faces are valid positions
    assert_eq!(cmp.numerical(0.0, 1.0).unwrap(), 273.0);
    assert!(cmp.analytical(1.0, 1.0).unwrap().is_finite());
}

#[test]
fn error_grid_shape_and_values() {
    let cmp = solve(6).compare(HeatParams::default()).unwrap();
    let grid = cmp.error_grid(11, 10.0, 4).unwrap();
    assert_eq!(grid.values().nrows(), 11);
    assert_eq!(grid.values().ncols(), 4);
    assert_eq!(grid.taus(), &[2.5, 5.0, 7.5, 10.0]);
    assert_eq!(grid.xs()[10], 1.0);
    assert_eq!(grid.non_finite_count(), 0);
    for (i, &x) in grid.xs().iter().enumerate() {
        for (j, &tau) in grid.taus().iter().enumerate() {
            let expected = cmp.analytical(x, tau).unwrap() - cmp.numerical(x, tau).unwrap();
            assert_eq!(grid.get(i, j), expected);
        }
    }
    // X = 0 is exact in both
    for j in 0..4 {
        assert_eq!(grid.get(0, j), 0.0);
    }
    assert!(grid.max_abs() < 1.0);
}

#[test]
fn error_field_rejects_bad_input() {
    let cmp = solve(6).compare(HeatParams::default()).unwrap();
    assert_eq!(
        cmp.error_field(&[], &[1.0]).unwrap_err(),
        CollocationError::InvalidInput(InputError::EmptyGrid)
    );
    assert_eq!(
        cmp.error_field(&[0.1], &[1.0, 0.0]).unwrap_err(),
        CollocationError::InvalidInput(InputError::NotPositive("tau"))
    );
    assert_eq!(
        cmp.error_field(&[f64::INFINITY], &[1.0]).unwrap_err(),
        CollocationError::InvalidInput(InputError::NonFinite("x"))
    );
    assert_eq!(
        cmp.error_field(&[-0.5, 2.0], &[0.5]).unwrap_err(),
        CollocationError::InvalidInput(InputError::OutsideSlab)
    );
    assert_eq!(
        cmp.error_field(&[0.0, 1.0 + 1e-9], &[0.5]).unwrap_err(),
        CollocationError::InvalidInput(InputError::OutsideSlab)
    );
    assert_eq!(
        cmp.error_grid(0, 1.0, 3).unwrap_err(),
        CollocationError::InvalidInput(InputError::EmptyGrid)
    );
}

#[test]
fn csv_shapes() {
    let cmp = solve(6).compare(HeatParams::default()).unwrap();

    let mut out = String::new();
    cmp.error_field(&[0.0, 0.5], &[1.0, 2.5]).unwrap().write_csv(&mut out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "X,1.000000,2.500000");
    assert_eq!(lines[1], "0.000000,0.000000,0.000000");
    assert!(lines[2].starts_with("0.500000,"));
    assert_eq!(lines[2].split(',').count(), 3);
    assert_eq!(lines[0].split(',').count(), lines[1].split(',').count());

    let mut out = String::new();
    cmp.profile(1.0, 5).unwrap().write_csv(&mut out).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "X, T_numerical, T_analytical");
    assert!(lines[5].starts_with("1.000000,"));
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_grid_matches_pointwise() {
    let cmp = solve(25).compare(HeatParams::default()).unwrap();
    let xs: Vec<f64> = (0..64).map(|k| k as f64 / 63.0).collect();
    let taus: Vec<f64> = (1..=32).map(|k| k as f64 * 3.0).collect();
    let grid = cmp.error_field(&xs, &taus).unwrap();
    for (i, &x) in xs.iter().enumerate() {
        for (j, &tau) in taus.iter().enumerate() {
            let expected = cmp.analytical(x, tau).unwrap() - cmp.numerical(x, tau).unwrap();
            assert_eq!(grid.get(i, j), expected);
        }
    }
}

// ======================== f32 ========================

#[test]
fn single_precision_solve() {
    let settings = CollocationSettings {
        threshold: 0,
        ..CollocationSettings::<f32>::default()
    };
    let c = Collocation::<f32>::solve(6, &settings).unwrap();
    assert_eq!(c.solution()[0], 1.0);
    assert_eq!(c.solution()[7], 0.0);
    for (&x, &y) in c.nodes().interior().iter().zip(c.solution().interior()) {
        let exact = erf(-(x as f64).ln());
        assert!((y as f64 - exact).abs() < 1e-2, "f32 node {x}: {y} vs {exact}");
    }
    let field = c.field().unwrap();
    assert_eq!(field.eval(0.0), 0.0);
}

#[test]
fn single_precision_default_threshold() {
    let defaults = CollocationSettings::<f32>::default();
    assert_eq!(defaults.threshold, 7);
    for n in 1..=12 {
        let c = Collocation::<f32>::solve(n, &defaults).unwrap();
        let expected = if n < 7 { Branch::Vandermonde } else { Branch::Barycentric };
        assert_eq!(c.operators().branch(), expected, "n = {n}");
        for (&x, &y) in c.nodes().interior().iter().zip(c.solution().interior()) {
            let exact = erf(-(x as f64).ln());
            assert!((y as f64 - exact).abs() < 0.1, "n = {n}, node {x}: {y} vs {exact}");
        }
    }

    // Vandermonde in single precision does not survive the f64 crossover
    let raised = CollocationSettings {
        threshold: DEFAULT_THRESHOLD,
        ..defaults
    };
    for n in [10, 12, 15] {
        assert_eq!(
            Collocation::<f32>::solve(n, &raised).unwrap_err(),
            CollocationError::SingularSystem,
            "n = {n}"
        );
    }
}

// ======================== Errors ========================

#[test]
fn error_display_and_conversions() {
    use crate::interp::InterpError;
    use crate::linalg::LinalgError;

    assert!(CollocationError::DegenerateNodes { index: 3 }
        .to_string()
        .contains('3'));
    assert!(CollocationError::InvalidInput(InputError::NotPositive("tau"))
        .to_string()
        .contains("tau"));
    assert_eq!(
        CollocationError::from(LinalgError::Singular),
        CollocationError::SingularSystem
    );
    assert_eq!(
        CollocationError::from(InterpError::NotSorted),
        CollocationError::InvalidInput(InputError::LnFloorOutOfRange)
    );
}
