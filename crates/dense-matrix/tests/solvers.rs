//! Integration tests for the linear solver strategies and the factory.

use dense_matrix::config::{SolverConfig, SolverKind};
use dense_matrix::solver::{
    build_solver, DelegatedSolver, GaussianElimination, LinearSolver, ReferenceGesv,
};
use dense_matrix::{Matrix, MatrixError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn m(rows: &[&[f64]]) -> Matrix {
    Matrix::from_rows(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
}

fn both_solvers() -> Vec<Box<dyn LinearSolver>> {
    vec![
        Box::new(GaussianElimination::default()),
        Box::new(DelegatedSolver::new(ReferenceGesv)),
    ]
}

// ---------------------------------------------------------------------------
// Shared behavior
// ---------------------------------------------------------------------------

#[test]
fn both_strategies_solve_simple_system() {
    let a = m(&[&[2.0, 1.0], &[1.0, 1.0]]);
    let b = m(&[&[3.0], &[2.0]]);
    let expected = m(&[&[1.0], &[1.0]]);

    for solver in both_solvers() {
        let x = solver.solve(&a, &b).unwrap();
        assert!(x.approx_eq(&expected, 1e-12), "{} returned {:?}", solver.name(), x);
    }
}

#[test]
fn solve_leaves_inputs_untouched() {
    let a = m(&[&[0.0, 1.0], &[1.0, 0.0]]);
    let b = m(&[&[2.0], &[3.0]]);
    let (a0, b0) = (a.clone(), b.clone());

    for solver in both_solvers() {
        let x = solver.solve(&a, &b).unwrap();
        assert!(x.approx_eq(&m(&[&[3.0], &[2.0]]), 1e-12));
        assert_eq!(a, a0);
        assert_eq!(b, b0);
    }
}

#[test]
fn strategies_agree_on_random_systems() {
    let mut rng = StdRng::seed_from_u64(2024);
    let elimination = GaussianElimination::default();
    let delegated = DelegatedSolver::new(ReferenceGesv);

    for n in [1usize, 2, 3, 5, 8, 12] {
        let mut a = Matrix::zeros(n, n).unwrap();
        for i in 0..n {
            for j in 0..n {
                a.set(i, j, rng.gen_range(-1.0..1.0));
            }
            a.add_to(i, i, n as f64);
        }
        let mut b = Matrix::zeros(n, 2).unwrap();
        for i in 0..n {
            for j in 0..2 {
                b.set(i, j, rng.gen_range(-10.0..10.0));
            }
        }

        let x1 = elimination.solve(&a, &b).unwrap();
        let x2 = delegated.solve(&a, &b).unwrap();
        assert_eq!(x1.shape(), (n, 2));
        assert!(x1.approx_eq(&x2, 1e-9), "solvers disagree for order {}", n);
        assert!(a.multiply(&x1).unwrap().approx_eq(&b, 1e-9));
    }
}

#[test]
fn singular_systems_are_reported() {
    let a = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
    let b = m(&[&[1.0], &[2.0]]);
    for solver in both_solvers() {
        assert_eq!(solver.solve(&a, &b).unwrap_err(), MatrixError::SingularMatrix);
    }
}

#[test]
fn shape_errors_are_reported() {
    let rect = Matrix::ones(2, 3).unwrap();
    let b = Matrix::ones(2, 1).unwrap();
    let square = Matrix::identity(2).unwrap();
    let short_b = Matrix::ones(3, 1).unwrap();

    for solver in both_solvers() {
        assert!(matches!(solver.solve(&rect, &b), Err(MatrixError::InvalidMatrix(_))));
        assert_eq!(
            solver.solve(&square, &short_b).unwrap_err(),
            MatrixError::DimensionMismatch {
                op: "solve",
                left: (2, 2),
                right: (3, 1),
            }
        );
    }
}

// ---------------------------------------------------------------------------
// Elimination tolerance
// ---------------------------------------------------------------------------

#[test]
fn strategies_agree_on_scaled_identity() {
    let a = Matrix::identity(2).unwrap().scale(1e-13);
    let b = m(&[&[1e-13], &[1e-13]]);
    let expected = m(&[&[1.0], &[1.0]]);

    for solver in both_solvers() {
        let x = solver.solve(&a, &b).unwrap();
        assert!(x.approx_eq(&expected, 1e-12), "{} returned {:?}", solver.name(), x);
    }
}

#[test]
fn elimination_tolerance_is_relative_to_coefficients() {
    let nearly = m(&[&[1.0, 1.0], &[1.0, 1.0 + 1e-14]]);
    let b = m(&[&[2.0], &[2.0]]);

    let strict = GaussianElimination::default();
    assert_eq!(strict.solve(&nearly, &b).unwrap_err(), MatrixError::SingularMatrix);
    assert_eq!(
        strict.solve(&nearly.scale(1e8), &b).unwrap_err(),
        MatrixError::SingularMatrix
    );

    let loose = GaussianElimination::new(1e-16);
    assert!(loose.solve(&nearly, &b).is_ok());

    // The delegated routine only rejects exact zeros.
    assert!(DelegatedSolver::new(ReferenceGesv).solve(&nearly, &b).is_ok());
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

#[test]
fn factory_builds_elimination_by_default() {
    let solver = build_solver(&SolverConfig::default());
    assert_eq!(solver.name(), "gaussian_elimination");
}

#[cfg(not(feature = "lapack"))]
#[test]
fn factory_builds_reference_routine_without_lapack() {
    let config = SolverConfig::new(1e-12, SolverKind::Delegated);
    let solver = build_solver(&config);
    assert_eq!(solver.name(), "reference_dgesv");
}

#[test]
fn factory_passes_tolerance_to_elimination() {
    let a = m(&[&[1.0, 1.0], &[1.0, 1.0 + 1e-14]]);
    let b = m(&[&[2.0], &[2.0]]);

    let strict = build_solver(&SolverConfig::new(1e-12, SolverKind::Elimination));
    assert!(strict.solve(&a, &b).is_err());

    let loose = build_solver(&SolverConfig::new(1e-16, SolverKind::Elimination));
    assert!(loose.solve(&a, &b).is_ok());
}
