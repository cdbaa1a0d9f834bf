use crate::config::{SolverConfig, SolverKind};
use crate::solver::delegated::DelegatedSolver;
use crate::solver::elimination::GaussianElimination;
use crate::solver::LinearSolver;

/// Build a boxed solver from a `SolverConfig`.
///
/// The delegated strategy uses the system LAPACK when the crate is built
/// with the `lapack` feature and the pure-Rust reference routine otherwise.
/// Its singular check is the routine's own exact-zero pivot test, so
/// `singular_tolerance` only applies to elimination.
pub fn build_solver(config: &SolverConfig) -> Box<dyn LinearSolver> {
    let solver: Box<dyn LinearSolver> = match config.strategy {
        SolverKind::Elimination => Box::new(GaussianElimination::new(config.singular_tolerance)),

        #[cfg(feature = "lapack")]
        SolverKind::Delegated => Box::new(DelegatedSolver::new(crate::solver::delegated::LapackGesv)),

        #[cfg(not(feature = "lapack"))]
        SolverKind::Delegated => Box::new(DelegatedSolver::new(crate::solver::delegated::ReferenceGesv)),
    };
    log::debug!("Using linear solver: {}", solver.name());
    solver
}
