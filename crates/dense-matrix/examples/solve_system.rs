use anyhow::Result;
use dense_matrix::config::{SolverConfig, SolverKind};
use dense_matrix::io::{parse_matrix, print_matrix};
use dense_matrix::solver::{build_solver, LinearSolver};

// Usage: cargo run --example solve_system -- "[2,1;1,1]" "[3;2]" [elimination|delegated]
fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DENSE_MATRIX_LOG", "error,dense_matrix=info"))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let a = parse_matrix(args.first().map_or("[2,1;1,1]", String::as_str))?;
    let b = parse_matrix(args.get(1).map_or("[3;2]", String::as_str))?;
    let strategy: SolverKind = match args.get(2) {
        Some(name) => name.parse().map_err(anyhow::Error::msg)?,
        None => SolverKind::default(),
    };

    println!("A =");
    print_matrix(&a);
    println!("B =");
    print_matrix(&b);

    let solver = build_solver(&SolverConfig {
        strategy,
        ..SolverConfig::default()
    });
    let x = solver.solve(&a, &b)?;
    println!("X ({}) =", solver.name());
    print_matrix(&x);

    if a.nrows() <= 4 {
        // Cross-check against the cofactor inverse on small systems.
        let via_inverse = a.inverse()?.multiply(&b)?;
        println!("inv(A) * B =");
        print_matrix(&via_inverse);
        println!("det(A) = {}", a.determinant()?);
    }

    Ok(())
}
