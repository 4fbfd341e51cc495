// ============================================================================
// Solving Systems Example
// ============================================================================

use linsys::prelude::*;
use std::sync::Arc;
use tracing::Level;

fn plane(normal: &[&str], constant: &str) -> LinalgResult<Plane> {
    let constant: Scalar = constant.parse()?;
    Ok(Plane::new(Vector::parse(normal)?, constant))
}

fn solve(title: &str, planes: Vec<Plane>) -> LinalgResult<()> {
    println!("=== {} ===\n", title);

    let log = Arc::new(RowOperationLog::new());
    let system = LinearSystemBuilder::new()
        .hyperplanes(planes)
        .with_observer(log.clone())
        .build()?;
    println!("{}\n", system);

    let rref = system.compute_rref()?;
    println!("RREF {}\n", rref);
    println!("Row operations recorded: {}", log.take().len());

    match system.compute_solution()? {
        Solution::Unique(point) => println!("Unique solution: {}", point),
        Solution::Infinite(parametrization) => {
            println!("Infinitely many solutions:\n{}", parametrization)
        },
        Solution::NoSolutions => println!("No solutions"),
    }

    println!("\nRow operations while solving:");
    for operation in log.operations() {
        println!("  {:?}", operation);
    }
    println!();
    Ok(())
}

fn main() -> LinalgResult<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    println!("=== Line Intersections ===\n");
    let first = Line::new(Vector::parse(&["4.046", "2.836"])?, Scalar::new(121, 2));
    let second = Line::new(Vector::parse(&["10.115", "7.09"])?, Scalar::new(3_025, 3));
    println!("{}\n{}", first, second);
    println!("Intersection: {:?}\n", first.intersection_with(&second)?);

    let first = Line::new(Vector::parse(&["7.204", "3.182"])?, Scalar::new(8_680, 3));
    let second = Line::new(Vector::parse(&["8.172", "4.114"])?, Scalar::new(9_883, 3));
    println!("{}\n{}", first, second);
    println!("Intersection: {:?}\n", first.intersection_with(&second)?);

    solve(
        "Inconsistent Planes",
        vec![
            plane(&["5.862", "1.178", "-10.366"], "-8.15")?,
            plane(&["-2.931", "-0.589", "5.183"], "-4.075")?,
        ],
    )?;

    solve(
        "Overdetermined Consistent System",
        vec![
            plane(&["5.262", "2.739", "-9.878"], "-3.441")?,
            plane(&["5.111", "6.358", "7.638"], "-2.152")?,
            plane(&["2.016", "-9.924", "-1.367"], "-9.278")?,
            plane(&["2.167", "-13.543", "-18.883"], "-10.567")?,
        ],
    )?;

    solve(
        "One Free Variable",
        vec![
            plane(&["8.631", "5.112", "-1.816"], "-5.113")?,
            plane(&["4.315", "11.132", "-5.27"], "-6.775")?,
            plane(&["-2.158", "3.01", "-1.727"], "-0.831")?,
        ],
    )?;

    solve(
        "Two Free Variables",
        vec![
            plane(&["0.935", "1.76", "-9.365"], "-9.955")?,
            plane(&["0.187", "0.352", "-1.873"], "-1.991")?,
            plane(&["0.374", "0.704", "-3.746"], "-3.982")?,
            plane(&["-0.561", "-1.056", "5.619"], "5.973")?,
        ],
    )?;

    let verbose = LinearSystem::new(vec![
        plane(&["1", "1"], "3")?,
        plane(&["1", "-1"], "1")?,
    ])?
    .with_observer(Arc::new(LoggingObserver));
    println!("=== Traced Elimination ===\n");
    println!("Status: {:?}", verbose.compute_solution()?.status());

    Ok(())
}
