//! Completes a small dissimilarity matrix and then a larger synthetic one.
//!
//! Run with `RUST_LOG=debug` to see the per-pair log output in addition to
//! the progress lines printed by the verbose mode.

use rdmfill::prelude::*;

fn print_matrix(matrix: &DMatrix<f64>) {
    for row in matrix.row_iter() {
        let cells: Vec<String> = row
            .iter()
            .map(|v| if v.is_nan() { "   nan".to_string() } else { format!("{v:6.3}") })
            .collect();
        println!("  [{}]", cells.join(", "));
    }
}

/// Distances between points on a circle, a few of them removed.
fn circle_rdm(n: usize, removed: &[(usize, usize)]) -> DMatrix<f64> {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            (angle.cos(), angle.sin())
        })
        .collect();
    let mut matrix = DMatrix::from_fn(n, n, |i, j| {
        let (dx, dy) = (points[i].0 - points[j].0, points[i].1 - points[j].1);
        dx.hypot(dy)
    });
    for &(i, j) in removed {
        matrix[(i, j)] = MISSING;
        matrix[(j, i)] = MISSING;
    }
    matrix
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Four-item RDM ===\n");
    let input = DMatrix::from_row_slice(
        4,
        4,
        &[
            0.0, 1.0, MISSING, 2.0, //
            1.0, 0.0, 1.5, MISSING, //
            MISSING, 1.5, 0.0, 1.2, //
            2.0, MISSING, 1.2, 0.0,
        ],
    );
    println!("Input:");
    print_matrix(&input);
    println!();

    let filled = rdmfill::complete(&input, true)?;
    println!("\nCompleted:");
    print_matrix(&filled);

    println!("\n=== Twelve points on a circle ===\n");
    let truth = circle_rdm(12, &[]);
    let removed = [(0, 6), (1, 7), (2, 3), (4, 9), (5, 11), (8, 10)];
    let input = circle_rdm(12, &removed);

    let completion = complete_detailed(&input, CompletionConfig::default(), false)?;
    println!(
        "Filled {} of {} pairs in {} passes ({:?})",
        completion.filled(),
        completion.initial_missing,
        completion.passes,
        completion.termination_reason
    );
    for &(i, j) in &removed {
        println!(
            "  ({i:2},{j:2}) true {:.3} estimated {:.3}",
            truth[(i, j)],
            completion.matrix[(i, j)]
        );
    }

    Ok(())
}
