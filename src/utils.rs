//! Utility functions for training data generation and history inspection.
use crate::history::{Point, PointClass};
use crate::perceptron::Perceptron;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate two linearly separable clusters around the line `y = x`:
/// class A at least `margin` above it, class B at least `margin` below.
pub fn generate_linearly_separable_data(
    n_per_class: usize,
    margin: f64,
) -> Vec<(Point, PointClass)> {
    let mut rng = rand::thread_rng();
    let mut data = Vec::with_capacity(n_per_class * 2);
    for _ in 0..n_per_class {
        let x = rng.gen_range(-10.0..10.0);
        let lift = rng.gen_range(margin..margin + 8.0);
        data.push((Point::new(x, x + lift), PointClass::A));
    }
    for _ in 0..n_per_class {
        let x = rng.gen_range(-10.0..10.0);
        let drop = rng.gen_range(margin..margin + 8.0);
        data.push((Point::new(x, x - drop), PointClass::B));
    }
    data
}

/// Shuffled index order for one training pass over `len` samples.
pub fn shuffled_training_order(len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = rand::thread_rng();
    indices.as_mut_slice().shuffle(&mut rng);
    indices
}

/// Print the full iteration history as a table, one block per iteration.
///
/// Columns mirror the audit trail: weights before the step, the sample,
/// desired output, weighted sum, activation, error, and the deltas.
pub fn print_iterations_table(model: &Perceptron) {
    let sep = format!("+{}+", ["--------"; 12].join("+"));
    println!("{}", sep);
    println!(
        "|{:>8}|{:>8}|{:>8}|{:>8}|{:>8}|{:>8}|{:>8}|{:>8}|{:>8}|{:>8}|{:>8}|{:>8}|",
        "b", "w0", "w1", "x0", "x1", "d", "s", "a", "e", "Δb", "Δw0", "Δw1"
    );
    println!("{}", sep);
    for iteration in model.iterations() {
        for row in &iteration.rows {
            println!(
                "|{:>8.2}|{:>8.2}|{:>8.2}|{:>8.2}|{:>8.2}|{:>8}|{:>8.2}|{:>8}|{:>8}|{:>8.2}|{:>8.2}|{:>8.2}|",
                row.bias,
                row.w0,
                row.w1,
                row.point.x,
                row.point.y,
                row.desired,
                row.weighted_sum,
                row.activation,
                row.error,
                row.delta_bias,
                row.delta_w0,
                row.delta_w1
            );
        }
        if let Some(summary) = &iteration.summary {
            println!(
                "| batch of {}: b={:.2} w0={:.2} w1={:.2} (Δb={:.2} Δw0={:.2} Δw1={:.2})",
                summary.sample_count,
                summary.bias,
                summary.w0,
                summary.w1,
                summary.delta_bias,
                summary.delta_w0,
                summary.delta_w1
            );
        }
        println!("{}", sep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_clusters_are_separable() {
        let data = generate_linearly_separable_data(25, 0.5);
        assert_eq!(data.len(), 50);
        for (point, class) in data {
            match class {
                PointClass::A => assert!(point.y > point.x),
                PointClass::B => assert!(point.y < point.x),
            }
        }
    }

    #[test]
    fn test_shuffled_order_is_a_permutation() {
        let mut order = shuffled_training_order(40);
        assert_eq!(order.len(), 40);
        order.sort_unstable();
        assert_eq!(order, (0..40).collect::<Vec<usize>>());
    }
}
