// viz_examples/src/main.rs
use anyhow::Result;
use primitive_perceptron::{
    accuracy, generate_linearly_separable_data, print_iterations_table, shuffled_training_order,
    Perceptron, Point, PointClass,
};

mod plot;

fn main() -> Result<()> {
    #[cfg(feature = "online")]
    {
        println!("=== Online training ===");
        let class_a = vec![Point::new(6.0, 10.0), Point::new(0.0, -3.0)];
        let class_b = vec![Point::new(-4.0, -13.0), Point::new(18.0, 2.0)];
        let labeled: Vec<(Point, PointClass)> = class_a
            .iter()
            .map(|&p| (p, PointClass::A))
            .chain(class_b.iter().map(|&p| (p, PointClass::B)))
            .collect();

        let mut model = Perceptron::with_defaults();
        for _ in 0..5 {
            model.start_new_iteration();
            // Shuffle sample order each iteration; order changes the
            // online trajectory
            for idx in shuffled_training_order(labeled.len()) {
                let (point, class) = labeled[idx];
                model.train(point, class)?;
            }
        }

        print_iterations_table(&model);
        println!("{}", model);
        println!("Accuracy: {:.2}%", accuracy(&labeled, &model) * 100.0);

        let boundary = model
            .decision_boundary()
            .filter(|params| params.m.is_finite() && params.n.is_finite());
        match boundary {
            Some(params) => println!("Boundary: y = {:.4}x + {:.4}", params.m, params.n),
            None => println!("Boundary: undefined"),
        }

        let config = plot::GridConfig::default();
        print!(
            "{}",
            plot::render_scatter_plot(&config, &class_a, &class_b, boundary, Some(&model))
        );

        // Demo: export the audit trail for tabular display elsewhere
        println!(
            "History JSON:\n{}",
            serde_json::to_string_pretty(model.iterations())?
        );
    }

    #[cfg(feature = "batch")]
    {
        println!("\n=== Batch training ===");
        let data = generate_linearly_separable_data(20, 1.0);
        let class_a: Vec<Point> = data
            .iter()
            .filter(|(_, class)| *class == PointClass::A)
            .map(|(point, _)| *point)
            .collect();
        let class_b: Vec<Point> = data
            .iter()
            .filter(|(_, class)| *class == PointClass::B)
            .map(|(point, _)| *point)
            .collect();

        let mut model = Perceptron::with_defaults();
        model.set_learning_rate(0.1);
        for _ in 0..25 {
            model.start_new_iteration();
            model.train_batch(&class_a, &class_b)?;
        }

        if let Some(summary) = model
            .current_iteration()
            .and_then(|iteration| iteration.summary.as_ref())
        {
            println!(
                "Final weights: b={:.4} w0={:.4} w1={:.4} ({} samples/batch)",
                summary.bias, summary.w0, summary.w1, summary.sample_count
            );
        }
        println!("Accuracy: {:.2}%", accuracy(&data, &model) * 100.0);

        let boundary = model
            .decision_boundary()
            .filter(|params| params.m.is_finite() && params.n.is_finite());
        match boundary {
            Some(params) => println!("Boundary: y = {:.4}x + {:.4}", params.m, params.n),
            None => println!("Boundary: undefined"),
        }

        let config = plot::GridConfig::default();
        print!(
            "{}",
            plot::render_scatter_plot(&config, &class_a, &class_b, boundary, Some(&model))
        );
    }

    Ok(())
}
