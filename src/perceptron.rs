//! Single-neuron perceptron trained by the error-correction (delta) rule.
use crate::activations::{Activation, Heaviside};
use crate::history::{Iteration, IterationRow, Point, PointClass, SummaryRow};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the training entry points.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PerceptronError {
    #[error("no current iteration; call start_new_iteration before training")]
    NoCurrentIteration,
}

/// Parameters of the decision boundary line `y = m*x + n`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFunctionParams {
    pub m: f64,
    pub n: f64,
}

/// Single linear binary classifier with a full training audit trail.
///
/// The model owns its iteration history: every call to a `train` method
/// appends one [`IterationRow`] per sample to the current iteration, and
/// the history is never reordered.
#[derive(Debug)]
pub struct Perceptron {
    bias: f64,
    w0: f64,
    w1: f64,
    learning_rate: f64,
    activation: Arc<dyn Activation + Send + Sync>,
    iterations: Vec<Iteration>,
    next_iteration_id: u64,
    next_row_id: u64,
}

impl Perceptron {
    /// Create a new perceptron with the given initial weights.
    ///
    /// - `bias`, `w0`, `w1`: initial offset and feature weights
    /// - `learning_rate`: rate used by [`train`](Self::train) and
    ///   [`train_batch`](Self::train_batch)
    /// - `activation`: step function mapping weighted sums to 0/1
    pub fn new(
        bias: f64,
        w0: f64,
        w1: f64,
        learning_rate: f64,
        activation: Arc<dyn Activation + Send + Sync>,
    ) -> Self {
        Self {
            bias,
            w0,
            w1,
            learning_rate,
            activation,
            iterations: Vec::new(),
            next_iteration_id: 0,
            next_row_id: 0,
        }
    }

    /// Zero weights, unit learning rate, Heaviside activation.
    pub fn with_defaults() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0, Arc::new(Heaviside))
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn w0(&self) -> f64 {
        self.w0
    }

    pub fn w1(&self) -> f64 {
        self.w1
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f64) {
        self.learning_rate = learning_rate;
    }

    pub fn activation(&self) -> &(dyn Activation + Send + Sync) {
        self.activation.as_ref()
    }

    /// The full training history, oldest iteration first.
    pub fn iterations(&self) -> &[Iteration] {
        &self.iterations
    }

    /// Weighted sum `bias + w0*x + w1*y` from the current weights.
    pub fn weighted_sum(&self, point: Point) -> f64 {
        self.bias + self.w0 * point.x + self.w1 * point.y
    }

    /// Classify a point with the current weights, without training.
    pub fn predict(&self, point: Point) -> PointClass {
        PointClass::from_activation(self.activation.apply(self.weighted_sum(point)))
    }

    /// Open a fresh iteration and make it current. Returns its id.
    ///
    /// The previous iteration (if any) is frozen by being superseded;
    /// there is no explicit close.
    pub fn start_new_iteration(&mut self) -> u64 {
        let id = self.next_iteration_id;
        self.next_iteration_id += 1;
        self.iterations.push(Iteration::new(id));
        id
    }

    /// The most recently started iteration, if any. Never fails.
    pub fn current_iteration(&self) -> Option<&Iteration> {
        self.iterations.last()
    }

    /// The last row appended to the current iteration, if any.
    pub fn most_recent_row(&self) -> Option<&IterationRow> {
        self.current_iteration().and_then(|iteration| iteration.last_row())
    }

    /// Online training step at the stored learning rate.
    pub fn train(
        &mut self,
        point: Point,
        class: PointClass,
    ) -> Result<&IterationRow, PerceptronError> {
        let learning_rate = self.learning_rate;
        self.train_with_rate(point, class, learning_rate)
    }

    /// Online training step: score one sample against the current
    /// weights, apply the resulting deltas immediately, and record the
    /// step in the current iteration.
    ///
    /// Because deltas are applied per sample, each sample sees the
    /// effect of all prior samples in the same iteration.
    pub fn train_with_rate(
        &mut self,
        point: Point,
        class: PointClass,
        learning_rate: f64,
    ) -> Result<&IterationRow, PerceptronError> {
        if self.iterations.is_empty() {
            return Err(PerceptronError::NoCurrentIteration);
        }
        let row = self.next_row(point, class, learning_rate);
        self.bias += row.delta_bias;
        self.w0 += row.delta_w0;
        self.w1 += row.delta_w1;
        let current = self
            .iterations
            .last_mut()
            .expect("history checked non-empty");
        current.rows.push(row);
        Ok(current.rows.last().expect("row just appended"))
    }

    /// Batch training pass at the stored learning rate.
    pub fn train_batch(
        &mut self,
        class_a_points: &[Point],
        class_b_points: &[Point],
    ) -> Result<&SummaryRow, PerceptronError> {
        let learning_rate = self.learning_rate;
        self.train_batch_with_rate(class_a_points, class_b_points, learning_rate)
    }

    /// Batch training pass: score every sample (class A first, then
    /// class B) against the weights held at batch start, then apply the
    /// per-sample deltas averaged over the whole batch as one update.
    ///
    /// Every recorded row captures the batch-start weights; only the
    /// summary row carries the post-update state. An empty batch applies
    /// no update and records a summary with zero deltas.
    pub fn train_batch_with_rate(
        &mut self,
        class_a_points: &[Point],
        class_b_points: &[Point],
        learning_rate: f64,
    ) -> Result<&SummaryRow, PerceptronError> {
        if self.iterations.is_empty() {
            return Err(PerceptronError::NoCurrentIteration);
        }
        let mut delta_bias_sum = 0.0;
        let mut delta_w0_sum = 0.0;
        let mut delta_w1_sum = 0.0;
        let mut rows = Vec::with_capacity(class_a_points.len() + class_b_points.len());
        let labeled = class_a_points
            .iter()
            .map(|&point| (point, PointClass::A))
            .chain(class_b_points.iter().map(|&point| (point, PointClass::B)));
        for (point, class) in labeled {
            // nothing is applied until the whole batch has been scored,
            // so every row sees the batch-start weights
            let row = self.next_row(point, class, learning_rate);
            delta_bias_sum += row.delta_bias;
            delta_w0_sum += row.delta_w0;
            delta_w1_sum += row.delta_w1;
            rows.push(row);
        }
        let sample_count = rows.len();
        let divisor = sample_count.max(1) as f64;
        let delta_bias = delta_bias_sum / divisor;
        let delta_w0 = delta_w0_sum / divisor;
        let delta_w1 = delta_w1_sum / divisor;
        self.bias += delta_bias;
        self.w0 += delta_w0;
        self.w1 += delta_w1;
        let summary = SummaryRow {
            bias: self.bias,
            w0: self.w0,
            w1: self.w1,
            delta_bias,
            delta_w0,
            delta_w1,
            sample_count,
        };
        let current = self
            .iterations
            .last_mut()
            .expect("history checked non-empty");
        current.rows.extend(rows);
        current.summary = Some(summary);
        Ok(current.summary.as_ref().expect("summary just recorded"))
    }

    /// Decision boundary `y = m*x + n` derived from the current weights,
    /// or `None` until the current iteration holds at least one row.
    ///
    /// When `w1 == 0` the division yields non-finite values under
    /// IEEE-754 rules; callers filter those before rendering a line.
    pub fn decision_boundary(&self) -> Option<LinearFunctionParams> {
        self.most_recent_row()?;
        Some(LinearFunctionParams {
            m: -(self.w0 / self.w1),
            n: -(self.bias / self.w1),
        })
    }

    /// Zero the weights and clear the iteration history.
    ///
    /// The learning rate and activation function survive a reset.
    pub fn reset(&mut self) {
        self.bias = 0.0;
        self.w0 = 0.0;
        self.w1 = 0.0;
        self.iterations.clear();
    }

    /// Score one sample against the current weights and compute its
    /// deltas, without mutating the weights.
    fn next_row(&mut self, point: Point, class: PointClass, learning_rate: f64) -> IterationRow {
        let desired = class.desired_activation();
        let weighted_sum = self.weighted_sum(point);
        let activation = self.activation.apply(weighted_sum);
        let error = desired as i8 - activation as i8;
        let signed_error = f64::from(error);
        let id = self.next_row_id;
        self.next_row_id += 1;
        IterationRow {
            id,
            bias: self.bias,
            w0: self.w0,
            w1: self.w1,
            point,
            desired,
            weighted_sum,
            activation,
            error,
            learning_rate,
            delta_bias: learning_rate * signed_error,
            delta_w0: learning_rate * signed_error * point.x,
            delta_w1: learning_rate * signed_error * point.y,
        }
    }
}

impl fmt::Display for Perceptron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Perceptron(bias={}, w0={}, w1={}, iterations={})",
            self.bias,
            self.w0,
            self.w1,
            self.iterations.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::{identify_activation_kind, ActivationKind, Threshold};

    fn point(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_train_without_iteration_fails() {
        let mut model = Perceptron::with_defaults();
        assert_eq!(
            model.train(point(1.0, 1.0), PointClass::A),
            Err(PerceptronError::NoCurrentIteration)
        );
        let a = [point(1.0, 1.0)];
        let b = [point(-1.0, -1.0)];
        assert!(matches!(
            model.train_batch(&a, &b),
            Err(PerceptronError::NoCurrentIteration)
        ));
        assert!(model.iterations().is_empty());
    }

    #[test]
    fn test_online_worked_example() {
        let mut model = Perceptron::with_defaults();
        model.start_new_iteration();

        // weighted sum of exactly 0 does not fire, so an A sample on the
        // boundary produces no correction
        let row = model.train(point(6.0, 10.0), PointClass::A).unwrap().clone();
        assert_eq!(row.desired, 0);
        assert_eq!(row.weighted_sum, 0.0);
        assert_eq!(row.activation, 0);
        assert_eq!(row.error, 0);
        assert_eq!(row.delta_bias, 0.0);
        assert_eq!(row.delta_w0, 0.0);
        assert_eq!(row.delta_w1, 0.0);
        assert_eq!(model.bias(), 0.0);

        let row = model.train(point(-4.0, -13.0), PointClass::B).unwrap().clone();
        assert_eq!(row.desired, 1);
        assert_eq!(row.weighted_sum, 0.0);
        assert_eq!(row.activation, 0);
        assert_eq!(row.error, 1);
        assert_eq!(row.delta_bias, 1.0);
        assert_eq!(row.delta_w0, -4.0);
        assert_eq!(row.delta_w1, -13.0);
        assert_eq!(model.bias(), 1.0);
        assert_eq!(model.w0(), -4.0);
        assert_eq!(model.w1(), -13.0);
    }

    #[test]
    fn test_online_rows_chain_sequentially() {
        let mut model = Perceptron::with_defaults();
        model.start_new_iteration();
        let samples = [
            (point(6.0, 10.0), PointClass::A),
            (point(-4.0, -13.0), PointClass::B),
            (point(0.0, -3.0), PointClass::A),
            (point(18.0, 2.0), PointClass::B),
        ];
        for (p, class) in samples {
            model.train(p, class).unwrap();
        }
        let rows = &model.current_iteration().unwrap().rows;
        assert_eq!(rows.len(), 4);
        for pair in rows.windows(2) {
            assert_eq!(pair[1].bias, pair[0].bias + pair[0].delta_bias);
            assert_eq!(pair[1].w0, pair[0].w0 + pair[0].delta_w0);
            assert_eq!(pair[1].w1, pair[0].w1 + pair[0].delta_w1);
        }
        // last row's post-update state is the model state
        let last = rows.last().unwrap();
        assert_eq!(model.bias(), last.bias + last.delta_bias);
        assert_eq!(model.w0(), last.w0 + last.delta_w0);
        assert_eq!(model.w1(), last.w1 + last.delta_w1);
    }

    #[test]
    fn test_row_value_ranges() {
        let mut model = Perceptron::with_defaults();
        model.start_new_iteration();
        let samples = [
            (point(3.0, 4.0), PointClass::A),
            (point(-2.0, 7.0), PointClass::B),
            (point(0.5, -0.5), PointClass::A),
            (point(-9.0, -1.0), PointClass::B),
        ];
        for (p, class) in samples {
            let row = model.train(p, class).unwrap();
            assert!(row.activation <= 1);
            assert!(row.desired <= 1);
            assert_eq!(row.desired, class.desired_activation());
            assert!((-1..=1).contains(&row.error));
            assert_eq!(row.error, row.desired as i8 - row.activation as i8);
        }
    }

    #[test]
    fn test_batch_rows_see_batch_start_weights() {
        let mut model = Perceptron::new(0.5, 1.0, -2.0, 0.1, Arc::new(Heaviside));
        model.start_new_iteration();
        let a = [point(6.0, 10.0), point(0.0, -3.0)];
        let b = [point(-4.0, -13.0), point(18.0, 2.0)];
        let summary = model.train_batch(&a, &b).unwrap().clone();

        let iteration = model.current_iteration().unwrap();
        assert_eq!(iteration.rows.len(), 4);
        let mut delta_bias_sum = 0.0;
        let mut delta_w0_sum = 0.0;
        let mut delta_w1_sum = 0.0;
        for row in &iteration.rows {
            // no intra-batch update: every row scored from the snapshot
            assert_eq!(row.bias, 0.5);
            assert_eq!(row.w0, 1.0);
            assert_eq!(row.w1, -2.0);
            assert_eq!(
                row.weighted_sum,
                0.5 + 1.0 * row.point.x - 2.0 * row.point.y
            );
            delta_bias_sum += row.delta_bias;
            delta_w0_sum += row.delta_w0;
            delta_w1_sum += row.delta_w1;
        }
        // class order is preserved: A samples first, then B
        assert_eq!(iteration.rows[0].desired, 0);
        assert_eq!(iteration.rows[1].desired, 0);
        assert_eq!(iteration.rows[2].desired, 1);
        assert_eq!(iteration.rows[3].desired, 1);

        assert_eq!(summary.sample_count, 4);
        assert_eq!(summary.delta_bias, delta_bias_sum / 4.0);
        assert_eq!(summary.delta_w0, delta_w0_sum / 4.0);
        assert_eq!(summary.delta_w1, delta_w1_sum / 4.0);
        // averaged deltas applied exactly once
        assert_eq!(model.bias(), 0.5 + summary.delta_bias);
        assert_eq!(model.w0(), 1.0 + summary.delta_w0);
        assert_eq!(model.w1(), -2.0 + summary.delta_w1);
        assert_eq!(summary.bias, model.bias());
        assert_eq!(summary.w0, model.w0());
        assert_eq!(summary.w1, model.w1());
    }

    #[test]
    fn test_empty_batch_applies_no_update() {
        let mut model = Perceptron::new(0.25, -1.0, 3.0, 1.0, Arc::new(Heaviside));
        model.start_new_iteration();
        let summary = model.train_batch(&[], &[]).unwrap().clone();
        assert_eq!(summary.sample_count, 0);
        assert_eq!(summary.delta_bias, 0.0);
        assert_eq!(summary.delta_w0, 0.0);
        assert_eq!(summary.delta_w1, 0.0);
        assert_eq!(model.bias(), 0.25);
        assert_eq!(model.w0(), -1.0);
        assert_eq!(model.w1(), 3.0);
        assert!(model.current_iteration().unwrap().rows.is_empty());
    }

    #[test]
    fn test_boundary_none_before_training() {
        let mut model = Perceptron::with_defaults();
        assert!(model.decision_boundary().is_none());
        model.start_new_iteration();
        // an open iteration with no rows still has no boundary guess
        assert!(model.decision_boundary().is_none());
    }

    #[test]
    fn test_boundary_worked_example() {
        let mut model = Perceptron::with_defaults();
        model.start_new_iteration();
        model.train(point(6.0, 10.0), PointClass::A).unwrap();
        model.train(point(-4.0, -13.0), PointClass::B).unwrap();
        // weights are now bias=1, w0=-4, w1=-13
        let params = model.decision_boundary().unwrap();
        assert!((params.m - (-0.3077)).abs() < 1e-4);
        assert!((params.n - 0.0769).abs() < 1e-4);
    }

    #[test]
    fn test_boundary_non_finite_when_w1_is_zero() {
        let mut model = Perceptron::with_defaults();
        model.start_new_iteration();
        // y=0 sample leaves w1 untouched
        model.train(point(2.0, 0.0), PointClass::B).unwrap();
        assert_eq!(model.w1(), 0.0);
        let params = model.decision_boundary().unwrap();
        assert!(!params.m.is_finite());
        assert!(!params.n.is_finite());
    }

    #[test]
    fn test_reset_clears_state_but_keeps_configuration() {
        let mut model = Perceptron::new(1.0, 2.0, 3.0, 0.5, Arc::new(Threshold { theta: 1.0 }));
        model.start_new_iteration();
        model.train(point(5.0, 5.0), PointClass::B).unwrap();
        model.reset();
        assert_eq!(model.bias(), 0.0);
        assert_eq!(model.w0(), 0.0);
        assert_eq!(model.w1(), 0.0);
        assert!(model.iterations().is_empty());
        assert!(model.current_iteration().is_none());
        assert!(model.most_recent_row().is_none());
        assert!(model.decision_boundary().is_none());
        assert_eq!(model.learning_rate(), 0.5);
        assert_eq!(
            identify_activation_kind(model.activation()),
            ActivationKind::Threshold
        );
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let mut model = Perceptron::with_defaults();
        model.start_new_iteration();
        model.train(point(-4.0, -13.0), PointClass::B).unwrap();
        let first_iteration = model.current_iteration().unwrap().id;
        let first_row = model.most_recent_row().unwrap().clone();
        let first_params = model.decision_boundary().unwrap();
        assert_eq!(model.current_iteration().unwrap().id, first_iteration);
        assert_eq!(*model.most_recent_row().unwrap(), first_row);
        assert_eq!(model.decision_boundary().unwrap(), first_params);
    }

    #[test]
    fn test_new_iteration_supersedes_current() {
        let mut model = Perceptron::with_defaults();
        let first = model.start_new_iteration();
        model.train(point(-4.0, -13.0), PointClass::B).unwrap();
        let second = model.start_new_iteration();
        assert!(second > first);
        assert_eq!(model.current_iteration().unwrap().id, second);
        // the fresh iteration has no rows yet
        assert!(model.most_recent_row().is_none());
        // the superseded iteration keeps its audit trail
        assert_eq!(model.iterations()[0].rows.len(), 1);
    }

    #[test]
    fn test_explicit_rate_overrides_stored_rate() {
        let mut model = Perceptron::with_defaults();
        model.start_new_iteration();
        let row = model
            .train_with_rate(point(-4.0, -13.0), PointClass::B, 0.5)
            .unwrap();
        assert_eq!(row.learning_rate, 0.5);
        assert_eq!(row.delta_bias, 0.5);
        assert_eq!(row.delta_w0, -2.0);
        assert_eq!(row.delta_w1, -6.5);
        assert_eq!(model.learning_rate(), 1.0);
    }

    #[test]
    fn test_predict_uses_current_weights() {
        let mut model = Perceptron::with_defaults();
        model.start_new_iteration();
        model.train(point(6.0, 10.0), PointClass::A).unwrap();
        model.train(point(-4.0, -13.0), PointClass::B).unwrap();
        // bias=1, w0=-4, w1=-13: strongly negative coordinates fire
        assert_eq!(model.predict(point(-4.0, -13.0)), PointClass::B);
        assert_eq!(model.predict(point(6.0, 10.0)), PointClass::A);
    }

    #[test]
    fn test_row_ids_are_unique_across_iterations() {
        let mut model = Perceptron::with_defaults();
        model.start_new_iteration();
        model.train(point(1.0, 2.0), PointClass::A).unwrap();
        model.start_new_iteration();
        model.train(point(3.0, 4.0), PointClass::B).unwrap();
        let ids: Vec<u64> = model
            .iterations()
            .iter()
            .flat_map(|iteration| iteration.rows.iter().map(|row| row.id))
            .collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }
}
