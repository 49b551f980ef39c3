//! A minimal perceptron crate for educational purposes: a single linear
//! binary classifier trained by the error-correction rule, with a full
//! audit trail of every arithmetic step taken during training.
//!
//! - Online (per-sample) and batch-averaged delta-rule updates
//! - Pluggable step activations
//! - Iteration history with one immutable snapshot per training step
//! - CSV point loading, synthetic data, and table-printing helpers

pub mod activations;
pub mod history;
pub mod perceptron;
pub mod metrics;
pub mod datasets;
pub mod utils;

pub use activations::{identify_activation_kind, Activation, ActivationKind, Heaviside, Threshold};
pub use history::{Iteration, IterationRow, Point, PointClass, SummaryRow};
pub use perceptron::{LinearFunctionParams, Perceptron, PerceptronError};
pub use metrics::{accuracy, confusion_matrix};
pub use datasets::load_points;
pub use utils::{generate_linearly_separable_data, print_iterations_table, shuffled_training_order};
