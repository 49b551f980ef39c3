//! Training record types: labeled points and the per-step audit trail.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A sample's coordinates in feature space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Binary class label for a training sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointClass {
    A,
    B,
}

impl PointClass {
    /// Desired neuron output for this class: A maps to 0, B to 1.
    pub fn desired_activation(&self) -> u8 {
        match self {
            PointClass::A => 0,
            PointClass::B => 1,
        }
    }

    /// Inverse of [`desired_activation`](Self::desired_activation): any
    /// non-zero activation maps to B.
    pub fn from_activation(activation: u8) -> Self {
        if activation == 0 {
            PointClass::A
        } else {
            PointClass::B
        }
    }
}

impl fmt::Display for PointClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointClass::A => write!(f, "A"),
            PointClass::B => write!(f, "B"),
        }
    }
}

/// Snapshot of one sample's classification-and-update step.
///
/// `bias`, `w0` and `w1` hold the weights as they were when the sample
/// was scored, before this step's deltas were applied. Never mutated
/// after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationRow {
    pub id: u64,
    pub bias: f64,
    pub w0: f64,
    pub w1: f64,
    pub point: Point,
    pub desired: u8,
    pub weighted_sum: f64,
    pub activation: u8,
    pub error: i8,
    pub learning_rate: f64,
    pub delta_bias: f64,
    pub delta_w0: f64,
    pub delta_w1: f64,
}

/// Batch mode only: the post-batch weights and the averaged deltas that
/// were applied across all samples in the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub bias: f64,
    pub w0: f64,
    pub w1: f64,
    pub delta_bias: f64,
    pub delta_w0: f64,
    pub delta_w1: f64,
    pub sample_count: usize,
}

/// One full training pass over a set of labeled points.
///
/// Rows are appended in training order while the iteration is current;
/// once a newer iteration supersedes it the sequence is frozen.
#[derive(Debug, Clone, Serialize)]
pub struct Iteration {
    pub id: u64,
    pub rows: Vec<IterationRow>,
    pub summary: Option<SummaryRow>,
}

impl Iteration {
    pub(crate) fn new(id: u64) -> Self {
        Self {
            id,
            rows: Vec::new(),
            summary: None,
        }
    }

    pub fn last_row(&self) -> Option<&IterationRow> {
        self.rows.last()
    }
}
