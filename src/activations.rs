use std::fmt;
use std::any::Any;
use serde::{Serialize, Deserialize};

/// Trait for neuron activation functions.
///
/// Maps the weighted sum `bias + w0*x + w1*y` to a binary firing
/// decision (0 or 1). Implementations must be pure functions of the
/// input.
pub trait Activation: fmt::Debug + Send + Sync + Any {
    fn apply(&self, weighted_sum: f64) -> u8;
}

/// Heaviside step: 1 if the weighted sum is strictly positive, else 0.
///
/// A weighted sum of exactly zero does not fire.
#[derive(Debug, Clone, Default)]
pub struct Heaviside;

impl Activation for Heaviside {
    fn apply(&self, weighted_sum: f64) -> u8 {
        (weighted_sum > 0.0) as u8
    }
}

/// Step with an adjustable firing threshold (theta=0.0 default).
#[derive(Debug, Clone)]
pub struct Threshold {
    pub theta: f64,
}

impl Default for Threshold {
    fn default() -> Self {
        Self { theta: 0.0 }
    }
}

impl Activation for Threshold {
    fn apply(&self, weighted_sum: f64) -> u8 {
        (weighted_sum > self.theta) as u8
    }
}

/// Serializable activation kinds for caller-side selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActivationKind {
    Heaviside,
    Threshold,
}

impl ActivationKind {
    pub fn to_arc(&self) -> std::sync::Arc<dyn Activation + Send + Sync> {
        use std::sync::Arc;
        match self {
            ActivationKind::Heaviside => Arc::new(Heaviside),
            ActivationKind::Threshold => Arc::new(Threshold::default()),
        }
    }
}

/// Best-effort identification of activation kind from a trait object
pub fn identify_activation_kind(a: &(dyn Activation + Send + Sync)) -> ActivationKind {
    let any = a as &dyn Any;
    if any.is::<Threshold>() { return ActivationKind::Threshold; }
    ActivationKind::Heaviside
}
