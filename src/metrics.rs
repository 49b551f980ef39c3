//! Metrics for evaluating a trained perceptron.
use crate::history::{Point, PointClass};
use crate::perceptron::Perceptron;

/// Accuracy
pub fn accuracy(dataset: &[(Point, PointClass)], model: &Perceptron) -> f64 {
    let mut correct = 0;
    for &(point, class) in dataset {
        if model.predict(point) == class {
            correct += 1;
        }
    }
    correct as f64 / dataset.len() as f64
}

/// Confusion matrix indexed as `[true class][predicted class]` with A=0, B=1
pub fn confusion_matrix(dataset: &[(Point, PointClass)], model: &Perceptron) -> [[usize; 2]; 2] {
    let mut cm = [[0; 2]; 2];
    for &(point, class) in dataset {
        let predicted = model.predict(point);
        cm[class.desired_activation() as usize][predicted.desired_activation() as usize] += 1;
    }
    cm
}
