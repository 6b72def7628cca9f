use anyhow::Result;
use ndarray::Array2;

use crate::models::model_trait::Predictor;
use crate::signature::Output;

/// A model backed by a local prediction function held in memory.
///
/// This is the concrete wrapper used when the prediction capability is a
/// plain Rust function or closure rather than an external system.
pub struct InMemoryModel {
    predict_fn: Box<dyn Fn(&Array2<f64>) -> Result<Output>>,
    name: String,
}

impl InMemoryModel {
    pub fn new<F>(predict_fn: F) -> Self
    where
        F: Fn(&Array2<f64>) -> Result<Output> + 'static,
    {
        InMemoryModel {
            predict_fn: Box::new(predict_fn),
            name: "in_memory".to_string(),
        }
    }

    pub fn with_name<F>(name: impl Into<String>, predict_fn: F) -> Self
    where
        F: Fn(&Array2<f64>) -> Result<Output> + 'static,
    {
        InMemoryModel {
            predict_fn: Box::new(predict_fn),
            name: name.into(),
        }
    }
}

impl Predictor for InMemoryModel {
    fn predict(&self, x: &Array2<f64>) -> Result<Output> {
        (self.predict_fn)(x)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
