use anyhow::Result;
use ndarray::Array2;

use crate::signature::Output;

/// The caller-supplied prediction capability.
///
/// Implementations accept a two-dimensional batch of inputs and return one
/// raw output row per input. The crate makes no assumption about what the
/// function does internally, only about the shape and element kind of what
/// it returns.
pub trait Predictor {
    /// Run the prediction function on a batch of inputs, one row per
    /// example.
    fn predict(&self, x: &Array2<f64>) -> Result<Output>;

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "model"
    }
}

/// Any plain function or closure over a batch is a predictor.
impl<F> Predictor for F
where
    F: Fn(&Array2<f64>) -> Result<Output>,
{
    fn predict(&self, x: &Array2<f64>) -> Result<Output> {
        self(x)
    }
}
