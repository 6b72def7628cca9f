use anyhow::Result;
use ndarray::Array2;

use crate::models::model_trait::Predictor;
use crate::report::signature_report;
use crate::signature::{infer_signature, Formatter, ModelKind, Output, Probability, Signature};

/// Stateful wrapper around a prediction capability.
///
/// Holds a reference batch of examples and the signature inferred from one
/// probing call, and exposes the model through a uniform surface: raw
/// predictions, normalized per-class scores, and the inferred attributes.
///
/// Until [`check_output_signature`](ModelInterface::check_output_signature)
/// has succeeded once, no signature is stored and every accessor reports
/// its explicit unknown default.
pub struct ModelInterface {
    predictor: Box<dyn Predictor>,
    examples: Option<Array2<f64>>,
    signature: Option<Signature>,
}

impl ModelInterface {
    pub fn new(predictor: Box<dyn Predictor>) -> Self {
        ModelInterface {
            predictor,
            examples: None,
            signature: None,
        }
    }

    /// Wrap a plain prediction function.
    pub fn from_fn<F>(predict_fn: F) -> Self
    where
        F: Fn(&Array2<f64>) -> Result<Output> + 'static,
    {
        ModelInterface::new(Box::new(crate::models::in_memory::InMemoryModel::new(
            predict_fn,
        )))
    }

    /// Bind a reference example batch to the model.
    pub fn set_examples(&mut self, examples: Array2<f64>) {
        self.examples = Some(examples);
    }

    pub fn examples(&self) -> Option<&Array2<f64>> {
        self.examples.as_ref()
    }

    /// Probe the prediction function on `examples` and cache the inferred
    /// signature.
    ///
    /// The stored signature is replaced in a single assignment once
    /// inference has fully succeeded; on any failure (empty batch,
    /// unsupported output rank, predictor error) the previously inferred
    /// attributes are left untouched. On success the diagnostic report is
    /// emitted at debug verbosity.
    pub fn check_output_signature(&mut self, examples: &Array2<f64>) -> Result<()> {
        let signature = infer_signature(self.predictor.as_ref(), examples)?;
        self.signature = Some(signature);
        self.log_report(examples);
        Ok(())
    }

    /// Raw predictions from the wrapped function.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Output> {
        self.predictor.predict(x)
    }

    /// Predictions passed through the cached normalization, so classifiers
    /// without native probability output come back as per-class score
    /// matrices.
    pub fn predict_formatted(&self, x: &Array2<f64>) -> Result<Output> {
        Ok(self.formatter().apply(self.predictor.predict(x)?))
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn model_kind(&self) -> ModelKind {
        self.signature
            .as_ref()
            .map_or(ModelKind::Unknown, |s| s.model_kind)
    }

    pub fn n_classes(&self) -> Option<usize> {
        self.signature.as_ref().and_then(|s| s.n_classes)
    }

    pub fn probability(&self) -> Probability {
        self.signature
            .as_ref()
            .map_or(Probability::Unknown, |s| s.probability)
    }

    /// The cached normalization; identity until inference has run.
    pub fn formatter(&self) -> Formatter {
        self.signature
            .as_ref()
            .map_or(Formatter::Identity, |s| s.formatter)
    }

    pub fn name(&self) -> &str {
        self.predictor.name()
    }

    fn log_report(&self, examples: &Array2<f64>) {
        let Some(signature) = self.signature.as_ref() else {
            return;
        };
        // the example/output pair is only reported when a reference batch
        // is bound; a failing predictor degrades to attribute lines only
        let outputs = self
            .examples
            .as_ref()
            .and_then(|_| self.predictor.predict(examples).ok());
        for line in signature_report(Some(examples), outputs.as_ref(), signature) {
            log::debug!("{}", line);
        }
    }
}

/// Calling the wrapper is equivalent to calling the wrapped function.
impl Predictor for ModelInterface {
    fn predict(&self, x: &Array2<f64>) -> Result<Output> {
        ModelInterface::predict(self, x)
    }

    fn name(&self) -> &str {
        ModelInterface::name(self)
    }
}
