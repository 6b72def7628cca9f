//! Output-signature inference for black-box prediction functions.
//!
//! A prediction function is probed once with a batch of example inputs and
//! its output is classified over a closed set of rank/element-kind
//! combinations. The result is an immutable [`Signature`] record describing
//! what the function is (classifier or regressor), how wide its output is,
//! and which normalization brings that output onto a uniform per-class
//! score surface.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use anyhow::Result;
use ndarray::{Array2, ArrayD, Axis};
use serde::{Deserialize, Serialize};

use crate::encoding;
use crate::error::ModelError;
use crate::models::model_trait::Predictor;

/// One raw prediction element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn kind(&self) -> VarKind {
        match self {
            Value::Str(_) => VarKind::String,
            Value::Int(_) => VarKind::Int,
            Value::Float(_) => VarKind::Float,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Value::Int(_) => 0,
            Value::Float(_) => 1,
            Value::Str(_) => 2,
        }
    }
}

// Total order so distinct-label sets sort the same way on every call.
// Same-kind values compare naturally (floats by total_cmp); values of
// different kinds order by kind rank.
impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Str(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

/// Inferred element kind of a single raw prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarKind {
    Unknown,
    String,
    Int,
    Float,
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            VarKind::Unknown => "unknown",
            VarKind::String => "string",
            VarKind::Int => "int",
            VarKind::Float => "float",
        };
        write!(f, "{}", name)
    }
}

/// What kind of model the prediction function looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Unknown,
    Classifier,
    Regressor,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ModelKind::Unknown => "unknown",
            ModelKind::Classifier => "classifier",
            ModelKind::Regressor => "regressor",
        };
        write!(f, "{}", name)
    }
}

/// Whether raw outputs are already probability-like.
///
/// Tri-state for inferred models, plus the explicit sentinel for outputs
/// the inference could not classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Probability {
    Unknown,
    Yes,
    No,
    NotApplicable,
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Probability::Unknown => "unknown",
            Probability::Yes => "true",
            Probability::No => "false",
            Probability::NotApplicable => "not applicable",
        };
        write!(f, "{}", name)
    }
}

/// Raw output of one `predict` call.
///
/// The supported forms are a closed set of rank and element-kind
/// combinations; anything of rank three or higher travels as
/// [`Output::Tensor`] so inference can reject it with a precise error.
#[derive(Debug, Clone)]
pub enum Output {
    /// One scalar per input row (labels, class ids, or regression values).
    Labels(Vec<Value>),
    /// One float vector per input row, width = number of classes.
    FloatMatrix(Array2<f64>),
    /// One integer vector per input row, width = number of classes.
    IntMatrix(Array2<i64>),
    /// Rank three or higher; unsupported by inference.
    Tensor(ArrayD<f64>),
}

impl Output {
    /// Dimension sizes of the output.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Output::Labels(values) => vec![values.len()],
            Output::FloatMatrix(matrix) => matrix.shape().to_vec(),
            Output::IntMatrix(matrix) => matrix.shape().to_vec(),
            Output::Tensor(tensor) => tensor.shape().to_vec(),
        }
    }

    pub fn ndim(&self) -> usize {
        match self {
            Output::Labels(_) => 1,
            Output::FloatMatrix(_) | Output::IntMatrix(_) => 2,
            Output::Tensor(tensor) => tensor.ndim(),
        }
    }

    /// Number of output rows.
    pub fn nrows(&self) -> usize {
        self.shape().first().copied().unwrap_or(0)
    }

    /// Render row `row` for diagnostics, if it exists.
    pub(crate) fn row_display(&self, row: usize) -> Option<String> {
        match self {
            Output::Labels(values) => values.get(row).map(|v| v.to_string()),
            Output::FloatMatrix(matrix) => {
                (row < matrix.nrows()).then(|| matrix.row(row).to_string())
            }
            Output::IntMatrix(matrix) => {
                (row < matrix.nrows()).then(|| matrix.row(row).to_string())
            }
            Output::Tensor(tensor) => {
                (row < tensor.shape().first().copied().unwrap_or(0))
                    .then(|| tensor.index_axis(Axis(0), row).to_string())
            }
        }
    }
}

/// Normalization applied to raw outputs before they reach callers.
///
/// An enumerated choice rather than a stored closure, resolved at the point
/// of use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
    /// Pass raw outputs through untouched.
    #[default]
    Identity,
    /// One-hot encode rank-1 label outputs into a per-class score matrix.
    OneHot,
}

impl Formatter {
    /// Pick the normalization for an inferred model-kind/probability pair.
    ///
    /// Only a classifier without native probability output needs
    /// reshaping. Every other combination, unknown states included, passes
    /// through.
    pub fn select(model_kind: ModelKind, probability: Probability) -> Formatter {
        match (model_kind, probability) {
            (ModelKind::Classifier, Probability::No) => Formatter::OneHot,
            _ => Formatter::Identity,
        }
    }

    /// Apply the normalization to a raw output.
    ///
    /// `OneHot` reshapes rank-1 label outputs only; outputs that are
    /// already two-dimensional come back unchanged.
    pub fn apply(&self, output: Output) -> Output {
        match (self, output) {
            (Formatter::OneHot, Output::Labels(labels)) => {
                Output::FloatMatrix(encoding::one_hot_encode(&labels))
            }
            (_, output) => output,
        }
    }
}

/// Immutable result of one signature-inference pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature {
    pub model_kind: ModelKind,
    pub var_kind: VarKind,
    /// Distinct output classes, or 1 for regressors. `None` when the
    /// output could not be classified.
    pub n_classes: Option<usize>,
    pub probability: Probability,
    /// Shape of the example batch the inference ran on.
    pub input_shape: (usize, usize),
    pub output_shape: Vec<usize>,
    pub formatter: Formatter,
}

/// Run `predictor` once on `examples` and classify its output signature.
///
/// The decision procedure:
///
/// 1. Rank-1 output of strings or ints: a classifier emitting hard labels.
///    `n_classes` is the number of distinct values across the batch.
/// 2. Rank-1 output of floats: a regressor. A classifier emitting
///    float-typed labels would be misclassified here, so a warning is
///    logged when this arm fires.
/// 3. Rank-2 output: a classifier with one column per class; float entries
///    mean the scores are already probability-like.
/// 4. Rank 3 or higher: unsupported, the call fails.
///
/// # Arguments
///
/// * `predictor` - The prediction function to probe.
/// * `examples` - A non-empty batch of representative inputs, one row per
///   example.
///
/// # Returns
///
/// The fully populated [`Signature`], or [`ModelError::MissingExamples`] /
/// [`ModelError::UnsupportedOutputRank`]. Failures from the predictor
/// itself propagate unchanged.
pub fn infer_signature<P>(predictor: &P, examples: &Array2<f64>) -> Result<Signature>
where
    P: Predictor + ?Sized,
{
    if examples.nrows() == 0 {
        return Err(ModelError::MissingExamples.into());
    }

    let outputs = predictor.predict(examples)?;
    classify_output(&outputs, examples.dim())
}

/// Classify an already-computed output against the input batch shape.
pub fn classify_output(outputs: &Output, input_shape: (usize, usize)) -> Result<Signature> {
    let output_shape = outputs.shape();

    let (model_kind, var_kind, n_classes, probability) = match outputs {
        Output::Labels(values) => match values.first().map(Value::kind) {
            Some(kind @ (VarKind::String | VarKind::Int)) => {
                let distinct: BTreeSet<&Value> = values.iter().collect();
                (ModelKind::Classifier, kind, Some(distinct.len()), Probability::No)
            }
            Some(VarKind::Float) => {
                log::warn!("Inferring model type to be a regressor due to 1D array of floats");
                (
                    ModelKind::Regressor,
                    VarKind::Float,
                    Some(1),
                    Probability::NotApplicable,
                )
            }
            // an empty output vector tells us nothing
            _ => (ModelKind::Unknown, VarKind::Unknown, None, Probability::Unknown),
        },
        Output::FloatMatrix(matrix) => (
            ModelKind::Classifier,
            VarKind::Float,
            Some(matrix.ncols()),
            Probability::Yes,
        ),
        Output::IntMatrix(matrix) => (
            ModelKind::Classifier,
            VarKind::Int,
            Some(matrix.ncols()),
            Probability::No,
        ),
        Output::Tensor(tensor) => {
            return Err(ModelError::UnsupportedOutputRank(tensor.ndim()).into());
        }
    };

    Ok(Signature {
        model_kind,
        var_kind,
        n_classes,
        probability,
        input_shape,
        output_shape,
        formatter: Formatter::select(model_kind, probability),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn value_ordering_is_total_and_deterministic() {
        let mut labels = vec![
            Value::from("banana"),
            Value::from("apple"),
            Value::from(3i64),
            Value::from(1i64),
        ];
        labels.sort();
        assert_eq!(
            labels,
            vec![
                Value::from(1i64),
                Value::from(3i64),
                Value::from("apple"),
                Value::from("banana"),
            ]
        );
    }

    #[test]
    fn formatter_selection_defaults_to_identity() {
        assert_eq!(
            Formatter::select(ModelKind::Classifier, Probability::No),
            Formatter::OneHot
        );
        assert_eq!(
            Formatter::select(ModelKind::Classifier, Probability::Yes),
            Formatter::Identity
        );
        assert_eq!(
            Formatter::select(ModelKind::Regressor, Probability::NotApplicable),
            Formatter::Identity
        );
        assert_eq!(
            Formatter::select(ModelKind::Unknown, Probability::Unknown),
            Formatter::Identity
        );
    }

    #[test]
    fn classify_labels_as_classifier() {
        let outputs = Output::Labels(vec![
            Value::from("cat"),
            Value::from("dog"),
            Value::from("cat"),
        ]);
        let signature = classify_output(&outputs, (3, 2)).expect("classification failed");
        assert_eq!(signature.model_kind, ModelKind::Classifier);
        assert_eq!(signature.n_classes, Some(2));
        assert_eq!(signature.probability, Probability::No);
        assert_eq!(signature.formatter, Formatter::OneHot);
        assert_eq!(signature.output_shape, vec![3]);
    }

    #[test]
    fn classify_float_labels_as_regressor() {
        let outputs = Output::Labels(vec![Value::from(0.2), Value::from(1.4)]);
        let signature = classify_output(&outputs, (2, 2)).expect("classification failed");
        assert_eq!(signature.model_kind, ModelKind::Regressor);
        assert_eq!(signature.n_classes, Some(1));
        assert_eq!(signature.probability, Probability::NotApplicable);
        assert_eq!(signature.formatter, Formatter::Identity);
    }

    #[test]
    fn classify_float_matrix_as_probability_classifier() {
        let outputs = Output::FloatMatrix(arr2(&[[0.1, 0.9], [0.8, 0.2]]));
        let signature = classify_output(&outputs, (2, 4)).expect("classification failed");
        assert_eq!(signature.model_kind, ModelKind::Classifier);
        assert_eq!(signature.n_classes, Some(2));
        assert_eq!(signature.probability, Probability::Yes);
        assert_eq!(signature.formatter, Formatter::Identity);
    }

    #[test]
    fn one_hot_formatter_passes_matrices_through() {
        let raw = arr2(&[[0i64, 1], [1, 0]]);
        let formatted = Formatter::OneHot.apply(Output::IntMatrix(raw.clone()));
        match formatted {
            Output::IntMatrix(matrix) => assert_eq!(matrix, raw),
            other => panic!("expected the raw matrix back, got {:?}", other),
        }
    }
}
