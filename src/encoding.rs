//! Label and one-hot encoding primitives.
//!
//! Two small capabilities: map discrete labels to dense integer codes in a
//! deterministic sorted order, and expand an integer-coded column into a
//! dense one-hot matrix. Together they turn a vector of hard class labels
//! into the per-class score matrix the model wrappers expose.

use std::collections::BTreeSet;

use ndarray::Array2;

use crate::error::EncodingError;
use crate::signature::Value;

/// Maps discrete labels to dense integer codes.
///
/// Codes follow the ascending order of the distinct labels seen during
/// `fit`, so repeated fits over the same label set always produce the same
/// mapping.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    classes: Vec<Value>,
}

impl LabelEncoder {
    /// Collect the distinct labels of a sequence, in ascending order.
    pub fn fit(labels: &[Value]) -> Self {
        let distinct: BTreeSet<&Value> = labels.iter().collect();
        LabelEncoder {
            classes: distinct.into_iter().cloned().collect(),
        }
    }

    /// The distinct labels, in code order.
    pub fn classes(&self) -> &[Value] {
        &self.classes
    }

    /// Fit an encoder and encode the same labels in one step.
    pub fn fit_transform(labels: &[Value]) -> (Self, Vec<usize>) {
        let encoder = Self::fit(labels);
        // every label was just seen by `fit`, so the search always lands
        let codes = labels
            .iter()
            .filter_map(|label| encoder.classes.binary_search(label).ok())
            .collect();
        (encoder, codes)
    }

    /// Map labels to their integer codes.
    ///
    /// Fails on any label that was not present during `fit`.
    pub fn transform(&self, labels: &[Value]) -> Result<Vec<usize>, EncodingError> {
        labels
            .iter()
            .map(|label| {
                self.classes
                    .binary_search(label)
                    .map_err(|_| EncodingError::UnknownLabel(label.to_string()))
            })
            .collect()
    }
}

/// Expand an integer-coded column into a dense one-hot matrix.
///
/// Row `i` has a single 1.0 in column `codes[i]`.
pub fn one_hot(codes: &[usize], n_classes: usize) -> Array2<f64> {
    let mut matrix = Array2::zeros((codes.len(), n_classes));
    for (row, &code) in codes.iter().enumerate() {
        assert!(code < n_classes, "label code out of bounds");
        matrix[(row, code)] = 1.0;
    }
    matrix
}

/// One-hot encode a vector of raw labels.
///
/// Column order is the ascending order of the distinct label values, so the
/// same label sequence always yields a bit-identical matrix. An empty
/// sequence yields a 0x0 matrix.
pub fn one_hot_encode(labels: &[Value]) -> Array2<f64> {
    let encoder = LabelEncoder::fit(labels);
    let n_classes = encoder.classes().len();
    let mut matrix = Array2::zeros((labels.len(), n_classes));
    for (row, label) in labels.iter().enumerate() {
        // every label was just seen by `fit`, so the search always lands
        if let Ok(code) = encoder.classes.binary_search(label) {
            matrix[(row, code)] = 1.0;
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<Value> {
        values.iter().map(|&v| Value::from(v)).collect()
    }

    #[test]
    fn fit_orders_classes_ascending() {
        let encoder = LabelEncoder::fit(&labels(&["pear", "apple", "pear", "fig"]));
        assert_eq!(encoder.classes(), &labels(&["apple", "fig", "pear"])[..]);
    }

    #[test]
    fn transform_maps_to_code_order() {
        let encoder = LabelEncoder::fit(&labels(&["b", "a", "c"]));
        let codes = encoder
            .transform(&labels(&["c", "a", "b"]))
            .expect("transform failed");
        assert_eq!(codes, vec![2, 0, 1]);
    }

    #[test]
    fn fit_transform_agrees_with_fit_then_transform() {
        let sequence = labels(&["b", "a", "b", "c"]);
        let (encoder, codes) = LabelEncoder::fit_transform(&sequence);
        assert_eq!(codes, encoder.transform(&sequence).expect("transform failed"));
        assert_eq!(codes, vec![1, 0, 1, 2]);
    }

    #[test]
    fn transform_rejects_unseen_labels() {
        let encoder = LabelEncoder::fit(&labels(&["a", "b"]));
        let err = encoder
            .transform(&labels(&["z"]))
            .expect_err("unseen label must fail");
        assert_eq!(err, EncodingError::UnknownLabel("z".to_string()));
    }

    #[test]
    fn one_hot_places_single_one_per_row() {
        let matrix = one_hot(&[2, 0, 1, 0], 3);
        assert_eq!(matrix.shape(), &[4, 3]);
        for row in matrix.rows() {
            assert_eq!(row.sum(), 1.0);
        }
        assert_eq!(matrix[(0, 2)], 1.0);
        assert_eq!(matrix[(1, 0)], 1.0);
    }

    #[test]
    fn one_hot_encode_matches_sorted_column_order() {
        let matrix = one_hot_encode(&labels(&["apple", "banana"]));
        assert_eq!(matrix, ndarray::arr2(&[[1.0, 0.0], [0.0, 1.0]]));
    }

    #[test]
    fn one_hot_encode_is_deterministic() {
        let sequence = labels(&["dog", "cat", "bird", "dog", "cat"]);
        assert_eq!(one_hot_encode(&sequence), one_hot_encode(&sequence));
    }

    #[test]
    fn one_hot_encode_handles_integer_labels() {
        let sequence = vec![Value::from(7i64), Value::from(3i64), Value::from(7i64)];
        let matrix = one_hot_encode(&sequence);
        assert_eq!(matrix, ndarray::arr2(&[[0.0, 1.0], [1.0, 0.0], [0.0, 1.0]]));
    }

    #[test]
    fn one_hot_encode_on_empty_input() {
        let matrix = one_hot_encode(&[]);
        assert_eq!(matrix.shape(), &[0, 0]);
    }
}
