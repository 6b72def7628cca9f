use std::error::Error;
use std::fmt;

/// Failures raised by the signature-inference path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Inference was attempted without a non-empty example batch.
    MissingExamples,
    /// Raw prediction output had an unsupported rank (3 or higher).
    UnsupportedOutputRank(usize),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelError::MissingExamples => {
                write!(f, "Examples have not been provided. Cannot check outputs")
            }
            ModelError::UnsupportedOutputRank(rank) => {
                write!(f, "Unsupported model output, output rank = {}", rank)
            }
        }
    }
}

impl Error for ModelError {}

/// Failures raised by the label-encoding primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodingError {
    /// A label passed to `transform` was never seen during `fit`.
    UnknownLabel(String),
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncodingError::UnknownLabel(label) => {
                write!(f, "Label {} was not present when the encoder was fit", label)
            }
        }
    }
}

impl Error for EncodingError {}
