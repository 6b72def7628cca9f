//! Plain-text diagnostics for an inferred signature.

use ndarray::Array2;

use crate::signature::{Output, Signature};

/// Assemble the diagnostic lines for one inference pass.
///
/// When an example batch and its raw outputs are both supplied, the first
/// input/output pair leads the report; otherwise those lines are omitted.
/// The inferred attribute lines are always produced, so this never fails.
pub fn signature_report(
    examples: Option<&Array2<f64>>,
    outputs: Option<&Output>,
    signature: &Signature,
) -> Vec<String> {
    let mut reports = Vec::new();

    if let (Some(examples), Some(outputs)) = (examples, outputs) {
        if examples.nrows() > 0 {
            if let Some(first_output) = outputs.row_display(0) {
                reports.push(format!("Example: {}", examples.row(0)));
                reports.push(format!("Outputs: {}", first_output));
            }
        }
    }

    let n_classes = match signature.n_classes {
        Some(n) => n.to_string(),
        None => "unknown".to_string(),
    };

    reports.push(format!("Model type: {}", signature.model_kind));
    reports.push(format!("Output Var Type: {}", signature.var_kind));
    reports.push(format!("Output Shape: {:?}", signature.output_shape));
    reports.push(format!("N Classes: {}", n_classes));
    reports.push(format!(
        "Input Shape: ({}, {})",
        signature.input_shape.0, signature.input_shape.1
    ));
    reports.push(format!("Probability: {}", signature.probability));

    reports
}
