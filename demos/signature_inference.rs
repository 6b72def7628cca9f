use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use interpret_models::models::ModelInterface;
use interpret_models::signature::{Output, Value};

fn main() {
    interpret_models::logging::init("debug");

    // Tiny synthetic dataset: 8 samples, 2 features
    let mut rng = StdRng::seed_from_u64(7);
    let x = Array2::from_shape_fn((8, 2), |_| rng.gen_range(-1.0..1.0));

    println!("Synthetic batch shape: {:?}", x.shape());

    // A hard-label classifier: sign of the first feature
    let mut model = ModelInterface::from_fn(|x: &Array2<f64>| {
        let labels = x
            .rows()
            .into_iter()
            .map(|row| Value::from(if row[0] >= 0.0 { "positive" } else { "negative" }))
            .collect();
        Ok(Output::Labels(labels))
    });

    model.set_examples(x.clone());
    model
        .check_output_signature(&x)
        .expect("signature inference failed");

    println!("Model type: {}", model.model_kind());
    println!("N classes: {:?}", model.n_classes());
    println!("Probability: {}", model.probability());
    println!("Formatter: {:?}", model.formatter());

    // Hard labels come back as a per-class score matrix
    match model.predict_formatted(&x).expect("predict failed") {
        Output::FloatMatrix(scores) => {
            println!("Normalized scores ({} x {}):", scores.nrows(), scores.ncols());
            println!("{}", scores);
        }
        other => println!("Raw output: {:?}", other),
    }
}
