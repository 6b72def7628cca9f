//! interpret-models: uniform wrappers around black-box prediction functions.
//!
//! This crate lets interpretability tooling call an arbitrary predictive
//! function through one surface, whether the function is a classifier
//! emitting labels, a classifier emitting probability vectors, or a
//! regressor emitting continuous values. The core is a heuristic
//! output-signature inference: probe the function once on a batch of
//! example inputs, classify the shape and element kind of what comes back,
//! and derive the normalization that presents every model as an array of
//! per-class scores.
pub mod encoding;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod report;
pub mod signature;
