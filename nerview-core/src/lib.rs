//! # nerview-core
//!
//! Core types for nerview: the boundary between the NER backend's JSON
//! payloads and the span merging / label aggregation code.
//!
//! This crate provides:
//! - **Annotations**: `RawAnnotation` (wire shape), `Annotation` (validated)
//! - **Payloads**: `Prediction`, `RunResults`, `DocumentPredictions`
//! - **Offsets**: `CharIndex` for char-offset slicing
//! - **Scores**: `Confidence`, bounded to [0, 1]
//!
//! Offsets are zero-based, half-open and counted in chars.

pub mod annotation;
pub mod confidence;
pub mod error;
pub mod offset;
pub mod results;

pub use annotation::{validate_all, Annotation, RawAnnotation, ValidationIssue};
pub use confidence::{Confidence, ConfidenceError};
pub use error::{Error, Result};
pub use offset::CharIndex;
pub use results::{DocumentPredictions, Prediction, RunResults};
