//! # nerview
//!
//! Presentation core for NER service results.
//!
//! Takes the `(text, entities)` pairs a NER backend returns and produces
//! what a renderer needs:
//!
//! - **[`merge`]**: ordered, non-overlapping plain/entity segments that
//!   reproduce the text exactly, with multi-labelled spans grouped
//! - **[`aggregate`]**: per-label occurrence counts and experiment-run
//!   summaries
//! - **[`palette`]**: a stable color per label
//! - **[`locate`]**: offsets for older text-only annotations
//!
//! ## Quick Start
//!
//! ```rust
//! use nerview::prelude::*;
//!
//! let prediction = Prediction::from_json(r#"{
//!     "text": "John has diabetes.",
//!     "entities": [
//!         {"text": "diabetes", "label": "DISEASE", "start": 9, "end": 17, "score": 0.71},
//!         {"text": "John", "label": "PERSON", "start": 0, "end": 4, "score": 0.98}
//!     ]
//! }"#).unwrap();
//!
//! let outcome = merge_prediction(&prediction).unwrap();
//! assert_eq!(outcome.rendered_text(), prediction.text);
//!
//! let summary = summarize(&prediction.entities);
//! assert_eq!(summary.get("PERSON"), 1);
//! assert_eq!(color_for("PERSON"), color_for("PERSON"));
//! ```
//!
//! ## Offsets
//!
//! All offsets are zero-based, half-open `[start, end)` and counted in
//! chars. See [`nerview_core::annotation`].
//!
//! Everything here is a pure function over borrowed input: no I/O, no
//! shared state, safe to call from any thread.

pub mod aggregate;
pub mod locate;
pub mod merge;
pub mod palette;

#[cfg(feature = "cli")]
pub mod cli;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    pub use crate::aggregate::{
        aggregate_run, filter_by_score, summarize, AggregatedEntity, LabelSummary, Labeled,
        RunSummary,
    };
    pub use crate::locate::{locate_sequential, resolve};
    pub use crate::merge::{
        group, merge, merge_prediction, merge_with_report, MergeOutcome, MergedSpan, Segment,
    };
    pub use crate::palette::{chip_style, color_for, ChipStyle, ColorToken, PALETTE};
    pub use nerview_core::{
        Annotation, CharIndex, Confidence, DocumentPredictions, Error, Prediction, RawAnnotation,
        Result, RunResults, ValidationIssue,
    };
}

// Re-exports
pub use aggregate::{summarize, LabelSummary};
pub use merge::{merge, MergedSpan, Segment};
pub use nerview_core::{Annotation, Confidence, Error, Prediction, RawAnnotation, Result};
pub use palette::{color_for, ColorToken};
