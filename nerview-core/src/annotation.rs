//! Entity annotations as returned by the NER backend.
//!
//! # Two shapes
//!
//! ```text
//!   RawAnnotation   wire shape, straight from JSON
//!                   { text, label, start?, end?, score? }
//!         │
//!         │  into_annotation(&CharIndex)   rejects bad offsets / scores
//!         ▼
//!   Annotation      offsets present, score bounded, label non-empty
//! ```
//!
//! # Offset convention
//!
//! Offsets are zero-based, half-open `[start, end)` and counted in chars
//! (Unicode scalar values). There is exactly one convention. A payload with
//! one-based starts usually still fits inside the text, so it converts and
//! merges with every entity shifted by one char (logged at `warn`);
//! [`RawAnnotation::issues`] reports it as a non-fatal
//! [`ValidationIssue::TextMismatch`].

use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;
use crate::error::{Error, Result};
use crate::offset::CharIndex;

/// An annotation in the loosely-typed wire shape.
///
/// The older text-only variant carries neither offsets nor a score;
/// `nerview::locate` can recover offsets for those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAnnotation {
    /// Surface text originally matched.
    pub text: String,
    /// Entity label.
    pub label: String,
    /// Start offset (chars, inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<usize>,
    /// End offset (chars, exclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<usize>,
    /// Model score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl RawAnnotation {
    /// Create a raw annotation with offsets and no score.
    #[must_use]
    pub fn new(text: impl Into<String>, label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start: Some(start),
            end: Some(end),
            score: None,
        }
    }

    /// Create a text-only annotation (no offsets, no score).
    #[must_use]
    pub fn text_only(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start: None,
            end: None,
            score: None,
        }
    }

    /// Attach a score.
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Whether both offsets are present.
    #[must_use]
    pub fn has_offsets(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    /// Collect every problem with this annotation against `source`.
    ///
    /// Empty when the annotation is valid. Unlike [`Self::into_annotation`]
    /// this reports surface mismatches too.
    #[must_use]
    pub fn issues(&self, source: &CharIndex<'_>) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.label.is_empty() {
            issues.push(ValidationIssue::EmptyLabel);
        }
        if self.text.is_empty() {
            issues.push(ValidationIssue::EmptyText);
        }
        if let Some(score) = self.score {
            if Confidence::new(score).is_none() {
                issues.push(ValidationIssue::InvalidConfidence { value: score });
            }
        }

        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                issues.push(ValidationIssue::MissingOffsets);
                return issues;
            }
        };

        let text_len = source.char_len();
        if start >= end {
            issues.push(ValidationIssue::InvalidSpan {
                start,
                end,
                reason: "start must be less than end".to_string(),
            });
        }
        if end > text_len {
            issues.push(ValidationIssue::SpanOutOfBounds { end, text_len });
        }

        if start < end {
            if let Some(actual) = source.slice(start, end) {
                if actual != self.text {
                    issues.push(ValidationIssue::TextMismatch {
                        expected: self.text.clone(),
                        actual: actual.to_string(),
                        start,
                        end,
                    });
                }
            }
        }

        issues
    }

    /// Parse into a validated [`Annotation`].
    ///
    /// Fails on missing offsets, an empty label, an out-of-range score, or
    /// offsets outside `source`. A surface that disagrees with the source
    /// slice is not an error here.
    pub fn into_annotation(self, source: &CharIndex<'_>) -> Result<Annotation> {
        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(Error::MissingOffsets {
                    label: self.label,
                    text: self.text,
                })
            }
        };

        if self.label.is_empty() {
            return Err(Error::invalid_input(format!(
                "annotation at [{}, {}) has an empty label",
                start, end
            )));
        }

        let score = match self.score {
            Some(value) => Some(Confidence::try_from(value).map_err(|e| {
                Error::invalid_input(format!("{} ({} at [{}, {}))", e, self.label, start, end))
            })?),
            None => None,
        };

        let annotation = Annotation {
            text: self.text,
            label: self.label,
            start,
            end,
            score,
        };
        annotation.check_bounds(source.char_len())?;
        Ok(annotation)
    }
}

impl From<Annotation> for RawAnnotation {
    fn from(a: Annotation) -> Self {
        Self {
            text: a.text,
            label: a.label,
            start: Some(a.start),
            end: Some(a.end),
            score: a.score.map(f64::from),
        }
    }
}

/// A validated annotation.
///
/// `score` is bounded by construction. Offsets are only meaningful against
/// a particular text: [`Annotation::check_bounds`] is re-run by every
/// operation that slices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// Surface text originally matched.
    pub text: String,
    /// Entity label (case-sensitive).
    pub label: String,
    /// Start offset (chars, inclusive).
    pub start: usize,
    /// End offset (chars, exclusive).
    pub end: usize,
    /// Model score, absent in older payloads.
    pub score: Option<Confidence>,
}

impl Annotation {
    /// Create an annotation without a score.
    ///
    /// # Example
    ///
    /// ```rust
    /// use nerview_core::Annotation;
    ///
    /// let a = Annotation::new("John", "PERSON", 0, 4).with_score(0.93);
    /// assert_eq!(a.len(), 4);
    /// assert!(a.check_bounds(18).is_ok());
    /// assert!(a.check_bounds(3).is_err());
    /// ```
    #[must_use]
    pub fn new(text: impl Into<String>, label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
            start,
            end,
            score: None,
        }
    }

    /// Attach a score, clamped to [0, 1].
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(Confidence::saturating(score));
        self
    }

    /// The `(start, end)` key.
    #[must_use]
    pub fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    /// Span length in chars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two spans share at least one char.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check `0 <= start < end <= text_len`.
    pub fn check_bounds(&self, text_len: usize) -> Result<()> {
        if self.start >= self.end {
            return Err(Error::invalid_span(
                self.start,
                self.end,
                text_len,
                "start must be less than end",
            ));
        }
        if self.end > text_len {
            return Err(Error::invalid_span(
                self.start,
                self.end,
                text_len,
                "end exceeds text length",
            ));
        }
        Ok(())
    }

    /// Whether the surface text equals the source slice at the offsets.
    #[must_use]
    pub fn surface_matches(&self, source: &CharIndex<'_>) -> bool {
        source.slice(self.start, self.end) == Some(self.text.as_str())
    }
}

/// Validate a whole payload against its text.
///
/// Returns `(index, issue)` pairs in input order; empty when every
/// annotation is valid.
#[must_use]
pub fn validate_all(text: &str, annotations: &[RawAnnotation]) -> Vec<(usize, ValidationIssue)> {
    let index = CharIndex::new(text);
    annotations
        .iter()
        .enumerate()
        .flat_map(|(i, a)| a.issues(&index).into_iter().map(move |issue| (i, issue)))
        .collect()
}

/// A problem found while validating an annotation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationIssue {
    /// `start` or `end` is absent.
    MissingOffsets,
    /// Span bounds are invalid (start >= end).
    InvalidSpan {
        /// Start position of the invalid span.
        start: usize,
        /// End position of the invalid span.
        end: usize,
        /// Description of why the span is invalid.
        reason: String,
    },
    /// Span extends beyond text length.
    SpanOutOfBounds {
        /// End position that exceeds the text.
        end: usize,
        /// Text length in chars.
        text_len: usize,
    },
    /// Annotation text doesn't match the span in source.
    TextMismatch {
        /// Text stored in the annotation.
        expected: String,
        /// Text found at the span in source.
        actual: String,
        /// Start position of the span.
        start: usize,
        /// End position of the span.
        end: usize,
    },
    /// Score is outside [0.0, 1.0].
    InvalidConfidence {
        /// The invalid score.
        value: f64,
    },
    /// Label is the empty string.
    EmptyLabel,
    /// Surface text is the empty string.
    EmptyText,
}

impl ValidationIssue {
    /// Whether the issue makes the annotation unusable for merging.
    ///
    /// Surface mismatches and empty surfaces are tolerated; the source
    /// slice is what gets rendered.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ValidationIssue::TextMismatch { .. } | ValidationIssue::EmptyText
        )
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationIssue::MissingOffsets => write!(f, "Missing start/end offsets"),
            ValidationIssue::InvalidSpan { start, end, reason } => {
                write!(f, "Invalid span [{}, {}): {}", start, end, reason)
            }
            ValidationIssue::SpanOutOfBounds { end, text_len } => {
                write!(f, "Span end {} exceeds text length {}", end, text_len)
            }
            ValidationIssue::TextMismatch {
                expected,
                actual,
                start,
                end,
            } => {
                write!(
                    f,
                    "Text mismatch at [{}, {}): expected '{}', got '{}'",
                    start, end, expected, actual
                )
            }
            ValidationIssue::InvalidConfidence { value } => {
                write!(f, "Score {} outside [0.0, 1.0]", value)
            }
            ValidationIssue::EmptyLabel => write!(f, "Empty label"),
            ValidationIssue::EmptyText => write!(f, "Empty surface text"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "John has diabetes.";

    #[test]
    fn raw_deserializes_both_variants() {
        let full: RawAnnotation = serde_json::from_str(
            r#"{"text":"John","label":"PERSON","start":0,"end":4,"score":0.93}"#,
        )
        .unwrap();
        assert_eq!(full.start, Some(0));
        assert_eq!(full.score, Some(0.93));

        let old: RawAnnotation =
            serde_json::from_str(r#"{"text":"John","label":"PERSON"}"#).unwrap();
        assert!(!old.has_offsets());
        assert_eq!(old.score, None);
    }

    #[test]
    fn into_annotation_valid() {
        let index = CharIndex::new(TEXT);
        let a = RawAnnotation::new("diabetes", "DISEASE", 9, 17)
            .with_score(0.8)
            .into_annotation(&index)
            .unwrap();
        assert_eq!(a.span(), (9, 17));
        assert_eq!(a.score.map(f64::from), Some(0.8));
        assert!(a.surface_matches(&index));
    }

    #[test]
    fn into_annotation_rejects_missing_offsets() {
        let index = CharIndex::new(TEXT);
        let err = RawAnnotation::text_only("John", "PERSON")
            .into_annotation(&index)
            .unwrap_err();
        assert!(matches!(err, Error::MissingOffsets { .. }));
    }

    #[test]
    fn into_annotation_rejects_out_of_bounds() {
        let index = CharIndex::new(TEXT);
        let err = RawAnnotation::new("diabetes.", "DISEASE", 9, 19)
            .into_annotation(&index)
            .unwrap_err();
        assert!(err.is_invalid_span());
    }

    #[test]
    fn into_annotation_rejects_inverted_span() {
        let index = CharIndex::new(TEXT);
        let err = RawAnnotation::new("John", "PERSON", 4, 4)
            .into_annotation(&index)
            .unwrap_err();
        assert!(err.is_invalid_span());
    }

    #[test]
    fn into_annotation_rejects_bad_score_and_label() {
        let index = CharIndex::new(TEXT);
        let err = RawAnnotation::new("John", "PERSON", 0, 4)
            .with_score(1.2)
            .into_annotation(&index)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = RawAnnotation::new("John", "", 0, 4)
            .into_annotation(&index)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn one_based_offsets_show_up_as_mismatch() {
        let index = CharIndex::new(TEXT);
        let issues = RawAnnotation::new("John", "PERSON", 1, 5).issues(&index);
        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], ValidationIssue::TextMismatch { .. }));
        assert!(!issues[0].is_fatal());
    }

    #[test]
    fn issues_collects_everything() {
        let index = CharIndex::new(TEXT);
        let raw = RawAnnotation::new("", "", 25, 20).with_score(-0.5);
        let issues = raw.issues(&index);
        assert!(issues.contains(&ValidationIssue::EmptyLabel));
        assert!(issues.contains(&ValidationIssue::EmptyText));
        assert!(issues.contains(&ValidationIssue::InvalidConfidence { value: -0.5 }));
        assert!(issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::InvalidSpan { .. })));
        assert!(issues
            .iter()
            .any(|i| matches!(i, ValidationIssue::SpanOutOfBounds { .. })));
    }

    #[test]
    fn end_at_text_length_is_valid() {
        let a = Annotation::new(".", "PUNCT", 17, 18);
        assert!(a.check_bounds(18).is_ok());
        assert!(a.check_bounds(17).is_err());
    }

    #[test]
    fn validate_all_reports_indices() {
        let raws = vec![
            RawAnnotation::new("John", "PERSON", 0, 4),
            RawAnnotation::text_only("has", "VERB"),
            RawAnnotation::new("diabetes", "DISEASE", 9, 17),
        ];
        let issues = validate_all(TEXT, &raws);
        assert_eq!(issues, vec![(1, ValidationIssue::MissingOffsets)]);
    }

    #[test]
    fn overlaps_is_half_open() {
        let a = Annotation::new("John", "PERSON", 0, 4);
        let b = Annotation::new(" ", "X", 4, 5);
        let c = Annotation::new("ohn", "Y", 1, 4);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn round_trips_into_raw() {
        let a = Annotation::new("John", "PERSON", 0, 4).with_score(0.5);
        let raw = RawAnnotation::from(a);
        assert_eq!(raw.start, Some(0));
        assert_eq!(raw.score, Some(0.5));
    }
}
