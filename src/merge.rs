//! Span merging: annotations → ordered, renderable segments.
//!
//! # Algorithm
//!
//! ```text
//!   annotations (unsorted, duplicated, overlapping)
//!        │
//!        │ 1. validate   every span against the text (fail fast)
//!        │ 2. group      by (start, end), labels in encounter order
//!        │ 3. sort       by start, stable (ties keep first-seen order)
//!        ▼
//!   walk with a cursor that never moves backwards
//!
//!   text:    J o h n _ h a s _ d i a b e t e s .
//!            └─E─────┘└─P───┘└─E─────────────┘└P┘
//!   cursor:  0       4       9               17 18
//! ```
//!
//! # Overlaps
//!
//! A group that starts before the cursor overlaps text already emitted for
//! an earlier entity. It is skipped, never clipped or re-emitted, so every
//! char of the source appears in exactly one segment. Skipped groups are
//! returned by [`merge_with_report`].
//!
//! # Entity text
//!
//! Entity segments carry the source slice at the span's offsets. For
//! well-formed input this equals the annotation's surface; a surface that
//! disagrees is logged and the source wins, which keeps the concatenation
//! of segments equal to the input text.

use std::collections::HashMap;

use log::{debug, warn};
use nerview_core::{Annotation, CharIndex, Confidence, Error, Prediction, Result};
use serde::Serialize;

/// Separator between labels of a multi-labelled span.
pub const LABEL_SEPARATOR: &str = ", ";

/// All annotations sharing one `(start, end)` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedSpan {
    /// Start offset (chars).
    pub start: usize,
    /// End offset (chars).
    pub end: usize,
    /// Surface text of the first annotation seen for the key.
    pub text: String,
    /// Labels in encounter order, duplicates kept.
    pub labels: Vec<String>,
    /// Scores aligned with `labels`.
    pub scores: Vec<Option<Confidence>>,
}

impl MergedSpan {
    fn from_first(a: &Annotation) -> Self {
        Self {
            start: a.start,
            end: a.end,
            text: a.text.clone(),
            labels: vec![a.label.clone()],
            scores: vec![a.score],
        }
    }

    /// Labels joined with `", "`.
    #[must_use]
    pub fn combined_label(&self) -> String {
        self.labels.join(LABEL_SEPARATOR)
    }

    /// Highest score in the group, `None` when no annotation had one.
    #[must_use]
    pub fn display_score(&self) -> Option<Confidence> {
        self.scores.iter().flatten().copied().reduce(Confidence::max)
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
}

/// A contiguous renderable unit of the source text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Text outside any entity.
    Plain {
        /// The text.
        text: String,
    },
    /// A (possibly multi-labelled) entity.
    Entity {
        /// Source text at `[start, end)`.
        text: String,
        /// Combined label, e.g. `"DRUG, DOSAGE"`.
        label: String,
        /// Highest score among the merged annotations.
        #[serde(skip_serializing_if = "Option::is_none")]
        score: Option<Confidence>,
        /// Start offset (chars).
        start: usize,
        /// End offset (chars).
        end: usize,
    },
}

impl Segment {
    /// Create a plain segment.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Segment::Plain { text: text.into() }
    }

    /// The segment's text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } | Segment::Entity { text, .. } => text,
        }
    }

    /// The combined label of an entity segment.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Segment::Plain { .. } => None,
            Segment::Entity { label, .. } => Some(label),
        }
    }

    /// The display score of an entity segment.
    #[must_use]
    pub fn score(&self) -> Option<Confidence> {
        match self {
            Segment::Plain { .. } => None,
            Segment::Entity { score, .. } => *score,
        }
    }

    /// Whether this is an entity segment.
    #[must_use]
    pub fn is_entity(&self) -> bool {
        matches!(self, Segment::Entity { .. })
    }
}

/// Segments plus the groups dropped by the overlap policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeOutcome {
    /// Ordered segments covering the whole text.
    pub segments: Vec<Segment>,
    /// Groups skipped because they overlapped an earlier entity.
    pub skipped: Vec<MergedSpan>,
}

impl MergeOutcome {
    /// Number of entity segments.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_entity()).count()
    }

    /// Concatenated segment text.
    #[must_use]
    pub fn rendered_text(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }
}

/// Group annotations by `(start, end)`.
///
/// Groups come back in the order their first annotation was seen. Offsets
/// are not checked here.
///
/// # Example
///
/// ```rust
/// use nerview::merge::group;
/// use nerview_core::Annotation;
///
/// let groups = group(&[
///     Annotation::new("aspirin", "DRUG", 5, 12),
///     Annotation::new("aspirin", "DOSAGE", 5, 12),
/// ]);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].combined_label(), "DRUG, DOSAGE");
/// ```
#[must_use]
pub fn group(annotations: &[Annotation]) -> Vec<MergedSpan> {
    let mut by_key: HashMap<(usize, usize), usize> = HashMap::with_capacity(annotations.len());
    let mut groups: Vec<MergedSpan> = Vec::with_capacity(annotations.len());

    for a in annotations {
        match by_key.get(&a.span()) {
            Some(&i) => {
                let g = &mut groups[i];
                g.labels.push(a.label.clone());
                g.scores.push(a.score);
            }
            None => {
                by_key.insert(a.span(), groups.len());
                groups.push(MergedSpan::from_first(a));
            }
        }
    }

    groups
}

/// Merge annotations over `text` into ordered segments.
///
/// Fails with [`Error::InvalidSpan`] on the first annotation whose offsets
/// fall outside the text or are inverted.
///
/// # Example
///
/// ```rust
/// use nerview::merge::{merge, Segment};
/// use nerview_core::Annotation;
///
/// let segments = merge(
///     "John has diabetes.",
///     &[
///         Annotation::new("diabetes", "DISEASE", 9, 17),
///         Annotation::new("John", "PERSON", 0, 4),
///     ],
/// )
/// .unwrap();
///
/// let texts: Vec<&str> = segments.iter().map(Segment::text).collect();
/// assert_eq!(texts, ["John", " has ", "diabetes", "."]);
/// ```
pub fn merge(text: &str, annotations: &[Annotation]) -> Result<Vec<Segment>> {
    Ok(merge_with_report(text, annotations)?.segments)
}

/// [`merge`], also returning the groups skipped as overlaps.
pub fn merge_with_report(text: &str, annotations: &[Annotation]) -> Result<MergeOutcome> {
    let index = CharIndex::new(text);
    let text_len = index.char_len();

    for a in annotations {
        a.check_bounds(text_len)?;
        if !a.surface_matches(&index) {
            warn!(
                "surface '{}' ({}) does not match source at [{}, {}); rendering source text",
                a.text, a.label, a.start, a.end
            );
        }
    }

    let mut spans = group(annotations);
    spans.sort_by_key(|s| s.start);
    debug!(
        "merging {} annotations into {} spans over {} chars",
        annotations.len(),
        spans.len(),
        text_len
    );

    let mut outcome = MergeOutcome::default();
    let mut cursor = 0usize;

    for span in spans {
        if span.start < cursor {
            debug!(
                "skipping [{}, {}) {}: overlaps text emitted up to {}",
                span.start,
                span.end,
                span.combined_label(),
                cursor
            );
            outcome.skipped.push(span);
            continue;
        }

        if cursor < span.start {
            push_plain(&mut outcome.segments, slice(&index, cursor, span.start)?);
        }

        outcome.segments.push(Segment::Entity {
            text: slice(&index, span.start, span.end)?.to_string(),
            label: span.combined_label(),
            score: span.display_score(),
            start: span.start,
            end: span.end,
        });
        cursor = span.end;
    }

    if cursor < text_len {
        push_plain(&mut outcome.segments, slice(&index, cursor, text_len)?);
    }

    Ok(outcome)
}

/// Validate a prediction's entities and merge them over its text.
pub fn merge_prediction(prediction: &Prediction) -> Result<MergeOutcome> {
    let annotations = prediction.annotations()?;
    merge_with_report(&prediction.text, &annotations)
}

fn slice<'a>(index: &CharIndex<'a>, start: usize, end: usize) -> Result<&'a str> {
    index
        .slice(start, end)
        .ok_or_else(|| Error::invalid_span(start, end, index.char_len(), "range not in text"))
}

fn push_plain(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::plain(text));
    }
}
