//! Label summaries over raw annotation lists.
//!
//! Counts are taken from the ungrouped list: a span labelled both `DRUG`
//! and `DOSAGE` counts once for each label, since the summary answers
//! "how many occurrences of each type", not "how many highlighted spans".

use std::collections::{HashMap, HashSet};

use nerview_core::{Annotation, RawAnnotation, RunResults};
use serde::Serialize;

/// Anything that carries an entity label and maybe a score.
pub trait Labeled {
    /// The entity label.
    fn label(&self) -> &str;

    /// The model score, if any.
    fn score(&self) -> Option<f64>;
}

impl Labeled for Annotation {
    fn label(&self) -> &str {
        &self.label
    }

    fn score(&self) -> Option<f64> {
        self.score.map(f64::from)
    }
}

impl Labeled for RawAnnotation {
    fn label(&self) -> &str {
        &self.label
    }

    fn score(&self) -> Option<f64> {
        self.score
    }
}

/// Label → occurrence count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSummary {
    counts: HashMap<String, usize>,
}

impl LabelSummary {
    /// Count one occurrence of `label`.
    pub fn add(&mut self, label: &str) {
        match self.counts.get_mut(label) {
            Some(n) => *n += 1,
            None => {
                self.counts.insert(label.to_string(), 1);
            }
        }
    }

    /// Occurrences of `label` (0 if never seen).
    #[must_use]
    pub fn get(&self, label: &str) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no label was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Distinct labels, sorted.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// Iterate in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Entries by count descending, then label ascending.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// The `n` most frequent labels, ordered as [`Self::sorted`].
    #[must_use]
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries = self.sorted();
        entries.truncate(n);
        entries
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_map(self) -> HashMap<String, usize> {
        self.counts
    }
}

impl<'a> FromIterator<&'a str> for LabelSummary {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut summary = Self::default();
        for label in iter {
            summary.add(label);
        }
        summary
    }
}

/// Count label occurrences across a raw (pre-merge) list.
///
/// # Example
///
/// ```rust
/// use nerview::aggregate::summarize;
/// use nerview_core::Annotation;
///
/// let summary = summarize(&[
///     Annotation::new("a", "A", 0, 1),
///     Annotation::new("a", "A", 2, 3),
///     Annotation::new("b", "B", 4, 5),
/// ]);
/// assert_eq!(summary.get("A"), 2);
/// assert_eq!(summary.get("B"), 1);
/// ```
#[must_use]
pub fn summarize<T: Labeled>(items: &[T]) -> LabelSummary {
    items.iter().map(Labeled::label).collect()
}

/// Keep items without a score or with `score >= min`.
#[must_use]
pub fn filter_by_score<T: Labeled + Clone>(items: &[T], min: f64) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.score().map_or(true, |s| s >= min))
        .cloned()
        .collect()
}

/// One entity of an experiment run, tagged with its document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedEntity {
    /// Surface text.
    pub text: String,
    /// Entity label.
    pub label: String,
    /// Model score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Backend document id.
    pub document_id: u64,
    /// Document title (or `"Document {id}"`).
    pub document_title: String,
}

impl Labeled for AggregatedEntity {
    fn label(&self) -> &str {
        &self.label
    }

    fn score(&self) -> Option<f64> {
        self.score
    }
}

/// Flatten a run's per-document predictions, in document order.
#[must_use]
pub fn aggregate_run(run: &RunResults) -> Vec<AggregatedEntity> {
    run.results
        .iter()
        .flat_map(|doc| {
            let title = doc.title();
            doc.predictions.iter().map(move |p| AggregatedEntity {
                text: p.text.clone(),
                label: p.label.clone(),
                score: p.score,
                document_id: doc.document_id,
                document_title: title.clone(),
            })
        })
        .collect()
}

/// Headline numbers for an experiment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Entities across all documents.
    pub total_entities: usize,
    /// Distinct labels.
    pub unique_labels: usize,
    /// Documents that contributed at least one entity.
    pub documents_processed: usize,
}

impl RunSummary {
    /// Summarize aggregated entities.
    #[must_use]
    pub fn from_entities(entities: &[AggregatedEntity]) -> Self {
        let labels: HashSet<&str> = entities.iter().map(|e| e.label.as_str()).collect();
        let documents: HashSet<u64> = entities.iter().map(|e| e.document_id).collect();
        Self {
            total_entities: entities.len(),
            unique_labels: labels.len(),
            documents_processed: documents.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nerview_core::DocumentPredictions;

    #[test]
    fn summarize_counts_raw_occurrences() {
        let summary = summarize(&[
            Annotation::new("aspirin", "DRUG", 5, 12),
            Annotation::new("aspirin", "DOSAGE", 5, 12),
            Annotation::new("ibuprofen", "DRUG", 20, 29),
        ]);
        assert_eq!(summary.get("DRUG"), 2);
        assert_eq!(summary.get("DOSAGE"), 1);
        assert_eq!(summary.get("PERSON"), 0);
        assert_eq!(summary.total(), 3);
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn summarize_empty() {
        let summary = summarize::<Annotation>(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn labels_are_case_sensitive() {
        let summary: LabelSummary = ["Person", "PERSON", "PERSON"].into_iter().collect();
        assert_eq!(summary.get("PERSON"), 2);
        assert_eq!(summary.get("Person"), 1);
    }

    #[test]
    fn sorted_breaks_ties_by_label() {
        let summary: LabelSummary = ["B", "A", "C", "C"].into_iter().collect();
        assert_eq!(summary.sorted(), vec![("C", 2), ("A", 1), ("B", 1)]);
        assert_eq!(summary.most_common(1), vec![("C", 2)]);
        assert_eq!(summary.most_common(10).len(), 3);
        assert_eq!(summary.labels(), vec!["A", "B", "C"]);
    }

    #[test]
    fn filter_keeps_unscored() {
        let items = vec![
            RawAnnotation::text_only("a", "A"),
            RawAnnotation::text_only("b", "B").with_score(0.2),
            RawAnnotation::text_only("c", "C").with_score(0.5),
        ];
        let kept = filter_by_score(&items, 0.5);
        let labels: Vec<&str> = kept.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, ["A", "C"]);
    }

    #[test]
    fn run_aggregation() {
        let run = RunResults {
            results: vec![
                DocumentPredictions {
                    document_id: 1,
                    document_title: Some("Discharge note".into()),
                    predictions: vec![
                        RawAnnotation::text_only("aspirin", "DRUG").with_score(0.9),
                        RawAnnotation::text_only("100 mg", "DOSAGE").with_score(0.8),
                    ],
                },
                DocumentPredictions {
                    document_id: 2,
                    document_title: None,
                    predictions: vec![RawAnnotation::text_only("ibuprofen", "DRUG")],
                },
                DocumentPredictions {
                    document_id: 3,
                    document_title: None,
                    predictions: vec![],
                },
            ],
        };

        let entities = aggregate_run(&run);
        assert_eq!(entities.len(), 3);
        assert_eq!(entities[0].document_title, "Discharge note");
        assert_eq!(entities[2].document_title, "Document 2");

        let summary = RunSummary::from_entities(&entities);
        assert_eq!(
            summary,
            RunSummary {
                total_entities: 3,
                unique_labels: 2,
                documents_processed: 2,
            }
        );
        assert_eq!(summarize(&entities).get("DRUG"), 2);
    }

    #[test]
    fn serializes_as_plain_map() {
        let summary: LabelSummary = ["A"].into_iter().collect();
        assert_eq!(serde_json::to_string(&summary).unwrap(), r#"{"A":1}"#);
    }
}
