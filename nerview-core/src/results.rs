//! Response payloads of the NER backend.
//!
//! Two endpoints feed nerview:
//!
//! - entity prediction: `{ "text": ..., "entities": [ ... ] }`
//! - experiment run results: `{ "results": [ { "document_id", "document_title",
//!   "predictions": [ ... ] } ] }`
//!
//! Unknown fields are ignored so payloads can grow without breaking parsing.

use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, RawAnnotation};
use crate::error::Result;
use crate::offset::CharIndex;

/// One prediction: the analysed text plus every entity found in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Analysed text.
    pub text: String,
    /// Entities in backend order (unsorted, possibly overlapping).
    #[serde(default)]
    pub entities: Vec<RawAnnotation>,
}

impl Prediction {
    /// Create a prediction.
    #[must_use]
    pub fn new(text: impl Into<String>, entities: Vec<RawAnnotation>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every entity against the text, failing on the first bad one.
    pub fn annotations(&self) -> Result<Vec<Annotation>> {
        let index = CharIndex::new(&self.text);
        self.entities
            .iter()
            .cloned()
            .map(|raw| raw.into_annotation(&index))
            .collect()
    }
}

/// Predictions for one document of an experiment run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPredictions {
    /// Backend document id.
    pub document_id: u64,
    /// Document title, if the document has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_title: Option<String>,
    /// Predicted entities (no source text is shipped with run results).
    #[serde(default)]
    pub predictions: Vec<RawAnnotation>,
}

impl DocumentPredictions {
    /// Title for display, falling back to `"Document {id}"`.
    #[must_use]
    pub fn title(&self) -> String {
        match self.document_title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!("Document {}", self.document_id),
        }
    }
}

/// Results of one experiment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    /// Per-document results.
    #[serde(default)]
    pub results: Vec<DocumentPredictions>,
}

impl RunResults {
    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of documents in the run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the run has no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
