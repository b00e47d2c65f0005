//! Utility functions for CLI commands

use std::io::{self, Read};

use nerview_core::{Prediction, RawAnnotation, RunResults};

/// Get input text from a file, or stdin when no file is given.
pub fn get_input_text(file: Option<&str>) -> Result<String, String> {
    if let Some(f) = file {
        read_input_file(f)
    } else {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    }
}

/// Read input from file
pub fn read_input_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read file {}: {}", path, e))
}

/// Parse a prediction document (`{"text", "entities"}`).
pub fn parse_prediction(json: &str) -> Result<Prediction, String> {
    Prediction::from_json(json).map_err(|e| format!("Failed to parse prediction JSON: {}", e))
}

/// Parse a bare entity array, as passed to `--entities`.
pub fn parse_entities(json: &str) -> Result<Vec<RawAnnotation>, String> {
    serde_json::from_str(json).map_err(|e| format!("Failed to parse entities JSON: {}", e))
}

/// Parse experiment run results (`{"results": [...]}`).
pub fn parse_run_results(json: &str) -> Result<RunResults, String> {
    RunResults::from_json(json).map_err(|e| format!("Failed to parse run results JSON: {}", e))
}

/// Build the prediction from `--text`/`--entities`, or read it from a file
/// or stdin.
pub fn load_prediction(
    file: Option<&str>,
    text: Option<&str>,
    entities: Option<&str>,
) -> Result<Prediction, String> {
    match (text, entities) {
        (Some(text), entities) => {
            let entities = match entities {
                Some(json) => parse_entities(json)?,
                None => Vec::new(),
            };
            Ok(Prediction::new(text, entities))
        }
        (None, Some(_)) => Err("--entities requires --text".to_string()),
        (None, None) => parse_prediction(&get_input_text(file)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_entities_build_prediction() {
        let p = load_prediction(
            None,
            Some("John"),
            Some(r#"[{"text": "John", "label": "PERSON", "start": 0, "end": 4}]"#),
        )
        .unwrap();
        assert_eq!(p.text, "John");
        assert_eq!(p.entities.len(), 1);
    }

    #[test]
    fn entities_without_text_rejected() {
        assert!(load_prediction(None, None, Some("[]")).is_err());
    }

    #[test]
    fn reads_prediction_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, r#"{"text": "hi", "entities": []}"#).unwrap();
        let p = load_prediction(path.to_str(), None, None).unwrap();
        assert_eq!(p.text, "hi");
    }

    #[test]
    fn bad_json_reports_context() {
        let err = parse_run_results("{").unwrap_err();
        assert!(err.contains("run results"));
    }
}
