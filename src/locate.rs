//! Offset recovery for text-only annotations.
//!
//! Older payloads list entities as `{ text, label }` with no offsets. To
//! highlight them, each surface is searched for in the source text
//! (case-insensitively) and assigned an occurrence in encounter order: the
//! first `"John"` annotation takes the first match, the second takes the
//! second, and so on. An annotation whose occurrence does not exist is
//! dropped.
//!
//! Matches may overlap: the search resumes one char after each hit, so
//! `"aa"` occurs twice in `"aaa"`.

use std::collections::HashMap;

use log::warn;
use nerview_core::{Annotation, CharIndex, Confidence, RawAnnotation, Result};

/// Assign offsets to every annotation by sequential surface search.
///
/// Offsets already present on the input are ignored. The result is sorted
/// by start offset.
///
/// # Example
///
/// ```rust
/// use nerview::locate::locate_sequential;
/// use nerview_core::RawAnnotation;
///
/// let located = locate_sequential(
///     "John met john.",
///     &[
///         RawAnnotation::text_only("John", "PERSON"),
///         RawAnnotation::text_only("John", "PERSON"),
///     ],
/// );
/// assert_eq!(located[0].span(), (0, 4));
/// assert_eq!(located[1].span(), (9, 13));
/// ```
#[must_use]
pub fn locate_sequential(text: &str, annotations: &[RawAnnotation]) -> Vec<Annotation> {
    let haystack: Vec<char> = text.chars().collect();
    let mut usage: HashMap<String, usize> = HashMap::new();
    let mut located = Vec::with_capacity(annotations.len());

    for raw in annotations {
        if let Some(a) = locate_one(&haystack, raw, &mut usage) {
            located.push(a);
        }
    }

    located.sort_by_key(|a| a.start);
    located
}

/// Validate annotations that carry offsets and locate those that don't.
///
/// Fails if an annotation with offsets is invalid for `text`. Occurrence
/// counting only considers the text-only annotations.
pub fn resolve(text: &str, annotations: &[RawAnnotation]) -> Result<Vec<Annotation>> {
    let index = CharIndex::new(text);
    let haystack: Vec<char> = text.chars().collect();
    let mut usage: HashMap<String, usize> = HashMap::new();
    let mut resolved = Vec::with_capacity(annotations.len());

    for raw in annotations {
        if raw.has_offsets() {
            resolved.push(raw.clone().into_annotation(&index)?);
        } else if let Some(a) = locate_one(&haystack, raw, &mut usage) {
            resolved.push(a);
        }
    }

    Ok(resolved)
}

fn locate_one(
    haystack: &[char],
    raw: &RawAnnotation,
    usage: &mut HashMap<String, usize>,
) -> Option<Annotation> {
    if raw.label.is_empty() {
        warn!("dropping '{}': empty label", raw.text);
        return None;
    }
    let needle: Vec<char> = raw.text.chars().collect();
    if needle.is_empty() {
        warn!("dropping {} annotation with empty surface", raw.label);
        return None;
    }

    let key = raw.text.to_lowercase();
    let seen = usage.get(&key).copied().unwrap_or(0);

    let Some(start) = nth_occurrence(haystack, &needle, seen) else {
        warn!(
            "dropping '{}' ({}): occurrence {} not found in text",
            raw.text,
            raw.label,
            seen + 1
        );
        return None;
    };
    usage.insert(key, seen + 1);

    let score = raw.score.and_then(|s| {
        let conf = Confidence::new(s);
        if conf.is_none() {
            warn!("ignoring out-of-range score {} on '{}'", s, raw.text);
        }
        conf
    });

    Some(Annotation {
        text: raw.text.clone(),
        label: raw.label.clone(),
        start,
        end: start + needle.len(),
        score,
    })
}

/// Char offset of the `n`-th (zero-based) case-insensitive match.
fn nth_occurrence(haystack: &[char], needle: &[char], n: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .filter(|&i| {
            haystack[i..i + needle.len()]
                .iter()
                .zip(needle)
                .all(|(&a, &b)| chars_eq_ignore_case(a, b))
        })
        .nth(n)
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}
