//! Output formatting utilities for CLI commands
//!
//! Renderers return `String`s and take an explicit `colored` flag so they
//! can be tested without a terminal.

use is_terminal::IsTerminal;
use std::io::{self, Write};

use serde::Serialize;

use crate::aggregate::{AggregatedEntity, LabelSummary, RunSummary};
use crate::merge::{MergeOutcome, MergedSpan, Segment};
use crate::palette::{color_for, ColorToken};

use super::parser::ColorMode;

/// Write output to file or stdout
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    if let Some(path) = path {
        std::fs::write(path, content).map_err(|e| format!("Failed to write to {}: {}", path, e))?;
    } else {
        print!("{}", content);
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {}", e))?;
    }
    Ok(())
}

/// Whether to emit ANSI escapes for a color mode.
pub fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal(),
    }
}

/// Wrap text in an ANSI SGR sequence when `enabled`.
pub fn paint(code: &str, text: &str, enabled: bool) -> String {
    if enabled {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Colorize text with ANSI escape codes (only if stdout is a terminal)
pub fn color(code: &str, text: &str) -> String {
    paint(code, text, io::stdout().is_terminal())
}

/// Truecolor SGR code for a palette entry's main shade.
pub fn token_code(token: &ColorToken) -> String {
    match token.main_rgb() {
        Some((r, g, b)) => format!("1;38;2;{};{};{}", r, g, b),
        None => "1".to_string(),
    }
}

/// SGR code for a label.
pub fn label_code(label: &str) -> String {
    token_code(color_for(label))
}

/// `[LABEL: text]`, colored by label.
fn entity_marker(label: &str, text: &str, colored: bool) -> String {
    paint(&label_code(label), &format!("[{}: {}]", label, text), colored)
}

/// Segments as one line of text with entities marked inline.
pub fn render_inline(segments: &[Segment], colored: bool) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Plain { text } => out.push_str(text),
            Segment::Entity { text, label, .. } => {
                out.push_str(&entity_marker(label, text, colored))
            }
        }
    }
    out
}

/// Label counts, most frequent first, with a color swatch per label.
pub fn render_legend(summary: &LabelSummary, top: Option<usize>, colored: bool) -> String {
    let entries = match top {
        Some(n) => summary.most_common(n),
        None => summary.sorted(),
    };
    let width = entries.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, count) in entries {
        let swatch = paint(&label_code(label), "■", colored);
        out.push_str(&format!(
            "  {} {:<width$}  {}\n",
            swatch,
            label,
            count,
            width = width
        ));
    }
    out
}

/// Full human view of a merged prediction.
pub fn render_highlight(
    outcome: &MergeOutcome,
    summary: &LabelSummary,
    show_scores: bool,
    colored: bool,
) -> String {
    let mut out = render_inline(&outcome.segments, colored);
    if !out.ends_with('\n') {
        out.push('\n');
    }

    if summary.is_empty() {
        out.push_str("\nNo entities found.\n");
        return out;
    }

    out.push('\n');
    out.push_str(&paint("1", "Entity Summary", colored));
    out.push('\n');
    out.push_str(&render_legend(summary, None, colored));

    out.push('\n');
    out.push_str(&paint(
        "1",
        &format!("All Detected Entities ({})", outcome.entity_count()),
        colored,
    ));
    out.push('\n');
    for segment in &outcome.segments {
        if let Segment::Entity {
            text,
            label,
            score,
            start,
            end,
        } = segment
        {
            let mut line = format!(
                "  [{:3},{:3}) {} \"{}\"",
                start,
                end,
                paint(&label_code(label), label, colored),
                text
            );
            if show_scores {
                if let Some(score) = score {
                    line.push_str(&format!(" {}", score));
                }
            }
            out.push_str(&line);
            out.push('\n');
        }
    }

    if !outcome.skipped.is_empty() {
        out.push('\n');
        out.push_str(&render_skipped(&outcome.skipped, colored));
    }

    out
}

fn render_skipped(skipped: &[MergedSpan], colored: bool) -> String {
    let noun = if skipped.len() == 1 { "entity" } else { "entities" };
    let mut out = paint(
        "33",
        &format!("{} overlapping {} not highlighted:", skipped.len(), noun),
        colored,
    );
    out.push('\n');
    for span in skipped {
        out.push_str(&format!(
            "  [{:3},{:3}) {} \"{}\"\n",
            span.start,
            span.end,
            span.combined_label(),
            span.text
        ));
    }
    out
}

/// Human view of an experiment run.
pub fn render_run(
    entities: &[AggregatedEntity],
    summary: &LabelSummary,
    top: Option<usize>,
    colored: bool,
) -> String {
    let run = RunSummary::from_entities(entities);
    let mut out = format!(
        "{} entities, {} labels, {} documents\n",
        run.total_entities, run.unique_labels, run.documents_processed
    );
    if !summary.is_empty() {
        out.push('\n');
        out.push_str(&render_legend(summary, top, colored));
    }
    out
}

/// Swatches and hex shades for each label.
pub fn render_colors(labels: &[String], colored: bool) -> String {
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for label in labels {
        let token = color_for(label);
        out.push_str(&format!(
            "{} {:<width$}  {:<8} main {} light {} lighter {} dark {}\n",
            paint(&token_code(token), "■", colored),
            label,
            token.name,
            token.main,
            token.light,
            token.lighter,
            token.dark,
            width = width
        ));
    }
    out
}

/// Pretty JSON with a trailing newline.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value)
        .map(|s| s + "\n")
        .map_err(|e| format!("Failed to serialize output: {}", e))
}
