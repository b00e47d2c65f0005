//! Deterministic label → color assignment.
//!
//! Every label maps to one entry of a fixed 15-color palette through a
//! polynomial string hash, so a label keeps its color across re-renders,
//! documents and processes without any stored state.
//!
//! ```text
//!   "PERSON" ──hash──▶ -1938387115 ──|h| % 15──▶ 10 ──▶ violet
//! ```
//!
//! The hash runs over UTF-16 code units with 32-bit signed wrap-around, the
//! same arithmetic the web client uses, so both sides agree on colors.

use serde::Serialize;

/// One palette entry: four shades of a hue as CSS hex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorToken {
    /// Human-readable hue name.
    pub name: &'static str,
    /// Base shade: borders, legend dots.
    pub main: &'static str,
    /// Chip background.
    pub light: &'static str,
    /// Highlight background.
    pub lighter: &'static str,
    /// Chip text.
    pub dark: &'static str,
}

impl ColorToken {
    const fn new(
        name: &'static str,
        main: &'static str,
        light: &'static str,
        lighter: &'static str,
        dark: &'static str,
    ) -> Self {
        Self {
            name,
            main,
            light,
            lighter,
            dark,
        }
    }

    /// The `main` shade as an RGB triple.
    #[must_use]
    pub fn main_rgb(&self) -> Option<(u8, u8, u8)> {
        hex_to_rgb(self.main)
    }
}

/// The fixed palette. Order is part of the color contract.
pub const PALETTE: [ColorToken; 15] = [
    ColorToken::new("blue", "#3b82f6", "#dbeafe", "#eff6ff", "#1d4ed8"),
    ColorToken::new("emerald", "#10b981", "#dcfce7", "#f0fdf4", "#059669"),
    ColorToken::new("purple", "#8b5cf6", "#e9d5ff", "#faf5ff", "#7c3aed"),
    ColorToken::new("orange", "#f97316", "#fed7aa", "#fff7ed", "#ea580c"),
    ColorToken::new("yellow", "#eab308", "#fef3c7", "#fffbeb", "#ca8a04"),
    ColorToken::new("cyan", "#06b6d4", "#a5f3fc", "#ecfeff", "#0891b2"),
    ColorToken::new("lime", "#84cc16", "#dcfce7", "#f7fee7", "#65a30d"),
    ColorToken::new("rose", "#f43f5e", "#fecdd3", "#fff1f2", "#e11d48"),
    ColorToken::new("indigo", "#6366f1", "#c7d2fe", "#eef2ff", "#4f46e5"),
    ColorToken::new("teal", "#14b8a6", "#99f6e4", "#f0fdfa", "#0d9488"),
    ColorToken::new("violet", "#a855f7", "#ddd6fe", "#f5f3ff", "#9333ea"),
    ColorToken::new("pink", "#ec4899", "#f9a8d4", "#fdf2f8", "#db2777"),
    ColorToken::new("slate", "#5f71ff", "#adb6fa", "#d6d9f6", "#3d53ff"),
    ColorToken::new("amber", "#f59e0b", "#fed7aa", "#fffbeb", "#d97706"),
    ColorToken::new("green", "#22c55e", "#bbf7d0", "#f0fdf4", "#16a34a"),
];

/// `h = h * 31 + unit` over UTF-16 code units, wrapping at 32 bits.
#[must_use]
pub fn label_hash(label: &str) -> i32 {
    label.encode_utf16().fold(0i32, |h, unit| {
        h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
    })
}

/// Palette index for a label.
#[must_use]
pub fn color_index(label: &str) -> usize {
    label_hash(label).unsigned_abs() as usize % PALETTE.len()
}

/// Palette entry for a label.
///
/// # Example
///
/// ```rust
/// use nerview::palette::color_for;
///
/// assert_eq!(color_for("PERSON"), color_for("PERSON"));
/// assert_eq!(color_for("PERSON").name, "violet");
/// ```
#[must_use]
pub fn color_for(label: &str) -> &'static ColorToken {
    &PALETTE[color_index(label)]
}

/// Colors for a label chip in an entity list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChipStyle {
    /// Fill color.
    pub background: &'static str,
    /// 1px border color.
    pub border: &'static str,
    /// Text color.
    pub foreground: &'static str,
}

/// Chip colors for a label: light fill, main border, dark text.
#[must_use]
pub fn chip_style(label: &str) -> ChipStyle {
    let token = color_for(label);
    ChipStyle {
        background: token.light,
        border: token.main,
        foreground: token.dark,
    }
}

fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_matches_reference_values() {
        assert_eq!(label_hash(""), 0);
        assert_eq!(label_hash("A"), 65);
        assert_eq!(label_hash("GPE"), 70780);
        assert_eq!(label_hash("PERSON"), -1938387115);
        assert_eq!(label_hash("LOCATION"), -1611296843);
    }

    #[test]
    fn indices_are_stable() {
        assert_eq!(color_index("PERSON"), 10);
        assert_eq!(color_index("LOCATION"), 8);
        assert_eq!(color_index("DRUG"), 6);
        assert_eq!(color_index("DOSAGE"), 0);
        assert_eq!(color_index("Zürich"), 2);
    }

    #[test]
    fn hash_uses_utf16_units() {
        // U+1F600 is a surrogate pair: 0xD83D, 0xDE00.
        assert_eq!(label_hash("😀"), 0xD83D * 31 + 0xDE00);
        assert_eq!(color_index("😀"), 4);
    }

    #[test]
    fn min_hash_does_not_overflow() {
        // Any i32 is a valid input to the index computation.
        assert_eq!(i32::MIN.unsigned_abs() as usize % PALETTE.len(), 2147483648 % 15);
    }

    #[test]
    fn different_labels_usually_differ() {
        assert_ne!(color_for("PERSON"), color_for("LOCATION"));
    }

    #[test]
    fn case_sensitive() {
        assert_ne!(label_hash("person"), label_hash("PERSON"));
    }

    #[test]
    fn chip_style_uses_shades() {
        let style = chip_style("PERSON");
        assert_eq!(style.background, "#ddd6fe");
        assert_eq!(style.border, "#a855f7");
        assert_eq!(style.foreground, "#9333ea");
    }

    #[test]
    fn rgb_parses_every_entry() {
        for token in &PALETTE {
            assert!(token.main_rgb().is_some(), "{} has a bad main shade", token.name);
        }
        assert_eq!(PALETTE[0].main_rgb(), Some((0x3b, 0x82, 0xf6)));
        assert_eq!(hex_to_rgb("3b82f6"), None);
    }
}
