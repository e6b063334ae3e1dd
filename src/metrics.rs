//! Text measurement: string widths, shrink-to-fit and line wrapping estimates.
//!
//! Measurements go through the [`TextMeasure`] trait.  The page decoration measures with the
//! font actually loaded into the document (`genpdf`'s [`FontCache`]), while the overflow fitter
//! uses [`StandardMetrics`], static Helvetica advance widths that keep its budget decisions
//! independent of whichever TrueType family happens to be installed.

use genpdf::fonts::FontCache;
use genpdf::style::{Style, StyledString};

use crate::geometry;
use crate::richtext::{self, Span};

/// Measures rendered string widths in points.
pub trait TextMeasure {
    /// Width of `text` at `size` points in the regular or bold weight.
    fn text_width(&self, text: &str, bold: bool, size: u8) -> f64;
}

impl TextMeasure for FontCache {
    fn text_width(&self, text: &str, bold: bool, size: u8) -> f64 {
        let mut style = Style::new().with_font_size(size);
        if bold {
            style.set_bold();
        }
        geometry::points(StyledString::new(text, style).width(self))
    }
}

/// Helvetica advance widths in 1/1000 em for ASCII `0x20..=0x7E`. Index = `(c as usize) - 32`.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {..~
];

/// Helvetica-Bold advance widths in 1/1000 em, same layout as [`HELVETICA`].
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // {..~
];

/// Fallback width for characters outside the ASCII tables.
const AVERAGE_WIDTH: u16 = 556;

/// Static Helvetica metrics, the reference measure for the overflow budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardMetrics;

impl StandardMetrics {
    fn units(c: char, bold: bool) -> u16 {
        let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
        let code = c as usize;
        if (32..=126).contains(&code) {
            table[code - 32]
        } else {
            AVERAGE_WIDTH
        }
    }
}

impl TextMeasure for StandardMetrics {
    fn text_width(&self, text: &str, bold: bool, size: u8) -> f64 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(Self::units(c, bold)))
            .sum();
        f64::from(units) * f64::from(size) / 1000.0
    }
}

/// A font size chosen by [`shrink_to_fit`] and the width measured at that size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FittedText {
    pub size: u8,
    pub width: f64,
}

/// Lowers the font size in 1pt steps from `start` until `text` fits `max_width` or the size
/// reaches `floor`.
///
/// The result is either at least as narrow as `max_width` or sized exactly at the floor (or at
/// `start` when `start` is already below the floor).
pub fn shrink_to_fit(
    measure: &dyn TextMeasure,
    text: &str,
    bold: bool,
    start: u8,
    floor: u8,
    max_width: f64,
) -> FittedText {
    let mut size = start;
    let mut width = measure.text_width(text, bold, size);
    while width > max_width && size > floor {
        size -= 1;
        width = measure.text_width(text, bold, size);
    }
    FittedText { size, width }
}

/// Counts the lines a greedy word wrap of `spans` needs at `max_width`.
///
/// Returns `None` when the width leaves no room for text.  Empty text counts as zero lines.  A
/// single word wider than the line takes a line of its own.
pub fn wrapped_line_count(
    measure: &dyn TextMeasure,
    spans: &[Span],
    size: u8,
    max_width: f64,
) -> Option<usize> {
    if max_width <= 0.0 {
        return None;
    }

    let space = measure.text_width(" ", false, size);
    let mut lines = 0;
    let mut line_width = 0.0;

    for (word, bold) in richtext::words(spans) {
        let width = measure.text_width(&word, bold, size);
        if lines == 0 {
            lines = 1;
            line_width = width;
        } else if line_width + space + width <= max_width {
            line_width += space + width;
        } else {
            lines += 1;
            line_width = width;
        }
    }

    Some(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is `size / 2` points wide.
    struct HalfEm;

    impl TextMeasure for HalfEm {
        fn text_width(&self, text: &str, _bold: bool, size: u8) -> f64 {
            text.chars().count() as f64 * f64::from(size) / 2.0
        }
    }

    #[test]
    fn helvetica_widths_match_reference_values() {
        let metrics = StandardMetrics;
        // "Acme" = 667 + 500 + 833 + 556 = 2556 units.
        assert!((metrics.text_width("Acme", false, 10) - 25.56).abs() < 1e-9);
        // Bold "Hi" = 722 + 278 = 1000 units.
        assert!((metrics.text_width("Hi", true, 12) - 12.0).abs() < 1e-9);
        assert!(metrics.text_width("é", false, 10) > 0.0);
    }

    #[test]
    fn shrink_keeps_start_size_when_text_fits() {
        let fitted = shrink_to_fit(&StandardMetrics, "Acme", true, 12, 8, 252.0);
        assert_eq!(fitted.size, 12);
        assert!(fitted.width <= 252.0);
    }

    #[test]
    fn shrink_stops_as_soon_as_text_fits() {
        // 40 chars * size / 2: 12pt = 240, 11pt = 220, 10pt = 200.
        let text = "x".repeat(40);
        let fitted = shrink_to_fit(&HalfEm, &text, false, 12, 8, 210.0);
        assert_eq!(fitted.size, 10);
        assert!(fitted.width <= 210.0);
    }

    #[test]
    fn shrink_terminates_at_floor_for_very_long_names() {
        let name = "International Consolidated Widget Manufacturing Holdings Incorporated";
        let fitted = shrink_to_fit(&StandardMetrics, name, true, 12, 8, 252.0);
        assert_eq!(fitted.size, 8);
        assert!(fitted.width > 252.0);
    }

    #[test]
    fn shrink_result_always_fits_or_hits_floor() {
        let metrics = StandardMetrics;
        for length in [1, 10, 30, 45, 60, 90] {
            let text = "W".repeat(length);
            let fitted = shrink_to_fit(&metrics, &text, true, 12, 8, 252.0);
            assert!(fitted.size >= 8 && fitted.size <= 12);
            assert!(fitted.width <= 252.0 || fitted.size == 8);
        }
    }

    #[test]
    fn wrap_counts_lines() {
        let spans = vec![Span::new("aa bb cc dd")];
        // Each word 2 chars at 10pt = 10pt, space = 5pt.  "aa bb" = 25pt.
        assert_eq!(wrapped_line_count(&HalfEm, &spans, 10, 25.0), Some(2));
        assert_eq!(wrapped_line_count(&HalfEm, &spans, 10, 1000.0), Some(1));
        assert_eq!(wrapped_line_count(&HalfEm, &spans, 10, 5.0), Some(4));
    }

    #[test]
    fn wrap_rejects_non_positive_width() {
        let spans = vec![Span::new("text")];
        assert_eq!(wrapped_line_count(&HalfEm, &spans, 10, 0.0), None);
        assert_eq!(wrapped_line_count(&HalfEm, &[], 10, 100.0), Some(0));
    }
}
