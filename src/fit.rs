//! Keeps long job descriptions close to a target page count.
//!
//! The fitter estimates the body height and, when it exceeds the budget, first tightens spacers
//! and rules and then steps the body typography down.  Content that already fits is left
//! untouched, so fitting is idempotent for it.

use log::debug;

use crate::geometry::PageGeometry;
use crate::metrics::{self, TextMeasure};
use crate::model::Block;
use crate::styles::LayoutStyleSet;

/// Target body height, in pages.
pub const BUDGET_PAGES: f64 = 2.8;

/// Slack allowed over the budget after spacing alone has been reduced.
pub const SPACING_TOLERANCE: f64 = 1.1;

/// Height assumed for a block that cannot be wrapped at the available width.
pub const FALLBACK_BLOCK_HEIGHT: f64 = 12.0;

const SPACER_FLOOR: f64 = 2.0;
const RULE_FLOOR: f64 = 0.5;
const RULE_RATIO: f64 = 0.8;
const FIRST_SPACING_REDUCTION: f64 = 0.2;
const SECOND_SPACING_REDUCTION: f64 = 0.3;
const TYPOGRAPHY_STEP: u8 = 1;

/// What the fitter had to do to the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitOutcome {
    /// The content fitted the budget as built.
    Untouched,
    /// Spacers and rules were tightened.
    SpacingReduced,
    /// Spacing was tightened twice and the body typography was reduced.
    TypographyReduced,
}

/// Estimated height of one block at `width`, in points.
///
/// Text is measured as wrapped lines times leading; space before and after is not included.
pub fn block_height(
    block: &Block,
    styles: &LayoutStyleSet,
    measure: &dyn TextMeasure,
    width: f64,
) -> f64 {
    match block {
        Block::Text(text) => {
            let style = styles.get(text.role());
            let available = width - style.left_indent - style.right_indent;
            match metrics::wrapped_line_count(measure, text.spans(), style.font_size, available) {
                Some(lines) => lines as f64 * style.leading,
                None => FALLBACK_BLOCK_HEIGHT,
            }
        }
        Block::Spacer { height } => *height,
        Block::Rule { thickness, .. } => *thickness,
    }
}

/// Estimated total height of `blocks` at `width`, in points.
pub fn estimate_height(
    blocks: &[Block],
    styles: &LayoutStyleSet,
    measure: &dyn TextMeasure,
    width: f64,
) -> f64 {
    blocks
        .iter()
        .map(|block| block_height(block, styles, measure, width))
        .sum()
}

/// Shrinks every spacer by `reduction` (a fraction of its height) and every rule's thickness by
/// a fixed ratio, respecting the spacer and rule floors.
pub fn shrink_spacing(blocks: &mut [Block], reduction: f64) {
    for block in blocks {
        match block {
            Block::Spacer { height } => {
                *height = (*height * (1.0 - reduction)).max(SPACER_FLOOR);
            }
            Block::Rule { thickness, .. } => {
                *thickness = (*thickness * RULE_RATIO).max(RULE_FLOOR);
            }
            Block::Text(_) => {}
        }
    }
}

/// Fits `blocks` into [`BUDGET_PAGES`] pages of `page`'s content area.
pub fn fit_to_budget(
    blocks: &mut [Block],
    styles: &mut LayoutStyleSet,
    page: &PageGeometry,
    measure: &dyn TextMeasure,
) -> FitOutcome {
    let width = page.content_width();
    let budget = page.content_height() * BUDGET_PAGES;

    let height = estimate_height(blocks, styles, measure, width);
    if height <= budget {
        debug!("Body fits: {:.1}pt of {:.1}pt", height, budget);
        return FitOutcome::Untouched;
    }

    shrink_spacing(blocks, FIRST_SPACING_REDUCTION);
    let height = estimate_height(blocks, styles, measure, width);
    if height <= budget * SPACING_TOLERANCE {
        debug!(
            "Body fits after tightening spacing: {:.1}pt of {:.1}pt",
            height, budget
        );
        return FitOutcome::SpacingReduced;
    }

    styles.reduce_body_typography(TYPOGRAPHY_STEP);
    shrink_spacing(blocks, SECOND_SPACING_REDUCTION);
    debug!(
        "Body still over budget at {:.1}pt of {:.1}pt, reduced typography to {}pt",
        height, budget, styles.body.font_size
    );
    FitOutcome::TypographyReduced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::StandardMetrics;
    use crate::model::RuleShade;
    use crate::styles::TextRole;

    fn page() -> PageGeometry {
        PageGeometry::LETTER
    }

    #[test]
    fn short_content_is_untouched_and_idempotent() {
        let original = vec![
            Block::bold(TextRole::Title, "Backend Engineer"),
            Block::spacer(10.0),
            Block::rule(1.0, RuleShade::Grey),
            Block::plain(TextRole::Body, "Acme builds rockets."),
        ];
        let mut blocks = original.clone();
        let mut styles = LayoutStyleSet::default();

        for _ in 0..2 {
            let outcome = fit_to_budget(&mut blocks, &mut styles, &page(), &StandardMetrics);
            assert_eq!(outcome, FitOutcome::Untouched);
        }
        assert_eq!(blocks, original);
        assert_eq!(styles, LayoutStyleSet::default());
    }

    #[test]
    fn moderate_overflow_only_tightens_spacing() {
        // 18 x 100pt = 1800pt against a 1693.44pt budget; 18 x 80pt = 1440pt afterwards.
        let mut blocks = vec![Block::spacer(100.0); 18];
        blocks.push(Block::rule(1.0, RuleShade::Grey));
        let mut styles = LayoutStyleSet::default();

        let outcome = fit_to_budget(&mut blocks, &mut styles, &page(), &StandardMetrics);
        assert_eq!(outcome, FitOutcome::SpacingReduced);
        match blocks[0] {
            Block::Spacer { height } => assert!((height - 80.0).abs() < 1e-9),
            ref other => panic!("expected spacer, got {other:?}"),
        }
        assert_eq!(blocks[18], Block::rule(0.8, RuleShade::Grey));
        assert_eq!(styles, LayoutStyleSet::default());
    }

    #[test]
    fn heavy_overflow_reduces_typography() {
        let mut blocks = Vec::new();
        for index in 0..200 {
            blocks.push(Block::plain(TextRole::BulletTitle, format!("• Item {index}:")));
            blocks.push(Block::plain(
                TextRole::BulletBody,
                "Design, build and operate services that keep the platform healthy.",
            ));
            blocks.push(Block::spacer(4.0));
        }
        let mut styles = LayoutStyleSet::default();

        let outcome = fit_to_budget(&mut blocks, &mut styles, &page(), &StandardMetrics);
        assert_eq!(outcome, FitOutcome::TypographyReduced);
        assert_eq!(styles.body.font_size, 10);
        assert_eq!(styles.section_header.font_size, 10);
        assert_eq!(styles.title, LayoutStyleSet::default().title);
        // 4pt -> 3.2pt -> 2.24pt.
        match blocks[2] {
            Block::Spacer { height } => assert!((height - 2.24).abs() < 1e-9),
            ref other => panic!("expected spacer, got {other:?}"),
        }
    }

    #[test]
    fn spacing_never_drops_below_floors() {
        let mut blocks = vec![Block::spacer(2.5), Block::rule(0.5, RuleShade::LightGrey)];
        shrink_spacing(&mut blocks, 0.3);
        assert_eq!(blocks[0], Block::spacer(2.0));
        assert_eq!(blocks[1], Block::rule(0.5, RuleShade::LightGrey));
    }

    #[test]
    fn unwrappable_blocks_use_fallback_height() {
        let block = Block::plain(TextRole::BulletBody, "text");
        let styles = LayoutStyleSet::default();
        // Bullet bodies are indented 20pt in total.
        assert_eq!(
            block_height(&block, &styles, &StandardMetrics, 15.0),
            FALLBACK_BLOCK_HEIGHT
        );
        assert!((block_height(&block, &styles, &StandardMetrics, 468.0) - 13.0).abs() < 1e-9);
    }
}
