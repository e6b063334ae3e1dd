//! Renderable body blocks.
//!
//! The body is built as a flat list of [`Block`]s before anything touches `genpdf`.  Text blocks
//! refer to a [`TextRole`] rather than a concrete style, so the overflow fitter can retune the
//! [`crate::styles::LayoutStyleSet`] after the blocks exist.  Spacer heights and rule thicknesses
//! are owned by the blocks and shrunk in place by the fitter.

use genpdf::style::Color;

use crate::richtext::{self, Span};
use crate::styles::TextRole;

/// Shade of a horizontal rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleShade {
    /// Separator between the job metadata and the sections.
    Grey,
    /// Separator between sections.
    LightGrey,
}

impl RuleShade {
    pub fn color(self) -> Color {
        match self {
            RuleShade::Grey => Color::Greyscale(128),
            RuleShade::LightGrey => Color::Greyscale(211),
        }
    }
}

/// A paragraph of styled spans rendered with the style of its role.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    role: TextRole,
    spans: Vec<Span>,
}

impl TextBlock {
    pub fn new(role: TextRole, spans: impl Into<Vec<Span>>) -> Self {
        Self {
            role,
            spans: spans.into(),
        }
    }

    pub fn role(&self) -> TextRole {
        self.role
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The text of all spans joined together.
    pub fn plain_text(&self) -> String {
        richtext::plain_text(&self.spans)
    }

    /// The text of the bold spans only.
    pub fn bold_text(&self) -> String {
        self.spans
            .iter()
            .filter(|span| span.is_bold())
            .map(Span::text)
            .collect()
    }

    /// Whether every non-blank span is bold.
    pub fn is_bold(&self) -> bool {
        self.spans
            .iter()
            .filter(|span| !span.text().trim().is_empty())
            .all(Span::is_bold)
    }
}

/// Individual content blocks that make up the document body.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled paragraph content.
    Text(TextBlock),
    /// Fixed vertical gap, in points.
    Spacer { height: f64 },
    /// Full-width horizontal rule, thickness in points.
    Rule { thickness: f64, shade: RuleShade },
}

impl Block {
    /// Convenience helper for building a text block.
    pub fn text(role: TextRole, spans: impl Into<Vec<Span>>) -> Self {
        Self::Text(TextBlock::new(role, spans))
    }

    /// A text block made of a single unstyled span.
    pub fn plain(role: TextRole, text: impl Into<String>) -> Self {
        Self::text(role, vec![Span::new(text)])
    }

    /// A text block made of a single bold span.
    pub fn bold(role: TextRole, text: impl Into<String>) -> Self {
        Self::text(role, vec![Span::new(text).bold()])
    }

    pub fn spacer(height: f64) -> Self {
        Self::Spacer { height }
    }

    pub fn rule(thickness: f64, shade: RuleShade) -> Self {
        Self::Rule { thickness, shade }
    }

    /// Returns the text block, if this is one.
    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Block::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the role of a text block.
    pub fn role(&self) -> Option<TextRole> {
        self.as_text().map(TextBlock::role)
    }

    pub fn is_rule(&self) -> bool {
        matches!(self, Block::Rule { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_detection_ignores_blank_spans() {
        let block = TextBlock::new(
            TextRole::BulletTitle,
            vec![Span::new("• "), Span::new("Build APIs:").bold()],
        );
        assert!(!block.is_bold());
        assert_eq!(block.bold_text(), "Build APIs:");

        let block = TextBlock::new(
            TextRole::BulletTitle,
            vec![Span::new(" "), Span::new("Label:").bold()],
        );
        assert!(block.is_bold());
    }

    #[test]
    fn helpers_build_expected_variants() {
        assert_eq!(Block::bold(TextRole::Title, "T").role(), Some(TextRole::Title));
        assert!(Block::rule(1.0, RuleShade::Grey).is_rule());
        assert_eq!(Block::spacer(8.0).as_text(), None);
    }
}
