//! Typographic styles for every text role in the document.

use genpdf::style::Color;
use genpdf::Alignment;

/// Horizontal alignment of a text block.
///
/// Mirrors the subset of [`genpdf::Alignment`] the document uses while staying `Debug`/`Eq`
/// friendly for tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

impl From<HorizontalAlignment> for Alignment {
    fn from(alignment: HorizontalAlignment) -> Self {
        match alignment {
            HorizontalAlignment::Left => Alignment::Left,
            HorizontalAlignment::Center => Alignment::Center,
            HorizontalAlignment::Right => Alignment::Right,
        }
    }
}

/// Style of one text role. Lengths are in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub bold: bool,
    pub font_size: u8,
    /// Baseline-to-baseline distance.
    pub leading: f64,
    pub alignment: HorizontalAlignment,
    pub space_before: f64,
    pub space_after: f64,
    pub left_indent: f64,
    pub right_indent: f64,
    pub color: Option<Color>,
}

impl TextStyle {
    /// A regular-weight, left-aligned style with the given size and leading.
    pub fn new(font_size: u8, leading: f64) -> Self {
        Self {
            bold: false,
            font_size,
            leading,
            alignment: HorizontalAlignment::Left,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            right_indent: 0.0,
            color: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn aligned(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spaced(mut self, before: f64, after: f64) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    pub fn indented(mut self, left: f64, right: f64) -> Self {
        self.left_indent = left;
        self.right_indent = right;
        self
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Lowers size and leading by `step` points, keeping the size at or above `floor` and the
    /// leading at least one point above the size.
    pub fn reduce(&mut self, step: u8, floor: u8) {
        self.font_size = self.font_size.saturating_sub(step).max(floor);
        let min_leading = f64::from(self.font_size) + 1.0;
        self.leading = (self.leading - f64::from(step)).max(min_leading);
    }
}

/// The body text roles a [`crate::model::Block`] can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextRole {
    Title,
    Meta,
    SectionHeader,
    Body,
    BulletTitle,
    BulletBody,
}

/// Link colour used for the footer website.
pub const LINK_COLOR: Color = Color::Rgb(0, 0, 139);

/// The complete set of styles used by one document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutStyleSet {
    pub title: TextStyle,
    pub meta: TextStyle,
    pub section_header: TextStyle,
    pub body: TextStyle,
    pub bullet_title: TextStyle,
    pub bullet_body: TextStyle,
    pub header_name: TextStyle,
    pub footer_name: TextStyle,
    pub footer_link: TextStyle,
}

impl LayoutStyleSet {
    /// Returns the style for a body role.
    pub fn get(&self, role: TextRole) -> &TextStyle {
        match role {
            TextRole::Title => &self.title,
            TextRole::Meta => &self.meta,
            TextRole::SectionHeader => &self.section_header,
            TextRole::Body => &self.body,
            TextRole::BulletTitle => &self.bullet_title,
            TextRole::BulletBody => &self.bullet_body,
        }
    }

    /// Shrinks the body typography by one step.
    ///
    /// Body, bullet and metadata text bottom out at 8pt and section headers at 10pt.  The title
    /// and the page decoration styles are left alone.
    pub fn reduce_body_typography(&mut self, step: u8) {
        for style in [
            &mut self.body,
            &mut self.bullet_body,
            &mut self.bullet_title,
            &mut self.meta,
        ] {
            style.reduce(step, 8);
        }
        self.section_header.reduce(step, 10);
    }
}

impl Default for LayoutStyleSet {
    fn default() -> Self {
        Self {
            title: TextStyle::new(14, 18.0).bold().spaced(4.0, 6.0),
            meta: TextStyle::new(11, 13.0).spaced(0.0, 1.0),
            section_header: TextStyle::new(11, 14.0).bold().spaced(10.0, 6.0),
            body: TextStyle::new(11, 13.0).spaced(0.0, 6.0),
            bullet_title: TextStyle::new(11, 13.0).spaced(4.0, 2.0),
            bullet_body: TextStyle::new(11, 13.0)
                .spaced(0.0, 6.0)
                .indented(15.0, 5.0),
            header_name: TextStyle::new(12, 14.0)
                .bold()
                .aligned(HorizontalAlignment::Right),
            footer_name: TextStyle::new(11, 14.0)
                .bold()
                .aligned(HorizontalAlignment::Center),
            footer_link: TextStyle::new(9, 11.0)
                .aligned(HorizontalAlignment::Center)
                .colored(LINK_COLOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_respects_floors() {
        let mut styles = LayoutStyleSet::default();
        for _ in 0..10 {
            styles.reduce_body_typography(1);
        }
        assert_eq!(styles.body.font_size, 8);
        assert_eq!(styles.meta.font_size, 8);
        assert_eq!(styles.section_header.font_size, 10);
        assert!((styles.body.leading - 9.0).abs() < f64::EPSILON);
        assert!((styles.section_header.leading - 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reduce_leaves_title_and_decoration() {
        let mut styles = LayoutStyleSet::default();
        styles.reduce_body_typography(1);
        let defaults = LayoutStyleSet::default();
        assert_eq!(styles.title, defaults.title);
        assert_eq!(styles.header_name, defaults.header_name);
        assert_eq!(styles.footer_link, defaults.footer_link);
        assert_eq!(styles.body.font_size, 10);
        assert!((styles.body.leading - 12.0).abs() < f64::EPSILON);
    }
}
