//! Styled text fragments shared by the body model and the page decoration.
//!
//! A [`Span`] carries the inline decorations the job description uses (bold labels, coloured and
//! underlined links).  `genpdf`'s [`StyledString`] has no underline attribute, so [`StyledSpan`]
//! keeps the flag next to the string for the elements that draw the stroke themselves.

use genpdf::style::{Color, Style, StyledString};

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    color: Option<Color>,
    underline: bool,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the span should be rendered in bold.
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Returns the configured color for the span, if any.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns whether the span is marked as underlined.
    pub fn is_underlined(&self) -> bool {
        self.underline
    }

    /// Marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Marks the span as underlined.
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Assigns a color to the span.
    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(color) = self.color {
            style.set_color(color);
        }
        if self.bold {
            style.set_bold();
        }
        style
    }

    /// Converts the span to a [`StyledString`], dropping the underline attribute.
    pub fn to_styled_string(&self) -> StyledString {
        StyledString::new(self.text.clone(), self.to_style())
    }
}

/// A styled span ready to be consumed by `genpdf` elements together with the underline flag.
#[derive(Clone, Debug)]
pub struct StyledSpan {
    /// The styled text fragment.
    pub string: StyledString,
    /// Whether the fragment should be rendered with an underline.
    pub underline: bool,
}

impl StyledSpan {
    /// Creates a new styled span.
    pub fn new(string: StyledString, underline: bool) -> Self {
        Self { string, underline }
    }
}

impl From<&Span> for StyledSpan {
    fn from(span: &Span) -> Self {
        StyledSpan::new(span.to_styled_string(), span.underline)
    }
}

/// Concatenates the text of all spans.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(Span::text).collect()
}

/// Splits spans into `(word, bold)` tokens on whitespace, the unit used for line wrapping.
///
/// A word that straddles two spans is kept whole and takes the weight of its first fragment.
pub fn words(spans: &[Span]) -> Vec<(String, bool)> {
    let mut words: Vec<(String, bool)> = Vec::new();
    let mut open = false;

    for span in spans {
        for (index, piece) in span.text.split(char::is_whitespace).enumerate() {
            if index > 0 {
                open = false;
            }
            if piece.is_empty() {
                continue;
            }
            match words.last_mut() {
                Some((word, _)) if open => word.push_str(piece),
                _ => words.push((piece.to_string(), span.bold)),
            }
            open = true;
        }
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_to_style_reflects_flags() {
        let span = Span::new("Hello").bold().colored(Color::Rgb(0, 0, 139));
        assert_eq!(span.color(), Some(Color::Rgb(0, 0, 139)));
        assert!(!span.is_underlined());
        let styled = span.to_styled_string();
        assert_eq!(styled.s, "Hello");
        assert!(styled.style.is_bold());
        assert_eq!(styled.style.color(), Some(Color::Rgb(0, 0, 139)));
    }

    #[test]
    fn styled_span_captures_underline_flag() {
        let span = Span::new("www.acme.test").underline();
        assert!(span.is_underlined());
        assert_eq!(span.color(), None);
        let styled = StyledSpan::from(&span);
        assert_eq!(styled.string.s, "www.acme.test");
        assert!(styled.underline);
    }

    #[test]
    fn words_split_on_whitespace_across_spans() {
        let spans = vec![
            Span::new("• "),
            Span::new("Build APIs:").bold(),
            Span::new(" ship  fast"),
        ];
        assert_eq!(
            words(&spans),
            vec![
                ("•".to_string(), false),
                ("Build".to_string(), true),
                ("APIs:".to_string(), true),
                ("ship".to_string(), false),
                ("fast".to_string(), false),
            ]
        );
    }

    #[test]
    fn words_join_fragments_without_whitespace() {
        let spans = vec![Span::new("Nice").bold(), Span::new("-to-have")];
        assert_eq!(words(&spans), vec![("Nice-to-have".to_string(), true)]);
    }

    #[test]
    fn plain_text_concatenates() {
        let spans = vec![Span::new("Title:").bold(), Span::new(" body")];
        assert_eq!(plain_text(&spans), "Title: body");
    }
}
