//! `genpdf` element implementations for the job description body and page furniture.
//!
//! Body [`Block`]s are converted into [`BodyElement`]s once the layout has been fitted.  The page
//! decoration draws single text runs and the logo through [`TextRun`] and [`LogoImage`].

use std::path::Path;

use image::GenericImageView;

use genpdf::elements::{Image, Paragraph};
use genpdf::error::{Context as _, Error};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Element, Margins, Mm, Position, RenderResult, Scale, Size};

use crate::geometry::{self, mm};
use crate::model::{Block, RuleShade, TextBlock};
use crate::richtext::{Span, StyledSpan};
use crate::styles::{LayoutStyleSet, TextStyle};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const POINTS_PER_INCH: f64 = 72.0;
/// Size of one image pixel at the default resolution, in points.
const PIXEL_POINTS: f64 = POINTS_PER_INCH / DEFAULT_IMAGE_DPI;

fn clamp(value: Mm, max: Mm) -> Mm {
    if value > max {
        max
    } else {
        value
    }
}

/// A paragraph rendered with the style of its text role.
///
/// Leading is given in points, so the `genpdf` line spacing factor is derived from the loaded
/// font's natural line height on first render.  The paragraph keeps its state between renders so
/// text that does not fit continues on the next page.
pub struct TextElement {
    spans: Vec<Span>,
    style: TextStyle,
    paragraph: Option<Paragraph>,
    started: bool,
}

impl TextElement {
    /// Creates the element for `block` using the given resolved style.
    pub fn new(block: &TextBlock, style: TextStyle) -> Self {
        Self {
            spans: block.spans().to_vec(),
            style,
            paragraph: None,
            started: false,
        }
    }

    fn base_style(&self, context: &genpdf::Context, inherited: Style) -> Style {
        let mut style = Style::new().with_font_size(self.style.font_size);
        if self.style.bold {
            style.set_bold();
        }
        if let Some(color) = self.style.color {
            style.set_color(color);
        }

        let natural = geometry::points(style.line_height(&context.font_cache));
        if natural > f64::EPSILON {
            style = style.with_line_spacing(self.style.leading / natural);
        }
        inherited.and(style)
    }
}

fn paragraph_from_spans(spans: &[Span], style: &TextStyle) -> Paragraph {
    let mut paragraph = Paragraph::default();
    for span in spans {
        paragraph.push(span.to_styled_string());
    }
    paragraph.set_alignment(style.alignment.into());
    paragraph
}

impl Element for TextElement {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let base = self.base_style(context, style);

        if !self.started {
            self.started = true;
            let before = clamp(mm(self.style.space_before), area.size().height);
            area.add_offset(Position::new(0, before));
            result.size.height += before;
        }

        area.add_margins(Margins::trbl(
            0,
            mm(self.style.right_indent),
            0,
            mm(self.style.left_indent),
        ));

        let spans = &self.spans;
        let text_style = &self.style;
        let paragraph = self
            .paragraph
            .get_or_insert_with(|| paragraph_from_spans(spans, text_style));
        let inner = paragraph.render(context, area.clone(), base)?;

        result.size.width = inner.size.width;
        result.size.height += inner.size.height;
        result.has_more = inner.has_more;

        if !inner.has_more {
            let remaining = area.size().height - inner.size.height;
            result.size.height += clamp(mm(self.style.space_after), remaining);
        }

        Ok(result)
    }
}

/// A fixed vertical gap.
pub struct SpacerElement {
    height: f64,
}

impl SpacerElement {
    pub fn new(height: f64) -> Self {
        Self { height }
    }
}

impl Element for SpacerElement {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        result.size = Size::new(0, clamp(mm(self.height), area.size().height));
        Ok(result)
    }
}

/// A full-width horizontal rule.
pub struct RuleElement {
    thickness: f64,
    shade: RuleShade,
}

impl RuleElement {
    pub fn new(thickness: f64, shade: RuleShade) -> Self {
        Self { thickness, shade }
    }
}

impl Element for RuleElement {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let thickness = mm(self.thickness);
        if thickness > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        let width = area.size().width;
        fill_rect(
            context,
            &area,
            (0.0, 0.0),
            (geometry::points(width), self.thickness),
            self.shade.color(),
        )?;

        result.size = Size::new(width, thickness);
        Ok(result)
    }
}

/// The element rendered for one body [`Block`].
pub enum BodyElement {
    Text(TextElement),
    Spacer(SpacerElement),
    Rule(RuleElement),
}

impl BodyElement {
    /// Converts a block, resolving text roles against `styles`.
    pub fn from_block(block: &Block, styles: &LayoutStyleSet) -> Self {
        match block {
            Block::Text(text) => Self::Text(TextElement::new(text, *styles.get(text.role()))),
            Block::Spacer { height } => Self::Spacer(SpacerElement::new(*height)),
            Block::Rule { thickness, shade } => Self::Rule(RuleElement::new(*thickness, *shade)),
        }
    }
}

impl Element for BodyElement {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        match self {
            Self::Text(element) => element.render(context, area, style),
            Self::Spacer(element) => element.render(context, area, style),
            Self::Rule(element) => element.render(context, area, style),
        }
    }
}

/// A single line of styled text that supports underlines by drawing thin strokes underneath.
///
/// The text is placed with its top edge at the area origin; [`TextRun::baseline_offset`] gives
/// the distance from there to the baseline so callers can position runs by baseline.
pub struct TextRun {
    spans: Vec<StyledSpan>,
    underline_offset: Mm,
    underline_thickness: Mm,
}

impl TextRun {
    /// Creates a new text run from the provided spans.
    pub fn new(spans: Vec<StyledSpan>) -> Self {
        Self {
            spans,
            underline_offset: mm(1.0),
            underline_thickness: mm(0.5),
        }
    }

    /// Sets the distance between the baseline and the underline stroke, in points.
    pub fn with_underline(mut self, offset: f64, thickness: f64) -> Self {
        self.underline_offset = mm(offset);
        self.underline_thickness = mm(thickness);
        self
    }

    /// Distance from the top of the run to its baseline.
    pub fn baseline_offset(&self, context: &genpdf::Context, style: Style) -> Mm {
        self.spans
            .iter()
            .map(|span| {
                let merged = style.and(span.string.style);
                merged
                    .font(&context.font_cache)
                    .glyph_height(merged.font_size())
            })
            .fold(Mm::default(), |max, height| max.max(height))
    }
}

impl Element for TextRun {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut prepared: Vec<(StyledString, bool, Mm)> = Vec::with_capacity(self.spans.len());
        let mut total_width = Mm::default();
        let mut max_line_height = Mm::default();

        for span in &self.spans {
            let mut string = span.string.clone();
            string.style = style.and(string.style);
            let width = string.width(&context.font_cache);
            total_width += width;
            max_line_height = max_line_height.max(string.style.line_height(&context.font_cache));
            prepared.push((string, span.underline, width));
        }

        let mut result = RenderResult::default();
        if max_line_height > area.size().height {
            result.has_more = true;
            return Ok(result);
        }

        if let Some(mut section) =
            area.text_section(&context.font_cache, Position::new(0, 0), style)
        {
            for (string, _, _) in &prepared {
                section.print_str(&string.s, string.style)?;
            }
        } else {
            result.has_more = true;
            return Ok(result);
        }

        let stroke = geometry::points(self.underline_thickness);
        let baseline = self.baseline_offset(context, style);
        let stroke_top = geometry::points(baseline + self.underline_offset) - stroke / 2.0;
        let mut cursor = Mm::default();
        for (string, underline, width) in &prepared {
            if *underline {
                fill_rect(
                    context,
                    &area,
                    (geometry::points(cursor), stroke_top),
                    (geometry::points(*width), stroke),
                    string.style.color().unwrap_or(Color::Rgb(0, 0, 0)),
                )?;
            }
            cursor += *width;
        }

        result.size = Size::new(total_width, max_line_height);
        Ok(result)
    }
}

fn rgb(color: Color) -> [u8; 3] {
    match color {
        Color::Rgb(r, g, b) => [r, g, b],
        Color::Greyscale(value) => [value, value, value],
        Color::Cmyk(c, m, y, k) => {
            let channel = |ink: u8| {
                let ink = 255 - u16::from(ink);
                let key = 255 - u16::from(k);
                (ink * key / 255) as u8
            };
            [channel(c), channel(m), channel(y)]
        }
    }
}

/// Scale that stretches one image pixel to `width` x `height` points.
fn pixel_scale(width: f64, height: f64) -> Scale {
    Scale::new(width / PIXEL_POINTS, height / PIXEL_POINTS)
}

/// Fills a `width` x `height` rectangle whose top-left corner is at `(x, top)`, in points from the
/// area origin.
///
/// `genpdf` strokes lines at a fixed width, so filled shapes are drawn as a stretched one-pixel
/// image.
fn fill_rect(
    context: &genpdf::Context,
    area: &render::Area<'_>,
    (x, top): (f64, f64),
    (width, height): (f64, f64),
    color: Color,
) -> Result<(), Error> {
    if width <= 0.0 || height <= 0.0 {
        return Ok(());
    }
    let pixel = image::RgbImage::from_pixel(1, 1, image::Rgb(rgb(color)));
    let mut image = Image::from_dynamic_image(image::DynamicImage::ImageRgb8(pixel))?;
    image.set_scale(pixel_scale(width, height));

    let mut rect_area = area.clone();
    rect_area.add_offset(Position::new(mm(x), mm(top)));
    image.render(context, rect_area, Style::new())?;
    Ok(())
}

/// Composites transparent pixels onto white. `genpdf` only embeds images without alpha.
fn flatten_onto_white(image: image::DynamicImage) -> image::RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let rgba = image.to_rgba8();
    image::RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let image::Rgba([r, g, b, alpha]) = *rgba.get_pixel(x, y);
        let alpha = u16::from(alpha);
        let blend = |channel: u8| ((u16::from(channel) * alpha + 255 * (255 - alpha)) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

fn natural_image_size(image: &image::DynamicImage, dpi: f64) -> (f64, f64) {
    let (px_width, px_height) = image.dimensions();
    let width = POINTS_PER_INCH * (px_width as f64) / dpi;
    let height = POINTS_PER_INCH * (px_height as f64) / dpi;
    (width, height)
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// A decoded logo, scaled into its box when placed on a page.
#[derive(Clone)]
pub struct LogoImage {
    image: image::DynamicImage,
    natural_width: f64,
    natural_height: f64,
}

impl LogoImage {
    /// Decodes the logo at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        Ok(Self::from_dynamic_image(decode_image_from_path(path)?))
    }

    /// Wraps a decoded image. Transparency is flattened onto a white background.
    pub fn from_dynamic_image(image: image::DynamicImage) -> Self {
        Self::from_rgb(image::DynamicImage::ImageRgb8(flatten_onto_white(image)))
    }

    fn from_rgb(image: image::DynamicImage) -> Self {
        let (natural_width, natural_height) = natural_image_size(&image, DEFAULT_IMAGE_DPI);
        Self {
            image,
            natural_width,
            natural_height,
        }
    }

    /// Keeps the image as decoded, alpha channel included, so drawing it fails.
    #[cfg(test)]
    pub(crate) fn undrawable(image: image::DynamicImage) -> Self {
        Self::from_rgb(image)
    }

    /// Scale factor and drawn size (points) of the logo fitted into a box, keeping its aspect
    /// ratio.
    pub fn fitted_size(&self, box_width: f64, box_height: f64) -> Option<(f64, f64, f64)> {
        if self.natural_width <= f64::EPSILON || self.natural_height <= f64::EPSILON {
            return None;
        }
        let scale = (box_width / self.natural_width).min(box_height / self.natural_height);
        Some((scale, self.natural_width * scale, self.natural_height * scale))
    }

    /// Draws the logo fitted into a `box_width` x `box_height` box whose top-left corner is at
    /// `(x, top)`, all in points from the page's top-left corner.  The logo is centered in the
    /// box.
    pub fn draw(
        &self,
        context: &genpdf::Context,
        area: &render::Area<'_>,
        style: Style,
        (x, top): (f64, f64),
        (box_width, box_height): (f64, f64),
    ) -> Result<(), Error> {
        let Some((scale, drawn_width, drawn_height)) = self.fitted_size(box_width, box_height)
        else {
            return Ok(());
        };

        let mut image_area = area.clone();
        image_area.add_offset(Position::new(
            mm(x + (box_width - drawn_width) / 2.0),
            mm(top + (box_height - drawn_height) / 2.0),
        ));

        let mut image = Image::from_dynamic_image(self.image.clone())?;
        image.set_scale(Scale::new(scale, scale));
        image.render(context, image_area, style)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_fits_box_preserving_aspect_ratio() {
        // 600x150 px at 300 dpi = 144pt x 36pt natural size.
        let logo = LogoImage::from_dynamic_image(image::DynamicImage::new_rgb8(600, 150));
        let (scale, width, height) = logo.fitted_size(100.8, 43.2).unwrap();
        assert!((scale - 0.7).abs() < 1e-9);
        assert!((width - 100.8).abs() < 1e-9);
        assert!((height - 25.2).abs() < 1e-9);
    }

    #[test]
    fn transparent_logo_is_flattened_onto_white() {
        let mut rgba = image::RgbaImage::new(2, 1);
        rgba.put_pixel(1, 0, image::Rgba([255, 0, 0, 128]));
        let logo = LogoImage::from_dynamic_image(image::DynamicImage::ImageRgba8(rgba));

        assert_eq!(logo.image.color(), image::ColorType::Rgb8);
        let flat = logo.image.to_rgb8();
        assert_eq!(*flat.get_pixel(0, 0), image::Rgb([255, 255, 255]));
        assert_eq!(*flat.get_pixel(1, 0), image::Rgb([255, 127, 127]));
    }

    #[test]
    fn rgba_logo_keeps_its_natural_size() {
        let logo = LogoImage::from_dynamic_image(image::DynamicImage::new_rgba8(300, 120));
        assert_eq!(logo.image.color(), image::ColorType::Rgb8);
        assert!((logo.natural_width - 72.0).abs() < 1e-9);
        assert!((logo.natural_height - 28.8).abs() < 1e-9);
    }

    #[test]
    fn rule_thickness_reaches_the_fill() {
        let block = Block::Rule {
            thickness: 0.4,
            shade: RuleShade::LightGrey,
        };
        let BodyElement::Rule(rule) = BodyElement::from_block(&block, &LayoutStyleSet::default())
        else {
            panic!("expected a rule element");
        };
        assert!((rule.thickness - 0.4).abs() < 1e-9);

        let scale = pixel_scale(468.0, rule.thickness);
        assert!((scale.x * PIXEL_POINTS - 468.0).abs() < 1e-9);
        assert!((scale.y * PIXEL_POINTS - 0.4).abs() < 1e-9);
    }

    #[test]
    fn fill_colours_convert_to_rgb() {
        assert_eq!(rgb(Color::Rgb(1, 2, 3)), [1, 2, 3]);
        assert_eq!(rgb(Color::Greyscale(128)), [128, 128, 128]);
        assert_eq!(rgb(Color::Cmyk(0, 0, 0, 255)), [0, 0, 0]);
        assert_eq!(rgb(Color::Cmyk(0, 0, 0, 0)), [255, 255, 255]);
    }

    #[test]
    fn empty_logo_is_not_drawn() {
        let logo = LogoImage::from_dynamic_image(image::DynamicImage::new_rgb8(0, 0));
        assert!(logo.fitted_size(100.8, 43.2).is_none());
    }

    #[test]
    fn decode_reports_missing_file() {
        let err = decode_image_from_path("/definitely/missing/logo.png").unwrap_err();
        assert!(err.to_string().contains("Failed to open image file"));
    }
}
