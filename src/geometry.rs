//! Page geometry and unit conversions.
//!
//! Layout decisions are made in PostScript points, matching how the page furniture is specified.
//! `genpdf` works in millimetres, so values cross over through [`mm`] at the rendering boundary.

use genpdf::{Margins, Mm, Size};

const MM_PER_INCH: f64 = 25.4;
const POINTS_PER_INCH: f64 = 72.0;

/// Converts inches to points.
pub fn inch(value: f64) -> f64 {
    value * POINTS_PER_INCH
}

/// Converts points to `genpdf` millimetres.
pub fn mm(points: f64) -> Mm {
    Mm::from(printpdf::Mm(points * MM_PER_INCH / POINTS_PER_INCH))
}

/// Converts `genpdf` millimetres to points.
pub fn points(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0 * POINTS_PER_INCH / MM_PER_INCH
}

/// Page size and body margins, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
}

impl PageGeometry {
    /// US Letter (8.5in × 11in) with 1.4in top, 1.2in bottom and 1in side margins.
    pub const LETTER: PageGeometry = PageGeometry {
        width: 612.0,
        height: 792.0,
        margin_top: 100.8,
        margin_bottom: 86.4,
        margin_left: 72.0,
        margin_right: 72.0,
    };

    /// Width available to body content.
    pub fn content_width(&self) -> f64 {
        self.width - self.margin_left - self.margin_right
    }

    /// Height available to body content on one page.
    pub fn content_height(&self) -> f64 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Paper size for `genpdf::Document::set_paper_size`.
    pub fn paper_size(&self) -> Size {
        Size::new(mm(self.width), mm(self.height))
    }

    /// Body margins as applied by the page decorator.
    pub fn margins(&self) -> Margins {
        Margins::trbl(
            mm(self.margin_top),
            mm(self.margin_right),
            mm(self.margin_bottom),
            mm(self.margin_left),
        )
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Fixed dimensions of the header and footer furniture, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorationGeometry {
    pub logo_width: f64,
    pub logo_height: f64,
    /// Gap between the right margin and the right edge of header and footer text.
    pub padding_right: f64,
    pub header_max_width: f64,
    /// Distance from the logo top to the header name baseline.
    pub header_name_gap: f64,
    /// Lift of the logo above the body frame when the name is present.
    pub header_logo_lift: f64,
    pub footer_max_width: f64,
    /// Height of the website baseline above the bottom edge, measured down from the bottom margin.
    pub footer_drop: f64,
    /// Vertical distance between the footer name and website baselines.
    pub footer_line_gap: f64,
    pub underline_offset: f64,
    pub underline_thickness: f64,
}

impl Default for DecorationGeometry {
    fn default() -> Self {
        Self {
            logo_width: inch(1.4),
            logo_height: inch(0.6),
            padding_right: inch(0.2),
            header_max_width: inch(3.5),
            header_name_gap: 15.0,
            header_logo_lift: 3.0,
            footer_max_width: inch(3.0),
            footer_drop: 40.0,
            footer_line_gap: 15.0,
            underline_offset: 1.0,
            underline_thickness: 0.5,
        }
    }
}
