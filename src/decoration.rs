//! Header and footer drawn on every page.
//!
//! Layout is computed in points from the top-left corner of the page by [`header_layout`] and
//! [`footer_layout`], which only need a [`TextMeasure`].  [`PageDecoration`] feeds them the
//! document's loaded fonts and draws the result through `genpdf`.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use genpdf::error::{Error, ErrorKind};
use genpdf::style::Style;
use genpdf::{render, Element, PageDecorator, Position};
use log::warn;

use crate::elements::{LogoImage, TextRun};
use crate::geometry::{mm, DecorationGeometry, PageGeometry};
use crate::metrics::{self, TextMeasure};
use crate::record::JobRecord;
use crate::richtext::{Span, StyledSpan};
use crate::styles::{LayoutStyleSet, TextStyle};

/// Smallest size the header company name is shrunk to.
pub const HEADER_NAME_FLOOR: u8 = 8;
/// Smallest size the footer company name is shrunk to.
pub const FOOTER_NAME_FLOOR: u8 = 8;
/// Smallest size the footer website is shrunk to.
pub const FOOTER_WEBSITE_FLOOR: u8 = 7;

/// A single line of text positioned on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub size: u8,
    pub width: f64,
    /// Left edge, from the left page edge.
    pub x: f64,
    /// Baseline, from the top page edge.
    pub baseline: f64,
}

/// Position of the header furniture.
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderLayout {
    pub name: Option<PlacedText>,
    /// Left edge of the logo box.
    pub logo_x: f64,
    /// Top edge of the logo box.
    pub logo_top: f64,
}

/// Position of the footer furniture.
#[derive(Clone, Debug, PartialEq)]
pub struct FooterLayout {
    pub name: PlacedText,
    pub website: PlacedText,
}

/// Places the header.
///
/// With a company name, the name is shrunk to the header width and right-aligned against the
/// padded right margin.  The logo box sits below the name, horizontally centred on it, just above
/// the body frame.  Without a name the logo box is centred on the page in the same band.
pub fn header_layout(
    company_name: Option<&str>,
    page: &PageGeometry,
    geometry: &DecorationGeometry,
    style: &TextStyle,
    measure: &dyn TextMeasure,
) -> HeaderLayout {
    let Some(name) = company_name else {
        return HeaderLayout {
            name: None,
            logo_x: page.width / 2.0 - geometry.logo_width / 2.0,
            logo_top: page.margin_top - geometry.logo_height,
        };
    };

    let fitted = metrics::shrink_to_fit(
        measure,
        name,
        style.bold,
        style.font_size,
        HEADER_NAME_FLOOR,
        geometry.header_max_width,
    );
    let right_limit = page.width - page.margin_right - geometry.padding_right;
    let x = right_limit - fitted.width;
    let center = x + fitted.width / 2.0;

    HeaderLayout {
        name: Some(PlacedText {
            text: name.to_string(),
            size: fitted.size,
            width: fitted.width,
            x,
            baseline: page.margin_top - geometry.logo_height - geometry.header_name_gap,
        }),
        logo_x: center - geometry.logo_width / 2.0,
        logo_top: page.margin_top - geometry.header_logo_lift - geometry.logo_height,
    }
}

/// Places the footer, which is only drawn when both the company name and website are present.
///
/// The name sits above the website, both centred on a shared axis, and the block as a whole is
/// right-aligned against the padded right margin.
pub fn footer_layout(
    company_name: Option<&str>,
    website: Option<&str>,
    page: &PageGeometry,
    geometry: &DecorationGeometry,
    styles: &LayoutStyleSet,
    measure: &dyn TextMeasure,
) -> Option<FooterLayout> {
    let (name, website) = (company_name?, website?);

    let name_fit = metrics::shrink_to_fit(
        measure,
        name,
        styles.footer_name.bold,
        styles.footer_name.font_size,
        FOOTER_NAME_FLOOR,
        geometry.footer_max_width,
    );
    let site_fit = metrics::shrink_to_fit(
        measure,
        website,
        styles.footer_link.bold,
        styles.footer_link.font_size,
        FOOTER_WEBSITE_FLOOR,
        geometry.footer_max_width,
    );

    let right = page.width - page.margin_right - geometry.padding_right;
    let block_width = name_fit.width.max(site_fit.width);
    let center = right - block_width / 2.0;
    let site_baseline = page.height - (page.margin_bottom - geometry.footer_drop);

    Some(FooterLayout {
        name: PlacedText {
            text: name.to_string(),
            size: name_fit.size,
            width: name_fit.width,
            x: center - name_fit.width / 2.0,
            baseline: site_baseline - geometry.footer_line_gap,
        },
        website: PlacedText {
            text: website.to_string(),
            size: site_fit.size,
            width: site_fit.width,
            x: center - site_fit.width / 2.0,
            baseline: site_baseline,
        },
    })
}

/// Decodes the logo at `path`, logging and ignoring files that cannot be read.
pub fn load_logo(path: &Path) -> Option<LogoImage> {
    if !path.is_file() {
        warn!("Logo {} does not exist; rendering without it", path.display());
        return None;
    }
    match LogoImage::from_path(path) {
        Ok(logo) => Some(logo),
        Err(err) => {
            warn!("Skipping logo {}: {}", path.display(), err);
            None
        }
    }
}

/// Decoration parts that could not be drawn, as `"<part> on page <n>"`.
///
/// The decorator records into it while the document renders; a clone held by the caller reads the
/// same list afterwards.
#[derive(Clone, Debug, Default)]
pub struct SkippedParts(Rc<RefCell<Vec<String>>>);

impl SkippedParts {
    fn push(&self, part: String) {
        self.0.borrow_mut().push(part);
    }

    /// Removes and returns the recorded parts.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// Page decorator drawing the company header and footer and reserving the body margins.
///
/// Every part (logo, header name, footer name, website) is drawn on its own: a part that fails is
/// logged and skipped without affecting the others.
pub struct PageDecoration {
    company_name: Option<String>,
    website: Option<String>,
    logo: Option<LogoImage>,
    page: PageGeometry,
    geometry: DecorationGeometry,
    styles: LayoutStyleSet,
    page_number: usize,
    skipped: SkippedParts,
}

impl PageDecoration {
    pub fn new(
        record: &JobRecord,
        logo: Option<LogoImage>,
        page: PageGeometry,
        styles: LayoutStyleSet,
    ) -> Self {
        Self {
            company_name: record.company_name(),
            website: record.company_website(),
            logo,
            page,
            geometry: DecorationGeometry::default(),
            styles,
            page_number: 0,
            skipped: SkippedParts::default(),
        }
    }

    /// Whether the footer is drawn.
    pub fn has_footer(&self) -> bool {
        self.company_name.is_some() && self.website.is_some()
    }

    /// Handle to the parts skipped so far, shared with this decorator.
    pub fn skipped_parts(&self) -> SkippedParts {
        self.skipped.clone()
    }

    pub fn header(&self, measure: &dyn TextMeasure) -> HeaderLayout {
        header_layout(
            self.company_name.as_deref(),
            &self.page,
            &self.geometry,
            &self.styles.header_name,
            measure,
        )
    }

    pub fn footer(&self, measure: &dyn TextMeasure) -> Option<FooterLayout> {
        footer_layout(
            self.company_name.as_deref(),
            self.website.as_deref(),
            &self.page,
            &self.geometry,
            &self.styles,
            measure,
        )
    }

    fn report(&self, part: &str, drawn: Result<(), Error>) {
        if let Err(err) = drawn {
            warn!("Skipping {} on page {}: {}", part, self.page_number, err);
            self.skipped
                .push(format!("{} on page {}", part, self.page_number));
        }
    }

    fn draw_header(&self, context: &genpdf::Context, area: &render::Area<'_>, style: Style) {
        let layout = self.header(&context.font_cache);

        if let Some(logo) = &self.logo {
            let drawn = logo.draw(
                context,
                area,
                style,
                (layout.logo_x, layout.logo_top),
                (self.geometry.logo_width, self.geometry.logo_height),
            );
            self.report("header logo", drawn);
        }

        if let Some(name) = &layout.name {
            let drawn = draw_text(context, area, style, name, &self.styles.header_name, None);
            self.report("header name", drawn);
        }
    }

    fn draw_footer(&self, context: &genpdf::Context, area: &render::Area<'_>, style: Style) {
        let Some(layout) = self.footer(&context.font_cache) else {
            return;
        };

        let drawn = draw_text(context, area, style, &layout.name, &self.styles.footer_name, None);
        self.report("footer name", drawn);

        let drawn = draw_text(
            context,
            area,
            style,
            &layout.website,
            &self.styles.footer_link,
            Some((self.geometry.underline_offset, self.geometry.underline_thickness)),
        );
        self.report("footer website", drawn);
    }
}

fn draw_text(
    context: &genpdf::Context,
    area: &render::Area<'_>,
    style: Style,
    placed: &PlacedText,
    text_style: &TextStyle,
    underline: Option<(f64, f64)>,
) -> Result<(), Error> {
    let mut span = Span::new(placed.text.as_str());
    if text_style.bold {
        span = span.bold();
    }
    if let Some(color) = text_style.color {
        span = span.colored(color);
    }
    if underline.is_some() {
        span = span.underline();
    }

    let mut styled = StyledSpan::from(&span);
    styled.string.style.set_font_size(placed.size);
    let mut run = TextRun::new(vec![styled]);
    if let Some((offset, thickness)) = underline {
        run = run.with_underline(offset, thickness);
    }

    let top = mm(placed.baseline) - run.baseline_offset(context, style);
    let mut run_area = area.clone();
    run_area.add_offset(Position::new(mm(placed.x), top));

    let result = run.render(context, run_area, style)?;
    if result.has_more {
        return Err(Error::new(
            format!("'{}' does not fit on the page", placed.text),
            ErrorKind::PageSizeExceeded,
        ));
    }
    Ok(())
}

impl PageDecorator for PageDecoration {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'a>,
        style: Style,
    ) -> Result<render::Area<'a>, Error> {
        self.page_number += 1;

        self.draw_header(context, &area, style);
        self.draw_footer(context, &area, style);

        area.add_margins(self.page.margins());
        Ok(area)
    }
}
