//! PDF backend for laid-out report pages.
//!
//! # Responsibility
//! - Write [`Page`] display lists into a US Letter PDF via `printpdf`.
//!
//! # Invariants
//! - Output page count equals the number of laid-out pages.
//! - Only built-in Helvetica faces are used; no font files are embedded.

use super::layout::{layout_report, Align, DrawOp, FontWeight, Page, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use super::ReportDocument;
use log::{error, info};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Fixed download name of the exported report.
pub const REPORT_FILE_NAME: &str = "reporte_areas.pdf";

const LAYER_NAME: &str = "content";
const OUTLINE_THICKNESS: f32 = 0.5;
/// Average Helvetica glyph advance as a fraction of the font size; used to
/// right-align short runs without font metrics.
const APPROX_GLYPH_WIDTH: f32 = 0.5;

/// PDF generation failures.
#[derive(Debug)]
pub enum PdfRenderError {
    /// Layout produced nothing to write.
    EmptyLayout,
    /// The PDF writer rejected an operation.
    Backend(String),
}

impl Display for PdfRenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLayout => write!(f, "report layout produced no pages"),
            Self::Backend(message) => write!(f, "pdf backend error: {message}"),
        }
    }
}

impl Error for PdfRenderError {}

/// Lays out and renders the report in one call.
///
/// # Side effects
/// - Emits `report_pdf` logging events with page count, size and duration.
pub fn render_report_pdf(document: &ReportDocument) -> Result<Vec<u8>, PdfRenderError> {
    let started_at = Instant::now();
    let pages = layout_report(document);

    match render_pages(&pages) {
        Ok(bytes) => {
            info!(
                "event=report_pdf module=report status=ok pages={} sections={} bytes={} duration_ms={}",
                pages.len(),
                document.sections.len(),
                bytes.len(),
                started_at.elapsed().as_millis()
            );
            Ok(bytes)
        }
        Err(err) => {
            error!(
                "event=report_pdf module=report status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Writes already laid-out pages to PDF bytes.
pub fn render_pages(pages: &[Page]) -> Result<Vec<u8>, PdfRenderError> {
    let Some((first, rest)) = pages.split_first() else {
        return Err(PdfRenderError::EmptyLayout);
    };

    let (doc, first_page, first_layer) = PdfDocument::new(
        super::layout::REPORT_TITLE,
        pt(PAGE_WIDTH),
        pt(PAGE_HEIGHT),
        LAYER_NAME,
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(backend)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(backend)?,
    };

    draw_page(&doc.get_page(first_page).get_layer(first_layer), first, &fonts);
    for page in rest {
        let (page_index, layer_index) = doc.add_page(pt(PAGE_WIDTH), pt(PAGE_HEIGHT), LAYER_NAME);
        draw_page(&doc.get_page(page_index).get_layer(layer_index), page, &fonts);
    }

    doc.save_to_bytes().map_err(backend)
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts) {
    layer.set_outline_thickness(OUTLINE_THICKNESS);
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                weight,
                color,
                align,
                text,
            } => {
                let left = match align {
                    Align::Left => *x,
                    Align::Right => *x - approx_text_width(text, *size),
                };
                layer.set_fill_color(rgb(*color));
                layer.use_text(text.as_str(), *size, pt(left), pt(*y), fonts.get(*weight));
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                layer.set_outline_color(rgb(super::layout::BLACK));
                let mode = match fill {
                    Some(color) => {
                        layer.set_fill_color(rgb(*color));
                        PaintMode::FillStroke
                    }
                    None => PaintMode::Stroke,
                };
                layer.add_rect(
                    Rect::new(pt(*x), pt(*y), pt(x + width), pt(y + height)).with_mode(mode),
                );
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                color,
            } => {
                layer.set_outline_color(rgb(*color));
                layer.add_line(Line {
                    points: vec![
                        (Point::new(pt(*x1), pt(*y1)), false),
                        (Point::new(pt(*x2), pt(*y2)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}

fn approx_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * APPROX_GLYPH_WIDTH
}

fn pt(points: f32) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(color.r, color.g, color.b, None))
}

fn backend(err: impl Display) -> PdfRenderError {
    PdfRenderError::Backend(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{approx_text_width, pt, render_pages, PdfRenderError};

    #[test]
    fn points_convert_to_millimetres() {
        assert!((pt(72.0).0 - 25.4).abs() < 1e-4);
    }

    #[test]
    fn right_alignment_width_scales_with_length_and_size() {
        assert_eq!(approx_text_width("Page 1", 10.0), 30.0);
        assert_eq!(approx_text_width("", 10.0), 0.0);
    }

    #[test]
    fn empty_layout_is_rejected() {
        assert!(matches!(render_pages(&[]), Err(PdfRenderError::EmptyLayout)));
    }
}
