//! Page layout for the PDF headcount report.
//!
//! # Responsibility
//! - Turn a [`ReportDocument`] into pages of backend-neutral draw operations.
//! - Decide page breaks.
//!
//! # Invariants
//! - Every page carries the same header (title, timestamp, rule) and footer
//!   (caption, page number).
//! - Page breaks are forward-only: each employee row is emitted exactly once,
//!   in input order.
//! - The vertical position is a [`Cursor`] value threaded through every
//!   drawing step; steps that may break return a [`Flow`] signal.
//!
//! Coordinates are PDF points with the origin at the bottom-left corner.

use super::{AreaSection, EmployeeRow, ReportDocument, ReportTotals};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
const INCH: f32 = 72.0;
const MARGIN: f32 = INCH;
const CONTENT_TOP: f32 = PAGE_HEIGHT - 1.5 * INCH;

/// Below this, an area heading starts on a fresh page.
pub const SECTION_BREAK_THRESHOLD: f32 = 2.0 * INCH;
/// Below this, the next employee row starts on a fresh page.
pub const ROW_BREAK_THRESHOLD: f32 = INCH;

const ROW_HEIGHT: f32 = 0.25 * INCH;
const CELL_INSET: f32 = 0.1 * INCH;
const HEADING_GAP: f32 = 0.2 * INCH;
const BLOCK_GAP: f32 = 0.3 * INCH;

pub const REPORT_TITLE: &str = "Areas and Employees Report";
pub const FOOTER_CAPTION: &str = "School Management System";
pub const SUMMARY_TITLE: &str = "General Summary";
pub const EMPTY_AREA_PLACEHOLDER: &str = "No employees assigned to this area.";

const SUMMARY_HEADERS: [&str; 2] = ["Concept", "Count"];
const SUMMARY_COLUMN_WIDTHS: [f32; 2] = [2.5 * INCH, 1.5 * INCH];
const EMPLOYEE_HEADERS: [&str; 4] = ["Document", "Name", "Type", "Office"];
const EMPLOYEE_COLUMN_WIDTHS: [f32; 4] = [1.2 * INCH, 2.0 * INCH, 1.5 * INCH, 1.8 * INCH];

/// RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
/// `#3498db`
pub const ACCENT: Rgb = Rgb::new(52.0 / 255.0, 152.0 / 255.0, 219.0 / 255.0);
/// `#f2f2f2`
pub const SHADE: Rgb = Rgb::new(242.0 / 255.0, 242.0 / 255.0, 242.0 / 255.0);
pub const MUTED: Rgb = Rgb::new(0.5, 0.5, 0.5);
pub const RULE: Rgb = Rgb::new(0.8, 0.8, 0.8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    /// `x` is the right edge of the text.
    Right,
}

/// One backend-neutral drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        size: f32,
        weight: FontWeight,
        color: Rgb,
        align: Align,
        text: String,
    },
    /// Outlined in black; filled when `fill` is set.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Rgb>,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
    },
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: u32,
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text runs on this page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Drawing position: page index plus baseline height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub page: usize,
    pub y: f32,
}

impl Cursor {
    fn down(self, amount: f32) -> Self {
        Self {
            page: self.page,
            y: self.y - amount,
        }
    }
}

/// Whether a step had to open a new page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    SamePage,
    NewPage,
}

/// Lays out the whole report; the result always has at least one page.
pub fn layout_report(document: &ReportDocument) -> Vec<Page> {
    let timestamp = document.generated_at.format("%d/%m/%Y %H:%M").to_string();
    let mut canvas = Canvas::new(timestamp);

    let mut cursor = canvas.start_page();
    cursor = draw_summary(&mut canvas, cursor, &document.totals);
    for section in &document.sections {
        cursor = draw_section(&mut canvas, cursor, section);
    }

    canvas.pages
}

/// `Math (1 employee)`, `Science (3 employees)`.
pub fn section_heading(area_name: &str, employee_count: u64) -> String {
    let plural = if employee_count == 1 { "" } else { "s" };
    format!("{area_name} ({employee_count} employee{plural})")
}

pub fn continued_heading(area_name: &str) -> String {
    format!("{area_name} (continued)")
}

struct Canvas {
    pages: Vec<Page>,
    timestamp: String,
}

impl Canvas {
    fn new(timestamp: String) -> Self {
        Self {
            pages: Vec::new(),
            timestamp,
        }
    }

    /// Opens a page with header and footer drawn; returns the body cursor.
    fn start_page(&mut self) -> Cursor {
        let number = self.pages.len() as u32 + 1;
        let mut page = Page {
            number,
            ops: Vec::new(),
        };

        page.ops.push(text(
            MARGIN,
            PAGE_HEIGHT - INCH,
            16.0,
            FontWeight::Bold,
            ACCENT,
            REPORT_TITLE,
        ));
        page.ops.push(text(
            PAGE_WIDTH - 2.5 * INCH,
            PAGE_HEIGHT - INCH,
            10.0,
            FontWeight::Regular,
            BLACK,
            format!("Generated: {}", self.timestamp),
        ));
        page.ops.push(DrawOp::Line {
            x1: MARGIN,
            y1: PAGE_HEIGHT - 1.2 * INCH,
            x2: PAGE_WIDTH - MARGIN,
            y2: PAGE_HEIGHT - 1.2 * INCH,
            color: RULE,
        });
        page.ops.push(text(
            MARGIN,
            0.75 * INCH,
            9.0,
            FontWeight::Regular,
            BLACK,
            FOOTER_CAPTION,
        ));
        page.ops.push(DrawOp::Text {
            x: PAGE_WIDTH - MARGIN,
            y: 0.75 * INCH,
            size: 9.0,
            weight: FontWeight::Regular,
            color: BLACK,
            align: Align::Right,
            text: format!("Page {number}"),
        });

        self.pages.push(page);
        Cursor {
            page: self.pages.len() - 1,
            y: CONTENT_TOP,
        }
    }

    /// Moves to a fresh page when fewer than `threshold` points remain.
    fn ensure_space(&mut self, cursor: Cursor, threshold: f32) -> (Cursor, Flow) {
        if cursor.y < threshold {
            (self.start_page(), Flow::NewPage)
        } else {
            (cursor, Flow::SamePage)
        }
    }

    fn push(&mut self, cursor: Cursor, op: DrawOp) {
        self.pages[cursor.page].ops.push(op);
    }
}

fn text(
    x: f32,
    y: f32,
    size: f32,
    weight: FontWeight,
    color: Rgb,
    value: impl Into<String>,
) -> DrawOp {
    DrawOp::Text {
        x,
        y,
        size,
        weight,
        color,
        align: Align::Left,
        text: value.into(),
    }
}

fn draw_summary(canvas: &mut Canvas, cursor: Cursor, totals: &ReportTotals) -> Cursor {
    canvas.push(
        cursor,
        text(MARGIN, cursor.y, 12.0, FontWeight::Bold, ACCENT, SUMMARY_TITLE),
    );
    let mut cursor = cursor.down(BLOCK_GAP);

    let rows = [
        ("Total areas", totals.total_areas),
        ("Total employees", totals.total_persons),
        ("Total professors", totals.total_professors),
        ("Total staff", totals.total_staff),
    ];

    cursor = draw_table_row(
        canvas,
        cursor,
        &SUMMARY_COLUMN_WIDTHS,
        &SUMMARY_HEADERS.map(String::from),
        10.0,
        true,
    );
    for (label, value) in rows {
        cursor = draw_table_row(
            canvas,
            cursor,
            &SUMMARY_COLUMN_WIDTHS,
            &[label.to_string(), value.to_string()],
            10.0,
            false,
        );
    }

    cursor.down(BLOCK_GAP)
}

fn draw_section(canvas: &mut Canvas, cursor: Cursor, section: &AreaSection) -> Cursor {
    let (cursor, _) = canvas.ensure_space(cursor, SECTION_BREAK_THRESHOLD);
    let mut cursor = draw_heading(
        canvas,
        cursor,
        section_heading(&section.area_name, section.employee_count),
    );

    if section.employees.is_empty() {
        canvas.push(
            cursor,
            text(
                MARGIN,
                cursor.y,
                10.0,
                FontWeight::Regular,
                MUTED,
                EMPTY_AREA_PLACEHOLDER,
            ),
        );
        cursor = cursor.down(HEADING_GAP);
    } else {
        cursor = draw_employee_header(canvas, cursor);
        for employee in &section.employees {
            let (next, flow) = canvas.ensure_space(cursor, ROW_BREAK_THRESHOLD);
            cursor = next;
            if flow == Flow::NewPage {
                cursor = draw_heading(canvas, cursor, continued_heading(&section.area_name));
                cursor = draw_employee_header(canvas, cursor);
            }
            cursor = draw_employee_row(canvas, cursor, employee);
        }
    }

    cursor.down(HEADING_GAP)
}

fn draw_heading(canvas: &mut Canvas, cursor: Cursor, heading: String) -> Cursor {
    canvas.push(
        cursor,
        text(MARGIN, cursor.y, 12.0, FontWeight::Bold, ACCENT, heading),
    );
    cursor.down(HEADING_GAP)
}

fn draw_employee_header(canvas: &mut Canvas, cursor: Cursor) -> Cursor {
    draw_table_row(
        canvas,
        cursor,
        &EMPLOYEE_COLUMN_WIDTHS,
        &EMPLOYEE_HEADERS.map(String::from),
        9.0,
        true,
    )
}

fn draw_employee_row(canvas: &mut Canvas, cursor: Cursor, employee: &EmployeeRow) -> Cursor {
    draw_table_row(
        canvas,
        cursor,
        &EMPLOYEE_COLUMN_WIDTHS,
        &[
            employee.document_id.clone(),
            employee.name.clone(),
            employee.type_label.clone(),
            employee.office_code.clone(),
        ],
        9.0,
        false,
    )
}

/// Draws one bordered table row; header rows are shaded and bold.
fn draw_table_row(
    canvas: &mut Canvas,
    cursor: Cursor,
    widths: &[f32],
    cells: &[String],
    size: f32,
    header: bool,
) -> Cursor {
    canvas.push(
        cursor,
        DrawOp::Rect {
            x: MARGIN,
            y: cursor.y,
            width: widths.iter().sum(),
            height: ROW_HEIGHT,
            fill: header.then_some(SHADE),
        },
    );

    let weight = if header {
        FontWeight::Bold
    } else {
        FontWeight::Regular
    };
    let mut x = MARGIN + CELL_INSET;
    for (cell, width) in cells.iter().zip(widths) {
        canvas.push(
            cursor,
            text(x, cursor.y + CELL_INSET, size, weight, BLACK, cell.as_str()),
        );
        x += width;
    }

    cursor.down(ROW_HEIGHT)
}
