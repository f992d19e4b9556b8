use chrono::{NaiveDate, NaiveDateTime};
use colegio_core::render_report_pdf;
use colegio_core::report::layout::{
    continued_heading, layout_report, section_heading, DrawOp, Page, EMPTY_AREA_PLACEHOLDER,
    FOOTER_CAPTION, REPORT_TITLE, ROW_BREAK_THRESHOLD, SUMMARY_TITLE,
};
use colegio_core::report::{AreaSection, EmployeeRow, ReportDocument};
use colegio_core::ReportTotals;

fn generated_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn employees(prefix: &str, count: usize) -> Vec<EmployeeRow> {
    (0..count)
        .map(|index| EmployeeRow {
            document_id: format!("{prefix}-{index:03}"),
            name: format!("Employee {index}"),
            type_label: "Staff".to_string(),
            office_code: "A-1".to_string(),
        })
        .collect()
}

fn document(sections: Vec<AreaSection>) -> ReportDocument {
    let total_persons = sections.iter().map(|s| s.employee_count).sum();
    ReportDocument {
        generated_at: generated_at(),
        totals: ReportTotals {
            total_areas: sections.len() as u64,
            total_persons,
            total_staff: total_persons,
            ..ReportTotals::default()
        },
        sections,
    }
}

fn section(name: &str, rows: Vec<EmployeeRow>) -> AreaSection {
    AreaSection {
        area_name: name.to_string(),
        employee_count: rows.len() as u64,
        employees: rows,
    }
}

fn all_texts(pages: &[Page]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|page| page.texts().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

#[test]
fn empty_registry_lays_out_single_summary_page() {
    let pages = layout_report(&document(Vec::new()));

    assert_eq!(pages.len(), 1);
    let texts: Vec<_> = pages[0].texts().collect();
    assert!(texts.contains(&REPORT_TITLE));
    assert!(texts.contains(&SUMMARY_TITLE));
    assert!(texts.contains(&FOOTER_CAPTION));
    assert!(texts.contains(&"Page 1"));
    assert!(texts.contains(&"Generated: 15/01/2026 09:30"));
    assert!(!texts.iter().any(|text| text.contains("employee)")
        || text.contains("employees)")));
}

#[test]
fn area_without_employees_shows_placeholder() {
    let pages = layout_report(&document(vec![section("Empty", Vec::new())]));

    let texts = all_texts(&pages);
    assert!(texts.contains(&section_heading("Empty", 0)));
    assert!(texts.contains(&EMPTY_AREA_PLACEHOLDER.to_string()));
    assert!(!texts.contains(&"Document".to_string()));
}

#[test]
fn long_area_continues_on_new_pages_without_losing_rows() {
    let rows = employees("E", 80);
    let expected: Vec<_> = rows.iter().map(|row| row.document_id.clone()).collect();
    let pages = layout_report(&document(vec![section("Science", rows)]));

    assert!(pages.len() >= 3);
    for (index, page) in pages.iter().enumerate() {
        assert_eq!(page.number as usize, index + 1);
        let texts: Vec<_> = page.texts().collect();
        assert!(texts.contains(&REPORT_TITLE));
        assert!(texts.contains(&FOOTER_CAPTION));
        let page_label = format!("Page {}", index + 1);
        assert!(texts.contains(&page_label.as_str()));
    }

    let continued = continued_heading("Science");
    for page in &pages[1..] {
        let texts: Vec<_> = page.texts().collect();
        assert!(texts.contains(&continued.as_str()));
        assert!(texts.contains(&"Document"));
    }
    assert!(!pages[0].texts().any(|text| text == continued));

    let emitted: Vec<_> = all_texts(&pages)
        .into_iter()
        .filter(|text| text.starts_with("E-"))
        .collect();
    assert_eq!(emitted, expected);
}

#[test]
fn body_rows_never_start_below_break_threshold() {
    let pages = layout_report(&document(vec![
        section("Science", employees("S", 45)),
        section("Arts", employees("A", 45)),
    ]));

    for page in &pages {
        for op in &page.ops {
            if let DrawOp::Rect { y, .. } = op {
                assert!(*y >= ROW_BREAK_THRESHOLD);
            }
        }
    }
    let texts = all_texts(&pages);
    assert!(texts.contains(&section_heading("Arts", 45)));
}

#[test]
fn rendered_pdf_starts_with_magic_bytes() {
    let bytes = render_report_pdf(&document(vec![
        section("Science", employees("S", 3)),
        section("Empty", Vec::new()),
    ]))
    .unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 200);
}
