//! Server-rendered pages.
//!
//! # Responsibility
//! - Register the Handlebars templates and helpers once at startup.
//! - Define the serializable view models the templates consume.
//!
//! # Invariants
//! - Templates are compiled into the binary; nothing is read from disk at
//!   request time.
//! - Output is HTML-escaped by the registry default.

use crate::error::WebError;
use axum::response::Html;
use colegio_core::model::validation::ValidationErrors;
use colegio_core::ReportTotals;
use handlebars::Handlebars;
use serde::Serialize;

const TEMPLATES: [(&str, &str); 8] = [
    ("header", include_str!("../templates/header.hbs")),
    ("footer", include_str!("../templates/footer.hbs")),
    ("home", include_str!("../templates/home.hbs")),
    ("entity_list", include_str!("../templates/entity_list.hbs")),
    ("entity_form", include_str!("../templates/entity_form.hbs")),
    ("confirm_delete", include_str!("../templates/confirm_delete.hbs")),
    ("area_report", include_str!("../templates/area_report.hbs")),
    ("not_found", include_str!("../templates/not_found.hbs")),
];

/// Compiled template registry.
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_helper("plural", Box::new(plural_helper));
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, WebError> {
        Ok(Html(self.registry.render(name, data)?))
    }
}

/// `{{plural count "employee"}}` renders `employee` or `employees`.
fn plural_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let count = h.param(0).and_then(|v| v.value().as_u64()).unwrap_or(0);
    let noun = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(noun)?;
    if count != 1 {
        out.write("s")?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Link {
    pub href: &'static str,
    pub label: &'static str,
}

pub static SCREENS: [Link; 6] = [
    Link {
        href: "/areas/",
        label: "Areas",
    },
    Link {
        href: "/offices/",
        label: "Offices",
    },
    Link {
        href: "/classrooms/",
        label: "Classrooms",
    },
    Link {
        href: "/persons/",
        label: "Persons",
    },
    Link {
        href: "/area-report/",
        label: "Area report",
    },
    Link {
        href: "/export-report-pdf/",
        label: "Export PDF",
    },
];

#[derive(Debug, Serialize)]
pub struct HomePage {
    pub title: &'static str,
    pub totals: ReportTotals,
    pub links: &'static [Link],
}

#[derive(Debug, Serialize)]
pub struct ListPage {
    pub title: &'static str,
    pub create_href: String,
    pub columns: &'static [&'static str],
    pub rows: Vec<ListRow>,
}

#[derive(Debug, Serialize)]
pub struct ListRow {
    pub cells: Vec<String>,
    pub update_href: String,
    pub delete_href: String,
}

impl ListRow {
    /// Row with edit/delete links under `/{base}/{id}/...`.
    pub fn new(base: &str, id: i64, cells: Vec<String>) -> Self {
        Self {
            cells,
            update_href: format!("/{base}/{id}/update/"),
            delete_href: format!("/{base}/{id}/delete/"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormPage {
    pub title: String,
    pub action: String,
    pub cancel_href: String,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub is_select: bool,
    pub options: Vec<SelectOption>,
    pub errors: Vec<String>,
}

impl FormField {
    pub fn text(
        name: &'static str,
        label: &'static str,
        value: &str,
        errors: &ValidationErrors,
    ) -> Self {
        Self {
            name,
            label,
            value: value.to_string(),
            is_select: false,
            options: Vec::new(),
            errors: errors.messages_for(name),
        }
    }

    /// Select box with a leading blank choice; `value` marks the selection.
    pub fn select(
        name: &'static str,
        label: &'static str,
        value: &str,
        choices: impl IntoIterator<Item = (String, String)>,
        errors: &ValidationErrors,
    ) -> Self {
        let selected = value.trim();
        let mut options = vec![SelectOption {
            value: String::new(),
            label: "---------".to_string(),
            selected: selected.is_empty(),
        }];
        options.extend(choices.into_iter().map(|(value, label)| SelectOption {
            selected: value == selected,
            value,
            label,
        }));
        Self {
            name,
            label,
            value: selected.to_string(),
            is_select: true,
            options,
            errors: errors.messages_for(name),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Serialize)]
pub struct ConfirmPage {
    pub title: String,
    pub message: String,
    pub action: String,
    pub cancel_href: String,
}

#[derive(Debug, Serialize)]
pub struct ReportPage {
    pub title: &'static str,
    pub areas: Vec<ReportRow>,
    pub totals: ReportTotals,
}

#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub name: String,
    pub employee_count: u64,
}

#[derive(Debug, Serialize)]
pub struct NotFoundPage {
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::{FormField, ReportPage, ReportRow, Views};
    use colegio_core::model::validation::ValidationErrors;
    use colegio_core::ReportTotals;

    #[test]
    fn all_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn plural_helper_matches_count() {
        let views = Views::new().unwrap();
        let page = ReportPage {
            title: "Area report",
            areas: vec![
                ReportRow {
                    name: "Solo".to_string(),
                    employee_count: 1,
                },
                ReportRow {
                    name: "Many".to_string(),
                    employee_count: 3,
                },
            ],
            totals: ReportTotals::default(),
        };
        let html = views.render("area_report", &page).unwrap().0;
        assert!(html.contains("1 employee<"));
        assert!(html.contains("3 employees<"));
    }

    #[test]
    fn select_marks_submitted_value() {
        let field = FormField::select(
            "area_id",
            "Area",
            "2",
            vec![
                ("1".to_string(), "Arts".to_string()),
                ("2".to_string(), "Science".to_string()),
            ],
            &ValidationErrors::single("area_id", "bad"),
        );
        let selected: Vec<_> = field
            .options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.label.as_str())
            .collect();
        assert_eq!(selected, vec!["Science"]);
        assert_eq!(field.errors, vec!["bad"]);
    }
}
