//! Tabular adapters: the filtered penguin table as a data table and as a grid.
//!
//! Both show every selected row and every column verbatim; missing values are
//! blank in text and HTML and `null` in JSON.

use palmer_core::{Dataset, FilteredView, PenguinRecord};
use serde_json::{Value, json};

use crate::render::{Render, html_escape};

/// Plain data table (`penguins_datatable`).
#[derive(Debug, Clone)]
pub struct DataTable {
    view: FilteredView,
}

impl DataTable {
    pub fn new(view: FilteredView) -> Self {
        Self { view }
    }

    pub fn row_count(&self) -> usize {
        self.view.len()
    }
}

impl Render for DataTable {
    fn render_text(&self) -> String {
        text_table(&self.view)
    }

    fn render_html(&self) -> Option<String> {
        Some(html_table(&self.view, "palmer-datatable"))
    }

    fn render_data(&self) -> Option<Value> {
        Some(table_data(&self.view, "table"))
    }
}

/// Scrollable grid (`penguins_datagrid`). Same content as [`DataTable`].
#[derive(Debug, Clone)]
pub struct DataGrid {
    view: FilteredView,
}

impl DataGrid {
    pub fn new(view: FilteredView) -> Self {
        Self { view }
    }

    pub fn row_count(&self) -> usize {
        self.view.len()
    }
}

impl Render for DataGrid {
    fn render_text(&self) -> String {
        text_table(&self.view)
    }

    fn render_html(&self) -> Option<String> {
        Some(format!(
            "<div class=\"palmer-datagrid-wrapper\">{}</div>",
            html_table(&self.view, "palmer-datagrid")
        ))
    }

    fn render_data(&self) -> Option<Value> {
        Some(table_data(&self.view, "grid"))
    }
}

fn text_table(view: &FilteredView) -> String {
    let rows: Vec<Vec<String>> = view.iter().map(PenguinRecord::cells).collect();

    let mut widths: Vec<usize> = Dataset::COLUMNS.iter().map(|c| c.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let header: Vec<String> = Dataset::COLUMNS.iter().map(|c| c.to_string()).collect();
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();

    let mut out = String::new();
    for cells in [&header, &rule].into_iter().chain(&rows) {
        out.push_str(&pad_row(cells, &widths));
        out.push('\n');
    }
    out.push_str(&format!("({} rows)", rows.len()));
    out
}

fn pad_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn html_table(view: &FilteredView, class: &str) -> String {
    let mut html = String::new();
    html.push_str(&format!("<table class=\"{}\">\n", class));

    html.push_str("<thead><tr>");
    for name in view.columns() {
        html.push_str(&format!("<th>{}</th>", html_escape(name)));
    }
    html.push_str("</tr></thead>\n");

    html.push_str("<tbody>\n");
    for record in view.iter() {
        html.push_str("<tr>");
        for cell in record.cells() {
            html.push_str(&format!("<td>{}</td>", html_escape(&cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n");

    html.push_str(&format!(
        "<tfoot><tr><td colspan=\"{}\">{} rows</td></tr></tfoot>\n",
        view.columns().len(),
        view.len()
    ));
    html.push_str("</table>");
    html
}

fn table_data(view: &FilteredView, kind: &str) -> Value {
    let rows: Vec<Value> = view.iter().map(record_json).collect();
    json!({
        "kind": kind,
        "columns": view.columns(),
        "rows": rows,
        "row_count": view.len(),
    })
}

fn record_json(record: &PenguinRecord) -> Value {
    json!([
        record.species.to_string(),
        record.island.to_string(),
        record.bill_length_mm,
        record.bill_depth_mm,
        record.flipper_length_mm,
        record.body_mass_g,
        record.sex.map(|s| s.as_str()),
        record.year,
    ])
}
