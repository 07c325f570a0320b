use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use super::format::{format_count, format_usd};
use crate::state::AppState;

const HEADERS: [&str; 8] = [
    "Year",
    "Seniority",
    "Contract",
    "Company size",
    "Role",
    "Salary (USD)",
    "Work type",
    "Residence",
];

// ---------------------------------------------------------------------------
// Detail table (bottom of the central panel)
// ---------------------------------------------------------------------------

/// Render the filtered records, capped at the configured row limit.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Detailed data");

    let Some(dataset) = &state.dataset else {
        return;
    };
    let rows = state.table_rows();
    if rows.len() < state.visible_indices.len() {
        ui.label(
            RichText::new(format!(
                "Showing the first {} of {} records",
                format_count(rows.len()),
                format_count(state.visible_indices.len())
            ))
            .weak(),
        );
    }

    ui.push_id("detail_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(400.0)
            .column(Column::auto().at_least(50.0))
            .columns(Column::auto().at_least(80.0), 6)
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, rows.len(), |mut row| {
                    let rec = &dataset.records[rows[row.index()]];
                    let cells = [
                        rec.year.to_string(),
                        rec.seniority.clone(),
                        rec.contract_type.clone(),
                        rec.company_size.clone(),
                        rec.role.clone(),
                        format_usd(rec.salary_usd),
                        rec.remote_type.clone(),
                        rec.residence_country_code.clone(),
                    ];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}
