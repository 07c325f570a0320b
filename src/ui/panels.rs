use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::format::format_count;
use crate::data::model::FilterField;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for field in FilterField::ALL {
                let Some(all_values) = dataset.options(field) else {
                    continue;
                };

                // Show count of selected / total in the header
                let n_selected = state.selection.allowed(field).len();
                let n_total = all_values.len();
                let header_text = format!("{}  ({n_selected}/{n_total})", field.label());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(field);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(field);
                            }
                        });

                        for val in all_values {
                            let mut checked = state.selection.allowed(field).contains(val);
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                state.toggle_filter_value(field, val);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        if ui.button("Reload").clicked() {
            state.reload();
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                format_count(ds.len()),
                format_count(state.visible_indices.len())
            ));
        }

        ui.separator();
        ui.label(RichText::new(state.source().to_string()).weak());

        if let Some(status) = &state.status_message {
            let text = RichText::new(status.text());
            if status.is_error() {
                ui.label(text.color(Color32::RED));
            } else {
                ui.label(text.weak());
            }
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(&path);
    }
}
