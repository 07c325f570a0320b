use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, metrics, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub state: AppState,
}

impl SalaryDashboardApp {
    /// Build the app and load the dataset before the first frame.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.load();
        Self { state }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    if let Some(err) = &state.load_error {
        ui.heading(RichText::new("Failed to load or validate the data.").color(Color32::RED));
        ui.label(err);
        return;
    }
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No dataset loaded  (File → Open CSV…)");
        });
        return;
    }

    let agg = &state.aggregates;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Data-field salary dashboard");
            ui.label("Explore salaries across data roles. Use the filters on the left to refine the analysis.");
            ui.add_space(8.0);

            metrics::metric_cards(ui, &agg.summary);
            ui.separator();

            ui.heading("Charts");
            ui.columns(2, |cols: &mut [Ui]| {
                charts::top_roles_chart(&mut cols[0], &agg.top_roles);
                charts::salary_histogram_chart(&mut cols[1], &agg.histogram);
            });
            ui.add_space(8.0);
            ui.columns(2, |cols: &mut [Ui]| {
                charts::work_type_chart(&mut cols[0], &agg.remote_types);
                charts::country_salary_chart(
                    &mut cols[1],
                    &state.config.focus_role,
                    &agg.focus_role_by_country,
                );
            });
            ui.separator();

            table::detail_table(ui, state);
        });
}
