use eframe::egui::{RichText, Ui};

use super::format::{format_count, format_usd};
use crate::data::aggregate::SummaryMetrics;

// ---------------------------------------------------------------------------
// Metric cards (top of the central panel)
// ---------------------------------------------------------------------------

/// Render the four summary cards side by side.
pub fn metric_cards(ui: &mut Ui, summary: &SummaryMetrics) {
    ui.heading("Overall metrics (annual salary in USD)");
    ui.add_space(4.0);

    ui.columns(4, |cols: &mut [Ui]| {
        metric_card(&mut cols[0], "Mean salary", &format_usd(summary.mean_salary));
        metric_card(&mut cols[1], "Max salary", &format_usd(summary.max_salary));
        metric_card(&mut cols[2], "Records", &format_count(summary.count));
        metric_card(&mut cols[3], "Most frequent role", &summary.most_frequent_role);
    });
}

fn metric_card(ui: &mut Ui, label: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}
