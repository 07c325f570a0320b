use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Polygon};

use super::format::format_usd;
use crate::color::{ColorMap, sequential_color};
use crate::data::aggregate::{
    CategoryCount, CountrySalary, HistogramBucket, RoleSalary, by_mean_salary,
};

const CHART_HEIGHT: f32 = 280.0;
const DONUT_HOLE: f64 = 0.5;
/// Arc segments per full turn; slices are drawn as convex quads.
const DONUT_SEGMENTS: usize = 180;

fn no_data(ui: &mut Ui) {
    ui.weak("No data for the current filters.");
}

/// Y-axis formatter that prints category labels at integer positions.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let v = mark.value;
        if v < 0.0 || (v - v.round()).abs() > 1e-6 {
            return String::new();
        }
        labels.get(v.round() as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Top roles by mean salary (horizontal bars)
// ---------------------------------------------------------------------------

pub fn top_roles_chart(ui: &mut Ui, top_roles: &[RoleSalary]) {
    ui.strong("Top roles by mean salary");
    if top_roles.is_empty() {
        no_data(ui);
        return;
    }

    let bars: Vec<Bar> = top_roles
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.mean_salary)
                .name(format!("{}: {}", r.role, format_usd(r.mean_salary)))
                .width(0.7)
        })
        .collect();
    let labels = top_roles.iter().map(|r| r.role.clone()).collect();

    Plot::new("top_roles")
        .height(CHART_HEIGHT)
        .x_axis_label("Mean annual salary (USD)")
        .y_axis_formatter(category_axis(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .horizontal()
                    .color(Color32::from_rgb(66, 133, 244)),
            );
        });
}

// ---------------------------------------------------------------------------
// Salary distribution (histogram)
// ---------------------------------------------------------------------------

pub fn salary_histogram_chart(ui: &mut Ui, histogram: &[HistogramBucket]) {
    ui.strong("Annual salary distribution");
    if histogram.is_empty() {
        no_data(ui);
        return;
    }

    let bars: Vec<Bar> = histogram
        .iter()
        .map(|b| {
            Bar::new((b.lower + b.upper) / 2.0, b.count as f64)
                .width(b.upper - b.lower)
                .name(format!("{} – {}", format_usd(b.lower), format_usd(b.upper)))
        })
        .collect();

    Plot::new("salary_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("Salary range (USD)")
        .y_axis_label("Records")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::from_rgb(52, 168, 83)));
        });
}

// ---------------------------------------------------------------------------
// Work type share (donut)
// ---------------------------------------------------------------------------

/// Quads approximating the annulus sector between `start` and `end` radians.
fn donut_slice(start: f64, end: f64) -> Vec<Vec<[f64; 2]>> {
    let steps = (((end - start) / TAU) * DONUT_SEGMENTS as f64).ceil().max(1.0) as usize;
    let step = (end - start) / steps as f64;
    (0..steps)
        .map(|i| {
            let a0 = start + i as f64 * step;
            let a1 = a0 + step;
            vec![
                [DONUT_HOLE * a0.cos(), DONUT_HOLE * a0.sin()],
                [a0.cos(), a0.sin()],
                [a1.cos(), a1.sin()],
                [DONUT_HOLE * a1.cos(), DONUT_HOLE * a1.sin()],
            ]
        })
        .collect()
}

pub fn work_type_chart(ui: &mut Ui, remote_types: &[CategoryCount]) {
    ui.strong("Share of work arrangements");
    let total: usize = remote_types.iter().map(|c| c.count).sum();
    if total == 0 {
        no_data(ui);
        return;
    }

    let colors = ColorMap::new(remote_types.iter().map(|c| c.value.as_str()));

    Plot::new("work_type_donut")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            // Start at twelve o'clock and run clockwise.
            let mut angle = TAU / 4.0;
            for cat in remote_types {
                let sweep = TAU * cat.count as f64 / total as f64;
                let share = 100.0 * cat.count as f64 / total as f64;
                let name = format!("{} ({share:.1}%)", cat.value);
                let color = colors.color_for(&cat.value);
                for quad in donut_slice(angle - sweep, angle) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(quad))
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(0.0, color)),
                    );
                }
                angle -= sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Mean salary per country for the focus role
// ---------------------------------------------------------------------------

pub fn country_salary_chart(ui: &mut Ui, focus_role: &str, by_country: &[CountrySalary]) {
    ui.strong(format!("Mean {focus_role} salary by country of residence"));
    if by_country.is_empty() {
        no_data(ui);
        return;
    }

    let mut sorted = by_country.to_vec();
    sorted.sort_by(by_mean_salary);

    let min = sorted.first().map_or(0.0, |c| c.mean_salary);
    let max = sorted.last().map_or(0.0, |c| c.mean_salary);
    let span = max - min;

    let bars: Vec<Bar> = sorted
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let t = if span > 0.0 { (c.mean_salary - min) / span } else { 1.0 };
            Bar::new(i as f64, c.mean_salary)
                .name(format!(
                    "{}: {} ({} records)",
                    c.country_code,
                    format_usd(c.mean_salary),
                    c.count
                ))
                .fill(sequential_color(t))
                .width(0.7)
        })
        .collect();
    let labels = sorted.iter().map(|c| c.country_code.clone()).collect();

    Plot::new("country_salary")
        .height(CHART_HEIGHT)
        .x_axis_label("Mean salary (USD)")
        .y_axis_formatter(category_axis(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal());
        });
}
