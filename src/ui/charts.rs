use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::color;
use crate::data::stats::CorrelationMatrix;

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Render an equal-width histogram. `bins` come from
/// [`crate::data::stats::histogram`]: (center, count, width) triples.
pub fn histogram_plot(
    ui: &mut Ui,
    id: &str,
    x_label: &str,
    bins: &[(f64, usize, f64)],
    fill: Color32,
) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|&(center, count, width)| {
            Bar::new(center, count as f64)
                .width(width * 0.95)
                .fill(fill)
        })
        .collect();

    Plot::new(id.to_string())
        .height(280.0)
        .x_axis_label(x_label)
        .y_axis_label("Zip Codes")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(fill));
        });
}

// ---------------------------------------------------------------------------
// Category distribution
// ---------------------------------------------------------------------------

/// One bar per score category, coloured consistently with the map and
/// scatter plots.
pub fn category_bar_chart(
    ui: &mut Ui,
    id: &str,
    counts: &[(String, usize)],
    colors: &crate::color::CategoryColors,
) {
    Plot::new(id.to_string())
        .height(280.0)
        .legend(Legend::default())
        .y_axis_label("Zip Codes")
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (category, count)) in counts.iter().enumerate() {
                let bar = Bar::new(i as f64, *count as f64)
                    .width(0.8)
                    .fill(colors.color_for(category))
                    .name(category);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .color(colors.color_for(category))
                        .name(category),
                );
            }
        });
}

/// Vertical bars over labelled entries, e.g. mean score per component.
pub fn labeled_bar_chart(ui: &mut Ui, id: &str, entries: &[(String, f64)], fill: Color32) {
    Plot::new(id.to_string())
        .height(280.0)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, (label, value)) in entries.iter().enumerate() {
                let bar = Bar::new(i as f64, *value).width(0.8).fill(fill).name(label);
                plot_ui.bar_chart(BarChart::new(vec![bar]).color(fill).name(label));
            }
        });
}

/// Horizontal bars, highest first; the top-cities charts.
pub fn horizontal_bar_chart(ui: &mut Ui, id: &str, entries: &[(String, f64)], fill: Color32) {
    Plot::new(id.to_string())
        .height(280.0)
        .legend(Legend::default())
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // Reverse so the largest mean renders at the top.
            for (i, (label, value)) in entries.iter().rev().enumerate() {
                let bar = Bar::new(i as f64, *value).width(0.8).fill(fill).name(label);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .horizontal()
                        .color(fill)
                        .name(label),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter plots
// ---------------------------------------------------------------------------

/// A scatter series: legend label, colour, points.
pub struct ScatterSeries {
    pub label: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

pub fn scatter_plot(ui: &mut Ui, id: &str, x_label: &str, y_label: &str, series: &[ScatterSeries]) {
    Plot::new(id.to_string())
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label(x_label)
        .y_axis_label(y_label)
        .show(ui, |plot_ui| {
            for s in series {
                plot_ui.points(
                    Points::new(s.points.clone())
                        .radius(3.0)
                        .color(s.color)
                        .name(&s.label),
                );
            }
        });
}

/// Geographic scatter: longitude on x, latitude on y, equal aspect.
pub fn map_plot(ui: &mut Ui, id: &str, series: &[ScatterSeries]) {
    Plot::new(id.to_string())
        .height(480.0)
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .show(ui, |plot_ui| {
            for s in series {
                plot_ui.points(
                    Points::new(s.points.clone())
                        .radius(3.5)
                        .color(s.color)
                        .name(&s.label),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Cell grid over the correlation matrix: blue–white–red for defined
/// coefficients, a grey dash for undefined ones.
pub fn correlation_heatmap(ui: &mut Ui, id: &str, matrix: &CorrelationMatrix) {
    egui::Grid::new(id.to_string())
        .spacing([2.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            // Header row.
            ui.label("");
            for field in &matrix.fields {
                ui.label(RichText::new(field.label()).small().strong());
            }
            ui.end_row();

            for (i, field) in matrix.fields.iter().enumerate() {
                ui.label(RichText::new(field.label()).small().strong());
                for j in 0..matrix.len() {
                    match matrix.get(i, j) {
                        Some(value) => {
                            let fill = color::diverging(value);
                            let text = if is_dark(fill) {
                                Color32::WHITE
                            } else {
                                Color32::BLACK
                            };
                            ui.label(
                                RichText::new(format!("{value:.2}"))
                                    .background_color(fill)
                                    .color(text)
                                    .monospace(),
                            );
                        }
                        None => {
                            ui.label(RichText::new("–").color(Color32::GRAY).monospace());
                        }
                    }
                }
                ui.end_row();
            }
        });
}

fn is_dark(c: Color32) -> bool {
    // Perceived luminance, sufficient for picking a readable text colour.
    let lum = 0.299 * c.r() as f32 + 0.587 * c.g() as f32 + 0.114 * c.b() as f32;
    lum < 140.0
}
