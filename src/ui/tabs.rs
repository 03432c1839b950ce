use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::export;
use crate::data::filter::View;
use crate::data::geocode::{self, NoGeocoder};
use crate::data::model::{Field, KeyField, NumericField, ZipDataset};
use crate::data::stats::{self, Direction};
use crate::state::{AppState, Tab};
use crate::ui::charts::{self, ScatterSeries};

// Chart colours for the distribution histograms.
const BLUE: Color32 = Color32::from_rgb(0x1f, 0x77, 0xb4);
const GREEN: Color32 = Color32::from_rgb(0x2c, 0xa0, 0x2c);
const ORANGE: Color32 = Color32::from_rgb(0xff, 0x7f, 0x0e);
const PURPLE: Color32 = Color32::from_rgb(0x94, 0x67, 0xbd);
const BROWN: Color32 = Color32::from_rgb(0x8c, 0x56, 0x4b);
const PINK: Color32 = Color32::from_rgb(0xe3, 0x77, 0xc2);
const GRAY: Color32 = Color32::from_rgb(0x7f, 0x7f, 0x7f);

const HISTOGRAM_BINS: usize = 30;
const TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Central panel: metric tiles, tab strip, active tab
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let dataset = match &state.dataset {
        Some(ds) => Arc::clone(ds),
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a dataset to begin  (File → Open…)");
            });
            return;
        }
    };

    metrics_row(ui, state, &dataset);
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.tab {
            Tab::Overview => overview_tab(ui, state, &dataset),
            Tab::Scores => scores_tab(ui, state, &dataset),
            Tab::Economics => economics_tab(ui, state, &dataset),
            Tab::Demographics => demographics_tab(ui, state, &dataset),
            Tab::Table => table_tab(ui, state, &dataset),
            Tab::Map => map_tab(ui, state, &dataset),
        });
}

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

fn metrics_row(ui: &mut Ui, state: &AppState, dataset: &ZipDataset) {
    let view = state.visible_view(dataset);
    let summary = stats::aggregate_summary(&view);

    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Total Zip Codes", summary.count.to_string());
        metric(
            ui,
            "Avg Composite Score",
            summary
                .composite_score
                .map(|v| format!("{v:.2}"))
                .unwrap_or_else(|| "–".to_string()),
        );
        metric(
            ui,
            "Avg Median Income",
            summary
                .median_income
                .map(|v| format!("${}", fmt_thousands(v)))
                .unwrap_or_else(|| "–".to_string()),
        );
        metric(
            ui,
            "Avg Home Value",
            summary
                .median_home_value
                .map(|v| format!("${}", fmt_thousands(v)))
                .unwrap_or_else(|| "–".to_string()),
        );
        metric(
            ui,
            "Avg Population",
            summary
                .estimated_population
                .map(fmt_thousands)
                .unwrap_or_else(|| "–".to_string()),
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).small().weak());
        ui.label(RichText::new(value).heading());
    });
    ui.separator();
}

/// Round to integer and group digits with commas.
fn fmt_thousands(v: f64) -> String {
    let n = v.round() as i64;
    let digits = n.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

// ---------------------------------------------------------------------------
// Overview tab
// ---------------------------------------------------------------------------

fn overview_tab(ui: &mut Ui, state: &AppState, dataset: &ZipDataset) {
    let view = state.visible_view(dataset);

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Distribution by Score Category");
        let counts = stats::category_counts(&view);
        charts::category_bar_chart(&mut cols[0], "category_dist", &counts, &state.category_colors);

        cols[1].strong("Composite Score Distribution");
        let bins = stats::histogram(&view, NumericField::CompositeScore, HISTOGRAM_BINS);
        charts::histogram_plot(&mut cols[1], "composite_hist", "Composite Score", &bins, BLUE);
    });

    ui.add_space(12.0);

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Top 10 Zip Codes by Composite Score");
        let top = stats::top_n(&view, NumericField::CompositeScore, TOP_N, Direction::Descending);
        ranked_zip_table(&mut cols[0], "top10", dataset, &top);

        cols[1].strong("Bottom 10 Zip Codes by Composite Score");
        let bottom = stats::top_n(&view, NumericField::CompositeScore, TOP_N, Direction::Ascending);
        ranked_zip_table(&mut cols[1], "bottom10", dataset, &bottom);
    });
}

/// Compact ranked table: zip, city, composite score, income, home value.
fn ranked_zip_table(ui: &mut Ui, id: &str, dataset: &ZipDataset, rows: &[usize]) {
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), 6)
            .header(20.0, |mut header| {
                for title in ["#", "Zip", "City", "Score", "Income", "Home Value"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (rank, &row) in rows.iter().enumerate() {
                    let r = &dataset.records[row];
                    body.row(18.0, |mut tr| {
                        tr.col(|ui: &mut Ui| {
                            ui.label((rank + 1).to_string());
                        });
                        tr.col(|ui: &mut Ui| {
                            ui.label(&r.zip_code);
                        });
                        tr.col(|ui: &mut Ui| {
                            ui.label(&r.primary_city);
                        });
                        tr.col(|ui: &mut Ui| {
                            ui.label(format!("{:.2}", r.composite_score));
                        });
                        tr.col(|ui: &mut Ui| {
                            ui.label(format!("${}", fmt_thousands(r.median_income)));
                        });
                        tr.col(|ui: &mut Ui| {
                            ui.label(format!("${}", fmt_thousands(r.median_home_value)));
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Score analysis tab
// ---------------------------------------------------------------------------

fn scores_tab(ui: &mut Ui, state: &mut AppState, dataset: &ZipDataset) {
    let view = state.visible_view(dataset);

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Average Scores by Component");
        let means: Vec<(String, f64)> = stats::component_means(&view)
            .into_iter()
            .filter_map(|(f, m)| m.map(|v| (f.label().to_string(), v)))
            .collect();
        charts::labeled_bar_chart(&mut cols[0], "component_means", &means, BLUE);

        cols[1].strong("Score Components Correlation Matrix");
        let matrix = stats::correlation_matrix(&view, &NumericField::SCORE_FIELDS);
        charts::correlation_heatmap(&mut cols[1], "score_corr", &matrix);
    });

    ui.add_space(12.0);
    ui.strong("Score Relationships");

    ui.horizontal(|ui: &mut Ui| {
        axis_combo(ui, "scatter_x", "X-axis", &mut state.scatter_x);
        axis_combo(ui, "scatter_y", "Y-axis", &mut state.scatter_y);
    });

    let series = category_series(state, dataset, state.scatter_x, state.scatter_y);
    charts::scatter_plot(
        ui,
        "score_scatter",
        state.scatter_x.label(),
        state.scatter_y.label(),
        &series,
    );
}

fn axis_combo(ui: &mut Ui, id: &str, label: &str, selection: &mut NumericField) {
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(selection.label())
        .show_ui(ui, |ui: &mut Ui| {
            for field in NumericField::ALL {
                ui.selectable_value(selection, field, field.label());
            }
        });
}

/// One scatter series per score category, in the dataset's category order.
fn category_series(
    state: &AppState,
    dataset: &ZipDataset,
    x: NumericField,
    y: NumericField,
) -> Vec<ScatterSeries> {
    let view = state.visible_view(dataset);
    dataset
        .categories
        .iter()
        .map(|category| {
            let points: Vec<[f64; 2]> = view
                .records()
                .filter(|r| &r.score_category == category)
                .map(|r| [x.value(r), y.value(r)])
                .collect();
            ScatterSeries {
                label: category.clone(),
                color: state.category_colors.color_for(category),
                points,
            }
        })
        .filter(|s| !s.points.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Economic metrics tab
// ---------------------------------------------------------------------------

fn economics_tab(ui: &mut Ui, state: &AppState, dataset: &ZipDataset) {
    let view = state.visible_view(dataset);

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Median Income Distribution");
        let bins = stats::histogram(&view, NumericField::MedianIncome, HISTOGRAM_BINS);
        charts::histogram_plot(&mut cols[0], "income_hist", "Median Income ($)", &bins, GREEN);

        cols[1].strong("Median Home Value Distribution");
        let bins = stats::histogram(&view, NumericField::MedianHomeValue, HISTOGRAM_BINS);
        charts::histogram_plot(
            &mut cols[1],
            "home_hist",
            "Median Home Value ($)",
            &bins,
            ORANGE,
        );
    });

    ui.add_space(12.0);
    ui.strong("Median Income vs Median Home Value");
    let series = category_series(
        state,
        dataset,
        NumericField::MedianIncome,
        NumericField::MedianHomeValue,
    );
    charts::scatter_plot(
        ui,
        "income_home_scatter",
        "Median Income ($)",
        "Median Home Value ($)",
        &series,
    );

    ui.add_space(12.0);

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Top 10 Cities by Average Income");
        let mut by_income =
            stats::group_mean(&view, KeyField::PrimaryCity, NumericField::MedianIncome);
        by_income.truncate(TOP_N);
        charts::horizontal_bar_chart(&mut cols[0], "city_income", &by_income, GREEN);

        cols[1].strong("Top 10 Cities by Average Home Value");
        let mut by_home =
            stats::group_mean(&view, KeyField::PrimaryCity, NumericField::MedianHomeValue);
        by_home.truncate(TOP_N);
        charts::horizontal_bar_chart(&mut cols[1], "city_home", &by_home, ORANGE);
    });
}

// ---------------------------------------------------------------------------
// Demographics tab
// ---------------------------------------------------------------------------

fn demographics_tab(ui: &mut Ui, state: &AppState, dataset: &ZipDataset) {
    let view = state.visible_view(dataset);

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Population Distribution");
        let bins = stats::histogram(&view, NumericField::EstimatedPopulation, HISTOGRAM_BINS);
        charts::histogram_plot(&mut cols[0], "pop_hist", "Estimated Population", &bins, PURPLE);

        cols[1].strong("Population Density Distribution");
        let bins = stats::histogram(&view, NumericField::PopulationDensity, HISTOGRAM_BINS);
        charts::histogram_plot(
            &mut cols[1],
            "density_hist",
            "Population Density",
            &bins,
            BROWN,
        );
    });

    ui.add_space(12.0);

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Public Transit Usage Distribution");
        let bins = stats::histogram(&view, NumericField::PublicTransitPct, HISTOGRAM_BINS);
        charts::histogram_plot(
            &mut cols[0],
            "transit_hist",
            "Public Transit Usage (%)",
            &bins,
            PINK,
        );

        cols[1].strong("Education Level Distribution");
        let bins = stats::histogram(&view, NumericField::EducationPct, HISTOGRAM_BINS);
        charts::histogram_plot(
            &mut cols[1],
            "education_hist",
            "Education Level (%)",
            &bins,
            GRAY,
        );
    });

    ui.add_space(12.0);
    ui.strong("Population vs Population Density");
    let series = category_series(
        state,
        dataset,
        NumericField::EstimatedPopulation,
        NumericField::PopulationDensity,
    );
    charts::scatter_plot(
        ui,
        "pop_density_scatter",
        "Estimated Population",
        "Population Density",
        &series,
    );
}

// ---------------------------------------------------------------------------
// Data table tab
// ---------------------------------------------------------------------------

fn table_tab(ui: &mut Ui, state: &mut AppState, dataset: &ZipDataset) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Search");
        ui.text_edit_singleline(&mut state.search);
        if ui.button("Clear").clicked() {
            state.search.clear();
        }
    });

    egui::CollapsingHeader::new("Columns")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                for field in Field::ALL {
                    let mut checked = state.selected_columns.contains(&field);
                    if ui.checkbox(&mut checked, field.name()).changed() {
                        state.toggle_column(field);
                    }
                }
            });
        });

    let display = state.visible_view(dataset).search(&state.search);
    let fields = state.selected_columns.clone();

    ui.label(format!("{} rows", display.len()));

    if fields.is_empty() {
        ui.label("Select at least one column.");
        return;
    }

    ui.push_id("data_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(420.0)
            .columns(Column::auto().resizable(true), fields.len())
            .header(20.0, |mut header| {
                for field in &fields {
                    header.col(|ui: &mut Ui| {
                        ui.strong(field.name());
                    });
                }
            })
            .body(|body| {
                let rows = display.rows().to_vec();
                body.rows(18.0, rows.len(), |mut tr| {
                    let r = &dataset.records[rows[tr.index()]];
                    for field in &fields {
                        tr.col(|ui: &mut Ui| {
                            ui.label(field.cell(r));
                        });
                    }
                });
            });
    });

    ui.add_space(8.0);

    if ui.button("Download filtered data as CSV").clicked() {
        export_view(state, &display, &fields);
    }

    ui.add_space(12.0);
    ui.strong("Summary Statistics");
    let numeric: Vec<NumericField> = fields
        .iter()
        .filter_map(|f| match f {
            Field::Numeric(n) => Some(*n),
            _ => None,
        })
        .collect();
    describe_table(ui, &display, &numeric);
}

fn export_view(state: &mut AppState, display: &View<'_>, fields: &[Field]) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Save filtered data")
        .set_file_name("filtered_la_county_data.csv")
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return;
    };

    let result = export::view_to_csv(display, fields)
        .map_err(anyhow::Error::from)
        .and_then(|text| std::fs::write(&path, text).map_err(anyhow::Error::from));

    match result {
        Ok(()) => {
            log::info!("Exported {} rows to {}", display.len(), path.display());
            state.status_message = Some(format!("Saved {}", path.display()));
        }
        Err(e) => {
            log::error!("Export failed: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}

fn describe_table(ui: &mut Ui, view: &View<'_>, fields: &[NumericField]) {
    if fields.is_empty() {
        ui.label("No numeric columns selected.");
        return;
    }
    let all_stats = stats::describe(view, fields);

    let fmt = |v: Option<f64>| v.map(|x| format!("{x:.2}")).unwrap_or_else(|| "–".to_string());

    ui.push_id("describe", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), 9)
            .header(20.0, |mut header| {
                for title in [
                    "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
                ] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for s in &all_stats {
                    body.row(18.0, |mut tr| {
                        tr.col(|ui: &mut Ui| {
                            ui.label(s.field.name());
                        });
                        tr.col(|ui: &mut Ui| {
                            ui.label(s.count.to_string());
                        });
                        for value in [s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max] {
                            tr.col(|ui: &mut Ui| {
                                ui.label(fmt(value));
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Map tab
// ---------------------------------------------------------------------------

fn map_tab(ui: &mut Ui, state: &AppState, dataset: &ZipDataset) {
    let view = state.visible_view(dataset);
    // Source coordinates when present, regional-center fallback otherwise.
    let points = geocode::map_points(&view, &NoGeocoder);

    let series: Vec<ScatterSeries> = dataset
        .categories
        .iter()
        .map(|category| {
            let pts: Vec<[f64; 2]> = points
                .iter()
                .filter(|p| dataset.records[p.row].score_category == *category)
                .map(|p| [p.longitude, p.latitude])
                .collect();
            ScatterSeries {
                label: category.clone(),
                color: state.category_colors.color_for(category),
                points: pts,
            }
        })
        .filter(|s| !s.points.is_empty())
        .collect();

    ui.strong("Zip Codes by Location");
    charts::map_plot(ui, "zip_map", &series);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(fmt_thousands(0.0), "0");
        assert_eq!(fmt_thousands(999.0), "999");
        assert_eq!(fmt_thousands(1_000.0), "1,000");
        assert_eq!(fmt_thousands(2_500_000.4), "2,500,000");
        assert_eq!(fmt_thousands(-1_234.0), "-1,234");
    }
}
