use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Clone the handle so we can mutate filter state inside the closures.
    let dataset = match &state.dataset {
        Some(ds) => Arc::clone(ds),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Score category ----
            ui.strong("Score Category");
            let selected_cat = state.filters.category.clone();
            egui::ComboBox::from_id_salt("category_filter")
                .selected_text(selected_cat.as_deref().unwrap_or("All"))
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(selected_cat.is_none(), "All")
                        .clicked()
                    {
                        state.filters.category = None;
                        changed = true;
                    }
                    for cat in &dataset.categories {
                        if ui
                            .selectable_label(selected_cat.as_deref() == Some(cat.as_str()), cat)
                            .clicked()
                        {
                            state.filters.category = Some(cat.clone());
                            changed = true;
                        }
                    }
                });
            ui.add_space(8.0);

            // ---- Primary city ----
            ui.strong("Primary City");
            let selected_city = state.filters.city.clone();
            egui::ComboBox::from_id_salt("city_filter")
                .selected_text(selected_city.as_deref().unwrap_or("All"))
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(selected_city.is_none(), "All")
                        .clicked()
                    {
                        state.filters.city = None;
                        changed = true;
                    }
                    for city in &dataset.cities {
                        if ui
                            .selectable_label(selected_city.as_deref() == Some(city.as_str()), city)
                            .clicked()
                        {
                            state.filters.city = Some(city.clone());
                            changed = true;
                        }
                    }
                });
            ui.add_space(8.0);

            // ---- Composite score range (inclusive) ----
            ui.strong("Composite Score Range");
            let (data_lo, data_hi) = dataset.score_range;
            let (mut lo, mut hi) = state.filters.score_range;
            if ui
                .add(egui::Slider::new(&mut lo, data_lo..=data_hi).text("min"))
                .changed()
            {
                changed = true;
            }
            if ui
                .add(egui::Slider::new(&mut hi, data_lo..=data_hi).text("max"))
                .changed()
            {
                changed = true;
            }
            // Keep the range well-formed when sliders cross.
            if lo > hi {
                std::mem::swap(&mut lo, &mut hi);
            }
            state.filters.score_range = (lo, hi);
            ui.add_space(8.0);

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }

            ui.separator();
            ui.label(format!(
                "{} of {} zip codes match",
                state.visible_rows.len(),
                dataset.len()
            ));
        });

    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} zip codes loaded, {} visible",
                ds.len(),
                state.visible_rows.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open zip-code dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        match state.loader.load(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} zip codes across {} cities",
                    dataset.len(),
                    dataset.cities.len()
                );
                state.set_dataset(dataset, Some(path));
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
