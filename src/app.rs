use std::sync::Arc;

use eframe::egui;

use crate::data::model::ZipDataset;
use crate::state::AppState;
use crate::ui::{panels, tabs};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ZipscopeApp {
    pub state: AppState,
}

impl ZipscopeApp {
    pub fn new(dataset: Arc<ZipDataset>) -> Self {
        let mut state = AppState::default();
        state.set_dataset(dataset, None);
        Self { state }
    }
}

impl eframe::App for ZipscopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and headline metrics ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metric tiles, tab strip and active tab ----
        egui::CentralPanel::default().show(ctx, |ui| {
            tabs::central_panel(ui, &mut self.state);
        });
    }
}
