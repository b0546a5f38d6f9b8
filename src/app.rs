use std::path::Path;

use eframe::egui;

use crate::data::loader::DATA_FILE;
use crate::state::AppState;
use crate::ui::{charts, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MindScopeApp {
    pub state: AppState,
}

impl eframe::App for MindScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One-shot session load on the first frame; the loader memoizes, so
        // this never re-reads the file even across app instances.
        if !self.state.load_attempted {
            self.state.load(Path::new(DATA_FILE));
        }

        // ---- Top panel: title and record counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Load failure is terminal: message only, no filters or charts ----
        if let Some(message) = self.state.load_error.clone() {
            egui::CentralPanel::default().show(ctx, |ui| {
                panels::error_screen(ui, &message);
            });
            return;
        }

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: metrics and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::dashboard(ui, &self.state);
        });
    }
}
