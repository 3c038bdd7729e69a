use eframe::egui;

use crate::color::{parse_hex, to_color32, PLOT_BACKGROUND};
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HrDiagramApp {
    pub state: AppState,
}

impl HrDiagramApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: AppState) -> Self {
        // Light theme with the chart's plot-area background.
        cc.egui_ctx.set_visuals(egui::Visuals::light());
        cc.egui_ctx.style_mut(|style| {
            style.visuals.extreme_bg_color = to_color32(parse_hex(PLOT_BACKGROUND));
        });
        Self { state }
    }
}

impl eframe::App for HrDiagramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: run summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: class legend and cleaning counts ----
        egui::SidePanel::left("class_panel")
            .default_width(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::hr_plot(ui, &self.state);
        });
    }
}
