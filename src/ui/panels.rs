use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::color::to_color32;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – class legend and cleaning summary
// ---------------------------------------------------------------------------

/// Render the left panel: stars per class, then how many rows were dropped.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Spectral Class");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (series, (letter, count)) in state.chart.series.iter().zip(state.class_counts()) {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("●").color(to_color32(series.color)).size(16.0));
                    ui.strong(letter);
                    ui.label(format!("{count}"));
                });
            }

            ui.add_space(8.0);
            ui.strong("Dropped rows");
            ui.separator();

            let report = &state.report;
            egui::Grid::new("dropped_rows")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    for (reason, count) in [
                        ("incomplete", report.missing),
                        ("color index out of range", report.out_of_range),
                        ("unknown class", report.unknown_class),
                    ] {
                        ui.label(reason);
                        ui.label(format!("{count}"));
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the run summary above the plot.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} of {} stars plotted from {}",
            state.report.retained,
            state.report.total,
            state.input.display()
        ));
        ui.separator();
        ui.label(format!("saved to {}", state.output.display()));
    });
}
