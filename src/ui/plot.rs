use std::ops::RangeInclusive;

use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{
    AxisHints, Corner, GridInput, GridMark, HPlacement, Legend, MarkerShape, Plot, PlotPoint,
    Points, Text, VPlacement,
};

use crate::chart::{label_at, Tick, X2_LABEL, X_LABEL, Y2_LABEL, Y_LABEL};
use crate::color::{to_color32_alpha, MARKER_ALPHA};
use crate::state::AppState;

/// Marker radius in points.
const MARKER_RADIUS: f32 = 1.5;
const ANNOTATION_SIZE: f32 = 14.0;

// egui_plot axes only grow to the right, so x is plotted as -log10(T).
fn plot_x(log_temperature: f64) -> f64 {
    -log_temperature
}

fn grid_marks<'t>(ticks: impl Iterator<Item = &'t Tick>, to_plot: fn(f64) -> f64, step: f64) -> Vec<GridMark> {
    ticks
        .map(|t| GridMark {
            value: to_plot(t.position),
            step_size: step,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// HR diagram (central panel)
// ---------------------------------------------------------------------------

/// Render the diagram with the same layout as the exported file.
pub fn hr_plot(ui: &mut Ui, state: &AppState) {
    let chart = &state.chart;

    let x_span = chart.temperature.hi - chart.temperature.lo;
    let y_span = chart.luminosity.hi - chart.luminosity.lo;
    let x_marks = grid_marks(
        chart.temperature_ticks.iter().chain(&chart.class_ticks),
        plot_x,
        x_span,
    );
    let y_marks = grid_marks(chart.luminosity_ticks.iter(), |y| y, y_span);

    let temperature_ticks = chart.temperature_ticks.clone();
    let class_ticks = chart.class_ticks.clone();
    let luminosity_ticks = chart.luminosity_ticks.clone();
    let magnitude_ticks = chart.magnitude_ticks.clone();

    let x_axes = vec![
        AxisHints::new_x()
            .label(X_LABEL)
            .formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                label_at(&temperature_ticks, plot_x(mark.value))
            }),
        AxisHints::new_x()
            .label(X2_LABEL)
            .placement(VPlacement::Top)
            .formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                label_at(&class_ticks, plot_x(mark.value))
            }),
    ];
    let y_axes = vec![
        AxisHints::new_y()
            .label(Y_LABEL)
            .formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                label_at(&luminosity_ticks, mark.value)
            }),
        AxisHints::new_y()
            .label(Y2_LABEL)
            .placement(HPlacement::Right)
            .formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
                label_at(&magnitude_ticks, mark.value)
            }),
    ];

    Plot::new("hr_diagram")
        .legend(Legend::default().position(Corner::RightTop))
        .custom_x_axes(x_axes)
        .custom_y_axes(y_axes)
        .x_grid_spacer(move |_input: GridInput| x_marks.clone())
        .y_grid_spacer(move |_input: GridInput| y_marks.clone())
        .include_x(plot_x(chart.temperature.lo))
        .include_x(plot_x(chart.temperature.hi))
        .include_y(chart.luminosity.lo)
        .include_y(chart.luminosity.hi)
        .label_formatter(|name, value| {
            let t = 10f64.powf(plot_x(value.x));
            let l = 10f64.powf(value.y);
            if name.is_empty() {
                format!("T = {t:.0} K\nL = {l:.3e} L☉")
            } else {
                format!("{name}\nT = {t:.0} K\nL = {l:.3e} L☉")
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .map(|&(x, y)| [plot_x(x), y])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(series.class.to_string())
                        .color(to_color32_alpha(series.color, MARKER_ALPHA))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(MARKER_RADIUS),
                );
            }

            for annotation in &chart.annotations {
                let (x, y) = annotation.position;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(plot_x(x), y),
                        RichText::new(annotation.text).size(ANNOTATION_SIZE),
                    )
                    .anchor(Align2::LEFT_BOTTOM),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotter_stars_plot_further_left() {
        assert!(plot_x(40_000f64.log10()) < plot_x(3_000f64.log10()));
    }

    #[test]
    fn grid_marks_follow_plot_transform() {
        let ticks = vec![Tick {
            position: 4.0,
            label: "10⁴".to_string(),
        }];
        let marks = grid_marks(ticks.iter(), plot_x, 1.5);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].value, -4.0);
        assert_eq!(marks[0].step_size, 1.5);
        assert_eq!(label_at(&ticks, plot_x(marks[0].value)), "10⁴");
    }
}
