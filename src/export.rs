use std::ops::Range;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use plotters::coord::ranged1d::{KeyPointHint, NoDefaultFormatting, Ranged, ValueFormatter};
use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::chart::{label_at, Annotation, HrChart, Tick, X2_LABEL, X_LABEL, Y2_LABEL, Y_LABEL};
use crate::color::{parse_hex, to_rgb_color, MARKER_ALPHA, PLOT_BACKGROUND};

/// Marker radius in pixels, about 1 pt.
const MARKER_SIZE: i32 = 1;
/// Legend markers are drawn four times larger than the data points.
const LEGEND_MARKER_SIZE: i32 = 4;
const LEGEND_TITLE: &str = "Spectral Class";
const LEGEND_FONT_SIZE: i32 = 13;
/// Horizontal room reserved for the legend box at the right of the plot.
const LEGEND_WIDTH: i32 = 64;
const LEGEND_INSET: i32 = 8;
const ANNOTATION_FONT_SIZE: i32 = 16;

/// Slack so that a bound computed as `log10(v)` still admits the minor at `v`.
const MINOR_TOLERANCE: f64 = 1e-9;

type AxisCoord = Cartesian2d<TickedAxis, TickedAxis>;

// ---------------------------------------------------------------------------
// TickedAxis – linear log10 coordinate with literal tick labels
// ---------------------------------------------------------------------------

/// One axis of the diagram in log10 space.
///
/// Bold key points are exactly the chart's ticks and each tick renders its
/// own label, so no default number formatting is involved. When the minor
/// grid is enabled, light key points fall on `k·10^n` for k in 2..=9.
/// `start > end` is allowed and flips the axis.
#[derive(Debug, Clone)]
struct TickedAxis {
    start: f64,
    end: f64,
    ticks: Vec<Tick>,
    minor_grid: bool,
}

impl TickedAxis {
    fn new(range: Range<f64>, ticks: &[Tick]) -> Self {
        TickedAxis {
            start: range.start,
            end: range.end,
            ticks: ticks.to_vec(),
            minor_grid: false,
        }
    }

    fn with_minor_grid(mut self) -> Self {
        self.minor_grid = true;
        self
    }
}

/// Positions of `k·10^n` (k = 2..=9) inside the log10 interval spanned by
/// `a` and `b`, ascending.
fn minor_positions(a: f64, b: f64) -> Vec<f64> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if !lo.is_finite() || !hi.is_finite() {
        return vec![];
    }
    let mut out = Vec::new();
    for decade in (lo.floor() as i32)..=(hi.floor() as i32) {
        for k in 2..=9 {
            let p = f64::from(decade) + f64::from(k).log10();
            if p >= lo - MINOR_TOLERANCE && p <= hi + MINOR_TOLERANCE {
                out.push(p);
            }
        }
    }
    out
}

impl Ranged for TickedAxis {
    type FormatOption = NoDefaultFormatting;
    type ValueType = f64;

    // Not clamped: values outside the range land outside the pixel limits.
    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let fraction = (value - self.start) / (self.end - self.start);
        limit.0 + ((limit.1 - limit.0) as f64 * fraction).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        if hint.weight().allow_light_points() {
            if !self.minor_grid {
                return vec![];
            }
            let minors = minor_positions(self.start, self.end);
            if minors.len() > hint.max_num_points() {
                return vec![];
            }
            return minors;
        }
        self.ticks.iter().map(|t| t.position).collect()
    }

    fn range(&self) -> Range<f64> {
        self.start..self.end
    }
}

impl ValueFormatter<f64> for TickedAxis {
    fn format_ext(&self, value: &f64) -> String {
        label_at(&self.ticks, *value)
    }
}

/// Backend pixel of an annotation anchor. Positions outside the axis ranges
/// map outside the plotting area instead of being pinned to its edge.
fn annotation_pixel(coord: &AxisCoord, annotation: &Annotation) -> (i32, i32) {
    coord.translate(&annotation.position)
}

// ---------------------------------------------------------------------------
// Vector export
// ---------------------------------------------------------------------------

/// Render the chart as an SVG document.
///
/// The temperature axis runs from `hi` to `lo` so hotter stars land on the
/// left. Secondary axes share the primary ranges and only swap in their own
/// ticks.
pub fn render_svg(chart: &HrChart, size: (u32, u32)) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw(chart, &root).map_err(|e| anyhow!("{e}"))?;
    }
    Ok(svg)
}

/// Render the chart and write it to `path` as a single-page PDF.
pub fn write_pdf(chart: &HrChart, path: &Path, size: (u32, u32)) -> Result<()> {
    log::info!("Writing {}", path.display());
    let svg = render_svg(chart, size).with_context(|| format!("rendering {}", path.display()))?;

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &options).map_err(|e| anyhow!("parsing SVG: {e}"))?;
    let pdf = svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| anyhow!("converting SVG to PDF: {e:?}"))?;

    std::fs::write(path, pdf).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("{} bytes of SVG converted", svg.len());
    Ok(())
}

fn draw(
    chart: &HrChart,
    root: &DrawingArea<SVGBackend<'_>, Shift>,
) -> Result<(), Box<dyn std::error::Error>> {
    root.fill(&WHITE)?;

    let x_range = chart.temperature.hi..chart.temperature.lo;
    let y_range = chart.luminosity.lo..chart.luminosity.hi;

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(48)
        .top_x_label_area_size(48)
        .y_label_area_size(64)
        .right_y_label_area_size(64)
        .build_cartesian_2d(
            TickedAxis::new(x_range.clone(), &chart.temperature_ticks).with_minor_grid(),
            TickedAxis::new(y_range.clone(), &chart.luminosity_ticks).with_minor_grid(),
        )?
        .set_secondary_coord(
            TickedAxis::new(x_range, &chart.class_ticks),
            TickedAxis::new(y_range, &chart.magnitude_ticks),
        );

    ctx.plotting_area()
        .fill(&to_rgb_color(parse_hex(PLOT_BACKGROUND)))?;

    ctx.configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.12))
        .draw()?;

    ctx.configure_secondary_axes()
        .x_desc(X2_LABEL)
        .y_desc(Y2_LABEL)
        .draw()?;

    for series in &chart.series {
        let color = to_rgb_color(series.color);
        let style = color.mix(MARKER_ALPHA).filled();
        ctx.draw_series(
            series
                .points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), MARKER_SIZE, style)),
        )?
        .label(series.class.to_string())
        .legend(move |(x, y)| Circle::new((x, y), LEGEND_MARKER_SIZE, color.filled()));
    }

    let (px, py) = ctx.plotting_area().get_pixel_range();
    let legend_x = (px.end - px.start) - LEGEND_WIDTH - LEGEND_INSET;
    let title_height = LEGEND_FONT_SIZE + 4;

    // Drawn on the root area so text outside the axes is not clipped.
    let coord = ctx.as_coord_spec();
    let annotation_style = ("sans-serif", ANNOTATION_FONT_SIZE)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Bottom));
    for annotation in &chart.annotations {
        root.draw(&Text::new(
            annotation.text,
            annotation_pixel(coord, annotation),
            annotation_style.clone(),
        ))?;
    }

    root.draw(&Text::new(
        LEGEND_TITLE,
        (
            px.start + legend_x + LEGEND_WIDTH / 2,
            py.start + LEGEND_INSET,
        ),
        ("sans-serif", LEGEND_FONT_SIZE)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top)),
    ))?;

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::Coordinate(
            legend_x,
            LEGEND_INSET + title_height,
        ))
        .label_font(("sans-serif", LEGEND_FONT_SIZE))
        .legend_area_size(16)
        .margin(6)
        .background_style(WHITE.mix(0.0))
        .border_style(TRANSPARENT)
        .draw()?;

    root.present()?;
    Ok(())
}
