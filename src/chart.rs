use palette::Srgb;

use crate::color::class_color;
use crate::data::model::{SpectralClass, StarRecord};
use crate::data::transform::magnitude_from_luminosity;

// ---------------------------------------------------------------------------
// Literal tables
// ---------------------------------------------------------------------------

/// Bottom-axis temperature ticks (K) and their labels.
pub const TEMPERATURE_TICKS: [(f64, &str); 5] = [
    (40_000.0, "4×10⁴"),
    (20_000.0, "2×10⁴"),
    (10_000.0, "10⁴"),
    (5_000.0, "5×10³"),
    (3_000.0, "3×10³"),
];

/// Region labels at fixed (temperature K, luminosity L☉) positions.
pub const ANNOTATIONS: [(&str, f64, f64); 3] = [
    ("Main Sequence", 7_000.0, 1.0),
    ("Red Giants", 4_500.0, 1_000.0),
    ("Supergiants", 10_000.0, 1_000_000.0),
];

pub const X_LABEL: &str = "Surface Temperature (K)";
pub const Y_LABEL: &str = "Luminosity (L/L☉)";
pub const Y2_LABEL: &str = "Absolute Magnitude";
pub const X2_LABEL: &str = "Spectral Class";

/// Fallback extents (linear units) when the data gives no usable range.
const DEFAULT_TEMPERATURE: (f64, f64) = (2_000.0, 50_000.0);
const DEFAULT_LUMINOSITY: (f64, f64) = (1e-4, 1e6);

/// Fraction of the data span added on each side.
const MARGIN: f64 = 0.05;
/// Half-width in decades around a single-valued extent.
const SINGLE_VALUE_HALF_SPAN: f64 = 0.5;

const TICK_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Layout primitives
// ---------------------------------------------------------------------------

/// A closed interval in log10 space. `lo < hi` always.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogRange {
    pub lo: f64,
    pub hi: f64,
}

impl LogRange {
    /// Autoscale over the finite log10 values, padded by [`MARGIN`].
    fn autoscale(values: impl Iterator<Item = f64>, default: (f64, f64)) -> Self {
        let (min, max) = values
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if !min.is_finite() {
            return LogRange {
                lo: default.0.log10(),
                hi: default.1.log10(),
            };
        }
        let span = max - min;
        if span <= 0.0 {
            return LogRange {
                lo: min - SINGLE_VALUE_HALF_SPAN,
                hi: max + SINGLE_VALUE_HALF_SPAN,
            };
        }
        LogRange {
            lo: min - span * MARGIN,
            hi: max + span * MARGIN,
        }
    }

    /// Grow the range so that it covers `[lo, hi]` as well.
    fn cover(self, lo: f64, hi: f64) -> Self {
        LogRange {
            lo: self.lo.min(lo),
            hi: self.hi.max(hi),
        }
    }

    pub fn contains(&self, log_value: f64) -> bool {
        log_value >= self.lo && log_value <= self.hi
    }
}

/// A labelled tick; `position` is in log10 space.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Label of the tick sitting at `position`, or an empty string.
pub fn label_at(ticks: &[Tick], position: f64) -> String {
    ticks
        .iter()
        .find(|t| (t.position - position).abs() < TICK_TOLERANCE)
        .map(|t| t.label.clone())
        .unwrap_or_default()
}

/// `10^n` with `n` the log10 exponent truncated toward zero.
pub fn format_decade(log_value: f64) -> String {
    format!("10^{}", log_value.trunc() as i32)
}

/// Luminosity axis label for a tick value in solar units.
#[cfg(test)]
pub fn luminosity_tick_label(luminosity: f64) -> String {
    format_decade(luminosity.log10())
}

/// Magnitude axis label for a luminosity tick value, one decimal.
pub fn magnitude_tick_label(luminosity: f64) -> String {
    format!("{:.1}", magnitude_from_luminosity(luminosity))
}

/// One scatter bucket; points are (log10 T, log10 L).
#[derive(Debug, Clone)]
pub struct Series {
    pub class: SpectralClass,
    pub color: Srgb<u8>,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: &'static str,
    /// (log10 T, log10 L)
    pub position: (f64, f64),
}

// ---------------------------------------------------------------------------
// HrChart – everything a backend needs to draw the diagram
// ---------------------------------------------------------------------------

/// Backend-independent layout of the diagram.
///
/// Both axes are logarithmic, so all coordinates are stored as log10 values
/// and backends plot them on linear axes. The temperature axis is drawn
/// reversed (hot on the left); `temperature` itself is stored `lo < hi`.
#[derive(Debug, Clone)]
pub struct HrChart {
    pub title: String,
    pub temperature: LogRange,
    pub luminosity: LogRange,
    /// Bottom axis.
    pub temperature_ticks: Vec<Tick>,
    /// Top axis.
    pub class_ticks: Vec<Tick>,
    /// Left axis.
    pub luminosity_ticks: Vec<Tick>,
    /// Right axis, same positions as `luminosity_ticks`.
    pub magnitude_ticks: Vec<Tick>,
    /// One entry per class in O..M order, empty buckets included.
    pub series: Vec<Series>,
    pub annotations: Vec<Annotation>,
}

impl HrChart {
    pub fn build(records: &[StarRecord], title: &str) -> Self {
        // Fixed temperature ticks widen the axis so all of them are visible.
        let (tick_lo, tick_hi) = TEMPERATURE_TICKS
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(t, _)| {
                (lo.min(t.log10()), hi.max(t.log10()))
            });
        let temperature = LogRange::autoscale(
            records.iter().map(|r| r.effective_temperature().log10()),
            DEFAULT_TEMPERATURE,
        )
        .cover(tick_lo, tick_hi);
        let luminosity = LogRange::autoscale(
            records.iter().map(|r| r.luminosity().log10()),
            DEFAULT_LUMINOSITY,
        );

        let temperature_ticks = fixed_ticks(
            TEMPERATURE_TICKS.iter().map(|&(t, label)| (t, label.to_string())),
            &temperature,
        );
        let class_ticks = fixed_ticks(
            SpectralClass::ALL
                .iter()
                .map(|c| (c.boundary_temperature(), c.letter().to_string())),
            &temperature,
        );

        let decades: Vec<i32> = (luminosity.lo.ceil() as i32..=luminosity.hi.floor() as i32).collect();
        let luminosity_ticks = decades
            .iter()
            .map(|&n| Tick {
                position: n as f64,
                label: format_decade(n as f64),
            })
            .collect();
        let magnitude_ticks = decades
            .iter()
            .map(|&n| Tick {
                position: n as f64,
                label: magnitude_tick_label(10f64.powi(n)),
            })
            .collect();

        let series = SpectralClass::ALL
            .iter()
            .map(|&class| Series {
                class,
                color: class_color(class),
                points: records
                    .iter()
                    .filter(|r| r.class() == class)
                    .map(|r| (r.effective_temperature().log10(), r.luminosity().log10()))
                    .filter(|(x, y)| x.is_finite() && y.is_finite())
                    .collect(),
            })
            .collect();

        let annotations = ANNOTATIONS
            .iter()
            .map(|&(text, t, l)| Annotation {
                text,
                position: (t.log10(), l.log10()),
            })
            .collect();

        HrChart {
            title: title.to_string(),
            temperature,
            luminosity,
            temperature_ticks,
            class_ticks,
            luminosity_ticks,
            magnitude_ticks,
            series,
            annotations,
        }
    }

    /// Number of plotted points across all buckets.
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Literal ticks that fall inside `range`, in table order.
///
/// The temperature range always covers the bottom-axis table, so this only
/// ever trims class boundaries if that table changes.
fn fixed_ticks(table: impl Iterator<Item = (f64, String)>, range: &LogRange) -> Vec<Tick> {
    table
        .map(|(value, label)| Tick {
            position: value.log10(),
            label,
        })
        .filter(|t| range.contains(t.position))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::clean;
    use crate::data::model::CatalogRow;
    use crate::data::transform::transform;

    fn labels(ticks: &[Tick]) -> Vec<&str> {
        ticks.iter().map(|t| t.label.as_str()).collect()
    }

    fn sample_chart() -> HrChart {
        // Teff spans roughly 2700 K .. 17800 K, L spans 1e-3 .. 1e6 L☉
        let rows = vec![
            CatalogRow::new(-0.33, -9.0, "O9I"),
            CatalogRow::new(-0.2, -3.0, "B2V"),
            CatalogRow::new(0.0, 0.6, "A0V"),
            CatalogRow::new(0.65, 4.83, "G2V"),
            CatalogRow::new(1.2, -1.0, "K2III"),
            CatalogRow::new(2.5, 12.0, "M5V"),
        ];
        let (stars, _) = clean(&rows);
        HrChart::build(&transform(stars), "HR")
    }

    #[test]
    fn decade_labels_truncate_toward_zero() {
        assert_eq!(luminosity_tick_label(1e4), "10^4");
        assert_eq!(luminosity_tick_label(1.0), "10^0");
        assert_eq!(luminosity_tick_label(5e3), "10^3");
        assert_eq!(luminosity_tick_label(0.5), "10^0");
        assert_eq!(format_decade(-2.0), "10^-2");
        assert_eq!(format_decade(-2.7), "10^-2");
    }

    #[test]
    fn magnitude_labels_have_one_decimal() {
        assert_eq!(magnitude_tick_label(1.0), "4.8");
        assert_eq!(magnitude_tick_label(100.0), "-0.2");
        assert_eq!(magnitude_tick_label(1e-2), "9.8");
    }

    #[test]
    fn wide_range_shows_every_fixed_tick() {
        let chart = sample_chart();
        assert_eq!(
            labels(&chart.temperature_ticks),
            vec!["4×10⁴", "2×10⁴", "10⁴", "5×10³", "3×10³"]
        );
        assert_eq!(
            labels(&chart.class_ticks),
            vec!["O", "B", "A", "F", "G", "K", "M"]
        );
        assert_eq!(chart.class_ticks[4].position, 5_800f64.log10());
    }

    #[test]
    fn luminosity_ticks_are_whole_decades_inside_range() {
        let chart = sample_chart();
        assert!(!chart.luminosity_ticks.is_empty());
        for (l, m) in chart.luminosity_ticks.iter().zip(&chart.magnitude_ticks) {
            assert_eq!(l.position, m.position);
            assert_eq!(l.position.fract(), 0.0);
            assert!(chart.luminosity.contains(l.position));
            assert_eq!(l.label, format!("10^{}", l.position as i32));
        }
        assert_eq!(label_at(&chart.luminosity_ticks, 0.0), "10^0");
        assert_eq!(label_at(&chart.magnitude_ticks, 0.0), "4.8");
        assert_eq!(label_at(&chart.magnitude_ticks, 0.5), "");
    }

    #[test]
    fn narrow_data_still_shows_every_fixed_tick() {
        let rows = vec![
            CatalogRow::new(0.6, 4.0, "G0V"),
            CatalogRow::new(0.7, 5.0, "G5V"),
        ];
        let (stars, _) = clean(&rows);
        let chart = HrChart::build(&transform(stars), "HR");
        assert_eq!(chart.temperature.lo, 3_000f64.log10());
        assert_eq!(chart.temperature.hi, 40_000f64.log10());
        assert_eq!(chart.temperature_ticks.len(), 5);
        assert_eq!(chart.class_ticks.len(), 7);
    }

    #[test]
    fn buckets_follow_class_order_and_keep_empty_ones() {
        let chart = sample_chart();
        let order: Vec<SpectralClass> = chart.series.iter().map(|s| s.class).collect();
        assert_eq!(order, SpectralClass::ALL.to_vec());
        let f = &chart.series[3];
        assert_eq!(f.class, SpectralClass::F);
        assert!(f.points.is_empty());
        assert_eq!(chart.point_count(), 6);
    }

    #[test]
    fn temperature_range_is_padded_data_extent_or_tick_span() {
        let chart = sample_chart();
        let xs: Vec<f64> = chart
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.0))
            .collect();
        let min = xs.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let pad = (max - min) * 0.05;
        // coolest star sits below 3000 K, hottest well below 40000 K
        assert!((chart.temperature.lo - (min - pad)).abs() < 1e-12);
        assert_eq!(chart.temperature.hi, 40_000f64.log10());
    }

    #[test]
    fn empty_input_uses_default_extent() {
        let chart = HrChart::build(&[], "HR");
        assert_eq!(chart.temperature.lo, 2_000f64.log10());
        assert_eq!(chart.luminosity.hi, 6.0);
        assert_eq!(chart.point_count(), 0);
        assert_eq!(chart.series.len(), 7);
    }

    #[test]
    fn single_star_gets_a_one_decade_window() {
        let (stars, _) = clean(&[CatalogRow::new(0.65, 4.83, "G2V")]);
        let chart = HrChart::build(&transform(stars), "HR");
        assert!((chart.luminosity.hi - chart.luminosity.lo - 1.0).abs() < 1e-12);
        assert_eq!(labels(&chart.luminosity_ticks), vec!["10^0"]);
    }

    #[test]
    fn annotations_are_fixed() {
        let chart = HrChart::build(&[], "HR");
        let texts: Vec<&str> = chart.annotations.iter().map(|a| a.text).collect();
        assert_eq!(texts, vec!["Main Sequence", "Red Giants", "Supergiants"]);
        assert_eq!(chart.annotations[2].position, (4.0, 6.0));
    }
}
