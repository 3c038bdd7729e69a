use std::path::PathBuf;

use crate::chart::HrChart;
use crate::data::filter::CleanReport;
use crate::pipeline::PipelineOutput;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// Everything the viewer shows, independent of rendering. Built once from a
/// finished pipeline run and never changed afterwards.
pub struct AppState {
    pub chart: HrChart,
    pub report: CleanReport,
    /// Catalog the chart was built from.
    pub input: PathBuf,
    /// Vector file already written for this chart.
    pub output: PathBuf,
}

impl From<PipelineOutput> for AppState {
    fn from(run: PipelineOutput) -> Self {
        Self {
            chart: run.chart,
            report: run.report,
            input: run.input,
            output: run.output,
        }
    }
}

impl AppState {
    /// Star count per class, in plotting order.
    pub fn class_counts(&self) -> Vec<(String, usize)> {
        self.chart
            .series
            .iter()
            .map(|s| (s.class.to_string(), s.points.len()))
            .collect()
    }
}
