use std::path::PathBuf;

use anyhow::Result;

use crate::chart::HrChart;
use crate::config::PipelineConfig;
use crate::data::filter::{clean, CleanReport};
use crate::data::loader::load_file;
use crate::data::model::CatalogRow;
use crate::data::transform::transform;
use crate::export::write_pdf;

/// What a finished run hands to the viewer.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub chart: HrChart,
    pub report: CleanReport,
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Clean, transform and lay out already-loaded rows.
pub fn prepare(rows: &[CatalogRow], title: &str) -> (HrChart, CleanReport) {
    let (stars, report) = clean(rows);
    log::info!(
        "Retained {} of {} rows, dropped {} ({} incomplete, {} implausible color index, {} unknown class)",
        report.retained,
        report.total,
        report.dropped(),
        report.missing,
        report.out_of_range,
        report.unknown_class
    );

    let records = transform(stars);
    if records.is_empty() {
        log::warn!("No stars left to plot");
    }

    let chart = HrChart::build(&records, title);
    for series in &chart.series {
        log::debug!("class {}: {} stars", series.class, series.points.len());
    }
    (chart, report)
}

/// Load the catalog, build the chart and write the vector file.
///
/// Any failure aborts the run; there is no partial output.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    let rows = load_file(&config.input)?;
    log::info!("Loaded {} rows from {}", rows.len(), config.input.display());

    let (chart, report) = prepare(&rows, &config.title);
    write_pdf(&chart, &config.output, config.figure_size)?;
    log::info!(
        "Plotted {} stars to {}",
        chart.point_count(),
        config.output.display()
    );

    Ok(PipelineOutput {
        chart,
        report,
        input: config.input.clone(),
        output: config.output.clone(),
    })
}
