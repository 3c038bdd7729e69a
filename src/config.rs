use std::path::PathBuf;

/// Catalog read on every run, relative to the working directory.
pub const CATALOG_PATH: &str = "hyg_v42.csv.gz";
/// Vector output written on every run.
pub const OUTPUT_PATH: &str = "HR_diagram_HYG_v42.pdf";
pub const TITLE: &str = "Hertzsprung–Russell Diagram (HYG v42)";
/// 9 × 7 inches at 100 px/in.
pub const FIGURE_SIZE: (u32, u32) = (900, 700);

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// Fixed settings of a run. There is no external configuration source; the
/// struct exists so tests can point the pipeline somewhere else.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub title: String,
    pub figure_size: (u32, u32),
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(CATALOG_PATH),
            output: PathBuf::from(OUTPUT_PATH),
            title: TITLE.to_string(),
            figure_size: FIGURE_SIZE,
        }
    }
}
