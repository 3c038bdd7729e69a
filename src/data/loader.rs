use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use serde::Deserialize;
use thiserror::Error;

use super::model::CatalogRow;

/// Columns every catalog must carry. Anything else in the file is ignored.
pub const REQUIRED_COLUMNS: [&str; 3] = ["ci", "absmag", "spect"];

/// Cell contents treated as "no value", mirroring the usual dataframe readers.
const MISSING_TOKENS: [&str; 7] = ["NaN", "nan", "NA", "N/A", "null", "NULL", "None"];

/// Schema and format failures. All of them abort the run.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unsupported catalog extension: .{0}")]
    UnsupportedExtension(String),

    #[error("catalog is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load catalog rows from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.gz`  – gzip-compressed CSV (the HYG distribution format)
/// * `.csv` – plain CSV
pub fn load_file(path: &Path) -> Result<Vec<CatalogRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let file = || {
        File::open(path)
            .map(BufReader::new)
            .with_context(|| format!("opening catalog {}", path.display()))
    };

    let rows = match ext.as_str() {
        "gz" => load_reader(GzDecoder::new(file()?)),
        "csv" => load_reader(file()?),
        other => return Err(CatalogError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("reading catalog {}", path.display()))?;

    log::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Raw text of the required cells, looked up by header name.
#[derive(Debug, Deserialize)]
struct RawRow {
    ci: Option<String>,
    absmag: Option<String>,
    spect: Option<String>,
}

/// Parse CSV with a header row from any reader.
pub fn load_reader<R: Read>(source: R) -> Result<Vec<CatalogRow>> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::MissingColumn(column).into());
        }
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(CatalogRow {
            ci: parse_number(raw.ci.as_deref(), row_no, "ci")?,
            absmag: parse_number(raw.absmag.as_deref(), row_no, "absmag")?,
            spect: raw.spect.filter(|s| !is_missing(s)),
        });
    }

    Ok(rows)
}

fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || MISSING_TOKENS.contains(&cell)
}

fn parse_number(cell: Option<&str>, row: usize, column: &'static str) -> Result<Option<f64>> {
    let Some(cell) = cell.filter(|c| !is_missing(c)) else {
        return Ok(None);
    };
    let value = cell
        .trim()
        .parse::<f64>()
        .map_err(|_| CatalogError::InvalidNumber {
            row,
            column,
            value: cell.to_string(),
        })?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    const SAMPLE: &str = "\
id,proper,ci,absmag,spect
0,Sol,0.656,4.85,G2V
1,,0.482,2.39,F5
2,,,1.2,K0III
3,,1.1,NaN,K3V
4,,-0.3,-5.0,
";

    #[test]
    fn reads_required_columns_by_name() {
        let rows = load_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], CatalogRow::new(0.656, 4.85, "G2V"));
        assert_eq!(rows[1].spect.as_deref(), Some("F5"));
    }

    #[test]
    fn empty_and_nan_cells_are_missing() {
        let rows = load_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows[2].ci, None);
        assert_eq!(rows[3].absmag, None);
        assert_eq!(rows[4].spect, None);
        assert_eq!(rows[4].ci, Some(-0.3));
    }

    #[test]
    fn column_order_does_not_matter() {
        let text = "spect,absmag,ci\nB1V,-5.0,-0.3\n";
        let rows = load_reader(text.as_bytes()).unwrap();
        assert_eq!(rows, vec![CatalogRow::new(-0.3, -5.0, "B1V")]);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let text = "ci,spect\n0.5,G2V\n";
        let err = load_reader(text.as_bytes()).unwrap_err();
        match err.downcast_ref::<CatalogError>() {
            Some(CatalogError::MissingColumn(col)) => assert_eq!(*col, "absmag"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn garbage_number_is_reported_with_position() {
        let text = "ci,absmag,spect\n0.5,4.0,G2V\nhot,4.0,G2V\n";
        let err = load_reader(text.as_bytes()).unwrap_err();
        match err.downcast_ref::<CatalogError>() {
            Some(CatalogError::InvalidNumber { row, column, value }) => {
                assert_eq!(*row, 1);
                assert_eq!(*column, "ci");
                assert_eq!(value, "hot");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn gzip_and_plain_files_load_the_same_rows() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("catalog.csv");
        std::fs::write(&plain, SAMPLE).unwrap();

        let gz = dir.path().join("catalog.csv.gz");
        let mut encoder = GzEncoder::new(File::create(&gz).unwrap(), Compression::default());
        encoder.write_all(SAMPLE.as_bytes()).unwrap();
        encoder.finish().unwrap();

        assert_eq!(load_file(&plain).unwrap(), load_file(&gz).unwrap());
    }

    #[test]
    fn absent_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_file(&dir.path().join("nope.csv.gz")).unwrap_err();
        assert!(format!("{err:#}").contains("opening catalog"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("stars.parquet")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::UnsupportedExtension(ext)) if ext == "parquet"
        ));
    }
}
