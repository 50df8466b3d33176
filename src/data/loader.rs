//! CSV Data Loader Module
//! Validates the delimited file's structure, then loads it with Polars.

use super::Dataset;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Input file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Input file {0} has no header row")]
    MissingHeader(PathBuf),
    #[error("Malformed CSV at line {line}: {reason}")]
    Malformed { line: u64, reason: String },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row into a [`Dataset`].
    pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }

        Self::validate_structure(path)?;

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let dataset = Dataset::from_frame(df, path);
        log::info!(
            "Loaded {} ({} rows, {} columns)",
            dataset.source().display(),
            dataset.row_count(),
            dataset.column_count()
        );
        Ok(dataset)
    }

    /// Reject files without a header or with rows whose field count differs from it.
    fn validate_structure(path: &Path) -> Result<(), LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_path(path)
            .map_err(|e| Self::csv_error(path, e))?;

        let header = reader
            .headers()
            .map_err(|e| Self::csv_error(path, e))?
            .clone();
        if header.is_empty() || header.iter().all(|name| name.trim().is_empty()) {
            return Err(LoadError::MissingHeader(path.to_path_buf()));
        }

        let mut record = csv::StringRecord::new();
        loop {
            match reader.read_record(&mut record) {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => return Err(Self::csv_error(path, e)),
            }
        }

        Ok(())
    }

    fn csv_error(path: &Path, err: csv::Error) -> LoadError {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(source) => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => LoadError::Malformed {
                line,
                reason: format!("expected {} fields, found {}", expected_len, len),
            },
            other => LoadError::Malformed {
                line,
                reason: format!("{:?}", other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{scratch_dir, write_csv, SAMPLE_CSV};

    #[test]
    fn loads_header_and_rows() {
        let path = write_csv("loader-ok", SAMPLE_CSV);
        let ds = DataLoader::load_csv(&path).unwrap();
        assert_eq!(ds.row_count(), 6);
        assert_eq!(ds.column_count(), 5);
        assert_eq!(ds.source(), path.as_path());
    }

    #[test]
    fn missing_file_is_not_found() {
        let path = scratch_dir("loader-missing").join("nope.csv");
        assert!(matches!(
            DataLoader::load_csv(&path),
            Err(LoadError::NotFound(p)) if p == path
        ));
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let path = write_csv("loader-ragged", "a,b,c\n1,2,3\n4,5\n");
        match DataLoader::load_csv(&path) {
            Err(LoadError::Malformed { line, reason }) => {
                assert_eq!(line, 3);
                assert!(reason.contains("expected 3 fields, found 2"));
            }
            other => panic!("expected Malformed, got {:?}", other.map(|d| d.row_count())),
        }
    }

    #[test]
    fn empty_file_has_no_header() {
        let path = write_csv("loader-empty", "");
        assert!(matches!(
            DataLoader::load_csv(&path),
            Err(LoadError::MissingHeader(_))
        ));
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let path = write_csv("loader-header-only", "a,b\n");
        let ds = DataLoader::load_csv(&path).unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.column_count(), 2);
    }
}
