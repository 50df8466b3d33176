//! In-memory Dataset
//! Immutable wrapper around the loaded DataFrame with typed column access.

use polars::prelude::*;
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),
    #[error("Column '{column}' has an unusable type: {source}")]
    InvalidColumn {
        column: String,
        source: PolarsError,
    },
}

/// One field-name → value mapping per row, as handed to the page.
pub type RecordMap = Map<String, Value>;

/// Loaded table: ordered rows plus ordered column names.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    columns: Vec<String>,
    source: PathBuf,
}

impl Dataset {
    pub fn from_frame(df: DataFrame, source: impl Into<PathBuf>) -> Self {
        let columns = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self {
            df,
            columns,
            source: source.into(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Names of integer and float columns, in declaration order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.df
            .get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }

    fn column(&self, name: &str) -> Result<&Column, SchemaError> {
        self.df
            .column(name)
            .map_err(|_| SchemaError::MissingColumn(name.to_string()))
    }

    fn cast(&self, name: &str, dtype: &DataType) -> Result<Column, SchemaError> {
        self.column(name)?
            .cast(dtype)
            .map_err(|source| SchemaError::InvalidColumn {
                column: name.to_string(),
                source,
            })
    }

    fn invalid(name: &str) -> impl Fn(PolarsError) -> SchemaError + '_ {
        move |source| SchemaError::InvalidColumn {
            column: name.to_string(),
            source,
        }
    }

    /// Column values as `f64`, `None` for missing cells.
    pub fn f64_values(&self, name: &str) -> Result<Vec<Option<f64>>, SchemaError> {
        let col = self.cast(name, &DataType::Float64)?;
        let ca = col.f64().map_err(Self::invalid(name))?;
        Ok(ca.into_iter().collect())
    }

    /// Column values as `i64`, `None` for missing cells.
    pub fn i64_values(&self, name: &str) -> Result<Vec<Option<i64>>, SchemaError> {
        let col = self.cast(name, &DataType::Int64)?;
        let ca = col.i64().map_err(Self::invalid(name))?;
        Ok(ca.into_iter().collect())
    }

    /// Column values rendered as text, `None` for missing cells.
    pub fn string_values(&self, name: &str) -> Result<Vec<Option<String>>, SchemaError> {
        let col = self.cast(name, &DataType::String)?;
        let ca = col.str().map_err(Self::invalid(name))?;
        Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
    }

    /// Rows as field-name → value mappings; missing cells become `null`.
    pub fn records(&self) -> Vec<RecordMap> {
        let mut records = vec![RecordMap::new(); self.row_count()];

        for col in self.df.get_columns() {
            let name = col.name().to_string();
            for (i, record) in records.iter_mut().enumerate() {
                let value = col.get(i).map(any_to_json).unwrap_or(Value::Null);
                record.insert(name.clone(), value);
            }
        }

        records
    }
}

fn float_value(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

fn any_to_json(value: AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => v.into(),
        AnyValue::Int16(v) => v.into(),
        AnyValue::Int32(v) => v.into(),
        AnyValue::Int64(v) => v.into(),
        AnyValue::UInt8(v) => v.into(),
        AnyValue::UInt16(v) => v.into(),
        AnyValue::UInt32(v) => v.into(),
        AnyValue::UInt64(v) => v.into(),
        AnyValue::Float32(v) => float_value(v as f64),
        AnyValue::Float64(v) => float_value(v),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        other => Value::String(other.to_string().trim_matches('"').to_string()),
    }
}
