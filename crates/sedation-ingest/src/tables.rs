//! Parsing of the `/cases` and `/trks` metadata tables.
//!
//! Both tables are read with every column as text and cast per column, so a
//! stray non-numeric cell becomes a null for that row instead of failing
//! schema inference for the whole table.

use std::io::Cursor;

use polars::prelude::*;
use tracing::{debug, warn};

use sedation_model::{CaseId, CaseRecord, TrackRecord};

use crate::error::{IngestError, Result};

pub const CASE_ID_COLUMN: &str = "caseid";
pub const AGE_COLUMN: &str = "age";
const SUBJECT_ID_COLUMN: &str = "subjectid";
const SEX_COLUMN: &str = "sex";
const HEIGHT_COLUMN: &str = "height";
const WEIGHT_COLUMN: &str = "weight";
pub const TRACK_NAME_COLUMN: &str = "tname";
pub const TRACK_ID_COLUMN: &str = "tid";

const CASES_TABLE: &str = "cases";
const TRACKS_TABLE: &str = "trks";

/// Parses the case table into one record per row with a usable case id.
pub fn parse_case_table(bytes: &[u8]) -> Result<Vec<CaseRecord>> {
    let df = read_table(bytes, CASES_TABLE)?;
    let case_ids = required_f64(&df, CASES_TABLE, CASE_ID_COLUMN)?;
    let ages = required_f64(&df, CASES_TABLE, AGE_COLUMN)?;
    let subject_ids = optional_f64(&df, SUBJECT_ID_COLUMN)?;
    let heights = optional_f64(&df, HEIGHT_COLUMN)?;
    let weights = optional_f64(&df, WEIGHT_COLUMN)?;
    let sexes = optional_str(&df, SEX_COLUMN)?;

    let mut records = Vec::with_capacity(df.height());
    let mut dropped = 0usize;
    for (idx, raw_id) in case_ids.into_iter().enumerate() {
        let Some(case_id) = raw_id.and_then(to_case_id) else {
            dropped += 1;
            continue;
        };
        records.push(CaseRecord {
            case_id,
            subject_id: cell(&subject_ids, idx).and_then(to_integer),
            age: ages.get(idx).copied().flatten().filter(|age| age.is_finite()),
            sex: cell(&sexes, idx),
            height: cell(&heights, idx),
            weight: cell(&weights, idx),
        });
    }
    if dropped > 0 {
        warn!(table = CASES_TABLE, dropped, "rows without a case id were dropped");
    }
    debug!(table = CASES_TABLE, rows = records.len(), "parsed metadata table");
    Ok(records)
}

/// Parses the track table; rows missing a case id, name or track id are dropped.
pub fn parse_track_table(bytes: &[u8]) -> Result<Vec<TrackRecord>> {
    let df = read_table(bytes, TRACKS_TABLE)?;
    let case_ids = required_f64(&df, TRACKS_TABLE, CASE_ID_COLUMN)?;
    let names = required_str(&df, TRACKS_TABLE, TRACK_NAME_COLUMN)?;
    let tids = required_str(&df, TRACKS_TABLE, TRACK_ID_COLUMN)?;

    let mut records = Vec::with_capacity(df.height());
    let mut dropped = 0usize;
    for ((raw_id, name), tid) in case_ids.into_iter().zip(names).zip(tids) {
        match (raw_id.and_then(to_case_id), name, tid) {
            (Some(case_id), Some(name), Some(tid)) if !name.is_empty() && !tid.is_empty() => {
                records.push(TrackRecord::new(case_id, name, tid));
            }
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(table = TRACKS_TABLE, dropped, "incomplete track rows were dropped");
    }
    debug!(table = TRACKS_TABLE, rows = records.len(), "parsed metadata table");
    Ok(records)
}

fn read_table(bytes: &[u8], table: &'static str) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            table,
            message: e.to_string(),
        })
}

fn required_f64(
    df: &DataFrame,
    table: &'static str,
    column: &'static str,
) -> Result<Vec<Option<f64>>> {
    let values = df
        .column(column)
        .map_err(|_| IngestError::MissingColumn { column, table })?;
    column_f64(values)
}

fn optional_f64(df: &DataFrame, column: &str) -> Result<Option<Vec<Option<f64>>>> {
    match df.column(column) {
        Ok(values) => column_f64(values).map(Some),
        Err(_) => Ok(None),
    }
}

fn column_f64(column: &Column) -> Result<Vec<Option<f64>>> {
    let cast = column.cast(&DataType::Float64).map_err(dataframe_error)?;
    let values = cast.f64().map_err(dataframe_error)?;
    Ok(values.into_iter().collect())
}

fn required_str(
    df: &DataFrame,
    table: &'static str,
    column: &'static str,
) -> Result<Vec<Option<String>>> {
    let values = df
        .column(column)
        .map_err(|_| IngestError::MissingColumn { column, table })?;
    column_str(values)
}

fn optional_str(df: &DataFrame, column: &str) -> Result<Option<Vec<Option<String>>>> {
    match df.column(column) {
        Ok(values) => column_str(values).map(Some),
        Err(_) => Ok(None),
    }
}

fn column_str(column: &Column) -> Result<Vec<Option<String>>> {
    let cast = column.cast(&DataType::String).map_err(dataframe_error)?;
    let values = cast.str().map_err(dataframe_error)?;
    Ok(values
        .into_iter()
        .map(|value| value.map(|v| v.trim().to_string()))
        .collect())
}

fn cell<T: Clone>(column: &Option<Vec<Option<T>>>, idx: usize) -> Option<T> {
    column.as_ref()?.get(idx)?.clone()
}

fn to_integer(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

fn to_case_id(value: f64) -> Option<CaseId> {
    to_integer(value).map(CaseId::new)
}

fn dataframe_error(error: PolarsError) -> IngestError {
    IngestError::DataFrame {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_conversion_rejects_fractions() {
        assert_eq!(to_integer(12.0), Some(12));
        assert_eq!(to_integer(12.5), None);
        assert_eq!(to_integer(f64::NAN), None);
    }
}
