use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use serde_json::Value as JsonValue;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

use crate::data::column::DataRecord;
use crate::data::datavalue::DataValue;
use crate::data::type_inference::{InferredType, TypeInference};

/// Number of rows sampled per column for type inference
const TYPE_SAMPLE_SIZE: usize = 100;

/// Records read from a file, with the column names in file order
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub columns: Vec<String>,
    pub records: Vec<DataRecord>,
}

impl LoadedRecords {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load a `.json` or `.csv` file based on its extension
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<LoadedRecords> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => load_json_records(path),
        Some(ext) if ext.eq_ignore_ascii_case("csv") => load_csv_records(path),
        _ => bail!("Unsupported file type: {:?} (expected .csv or .json)", path),
    }
}

/// Load a CSV file; each column's type is inferred from a sample of rows
pub fn load_csv_records<P: AsRef<Path>>(path: P) -> Result<LoadedRecords> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open CSV file: {:?}", path.as_ref()))?;

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut string_rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        string_rows.push(record.iter().map(|s| s.to_string()).collect::<Vec<String>>());
    }

    let column_types: Vec<InferredType> = (0..columns.len())
        .map(|col_idx| {
            TypeInference::infer_from_samples(
                string_rows
                    .iter()
                    .take(TYPE_SAMPLE_SIZE)
                    .filter_map(|row| row.get(col_idx))
                    .map(|value| value.as_str()),
            )
        })
        .collect();
    debug!("CSV column types: {:?}", column_types);

    let records = string_rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .enumerate()
                .map(|(col_idx, name)| {
                    let raw = row.get(col_idx).map(|s| s.as_str()).unwrap_or("");
                    (name.clone(), typed_cell(raw, column_types[col_idx]))
                })
                .collect::<DataRecord>()
        })
        .collect::<Vec<_>>();

    info!(
        "Loaded {} records with {} columns from {:?}",
        records.len(),
        columns.len(),
        path.as_ref()
    );
    Ok(LoadedRecords { columns, records })
}

/// Convert a cell according to its column's inferred type
///
/// Text columns keep every cell as text so codes like "00123" survive.
fn typed_cell(raw: &str, column_type: InferredType) -> DataValue {
    if raw.is_empty() {
        return DataValue::Null;
    }
    match column_type {
        InferredType::String => DataValue::String(raw.to_string()),
        _ => TypeInference::infer_value(raw),
    }
}

/// Load a JSON file holding an array of objects
///
/// Column names come from the first object.
pub fn load_json_records<P: AsRef<Path>>(path: P) -> Result<LoadedRecords> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open JSON file: {:?}", path.as_ref()))?;
    let reader = BufReader::new(file);

    let json_data: Vec<JsonValue> =
        serde_json::from_reader(reader).with_context(|| "Failed to parse JSON file")?;

    let Some(first) = json_data.first() else {
        return Ok(LoadedRecords::default());
    };

    let columns: Vec<String> = first
        .as_object()
        .context("JSON data must be an array of objects")?
        .keys()
        .cloned()
        .collect();

    let mut records = Vec::with_capacity(json_data.len());
    for (idx, item) in json_data.iter().enumerate() {
        let obj = item
            .as_object()
            .with_context(|| format!("JSON element {} is not an object", idx))?;
        let record: DataRecord = obj
            .iter()
            .map(|(key, value)| (key.clone(), DataValue::from_json(value)))
            .collect();
        records.push(record);
    }

    info!(
        "Loaded {} records with {} columns from {:?}",
        records.len(),
        columns.len(),
        path.as_ref()
    );
    Ok(LoadedRecords { columns, records })
}
