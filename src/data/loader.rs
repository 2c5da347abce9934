use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::DataType;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Dataset};
use crate::error::EdaError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one record per line (the processed training set)
/// * `.json`    – `[{ "Age (in years)": 63, "Sex": "male", ... }, ...]`
/// * `.parquet` – flat columns of strings, ints, floats or bools
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(EdaError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    info!(
        "loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Every field is typed with [`CellValue::parse`]; a record whose field
/// count differs from the header is rejected by the reader.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if columns.is_empty() {
        bail!("CSV has no header row");
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        rows.push(record.iter().map(CellValue::parse).collect());
    }

    Ok(Dataset::new(columns, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
/// Columns appear in first-seen order; absent keys become null.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map_or(CellValue::Null, json_to_cell))
                .collect()
        })
        .collect();

    Ok(Dataset::new(columns, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::parse(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by **Pandas** (`df.to_parquet()`) or
/// **Polars** (`df.write_parquet()`). Columns are first cast to one of the
/// types [`extract_cell`] reads; a column with no such cast (lists, structs)
/// fails the load.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        debug!("parquet batch with {} rows", batch.num_rows());

        let arrays = batch
            .columns()
            .iter()
            .zip(&columns)
            .map(|(col, name)| {
                normalise_column(col).with_context(|| format!("parquet column '{name}'"))
            })
            .collect::<Result<Vec<_>>>()?;

        for row in 0..batch.num_rows() {
            rows.push(arrays.iter().map(|col| extract_cell(col, row)).collect());
        }
    }

    Ok(Dataset::new(columns, rows))
}

/// Cast a column to Utf8, Int64, Float64 or Boolean unless it already has a
/// type [`extract_cell`] reads.
///
/// Dictionaries (pandas `category`, Polars `Categorical`) are unpacked to
/// their value type first.
fn normalise_column(col: &ArrayRef) -> Result<ArrayRef> {
    let target = match col.data_type() {
        DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Int32
        | DataType::Int64
        | DataType::Float32
        | DataType::Float64
        | DataType::Boolean => return Ok(Arc::clone(col)),
        DataType::Dictionary(_, value_type) => {
            let unpacked = cast(col, value_type).context("unpacking dictionary")?;
            return normalise_column(&unpacked);
        }
        DataType::Int8
        | DataType::Int16
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => DataType::Int64,
        DataType::UInt64
        | DataType::Float16
        | DataType::Decimal128(..)
        | DataType::Decimal256(..) => DataType::Float64,
        _ => DataType::Utf8,
    };

    if !can_cast_types(col.data_type(), &target) {
        bail!("cannot read {:?} as {target:?}", col.data_type());
    }
    Ok(cast(col, &target)?)
}

/// Extract a single cell from a normalised Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map_or(CellValue::Null, |s| CellValue::parse(s.value(row))),
        DataType::LargeUtf8 => CellValue::parse(col.as_string::<i64>().value(row)),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(i64::from(a.value(row)))),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map_or(CellValue::Null, |a| CellValue::Integer(a.value(row))),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map_or(CellValue::Null, |a| float_cell(f64::from(a.value(row)))),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map_or(CellValue::Null, |a| float_cell(a.value(row))),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map_or(CellValue::Null, |a| CellValue::Bool(a.value(row))),
        // normalise_column never yields another type
        _ => CellValue::Null,
    }
}

/// Pandas stores missing floats as NaN rather than as a null slot.
fn float_cell(v: f64) -> CellValue {
    if v.is_nan() {
        CellValue::Null
    } else {
        CellValue::Float(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(ext: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn csv_keeps_header_order_and_types_cells() {
        let file = write_temp("csv", "Sex,Age (in years),Thalassemia\nmale,63,fixed defect\nfemale,41,\n");
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.columns, vec!["Sex", "Age (in years)", "Thalassemia"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0][1], CellValue::Integer(63));
        assert!(ds.rows[1][2].is_null());
    }

    #[test]
    fn csv_with_ragged_row_fails() {
        let file = write_temp("csv", "a,b\n1,2\n3\n");
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn json_records_fill_absent_keys_with_null() {
        let file = write_temp("json", r#"[{"a": 1, "b": "x"}, {"a": 2.5}]"#);
        let ds = load_file(file.path()).unwrap();

        assert_eq!(ds.columns, vec!["a", "b"]);
        assert_eq!(ds.rows[1][0], CellValue::Float(2.5));
        assert!(ds.rows[1][1].is_null());
    }

    #[test]
    fn parquet_reads_dictionary_small_ints_and_nan_as_null() {
        use arrow::array::{DictionaryArray, Int16Array};
        use arrow::datatypes::{Field, Int8Type, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let sex: DictionaryArray<Int8Type> = vec!["male", "female", "male"].into_iter().collect();
        let schema = Arc::new(Schema::new(vec![
            Field::new("Age (in years)", DataType::Int64, true),
            Field::new("ST depression", DataType::Float64, true),
            Field::new(
                "Sex",
                DataType::Dictionary(Box::new(DataType::Int8), Box::new(DataType::Utf8)),
                false,
            ),
            Field::new("Number of major vessels", DataType::Int16, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![Some(63), None, Some(41)])),
                Arc::new(Float64Array::from(vec![Some(2.3), Some(f64::NAN), None])),
                Arc::new(sex),
                Arc::new(Int16Array::from(vec![0i16, 2, 3])),
            ],
        )
        .unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();

        assert_eq!(
            ds.columns,
            vec!["Age (in years)", "ST depression", "Sex", "Number of major vessels"]
        );
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.rows[0][0], CellValue::Integer(63));
        assert!(ds.rows[1][0].is_null());
        assert_eq!(ds.rows[0][1], CellValue::Float(2.3));
        assert!(ds.rows[1][1].is_null(), "NaN float should load as null");
        assert!(ds.rows[2][1].is_null());
        let sexes: Vec<_> = ds.rows.iter().map(|r| r[2].clone()).collect();
        assert_eq!(
            sexes,
            vec![
                CellValue::String("male".into()),
                CellValue::String("female".into()),
                CellValue::String("male".into()),
            ]
        );
        assert_eq!(ds.rows[1][3], CellValue::Integer(2));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = write_temp("xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(err
            .chain()
            .any(|e| e.to_string().contains("unsupported file extension")));
    }
}
