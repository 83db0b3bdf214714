// 📤 CSV Serializer - Records back into CSV text
//
// Output always starts with the canonical header, even with no records.

use crate::error::{MergeError, Result};
use crate::record::{Record, COLUMNS};
use csv::WriterBuilder;

pub fn serialize_records(records: &[Record]) -> Result<String> {
    // Header is written by hand: serde's automatic header only appears
    // once a first record is serialized
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer
        .write_record(COLUMNS)
        .map_err(|e| MergeError::Serialize(e.to_string()))?;

    for record in records {
        writer
            .serialize(record)
            .map_err(|e| MergeError::Serialize(format!("record '{}': {e}", record.key())))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| MergeError::Serialize(e.into_error().to_string()))?;

    String::from_utf8(bytes).map_err(|e| MergeError::Serialize(e.to_string()))
}
