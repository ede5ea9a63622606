use super::{ParseError, RawRecord, UploadFormat};
use serde_json::Value as JsonValue;
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// Decodes an uploaded buffer into raw records, one per data row or array element.
///
/// Pure and deterministic: identical bytes always produce identical records.
pub fn parse(buffer: &[u8], format: UploadFormat) -> Result<Vec<RawRecord>, ParseError> {
    let text = std::str::from_utf8(buffer)
        .map_err(|e| ParseError::malformed(format, format!("file is not valid UTF-8: {}", e)))?;
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let records = match format {
        UploadFormat::Json => parse_json(text)?,
        UploadFormat::Csv => parse_csv(text)?,
    };
    debug!(format = %format, records = records.len(), "decoded upload");
    Ok(records)
}

fn parse_json(text: &str) -> Result<Vec<RawRecord>, ParseError> {
    let value: JsonValue = serde_json::from_str(text)
        .map_err(|e| ParseError::malformed(UploadFormat::Json, e.to_string()))?;

    let JsonValue::Array(elements) = value else {
        return Err(ParseError::malformed(
            UploadFormat::Json,
            "top-level value must be an array of objects",
        ));
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(idx, element)| match element {
            JsonValue::Object(map) => Ok(map),
            _ => Err(ParseError::malformed(
                UploadFormat::Json,
                format!("element {} is not an object", idx + 1),
            )),
        })
        .collect()
}

fn parse_csv(text: &str) -> Result<Vec<RawRecord>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ParseError::malformed(UploadFormat::Csv, e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| ParseError::malformed(UploadFormat::Csv, e.to_string()))?;
        let mut record = RawRecord::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if header.is_empty() {
                continue;
            }
            record.insert(header.clone(), JsonValue::String(cell.to_string()));
        }
        records.push(record);
    }
    Ok(records)
}
