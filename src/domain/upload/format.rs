use std::fmt;

/// Encoding of an uploaded menu file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Csv,
    Json,
}

impl UploadFormat {
    /// Picks the format from the declared MIME type, falling back to the file name suffix.
    ///
    /// The content itself is never inspected.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<Self> {
        if let Some(format) = content_type.and_then(Self::from_mime) {
            return Some(format);
        }
        file_name.and_then(Self::from_file_name)
    }

    fn from_mime(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/json" => Some(Self::Json),
            // Browsers on Windows report CSV files as Excel documents.
            "text/csv" | "application/vnd.ms-excel" => Some(Self::Csv),
            _ => None,
        }
    }

    fn from_file_name(file_name: &str) -> Option<Self> {
        let lower = file_name.trim().to_ascii_lowercase();
        if lower.ends_with(".json") {
            Some(Self::Json)
        } else if lower.ends_with(".csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

impl fmt::Display for UploadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadFormat::Csv => f.write_str("CSV"),
            UploadFormat::Json => f.write_str("JSON"),
        }
    }
}
