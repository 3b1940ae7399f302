//! Delimited-file reader with encoding and delimiter auto-detection.
//!
//! Converts one delimited text file into a [`Table`]. No label-specific
//! logic here; the packed `categories` column is expanded later by
//! [`crate::transform::categories`].
//!
//! Field parsing goes through the `csv` crate so that quoted free-text
//! content (embedded delimiters, newlines, doubled quotes) survives intact.

use serde_json::Value;
use std::path::Path;

use crate::error::{InputError, InputResult};
use crate::table::Table;

/// Result of reading one file, with detection metadata.
#[derive(Debug, Clone)]
pub struct ParsedFile {
    /// The parsed table.
    pub table: Table,
    /// Detected or used encoding.
    pub encoding: String,
    /// Detected or used delimiter.
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let (charset, _confidence, _lang) = chardet::detect(bytes);

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the specified encoding.
pub fn decode_content(bytes: &[u8], encoding: &str) -> InputResult<String> {
    match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => Ok(String::from_utf8(bytes.to_vec())
            .unwrap_or_else(|_| String::from_utf8_lossy(bytes).to_string())),
        // WHATWG maps ISO-8859-1 onto windows-1252
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            Ok(encoding_rs::WINDOWS_1252.decode(bytes).0.to_string())
        }
        other => String::from_utf8(bytes.to_vec()).map_err(|e| InputError::EncodingError {
            encoding: other.to_string(),
            message: e.to_string(),
        }),
    }
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [',', ';', '\t', '|'];
    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Read a delimited file into a table, auto-detecting encoding and
/// (unless given) the delimiter.
///
/// # Example
/// ```ignore
/// let parsed = read_file("messages.csv", None)?;
/// println!("Encoding: {}, Delimiter: '{}'", parsed.encoding, parsed.delimiter);
/// println!("Rows: {}", parsed.table.len());
/// ```
pub fn read_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> InputResult<ParsedFile> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;

    let encoding = detect_encoding(&bytes);
    let content = decode_content(&bytes, &encoding)?;

    if content.trim().is_empty() {
        return Err(InputError::EmptyFile(path.display().to_string()));
    }

    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));
    let table = parse_str(&content, delimiter)?;

    Ok(ParsedFile {
        table,
        encoding,
        delimiter,
    })
}

/// Parse delimited content with an explicit delimiter.
///
/// The first record provides column names. Rows with a field count that
/// differs from the header are a parse failure.
pub fn parse_str(content: &str, delimiter: char) -> InputResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut table = Table::new(columns);
    for record in reader.records() {
        let record = record?;
        table.push_row(
            record
                .iter()
                .map(|field| Value::String(field.to_string()))
                .collect(),
        );
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_simple_csv() {
        let table = parse_str("id,message\n1,help\n2,water", ',').unwrap();

        assert_eq!(table.columns(), ["id", "message"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, "message"), Some(&json!("help")));
        assert_eq!(table.cell(1, "id"), Some(&json!("2")));
    }

    #[test]
    fn test_quoted_field_with_embedded_delimiter() {
        let csv = "id,message\n1,\"we need water, food and shelter\"";
        let table = parse_str(csv, ',').unwrap();

        assert_eq!(
            table.cell(0, "message"),
            Some(&json!("we need water, food and shelter"))
        );
    }

    #[test]
    fn test_quoted_field_with_embedded_newline() {
        let csv = "id,message\n1,\"line one\nline two\"";
        let table = parse_str(csv, ',').unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, "message"), Some(&json!("line one\nline two")));
    }

    #[test]
    fn test_inconsistent_field_count_is_error() {
        let result = parse_str("a,b\n1,2,3", ',');
        assert!(matches!(result, Err(InputError::ParseError(_))));
    }

    #[test]
    fn test_detect_delimiter_comma() {
        assert_eq!(detect_delimiter("a,b,c\n1,2,3"), ',');
    }

    #[test]
    fn test_detect_delimiter_semicolon() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), ';');
    }

    #[test]
    fn test_detect_delimiter_tab() {
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3"), '\t');
    }

    #[test]
    fn test_detect_encoding_utf8() {
        assert_eq!(detect_encoding("id,message\n1,hello".as_bytes()), "utf-8");
    }

    #[test]
    fn test_latin1_decoding() {
        // "Société" in ISO-8859-1
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        let decoded = decode_content(bytes, "iso-8859-1").unwrap();
        assert_eq!(decoded, "Société");
    }

    #[test]
    fn test_read_file_auto() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "id,message,genre").unwrap();
        writeln!(f, "1,help,direct").unwrap();

        let parsed = read_file(&path, None).unwrap();
        assert_eq!(parsed.encoding, "utf-8");
        assert_eq!(parsed.delimiter, ',');
        assert_eq!(parsed.table.len(), 1);
        assert_eq!(parsed.table.columns(), ["id", "message", "genre"]);
    }

    #[test]
    fn test_read_file_missing() {
        let result = read_file("/nonexistent/messages.csv", None);
        assert!(matches!(result, Err(InputError::IoError(_))));
    }

    #[test]
    fn test_read_file_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::File::create(&path).unwrap();

        let result = read_file(&path, None);
        assert!(matches!(result, Err(InputError::EmptyFile(_))));
    }
}
