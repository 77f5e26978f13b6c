//! Loader
//!
//! Reads delimited text files into a [`Table`]. The first line holds the
//! column names and the last column is the label. When no delimiter is
//! configured it is guessed from the header line.
use crate::constants::{DEFAULT_DELIMITER, DELIMITER_CANDIDATES};
use crate::data::Table;
use crate::errors::Id3Error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options for reading a dataset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Field delimiter, detected from the header line when `None`.
    #[serde(default)]
    pub delimiter: Option<char>,
    /// Lowercase every value below the header.
    #[serde(default)]
    pub lowercase_values: bool,
}

impl LoaderConfig {
    pub fn set_delimiter(mut self, delimiter: Option<char>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn set_lowercase_values(mut self, lowercase_values: bool) -> Self {
        self.lowercase_values = lowercase_values;
        self
    }

    fn delimiter_for(&self, header_line: &str) -> Result<u8, Id3Error> {
        match self.delimiter {
            None => Ok(detect_delimiter(header_line)),
            Some(c) if c.is_ascii() => Ok(c as u8),
            Some(c) => Err(Id3Error::InvalidParameter(
                "delimiter".to_string(),
                "a single ASCII character".to_string(),
                c.to_string(),
            )),
        }
    }
}

/// First of `,` `;` tab, space and `.` found in `header_line`, `,` otherwise.
pub fn detect_delimiter(header_line: &str) -> u8 {
    DELIMITER_CANDIDATES
        .iter()
        .copied()
        .find(|d| header_line.as_bytes().contains(d))
        .unwrap_or(DEFAULT_DELIMITER)
}

/// Read a dataset from `path`.
pub fn read_table<P: AsRef<Path>>(path: P, cfg: &LoaderConfig) -> Result<Table, Id3Error> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).map_err(|e| Id3Error::UnableToRead(format!("{}: {}", path.display(), e)))?;
    parse_table(&text, cfg)
}

/// Parse a dataset held in memory.
pub fn parse_table(text: &str, cfg: &LoaderConfig) -> Result<Table, Id3Error> {
    let header_line = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or(Id3Error::EmptyDataset)?;
    let delimiter = cfg.delimiter_for(header_line)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Id3Error::UnableToRead(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| Id3Error::UnableToRead(e.to_string()))?;
        if record.len() != headers.len() {
            let line = record.position().map_or(i + 2, |p| p.line() as usize);
            return Err(Id3Error::RowLength {
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }
        let row = record
            .iter()
            .map(|v| {
                if cfg.lowercase_values {
                    v.to_lowercase()
                } else {
                    v.to_string()
                }
            })
            .collect();
        rows.push(row);
    }
    Table::new(headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a,b;c"), b',');
        assert_eq!(detect_delimiter("a;b\tc"), b';');
        assert_eq!(detect_delimiter("a\tb c"), b'\t');
        assert_eq!(detect_delimiter("age tear-prod-rate"), b' ');
        assert_eq!(detect_delimiter("a.b"), b'.');
        assert_eq!(detect_delimiter("single"), b',');
    }

    #[test]
    fn test_read_weather() {
        let table = read_table("resources/weather.csv", &LoaderConfig::default()).unwrap();
        assert_eq!(table.headers().len(), 5);
        assert_eq!(table.label_name(), "Play");
        assert_eq!(table.n_rows(), 14);
        assert_eq!(table.rows()[0], vec!["Sunny", "Hot", "High", "False", "No"]);
    }

    #[test]
    fn test_read_space_and_semicolon() {
        let lenses = read_table("resources/contact_lenses.txt", &LoaderConfig::default()).unwrap();
        assert_eq!(lenses.n_rows(), 24);
        assert_eq!(lenses.label_name(), "contact-lenses");
        assert_eq!(lenses.rows()[8][0], "pre-presbyopic");

        let conflicts = read_table("resources/conflicts.csv", &LoaderConfig::default()).unwrap();
        assert_eq!(conflicts.headers(), &["Outlook", "Wind", "Play"]);
        assert_eq!(conflicts.n_rows(), 5);
    }

    #[test]
    fn test_parse_trims_and_lowercases() {
        let text = "Outlook , Play\n Sunny , No\nRAIN,Yes\n";
        let table = parse_table(text, &LoaderConfig::default()).unwrap();
        assert_eq!(table.headers(), &["Outlook", "Play"]);
        assert_eq!(table.rows()[0], vec!["Sunny", "No"]);

        let cfg = LoaderConfig::default().set_lowercase_values(true);
        let table = parse_table(text, &cfg).unwrap();
        assert_eq!(table.headers(), &["Outlook", "Play"]);
        assert_eq!(table.rows()[1], vec!["rain", "yes"]);
    }

    #[test]
    fn test_parse_explicit_delimiter() {
        let text = "a|b|y\n1|2|Yes\n";
        let table = parse_table(text, &LoaderConfig::default().set_delimiter(Some('|'))).unwrap();
        assert_eq!(table.n_features(), 2);
        let err = parse_table(text, &LoaderConfig::default().set_delimiter(Some('§'))).unwrap_err();
        assert!(matches!(err, Id3Error::InvalidParameter(..)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_table("", &LoaderConfig::default()),
            Err(Id3Error::EmptyDataset)
        ));
        assert!(matches!(
            parse_table("a,y\n", &LoaderConfig::default()),
            Err(Id3Error::EmptyDataset)
        ));
        assert!(matches!(
            parse_table("y\nYes\n", &LoaderConfig::default()),
            Err(Id3Error::TooFewColumns(1))
        ));
        let err = parse_table("a,b,y\n1,2,Yes\n1,No\n", &LoaderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Id3Error::RowLength {
                line: 3,
                expected: 3,
                found: 2
            }
        ));
        assert!(matches!(
            read_table("resources/does_not_exist.csv", &LoaderConfig::default()),
            Err(Id3Error::UnableToRead(_))
        ));
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("data.tsv");
        fs::write(&file_path, "Color\tSize\tClass\nred\tbig\tA\nblue\tsmall\tB\n").unwrap();
        let table = read_table(&file_path, &LoaderConfig::default()).unwrap();
        assert_eq!(table.rows()[1], vec!["blue", "small", "B"]);
    }

    #[test]
    fn test_loader_config_serde() {
        let cfg: LoaderConfig = serde_json::from_str(r#"{"delimiter": ";"}"#).unwrap();
        assert_eq!(cfg.delimiter, Some(';'));
        assert!(!cfg.lowercase_values);
    }
}
