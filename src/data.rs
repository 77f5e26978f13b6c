//! Data
//!
//! The in-memory dataset consumed by tree induction. A [`Table`] is a list of
//! column names and a list of string records; the last column holds the label.
use crate::errors::Id3Error;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// A record of the table, one value per header.
pub type Row = [String];

/// Tabular dataset of categorical values.
///
/// Built once from a data source and never mutated afterwards. Induction only
/// ever reads borrowed subsets of [`Table::rows`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableParts")]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Deserialized form of a [`Table`], checked by [`Table::new`].
#[derive(Deserialize)]
struct TableParts {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TryFrom<TableParts> for Table {
    type Error = Id3Error;

    fn try_from(parts: TableParts) -> Result<Self, Self::Error> {
        Table::new(parts.headers, parts.rows)
    }
}

impl Table {
    /// Create a table, checking that there is at least one feature column next
    /// to the label, at least one record, and that every record is complete.
    ///
    /// * `headers` - Column names, the last one is the label.
    /// * `rows` - Records, each of length `headers.len()`.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, Id3Error> {
        if headers.len() < 2 {
            return Err(Id3Error::TooFewColumns(headers.len()));
        }
        if rows.is_empty() {
            return Err(Id3Error::EmptyDataset);
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != headers.len()) {
            return Err(Id3Error::RowLength {
                line: i + 2,
                expected: headers.len(),
                found: row.len(),
            });
        }
        Ok(Table { headers, rows })
    }

    /// Convenience constructor from string slices.
    pub fn from_str_rows(headers: &[&str], rows: &[&[&str]]) -> Result<Self, Id3Error> {
        Table::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter().map(|r| r.iter().map(|v| v.to_string()).collect()).collect(),
        )
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Borrow every record, the form induction works on.
    pub fn row_refs(&self) -> Vec<&Row> {
        self.rows.iter().map(|r| r.as_slice()).collect()
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of feature columns, the label excluded.
    pub fn n_features(&self) -> usize {
        self.headers.len() - 1
    }

    pub fn label_index(&self) -> usize {
        self.headers.len() - 1
    }

    pub fn label_name(&self) -> &str {
        &self.headers[self.label_index()]
    }

    /// Names of the feature columns, in header order.
    pub fn feature_names(&self) -> &[String] {
        &self.headers[..self.label_index()]
    }

    /// Position of a column by exact name.
    pub fn header_position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All feature columns, eligible for the first split.
    pub fn feature_set(&self) -> FeatureSet {
        FeatureSet::new((0..self.n_features()).collect())
    }

    /// Distinct values of every feature column, in first-seen order.
    pub fn vocabulary(&self) -> Vec<(String, Vec<String>)> {
        self.feature_names()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut seen = HashSet::new();
                let values = self
                    .rows
                    .iter()
                    .map(|r| r[i].as_str())
                    .filter(|v| seen.insert(*v))
                    .map(|v| v.to_string())
                    .collect();
                (name.clone(), values)
            })
            .collect()
    }
}

/// Ordered set of column indices that may still be split on.
///
/// Each recursive call of the tree builder receives a copy of its parent's set
/// minus the index it just consumed, so an index is used at most once on any
/// root to leaf path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeatureSet {
    indices: Vec<usize>,
}

impl FeatureSet {
    /// Duplicate indices are dropped, keeping the first occurrence.
    pub fn new(indices: Vec<usize>) -> Self {
        let mut seen = HashSet::new();
        FeatureSet {
            indices: indices.into_iter().filter(|i| seen.insert(*i)).collect(),
        }
    }

    /// A copy of this set without `feature`.
    pub fn without(&self, feature: usize) -> Self {
        FeatureSet {
            indices: self.indices.iter().copied().filter(|i| *i != feature).collect(),
        }
    }

    pub fn contains(&self, feature: usize) -> bool {
        self.indices.contains(&feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather_head() -> Table {
        Table::from_str_rows(
            &["Outlook", "Humidity", "Play"],
            &[
                &["Sunny", "High", "No"],
                &["Overcast", "High", "Yes"],
                &["Sunny", "Normal", "No"],
                &["Rain", "Normal", "Yes"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_table_queries() {
        let table = weather_head();
        assert_eq!(table.n_rows(), 4);
        assert_eq!(table.n_features(), 2);
        assert_eq!(table.label_index(), 2);
        assert_eq!(table.label_name(), "Play");
        assert_eq!(table.feature_names(), &["Outlook".to_string(), "Humidity".to_string()]);
        assert_eq!(table.header_position("Humidity"), Some(1));
        assert_eq!(table.header_position("humidity"), None);
        assert_eq!(table.feature_set().as_slice(), &[0, 1]);
        assert_eq!(table.row_refs()[3], &["Rain", "Normal", "Yes"]);
    }

    #[test]
    fn test_vocabulary_first_seen_order() {
        let table = weather_head();
        let vocab = table.vocabulary();
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab[0].0, "Outlook");
        assert_eq!(vocab[0].1, vec!["Sunny", "Overcast", "Rain"]);
        assert_eq!(vocab[1].1, vec!["High", "Normal"]);
    }

    #[test]
    fn test_table_validation() {
        assert!(matches!(
            Table::from_str_rows(&["Play"], &[&["Yes"]]),
            Err(Id3Error::TooFewColumns(1))
        ));
        assert!(matches!(
            Table::from_str_rows(&["Outlook", "Play"], &[]),
            Err(Id3Error::EmptyDataset)
        ));
        let err = Table::from_str_rows(&["Outlook", "Play"], &[&["Sunny", "No"], &["Rain"]]).unwrap_err();
        assert!(matches!(
            err,
            Id3Error::RowLength {
                line: 3,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_table_deserialize_is_validated() {
        let table = weather_head();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(serde_json::from_str::<Table>(&json).unwrap(), table);

        assert!(serde_json::from_str::<Table>(r#"{"headers":["a","y"],"rows":[]}"#).is_err());
        assert!(serde_json::from_str::<Table>(r#"{"headers":["y"],"rows":[["Yes"]]}"#).is_err());
        let ragged = serde_json::from_str::<Table>(r#"{"headers":["a","y"],"rows":[["x","Yes"],["No"]]}"#);
        let message = ragged.unwrap_err().to_string();
        assert!(message.contains("Line 3 has 1 value(s), expected 2."), "{}", message);
    }

    #[test]
    fn test_feature_set() {
        let fs = FeatureSet::new(vec![2, 0, 2, 1]);
        assert_eq!(fs.as_slice(), &[2, 0, 1]);
        let smaller = fs.without(0);
        assert_eq!(smaller.as_slice(), &[2, 1]);
        assert!(fs.contains(0));
        assert!(!smaller.contains(0));
        assert_eq!(smaller.without(5), smaller);
        assert!(FeatureSet::default().is_empty());
    }
}
