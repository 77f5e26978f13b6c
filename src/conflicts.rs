//! Conflicts
//!
//! Advisory pre-check for records that share every feature value but carry
//! different labels. ID3 cannot separate such rows and falls back to the
//! majority label for them.
use crate::data::Table;
use hashbrown::HashMap;
use log::{info, warn};
use std::fmt;

/// A record contradicting the first record with the same feature values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub features: Vec<String>,
    pub first_label: String,
    pub first_line: usize,
    pub label: String,
    pub line: usize,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "features [{}]: label '{}' at line {}, label '{}' at line {}",
            self.features.join(","),
            self.first_label,
            self.first_line,
            self.label,
            self.line
        )
    }
}

/// Find every record whose features equal an earlier record's but whose label
/// differs. Each record is compared with the first occurrence of its feature
/// values. Line numbers count the header as line 1.
pub fn find_conflicts(table: &Table) -> Vec<Conflict> {
    let n_features = table.n_features();
    let mut first_seen: HashMap<&[String], (&str, usize)> = HashMap::new();
    let mut conflicts = Vec::new();

    for (i, row) in table.rows().iter().enumerate() {
        let features = &row[..n_features];
        let label = row[n_features].as_str();
        let line = i + 2;
        match first_seen.get(features) {
            Some(&(first_label, first_line)) => {
                if first_label != label {
                    let conflict = Conflict {
                        features: features.to_vec(),
                        first_label: first_label.to_string(),
                        first_line,
                        label: label.to_string(),
                        line,
                    };
                    warn!("Conflict detected, {}", conflict);
                    conflicts.push(conflict);
                }
            }
            None => {
                first_seen.insert(features, (label, line));
            }
        }
    }

    if conflicts.is_empty() {
        info!("No conflicting duplicates found.");
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{read_table, LoaderConfig};

    #[test]
    fn test_find_conflicts() {
        let table = read_table("resources/conflicts.csv", &LoaderConfig::default()).unwrap();
        let conflicts = find_conflicts(&table);
        assert_eq!(conflicts.len(), 2);

        assert_eq!(conflicts[0].features, vec!["Sunny", "Weak"]);
        assert_eq!(conflicts[0].first_label, "No");
        assert_eq!(conflicts[0].first_line, 2);
        assert_eq!(conflicts[0].label, "Yes");
        assert_eq!(conflicts[0].line, 3);

        assert_eq!(conflicts[1].features, vec!["Rain", "Strong"]);
        assert_eq!(conflicts[1].first_line, 4);
        assert_eq!(conflicts[1].line, 6);
        assert_eq!(
            conflicts[1].to_string(),
            "features [Rain,Strong]: label 'Yes' at line 4, label 'No' at line 6"
        );
    }

    #[test]
    fn test_no_conflicts() {
        let table = read_table("resources/weather.csv", &LoaderConfig::default()).unwrap();
        assert!(find_conflicts(&table).is_empty());
    }

    #[test]
    fn test_exact_duplicates_are_not_conflicts() {
        let table = Table::from_str_rows(&["a", "y"], &[&["x", "Yes"], &["x", "Yes"]]).unwrap();
        assert!(find_conflicts(&table).is_empty());
    }
}
