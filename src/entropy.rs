//! Entropy
//!
//! Label-distribution entropy and information gain over borrowed row subsets.
//! The label is the last value of every row.
use crate::data::Row;
use hashbrown::HashMap;

/// Label tallies of a row subset, kept in first-seen label order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelCounts<'a> {
    counts: Vec<(&'a str, usize)>,
    total: usize,
}

impl<'a> LabelCounts<'a> {
    /// Number of distinct labels.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Number of rows tallied.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn get(&self, label: &str) -> usize {
        self.counts.iter().find(|(l, _)| *l == label).map_or(0, |(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// The label, when every row shares it.
    pub fn single(&self) -> Option<&'a str> {
        match self.counts.as_slice() {
            [(label, _)] => Some(*label),
            _ => None,
        }
    }

    /// Most frequent label, see [`majority_label`].
    pub fn majority(&self) -> Option<&'a str> {
        majority_label(self)
    }

    /// Entropy of the tallied distribution, in bits.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let total = self.total as f64;
        self.counts
            .iter()
            .map(|(_, c)| {
                let p = *c as f64 / total;
                -p * p.log2()
            })
            .sum::<f64>()
            .max(0.0)
    }
}

#[inline]
fn label_of(row: &Row) -> &str {
    row.last().map_or("", |l| l.as_str())
}

/// Tally the label column of `rows`.
pub fn count_labels<'a>(rows: &[&'a Row]) -> LabelCounts<'a> {
    let mut position: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for &row in rows {
        let label = label_of(row);
        match position.get(label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(label, counts.len());
                counts.push((label, 1));
            }
        }
    }
    LabelCounts {
        counts,
        total: rows.len(),
    }
}

/// Most frequent label of `counts`. Equal counts resolve to the
/// lexicographically smallest label, independent of the order rows were seen in.
pub fn majority_label<'a>(counts: &LabelCounts<'a>) -> Option<&'a str> {
    counts
        .counts
        .iter()
        .max_by(|(la, ca), (lb, cb)| ca.cmp(cb).then_with(|| lb.cmp(la)))
        .map(|(l, _)| *l)
}

/// Entropy of the label distribution of `rows`: `-Σ p_i log2(p_i)`.
/// Zero for an empty subset and for a subset with a single label.
pub fn entropy(rows: &[&Row]) -> f64 {
    count_labels(rows).entropy()
}

/// Group `rows` by their value at `feature`. Groups are returned in the order
/// their value is first seen, which later becomes the order of the branches.
pub fn split_by_feature<'a>(rows: &[&'a Row], feature: usize) -> Vec<(&'a str, Vec<&'a Row>)> {
    let mut position: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, Vec<&'a Row>)> = Vec::new();
    for &row in rows {
        let value = row[feature].as_str();
        match position.get(value) {
            Some(&i) => groups[i].1.push(row),
            None => {
                position.insert(value, groups.len());
                groups.push((value, vec![row]));
            }
        }
    }
    groups
}

/// Reduction of entropy obtained by partitioning `rows` on `feature`.
///
/// * `rows` - Subset being split.
/// * `feature` - Column index to partition on.
/// * `base_entropy` - Entropy of `rows`, computed once by the caller.
pub fn information_gain(rows: &[&Row], feature: usize, base_entropy: f64) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let total = rows.len() as f64;
    let weighted: f64 = split_by_feature(rows, feature)
        .iter()
        .map(|(_, group)| group.len() as f64 / total * entropy(group))
        .sum();
    // Round-off can leave a tiny negative value for non-separating features.
    (base_entropy - weighted).max(0.0)
}
