/// Text shown for a prediction that could not reach a leaf.
pub const UNKNOWN_LABEL: &str = "unknown";
/// Separates attribute and value in a decision path entry.
pub const PATH_SEPARATOR: char = '=';
/// Starting point of the best-gain scan, below any valid gain.
pub const GAIN_SENTINEL: f64 = -1.0;
/// Candidate delimiters, in the order they are looked for in the header line.
pub const DELIMITER_CANDIDATES: [u8; 5] = [b',', b';', b'\t', b' ', b'.'];
/// Used when the header line holds none of the candidates.
pub const DEFAULT_DELIMITER: u8 = b',';
/// Fill colour of decision nodes in DOT exports.
pub const DOT_DECISION_FILL: &str = "#ffe0b3";
/// Fill colour of decision nodes that lie on a highlighted path.
pub const DOT_DECISION_PATH_FILL: &str = "#ffd699";
/// Fill colour of leaves.
pub const DOT_LEAF_FILL: &str = "#ccffcc";
