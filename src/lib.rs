mod conflicts;
mod highlight;

// Modules
pub mod classifier;
pub mod constants;
pub mod data;
pub mod dot;
pub mod entropy;
pub mod errors;
pub mod loader;
pub mod node;
pub mod splitter;
pub mod tree;
pub mod utils;

// Individual classes, and functions
pub use classifier::{ClassifierConfig, DecisionTreeClassifier, ModelIO};
pub use conflicts::{find_conflicts, Conflict};
pub use data::{FeatureSet, Table};
pub use errors::Id3Error;
pub use highlight::{highlight_path, preorder_ids, PathHighlight};
pub use loader::{detect_delimiter, parse_table, read_table, LoaderConfig};
pub use tree::{DecisionPath, Prediction, Tree};
