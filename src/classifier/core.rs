//! Decision Tree Classifier
//!
//! Ties a fitted [`Tree`] to the column names it was trained on, so that
//! inputs can be classified, traced and exported without carrying the
//! training table around.
use super::config::{ClassifierConfig, ModelIO};
use crate::data::Table;
use crate::dot;
use crate::errors::Id3Error;
use crate::highlight::{highlight_path, PathHighlight};
use crate::splitter::InformationGainSplitter;
use crate::tree::{DecisionPath, Prediction, Tree};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// ID3 decision tree classifier for categorical data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    pub cfg: ClassifierConfig,
    /// Column names of the training table, the label last.
    pub headers: Vec<String>,
    /// Distinct training values of every feature, in first-seen order.
    pub vocabulary: Vec<(String, Vec<String>)>,
    pub tree: Tree,
}

impl DecisionTreeClassifier {
    pub fn new(cfg: ClassifierConfig) -> Self {
        DecisionTreeClassifier {
            cfg,
            ..Default::default()
        }
    }

    /// Fit the classifier on every row of `table`, replacing any previous fit.
    pub fn fit(&mut self, table: &Table) -> Result<(), Id3Error> {
        self.cfg.validate()?;
        let start = Instant::now();

        let num_threads = match self.cfg.num_threads {
            Some(n) => n,
            None => std::thread::available_parallelism().map_or(1, |n| n.get()),
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(if self.cfg.parallel { num_threads } else { 1 })
            .build()
            .map_err(|e| Id3Error::ThreadPool(e.to_string()))?;

        let splitter = InformationGainSplitter::new(self.cfg.parallel);
        let mut tree = Tree::new();
        tree.fit(table, &table.feature_set(), &splitter, &pool);

        self.headers = table.headers().to_vec();
        self.vocabulary = table.vocabulary();
        self.tree = tree;

        if self.cfg.verbose {
            info!(
                "Finished building a tree with {} nodes, {} leaves and depth {} from {} rows in {:.3} seconds.",
                self.tree.len(),
                self.tree.n_leaves,
                self.tree.depth,
                table.n_rows(),
                start.elapsed().as_secs_f32()
            );
        } else {
            debug!("Built a tree with {} nodes.", self.tree.len());
        }
        Ok(())
    }

    /// Classify one input, given as one value per feature in header order.
    pub fn predict<S: AsRef<str>>(&self, input: &[S]) -> (Prediction, DecisionPath) {
        self.tree.predict_row(&self.headers, input)
    }

    /// Classify one input into a caller-owned path, which is cleared first.
    pub fn predict_into<S: AsRef<str>>(&self, input: &[S], path: &mut DecisionPath) -> Prediction {
        self.tree.predict(&self.headers, input, path)
    }

    /// Classify many inputs, in parallel when the classifier is configured so.
    pub fn predict_many<S: AsRef<str> + Sync>(&self, inputs: &[Vec<S>]) -> Vec<Prediction> {
        self.tree.predict_many(&self.headers, inputs, self.cfg.parallel)
    }

    /// Nodes and edges of the tree traversed by `path`.
    pub fn highlight(&self, path: &DecisionPath) -> PathHighlight {
        highlight_path(&self.tree, path)
    }

    pub fn to_dot(&self) -> String {
        dot::to_dot(&self.tree)
    }

    pub fn to_dot_highlighted(&self, path: &DecisionPath) -> String {
        dot::to_dot_highlighted(&self.tree, &self.highlight(path))
    }

    pub fn is_fitted(&self) -> bool {
        !self.tree.is_empty()
    }

    pub fn feature_names(&self) -> &[String] {
        match self.headers.split_last() {
            Some((_, features)) => features,
            None => &[],
        }
    }

    pub fn label_name(&self) -> Option<&str> {
        self.headers.last().map(|h| h.as_str())
    }
}

impl ModelIO for DecisionTreeClassifier {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflicts::find_conflicts;
    use crate::loader::{read_table, LoaderConfig};
    use tempfile::tempdir;

    fn weather() -> Table {
        read_table("resources/weather.csv", &LoaderConfig::default()).unwrap()
    }

    #[test]
    fn test_classifier_fit_predict() {
        let table = weather();
        let mut model = DecisionTreeClassifier::new(ClassifierConfig::default().set_verbose(true));
        assert!(!model.is_fitted());
        assert!(model.predict(&["Sunny", "Hot", "High", "False"]).0.is_unknown());

        model.fit(&table).unwrap();
        assert!(model.is_fitted());
        assert_eq!(model.label_name(), Some("Play"));
        assert_eq!(model.feature_names().len(), 4);
        assert_eq!(model.vocabulary[0].1, vec!["Sunny", "Overcast", "Rainy"]);

        let (p, path) = model.predict(&["Sunny", "Hot", "Normal", "False"]);
        assert_eq!(p.as_str(), "Yes");
        assert_eq!(path.as_slice(), &["Outlook=Sunny", "Humidity=Normal"]);

        let mut reused = DecisionPath::new();
        let p = model.predict_into(&["Foggy", "Hot", "Normal", "False"], &mut reused);
        assert!(p.is_unknown());
        assert!(reused.is_empty());
    }

    #[test]
    fn test_classifier_parallel_matches_serial() {
        let table = read_table("resources/contact_lenses.txt", &LoaderConfig::default()).unwrap();
        let mut serial = DecisionTreeClassifier::default();
        serial.fit(&table).unwrap();
        let mut parallel =
            DecisionTreeClassifier::new(ClassifierConfig::default().set_parallel(true).set_num_threads(Some(3)));
        parallel.fit(&table).unwrap();
        assert_eq!(serial.tree, parallel.tree);

        assert_eq!(serial.tree.root().unwrap().attribute(), Some("tear-prod-rate"));
        let inputs: Vec<Vec<String>> = table.rows().iter().map(|r| r[..4].to_vec()).collect();
        let predictions = parallel.predict_many(&inputs);
        for (p, row) in predictions.iter().zip(table.rows()) {
            assert_eq!(p.as_str(), row[4]);
        }
    }

    #[test]
    fn test_classifier_conflicts_fall_back_to_majority() {
        let table = read_table("resources/conflicts.csv", &LoaderConfig::default()).unwrap();
        assert_eq!(find_conflicts(&table).len(), 2);
        let mut model = DecisionTreeClassifier::default();
        model.fit(&table).unwrap();
        // Sunny/Weak has No twice and Yes once.
        assert_eq!(model.predict(&["Sunny", "Weak"]).0.as_str(), "No");
        // Rain/Strong is a tie, resolved to the smallest label.
        assert_eq!(model.predict(&["Rain", "Strong"]).0.as_str(), "No");
    }

    #[test]
    fn test_classifier_highlight_and_dot() {
        let mut model = DecisionTreeClassifier::default();
        model.fit(&weather()).unwrap();
        let (_, path) = model.predict(&["Rainy", "Mild", "High", "True"]);
        let h = model.highlight(&path);
        assert_eq!(h.nodes, vec![0, 5, 7]);
        let dot = model.to_dot_highlighted(&path);
        assert!(dot.contains("N5 -> N7 [label=\"True\", color=\"orange\"];"));
        assert!(model.to_dot().contains("N0 [label=\"Outlook\""));
    }

    #[test]
    fn test_classifier_invalid_config() {
        let mut model = DecisionTreeClassifier::new(ClassifierConfig::default().set_num_threads(Some(0)));
        assert!(matches!(model.fit(&weather()), Err(Id3Error::InvalidParameter(..))));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_classifier_rejects_corrupted_model() {
        let mut model = DecisionTreeClassifier::default();
        model.fit(&weather()).unwrap();
        let json = model.json_dump().unwrap();
        assert!(json.contains("\"child\":4"));

        let out_of_range = json.replace("\"child\":4", "\"child\":99");
        assert!(matches!(
            DecisionTreeClassifier::from_json(&out_of_range),
            Err(Id3Error::UnableToRead(_))
        ));
        let backwards = json.replace("\"child\":4", "\"child\":0");
        assert!(matches!(
            DecisionTreeClassifier::from_json(&backwards),
            Err(Id3Error::UnableToRead(_))
        ));

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("corrupted.json");
        std::fs::write(&file_path, &out_of_range).unwrap();
        assert!(DecisionTreeClassifier::load_model(&file_path).is_err());
        let loaded = DecisionTreeClassifier::from_json(&json).unwrap();
        assert_eq!(loaded.predict(&["Overcast", "Hot", "High", "False"]).0.as_str(), "Yes");
    }

    #[test]
    fn test_classifier_save_load() {
        let mut model = DecisionTreeClassifier::default();
        model.fit(&weather()).unwrap();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("model.json");
        model.save_model(&file_path).unwrap();
        let loaded = DecisionTreeClassifier::load_model(&file_path).unwrap();
        assert_eq!(loaded.tree, model.tree);
        assert_eq!(loaded.headers, model.headers);
        let input = ["Rainy", "Cool", "Normal", "False"];
        assert_eq!(loaded.predict(&input), model.predict(&input));
        assert_eq!(loaded.tree.to_string(), model.tree.to_string());
    }
}
