//! Tree Prediction Methods
//!
//! Classification of single inputs with a record of the branches taken.
use super::tree::Tree;
use crate::constants::UNKNOWN_LABEL;
use crate::utils::{normalize, path_entry};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of classifying one input.
///
/// `Unknown` is an expected result, returned when the input holds a value the
/// tree never saw at some decision node, or when an attribute of the tree
/// cannot be found among the headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prediction {
    Label(String),
    Unknown,
}

impl Prediction {
    pub fn is_unknown(&self) -> bool {
        matches!(self, Prediction::Unknown)
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Prediction::Label(l) => Some(l),
            Prediction::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &str {
        self.label().unwrap_or(UNKNOWN_LABEL)
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered `attribute=value` entries recorded while walking the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionPath {
    steps: Vec<String>,
}

impl DecisionPath {
    pub fn new() -> Self {
        DecisionPath::default()
    }

    /// Wrap entries recorded elsewhere, for example read back from a log.
    pub fn from_entries(steps: Vec<String>) -> Self {
        DecisionPath { steps }
    }

    pub fn push(&mut self, attribute: &str, value: &str) {
        self.steps.push(path_entry(attribute, value));
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.as_str())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.steps
    }
}

impl fmt::Display for DecisionPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.steps.join(" -> "))
    }
}

impl Tree {
    /// Classify one input, recording the branches taken in `path`.
    ///
    /// `path` is cleared first. On an `Unknown` outcome it keeps the entries up
    /// to the last branch that matched.
    ///
    /// * `headers` - Column names of the training table.
    /// * `input` - One raw value per feature column, in header order.
    /// * `path` - Filled with `attribute=value` entries, using the value as
    ///   spelled in the tree.
    pub fn predict<S: AsRef<str>>(&self, headers: &[String], input: &[S], path: &mut DecisionPath) -> Prediction {
        path.clear();
        let mut node = match self.root() {
            Some(n) => n,
            None => return Prediction::Unknown,
        };
        while let Some(attribute) = node.attribute() {
            let value = match headers
                .iter()
                .position(|h| h == attribute)
                .and_then(|i| input.get(i))
            {
                Some(v) => normalize(v.as_ref()),
                None => {
                    debug!("Attribute {} has no value in the input", attribute);
                    return Prediction::Unknown;
                }
            };
            let branch = match node.child_normalized(&value) {
                Some(b) => b,
                None => {
                    debug!("No branch of {} matches {:?}", attribute, value);
                    return Prediction::Unknown;
                }
            };
            path.push(attribute, &branch.value);
            node = &self.nodes[branch.child];
        }
        match node.label() {
            Some(label) => Prediction::Label(label.to_string()),
            None => Prediction::Unknown,
        }
    }

    /// Classify one input and return the path alongside the outcome.
    pub fn predict_row<S: AsRef<str>>(&self, headers: &[String], input: &[S]) -> (Prediction, DecisionPath) {
        let mut path = DecisionPath::new();
        let prediction = self.predict(headers, input, &mut path);
        (prediction, path)
    }

    /// Classify many inputs, optionally in parallel.
    pub fn predict_many<S: AsRef<str> + Sync>(
        &self,
        headers: &[String],
        inputs: &[Vec<S>],
        parallel: bool,
    ) -> Vec<Prediction> {
        if parallel {
            inputs
                .par_iter()
                .map(|input| self.predict_row(headers, input).0)
                .collect()
        } else {
            inputs.iter().map(|input| self.predict_row(headers, input).0).collect()
        }
    }
}
