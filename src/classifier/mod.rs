//! Classifier
//!
//! High level entry point: configuration, fitting, prediction, export and
//! JSON persistence of an ID3 decision tree.
pub mod config;
pub mod core;

pub use self::config::{ClassifierConfig, ModelIO};
pub use self::core::DecisionTreeClassifier;
