//! Errors
//!
//! Custom error types used throughout the `id3_tree` crate.
//! Tree induction and prediction never fail; these errors come from
//! loading datasets, persisting models and setting up the thread pool.
use thiserror::Error;

/// Errors that can occur while loading data or persisting a classifier.
#[derive(Debug, Error)]
pub enum Id3Error {
    /// Unable to write a model or export to file.
    #[error("Unable to write to file: {0}")]
    UnableToWrite(String),
    /// Unable to read a dataset or model from file.
    #[error("Unable to read from file: {0}")]
    UnableToRead(String),
    /// The dataset has a header but no records, or nothing at all.
    #[error("The dataset is empty, at least one record is required.")]
    EmptyDataset,
    /// Fewer than two columns, so there is no feature next to the label.
    #[error("The dataset has {0} column(s), at least one feature and one label column are required.")]
    TooFewColumns(usize),
    /// A record whose length does not match the header.
    #[error("Line {line} has {found} value(s), expected {expected}.")]
    RowLength { line: usize, expected: usize, found: usize },
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// A deserialized tree whose node ids do not form a pre-order arena.
    #[error("Invalid model: {0}")]
    InvalidModel(String),
    /// The rayon thread pool could not be built.
    #[error("Unable to build thread pool: {0}")]
    ThreadPool(String),
}
