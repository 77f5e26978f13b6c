//! Classifier Configuration
//!
//! Settings of the [`super::DecisionTreeClassifier`] and the JSON persistence
//! shared by the configuration and fitted classifiers.
use crate::errors::Id3Error;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_num_threads() -> Option<usize> {
    None
}
fn default_parallel() -> bool {
    false
}
fn default_verbose() -> bool {
    false
}

/// Configuration for the `DecisionTreeClassifier`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Number of threads for parallel gain evaluation, all available when `None`.
    #[serde(default = "default_num_threads")]
    pub num_threads: Option<usize>,
    /// Evaluate the gain of candidate features in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Log a summary of every fit at info level.
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            num_threads: None,
            parallel: false,
            verbose: false,
        }
    }
}

impl ClassifierConfig {
    /// Set the number of threads used when gains are evaluated in parallel.
    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.num_threads = num_threads;
        self
    }

    /// Set whether gains are evaluated in parallel.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set whether fits are logged at info level.
    pub fn set_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Id3Error> {
        match self.num_threads {
            Some(0) => Err(Id3Error::InvalidParameter(
                "num_threads".to_string(),
                "a positive number".to_string(),
                "0".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// IO
pub trait ModelIO: Serialize + DeserializeOwned + Sized {
    /// Save as a json object to a file.
    ///
    /// * `path` - Path to save to.
    fn save_model<P: AsRef<Path>>(&self, path: P) -> Result<(), Id3Error> {
        fs::write(path, self.json_dump()?).map_err(|e| Id3Error::UnableToWrite(e.to_string()))
    }

    /// Dump as a json string.
    fn json_dump(&self) -> Result<String, Id3Error> {
        serde_json::to_string(self).map_err(|e| Id3Error::UnableToWrite(e.to_string()))
    }

    /// Load from a json string.
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, Id3Error> {
        serde_json::from_str::<Self>(json_str).map_err(|e| Id3Error::UnableToRead(e.to_string()))
    }

    /// Load from a path to a json object.
    ///
    /// * `path` - Path to load from.
    fn load_model<P: AsRef<Path>>(path: P) -> Result<Self, Id3Error> {
        let json_str = fs::read_to_string(path).map_err(|e| Id3Error::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ModelIO for ClassifierConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_classifier_config_default() {
        let config = ClassifierConfig::default();
        assert_eq!(config.num_threads, None);
        assert!(!config.parallel);
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_classifier_config_setters() {
        let config = ClassifierConfig::default()
            .set_num_threads(Some(2))
            .set_parallel(true)
            .set_verbose(true);
        assert_eq!(config.num_threads, Some(2));
        assert!(config.parallel);
        assert!(config.verbose);
        assert!(matches!(
            config.set_num_threads(Some(0)).validate(),
            Err(Id3Error::InvalidParameter(..))
        ));
    }

    #[test]
    fn test_config_io_json() {
        let config = ClassifierConfig::default().set_parallel(true);
        let json = config.json_dump().unwrap();
        let config2 = ClassifierConfig::from_json(&json).unwrap();
        assert_eq!(config, config2);
        let partial = ClassifierConfig::from_json(r#"{"num_threads": 3}"#).unwrap();
        assert_eq!(partial.num_threads, Some(3));
        assert!(!partial.parallel);
        assert!(ClassifierConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_config_io_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("config.json");
        let config = ClassifierConfig::default().set_verbose(true);
        config.save_model(&file_path).unwrap();
        let config2 = ClassifierConfig::load_model(&file_path).unwrap();
        assert_eq!(config, config2);
        assert!(matches!(
            ClassifierConfig::load_model(dir.path().join("missing.json")),
            Err(Id3Error::UnableToRead(_))
        ));
    }
}
