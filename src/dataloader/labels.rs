use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{info, warn};

use crate::err::CustomError;

pub const NUM_CLASSES: usize = 10;

pub const CLASS_NAMES: [&str; NUM_CLASSES] = [
    "airplane",
    "automobile",
    "bird",
    "cat",
    "deer",
    "dog",
    "frog",
    "horse",
    "ship",
    "truck",
];

/// Maps class id to its name, unknown ids give a sentinel
pub fn class_name(id: i32) -> String {
    if id >= 0 && (id as usize) < NUM_CLASSES {
        CLASS_NAMES[id as usize].to_owned()
    } else {
        format!("unknown class {}", id)
    }
}

/// Identifier without extension, everything before the first '.'
pub fn identifier_stem(identifier: &str) -> &str {
    identifier.split('.').next().unwrap_or(identifier)
}

/// Identifier (sans extension) -> class id
#[derive(Clone, Debug, Default)]
pub struct LabelMap {
    labels: HashMap<String, i32>,
}

impl LabelMap {
    pub fn new(labels: HashMap<String, i32>) -> Self {
        Self { labels }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_file(filepath: &str) -> Result<Self, Box<dyn std::error::Error>> {
        if !Path::new(filepath).exists() {
            return Err(Box::new(CustomError::MissingResource(filepath.to_owned())));
        }

        let file = File::open(filepath)?;
        let labels: HashMap<String, i32> = serde_json::from_reader(BufReader::new(file))?;

        Ok(Self { labels })
    }

    /// Never fails : an absent or unreadable file gives empty labels
    pub fn from_file_or_empty(filepath: &str) -> Self {
        match Self::from_file(filepath) {
            Ok(lm) => {
                info!("Loaded {} labels from {}", lm.len(), filepath);
                lm
            }
            Err(err) => {
                warn!("{}. Using empty labels", err);
                Self::empty()
            }
        }
    }

    /// Label for a dataset identifier, class 0 when absent
    pub fn get(&self, identifier: &str) -> i32 {
        *self.labels.get(identifier_stem(identifier)).unwrap_or(&0)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names() {
        assert_eq!(class_name(0), "airplane");
        assert_eq!(class_name(5), "dog");
        assert_eq!(class_name(9), "truck");

        let unknown = class_name(999);
        assert!(unknown.contains("999"));
        assert!(class_name(-1).starts_with("unknown class"));
    }

    #[test]
    fn lookup_strips_extension() {
        let mut m = HashMap::new();
        m.insert("12".to_owned(), 3);
        let lm = LabelMap::new(m);

        assert_eq!(lm.get("12.npy"), 3);
        assert_eq!(lm.get("12"), 3);
        assert_eq!(lm.get("13.png"), 0);
    }

    #[test]
    fn missing_file_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        assert!(LabelMap::from_file(path.to_str().unwrap()).is_err());
        assert!(LabelMap::from_file_or_empty(path.to_str().unwrap()).is_empty());
    }

    #[test]
    fn reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.json");
        std::fs::write(&path, r#"{"0": 7, "1": 2}"#).unwrap();

        let lm = LabelMap::from_file(path.to_str().unwrap()).unwrap();
        assert_eq!(lm.len(), 2);
        assert_eq!(lm.get("0.npy"), 7);
        assert_eq!(lm.get("1.png"), 2);
    }
}
