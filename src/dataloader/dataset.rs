use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::err::CustomError;

pub const RECOGNIZED_EXTENSIONS: [&str; 3] = ["npy", "png", "jpg"];

pub const PLACEHOLDER_PREFIX: &str = "dummy_";
pub const PLACEHOLDER_LEN: usize = 100;

/// `dummy_0.npy` ... `dummy_99.npy`
pub fn placeholder_dataset() -> Vec<String> {
    (0..PLACEHOLDER_LEN)
        .map(|i| format!("{}{}.npy", PLACEHOLDER_PREFIX, i))
        .collect()
}

fn is_recognized(name: &str) -> bool {
    RECOGNIZED_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(&format!(".{}", ext)))
}

/// File names with a recognized extension, sorted by name
pub fn list_dataset_dir(dir: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    if !Path::new(dir).is_dir() {
        return Err(Box::new(CustomError::MissingResource(dir.to_owned())));
    }

    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;

        if let Some(name) = entry.file_name().to_str() {
            if is_recognized(name) {
                files.push(name.to_owned());
            }
        }
    }

    files.sort();

    Ok(files)
}

/// Never fails : an absent directory gives an empty listing
pub fn list_dataset_dir_or_empty(dir: &str) -> Vec<String> {
    match list_dataset_dir(dir) {
        Ok(files) => {
            info!("Found {} dataset files in {}", files.len(), dir);
            files
        }
        Err(err) => {
            warn!("{}. Using empty file list", err);
            Vec::new()
        }
    }
}
