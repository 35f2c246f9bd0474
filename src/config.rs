use std::error::Error;
use std::fs::File;
use std::io::{ErrorKind, Write};

use serde::{Deserialize, Serialize};

use log::error;

use crate::err::CustomError;

/// Per-item pixel shape (height, width, channels)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageShape {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl ImageShape {
    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }

    pub fn dim(&self) -> (usize, usize, usize) {
        (self.height, self.width, self.channels)
    }

    pub fn len(&self) -> usize {
        self.height * self.width * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn validate(&self) -> Result<(), CustomError> {
        if self.height == 0 || self.width == 0 {
            return Err(CustomError::Config(format!(
                "image size {}x{} must be non-zero",
                self.height, self.width
            )));
        }

        if self.channels != 1 && self.channels != 3 {
            return Err(CustomError::Config(format!(
                "channels must be 1 or 3, got {}",
                self.channels
            )));
        }

        Ok(())
    }
}

impl Default for ImageShape {
    fn default() -> Self {
        Self::new(32, 32, 3)
    }
}

impl std::str::FromStr for ImageShape {
    type Err = CustomError;

    /// Parses "height,width,channels"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| CustomError::WrongArg)?;

        if parts.len() != 3 {
            return Err(CustomError::WrongArg);
        }

        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

/// Everything needed to build an ImageGenerator from disk
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub file_path: String,
    pub label_path: String,
    pub batch_size: usize,
    pub image_size: ImageShape,
    pub rotation: bool,
    pub mirroring: bool,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            file_path: "exercise_data/".to_owned(),
            label_path: "Labels.json".to_owned(),
            batch_size: 10,
            image_size: ImageShape::default(),
            rotation: false,
            mirroring: false,
            shuffle: false,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_file(filepath: &str) -> Result<Self, Box<dyn Error>> {
        let cfg_file = File::open(filepath)?;
        let cfg: GeneratorConfig = serde_yaml::from_reader(cfg_file)?;

        Ok(cfg)
    }

    pub fn to_file(&self, filepath: &str) -> Result<(), Box<dyn Error>> {
        let yaml_str_result = serde_yaml::to_string(&self);

        let mut output = File::create(filepath)?;

        match yaml_str_result {
            Ok(yaml_str) => {
                output.write_all(yaml_str.as_bytes())?;
            }
            Err(x) => {
                error!("Error (serde-yaml) serializing generator config !!!");
                return Err(Box::new(std::io::Error::new(ErrorKind::Other, x)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_parsing() {
        let sh: ImageShape = "28, 28,1".parse().unwrap();
        assert_eq!(sh, ImageShape::new(28, 28, 1));

        assert!("28,28".parse::<ImageShape>().is_err());
        assert!("a,b,c".parse::<ImageShape>().is_err());
    }

    #[test]
    fn shape_validation() {
        assert!(ImageShape::new(4, 4, 3).validate().is_ok());
        assert!(ImageShape::new(4, 4, 2).validate().is_err());
        assert!(ImageShape::new(0, 4, 1).validate().is_err());
    }

    #[test]
    fn yaml_round_trip_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gen.cfg");
        let path = path.to_str().unwrap();

        let mut cfg = GeneratorConfig::default();
        cfg.batch_size = 4;
        cfg.shuffle = true;
        cfg.seed = Some(7);
        cfg.to_file(path).unwrap();

        let loaded = GeneratorConfig::from_file(path).unwrap();
        assert_eq!(loaded, cfg);

        let partial: GeneratorConfig = serde_yaml::from_str("batch_size: 3\n").unwrap();
        assert_eq!(partial.batch_size, 3);
        assert_eq!(partial.image_size, ImageShape::default());
        assert!(!partial.rotation);
    }
}
