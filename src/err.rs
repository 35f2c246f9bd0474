use std::fmt;

#[derive(Debug)]
pub enum CustomError {
    WrongArg,
    InvalidFormat,
    /// Dataset directory or label file is absent
    MissingResource(String),
    /// Single item couldn't be decoded or resized
    CorruptItem(String),
    /// Parameters that can't be satisfied, no safe fallback exists
    Config(String),
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CustomError::WrongArg => {
                write!(f, "{}", "Wrong arguments")
            }
            CustomError::InvalidFormat => {
                write!(f, "{}", "Invalid format")
            }
            CustomError::MissingResource(what) => {
                write!(f, "Missing resource : {}", what)
            }
            CustomError::CorruptItem(what) => {
                write!(f, "Corrupt item : {}", what)
            }
            CustomError::Config(what) => {
                write!(f, "Configuration error : {}", what)
            }
        }
    }
}

impl std::error::Error for CustomError {}
