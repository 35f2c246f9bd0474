use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::optimizers::Optimizer;
use crate::util::{Array2D, WithParams};

#[derive(Debug, Clone, PartialEq)]
pub enum LayerError {
    InvalidSize,
    NoForward,
    NotImpl,
    Other(String),
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LayerError::InvalidSize => {
                write!(f, "{}", "Invalid size")
            }
            LayerError::NoForward => {
                write!(f, "{}", "Backward called before forward")
            }
            LayerError::NotImpl => {
                write!(f, "{}", "Not implemented")
            }
            LayerError::Other(msg) => {
                write!(f, "Other : {}", msg)
            }
        }
    }
}

impl std::error::Error for LayerError {}

pub type LayerForwardResult = Result<Array2D, LayerError>;
pub type LayerBackwardResult = Result<Array2D, LayerError>;

static LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Unique id, optimizers keep their per-layer state under it
pub fn generate_layer_id() -> u64 {
    LAYER_ID.fetch_add(1, Ordering::SeqCst)
}

/// Tensors are (batch, features)
pub trait AbstractLayer: WithParams {
    fn forward(&mut self, _input: &Array2D) -> LayerForwardResult {
        Err(LayerError::NotImpl)
    }

    /// Takes the error w.r.t. own output, returns the error w.r.t. own input
    fn backward(&mut self, _error: &Array2D) -> LayerBackwardResult {
        Err(LayerError::NotImpl)
    }

    /// Applies the gradient of the last backward pass
    fn update(&mut self, _optimizer: &mut dyn Optimizer) {}

    fn trainable(&self) -> bool {
        false
    }

    fn layer_type(&self) -> &str;
}

/// Loss at the end of the stack, compares predictions with one-hot labels
pub trait LossLayer {
    fn forward(&mut self, prediction: &Array2D, label: &Array2D) -> Result<f32, LayerError>;

    fn backward(&mut self, label: &Array2D) -> LayerBackwardResult;

    fn layer_type(&self) -> &str;
}
