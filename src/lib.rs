/// Folder
pub mod dataloader;
pub mod layers;
pub mod optimizers;
pub mod patterns;
pub mod util;

/// Files
pub mod activation;
pub mod config;
pub mod display;
pub mod err;
pub mod network;

pub mod prelude {
    pub use crate::config::{GeneratorConfig, ImageShape};
    pub use crate::dataloader::{DataLoader, ImageBatch, ImageGenerator, SamplingParams};
    pub use crate::display::{BatchDisplay, TuiDisplay};
    pub use crate::err::CustomError;
    pub use crate::network::NeuralNetwork;
    pub use crate::patterns::{Checker, Circle, Pattern, Spectrum};
}
