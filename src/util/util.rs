use serde::{Deserialize, Serialize};

use ndarray::{Array1, Array2, Array3, Array4};

pub type Float = f32;
pub type Array1D = Array1<Float>;
pub type Array2D = Array2<Float>;
/// Single image, (height, width, channels)
pub type Image = Array3<Float>;
/// Stacked images, (batch, height, width, channels)
pub type ImageBlob = Array4<Float>;
pub type Labels = Array1<i32>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Variant {
    Int(i32),
    Float(f32),
    String(String),
}
