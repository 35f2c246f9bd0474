mod checker;
mod circle;
mod spectrum;

pub use checker::*;
pub use circle::*;
pub use spectrum::*;

use std::error::Error;

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

use log::info;

use crate::err::CustomError;
use crate::util::{Array2D, Image};

/// Procedural picture with a lazily drawn, cached output
pub trait Pattern {
    type Output;

    /// Draws the pattern, caches it and returns a copy
    fn draw(&mut self) -> Result<Self::Output, CustomError>;

    /// None until the first successful draw()
    fn output(&self) -> Option<&Self::Output>;

    fn pattern_type(&self) -> &str;

    /// 8-bit rendering, draws the pattern if it wasn't drawn yet
    fn to_image(&mut self) -> Result<DynamicImage, CustomError>;

    fn save(&mut self, filepath: &str) -> Result<(), Box<dyn Error>> {
        let img = self.to_image()?;
        img.save(filepath)?;

        info!("Saved {} pattern to {}", self.pattern_type(), filepath);

        Ok(())
    }
}

fn to_byte(val: f32) -> u8 {
    (val.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub(crate) fn gray_to_image(arr: &Array2D) -> DynamicImage {
    let img = GrayImage::from_fn(arr.ncols() as u32, arr.nrows() as u32, |x, y| {
        Luma([to_byte(arr[[y as usize, x as usize]])])
    });

    DynamicImage::ImageLuma8(img)
}

pub(crate) fn rgb_to_image(arr: &Image) -> DynamicImage {
    let img = RgbImage::from_fn(arr.shape()[1] as u32, arr.shape()[0] as u32, |x, y| {
        let (r, c) = (y as usize, x as usize);
        Rgb([
            to_byte(arr[[r, c, 0]]),
            to_byte(arr[[r, c, 1]]),
            to_byte(arr[[r, c, 2]]),
        ])
    });

    DynamicImage::ImageRgb8(img)
}
