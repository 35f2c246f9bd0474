use image::DynamicImage;

use log::debug;

use super::{rgb_to_image, Pattern};
use crate::err::CustomError;
use crate::util::Image;

/// RGB gradient : red grows left to right, green top to bottom,
/// blue falls left to right
#[derive(Clone, Debug)]
pub struct Spectrum {
    pub resolution: usize,
    output: Option<Image>,
}

impl Spectrum {
    pub fn new(resolution: usize) -> Self {
        Self {
            resolution,
            output: None,
        }
    }

    fn coord(&self, idx: usize) -> f32 {
        if self.resolution > 1 {
            idx as f32 / (self.resolution - 1) as f32
        } else {
            0.0
        }
    }
}

impl Pattern for Spectrum {
    type Output = Image;

    fn draw(&mut self) -> Result<Image, CustomError> {
        let res = self.resolution;

        let spectrum = Image::from_shape_fn((res, res, 3), |(r, c, ch)| {
            let x = self.coord(c);
            let y = self.coord(r);

            match ch {
                0 => x,
                1 => y,
                _ => 1.0 - x,
            }
        });

        debug!("[ok] Spectrum draw()");

        self.output = Some(spectrum.clone());
        Ok(spectrum)
    }

    fn output(&self) -> Option<&Image> {
        self.output.as_ref()
    }

    fn pattern_type(&self) -> &str {
        "spectrum"
    }

    fn to_image(&mut self) -> Result<DynamicImage, CustomError> {
        if self.output.is_none() {
            self.draw()?;
        }

        match &self.output {
            Some(out) => Ok(rgb_to_image(out)),
            None => Err(CustomError::InvalidFormat),
        }
    }
}
