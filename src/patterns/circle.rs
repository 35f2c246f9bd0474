use image::DynamicImage;

use ndarray::Zip;

use log::debug;

use super::{gray_to_image, Pattern};
use crate::err::CustomError;
use crate::util::Array2D;

/// Filled white circle on black background
#[derive(Clone, Debug)]
pub struct Circle {
    pub resolution: usize,
    pub radius: f32,
    /// Center as (x, y), x goes along columns
    pub position: (f32, f32),
    output: Option<Array2D>,
}

impl Circle {
    pub fn new(resolution: usize, radius: f32, position: (f32, f32)) -> Self {
        Self {
            resolution,
            radius,
            position,
            output: None,
        }
    }

    /// Circle with the same center coordinate on both axes
    pub fn centered_at(resolution: usize, radius: f32, pos: f32) -> Self {
        Self::new(resolution, radius, (pos, pos))
    }
}

impl Pattern for Circle {
    type Output = Array2D;

    fn draw(&mut self) -> Result<Array2D, CustomError> {
        let (cx, cy) = self.position;
        let r2 = self.radius * self.radius;

        let mut mask = Array2D::zeros((self.resolution, self.resolution));

        Zip::indexed(&mut mask).par_for_each(|(y, x), px| {
            let dist2 = (x as f32 - cx).powi(2) + (y as f32 - cy).powi(2);

            if dist2 <= r2 {
                *px = 1.0;
            }
        });

        debug!("[ok] Circle draw()");

        self.output = Some(mask.clone());
        Ok(mask)
    }

    fn output(&self) -> Option<&Array2D> {
        self.output.as_ref()
    }

    fn pattern_type(&self) -> &str {
        "circle"
    }

    fn to_image(&mut self) -> Result<DynamicImage, CustomError> {
        if self.output.is_none() {
            self.draw()?;
        }

        match &self.output {
            Some(out) => Ok(gray_to_image(out)),
            None => Err(CustomError::InvalidFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_inside_and_outside() {
        let mut c = Circle::new(10, 2.0, (5.0, 5.0));
        let out = c.draw().unwrap();

        assert_eq!(out[[5, 5]], 1.0);
        // exactly on the border
        assert_eq!(out[[5, 7]], 1.0);
        assert_eq!(out[[3, 5]], 1.0);
        assert_eq!(out[[5, 8]], 0.0);
        assert_eq!(out[[0, 0]], 0.0);

        // 13 lattice points within radius 2
        assert_eq!(out.sum(), 13.0);
    }

    #[test]
    fn position_is_x_then_y() {
        let mut c = Circle::new(20, 1.0, (15.0, 3.0));
        let out = c.draw().unwrap();

        assert_eq!(out[[3, 15]], 1.0);
        assert_eq!(out[[15, 3]], 0.0);
    }

    #[test]
    fn scalar_position() {
        let mut c = Circle::centered_at(8, 0.5, 4.0);
        let out = c.draw().unwrap();

        assert_eq!(out.sum(), 1.0);
        assert_eq!(out[[4, 4]], 1.0);
    }
}
