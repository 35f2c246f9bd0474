use image::DynamicImage;

use log::debug;

use super::{gray_to_image, Pattern};
use crate::err::CustomError;
use crate::util::Array2D;

/// Black and white board, the top-left tile is black
#[derive(Clone, Debug)]
pub struct Checker {
    pub resolution: usize,
    pub tile_size: usize,
    output: Option<Array2D>,
}

impl Checker {
    pub fn new(resolution: usize, tile_size: usize) -> Self {
        Self {
            resolution,
            tile_size,
            output: None,
        }
    }
}

impl Pattern for Checker {
    type Output = Array2D;

    fn draw(&mut self) -> Result<Array2D, CustomError> {
        if self.tile_size == 0 || self.resolution % (2 * self.tile_size) != 0 {
            return Err(CustomError::Config(format!(
                "resolution {} must be divisible by 2 * tile_size ({})",
                self.resolution, self.tile_size
            )));
        }

        let ts = self.tile_size;
        let board = Array2D::from_shape_fn((self.resolution, self.resolution), |(r, c)| {
            ((r / ts + c / ts) % 2) as f32
        });

        debug!(
            "[ok] Checker draw() : {} tiles per side",
            self.resolution / ts
        );

        self.output = Some(board.clone());
        Ok(board)
    }

    fn output(&self) -> Option<&Array2D> {
        self.output.as_ref()
    }

    fn pattern_type(&self) -> &str {
        "checker"
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
    use ndarray::array;

    #[test]
    fn small_board_layout() {
        let mut c = Checker::new(4, 1);
        let out = c.draw().unwrap();

        let expected = array![
            [0.0, 1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0, 1.0],
            [1.0, 0.0, 1.0, 0.0],
        ];
        assert_eq!(out, expected);
    }

    #[test]
    fn tiles_are_scaled() {
        let mut c = Checker::new(8, 2);
        let out = c.draw().unwrap();

        assert_eq!(out.shape(), &[8, 8]);
        assert_eq!(out[[0, 0]], 0.0);
        assert_eq!(out[[1, 1]], 0.0);
        assert_eq!(out[[0, 2]], 1.0);
        assert_eq!(out[[2, 0]], 1.0);
        assert_eq!(out[[7, 7]], 0.0);
    }

    #[test]
    fn indivisible_resolution_fails() {
        let mut c = Checker::new(10, 3);
        assert!(matches!(c.draw(), Err(CustomError::Config(_))));
        assert!(c.output().is_none());

        let mut zero = Checker::new(10, 0);
        assert!(zero.draw().is_err());
    }

    #[test]
    fn draw_returns_copy() {
        let mut c = Checker::new(4, 2);
        let mut out = c.draw().unwrap();
        out.fill(0.5);

        assert_eq!(c.output().unwrap()[[0, 2]], 1.0);
    }

    #[test]
    fn image_is_drawn_lazily() {
        let mut c = Checker::new(4, 1);
        let img = c.to_image().unwrap().to_luma8();

        assert_eq!(img.dimensions(), (4, 4));
        assert_eq!(img.get_pixel(0, 0).0, [0]);
        assert_eq!(img.get_pixel(1, 0).0, [255]);
        assert!(c.output().is_some());
    }
}
