use std::error::Error;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};

use ndarray::{Array3, ArrayD, Axis, Ix3};
use ndarray_npy::read_npy;

use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use log::{debug, warn};

use crate::config::ImageShape;
use crate::dataloader::labels::{LabelMap, NUM_CLASSES};
use crate::dataloader::PLACEHOLDER_PREFIX;
use crate::err::CustomError;
use crate::util::{byte_intensity, clamp_intensity, Image};

/// Decoded dataset item
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedItem {
    pub image: Image,
    pub label: i32,
}

/// Resolves a dataset identifier to pixels and label.
/// Implementations never fail, a synthetic item is returned instead
pub trait ItemLoader {
    fn load(&self, index: usize, identifier: &str, labels: &LabelMap) -> LoadedItem;

    fn shape(&self) -> ImageShape;
}

/// Noise image seeded by the dataset index, label is `index mod 10`
pub fn synthetic_item(index: usize, shape: ImageShape) -> LoadedItem {
    let mut rng = StdRng::seed_from_u64(index as u64);
    let image = Image::random_using(shape.dim(), Uniform::new(0.0, 1.0), &mut rng);

    LoadedItem {
        image,
        label: (index % NUM_CLASSES) as i32,
    }
}

/// Serves synthetic items only
#[derive(Clone, Debug)]
pub struct SyntheticItemLoader {
    pub shape: ImageShape,
}

impl SyntheticItemLoader {
    pub fn new(shape: ImageShape) -> Self {
        Self { shape }
    }
}

impl ItemLoader for SyntheticItemLoader {
    fn load(&self, index: usize, _identifier: &str, _labels: &LabelMap) -> LoadedItem {
        synthetic_item(index, self.shape)
    }

    fn shape(&self) -> ImageShape {
        self.shape
    }
}

/// Reads `.npy`, `.png` and `.jpg` files from a directory
#[derive(Clone, Debug)]
pub struct FileItemLoader {
    pub root: PathBuf,
    pub shape: ImageShape,
}

impl FileItemLoader {
    pub fn new(root: &str, shape: ImageShape) -> Self {
        Self {
            root: PathBuf::from(root),
            shape,
        }
    }

    fn try_load(&self, path: &Path) -> Result<Image, Box<dyn Error>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "npy" => self.load_npy(path),
            _ => self.load_encoded(path),
        }
    }

    fn load_npy(&self, path: &Path) -> Result<Image, Box<dyn Error>> {
        let raw = read_npy_any(path)?;

        let mut img = match raw.ndim() {
            2 => raw.insert_axis(Axis(2)).into_dimensionality::<Ix3>()?,
            3 => raw.into_dimensionality::<Ix3>()?,
            n => {
                return Err(Box::new(CustomError::CorruptItem(format!(
                    "{} has {} dimensions",
                    path.display(),
                    n
                ))))
            }
        };

        // float pixels are taken as 0..1
        clamp_intensity(&mut img);

        let img = fit_channels(img, self.shape.channels)?;

        Ok(resize_image(&img, self.shape)?)
    }

    fn load_encoded(&self, path: &Path) -> Result<Image, Box<dyn Error>> {
        let decoded = image::open(path)?;
        let (w, h) = (self.shape.width as u32, self.shape.height as u32);

        let raw = if self.shape.channels == 1 {
            let mut buf = decoded.to_luma8();
            if buf.dimensions() != (w, h) {
                buf = imageops::resize(&buf, w, h, FilterType::Triangle);
            }
            buf.into_raw()
        } else {
            let mut buf = decoded.to_rgb8();
            if buf.dimensions() != (w, h) {
                buf = imageops::resize(&buf, w, h, FilterType::Triangle);
            }
            buf.into_raw()
        };

        let img = Array3::<u8>::from_shape_vec(self.shape.dim(), raw)?;

        Ok(byte_intensity(&img))
    }
}

impl ItemLoader for FileItemLoader {
    fn load(&self, index: usize, identifier: &str, labels: &LabelMap) -> LoadedItem {
        let path = self.root.join(identifier);

        if identifier.starts_with(PLACEHOLDER_PREFIX) || !path.exists() {
            debug!("No file for {}, using synthetic item", identifier);
            return synthetic_item(index, self.shape);
        }

        match self.try_load(&path) {
            Ok(image) => LoadedItem {
                image,
                label: labels.get(identifier),
            },
            Err(err) => {
                let err = CustomError::CorruptItem(format!("{} ({})", path.display(), err));
                warn!("{}. Using synthetic item", err);
                synthetic_item(index, self.shape)
            }
        }
    }

    fn shape(&self) -> ImageShape {
        self.shape
    }
}

/// Pixels in 0..1 : u8 arrays are scaled by 1/255, float arrays are kept as is
fn read_npy_any(path: &Path) -> Result<ArrayD<f32>, Box<dyn Error>> {
    if let Ok(arr) = read_npy::<_, ArrayD<f32>>(path) {
        return Ok(arr);
    }

    if let Ok(arr) = read_npy::<_, ArrayD<f64>>(path) {
        return Ok(arr.mapv(|v| v as f32));
    }

    let arr: ArrayD<u8> = read_npy(path)?;
    Ok(byte_intensity(&arr))
}

/// Gray is repeated into RGB, RGB(A) is averaged into gray, alpha is dropped
fn fit_channels(img: Image, channels: usize) -> Result<Image, CustomError> {
    let (h, w, c) = img.dim();

    if c == channels {
        return Ok(img);
    }

    match (c, channels) {
        (1, 3) => Ok(Image::from_shape_fn((h, w, 3), |(r, col, _)| img[[r, col, 0]])),
        (3, 1) | (4, 1) => Ok(Image::from_shape_fn((h, w, 1), |(r, col, _)| {
            (img[[r, col, 0]] + img[[r, col, 1]] + img[[r, col, 2]]) / 3.0
        })),
        (4, 3) => Ok(Image::from_shape_fn((h, w, 3), |(r, col, ch)| img[[r, col, ch]])),
        _ => Err(CustomError::CorruptItem(format!(
            "can't convert {} channels into {}",
            c, channels
        ))),
    }
}

/// Resizes each channel separately with a triangle filter
fn resize_image(img: &Image, shape: ImageShape) -> Result<Image, CustomError> {
    let (h, w, c) = img.dim();

    if h == shape.height && w == shape.width {
        return Ok(img.clone());
    }

    if h == 0 || w == 0 {
        return Err(CustomError::CorruptItem("empty image".to_owned()));
    }

    let mut out = Image::zeros((shape.height, shape.width, c));

    for ch in 0..c {
        let plane: Vec<f32> = img.index_axis(Axis(2), ch).iter().cloned().collect();
        let buf = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(w as u32, h as u32, plane)
            .ok_or_else(|| CustomError::CorruptItem("bad plane size".to_owned()))?;

        let resized = imageops::resize(
            &buf,
            shape.width as u32,
            shape.height as u32,
            FilterType::Triangle,
        );

        for (x, y, px) in resized.enumerate_pixels() {
            out[[y as usize, x as usize, ch]] = px.0[0];
        }
    }

    Ok(out)
}
