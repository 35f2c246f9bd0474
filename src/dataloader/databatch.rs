use ndarray::{Array, Axis};

use log::warn;

use crate::config::ImageShape;
use crate::util::{Array1D, Array2D, ImageBlob, Labels};

#[derive(Clone, Default, Debug)]
pub struct LabeledEntry {
    pub input: Array1D,
    pub expected: Array1D,
}

impl LabeledEntry {
    pub fn new(input: Vec<f32>, expected: Vec<f32>) -> Self {
        Self {
            input: Array::from_vec(input),
            expected: Array::from_vec(expected),
        }
    }
}

/// Flat rows ready for the layer stack
#[derive(Default, Clone, Debug)]
pub struct MiniBatch {
    pub input: Array2D,
    pub output: Array2D,
}

impl MiniBatch {
    pub fn new(b: Vec<&LabeledEntry>) -> Self {
        let inp_len = b.first().map(|e| e.input.len()).unwrap_or(0);
        let out_len = b.first().map(|e| e.expected.len()).unwrap_or(0);

        let mut inp_arr = Array2D::zeros((b.len(), inp_len));
        let mut out_arr = Array2D::zeros((b.len(), out_len));

        // Copies memory into batch

        for (idx, it) in b.iter().enumerate() {
            let mut inp_entry = inp_arr.index_axis_mut(Axis(0), idx);
            inp_entry.assign(&it.input);

            let mut out_entry = out_arr.index_axis_mut(Axis(0), idx);
            out_entry.assign(&it.expected);
        }

        Self {
            input: inp_arr,
            output: out_arr,
        }
    }

    pub fn len(&self) -> usize {
        self.input.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of ImageGenerator::next()
#[derive(Clone, Debug)]
pub struct ImageBatch {
    /// (batch, height, width, channels), values in 0..1
    pub images: ImageBlob,
    pub labels: Labels,
    /// Dataset indices in selection order
    pub indices: Vec<usize>,
}

impl ImageBatch {
    pub fn zeros(batch_size: usize, shape: ImageShape) -> Self {
        Self {
            images: ImageBlob::zeros((batch_size, shape.height, shape.width, shape.channels)),
            labels: Labels::zeros(batch_size),
            indices: Vec::with_capacity(batch_size),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Flattens each image into a row and one-hot encodes labels.
    /// Labels outside 0..num_classes give an all-zero row
    pub fn to_mini_batch(&self, num_classes: usize) -> MiniBatch {
        let batch_size = self.len();
        let row_len = self.images.len() / batch_size.max(1);

        let mut input = Array2D::zeros((batch_size, row_len));
        for (mut row, img) in input.rows_mut().into_iter().zip(self.images.outer_iter()) {
            row.iter_mut().zip(img.iter()).for_each(|(dst, src)| *dst = *src);
        }

        let mut output = Array2D::zeros((batch_size, num_classes));
        for (idx, lbl) in self.labels.iter().enumerate() {
            if *lbl >= 0 && (*lbl as usize) < num_classes {
                output[[idx, *lbl as usize]] = 1.0;
            } else {
                warn!("Label {} doesn't fit into {} classes", lbl, num_classes);
            }
        }

        MiniBatch { input, output }
    }
}
