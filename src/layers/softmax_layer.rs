use std::f32::consts::E;

use ndarray::Zip;

use log::debug;

use super::abstract_layer::*;
use crate::util::array_helpers::{self, row_sums};
use crate::util::{Array2D, WithParams};

/// Row-wise softmax, each row of the output sums to 1
#[derive(Clone, Debug, Default)]
pub struct SoftmaxLayer {
    output: Option<Array2D>,
}

impl SoftmaxLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AbstractLayer for SoftmaxLayer {
    fn forward(&mut self, input: &Array2D) -> LayerForwardResult {
        let mut out = Array2D::zeros(input.raw_dim());

        Zip::from(input.rows())
            .and(out.rows_mut())
            .par_for_each(|inp_b, mut out_b| {
                // shift by the row max, exp() stays finite
                let row_max = array_helpers::max(&inp_b.to_owned());
                let exps = inp_b.mapv(|v| E.powf(v - row_max));
                let sum_row = exps.sum();

                out_b.assign(&(exps / sum_row));
            });

        self.output = Some(out.clone());

        debug!("[ok] SoftmaxLayer forward()");

        Ok(out)
    }

    fn backward(&mut self, error: &Array2D) -> LayerBackwardResult {
        let out = self.output.as_ref().ok_or(LayerError::NoForward)?;

        if out.dim() != error.dim() {
            return Err(LayerError::InvalidSize);
        }

        let weighted = row_sums(&(error * out));
        let prev_err = out * &(error - &weighted);

        debug!("[ok] SoftmaxLayer backward()");

        Ok(prev_err)
    }

    fn layer_type(&self) -> &str {
        "SoftmaxLayer"
    }
}

impl WithParams for SoftmaxLayer {}
