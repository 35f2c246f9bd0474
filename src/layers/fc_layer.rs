use std::collections::HashMap;

use ndarray::s;

use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

use log::debug;

use super::abstract_layer::*;
use crate::optimizers::Optimizer;
use crate::util::array_helpers::with_const_column;
use crate::util::{cfg_int, Array2D, Variant, WithParams};

/// Fully-connected layer.
/// Weights are (input_size + 1, output_size), the last row is the bias
#[derive(Clone, Debug)]
pub struct FcLayer {
    pub id: u64,
    pub input_size: usize,
    pub output_size: usize,
    pub weights: Array2D,
    pub gradient_weights: Option<Array2D>,
    input_tensor: Option<Array2D>,
}

impl FcLayer {
    pub fn new(input_size: usize, output_size: usize) -> Self {
        Self {
            id: generate_layer_id(),
            input_size,
            output_size,
            weights: Self::init_weights(input_size, output_size),
            gradient_weights: None,
            input_tensor: None,
        }
    }

    fn init_weights(input_size: usize, output_size: usize) -> Array2D {
        Array2D::random((input_size + 1, output_size), Uniform::new(0.0, 1.0))
    }

    pub fn set_weights(&mut self, weights: Array2D) -> Result<(), LayerError> {
        if weights.dim() != (self.input_size + 1, self.output_size) {
            return Err(LayerError::InvalidSize);
        }

        self.weights = weights;
        Ok(())
    }
}

impl AbstractLayer for FcLayer {
    fn forward(&mut self, input: &Array2D) -> LayerForwardResult {
        if input.ncols() != self.input_size {
            return Err(LayerError::InvalidSize);
        }

        let inp = with_const_column(input, 1.0);
        let out = inp.dot(&self.weights);

        self.input_tensor = Some(inp);

        debug!("[ok] FcLayer forward()");

        Ok(out)
    }

    fn backward(&mut self, error: &Array2D) -> LayerBackwardResult {
        let inp = self.input_tensor.as_ref().ok_or(LayerError::NoForward)?;

        if error.dim() != (inp.nrows(), self.output_size) {
            return Err(LayerError::InvalidSize);
        }

        self.gradient_weights = Some(inp.t().dot(error));

        let ws = self.weights.slice(s![..self.input_size, ..]);
        let prev_err = error.dot(&ws.t());

        debug!("[ok] FcLayer backward()");

        Ok(prev_err)
    }

    fn update(&mut self, optimizer: &mut dyn Optimizer) {
        if let Some(grad) = &self.gradient_weights {
            optimizer.optimize(self.id, &mut self.weights, grad);
        }
    }

    fn trainable(&self) -> bool {
        true
    }

    fn layer_type(&self) -> &str {
        "FcLayer"
    }
}

impl WithParams for FcLayer {
    fn cfg(&self) -> HashMap<String, Variant> {
        let mut cfg: HashMap<String, Variant> = HashMap::new();

        cfg.insert(
            "input_size".to_owned(),
            Variant::Int(self.input_size as i32),
        );
        cfg.insert(
            "output_size".to_owned(),
            Variant::Int(self.output_size as i32),
        );

        cfg
    }

    /// Carefull, a size change reinitializes the weights
    fn set_cfg(&mut self, cfg: &HashMap<String, Variant>) {
        let input_size = cfg_int(cfg, "input_size").map(|v| v as usize);
        let output_size = cfg_int(cfg, "output_size").map(|v| v as usize);

        let input_size = input_size.filter(|v| *v > 0).unwrap_or(self.input_size);
        let output_size = output_size.filter(|v| *v > 0).unwrap_or(self.output_size);

        if input_size != self.input_size || output_size != self.output_size {
            self.input_size = input_size;
            self.output_size = output_size;
            self.weights = Self::init_weights(input_size, output_size);
            self.gradient_weights = None;
            self.input_tensor = None;
        }
    }
}
