use ndarray::Zip;

use log::debug;

use super::abstract_layer::*;
use crate::activation::{relu, relu_deriv};
use crate::util::{Array2D, WithParams};

#[derive(Clone, Debug, Default)]
pub struct ReluLayer {
    input_tensor: Option<Array2D>,
}

impl ReluLayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AbstractLayer for ReluLayer {
    fn forward(&mut self, input: &Array2D) -> LayerForwardResult {
        let out = input.mapv(relu);
        self.input_tensor = Some(input.clone());

        debug!("[ok] ReluLayer forward()");

        Ok(out)
    }

    fn backward(&mut self, error: &Array2D) -> LayerBackwardResult {
        let inp = self.input_tensor.as_ref().ok_or(LayerError::NoForward)?;

        if inp.dim() != error.dim() {
            return Err(LayerError::InvalidSize);
        }

        let mut out = Array2D::zeros(error.raw_dim());

        Zip::from(&mut out)
            .and(error)
            .and(inp)
            .for_each(|out_el, err_el, inp_el| {
                *out_el = err_el * relu_deriv(*inp_el);
            });

        debug!("[ok] ReluLayer backward()");

        Ok(out)
    }

    fn layer_type(&self) -> &str {
        "ReluLayer"
    }
}

impl WithParams for ReluLayer {}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn passes_positive_part() {
        let mut l = ReluLayer::new();

        let out = l.forward(&array![[-1.0, 0.0, 2.0]]).unwrap();
        assert_eq!(out, array![[0.0, 0.0, 2.0]]);

        let err = l.backward(&array![[5.0, 5.0, 5.0]]).unwrap();
        assert_eq!(err, array![[0.0, 0.0, 5.0]]);
    }

    #[test]
    fn backward_needs_forward() {
        let mut l = ReluLayer::new();
        assert_eq!(l.backward(&array![[1.0]]), Err(LayerError::NoForward));

        l.forward(&array![[1.0, 2.0]]).unwrap();
        assert_eq!(l.backward(&array![[1.0]]), Err(LayerError::InvalidSize));
    }
}
