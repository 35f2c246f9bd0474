use ndarray::Zip;

use log::debug;

use super::abstract_layer::*;
use crate::util::Array2D;

/// Cross-entropy against one-hot labels, expects probabilities as input
#[derive(Clone, Debug, Default)]
pub struct CrossEntropyLoss {
    prediction: Option<Array2D>,
}

impl CrossEntropyLoss {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LossLayer for CrossEntropyLoss {
    fn forward(&mut self, prediction: &Array2D, label: &Array2D) -> Result<f32, LayerError> {
        if prediction.dim() != label.dim() {
            return Err(LayerError::InvalidSize);
        }

        let mut loss = 0.0;

        Zip::from(prediction).and(label).for_each(|pred, lbl| {
            if *lbl == 1.0 {
                loss -= (pred + f32::EPSILON).ln();
            }
        });

        self.prediction = Some(prediction.clone());

        debug!("[ok] CrossEntropyLoss forward() : {}", loss);

        Ok(loss)
    }

    fn backward(&mut self, label: &Array2D) -> LayerBackwardResult {
        let pred = self.prediction.as_ref().ok_or(LayerError::NoForward)?;

        if pred.dim() != label.dim() {
            return Err(LayerError::InvalidSize);
        }

        let mut err = Array2D::zeros(label.raw_dim());

        Zip::from(&mut err)
            .and(label)
            .and(pred)
            .for_each(|err_el, lbl, pred| {
                *err_el = -lbl / (pred + f32::EPSILON);
            });

        Ok(err)
    }

    fn layer_type(&self) -> &str {
        "CrossEntropyLoss"
    }
}
