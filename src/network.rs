use std::vec::Vec;

use ndarray::Zip;

use ndarray_stats::QuantileExt;

use log::{debug, info};

use crate::dataloader::DataLoader;
use crate::layers::*;
use crate::optimizers::Optimizer;
use crate::util::Array2D;

/// Neural-Network : a layer stack with a loss on top.
/// Training is driven by the caller, one `forward()` + `backward()` per step
pub struct NeuralNetwork {
    layers: Vec<Box<dyn AbstractLayer>>,
    loss_layer: Box<dyn LossLayer>,
    optimizer: Box<dyn Optimizer>,
    dataloader: Box<dyn DataLoader>,
    loss: Vec<f32>,
    label: Option<Array2D>,
}

impl NeuralNetwork {
    pub fn new(
        optimizer: Box<dyn Optimizer>,
        loss_layer: Box<dyn LossLayer>,
        dataloader: Box<dyn DataLoader>,
    ) -> Self {
        Self {
            layers: Vec::new(),
            loss_layer,
            optimizer,
            dataloader,
            loss: Vec::new(),
            label: None,
        }
    }

    pub fn append_layer(&mut self, layer: Box<dyn AbstractLayer>) {
        info!("Appending {} layer", layer.layer_type());
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Box<dyn AbstractLayer>] {
        &self.layers
    }

    fn feedforward(&mut self, input: &Array2D) -> LayerForwardResult {
        let mut out = input.clone();

        for l in self.layers.iter_mut() {
            out = l.forward(&out)?;
        }

        Ok(out)
    }

    /// Pulls the next batch, runs it through the stack, records and returns the loss
    pub fn forward(&mut self) -> Result<f32, LayerError> {
        let batch = self.dataloader.next_batch();

        if batch.is_empty() {
            return Err(LayerError::Other("data loader returned an empty batch".to_owned()));
        }

        let prediction = self.feedforward(&batch.input)?;
        let loss = self.loss_layer.forward(&prediction, &batch.output)?;

        self.loss.push(loss);
        self.label = Some(batch.output);

        debug!("[ok] NeuralNetwork forward() : loss {}", loss);

        Ok(loss)
    }

    /// Propagates the error of the last forward pass and updates trainable layers
    pub fn backward(&mut self) -> Result<(), LayerError> {
        let label = self.label.as_ref().ok_or(LayerError::NoForward)?;
        let mut err = self.loss_layer.backward(label)?;

        for l in self.layers.iter_mut().rev() {
            err = l.backward(&err)?;

            if l.trainable() {
                l.update(self.optimizer.as_mut());
            }
        }

        debug!("[ok] NeuralNetwork backward()");

        Ok(())
    }

    /// Layers only, the loss layer is skipped
    pub fn test(&mut self, input: &Array2D) -> LayerForwardResult {
        self.feedforward(input)
    }

    pub fn loss_history(&self) -> &[f32] {
        &self.loss
    }
}

/// Share of rows where the prediction argmax hits the label argmax
pub fn accuracy(prediction: &Array2D, label: &Array2D) -> f32 {
    if prediction.nrows() == 0 || prediction.dim() != label.dim() {
        return 0.0;
    }

    let mut hits = 0;

    Zip::from(prediction.rows())
        .and(label.rows())
        .for_each(|pred_r, lbl_r| {
            if let (Ok(p), Ok(l)) = (pred_r.argmax(), lbl_r.argmax()) {
                if p == l {
                    hits += 1;
                }
            }
        });

    hits as f32 / prediction.nrows() as f32
}
