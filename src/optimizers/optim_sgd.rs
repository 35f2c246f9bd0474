use std::collections::HashMap;

use ndarray::Zip;

use crate::optimizers::*;

/// Gradient descent with optional momentum :
/// `v = momentum * v - learn_rate * grad; w += v`
pub struct OptimizerSGD {
    pub learn_rate: f32,
    pub momentum: f32,
    pub velocity: HashMap<u64, Array2D>,
}

impl OptimizerSGD {
    pub fn new(learn_rate: f32, momentum: f32) -> Self {
        Self {
            learn_rate,
            momentum,
            velocity: HashMap::new(),
        }
    }
}

impl Default for OptimizerSGD {
    fn default() -> Self {
        Self::new(1e-2, 0.0)
    }
}

impl Optimizer for OptimizerSGD {
    fn optimize(&mut self, layer_id: u64, weights: &mut Array2D, grad: &Array2D) {
        let velocity = self
            .velocity
            .entry(layer_id)
            .or_insert_with(|| Array2D::zeros(grad.raw_dim()));

        // layer was resized
        if velocity.dim() != grad.dim() {
            *velocity = Array2D::zeros(grad.raw_dim());
        }

        let (learn_rate, momentum) = (self.learn_rate, self.momentum);

        Zip::from(weights)
            .and(velocity)
            .and(grad)
            .for_each(|w, v, g| {
                *v = momentum * *v - learn_rate * g;
                *w += *v;
            });
    }
}

impl WithParams for OptimizerSGD {
    fn cfg(&self) -> HashMap<String, Variant> {
        let mut cfg_params = HashMap::new();

        cfg_params.insert("type".to_string(), Variant::String("sgd".to_string()));
        cfg_params.insert("learning_rate".to_string(), Variant::Float(self.learn_rate));
        cfg_params.insert("momentum".to_string(), Variant::Float(self.momentum));

        cfg_params
    }

    fn set_cfg(&mut self, args: &HashMap<String, Variant>) {
        if let Some(v) = cfg_float(args, "learning_rate") {
            self.learn_rate = v;
        }

        if let Some(v) = cfg_float(args, "momentum") {
            self.momentum = v;
        }
    }
}
