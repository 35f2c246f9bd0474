mod optim_creator;
mod optim_sgd;

pub use optim_creator::*;
pub use optim_sgd::*;

use crate::err::*;
use crate::util::*;

/// Updates weights in place, per-layer state is kept under `layer_id`
pub trait Optimizer: WithParams {
    fn optimize(&mut self, layer_id: u64, weights: &mut Array2D, grad: &Array2D);
}

pub fn optimizer_from_type(opt_type: &str) -> Result<Box<dyn Optimizer>, CustomError> {
    match opt_type {
        "sgd" => Ok(Box::new(OptimizerSGD::default())),
        _ => Err(CustomError::WrongArg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_type() {
        assert!(optimizer_from_type("sgd").is_ok());
        assert!(matches!(optimizer_from_type("adam"), Err(CustomError::WrongArg)));
    }
}
