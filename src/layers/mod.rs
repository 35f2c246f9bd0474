mod abstract_layer;
mod cross_entropy_loss;
mod fc_layer;
mod relu_layer;
mod softmax_layer;

pub use abstract_layer::*;
pub use cross_entropy_loss::*;
pub use fc_layer::*;
pub use relu_layer::*;
pub use softmax_layer::*;
