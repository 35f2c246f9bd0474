mod util;
mod normalize;
pub mod array_helpers;
pub mod with_params;

pub use util::*;
pub use normalize::*;
pub use with_params::*;
