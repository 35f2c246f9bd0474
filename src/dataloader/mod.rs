pub mod databatch;
pub mod dataloader;

pub mod augment;
pub mod cache;
pub mod dataset;
pub mod generator;
pub mod item_loader;
pub mod labels;
pub mod simple;

pub use augment::*;
pub use cache::*;
pub use databatch::*;
pub use dataloader::*;
pub use dataset::*;
pub use generator::*;
pub use item_loader::*;
pub use labels::*;
pub use simple::*;
