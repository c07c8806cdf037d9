pub mod compositor;
pub mod features;
pub mod generators;
pub mod layer;
pub mod proportions;
