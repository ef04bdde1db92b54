pub mod gbm;
pub mod params;

pub use params::ModelParams;
