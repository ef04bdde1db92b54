pub mod mc_engine;
pub mod path_simulator;
pub mod payoffs;

pub use path_simulator::{monte_carlo_simulation, simulate, PathEnsemble, SimConfig};
