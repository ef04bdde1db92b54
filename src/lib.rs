//! # options-core: Black-Scholes and GBM Monte Carlo for European Options
//!
//! Two independent components over a shared [`ModelParams`] value
//! `(S0, r, σ, T)`:
//!
//! - **Analytical pricer** ([`analytics::bs_analytic::BlackScholes`]): closed-form
//!   European call/put prices and Greeks.
//! - **Path simulator** ([`mc::path_simulator::simulate`]): Monte Carlo
//!   trajectories of risk-neutral geometric Brownian motion sampled from the
//!   exact lognormal transition, generated in parallel with one reproducible
//!   random substream per path.
//!
//! A small Monte Carlo engine ([`mc::mc_engine::mc_price_european`]) prices
//! European payoffs from a simulated ensemble.
//!
//! ## Quick Start
//!
//! ```rust
//! use options_core::analytics::BlackScholes;
//! use options_core::mc::simulate;
//! use options_core::rng::RngFactory;
//! use options_core::ModelParams;
//!
//! let params = ModelParams::new(100.0, 0.05, 0.2, 1.0).expect("valid parameters");
//!
//! let bs = BlackScholes::from_params(params).expect("σ > 0");
//! let call = bs.call_price(100.0).expect("valid strike");
//! assert!((call - 10.4506).abs() < 1e-4);
//!
//! let paths = simulate(&params, 1_000, 252, &RngFactory::new(42)).expect("valid resolution");
//! assert_eq!(paths.shape(), (1_000, 253));
//! assert!(paths.paths().column(0).iter().all(|&s| s == 100.0));
//! ```
//!
//! ## Errors
//!
//! Every public operation validates its inputs and returns
//! [`PricingResult`]; NaN or infinite values are never returned silently.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (simulation size, seed, timings) and
//! never installs a subscriber.

pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod rng;

pub use error::{PricingError, PricingResult};
pub use models::ModelParams;
