// src/mc/path_simulator.rs
//! Monte Carlo path generation for risk-neutral GBM
//!
//! Each path is advanced with the exact lognormal transition
//! ```text
//! S_{i+1} = S_i * exp((r - σ²/2)dt + σ√dt * Z_i),   Z_i ~ N(0,1)
//! ```
//! with a fresh draw per (path, step). Paths are generated in parallel, each
//! from its own generator `RngFactory::path_rng(path_id)`, so an ensemble is
//! bit-identical for a fixed master seed whatever the thread count.

use crate::error::{validation::*, PricingError, PricingResult};
use crate::math_utils::Timer;
use crate::models::{gbm::Gbm, ModelParams};
use crate::rng::{self, RngFactory};
use ndarray::{Array2, ArrayView1, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

const METHOD: &str = "GBM path simulation";

/// Simulation resolution and seeding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub n_paths: usize,
    pub n_steps: usize,
    /// Master seed; `None` draws one from entropy (and logs it)
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            n_paths: 10_000,
            n_steps: 252,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> PricingResult<()> {
        validate_ensemble_size(self.n_paths, self.n_steps).map(|_| ())
    }

    pub fn rng_factory(&self) -> RngFactory {
        match self.seed {
            Some(seed) => RngFactory::new(seed),
            None => RngFactory::from_entropy(),
        }
    }
}

/// `n_paths` simulated trajectories of `n_steps + 1` prices each.
///
/// Row `i` is path `i`; column `0` is exactly `S0`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    prices: Array2<f64>,
    t: f64,
}

impl PathEnsemble {
    /// `(n_paths, n_steps + 1)`
    pub fn shape(&self) -> (usize, usize) {
        self.prices.dim()
    }

    pub fn n_paths(&self) -> usize {
        self.prices.nrows()
    }

    pub fn n_steps(&self) -> usize {
        self.prices.ncols() - 1
    }

    pub fn path(&self, path_id: usize) -> Option<ArrayView1<'_, f64>> {
        (path_id < self.n_paths()).then(|| self.prices.row(path_id))
    }

    pub fn paths(&self) -> &Array2<f64> {
        &self.prices
    }

    pub fn into_array(self) -> Array2<f64> {
        self.prices
    }

    pub fn terminal_prices(&self) -> ArrayView1<'_, f64> {
        self.prices.column(self.n_steps())
    }

    /// Observation times `0, dt, ..., T`
    pub fn time_grid(&self) -> Vec<f64> {
        let n = self.n_steps();
        let dt = self.t / n as f64;
        (0..=n)
            .map(|i| if i == n { self.t } else { i as f64 * dt })
            .collect()
    }

    pub fn terminal_mean(&self) -> f64 {
        self.terminal_prices().sum() / self.n_paths() as f64
    }

    /// Standard error of [`terminal_mean`](Self::terminal_mean); zero for a single path
    pub fn terminal_std_error(&self) -> f64 {
        let n = self.n_paths();
        if n < 2 {
            return 0.0;
        }
        self.terminal_prices().std(1.0) / (n as f64).sqrt()
    }
}

/// Simulate `n_paths` GBM trajectories of `n_steps` steps over `[0, T]`.
///
/// # Errors
///
/// - `InvalidArgument` if `n_paths == 0`, `n_steps == 0`, or the ensemble
///   does not fit in memory
/// - `NumericalInstability` if a price underflows to zero or overflows
pub fn simulate(
    params: &ModelParams,
    n_paths: usize,
    n_steps: usize,
    rng: &RngFactory,
) -> PricingResult<PathEnsemble> {
    validate_ensemble_size(n_paths, n_steps)?;
    let timer = Timer::new();

    let gbm = Gbm::from_params(params);
    let dt = params.t() / n_steps as f64;
    let (drift, vol) = gbm.log_increment_coefficients(dt);

    // Column 0 keeps S0; each row is filled by exactly one task
    let mut prices = Array2::from_elem((n_paths, n_steps + 1), gbm.s0);
    prices
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .try_for_each(|(path_id, mut path)| {
            let mut path_rng = rng.path_rng(path_id as u64);
            let mut current_s = gbm.s0;
            for step in 1..=n_steps {
                let z = rng::get_normal_draw(&mut path_rng);
                current_s *= (drift + vol * z).exp();
                if !(current_s.is_finite() && current_s > 0.0) {
                    tracing::warn!(path_id, step, price = current_s, "simulated price left (0, inf)");
                    return Err(PricingError::NumericalInstability {
                        method: METHOD.to_string(),
                        reason: format!(
                            "path {} step {} produced price {}; parameters are too extreme",
                            path_id, step, current_s
                        ),
                    });
                }
                path[step] = current_s;
            }
            Ok(())
        })?;

    tracing::debug!(
        n_paths,
        n_steps,
        seed = rng.seed(),
        elapsed_ms = timer.elapsed_ms(),
        "simulated GBM ensemble"
    );

    Ok(PathEnsemble {
        prices,
        t: params.t(),
    })
}

/// [`simulate`] with resolution and seed taken from a [`SimConfig`]
pub fn simulate_with_config(params: &ModelParams, cfg: &SimConfig) -> PricingResult<PathEnsemble> {
    cfg.validate()?;
    simulate(params, cfg.n_paths, cfg.n_steps, &cfg.rng_factory())
}

/// Flat-argument form returning the raw `(n_paths, n_steps + 1)` array
pub fn monte_carlo_simulation(
    s0: f64,
    r: f64,
    sigma: f64,
    t: f64,
    n_paths: usize,
    n_steps: usize,
    seed: Option<u64>,
) -> PricingResult<Array2<f64>> {
    let params = ModelParams::new(s0, r, sigma, t)?;
    let cfg = SimConfig {
        n_paths,
        n_steps,
        seed,
    };
    Ok(simulate_with_config(&params, &cfg)?.into_array())
}
