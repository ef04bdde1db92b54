// src/mc/mc_engine.rs
use crate::error::{validation::*, PricingError, PricingResult};
use crate::mc::path_simulator::simulate;
use crate::mc::payoffs::Payoff;
use crate::models::ModelParams;
use crate::rng::RngFactory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McConfig {
    pub paths: usize,
    pub steps: usize,
    pub seed: u64,
    pub payoff: Payoff,
}

impl McConfig {
    /// Validate the Monte Carlo configuration
    pub fn validate(&self) -> PricingResult<()> {
        validate_ensemble_size(self.paths, self.steps)?;
        self.payoff.validate()
    }
}

impl Default for McConfig {
    fn default() -> Self {
        McConfig {
            paths: 100_000,
            steps: 1,
            seed: 12345,
            payoff: Payoff::EuropeanCall { k: 100.0 },
        }
    }
}

/// Discounted Monte Carlo price with the variance of the estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McEstimate {
    pub price: f64,
    /// Variance of `price` as an estimator (sample variance / paths)
    pub variance: f64,
    pub std_error: f64,
    pub paths: usize,
}

impl McEstimate {
    /// `price ± z * std_error`
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        (self.price - z * self.std_error, self.price + z * self.std_error)
    }
}

/// Monte Carlo price of a European option under risk-neutral GBM
///
/// # Math Framework
///
/// ```text
/// V ≈ e^(-rT) * (1/N) ∑ payoff(S_T^(i))
/// Var[V] ≈ e^(-2rT) * s² / N
/// ```
/// where `s²` is the unbiased sample variance of the undiscounted payoffs.
/// Terminal prices come from [`simulate`], so intermediate steps only matter
/// for reproducing a particular ensemble; the estimate is unbiased for any
/// `steps ≥ 1`.
///
/// # Errors
///
/// Returns `PricingError` for:
/// - Invalid configuration (zero paths/steps, non-positive strike)
/// - Non-finite simulated prices or estimates
pub fn mc_price_european(params: &ModelParams, cfg: &McConfig) -> PricingResult<McEstimate> {
    cfg.validate()?;
    let ensemble = simulate(params, cfg.paths, cfg.steps, &RngFactory::new(cfg.seed))?;
    let n = cfg.paths as f64;
    let discount = params.discount_factor();

    let payoffs = ensemble
        .terminal_prices()
        .mapv(|s_t| cfg.payoff.terminal(s_t));
    let mean_payoff = payoffs.sum() / n;
    let sample_variance = if cfg.paths > 1 { payoffs.var(1.0) } else { 0.0 };

    let price = discount * mean_payoff;
    let variance = discount * discount * sample_variance / n;

    if !price.is_finite() || !variance.is_finite() {
        return Err(PricingError::NumericalInstability {
            method: "Monte Carlo".to_string(),
            reason: format!("estimate is not finite: price {}, variance {}", price, variance),
        });
    }

    let estimate = McEstimate {
        price,
        variance,
        std_error: variance.sqrt(),
        paths: cfg.paths,
    };
    tracing::debug!(
        price = estimate.price,
        std_error = estimate.std_error,
        paths = cfg.paths,
        seed = cfg.seed,
        "Monte Carlo European estimate"
    );
    Ok(estimate)
}
