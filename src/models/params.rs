// src/models/params.rs
//! Shared market/model parameters for the analytical pricer and the path simulator.

use crate::error::{validation::*, PricingError, PricingResult};
use serde::{Deserialize, Serialize};

/// Immutable risk-neutral GBM parameters `(S0, r, σ, T)`
///
/// Invariants enforced by [`ModelParams::new`]:
/// - `s0 > 0`, `t > 0`, `sigma ≥ 0`, all finite
/// - `r` is any finite real (negative rates allowed)
///
/// `sigma = 0` is accepted here because a zero-volatility path is well
/// defined; the analytical pricer rejects it separately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModelParams", into = "RawModelParams")]
pub struct ModelParams {
    s0: f64,
    r: f64,
    sigma: f64,
    t: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawModelParams {
    s0: f64,
    r: f64,
    sigma: f64,
    t: f64,
}

impl ModelParams {
    pub fn new(s0: f64, r: f64, sigma: f64, t: f64) -> PricingResult<Self> {
        validate_positive("s0", s0)?;
        validate_finite("r", r)?;
        validate_non_negative("sigma", sigma)?;
        validate_non_negative("t", t)?;
        validate_nonzero_domain("t", t, "maturity must be positive; σ√T would be zero")?;

        Ok(Self { s0, r, sigma, t })
    }

    #[inline]
    pub fn s0(&self) -> f64 {
        self.s0
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.r
    }

    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    #[inline]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// e^(-rT)
    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.t).exp()
    }

    /// Risk-neutral forward S0·e^(rT), the expected terminal price
    pub fn forward(&self) -> f64 {
        self.s0 * (self.r * self.t).exp()
    }
}

impl TryFrom<RawModelParams> for ModelParams {
    type Error = PricingError;

    fn try_from(raw: RawModelParams) -> Result<Self, Self::Error> {
        ModelParams::new(raw.s0, raw.r, raw.sigma, raw.t)
    }
}

impl From<ModelParams> for RawModelParams {
    fn from(p: ModelParams) -> Self {
        RawModelParams {
            s0: p.s0,
            r: p.r,
            sigma: p.sigma,
            t: p.t,
        }
    }
}
