//! Option Payoff Functions
//!
//! European vanilla payoffs depend only on the terminal price S_T:
//! - **Call**: max(S_T - K, 0), the right to buy at strike K
//! - **Put**: max(K - S_T, 0), the right to sell at strike K

use crate::error::{validation::validate_strike, PricingError, PricingResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// European put option: max(K - S_T, 0)
    EuropeanPut { k: f64 },
}

impl Payoff {
    pub fn strike(&self) -> f64 {
        match *self {
            Payoff::EuropeanCall { k } | Payoff::EuropeanPut { k } => k,
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        validate_strike(self.strike())
    }

    /// Payoff at maturity for terminal price `s_t`; never negative
    pub fn terminal(&self, s_t: f64) -> f64 {
        match *self {
            Payoff::EuropeanCall { k } => (s_t - k).max(0.0),
            Payoff::EuropeanPut { k } => (k - s_t).max(0.0),
        }
    }

    /// Payoff of one simulated path; only its last element (S_T) is used
    pub fn calculate(&self, path: &[f64]) -> PricingResult<f64> {
        match path.last() {
            Some(&s_t) => Ok(self.terminal(s_t)),
            None => Err(PricingError::InvalidArgument {
                parameter: "path".to_string(),
                value: 0.0,
                constraint: "must contain at least one price".to_string(),
            }),
        }
    }
}
