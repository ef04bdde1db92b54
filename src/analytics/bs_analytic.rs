// src/analytics/bs_analytic.rs
//! Analytical Black-Scholes formulas for European options and Greeks
//!
//! # Mathematical Foundation
//!
//! Under the Black-Scholes model, the underlying asset follows:
//! ```text
//! dS_t = r S_t dt + σ S_t dW_t
//! ```
//!
//! The risk-neutral pricing formula gives:
//! ```text
//! V(S,t) = e^(-r(T-t)) * E^Q[payoff(S_T) | S_t = S]
//! ```
//!
//! For European options, this has closed-form solutions involving
//! the cumulative normal distribution function Φ(x):
//! ```text
//! d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
//! d₂ = d₁ - σ√T
//! C  = S*Φ(d₁) - K*e^(-rT)*Φ(d₂)
//! P  = K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)
//! ```

use crate::error::{validation::*, PricingError, PricingResult};
use crate::math_utils::{norm_cdf, norm_pdf};
use crate::models::ModelParams;
use serde::{Deserialize, Serialize};

const METHOD: &str = "Black-Scholes";

fn ensure_finite(quantity: &str, value: f64) -> PricingResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::NumericalInstability {
            method: METHOD.to_string(),
            reason: format!("{} evaluated to {}; parameters are too extreme", quantity, value),
        })
    }
}

/// First-order (and gamma) sensitivities of a European option
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ, per unit of volatility
    pub vega: f64,
    /// ∂V/∂t, per year
    pub theta: f64,
    /// ∂V/∂r, per unit of rate
    pub rho: f64,
}

impl Greeks {
    fn checked(self) -> PricingResult<Self> {
        ensure_finite("delta", self.delta)?;
        ensure_finite("gamma", self.gamma)?;
        ensure_finite("vega", self.vega)?;
        ensure_finite("theta", self.theta)?;
        ensure_finite("rho", self.rho)?;
        Ok(self)
    }
}

/// Closed-form Black-Scholes pricer over fixed model parameters
///
/// # Examples
/// ```
/// use options_core::analytics::bs_analytic::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2, 1.0).unwrap();
/// let call = bs.call_price(100.0).unwrap();
/// let put = bs.put_price(100.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    params: ModelParams,
}

impl BlackScholes {
    /// Build a pricer from raw inputs.
    ///
    /// # Errors
    /// - `InvalidArgument` for non-positive `s0`, negative `sigma` or `t`, non-finite inputs
    /// - `DomainError` for `sigma == 0` or `t == 0` (d₁ is undefined)
    pub fn new(s0: f64, r: f64, sigma: f64, t: f64) -> PricingResult<Self> {
        Self::from_params(ModelParams::new(s0, r, sigma, t)?)
    }

    pub fn from_params(params: ModelParams) -> PricingResult<Self> {
        validate_nonzero_domain(
            "sigma",
            params.sigma(),
            "Black-Scholes d1 divides by σ√T; zero volatility is undefined",
        )?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ModelParams {
        &self.params
    }

    fn vol_sqrt_t(&self) -> f64 {
        self.params.sigma() * self.params.t().sqrt()
    }

    fn d1_unchecked(&self, k: f64) -> f64 {
        let p = &self.params;
        ((p.s0() / k).ln() + (p.r() + 0.5 * p.sigma() * p.sigma()) * p.t()) / self.vol_sqrt_t()
    }

    fn d1_d2(&self, k: f64) -> PricingResult<(f64, f64)> {
        validate_strike(k)?;
        let d1 = ensure_finite("d1", self.d1_unchecked(k))?;
        let d2 = ensure_finite("d2", d1 - self.vol_sqrt_t())?;
        Ok((d1, d2))
    }

    /// d₁ = [ln(S/K) + (r + σ²/2)T] / (σ√T)
    pub fn d1(&self, k: f64) -> PricingResult<f64> {
        Ok(self.d1_d2(k)?.0)
    }

    /// d₂ = d₁ - σ√T
    pub fn d2(&self, k: f64) -> PricingResult<f64> {
        Ok(self.d1_d2(k)?.1)
    }

    /// European call price `S*Φ(d₁) - K*e^(-rT)*Φ(d₂)`.
    ///
    /// Never negative: when both terms are tiny, rounding below zero is
    /// floored at zero. A non-finite result (e.g. `K·e^(-rT)` overflowing)
    /// is a `NumericalInstability` error.
    pub fn call_price(&self, k: f64) -> PricingResult<f64> {
        let (d1, d2) = self.d1_d2(k)?;
        let p = &self.params;
        let price = p.s0() * norm_cdf(d1) - k * p.discount_factor() * norm_cdf(d2);
        Ok(ensure_finite("call price", price)?.max(0.0))
    }

    /// European put price `K*e^(-rT)*Φ(-d₂) - S*Φ(-d₁)`
    pub fn put_price(&self, k: f64) -> PricingResult<f64> {
        let (d1, d2) = self.d1_d2(k)?;
        let p = &self.params;
        let price = k * p.discount_factor() * norm_cdf(-d2) - p.s0() * norm_cdf(-d1);
        Ok(ensure_finite("put price", price)?.max(0.0))
    }

    /// Call Greeks
    ///
    /// ```text
    /// Δ = Φ(d₁)
    /// Γ = φ(d₁) / (S σ √T)
    /// ν = S φ(d₁) √T
    /// Θ = -S φ(d₁) σ / (2√T) - r K e^(-rT) Φ(d₂)
    /// ρ = K T e^(-rT) Φ(d₂)
    /// ```
    pub fn call_greeks(&self, k: f64) -> PricingResult<Greeks> {
        let (d1, d2) = self.d1_d2(k)?;
        let p = &self.params;
        let df = p.discount_factor();
        Greeks {
            delta: norm_cdf(d1),
            gamma: self.gamma_at(d1),
            vega: self.vega_at(d1),
            theta: self.theta_decay_at(d1) - p.r() * k * df * norm_cdf(d2),
            rho: k * p.t() * df * norm_cdf(d2),
        }
        .checked()
    }

    /// Put Greeks; gamma and vega coincide with the call's
    ///
    /// ```text
    /// Δ = Φ(d₁) - 1
    /// Θ = -S φ(d₁) σ / (2√T) + r K e^(-rT) Φ(-d₂)
    /// ρ = -K T e^(-rT) Φ(-d₂)
    /// ```
    pub fn put_greeks(&self, k: f64) -> PricingResult<Greeks> {
        let (d1, d2) = self.d1_d2(k)?;
        let p = &self.params;
        let df = p.discount_factor();
        Greeks {
            delta: norm_cdf(d1) - 1.0,
            gamma: self.gamma_at(d1),
            vega: self.vega_at(d1),
            theta: self.theta_decay_at(d1) + p.r() * k * df * norm_cdf(-d2),
            rho: -k * p.t() * df * norm_cdf(-d2),
        }
        .checked()
    }

    fn gamma_at(&self, d1: f64) -> f64 {
        norm_pdf(d1) / (self.params.s0() * self.vol_sqrt_t())
    }

    fn vega_at(&self, d1: f64) -> f64 {
        self.params.s0() * norm_pdf(d1) * self.params.t().sqrt()
    }

    // Volatility part of theta shared by calls and puts
    fn theta_decay_at(&self, d1: f64) -> f64 {
        let p = &self.params;
        -p.s0() * norm_pdf(d1) * p.sigma() / (2.0 * p.t().sqrt())
    }
}

/// Black-Scholes European call option price from flat arguments
pub fn bs_call_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> PricingResult<f64> {
    BlackScholes::new(s, r, sigma, t)?.call_price(k)
}

/// Black-Scholes European put option price from flat arguments
pub fn bs_put_price(s: f64, k: f64, r: f64, sigma: f64, t: f64) -> PricingResult<f64> {
    BlackScholes::new(s, r, sigma, t)?.put_price(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn atm() -> BlackScholes {
        BlackScholes::new(100.0, 0.05, 0.2, 1.0).unwrap()
    }

    #[test]
    fn test_reference_prices() {
        let bs = atm();
        assert_abs_diff_eq!(bs.call_price(100.0).unwrap(), 10.450_583_572_185_565, epsilon = 1e-8);
        assert_abs_diff_eq!(bs.put_price(100.0).unwrap(), 5.573_526_022_256_971, epsilon = 1e-8);
    }

    #[test]
    fn test_d1_d2() {
        let bs = atm();
        assert_relative_eq!(bs.d1(100.0).unwrap(), 0.35, max_relative = 1e-12);
        assert_relative_eq!(bs.d2(100.0).unwrap(), 0.15, max_relative = 1e-12);
    }

    #[test]
    fn test_put_call_parity() {
        let bs = atm();
        for &k in &[50.0, 80.0, 100.0, 120.0, 250.0] {
            let lhs = bs.call_price(k).unwrap() - bs.put_price(k).unwrap();
            let rhs = 100.0 - k * (-0.05_f64).exp();
            assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_invalid_strike() {
        let bs = atm();
        for k in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(bs.call_price(k).unwrap_err().is_invalid_argument());
            assert!(bs.put_price(k).unwrap_err().is_invalid_argument());
            assert!(bs.call_greeks(k).unwrap_err().is_invalid_argument());
        }
    }

    #[test]
    fn test_zero_volatility_is_domain_error() {
        assert!(BlackScholes::new(100.0, 0.05, 0.0, 1.0)
            .unwrap_err()
            .is_domain_error());
        assert!(bs_call_price(100.0, 100.0, 0.05, 0.0, 1.0)
            .unwrap_err()
            .is_domain_error());
    }

    #[test]
    fn test_zero_maturity_is_domain_error() {
        assert!(BlackScholes::new(100.0, 0.05, 0.2, 0.0)
            .unwrap_err()
            .is_domain_error());
        assert!(bs_put_price(100.0, 100.0, 0.05, 0.2, 0.0)
            .unwrap_err()
            .is_domain_error());
    }

    #[test]
    fn test_negative_volatility_is_invalid_argument() {
        assert!(BlackScholes::new(100.0, 0.05, -0.2, 1.0)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_greeks_reference_values() {
        let g = atm().call_greeks(100.0).unwrap();
        assert_abs_diff_eq!(g.delta, 0.636_830_651_175_619, epsilon = 1e-9);
        assert_abs_diff_eq!(g.gamma, 0.018_762_017_345_847, epsilon = 1e-9);
        assert_abs_diff_eq!(g.vega, 37.524_034_691_693_79, epsilon = 1e-6);
        assert_abs_diff_eq!(g.rho, 53.232_481_545_376_34, epsilon = 1e-5);
        assert_abs_diff_eq!(g.theta, -6.414_027_546_438_197, epsilon = 1e-5);
    }

    #[test]
    fn test_put_greeks_relations() {
        let bs = atm();
        let c = bs.call_greeks(110.0).unwrap();
        let p = bs.put_greeks(110.0).unwrap();
        let df = (-0.05_f64).exp();

        assert_abs_diff_eq!(c.delta - p.delta, 1.0, epsilon = 1e-14);
        assert_eq!(c.gamma, p.gamma);
        assert_eq!(c.vega, p.vega);
        // d/dr of parity: ρ_c - ρ_p = K T e^(-rT)
        assert_abs_diff_eq!(c.rho - p.rho, 110.0 * df, epsilon = 1e-10);
        // d/dt of parity: Θ_c - Θ_p = -r K e^(-rT)
        assert_abs_diff_eq!(c.theta - p.theta, -0.05 * 110.0 * df, epsilon = 1e-10);
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let h = 1e-4;
        let up = BlackScholes::new(100.0 + h, 0.05, 0.2, 1.0).unwrap();
        let down = BlackScholes::new(100.0 - h, 0.05, 0.2, 1.0).unwrap();
        let fd = (up.call_price(95.0).unwrap() - down.call_price(95.0).unwrap()) / (2.0 * h);
        assert_abs_diff_eq!(atm().call_greeks(95.0).unwrap().delta, fd, epsilon = 1e-7);
    }

    #[test]
    fn test_overflowing_discount_is_an_error() {
        // K·e^(-rT) = ∞ here; the call would be ∞·0 = NaN and the put ∞
        let bs = BlackScholes::new(100.0, -1000.0, 0.2, 1.0).unwrap();
        for result in [bs.call_price(100.0), bs.put_price(100.0)] {
            assert!(matches!(
                result,
                Err(PricingError::NumericalInstability { .. })
            ));
        }
        assert!(bs.call_greeks(100.0).is_err());
        assert!(bs.put_greeks(100.0).is_err());
    }

    #[test]
    fn test_overflowing_volatility_is_an_error() {
        // σ² overflows, so d1 and d2 are not finite
        let bs = BlackScholes::new(100.0, 0.05, 1e200, 1.0).unwrap();
        assert!(matches!(
            bs.call_price(100.0),
            Err(PricingError::NumericalInstability { .. })
        ));
        assert!(matches!(
            bs.put_price(100.0),
            Err(PricingError::NumericalInstability { .. })
        ));
        assert!(bs.d1(100.0).is_err());
    }

    #[test]
    fn test_large_but_finite_volatility_prices_near_spot() {
        // As σ grows the call tends to S0 and the put to K·e^(-rT)
        let bs = BlackScholes::new(100.0, 0.05, 50.0, 1.0).unwrap();
        assert_abs_diff_eq!(bs.call_price(100.0).unwrap(), 100.0, epsilon = 1e-6);
        let discounted_strike = 100.0 * (-0.05_f64).exp();
        assert_abs_diff_eq!(bs.put_price(100.0).unwrap(), discounted_strike, epsilon = 1e-6);
    }

    #[test]
    fn test_deep_otm_call_is_non_negative() {
        let bs = BlackScholes::new(1.0, 0.0, 0.05, 0.01).unwrap();
        let price = bs.call_price(1_000.0).unwrap();
        assert!(price >= 0.0);
        assert!(price < 1e-12);
    }
}
