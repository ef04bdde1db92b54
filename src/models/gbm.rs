// src/models/gbm.rs
//! Geometric Brownian Motion under the risk-neutral measure
//!
//! ```text
//! dS_t = μ S_t dt + σ S_t dW_t
//! ```
//!
//! The SDE has the exact solution
//! ```text
//! S_{t+dt} = S_t * exp((μ - σ²/2)dt + σ√dt * Z),   Z ~ N(0,1)
//! ```
//! so stepping with it carries no discretisation error and can never
//! produce a negative price, unlike an Euler step on S itself.

use super::params::ModelParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gbm {
    pub s0: f64,
    pub mu: f64,
    pub sigma: f64,
}

impl Gbm {
    pub fn new(s0: f64, mu: f64, sigma: f64) -> Self {
        Gbm { s0, mu, sigma }
    }

    /// Risk-neutral dynamics: drift μ = r
    pub fn from_params(params: &ModelParams) -> Self {
        Gbm::new(params.s0(), params.r(), params.sigma())
    }

    /// `((μ - σ²/2)·dt, σ·√dt)`, the mean and scale of one log-price increment
    pub fn log_increment_coefficients(&self, dt: f64) -> (f64, f64) {
        (
            (self.mu - 0.5 * self.sigma * self.sigma) * dt,
            self.sigma * dt.sqrt(),
        )
    }

    pub fn exact_step(&self, s_t: f64, dt: f64, normal_draw: f64) -> f64 {
        let (drift, vol) = self.log_increment_coefficients(dt);
        s_t * (drift + vol * normal_draw).exp()
    }
}
