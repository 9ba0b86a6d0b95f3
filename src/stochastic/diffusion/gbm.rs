//! Geometric Brownian Motion
//!
//! Uses the exact log-normal step
//! S_{t+dt} = S_t exp((μ - σ²/2) dt + σ dW), dW ~ N(0, dt),
//! so prices stay strictly positive for any step size.

use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Normal;

use crate::error::HedgeError;
use crate::error::Result;
use crate::stochastic::PricePath;
use crate::traits::ProcessExt;

#[derive(ImplNew, Debug, Clone)]
pub struct GBM {
  /// Drift (risk-neutral: the risk-free rate)
  pub mu: f64,
  /// Volatility
  pub sigma: f64,
  /// Number of time steps
  pub n: usize,
  /// Initial price
  pub x0: f64,
  /// Horizon in years
  pub t: f64,
}

impl GBM {
  fn validate(&self) -> Result<()> {
    if !(self.x0.is_finite() && self.x0 > 0.0) {
      return Err(HedgeError::invalid("initial_price", self.x0));
    }
    if self.n == 0 {
      return Err(HedgeError::invalid("steps", self.n));
    }
    if !(self.t.is_finite() && self.t > 0.0) {
      return Err(HedgeError::invalid("horizon", self.t));
    }
    if !(self.sigma.is_finite() && self.sigma >= 0.0) {
      return Err(HedgeError::invalid("volatility", self.sigma));
    }
    if !self.mu.is_finite() {
      return Err(HedgeError::invalid("rate", self.mu));
    }

    Ok(())
  }

  /// Step size in years
  pub fn dt(&self) -> f64 {
    self.t / self.n as f64
  }
}

impl ProcessExt for GBM {
  type Output = PricePath;

  fn sample_using<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PricePath> {
    self.validate()?;

    let dt = self.dt();
    let normal = Normal::new(0.0, dt.sqrt()).map_err(|e| HedgeError::invalid("dt", e))?;
    let dw = Array1::random_using(self.n, normal, rng);
    let drift = (self.mu - 0.5 * self.sigma * self.sigma) * dt;

    let mut gbm = Array1::<f64>::zeros(self.n + 1);
    gbm[0] = self.x0;

    for i in 1..=self.n {
      gbm[i] = gbm[i - 1] * (drift + self.sigma * dw[i - 1]).exp();
    }

    Ok(PricePath::from(gbm))
  }
}

/// Simulate one GBM price path of `steps + 1` points.
///
/// With `seed` the path is reproducible; without it the thread-local
/// generator is consumed.
pub fn simulate_stock_path(
  s0: f64,
  rate: f64,
  sigma: f64,
  horizon: f64,
  steps: usize,
  seed: Option<u64>,
) -> Result<PricePath> {
  GBM::new(rate, sigma, steps, s0, horizon).sample_seeded(seed)
}
