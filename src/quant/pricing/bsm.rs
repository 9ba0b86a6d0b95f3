//! # Black-Scholes
//!
//! $$
//! d_{1}=\frac{\ln(S/K)+(r+\tfrac12\sigma^2)\tau}{\sigma\sqrt\tau},\quad d_2=d_1-\sigma\sqrt\tau
//! $$
//!
//! Closed-form European price, delta, gamma and vega. At or past expiry the
//! pricer returns intrinsic value with a binary delta and zero gamma/vega.
//! Zero volatility with time left is rejected with
//! [`HedgeError::DegenerateVolatility`].

use statrs::distribution::Continuous;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use crate::error::HedgeError;
use crate::error::Result;
use crate::quant::OptionType;
use crate::quant::PriceQuote;
use crate::traits::PricerExt;

#[derive(Debug, Clone, Copy)]
pub struct BSMPricer {
  /// Underlying price
  pub s: f64,
  /// Volatility
  pub v: f64,
  /// Strike price
  pub k: f64,
  /// Risk-free rate
  pub r: f64,
  /// Time to maturity in years
  pub tau: f64,
  /// Option type
  pub option_type: OptionType,
}

impl BSMPricer {
  pub fn new(s: f64, v: f64, k: f64, r: f64, tau: f64, option_type: OptionType) -> Self {
    Self {
      s,
      v,
      k,
      r,
      tau,
      option_type,
    }
  }

  pub fn builder(s: f64, v: f64, k: f64, r: f64) -> BSMPricerBuilder {
    BSMPricerBuilder {
      s,
      v,
      k,
      r,
      tau: 0.0,
      option_type: OptionType::Call,
    }
  }
}

pub struct BSMPricerBuilder {
  s: f64,
  v: f64,
  k: f64,
  r: f64,
  tau: f64,
  option_type: OptionType,
}

impl BSMPricerBuilder {
  pub fn tau(mut self, tau: f64) -> Self {
    self.tau = tau;
    self
  }
  pub fn option_type(mut self, option_type: OptionType) -> Self {
    self.option_type = option_type;
    self
  }
  pub fn build(self) -> BSMPricer {
    BSMPricer {
      s: self.s,
      v: self.v,
      k: self.k,
      r: self.r,
      tau: self.tau,
      option_type: self.option_type,
    }
  }
}

impl PricerExt for BSMPricer {
  fn tau(&self) -> f64 {
    self.tau
  }

  fn calculate_call_put(&self) -> Result<(f64, f64)> {
    self.validate()?;

    if self.is_expired() {
      return Ok(((self.s - self.k).max(0.0), (self.k - self.s).max(0.0)));
    }

    let (d1, d2) = self.d1_d2();
    let n = Normal::default();
    let df = (-self.r * self.tau).exp();

    let call = self.s * n.cdf(d1) - self.k * df * n.cdf(d2);
    let put = self.k * df * n.cdf(-d2) - self.s * n.cdf(-d1);

    Ok((call, put))
  }

  fn quote(&self) -> Result<PriceQuote> {
    self.validate()?;

    if self.is_expired() {
      return Ok(self.intrinsic());
    }

    let (call, put) = self.calculate_call_put()?;
    let price = match self.option_type {
      OptionType::Call => call,
      OptionType::Put => put,
    };

    Ok(PriceQuote {
      price,
      delta: self.delta(),
      gamma: self.gamma(),
      vega: self.vega(),
    })
  }
}

impl BSMPricer {
  fn validate(&self) -> Result<()> {
    if !(self.s.is_finite() && self.s > 0.0) {
      return Err(HedgeError::invalid("spot", self.s));
    }
    if !(self.k.is_finite() && self.k > 0.0) {
      return Err(HedgeError::invalid("strike", self.k));
    }
    if !(self.v.is_finite() && self.v >= 0.0) {
      return Err(HedgeError::invalid("volatility", self.v));
    }
    if !self.r.is_finite() {
      return Err(HedgeError::invalid("rate", self.r));
    }
    if self.tau.is_nan() || self.tau == f64::INFINITY {
      return Err(HedgeError::invalid("tau", self.tau));
    }
    if !self.is_expired() && self.v == 0.0 {
      return Err(HedgeError::DegenerateVolatility { tau: self.tau });
    }

    Ok(())
  }

  fn is_expired(&self) -> bool {
    self.tau <= 0.0
  }

  /// Payoff at expiry. Delta is 0.0 exactly at the money for both types.
  fn intrinsic(&self) -> PriceQuote {
    let (price, delta) = match self.option_type {
      OptionType::Call => (
        (self.s - self.k).max(0.0),
        if self.s > self.k { 1.0 } else { 0.0 },
      ),
      OptionType::Put => (
        (self.k - self.s).max(0.0),
        if self.s < self.k { -1.0 } else { 0.0 },
      ),
    };

    PriceQuote {
      price,
      delta,
      gamma: 0.0,
      vega: 0.0,
    }
  }

  /// Calculate d1 and d2. Requires `tau > 0` and `v > 0`.
  pub fn d1_d2(&self) -> (f64, f64) {
    let vol_sqrt_t = self.v * self.tau.sqrt();
    let d1 = ((self.s / self.k).ln() + (self.r + 0.5 * self.v.powi(2)) * self.tau) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    (d1, d2)
  }

  /// Calculate the delta
  pub fn delta(&self) -> f64 {
    let (d1, _) = self.d1_d2();
    let n = Normal::default();

    match self.option_type {
      OptionType::Call => n.cdf(d1),
      OptionType::Put => -n.cdf(-d1),
    }
  }

  /// Calculate the gamma
  pub fn gamma(&self) -> f64 {
    let (d1, _) = self.d1_d2();
    let n = Normal::default();

    n.pdf(d1) / (self.s * self.v * self.tau.sqrt())
  }

  /// Calculate the vega
  pub fn vega(&self) -> f64 {
    let (d1, _) = self.d1_d2();
    let n = Normal::default();

    self.s * n.pdf(d1) * self.tau.sqrt()
  }
}

/// Black-Scholes price and Greeks for a European option.
///
/// Argument order follows the usual `(S, K, r, T, σ)` convention.
pub fn bs_greeks(
  spot: f64,
  strike: f64,
  rate: f64,
  tau: f64,
  sigma: f64,
  option_type: OptionType,
) -> Result<PriceQuote> {
  BSMPricer::new(spot, sigma, strike, rate, tau, option_type).quote()
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;

  use super::*;

  #[test]
  fn bsm_atm_reference_values() {
    let q = bs_greeks(100.0, 100.0, 0.02, 1.0, 0.2, OptionType::Call).unwrap();

    assert_abs_diff_eq!(q.price, 8.916, epsilon = 1e-3);
    assert_abs_diff_eq!(q.delta, 0.5793, epsilon = 1e-4);
    assert_abs_diff_eq!(q.gamma, 0.019552, epsilon = 1e-5);
    assert_abs_diff_eq!(q.vega, 39.104, epsilon = 1e-3);
  }

  #[test]
  fn bsm_put_call_parity() {
    for &(s, k, r, tau, v) in &[
      (100.0, 100.0, 0.02, 1.0, 0.2),
      (80.0, 100.0, 0.05, 0.25, 0.35),
      (120.0, 90.0, -0.01, 2.0, 0.1),
    ] {
      let pricer = BSMPricer::builder(s, v, k, r).tau(tau).build();
      let (call, put) = pricer.calculate_call_put().unwrap();
      assert_relative_eq!(call - put, s - k * (-r * tau).exp(), epsilon = 1e-10);
    }
  }

  #[test]
  fn bsm_delta_bounds_and_positive_convexity() {
    for &s in &[50.0, 90.0, 100.0, 110.0, 200.0] {
      for &tau in &[0.01, 0.5, 3.0] {
        let call = bs_greeks(s, 100.0, 0.03, tau, 0.25, OptionType::Call).unwrap();
        let put = bs_greeks(s, 100.0, 0.03, tau, 0.25, OptionType::Put).unwrap();

        assert!((0.0..=1.0).contains(&call.delta));
        assert!((-1.0..=0.0).contains(&put.delta));
        assert!(call.gamma >= 0.0 && call.vega >= 0.0);
        assert_abs_diff_eq!(call.gamma, put.gamma, epsilon = 1e-12);
        assert_abs_diff_eq!(call.delta - put.delta, 1.0, epsilon = 1e-12);
      }
    }
  }

  #[test]
  fn bsm_expiry_returns_intrinsic() {
    let call = bs_greeks(105.0, 100.0, 0.02, 0.0, 0.2, OptionType::Call).unwrap();
    assert_eq!(
      call,
      PriceQuote {
        price: 5.0,
        delta: 1.0,
        gamma: 0.0,
        vega: 0.0
      }
    );

    let put = bs_greeks(95.0, 100.0, 0.02, -0.1, 0.2, OptionType::Put).unwrap();
    assert_eq!(put.price, 5.0);
    assert_eq!(put.delta, -1.0);
    assert_eq!(put.gamma, 0.0);
    assert_eq!(put.vega, 0.0);

    let otm_put = bs_greeks(105.0, 100.0, 0.02, 0.0, 0.2, OptionType::Put).unwrap();
    assert_eq!(otm_put.price, 0.0);
    assert_eq!(otm_put.delta, 0.0);
  }

  #[test]
  fn bsm_expiry_at_the_money_delta_is_zero() {
    let call = bs_greeks(100.0, 100.0, 0.02, 0.0, 0.2, OptionType::Call).unwrap();
    let put = bs_greeks(100.0, 100.0, 0.02, 0.0, 0.2, OptionType::Put).unwrap();

    assert_eq!(call.delta, 0.0);
    assert_eq!(put.delta, 0.0);
    assert_eq!(call.price, 0.0);
  }

  #[test]
  fn bsm_zero_vol_before_expiry_is_rejected() {
    let err = bs_greeks(100.0, 100.0, 0.02, 0.5, 0.0, OptionType::Call).unwrap_err();
    assert_eq!(err, HedgeError::DegenerateVolatility { tau: 0.5 });
  }

  #[test]
  fn bsm_zero_vol_at_expiry_is_intrinsic() {
    let q = bs_greeks(110.0, 100.0, 0.02, 0.0, 0.0, OptionType::Call).unwrap();
    assert_eq!(q.price, 10.0);
    assert_eq!(q.delta, 1.0);
  }

  #[test]
  fn bsm_rejects_unbounded_maturity() {
    for tau in [f64::INFINITY, f64::NAN] {
      assert!(matches!(
        bs_greeks(100.0, 100.0, 0.02, tau, 0.2, OptionType::Call),
        Err(HedgeError::InvalidParameter { name: "tau", .. })
      ));
    }
  }

  #[test]
  fn bsm_rejects_invalid_inputs() {
    assert!(matches!(
      bs_greeks(-1.0, 100.0, 0.02, 1.0, 0.2, OptionType::Call),
      Err(HedgeError::InvalidParameter { name: "spot", .. })
    ));
    assert!(matches!(
      bs_greeks(100.0, 0.0, 0.02, 1.0, 0.2, OptionType::Call),
      Err(HedgeError::InvalidParameter { name: "strike", .. })
    ));
    assert!(matches!(
      bs_greeks(100.0, 100.0, 0.02, 1.0, -0.2, OptionType::Put),
      Err(HedgeError::InvalidParameter {
        name: "volatility",
        ..
      })
    ));
  }

  #[test]
  fn bsm_price_matches_quote() {
    let pricer = BSMPricer::builder(95.0, 0.3, 100.0, 0.01)
      .tau(0.75)
      .option_type(OptionType::Put)
      .build();
    let (_, put) = pricer.calculate_call_put().unwrap();

    assert_eq!(pricer.calculate_price().unwrap(), put);
    assert_eq!(pricer.quote().unwrap().price, put);
  }
}
