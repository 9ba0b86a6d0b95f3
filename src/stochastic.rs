//! # Stochastic Process Simulation
//!
//! $$
//! dS_t=\mu S_t\,dt+\sigma S_t\,dW_t
//! $$
//!
//! | Module        | Description                                               |
//! |---------------|-----------------------------------------------------------|
//! | [`diffusion`] | Diffusion processes used to drive the underlying (GBM).   |
//!
//! Every sampler takes its random generator explicitly, see
//! [`ProcessExt`](crate::traits::ProcessExt). `sample_par()` gives each path
//! its own seeded generator so batches can run on rayon without sharing state.

pub mod diffusion;

use ndarray::Array1;
use ndarray::ArrayView1;

pub use crate::traits::ProcessExt;

/// Default number of time steps (one trading month)
pub const N: usize = 21;
/// Default spot price for financial models
pub const S0: f64 = 100.0;
/// Default strike price
pub const K: f64 = 100.0;

/// Simulated or externally supplied price trajectory.
///
/// Index 0 is the spot at inception, so a path with `n` steps holds `n + 1`
/// prices. `&PricePath` converts into an `ArrayView1<f64>` through its
/// `AsRef<[f64]>` impl.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePath(Vec<f64>);

impl PricePath {
  pub fn new(prices: Vec<f64>) -> Self {
    Self(prices)
  }

  /// Number of prices, including the initial one.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Number of steps between consecutive prices.
  pub fn steps(&self) -> usize {
    self.0.len().saturating_sub(1)
  }

  pub fn initial(&self) -> Option<f64> {
    self.0.first().copied()
  }

  pub fn terminal(&self) -> Option<f64> {
    self.0.last().copied()
  }

  pub fn as_slice(&self) -> &[f64] {
    &self.0
  }

  pub fn view(&self) -> ArrayView1<'_, f64> {
    ArrayView1::from(self.as_slice())
  }

  pub fn to_array(&self) -> Array1<f64> {
    Array1::from(self.0.clone())
  }

  pub fn to_vec(&self) -> Vec<f64> {
    self.0.clone()
  }

  pub fn into_inner(self) -> Vec<f64> {
    self.0
  }

  /// ln(S_{i+1} / S_i) for every step.
  pub fn log_returns(&self) -> Array1<f64> {
    self.0.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
  }
}

impl AsRef<[f64]> for PricePath {
  fn as_ref(&self) -> &[f64] {
    &self.0
  }
}

impl std::ops::Index<usize> for PricePath {
  type Output = f64;

  fn index(&self, index: usize) -> &f64 {
    &self.0[index]
  }
}

impl From<Vec<f64>> for PricePath {
  fn from(prices: Vec<f64>) -> Self {
    Self(prices)
  }
}

impl From<Array1<f64>> for PricePath {
  fn from(prices: Array1<f64>) -> Self {
    Self(prices.to_vec())
  }
}
