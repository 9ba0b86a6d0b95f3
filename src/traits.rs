//! # Traits
//!
//! $$
//! \text{Trait contracts: }\mathcal{A}:\text{inputs}\to\text{samples/prices}
//! $$
//!
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::error::Result;
use crate::quant::PriceQuote;

/// Pricer trait.
pub trait PricerExt {
  /// Time to maturity in years.
  fn tau(&self) -> f64;

  /// Calculate the call and put price.
  fn calculate_call_put(&self) -> Result<(f64, f64)>;

  /// Calculate the price of the configured option type.
  fn calculate_price(&self) -> Result<f64> {
    Ok(self.quote()?.price)
  }

  /// Price plus delta, gamma and vega.
  fn quote(&self) -> Result<PriceQuote>;
}

/// Sampling trait for processes driven by an explicitly owned generator.
pub trait ProcessExt: Send + Sync {
  type Output: Send;

  /// Draw one realisation from `rng`.
  fn sample_using<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self::Output>;

  /// Draw one realisation from a fresh `StdRng` seeded with `seed`, or from
  /// the thread-local generator when no seed is given.
  fn sample_seeded(&self, seed: Option<u64>) -> Result<Self::Output> {
    match seed {
      Some(seed) => self.sample_using(&mut StdRng::seed_from_u64(seed)),
      None => self.sample_using(&mut rand::thread_rng()),
    }
  }

  /// Draw `m` realisations in parallel. Path `i` uses its own generator seeded
  /// with `base_seed + i`, so the batch is reproducible regardless of how
  /// rayon schedules the work.
  fn sample_par(&self, m: usize, base_seed: u64) -> Result<Vec<Self::Output>> {
    (0..m)
      .into_par_iter()
      .map(|i| self.sample_seeded(Some(base_seed.wrapping_add(i as u64))))
      .collect()
  }
}
