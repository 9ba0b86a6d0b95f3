//! Monte Carlo distribution of the terminal hedging P&L.
//!
//! Each path draws from its own `StdRng` seeded with `base_seed + i`, so runs
//! are independent of each other and of rayon's scheduling.

use impl_new_derive::ImplNew;
use ndarray::Array1;
use rayon::prelude::*;
use statrs::statistics::Data;
use statrs::statistics::Distribution as StatDistribution;
use statrs::statistics::Max;
use statrs::statistics::Min;
use statrs::statistics::OrderStatistics;
use tracing::info;

use super::engine::DeltaHedger;
use crate::error::HedgeError;
use crate::error::Result;
use crate::stochastic::diffusion::gbm::GBM;
use crate::traits::ProcessExt;

/// Many independent path + hedge simulations.
#[derive(ImplNew, Debug, Clone)]
pub struct MonteCarloHedge {
  /// Path generator
  pub gbm: GBM,
  /// Hedger applied to every path
  pub hedger: DeltaHedger,
  /// Number of paths
  pub paths: usize,
  /// Seed of path 0
  pub base_seed: u64,
}

/// Summary statistics of terminal cumulative P&L across paths.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HedgingErrorSummary {
  pub paths: usize,
  /// Premium received at inception (identical on every path)
  pub initial_premium: f64,
  pub mean: f64,
  pub std_dev: f64,
  pub min: f64,
  pub max: f64,
  /// 5% quantile
  pub q05: f64,
  /// 95% quantile
  pub q95: f64,
}

impl HedgingErrorSummary {
  /// Standard deviation as a fraction of the premium.
  pub fn relative_std_dev(&self) -> f64 {
    if self.initial_premium > 0.0 {
      self.std_dev / self.initial_premium
    } else {
      f64::NAN
    }
  }
}

impl MonteCarloHedge {
  /// Terminal cumulative P&L of every path, in path order.
  pub fn terminal_pnls(&self) -> Result<Array1<f64>> {
    if self.paths == 0 {
      return Err(HedgeError::invalid("paths", self.paths));
    }

    let pnls = (0..self.paths)
      .into_par_iter()
      .map(|i| -> Result<f64> {
        let path = self
          .gbm
          .sample_seeded(Some(self.base_seed.wrapping_add(i as u64)))?;
        Ok(self.hedger.run(&path)?.terminal_pnl())
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(Array1::from(pnls))
  }

  pub fn run(&self) -> Result<HedgingErrorSummary> {
    let pnls = self.terminal_pnls()?;
    let initial_premium = self.hedger.opening_quote(self.gbm.x0)?.price;

    let mut data = Data::new(pnls.to_vec());
    let std_dev = data.std_dev().filter(|s| s.is_finite()).unwrap_or(0.0);
    let summary = HedgingErrorSummary {
      paths: self.paths,
      initial_premium,
      mean: data.mean().unwrap_or(f64::NAN),
      std_dev,
      min: data.min(),
      max: data.max(),
      q05: data.quantile(0.05),
      q95: data.quantile(0.95),
    };

    info!(
      paths = summary.paths,
      mean = summary.mean,
      std_dev = summary.std_dev,
      "monte carlo hedge batch complete"
    );

    Ok(summary)
  }
}
