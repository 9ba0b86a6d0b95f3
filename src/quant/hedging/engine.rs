//! Daily rebalancing engine.
//!
//! The engine is short one option and holds `-delta` shares against it. At
//! every step it reprices the option, accrues interest on cash, trades to the
//! new hedge ratio and books
//! option value change + stock P&L of the old hedge + interest.

use impl_new_derive::ImplNew;
use ndarray::ArrayView1;
use tracing::debug;
use tracing::info;

use super::types::HedgeState;
use super::types::HedgeStep;
use super::types::SimulationResult;
use crate::error::HedgeError;
use crate::error::Result;
use crate::quant::pricing::bsm::bs_greeks;
use crate::quant::pricing::pnl::DiscretePnL;
use crate::quant::pricing::pnl::GreekPnL;
use crate::quant::OptionType;
use crate::quant::PriceQuote;

/// Delta hedger for one European option over a fixed horizon.
#[derive(ImplNew, Debug, Clone)]
pub struct DeltaHedger {
  /// Strike price
  pub strike: f64,
  /// Risk-free rate, also used to grow cash
  pub rate: f64,
  /// Pricing volatility
  pub sigma: f64,
  /// Time to maturity at day 0, in years
  pub horizon: f64,
  /// Option type
  pub option_type: OptionType,
}

impl DeltaHedger {
  /// Hedge along `path`. Step `i` of the result corresponds to `path[i]`.
  pub fn run<'a, P>(&self, path: P) -> Result<SimulationResult>
  where
    P: Into<ArrayView1<'a, f64>>,
  {
    let path = path.into();
    if path.len() < 2 {
      return Err(HedgeError::InvalidPathLength(path.len()));
    }
    if !(self.horizon.is_finite() && self.horizon > 0.0) {
      return Err(HedgeError::invalid("horizon", self.horizon));
    }

    let days = path.len() - 1;
    let dt = self.horizon / days as f64;
    let growth = (self.rate * dt).exp();
    let mut steps = Vec::with_capacity(days + 1);

    let spot = path[0];
    let quote = self.opening_quote(spot)?;
    let mut state = HedgeState::open(&quote, spot);
    steps.push(HedgeStep {
      day: 0,
      spot,
      tau: self.horizon,
      stock_position: state.position,
      cash: state.cash,
      quote,
      daily_pnl: 0.0,
      cumulative_pnl: 0.0,
      gamma_pnl: 0.0,
    });

    let mut prev_quote = quote;
    let mut prev_spot = spot;
    let mut cumulative = 0.0;

    for day in 1..=days {
      let spot = path[day];
      let tau = self.time_remaining(day, days);
      let quote = self.quote(spot, tau)?;
      let prev_position = state.position;

      let interest = state.accrue(growth);
      state.rebalance(-quote.delta, spot);

      let option_pnl = quote.price - prev_quote.price;
      let stock_pnl = DiscretePnL::new(prev_position, prev_spot).calculate(spot);
      let daily_pnl = option_pnl + stock_pnl + interest;
      cumulative += daily_pnl;

      let gamma_pnl = GreekPnL::new(prev_quote.delta, prev_quote.gamma, prev_quote.vega)
        .gamma_pnl(spot - prev_spot);

      debug!(
        day,
        spot,
        tau,
        delta = quote.delta,
        position = state.position,
        daily_pnl,
        "rebalanced hedge"
      );

      steps.push(HedgeStep {
        day,
        spot,
        tau,
        stock_position: state.position,
        cash: state.cash,
        quote,
        daily_pnl,
        cumulative_pnl: cumulative,
        gamma_pnl,
      });

      prev_quote = quote;
      prev_spot = spot;
    }

    info!(
      days,
      option_type = %self.option_type,
      terminal_pnl = cumulative,
      "delta hedge run complete"
    );

    Ok(SimulationResult::from_steps(steps))
  }

  /// Quote at inception, when the full horizon remains.
  pub fn opening_quote(&self, spot: f64) -> Result<PriceQuote> {
    self.quote(spot, self.horizon)
  }

  /// Remaining maturity at `day`. Computed as a fraction of the horizon so
  /// the last step lands on exactly zero.
  fn time_remaining(&self, day: usize, days: usize) -> f64 {
    self.horizon * (days - day) as f64 / days as f64
  }

  fn quote(&self, spot: f64, tau: f64) -> Result<PriceQuote> {
    bs_greeks(spot, self.strike, self.rate, tau, self.sigma, self.option_type)
  }
}

/// Run a delta-hedging simulation over `path` for an option maturing at the
/// end of the path.
pub fn run_delta_hedging<'a, P>(
  path: P,
  strike: f64,
  rate: f64,
  sigma: f64,
  horizon: f64,
  option_type: OptionType,
) -> Result<SimulationResult>
where
  P: Into<ArrayView1<'a, f64>>,
{
  DeltaHedger::new(strike, rate, sigma, horizon, option_type).run(path)
}
