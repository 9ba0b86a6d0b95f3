//! Per-step records and the result bundle of one hedging run.

use ndarray::Array1;

use crate::quant::PriceQuote;

/// One row of a hedging run. Every series the engine produces is a column of
/// `Vec<HedgeStep>`, so all of them always have the same length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HedgeStep {
  /// Step index, 0 is inception
  pub day: usize,
  /// Underlying price at this step
  pub spot: f64,
  /// Remaining time to maturity in years
  pub tau: f64,
  /// Shares held after rebalancing
  pub stock_position: f64,
  /// Cash balance after interest and rebalancing
  pub cash: f64,
  /// Pricer output at this step
  pub quote: PriceQuote,
  /// Realized P&L over the step ending here
  pub daily_pnl: f64,
  /// Running sum of `daily_pnl` up to and including this step
  pub cumulative_pnl: f64,
  /// 0.5 Γ (ΔS)^2 using the previous step's gamma
  pub gamma_pnl: f64,
}

/// Mutable hedge book. Lives only inside one engine run.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HedgeState {
  pub(crate) position: f64,
  pub(crate) cash: f64,
}

impl HedgeState {
  /// Sell the option and put on the opening hedge.
  pub(crate) fn open(quote: &PriceQuote, spot: f64) -> Self {
    let position = -quote.delta;
    Self {
      position,
      cash: quote.price + position * spot,
    }
  }

  /// Grow cash by one period of interest, returning the interest earned.
  pub(crate) fn accrue(&mut self, growth: f64) -> f64 {
    let before = self.cash;
    self.cash *= growth;
    self.cash - before
  }

  /// Move to `target` shares at `spot`, paying for the difference out of cash.
  pub(crate) fn rebalance(&mut self, target: f64, spot: f64) {
    let d_position = target - self.position;
    self.cash -= d_position * spot;
    self.position = target;
  }
}

/// Output of a hedging run, indexed by day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationResult {
  steps: Vec<HedgeStep>,
}

impl SimulationResult {
  pub(crate) fn from_steps(steps: Vec<HedgeStep>) -> Self {
    Self { steps }
  }

  pub fn steps(&self) -> &[HedgeStep] {
    &self.steps
  }

  pub fn len(&self) -> usize {
    self.steps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  fn column(&self, f: impl Fn(&HedgeStep) -> f64) -> Array1<f64> {
    self.steps.iter().map(f).collect()
  }

  pub fn spots(&self) -> Array1<f64> {
    self.column(|s| s.spot)
  }

  pub fn stock_positions(&self) -> Array1<f64> {
    self.column(|s| s.stock_position)
  }

  pub fn cash_balances(&self) -> Array1<f64> {
    self.column(|s| s.cash)
  }

  pub fn option_values(&self) -> Array1<f64> {
    self.column(|s| s.quote.price)
  }

  pub fn deltas(&self) -> Array1<f64> {
    self.column(|s| s.quote.delta)
  }

  pub fn gammas(&self) -> Array1<f64> {
    self.column(|s| s.quote.gamma)
  }

  pub fn vegas(&self) -> Array1<f64> {
    self.column(|s| s.quote.vega)
  }

  pub fn daily_pnl(&self) -> Array1<f64> {
    self.column(|s| s.daily_pnl)
  }

  pub fn cumulative_pnl(&self) -> Array1<f64> {
    self.column(|s| s.cumulative_pnl)
  }

  pub fn gamma_pnl(&self) -> Array1<f64> {
    self.column(|s| s.gamma_pnl)
  }

  /// Option premium received at inception.
  pub fn initial_premium(&self) -> f64 {
    self.steps.first().map_or(0.0, |s| s.quote.price)
  }

  /// Cumulative P&L at the last step.
  pub fn terminal_pnl(&self) -> f64 {
    self.steps.last().map_or(0.0, |s| s.cumulative_pnl)
  }

  pub fn final_cash(&self) -> f64 {
    self.steps.last().map_or(0.0, |s| s.cash)
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  #[test]
  fn hedge_state_opens_short_option_book() {
    let quote = PriceQuote {
      price: 10.0,
      delta: 0.6,
      gamma: 0.02,
      vega: 30.0,
    };
    let state = HedgeState::open(&quote, 100.0);

    assert_abs_diff_eq!(state.position, -0.6);
    assert_abs_diff_eq!(state.cash, 10.0 - 60.0, epsilon = 1e-12);
  }

  #[test]
  fn hedge_state_accrues_then_rebalances() {
    let mut state = HedgeState {
      position: -0.5,
      cash: 100.0,
    };

    let interest = state.accrue(1.01);
    assert_abs_diff_eq!(interest, 1.0, epsilon = 1e-12);

    state.rebalance(-0.7, 50.0);
    assert_abs_diff_eq!(state.position, -0.7);
    // selling 0.2 more shares at 50 raises 10
    assert_abs_diff_eq!(state.cash, 111.0, epsilon = 1e-12);
  }

  #[test]
  fn empty_result_accessors_are_zero() {
    let result = SimulationResult::default();

    assert!(result.is_empty());
    assert_eq!(result.terminal_pnl(), 0.0);
    assert_eq!(result.initial_premium(), 0.0);
    assert_eq!(result.deltas().len(), 0);
  }
}
