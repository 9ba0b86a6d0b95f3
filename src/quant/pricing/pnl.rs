//! Profit and Loss utilities for hedged option positions

use impl_new_derive::ImplNew;

/// Greek-based P&L attribution
#[derive(ImplNew, Clone, Debug)]
pub struct GreekPnL {
  /// Delta
  pub delta: f64,
  /// Gamma
  pub gamma: f64,
  /// Vega
  pub vega: f64,
}

impl GreekPnL {
  /// Taylor expansion of the option value over a small move.
  /// ΔV ≈ Δ ⋅ ΔS + 0.5 Γ (ΔS)^2 + Vega ⋅ Δσ
  #[must_use]
  pub fn calculate(&self, d_s: f64, d_sigma: f64) -> f64 {
    self.delta * d_s + self.gamma_pnl(d_s) + self.vega * d_sigma
  }

  /// Convexity term 0.5 Γ (ΔS)^2 left over once delta is hedged.
  #[must_use]
  pub fn gamma_pnl(&self, d_s: f64) -> f64 {
    0.5 * self.gamma * d_s * d_s
  }
}

/// Discrete position P&L calculator
#[derive(ImplNew, Clone, Debug)]
pub struct DiscretePnL {
  /// Position quantity
  pub quantity: f64,
  /// Initial price
  pub p0: f64,
}

impl DiscretePnL {
  /// Discrete P&L for a position from time 0 to 1: PnL = q * (p1 - p0)
  #[must_use]
  pub fn calculate(&self, p1: f64) -> f64 {
    self.quantity * (p1 - self.p0)
  }
}
