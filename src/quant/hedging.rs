//! # Delta Hedging
//!
//! $$
//! \mathrm{PnL}_i = \big(V_i - V_{i-1}\big) + \Delta^{h}_{i-1}\,(S_i - S_{i-1}) + C_{i-1}\big(e^{r\,dt}-1\big)
//! $$
//!
//! Discrete rebalancing of a stock/cash hedge against a sold European option.
//! [`engine`] runs one path, [`batch`] runs many independent paths on rayon.

pub mod batch;
pub mod engine;
pub mod types;

pub use batch::HedgingErrorSummary;
pub use batch::MonteCarloHedge;
pub use engine::run_delta_hedging;
pub use engine::DeltaHedger;
pub use types::HedgeStep;
pub use types::SimulationResult;
