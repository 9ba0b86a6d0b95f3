//! # delta-hedge-rs
//!
//! $$
//! \mathrm{PnL}_T=\sum_{i=1}^{n}\Big[(V_i-V_{i-1})+\Delta^h_{i-1}(S_i-S_{i-1})+C_{i-1}(e^{r\,dt}-1)\Big]
//! $$
//!
//! Discrete delta hedging of a European option along a simulated price path.
//!
//! | Module            | Description                                                        |
//! |-------------------|--------------------------------------------------------------------|
//! | [`quant`]         | Option types, Black-Scholes pricer, P&L helpers, hedging engine.   |
//! | [`stochastic`]    | Price paths and the GBM path generator.                            |
//! | [`config`]        | Scenario configuration loaded from TOML.                           |
//! | [`visualization`] | Plotly charts of a hedging run.                                    |
//!
//! ## Example
//!
//! ```rust
//! use delta_hedge_rs::quant::hedging::run_delta_hedging;
//! use delta_hedge_rs::quant::OptionType;
//! use delta_hedge_rs::stochastic::diffusion::gbm::simulate_stock_path;
//!
//! let path = simulate_stock_path(100.0, 0.02, 0.2, 1.0, 21, Some(42))?;
//! let result = run_delta_hedging(&path, 100.0, 0.02, 0.2, 1.0, OptionType::Call)?;
//! println!("terminal P&L: {:.4}", result.terminal_pnl());
//! # Ok::<(), delta_hedge_rs::HedgeError>(())
//! ```

pub mod config;
pub mod error;
pub mod quant;
pub mod stochastic;
pub mod traits;
pub mod visualization;

pub use config::SimulationConfig;
pub use error::HedgeError;
pub use error::Result;
pub use quant::hedging::DeltaHedger;
pub use quant::hedging::MonteCarloHedge;
pub use quant::hedging::SimulationResult;
pub use quant::pricing::bsm::bs_greeks;
pub use quant::pricing::bsm::BSMPricer;
pub use quant::OptionType;
pub use quant::PriceQuote;
pub use stochastic::diffusion::gbm::simulate_stock_path;
pub use stochastic::diffusion::gbm::GBM;
pub use stochastic::PricePath;
pub use traits::PricerExt;
pub use traits::ProcessExt;
