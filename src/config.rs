//! # Configuration
//!
//! Scenario parameters for the command line driver. Every field has a
//! default, so a TOML file only needs the keys it changes:
//!
//! ```toml
//! spot = 100.0
//! strike = 105.0
//! option_type = "put"
//! steps = 63
//! ```

use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::HedgeError;
use crate::error::Result;
use crate::quant::hedging::DeltaHedger;
use crate::quant::hedging::MonteCarloHedge;
use crate::quant::OptionType;
use crate::stochastic::diffusion::gbm::GBM;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
  /// Initial underlying price
  pub spot: f64,
  /// Strike price
  pub strike: f64,
  /// Risk-free rate, annualized
  pub rate: f64,
  /// Volatility, annualized
  pub volatility: f64,
  /// Option life and simulation horizon in years
  pub horizon: f64,
  /// Number of rebalancing steps
  pub steps: usize,
  pub option_type: OptionType,
  /// Seed for the path generator; `None` uses the thread-local generator
  pub seed: Option<u64>,
  /// Number of paths for Monte Carlo batches
  pub paths: usize,
  /// Directory for chart output
  pub output_dir: PathBuf,
}

impl Default for SimulationConfig {
  fn default() -> Self {
    Self {
      spot: 100.0,
      strike: 100.0,
      rate: 0.02,
      volatility: 0.20,
      horizon: 1.0,
      steps: 21,
      option_type: OptionType::Call,
      seed: Some(42),
      paths: 1_000,
      output_dir: PathBuf::from("plots"),
    }
  }
}

impl SimulationConfig {
  pub fn from_toml_str(s: &str) -> Result<Self> {
    let table: toml::Table = toml::from_str(s)?;
    if let Some(tag) = table.get("option_type").and_then(toml::Value::as_str) {
      tag.parse::<OptionType>()?;
    }
    let config: Self = toml::Value::Table(table).try_into()?;
    config.validate()?;
    Ok(config)
  }

  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
      .map_err(|e| HedgeError::Config(format!("{}: {e}", path.display())))?;
    Self::from_toml_str(&contents)
  }

  pub fn validate(&self) -> Result<()> {
    let positive = [
      ("spot", self.spot),
      ("strike", self.strike),
      ("horizon", self.horizon),
    ];
    for (name, value) in positive {
      if !(value.is_finite() && value > 0.0) {
        return Err(HedgeError::Config(format!("{name} must be positive, got {value}")));
      }
    }
    if !(self.volatility.is_finite() && self.volatility >= 0.0) {
      return Err(HedgeError::Config(format!(
        "volatility must be non-negative, got {}",
        self.volatility
      )));
    }
    if !self.rate.is_finite() {
      return Err(HedgeError::Config(format!("rate must be finite, got {}", self.rate)));
    }
    if self.steps == 0 {
      return Err(HedgeError::Config("steps must be at least 1".into()));
    }
    if self.paths == 0 {
      return Err(HedgeError::Config("paths must be at least 1".into()));
    }

    Ok(())
  }

  /// Risk-neutral path generator for this scenario.
  pub fn gbm(&self) -> GBM {
    GBM::new(self.rate, self.volatility, self.steps, self.spot, self.horizon)
  }

  pub fn hedger(&self) -> DeltaHedger {
    DeltaHedger::new(
      self.strike,
      self.rate,
      self.volatility,
      self.horizon,
      self.option_type,
    )
  }

  pub fn monte_carlo(&self) -> MonteCarloHedge {
    MonteCarloHedge::new(self.gbm(), self.hedger(), self.paths, self.seed.unwrap_or(0))
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  #[test]
  fn defaults_are_reference_scenario() {
    let config = SimulationConfig::default();

    assert_eq!(config.spot, 100.0);
    assert_eq!(config.steps, 21);
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.option_type, OptionType::Call);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn partial_toml_overrides_defaults() {
    let config = SimulationConfig::from_toml_str(
      r#"
        strike = 105.0
        option_type = "put"
        steps = 63
      "#,
    )
    .unwrap();

    assert_eq!(config.strike, 105.0);
    assert_eq!(config.option_type, OptionType::Put);
    assert_eq!(config.steps, 63);
    assert_eq!(config.spot, 100.0);
  }

  #[test]
  fn unknown_option_type_is_rejected() {
    let err = SimulationConfig::from_toml_str(r#"option_type = "straddle""#).unwrap_err();
    assert_eq!(err, HedgeError::InvalidOptionType("straddle".into()));
  }

  #[test]
  fn option_type_tags_match_command_line_parser() {
    for (tag, expected) in [
      ("Call", OptionType::Call),
      ("PUT", OptionType::Put),
      ("c", OptionType::Call),
      (" p ", OptionType::Put),
    ] {
      let config = SimulationConfig::from_toml_str(&format!("option_type = {tag:?}")).unwrap();
      assert_eq!(config.option_type, expected, "tag {tag:?}");
    }
  }

  #[test]
  fn option_type_serialises_lowercase() {
    let config = SimulationConfig {
      option_type: OptionType::Put,
      ..SimulationConfig::default()
    };
    let text = toml::to_string(&config).unwrap();

    assert!(text.contains(r#"option_type = "put""#));
    assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), config);
  }

  #[test]
  fn invalid_values_are_rejected() {
    assert!(SimulationConfig::from_toml_str("steps = 0").is_err());
    assert!(SimulationConfig::from_toml_str("volatility = -0.1").is_err());
    assert!(SimulationConfig::from_toml_str("spot = 0.0").is_err());
    assert!(SimulationConfig::from_toml_str("unknown_key = 1").is_err());
  }

  #[test]
  fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "rate = 0.05\npaths = 10").unwrap();

    let config = SimulationConfig::from_file(file.path()).unwrap();
    assert_eq!(config.rate, 0.05);
    assert_eq!(config.paths, 10);
  }

  #[test]
  fn missing_file_is_config_error() {
    let err = SimulationConfig::from_file("/nonexistent/hedge.toml").unwrap_err();
    assert!(matches!(err, HedgeError::Config(_)));
  }

  #[test]
  fn builds_engine_components() {
    let config = SimulationConfig::default();

    assert_eq!(config.gbm().n, 21);
    assert_eq!(config.hedger().strike, 100.0);
    assert_eq!(config.monte_carlo().paths, 1_000);
  }
}
