use std::fmt::Display;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::HedgeError;

pub mod hedging;
pub mod pricing;

/// Option type. Deserialised through [`FromStr`], so config files accept the
/// same tags as the command line.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OptionType {
  #[default]
  Call,
  Put,
}

impl FromStr for OptionType {
  type Err = HedgeError;

  /// Parse an external tag. Only `call` and `put` (any case) are accepted.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "call" | "c" => Ok(Self::Call),
      "put" | "p" => Ok(Self::Put),
      _ => Err(HedgeError::InvalidOptionType(s.to_string())),
    }
  }
}

impl TryFrom<String> for OptionType {
  type Error = HedgeError;

  fn try_from(s: String) -> Result<Self, Self::Error> {
    s.parse()
  }
}

impl From<OptionType> for String {
  fn from(ty: OptionType) -> Self {
    ty.to_string()
  }
}

impl Display for OptionType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      OptionType::Call => write!(f, "call"),
      OptionType::Put => write!(f, "put"),
    }
  }
}

/// Price and first/second order sensitivities from one pricer evaluation.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
  /// Option value
  pub price: f64,
  /// dV/dS
  pub delta: f64,
  /// d²V/dS²
  pub gamma: f64,
  /// dV/dσ (per unit of volatility, not per vol point)
  pub vega: f64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_option_tags() {
    assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
    assert_eq!(" PUT ".parse::<OptionType>().unwrap(), OptionType::Put);
    assert_eq!("c".parse::<OptionType>().unwrap(), OptionType::Call);
  }

  #[test]
  fn rejects_unknown_tag() {
    let err = "straddle".parse::<OptionType>().unwrap_err();
    assert_eq!(err, HedgeError::InvalidOptionType("straddle".into()));
  }

  #[test]
  fn display_round_trips_through_parse() {
    for ty in [OptionType::Call, OptionType::Put] {
      assert_eq!(ty.to_string().parse::<OptionType>().unwrap(), ty);
    }
  }
}
