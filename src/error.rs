//! # Errors
//!
//! $$
//! f:\text{inputs}\to \text{Result}\langle T, \text{HedgeError}\rangle
//! $$
//!
//! Every failure in this crate is a synchronous validation failure. Nothing
//! is retried and no partial result is ever returned.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HedgeError>;

/// Errors raised by the pricer, the path generator and the hedging engine.
///
/// # Examples
/// ```
/// use delta_hedge_rs::HedgeError;
///
/// let err = HedgeError::InvalidPathLength(1);
/// assert!(err.to_string().contains("at least 2"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum HedgeError {
  /// Option type tag that is neither `call` nor `put`.
  #[error("invalid option type '{0}': expected 'call' or 'put'")]
  InvalidOptionType(String),

  /// Zero volatility with time left to expiry, where d1/d2 are undefined.
  #[error("degenerate volatility: sigma = 0 with tau = {tau} > 0")]
  DegenerateVolatility {
    /// Remaining time to maturity at which the pricer was queried
    tau: f64,
  },

  /// Price path too short to rebalance even once.
  #[error("invalid price path length {0}: need at least 2 points")]
  InvalidPathLength(usize),

  /// Parameter outside its admissible domain.
  #[error("invalid parameter '{name}': {value}")]
  InvalidParameter {
    /// Parameter name
    name: &'static str,
    /// Offending value, formatted
    value: String,
  },

  /// Configuration file could not be read, parsed or validated.
  #[error("configuration error: {0}")]
  Config(String),

  /// Filesystem failure while writing output.
  #[error("i/o error: {0}")]
  Io(String),
}

impl HedgeError {
  pub(crate) fn invalid(name: &'static str, value: impl ToString) -> Self {
    HedgeError::InvalidParameter {
      name,
      value: value.to_string(),
    }
  }
}

impl From<std::io::Error> for HedgeError {
  fn from(err: std::io::Error) -> Self {
    HedgeError::Io(err.to_string())
  }
}

impl From<toml::de::Error> for HedgeError {
  fn from(err: toml::de::Error) -> Self {
    HedgeError::Config(err.to_string())
  }
}
