//! Error types for contract construction and evaluation.
//!
//! Every failure is a deterministic domain violation reported to the immediate
//! caller. Nothing here is retried or replaced with a default value.

use thiserror::Error;

/// Failures raised while building or pricing an option contract.
///
/// # Examples
/// ```
/// use bs_pricer::PricingError;
///
/// let err = PricingError::InvalidVolatility(0.0);
/// assert!(format!("{}", err).starts_with("Invalid volatility"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Strike, spot, time to expiration, rate or dividend yield outside its domain.
    #[error("Invalid contract parameter: {name} = {value} ({reason})")]
    InvalidContractParameter {
        /// Name of the offending field
        name: &'static str,
        /// Value that was supplied
        value: f64,
        /// Constraint the value violates
        reason: &'static str,
    },

    /// Non-finite volatility, or non-positive volatility for a live contract.
    #[error("Invalid volatility: {0} (must be finite, and > 0 before expiration)")]
    InvalidVolatility(f64),

    /// Payoff text matching neither `Call`/`call` nor `Put`/`put`.
    #[error("Unrecognized payoff type: {0:?} (expected Call, call, Put or put)")]
    UnrecognizedPayoffType(String),
}

/// Result alias used by the pricing core.
pub type PricingResult<T> = std::result::Result<T, PricingError>;
