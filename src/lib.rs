//! # bs-pricer: Black-Scholes Pricing of European Options
//!
//! `bs-pricer` computes the closed-form Black-Scholes price of a European call
//! or put on an asset paying a continuous dividend yield. A contract is built
//! once from validated inputs and can then be priced at any number of
//! volatilities.
//!
//! ## Core Features
//!
//! - **Single formula for calls and puts**: the payoff sign `phi` (+1/-1)
//!   drives one expression, so both sides satisfy put-call parity
//! - **Exact normal CDF**: `N(x) = (1 + erf(x/√2)) / 2` with `erf` from `libm`
//! - **Expired contracts**: priced at their intrinsic payoff
//! - **Typed errors**: invalid contracts and volatilities are reported, never
//!   priced as NaN
//! - **Interactive session**: a prompt loop adapter and the `bs-price` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use bs_pricer::{OptionContract, PayoffType};
//!
//! let call = OptionContract::with_dividend_yield(100.0, 100.0, 1.0, PayoffType::Call, 0.05, 0.0)?;
//! let put = OptionContract::with_dividend_yield(100.0, 100.0, 1.0, PayoffType::Put, 0.05, 0.0)?;
//!
//! let c = call.price(0.2)?;
//! let p = put.price(0.2)?;
//!
//! // put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
//! let parity = 100.0 - 100.0 * (-0.05_f64).exp();
//! assert!((c - p - parity).abs() < 1e-9);
//! # Ok::<(), bs_pricer::PricingError>(())
//! ```
//!
//! ## Configuration Presets
//!
//! Session settings are loaded from TOML via [`PricerConfig`]:
//! - `standard()`: minimal logging, four decimals
//! - `quiet()`: errors only
//! - `verbose()`: debug logging, six decimals, contract echo

// ================================================================================================
// MODULES
// ================================================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod session;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use config::{MarketDefaults, PricerConfig, SessionConfig};
pub use error::{PricingError, PricingResult};
pub use models::bs::{OptionContract, PayoffType};
pub use models::utils::norm_cdf;
pub use session::{PromptSession, SessionSummary, Termination};

/// Price a European option in one call.
///
/// Builds an [`OptionContract`] from the six contract parameters and
/// evaluates it at `volatility`.
///
/// # Arguments
///
/// * `strike` - Strike price, must be > 0
/// * `spot` - Spot price of the underlying, must be > 0
/// * `time_to_expiration` - Years to expiration, must be >= 0
/// * `payoff_type` - [`PayoffType::Call`] or [`PayoffType::Put`]
/// * `rate` - Annualized, continuously compounded risk-free rate
/// * `dividend_yield` - Annualized continuous dividend yield (use 0.0 for none)
/// * `volatility` - Annualized volatility, must be > 0 unless expired
///
/// # Errors
///
/// * [`PricingError::InvalidContractParameter`] for an invalid strike, spot
///   or time to expiration
/// * [`PricingError::InvalidVolatility`] for a non-finite volatility, or a
///   non-positive one on a live contract
///
/// # Example
///
/// ```rust
/// use bs_pricer::{black_scholes_price, PayoffType};
///
/// // expired: intrinsic value only
/// let price = black_scholes_price(75.0, 100.0, 0.0, PayoffType::Call, 0.05, 0.0, 0.25)?;
/// assert_eq!(price, 25.0);
/// # Ok::<(), bs_pricer::PricingError>(())
/// ```
pub fn black_scholes_price(
    strike: f64,
    spot: f64,
    time_to_expiration: f64,
    payoff_type: PayoffType,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
) -> PricingResult<f64> {
    OptionContract::with_dividend_yield(
        strike,
        spot,
        time_to_expiration,
        payoff_type,
        rate,
        dividend_yield,
    )?
    .price(volatility)
}
