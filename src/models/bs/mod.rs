// src/models/bs/mod.rs

//! Black-Scholes pricing of European options with a continuous dividend yield.
//!
//! Calls and puts share a single code path through the payoff sign `phi`
//! (+1 for a call, -1 for a put):
//!
//! ```text
//! d1    = (ln(S/K) + (r - q + σ²/2)·T) / (σ·sqrt(T))
//! d2    = d1 - σ·sqrt(T)
//! price = phi · (S·e^(-qT)·N(phi·d1) - K·e^(-rT)·N(phi·d2))
//! ```
//!
//! A contract with `T = 0` has expired and is worth its intrinsic payoff
//! `max(phi·(S - K), 0)`, with no time value and no discounting.

use crate::error::{PricingError, PricingResult};
use crate::models::utils::{log_moneyness, norm_cdf};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// Payoff direction of a European option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayoffType {
    Call,
    Put,
}

impl PayoffType {
    /// +1 for a call, -1 for a put.
    pub fn sign(self) -> i32 {
        match self {
            PayoffType::Call => 1,
            PayoffType::Put => -1,
        }
    }

    fn phi(self) -> f64 {
        f64::from(self.sign())
    }

    /// Payoff of immediate exercise: `max(phi·(spot - strike), 0)`.
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        (self.phi() * (spot - strike)).max(0.0)
    }
}

impl fmt::Display for PayoffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffType::Call => write!(f, "Call"),
            PayoffType::Put => write!(f, "Put"),
        }
    }
}

impl FromStr for PayoffType {
    type Err = PricingError;

    /// Accepts `Call`, `call`, `Put` and `put`; nothing else.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Call" | "call" => Ok(PayoffType::Call),
            "Put" | "put" => Ok(PayoffType::Put),
            other => Err(PricingError::UnrecognizedPayoffType(other.to_string())),
        }
    }
}

/// An immutable, validated European option contract.
///
/// The volatility is not part of the contract: it is supplied at evaluation
/// time so the same contract can be priced repeatedly across a range of
/// volatilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionContract {
    strike: f64,
    spot: f64,
    time_to_expiration: f64,
    payoff_type: PayoffType,
    rate: f64,
    dividend_yield: f64,
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> PricingError {
    debug!(field = name, value, reason, "rejected contract parameter");
    PricingError::InvalidContractParameter {
        name,
        value,
        reason,
    }
}

impl OptionContract {
    /// Create a contract with no dividend yield.
    pub fn new(
        strike: f64,
        spot: f64,
        time_to_expiration: f64,
        payoff_type: PayoffType,
        rate: f64,
    ) -> PricingResult<Self> {
        Self::with_dividend_yield(strike, spot, time_to_expiration, payoff_type, rate, 0.0)
    }

    /// Create a contract paying a continuous dividend yield.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidContractParameter`] if `strike` or `spot` is not
    /// strictly positive, if `time_to_expiration` is negative, or if any
    /// field is not finite.
    pub fn with_dividend_yield(
        strike: f64,
        spot: f64,
        time_to_expiration: f64,
        payoff_type: PayoffType,
        rate: f64,
        dividend_yield: f64,
    ) -> PricingResult<Self> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(invalid("strike", strike, "must be > 0 and finite"));
        }
        if !spot.is_finite() || spot <= 0.0 {
            return Err(invalid("spot", spot, "must be > 0 and finite"));
        }
        if !time_to_expiration.is_finite() || time_to_expiration < 0.0 {
            return Err(invalid(
                "time_to_expiration",
                time_to_expiration,
                "must be >= 0 and finite",
            ));
        }
        if !rate.is_finite() {
            return Err(invalid("rate", rate, "must be finite"));
        }
        if !dividend_yield.is_finite() {
            return Err(invalid("dividend_yield", dividend_yield, "must be finite"));
        }

        Ok(Self {
            strike,
            spot,
            time_to_expiration,
            payoff_type,
            rate,
            dividend_yield,
        })
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Time to expiration in years
    pub fn time_to_expiration(&self) -> f64 {
        self.time_to_expiration
    }

    pub fn payoff_type(&self) -> PayoffType {
        self.payoff_type
    }

    /// Annualized, continuously compounded risk-free rate
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Annualized continuous dividend yield
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    pub fn is_expired(&self) -> bool {
        self.time_to_expiration == 0.0
    }

    /// Payoff if the option were exercised now.
    pub fn intrinsic_value(&self) -> f64 {
        self.payoff_type.intrinsic(self.spot, self.strike)
    }

    /// Black-Scholes price of the contract at the given volatility.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidVolatility`] if `volatility` is not finite, if
    /// it is not strictly positive while the contract is still live, or if
    /// it is so extreme that the formula leaves the range of `f64`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bs_pricer::{OptionContract, PayoffType};
    ///
    /// let call = OptionContract::new(100.0, 100.0, 1.0, PayoffType::Call, 0.05)?;
    /// let price = call.price(0.2)?;
    /// assert!((price - 10.4506).abs() < 1e-4);
    /// # Ok::<(), bs_pricer::PricingError>(())
    /// ```
    pub fn price(&self, volatility: f64) -> PricingResult<f64> {
        if !volatility.is_finite() {
            debug!(volatility, "rejected non-finite volatility");
            return Err(PricingError::InvalidVolatility(volatility));
        }
        if self.is_expired() {
            return Ok(self.intrinsic_value());
        }
        if volatility <= 0.0 {
            debug!(volatility, "rejected non-positive volatility for live contract");
            return Err(PricingError::InvalidVolatility(volatility));
        }

        let t = self.time_to_expiration;
        let phi = self.payoff_type.phi();
        let (d1, d2) = self.norm_args(volatility);
        if d1.is_nan() || d2.is_nan() {
            debug!(volatility, "volatility out of representable range");
            return Err(PricingError::InvalidVolatility(volatility));
        }
        trace!(d1, d2, volatility, payoff = %self.payoff_type, "black-scholes arguments");

        let discount = (-self.rate * t).exp();
        let carry = (-self.dividend_yield * t).exp();
        let price = phi
            * (self.spot * carry * norm_cdf(phi * d1)
                - discount * self.strike * norm_cdf(phi * d2));

        if !price.is_finite() {
            debug!(volatility, price, "non-finite price");
            return Err(PricingError::InvalidVolatility(volatility));
        }

        // finite here; erf cancellation far out of the money can land a few ulps below zero
        Ok(price.max(0.0))
    }

    /// `(d1, d2)` for a live contract; `volatility` must already be validated.
    ///
    /// The `σ²/2·T` term is folded in as `σ·sqrt(T)/2` so that large
    /// volatilities never square past `f64::MAX`. NaN comes back only when
    /// `σ·sqrt(T)` itself overflows or the drift term does.
    fn norm_args(&self, volatility: f64) -> (f64, f64) {
        let t = self.time_to_expiration;
        let vol_sqrt_t = volatility * t.sqrt();
        let drift = log_moneyness(self.spot, self.strike) + (self.rate - self.dividend_yield) * t;
        let d1 = drift / vol_sqrt_t + 0.5 * vol_sqrt_t;
        (d1, d1 - vol_sqrt_t)
    }
}
