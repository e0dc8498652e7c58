pub mod bs;

/// Numeric helpers shared by the pricing models
pub mod utils {
    use std::f64::consts::SQRT_2;

    /// Standard normal cumulative distribution function.
    ///
    /// Uses the error-function identity `N(x) = (1 + erf(x / sqrt(2))) / 2`
    /// with `erf` from `libm`, so values agree with reference implementations
    /// to floating-point precision.
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * (1.0 + libm::erf(x / SQRT_2))
    }

    /// Calculate log-moneyness of the spot against the strike: ln(S/K)
    pub fn log_moneyness(spot: f64, strike: f64) -> f64 {
        (spot / strike).ln()
    }

}
