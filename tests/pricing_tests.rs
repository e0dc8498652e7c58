
use approx::{assert_abs_diff_eq, assert_relative_eq};
use bs_pricer::{black_scholes_price, norm_cdf, OptionContract, PayoffType, PricingError};
use statrs::distribution::{ContinuousCDF, Normal};
use test_utils::{load_reference_prices, sample_contracts};

const REFERENCE_DATA: &str = "tests/data/reference_prices.csv";

/// Every row of the reference table is reproduced for both payoff types.
#[test]
fn test_reference_prices() {
    let rows = load_reference_prices(REFERENCE_DATA).expect("Failed to load reference prices");
    assert!(!rows.is_empty(), "Reference table is empty");

    for row in &rows {
        let call = row.contract(PayoffType::Call).price(row.volatility).unwrap();
        let put = row.contract(PayoffType::Put).price(row.volatility).unwrap();
        assert_abs_diff_eq!(call, row.call_price, epsilon = 1e-8);
        assert_abs_diff_eq!(put, row.put_price, epsilon = 1e-8);
    }
}

/// Standard textbook case: K=S=100, T=1, r=5%, σ=20%.
#[test]
fn test_textbook_atm_scenario() {
    let call = black_scholes_price(100.0, 100.0, 1.0, PayoffType::Call, 0.05, 0.0, 0.2).unwrap();
    let put = black_scholes_price(100.0, 100.0, 1.0, PayoffType::Put, 0.05, 0.0, 0.2).unwrap();

    assert_abs_diff_eq!(call, 10.4506, epsilon = 5e-5);
    assert_abs_diff_eq!(put, 5.5735, epsilon = 5e-5);
    assert_relative_eq!(call - put, 100.0 - 100.0 * (-0.05_f64).exp(), max_relative = 1e-9);
}

/// Expired contracts pay intrinsic value regardless of vol, rate and dividend.
#[test]
fn test_expired_scenario() {
    let price = black_scholes_price(75.0, 100.0, 0.0, PayoffType::Call, 0.05, 0.0, 0.25).unwrap();
    assert_eq!(price, 25.0);

    for &(strike, spot) in &[(75.0, 100.0), (100.0, 75.0), (100.0, 100.0)] {
        for &(rate, dividend, vol) in &[(0.05, 0.0, 0.25), (-0.02, 0.04, 1.5), (0.1, 0.1, 0.0)] {
            let call =
                black_scholes_price(strike, spot, 0.0, PayoffType::Call, rate, dividend, vol)
                    .unwrap();
            let put = black_scholes_price(strike, spot, 0.0, PayoffType::Put, rate, dividend, vol)
                .unwrap();
            assert_eq!(call, f64::max(spot - strike, 0.0));
            assert_eq!(put, f64::max(strike - spot, 0.0));
        }
    }
}

#[test]
fn test_put_call_parity_holds_across_samples() {
    for inputs in sample_contracts(42, 500) {
        let call = inputs.price(PayoffType::Call);
        let put = inputs.price(PayoffType::Put);
        let t = inputs.time_to_expiration;
        let forward_value = inputs.spot * (-inputs.dividend_yield * t).exp()
            - inputs.strike * (-inputs.rate * t).exp();

        let scale = inputs.spot.max(inputs.strike);
        assert!(
            (call - put - forward_value).abs() <= 1e-9 * scale,
            "parity broken for {:?}: C={} P={} F={}",
            inputs,
            call,
            put,
            forward_value
        );
    }
}

#[test]
fn test_prices_are_non_negative_and_bounded() {
    for inputs in sample_contracts(7, 500) {
        let t = inputs.time_to_expiration;
        let call = inputs.price(PayoffType::Call);
        let put = inputs.price(PayoffType::Put);

        assert!(call >= 0.0 && put >= 0.0, "negative price for {:?}", inputs);
        // a call is worth no more than the dividend-adjusted spot, a put no more than the discounted strike
        assert!(call <= inputs.spot * (-inputs.dividend_yield * t).exp() + 1e-9);
        assert!(put <= inputs.strike * (-inputs.rate * t).exp() + 1e-9);
    }
}

#[test]
fn test_deep_out_of_the_money_stays_non_negative() {
    let call = OptionContract::new(1000.0, 10.0, 0.05, PayoffType::Call, 0.0).unwrap();
    let put = OptionContract::new(10.0, 1000.0, 0.05, PayoffType::Put, 0.0).unwrap();
    assert!(call.price(0.05).unwrap() >= 0.0);
    assert!(put.price(0.05).unwrap() >= 0.0);
}

#[test]
fn test_monotonic_in_spot_and_strike() {
    let tol = 1e-12;
    for inputs in sample_contracts(11, 200) {
        let mut higher_spot = inputs;
        higher_spot.spot *= 1.05;
        let mut higher_strike = inputs;
        higher_strike.strike *= 1.05;

        let call = inputs.price(PayoffType::Call);
        let put = inputs.price(PayoffType::Put);

        assert!(higher_spot.price(PayoffType::Call) >= call - tol);
        assert!(higher_spot.price(PayoffType::Put) <= put + tol);
        assert!(higher_strike.price(PayoffType::Call) <= call + tol);
        assert!(higher_strike.price(PayoffType::Put) >= put - tol);
    }
}

#[test]
fn test_vega_is_non_negative() {
    let tol = 1e-12;
    for inputs in sample_contracts(23, 200) {
        let contract_call = inputs.contract(PayoffType::Call);
        let contract_put = inputs.contract(PayoffType::Put);

        let mut previous = (0.0, 0.0);
        for step in 1..=20 {
            let vol = 0.05 * step as f64;
            let call = contract_call.price(vol).unwrap();
            let put = contract_put.price(vol).unwrap();
            assert!(call >= previous.0 - tol, "call not increasing in vol for {:?}", inputs);
            assert!(put >= previous.1 - tol, "put not increasing in vol for {:?}", inputs);
            previous = (call, put);
        }
    }
}

#[test]
fn test_boundary_errors() {
    assert_eq!(
        black_scholes_price(100.0, 100.0, 1.0, PayoffType::Call, 0.05, 0.0, 0.0),
        Err(PricingError::InvalidVolatility(0.0))
    );
    assert!(matches!(
        black_scholes_price(0.0, 100.0, 1.0, PayoffType::Call, 0.05, 0.0, 0.2),
        Err(PricingError::InvalidContractParameter { name: "strike", .. })
    ));
    assert!(matches!(
        black_scholes_price(-10.0, 100.0, 1.0, PayoffType::Put, 0.05, 0.0, 0.2),
        Err(PricingError::InvalidContractParameter { name: "strike", .. })
    ));
    assert!(matches!(
        black_scholes_price(100.0, 100.0, -1.0, PayoffType::Put, 0.05, 0.0, 0.2),
        Err(PricingError::InvalidContractParameter {
            name: "time_to_expiration",
            ..
        })
    ));
}

/// Both N(phi·d1) and N(phi·d2) must enter the formula: pricing with d2 twice
/// would give S·e^(-qT)·N(d2) - K·e^(-rT)·N(d2) instead.
#[test]
fn test_uses_distinct_d1_and_d2() {
    let contract = OptionContract::new(100.0, 100.0, 1.0, PayoffType::Call, 0.05).unwrap();
    let d2: f64 = 0.15;
    let duplicated = (100.0 - 100.0 * (-0.05_f64).exp()) * norm_cdf(d2);
    let price = contract.price(0.2).unwrap();
    assert!((price - duplicated).abs() > 1.0);
}

/// Agrees with statrs far more tightly than a polynomial erf (~1e-7) could.
#[test]
fn test_norm_cdf_matches_statrs() {
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut x = -8.0;
    while x <= 8.0 {
        // statrs drifts by ~2e-14 near x = -3.5
        assert_abs_diff_eq!(norm_cdf(x), normal.cdf(x), epsilon = 1e-12);
        x += 0.25;
    }
}

#[test]
fn test_contract_is_shareable_across_threads() {
    let contract = OptionContract::new(100.0, 100.0, 1.0, PayoffType::Call, 0.05).unwrap();
    let expected = contract.price(0.2).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || contract.price(0.2).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
