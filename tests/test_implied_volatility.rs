use assert_approx_eq::assert_approx_eq;
use blackscholes_iv::{
    implied_volatility, BlackScholesError, ImpliedVolatility, Inputs, IvConfig, OptionType, Pricing,
};

const INPUTS_CALL_ATM: Inputs = Inputs {
    option_type: OptionType::Call,
    s: 45.0,
    k: 45.0,
    p: Some(4.89),
    r: 0.02,
    q: 0.0,
    t: 1.0,
    sigma: None,
};
const INPUTS_PUT_ATM: Inputs = Inputs {
    option_type: OptionType::Put,
    p: Some(4.00),
    ..INPUTS_CALL_ATM
};

#[test]
fn iv_call_scenario() {
    assert_approx_eq!(INPUTS_CALL_ATM.calc_iv().unwrap(), 0.2499, 1e-4);
}

#[test]
fn iv_put_scenario() {
    assert_approx_eq!(INPUTS_PUT_ATM.calc_iv().unwrap(), 0.24996, 1e-4);
}

#[test]
fn iv_free_function_matches_trait() {
    let free = implied_volatility(OptionType::Call, 45.0, 45.0, 1.0, 0.02, 0.0, 4.89, None).unwrap();
    assert_eq!(free, INPUTS_CALL_ATM.calc_iv().unwrap());
}

#[test]
fn iv_recovers_market_like_quotes() {
    // (type, spot, strike, t, r, sigma)
    let quotes = [
        (OptionType::Call, 92.45, 107.5, 0.087_671_232_876_712_3, 0.001_929_601_988_281_52, 0.3),
        (OptionType::Call, 93.076_666_666_666_7, 107.75, 0.164_383_561_643_836, 0.002_663_901_253_462_86, 0.2878),
        (OptionType::Call, 94.116_666_666_666_7, 107.75, 0.416_438_356_164_384, 0.003_673_609_678_526_15, 0.2919),
        (OptionType::Put, 94.266_666_666_666_7, 107.75, 0.498_630_136_986_301, 0.003_726_098_388_561_32, 0.2888),
        (OptionType::Put, 94.39, 107.75, 0.917_808_219_178_082, 0.003_374_646_307_584_52, 0.2876),
        (OptionType::Call, 100.0, 95.0, 1.0, 1.0, 1.0),
        (OptionType::Put, 100.0, 95.0, 1.0, 1.0, 1.0),
    ];
    for (option_type, s, k, t, r, sigma) in quotes {
        let priced = Inputs::new(option_type, s, k, None, r, 0.0, t, Some(sigma));
        let p = priced.calc_price().unwrap();
        let iv = priced.with_price(p).calc_iv().unwrap();
        assert_approx_eq!(iv, sigma, 1e-4);
    }
}

#[test]
fn iv_falls_back_when_newton_leaves_bounds() {
    // high rate put: the Newton step from the estimate overshoots 200%
    let priced = Inputs::new(OptionType::Put, 100.0, 95.0, None, 1.0, 0.0, 1.0, Some(1.0));
    let p = priced.calc_price().unwrap();
    assert_approx_eq!(p, 4.118_542, 1e-6);
    assert_approx_eq!(priced.with_price(p).calc_iv().unwrap(), 1.0, 1e-4);
}

#[test]
fn iv_falls_back_for_low_volatility_with_carry() {
    let priced = Inputs::new(OptionType::Call, 96.0, 100.0, None, 0.0, 0.025, 1.6, Some(0.055));
    let p = priced.calc_price().unwrap();
    assert_approx_eq!(priced.with_price(p).calc_iv().unwrap(), 0.055, 1e-4);
}

#[test]
fn iv_not_found_for_unreachable_deep_otm_price() {
    let far = Inputs::new(OptionType::Call, 100.0, 1000.0, Some(0.01), 0.02, 0.0, 0.01, None);
    match far.calc_iv() {
        Err(BlackScholesError::ConvergenceFailed { .. }) => {}
        other => panic!("expected ConvergenceFailed, got {other:?}"),
    }
}

#[test]
fn iv_not_found_for_price_above_the_range() {
    // more than the option is worth at 200% volatility
    let result = implied_volatility(OptionType::Put, 100.0, 100.0, 0.25, 0.01, 0.0, 60.0, None);
    assert!(matches!(result, Err(BlackScholesError::ConvergenceFailed { .. })));
}

#[test]
fn iv_not_found_when_false_position_stalls_on_one_side() {
    // ATM put, 8% rate, two years, priced at 5% volatility. The estimate clamps
    // to 0.01, Newton leaves the bounds, and the full-range bracket keeps moving
    // the same end until the step cap runs out.
    let priced = Inputs::new(OptionType::Put, 100.0, 100.0, None, 0.08, 0.0, 2.0, Some(0.05));
    let p = priced.calc_price().unwrap();
    assert_approx_eq!(p, 0.026_627_354_766_792_8, 1e-9);
    match priced.with_price(p).calc_iv() {
        Err(BlackScholesError::ConvergenceFailed { iterations, residual }) => {
            assert_eq!(iterations, 100);
            assert!(residual > 1e-5, "residual {residual}");
        }
        other => panic!("expected ConvergenceFailed, got {other:?}"),
    }

    // a little more volatility and the same bracket converges
    let priced = priced.with_sigma(0.06);
    let p = priced.calc_price().unwrap();
    assert_approx_eq!(priced.with_price(p).calc_iv().unwrap(), 0.06, 1e-4);
}

#[test]
fn iv_budget_exhaustion_is_not_found() {
    let result = implied_volatility(OptionType::Call, 45.0, 45.0, 1.0, 0.02, 0.0, 4.89, Some(1));
    match result {
        Err(BlackScholesError::ConvergenceFailed { iterations, residual }) => {
            assert_eq!(iterations, 1);
            assert!(residual > 1e-5);
        }
        other => panic!("expected ConvergenceFailed, got {other:?}"),
    }
}

#[test]
fn iv_zero_iterations_uses_default_cap() {
    let capped = implied_volatility(OptionType::Call, 45.0, 45.0, 1.0, 0.02, 0.0, 4.89, Some(0)).unwrap();
    let default = implied_volatility(OptionType::Call, 45.0, 45.0, 1.0, 0.02, 0.0, 4.89, None).unwrap();
    assert_eq!(capped, default);
}

#[test]
fn iv_tighter_tolerance_is_more_accurate() {
    let priced = Inputs::new(OptionType::Call, 100.0, 105.0, None, 0.03, 0.01, 0.5, Some(0.37));
    let p = priced.calc_price().unwrap();
    let config = IvConfig::default().with_tolerance(1e-10);
    assert_approx_eq!(priced.with_price(p).calc_iv_with(&config).unwrap(), 0.37, 1e-9);
}

#[test]
fn iv_stays_inside_bounds() {
    for (p, option_type) in [(0.5, OptionType::Call), (3.0, OptionType::Put), (12.0, OptionType::Call)] {
        let inputs = Inputs::new(option_type, 100.0, 100.0, Some(p), 0.02, 0.01, 0.5, None);
        if let Ok(iv) = inputs.calc_iv() {
            assert!((0.01..=2.0).contains(&iv), "iv {iv} out of bounds");
            let repriced = inputs.with_sigma(iv).calc_price().unwrap();
            assert!((repriced - p).abs() <= 1e-5);
        }
    }
}

#[test]
fn iv_requires_observed_price() {
    let inputs = Inputs { p: None, ..INPUTS_CALL_ATM };
    assert_eq!(inputs.calc_iv(), Err(BlackScholesError::MissingPrice));
}
