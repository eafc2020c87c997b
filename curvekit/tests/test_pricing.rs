//! Pricing against bootstrapped curves through the façade.

use approx::assert_abs_diff_eq;
use curvekit::prelude::*;

fn quotes(pairs: &[(Time, Real)]) -> Vec<MarketQuote> {
    pairs.iter().copied().map(MarketQuote::from).collect()
}

fn curves() -> (PiecewiseZeroCurve, PiecewiseDefaultCurve) {
    let config = BootstrapConfig::default();
    let rates = PiecewiseZeroCurve::bootstrap(
        &quotes(&[(1.0, 0.02), (2.0, 0.025), (3.0, 0.027), (5.0, 0.03), (10.0, 0.034)]),
        &SwapConventions::default(),
        &config,
    )
    .unwrap();
    let credit = PiecewiseDefaultCurve::bootstrap(
        &quotes(&[(1.0, 0.006), (3.0, 0.01), (5.0, 0.013), (10.0, 0.016)]),
        &rates,
        &CdsConventions::default(),
        &config,
    )
    .unwrap();
    (rates, credit)
}

#[test]
fn test_batched_queries_match_pointwise() {
    let (rates, credit) = curves();
    let times = [0.0, 0.5, 1.0, 4.2, 10.0, 12.0];

    let dfs = rates.discounts(&times);
    let survival = credit.survival_probabilities(&times);
    for (i, &t) in times.iter().enumerate() {
        assert_eq!(dfs[i], rates.discount(t));
        assert_eq!(survival[i], credit.survival_probability(t));
    }
    assert!(rates.domain_warning(12.0).is_some());
    assert!(credit.domain_warning(12.0).is_some());
}

#[test]
fn test_seasoned_swap_value() {
    let (rates, _) = curves();
    let swap = VanillaSwap::new(
        SwapType::Receiver,
        0.03,
        TimeSchedule::new(0.0, 5.0, 1.0).unwrap(),
    );
    // Fixed at par today.
    assert_abs_diff_eq!(swap.npv(&rates), 0.0, epsilon = 1e-8);
    assert_abs_diff_eq!(swap.npv_at(&rates, 0.0), 0.0, epsilon = 1e-8);
    // After the last payment nothing is left.
    assert_eq!(swap.npv_at(&rates, 5.0), 0.0);
}

#[test]
fn test_off_market_cds() {
    let (rates, credit) = curves();
    let cds = CreditDefaultSwap::new(0.0, 5.0, 0.25, 0.25, 0.4).unwrap();
    let par: Real = cds.par_spread(&rates, &credit);
    assert_abs_diff_eq!(par, 0.013, epsilon = 1e-8);

    // Protection bought below par is in the money for the buyer.
    let buyer: Real = cds.payer_npv(&rates, &credit, 0.01);
    assert!(buyer > 0.0);
    let legs = cds.legs(&rates, &credit);
    assert_abs_diff_eq!(buyer, legs.dl - 0.01 * legs.dv01, epsilon = 1e-15);
}

#[test]
fn test_errors_surface_through_prelude() {
    let err: Error = PiecewiseZeroCurve::bootstrap(
        &quotes(&[(1.0, 0.02), (1.0, 0.02)]),
        &SwapConventions::default(),
        &BootstrapConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::DegenerateInput(_)));
}
