// Property-based tests for toggle and contribution edits
//
// Properties tested:
// 1. Any sequence of toggles and edits keeps the selected total within the payment
// 2. Selecting then deselecting a booking restores the previous session
// 3. Edited contributions always land in [0, net amount]
// 4. Rejected operations leave the session untouched

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use wholesale_recon::core::Currency;
use wholesale_recon::matching::guard::MATCH_TOLERANCE;
use wholesale_recon::matching::services::parse_amount_input;
use wholesale_recon::matching::{
    BookingCandidate, MatchState, MatchingCalculator, MatchingError, MatchingSession, Payment,
};

fn cents(value: u64) -> Decimal {
    Decimal::new(value as i64, 2)
}

fn session(amount: Decimal, nets: &[Decimal]) -> MatchingSession {
    let payment = Payment::new("PAY-1", amount, Currency::USD, "SUP-1");
    let candidates = nets
        .iter()
        .enumerate()
        .map(|(i, net)| BookingCandidate::new(format!("BK-{}", i), *net, Currency::USD, "SUP-1"))
        .collect();
    MatchingSession::open(payment, candidates).expect("valid payment")
}

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize),
    Edit(usize, i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8).prop_map(Op::Toggle),
        (0usize..8, -50_000i64..150_000).prop_map(|(i, c)| Op::Edit(i, c)),
    ]
}

proptest! {
    /// Property: the selected total never exceeds the payment plus tolerance
    #[test]
    fn test_total_never_exceeds_payment(
        amount_cents in 1u64..=200_000,
        net_cents in prop::collection::vec(1u64..=100_000, 1..8),
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let amount = cents(amount_cents);
        let nets: Vec<Decimal> = net_cents.iter().map(|c| cents(*c)).collect();
        let mut current = session(amount, &nets);

        for op in ops {
            let outcome = match op {
                Op::Toggle(i) => MatchingCalculator::toggle(&current, &format!("BK-{}", i % nets.len())),
                Op::Edit(i, c) => MatchingCalculator::set_contribution(
                    &current,
                    &format!("BK-{}", i % nets.len()),
                    Decimal::new(c, 2),
                ),
            };

            if let Ok(next) = outcome {
                current = next;
            }

            prop_assert!(
                current.selected_total() <= amount + MATCH_TOLERANCE,
                "total {} exceeds payment {}", current.selected_total(), amount
            );
        }
    }

    /// Property: toggling a booking on and off restores the prior session
    #[test]
    fn test_toggle_twice_restores_session(
        amount_cents in 1u64..=200_000,
        net_cents in prop::collection::vec(1u64..=100_000, 1..8),
        preselect in prop::collection::vec(any::<bool>(), 8),
        target in 0usize..8,
    ) {
        let nets: Vec<Decimal> = net_cents.iter().map(|c| cents(*c)).collect();
        let mut before = session(cents(amount_cents), &nets);
        let target_id = format!("BK-{}", target % nets.len());

        for (i, pick) in preselect.iter().enumerate().take(nets.len()) {
            let id = format!("BK-{}", i);
            if *pick && id != target_id {
                if let Ok(next) = MatchingCalculator::toggle(&before, &id) {
                    before = next;
                }
            }
        }

        if let Ok(selected) = MatchingCalculator::toggle(&before, &target_id) {
            let after = MatchingCalculator::toggle(&selected, &target_id).unwrap();
            prop_assert_eq!(after.snapshot(), before.snapshot());
            prop_assert_eq!(after.result(), before.result());
        }
    }

    /// Property: edited contributions are clamped into [0, net amount]
    #[test]
    fn test_contribution_clamped_to_net(
        net_cents in 1u64..=100_000,
        input_cents in -500_000i64..=500_000,
    ) {
        let net = cents(net_cents);
        let selected = MatchingCalculator::toggle(&session(dec!(5000.00), &[net]), "BK-0").unwrap();

        let edited = MatchingCalculator::set_contribution(&selected, "BK-0", Decimal::new(input_cents, 2)).unwrap();
        let contribution = edited.contribution("BK-0");

        prop_assert!(contribution >= Decimal::ZERO);
        prop_assert!(contribution <= net);
        if input_cents <= 0 {
            prop_assert!(!edited.is_selected("BK-0"));
        } else {
            prop_assert_eq!(contribution, Decimal::new(input_cents, 2).min(net));
        }
    }

    /// Property: a rejected toggle leaves the session as it was
    #[test]
    fn test_rejected_toggle_leaves_session_unchanged(
        first_cents in 1u64..=50_000,
        second_cents in 1u64..=50_000,
    ) {
        let first = cents(first_cents);
        let second = cents(second_cents);
        let amount = first.max(second);
        let selected = MatchingCalculator::toggle(&session(amount, &[first, second]), "BK-0").unwrap();

        match MatchingCalculator::toggle(&selected, "BK-1") {
            Ok(next) => prop_assert!(next.selected_total() <= amount + MATCH_TOLERANCE),
            Err(e) => {
                prop_assert!(matches!(e, MatchingError::OverPaymentRejected { .. }), "expected OverPaymentRejected, got {:?}", e);
                prop_assert!(!selected.is_selected("BK-1"));
                prop_assert_eq!(selected.selected_total(), first);
            }
        }
    }
}

/// Payment 500.00 settled exactly by two bookings
#[test]
fn test_perfect_match_with_two_bookings() {
    let start = session(dec!(500.00), &[dec!(300.00), dec!(200.00)]);

    let after_a = MatchingCalculator::toggle(&start, "BK-0").unwrap();
    let after_b = MatchingCalculator::toggle(&after_a, "BK-1").unwrap();
    let result = after_b.result();

    assert_eq!(result.selected_total, dec!(500.00));
    assert_eq!(result.difference, Decimal::ZERO);
    assert!(result.is_perfect_match);
    assert!(!result.is_over_payment);
    assert_eq!(result.state, MatchState::Perfect);
    assert_eq!(result.selected_count, 2);
}

/// Payment 400.00 cannot take 300.00 and 200.00 together
#[test]
fn test_over_payment_rejected() {
    let start = session(dec!(400.00), &[dec!(300.00), dec!(200.00)]);

    let after_a = MatchingCalculator::toggle(&start, "BK-0").unwrap();
    let err = MatchingCalculator::toggle(&after_a, "BK-1").unwrap_err();

    assert!(matches!(err, MatchingError::OverPaymentRejected { .. }));
    assert!(after_a.is_selected("BK-0"));
    assert!(!after_a.is_selected("BK-1"));
    assert_eq!(after_a.selected_total(), dec!(300.00));
    assert_eq!(after_a.result().state, MatchState::Under);
}

/// An over-payment edit is rejected and keeps the previous contribution
#[test]
fn test_over_payment_edit_rejected() {
    let start = session(dec!(400.00), &[dec!(300.00), dec!(200.00)]);
    let after_a = MatchingCalculator::toggle(&start, "BK-0").unwrap();
    let reduced = MatchingCalculator::set_contribution(&after_a, "BK-0", dec!(150.00)).unwrap();
    let both = MatchingCalculator::toggle(&reduced, "BK-1").unwrap();

    let err = MatchingCalculator::set_contribution(&both, "BK-0", dec!(250.00)).unwrap_err();
    assert!(matches!(err, MatchingError::OverPaymentRejected { .. }));
    assert_eq!(both.contribution("BK-0"), dec!(150.00));
    assert_eq!(both.selected_total(), dec!(350.00));
}

/// A total exactly one cent over the payment passes the guard
#[test]
fn test_tolerance_edge_accepted() {
    let start = session(dec!(100.00), &[dec!(100.01)]);

    let selected = MatchingCalculator::toggle(&start, "BK-0").unwrap();
    let result = selected.result();

    assert_eq!(result.difference, dec!(-0.01));
    assert!(result.is_over_payment);
    assert!(!result.is_perfect_match);
    assert_eq!(result.state, MatchState::Perfect);
}

/// Two cents over is rejected
#[test]
fn test_beyond_tolerance_rejected() {
    let start = session(dec!(100.00), &[dec!(100.02)]);

    let err = MatchingCalculator::toggle(&start, "BK-0").unwrap_err();
    assert!(matches!(err, MatchingError::OverPaymentRejected { .. }));
}

/// Editing a booking that is not selected is an error
#[test]
fn test_edit_requires_selection() {
    let start = session(dec!(100.00), &[dec!(50.00)]);

    let err = MatchingCalculator::set_contribution(&start, "BK-0", dec!(10.00)).unwrap_err();
    assert_eq!(err, MatchingError::BookingNotSelected("BK-0".to_string()));
}

/// Amounts are rounded to the payment currency before clamping
#[test]
fn test_edit_rounds_to_currency_scale() {
    let payment = Payment::new("PAY-IDR", dec!(1000000), Currency::IDR, "SUP-1");
    let candidates = vec![BookingCandidate::new("BK-0", dec!(750000), Currency::IDR, "SUP-1")];
    let start = MatchingSession::open(payment, candidates).unwrap();
    let selected = MatchingCalculator::toggle(&start, "BK-0").unwrap();

    let edited = MatchingCalculator::set_contribution(&selected, "BK-0", dec!(500000.6)).unwrap();
    assert_eq!(edited.contribution("BK-0"), dec!(500001));
}

/// Input beyond the range of `Decimal` still clamps to the net amount
#[test]
fn test_huge_input_clamps_to_net() {
    let start = session(dec!(500.00), &[dec!(300.00)]);
    let selected = MatchingCalculator::toggle(&start, "BK-0").unwrap();
    let partial = MatchingCalculator::set_contribution(&selected, "BK-0", dec!(50.00)).unwrap();

    for raw in ["1e30", "100000000000000000000000000000", " 9.9e40 "] {
        let edited =
            MatchingCalculator::set_contribution(&partial, "BK-0", parse_amount_input(raw)).unwrap();
        assert!(edited.is_selected("BK-0"), "input {} deselected the booking", raw);
        assert_eq!(edited.contribution("BK-0"), dec!(300.00));
    }
}
