mod common;

use common::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use storeledger::application::engine::StoreEngine;
use storeledger::domain::money::{Amount, Balance};

/// Funds only enter through deposits and leave through withdrawals;
/// every other operation shuffles them between balances and escrows.
/// Run a randomized operation soup and reconcile after every step.
#[test]
fn funds_are_conserved_under_random_operation_sequences() {
    let mut rng = StdRng::seed_from_u64(0x5105);

    for _ in 0..20 {
        let mut engine = two_merchant_storefront();
        // The fixture already deposited the buyer's float.
        let mut net_in = Balance(dec!(10000000000));
        let mut now = 100u64;

        for _ in 0..400 {
            now += rng.gen_range(1..5000);
            match rng.gen_range(0u8..8) {
                0 => {
                    let value = Decimal::from(rng.gen_range(1..1_000_000u64));
                    engine.deposit(at(BUYER, now), Amount::new(value).unwrap());
                    net_in += Balance(value);
                }
                1 => {
                    let value = Decimal::from(rng.gen_range(1..1_000_000u64));
                    if engine.withdraw(at(BUYER, now), Amount::new(value).unwrap()).is_ok() {
                        net_in -= Balance(value);
                    }
                }
                2 => {
                    let value = Decimal::from(rng.gen_range(1..500_000u64));
                    let who = [MERCHANT_1, MERCHANT_2][rng.gen_range(0..2)];
                    if engine.withdraw(at(who, now), Amount::new(value).unwrap()).is_ok() {
                        net_in -= Balance(value);
                    }
                }
                3 => {
                    let product = [52, 100, 812][rng.gen_range(0..3)];
                    let quantity = rng.gen_range(0..4);
                    let discount = rng.gen_bool(0.3);
                    let _ = engine.buy_product(at(BUYER, now), product, quantity, discount);
                }
                4 => {
                    let product = [52, 100, 812][rng.gen_range(0..3)];
                    let quantity = rng.gen_range(1..3);
                    let _ = engine.refund(at(BUYER, now), product, quantity);
                }
                5 => {
                    let who = [BUYER, MERCHANT_1, MERCHANT_2][rng.gen_range(0..3)];
                    engine.release_matured(at(who, now));
                }
                6 => {
                    let who = [BUYER, MERCHANT_1, MERCHANT_2][rng.gen_range(0..3)];
                    engine.force_release(at(ADMIN, now), who).unwrap();
                }
                _ => {
                    let _ = engine.batch_buy(
                        at(BUYER, now),
                        &[52, 812],
                        &[rng.gen_range(0..3), rng.gen_range(0..3)],
                        &[rng.gen_bool(0.5), false],
                    );
                }
            }

            assert_eq!(
                engine.total_funds(),
                net_in,
                "conservation broke mid-sequence"
            );
        }
    }
}

/// The same reconciliation on the §8-style deterministic walkthrough.
#[test]
fn funds_are_conserved_through_a_full_lifecycle() {
    let mut engine = StoreEngine::default();
    engine.add_merchant(at(ADMIN, 0), MERCHANT_1).unwrap();
    engine
        .add_product(at(MERCHANT_1, 0), 1, "Phone", dec!(150000), 15)
        .unwrap();

    engine.deposit(at(BUYER, 10), amount(dec!(500000)));
    assert_eq!(engine.total_funds(), Balance(dec!(500000)));

    engine.buy_product(at(BUYER, 20), 1, 3, false).unwrap();
    assert_eq!(engine.total_funds(), Balance(dec!(500000)));

    engine.refund(at(BUYER, 30), 1, 1).unwrap();
    assert_eq!(engine.total_funds(), Balance(dec!(500000)));

    engine.force_release(at(ADMIN, 40), MERCHANT_1).unwrap();
    engine.force_release(at(ADMIN, 40), BUYER).unwrap();
    assert_eq!(engine.total_funds(), Balance(dec!(500000)));

    engine.withdraw(at(MERCHANT_1, 50), amount(dec!(300000))).unwrap();
    engine.withdraw(at(BUYER, 50), amount(dec!(200000))).unwrap();
    assert_eq!(engine.total_funds(), Balance::ZERO);
}
