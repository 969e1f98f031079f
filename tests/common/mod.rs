#![allow(dead_code)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use storeledger::application::engine::{CallContext, StoreEngine};
use storeledger::domain::money::Amount;
use storeledger::domain::{AccountId, Timestamp};

pub const ADMIN: AccountId = 0;
pub const MERCHANT_1: AccountId = 2;
pub const MERCHANT_2: AccountId = 3;
pub const BUYER: AccountId = 4;

pub fn at(caller: AccountId, now: Timestamp) -> CallContext {
    CallContext::new(caller, now)
}

pub fn amount(value: Decimal) -> Amount {
    Amount::new(value).unwrap()
}

/// One merchant selling `id=1, price=150000, qty=15`, one buyer holding
/// `500000`. The setup of most scenarios.
pub fn storefront() -> StoreEngine {
    let mut engine = StoreEngine::default();
    engine.add_merchant(at(ADMIN, 0), MERCHANT_1).unwrap();
    engine
        .add_product(at(MERCHANT_1, 0), 1, "Phone", dec!(150000), 15)
        .unwrap();
    engine.deposit(at(BUYER, 0), amount(dec!(500000)));
    engine
}

/// Two merchants, three products, a funded buyer with a 50% ticket on
/// product 52. Mirrors the multi-merchant batch setup.
pub fn two_merchant_storefront() -> StoreEngine {
    let mut engine = StoreEngine::default();
    engine.add_merchant(at(ADMIN, 0), MERCHANT_1).unwrap();
    engine.add_merchant(at(ADMIN, 0), MERCHANT_2).unwrap();
    engine
        .add_product(at(MERCHANT_1, 0), 52, "Tablet", dec!(96315000), 15)
        .unwrap();
    engine
        .add_product(at(MERCHANT_2, 0), 100, "Laptop", dec!(151750000), 50)
        .unwrap();
    engine
        .add_product(at(MERCHANT_2, 0), 812, "Computer", dec!(5000000), 15)
        .unwrap();
    engine
        .add_discount_ticket(at(MERCHANT_1, 0), 52, 50, 10, BUYER)
        .unwrap();
    engine.deposit(at(BUYER, 0), amount(dec!(10000000000)));
    engine
}
