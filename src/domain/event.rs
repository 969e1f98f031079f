use crate::domain::money::Balance;
use crate::domain::{AccountId, ProductId};
use serde::{Deserialize, Serialize};

/// Emitted by every successful purchase, one per item in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseEvent {
    pub buyer: AccountId,
    pub product: ProductId,
    pub quantity: u64,
    pub creator: AccountId,
    /// Price actually paid per unit, after any discount.
    pub unit_price: Balance,
}

/// Emitted by every successful refund.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefundEvent {
    pub buyer: AccountId,
    pub product: ProductId,
    pub quantity: u64,
    pub creator: AccountId,
    /// Total moved from the creator's escrow back to the buyer's.
    pub amount: Balance,
}

/// Completion events are returned to the invocation layer, which owns the
/// transport; the engine never emits anything ambiently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StoreEvent {
    Purchase(PurchaseEvent),
    Refund(RefundEvent),
}
