use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::{AccountId, ProductId};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Every way an engine operation can fail.
///
/// Each variant carries the offending identifier or value so the caller
/// sees exactly what was rejected; the engine never swallows a failure or
/// clamps an out-of-range request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("caller {0} is not authorized for this operation")]
    Unauthorized(AccountId),
    #[error("merchant {0} is already registered")]
    AlreadyRegistered(AccountId),
    #[error("product {0} not found")]
    ProductNotFound(ProductId),
    #[error("product id {0} is already in use")]
    DuplicateId(ProductId),
    #[error("discount percent {0} is out of range (max 100)")]
    InvalidDiscount(u8),
    #[error("product {product}: requested {requested} units, {available} available")]
    InsufficientInventory {
        product: ProductId,
        requested: u64,
        available: u64,
    },
    #[error("account {account}: balance {available} is short of {required}")]
    InsufficientBalance {
        account: AccountId,
        required: Decimal,
        available: Decimal,
    },
    #[error("no discount ticket for buyer {buyer} on product {product}")]
    NoTicket { buyer: AccountId, product: ProductId },
    #[error(
        "discount ticket for product {product}: requested {requested} units, {remaining} left"
    )]
    InsufficientTicketUnits {
        product: ProductId,
        requested: u64,
        remaining: u64,
    },
    #[error("account {account}: escrow total {available} is short of {required}")]
    InsufficientEscrow {
        account: AccountId,
        required: Decimal,
        available: Decimal,
    },
    #[error(
        "batch arrays differ in length: {ids} ids, {quantities} quantities, {discounts} discount flags"
    )]
    MalformedBatch {
        ids: usize,
        quantities: usize,
        discounts: usize,
    },
    #[error("amount {price} times {quantity} units is not representable")]
    AmountOverflow { price: Decimal, quantity: u64 },
    #[error("product {product}: restoring {quantity} units overflows inventory")]
    InventoryOverflow { product: ProductId, quantity: u64 },
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("price must not be negative, got {0}")]
    NegativePrice(Decimal),
    #[error("operation record is missing the `{0}` field")]
    MissingField(&'static str),
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
