use crate::application::engine::{CallContext, StoreEngine};
use crate::domain::event::StoreEvent;
use crate::domain::money::Amount;
use crate::domain::{AccountId, ProductId, Timestamp};
use crate::error::{Result, StoreError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    AddMerchant,
    AddProduct,
    UpdatePrice,
    UpdateAmount,
    DeleteProduct,
    AddDiscountTicket,
    Deposit,
    Withdraw,
    Buy,
    Refund,
    Release,
    ForceRelease,
}

/// One row of the operation stream: the op, the invocation-layer inputs
/// (`at`, `caller`), and whichever argument columns the op uses. Unused
/// columns stay empty.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct OpRecord {
    pub op: OpKind,
    pub at: Timestamp,
    pub caller: AccountId,
    pub account: Option<AccountId>,
    pub product: Option<ProductId>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<u64>,
    pub percent: Option<u8>,
    pub amount: Option<Decimal>,
    pub discount: Option<bool>,
}

impl OpRecord {
    /// Dispatches the record into the engine, returning the completion
    /// event for the ops that emit one.
    pub fn apply(&self, engine: &mut StoreEngine) -> Result<Option<StoreEvent>> {
        let ctx = CallContext::new(self.caller, self.at);
        match self.op {
            OpKind::AddMerchant => {
                engine.add_merchant(ctx, self.account()?)?;
                Ok(None)
            }
            OpKind::AddProduct => {
                let name = self
                    .name
                    .clone()
                    .ok_or(StoreError::MissingField("name"))?;
                engine.add_product(ctx, self.product()?, name, self.price()?, self.quantity()?)?;
                Ok(None)
            }
            OpKind::UpdatePrice => {
                engine.update_price(ctx, self.product()?, self.price()?)?;
                Ok(None)
            }
            OpKind::UpdateAmount => {
                engine.update_quantity(ctx, self.product()?, self.quantity()?)?;
                Ok(None)
            }
            OpKind::DeleteProduct => {
                engine.delete_product(ctx, self.product()?)?;
                Ok(None)
            }
            OpKind::AddDiscountTicket => {
                let percent = self.percent.ok_or(StoreError::MissingField("percent"))?;
                engine.add_discount_ticket(
                    ctx,
                    self.product()?,
                    percent,
                    self.quantity()?,
                    self.account()?,
                )?;
                Ok(None)
            }
            OpKind::Deposit => {
                engine.deposit(ctx, Amount::new(self.amount()?)?);
                Ok(None)
            }
            OpKind::Withdraw => {
                engine.withdraw(ctx, Amount::new(self.amount()?)?)?;
                Ok(None)
            }
            OpKind::Buy => {
                let event = engine.buy_product(
                    ctx,
                    self.product()?,
                    self.quantity()?,
                    self.discount.unwrap_or(false),
                )?;
                Ok(Some(StoreEvent::Purchase(event)))
            }
            OpKind::Refund => {
                let event = engine.refund(ctx, self.product()?, self.quantity()?)?;
                Ok(Some(StoreEvent::Refund(event)))
            }
            OpKind::Release => {
                engine.release_matured(ctx);
                Ok(None)
            }
            OpKind::ForceRelease => {
                engine.force_release(ctx, self.account()?)?;
                Ok(None)
            }
        }
    }

    fn account(&self) -> Result<AccountId> {
        self.account.ok_or(StoreError::MissingField("account"))
    }

    fn product(&self) -> Result<ProductId> {
        self.product.ok_or(StoreError::MissingField("product"))
    }

    fn price(&self) -> Result<Decimal> {
        self.price.ok_or(StoreError::MissingField("price"))
    }

    fn quantity(&self) -> Result<u64> {
        self.quantity.ok_or(StoreError::MissingField("quantity"))
    }

    fn amount(&self) -> Result<Decimal> {
        self.amount.ok_or(StoreError::MissingField("amount"))
    }
}

/// Reads operation records from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record
/// lengths, and yields lazily so large streams never load fully into
/// memory.
pub struct OpReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OpReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn records(self) -> impl Iterator<Item = Result<OpRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(StoreError::from))
    }
}
