use crate::config::EngineConfig;
use crate::domain::account::Account;
use crate::domain::analytics::SalesAnalytics;
use crate::domain::event::{PurchaseEvent, RefundEvent};
use crate::domain::money::{Amount, Balance};
use crate::domain::product::{Catalog, Product};
use crate::domain::ticket::{DiscountTicket, TicketBook};
use crate::domain::{AccountId, ProductId, Timestamp};
use crate::error::{Result, StoreError};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Trusted per-call inputs resolved by the invocation layer.
#[derive(Debug, Clone, Copy)]
pub struct CallContext {
    pub caller: AccountId,
    pub now: Timestamp,
}

impl CallContext {
    pub fn new(caller: AccountId, now: Timestamp) -> Self {
        Self { caller, now }
    }
}

/// Everything the engine owns. Kept in one clonable struct so multi-step
/// operations can stage their effects on a copy and commit only on
/// success.
#[derive(Debug, Clone, Default, PartialEq)]
struct StoreState {
    /// Authorized sellers, insertion order, no duplicates.
    merchants: Vec<AccountId>,
    catalog: Catalog,
    accounts: HashMap<AccountId, Account>,
    tickets: TicketBook,
    analytics: SalesAnalytics,
}

impl StoreState {
    fn account_mut(&mut self, id: AccountId) -> &mut Account {
        self.accounts.entry(id).or_insert_with(|| Account::new(id))
    }
}

/// The marketplace accounting core.
///
/// Operations run strictly sequentially; every mutating call either fully
/// commits or leaves no observable state change. Failures surface the
/// offending identifier verbatim as a [`StoreError`].
#[derive(Debug, Clone, PartialEq)]
pub struct StoreEngine {
    config: EngineConfig,
    state: StoreState,
}

impl Default for StoreEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl StoreEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: StoreState::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---- admin surface ----

    /// Registers `merchant` as an authorized seller. Admin only.
    pub fn add_merchant(&mut self, ctx: CallContext, merchant: AccountId) -> Result<()> {
        self.require_admin(ctx)?;
        if self.state.merchants.contains(&merchant) {
            return Err(StoreError::AlreadyRegistered(merchant));
        }
        self.state.merchants.push(merchant);
        Ok(())
    }

    /// Moves `account`'s entire escrow queue into its spendable balance
    /// regardless of maturity, returning the released total. Admin only;
    /// the dispute-resolution escape hatch.
    pub fn force_release(&mut self, ctx: CallContext, account: AccountId) -> Result<Balance> {
        self.require_admin(ctx)?;
        Ok(self.state.account_mut(account).release_all())
    }

    // ---- merchant surface ----

    /// Lists a new product owned by the caller. Registered merchants only;
    /// the id must be unused.
    pub fn add_product(
        &mut self,
        ctx: CallContext,
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        quantity: u64,
    ) -> Result<()> {
        if !self.is_merchant(ctx.caller) {
            return Err(StoreError::Unauthorized(ctx.caller));
        }
        let price = Balance::non_negative(price)?;
        self.state.catalog.insert(Product {
            id,
            name: name.into(),
            price,
            quantity,
            creator: ctx.caller,
        })
    }

    pub fn update_price(&mut self, ctx: CallContext, id: ProductId, price: Decimal) -> Result<()> {
        let price = Balance::non_negative(price)?;
        let product = self.owned_product_mut(ctx, id)?;
        product.price = price;
        Ok(())
    }

    pub fn update_quantity(&mut self, ctx: CallContext, id: ProductId, quantity: u64) -> Result<()> {
        let product = self.owned_product_mut(ctx, id)?;
        product.quantity = quantity;
        Ok(())
    }

    /// Removes the product entirely; its id becomes free for reuse.
    pub fn delete_product(&mut self, ctx: CallContext, id: ProductId) -> Result<()> {
        self.owned_product_mut(ctx, id)?;
        self.state.catalog.remove(id)?;
        Ok(())
    }

    /// Grants `buyer` a discount on the caller's product, overwriting any
    /// prior ticket for that `(buyer, product)` pair.
    pub fn add_discount_ticket(
        &mut self,
        ctx: CallContext,
        product: ProductId,
        percent: u8,
        units: u64,
        buyer: AccountId,
    ) -> Result<()> {
        self.owned_product_mut(ctx, product)?;
        if percent > 100 {
            return Err(StoreError::InvalidDiscount(percent));
        }
        self.state.tickets.grant(DiscountTicket {
            buyer,
            product,
            percent,
            units,
        });
        Ok(())
    }

    // ---- account-owner surface ----

    /// Credits the caller's spendable balance. The only way funds enter
    /// the system.
    pub fn deposit(&mut self, ctx: CallContext, amount: Amount) {
        self.state.account_mut(ctx.caller).deposit(amount);
    }

    /// Debits the caller's spendable balance and transfers the funds out
    /// of the system.
    pub fn withdraw(&mut self, ctx: CallContext, amount: Amount) -> Result<()> {
        self.state.account_mut(ctx.caller).withdraw(amount)
    }

    /// Releases every matured escrow entry on the caller's own account,
    /// returning the released total. A no-op when nothing has matured.
    pub fn release_matured(&mut self, ctx: CallContext) -> Balance {
        self.state.account_mut(ctx.caller).release_matured(ctx.now)
    }

    // ---- buyer surface ----

    /// Buys `quantity` units of `product`, caller = buyer.
    ///
    /// Debits the buyer's spendable balance, credits the creator's escrow
    /// queue under the configured hold, decrements inventory, and updates
    /// the running analytics. With `use_discount` the buyer's ticket for
    /// this product is consumed and the unit price floored to
    /// `price * (100 - percent) / 100`. Any failure leaves every touched
    /// entity unchanged.
    pub fn buy_product(
        &mut self,
        ctx: CallContext,
        product: ProductId,
        quantity: u64,
        use_discount: bool,
    ) -> Result<PurchaseEvent> {
        let mut staged = self.state.clone();
        let event = Self::apply_purchase(
            &mut staged,
            &self.config,
            ctx,
            product,
            quantity,
            use_discount,
        )?;
        self.state = staged;
        Ok(event)
    }

    /// Buys several products in one atomic unit. The parallel slices must
    /// have equal lengths; items execute in order, and the first failing
    /// item discards the effects of every item in the batch.
    pub fn batch_buy(
        &mut self,
        ctx: CallContext,
        products: &[ProductId],
        quantities: &[u64],
        discounts: &[bool],
    ) -> Result<Vec<PurchaseEvent>> {
        if products.len() != quantities.len() || products.len() != discounts.len() {
            return Err(StoreError::MalformedBatch {
                ids: products.len(),
                quantities: quantities.len(),
                discounts: discounts.len(),
            });
        }
        let mut staged = self.state.clone();
        let mut events = Vec::with_capacity(products.len());
        for ((&product, &quantity), &use_discount) in
            products.iter().zip(quantities).zip(discounts)
        {
            events.push(Self::apply_purchase(
                &mut staged,
                &self.config,
                ctx,
                product,
                quantity,
                use_discount,
            )?);
        }
        self.state = staged;
        Ok(events)
    }

    /// Reverses a purchase of `quantity` units at the product's *current*
    /// catalog price: debits the creator's escrow queue FIFO, credits the
    /// buyer's escrow under a fresh hold, and restores the product's
    /// inventory. Refunded funds are not instantly spendable.
    pub fn refund(
        &mut self,
        ctx: CallContext,
        product: ProductId,
        quantity: u64,
    ) -> Result<RefundEvent> {
        let found = self.state.catalog.get(product)?;
        let creator = found.creator;
        let amount = found.price.times(quantity)?;
        let restocked = found
            .quantity
            .checked_add(quantity)
            .ok_or(StoreError::InventoryOverflow { product, quantity })?;

        // debit_escrow validates the queue total before touching it, so
        // the mutations below it cannot fail.
        self.state.account_mut(creator).debit_escrow(amount)?;
        self.state
            .account_mut(ctx.caller)
            .credit_escrow(amount, ctx.now + self.config.hold_duration);
        self.state.catalog.get_mut(product)?.quantity = restocked;

        Ok(RefundEvent {
            buyer: ctx.caller,
            product,
            quantity,
            creator,
            amount,
        })
    }

    // ---- read-only surface ----

    /// Authorized sellers in registration order.
    pub fn merchants(&self) -> &[AccountId] {
        &self.state.merchants
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.state.catalog.iter()
    }

    pub fn product(&self, id: ProductId) -> Result<&Product> {
        self.state.catalog.get(id)
    }

    pub fn creator_of(&self, id: ProductId) -> Result<AccountId> {
        Ok(self.state.catalog.get(id)?.creator)
    }

    pub fn price(&self, id: ProductId) -> Result<Balance> {
        Ok(self.state.catalog.get(id)?.price)
    }

    pub fn available_quantity(&self, id: ProductId) -> Result<u64> {
        Ok(self.state.catalog.get(id)?.quantity)
    }

    /// Spendable balance; zero for accounts the engine has never seen.
    pub fn balance(&self, account: AccountId) -> Balance {
        self.state
            .accounts
            .get(&account)
            .map(|a| a.spendable)
            .unwrap_or(Balance::ZERO)
    }

    /// Total escrowed (blocked) funds, matured or not.
    pub fn blocked_balance(&self, account: AccountId) -> Balance {
        self.state
            .accounts
            .get(&account)
            .map(|a| a.blocked())
            .unwrap_or(Balance::ZERO)
    }

    pub fn discount_tickets(&self, buyer: AccountId) -> Vec<&DiscountTicket> {
        self.state.tickets.for_buyer(buyer)
    }

    pub fn discount_percent(&self, buyer: AccountId, product: ProductId) -> Result<u8> {
        Ok(self.state.tickets.get(buyer, product)?.percent)
    }

    pub fn ticket_units(&self, buyer: AccountId, product: ProductId) -> Result<u64> {
        Ok(self.state.tickets.get(buyer, product)?.units)
    }

    pub fn units_sold(&self, product: ProductId) -> u64 {
        self.state.analytics.units_sold(product)
    }

    pub fn top_purchased_product(&self) -> Option<ProductId> {
        self.state.analytics.top_product()
    }

    pub fn best_merchant(&self) -> Option<AccountId> {
        self.state.analytics.best_merchant()
    }

    /// Sum of every spendable balance and escrow entry in the system.
    /// Changes only through deposits and withdrawals; used for
    /// reconciliation.
    pub fn total_funds(&self) -> Balance {
        self.state
            .accounts
            .values()
            .fold(Balance::ZERO, |acc, a| acc + a.spendable + a.blocked())
    }

    /// All accounts the engine has seen, sorted by id.
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.state.accounts.values().collect();
        accounts.sort_by_key(|a| a.id);
        accounts
    }

    // ---- internals ----

    fn require_admin(&self, ctx: CallContext) -> Result<()> {
        if ctx.caller == self.config.admin {
            Ok(())
        } else {
            Err(StoreError::Unauthorized(ctx.caller))
        }
    }

    fn is_merchant(&self, account: AccountId) -> bool {
        self.state.merchants.contains(&account)
    }

    /// Looks up a product and checks the caller is its creator.
    fn owned_product_mut(&mut self, ctx: CallContext, id: ProductId) -> Result<&mut Product> {
        let product = self.state.catalog.get_mut(id)?;
        if product.creator != ctx.caller {
            return Err(StoreError::Unauthorized(ctx.caller));
        }
        Ok(product)
    }

    /// One purchase applied to a staged copy of the state. Callers commit
    /// the copy only when every item succeeded, which is what makes
    /// single and batch purchases atomic.
    fn apply_purchase(
        state: &mut StoreState,
        config: &EngineConfig,
        ctx: CallContext,
        product_id: ProductId,
        quantity: u64,
        use_discount: bool,
    ) -> Result<PurchaseEvent> {
        let product = state.catalog.get(product_id)?;
        if quantity == 0 || quantity > product.quantity {
            return Err(StoreError::InsufficientInventory {
                product: product_id,
                requested: quantity,
                available: product.quantity,
            });
        }
        let creator = product.creator;
        let base_price = product.price;

        let unit_price = if use_discount {
            let percent = state.tickets.consume(ctx.caller, product_id, quantity)?;
            base_price.discounted(percent)
        } else {
            base_price
        };
        let total = unit_price.times(quantity)?;

        state.account_mut(ctx.caller).debit_spendable(total)?;
        state
            .account_mut(creator)
            .credit_escrow(total, ctx.now + config.hold_duration);
        state.catalog.get_mut(product_id)?.quantity -= quantity;
        state
            .analytics
            .record_sale(product_id, creator, quantity, total, config.ranking);

        Ok(PurchaseEvent {
            buyer: ctx.caller,
            product: product_id,
            quantity,
            creator,
            unit_price,
        })
    }
}
