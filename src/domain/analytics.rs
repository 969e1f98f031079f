use crate::config::RankingMetric;
use crate::domain::money::Balance;
use crate::domain::{AccountId, ProductId};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Running sales totals, maintained incrementally at purchase time.
///
/// Counters are monotonically non-decreasing: refunds reverse funds, not
/// historical sales, so nothing here is ever decremented.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesAnalytics {
    units_by_product: HashMap<ProductId, u64>,
    score_by_merchant: HashMap<AccountId, Decimal>,
}

impl SalesAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_sale(
        &mut self,
        product: ProductId,
        creator: AccountId,
        quantity: u64,
        total: Balance,
        metric: RankingMetric,
    ) {
        *self.units_by_product.entry(product).or_default() += quantity;
        let score = match metric {
            RankingMetric::Quantity => Decimal::from(quantity),
            RankingMetric::Revenue => total.value(),
        };
        *self.score_by_merchant.entry(creator).or_default() += score;
    }

    pub fn units_sold(&self, product: ProductId) -> u64 {
        self.units_by_product.get(&product).copied().unwrap_or(0)
    }

    pub fn merchant_score(&self, merchant: AccountId) -> Decimal {
        self.score_by_merchant
            .get(&merchant)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Product with the most units sold; ties broken by lowest id.
    /// `None` before any sale.
    pub fn top_product(&self) -> Option<ProductId> {
        self.units_by_product
            .iter()
            .max_by(|(id_a, units_a), (id_b, units_b)| {
                units_a.cmp(units_b).then(id_b.cmp(id_a))
            })
            .map(|(id, _)| *id)
    }

    /// Merchant with the highest ranking accumulator; ties broken by
    /// lowest id. `None` before any sale.
    pub fn best_merchant(&self) -> Option<AccountId> {
        self.score_by_merchant
            .iter()
            .max_by(|(id_a, score_a), (id_b, score_b)| {
                score_a.cmp(score_b).then(id_b.cmp(id_a))
            })
            .map(|(id, _)| *id)
    }
}
