use crate::domain::{AccountId, ProductId};
use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A per-buyer, per-product discount grant.
///
/// `units` bounds how many discounted units the buyer may still purchase;
/// it is never replenished automatically. A fully consumed ticket stays in
/// the book at zero units and behaves identically to queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountTicket {
    pub buyer: AccountId,
    pub product: ProductId,
    pub percent: u8,
    pub units: u64,
}

/// All outstanding discount tickets, keyed by `(buyer, product)`.
///
/// Granting a ticket for a pair that already has one overwrites it
/// (tickets are not additive).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TicketBook {
    tickets: BTreeMap<(AccountId, ProductId), DiscountTicket>,
}

impl TicketBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, ticket: DiscountTicket) {
        self.tickets.insert((ticket.buyer, ticket.product), ticket);
    }

    pub fn get(&self, buyer: AccountId, product: ProductId) -> Result<&DiscountTicket> {
        self.tickets
            .get(&(buyer, product))
            .ok_or(StoreError::NoTicket { buyer, product })
    }

    /// Decrements the ticket's remaining units by `units`, validating
    /// before mutating. The exhausted ticket is retained at zero units.
    pub fn consume(&mut self, buyer: AccountId, product: ProductId, units: u64) -> Result<u8> {
        let ticket = self
            .tickets
            .get_mut(&(buyer, product))
            .ok_or(StoreError::NoTicket { buyer, product })?;
        if units > ticket.units {
            return Err(StoreError::InsufficientTicketUnits {
                product,
                requested: units,
                remaining: ticket.units,
            });
        }
        ticket.units -= units;
        Ok(ticket.percent)
    }

    /// Every ticket held by `buyer`, ordered by product id.
    pub fn for_buyer(&self, buyer: AccountId) -> Vec<&DiscountTicket> {
        self.tickets
            .range((buyer, ProductId::MIN)..=(buyer, ProductId::MAX))
            .map(|(_, t)| t)
            .collect()
    }
}
