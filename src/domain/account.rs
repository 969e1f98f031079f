use crate::domain::money::{Amount, Balance};
use crate::domain::{AccountId, Timestamp};
use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single time-locked credit sitting in an account's escrow queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EscrowEntry {
    pub amount: Balance,
    /// Earliest timestamp at which the entry may be released.
    pub matures_at: Timestamp,
}

/// The ledger state of one participant (buyer or merchant; the same
/// identifier can be both).
///
/// `spendable` is immediately available for purchases and withdrawal;
/// `escrow` holds purchase proceeds and refund reversals until their
/// maturity time, FIFO by credit order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub spendable: Balance,
    pub escrow: VecDeque<EscrowEntry>,
}

impl Account {
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            spendable: Balance::ZERO,
            escrow: VecDeque::new(),
        }
    }

    /// Sum of all queued escrow entries, matured or not.
    pub fn blocked(&self) -> Balance {
        self.escrow
            .iter()
            .fold(Balance::ZERO, |acc, e| acc + e.amount)
    }

    pub fn deposit(&mut self, amount: Amount) {
        self.spendable += amount.into();
    }

    /// Debits the spendable balance, failing without mutation when short.
    pub fn debit_spendable(&mut self, amount: Balance) -> Result<()> {
        if self.spendable >= amount {
            self.spendable -= amount;
            Ok(())
        } else {
            Err(StoreError::InsufficientBalance {
                account: self.id,
                required: amount.value(),
                available: self.spendable.value(),
            })
        }
    }

    pub fn withdraw(&mut self, amount: Amount) -> Result<()> {
        self.debit_spendable(amount.into())
    }

    /// Appends a time-locked credit. Zero-valued credits are dropped so the
    /// queue only ever holds entries worth releasing.
    pub fn credit_escrow(&mut self, amount: Balance, matures_at: Timestamp) {
        if !amount.is_zero() {
            self.escrow.push_back(EscrowEntry { amount, matures_at });
        }
    }

    /// Moves every entry with `matures_at <= now` into the spendable
    /// balance and returns the released total. A no-op when nothing has
    /// matured, which makes repeated calls idempotent.
    pub fn release_matured(&mut self, now: Timestamp) -> Balance {
        let mut released = Balance::ZERO;
        self.escrow.retain(|entry| {
            if entry.matures_at <= now {
                released += entry.amount;
                false
            } else {
                true
            }
        });
        self.spendable += released;
        released
    }

    /// Moves the whole escrow queue into the spendable balance regardless
    /// of maturity. Admin dispute-resolution path.
    pub fn release_all(&mut self) -> Balance {
        let released = self.blocked();
        self.escrow.clear();
        self.spendable += released;
        released
    }

    /// Debits `amount` from the escrow queue, earliest entries first,
    /// splitting the last touched entry when it only partially covers the
    /// remainder. Fails without mutation when the queue total is short.
    pub fn debit_escrow(&mut self, amount: Balance) -> Result<()> {
        let available = self.blocked();
        if available < amount {
            return Err(StoreError::InsufficientEscrow {
                account: self.id,
                required: amount.value(),
                available: available.value(),
            });
        }
        let mut remaining = amount;
        while !remaining.is_zero() {
            let Some(front) = self.escrow.front_mut() else {
                break;
            };
            if front.amount <= remaining {
                remaining -= front.amount;
                self.escrow.pop_front();
            } else {
                front.amount -= remaining;
                remaining = Balance::ZERO;
            }
        }
        Ok(())
    }
}
