use crate::domain::account::Account;
use crate::domain::money::Balance;
use crate::domain::AccountId;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

/// One output row: an account's final spendable and blocked balances.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct AccountSummary {
    pub account: AccountId,
    pub spendable: Balance,
    pub blocked: Balance,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            account: account.id,
            spendable: account.spendable,
            blocked: account.blocked(),
        }
    }
}

/// Writes account summaries as CSV to any `Write` sink.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_accounts<'a>(
        &mut self,
        accounts: impl IntoIterator<Item = &'a Account>,
    ) -> Result<()> {
        for account in accounts {
            self.writer.serialize(AccountSummary::from(account))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
