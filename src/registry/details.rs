use std::fmt;

use rust_decimal::Decimal;

use crate::account::Account;

/// Read-only view of a single account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDetails<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub balance: Decimal,
    pub history: &'a [String],
}

impl<'a> From<&'a Account> for AccountDetails<'a> {
    fn from(acc: &'a Account) -> Self {
        Self {
            id: acc.id(),
            name: acc.name(),
            balance: acc.balance(),
            history: acc.history(),
        }
    }
}

impl fmt::Display for AccountDetails<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🧾 Account ID: {}", self.id)?;
        writeln!(f, "👤 Name     : {}", self.name)?;
        writeln!(f, "💰 Balance  : ₹{:.2}", self.balance)?;
        write!(f, "📜 Transaction History:")?;
        for entry in self.history {
            write!(f, "\n   {entry}")?;
        }
        Ok(())
    }
}
