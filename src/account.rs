use std::fmt;

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub type AccountId = String;

/// Number of hex characters kept from a freshly generated UUID.
pub const ID_LEN: usize = 12;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

/// A validated balance change, produced by [`Account::handle_transaction`]
/// and folded into the account by [`Account::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEvent {
    kind: TransactionKind,
    amount: Decimal,
    timestamp: DateTime<Local>,
}

impl AccountEvent {
    fn log_entry(&self) -> String {
        let verb = match self.kind {
            TransactionKind::Deposit => "Deposited",
            TransactionKind::Withdrawal => "Withdrew",
        };
        format!(
            "[{}] {verb} ₹{:.2}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.amount
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("{kind} amount must be positive")]
    NonPositiveAmount { kind: TransactionKind },
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Balance would overflow: {balance} + {amount}")]
    BalanceOverflow { balance: Decimal, amount: Decimal },
    #[error("Initial balance must not be negative")]
    NegativeInitialBalance,
    #[error("Account `{id}` is stored with a negative balance")]
    NegativeStoredBalance { id: AccountId },
    #[error("Account record has an empty id")]
    EmptyId,
}

/// Plain persisted shape of an [`Account`]. Field names are the file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
    pub transactions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "AccountRecord", try_from = "AccountRecord")]
pub struct Account {
    id: AccountId,
    name: String,
    balance: Decimal,
    transactions: Vec<String>,
}

impl Account {
    /// Opens an account under a freshly generated id.
    pub fn create(name: impl Into<String>, initial_balance: Decimal) -> Result<Self, AccountError> {
        Self::with_id(generate_id(), name, initial_balance)
    }

    pub(crate) fn with_id(
        id: AccountId,
        name: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<Self, AccountError> {
        if initial_balance < Decimal::ZERO {
            return Err(AccountError::NegativeInitialBalance);
        }
        Ok(Self {
            id,
            name: name.into(),
            balance: initial_balance,
            transactions: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn history(&self) -> &[String] {
        &self.transactions
    }

    /// Checks a balance change against the current state without touching it.
    pub fn handle_transaction(
        &self,
        kind: TransactionKind,
        amount: Decimal,
        timestamp: DateTime<Local>,
    ) -> Result<AccountEvent, AccountError> {
        if amount <= Decimal::ZERO {
            return Err(AccountError::NonPositiveAmount { kind });
        }
        match kind {
            TransactionKind::Deposit => {
                if self.balance.checked_add(amount).is_none() {
                    return Err(AccountError::BalanceOverflow {
                        balance: self.balance,
                        amount,
                    });
                }
            }
            TransactionKind::Withdrawal => {
                if amount > self.balance {
                    return Err(AccountError::InsufficientFunds {
                        requested: amount,
                        available: self.balance,
                    });
                }
            }
        }
        Ok(AccountEvent {
            kind,
            amount,
            timestamp,
        })
    }

    /// Folds an event into balance and history, returning the new log entry.
    /// The event is trusted, no validation happens here.
    pub fn apply(&mut self, event: &AccountEvent) -> &str {
        match event.kind {
            TransactionKind::Deposit => self.balance += event.amount,
            TransactionKind::Withdrawal => self.balance -= event.amount,
        }
        let idx = self.transactions.len();
        self.transactions.push(event.log_entry());
        &self.transactions[idx]
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<&str, AccountError> {
        self.transact(TransactionKind::Deposit, amount)
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<&str, AccountError> {
        self.transact(TransactionKind::Withdrawal, amount)
    }

    fn transact(&mut self, kind: TransactionKind, amount: Decimal) -> Result<&str, AccountError> {
        let event = self.handle_transaction(kind, amount, Local::now())?;
        Ok(self.apply(&event))
    }

    pub fn to_record(&self) -> AccountRecord {
        self.clone().into()
    }

    pub fn from_record(record: AccountRecord) -> Result<Self, AccountError> {
        record.try_into()
    }
}

impl From<Account> for AccountRecord {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            balance: account.balance,
            transactions: account.transactions,
        }
    }
}

impl TryFrom<AccountRecord> for Account {
    type Error = AccountError;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        if record.id.is_empty() {
            return Err(AccountError::EmptyId);
        }
        if record.balance < Decimal::ZERO {
            return Err(AccountError::NegativeStoredBalance { id: record.id });
        }
        Ok(Self {
            id: record.id,
            name: record.name,
            balance: record.balance,
            transactions: record.transactions,
        })
    }
}

pub(crate) fn generate_id() -> AccountId {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}
