use std::io::Write;

use anyhow::{Context, Result};
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::Account;

#[derive(Debug, Serialize)]
pub struct AccountSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub balance: Decimal,
    pub transactions: usize,
}

impl<'a> From<&'a Account> for AccountSummary<'a> {
    fn from(acc: &'a Account) -> Self {
        Self {
            id: acc.id(),
            name: acc.name(),
            balance: acc.balance(),
            transactions: acc.history().len(),
        }
    }
}

pub fn print_accounts<'a, W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountSummary<'a>>,
) -> Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        let id = acc.id;
        writer
            .serialize(acc)
            .with_context(|| format!("Failed to write account `{id}` as CSV"))?;
    }
    writer.flush().context("Failed to flush account listing")?;
    Ok(())
}
