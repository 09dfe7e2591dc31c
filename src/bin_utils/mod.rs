//! Interactive text menu on top of [`crate::registry`]. Generic over its
//! input and output so the whole session can be driven from tests.

use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    ops::ControlFlow,
    path::Path,
};

use anyhow::{Context, Result};
use config::Config;
use csv_printer::{AccountSummary, print_accounts};
use tracing::warn;

use crate::{
    account::TransactionKind,
    command::{MenuChoice, decode_line, parse_amount, parse_initial_balance},
    registry::{LoadOutcome, Registry},
};

pub mod config;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub config: Config,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: BufRead,
    W: Write + 'w,
{
    /// Runs the menu until the user exits or input ends; both save first.
    /// A failing input or output stream still saves before its error is returned.
    pub fn run(self) -> Result<()> {
        let path = self.config.storage_path;
        let mut registry = Registry::new();
        let outcome = registry
            .load(&path)
            .with_context(|| format!("Failed to load accounts from `{}`", path.display()))?;
        match outcome {
            LoadOutcome::Loaded { count } => {
                writeln!(self.output, "✅ Loaded {count} account(s) from {}", path.display())?
            }
            LoadOutcome::NoPriorState => {
                writeln!(self.output, "⚠️ No saved data found. Starting fresh.")?
            }
        }

        let mut session = Session {
            input: self.input,
            output: self.output,
            registry,
            storage_path: &path,
        };
        let finished = loop {
            match session.step() {
                Ok(ControlFlow::Continue(())) => {}
                Ok(ControlFlow::Break(())) => break Ok(()),
                Err(err) => break Err(err),
            }
        };

        if finished.is_ok() {
            writeln!(session.output, "👋 Exiting. Saving data...")?;
        }
        session
            .registry
            .save(&path)
            .with_context(|| format!("Failed to save accounts to `{}`", path.display()))?;
        finished?;
        writeln!(session.output, "✅ Data saved to {}", path.display())?;
        Ok(())
    }
}

struct Session<'w, R, W> {
    input: R,
    output: &'w mut W,
    registry: Registry,
    storage_path: &'w Path,
}

impl<R, W> Session<'_, R, W>
where
    R: BufRead,
    W: Write,
{
    /// Handles one menu selection. `Break` means exit was chosen or input ended.
    fn step(&mut self) -> Result<ControlFlow<()>> {
        self.print_menu()?;
        let Some(line) = self.prompt("👉 Choose an option: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        match line.parse::<MenuChoice>() {
            Ok(choice) => self.handle(choice),
            Err(err) => {
                report(self.output, err)?;
                Ok(ControlFlow::Continue(()))
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n🏦 BankLite Menu:")?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{}. {}", choice.number(), choice.label())?;
        }
        Ok(())
    }

    /// Asks until a decodable line arrives. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        loop {
            write!(self.output, "{label}")?;
            self.output.flush()?;
            let mut buf = Vec::new();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                return Ok(None);
            }
            match decode_line(buf) {
                Ok(line) => return Ok(Some(line)),
                Err(err) => {
                    warn!(%err, "unreadable input line");
                    report(self.output, err)?;
                }
            }
        }
    }

    fn handle(&mut self, choice: MenuChoice) -> Result<ControlFlow<()>> {
        match choice {
            MenuChoice::CreateAccount => return self.create_account(),
            MenuChoice::Deposit => return self.transact(TransactionKind::Deposit),
            MenuChoice::Withdraw => return self.transact(TransactionKind::Withdrawal),
            MenuChoice::ShowDetails => {
                let Some(id) = self.prompt("Enter Account ID: ")? else {
                    return Ok(ControlFlow::Break(()));
                };
                match self.registry.show_details(id.trim()) {
                    Ok(details) => writeln!(self.output, "\n{details}")?,
                    Err(err) => report(self.output, err)?,
                }
            }
            MenuChoice::Save => {
                match self.registry.save(self.storage_path) {
                    Ok(()) => {
                        writeln!(self.output, "✅ Data saved to {}", self.storage_path.display())?
                    }
                    Err(err) => report(self.output, format!("{:#}", anyhow::Error::from(err)))?,
                }
            }
            MenuChoice::ListAccounts => {
                if self.registry.is_empty() {
                    writeln!(self.output, "No accounts yet.")?;
                } else {
                    print_accounts(
                        self.output,
                        self.registry.accounts().iter().map(AccountSummary::from),
                    )?;
                }
            }
            MenuChoice::Exit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn create_account(&mut self) -> Result<ControlFlow<()>> {
        let Some(name) = self.prompt("Enter name: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(balance) = self.prompt("Enter starting balance (₹): ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let name = name.trim();
        match parse_initial_balance(&balance) {
            Ok(balance) => match self.registry.create_account(name, balance) {
                Ok(id) => writeln!(self.output, "✅ Account created for {name}. ID: {id}")?,
                Err(err) => report(self.output, err)?,
            },
            Err(err) => report(self.output, err)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn transact(&mut self, kind: TransactionKind) -> Result<ControlFlow<()>> {
        let Some(id) = self.prompt("Enter Account ID: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let label = match kind {
            TransactionKind::Deposit => "Enter deposit amount (₹): ",
            TransactionKind::Withdrawal => "Enter withdrawal amount (₹): ",
        };
        let Some(amount) = self.prompt(label)? else {
            return Ok(ControlFlow::Break(()));
        };
        let amount = match parse_amount(&amount) {
            Ok(amount) => amount,
            Err(err) => {
                report(self.output, err)?;
                return Ok(ControlFlow::Continue(()));
            }
        };
        let id = id.trim();
        let result = match kind {
            TransactionKind::Deposit => self.registry.deposit(id, amount),
            TransactionKind::Withdrawal => self.registry.withdraw(id, amount),
        };
        match result {
            Ok(entry) => writeln!(self.output, "✅ {entry}")?,
            Err(err) => report(self.output, err)?,
        }
        Ok(ControlFlow::Continue(()))
    }
}

fn report<W: Write>(output: &mut W, err: impl Display) -> io::Result<()> {
    writeln!(output, "❌ {err}")
}
