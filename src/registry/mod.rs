use std::path::Path;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    account::{Account, AccountError, AccountId, generate_id},
    storage::{AccountStore, StorageError, json_file::JsonFileStore},
};

pub mod details;

pub use details::AccountDetails;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Account `{0}` not found")]
    AccountNotFound(AccountId),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error(transparent)]
    StorageErr(#[from] StorageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { count: usize },
    NoPriorState,
}

/// The bank: every account, in the order it was opened.
#[derive(Debug, Default)]
pub struct Registry {
    accounts: Vec<Account>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn create_account(
        &mut self,
        name: impl Into<String>,
        initial_balance: Decimal,
    ) -> Result<AccountId, RegistryError> {
        let mut id = generate_id();
        while self.find_by_id(&id).is_some() {
            id = generate_id();
        }
        let account = Account::with_id(id, name, initial_balance).inspect_err(|err| {
            warn!(%err, "account not created");
        })?;
        info!(id = account.id(), name = account.name(), "account created");
        let id = account.id().to_owned();
        self.accounts.push(account);
        Ok(id)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|acc| acc.id() == id)
    }

    fn find_by_id_mut(&mut self, id: &str) -> Result<&mut Account, RegistryError> {
        match self.accounts.iter_mut().find(|acc| acc.id() == id) {
            Some(acc) => Ok(acc),
            None => {
                warn!(id, "account not found");
                Err(RegistryError::AccountNotFound(id.to_owned()))
            }
        }
    }

    /// Returns the new log entry of the account.
    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<&str, RegistryError> {
        let acc = self.find_by_id_mut(id)?;
        match acc.deposit(amount) {
            Ok(entry) => {
                info!(id, %amount, "deposit");
                Ok(entry)
            }
            Err(err) => {
                warn!(id, %amount, %err, "deposit rejected");
                Err(err.into())
            }
        }
    }

    /// Returns the new log entry of the account.
    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<&str, RegistryError> {
        let acc = self.find_by_id_mut(id)?;
        match acc.withdraw(amount) {
            Ok(entry) => {
                info!(id, %amount, "withdrawal");
                Ok(entry)
            }
            Err(err) => {
                warn!(id, %amount, %err, "withdrawal rejected");
                Err(err.into())
            }
        }
    }

    pub fn show_details(&self, id: &str) -> Result<AccountDetails<'_>, RegistryError> {
        debug!(id, "show details");
        self.find_by_id(id)
            .map(AccountDetails::from)
            .ok_or_else(|| RegistryError::AccountNotFound(id.to_owned()))
    }

    /// Overwrites the file at `path` with every account.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RegistryError> {
        self.save_to(&JsonFileStore::new(path.as_ref()))
    }

    /// Replaces the in-memory accounts with the content of `path`.
    /// A missing file leaves the registry empty.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome, RegistryError> {
        self.load_from(&JsonFileStore::new(path.as_ref()))
    }

    pub fn save_to(&self, store: &impl AccountStore) -> Result<(), RegistryError> {
        store.save(&self.accounts)?;
        info!(count = self.accounts.len(), "accounts saved");
        Ok(())
    }

    pub fn load_from(&mut self, store: &impl AccountStore) -> Result<LoadOutcome, RegistryError> {
        match store.load()? {
            Some(accounts) => {
                let count = accounts.len();
                self.accounts = accounts;
                info!(count, "accounts loaded");
                Ok(LoadOutcome::Loaded { count })
            }
            None => {
                self.accounts.clear();
                info!("no saved accounts, starting fresh");
                Ok(LoadOutcome::NoPriorState)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, fs, path::PathBuf};

    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("banklite-{}.json", uuid::Uuid::new_v4()))
    }

    #[derive(Default)]
    struct MemoryStore {
        saved: RefCell<Option<Vec<Account>>>,
    }

    impl AccountStore for MemoryStore {
        fn load(&self) -> Result<Option<Vec<Account>>, StorageError> {
            Ok(self.saved.borrow().clone())
        }

        fn save(&self, accounts: &[Account]) -> Result<(), StorageError> {
            *self.saved.borrow_mut() = Some(accounts.to_vec());
            Ok(())
        }
    }

    #[test]
    fn asha_scenario() {
        let mut bank = Registry::new();
        let id = bank.create_account("Asha", Decimal::from(100)).unwrap();

        bank.deposit(&id, Decimal::from(50)).unwrap();
        let err = bank.withdraw(&id, Decimal::from(200)).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::AccountErr(AccountError::InsufficientFunds { .. })
        ));
        let acc = bank.find_by_id(&id).unwrap();
        assert_eq!(acc.balance(), Decimal::from(150));
        assert_eq!(acc.history().len(), 1);

        let entry = bank.withdraw(&id, Decimal::from(150)).unwrap();
        assert!(entry.ends_with("Withdrew ₹150.00"));
        let acc = bank.find_by_id(&id).unwrap();
        assert_eq!(acc.balance(), Decimal::ZERO);
        assert_eq!(acc.history().len(), 2);
    }

    #[test]
    fn accounts_keep_insertion_order() {
        let mut bank = Registry::new();
        let ids: Vec<_> = ["a", "b", "c"]
            .into_iter()
            .map(|name| bank.create_account(name, Decimal::ZERO).unwrap())
            .collect();
        let names: Vec<_> = bank.accounts().iter().map(Account::name).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert_eq!(bank.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
    }

    #[test]
    fn overflowing_deposit_is_reported() {
        let mut bank = Registry::new();
        let id = bank.create_account("Asha", Decimal::MAX).unwrap();

        let err = bank.deposit(&id, Decimal::ONE).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::AccountErr(AccountError::BalanceOverflow { .. })
        ));
        let acc = bank.find_by_id(&id).unwrap();
        assert_eq!(acc.balance(), Decimal::MAX);
        assert!(acc.history().is_empty());
    }

    #[test]
    fn negative_initial_balance_adds_nothing() {
        let mut bank = Registry::new();
        let err = bank.create_account("a", Decimal::from(-1)).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::AccountErr(AccountError::NegativeInitialBalance)
        ));
        assert!(bank.is_empty());
    }

    #[test]
    fn unknown_id_mutates_nothing() {
        let mut bank = Registry::new();
        let id = bank.create_account("Asha", Decimal::from(10)).unwrap();
        let before = bank.accounts().to_vec();

        assert!(bank.find_by_id("missing").is_none());
        let err = bank.deposit("missing", Decimal::from(5)).unwrap_err();
        assert!(matches!(err, RegistryError::AccountNotFound(ref id) if id == "missing"));
        assert_eq!(err.to_string(), "Account `missing` not found");
        assert!(bank.withdraw("missing", Decimal::from(5)).is_err());
        assert!(bank.show_details("missing").is_err());

        assert_eq!(bank.accounts(), before.as_slice());
        assert!(bank.find_by_id(&id).is_some());
    }

    #[test]
    fn show_details_projects_account() {
        let mut bank = Registry::new();
        let id = bank.create_account("Asha", Decimal::from(100)).unwrap();
        bank.deposit(&id, Decimal::from(50)).unwrap();

        let details = bank.show_details(&id).unwrap();
        assert_eq!(details.id, id);
        assert_eq!(details.name, "Asha");
        assert_eq!(details.balance, Decimal::from(150));
        assert_eq!(details.history.len(), 1);
    }

    #[test]
    fn load_missing_file_leaves_registry_empty() {
        let mut bank = Registry::new();
        assert_eq!(bank.load(temp_path()).unwrap(), LoadOutcome::NoPriorState);
        assert!(bank.is_empty());
    }

    #[test]
    fn save_then_load_reproduces_accounts() {
        let path = temp_path();
        let mut bank = Registry::new();
        let asha = bank.create_account("Asha", Decimal::from(100)).unwrap();
        bank.create_account("Ravi", Decimal::new(2550, 2)).unwrap();
        bank.deposit(&asha, Decimal::new(1999, 2)).unwrap();
        bank.withdraw(&asha, Decimal::from(20)).unwrap();
        bank.save(&path).unwrap();

        let mut restored = Registry::new();
        restored.create_account("to be replaced", Decimal::ZERO).unwrap();
        assert_eq!(
            restored.load(&path).unwrap(),
            LoadOutcome::Loaded { count: 2 }
        );
        assert_eq!(restored.accounts(), bank.accounts());

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn malformed_load_keeps_memory() {
        let path = temp_path();
        fs::write(&path, "[{]").unwrap();

        let mut bank = Registry::new();
        bank.create_account("Asha", Decimal::ZERO).unwrap();
        let err = bank.load(&path).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::StorageErr(StorageError::Malformed { .. })
        ));
        assert_eq!(bank.len(), 1);

        fs::remove_file(path).unwrap();
    }

    #[test]
    fn works_with_any_store() {
        let store = MemoryStore::default();
        let mut bank = Registry::new();
        assert_eq!(bank.load_from(&store).unwrap(), LoadOutcome::NoPriorState);

        let id = bank.create_account("Asha", Decimal::from(1)).unwrap();
        bank.save_to(&store).unwrap();

        let mut restored = Registry::new();
        assert_eq!(
            restored.load_from(&store).unwrap(),
            LoadOutcome::Loaded { count: 1 }
        );
        assert_eq!(restored.find_by_id(&id), bank.find_by_id(&id));
    }
}
