use std::{io, path::PathBuf};

use thiserror::Error;

use crate::account::{Account, AccountId};

pub mod json_file;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed account data in `{}`", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Account id `{id}` appears more than once in `{}`", .path.display())]
    DuplicateAccountId { path: PathBuf, id: AccountId },
}

/// Durable home of the account collection.
///
/// Implementations replace the whole stored collection on every save.
pub trait AccountStore {
    /// `Ok(None)` means nothing was stored yet.
    fn load(&self) -> Result<Option<Vec<Account>>, StorageError>;

    fn save(&self, accounts: &[Account]) -> Result<(), StorageError>;
}
