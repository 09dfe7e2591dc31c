use std::{
    collections::HashSet,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

use tracing::debug;

use crate::account::Account;

use super::{AccountStore, StorageError};

/// Stores accounts as a pretty printed JSON array of records.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_err(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl AccountStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Account>>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored accounts");
                return Ok(None);
            }
            Err(err) => return Err(self.io_err(err)),
        };

        let accounts: Vec<Account> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                StorageError::Malformed {
                    path: self.path.clone(),
                    source,
                }
            })?;

        let mut seen = HashSet::new();
        if let Some(dup) = accounts.iter().find(|acc| !seen.insert(acc.id())) {
            return Err(StorageError::DuplicateAccountId {
                path: self.path.clone(),
                id: dup.id().to_owned(),
            });
        }

        debug!(path = %self.path.display(), count = accounts.len(), "read accounts");
        Ok(Some(accounts))
    }

    fn save(&self, accounts: &[Account]) -> Result<(), StorageError> {
        let file = File::create(&self.path).map_err(|err| self.io_err(err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, accounts).map_err(|err| {
            // only the underlying writer can fail for this data
            self.io_err(err.into())
        })?;
        writer.flush().map_err(|err| self.io_err(err))?;
        debug!(path = %self.path.display(), count = accounts.len(), "wrote accounts");
        Ok(())
    }
}
