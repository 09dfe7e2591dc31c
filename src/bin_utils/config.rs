use std::path::PathBuf;

use anyhow::{Result, bail};

pub const DEFAULT_STORAGE_PATH: &str = "bank.json";

/// Runtime settings of the interactive binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub storage_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl Config {
    /// Reads `banklite [STORAGE_PATH]`; the first item is the program name.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let _program = args.next();
        let Some(path) = args.next() else {
            return Ok(Self::default());
        };
        if path.trim().is_empty() {
            bail!("Storage path must not be empty");
        }
        if let Some(extra) = args.next() {
            bail!("Unexpected argument `{extra}`. Usage: banklite [STORAGE_PATH]");
        }
        Ok(Self {
            storage_path: PathBuf::from(path),
        })
    }
}
