/// Single account state: balance, transaction log and its persisted record.
/// Balance changes are validated into events, which are then applied.
pub mod account;

/// Parsing of raw menu input into typed choices and amounts.
pub mod command;

/// The bank: ordered accounts, lookup by id, and save/load.
pub mod registry;

/// Durable storage interface, plus the JSON file implementation.
pub mod storage;

/// Interactive menu service used by the binary. Kept in the library so
/// integration tests can drive a full session.
pub mod bin_utils;
