// Cache module for per-user starred-repository snapshots.
// A snapshot is written once after a full fetch and never refreshed.

pub mod store;

pub use store::{FileStore, MemoryStore, RepoStore, open_from_env};
