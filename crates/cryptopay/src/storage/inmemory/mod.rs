//! In-memory storage backend.
//!
//! Rows live in a `BTreeMap` keyed by (`pk`, `sk`) behind `Arc<RwLock<_>>`, so
//! partition reads come out in sort-key order for free. Data is not persisted
//! and is lost when the table is dropped. Used as the default backend for
//! development and by every handler test.
//!
//! # Example
//!
//! ```rust,ignore
//! use cryptopay::storage::inmemory::InMemoryTable;
//!
//! let table = InMemoryTable::new();
//! // Use table for testing...
//! ```

mod table;

pub use table::InMemoryTable;
