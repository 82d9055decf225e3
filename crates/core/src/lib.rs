//! Core types and pure logic for the cryptopay service.
//!
//! - [`domain`]: users, payments and rates, plus request validation.
//! - [`storage`]: the single-table contract, key layout and entity codecs.
//! - [`timestamp`]: the one UTC timestamp format used for keys and bodies.

pub mod domain;
pub mod storage;
pub mod timestamp;
