pub mod codec;
mod error;
pub mod keys;
mod traits;
mod types;

pub use error::{Result, StorageError};
pub use traits::Table;
pub use types::{PrimaryKey, Row, ScanFilter, SortOrder};
