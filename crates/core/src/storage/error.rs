use thiserror::Error;

/// Errors that can occur during table operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Row already exists: pk={pk} sk={sk}")]
    AlreadyExists { pk: String, sk: String },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_already_exists_display() {
        let error = StorageError::AlreadyExists {
            pk: "user-1".to_string(),
            sk: "USER#user-1".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Row already exists: pk=user-1 sk=USER#user-1"
        );
    }

    #[test]
    fn test_storage_error_connection_failed_display() {
        let error = StorageError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
    }

    #[test]
    fn test_storage_error_query_failed_display() {
        let error = StorageError::QueryFailed("Unknown index: GSI9".to_string());
        assert_eq!(error.to_string(), "Query failed: Unknown index: GSI9");
    }

    #[test]
    fn test_storage_error_invalid_data_display() {
        let error = StorageError::InvalidData("Missing or invalid field: pk".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid data: Missing or invalid field: pk"
        );
    }
}
