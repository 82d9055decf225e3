//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StorageError` from `cryptopay_core::storage`.
//! Transport failures become `ConnectionFailed`; a failed put condition
//! becomes `AlreadyExists`; everything else is `QueryFailed` carrying the
//! service error code.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use cryptopay_core::storage::{PrimaryKey, StorageError};

/// Error codes that mean "slow down and retry".
const THROTTLING_CODES: &[&str] = &[
    "ProvisionedThroughputExceededException",
    "RequestLimitExceeded",
    "ThrottlingException",
];

/// Map any SDK error of `operation` to a StorageError.
pub fn map_sdk_error<E, R>(operation: &str, err: SdkError<E, R>) -> StorageError
where
    E: ProvideErrorMetadata + Error + Send + Sync + 'static,
    R: Debug,
{
    if matches!(
        err,
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_)
    ) {
        return StorageError::ConnectionFailed(format!(
            "{operation} could not reach DynamoDB: {}",
            DisplayErrorContext(&err)
        ));
    }

    match err.code() {
        Some(code) if THROTTLING_CODES.contains(&code) => {
            StorageError::QueryFailed(format!("{operation} throttled ({code}), please retry"))
        }
        Some(code) => StorageError::QueryFailed(format!(
            "{operation} failed with {code}: {}",
            err.message().unwrap_or("no message")
        )),
        None => StorageError::QueryFailed(format!(
            "{operation} failed: {}",
            DisplayErrorContext(&err)
        )),
    }
}

/// Map a PutItem SDK error to StorageError.
///
/// A failed `attribute_not_exists` condition means the key is taken.
pub fn map_put_item_error<R: Debug>(err: SdkError<PutItemError, R>, key: PrimaryKey) -> StorageError {
    if matches!(
        err.as_service_error(),
        Some(PutItemError::ConditionalCheckFailedException(_))
    ) {
        return StorageError::AlreadyExists {
            pk: key.pk,
            sk: key.sk,
        };
    }
    map_sdk_error("PutItem", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::operation::get_item::GetItemError;
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, ProvisionedThroughputExceededException,
        ResourceNotFoundException,
    };

    fn service_error<E>(err: E) -> SdkError<E, ()> {
        SdkError::service_error(err, ())
    }

    #[test]
    fn test_conditional_check_is_already_exists() {
        let err = service_error(PutItemError::ConditionalCheckFailedException(
            ConditionalCheckFailedException::builder().build(),
        ));

        let mapped = map_put_item_error(err, PrimaryKey::new("u1", "USER#u1"));

        assert_eq!(
            mapped,
            StorageError::AlreadyExists {
                pk: "u1".to_string(),
                sk: "USER#u1".to_string(),
            }
        );
    }

    #[test]
    fn test_throttling_is_query_failed() {
        let err = service_error(GetItemError::ProvisionedThroughputExceededException(
            ProvisionedThroughputExceededException::builder()
                .meta(
                    aws_sdk_dynamodb::error::ErrorMetadata::builder()
                        .code("ProvisionedThroughputExceededException")
                        .build(),
                )
                .build(),
        ));

        match map_sdk_error("GetItem", err) {
            StorageError::QueryFailed(message) => assert!(message.contains("throttled")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_put_errors_are_query_failed() {
        let err = service_error(PutItemError::ResourceNotFoundException(
            ResourceNotFoundException::builder()
                .meta(
                    aws_sdk_dynamodb::error::ErrorMetadata::builder()
                        .code("ResourceNotFoundException")
                        .message("Requested resource not found")
                        .build(),
                )
                .build(),
        ));

        match map_put_item_error(err, PrimaryKey::new("u1", "USER#u1")) {
            StorageError::QueryFailed(message) => {
                assert!(message.contains("ResourceNotFoundException"));
                assert!(message.contains("Requested resource not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
