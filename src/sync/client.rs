//! REST collection collaborator.

use crate::error::{Error, Result};
use crate::item::Item;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Body returned by a collection's delete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Whether the server deleted the item.
    pub success: bool,
    /// Optional human-readable detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeleteResponse {
    /// A successful response without a message.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// A response reporting that the server refused the delete.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }

    /// Converts `success: false` into [`Error::Rejected`].
    pub fn into_result(self) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Rejected(
                self.message.unwrap_or_else(|| "server refused the delete".to_string()),
            ))
        }
    }
}

/// Access to one remote collection.
///
/// Implementations own transport, authentication and retries; the sync
/// controller only sees the results.
#[async_trait]
pub trait CollectionClient<I: Item>: Send + Sync {
    /// Fetches the whole collection.
    async fn fetch_all(&self) -> Result<Vec<I>>;

    /// Deletes one item by id.
    async fn delete(&self, id: &str) -> Result<DeleteResponse>;

    /// Creates an item and returns the server's copy of it.
    async fn create(&self, item: &I) -> Result<I>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_response_result() {
        assert_eq!(DeleteResponse::ok().into_result(), Ok(()));
        assert_eq!(
            DeleteResponse::rejected("has open orders").into_result(),
            Err(Error::Rejected("has open orders".to_string()))
        );
        let bare: DeleteResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(matches!(bare.into_result(), Err(Error::Rejected(_))));
    }
}
