use std::sync::Arc;

/// Errors that can occur when talking to the content management backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read). Never to be read
    /// as "item does not exist".
    #[error("network error: {0}")]
    Network(String),

    /// The remote answered non-2xx. `message` is the best-effort reason
    /// extracted from the error payload.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The expected workflow or workflow step is absent.
    #[error("workflow lookup failed: {0}")]
    Workflow(String),

    /// The remote answered 2xx with a body we could not interpret.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A content item as the remote knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub id: String,
    pub name: String,
    pub codename: String,
}

/// One element of a language variant payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementValue {
    pub element: String,
    pub value: String,
}

impl ElementValue {
    pub fn new(element: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            value: value.into(),
        }
    }
}

/// The narrow set of remote operations the sync pipeline needs.
///
/// Each operation wraps one remote call and is independently fallible.
/// `find_item` distinguishes "does not exist" (`Ok(None)`) from genuine
/// transport or remote failures — only the former licenses creation.
/// `create_item` must not be called for a codename that already resolves;
/// that is the orchestrator's responsibility, not the client's.
#[async_trait::async_trait]
pub trait CmsClient: Send + Sync {
    /// Look up a content item by codename. `Ok(None)` means the remote
    /// positively reported the item absent.
    async fn find_item(&self, codename: &str) -> Result<Option<ItemRef>, ClientError>;

    /// Create a content item of the given type.
    async fn create_item(
        &self,
        name: &str,
        codename: &str,
        content_type: &str,
    ) -> Result<ItemRef, ClientError>;

    /// Create or update one language variant of an item.
    async fn upsert_variant(
        &self,
        item_id: &str,
        language_id: &str,
        elements: &[ElementValue],
    ) -> Result<(), ClientError>;

    /// The id of the "review" step in the "default" workflow.
    async fn review_step_id(&self) -> Result<String, ClientError>;

    /// Move one language variant to a workflow step.
    async fn move_to_step(
        &self,
        item_id: &str,
        language_id: &str,
        step_id: &str,
    ) -> Result<(), ClientError>;

    /// Publish one language variant.
    async fn publish_variant(
        &self,
        item_id: &str,
        language_id: &str,
    ) -> Result<(), ClientError>;
}

#[async_trait::async_trait]
impl<T: CmsClient + ?Sized> CmsClient for Arc<T> {
    async fn find_item(&self, codename: &str) -> Result<Option<ItemRef>, ClientError> {
        (**self).find_item(codename).await
    }

    async fn create_item(
        &self,
        name: &str,
        codename: &str,
        content_type: &str,
    ) -> Result<ItemRef, ClientError> {
        (**self).create_item(name, codename, content_type).await
    }

    async fn upsert_variant(
        &self,
        item_id: &str,
        language_id: &str,
        elements: &[ElementValue],
    ) -> Result<(), ClientError> {
        (**self).upsert_variant(item_id, language_id, elements).await
    }

    async fn review_step_id(&self) -> Result<String, ClientError> {
        (**self).review_step_id().await
    }

    async fn move_to_step(
        &self,
        item_id: &str,
        language_id: &str,
        step_id: &str,
    ) -> Result<(), ClientError> {
        (**self).move_to_step(item_id, language_id, step_id).await
    }

    async fn publish_variant(
        &self,
        item_id: &str,
        language_id: &str,
    ) -> Result<(), ClientError> {
        (**self).publish_variant(item_id, language_id).await
    }
}
