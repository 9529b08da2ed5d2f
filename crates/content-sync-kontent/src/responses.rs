use content_sync::ItemRef;
use serde::Deserialize;

/// A content item as the Management API returns it.
/// `GET items/codename/{codename}`, `POST items`
#[derive(Debug, Deserialize)]
pub struct ItemResponse {
    pub id: String,
    pub name: String,
    pub codename: String,
}

impl From<ItemResponse> for ItemRef {
    fn from(response: ItemResponse) -> Self {
        Self {
            id: response.id,
            name: response.name,
            codename: response.codename,
        }
    }
}

/// One workflow from `GET workflows`.
#[derive(Debug, Deserialize)]
pub struct WorkflowResponse {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<WorkflowStepResponse>,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowStepResponse {
    pub id: String,
    pub name: String,
}

/// Error payload the Management API attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
    #[serde(default)]
    pub validation_errors: Vec<ValidationMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ValidationMessage {
    pub message: String,
}

/// Best-effort human-readable reason from an error body: the first
/// validation message, else the top-level message, else the raw body.
pub fn extract_reason(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        if let Some(validation) = parsed.validation_errors.first() {
            return validation.message.clone();
        }
        if let Some(message) = parsed.message {
            return message;
        }
    }

    body.trim().to_owned()
}
