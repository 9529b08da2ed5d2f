use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use content_sync::{ClientError, CmsClient, ElementValue, ItemRef};

use crate::responses::{self, ItemResponse, WorkflowResponse};

/// The hosted Management API base path. Project id is appended per
/// request.
pub const DEFAULT_BASE_URL: &str = "https://manage.kontent.ai/v2/projects";

/// The workflow every variant moves through on its way to review.
const DEFAULT_WORKFLOW: &str = "default";
const REVIEW_STEP: &str = "review";

/// Configuration for a Management API client. Built once per run from
/// the resolved environment; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ManagementClientConfig {
    pub base_url: String,
    pub project_id: String,
    pub api_key: String,
}

/// Talks to a Kontent-style Management API over JSON with bearer-token
/// authorization.
pub struct ManagementClient {
    config: ManagementClientConfig,
    client: reqwest::Client,
}

impl ManagementClient {
    pub fn new(config: ManagementClientConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/{path}", self.config.base_url, self.config.project_id)
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
    }

    /// Classify a non-2xx response, mining the error payload for a
    /// human-readable reason.
    async fn rejection(&self, response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let message = if body.trim().is_empty() {
            format!("HTTP {status}")
        } else {
            responses::extract_reason(&body)
        };

        ClientError::Rejected { status, message }
    }
}

fn network(e: reqwest::Error) -> ClientError {
    ClientError::Network(e.to_string())
}

fn parse(e: reqwest::Error) -> ClientError {
    ClientError::Parse(e.to_string())
}

#[async_trait]
impl CmsClient for ManagementClient {
    async fn find_item(&self, codename: &str) -> Result<Option<ItemRef>, ClientError> {
        let url = self.url(&format!("items/codename/{codename}"));

        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(network)?;

        // Only a positive 404 means "does not exist"; anything else
        // unexpected propagates so the caller never creates a duplicate
        // on a transient failure.
        if response.status().as_u16() == 404 {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }

        let item: ItemResponse = response.json().await.map_err(parse)?;
        Ok(Some(item.into()))
    }

    async fn create_item(
        &self,
        name: &str,
        codename: &str,
        content_type: &str,
    ) -> Result<ItemRef, ClientError> {
        let url = self.url("items");
        let body = json!({
            "name": name,
            "codename": codename,
            "type": { "codename": content_type },
        });

        let response = self
            .request(Method::POST, &url)
            .json(&body)
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }

        let item: ItemResponse = response.json().await.map_err(parse)?;
        Ok(item.into())
    }

    async fn upsert_variant(
        &self,
        item_id: &str,
        language_id: &str,
        elements: &[ElementValue],
    ) -> Result<(), ClientError> {
        let url = self.url(&format!("items/{item_id}/variants/codename/{language_id}"));

        let elements: Vec<_> = elements
            .iter()
            .map(|element| {
                json!({
                    "element": { "codename": element.element },
                    "value": element.value,
                })
            })
            .collect();

        let response = self
            .request(Method::PUT, &url)
            .json(&json!({ "elements": elements }))
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }

        Ok(())
    }

    async fn review_step_id(&self) -> Result<String, ClientError> {
        let url = self.url("workflows");

        let response = self
            .request(Method::GET, &url)
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }

        let workflows: Vec<WorkflowResponse> = response.json().await.map_err(parse)?;

        let workflow = workflows
            .iter()
            .find(|workflow| workflow.name.eq_ignore_ascii_case(DEFAULT_WORKFLOW))
            .ok_or_else(|| {
                ClientError::Workflow(format!("no \"{DEFAULT_WORKFLOW}\" workflow found"))
            })?;

        workflow
            .steps
            .iter()
            .find(|step| step.name.eq_ignore_ascii_case(REVIEW_STEP))
            .map(|step| step.id.clone())
            .ok_or_else(|| {
                ClientError::Workflow(format!(
                    "workflow \"{DEFAULT_WORKFLOW}\" has no \"{REVIEW_STEP}\" step"
                ))
            })
    }

    async fn move_to_step(
        &self,
        item_id: &str,
        language_id: &str,
        step_id: &str,
    ) -> Result<(), ClientError> {
        let url = self.url(&format!(
            "items/{item_id}/variants/codename/{language_id}/change-workflow"
        ));
        let body = json!({
            "workflow_identifier": { "codename": DEFAULT_WORKFLOW },
            "step_identifier": { "id": step_id },
        });

        let response = self
            .request(Method::PUT, &url)
            .json(&body)
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }

        Ok(())
    }

    async fn publish_variant(
        &self,
        item_id: &str,
        language_id: &str,
    ) -> Result<(), ClientError> {
        let url = self.url(&format!(
            "items/{item_id}/variants/codename/{language_id}/publish"
        ));

        let response = self
            .request(Method::PUT, &url)
            .json(&json!({}))
            .send()
            .await
            .map_err(network)?;

        if !response.status().is_success() {
            return Err(self.rejection(response).await);
        }

        Ok(())
    }
}
