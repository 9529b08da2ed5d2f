use content_sync::{ClientError, CmsClient, ElementValue};
use content_sync_kontent::{ManagementClient, ManagementClientConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ManagementClient {
    ManagementClient::new(ManagementClientConfig {
        base_url: server.uri(),
        project_id: "proj-1".into(),
        api_key: "test-key".into(),
    })
}

#[tokio::test]
async fn upsert_variant_puts_the_element_payload() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/proj-1/items/item-1/variants/codename/ja-JP"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_json(json!({
            "elements": [
                { "element": { "codename": "title" }, "value": "香港" },
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "item": { "id": "item-1" } })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let elements = vec![ElementValue::new("title", "香港")];

    client
        .upsert_variant("item-1", "ja-JP", &elements)
        .await
        .unwrap();
}

#[tokio::test]
async fn upsert_variant_rejection_carries_the_reason() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/proj-1/items/item-1/variants/codename/ja-JP"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Element 'title' is not part of the content type.",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .upsert_variant("item-1", "ja-JP", &[ElementValue::new("title", "x")])
        .await
        .unwrap_err();

    assert!(
        err.to_string()
            .contains("Element 'title' is not part of the content type.")
    );
}

#[tokio::test]
async fn publish_variant_puts_to_the_publish_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/proj-1/items/item-1/variants/codename/es-MX/publish"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.publish_variant("item-1", "es-MX").await.unwrap();
}

#[tokio::test]
async fn publish_failure_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/proj-1/items/item-1/variants/codename/es-MX/publish"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Variant is already published.",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.publish_variant("item-1", "es-MX").await;

    assert!(matches!(
        result,
        Err(ClientError::Rejected { status: 400, .. })
    ));
}

#[tokio::test]
async fn move_to_step_names_the_default_workflow_and_step_id() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(
            "/proj-1/items/item-1/variants/codename/ko-KR/change-workflow",
        ))
        .and(body_json(json!({
            "workflow_identifier": { "codename": "default" },
            "step_identifier": { "id": "step-review" },
        })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .move_to_step("item-1", "ko-KR", "step-review")
        .await
        .unwrap();
}
