//! Dataset workflow tests against a mocked classification service.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use newscheck::workflows::dataset::{MSG_APPEND_REQUIRED, MSG_LOAD_FAILED};
use newscheck::{ApiClient, DatasetState, DatasetWorkflow, NewsLabel};

fn item_json(id: u64, label: u8) -> Value {
    json!({
        "id": id,
        "title": format!("Title {id}"),
        "text": format!("Text {id}"),
        "label": label
    })
}

fn dataset_json(real: u64, fake: u64) -> Value {
    let mut items: Vec<Value> = (0..real).map(|i| item_json(i, 0)).collect();
    items.extend((0..fake).map(|i| item_json(real + i, 1)));
    json!({ "items": items })
}

async fn workflow_against(server: &MockServer) -> DatasetWorkflow<ApiClient> {
    DatasetWorkflow::new(Arc::new(ApiClient::new(server.uri())))
}

#[tokio::test]
async fn load_populates_items_and_derived_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dataset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dataset_json(6, 4)))
        .mount(&server)
        .await;
    let mut workflow = workflow_against(&server).await;

    workflow.load().await;

    let summary = workflow.summary();
    assert_eq!((summary.total, summary.real, summary.fake), (10, 6, 4));
    assert_eq!(summary.real + summary.fake, workflow.items().len());
}

#[tokio::test]
async fn missing_items_field_means_an_empty_dataset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dataset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    let mut workflow = workflow_against(&server).await;

    workflow.load().await;

    assert_eq!(workflow.state(), &DatasetState::Ready { items: vec![] });
    assert_eq!(workflow.summary().total, 0);
}

#[tokio::test]
async fn load_failure_reports_the_fixed_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dataset"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut workflow = workflow_against(&server).await;

    workflow.load().await;

    assert_eq!(
        workflow.state(),
        &DatasetState::LoadFailed(MSG_LOAD_FAILED.to_string())
    );
}

#[tokio::test]
async fn append_reloads_the_authoritative_list() {
    let server = MockServer::start().await;
    // First load sees 10 items, the post-append reload sees 11.
    Mock::given(method("GET"))
        .and(path("/dataset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dataset_json(6, 4)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    let mut after = dataset_json(6, 4);
    after["items"]
        .as_array_mut()
        .unwrap()
        .push(json!({"id": 11, "title": "Test title", "text": "Test body", "label": 1}));
    Mock::given(method("GET"))
        .and(path("/dataset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(after))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dataset"))
        .and(body_json(json!({
            "title": "Test title",
            "text": "Test body",
            "label": 1
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": 11, "title": "Test title", "text": "Test body", "label": 1})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let mut workflow = workflow_against(&server).await;

    workflow.load().await;
    let before = workflow.summary();

    workflow
        .append("Test title", "Test body", NewsLabel::Fake)
        .await;

    let summary = workflow.summary();
    assert_eq!(summary.total, before.total + 1);
    assert_eq!(summary.fake, before.fake + 1);
    assert!(workflow
        .items()
        .iter()
        .any(|item| item.title == "Test title" && item.text == "Test body"));
}

#[tokio::test]
async fn append_validation_failure_skips_the_network_and_keeps_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dataset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dataset_json(2, 1)))
        .mount(&server)
        .await;
    let mut workflow = workflow_against(&server).await;
    workflow.load().await;

    workflow.append("A title", "   ", NewsLabel::Real).await;

    match workflow.state() {
        DatasetState::AppendFailed { items, message } => {
            assert_eq!(items.len(), 3);
            assert_eq!(message, MSG_APPEND_REQUIRED);
        }
        other => panic!("expected AppendFailed, got {other:?}"),
    }
    // Only the initial GET reached the server.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn append_failure_surfaces_detail_and_preserves_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dataset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(dataset_json(3, 2)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/dataset"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"detail": "Duplicate item."})),
        )
        .mount(&server)
        .await;
    let mut workflow = workflow_against(&server).await;
    workflow.load().await;

    workflow.append("Title", "Text", NewsLabel::Real).await;

    match workflow.state() {
        DatasetState::AppendFailed { items, message } => {
            assert_eq!(items.len(), 5);
            assert_eq!(message, "Duplicate item.");
        }
        other => panic!("expected AppendFailed, got {other:?}"),
    }
}
