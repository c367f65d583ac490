use hf_deploy::{
    Error,
    config::EndpointConfig,
    endpoint::Provisioner,
};
use pretty_assertions::assert_eq;
use serde_json::json;

mod common;

use common::{
    mocks::MockEndpointApi,
    test_utils::{fast_policy, status},
};

fn fast_provisioner(api: MockEndpointApi, max_attempts: u32) -> Provisioner<MockEndpointApi> {
    Provisioner::new(api, EndpointConfig::default()).with_retry_policy(fast_policy(max_attempts))
}

#[tokio::test]
async fn test_running_after_three_polls() {
    let api = MockEndpointApi::new(json!({ "name": "test-endpoint" })).with_statuses(vec![
        status("pending"),
        status("pending"),
        status("running"),
    ]);
    let provisioner = fast_provisioner(api, 10);

    let endpoint = provisioner
        .create_inference_endpoint("test-endpoint", "me/model")
        .await
        .unwrap();

    assert_eq!(endpoint, status("running"));
}

#[tokio::test]
async fn test_poll_count_and_request_contents() {
    let api = MockEndpointApi::new(json!({})).with_statuses(vec![
        status("pending"),
        status("initializing"),
        status("running"),
    ]);
    let provisioner = fast_provisioner(api, 10);

    provisioner
        .create_inference_endpoint("test-endpoint", "me/model")
        .await
        .unwrap();

    let api = provisioner.api();
    assert_eq!(api.create_count(), 1);
    assert_eq!(api.get_count(), 3);

    let request = api.create_requests.lock().unwrap()[0].clone();
    assert_eq!(request.name, "test-endpoint");
    assert_eq!(request.model.repository, "me/model");
    assert_eq!(request.compute.scaling.scale_to_zero_timeout, 15);
}

#[tokio::test]
async fn test_failed_state_reports_vendor_message() {
    let api = MockEndpointApi::new(json!({})).with_statuses(vec![
        status("pending"),
        json!({ "status": { "state": "failed", "errorMessage": "Image pull failed" } }),
    ]);
    let provisioner = fast_provisioner(api, 10);

    let err = provisioner
        .create_inference_endpoint("test-endpoint", "me/model")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EndpointFailed { ref message } if message == "Image pull failed"));
    assert_eq!(provisioner.api().get_count(), 2);
}

#[tokio::test]
async fn test_update_failed_state_is_fatal() {
    let api = MockEndpointApi::new(json!({})).with_statuses(vec![json!({
        "status": { "state": "updateFailed", "errorMessage": "Bad revision" }
    })]);
    let provisioner = fast_provisioner(api, 10);

    let err = provisioner
        .poll_endpoint_status("test-endpoint")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Endpoint creation failed: Bad revision");
}

#[tokio::test]
async fn test_all_pending_times_out() {
    let api = MockEndpointApi::new(json!({})).with_statuses(vec![status("pending")]);
    let provisioner = fast_provisioner(api, 4);

    let err = provisioner
        .create_inference_endpoint("test-endpoint", "me/model")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Timeout { attempts: 4 }));
    assert_eq!(provisioner.api().get_count(), 4);
}

#[tokio::test]
async fn test_missing_status_is_retried() {
    let api = MockEndpointApi::new(json!({})).with_statuses(vec![
        json!({ "error": "temporarily unavailable" }),
        json!({ "status": {} }),
        status("running"),
    ]);
    let provisioner = fast_provisioner(api, 5);

    let endpoint = provisioner
        .poll_endpoint_status("test-endpoint")
        .await
        .unwrap();

    assert_eq!(endpoint["status"]["state"], "running");
    assert_eq!(provisioner.api().get_count(), 3);
}

#[tokio::test]
async fn test_create_error_aborts_before_polling() {
    let api = MockEndpointApi::new(json!({ "error": "Endpoint name already exists" }))
        .with_statuses(vec![status("running")]);
    let provisioner = fast_provisioner(api, 5);

    let err = provisioner
        .create_inference_endpoint("test-endpoint", "me/model")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Vendor(ref msg) if msg == "Endpoint name already exists"));
    assert_eq!(provisioner.api().get_count(), 0);
}
