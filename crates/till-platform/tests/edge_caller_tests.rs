//! EdgeCaller integration tests: issuer validation, self-deletion guard,
//! and error surfacing for privileged operations.

mod common;

use common::{mint_token, mount_password_grant, platform_config};

use till_platform::{AuthClient, EdgeCaller, PlatformError};

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

const USER_ID: &str = "7c0e3c4e-8c5f-4a7e-9a44-5a5a8d1a0d01";

async fn signed_in_caller(server: &MockServer, issuer: &str) -> EdgeCaller {
    mount_password_grant(server, &mint_token(USER_ID, issuer), USER_ID).await;

    let config = platform_config(server);
    let auth = Arc::new(AuthClient::new(&config));
    auth.sign_in("pat@example.com", "hunter2").await.unwrap();

    EdgeCaller::new(&config, auth)
}

#[tokio::test]
async fn test_invoke_succeeds_with_matching_issuer() {
    let server = MockServer::start().await;
    let issuer = format!("{}/auth/v1", server.uri());
    let caller = signed_in_caller(&server, &issuer).await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/repair-missing-company-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "repaired": true })))
        .expect(1)
        .mount(&server)
        .await;

    let result = caller.repair_missing_company_id().await.unwrap();

    assert_eq!(result["repaired"], true);
}

#[tokio::test]
async fn test_foreign_issuer_is_rejected_without_network_call() {
    let server = MockServer::start().await;
    // Token minted by a different environment
    let caller = signed_in_caller(&server, "https://other-project.example.co/auth/v1").await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/repair-missing-company-id"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = caller.repair_missing_company_id().await;

    assert!(matches!(
        result,
        Err(PlatformError::IssuerMismatch { .. })
    ));
}

#[tokio::test]
async fn test_self_deletion_is_rejected_without_network_call() {
    let server = MockServer::start().await;
    let issuer = format!("{}/auth/v1", server.uri());
    let caller = signed_in_caller(&server, &issuer).await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/delete-employee"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let own_id = Uuid::parse_str(USER_ID).unwrap();
    let result = caller.delete_employee(own_id, Some("cleanup"), false).await;

    assert!(matches!(result, Err(PlatformError::SelfDeletion { .. })));
}

#[tokio::test]
async fn test_delete_employee_error_payload_is_descriptive() {
    let server = MockServer::start().await;
    let issuer = format!("{}/auth/v1", server.uri());
    let caller = signed_in_caller(&server, &issuer).await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/delete-employee"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": "Target employee belongs to another company"
        })))
        .mount(&server)
        .await;

    let result = caller
        .delete_employee(Uuid::new_v4(), None, false)
        .await;

    match result {
        Err(PlatformError::Api { status, message, .. }) => {
            assert_eq!(status, 403);
            assert!(message.contains("another company"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_employee_posts_named_operation() {
    let server = MockServer::start().await;
    let issuer = format!("{}/auth/v1", server.uri());
    let caller = signed_in_caller(&server, &issuer).await;

    Mock::given(method("POST"))
        .and(path("/functions/v1/create-employee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": Uuid::new_v4()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let employee = till_platform::NewEmployee {
        email: "new@example.com".to_string(),
        password: "initial-secret".to_string(),
        display_name: "New Cashier".to_string(),
        role: till_core::Role::Cashier,
        branch_id: None,
    };

    assert!(caller.create_employee(&employee).await.is_ok());
}
