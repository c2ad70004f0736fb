//! AuthClient integration tests against a wiremock server.

mod common;

use common::{mint_token, mount_password_grant, platform_config};

use till_platform::{AuthClient, AuthEvent, PlatformError};

use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const USER_ID: &str = "7c0e3c4e-8c5f-4a7e-9a44-5a5a8d1a0d01";

#[tokio::test]
async fn test_sign_in_stores_session_and_emits_event() {
    let server = MockServer::start().await;
    let issuer = format!("{}/auth/v1", server.uri());
    mount_password_grant(&server, &mint_token(USER_ID, &issuer), USER_ID).await;

    let auth = AuthClient::new(&platform_config(&server));
    let mut events = auth.subscribe();

    let session = auth.sign_in("pat@example.com", "hunter2").await.unwrap();

    assert_eq!(session.user.id.to_string(), USER_ID);
    assert_eq!(session.user.name.as_deref(), Some("Pat"));
    assert!(!session.is_expired());
    assert!(auth.current_session().await.is_some());

    match events.recv().await.unwrap() {
        AuthEvent::SignedIn { user } => assert_eq!(user.id.to_string(), USER_ID),
        other => panic!("expected SignedIn, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_in_bad_credentials_surfaces_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let auth = AuthClient::new(&platform_config(&server));
    let result = auth.sign_in("pat@example.com", "wrong").await;

    match result {
        Err(PlatformError::Auth { status, message, .. }) => {
            assert_eq!(status, 400);
            assert!(message.contains("Invalid login credentials"));
        }
        other => panic!("expected Auth error, got {other:?}"),
    }
    assert!(auth.current_session().await.is_none());
}

#[tokio::test]
async fn test_sign_up_sends_redirect_target_and_reports_pending_confirmation() {
    let server = MockServer::start().await;

    // The confirmation redirect rides along as a query parameter; a mock
    // matching on it only responds when the client actually sends it
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(query_param("redirect_to", server.uri()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": USER_ID,
            "email": "pat@example.com"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(&platform_config(&server));
    let session = auth
        .sign_up("pat@example.com", "hunter2", "Pat")
        .await
        .unwrap();

    assert!(session.is_none());
    assert!(auth.current_session().await.is_none());
}

#[tokio::test]
async fn test_fresh_access_token_refreshes_near_expiry() {
    let server = MockServer::start().await;
    let issuer = format!("{}/auth/v1", server.uri());
    let stale = mint_token(USER_ID, &issuer);
    let fresh = mint_token(USER_ID, &issuer);

    // Session that expires in 30s, inside the 60s refresh margin
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": stale,
            "refresh_token": "refresh-token-1",
            "expires_in": 30,
            "user": { "id": USER_ID, "email": "pat@example.com" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": fresh,
            "refresh_token": "refresh-token-2",
            "expires_in": 3600,
            "user": { "id": USER_ID, "email": "pat@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let auth = AuthClient::new(&platform_config(&server));
    auth.sign_in("pat@example.com", "hunter2").await.unwrap();

    let token = auth.fresh_access_token().await.unwrap();

    assert_eq!(token, fresh);
}

#[tokio::test]
async fn test_sign_out_clears_session_even_when_revocation_fails() {
    let server = MockServer::start().await;
    let issuer = format!("{}/auth/v1", server.uri());
    mount_password_grant(&server, &mint_token(USER_ID, &issuer), USER_ID).await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let auth = AuthClient::new(&platform_config(&server));
    auth.sign_in("pat@example.com", "hunter2").await.unwrap();
    let mut events = auth.subscribe();

    auth.sign_out().await.unwrap();

    assert!(auth.current_session().await.is_none());
    assert!(matches!(events.recv().await.unwrap(), AuthEvent::SignedOut));
}

#[tokio::test]
async fn test_fresh_access_token_without_session_is_not_signed_in() {
    let server = MockServer::start().await;
    let auth = AuthClient::new(&platform_config(&server));

    let result = auth.fresh_access_token().await;

    assert!(matches!(result, Err(PlatformError::NotSignedIn { .. })));
}
