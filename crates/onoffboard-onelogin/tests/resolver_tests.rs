//! Integration tests for the OneLogin resolver against a wiremock server.
//!
//! Tests cover:
//! - client-credentials token exchange and caching
//! - user lookup and normalization
//! - error mapping (404, 401, 5xx, malformed body)

use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use onoffboard_core::{IdentityResolver, ResolutionError, RoleId, UserId};
use onoffboard_onelogin::{OneLoginClient, OneLoginConfig, OneLoginCredentials};

fn client(server: &MockServer) -> OneLoginClient {
    let credentials = OneLoginCredentials {
        client_id: "client-123".to_string(),
        client_secret: "secret-456".to_string().into(),
    };
    OneLoginClient::with_http_client(
        OneLoginConfig::with_base_url(server.uri(), credentials),
        reqwest::Client::new(),
    )
}

async fn mount_token(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/auth/oauth2/v2/token"))
        .and(basic_auth("client-123", "secret-456"))
        .and(body_json(json!({ "grant_type": "client_credentials" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-abc",
            "expires_in": 36000,
            "token_type": "bearer"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn user_json() -> serde_json::Value {
    json!({
        "id": 42,
        "firstname": "Mona",
        "lastname": "Lisa",
        "email": "mona@example.com",
        "role_ids": [258878, 258875],
        "custom_attributes": { "GH": "octocat" }
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Successful resolution
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_resolve_user_success() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/2/users/42"))
        .and(header("Authorization", "Bearer access-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let record = client(&server).resolve(UserId::new(42)).await.unwrap();

    assert_eq!(record.display_name, "Mona Lisa");
    assert_eq!(record.external_handle.as_deref(), Some("octocat"));
    assert_eq!(
        record.role_ids,
        vec![RoleId::new(258_878), RoleId::new(258_875)]
    );
}

#[tokio::test]
async fn test_token_is_cached_between_lookups() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/2/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(2)
        .mount(&server)
        .await;

    let client = client(&server);
    client.resolve(UserId::new(42)).await.unwrap();
    client.resolve(UserId::new(42)).await.unwrap();
}

#[tokio::test]
async fn test_user_without_handle_resolves_with_none() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/2/users/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "firstname": "No",
            "lastname": "Handle",
            "role_ids": [258878],
            "custom_attributes": {}
        })))
        .mount(&server)
        .await;

    let record = client(&server).resolve(UserId::new(9)).await.unwrap();
    assert!(record.external_handle.is_none());
    assert_eq!(record.role_ids, vec![RoleId::new(258_878)]);
}

// ═══════════════════════════════════════════════════════════════════════════
// Error mapping
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/2/users/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client(&server)
        .resolve(UserId::new(404))
        .await
        .unwrap_err();
    assert!(matches!(err, ResolutionError::NotFound(id) if id == UserId::new(404)));
}

#[tokio::test]
async fn test_token_endpoint_failure_maps_to_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/oauth2/v2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid_client"))
        .mount(&server)
        .await;

    let err = client(&server).resolve(UserId::new(1)).await.unwrap_err();
    match err {
        ResolutionError::Auth(message) => assert!(message.contains("401")),
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_lookup_refreshes_token_next_time() {
    let server = MockServer::start().await;
    mount_token(&server, 2).await;

    Mock::given(method("GET"))
        .and(path("/api/2/users/42"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/2/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .mount(&server)
        .await;

    let client = client(&server);
    let first = client.resolve(UserId::new(42)).await;
    assert!(matches!(first, Err(ResolutionError::Auth(_))));

    let second = client.resolve(UserId::new(42)).await.unwrap();
    assert_eq!(second.display_name, "Mona Lisa");
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/2/users/42"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(&server).resolve(UserId::new(42)).await.unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::Status { status: 503, ref body } if body == "maintenance"
    ));
}

#[tokio::test]
async fn test_malformed_body_maps_to_parse() {
    let server = MockServer::start().await;
    mount_token(&server, 1).await;

    Mock::given(method("GET"))
        .and(path("/api/2/users/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server).resolve(UserId::new(42)).await.unwrap_err();
    assert!(matches!(err, ResolutionError::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_maps_to_http() {
    let server = MockServer::start().await;
    let client = client(&server);
    drop(server);

    let err = client.resolve(UserId::new(42)).await.unwrap_err();
    // The token request is the first call to fail.
    assert!(matches!(err, ResolutionError::Auth(_)));
}
