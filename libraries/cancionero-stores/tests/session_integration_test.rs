//! Integration tests for the session flow.
//!
//! These tests run the auth store against a real `ApiClient` talking to a
//! mock server, with the token kept in a `MemoryStore`.

use cancionero_client::{
    ApiClient, ClientConfig, Credentials, KeyValueStore, MemoryStore, StorageError,
    AUTH_TOKEN_KEY,
};
use cancionero_stores::AuthStore;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_user() -> serde_json::Value {
    serde_json::json!({
        "id": 4,
        "nombre": "Marta",
        "correo": "marta@example.com",
        "rol": "usuario",
        "activo": true
    })
}

/// Storage whose writes always fail, as on a read-only disk.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

fn store_for(server_uri: String, storage: Arc<dyn KeyValueStore>) -> AuthStore {
    let client = ApiClient::with_storage(ClientConfig::new(server_uri), storage).unwrap();
    AuthStore::new(Arc::new(client))
}

#[tokio::test]
async fn test_restore_without_token_makes_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_user()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let store = store_for(mock_server.uri(), Arc::new(MemoryStore::new()));

    assert_eq!(store.restore_session().await.unwrap(), None);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_restore_with_persisted_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("Authorization", "Bearer persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_user()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let storage = Arc::new(MemoryStore::new());
    storage.set(AUTH_TOKEN_KEY, "persisted").unwrap();
    let store = store_for(mock_server.uri(), storage);

    let user = store.restore_session().await.unwrap().unwrap();
    assert_eq!(user.name, "Marta");
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn test_rejected_token_is_removed_from_storage() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "detail": "Token expirado" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let storage = Arc::new(MemoryStore::new());
    storage.set(AUTH_TOKEN_KEY, "expired").unwrap();
    let store = store_for(mock_server.uri(), storage.clone());

    assert_eq!(store.restore_session().await.unwrap(), None);
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
    assert_eq!(store.backend().token().await, None);
}

#[tokio::test]
async fn test_unreachable_server_keeps_token() {
    let storage = Arc::new(MemoryStore::new());
    storage.set(AUTH_TOKEN_KEY, "still-good").unwrap();
    let store = store_for("http://127.0.0.1:9".to_string(), storage.clone());

    let err = store.restore_session().await.unwrap_err();

    assert!(err.is_connection());
    assert!(!store.is_authenticated());
    assert_eq!(
        storage.get(AUTH_TOKEN_KEY).unwrap().as_deref(),
        Some("still-good")
    );
}

#[tokio::test]
async fn test_login_then_logout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login-json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh",
            "token_type": "bearer",
            "rol": "usuario"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_user()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let storage = Arc::new(MemoryStore::new());
    let store = store_for(mock_server.uri(), storage.clone());

    let user = store
        .login(&Credentials::new("marta@example.com", "pw"))
        .await
        .unwrap();
    assert_eq!(user.id, 4);
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap().as_deref(), Some("fresh"));

    store.logout().await.unwrap();
    assert!(!store.is_authenticated());
    assert_eq!(storage.get(AUTH_TOKEN_KEY).unwrap(), None);
}

#[tokio::test]
async fn test_login_with_unwritable_storage_leaves_no_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login-json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh",
            "token_type": "bearer",
            "rol": "usuario"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mock_user()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Arc::new(
        ApiClient::with_storage(ClientConfig::new(mock_server.uri()), Arc::new(ReadOnlyStore))
            .unwrap(),
    );
    let store = AuthStore::new(client.clone());

    let result = store
        .login(&Credentials::new("marta@example.com", "pw"))
        .await;

    assert!(result.is_err());
    assert!(!store.is_authenticated());
    assert_eq!(client.token().await, None);
}
