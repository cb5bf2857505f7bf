/// Common test utilities and fixtures
use cancionero_cli::{App, CliConfig};
use cancionero_client::ClientConfig;
use tempfile::TempDir;

/// Build an app pointed at `base_url` whose token file lives in a temp dir.
///
/// Keep the returned `TempDir` alive for the duration of the test.
pub fn create_test_app(base_url: &str) -> (App, TempDir) {
    let temp_dir = TempDir::new().unwrap();

    let mut config = CliConfig::default();
    config.api = ClientConfig::new(base_url);
    config.session.token_file = temp_dir.path().join("session.json");

    let app = App::new(&config).unwrap();
    (app, temp_dir)
}

/// Test fixtures
pub mod fixtures {
    pub const TEST_EMAIL: &str = "marta@example.com";
    pub const TEST_PASSWORD: &str = "TestPassword123!";
    pub const TEST_TOKEN: &str = "jwt_test_token";

    pub fn user() -> serde_json::Value {
        serde_json::json!({
            "id": 4,
            "nombre": "Marta",
            "correo": TEST_EMAIL,
            "rol": "usuario",
            "activo": true
        })
    }

    pub fn song(id: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "titulo": "Tren al sur",
            "artista": "Los Prisioneros",
            "album": "Corazones",
            "duracion": 330,
            "año": 1990,
            "genero": "rock"
        })
    }
}
