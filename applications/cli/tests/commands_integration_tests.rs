/// Command integration tests
/// Runs CLI commands end to end against a mock API server
mod common;

use cancionero_cli::commands::{FavoritesCommand, SongsCommand};
use cancionero_cli::{run, CliError, Command};
use cancionero_stores::StoreError;
use common::{create_test_app, fixtures};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login-json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": fixtures::TEST_TOKEN,
            "token_type": "bearer",
            "rol": "usuario"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(header(
            "Authorization",
            format!("Bearer {}", fixtures::TEST_TOKEN).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::user()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_persists_token_file() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let (app, temp_dir) = create_test_app(&server.uri());

    let output = run(
        &app,
        Command::Login {
            email: fixtures::TEST_EMAIL.to_string(),
            password: fixtures::TEST_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(output["nombre"], "Marta");

    let contents = std::fs::read_to_string(temp_dir.path().join("session.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(stored["auth_token"], fixtures::TEST_TOKEN);
}

#[tokio::test]
async fn test_whoami_after_login_uses_persisted_token() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let (app, temp_dir) = create_test_app(&server.uri());
    run(
        &app,
        Command::Login {
            email: fixtures::TEST_EMAIL.to_string(),
            password: fixtures::TEST_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap();

    // A second process would start from the token file alone
    let mut config = cancionero_cli::CliConfig::default();
    config.api = cancionero_client::ClientConfig::new(server.uri());
    config.session.token_file = temp_dir.path().join("session.json");
    let second = cancionero_cli::App::new(&config).unwrap();

    let output = run(&second, Command::Whoami).await.unwrap();
    assert_eq!(output["id"], 4);
}

#[tokio::test]
async fn test_whoami_without_session_is_null() {
    let server = MockServer::start().await;
    let (app, _temp_dir) = create_test_app(&server.uri());

    let output = run(&app, Command::Whoami).await.unwrap();

    assert!(output.is_null());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_song_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/canciones/buscar"))
        .and(query_param("titulo", "Tren"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([fixtures::song(8)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (app, _temp_dir) = create_test_app(&server.uri());
    let output = run(
        &app,
        Command::Songs(SongsCommand::Search {
            title: Some("Tren".to_string()),
            artist: None,
            genre: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(output[0]["titulo"], "Tren al sur");
}

#[tokio::test]
async fn test_play_shows_player_state() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/canciones/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::song(8)))
        .mount(&server)
        .await;

    let (app, _temp_dir) = create_test_app(&server.uri());
    let output = run(&app, Command::Play { id: 8 }).await.unwrap();

    assert_eq!(output["is_playing"], true);
    assert_eq!(output["current_time"], 0.0);
    assert_eq!(output["volume"], 70);
    assert_eq!(output["current_song"]["id"], 8);
}

#[tokio::test]
async fn test_favorites_require_session() {
    let server = MockServer::start().await;
    let (app, _temp_dir) = create_test_app(&server.uri());

    let err = run(&app, Command::Favorites(FavoritesCommand::List))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CliError::Store(StoreError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_favorites_add_for_session_user() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/usuarios/4/favoritos/8"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 1,
            "id_usuario": 4,
            "id_cancion": 8
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (app, _temp_dir) = create_test_app(&server.uri());
    run(
        &app,
        Command::Login {
            email: fixtures::TEST_EMAIL.to_string(),
            password: fixtures::TEST_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap();

    let output = run(
        &app,
        Command::Favorites(FavoritesCommand::Add { song_id: 8 }),
    )
    .await
    .unwrap();

    assert_eq!(output["id_cancion"], 8);
}

#[tokio::test]
async fn test_logout_removes_token() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let (app, temp_dir) = create_test_app(&server.uri());
    run(
        &app,
        Command::Login {
            email: fixtures::TEST_EMAIL.to_string(),
            password: fixtures::TEST_PASSWORD.to_string(),
        },
    )
    .await
    .unwrap();

    run(&app, Command::Logout).await.unwrap();

    let contents = std::fs::read_to_string(temp_dir.path().join("session.json")).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(stored.get("auth_token").is_none());
    assert!(app.client.token().await.is_none());
}
