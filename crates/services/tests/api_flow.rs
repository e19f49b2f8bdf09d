use std::io::Read;
use std::sync::Arc;
use std::sync::mpsc;

use guidance_core::model::{Topic, TopicStatus};
use services::{ApiClient, AuthService, PathService, TokenStore};
use tiny_http::{Header, Response, Server};

/// Spawns a one-shot JSON stub backend. The handler sees method, url and
/// request body and answers with a status code and body. The thread exits
/// after `requests` requests.
fn spawn_stub<F>(requests: usize, handler: F) -> String
where
    F: Fn(&str, &str, &str) -> (u16, String) + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("bind stub server");
    let port = server.server_addr().to_ip().expect("ip addr").port();
    std::thread::spawn(move || {
        for mut request in server.incoming_requests().take(requests) {
            let mut body = String::new();
            let _ = request.as_reader().read_to_string(&mut body);
            let (status, reply) = handler(request.method().as_str(), request.url(), &body);
            let response = Response::from_string(reply)
                .with_status_code(status)
                .with_header(
                    Header::from_bytes("Content-Type", "application/json").expect("header"),
                );
            let _ = request.respond(response);
        }
    });
    format!("http://127.0.0.1:{port}")
}

fn client_with_token(base_url: &str, token: Option<&str>) -> (ApiClient, Arc<TokenStore>) {
    let tokens = Arc::new(TokenStore::in_memory());
    if let Some(token) = token {
        tokens.set(token).expect("seed token");
    }
    (ApiClient::new(base_url, Arc::clone(&tokens)), tokens)
}

#[tokio::test]
async fn manual_path_create_then_fetch_round_trip() {
    let path_json = r#"{
        "id": 1,
        "domain": "Rust",
        "createdAt": "2026-01-10T09:00:00Z",
        "path": [{"topic": "Basics", "duration": 3, "status": "pending"}]
    }"#
    .to_string();

    let created = path_json.clone();
    let base_url = spawn_stub(2, move |method, url, body| match (method, url) {
        ("POST", "/api/paths") => {
            assert!(body.contains("\"domain\":\"Rust\""));
            assert!(body.contains("\"topic\":\"Basics\""));
            (200, created.clone())
        }
        ("GET", "/api/paths/1") => (200, path_json.clone()),
        other => panic!("unexpected request {other:?}"),
    });

    let (client, _tokens) = client_with_token(&base_url, Some("tok-123"));
    let paths = PathService::new(client);

    let topics = vec![Topic::draft("Basics", 3)];
    let created = paths.create_path("Rust", &topics).await.expect("create path");
    assert_eq!(created.id, 1);
    assert_eq!(created.path.len(), 1);
    assert_eq!(created.path[0].topic, "Basics");
    assert_eq!(created.path[0].status, TopicStatus::Pending);

    let fetched = paths.get_path(created.id).await.expect("fetch path");
    assert_eq!(fetched.domain, "Rust");
    assert_eq!(fetched.path[0].duration, 3);
}

#[tokio::test]
async fn bearer_token_rides_along_when_stored() {
    let (seen_tx, seen_rx) = mpsc::channel::<Option<String>>();
    let server = Server::http("127.0.0.1:0").expect("bind stub server");
    let port = server.server_addr().to_ip().expect("ip addr").port();
    std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let auth = request
                .headers()
                .iter()
                .find(|h| h.field.equiv("Authorization"))
                .map(|h| h.value.as_str().to_string());
            let _ = seen_tx.send(auth);
            let _ = request.respond(
                Response::from_string("[]").with_header(
                    Header::from_bytes("Content-Type", "application/json").expect("header"),
                ),
            );
        }
    });

    let (client, _tokens) =
        client_with_token(&format!("http://127.0.0.1:{port}"), Some("tok-456"));
    let paths = PathService::new(client);
    let listed = paths.list_paths().await.expect("list paths");
    assert!(listed.is_empty());

    let auth = seen_rx.recv().expect("observed request");
    assert_eq!(auth.as_deref(), Some("Bearer tok-456"));
}

#[tokio::test]
async fn unauthorized_response_clears_the_stored_token() {
    let base_url = spawn_stub(1, |_, _, _| (401, r#"{"error":"invalid token"}"#.to_string()));

    let (client, tokens) = client_with_token(&base_url, Some("stale"));
    let paths = PathService::new(client);

    let err = paths.list_paths().await.expect_err("401 must fail");
    assert!(err.is_unauthorized());
    assert!(tokens.get().is_none(), "stale token must be gone");
}

#[tokio::test]
async fn backend_error_message_reaches_the_caller() {
    let base_url =
        spawn_stub(1, |_, _, _| (400, r#"{"error":"domain is required"}"#.to_string()));

    let (client, _tokens) = client_with_token(&base_url, None);
    let paths = PathService::new(client);

    let err = paths.create_path("", &[]).await.expect_err("400 must fail");
    assert_eq!(err.to_string(), "domain is required");
}

#[tokio::test]
async fn login_without_a_token_in_the_body_is_rejected() {
    let base_url = spawn_stub(1, |method, url, _| {
        assert_eq!((method, url), ("POST", "/api/auth/login"));
        (200, r#"{"message":"welcome"}"#.to_string())
    });

    let (client, _tokens) = client_with_token(&base_url, None);
    let auth = AuthService::new(client);

    let err = auth
        .login("user@example.com", "hunter2")
        .await
        .expect_err("token-less login must fail");
    assert_eq!(err.to_string(), "server response carried no token");
}

#[tokio::test]
async fn login_stores_nothing_but_returns_the_token() {
    let base_url = spawn_stub(1, |_, _, body| {
        assert!(body.contains("\"email\":\"user@example.com\""));
        (200, r#"{"token":"jwt-abc"}"#.to_string())
    });

    let (client, tokens) = client_with_token(&base_url, None);
    let auth = AuthService::new(client);

    let token = auth
        .login("user@example.com", "hunter2")
        .await
        .expect("login");
    assert_eq!(token.as_str(), "jwt-abc");
    // Persistence is the caller's decision.
    assert!(tokens.get().is_none());
}
