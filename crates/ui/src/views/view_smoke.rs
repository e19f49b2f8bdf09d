use crate::routes::Route;

use super::test_harness::{ViewKind, setup_view_harness, spawn_stub};

#[tokio::test(flavor = "current_thread")]
async fn protected_pages_bounce_to_login_without_a_token() {
    let base_url = spawn_stub(0, |_, _, _| (200, String::new()));
    let mut harness = setup_view_harness(ViewKind::FullApp, &base_url, None);

    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Sign in"), "missing Sign in in {html}");
    assert!(
        !html.contains("Your learning paths"),
        "dashboard rendered without a token in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_tiles_and_cards() {
    let path_json = r#"[{
        "id": 7,
        "domain": "Rust",
        "createdAt": "2023-11-01T09:00:00Z",
        "path": [{"topic": "Basics", "duration": 3, "status": "completed"}]
    }]"#;
    let base_url = spawn_stub(1, move |method, url, _| {
        assert_eq!((method, url), ("GET", "/api/paths"));
        (200, path_json.to_string())
    });
    let mut harness = setup_view_harness(ViewKind::FullApp, &base_url, Some("tok-dash"));

    harness.rebuild();
    for _ in 0..4 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(html.contains("Your learning paths"), "missing path grid in {html}");
    assert!(html.contains("Rust"), "missing path card in {html}");
    assert!(html.contains("Nothing pending."), "missing deadline note in {html}");
    // The pre-fetch placeholder reads as loading, never as a bare state name.
    assert!(!html.contains("Idle"), "placeholder leaked into {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_sidebar_smoke_shows_the_empty_note() {
    let base_url = spawn_stub(1, |method, url, _| {
        assert_eq!((method, url), ("GET", "/api/ai/sessions"));
        (200, "[]".to_string())
    });
    let mut harness = setup_view_harness(ViewKind::ChatTutor, &base_url, Some("tok-chat"));

    harness.rebuild();
    for _ in 0..4 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(
        html.contains("No saved sessions yet."),
        "missing empty note in {html}"
    );
    assert!(
        html.contains("Ask the tutor anything about your path."),
        "missing transcript prompt in {html}"
    );
    assert!(!html.contains("Idle"), "placeholder leaked into {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn navigation_rechecks_the_token_after_expiry() {
    let base_url = spawn_stub(1, |method, url, _| {
        assert_eq!((method, url), ("GET", "/api/paths"));
        (200, "[]".to_string())
    });
    let mut harness = setup_view_harness(ViewKind::FullApp, &base_url, Some("tok-exp"));

    harness.rebuild();
    for _ in 0..4 {
        harness.drive_async().await;
    }
    assert!(
        harness.render().contains("Your learning paths"),
        "dashboard should render while the token is live"
    );

    // The token disappears out from under the running session.
    harness.tokens.clear().expect("clear token");
    let navigate = harness
        .layout_handles
        .clone()
        .expect("layout handles")
        .navigate();
    harness.dom.in_runtime(|| navigate.call(Route::ChatTutor {}));
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Sign in"), "missing Sign in in {html}");
    assert!(
        !html.contains("chat-sidebar"),
        "chat page rendered for a cleared token in {html}"
    );
}
