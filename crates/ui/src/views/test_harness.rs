use std::io::Read;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use guidance_core::time::fixed_now;
use services::{AiService, ApiClient, AuthService, Clock, PathService, TokenStore};
use tiny_http::{Header, Response, Server};

use crate::context::{UiApp, build_app_context};
use crate::routes::{LayoutTestHandles, Route};
use crate::views::ChatTutorView;

/// Spawns a one-shot JSON stub backend. The handler sees method, url and
/// request body and answers with a status code and body. The thread exits
/// after `requests` requests.
pub fn spawn_stub<F>(requests: usize, handler: F) -> String
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

#[derive(Clone)]
struct TestApp {
    auth: Arc<AuthService>,
    paths: Arc<PathService>,
    ai: Arc<AiService>,
    tokens: Arc<TokenStore>,
    clock: Clock,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn paths(&self) -> Arc<PathService> {
        Arc::clone(&self.paths)
    }

    fn ai(&self) -> Arc<AiService> {
        Arc::clone(&self.ai)
    }

    fn tokens(&self) -> Arc<TokenStore> {
        Arc::clone(&self.tokens)
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

/// Which tree the harness mounts: the real route table (auth gate, header
/// and all) or a single view on a bare route.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    FullApp,
    ChatTutor,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    layout_handles: Option<LayoutTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.layout_handles.clone() {
        use_context_provider(|| handles);
    }
    match props.view {
        ViewKind::FullApp => rsx! { Router::<Route> {} },
        _ => rsx! { Router::<TestRoute> {} },
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::ChatTutor => rsx! { ChatTutorView {} },
        ViewKind::FullApp => rsx! {},
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub tokens: Arc<TokenStore>,
    pub layout_handles: Option<LayoutTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, base_url: &str, token: Option<&str>) -> ViewHarness {
    let tokens = Arc::new(TokenStore::in_memory());
    if let Some(token) = token {
        tokens.set(token).expect("seed token");
    }
    let client = ApiClient::new(base_url, Arc::clone(&tokens));

    let app = Arc::new(TestApp {
        auth: Arc::new(AuthService::new(client.clone())),
        paths: Arc::new(PathService::new(client.clone())),
        ai: Arc::new(AiService::new(client)),
        tokens: Arc::clone(&tokens),
        clock: Clock::fixed(fixed_now()),
    });

    let layout_handles = match view {
        ViewKind::FullApp => Some(LayoutTestHandles::default()),
        _ => None,
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            layout_handles: layout_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        tokens,
        layout_handles,
    }
}
