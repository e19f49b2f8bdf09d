#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator, use_route};

use crate::context::AppContext;
use crate::views::{
    ChatTutorView, CreatePathView, DashboardView, FlashcardsView, InterviewView, LoginView,
    PathDetailsView, ResumeView, SignupView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login", LoginView)] Login {},
    #[route("/signup", SignupView)] Signup {},
    #[layout(Layout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/create", CreatePathView)] CreatePath {},
        #[route("/paths/:path_id", PathDetailsView)] PathDetails { path_id: i64 },
        #[route("/chat", ChatTutorView)] ChatTutor {},
        #[route("/interview", InterviewView)] Interview {},
        #[route("/resume", ResumeView)] Resume {},
        #[route("/flashcards", FlashcardsView)] Flashcards {},
    #[end_layout]
    #[route("/:..segments")] NotFound { segments: Vec<String> },
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    // Unknown paths land on the dashboard.
    let navigator = use_navigator();
    navigator.replace(Route::Dashboard {});
    rsx! {}
}

/// Shared chrome for the authenticated pages. The token store is the single
/// source of truth: no token, no protected page.
#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    // Subscribes the layout to route changes, so the token check below
    // runs on every navigation, not only on first mount.
    use_route::<Route>();

    #[cfg(test)]
    {
        let navigate = use_callback(move |route: Route| {
            let _ = navigator.push(route);
        });
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<LayoutTestHandles>() {
                handles.register(navigate);
            }
        }
    }

    if ctx.tokens().get().is_none() {
        navigator.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();

    rsx! {
        header { class: "topbar",
            h1 { class: "brand", "Career Guidance" }
            nav { class: "topnav",
                Link { to: Route::Dashboard {}, "Dashboard" }
                Link { to: Route::CreatePath {}, "New Path" }
                Link { to: Route::ChatTutor {}, "Tutor" }
                Link { to: Route::Interview {}, "Interview" }
                Link { to: Route::Resume {}, "Resume" }
                Link { to: Route::Flashcards {}, "Flashcards" }
            }
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| {
                    let _ = ctx.tokens().clear();
                    navigator.replace(Route::Login {});
                },
                "Logout"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct LayoutTestHandles {
    navigate: Rc<RefCell<Option<Callback<Route>>>>,
}

#[cfg(test)]
impl LayoutTestHandles {
    pub(crate) fn register(&self, navigate: Callback<Route>) {
        *self.navigate.borrow_mut() = Some(navigate);
    }

    pub(crate) fn navigate(&self) -> Callback<Route> {
        (*self.navigate.borrow()).expect("layout navigation registered")
    }
}
