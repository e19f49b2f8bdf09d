use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

/// Root component. Routing happens inside the error boundary so a panicking
/// view cannot take the whole window down.
#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Career Guidance" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something broke" }
                        p { "Restart the app. If it keeps happening, the details below help." }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
