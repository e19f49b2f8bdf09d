use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        if busy() {
            return;
        }
        let auth = ctx.auth();
        let tokens = ctx.tokens();
        let email_value = email().trim().to_string();
        let password_value = password();
        if email_value.is_empty() || password_value.is_empty() {
            error.set(Some(ViewError::local("Email and password are required.")));
            return;
        }
        let mut busy = busy;
        let mut error = error;
        spawn(async move {
            busy.set(true);
            error.set(None);
            match auth.login(&email_value, &password_value).await {
                Ok(token) => {
                    if let Err(err) = tokens.set(token.as_str()) {
                        error.set(Some(ViewError::local(err.to_string())));
                    } else {
                        navigator.replace(Route::Dashboard {});
                    }
                }
                Err(err) => error.set(Some(err.into())),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "auth-page",
            div { class: "auth-card",
                h2 { "Sign in" }
                if let Some(err) = error() {
                    p { class: "error-banner", "{err.message()}" }
                }
                label { "Email"
                    input {
                        r#type: "email",
                        value: "{email()}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                }
                label { "Password"
                    input {
                        r#type: "password",
                        value: "{password()}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: submit,
                    if busy() { "Signing in..." } else { "Sign in" }
                }
                p { class: "auth-switch",
                    "No account yet? "
                    Link { to: Route::Signup {}, "Create one" }
                }
            }
        }
    }
}
