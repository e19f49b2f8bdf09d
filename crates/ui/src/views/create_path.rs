use dioxus::prelude::*;
use dioxus_router::use_navigator;

use guidance_core::model::Topic;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PlanMode {
    Generate,
    Manual,
}

/// Shape of one entry in the manual-plan textarea.
#[derive(serde::Deserialize)]
struct ManualEntry {
    topic: String,
    duration: u32,
}

/// Parses the manual JSON plan into topic drafts. Rejected input never
/// reaches the network.
fn parse_manual_plan(raw: &str) -> Result<Vec<Topic>, ViewError> {
    let entries: Vec<ManualEntry> = serde_json::from_str(raw).map_err(|_| {
        ViewError::local(
            "Plan must be a JSON array of {\"topic\": \"...\", \"duration\": N} entries.",
        )
    })?;
    if entries.is_empty() {
        return Err(ViewError::local("A manual plan needs at least one topic."));
    }
    Ok(entries
        .into_iter()
        .map(|e| Topic::draft(e.topic, e.duration))
        .collect())
}

#[component]
pub fn CreatePathView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut domain = use_signal(String::new);
    let mut mode = use_signal(|| PlanMode::Generate);
    let mut manual_json = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let submit = move |_| {
        if busy() {
            return;
        }
        let paths = ctx.paths();
        let domain_value = domain().trim().to_string();
        if domain_value.is_empty() {
            error.set(Some(ViewError::local("Domain is required.")));
            return;
        }
        let topics = match mode() {
            // An empty plan asks the backend to generate the curriculum.
            PlanMode::Generate => Vec::new(),
            PlanMode::Manual => match parse_manual_plan(&manual_json()) {
                Ok(topics) => topics,
                Err(err) => {
                    error.set(Some(err));
                    return;
                }
            },
        };
        let mut busy = busy;
        let mut error = error;
        spawn(async move {
            busy.set(true);
            error.set(None);
            match paths.create_path(&domain_value, &topics).await {
                Ok(created) => {
                    navigator.push(Route::PathDetails { path_id: created.id });
                }
                Err(err) => {
                    if err.is_unauthorized() {
                        navigator.replace(Route::Login {});
                    } else {
                        error.set(Some(err.into()));
                    }
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "page create-page",
            header { class: "view-header",
                h2 { class: "view-title", "New learning path" }
            }
            if let Some(err) = error() {
                p { class: "error-banner",
                    "{err.message()}"
                    button {
                        class: "error-dismiss",
                        r#type: "button",
                        onclick: move |_| error.set(None),
                        "×"
                    }
                }
            }
            label { "Domain"
                input {
                    r#type: "text",
                    placeholder: "e.g. Backend Development",
                    value: "{domain()}",
                    oninput: move |evt| domain.set(evt.value()),
                }
            }
            div { class: "plan-mode",
                label {
                    input {
                        r#type: "radio",
                        name: "plan-mode",
                        checked: mode() == PlanMode::Generate,
                        onchange: move |_| mode.set(PlanMode::Generate),
                    }
                    "Generate the plan with AI"
                }
                label {
                    input {
                        r#type: "radio",
                        name: "plan-mode",
                        checked: mode() == PlanMode::Manual,
                        onchange: move |_| mode.set(PlanMode::Manual),
                    }
                    "Write the plan myself"
                }
            }
            if mode() == PlanMode::Manual {
                label { "Plan (JSON)"
                    textarea {
                        class: "plan-editor",
                        rows: "10",
                        placeholder: "[{{\"topic\": \"Basics\", \"duration\": 3}}]",
                        value: "{manual_json()}",
                        oninput: move |evt| manual_json.set(evt.value()),
                    }
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: busy(),
                onclick: submit,
                if busy() { "Creating..." } else { "Create path" }
            }
        }
    }
}
