use dioxus::prelude::*;
use dioxus_router::use_navigator;

use services::SkillGapReport;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn ResumeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut target_role = use_signal(String::new);
    let mut resume_text = use_signal(String::new);
    let mut report = use_signal(|| None::<SkillGapReport>);
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let ai_for_history = ctx.ai();
    let history = use_resource(move || {
        let ai = ai_for_history.clone();
        async move {
            let items = ai.list_recommendations().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(items)
        }
    });

    let history_state = view_state_from_resource(&history);
    if let ViewState::Error(err) = &history_state {
        if err.is_unauthorized() {
            navigator.replace(Route::Login {});
            return rsx! {};
        }
    }

    let analyze = {
        let ctx = ctx.clone();
        move |_| {
            if busy() {
                return;
            }
            let role_value = target_role().trim().to_string();
            let resume_value = resume_text().trim().to_string();
            if role_value.is_empty() || resume_value.is_empty() {
                error.set(Some(ViewError::local(
                    "Both a target role and resume text are required.",
                )));
                return;
            }
            let ai = ctx.ai();
            let mut busy = busy;
            let mut error = error;
            let mut report = report;
            let mut history = history;
            spawn(async move {
                busy.set(true);
                error.set(None);
                match ai.skill_gap(&resume_value, &role_value).await {
                    Ok(result) => {
                        report.set(Some(result));
                        history.restart();
                    }
                    Err(err) if err.is_unauthorized() => {
                        navigator.replace(Route::Login {});
                    }
                    Err(err) => error.set(Some(err.into())),
                }
                busy.set(false);
            });
        }
    };

    let report_json = report().map(|r| r.display_json());

    rsx! {
        div { class: "page resume-page",
            header { class: "view-header",
                h2 { class: "view-title", "Resume analyzer" }
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
            div { class: "tool-form",
                label { "Target role"
                    input {
                        r#type: "text",
                        placeholder: "e.g. Data Engineer",
                        value: "{target_role()}",
                        oninput: move |evt| target_role.set(evt.value()),
                    }
                }
                label { "Resume"
                    textarea {
                        class: "resume-editor",
                        rows: "12",
                        placeholder: "Paste your resume text here...",
                        value: "{resume_text()}",
                        oninput: move |evt| resume_text.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: analyze,
                    if busy() { "Analyzing..." } else { "Analyze skill gap" }
                }
            }

            if let Some(json) = report_json {
                section { class: "report-panel",
                    h3 { "Recommended path" }
                    pre { class: "report-json", "{json}" }
                }
            }

            section { class: "history-panel",
                h3 { "Saved recommendations" }
                match history_state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "error-banner", "{err.message()}" }
                    },
                    ViewState::Ready(items) => rsx! {
                        if items.is_empty() {
                            p { class: "empty-note", "No saved recommendations yet." }
                        }
                        ul {
                            for item in items {
                                {
                                    let title = item.display_title();
                                    let created = item.created_at.clone().unwrap_or_default();
                                    rsx! {
                                        li { class: "history-row",
                                            span { "{title}" }
                                            span { class: "history-date", "{created}" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                }
            }
        }
    }
}
