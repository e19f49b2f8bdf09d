use dioxus::prelude::*;
use dioxus_router::use_navigator;

use guidance_core::model::InterviewQuestion;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::markdown_to_html;

#[component]
pub fn InterviewView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut role = use_signal(String::new);
    let mut rounds = use_signal(|| "5".to_string());
    let mut questions = use_signal(Vec::<InterviewQuestion>::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let ai_for_history = ctx.ai();
    let history = use_resource(move || {
        let ai = ai_for_history.clone();
        async move {
            let items = ai.list_mock_interviews().await.map_err(ViewError::from)?;
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

    let generate = {
        let ctx = ctx.clone();
        move |_| {
            if busy() {
                return;
            }
            let role_value = role().trim().to_string();
            if role_value.is_empty() {
                error.set(Some(ViewError::local("A target role is required.")));
                return;
            }
            let Ok(rounds_value) = rounds().trim().parse::<u32>() else {
                error.set(Some(ViewError::local("Rounds must be a number.")));
                return;
            };
            let ai = ctx.ai();
            let mut busy = busy;
            let mut error = error;
            let mut questions = questions;
            let mut history = history;
            spawn(async move {
                busy.set(true);
                error.set(None);
                match ai.mock_interview(&role_value, rounds_value).await {
                    Ok(generated) => {
                        questions.set(generated);
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

    rsx! {
        div { class: "page interview-page",
            header { class: "view-header",
                h2 { class: "view-title", "Mock interview" }
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
                label { "Role"
                    input {
                        r#type: "text",
                        placeholder: "e.g. Backend Engineer",
                        value: "{role()}",
                        oninput: move |evt| role.set(evt.value()),
                    }
                }
                label { "Rounds"
                    input {
                        r#type: "number",
                        min: "1",
                        max: "20",
                        value: "{rounds()}",
                        oninput: move |evt| rounds.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: generate,
                    if busy() { "Generating..." } else { "Generate questions" }
                }
            }

            if !questions().is_empty() {
                section { class: "question-list",
                    h3 { "Questions" }
                    for (i, question) in questions().into_iter().enumerate() {
                        QuestionCard { order: i + 1, question }
                    }
                }
            }

            section { class: "history-panel",
                h3 { "Saved interviews" }
                match history_state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "error-banner", "{err.message()}" }
                    },
                    ViewState::Ready(items) => rsx! {
                        if items.is_empty() {
                            p { class: "empty-note", "No saved interviews yet." }
                        }
                        ul {
                            for item in items {
                                {
                                    let title = item.display_title();
                                    let saved = item.questions();
                                    let count = saved.len();
                                    let mut questions = questions;
                                    rsx! {
                                        li { class: "history-row",
                                            span { "{title} ({count} questions)" }
                                            button {
                                                class: "btn btn-secondary",
                                                r#type: "button",
                                                onclick: move |_| questions.set(saved.clone()),
                                                "Open"
                                            }
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

#[component]
fn QuestionCard(order: usize, question: InterviewQuestion) -> Element {
    let html = markdown_to_html(&question.question);
    rsx! {
        div { class: "question-card",
            div { class: "question-header",
                span { class: "question-order", "Q{order}" }
                if let Some(difficulty) = question.difficulty.as_ref() {
                    span { class: "badge", "{difficulty}" }
                }
            }
            div { class: "markdown-body", dangerous_inner_html: "{html}" }
            if !question.followups.is_empty() {
                ul { class: "followups",
                    for followup in question.followups.iter() {
                        li { "{followup}" }
                    }
                }
            }
        }
    }
}
