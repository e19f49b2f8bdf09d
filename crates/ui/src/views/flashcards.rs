use dioxus::prelude::*;
use dioxus_router::use_navigator;

use guidance_core::model::Flashcard;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn FlashcardsView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut topic = use_signal(String::new);
    let mut cards = use_signal(Vec::<Flashcard>::new);
    let mut position = use_signal(|| 0usize);
    let mut show_answer = use_signal(|| false);
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let ai_for_history = ctx.ai();
    let history = use_resource(move || {
        let ai = ai_for_history.clone();
        async move {
            let items = ai
                .list_flashcard_collections()
                .await
                .map_err(ViewError::from)?;
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
            let topic_value = topic().trim().to_string();
            if topic_value.is_empty() {
                error.set(Some(ViewError::local("A topic is required.")));
                return;
            }
            let ai = ctx.ai();
            let mut busy = busy;
            let mut error = error;
            let mut cards = cards;
            let mut position = position;
            let mut show_answer = show_answer;
            let mut history = history;
            spawn(async move {
                busy.set(true);
                error.set(None);
                match ai.flashcards(&topic_value, 10).await {
                    Ok(generated) => {
                        cards.set(generated);
                        position.set(0);
                        show_answer.set(false);
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

    let deck = cards();
    let total = deck.len();
    let current = deck.get(position().min(total.saturating_sub(1))).cloned();
    let position_label = if total == 0 {
        String::new()
    } else {
        format!("{} / {total}", position().min(total - 1) + 1)
    };

    rsx! {
        div { class: "page flashcards-page",
            header { class: "view-header",
                h2 { class: "view-title", "Flashcards" }
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
                label { "Topic"
                    input {
                        r#type: "text",
                        placeholder: "e.g. SQL joins",
                        value: "{topic()}",
                        oninput: move |evt| topic.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: generate,
                    if busy() { "Generating..." } else { "Generate cards" }
                }
            }

            if let Some(card) = current {
                section { class: "card-pager",
                    span { class: "card-position", "{position_label}" }
                    button {
                        class: "flashcard",
                        r#type: "button",
                        onclick: move |_| show_answer.set(!show_answer()),
                        if show_answer() {
                            p { class: "flashcard-answer", "{card.a}" }
                        } else {
                            p { class: "flashcard-question", "{card.q}" }
                        }
                        span { class: "flashcard-hint",
                            if show_answer() { "Tap for the question" } else { "Tap to reveal" }
                        }
                    }
                    div { class: "pager-controls",
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: position() == 0,
                            onclick: move |_| {
                                position.set(position().saturating_sub(1));
                                show_answer.set(false);
                            },
                            "Prev"
                        }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            disabled: total == 0 || position() + 1 >= total,
                            onclick: move |_| {
                                position.set(position() + 1);
                                show_answer.set(false);
                            },
                            "Next"
                        }
                    }
                }
            }

            section { class: "history-panel",
                h3 { "Saved collections" }
                match history_state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "error-banner", "{err.message()}" }
                    },
                    ViewState::Ready(items) => rsx! {
                        if items.is_empty() {
                            p { class: "empty-note", "No saved collections yet." }
                        }
                        ul {
                            for item in items {
                                {
                                    let title = item.display_title();
                                    let saved = item.cards();
                                    let count = saved.len();
                                    let mut cards = cards;
                                    let mut position = position;
                                    let mut show_answer = show_answer;
                                    rsx! {
                                        li { class: "history-row",
                                            span { "{title} ({count} cards)" }
                                            button {
                                                class: "btn btn-secondary",
                                                r#type: "button",
                                                disabled: count == 0,
                                                onclick: move |_| {
                                                    cards.set(saved.clone());
                                                    position.set(0);
                                                    show_answer.set(false);
                                                },
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
