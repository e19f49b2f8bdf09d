use dioxus::prelude::*;
use dioxus_router::use_navigator;

use guidance_core::model::ChatMessage;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SessionRowVm, map_session_rows, map_transcript};

#[component]
pub fn ChatTutorView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut transcript = use_signal(Vec::<ChatMessage>::new);
    let mut session_id = use_signal(|| None::<i64>);
    let mut input = use_signal(String::new);
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);
    let mut rename_target = use_signal(|| None::<(i64, String)>);
    let mut delete_target = use_signal(|| None::<i64>);

    let ai_for_sessions = ctx.ai();
    let sessions = use_resource(move || {
        let ai = ai_for_sessions.clone();
        async move {
            let items = ai.list_sessions().await.map_err(ViewError::from)?;
            Ok::<_, ViewError>(map_session_rows(&items))
        }
    });

    let sessions_state = view_state_from_resource(&sessions);
    if let ViewState::Error(err) = &sessions_state {
        if err.is_unauthorized() {
            navigator.replace(Route::Login {});
            return rsx! {};
        }
    }

    let send = {
        let ctx = ctx.clone();
        move |_| {
            if busy() {
                return;
            }
            let text = input().trim().to_string();
            if text.is_empty() {
                return;
            }
            let ai = ctx.ai();
            let active = session_id();
            // Optimistic append; rolled back below if the call fails.
            let message = ChatMessage::user(text.clone());
            transcript.write().push(message.clone());
            input.set(String::new());
            let mut sessions = sessions;
            let mut transcript = transcript;
            let mut session_id = session_id;
            let mut input = input;
            let mut busy = busy;
            let mut error = error;
            spawn(async move {
                busy.set(true);
                error.set(None);
                match ai.chat(&message, active).await {
                    Ok(reply) => {
                        if let Some(content) = reply.content() {
                            transcript.write().push(ChatMessage::assistant(content));
                        }
                        if reply.session_id.is_some() && reply.session_id != active {
                            session_id.set(reply.session_id);
                            sessions.restart();
                        }
                    }
                    Err(err) if err.is_unauthorized() => {
                        navigator.replace(Route::Login {});
                    }
                    Err(err) => {
                        // The message never made it: take it back out of the
                        // transcript and put the text back in the box.
                        transcript.write().pop();
                        input.set(text);
                        error.set(Some(err.into()));
                    }
                }
                busy.set(false);
            });
        }
    };

    let message_vms = map_transcript(&transcript());

    rsx! {
        div { class: "page chat-page",
            aside { class: "chat-sidebar",
                div { class: "chat-sidebar-header",
                    h3 { "Sessions" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            transcript.set(Vec::new());
                            session_id.set(None);
                            error.set(None);
                        },
                        "New Chat"
                    }
                }
                match sessions_state {
                    ViewState::Idle | ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "error-banner", "{err.message()}" }
                    },
                    ViewState::Ready(rows) => rsx! {
                        if rows.is_empty() {
                            p { class: "empty-note", "No saved sessions yet." }
                        }
                        ul { class: "session-list",
                            for row in rows {
                                SessionRow {
                                    row,
                                    active: session_id(),
                                    transcript,
                                    session_id,
                                    error,
                                    rename_target,
                                    delete_target,
                                }
                            }
                        }
                    },
                }
            }

            section { class: "chat-main",
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
                div { class: "chat-transcript",
                    if message_vms.is_empty() {
                        p { class: "empty-note", "Ask the tutor anything about your path." }
                    }
                    for message in message_vms {
                        div { class: "{message.role_class}",
                            if let Some(plain) = message.plain.as_ref() {
                                p { "{plain}" }
                            }
                            if let Some(html) = message.html.as_ref() {
                                div { class: "markdown-body", dangerous_inner_html: "{html}" }
                            }
                        }
                    }
                    if busy() {
                        p { class: "chat-pending", "Thinking..." }
                    }
                }
                div { class: "chat-composer",
                    input {
                        class: "chat-input",
                        r#type: "text",
                        placeholder: "Ask a question...",
                        value: "{input()}",
                        oninput: move |evt| input.set(evt.value()),
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy(),
                        onclick: send,
                        "Send"
                    }
                }
            }

            if let Some((target_id, draft)) = rename_target() {
                RenameModal {
                    target_id,
                    draft,
                    busy,
                    error,
                    rename_target,
                    on_renamed: move |_| {
                        let mut sessions = sessions;
                        sessions.restart();
                    },
                }
            }
            if let Some(target_id) = delete_target() {
                DeleteModal {
                    target_id,
                    busy,
                    error,
                    session_id,
                    transcript,
                    delete_target,
                    on_deleted: move |_| {
                        let mut sessions = sessions;
                        sessions.restart();
                    },
                }
            }
        }
    }
}

#[component]
#[allow(clippy::too_many_arguments)]
fn SessionRow(
    row: SessionRowVm,
    active: Option<i64>,
    transcript: Signal<Vec<ChatMessage>>,
    session_id: Signal<Option<i64>>,
    error: Signal<Option<ViewError>>,
    rename_target: Signal<Option<(i64, String)>>,
    delete_target: Signal<Option<i64>>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut rename_target = rename_target;
    let mut delete_target = delete_target;
    let row_id = row.id;
    let title = row.title.clone();
    let title_for_rename = row.title.clone();
    let row_class = if active == Some(row_id) {
        "session-row session-row--active"
    } else {
        "session-row"
    };

    let open = move |_| {
        let ai = ctx.ai();
        let mut transcript = transcript;
        let mut session_id = session_id;
        let mut error = error;
        spawn(async move {
            error.set(None);
            match ai.get_session(row_id).await {
                Ok(session) => {
                    transcript.set(session.messages);
                    session_id.set(Some(session.id));
                }
                Err(err) if err.is_unauthorized() => {
                    navigator.replace(Route::Login {});
                }
                Err(err) => error.set(Some(err.into())),
            }
        });
    };

    rsx! {
        li { class: "{row_class}",
            button {
                class: "session-open",
                r#type: "button",
                onclick: open,
                "{title}"
            }
            button {
                class: "session-action",
                r#type: "button",
                onclick: move |_| rename_target.set(Some((row_id, title_for_rename.clone()))),
                "Rename"
            }
            button {
                class: "session-action session-action--danger",
                r#type: "button",
                onclick: move |_| delete_target.set(Some(row_id)),
                "Delete"
            }
        }
    }
}

#[component]
fn RenameModal(
    target_id: i64,
    draft: String,
    busy: Signal<bool>,
    error: Signal<Option<ViewError>>,
    rename_target: Signal<Option<(i64, String)>>,
    on_renamed: Callback<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut rename_target = rename_target;
    let mut error = error;

    let confirm = move |_| {
        if busy() {
            return;
        }
        let ai = ctx.ai();
        let Some((_, title)) = rename_target() else {
            return;
        };
        let title = title.trim().to_string();
        if title.is_empty() {
            error.set(Some(ViewError::local("A session title cannot be empty.")));
            return;
        }
        let mut busy = busy;
        let mut error = error;
        let mut rename_target = rename_target;
        spawn(async move {
            busy.set(true);
            error.set(None);
            match ai.rename_session(target_id, &title).await {
                Ok(()) => {
                    rename_target.set(None);
                    on_renamed.call(());
                }
                Err(err) if err.is_unauthorized() => {
                    navigator.replace(Route::Login {});
                }
                Err(err) => error.set(Some(err.into())),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "modal-overlay",
            onclick: move |_| rename_target.set(None),
            div { class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { "Rename session" }
                input {
                    r#type: "text",
                    value: "{draft}",
                    oninput: move |evt| {
                        let mut rename_target = rename_target;
                        rename_target.set(Some((target_id, evt.value())));
                    },
                }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| rename_target.set(None),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy(),
                        onclick: confirm,
                        "Save"
                    }
                }
            }
        }
    }
}

#[component]
#[allow(clippy::too_many_arguments)]
fn DeleteModal(
    target_id: i64,
    busy: Signal<bool>,
    error: Signal<Option<ViewError>>,
    session_id: Signal<Option<i64>>,
    transcript: Signal<Vec<ChatMessage>>,
    delete_target: Signal<Option<i64>>,
    on_deleted: Callback<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut delete_target = delete_target;

    let confirm = move |_| {
        if busy() {
            return;
        }
        let ai = ctx.ai();
        let mut busy = busy;
        let mut error = error;
        let mut session_id = session_id;
        let mut transcript = transcript;
        let mut delete_target = delete_target;
        spawn(async move {
            busy.set(true);
            error.set(None);
            match ai.delete_session(target_id).await {
                Ok(()) => {
                    if session_id() == Some(target_id) {
                        session_id.set(None);
                        transcript.set(Vec::new());
                    }
                    delete_target.set(None);
                    on_deleted.call(());
                }
                Err(err) if err.is_unauthorized() => {
                    navigator.replace(Route::Login {});
                }
                Err(err) => error.set(Some(err.into())),
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "modal-overlay",
            onclick: move |_| delete_target.set(None),
            div { class: "modal",
                onclick: move |evt| evt.stop_propagation(),
                h3 { "Delete session?" }
                p { "The transcript is gone for good once deleted." }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| delete_target.set(None),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy(),
                        onclick: confirm,
                        "Delete"
                    }
                }
            }
        }
    }
}
