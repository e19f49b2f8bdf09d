use std::collections::BTreeMap;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use guidance_core::calendar::{next_month, prev_month, project_events};
use guidance_core::model::{
    AssessmentQuestion, AssessmentSubmission, LearningPath, RegenerateReason, TopicResource,
    TopicStatus,
};
use guidance_core::progress::{NextCheckpoint, next_checkpoint, path_totals, sort_topics_by_start};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    WEEKDAY_LABELS, format_date_opt, map_month, map_questions, map_result_table, markdown_to_html,
};

/// Which overlay is open on top of the detail page. At most one at a time.
#[derive(Clone, Debug, PartialEq)]
enum Modal {
    Quiz(Vec<AssessmentQuestion>),
    Explain(String),
    Resources(Vec<TopicResource>),
    Regenerate,
}

#[component]
pub fn PathDetailsView(path_id: i64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let today = ctx.clock().today();
    let mut anchor = use_signal(|| today);
    let mut selected = use_signal(|| None::<usize>);
    let mut modal = use_signal(|| None::<Modal>);
    let mut quiz_picks = use_signal(BTreeMap::<usize, String>::new);
    let mut regen_reason = use_signal(|| RegenerateReason::Procrastination);
    let mut error = use_signal(|| None::<ViewError>);
    let mut busy = use_signal(|| false);

    let paths_service = ctx.paths();
    let resource = use_resource(move || {
        let paths_service = paths_service.clone();
        async move {
            let mut path = paths_service
                .get_path(path_id)
                .await
                .map_err(ViewError::from)?;
            // Sorted once here; every later index lookup relies on this order.
            sort_topics_by_start(&mut path.path);
            Ok::<_, ViewError>(path)
        }
    });

    let state = view_state_from_resource(&resource);
    if let ViewState::Error(err) = &state {
        if err.is_unauthorized() {
            navigator.replace(Route::Login {});
            return rsx! {};
        }
    }

    rsx! {
        div { class: "page details-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error-banner", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
                ViewState::Ready(path) => {
                    let totals = path_totals(&path.path, today);
                    let checkpoint = next_checkpoint(&path.path, today);
                    let events = project_events(&path.path, today);
                    let month = map_month(anchor(), &events, today);
                    let selected_index = selected().filter(|&i| i < path.path.len());
                    let ctx = ctx.clone();

                    rsx! {
                        header { class: "view-header",
                            h2 { class: "view-title", "{path.domain}" }
                            span { class: "view-subtitle",
                                "{totals.completed} of {totals.total} topics done ({totals.progress}%)"
                            }
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

                        match checkpoint {
                            NextCheckpoint::AllCompleted => rsx! {
                                p { class: "checkpoint checkpoint--done", "All topics completed." }
                            },
                            NextCheckpoint::Upcoming { label, due, overdue, .. } => {
                                let due_str = format_date_opt(due);
                                rsx! {
                                    p { class: if overdue { "checkpoint checkpoint--overdue" } else { "checkpoint" },
                                        "Next up: {label} (due {due_str})"
                                        if overdue {
                                            span { class: "badge badge--overdue", "Overdue" }
                                        }
                                    }
                                }
                            }
                        }

                        section { class: "calendar-section",
                            div { class: "calendar-toolbar",
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| anchor.set(prev_month(anchor())),
                                    "Prev"
                                }
                                h3 { class: "calendar-title", "{month.title}" }
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| anchor.set(today),
                                    "Today"
                                }
                                button {
                                    class: "btn btn-secondary",
                                    r#type: "button",
                                    onclick: move |_| anchor.set(next_month(anchor())),
                                    "Next"
                                }
                            }
                            div { class: "calendar-grid",
                                for label in WEEKDAY_LABELS {
                                    span { class: "calendar-weekday", "{label}" }
                                }
                                for week in month.weeks {
                                    for cell in week {
                                        div {
                                            class: if cell.in_month {
                                                if cell.is_today { "day day--today" } else { "day" }
                                            } else {
                                                "day day--outside"
                                            },
                                            span { class: "day-number", "{cell.day_label}" }
                                            for chip in cell.events {
                                                {
                                                    let topic_index = chip.topic_index;
                                                    rsx! {
                                                        button {
                                                            class: "{chip.status_class}",
                                                            r#type: "button",
                                                            onclick: move |_| selected.set(Some(topic_index)),
                                                            "{chip.label}"
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        section { class: "topics-section",
                            h3 { "Topics" }
                            if path.path.is_empty() {
                                p { class: "empty-note", "This path has no topics yet." }
                            }
                            ul { class: "topic-list",
                                for (index, topic) in path.path.iter().enumerate() {
                                    {
                                        let row_class = if selected_index == Some(index) {
                                            "topic-row topic-row--selected"
                                        } else {
                                            "topic-row"
                                        };
                                        let order = index + 1;
                                        let name = topic.topic.clone();
                                        let status = topic.status;
                                        let status_label = status.as_str();
                                        let start = format_date_opt(topic.start_date);
                                        let due = format_date_opt(topic.end_date);
                                        let toggle = toggle_status_action(
                                            &ctx, &resource, navigator, path_id, &path, index,
                                            busy, error,
                                        );
                                        rsx! {
                                            li { class: "{row_class}",
                                                button {
                                                    class: "topic-select",
                                                    r#type: "button",
                                                    onclick: move |_| selected.set(Some(index)),
                                                    span { class: "topic-order", "{order}." }
                                                    span { class: "topic-name", "{name}" }
                                                    span { class: "topic-dates", "{start} to {due}" }
                                                    span { class: "badge badge--{status_label}", "{status_label}" }
                                                }
                                                button {
                                                    class: "btn btn-secondary",
                                                    r#type: "button",
                                                    disabled: busy(),
                                                    onclick: toggle,
                                                    if status == TopicStatus::Completed { "Undo" } else { "Done" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }

                        if let Some(index) = selected_index {
                            TopicPanel {
                                path: path.clone(),
                                path_id,
                                index,
                                busy,
                                error,
                                modal,
                                quiz_picks,
                            }
                        }

                        if let Some(open) = modal() {
                            match open {
                                Modal::Quiz(questions) => rsx! {
                                    QuizModal {
                                        path: path.clone(),
                                        path_id,
                                        index: selected_index.unwrap_or(0),
                                        questions,
                                        busy,
                                        error,
                                        modal,
                                        quiz_picks,
                                        on_graded: move |_| {
                                            let mut resource = resource;
                                            resource.restart();
                                        },
                                    }
                                },
                                Modal::Explain(text) => {
                                    let html = markdown_to_html(&text);
                                    rsx! {
                                    div { class: "modal-overlay",
                                        onclick: move |_| modal.set(None),
                                        div { class: "modal",
                                            onclick: move |evt| evt.stop_propagation(),
                                            h3 { "Explanation" }
                                            div {
                                                class: "markdown-body",
                                                dangerous_inner_html: "{html}",
                                            }
                                            button {
                                                class: "btn btn-secondary",
                                                r#type: "button",
                                                onclick: move |_| modal.set(None),
                                                "Close"
                                            }
                                        }
                                    }
                                    }
                                }
                                Modal::Resources(resources) => rsx! {
                                    div { class: "modal-overlay",
                                        onclick: move |_| modal.set(None),
                                        div { class: "modal",
                                            onclick: move |evt| evt.stop_propagation(),
                                            h3 { "Resources" }
                                            if resources.is_empty() {
                                                p { class: "empty-note", "No suggestions came back." }
                                            }
                                            ul { class: "resource-list",
                                                for resource_item in resources {
                                                    li {
                                                        if let Some(url) = resource_item.url.as_ref() {
                                                            a { href: "{url}", "{resource_item.title}" }
                                                        } else {
                                                            span { "{resource_item.title}" }
                                                        }
                                                        if let Some(kind) = resource_item.kind.as_ref() {
                                                            span { class: "resource-kind", " ({kind})" }
                                                        }
                                                        if let Some(desc) = resource_item.description.as_ref() {
                                                            p { class: "resource-desc", "{desc}" }
                                                        }
                                                    }
                                                }
                                            }
                                            button {
                                                class: "btn btn-secondary",
                                                r#type: "button",
                                                onclick: move |_| modal.set(None),
                                                "Close"
                                            }
                                        }
                                    }
                                },
                                Modal::Regenerate => {
                                    let from_index = selected_index.unwrap_or(0);
                                    let from_label = from_index + 1;
                                    let regenerate = regenerate_action(
                                        &ctx, &resource, navigator, path_id, from_index,
                                        regen_reason, busy, error, modal,
                                    );
                                    rsx! {
                                        div { class: "modal-overlay",
                                            onclick: move |_| modal.set(None),
                                            div { class: "modal",
                                                onclick: move |evt| evt.stop_propagation(),
                                                h3 { "Re-plan remaining topics" }
                                                p {
                                                    "Topics from position {from_label} on get a fresh schedule."
                                                }
                                                label {
                                                    input {
                                                        r#type: "radio",
                                                        name: "regen-reason",
                                                        checked: regen_reason() == RegenerateReason::Procrastination,
                                                        onchange: move |_| regen_reason.set(RegenerateReason::Procrastination),
                                                    }
                                                    "I fell behind schedule"
                                                }
                                                label {
                                                    input {
                                                        r#type: "radio",
                                                        name: "regen-reason",
                                                        checked: regen_reason() == RegenerateReason::Failure,
                                                        onchange: move |_| regen_reason.set(RegenerateReason::Failure),
                                                    }
                                                    "I failed an assessment"
                                                }
                                                div { class: "modal-actions",
                                                    button {
                                                        class: "btn btn-secondary",
                                                        r#type: "button",
                                                        onclick: move |_| modal.set(None),
                                                        "Cancel"
                                                    }
                                                    button {
                                                        class: "btn btn-primary",
                                                        r#type: "button",
                                                        disabled: busy(),
                                                        onclick: regenerate,
                                                        "Regenerate"
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Flips one topic between completed and pending, then reloads the path.
fn toggle_status_action(
    ctx: &AppContext,
    resource: &Resource<Result<LearningPath, ViewError>>,
    navigator: dioxus_router::Navigator,
    path_id: i64,
    path: &LearningPath,
    index: usize,
    busy: Signal<bool>,
    error: Signal<Option<ViewError>>,
) -> impl FnMut(Event<MouseData>) + 'static {
    let paths = ctx.paths();
    let resource = *resource;
    let topics = path.path.clone();
    move |_| {
        if busy() {
            return;
        }
        let paths = paths.clone();
        let mut topics = topics.clone();
        let mut busy = busy;
        let mut error = error;
        let mut resource = resource;
        if let Some(topic) = topics.get_mut(index) {
            topic.status = if topic.is_completed() {
                TopicStatus::Pending
            } else {
                TopicStatus::Completed
            };
        }
        spawn(async move {
            busy.set(true);
            error.set(None);
            match paths.update_path(path_id, &topics).await {
                Ok(_) => resource.restart(),
                Err(err) if err.is_unauthorized() => {
                    navigator.replace(Route::Login {});
                }
                Err(err) => error.set(Some(err.into())),
            }
            busy.set(false);
        });
    }
}

/// Asks the backend to re-plan the rest of the path, then reloads.
#[allow(clippy::too_many_arguments)]
fn regenerate_action(
    ctx: &AppContext,
    resource: &Resource<Result<LearningPath, ViewError>>,
    navigator: dioxus_router::Navigator,
    path_id: i64,
    from_index: usize,
    regen_reason: Signal<RegenerateReason>,
    busy: Signal<bool>,
    error: Signal<Option<ViewError>>,
    modal: Signal<Option<Modal>>,
) -> impl FnMut(Event<MouseData>) + 'static {
    let paths = ctx.paths();
    let resource = *resource;
    move |_| {
        if busy() {
            return;
        }
        let paths = paths.clone();
        let reason = regen_reason();
        let mut busy = busy;
        let mut error = error;
        let mut modal = modal;
        let mut resource = resource;
        spawn(async move {
            busy.set(true);
            error.set(None);
            match paths.regenerate(path_id, from_index, reason).await {
                Ok(_) => {
                    modal.set(None);
                    resource.restart();
                }
                Err(err) if err.is_unauthorized() => {
                    navigator.replace(Route::Login {});
                }
                Err(err) => error.set(Some(err.into())),
            }
            busy.set(false);
        });
    }
}

/// Detail panel for the selected topic: schedule, AI actions, stored result.
#[component]
#[allow(clippy::too_many_arguments)]
fn TopicPanel(
    path: LearningPath,
    path_id: i64,
    index: usize,
    busy: Signal<bool>,
    error: Signal<Option<ViewError>>,
    modal: Signal<Option<Modal>>,
    quiz_picks: Signal<BTreeMap<usize, String>>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut modal = modal;
    let Some(topic) = path.path.get(index) else {
        return rsx! {};
    };
    let result_table = map_result_table(topic);
    let status_label = topic.status.as_str();
    let start = format_date_opt(topic.start_date);
    let due = format_date_opt(topic.end_date);

    let quiz = {
        let paths = ctx.paths();
        move |_| {
            if busy() {
                return;
            }
            let paths = paths.clone();
            let mut busy = busy;
            let mut error = error;
            let mut modal = modal;
            let mut quiz_picks = quiz_picks;
            spawn(async move {
                busy.set(true);
                error.set(None);
                match paths.generate_assessment(path_id, index).await {
                    Ok(questions) => {
                        quiz_picks.set(BTreeMap::new());
                        modal.set(Some(Modal::Quiz(questions)));
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

    let explain = {
        let paths = ctx.paths();
        move |_| {
            if busy() {
                return;
            }
            let paths = paths.clone();
            let mut busy = busy;
            let mut error = error;
            let mut modal = modal;
            spawn(async move {
                busy.set(true);
                error.set(None);
                match paths.explain(path_id, index).await {
                    Ok(text) => modal.set(Some(Modal::Explain(text))),
                    Err(err) if err.is_unauthorized() => {
                        navigator.replace(Route::Login {});
                    }
                    Err(err) => error.set(Some(err.into())),
                }
                busy.set(false);
            });
        }
    };

    let resources = {
        let paths = ctx.paths();
        move |_| {
            if busy() {
                return;
            }
            let paths = paths.clone();
            let mut busy = busy;
            let mut error = error;
            let mut modal = modal;
            spawn(async move {
                busy.set(true);
                error.set(None);
                match paths.resources(path_id, index).await {
                    Ok(list) => modal.set(Some(Modal::Resources(list))),
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
        section { class: "topic-panel",
            h3 { "{topic.topic}" }
            p { class: "topic-panel-meta",
                "{start} to {due}"
                " | {topic.duration} days"
                " | "
                span { class: "badge badge--{status_label}", "{status_label}" }
            }
            div { class: "topic-panel-actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: quiz,
                    "Take quiz"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: explain,
                    "Explain"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: resources,
                    "Resources"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: busy(),
                    onclick: move |_| modal.set(Some(Modal::Regenerate)),
                    "Re-plan from here"
                }
            }
            if let Some(table) = result_table {
                div { class: "result-table",
                    h4 { "Last assessment" }
                    p { class: "result-score", "{table.score_label}" }
                    table {
                        thead {
                            tr {
                                th { "Question" }
                                th { "Your answer" }
                                th { "Correct answer" }
                                th { "" }
                            }
                        }
                        tbody {
                            for row in table.rows {
                                tr { class: if row.correct { "result-row--correct" } else { "result-row--wrong" },
                                    td { "{row.question}" }
                                    td { "{row.user_answer}" }
                                    td { "{row.correct_answer}" }
                                    td { if row.correct { "✓" } else { "✗" } }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Quiz overlay: radio options per question, graded server-side on submit.
#[component]
#[allow(clippy::too_many_arguments)]
fn QuizModal(
    path: LearningPath,
    path_id: i64,
    index: usize,
    questions: Vec<AssessmentQuestion>,
    busy: Signal<bool>,
    error: Signal<Option<ViewError>>,
    modal: Signal<Option<Modal>>,
    quiz_picks: Signal<BTreeMap<usize, String>>,
    on_graded: Callback<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let mut modal = modal;
    let topic_name = path
        .path
        .get(index)
        .map(|t| t.topic.clone())
        .unwrap_or_default();
    let question_vms = map_questions(&questions);

    let submit = {
        let paths = ctx.paths();
        let questions = questions.clone();
        let topic_name = topic_name.clone();
        move |_| {
            if busy() {
                return;
            }
            let paths = paths.clone();
            let submission =
                AssessmentSubmission::from_selections(topic_name.clone(), &questions, &quiz_picks());
            let mut busy = busy;
            let mut error = error;
            let mut modal = modal;
            spawn(async move {
                busy.set(true);
                error.set(None);
                match paths.evaluate_assessment(path_id, index, &submission).await {
                    Ok(_) => {
                        modal.set(None);
                        on_graded.call(());
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
        div { class: "modal-overlay",
            div { class: "modal modal--quiz",
                h3 { "Quiz: {topic_name}" }
                for question in question_vms {
                    {
                        let prompt = format!("{}. {}", question.index + 1, question.question);
                        let question_index = question.index;
                        let options = question.options.clone();
                        rsx! {
                            div { class: "quiz-question",
                                p { class: "quiz-prompt", "{prompt}" }
                                for (key, text) in options {
                                    {
                                        let option_key = key.clone();
                                        let option_label = format!("{}: {text}", key.to_uppercase());
                                        let picked = quiz_picks()
                                            .get(&question_index)
                                            .is_some_and(|k| *k == key);
                                        rsx! {
                                            label { class: "quiz-option",
                                                input {
                                                    r#type: "radio",
                                                    name: "quiz-{question_index}",
                                                    checked: picked,
                                                    onchange: move |_| {
                                                        let mut quiz_picks = quiz_picks;
                                                        quiz_picks.write().insert(question_index, option_key.clone());
                                                    },
                                                }
                                                "{option_label}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                div { class: "modal-actions",
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| modal.set(None),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: busy(),
                        onclick: submit,
                        if busy() { "Grading..." } else { "Submit answers" }
                    }
                }
            }
        }
    }
}
