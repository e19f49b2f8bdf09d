use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use guidance_core::progress::{SortMode, filter_by_domain, sort_paths};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{
    DeadlineRowVm, PathCardVm, StatTilesVm, map_deadline_rows, map_path_cards, map_stat_tiles,
};

#[derive(Clone, Debug, PartialEq)]
struct DashboardData {
    tiles: StatTilesVm,
    cards: Vec<PathCardVm>,
    deadlines: Vec<DeadlineRowVm>,
}

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let paths_service = ctx.paths();
    let today = ctx.clock().today();
    let mut search = use_signal(String::new);
    let mut sort_mode = use_signal(SortMode::default);

    let resource = use_resource(move || {
        let paths_service = paths_service.clone();
        let query = search();
        let mode = sort_mode();
        async move {
            let all = paths_service
                .list_paths()
                .await
                .map_err(ViewError::from)?;
            // Tiles and deadlines always cover everything; the card grid
            // reflects the search and sort controls.
            let tiles = map_stat_tiles(&all);
            let deadlines = map_deadline_rows(&all, today, 5);
            let mut visible = filter_by_domain(&all, &query);
            sort_paths(&mut visible, mode);
            let cards = map_path_cards(&visible, today);
            Ok::<_, ViewError>(DashboardData {
                tiles,
                cards,
                deadlines,
            })
        }
    });

    let state = view_state_from_resource(&resource);
    let sort_value = sort_mode().as_str();
    if let ViewState::Error(err) = &state {
        if err.is_unauthorized() {
            navigator.replace(Route::Login {});
            return rsx! {};
        }
    }

    rsx! {
        div { class: "page dashboard-page",
            header { class: "view-header",
                h2 { class: "view-title", "Dashboard" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let mut resource = resource;
                        resource.restart();
                    },
                    "Refresh"
                }
            }
            div { class: "dashboard-controls",
                input {
                    class: "search-input",
                    r#type: "text",
                    placeholder: "Filter by domain...",
                    value: "{search()}",
                    oninput: move |evt| search.set(evt.value()),
                }
                select {
                    value: "{sort_value}",
                    onchange: move |evt| sort_mode.set(SortMode::from_value(&evt.value())),
                    option { value: "recent", "Most recent" }
                    option { value: "alphabetical", "A to Z" }
                    option { value: "progress", "Progress" }
                }
            }
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
                ViewState::Ready(data) => rsx! {
                    div { class: "stat-tiles",
                        StatTile { label: "Paths", value: data.tiles.paths.clone() }
                        StatTile { label: "Topics", value: data.tiles.topics.clone() }
                        StatTile { label: "Completed", value: data.tiles.completed.clone() }
                        StatTile { label: "Failed", value: data.tiles.failed.clone() }
                        StatTile { label: "Pending", value: data.tiles.pending.clone() }
                        StatTile { label: "Overall", value: data.tiles.progress.clone() }
                    }

                    section { class: "path-grid-section",
                        h3 { "Your learning paths" }
                        if data.cards.is_empty() {
                            p { class: "empty-note",
                                "No paths here yet. "
                                Link { to: Route::CreatePath {}, "Create one" }
                                " to get started."
                            }
                        } else {
                            div { class: "path-grid",
                                for card in data.cards {
                                    PathCard { card }
                                }
                            }
                        }
                    }

                    section { class: "deadline-section",
                        h3 { "Upcoming deadlines" }
                        if data.deadlines.is_empty() {
                            p { class: "empty-note", "Nothing pending." }
                        } else {
                            ul { class: "deadline-list",
                                for row in data.deadlines {
                                    li { class: if row.overdue { "deadline deadline--overdue" } else { "deadline" },
                                        span { class: "deadline-topic", "{row.topic}" }
                                        span { class: "deadline-domain", "{row.domain}" }
                                        span { class: "deadline-date", "{row.due_str}" }
                                        if row.overdue {
                                            span { class: "badge badge--overdue", "Overdue" }
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

#[component]
fn StatTile(label: &'static str, value: String) -> Element {
    rsx! {
        div { class: "stat-tile",
            span { class: "stat-value", "{value}" }
            span { class: "stat-label", "{label}" }
        }
    }
}

#[component]
fn PathCard(card: PathCardVm) -> Element {
    rsx! {
        Link { class: "path-card", to: Route::PathDetails { path_id: card.id },
            h4 { class: "path-card-domain", "{card.domain}" }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {card.percent}%" }
            }
            p { class: "path-card-progress", "{card.progress_label} ({card.percent}%)" }
            p { class: if card.next_overdue { "path-card-next path-card-next--overdue" } else { "path-card-next" },
                "{card.next_label}"
            }
            if card.overdue_count > 0 {
                span { class: "badge badge--overdue", "{card.overdue_count} overdue" }
            }
            if let Some(created) = card.created_str.as_ref() {
                span { class: "path-card-created", "Started {created}" }
            }
        }
    }
}
