use crate::browser::{Action, BrowserState};
use crate::templates::components::{export_form, fetch_form, listing_table, status_line};
use maud::{html, Markup};

/// Everything an action can change. Each action response swaps this whole
/// fragment.
pub fn workspace(state: &BrowserState) -> Markup {
    html! {
        section id="workspace" class="card" {
            (status_line(state.status.as_ref()))
            (fetch_form(state))
            (export_form(state.is_busy(Action::Export)))
            (listing_table(&state.table))
        }
    }
}

/// Shown by htmx while a listing fetch is in flight, and on a full render
/// if the session still has one running.
pub fn loading_overlay(visible: bool) -> Markup {
    let class = if visible {
        "loading-overlay htmx-indicator visible"
    } else {
        "loading-overlay htmx-indicator"
    };

    html! {
        div id="loading-overlay" class=(class) aria-live="polite" {
            div class="spinner" {}
            p { "데이터를 수집하는 중입니다..." }
        }
    }
}
