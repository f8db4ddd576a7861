use crate::browser::{Action, BrowserState};
use crate::templates::components::{loading_overlay, search_form, workspace};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn browser_page(state: &BrowserState) -> Markup {
    desktop_layout(
        "부동산 매물 조회",
        html! {
            main class="container" {
                h1 { "부동산 매물 조회" }
                (search_form(&state.keyword))
                (workspace(state))
            }
            (loading_overlay(state.is_busy(Action::Fetch)))
        },
    )
}
