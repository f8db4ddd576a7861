use crate::browser::{Action, BrowserState, TradeType};
use maud::{html, Markup};

pub fn search_form(keyword: &str) -> Markup {
    html! {
        form
            id="search-form"
            class="controls"
            method="post"
            action="/search"
            hx-post="/search"
            hx-target="#workspace"
            hx-swap="outerHTML"
            hx-disabled-elt="button"
        {
            label class="sr-only" for="region" { "지역명" }
            input
                type="text"
                id="region"
                name="keyword"
                value=(keyword)
                placeholder="지역명 (예: 강남구)"
                autocomplete="off";

            button type="submit" class="primary" { "지역 검색" }
        }
    }
}

/// Complex and trade-type selectors plus the fetch button.
pub fn fetch_form(state: &BrowserState) -> Markup {
    let fetching = state.is_busy(Action::Fetch);

    html! {
        form
            id="fetch-form"
            class="controls"
            method="post"
            action="/listings"
            hx-post="/listings"
            hx-target="#workspace"
            hx-swap="outerHTML"
            hx-indicator="#loading-overlay"
            hx-disabled-elt="button"
        {
            label class="sr-only" for="complex" { "단지" }
            select id="complex" name="complex_no" disabled[!state.selector_enabled()] {
                option value="" { "단지를 선택하세요" }
                @for complex in &state.complexes {
                    option
                        value=(complex.complex_no)
                        selected[state.selected_complex.as_deref() == Some(complex.complex_no.as_str())]
                    { (complex.label()) }
                }
            }

            label class="sr-only" for="trade-type" { "거래유형" }
            select id="trade-type" name="trade_type" {
                @for trade_type in TradeType::ALL {
                    option
                        value=(trade_type.code())
                        selected[state.trade_type == trade_type.code()]
                    { (trade_type.label()) }
                }
            }

            button type="submit" class="primary" disabled[fetching] { "데이터 수집 시작" }
        }
    }
}

/// Plain form post: the response is either the file or the page with a
/// status message.
pub fn export_form(exporting: bool) -> Markup {
    html! {
        form id="export-form" class="controls" method="post" action="/export" {
            button type="submit" disabled[exporting] { "엑셀 다운로드" }
        }
    }
}
