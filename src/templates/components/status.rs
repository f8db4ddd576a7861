use crate::browser::{StatusKind, StatusMessage};
use maud::{html, Markup};

pub fn status_line(status: Option<&StatusMessage>) -> Markup {
    let class = match status.map(|s| s.kind) {
        Some(StatusKind::Info) => "status status-info",
        Some(StatusKind::Error) => "status status-error",
        None => "status",
    };

    html! {
        p id="status-message" class=(class) role="status" {
            @if let Some(status) = status {
                (status.text)
            }
        }
    }
}
