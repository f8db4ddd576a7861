use maud::{html, Markup, DOCTYPE};

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ko" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/static/main.css";
                script src=(HTMX_SRC) defer {}
            }
            body {
                header class="site-header" {
                    svg
                        class="brand-icon"
                        xmlns="http://www.w3.org/2000/svg"
                        viewBox="0 0 24 24"
                        width="24"
                        height="24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        aria-hidden="true"
                    {
                        // apartment block
                        path d="M3 21h18" {}
                        path d="M5 21V5a2 2 0 0 1 2-2h10a2 2 0 0 1 2 2v16" {}
                        @for y in ["8", "12", "16"] {
                            path d=(format!("M9 {y}h1M14 {y}h1")) {}
                        }
                    }
                    h3 { "부동산 매물 조회" }
                    nav {
                        ul {
                            li { a href="/" { "처음으로" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
