use maud::{html, Markup, DOCTYPE};

/// Page shell. `head_extra` lands at the end of `<head>` (meta tags and the like).
pub fn desktop_layout(title: &str, head_extra: Markup, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
                (head_extra)
            }
            body {
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    h3 { "Listing Feeds" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/partners" { "Partners" } }
                        }
                    }
                }
                main class="px-6 py-4" {
                    (content)
                }
            }
        }
    }
}
