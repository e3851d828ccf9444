use maud::{html, Markup};

/// Titled panel; `anchor` becomes the element id so pages can link to it.
pub fn card(title: &str, anchor: &str, body: Markup) -> Markup {
    html! {
        section class="card" id=(anchor) {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}
