use maud::{html, Markup};

/// Inline error next to the section it concerns.
pub fn error_box(message: &str) -> Markup {
    html! {
        div class="error-box" role="alert" {
            p { (message) }
        }
    }
}
