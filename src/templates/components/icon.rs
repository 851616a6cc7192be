use crate::domain::icon::Icon;
use maud::{html, Markup};

/// Only our own asset paths ever reach the `src` attribute.
pub fn icon_img(icon: Icon, alt: &str) -> Markup {
    html! {
        img class="icon" src=(icon.asset_path()) alt=(alt) width="40" height="40";
    }
}
