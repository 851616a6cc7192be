use crate::domain::listing::ListingCard;
use crate::locale::Locale;
use maud::{html, Markup};

pub fn listing_card(card: &ListingCard, locale: Locale) -> Markup {
    html! {
        article.card.listing-card.featured[card.is_featured] data-id=(card.id) {
            div class="card-media" {
                img src=(card.image) alt=(card.name) loading="lazy";
                div class="price-badge" {
                    (format!("{:.0}", card.price)) " " (locale.t(card.price_unit_key()))
                }
                @if card.discount_percentage > 0.0 {
                    div class="discount-badge" { "-" (format!("{:.0}", card.discount_percentage)) "%" }
                }
            }

            div class="card-body" {
                div class="card-title" {
                    h3 { (card.name) }
                    span class="rating" {
                        (format!("{:.1}", card.rating))
                        img src="/static/icons/star.svg" alt="Rating" width="16" height="16";
                    }
                }
                @if let Some(location) = &card.location {
                    p class="location" { (location) }
                }
                ul class="specs" {
                    li { (card.guests) " " (locale.t("yacht.guests")) }
                    li { (card.cabins) " " (locale.t("yacht.cabins")) }
                    li { (card.length) " " (locale.t("yacht.length")) }
                }
                button class="btn primary" type="button" { (locale.t("categories.book_now")) }
            }
        }
    }
}
