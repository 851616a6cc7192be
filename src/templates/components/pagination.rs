use crate::domain::pagination::Pagination;
use crate::locale::Locale;
use maud::{html, Markup};

/// Page buttons. Each asks for one page of the live search; the other filters stay as they are.
pub fn pagination(p: &Pagination, locale: Locale) -> Markup {
    let target = format!("/{}/listings", locale.code());

    html! {
        @if p.pages > 1 {
            nav class="pagination" aria-label="Pagination" {
                @for page in p.page_numbers() {
                    @if p.is_current(page) {
                        button type="button" class="page current" aria-current="page" disabled { (page) }
                    } @else {
                        button
                            type="button"
                            class="page"
                            hx-get={ (target) "?pageNumber=" (page) }
                            hx-target="#results"
                            hx-swap="innerHTML show:none"
                        { (page) }
                    }
                }
            }
        }
    }
}
