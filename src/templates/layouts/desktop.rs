use crate::domain::icon::Icon;
use crate::locale::{Locale, LOCALES};
use crate::templates::components::icon_img;
use maud::{html, Markup, DOCTYPE};

#[derive(Debug, Clone, PartialEq)]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub icon: Icon,
}

/// Everything the shell around a page needs to know.
pub struct Chrome<'a> {
    pub locale: Locale,
    pub title: &'a str,
    /// Path and query of the current page, used for the language switch.
    pub current: &'a str,
    pub signed_in: bool,
    pub nav: Vec<NavItem>,
}

const DEFAULT_NAV: &[(&str, Icon)] = &[
    ("categories.yachts", Icon::Yacht),
    ("categories.watersports", Icon::Watersports),
    ("categories.helicopters", Icon::Helicopter),
    ("categories.desert", Icon::Desert),
];

const FOOTER_LINKS: &[(&str, &str)] = &[
    ("categories.contact_us", "/contact"),
    ("categories.manage_bookings", "/bookings"),
    ("categories.privacy_policy", "/privacy"),
    ("categories.terms_and_conditions", "/terms"),
    ("categories.help_center", "/help"),
];

/// The four fixed categories, all pointing at the listings page.
pub fn default_nav(locale: Locale) -> Vec<NavItem> {
    DEFAULT_NAV
        .iter()
        .map(|(key, icon)| NavItem {
            label: locale.t(key).to_string(),
            href: format!("/{}", locale.code()),
            icon: *icon,
        })
        .collect()
}

pub fn desktop_layout(chrome: &Chrome, content: Markup) -> Markup {
    let locale = chrome.locale;

    html! {
        (DOCTYPE)
        html lang=(locale.code()) dir=(locale.dir()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (chrome.title) }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
                script src="/static/htmx.js" defer {};
            }
            body {
                header class="site-header" {
                    div class="header-top" {
                        a href={ "/" (locale.code()) } class="logo" {
                            img src="/static/logo.png" alt="Enjoy Spot";
                        }

                        div class="header-actions" {
                            nav class="locale-switch" aria-label="Language" {
                                @for other in LOCALES {
                                    @if *other == locale {
                                        span class="active" { (other.code().to_uppercase()) }
                                    } @else {
                                        a href=(other.switch_path(chrome.current)) hreflang=(other.code()) {
                                            (other.code().to_uppercase())
                                        }
                                    }
                                }
                            }

                            @if chrome.signed_in {
                                form method="post" action={ "/" (locale.code()) "/sign-out" } class="inline" {
                                    button type="submit" class="btn" { (locale.t("common.logout")) }
                                }
                            } @else {
                                a href={ "/" (locale.code()) "/sign-in" } class="btn primary" {
                                    (locale.t("common.login"))
                                }
                            }
                        }
                    }

                    nav class="categories" {
                        @for item in &chrome.nav {
                            a href=(item.href) class="category" {
                                (icon_img(item.icon, &item.label))
                                span { (item.label) }
                            }
                        }
                    }
                }

                main { (content) }

                footer class="site-footer" {
                    nav {
                        @for (key, href) in FOOTER_LINKS {
                            a href=(href) { (locale.t(key)) }
                        }
                    }
                    p class="microcopy" { "© Enjoy Spot. " (locale.t("footer.rights")) }
                }
            }
        }
    }
}
