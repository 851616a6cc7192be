use crate::auth::sign_in::{FieldErrors, SignInForm};
use crate::templates::components::error_box;
use crate::templates::layouts::desktop::{desktop_layout, Chrome};
use maud::{html, Markup};

pub fn sign_in_page(
    chrome: &Chrome,
    form: &SignInForm,
    errors: &FieldErrors,
    message: Option<&str>,
) -> Markup {
    let locale = chrome.locale;

    desktop_layout(
        chrome,
        html! {
            div class="container narrow" {
                h1 { (locale.t("auth.sign_in")) }
                p class="lead" { (locale.t("auth.sign_in_description")) }

                @if let Some(msg) = message {
                    (error_box(msg))
                }

                form method="post" action={ "/" (locale.code()) "/sign-in" } class="sign-in" novalidate {
                    label for="email" { (locale.t("auth.email")) }
                    input
                        type="email"
                        id="email"
                        name="email"
                        value=(form.email)
                        placeholder=(locale.t("auth.email_placeholder"))
                        autocomplete="email"
                        required;
                    @if let Some(key) = errors.email {
                        p class="field-error" { (locale.t(key)) }
                    }

                    label for="password" { (locale.t("auth.password")) }
                    input
                        type="password"
                        id="password"
                        name="password"
                        placeholder=(locale.t("auth.password_placeholder"))
                        autocomplete="current-password"
                        required;
                    @if let Some(key) = errors.password {
                        p class="field-error" { (locale.t(key)) }
                    }

                    button type="submit" class="primary" { (locale.t("auth.sign_in")) }
                }
            }
        },
    )
}
