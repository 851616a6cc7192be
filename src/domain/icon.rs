// src/domain/icon.rs

/// Icons we ship. Backend icon hints are mapped onto this set and never rendered as markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Yacht,
    Watersports,
    Helicopter,
    Desert,
    Private,
    Sharing,
    BlackYacht,
    Fishing,
    Birthday,
    Corporate,
    Wedding,
    Packages,
    Events,
    Generic,
}

const KNOWN: &[(&str, Icon)] = &[
    ("blackyacht", Icon::BlackYacht),
    ("yacht", Icon::Yacht),
    ("watersport", Icon::Watersports),
    ("jetski", Icon::Watersports),
    ("helicopter", Icon::Helicopter),
    ("desert", Icon::Desert),
    ("safari", Icon::Desert),
    ("private", Icon::Private),
    ("sharing", Icon::Sharing),
    ("fishing", Icon::Fishing),
    ("birthday", Icon::Birthday),
    ("corporate", Icon::Corporate),
    ("wedding", Icon::Wedding),
    ("package", Icon::Packages),
    ("event", Icon::Events),
];

impl Icon {
    /// Resolve a backend hint (a name, a file path, or raw svg) to a vetted icon.
    /// Markup is never trusted: anything containing `<` is `Generic`.
    pub fn from_hint(hint: Option<&str>) -> Icon {
        let Some(hint) = hint else {
            return Icon::Generic;
        };
        if hint.contains('<') {
            return Icon::Generic;
        }

        let normalized: String = hint
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        KNOWN
            .iter()
            .find(|(needle, _)| normalized.contains(needle))
            .map(|(_, icon)| *icon)
            .unwrap_or(Icon::Generic)
    }

    pub fn slug(self) -> &'static str {
        match self {
            Icon::Yacht => "yachts",
            Icon::Watersports => "watersports",
            Icon::Helicopter => "helicopter",
            Icon::Desert => "desert",
            Icon::Private => "private",
            Icon::Sharing => "sharing",
            Icon::BlackYacht => "black-yacht",
            Icon::Fishing => "fishing",
            Icon::Birthday => "birthday",
            Icon::Corporate => "corporate",
            Icon::Wedding => "wedding",
            Icon::Packages => "packages",
            Icon::Events => "events",
            Icon::Generic => "generic",
        }
    }

    pub fn asset_path(self) -> String {
        format!("/static/icons/{}.png", self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_hints_are_never_trusted() {
        let svg = r#"<svg onload="alert(1)"><path d="yacht"/></svg>"#;
        assert_eq!(Icon::from_hint(Some(svg)), Icon::Generic);
    }

    #[test]
    fn names_and_paths_resolve() {
        assert_eq!(Icon::from_hint(Some("Yachts")), Icon::Yacht);
        assert_eq!(Icon::from_hint(Some("/icons/black-yacht.png")), Icon::BlackYacht);
        assert_eq!(Icon::from_hint(Some("Desert Safari")), Icon::Desert);
        assert_eq!(Icon::from_hint(None), Icon::Generic);
        assert_eq!(Icon::from_hint(Some("unknown")), Icon::Generic);
    }

    #[test]
    fn asset_paths_are_static() {
        assert_eq!(Icon::Fishing.asset_path(), "/static/icons/fishing.png");
    }
}
