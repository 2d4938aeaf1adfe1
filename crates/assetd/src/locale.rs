//! User-facing strings.
//!
//! The service answers in one locale, chosen in configuration. Hebrew is the
//! default since the intake form it backs is Hebrew.

use serde::{Deserialize, Serialize};

/// Language of response messages and form labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Hebrew.
    #[default]
    He,
    /// English.
    En,
}

impl Locale {
    /// Body of the 200 response after an asset is stored.
    #[must_use]
    pub const fn asset_created(self) -> &'static str {
        match self {
            Self::He => "הציוד נוסף בהצלחה",
            Self::En => "Asset added successfully",
        }
    }

    /// Body of the 500 response when anything in the insert path fails.
    #[must_use]
    pub const fn asset_failed(self) -> &'static str {
        match self {
            Self::He => "שגיאה בהוספת הציוד",
            Self::En => "Failed to add asset",
        }
    }

    /// The placement value that marks an asset as sold.
    #[must_use]
    pub const fn sold_placement(self) -> &'static str {
        match self {
            Self::He => "נמכר",
            Self::En => "sold",
        }
    }

    /// BCP 47 tag, used for the `lang` attribute of served pages.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::He => "he",
            Self::En => "en",
        }
    }

    /// Text direction of the locale.
    #[must_use]
    pub const fn dir(self) -> &'static str {
        match self {
            Self::He => "rtl",
            Self::En => "ltr",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_hebrew() {
        assert_eq!(Locale::default(), Locale::He);
    }

    #[test]
    fn test_messages_differ_per_locale() {
        assert_ne!(Locale::He.asset_created(), Locale::En.asset_created());
        assert_ne!(Locale::He.asset_failed(), Locale::En.asset_failed());
        assert_eq!(Locale::En.sold_placement(), "sold");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Locale::En).unwrap();
        assert_eq!(json, "\"en\"");
        let locale: Locale = serde_json::from_str("\"he\"").unwrap();
        assert_eq!(locale, Locale::He);
    }

    #[test]
    fn test_display_and_dir() {
        assert_eq!(Locale::He.to_string(), "he");
        assert_eq!(Locale::He.dir(), "rtl");
        assert_eq!(Locale::En.dir(), "ltr");
    }
}
