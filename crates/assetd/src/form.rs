//! The asset intake form page.
//!
//! The page shows a "sold to" field only while the placement select holds
//! the sold placement. [`sold_to_visible`] is that rule; the inline script in
//! the served page applies the same literal on load and on every change.

use std::collections::BTreeMap;

use minijinja::{context, Environment};

use crate::asset::NewAsset;
use crate::error::Result;
use crate::locale::Locale;

/// Template name. The `.html` suffix turns on HTML auto-escaping.
const TEMPLATE_NAME: &str = "asset_form.html";
const TEMPLATE: &str = include_str!("web/asset_form.html");

/// Whether the "sold to" wrapper should be shown for a placement value.
///
/// Exact match against the locale's sold literal: no trimming, no case
/// folding, matching what the browser compares.
#[must_use]
pub fn sold_to_visible(placement: &str, locale: Locale) -> bool {
    placement == locale.sold_placement()
}

/// Placement options offered by the form, as `(value, label)`.
#[must_use]
pub fn placements(locale: Locale) -> [(&'static str, &'static str); 3] {
    match locale {
        Locale::He => [
            ("בשימוש", "בשימוש"),
            ("במחסן", "במחסן"),
            (Locale::He.sold_placement(), "נמכר"),
        ],
        Locale::En => [
            ("in use", "In use"),
            ("in storage", "In storage"),
            (Locale::En.sold_placement(), "Sold"),
        ],
    }
}

fn labels(locale: Locale) -> BTreeMap<&'static str, &'static str> {
    let pairs: &[(&str, &str)] = match locale {
        Locale::He => &[
            ("title", "הוספת ציוד"),
            ("name", "שם"),
            ("vendor", "ספק"),
            ("warranty_expiry", "תום אחריות"),
            ("status", "סטטוס"),
            ("barcode", "ברקוד"),
            ("history", "היסטוריה"),
            ("placement", "מיקום"),
            ("sold_to", "נמכר ל"),
            ("unsaved", "מיקום ו\"נמכר ל\" מוצגים לעיון בלבד ואינם נשמרים."),
            ("submit", "שמירה"),
        ],
        Locale::En => &[
            ("title", "Add asset"),
            ("name", "Name"),
            ("vendor", "Vendor"),
            ("warranty_expiry", "Warranty expiry"),
            ("status", "Status"),
            ("barcode", "Barcode"),
            ("history", "History"),
            ("placement", "Placement"),
            ("sold_to", "Sold to"),
            ("unsaved", "Placement and \"sold to\" are for reference only and are not saved."),
            ("submit", "Save"),
        ],
    };
    pairs.iter().copied().collect()
}

fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    Ok(env)
}

/// Render the intake form for a locale.
///
/// # Errors
///
/// Returns [`crate::Error::Template`] if the page template fails to parse or
/// render.
pub fn render(locale: Locale) -> Result<String> {
    let env = environment()?;
    let page = env.get_template(TEMPLATE_NAME)?.render(context! {
        lang => locale.tag(),
        dir => locale.dir(),
        labels => labels(locale),
        placements => placements(locale),
        sold_literal => locale.sold_placement(),
        fields => NewAsset::FIELDS,
    })?;
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(page: &str) -> &str {
        let start = page.find("<script>").unwrap();
        let end = page.find("</script>").unwrap();
        &page[start..end]
    }

    #[test]
    fn test_sold_shows_wrapper() {
        assert!(sold_to_visible("נמכר", Locale::He));
        assert!(sold_to_visible("sold", Locale::En));
    }

    #[test]
    fn test_other_values_hide_wrapper() {
        assert!(!sold_to_visible("בשימוש", Locale::He));
        assert!(!sold_to_visible("", Locale::He));
        assert!(!sold_to_visible("in storage", Locale::En));
    }

    #[test]
    fn test_match_is_exact() {
        assert!(!sold_to_visible("Sold", Locale::En));
        assert!(!sold_to_visible(" sold", Locale::En));
        // Literal of the other locale does not count.
        assert!(!sold_to_visible("sold", Locale::He));
    }

    #[test]
    fn test_exactly_one_placement_is_sold() {
        for locale in [Locale::He, Locale::En] {
            let sold = placements(locale)
                .iter()
                .filter(|(value, _)| sold_to_visible(value, locale))
                .count();
            assert_eq!(sold, 1);
        }
    }

    #[test]
    fn test_render_fills_every_slot() {
        for locale in [Locale::He, Locale::En] {
            let page = render(locale).unwrap();
            assert!(!page.contains("{{"), "unrendered expression for {locale}");
            assert!(!page.contains("{%"), "unrendered block for {locale}");
            assert!(page.contains("id=\"placement\""));
            assert!(page.contains("id=\"sold_to_wrap\""));
            assert!(page.contains(labels(locale)["title"]));
        }
    }

    #[test]
    fn test_render_lists_every_placement() {
        let page = render(Locale::En).unwrap();
        assert!(page.contains("<option value=\"in use\">In use</option>"));
        assert!(page.contains("<option value=\"in storage\">In storage</option>"));
        assert!(page.contains("<option value=\"sold\">Sold</option>"));
        assert_eq!(page.matches("<option ").count(), 3);
    }

    #[test]
    fn test_render_embeds_sold_literal() {
        let page = render(Locale::En).unwrap();
        assert!(page.contains("const SOLD = \"sold\";"));
        assert!(page.contains("lang=\"en\""));

        let page = render(Locale::He).unwrap();
        assert!(page.contains("const SOLD = \"נמכר\";"));
        assert!(page.contains("dir=\"rtl\""));
    }

    #[test]
    fn test_labels_are_html_escaped() {
        let page = render(Locale::En).unwrap();
        assert!(page.contains("Placement and &quot;sold to&quot; are for reference only"));
        assert!(!page.contains("Placement and \"sold to\""));
    }

    #[test]
    fn test_script_posts_only_stored_fields() {
        let page = render(Locale::En).unwrap();
        let script = script(&page);
        assert!(script.contains(
            "const FIELDS = [\"name\",\"vendor\",\"warranty_expiry\",\"status\",\"barcode\",\"history\"];"
        ));
        assert!(!script.contains("\"placement\","));
        assert!(!script.contains("\"sold_to\""));
        // The page says so to the user.
        assert!(page.contains("id=\"unsaved_note\""));
    }

    #[test]
    fn test_script_toggle_tolerates_missing_elements() {
        let page = render(Locale::He).unwrap();
        let script = script(&page);
        assert!(script.contains("if (!placement || !wrap) {\n          return;\n        }"));
        assert!(script.contains("placement.addEventListener(\"change\", toggleSoldTo);"));
        assert!(script.contains("return value === SOLD;"));
    }
}
