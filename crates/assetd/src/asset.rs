//! The asset record accepted by the intake endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A piece of equipment as submitted by the intake form.
///
/// Every field is optional and passed through to the database untouched.
/// Absent fields become `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewAsset {
    /// The asset's label.
    pub name: Option<String>,

    /// Supplier name.
    pub vendor: Option<String>,

    /// End of warranty coverage, `YYYY-MM-DD`.
    #[serde(deserialize_with = "lenient_date")]
    pub warranty_expiry: Option<NaiveDate>,

    /// Operational state. Free-form.
    pub status: Option<String>,

    /// Externally assigned identifier. Not required to be unique.
    pub barcode: Option<String>,

    /// Free-form audit text.
    pub history: Option<String>,
}

impl NewAsset {
    /// JSON keys the endpoint stores, in column order.
    pub const FIELDS: [&'static str; 6] = [
        "name",
        "vendor",
        "warranty_expiry",
        "status",
        "barcode",
        "history",
    ];
}

/// Parse a `YYYY-MM-DD` date leniently.
///
/// An empty date input submits `""`, and free text such as `"next year"`
/// is stored as `NULL` rather than failing the whole request. A value that
/// is not a JSON string at all is still a type error.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(text) = raw.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        Ok(date) => Ok(Some(date)),
        Err(e) => {
            tracing::debug!(value = text, error = %e, "Unparsable warranty_expiry stored as NULL");
            Ok(None)
        }
    }
}
