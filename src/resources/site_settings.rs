//! Site-wide settings edited in the back office.

use serde::{Deserialize, Serialize};

/// Placeholder number used when the back office has no WhatsApp number.
pub const FALLBACK_WHATSAPP_NUMBER: &str = "+237XXXXXXXXX";

/// Contact and company information shown across the storefront.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    /// WhatsApp number used for orders and contact.
    #[serde(default)]
    pub whatsapp_number: String,
    /// Contact email.
    #[serde(default)]
    pub contact_email: String,
    /// Contact phone.
    #[serde(default)]
    pub contact_phone: String,
    /// Postal address.
    #[serde(default)]
    pub contact_address: String,
    /// Company name.
    #[serde(default)]
    pub company_name: String,
    /// Company description.
    #[serde(default)]
    pub company_description: String,
    /// Social network links, kept as raw JSON.
    #[serde(default)]
    pub social_links: Vec<serde_json::Value>,
    /// Last update timestamp, as sent by the backend.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl SiteSettings {
    /// Extracts settings from the `/settings/` payload.
    ///
    /// The endpoint answers either with the settings object itself or with a
    /// list envelope; in the latter case the first result is used.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when the selected object does not match.
    pub fn from_payload(payload: serde_json::Value) -> Result<Self, serde_json::Error> {
        let selected = match payload {
            serde_json::Value::Object(mut object) => match object.remove("results") {
                Some(serde_json::Value::Array(mut results)) if !results.is_empty() => {
                    results.swap_remove(0)
                }
                Some(other) => {
                    object.insert("results".to_string(), other);
                    serde_json::Value::Object(object)
                }
                None => serde_json::Value::Object(object),
            },
            serde_json::Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            other => other,
        };
        serde_json::from_value(selected)
    }

    /// Returns the WhatsApp number, or the placeholder when none is configured.
    #[must_use]
    pub fn whatsapp_number_or_fallback(&self) -> &str {
        let number = self.whatsapp_number.trim();
        if number.is_empty() {
            FALLBACK_WHATSAPP_NUMBER
        } else {
            number
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload_reads_plain_object() {
        let settings =
            SiteSettings::from_payload(json!({"whatsapp_number": "+22990000000"})).unwrap();
        assert_eq!(settings.whatsapp_number, "+22990000000");
    }

    #[test]
    fn test_from_payload_takes_first_result_of_envelope() {
        let settings = SiteSettings::from_payload(json!({
            "count": 2,
            "results": [
                {"company_name": "First"},
                {"company_name": "Second"}
            ]
        }))
        .unwrap();
        assert_eq!(settings.company_name, "First");
    }

    #[test]
    fn test_from_payload_empty_envelope_gives_defaults() {
        let settings = SiteSettings::from_payload(json!({"count": 0, "results": []})).unwrap();
        assert_eq!(settings.company_name, "");
    }

    #[test]
    fn test_whatsapp_fallback() {
        let settings = SiteSettings::default();
        assert_eq!(settings.whatsapp_number_or_fallback(), FALLBACK_WHATSAPP_NUMBER);
    }
}
