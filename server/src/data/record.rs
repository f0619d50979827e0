//! Centre user training record
//!
//! Records arrive from an external export and are treated as read-only.
//! Deserialization is lenient: missing or `null` text fields become empty
//! strings, scalar values are coerced to their string form, and a missing or
//! unparseable `progress` becomes `0`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// One training-completion entry for a user at a centre
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default, deserialize_with = "lenient_string")]
    pub centre_number: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub customer_journey_point: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub training_module: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub training_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_email_address: String,
    /// Empty means the user has not started the module
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    /// Completion percentage (0-100, not validated)
    #[serde(default, deserialize_with = "lenient_number")]
    pub progress: f64,
}

/// Render a number the way the export's producer prints it
///
/// Whole values drop the fractional part (`1001`, not `1001.0`) and negative
/// zero prints as `0`. Values that JavaScript would print in exponent form
/// (below `1e-6` or from `1e21` up) are printed in positional form here.
pub fn display_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }
    value.to_string()
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LenientText {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
        Other(JsonValue),
    }

    Ok(match Option::<LenientText>::deserialize(deserializer)? {
        None => String::new(),
        Some(LenientText::Text(text)) => text,
        Some(LenientText::Number(n)) => match n.as_f64() {
            Some(value) => display_number(value),
            None => n.to_string(),
        },
        Some(LenientText::Flag(flag)) => flag.to_string(),
        Some(LenientText::Other(other)) => {
            tracing::trace!(value = %other, "Coercing non-scalar record field to string");
            other.to_string()
        }
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum LenientNumber {
        Number(f64),
        Text(String),
        Other(#[allow(dead_code)] JsonValue),
    }

    Ok(match Option::<LenientNumber>::deserialize(deserializer)? {
        Some(LenientNumber::Number(value)) => value,
        Some(LenientNumber::Text(text)) => text.trim().parse().unwrap_or(0.0),
        Some(LenientNumber::Other(_)) | None => 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parse_full() {
        let json = r#"{
            "centreNumber": "C1",
            "customerJourneyPoint": "Onboarding",
            "trainingModule": "M1",
            "trainingType": "Induction",
            "userEmailAddress": "a@x.com",
            "status": "Complete",
            "progress": 100
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.centre_number, "C1");
        assert_eq!(record.customer_journey_point, "Onboarding");
        assert_eq!(record.training_module, "M1");
        assert_eq!(record.training_type, "Induction");
        assert_eq!(record.user_email_address, "a@x.com");
        assert_eq!(record.status, "Complete");
        assert_eq!(record.progress, 100.0);
    }

    #[test]
    fn test_record_missing_fields_default_to_empty() {
        let json = r#"{ "centreNumber": "C1" }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.centre_number, "C1");
        assert_eq!(record.status, "");
        assert_eq!(record.user_email_address, "");
        assert_eq!(record.progress, 0.0);
    }

    #[test]
    fn test_record_null_fields_default_to_empty() {
        let json = r#"{ "centreNumber": null, "status": null, "progress": null }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.centre_number, "");
        assert_eq!(record.status, "");
        assert_eq!(record.progress, 0.0);
    }

    #[test]
    fn test_record_scalars_coerced() {
        let json = r#"{ "centreNumber": 1001, "trainingModule": true, "progress": "42.5" }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.centre_number, "1001");
        assert_eq!(record.training_module, "true");
        assert_eq!(record.progress, 42.5);
    }

    #[test]
    fn test_record_whole_floats_in_text_fields_drop_fraction() {
        let json = r#"{ "centreNumber": 1001.0, "trainingModule": -0.0, "status": 2.5 }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.centre_number, "1001");
        assert_eq!(record.training_module, "0");
        assert_eq!(record.status, "2.5");
    }

    #[test]
    fn test_record_non_scalar_fields_degrade() {
        let json = r#"{ "status": ["a"], "progress": {"value": 3} }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.status, r#"["a"]"#);
        assert_eq!(record.progress, 0.0);
    }

    #[test]
    fn test_display_number() {
        assert_eq!(display_number(100.0), "100");
        assert_eq!(display_number(12.5), "12.5");
        assert_eq!(display_number(-0.0), "0");
        assert_eq!(display_number(-3.0), "-3");
        assert_eq!(display_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = Record {
            centre_number: "C1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["centreNumber"], "C1");
        assert_eq!(json["userEmailAddress"], "");
    }
}
