//! Value shapes exchanged with the compliance API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A historical data-access event, as recorded by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// When the access happened
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    /// User whose data was accessed
    pub user_id: String,
    /// Partner that accessed it
    pub partner_id: String,
    /// Declared purpose
    pub purpose: String,
    /// Description of the data accessed
    pub data_accessed: String,
}

/// Rule governing which fields a partner may access for a purpose
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Partner the policy applies to
    pub partner_id: String,
    /// Purpose the policy covers
    pub purpose: String,
    /// Accessible data fields, in server order
    pub data_fields: Vec<String>,
    /// Whether user consent is required
    pub consent_required: bool,
}

impl Policy {
    /// Data fields joined for display
    pub fn data_fields_display(&self) -> String {
        self.data_fields.join(", ")
    }

    /// "Yes" / "No" label for the consent flag
    pub fn consent_label(&self) -> &'static str {
        if self.consent_required {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Body of `POST /authorize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    /// Requesting partner
    pub partner_id: String,
    /// User whose data is requested
    pub user_id: String,
    /// Declared purpose
    pub purpose: String,
}

impl AuthorizationRequest {
    /// Build a request; no validation is performed client-side
    pub fn new(
        partner_id: impl Into<String>,
        user_id: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Self {
        Self {
            partner_id: partner_id.into(),
            user_id: user_id.into(),
            purpose: purpose.into(),
        }
    }
}

/// Server-defined authorization outcome, passed through untouched
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationResult(serde_json::Value);

impl AuthorizationResult {
    /// Wrap a decoded value
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Borrow the raw value
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Take the raw value
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Look up a top-level field when the value is an object
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }
}

impl From<serde_json::Value> for AuthorizationResult {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Timestamp codec: RFC 3339, or naive ISO-8601 read as UTC
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", raw)))
    }
}
