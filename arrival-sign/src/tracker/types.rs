//! Train Tracker arrivals API response DTOs.
//!
//! The feed sends almost every field as a string, including numbers and
//! booleans ("1"/"0"), and omits or blanks fields freely. Every field here is
//! therefore an `Option<String>`; validation happens in
//! [`convert`](super::convert).

use serde::{Deserialize, Deserializer};

/// Top-level response body of `ttarrivals.aspx`.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrivalsResponse {
    pub ctatt: Option<ArrivalsEnvelope>,
}

/// The `ctatt` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ArrivalsEnvelope {
    /// When the response was generated (`%Y-%m-%dT%H:%M:%S`, Chicago time).
    #[serde(rename = "tmst", default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,

    /// "0" on success.
    #[serde(rename = "errCd", default, deserialize_with = "lenient_string")]
    pub error_code: Option<String>,

    #[serde(rename = "errNm", default, deserialize_with = "lenient_string")]
    pub error_name: Option<String>,

    /// Predictions. Absent when there are none or on error.
    #[serde(default)]
    pub eta: Vec<RawArrival>,
}

/// One arrival prediction as sent on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArrival {
    #[serde(rename = "staId", default, deserialize_with = "lenient_string")]
    pub station_id: Option<String>,

    #[serde(rename = "stpId", default, deserialize_with = "lenient_string")]
    pub stop_id: Option<String>,

    #[serde(rename = "staNm", default, deserialize_with = "lenient_string")]
    pub station_name: Option<String>,

    /// Platform description, e.g. "Service toward Kimball".
    #[serde(rename = "stpDe", default, deserialize_with = "lenient_string")]
    pub stop_description: Option<String>,

    #[serde(rename = "rn", default, deserialize_with = "lenient_string")]
    pub run_number: Option<String>,

    /// Route code, e.g. "Brn", "G", "Org".
    #[serde(rename = "rt", default, deserialize_with = "lenient_string")]
    pub route: Option<String>,

    /// Destination stop id; "0" when the train is not signed for a stop.
    #[serde(rename = "destSt", default, deserialize_with = "lenient_string")]
    pub destination_stop: Option<String>,

    #[serde(rename = "destNm", default, deserialize_with = "lenient_string")]
    pub destination_name: Option<String>,

    /// "1" (North) or "5" (South).
    #[serde(rename = "trDr", default, deserialize_with = "lenient_string")]
    pub direction: Option<String>,

    /// When the prediction was generated.
    #[serde(rename = "prdt", default, deserialize_with = "lenient_string")]
    pub generated_at: Option<String>,

    /// Predicted arrival time.
    #[serde(rename = "arrT", default, deserialize_with = "lenient_string")]
    pub arrival_at: Option<String>,

    #[serde(rename = "isApp", default, deserialize_with = "lenient_string")]
    pub is_approaching: Option<String>,

    #[serde(rename = "isSch", default, deserialize_with = "lenient_string")]
    pub is_scheduled: Option<String>,

    #[serde(rename = "isDly", default, deserialize_with = "lenient_string")]
    pub is_delayed: Option<String>,

    #[serde(rename = "isFlt", default, deserialize_with = "lenient_string")]
    pub is_faulty: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub flags: Option<String>,

    #[serde(rename = "lat", default, deserialize_with = "lenient_string")]
    pub latitude: Option<String>,

    #[serde(rename = "lon", default, deserialize_with = "lenient_string")]
    pub longitude: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub heading: Option<String>,
}

/// Accept a string, number, bool or null; blank strings become `None`.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Bool(b)) => Some(if b { "1" } else { "0" }.to_string()),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "expected a scalar, got {other}"
            )));
        }
    })
}
