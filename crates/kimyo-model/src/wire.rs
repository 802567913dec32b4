//! Serde adapters for the quirks of the PHP backend's JSON.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Booleans that travel as `0`/`1` on the wire. The backend is not
/// consistent about it, so deserialization also accepts plain booleans
/// and numeric strings.
pub mod int_bool {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Bool(bool),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(i64::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => n != 0,
            Raw::Bool(b) => b,
            Raw::Text(s) => !(s.is_empty() || s == "0"),
        })
    }
}

/// `serialize_with` helper for optional `int_bool` fields that are
/// skipped entirely when `None`.
pub fn some_int_bool<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(b) => serializer.serialize_i64(i64::from(*b)),
        None => serializer.serialize_none(),
    }
}

/// Server-assigned timestamps come back as `Y-m-d H:i:s` strings (assumed
/// UTC); newer endpoints already emit RFC 3339. Accept both, emit the
/// legacy format.
pub mod php_datetime {
    use super::*;

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => serializer.serialize_str(&dt.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| Some(naive.and_utc()))
            .map_err(|_| D::Error::custom(format!("unrecognized timestamp: {raw}")))
    }
}
