//! Serde support for the backend's `yyyy-MM-dd HH:mm:ss` timestamp format.

use chrono::NaiveDateTime;
use serde::{self, Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp in the wire format, also used for date-range query
/// parameters.
pub fn format(value: &NaiveDateTime) -> String {
    value.format(FORMAT).to_string()
}

pub fn parse(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, FORMAT)
}

pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

/// Same format for `Option<NaiveDateTime>` fields, for
/// `#[serde(with = "datetime::option")]`.
pub mod option {
    use super::{format, parse, FORMAT};
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&format(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(s) => parse(&s).map(Some).map_err(|e| {
                serde::de::Error::custom(format_args!("invalid {FORMAT} timestamp: {e}"))
            }),
            None => Ok(None),
        }
    }
}
