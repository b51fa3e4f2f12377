use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// How a timestamp is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayStyle {
    /// `01/15/2024 10:30`, used in table rows.
    Short,
    /// `January 15, 2024 10:30`, used on the detail page.
    Long,
}

/// Accepts ISO local date-times as the backend emits them, or RFC 3339 with
/// an offset (normalized to UTC).
pub fn parse(value: &str) -> Option<NaiveDateTime> {
    value
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_utc()))
}

pub fn format(value: Option<&NaiveDateTime>, style: DisplayStyle) -> String {
    let Some(value) = value else {
        return "-".into();
    };
    let pattern = match style {
        DisplayStyle::Short => "%m/%d/%Y %H:%M",
        DisplayStyle::Long => "%B %d, %Y %H:%M",
    };
    value.format(pattern).to_string()
}

pub(crate) fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_str(&v.format("%Y-%m-%dT%H:%M:%S%.f").to_string()),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{s}'"))),
    }
}
