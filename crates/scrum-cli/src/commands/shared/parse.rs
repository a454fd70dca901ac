use chrono::NaiveDate;
use scrum_core::entities::Attachment;
use serde::de::DeserializeOwned;

/// Parse an enum value written in any case with `-` or `_` separators.
///
/// `in-review`, `in_review` and `IN_REVIEW` all name `TaskStatus::InReview`.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().replace('-', "_").to_ascii_uppercase();
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

pub fn parse_optional_enum<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: DeserializeOwned,
{
    raw.map(|value| parse_enum(value, field)).transpose()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str, field: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}' (expected YYYY-MM-DD): {error}"))
}

/// Parse `NAME:CONTENT_TYPE:SIZE`. The name may itself contain colons.
pub fn parse_attachment(raw: &str) -> anyhow::Result<Attachment> {
    let mut parts = raw.rsplitn(3, ':');
    let (Some(size), Some(content_type), Some(file_name)) = (parts.next(), parts.next(), parts.next())
    else {
        anyhow::bail!("invalid attachment '{raw}': expected NAME:CONTENT_TYPE:SIZE");
    };
    let size_bytes = size
        .parse::<u64>()
        .map_err(|error| anyhow::anyhow!("invalid attachment size '{size}': {error}"))?;
    Ok(Attachment::new(file_name, content_type, size_bytes))
}
