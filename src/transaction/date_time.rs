//! Parsing and formatting of transaction dates.
//!
//! Clients may send either an RFC 3339 date-time (`2025-01-15T10:30:00+13:00`)
//! or a plain calendar date (`2025-01-15`), which is read as midnight UTC.
//! Dates are always sent back to clients as RFC 3339 in UTC.

use serde::{Deserialize, Deserializer, Serializer, de::Error as _, ser::Error as _};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const PLAIN_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// The format of the date column in the database.
///
/// Dates are converted to UTC and written with a fixed number of subsecond
/// digits so that sorting the text sorts the dates.
const STORAGE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]Z"
);

/// The ways a client date can be rejected or fail to be stored.
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    /// The text is neither an RFC 3339 date-time nor a `YYYY-MM-DD` date.
    #[error(transparent)]
    Parse(#[from] time::error::Parse),

    /// The date falls outside the years 0000 to 9999 once converted to UTC.
    #[error("the date must be between the years 0000 and 9999 in UTC")]
    OutOfRange,

    /// The date could not be written in the storage format.
    #[error(transparent)]
    Format(#[from] time::error::Format),
}

/// Parse a date sent by a client and convert it to UTC.
///
/// # Errors
/// Returns an error if `text` is neither an RFC 3339 date-time nor a
/// `YYYY-MM-DD` date, or if its UTC year is outside `0..=9999`.
pub fn parse_date_time(text: &str) -> Result<OffsetDateTime, DateError> {
    let text = text.trim();

    let date_time = match OffsetDateTime::parse(text, &Rfc3339) {
        Ok(date_time) => date_time,
        Err(_) => Date::parse(text, PLAIN_DATE_FORMAT)?.midnight().assume_utc(),
    };

    to_utc(date_time)
}

/// Convert `date_time` to UTC, rejecting dates the storage format cannot sort.
fn to_utc(date_time: OffsetDateTime) -> Result<OffsetDateTime, DateError> {
    date_time
        .checked_to_offset(UtcOffset::UTC)
        .filter(|utc| (0..=9999).contains(&utc.year()))
        .ok_or(DateError::OutOfRange)
}

/// Format `date_time` for the date column in the database.
pub(crate) fn to_storage_text(date_time: OffsetDateTime) -> Result<String, DateError> {
    Ok(to_utc(date_time)?.format(STORAGE_FORMAT)?)
}

/// Parse a value read from the date column in the database.
pub(crate) fn from_storage_text(text: &str) -> Result<OffsetDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(text, STORAGE_FORMAT).map(PrimitiveDateTime::assume_utc)
}

/// Serialize a date as an RFC 3339 string in UTC.
pub fn serialize<S>(date_time: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let text = to_utc(*date_time)
        .and_then(|utc| Ok(utc.format(&Rfc3339)?))
        .map_err(S::Error::custom)?;

    serializer.serialize_str(&text)
}

/// Deserialize a date with [parse_date_time].
pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_date_time(&text)
        .map_err(|error| D::Error::custom(format!("invalid date \"{text}\": {error}")))
}

/// Deserialize a date that may be left out, but not set to null.
pub fn deserialize_some<'de, D>(deserializer: D) -> Result<Option<OffsetDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize(deserializer).map(Some)
}
