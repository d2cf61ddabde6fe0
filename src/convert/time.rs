use crate::convert::{self, AttributeCodec};
use crate::error::{Error, Result};

use aws_sdk_dynamodb::types;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";
const ZONED_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";
const LOCAL_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

fn malformed(text: &str, source: chrono::ParseError) -> Error {
    Error::MalformedTimestamp {
        text: text.to_string(),
        source,
    }
}

/// Codec for calendar dates, stored as `YYYY-MM-DD` text.
///
/// ```rust
/// use chrono::NaiveDate;
/// use dynamodb_marshal::convert::{AttributeCodec, time::CalendarDateCodec};
///
/// let date = NaiveDate::from_ymd_opt(2015, 10, 8).unwrap();
/// let attribute = CalendarDateCodec.encode(&date).unwrap();
/// assert_eq!(CalendarDateCodec.decode(&attribute).unwrap(), date);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct CalendarDateCodec;

impl AttributeCodec for CalendarDateCodec {
    type Value = NaiveDate;

    fn encode(&self, value: &NaiveDate) -> Result<types::AttributeValue> {
        let text = value.format(CALENDAR_DATE_FORMAT).to_string();
        Ok(types::AttributeValue::S(text))
    }

    fn decode(&self, attribute: &types::AttributeValue) -> Result<NaiveDate> {
        let text = convert::expect_string(attribute)?;
        NaiveDate::parse_from_str(text, CALENDAR_DATE_FORMAT)
            .map_err(|source| malformed(text, source))
    }
}

/// Codec for zone-qualified date-times, stored as ISO-8601 text with
/// milliseconds and an explicit offset (`2015-10-08T14:30:00.000+02:00`).
///
/// The offset is part of the representation and survives the round trip.
/// Text without an offset does not parse; use [`LocalDateTimeCodec`] for
/// zoneless values. The two formats reject each other's output, so a value
/// written by one cannot be silently misread by the other.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZonedDateTimeCodec;

impl AttributeCodec for ZonedDateTimeCodec {
    type Value = DateTime<FixedOffset>;

    fn encode(&self, value: &DateTime<FixedOffset>) -> Result<types::AttributeValue> {
        let text = value.format(ZONED_DATE_TIME_FORMAT).to_string();
        Ok(types::AttributeValue::S(text))
    }

    fn decode(&self, attribute: &types::AttributeValue) -> Result<DateTime<FixedOffset>> {
        let text = convert::expect_string(attribute)?;
        DateTime::parse_from_str(text, ZONED_DATE_TIME_FORMAT)
            .map_err(|source| malformed(text, source))
    }
}

/// Codec for zoneless date-times, stored as ISO local text with milliseconds
/// and no offset (`2015-10-08T14:30:00.000`).
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalDateTimeCodec;

impl AttributeCodec for LocalDateTimeCodec {
    type Value = NaiveDateTime;

    fn encode(&self, value: &NaiveDateTime) -> Result<types::AttributeValue> {
        let text = value.format(LOCAL_DATE_TIME_FORMAT).to_string();
        Ok(types::AttributeValue::S(text))
    }

    fn decode(&self, attribute: &types::AttributeValue) -> Result<NaiveDateTime> {
        let text = convert::expect_string(attribute)?;
        NaiveDateTime::parse_from_str(text, LOCAL_DATE_TIME_FORMAT)
            .map_err(|source| malformed(text, source))
    }
}
