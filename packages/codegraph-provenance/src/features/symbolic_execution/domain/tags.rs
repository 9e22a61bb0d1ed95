//! Well-known semantic tags
//!
//! Tags are plain strings so downstream detectors can add their own; the
//! constants below are the ones the built-in recognizers attach.

/// Represents the current instant
pub const NOW: &str = "#now";
/// Represents the device's current location
pub const HERE: &str = "#here";
/// Derived from an incoming SMS
pub const SMS: &str = "#sms";
/// SMS message body
pub const SMS_BODY: &str = "#body";
/// SMS sender address
pub const SMS_SENDER: &str = "#sender";

pub const HOUR: &str = "#hour";
pub const MINUTES: &str = "#minutes";
pub const SECONDS: &str = "#seconds";
pub const YEAR: &str = "#year";
pub const MONTH: &str = "#month";
pub const DAY_OF_MONTH: &str = "#day_of_month";
pub const DAY_OF_WEEK: &str = "#day_of_week";

pub const LATITUDE: &str = "#latitude";
pub const LONGITUDE: &str = "#longitude";
pub const ALTITUDE: &str = "#altitude";
pub const DISTANCE: &str = "#distance";

// Comparison markers
pub const EQUALS: &str = "#equals";
pub const CONTAINS: &str = "#contains";
pub const STARTS_WITH: &str = "#starts_with";
pub const ENDS_WITH: &str = "#ends_with";
pub const MATCHES: &str = "#matches";
pub const AFTER: &str = "#after";
pub const BEFORE: &str = "#before";

/// Tag recording the literal a marker compared against, e.g. `#equals:admin`
pub fn literal_tag(marker: &str, literal: &str) -> String {
    format!("{}:{}", marker, literal)
}

/// Splits a literal tag back into `(marker, literal)`
pub fn parse_literal_tag(tag: &str) -> Option<(&str, &str)> {
    let (marker, literal) = tag.split_once(':')?;
    marker.starts_with('#').then_some((marker, literal))
}
