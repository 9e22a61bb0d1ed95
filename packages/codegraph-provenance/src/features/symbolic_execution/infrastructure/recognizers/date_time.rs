//! Date/time recognizers: "now" factories and time-setting mutators

use super::{ApiShape, Inherit, RecognizerChain, TaggedCallRecognizer};
use super::numeric::CALENDAR_TYPES;
use crate::features::symbolic_execution::domain::tags;

/// Types the date/time handler is responsible for
pub const DATE_TIME_TYPES: &[&str] = &[
    "java.util.Date",
    "java.util.Calendar",
    "java.util.GregorianCalendar",
    "android.text.format.Time",
    "java.time.LocalDateTime",
    "java.time.LocalDate",
    "java.time.LocalTime",
    "java.time.ZonedDateTime",
    "java.time.OffsetDateTime",
    "java.time.Instant",
];

const JAVA_TIME_TYPES: &[&str] = &[
    "java.time.LocalDateTime",
    "java.time.LocalDate",
    "java.time.LocalTime",
    "java.time.ZonedDateTime",
    "java.time.OffsetDateTime",
    "java.time.Instant",
];

const ANDROID_TIME: &[&str] = &["android.text.format.Time"];

pub const CALENDAR_NOW: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "calendar_get_instance",
    ApiShape::new(CALENDAR_TYPES, &["getInstance"]),
    &[tags::NOW],
);

pub const JAVA_TIME_NOW: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "java_time_now",
    ApiShape::new(JAVA_TIME_TYPES, &["now"]),
    &[tags::NOW],
);

/// `Time.setToNow()` replaces the receiver's state
pub const SET_TO_NOW: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "time_set_to_now",
    ApiShape::new(ANDROID_TIME, &["setToNow"]),
    &[tags::NOW],
)
.mutating_receiver();

/// `Calendar.setTimeInMillis(t)`, `Date.setTime(t)`, `Calendar.set(field, v)`
///
/// The receiver keeps its own tags and gains the arguments'.
pub const SET_TIME: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "set_time",
    ApiShape::new(
        &[
            "java.util.Calendar",
            "java.util.GregorianCalendar",
            "java.util.Date",
            "android.text.format.Time",
        ],
        &["setTimeInMillis", "setTime", "set"],
    ),
    &[],
)
.inheriting(Inherit::All)
.mutating_receiver();

/// `Calendar.getTime()` is a view of the calendar
pub const GET_TIME: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "calendar_get_time",
    ApiShape::new(CALENDAR_TYPES, &["getTime", "clone"]),
    &[],
)
.inheriting(Inherit::Receiver);

/// `Instant.ofEpochMilli(t)` and friends
pub const FROM_EPOCH: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "from_epoch",
    ApiShape::new(JAVA_TIME_TYPES, &["ofEpochMilli", "ofEpochSecond", "ofInstant"]),
    &[],
)
.inheriting(Inherit::Arguments);

/// Date/time family, in precedence order
pub fn chain() -> RecognizerChain {
    RecognizerChain::new()
        .with(CALENDAR_NOW)
        .with(JAVA_TIME_NOW)
        .with(SET_TO_NOW)
        .with(SET_TIME)
        .with(GET_TIME)
        .with(FROM_EPOCH)
}
