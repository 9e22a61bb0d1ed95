//! Numeric recognizers
//!
//! One shape table covers all primitive numeric kinds; each row states which
//! kinds it produces so an `int` target never matches a `long`-only accessor.

use super::location::DistanceToRecognizer;
use super::{bind_derived, derived_value, ApiShape, CallShape, Inherit, MethodRecognizer, Receives, RecognizerChain};
use crate::features::symbolic_execution::domain::{tags, Binding};
use crate::features::symbolic_execution::infrastructure::resolution::ResolutionContext;
use crate::shared::models::ProgramValue;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Primitive numeric type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericKind {
    Int,
    Long,
    Float,
    Double,
    Short,
    Byte,
}

impl NumericKind {
    pub const ALL: [NumericKind; 6] = [
        NumericKind::Int,
        NumericKind::Long,
        NumericKind::Float,
        NumericKind::Double,
        NumericKind::Short,
        NumericKind::Byte,
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            NumericKind::Int => "int",
            NumericKind::Long => "long",
            NumericKind::Float => "float",
            NumericKind::Double => "double",
            NumericKind::Short => "short",
            NumericKind::Byte => "byte",
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_name() == name)
    }

    /// Every numeric type name, for handler authorization
    pub fn type_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.type_name()).collect()
    }
}

/// `java.util.Calendar` field constants
pub mod calendar_fields {
    pub const YEAR: i64 = 1;
    pub const MONTH: i64 = 2;
    pub const DAY_OF_MONTH: i64 = 5;
    pub const DAY_OF_WEEK: i64 = 7;
    pub const HOUR: i64 = 10;
    pub const HOUR_OF_DAY: i64 = 11;
    pub const MINUTE: i64 = 12;
    pub const SECOND: i64 = 13;
}

pub const CALENDAR_TYPES: &[&str] = &["java.util.Calendar", "java.util.GregorianCalendar"];
const DATE_TYPES: &[&str] = &["java.util.Date", "java.sql.Date", "java.sql.Timestamp"];
const JAVA_TIME_TYPES: &[&str] = &[
    "java.time.LocalDateTime",
    "java.time.LocalTime",
    "java.time.LocalDate",
    "java.time.ZonedDateTime",
    "java.time.OffsetDateTime",
];
const LOCATION_TYPES: &[&str] = &["android.location.Location"];

static CALENDAR_FIELD_TAGS: Lazy<FxHashMap<i64, &'static str>> = Lazy::new(|| {
    use calendar_fields::*;
    [
        (YEAR, tags::YEAR),
        (MONTH, tags::MONTH),
        (DAY_OF_MONTH, tags::DAY_OF_MONTH),
        (DAY_OF_WEEK, tags::DAY_OF_WEEK),
        (HOUR, tags::HOUR),
        (HOUR_OF_DAY, tags::HOUR),
        (MINUTE, tags::MINUTES),
        (SECOND, tags::SECONDS),
    ]
    .into_iter()
    .collect()
});

static CALENDAR_FIELD_NAMES: Lazy<FxHashMap<&'static str, i64>> = Lazy::new(|| {
    use calendar_fields::*;
    [
        ("YEAR", YEAR),
        ("MONTH", MONTH),
        ("DAY_OF_MONTH", DAY_OF_MONTH),
        ("DAY_OF_WEEK", DAY_OF_WEEK),
        ("HOUR", HOUR),
        ("HOUR_OF_DAY", HOUR_OF_DAY),
        ("MINUTE", MINUTE),
        ("SECOND", SECOND),
    ]
    .into_iter()
    .collect()
});

/// Tag for a `Calendar` field constant, if it is one we track
pub fn calendar_field_tag(field: i64) -> Option<&'static str> {
    CALENDAR_FIELD_TAGS.get(&field).copied()
}

/// One row of the numeric table
#[derive(Debug, Clone, Copy)]
pub struct NumericShape {
    pub shape: ApiShape,
    pub produces: &'static [NumericKind],
    pub tags: &'static [&'static str],
    pub inherit: Inherit,
}

const fn row(
    declaring_types: &'static [&'static str],
    names: &'static [&'static str],
    produces: &'static [NumericKind],
    tags: &'static [&'static str],
    inherit: Inherit,
) -> NumericShape {
    NumericShape {
        shape: ApiShape::new(declaring_types, names),
        produces,
        tags,
        inherit,
    }
}

use NumericKind::{Double, Int, Long};

static NUMERIC_TABLE: Lazy<Vec<NumericShape>> = Lazy::new(|| {
    vec![
        row(&["java.lang.System"], &["currentTimeMillis", "nanoTime"], &[Long], &[tags::NOW], Inherit::Nothing),
        row(DATE_TYPES, &["getTime"], &[Long], &[], Inherit::Receiver),
        row(CALENDAR_TYPES, &["getTimeInMillis"], &[Long], &[], Inherit::Receiver),
        row(DATE_TYPES, &["getHours"], &[Int], &[tags::HOUR], Inherit::Receiver),
        row(DATE_TYPES, &["getMinutes"], &[Int], &[tags::MINUTES], Inherit::Receiver),
        row(DATE_TYPES, &["getSeconds"], &[Int], &[tags::SECONDS], Inherit::Receiver),
        row(DATE_TYPES, &["getYear"], &[Int], &[tags::YEAR], Inherit::Receiver),
        row(DATE_TYPES, &["getMonth"], &[Int], &[tags::MONTH], Inherit::Receiver),
        row(DATE_TYPES, &["getDate"], &[Int], &[tags::DAY_OF_MONTH], Inherit::Receiver),
        row(DATE_TYPES, &["getDay"], &[Int], &[tags::DAY_OF_WEEK], Inherit::Receiver),
        row(JAVA_TIME_TYPES, &["getHour"], &[Int], &[tags::HOUR], Inherit::Receiver),
        row(JAVA_TIME_TYPES, &["getMinute"], &[Int], &[tags::MINUTES], Inherit::Receiver),
        row(JAVA_TIME_TYPES, &["getSecond"], &[Int], &[tags::SECONDS], Inherit::Receiver),
        row(JAVA_TIME_TYPES, &["getYear"], &[Int], &[tags::YEAR], Inherit::Receiver),
        row(JAVA_TIME_TYPES, &["getMonthValue"], &[Int], &[tags::MONTH], Inherit::Receiver),
        row(JAVA_TIME_TYPES, &["getDayOfMonth"], &[Int], &[tags::DAY_OF_MONTH], Inherit::Receiver),
        row(LOCATION_TYPES, &["getLatitude"], &[Double], &[tags::LATITUDE], Inherit::Receiver),
        row(LOCATION_TYPES, &["getLongitude"], &[Double], &[tags::LONGITUDE], Inherit::Receiver),
        row(LOCATION_TYPES, &["getAltitude"], &[Double], &[tags::ALTITUDE], Inherit::Receiver),
    ]
});

/// Table-driven numeric accessors
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericAccessorRecognizer;

impl MethodRecognizer for NumericAccessorRecognizer {
    fn name(&self) -> &'static str {
        "numeric_accessor"
    }

    fn recognize(&self, call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        let target_kind = call
            .target
            .and_then(|t| NumericKind::from_type_name(t.ty()));
        let row = NUMERIC_TABLE.iter().find(|row| {
            call.is(&row.shape) && target_kind.map_or(true, |k| row.produces.contains(&k))
        })?;
        let id = derived_value(call, ctx, row.tags, row.inherit);
        Some(bind_derived(call, Receives::Result, id))
    }
}

/// `Calendar.get(FIELD)`
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarFieldRecognizer;

const CALENDAR_GET: ApiShape = ApiShape::new(CALENDAR_TYPES, &["get"]);

impl CalendarFieldRecognizer {
    /// Field constant passed as a literal, a bound local, or `Calendar.FIELD`
    fn field(arg: &ProgramValue, ctx: &mut ResolutionContext<'_>) -> Option<i64> {
        if let ProgramValue::StaticField { field } = arg {
            if CALENDAR_TYPES.contains(&field.declaring_type.as_str()) {
                return CALENDAR_FIELD_NAMES.get(field.name.as_str()).copied();
            }
        }
        ctx.literal_of(arg).and_then(|lit| lit.as_int())
    }
}

impl MethodRecognizer for CalendarFieldRecognizer {
    fn name(&self) -> &'static str {
        "calendar_field"
    }

    fn recognize(&self, call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        if !call.is(&CALENDAR_GET) {
            return None;
        }
        let tag = call
            .arg(0)
            .and_then(|arg| Self::field(arg, ctx))
            .and_then(calendar_field_tag);
        let id = match tag {
            Some(tag) => derived_value(call, ctx, &[tag], Inherit::Receiver),
            None => derived_value(call, ctx, &[], Inherit::Receiver),
        };
        Some(bind_derived(call, Receives::Result, id))
    }
}

/// Numeric family, in precedence order
pub fn chain() -> RecognizerChain {
    RecognizerChain::new()
        .with(CalendarFieldRecognizer)
        .with(NumericAccessorRecognizer)
        .with(DistanceToRecognizer)
}
