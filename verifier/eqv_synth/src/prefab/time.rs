//! Date/time triples backed by chrono.

use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc,
};
use eqv_runtime::{Temporal, Value};
use eqv_types::{TypeDescriptor, TypeKind};

use super::PrefabRegistry;
use crate::tuple::Tuple;

pub(super) fn register(registry: &mut PrefabRegistry) {
    let samples = [
        (TypeKind::Date, dates()),
        (TypeKind::Time, times()),
        (TypeKind::DateTime, date_times()),
        (TypeKind::Instant, instants()),
        (TypeKind::Duration, durations()),
        (TypeKind::ZoneOffset, offsets()),
    ];
    for (kind, tuple) in samples {
        match tuple {
            Some(tuple) => registry.put_builtin(TypeDescriptor::of(kind), tuple),
            None => tracing::warn!(?kind, "date/time sample out of range; no prefab registered"),
        }
    }
}

fn triple(red: Temporal, blue: Temporal) -> Tuple {
    Tuple::new(
        Value::temporal(red.clone()),
        Value::temporal(blue),
        Value::temporal(red),
    )
}

fn red_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2003, 7, 14)
}

fn blue_date() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1999, 12, 31)
}

fn red_time() -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(10, 15, 30)
}

fn blue_time() -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(23, 59, 0)
}

fn dates() -> Option<Tuple> {
    Some(triple(Temporal::Date(red_date()?), Temporal::Date(blue_date()?)))
}

fn times() -> Option<Tuple> {
    Some(triple(Temporal::Time(red_time()?), Temporal::Time(blue_time()?)))
}

fn date_times() -> Option<Tuple> {
    let red = NaiveDateTime::new(red_date()?, red_time()?);
    let blue = NaiveDateTime::new(blue_date()?, blue_time()?);
    Some(triple(Temporal::DateTime(red), Temporal::DateTime(blue)))
}

fn instants() -> Option<Tuple> {
    let red: DateTime<Utc> = Utc.timestamp_opt(1_000_000_000, 0).single()?;
    let blue: DateTime<Utc> = Utc.timestamp_opt(1_700_000_000, 0).single()?;
    Some(triple(Temporal::Instant(red), Temporal::Instant(blue)))
}

fn durations() -> Option<Tuple> {
    let red = TimeDelta::try_seconds(30)?;
    let blue = TimeDelta::try_hours(2)?;
    Some(triple(Temporal::Duration(red), Temporal::Duration(blue)))
}

fn offsets() -> Option<Tuple> {
    let red = FixedOffset::east_opt(3600)?;
    let blue = FixedOffset::west_opt(10 * 3600)?;
    Some(triple(Temporal::Offset(red), Temporal::Offset(blue)))
}
