// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{Timestamp, ToSpan, Zoned};

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

const INVALID_FORMAT: &str =
    "Invalid date format. Expected format: YYYY-MM-DD, HH:MM and YYYY-MM-DD HH:MM";

/// Parses a local date and time in the time zone of `now`, returning epoch milliseconds.
///
/// A bare date means its midnight, a bare time means that time today.
pub fn parse_datetime(now: &Zoned, s: &str) -> Result<i64, Box<dyn Error>> {
    let tz = now.time_zone().clone();
    let zoned = if let Ok(dt) = DateTime::strptime(DATETIME_FORMAT, s) {
        dt.to_zoned(tz)?
    } else if let Ok(date) = Date::strptime(DATE_FORMAT, s) {
        date.to_zoned(tz)?
    } else if let Ok(time) = Time::strptime(TIME_FORMAT, s) {
        now.date().to_datetime(time).to_zoned(tz)?
    } else {
        return Err(INVALID_FORMAT.into());
    };
    Ok(zoned.timestamp().as_millisecond())
}

/// Parses a start and end pair.
///
/// A bare end time is taken on the day of the start, or the day after when it would
/// otherwise precede the start.
pub fn parse_datetime_range(
    now: &Zoned,
    start: &str,
    end: &str,
) -> Result<(i64, i64), Box<dyn Error>> {
    let start_ms = parse_datetime(now, start)?;
    let Ok(time) = Time::strptime(TIME_FORMAT, end) else {
        return Ok((start_ms, parse_datetime(now, end)?));
    };

    let start = Timestamp::from_millisecond(start_ms)?.to_zoned(now.time_zone().clone());
    let mut end = start.date().to_datetime(time);
    if end < start.datetime() {
        end = end.checked_add(1.day())?;
    }
    let end_ms = end.to_zoned(now.time_zone().clone())?.timestamp().as_millisecond();
    Ok((start_ms, end_ms))
}

pub fn parse_date(s: &str) -> Result<Date, Box<dyn Error>> {
    Date::strptime(DATE_FORMAT, s)
        .map_err(|_| "Invalid date format. Expected format: YYYY-MM-DD".into())
}

/// Renders epoch milliseconds in `tz`, falling back to the raw number when out of range.
pub fn format_datetime(ms: i64, tz: &TimeZone) -> String {
    format_with(ms, tz, DATETIME_FORMAT)
}

pub fn format_date(ms: i64, tz: &TimeZone) -> String {
    format_with(ms, tz, DATE_FORMAT)
}

pub fn format_time(ms: i64, tz: &TimeZone) -> String {
    format_with(ms, tz, TIME_FORMAT)
}

fn format_with(ms: i64, tz: &TimeZone, format: &str) -> String {
    match Timestamp::from_millisecond(ms) {
        Ok(t) => t.to_zoned(tz.clone()).strftime(format).to_string(),
        Err(_) => ms.to_string(),
    }
}

/// Local date of an instant in `tz`.
pub fn date_of(ms: i64, tz: &TimeZone) -> Option<Date> {
    Timestamp::from_millisecond(ms)
        .ok()
        .map(|t| t.to_zoned(tz.clone()).date())
}
