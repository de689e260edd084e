// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Span;
use jiff::civil::{Date, DateTime};
use thiserror::Error;

use crate::recurrence::rule::{RecurrenceKind, RecurrenceRule};

/// How a yearly rule moves forward.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum YearlyStep {
    /// Same month and day in the following year, clamped to the end of the month (Feb 29).
    #[default]
    Calendar,

    /// A fixed [`FIXED_YEAR_DAYS`] days per year, regardless of leap years.
    FixedDays,
}

/// Number of days in one year step under [`YearlyStep::FixedDays`].
pub const FIXED_YEAR_DAYS: i64 = 365;

/// Yearly policy used when expanding a series over a view window.
pub const GENERATE_YEARLY_STEP: YearlyStep = YearlyStep::Calendar;

/// Yearly policy used when looking up the next occurrence of a series.
pub const LOOKUP_YEARLY_STEP: YearlyStep = YearlyStep::FixedDays;

const MONTHS_PER_QUARTER: i64 = 3;
const MONTHS_PER_YEAR: i64 = 12;

/// Why a date could not be advanced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    #[error("unsupported recurrence type '{0}'")]
    UnsupportedKind(String),

    #[error("date out of range")]
    Overflow,
}

impl From<jiff::Error> for StepError {
    fn from(_: jiff::Error) -> Self {
        StepError::Overflow
    }
}

/// Advances `current` by one step of `rule`.
///
/// Month-based steps land on `anchor_day`, or on the last day of the target month when that
/// month is shorter. The clamp is always computed from the anchor, never from `current`, so a
/// series anchored on the 31st returns to the 31st after passing through February. The time of
/// day is kept.
pub fn advance(
    current: DateTime,
    rule: &RecurrenceRule,
    anchor_day: i8,
    yearly: YearlyStep,
) -> Result<DateTime, StepError> {
    match &rule.kind {
        RecurrenceKind::Monthly => add_months(current, rule.interval, anchor_day),
        RecurrenceKind::Quarterly => {
            let months = rule
                .interval
                .checked_mul(MONTHS_PER_QUARTER)
                .ok_or(StepError::Overflow)?;
            add_months(current, months, anchor_day)
        }
        RecurrenceKind::Yearly => match yearly {
            YearlyStep::Calendar => {
                let months = rule
                    .interval
                    .checked_mul(MONTHS_PER_YEAR)
                    .ok_or(StepError::Overflow)?;
                add_months(current, months, anchor_day)
            }
            YearlyStep::FixedDays => {
                let days = rule
                    .interval
                    .checked_mul(FIXED_YEAR_DAYS)
                    .ok_or(StepError::Overflow)?;
                add_days(current, days)
            }
        },
        RecurrenceKind::Custom => add_days(current, rule.interval),
        RecurrenceKind::Unsupported(kind) => Err(StepError::UnsupportedKind(kind.clone())),
    }
}

fn add_days(current: DateTime, days: i64) -> Result<DateTime, StepError> {
    let span = Span::new().try_days(days)?;
    Ok(current.checked_add(span)?)
}

fn add_months(current: DateTime, months: i64, anchor_day: i8) -> Result<DateTime, StepError> {
    let index = i64::from(current.year()) * MONTHS_PER_YEAR + i64::from(current.month() - 1);
    let index = index.checked_add(months).ok_or(StepError::Overflow)?;

    let year = i16::try_from(index.div_euclid(MONTHS_PER_YEAR)).map_err(|_| StepError::Overflow)?;
    let month = (index.rem_euclid(MONTHS_PER_YEAR) + 1) as i8; // 1..=12

    let first = Date::new(year, month, 1)?;
    let day = anchor_day.min(first.days_in_month());
    let date = Date::new(year, month, day)?;
    Ok(date.to_datetime(current.time()))
}

/// The civil date-times of a series, starting at its anchor.
///
/// The iterator ends as soon as a step fails or does not move forward, so a corrupt rule
/// can never loop forever.
#[derive(Debug, Clone)]
pub struct Steps<'a> {
    rule: &'a RecurrenceRule,
    anchor_day: i8,
    yearly: YearlyStep,
    next: Option<DateTime>,
}

impl<'a> Steps<'a> {
    pub fn new(anchor: DateTime, rule: &'a RecurrenceRule, yearly: YearlyStep) -> Self {
        Self {
            rule,
            anchor_day: anchor.day(),
            yearly,
            next: Some(anchor),
        }
    }
}

impl Iterator for Steps<'_> {
    type Item = DateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        match advance(current, self.rule, self.anchor_day, self.yearly) {
            Ok(next) if next > current => self.next = Some(next),
            Ok(next) => {
                tracing::warn!(%current, %next, rule = ?self.rule, "recurrence did not advance, stopping series");
            }
            Err(err) => {
                tracing::warn!(%current, rule = ?self.rule, %err, "cannot advance recurrence, stopping series");
            }
        }
        Some(current)
    }
}
