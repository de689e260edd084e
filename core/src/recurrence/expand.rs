// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;

use crate::Event;
use crate::recurrence::step::{GENERATE_YEARLY_STEP, LOOKUP_YEARLY_STEP, Steps, YearlyStep};

/// Expands series masters into occurrences.
///
/// Steps are taken on the wall clock of `tz`, so a series at 09:00 stays at 09:00 across
/// daylight saving changes.
#[derive(Debug, Clone)]
pub struct Expander {
    tz: TimeZone,
    generate_yearly: YearlyStep,
    lookup_yearly: YearlyStep,
}

impl Default for Expander {
    fn default() -> Self {
        Self::new(TimeZone::system())
    }
}

impl Expander {
    pub fn new(tz: TimeZone) -> Self {
        Self {
            tz,
            generate_yearly: GENERATE_YEARLY_STEP,
            lookup_yearly: LOOKUP_YEARLY_STEP,
        }
    }

    /// An expander working on UTC wall-clock time.
    pub fn utc() -> Self {
        Self::new(TimeZone::UTC)
    }

    /// Overrides the yearly policies used by [`Expander::generate`] and [`Expander::find_next`].
    pub fn with_yearly_steps(mut self, generate: YearlyStep, lookup: YearlyStep) -> Self {
        self.generate_yearly = generate;
        self.lookup_yearly = lookup;
        self
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// All occurrences of `series` starting within `[view_start_ms, view_end_ms]`, in order.
    ///
    /// Excepted instants are skipped. Returns nothing for a non-recurring event, an inverted
    /// window or a malformed rule.
    pub fn generate(&self, series: &Event, view_start_ms: i64, view_end_ms: i64) -> Vec<Event> {
        let Some(rule) = &series.recurrence_rule else {
            return Vec::new();
        };
        if view_start_ms > view_end_ms {
            return Vec::new();
        }
        if let Err(err) = rule.validate() {
            tracing::warn!(id = %series.id, %err, "skipping series with malformed recurrence");
            return Vec::new();
        }
        let Some(anchor) = self.anchor_of(series) else {
            return Vec::new();
        };

        let mut occurrences = Vec::new();
        for dt in Steps::new(anchor, rule, self.generate_yearly) {
            let Some(start_ms) = self.instant_of(series, anchor, dt) else {
                break;
            };
            if start_ms > view_end_ms {
                break;
            }
            if start_ms >= view_start_ms && !series.is_excepted(start_ms) {
                occurrences.push(series.occurrence_at(start_ms));
            }
        }

        tracing::debug!(id = %series.id, count = occurrences.len(), "generated occurrences");
        occurrences
    }

    /// The first non-excepted occurrence of `series` strictly after `after_ms`.
    pub fn find_next(&self, series: &Event, after_ms: i64) -> Option<i64> {
        let rule = series.recurrence_rule.as_ref()?;
        if let Err(err) = rule.validate() {
            tracing::warn!(id = %series.id, %err, "skipping series with malformed recurrence");
            return None;
        }
        let anchor = self.anchor_of(series)?;

        Steps::new(anchor, rule, self.lookup_yearly)
            .map_while(|dt| self.instant_of(series, anchor, dt))
            .skip_while(|&start_ms| start_ms <= after_ms)
            .find(|&start_ms| !series.is_excepted(start_ms))
    }

    fn anchor_of(&self, series: &Event) -> Option<DateTime> {
        match Timestamp::from_millisecond(series.start_ms) {
            Ok(ts) => Some(ts.to_zoned(self.tz.clone()).datetime()),
            Err(err) => {
                tracing::warn!(id = %series.id, start_ms = series.start_ms, %err, "series start out of range");
                None
            }
        }
    }

    fn instant_of(&self, series: &Event, anchor: DateTime, dt: DateTime) -> Option<i64> {
        // The anchor maps back to the stored start, even inside a repeated hour.
        if dt == anchor {
            return Some(series.start_ms);
        }
        match dt.to_zoned(self.tz.clone()) {
            Ok(zoned) => Some(zoned.timestamp().as_millisecond()),
            Err(err) => {
                tracing::warn!(id = %series.id, %dt, %err, "occurrence out of range, stopping series");
                None
            }
        }
    }
}
