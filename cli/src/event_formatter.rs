// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::Color;
use goosecal_core::Event;
use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::table::{PaddingDirection, Table, TableColumn};
use crate::util::{OutputFormat, date_of, format_date, format_datetime, format_time};

#[derive(Debug)]
pub struct EventFormatter {
    columns: Vec<EventColumn>,
    format: OutputFormat,
}

impl EventFormatter {
    pub fn new(columns: Vec<EventColumn>) -> Self {
        Self {
            columns,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, events: &'a [Event]) -> Display<'a> {
        Display {
            events,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    events: &'a [Event],
    formatter: &'a EventFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.events).map_err(|_| fmt::Error)?;
                writeln!(f, "{json}")
            }
            OutputFormat::Table => write!(f, "{}", Table::new(&self.formatter.columns, self.events)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum EventColumn {
    Id,
    Title,
    Tags,
    Repeat,
    TimeRange { tz: TimeZone, now_ms: i64 },
}

impl EventColumn {
    pub fn id() -> Self {
        EventColumn::Id
    }

    pub fn title() -> Self {
        EventColumn::Title
    }

    pub fn tags() -> Self {
        EventColumn::Tags
    }

    pub fn repeat() -> Self {
        EventColumn::Repeat
    }

    /// Time range in the zone of `now`, dimmed once the event is over.
    pub fn time_range(now: &Zoned) -> Self {
        EventColumn::TimeRange {
            tz: now.time_zone().clone(),
            now_ms: now.timestamp().as_millisecond(),
        }
    }
}

impl TableColumn<Event> for EventColumn {
    fn format<'a>(&self, data: &'a Event) -> Cow<'a, str> {
        match self {
            EventColumn::Id => format!("#{}", data.id).into(),
            EventColumn::Title => data.title.as_str().into(),
            EventColumn::Tags => data.tags.join(",").into(),
            EventColumn::Repeat => match (&data.recurrence_rule, &data.series_id) {
                (Some(rule), _) => format!("every {} {}", rule.interval, rule.kind).into(),
                (None, Some(_)) => "series".into(),
                (None, None) => "".into(),
            },
            EventColumn::TimeRange { tz, .. } => format_time_range(data, tz).into(),
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            EventColumn::Id => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn color(&self, data: &Event) -> Option<Color> {
        match self {
            EventColumn::TimeRange { now_ms, .. } if data.end_ms < *now_ms => {
                Some(Color::BrightBlack)
            }
            EventColumn::Title if data.series_id.is_some() => Some(Color::Cyan),
            _ => None,
        }
    }
}

fn format_time_range(event: &Event, tz: &TimeZone) -> String {
    let same_day = date_of(event.start_ms, tz) == date_of(event.end_ms, tz);
    match (event.is_all_day, same_day) {
        (true, true) => format_date(event.start_ms, tz),
        (true, false) => format!(
            "{}~{}",
            format_date(event.start_ms, tz),
            format_date(event.end_ms, tz)
        ),
        (false, true) => format!(
            "{}~{}",
            format_datetime(event.start_ms, tz),
            format_time(event.end_ms, tz)
        ),
        (false, false) => format!(
            "{}~{}",
            format_datetime(event.start_ms, tz),
            format_datetime(event.end_ms, tz)
        ),
    }
}
