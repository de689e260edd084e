// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg, value_parser};
use colored::Colorize;
use goosecal_core::{
    Calendar, EditScope, Event, EventPatch, RecurrenceRule, Reminder, Window, Write,
};

use crate::arg::{CommonArgs, EventArgs};
use crate::event_formatter::{EventColumn, EventFormatter};
use crate::util::{
    OutputFormat, date_of, format_datetime, parse_date, parse_datetime, parse_datetime_range,
};

#[derive(Debug, Clone)]
pub struct CmdEventList {
    pub from: Option<String>,
    pub to: Option<String>,
    pub week: bool,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List events and occurrences, the current month by default")
            .arg(arg!(--from <DATE> "First day to show (YYYY-MM-DD)"))
            .arg(arg!(--to <DATE> "Last day to show (YYYY-MM-DD)"))
            .arg(arg!(-w --week "Show the current week").conflicts_with_all(["from", "to"]))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            from: matches.get_one("from").cloned(),
            to: matches.get_one("to").cloned(),
            week: matches.get_flag("week"),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    /// The command run when no subcommand is given.
    pub fn month() -> Self {
        Self {
            from: None,
            to: None,
            week: false,

            output_format: OutputFormat::Table,
            verbose: false,
        }
    }

    pub async fn run(self, calendar: &Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing events...");
        let window = self.window(calendar)?;
        let events = calendar.list_window(window).await?;
        if events.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        print_events(calendar, &events, self.output_format, self.verbose);
        Ok(())
    }

    fn window(&self, calendar: &Calendar) -> Result<Window, Box<dyn Error>> {
        let tz = calendar.now().time_zone();
        let today = calendar.now().date();
        if self.week {
            return Ok(Window::week_of(today, tz)?);
        }

        let from = match &self.from {
            Some(from) => parse_date(from)?,
            None => today.first_of_month(),
        };
        let to = match &self.to {
            Some(to) => parse_date(to)?,
            None => from.last_of_month(),
        };
        if to < from {
            return Err(format!("The last day {to} is before the first day {from}").into());
        }
        Ok(Window::days(from, to, tz)?)
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventNew {
    pub title: String,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: bool,
    pub color: Option<String>,
    pub tags: Vec<String>,
    pub reminders: Vec<i64>,
    pub rule: Option<RecurrenceRule>,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new event, or a series when --every is given")
            .arg(EventArgs::title(true))
            .arg(EventArgs::start())
            .arg(EventArgs::end())
            .arg(EventArgs::all_day())
            .arg(EventArgs::description())
            .arg(EventArgs::color())
            .arg(EventArgs::tags())
            .arg(EventArgs::remind())
            .arg(EventArgs::every())
            .arg(EventArgs::interval())
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            title: EventArgs::get_title(matches).unwrap_or_default(),
            description: EventArgs::get_description(matches),
            start: EventArgs::get_start(matches),
            end: EventArgs::get_end(matches),
            all_day: EventArgs::get_all_day(matches),
            color: EventArgs::get_color(matches),
            tags: EventArgs::get_tags(matches).unwrap_or_default(),
            reminders: EventArgs::get_remind(matches).unwrap_or_default(),
            rule: EventArgs::get_rule(matches),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new event...");
        let now = calendar.now();
        let mut draft = calendar.default_event_draft()?;
        let duration = draft.end_ms - draft.start_ms;
        match (&self.start, &self.end) {
            (Some(start), Some(end)) => {
                (draft.start_ms, draft.end_ms) = parse_datetime_range(now, start, end)?;
            }
            (Some(start), None) => {
                draft.start_ms = parse_datetime(now, start)?;
                draft.end_ms = draft.start_ms + duration;
            }
            (None, Some(end)) => draft.end_ms = parse_datetime(now, end)?,
            (None, None) => {}
        }

        if self.all_day && self.end.is_none() {
            let date = date_of(draft.start_ms, now.time_zone()).ok_or("Start out of range")?;
            let day = Window::days(date, date, now.time_zone())?;
            (draft.start_ms, draft.end_ms) = (day.start_ms, day.end_ms);
        }

        draft.title = self.title;
        draft.description = self.description;
        draft.is_all_day = self.all_day;
        draft.color = self.color;
        draft.tags = self.tags;
        draft.reminders = self.reminders.into_iter().map(Reminder::notification).collect();
        draft.recurrence_rule = self.rule;

        let event = calendar.new_event(draft).await?;
        print_events(calendar, &[event], self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventEdit {
    pub id: String,
    pub scope: EditScope,

    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub all_day: Option<bool>,
    pub color: Option<String>,
    pub tags: Option<Vec<String>>,
    pub reminders: Option<Vec<i64>>,
    pub rule: Option<RecurrenceRule>,
    pub no_repeat: bool,

    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdEventEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit an event, a whole series, or one occurrence of a series")
            .arg(EventArgs::id())
            .arg(EventArgs::scope())
            .arg(EventArgs::title(false))
            .arg(EventArgs::start())
            .arg(EventArgs::end())
            .arg(
                arg!(--"all-day" <BOOL> "Whether the event lasts the whole day")
                    .value_parser(value_parser!(bool)),
            )
            .arg(EventArgs::description().help("Description of the event, empty to remove it"))
            .arg(EventArgs::color())
            .arg(EventArgs::tags())
            .arg(EventArgs::remind())
            .arg(EventArgs::every())
            .arg(EventArgs::interval())
            .arg(arg!(--"no-repeat" "Turn a series into a plain event").conflicts_with("every"))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            scope: EventArgs::get_scope(matches),

            title: EventArgs::get_title(matches),
            description: EventArgs::get_description(matches),
            start: EventArgs::get_start(matches),
            end: EventArgs::get_end(matches),
            all_day: matches.get_one("all-day").copied(),
            color: EventArgs::get_color(matches),
            tags: EventArgs::get_tags(matches),
            reminders: EventArgs::get_remind(matches),
            rule: EventArgs::get_rule(matches),
            no_repeat: matches.get_flag("no-repeat"),

            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing event...");
        let now = calendar.now();
        let (start_ms, end_ms) = match (&self.start, &self.end) {
            (Some(start), Some(end)) => {
                let (start, end) = parse_datetime_range(now, start, end)?;
                (Some(start), Some(end))
            }
            (Some(start), None) => {
                // Moving only the start keeps the duration.
                let event = calendar.get_event(&self.id).await?;
                let start = parse_datetime(now, start)?;
                (Some(start), Some(start + event.duration_ms()))
            }
            (None, Some(end)) => (None, Some(parse_datetime(now, end)?)),
            (None, None) => (None, None),
        };

        let patch = EventPatch {
            title: self.title,
            description: self.description.map(|d| (!d.is_empty()).then_some(d)),
            start_ms,
            end_ms,
            is_all_day: self.all_day,
            color: self.color,
            tags: self.tags,
            reminders: self
                .reminders
                .map(|r| r.into_iter().map(Reminder::notification).collect()),
            recurrence_rule: match (self.rule, self.no_repeat) {
                (Some(rule), _) => Some(Some(rule)),
                (None, true) => Some(None),
                (None, false) => None,
            },
        };
        if patch.is_empty() {
            return Err("Nothing to edit".into());
        }

        let writes = calendar.edit(&self.id, &patch, self.scope).await?;
        let events: Vec<Event> = writes.upserted().cloned().collect();
        print_events(calendar, &events, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventDelete {
    pub id: String,
    pub scope: EditScope,
}

impl CmdEventDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete an event, a whole series, or one occurrence of a series")
            .arg(EventArgs::id())
            .arg(EventArgs::scope())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            scope: EventArgs::get_scope(matches),
        }
    }

    pub async fn run(self, calendar: &Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting event...");
        let writes = calendar.delete(&self.id, self.scope).await?;
        for write in &writes {
            match write {
                Write::Delete { id } => println!("{} #{id}", "Deleted".red()),
                Write::Upsert(event) => println!(
                    "{} #{} ({} skipped occurrences)",
                    "Updated".yellow(),
                    event.id,
                    event.exception_dates.len()
                ),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdEventNext {
    pub id: String,
    pub after: Option<String>,
    pub output_format: OutputFormat,
}

impl CmdEventNext {
    pub const NAME: &str = "next";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the next occurrence of a series")
            .arg(EventArgs::id())
            .arg(arg!(--after <DATETIME> "Look after this instant instead of now"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: EventArgs::get_id(matches),
            after: matches.get_one("after").cloned(),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, calendar: &Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "looking up next occurrence...");
        let after_ms = match &self.after {
            Some(after) => Some(parse_datetime(calendar.now(), after)?),
            None => None,
        };
        let next = calendar.next_occurrence(&self.id, after_ms).await?;
        match self.output_format {
            OutputFormat::Json => {
                let json = serde_json::json!({ "id": self.id, "nextMs": next });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Table => match next {
                Some(ms) => println!("{}", format_datetime(ms, calendar.now().time_zone())),
                None => println!("{}", "No upcoming occurrence".italic()),
            },
        }
        Ok(())
    }
}

/// Prints events with the columns shared by every event command.
pub fn print_events(
    calendar: &Calendar,
    events: &[Event],
    output_format: OutputFormat,
    verbose: bool,
) {
    let columns = if verbose {
        vec![
            EventColumn::id(),
            EventColumn::time_range(calendar.now()),
            EventColumn::repeat(),
            EventColumn::tags(),
            EventColumn::title(),
        ]
    } else {
        vec![
            EventColumn::id(),
            EventColumn::time_range(calendar.now()),
            EventColumn::title(),
        ]
    };
    let formatter = EventFormatter::new(columns).with_output_format(output_format);
    print!("{}", formatter.format(events));
}
