// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use goosecal_core::{EditScope, RecurrenceKind, RecurrenceRule};

use crate::util::OutputFormat;

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }
}

/// How often a series repeats, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Every {
    Month,
    Quarter,
    Year,
    Day,
}

impl Every {
    pub fn rule(self, interval: i64) -> RecurrenceRule {
        let kind = match self {
            Every::Month => RecurrenceKind::Monthly,
            Every::Quarter => RecurrenceKind::Quarterly,
            Every::Year => RecurrenceKind::Yearly,
            Every::Day => RecurrenceKind::Custom,
        };
        RecurrenceRule::new(kind, interval)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventArgs;

impl EventArgs {
    pub fn id() -> Arg {
        arg!(id: <ID> "The id of the event, or of one occurrence of a series")
    }

    pub fn get_id(matches: &ArgMatches) -> String {
        matches
            .get_one::<String>("id")
            .cloned()
            .unwrap_or_default()
    }

    pub fn title(positional: bool) -> Arg {
        if positional {
            arg!(title: <TITLE> "Title of the event")
        } else {
            arg!(title: -t --title <TITLE> "Title of the event")
        }
    }

    pub fn get_title(matches: &ArgMatches) -> Option<String> {
        matches.get_one("title").cloned()
    }

    pub fn description() -> Arg {
        arg!(--description <DESCRIPTION> "Description of the event")
    }

    pub fn get_description(matches: &ArgMatches) -> Option<String> {
        matches.get_one("description").cloned()
    }

    pub fn start() -> Arg {
        arg!(--start <START> "Start date and time of the event")
    }

    pub fn get_start(matches: &ArgMatches) -> Option<String> {
        matches.get_one("start").cloned()
    }

    pub fn end() -> Arg {
        arg!(--end <END> "End date and time of the event")
    }

    pub fn get_end(matches: &ArgMatches) -> Option<String> {
        matches.get_one("end").cloned()
    }

    pub fn all_day() -> Arg {
        arg!(--"all-day" "Mark the event as lasting the whole day")
    }

    pub fn get_all_day(matches: &ArgMatches) -> bool {
        matches.get_flag("all-day")
    }

    pub fn color() -> Arg {
        arg!(--color <COLOR> "Display color of the event, e.g. #1890ff")
    }

    pub fn get_color(matches: &ArgMatches) -> Option<String> {
        matches.get_one("color").cloned()
    }

    pub fn tags() -> Arg {
        arg!(--tag <TAG> "Tag of the event, may be repeated").action(ArgAction::Append)
    }

    pub fn get_tags(matches: &ArgMatches) -> Option<Vec<String>> {
        matches
            .get_many::<String>("tag")
            .map(|tags| tags.cloned().collect())
    }

    pub fn remind() -> Arg {
        arg!(--remind <MINUTES> "Remind the given minutes before start, may be repeated")
            .value_parser(value_parser!(i64).range(0..))
            .action(ArgAction::Append)
    }

    pub fn get_remind(matches: &ArgMatches) -> Option<Vec<i64>> {
        matches
            .get_many::<i64>("remind")
            .map(|minutes| minutes.copied().collect())
    }

    pub fn every() -> Arg {
        arg!(--every <EVERY> "Repeat the event every month, quarter, year or day")
            .value_parser(value_parser!(Every))
    }

    pub fn get_every(matches: &ArgMatches) -> Option<Every> {
        matches.get_one("every").copied()
    }

    pub fn interval() -> Arg {
        arg!(--interval <N> "Number of units between two occurrences")
            .value_parser(value_parser!(i64))
            .requires("every")
    }

    pub fn get_interval(matches: &ArgMatches) -> Option<i64> {
        matches.get_one("interval").copied()
    }

    /// The recurrence rule given by `--every` and `--interval`.
    pub fn get_rule(matches: &ArgMatches) -> Option<RecurrenceRule> {
        Self::get_every(matches).map(|every| every.rule(Self::get_interval(matches).unwrap_or(1)))
    }

    pub fn scope() -> Arg {
        arg!(--scope <SCOPE> "Change only this occurrence or the whole series")
            .value_parser(value_parser!(EditScope))
            .default_value("all")
    }

    pub fn get_scope(matches: &ArgMatches) -> EditScope {
        matches.get_one("scope").copied().unwrap_or_default()
    }
}
