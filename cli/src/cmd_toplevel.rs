// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use goosecal_core::{Calendar, Event};

use crate::arg::CommonArgs;
use crate::cmd_event::print_events;
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdSearch {
    pub query: String,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdSearch {
    pub const NAME: &str = "search";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Search events by title, description, tag or date (YYYY-MM-DD)")
            .arg(arg!(query: <QUERY> "Text to look for, ignoring case"))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            query: matches
                .get_one::<String>("query")
                .cloned()
                .unwrap_or_default(),
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, calendar: &Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "searching events...");
        let hits = calendar.search(&self.query).await?;
        if hits.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No events found".italic());
            return Ok(());
        }

        let events: Vec<Event> = hits.into_iter().map(|hit| hit.event).collect();
        print_events(calendar, &events, self.output_format, self.verbose);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdStats {
    pub output_format: OutputFormat,
}

impl CmdStats {
    pub const NAME: &str = "stats";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show how many events, series and reminders are stored")
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, calendar: &Calendar) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "collecting stats...");
        let stats = calendar.stats().await?;
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
            OutputFormat::Table => {
                println!("{} {}", "Events:   ".bold(), stats.events);
                println!("{} {}", "Series:   ".bold(), stats.series);
                println!("{} {}", "Reminders:".bold(), stats.reminders);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdSearch::command());

        let matches = cmd
            .try_get_matches_from(["test", "search", "rent", "--output-format", "json"])
            .unwrap();
        let sub_matches = matches.subcommand_matches("search").unwrap();
        let parsed = CmdSearch::from(sub_matches);

        assert_eq!(parsed.query, "rent");
        assert_eq!(parsed.output_format, OutputFormat::Json);
        assert!(!parsed.verbose);
    }

    #[test]
    fn test_parse_search_requires_query() {
        let cmd = Command::new("test").subcommand(CmdSearch::command());
        assert!(cmd.try_get_matches_from(["test", "search"]).is_err());
    }

    #[test]
    fn test_parse_stats() {
        let cmd = Command::new("test")
            .subcommand_required(true)
            .subcommand(CmdStats::command());

        let matches = cmd.try_get_matches_from(["test", "stats"]).unwrap();
        let sub_matches = matches.subcommand_matches("stats").unwrap();
        let parsed = CmdStats::from(sub_matches);

        assert_eq!(parsed.output_format, OutputFormat::Table);
    }
}
