// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of goosecal: recurring events, their expansion over a window, and the edit model
//! letting a single occurrence diverge from its series.

mod calendar;
mod config;
mod error;
mod event;
mod localdb;
mod recurrence;
mod search;
mod series;
mod view;

pub use crate::calendar::Calendar;
pub use crate::config::{APP_NAME, Config, expand_path, get_config_dir};
pub use crate::error::{Error, Result};
pub use crate::event::{
    DEFAULT_COLOR, DEFAULT_REMINDER_KIND, Event, EventDraft, EventPatch, OccurrenceKey, Reminder,
};
pub use crate::localdb::{LocalDb, Stats};
pub use crate::recurrence::{
    Expander, FIXED_YEAR_DAYS, GENERATE_YEARLY_STEP, LOOKUP_YEARLY_STEP, RecurrenceKind,
    RecurrenceRule, StepError, Steps, YearlyStep, advance,
};
pub use crate::search::{SearchHit, search};
pub use crate::series::{EditScope, EditTarget, Write, WriteSet, apply_delete, apply_edit};
pub use crate::view::{Window, visible_events};
