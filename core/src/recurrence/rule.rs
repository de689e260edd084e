// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// How a series repeats.
///
/// Unknown kinds read from storage are kept as [`RecurrenceKind::Unsupported`] so that a single
/// corrupt row never fails a whole load; such series simply produce no occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecurrenceKind {
    /// Every `interval` months.
    Monthly,

    /// Every `interval` quarters, i.e. `3 * interval` months.
    Quarterly,

    /// Every `interval` years.
    Yearly,

    /// Every `interval` days.
    Custom,

    /// A kind this version does not understand.
    Unsupported(String),
}

const KIND_MONTHLY: &str = "monthly";
const KIND_QUARTERLY: &str = "quarterly";
const KIND_YEARLY: &str = "yearly";
const KIND_CUSTOM: &str = "custom";

impl RecurrenceKind {
    pub fn is_supported(&self) -> bool {
        !matches!(self, RecurrenceKind::Unsupported(_))
    }
}

impl AsRef<str> for RecurrenceKind {
    fn as_ref(&self) -> &str {
        match self {
            RecurrenceKind::Monthly => KIND_MONTHLY,
            RecurrenceKind::Quarterly => KIND_QUARTERLY,
            RecurrenceKind::Yearly => KIND_YEARLY,
            RecurrenceKind::Custom => KIND_CUSTOM,
            RecurrenceKind::Unsupported(s) => s,
        }
    }
}

impl Display for RecurrenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl From<&str> for RecurrenceKind {
    fn from(value: &str) -> Self {
        match value {
            KIND_MONTHLY => RecurrenceKind::Monthly,
            KIND_QUARTERLY => RecurrenceKind::Quarterly,
            KIND_YEARLY => RecurrenceKind::Yearly,
            KIND_CUSTOM => RecurrenceKind::Custom,
            other => RecurrenceKind::Unsupported(other.to_string()),
        }
    }
}

impl From<String> for RecurrenceKind {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<RecurrenceKind> for String {
    fn from(kind: RecurrenceKind) -> Self {
        kind.as_ref().to_string()
    }
}

/// Recurrence rule of a series master.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// The kind of step.
    #[serde(rename = "type")]
    pub kind: RecurrenceKind,

    /// Step multiplier, or the literal number of days for [`RecurrenceKind::Custom`].
    pub interval: i64,
}

impl RecurrenceRule {
    pub fn new(kind: RecurrenceKind, interval: i64) -> Self {
        Self { kind, interval }
    }

    pub fn monthly(interval: i64) -> Self {
        Self::new(RecurrenceKind::Monthly, interval)
    }

    pub fn quarterly(interval: i64) -> Self {
        Self::new(RecurrenceKind::Quarterly, interval)
    }

    pub fn yearly(interval: i64) -> Self {
        Self::new(RecurrenceKind::Yearly, interval)
    }

    /// Every `days` days.
    pub fn custom(days: i64) -> Self {
        Self::new(RecurrenceKind::Custom, days)
    }

    /// Checks that the rule can advance a date: a known kind and a positive interval.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.kind.is_supported() {
            return Err(Error::InvalidRule(format!(
                "unsupported recurrence type '{}'",
                self.kind
            )));
        }
        if self.interval <= 0 {
            return Err(Error::InvalidRule(format!(
                "interval must be positive, got {}",
                self.interval
            )));
        }
        Ok(())
    }
}
