// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rules and their expansion into concrete occurrences.

mod expand;
mod rule;
mod step;

pub use expand::Expander;
pub use rule::{RecurrenceKind, RecurrenceRule};
pub use step::{
    FIXED_YEAR_DAYS, GENERATE_YEARLY_STEP, LOOKUP_YEARLY_STEP, StepError, Steps, YearlyStep,
    advance,
};
