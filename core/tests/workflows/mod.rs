// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the goosecal-core crate.
//!
//! These tests drive the calendar facade against an on-disk database.

mod config_driven;
mod event_lifecycle;
mod series_lifecycle;
