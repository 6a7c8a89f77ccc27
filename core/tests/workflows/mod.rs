// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the evcal-core crate.
//!
//! These tests drive the calendar through its public API, from the event
//! file on disk to the month view.

mod config_driven;
mod event_lifecycle;
mod file_sync;
mod month_view;
