// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - Custom assertion helpers
//! - Temporary directory management with auto-cleanup

mod assertions;
mod fixtures;

#[allow(unused_imports)]
pub use assertions::{assert_dates, assert_file_exists, assert_single_event};
#[allow(unused_imports)]
pub use fixtures::{TestConfigBuilder, test_config, test_draft, test_record};
pub use temp_dir::setup_temp_dirs;
