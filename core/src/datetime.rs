// SPDX-FileCopyrightText: 2025 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod util;
mod window;

pub use util::{RangePosition, format_date, format_time, parse_date, parse_month, parse_time};
pub(crate) use util::truncate_to_minute;
pub use window::DateWindow;
