//! Shared utility functions.
//!
//! This module contains reusable utilities used across the codebase:
//! - `html`: HTML escaping for safe rendering
//! - `format`: locale-independent numeric formatting for report values

mod format;
mod html;

pub use format::{format_billions, format_coverage, format_opt_count, format_rate, group_thousands};
pub use html::html_escape;
