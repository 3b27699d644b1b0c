//! Static asset constants.

/// Stylesheet for the report pages.
pub const CSS: &str = include_str!("styles.css");
