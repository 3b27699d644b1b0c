//! Request handlers for the report pages.
//!
//! Each handler is a stateless request-to-response function: extract filters,
//! run parameterized queries, format the rows, return a complete page. Query
//! failures degrade to placeholder content rather than error responses.

mod analysis;
mod economy;
mod home;
mod infection;
mod static_files;
mod vaccination;

pub use analysis::analysis_page;
pub use economy::economy_page;
pub use home::home_page;
pub use infection::infection_page;
pub use static_files::serve_css;
pub use vaccination::vaccination_page;
