//! VaxPortal - server-rendered reporting over immunisation statistics.
//!
//! Serves a small set of HTML report pages (vaccination coverage, infection
//! rates, economic-phase breakdowns) backed by a read-only SQLite database.

pub mod cli;
pub mod config;
pub mod filters;
pub mod models;
pub mod repository;
pub mod server;
pub mod utils;

#[cfg(test)]
pub(crate) mod testutil;
