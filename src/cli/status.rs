//! Status command: print the landing-page aggregate facts.

use console::style;

use crate::config::Settings;
use crate::utils::{format_billions, format_opt_count};

/// Print aggregate statistics from the configured database.
pub fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let repo = settings.repository();
    let stats = repo.summary_stats()?;

    println!("{}", style("Immunisation Data Portal").bold());
    println!("  Database:            {}", settings.database.display());
    println!(
        "  Vaccination doses:   {}",
        format_billions(stats.total_doses)
    );
    println!(
        "  Reported cases:      {}",
        format_opt_count(stats.total_cases)
    );
    println!("  Infection types:     {}", stats.infection_types);
    println!("  Countries tracked:   {}", stats.countries);

    Ok(())
}
