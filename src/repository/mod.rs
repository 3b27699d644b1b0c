//! Read-only SQL access for the report pages.
//!
//! Every method opens a fresh read-only connection, runs its statements with
//! bound parameters, and releases the connection when it returns. User input
//! never reaches SQL text through interpolation.

use std::path::{Path, PathBuf};

use rusqlite::types::Value;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, ToSql};
use thiserror::Error;

use crate::filters::{PhaseFilter, VaccinationFilter};
use crate::models::{
    CountryRate, ExceedingRate, Persona, PhaseCaseRecord, PhaseCaseSummary, SummaryStats,
    TeamMember, VaccinationRecord,
};

/// Scale factor for infection rates: cases per 100,000 population.
pub const RATE_PER_POPULATION: f64 = 100_000.0;

/// Errors raised by report queries.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Repository over the immunisation statistics database.
///
/// Holds only the database path; connections are scoped to each call so a
/// failed query can never leak a handle.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db_path: PathBuf,
}

impl ReportRepository {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, RepositoryError> {
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(conn)
    }

    /// Aggregate facts for the landing page.
    pub fn summary_stats(&self) -> Result<SummaryStats, RepositoryError> {
        let conn = self.connect()?;
        let stats = conn.query_row(
            "SELECT
                (SELECT SUM(Doses) FROM Vaccination),
                (SELECT SUM(Cases) FROM InfectionData),
                (SELECT COUNT(DISTINCT Description) FROM Infection_Type),
                (SELECT COUNT(DISTINCT CountryID) FROM Country)",
            [],
            |row| {
                Ok(SummaryStats {
                    total_doses: row.get(0)?,
                    total_cases: row.get(1)?,
                    infection_types: row.get(2)?,
                    countries: row.get(3)?,
                })
            },
        )?;
        Ok(stats)
    }

    /// Persona cards, in insertion order.
    pub fn personas(&self) -> Result<Vec<Persona>, RepositoryError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT ImagePath, Name, Occupation FROM Persona ORDER BY PersonaID",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Persona {
                    image_path: row.get(0)?,
                    name: row.get(1)?,
                    occupation: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Team roster with the derived full name.
    pub fn team(&self) -> Result<Vec<TeamMember>, RepositoryError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT FirstName || ' ' || LastName AS FullName, StudentID
             FROM Team ORDER BY StudentID",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TeamMember {
                    full_name: row.get(0)?,
                    student_id: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Distinct infection-type descriptions for the filter dropdowns.
    pub fn infection_type_names(&self) -> Result<Vec<String>, RepositoryError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT Description FROM Infection_Type ORDER BY Description",
        )?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Vaccination facts matching the filter, ordered by country name
    /// ascending then year descending.
    pub fn vaccinations(
        &self,
        filter: &VaccinationFilter,
    ) -> Result<Vec<VaccinationRecord>, RepositoryError> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut binds: Vec<Value> = Vec::new();

        if let Some(country) = &filter.country {
            clauses.push("c.CountryName LIKE '%' || ? || '%'");
            binds.push(Value::Text(country.clone()));
        }
        if let Some(region) = &filter.region {
            clauses.push("LOWER(TRIM(r.RegionName)) = LOWER(TRIM(?))");
            binds.push(Value::Text(region.clone()));
        }
        if let Some(antigen) = &filter.antigen {
            clauses.push("LOWER(TRIM(a.AntigenName)) = LOWER(TRIM(?))");
            binds.push(Value::Text(antigen.clone()));
        }
        if let Some(year) = filter.year {
            clauses.push("v.Year = ?");
            binds.push(Value::Integer(year));
        }

        let where_clause = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        let sql = format!(
            "SELECT c.CountryName, r.RegionName, a.AntigenName, v.Year,
                    v.TargetNum, v.Doses, v.Coverage
             FROM Vaccination v
             JOIN Country c ON v.CountryID = c.CountryID
             JOIN Region r ON c.RegionID = r.RegionID
             JOIN Antigen a ON v.AntigenID = a.AntigenID
             {}
             ORDER BY c.CountryName ASC, v.Year DESC",
            where_clause
        );

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let params: Vec<&dyn ToSql> = binds.iter().map(|v| v as &dyn ToSql).collect();
        let rows = stmt
            .query_map(&params[..], |row| {
                Ok(VaccinationRecord {
                    country: row.get(0)?,
                    region: row.get(1)?,
                    antigen: row.get(2)?,
                    year: row.get(3)?,
                    target_pop: row.get(4)?,
                    doses: row.get(5)?,
                    coverage: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Resolve an infection-type description to its id. Exact match only.
    pub fn infection_type_id(&self, description: &str) -> Result<Option<i64>, RepositoryError> {
        let conn = self.connect()?;
        let id = conn
            .query_row(
                "SELECT InfectionTypeID FROM Infection_Type WHERE Description = ?1",
                params![description],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Global infection rate per 100,000 for one (type, year): total cases
    /// over total population across all countries. NULL when no population
    /// data exists or the denominator is zero.
    pub fn global_rate(
        &self,
        infection_type_id: i64,
        year: i64,
    ) -> Result<Option<f64>, RepositoryError> {
        let conn = self.connect()?;
        let rate = conn.query_row(
            "SELECT SUM(i.Cases) * ?1 / SUM(p.Population)
             FROM InfectionData i
             JOIN CountryPopulation p
               ON i.CountryID = p.CountryID AND i.Year = p.Year
             WHERE i.InfectionTypeID = ?2 AND i.Year = ?3",
            params![RATE_PER_POPULATION, infection_type_id, year],
            |row| row.get(0),
        )?;
        Ok(rate)
    }

    /// Per-country infection figures for one (type, year), ordered by rate
    /// descending. Rows without case counts are excluded.
    pub fn country_rates(
        &self,
        infection_type_id: i64,
        year: i64,
    ) -> Result<Vec<CountryRate>, RepositoryError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT c.CountryName, r.RegionName, p.Population, i.Cases,
                    CASE WHEN p.Population > 0
                         THEN i.Cases * ?1 / p.Population
                    END AS Rate
             FROM InfectionData i
             JOIN Country c ON i.CountryID = c.CountryID
             JOIN Region r ON c.RegionID = r.RegionID
             JOIN CountryPopulation p
               ON i.CountryID = p.CountryID AND i.Year = p.Year
             WHERE i.InfectionTypeID = ?2 AND i.Year = ?3 AND i.Cases IS NOT NULL
             ORDER BY Rate DESC",
        )?;
        let rows = stmt
            .query_map(params![RATE_PER_POPULATION, infection_type_id, year], |row| {
                Ok(CountryRate {
                    country: row.get(0)?,
                    region: row.get(1)?,
                    population: row.get(2)?,
                    cases: row.get(3)?,
                    rate: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Countries whose per-100,000 rate strictly exceeds the given global
    /// baseline, ordered by rate descending. Post-aggregation filter: each
    /// country's single (type, year) fact row is grouped before comparison.
    pub fn countries_exceeding_rate(
        &self,
        infection_type_id: i64,
        year: i64,
        global_rate: f64,
    ) -> Result<Vec<ExceedingRate>, RepositoryError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT c.CountryName, t.Description,
                    SUM(i.Cases) * ?1 / SUM(p.Population) AS Rate, i.Year
             FROM InfectionData i
             JOIN Country c ON i.CountryID = c.CountryID
             JOIN Infection_Type t ON i.InfectionTypeID = t.InfectionTypeID
             JOIN CountryPopulation p
               ON i.CountryID = p.CountryID AND i.Year = p.Year
             WHERE i.InfectionTypeID = ?2 AND i.Year = ?3 AND p.Population > 0
             GROUP BY c.CountryName, i.Year
             HAVING Rate > ?4
             ORDER BY Rate DESC",
        )?;
        let rows = stmt
            .query_map(
                params![RATE_PER_POPULATION, infection_type_id, year, global_rate],
                |row| {
                    Ok(ExceedingRate {
                        country: row.get(0)?,
                        infection_type: row.get(1)?,
                        rate: row.get(2)?,
                        year: row.get(3)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Detail-mode rows for the economic-phase report: one row per matching
    /// fact, ordered by phase then country.
    pub fn phase_cases(
        &self,
        filter: &PhaseFilter,
    ) -> Result<Vec<PhaseCaseRecord>, RepositoryError> {
        let (where_clause, binds) = phase_where_clause(filter);
        let sql = format!(
            "SELECT t.Description, c.CountryName, e.Phase, i.Year, i.Cases
             FROM InfectionData i
             JOIN Infection_Type t ON i.InfectionTypeID = t.InfectionTypeID
             JOIN Country c ON i.CountryID = c.CountryID
             JOIN Economy e ON c.EconomyID = e.EconomyID
             {}
             ORDER BY e.Phase, c.CountryName",
            where_clause
        );

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let params: Vec<&dyn ToSql> = binds.iter().map(|v| v as &dyn ToSql).collect();
        let rows = stmt
            .query_map(&params[..], |row| {
                Ok(PhaseCaseRecord {
                    disease: row.get(0)?,
                    country: row.get(1)?,
                    phase: row.get(2)?,
                    year: row.get(3)?,
                    cases: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Summary-mode rows for the economic-phase report: cases summed per
    /// (disease, phase, year), ordered by phase then year.
    pub fn phase_case_summaries(
        &self,
        filter: &PhaseFilter,
    ) -> Result<Vec<PhaseCaseSummary>, RepositoryError> {
        let (where_clause, binds) = phase_where_clause(filter);
        let sql = format!(
            "SELECT t.Description, e.Phase, i.Year, SUM(i.Cases)
             FROM InfectionData i
             JOIN Infection_Type t ON i.InfectionTypeID = t.InfectionTypeID
             JOIN Country c ON i.CountryID = c.CountryID
             JOIN Economy e ON c.EconomyID = e.EconomyID
             {}
             GROUP BY t.Description, e.Phase, i.Year
             ORDER BY e.Phase, i.Year",
            where_clause
        );

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let params: Vec<&dyn ToSql> = binds.iter().map(|v| v as &dyn ToSql).collect();
        let rows = stmt
            .query_map(&params[..], |row| {
                Ok(PhaseCaseSummary {
                    disease: row.get(0)?,
                    phase: row.get(1)?,
                    year: row.get(2)?,
                    total_cases: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

/// Build the shared WHERE clause for the economic-phase queries.
fn phase_where_clause(filter: &PhaseFilter) -> (String, Vec<Value>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut binds: Vec<Value> = Vec::new();

    if let Some(phase) = filter.phase {
        let placeholders = vec!["LOWER(TRIM(?))"; phase.db_phases().len()].join(", ");
        clauses.push(format!("LOWER(TRIM(e.Phase)) IN ({})", placeholders));
        for db_phase in phase.db_phases() {
            binds.push(Value::Text((*db_phase).to_string()));
        }
    }
    if let Some(infection_type) = &filter.infection_type {
        clauses.push("t.Description LIKE '%' || ? || '%'".to_string());
        binds.push(Value::Text(infection_type.clone()));
    }
    if let Some(year) = filter.year {
        clauses.push("i.Year = ?".to_string());
        binds.push(Value::Integer(year));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    (where_clause, binds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::EconomicPhase;
    use crate::testutil::seeded_repository;

    #[test]
    fn test_summary_stats() {
        let (repo, _dir) = seeded_repository();
        let stats = repo.summary_stats().unwrap();
        assert_eq!(stats.total_doses, Some(2_500_000_000));
        assert_eq!(stats.total_cases, Some(70_500));
        assert_eq!(stats.infection_types, 2);
        assert_eq!(stats.countries, 3);
    }

    #[test]
    fn test_summary_stats_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ReportRepository::new(dir.path().join("absent.db"));
        assert!(repo.summary_stats().is_err());
    }

    #[test]
    fn test_personas_and_team() {
        let (repo, _dir) = seeded_repository();
        let personas = repo.personas().unwrap();
        assert_eq!(personas.len(), 2);
        assert_eq!(personas[0].name, "Dr. Amina Rahman");

        let team = repo.team().unwrap();
        assert_eq!(team.len(), 2);
        assert_eq!(team[0].full_name, "Prantik Saha");
        assert_eq!(team[0].student_id, "S4204234");
    }

    #[test]
    fn test_vaccinations_unfiltered_ordering() {
        let (repo, _dir) = seeded_repository();
        let rows = repo.vaccinations(&VaccinationFilter::default()).unwrap();
        assert_eq!(rows.len(), 3);
        // Country ascending, year descending within country.
        assert_eq!(rows[0].country, "Australia");
        assert_eq!(rows[0].year, 2021);
        assert_eq!(rows[1].country, "Australia");
        assert_eq!(rows[1].year, 2020);
        assert_eq!(rows[2].country, "Bangladesh");
    }

    #[test]
    fn test_vaccinations_country_substring() {
        let (repo, _dir) = seeded_repository();
        let filter = VaccinationFilter::from_input("angla", "", "", "");
        let rows = repo.vaccinations(&filter).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "Bangladesh");
    }

    #[test]
    fn test_vaccinations_region_normalized_exact() {
        let (repo, _dir) = seeded_repository();
        let filter = VaccinationFilter::from_input("", "  oceania ", "", "");
        let rows = repo.vaccinations(&filter).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.region == "Oceania"));
    }

    #[test]
    fn test_vaccinations_antigen_normalized_exact() {
        let (repo, _dir) = seeded_repository();
        let filter = VaccinationFilter::from_input("", "", "mcv1", "");
        let rows = repo.vaccinations(&filter).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.antigen == "MCV1"));
    }

    #[test]
    fn test_vaccinations_filters_and_combined() {
        let (repo, _dir) = seeded_repository();
        let filter = VaccinationFilter::from_input("Aus", "Oceania", "MCV1", "2021");
        let rows = repo.vaccinations(&filter).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].coverage, Some(95.0));
        assert_eq!(rows[0].target_pop, Some(5_000_000));
    }

    #[test]
    fn test_vaccinations_invalid_year_means_no_filter() {
        let (repo, _dir) = seeded_repository();
        let filter = VaccinationFilter::from_input("", "", "", "20x1");
        let rows = repo.vaccinations(&filter).unwrap();
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_vaccinations_quote_in_filter_is_literal() {
        let (repo, _dir) = seeded_repository();
        let filter = VaccinationFilter::from_input("O'Brien", "", "", "");
        let rows = repo.vaccinations(&filter).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_infection_type_id_exact_match_only() {
        let (repo, _dir) = seeded_repository();
        assert_eq!(repo.infection_type_id("Measles").unwrap(), Some(1));
        assert_eq!(repo.infection_type_id("measles").unwrap(), None);
        assert_eq!(repo.infection_type_id("Meas").unwrap(), None);
    }

    #[test]
    fn test_global_rate() {
        let (repo, _dir) = seeded_repository();
        // (1000 + 60000 + 9000) * 100000 / (25M + 160M + 15M) = 35.0
        let rate = repo.global_rate(1, 2021).unwrap().unwrap();
        assert!((rate - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_global_rate_undefined_without_population() {
        let (repo, _dir) = seeded_repository();
        // Cholera 2019 has cases but no population rows for that year.
        assert_eq!(repo.global_rate(2, 2019).unwrap(), None);
    }

    #[test]
    fn test_country_rates_ordered_descending() {
        let (repo, _dir) = seeded_repository();
        let rows = repo.country_rates(1, 2021).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].country, "Chad");
        assert!((rows[0].rate.unwrap() - 60.0).abs() < 1e-9);
        assert_eq!(rows[1].country, "Bangladesh");
        assert!((rows[1].rate.unwrap() - 37.5).abs() < 1e-9);
        assert_eq!(rows[2].country, "Australia");
        assert!((rows[2].rate.unwrap() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_countries_exceeding_rate_strictly() {
        let (repo, _dir) = seeded_repository();
        let global = repo.global_rate(1, 2021).unwrap().unwrap();
        let rows = repo.countries_exceeding_rate(1, 2021, global).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].country, "Chad");
        assert_eq!(rows[1].country, "Bangladesh");
        assert!(rows.iter().all(|r| r.rate > global));
    }

    #[test]
    fn test_phase_cases_developing_spans_middle_incomes() {
        let (repo, _dir) = seeded_repository();
        let filter = PhaseFilter {
            phase: Some(EconomicPhase::Developing),
            ..Default::default()
        };
        let rows = repo.phase_cases(&filter).unwrap();
        assert!(!rows.is_empty());
        assert!(rows
            .iter()
            .all(|r| r.phase == "Lower Middle Income" || r.phase == "Upper Middle Income"));
    }

    #[test]
    fn test_phase_summary_matches_detail_totals() {
        let (repo, _dir) = seeded_repository();
        let filter = PhaseFilter::from_input("", "Measles", "2021", "");

        let detail = repo.phase_cases(&filter).unwrap();
        let summaries = repo.phase_case_summaries(&filter).unwrap();

        for summary in &summaries {
            let expected: i64 = detail
                .iter()
                .filter(|r| {
                    r.disease == summary.disease
                        && r.phase == summary.phase
                        && r.year == summary.year
                })
                .filter_map(|r| r.cases)
                .sum();
            assert_eq!(summary.total_cases, Some(expected));
        }
    }

    #[test]
    fn test_phase_cases_substring_type_filter() {
        let (repo, _dir) = seeded_repository();
        let filter = PhaseFilter::from_input("", "easl", "", "");
        let rows = repo.phase_cases(&filter).unwrap();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.disease == "Measles"));
    }
}
