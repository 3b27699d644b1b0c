//! Row types returned by the report repository.

/// Aggregate facts for the landing page.
#[derive(Debug, Clone)]
pub struct SummaryStats {
    /// SUM(Doses) across all vaccination rows. NULL when the table is empty.
    pub total_doses: Option<i64>,
    /// SUM(Cases) across all infection rows. NULL when the table is empty.
    pub total_cases: Option<i64>,
    /// COUNT(DISTINCT Description) over infection types.
    pub infection_types: i64,
    /// COUNT(DISTINCT CountryID) over countries.
    pub countries: i64,
}

/// Static persona card content for the landing page.
#[derive(Debug, Clone)]
pub struct Persona {
    pub image_path: String,
    pub name: String,
    pub occupation: String,
}

/// Team roster entry for the landing page.
#[derive(Debug, Clone)]
pub struct TeamMember {
    pub full_name: String,
    pub student_id: String,
}

/// One vaccination fact row joined to its dimensions.
#[derive(Debug, Clone)]
pub struct VaccinationRecord {
    pub country: String,
    pub region: String,
    pub antigen: String,
    pub year: i64,
    pub target_pop: Option<i64>,
    pub doses: Option<i64>,
    pub coverage: Option<f64>,
}

/// Per-country infection figures for one (type, year).
#[derive(Debug, Clone)]
pub struct CountryRate {
    pub country: String,
    pub region: String,
    pub population: Option<i64>,
    pub cases: Option<i64>,
    /// Cases per 100,000 population. NULL when the population is zero.
    pub rate: Option<f64>,
}

/// A country whose infection rate exceeds the global baseline.
#[derive(Debug, Clone)]
pub struct ExceedingRate {
    pub country: String,
    pub infection_type: String,
    /// Cases per 100,000 population.
    pub rate: f64,
    pub year: i64,
}

/// Detail-mode row for the economic-phase report.
#[derive(Debug, Clone)]
pub struct PhaseCaseRecord {
    pub disease: String,
    pub country: String,
    pub phase: String,
    pub year: i64,
    pub cases: Option<i64>,
}

/// Summary-mode row for the economic-phase report, grouped by
/// (disease, phase, year).
#[derive(Debug, Clone)]
pub struct PhaseCaseSummary {
    pub disease: String,
    pub phase: String,
    pub year: i64,
    pub total_cases: Option<i64>,
}
