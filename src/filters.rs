//! Typed filter extraction from query-string parameters.
//!
//! Raw form values are normalized once per request into structured filter
//! objects. A missing or unparseable value means "no constraint" rather than
//! an error, so every combination of inputs yields a valid filter.

/// Parse a year field: digits only, non-negative. Anything else is treated as
/// "no filter".
pub fn parse_year(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Trim a text field, mapping empty input to "no filter".
fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Filters for the vaccination coverage report. Absent fields combine as
/// "no constraint"; present fields are AND-combined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VaccinationFilter {
    /// Substring match on country name.
    pub country: Option<String>,
    /// Exact match on region name after trim + lowercase.
    pub region: Option<String>,
    /// Exact match on antigen name after trim + lowercase.
    pub antigen: Option<String>,
    /// Exact year match.
    pub year: Option<i64>,
}

impl VaccinationFilter {
    pub fn from_input(country: &str, region: &str, antigen: &str, year: &str) -> Self {
        Self {
            country: non_empty(country),
            region: non_empty(region),
            antigen: non_empty(antigen),
            year: parse_year(year),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.country.is_none()
            && self.region.is_none()
            && self.antigen.is_none()
            && self.year.is_none()
    }
}

/// A fully-specified (infection type, year) selection for the rate reports.
/// Both fields are required; partial input renders a prompt instead of
/// querying.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSelection {
    pub infection_type: String,
    pub year: i64,
}

impl RateSelection {
    pub fn from_input(infection_type: &str, year: &str) -> Option<Self> {
        let infection_type = non_empty(infection_type)?;
        let year = parse_year(year)?;
        Some(Self {
            infection_type,
            year,
        })
    }
}

/// Income-classification bucket, exposed to users as development status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EconomicPhase {
    Developed,
    Developing,
    Underdeveloped,
}

impl EconomicPhase {
    /// Parse a submitted phase value. Accepts the user-facing labels as well
    /// as the database income-classification names, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "developed" | "high income" => Some(Self::Developed),
            "developing" | "upper middle income" | "lower middle income" => Some(Self::Developing),
            "underdeveloped" | "low income" => Some(Self::Underdeveloped),
            _ => None,
        }
    }

    /// Database phase values covered by this bucket. The developing bucket
    /// spans both middle-income classifications.
    pub fn db_phases(&self) -> &'static [&'static str] {
        match self {
            Self::Developed => &["High Income"],
            Self::Developing => &["Upper Middle Income", "Lower Middle Income"],
            Self::Underdeveloped => &["Low Income"],
        }
    }

    /// User-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Developed => "Developed",
            Self::Developing => "Developing",
            Self::Underdeveloped => "Underdeveloped",
        }
    }

    /// Form token used in query strings.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Developed => "developed",
            Self::Developing => "developing",
            Self::Underdeveloped => "underdeveloped",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Developed, Self::Developing, Self::Underdeveloped]
    }
}

/// Filters for the economic-phase infection report.
#[derive(Debug, Clone, Default)]
pub struct PhaseFilter {
    pub phase: Option<EconomicPhase>,
    /// Substring match on infection-type description.
    pub infection_type: Option<String>,
    pub year: Option<i64>,
    /// Summary mode groups by (disease, phase, year) and drops the country
    /// dimension.
    pub summary: bool,
}

impl PhaseFilter {
    pub fn from_input(phase: &str, infection_type: &str, year: &str, summary: &str) -> Self {
        Self {
            phase: EconomicPhase::parse(phase),
            infection_type: non_empty(infection_type),
            year: parse_year(year),
            summary: matches!(summary.trim(), "1" | "true" | "on"),
        }
    }
}
