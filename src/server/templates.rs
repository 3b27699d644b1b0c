//! HTML templates for the report pages.
//!
//! Pages are assembled as strings: a shared base layout with top navigation
//! and footer, plus one content builder per report. All dynamic text is
//! escaped before interpolation.

use chrono::Local;

use crate::filters::{EconomicPhase, PhaseFilter, RateSelection, VaccinationFilter};
use crate::models::{
    CountryRate, ExceedingRate, Persona, PhaseCaseRecord, PhaseCaseSummary, TeamMember,
    VaccinationRecord,
};
use crate::utils::{format_coverage, format_opt_count, format_rate, html_escape};

/// Coverage below this percentage is flagged for styling.
pub const LOW_COVERAGE_THRESHOLD: f64 = 50.0;

/// Per-100,000 rate above this is flagged for styling (0.5% of population).
pub const HIGH_RATE_THRESHOLD: f64 = 500.0;

/// Year range offered by the year dropdowns.
const YEAR_RANGE: std::ops::RangeInclusive<i64> = 2000..=2025;

/// Pages in the top navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Vaccination,
    Infection,
    Analysis,
    Economy,
}

impl Page {
    fn links() -> &'static [(Page, &'static str, &'static str)] {
        &[
            (Page::Home, "/", "Home"),
            (Page::Vaccination, "/vaccination", "Vaccination"),
            (Page::Infection, "/infection", "Infection"),
            (Page::Analysis, "/analysis", "Analysis"),
            (Page::Economy, "/economy", "Economy"),
        ]
    }
}

/// Base HTML layout shared by every report page.
pub fn base_template(title: &str, active: Page, content: &str) -> String {
    let mut nav = String::new();
    for (page, href, label) in Page::links() {
        let class = if *page == active { " class=\"active\"" } else { "" };
        nav.push_str(&format!("<a{} href=\"{}\">{}</a>\n            ", class, href, label));
    }

    let today = Local::now().format("%d %B %Y");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} | Immunisation Data Portal</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header class="topnav">
        <span class="logo-title">Immunisation Data Portal</span>
        <nav class="nav-links">
            {}
        </nav>
    </header>
    <main>
        {}
    </main>
    <footer>
        <p>Help | Contacts | Sources</p>
        <p>Last Updated: {}</p>
    </footer>
</body>
</html>"#,
        html_escape(title),
        nav.trim_end(),
        content,
        today
    )
}

/// Landing page content: aggregate facts, persona cards, team roster.
pub fn home_content(
    total_doses: &str,
    total_cases: &str,
    infection_types: &str,
    countries: &str,
    personas: &[Persona],
    team: &[TeamMember],
) -> String {
    let facts = [
        (total_doses, "Total Vaccination Doses"),
        (total_cases, "Total Reported Cases"),
        (infection_types, "Infection Types"),
        (countries, "Countries Tracked"),
    ];
    let mut fact_boxes = String::new();
    for (value, label) in facts {
        fact_boxes.push_str(&format!(
            r#"<div class="fact-box"><span class="fact-value">{}</span><br>{}</div>"#,
            html_escape(value),
            label
        ));
    }

    let persona_html = if personas.is_empty() {
        "<p>No persona data available.</p>".to_string()
    } else {
        personas
            .iter()
            .map(|p| {
                format!(
                    r#"<div class="persona-card">
                <img src="{}" alt="{}" class="persona-img">
                <div class="persona-details"><strong>{}</strong><p>{}</p></div>
            </div>"#,
                    html_escape(&p.image_path),
                    html_escape(&p.name),
                    html_escape(&p.name),
                    html_escape(&p.occupation)
                )
            })
            .collect()
    };

    let team_html = if team.is_empty() {
        "<li>No team data available.</li>".to_string()
    } else {
        team.iter()
            .map(|m| {
                format!(
                    "<li>{} ({})</li>",
                    html_escape(&m.full_name),
                    html_escape(&m.student_id)
                )
            })
            .collect()
    };

    format!(
        r#"<h2>Global Health Snapshot</h2>
        <div class="fact-grid">{}</div>
        <div class="info-box">
            <h3>Personas</h3>
            <div class="personas">{}</div>
        </div>
        <div class="info-box">
            <h3>Our Team</h3>
            <ul class="team-list">{}</ul>
        </div>"#,
        fact_boxes, persona_html, team_html
    )
}

/// Build `<option>` elements for the year dropdowns.
fn year_options(selected: Option<i64>) -> String {
    let mut options = String::from(r#"<option value="">--Select Year--</option>"#);
    for year in YEAR_RANGE {
        let flag = if selected == Some(year) { " selected" } else { "" };
        options.push_str(&format!(r#"<option value="{}"{}>{}</option>"#, year, flag, year));
    }
    options
}

/// Build `<option>` elements for the infection-type dropdowns.
fn infection_type_options(types: &[String], selected: Option<&str>) -> String {
    let mut options = String::from(r#"<option value="">--Select Infection--</option>"#);
    for name in types {
        let escaped = html_escape(name);
        let flag = if selected == Some(name.as_str()) { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            escaped, flag, escaped
        ));
    }
    options
}

/// Vaccination filter report content.
pub fn vaccination_content(filter: &VaccinationFilter, records: &[VaccinationRecord]) -> String {
    let country = html_escape(filter.country.as_deref().unwrap_or(""));
    let region = html_escape(filter.region.as_deref().unwrap_or(""));
    let antigen = html_escape(filter.antigen.as_deref().unwrap_or(""));
    let year = filter.year.map(|y| y.to_string()).unwrap_or_default();

    let rows_html = if records.is_empty() {
        r#"<tr class="no-results"><td colspan="7">No vaccination data found for the given criteria.</td></tr>"#
            .to_string()
    } else {
        records
            .iter()
            .map(|r| {
                let coverage_class =
                    if r.coverage.is_some_and(|c| c < LOW_COVERAGE_THRESHOLD) {
                        "percentage low"
                    } else {
                        "percentage"
                    };
                format!(
                    r#"<tr>
                <td>{}</td><td>{}</td><td>{}</td><td>{}</td>
                <td>{}</td><td>{}</td><td class="{}">{}</td>
            </tr>"#,
                    html_escape(&r.country),
                    html_escape(&r.region),
                    html_escape(&r.antigen),
                    r.year,
                    format_opt_count(r.target_pop),
                    format_opt_count(r.doses),
                    coverage_class,
                    format_coverage(r.coverage)
                )
            })
            .collect()
    };

    format!(
        r#"<div class="filter-panel">
        <h2>Filter Vaccination Data</h2>
        <form method="get" action="/vaccination">
            <label>Country Name:</label>
            <input type="text" name="country" value="{}" placeholder="e.g. Australia">
            <label>Region:</label>
            <input type="text" name="region" value="{}" placeholder="e.g. Oceania">
            <label>Antigen Type:</label>
            <input type="text" name="antigen" value="{}" placeholder="e.g. MCV1">
            <label>Year:</label>
            <input type="number" name="year" value="{}" placeholder="e.g. 2021">
            <div class="apply-reset">
                <button type="submit" class="apply">Apply Filter</button>
                <a href="/vaccination" class="reset">Reset Filters</a>
            </div>
        </form>
    </div>
    <div class="data-panel">
        <h3>Vaccination Coverage Results by Country/Region</h3>
        <table class="data-table">
            <thead><tr>
                <th>Country</th><th>Region</th><th>Antigen Type</th><th>Year</th>
                <th>Target Population</th><th>Doses Administered</th><th>Coverage Rate</th>
            </tr></thead>
            <tbody>{}</tbody>
        </table>
    </div>"#,
        country, region, antigen, year, rows_html
    )
}

/// Result state for the per-country infection rate report.
pub enum RateView<'a> {
    /// Inputs missing or invalid; no query was run.
    Prompt,
    /// Unknown type, empty rows, or uncomputable global rate.
    NoData { selection: &'a RateSelection },
    Data {
        selection: &'a RateSelection,
        global_rate: f64,
        rows: &'a [CountryRate],
    },
}

/// Infection rate report content.
pub fn infection_content(types: &[String], selected: Option<&RateSelection>, view: &RateView) -> String {
    let (selected_type, selected_year) = match selected {
        Some(s) => (Some(s.infection_type.as_str()), Some(s.year)),
        None => (None, None),
    };

    let (header, body) = match view {
        RateView::Prompt => (
            "Select an Infection Type and Year to view data.".to_string(),
            r#"<tr class="no-results"><td colspan="5">Please use the filters to select an infection and year.</td></tr>"#
                .to_string(),
        ),
        RateView::NoData { selection } => (
            format!(
                "Infection Data for {} in {}",
                html_escape(&selection.infection_type),
                selection.year
            ),
            format!(
                r#"<tr class="no-results"><td colspan="5">No infection data found for {} in {}.</td></tr>"#,
                html_escape(&selection.infection_type),
                selection.year
            ),
        ),
        RateView::Data {
            selection,
            global_rate,
            rows,
        } => {
            let header = format!(
                "Infection Data for {} in {} (Global Rate: {} per 100,000)",
                html_escape(&selection.infection_type),
                selection.year,
                format_rate(Some(*global_rate))
            );
            let body = rows
                .iter()
                .map(|r| {
                    let rate_class = if r.rate.is_some_and(|v| v > HIGH_RATE_THRESHOLD) {
                        "percentage high"
                    } else {
                        "percentage"
                    };
                    format!(
                        r#"<tr>
                    <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class="{}">{}</td>
                </tr>"#,
                        html_escape(&r.country),
                        html_escape(&r.region),
                        format_opt_count(r.population),
                        format_opt_count(r.cases),
                        rate_class,
                        format_rate(r.rate)
                    )
                })
                .collect();
            (header, body)
        }
    };

    format!(
        r#"<div class="filter-panel">
        <form method="get" action="/infection" class="filter-form">
            <h2>Filter Infection Data</h2>
            <label>Infection Type:</label>
            <select name="inf_type">{}</select>
            <label>Year:</label>
            <select name="year">{}</select>
            <div class="apply-reset">
                <button type="submit" class="apply">Apply Filter</button>
                <a href="/infection" class="reset">Reset</a>
            </div>
        </form>
        <div class="notes-box">
            <h4>Data Notes</h4>
            <p>Infection Rate is reported cases per 100,000 population.</p>
        </div>
    </div>
    <div class="data-panel">
        <h3>{}</h3>
        <table class="data-table">
            <thead><tr>
                <th>Country</th><th>Region</th><th>Population</th>
                <th>Reported Cases</th><th>Infection Rate (per 100,000)</th>
            </tr></thead>
            <tbody>{}</tbody>
        </table>
    </div>"#,
        infection_type_options(types, selected_type),
        year_options(selected_year),
        header,
        body
    )
}

/// Result state for the exceeding-global-rate report.
pub enum AnalysisView<'a> {
    Prompt,
    /// Global rate undefined or nothing matched.
    NoData { selection: &'a RateSelection },
    Data {
        selection: &'a RateSelection,
        global_rate: f64,
        rows: &'a [ExceedingRate],
    },
}

/// Exceeding-global-rate report content.
pub fn analysis_content(types: &[String], selected: Option<&RateSelection>, view: &AnalysisView) -> String {
    let (selected_type, selected_year) = match selected {
        Some(s) => (Some(s.infection_type.as_str()), Some(s.year)),
        None => (None, None),
    };

    let body = match view {
        AnalysisView::Prompt => {
            r#"<tr class="no-results"><td colspan="4">Please select infection type and year to view results.</td></tr>"#
                .to_string()
        }
        AnalysisView::NoData { selection } => format!(
            r#"<tr class="no-results"><td colspan="4">No data found for {} in {}.</td></tr>"#,
            html_escape(&selection.infection_type),
            selection.year
        ),
        AnalysisView::Data {
            selection,
            global_rate,
            rows,
        } => {
            let mut body = format!(
                r#"<tr class="global-row"><td>Global</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                html_escape(&selection.infection_type),
                format_rate(Some(*global_rate)),
                selection.year
            );
            if rows.is_empty() {
                body.push_str(
                    r#"<tr class="no-results"><td colspan="4">No countries exceed the global rate.</td></tr>"#,
                );
            } else {
                for r in *rows {
                    body.push_str(&format!(
                        r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                        html_escape(&r.country),
                        html_escape(&r.infection_type),
                        format_rate(Some(r.rate)),
                        r.year
                    ));
                }
            }
            body
        }
    };

    format!(
        r#"<div class="filter-panel">
        <form method="get" action="/analysis" class="filter-form">
            <h2>Countries Above the Global Infection Rate</h2>
            <label>Infection Type:</label>
            <select name="inf_type">{}</select>
            <label>Year:</label>
            <select name="year">{}</select>
            <div class="apply-reset">
                <button type="submit" class="apply">Apply Filter</button>
                <a href="/analysis" class="reset">Reset</a>
            </div>
        </form>
    </div>
    <div class="data-panel">
        <table class="data-table">
            <thead><tr>
                <th>Country</th><th>Infection Type</th>
                <th>Infection per 100,000 people</th><th>Year</th>
            </tr></thead>
            <tbody>{}</tbody>
        </table>
    </div>"#,
        infection_type_options(types, selected_type),
        year_options(selected_year),
        body
    )
}

/// Row set for the economic-phase report; headers follow the active mode.
pub enum PhaseView<'a> {
    Detail(&'a [PhaseCaseRecord]),
    Summary(&'a [PhaseCaseSummary]),
}

/// Economic-phase infection report content.
pub fn economy_content(filter: &PhaseFilter, view: &PhaseView) -> String {
    let mut phase_options = String::from(r#"<option value="">--All--</option>"#);
    for phase in EconomicPhase::all() {
        let flag = if filter.phase == Some(*phase) { " selected" } else { "" };
        phase_options.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            phase.token(),
            flag,
            phase.label()
        ));
    }

    let inf_type = html_escape(filter.infection_type.as_deref().unwrap_or(""));

    let (headers, rows_html, columns) = match view {
        PhaseView::Detail(rows) => {
            let headers = "<th>Preventable Disease</th><th>Country</th><th>Economic Phase</th><th>Year</th><th>Reported Cases</th>";
            let body: String = rows
                .iter()
                .map(|r| {
                    format!(
                        r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                        html_escape(&r.disease),
                        html_escape(&r.country),
                        html_escape(&r.phase),
                        r.year,
                        format_opt_count(r.cases)
                    )
                })
                .collect();
            (headers, body, 5)
        }
        PhaseView::Summary(rows) => {
            let headers =
                "<th>Preventable Disease</th><th>Economic Phase</th><th>Year</th><th>Total Cases</th>";
            let body: String = rows
                .iter()
                .map(|r| {
                    format!(
                        r#"<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>"#,
                        html_escape(&r.disease),
                        html_escape(&r.phase),
                        r.year,
                        format_opt_count(r.total_cases)
                    )
                })
                .collect();
            (headers, body, 4)
        }
    };

    let rows_html = if rows_html.is_empty() {
        format!(
            r#"<tr class="no-results"><td colspan="{}">No data found</td></tr>"#,
            columns
        )
    } else {
        rows_html
    };

    format!(
        r#"<div class="filter-panel">
        <form method="get" action="/economy" class="filter-form">
            <h2>Filter Infection Data by Economic Status</h2>
            <label>Economic Status:</label>
            <select name="phase">{}</select>
            <label>Infection Type:</label>
            <input type="text" name="inf_type" value="{}" placeholder="e.g. Measles">
            <label>Year:</label>
            <select name="year">{}</select>
            <div class="apply-reset">
                <button type="submit" class="apply">Apply Filter</button>
                <a href="/economy" class="reset">Reset</a>
                <button type="submit" name="summary" value="1" class="summary">Summarize Data</button>
            </div>
        </form>
    </div>
    <div class="data-panel">
        <table class="data-table">
            <thead><tr>{}</tr></thead>
            <tbody>{}</tbody>
        </table>
    </div>"#,
        phase_options,
        inf_type,
        year_options(filter.year),
        headers,
        rows_html
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_template_marks_active_page() {
        let page = base_template("Home", Page::Home, "<p>hi</p>");
        assert!(page.contains("<!DOCTYPE html>"));
        assert!(page.contains(r#"<a class="active" href="/">Home</a>"#));
        assert!(page.contains(r#"<a href="/vaccination">Vaccination</a>"#));
    }

    #[test]
    fn test_home_content_placeholders_when_empty() {
        let content = home_content("N/A", "N/A", "N/A", "N/A", &[], &[]);
        assert!(content.contains("No persona data available."));
        assert!(content.contains("No team data available."));
    }

    #[test]
    fn test_vaccination_content_flags_low_coverage() {
        let records = vec![
            VaccinationRecord {
                country: "Bangladesh".into(),
                region: "Asia".into(),
                antigen: "MCV1".into(),
                year: 2021,
                target_pop: Some(30_000_000),
                doses: Some(1_300_000_000),
                coverage: Some(42.5),
            },
            VaccinationRecord {
                country: "Australia".into(),
                region: "Oceania".into(),
                antigen: "MCV1".into(),
                year: 2021,
                target_pop: None,
                doses: None,
                coverage: None,
            },
        ];
        let content = vaccination_content(&VaccinationFilter::default(), &records);
        assert!(content.contains(r#"class="percentage low">42.5%"#));
        assert!(content.contains("30,000,000"));
        assert!(content.contains("N/A"));
    }

    #[test]
    fn test_vaccination_content_escapes_filter_echo() {
        let filter = VaccinationFilter::from_input("<b>x</b>", "", "", "");
        let content = vaccination_content(&filter, &[]);
        assert!(content.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(!content.contains("<b>x</b>"));
        assert!(content.contains("No vaccination data found"));
    }

    #[test]
    fn test_infection_content_flags_high_rate() {
        let selection = RateSelection {
            infection_type: "Measles".into(),
            year: 2021,
        };
        let rows = vec![
            CountryRate {
                country: "Chad".into(),
                region: "Africa".into(),
                population: Some(15_000_000),
                cases: Some(90_000),
                rate: Some(600.0),
            },
            CountryRate {
                country: "Australia".into(),
                region: "Oceania".into(),
                population: Some(25_000_000),
                cases: Some(1_000),
                rate: Some(4.0),
            },
        ];
        let content = infection_content(
            &["Measles".into()],
            Some(&selection),
            &RateView::Data {
                selection: &selection,
                global_rate: 302.0,
                rows: &rows,
            },
        );
        assert!(content.contains(r#"class="percentage high">600.0000"#));
        assert!(content.contains(r#"class="percentage">4.0000"#));
    }

    #[test]
    fn test_infection_content_prompt() {
        let content = infection_content(&["Measles".into()], None, &RateView::Prompt);
        assert!(content.contains("Please use the filters"));
        assert!(content.contains("--Select Infection--"));
    }

    #[test]
    fn test_infection_content_selected_option() {
        let selection = RateSelection {
            infection_type: "Measles".into(),
            year: 2021,
        };
        let content = infection_content(
            &["Cholera".into(), "Measles".into()],
            Some(&selection),
            &RateView::NoData {
                selection: &selection,
            },
        );
        assert!(content.contains(r#"<option value="Measles" selected>Measles</option>"#));
        assert!(content.contains(r#"<option value="2021" selected>2021</option>"#));
        assert!(content.contains("No infection data found for Measles in 2021."));
    }

    #[test]
    fn test_analysis_content_global_row_first() {
        let selection = RateSelection {
            infection_type: "Measles".into(),
            year: 2021,
        };
        let rows = vec![ExceedingRate {
            country: "Chad".into(),
            infection_type: "Measles".into(),
            rate: 60.0,
            year: 2021,
        }];
        let content = analysis_content(
            &["Measles".into()],
            Some(&selection),
            &AnalysisView::Data {
                selection: &selection,
                global_rate: 35.0,
                rows: &rows,
            },
        );
        let global_pos = content.find("global-row").unwrap();
        let chad_pos = content.find("Chad").unwrap();
        assert!(global_pos < chad_pos);
        assert!(content.contains("35.0000"));
        assert!(content.contains("60.0000"));
    }

    #[test]
    fn test_economy_content_headers_follow_mode() {
        let filter = PhaseFilter::default();
        let detail = economy_content(&filter, &PhaseView::Detail(&[]));
        assert!(detail.contains("<th>Country</th>"));
        assert!(detail.contains("No data found"));

        let summary = economy_content(&filter, &PhaseView::Summary(&[]));
        assert!(!summary.contains("<th>Country</th>"));
        assert!(summary.contains("<th>Total Cases</th>"));
    }
}
