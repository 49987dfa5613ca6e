//! One-shot dataset loading. Runs on the server before any request is served;
//! failures abort startup and are never retried.

use std::collections::BTreeSet;
use std::env;
use std::io::{Cursor, Read};
use std::sync::OnceLock;

use calamine::{Data, Reader as _, Xlsx};
use serde::Deserialize;
use thiserror::Error;
use time::format_description::FormatItem;
use time::macros::{date, format_description};
use time::Date;
use tracing::{info, warn};

use crate::model::{CaseRecord, DashboardData, MeasureRecord};
use crate::text;

/// Rows must carry at least this many non-missing counts to survive cleaning.
const MIN_OBSERVED: usize = 3;

/// Worksheet holding the measure rows inside the ACAPS workbook.
const MEASURES_SHEET: &str = "Database";

const CASES_SRC_VAR: &str = "COVIDASH_CASES_SRC";
const MEASURES_SRC_VAR: &str = "COVIDASH_MEASURES_SRC";

const DEFAULT_CASES_SRC: &str =
    "https://s3.amazonaws.com/rawstore.datahub.io/739d58f443412d5778140f6c4a28f7c5.csv";
const DEFAULT_MEASURES_SRC: &str = "data/acaps-covid-19-government-measures-dataset.xlsx";

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Excel serial dates count days from this epoch.
const EXCEL_EPOCH: Date = date!(1899 - 12 - 30);

static DATA: OnceLock<DashboardData> = OnceLock::new();

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse case table")]
    Csv(#[from] csv::Error),
    #[error("failed to open measures workbook")]
    Workbook(#[from] calamine::XlsxError),
    #[error("measures workbook has no `{0}` sheet")]
    MissingSheet(&'static str),
    #[error("measures sheet is missing column `{0}`")]
    MissingColumn(&'static str),
    #[error("case table row {row}: invalid date `{value}`")]
    InvalidDate { row: usize, value: String },
}

/// Where the two tables come from. `http(s)://` sources are fetched, anything
/// else is treated as a filesystem path.
#[derive(Debug, Clone)]
pub struct DataSources {
    pub cases: String,
    pub measures: String,
}

impl DataSources {
    pub fn from_env() -> Self {
        Self {
            cases: env::var(CASES_SRC_VAR).unwrap_or_else(|_| DEFAULT_CASES_SRC.to_string()),
            measures: env::var(MEASURES_SRC_VAR)
                .unwrap_or_else(|_| DEFAULT_MEASURES_SRC.to_string()),
        }
    }
}

/// Loads both tables and publishes the snapshot process-wide. Called once from
/// `main` before the server starts; uses blocking I/O for that reason.
pub fn init(sources: &DataSources) -> Result<(), LoadError> {
    if DATA.get().is_some() {
        warn!("dashboard data already initialized, skipping reload");
        return Ok(());
    }

    info!(source = %sources.cases, "loading case table");
    let mut cases = read_cases(fetch_bytes(&sources.cases)?.as_slice())?;
    let dropped = retain_observed(&mut cases);
    info!(rows = cases.len(), dropped, "case table cleaned");

    info!(source = %sources.measures, "loading measures workbook");
    let (measures, skipped) = read_measures(fetch_bytes(&sources.measures)?)?;
    if skipped > 0 {
        warn!(skipped, "measure rows without country or date were skipped");
    }
    info!(rows = measures.len(), "measures loaded");

    let countries = country_list(&cases);
    info!(countries = countries.len(), "dashboard data ready");

    let _ = DATA.set(DashboardData {
        cases,
        measures,
        countries,
    });
    Ok(())
}

/// The loaded snapshot, if [`init`] has completed.
pub fn snapshot() -> Option<&'static DashboardData> {
    DATA.get()
}

fn fetch_bytes(source: &str) -> Result<Vec<u8>, LoadError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let fetch = |url: &str| -> Result<Vec<u8>, reqwest::Error> {
            let response = reqwest::blocking::get(url)?.error_for_status()?;
            Ok(response.bytes()?.to_vec())
        };
        fetch(source).map_err(|source_err| LoadError::Fetch {
            url: source.to_string(),
            source: source_err,
        })
    } else {
        std::fs::read(source).map_err(|source_err| LoadError::Io {
            path: source.to_string(),
            source: source_err,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawCase {
    #[serde(rename = "Country")]
    country: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Confirmed")]
    confirmed: Option<f64>,
    #[serde(rename = "Deaths")]
    deaths: Option<f64>,
    #[serde(rename = "Recovered")]
    recovered: Option<f64>,
}

/// Parses the case CSV. Zero counts become missing values and country aliases
/// are normalized; the threshold drop happens in [`retain_observed`].
fn read_cases<R: Read>(reader: R) -> Result<Vec<CaseRecord>, LoadError> {
    let mut rows = Vec::new();
    for (index, raw) in csv::Reader::from_reader(reader).deserialize().enumerate() {
        let raw: RawCase = raw?;
        let date = parse_iso_date(&raw.date).ok_or_else(|| LoadError::InvalidDate {
            row: index + 1,
            value: raw.date.clone(),
        })?;
        rows.push(CaseRecord {
            country: canonical_country(raw.country.trim()),
            date,
            confirmed: count_value(raw.confirmed),
            deaths: count_value(raw.deaths),
            recovered: count_value(raw.recovered),
        });
    }
    Ok(rows)
}

/// Drops rows with fewer than [`MIN_OBSERVED`] non-missing counts, returning
/// how many were removed. Keeps source (chronological) order.
fn retain_observed(cases: &mut Vec<CaseRecord>) -> usize {
    let before = cases.len();
    cases.retain(|record| record.observed_count() >= MIN_OBSERVED);
    before - cases.len()
}

fn count_value(raw: Option<f64>) -> Option<u64> {
    match raw {
        Some(value) if value > 0.0 => Some(value.round() as u64),
        _ => None,
    }
}

/// Maps source spellings onto the display name the dashboard uses, so the
/// case table and the measures table agree on one country string.
fn canonical_country(name: &str) -> String {
    match name {
        "US" | "United States of America" => "United States".to_string(),
        other => other.to_string(),
    }
}

fn parse_iso_date(value: &str) -> Option<Date> {
    // Tolerate datetime strings by keeping only the date part.
    let date_part = value
        .split(['T', ' '])
        .next()
        .unwrap_or(value)
        .trim();
    Date::parse(date_part, &ISO_DATE).ok()
}

/// Converts an Excel serial day number to a calendar date.
fn excel_serial_date(serial: f64) -> Option<Date> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    Date::from_julian_day(EXCEL_EPOCH.to_julian_day().checked_add(serial.trunc() as i32)?).ok()
}

fn cell_date(cell: &Data) -> Option<Date> {
    match cell {
        Data::DateTime(stamp) => excel_serial_date(stamp.as_f64()),
        Data::Float(serial) => excel_serial_date(*serial),
        Data::Int(serial) => excel_serial_date(*serial as f64),
        Data::String(value) | Data::DateTimeIso(value) => parse_iso_date(value),
        _ => None,
    }
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::String(value) => {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Data::Empty => None,
        other => Some(other.to_string()),
    }
}

/// Reads the ACAPS measures sheet. Returns the parsed rows plus the number of
/// rows skipped for lacking a country or an implementable date.
fn read_measures(bytes: Vec<u8>) -> Result<(Vec<MeasureRecord>, usize), LoadError> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range(MEASURES_SHEET)
        .map_err(|_| LoadError::MissingSheet(MEASURES_SHEET))?;

    let mut rows = range.rows();
    let header = rows.next().ok_or(LoadError::MissingColumn("COUNTRY"))?;
    let column = |name: &'static str| -> Result<usize, LoadError> {
        header
            .iter()
            .position(|cell| matches!(cell, Data::String(text) if text.trim() == name))
            .ok_or(LoadError::MissingColumn(name))
    };
    let country_col = column("COUNTRY")?;
    let date_col = column("DATE_IMPLEMENTED")?;
    let measure_col = column("MEASURE")?;
    let comments_col = column("COMMENTS")?;

    let mut measures = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let country = row.get(country_col).and_then(cell_text);
        let date_implemented = row.get(date_col).and_then(cell_date);
        let measure = row.get(measure_col).and_then(cell_text);
        let (Some(country), Some(date_implemented), Some(measure)) =
            (country, date_implemented, measure)
        else {
            skipped += 1;
            continue;
        };

        let country = canonical_country(&country);
        let comments = row
            .get(comments_col)
            .and_then(cell_text)
            .unwrap_or_default();
        let display_text = text::measure_display_text(date_implemented, &measure, &comments);
        measures.push(MeasureRecord {
            country,
            date_implemented,
            measure,
            comments,
            display_text,
        });
    }
    Ok((measures, skipped))
}

/// Distinct sorted country names from the cleaned case table.
fn country_list(cases: &[CaseRecord]) -> Vec<String> {
    cases
        .iter()
        .map(|record| record.country.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const SAMPLE_CSV: &[u8] = b"Country,Date,Confirmed,Deaths,Recovered\n\
Greece,2020-02-26,1,0,0\n\
Greece,2020-03-20,495,10,19\n\
US,2020-03-20,19101,244,147\n\
Italy,2020-03-20,47021,4032,\n";

    #[test]
    fn zero_counts_become_missing() {
        let cases = read_cases(SAMPLE_CSV).unwrap();
        assert_eq!(cases[0].confirmed, Some(1));
        assert_eq!(cases[0].deaths, None);
        assert_eq!(cases[0].recovered, None);
    }

    #[test]
    fn rows_below_threshold_are_dropped() {
        let mut cases = read_cases(SAMPLE_CSV).unwrap();
        let dropped = retain_observed(&mut cases);
        assert_eq!(dropped, 2);
        assert!(cases
            .iter()
            .all(|record| record.observed_count() >= MIN_OBSERVED));
    }

    #[test]
    fn us_alias_is_normalized() {
        let cases = read_cases(SAMPLE_CSV).unwrap();
        assert!(cases.iter().any(|record| record.country == "United States"));
        assert!(!cases.iter().any(|record| record.country == "US"));
    }

    #[test]
    fn invalid_date_is_fatal() {
        let csv = b"Country,Date,Confirmed,Deaths,Recovered\nGreece,soon,1,2,3\n";
        assert!(matches!(
            read_cases(&csv[..]),
            Err(LoadError::InvalidDate { row: 1, .. })
        ));
    }

    #[test]
    fn excel_serial_matches_calendar() {
        // 2020-03-15 is serial 43905 in the 1900 date system.
        assert_eq!(excel_serial_date(43905.0), Some(date!(2020 - 03 - 15)));
        assert_eq!(excel_serial_date(f64::NAN), None);
    }

    #[test]
    fn iso_dates_tolerate_time_suffix() {
        assert_eq!(
            parse_iso_date("2020-03-15 00:00:00"),
            Some(date!(2020 - 03 - 15))
        );
        assert_eq!(parse_iso_date("2020-03-15"), Some(date!(2020 - 03 - 15)));
        assert_eq!(parse_iso_date("March"), None);
    }

    #[test]
    fn country_list_is_sorted_and_distinct() {
        let mut cases = read_cases(SAMPLE_CSV).unwrap();
        retain_observed(&mut cases);
        let countries = country_list(&cases);
        assert_eq!(countries, vec!["Greece", "United States"]);
    }
}
