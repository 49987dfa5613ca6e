//! End-to-end checks over the public surface: build a snapshot the way the
//! loader would, index it, and drive the chart update function with the
//! combinations the dashboard form can produce.

use api::model::{CaseRecord, DashboardData, MeasureRecord};
use api::text::{measure_display_text, LINE_BREAK};
use time::macros::date;
use time::Date;

use ui::core::chart::{build_chart, ChartSelection, ScaleMode, SeriesMode};
use ui::core::dataset::Dataset;

fn case(country: &str, date: Date, confirmed: u64, deaths: u64, recovered: u64) -> CaseRecord {
    CaseRecord {
        country: country.to_string(),
        date,
        confirmed: Some(confirmed),
        deaths: Some(deaths),
        recovered: Some(recovered),
    }
}

fn snapshot() -> DashboardData {
    let measure_date = date!(2020 - 03 - 23);
    let measure = "Full lockdown";
    let comments = "Movement permitted only with SMS authorization to a dedicated number";
    DashboardData {
        cases: vec![
            case("Greece", date!(2020 - 03 - 10), 89, 1, 3),
            case("Greece", date!(2020 - 03 - 20), 495, 10, 19),
            case("Greece", date!(2020 - 03 - 30), 1212, 46, 52),
            case("Italy", date!(2020 - 03 - 20), 47021, 4032, 4440),
        ],
        measures: vec![MeasureRecord {
            country: "Greece".to_string(),
            date_implemented: measure_date,
            measure: measure.to_string(),
            comments: comments.to_string(),
            display_text: measure_display_text(measure_date, measure, comments),
        }],
        countries: vec!["Greece".to_string(), "Italy".to_string()],
    }
}

#[test]
fn greece_selection_matches_the_documented_example() {
    let dataset = Dataset::new(snapshot());
    let selection = ChartSelection {
        country: "Greece".to_string(),
        scale: ScaleMode::Linear,
        confirmed: true,
        deaths: false,
        recovered: false,
        measures: true,
    };
    let chart = build_chart(&dataset, &selection);

    assert_eq!(chart.series.len(), 4);

    assert_eq!(chart.series[0].name, "Confirmed Cases");
    assert!(chart.series[0].visible);
    assert_eq!(chart.series[1].name, "Deaths");
    assert!(!chart.series[1].visible);
    assert_eq!(chart.series[2].name, "Recovered");
    assert!(!chart.series[2].visible);

    let markers = &chart.series[3];
    assert_eq!(markers.name, "Government Measures");
    assert!(markers.visible);
    assert_eq!(markers.mode, SeriesMode::Markers);
    assert_eq!(markers.marker.map(|m| m.symbol), Some("diamond"));
    assert!(markers.y.iter().all(|y| *y == Some(0.0)));
    assert_eq!(markers.hover_text.len(), 1);

    assert_eq!(chart.layout.y_axis.axis_type(), "linear");
    assert_eq!(chart.layout.title, "COVID-19 in Greece");
}

#[test]
fn hover_text_is_wrapped_markup() {
    let dataset = Dataset::new(snapshot());
    let mut selection = ChartSelection::for_country("Greece");
    selection.measures = true;
    let chart = build_chart(&dataset, &selection);

    let text = &chart.series[3].hover_text[0];
    assert!(text.starts_with("23-03-2020: Full lockdown"));
    assert!(text.contains(LINE_BREAK));
    for line in text.split(LINE_BREAK) {
        assert!(line.chars().count() <= 30);
    }
}

#[test]
fn unknown_country_produces_an_empty_chart() {
    let dataset = Dataset::new(snapshot());
    let chart = build_chart(&dataset, &ChartSelection::for_country("Nonexistent"));

    for series in &chart.series {
        assert_eq!(series.x.len(), 0);
        assert_eq!(series.y.len(), 0);
    }
}

#[test]
fn every_country_filters_to_its_own_rows() {
    let dataset = Dataset::new(snapshot());
    for country in dataset.countries() {
        let mut selection = ChartSelection::for_country(country.clone());
        selection.measures = true;
        let chart = build_chart(&dataset, &selection);

        let expected: Vec<Date> = dataset.cases_for(country).map(|r| r.date).collect();
        assert_eq!(chart.series[0].x, expected);

        let expected_measures: Vec<Date> = dataset
            .measures_for(country)
            .map(|r| r.date_implemented)
            .collect();
        assert_eq!(chart.series[3].x, expected_measures);
    }
}

#[test]
fn logarithmic_selection_switches_the_axis() {
    let dataset = Dataset::new(snapshot());
    let mut selection = ChartSelection::for_country("Greece");
    selection.scale = ScaleMode::Logarithmic;
    let chart = build_chart(&dataset, &selection);
    assert_eq!(chart.layout.y_axis.axis_type(), "log");
}
