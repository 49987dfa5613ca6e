//! Chart description types and the update function that assembles one from
//! the current input state. This is the only piece of the dashboard with any
//! branching logic: everything here is pure and safe to call on every render.

use time::Date;

use crate::core::dataset::Dataset;

pub const CONFIRMED_SERIES: &str = "Confirmed Cases";
pub const DEATHS_SERIES: &str = "Deaths";
pub const RECOVERED_SERIES: &str = "Recovered";
pub const MEASURES_SERIES: &str = "Government Measures";

/// Y-axis transform selected by the scale radio group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMode {
    Linear,
    Logarithmic,
}

impl ScaleMode {
    pub const ALL: [ScaleMode; 2] = [ScaleMode::Linear, ScaleMode::Logarithmic];

    /// Axis type keyword the renderer understands.
    pub fn axis_type(self) -> &'static str {
        match self {
            ScaleMode::Linear => "linear",
            ScaleMode::Logarithmic => "log",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScaleMode::Linear => "Linear",
            ScaleMode::Logarithmic => "Logarithmic",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesMode {
    Lines,
    Markers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub size: u32,
    pub symbol: &'static str,
}

/// One line or marker series of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub x: Vec<Date>,
    pub y: Vec<Option<f64>>,
    /// Hover text per point; empty for plain line series.
    pub hover_text: Vec<String>,
    pub visible: bool,
    pub mode: SeriesMode,
    pub marker: Option<MarkerStyle>,
}

impl Series {
    fn lines(name: &'static str, x: Vec<Date>, y: Vec<Option<f64>>, visible: bool) -> Self {
        Self {
            name,
            x,
            y,
            hover_text: Vec::new(),
            visible,
            mode: SeriesMode::Lines,
            marker: None,
        }
    }

    /// Points of this series that carry a value, in order.
    pub fn points(&self) -> impl Iterator<Item = (Date, f64)> + '_ {
        self.x
            .iter()
            .zip(&self.y)
            .filter_map(|(date, value)| value.map(|v| (*date, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub title: String,
    pub show_legend: bool,
    pub x_axis_title: &'static str,
    pub y_axis: ScaleMode,
    pub margin_top: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartDescription {
    pub series: Vec<Series>,
    pub layout: Layout,
}

/// Everything the input controls contribute to one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSelection {
    pub country: String,
    pub scale: ScaleMode,
    pub confirmed: bool,
    pub deaths: bool,
    pub recovered: bool,
    pub measures: bool,
}

impl ChartSelection {
    /// Initial control state: confirmed cases on a linear axis.
    pub fn for_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            scale: ScaleMode::Linear,
            confirmed: true,
            deaths: false,
            recovered: false,
            measures: false,
        }
    }
}

/// Maps the current selection to a chart description. A country with no rows
/// (including one missing from the dropdown entirely) produces four empty
/// series rather than an error.
pub fn build_chart(dataset: &Dataset, selection: &ChartSelection) -> ChartDescription {
    let mut dates = Vec::new();
    let mut confirmed = Vec::new();
    let mut deaths = Vec::new();
    let mut recovered = Vec::new();
    for record in dataset.cases_for(&selection.country) {
        dates.push(record.date);
        confirmed.push(record.confirmed.map(|v| v as f64));
        deaths.push(record.deaths.map(|v| v as f64));
        recovered.push(record.recovered.map(|v| v as f64));
    }

    let mut measure_dates = Vec::new();
    let mut measure_text = Vec::new();
    for record in dataset.measures_for(&selection.country) {
        measure_dates.push(record.date_implemented);
        measure_text.push(record.display_text.clone());
    }
    let measure_count = measure_dates.len();

    ChartDescription {
        series: vec![
            Series::lines(
                CONFIRMED_SERIES,
                dates.clone(),
                confirmed,
                selection.confirmed,
            ),
            Series::lines(DEATHS_SERIES, dates.clone(), deaths, selection.deaths),
            Series::lines(RECOVERED_SERIES, dates, recovered, selection.recovered),
            Series {
                name: MEASURES_SERIES,
                x: measure_dates,
                y: vec![Some(0.0); measure_count],
                hover_text: measure_text,
                visible: selection.measures,
                mode: SeriesMode::Markers,
                marker: Some(MarkerStyle {
                    size: 10,
                    symbol: "diamond",
                }),
            },
        ],
        layout: Layout {
            title: format!("COVID-19 in {}", selection.country),
            show_legend: true,
            x_axis_title: "date",
            y_axis: selection.scale,
            margin_top: 25,
        },
    }
}
