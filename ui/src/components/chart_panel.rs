//! Renders a [`ChartDescription`] as inline SVG: polylines for the case
//! series, diamond markers for government measures, with a hover panel for
//! the marker text.

use dioxus::prelude::*;
use time::Date;

use crate::core::chart::{ChartDescription, ScaleMode, Series, SeriesMode};
use crate::core::format;

const VIEW_WIDTH: f64 = 900.0;
const VIEW_HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 48.0;

/// Stroke/fill per series position (confirmed, deaths, recovered, measures).
const SERIES_COLORS: [&str; 4] = ["#1f77b4", "#d62728", "#2ca02c", "#9467bd"];

#[component]
pub fn ChartPanel(chart: ChartDescription) -> Element {
    let mut hovered = use_signal(|| Option::<usize>::None);

    let projection = Projection::fit(&chart, plot_rect(&chart));
    let title = chart.layout.title.clone();

    let Some(projection) = projection else {
        return rsx! {
            section { class: "chart-panel",
                h2 { class: "chart-panel__title", "{title}" }
                p { class: "chart-panel__placeholder",
                    "No data points for this selection. Pick another country or toggle a series on."
                }
            }
        };
    };

    let x_ticks = projection.x_ticks();
    let y_ticks = projection.y_ticks();
    let baseline = projection.baseline();
    let x_title_pos = (
        projection.left + projection.width / 2.0,
        baseline + MARGIN_BOTTOM - 8.0,
    );

    let hover_lines: Vec<String> = hovered()
        .and_then(|index| {
            chart
                .series
                .iter()
                .find(|series| series.mode == SeriesMode::Markers)
                .and_then(|series| series.hover_text.get(index))
        })
        .map(|text| {
            text.split(api::text::LINE_BREAK)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    rsx! {
        section { class: "chart-panel",
            h2 { class: "chart-panel__title", "{title}" }

            svg {
                class: "chart-panel__svg",
                view_box: "0 0 {VIEW_WIDTH} {VIEW_HEIGHT}",
                preserve_aspect_ratio: "xMidYMid meet",
                role: "img",

                // Plot frame
                line {
                    x1: "{projection.left}", y1: "{baseline}",
                    x2: "{projection.left + projection.width}", y2: "{baseline}",
                    class: "chart-panel__axis",
                }
                line {
                    x1: "{projection.left}", y1: "{projection.top}",
                    x2: "{projection.left}", y2: "{baseline}",
                    class: "chart-panel__axis",
                }

                for (position, label) in y_ticks.iter() {
                    line {
                        x1: "{projection.left}", y1: "{position}",
                        x2: "{projection.left + projection.width}", y2: "{position}",
                        class: "chart-panel__gridline",
                    }
                    text {
                        x: "{projection.left - 8.0}", y: "{position + 4.0}",
                        text_anchor: "end",
                        class: "chart-panel__tick",
                        "{label}"
                    }
                }
                for (position, label) in x_ticks.iter() {
                    text {
                        x: "{position}", y: "{baseline + 18.0}",
                        text_anchor: "middle",
                        class: "chart-panel__tick",
                        "{label}"
                    }
                }
                text {
                    x: "{x_title_pos.0}", y: "{x_title_pos.1}",
                    text_anchor: "middle",
                    class: "chart-panel__axis-title",
                    "{chart.layout.x_axis_title}"
                }

                for (index, series) in chart.series.iter().enumerate() {
                    if series.visible && series.mode == SeriesMode::Lines {
                        for points in line_segments(series, &projection) {
                            polyline {
                                points: "{points}",
                                fill: "none",
                                stroke: SERIES_COLORS[index % SERIES_COLORS.len()],
                                stroke_width: "2",
                            }
                        }
                    }
                }

                for (index, series) in chart.series.iter().enumerate() {
                    if series.visible && series.mode == SeriesMode::Markers {
                        for (point, date) in series.x.iter().copied().enumerate() {
                            path {
                                d: diamond_path(
                                    projection.x(date),
                                    baseline,
                                    series.marker.map(|m| m.size).unwrap_or(10) as f64 / 2.0,
                                ),
                                fill: SERIES_COLORS[index % SERIES_COLORS.len()],
                                class: "chart-panel__marker",
                                onmouseenter: move |_| hovered.set(Some(point)),
                                onmouseleave: move |_| hovered.set(None),
                            }
                        }
                    }
                }
            }

            if chart.layout.show_legend {
                ul { class: "chart-panel__legend",
                    for (index, series) in chart.series.iter().enumerate() {
                        if series.visible {
                            li { class: "chart-panel__legend-item",
                                span {
                                    class: "chart-panel__swatch",
                                    style: "background: {SERIES_COLORS[index % SERIES_COLORS.len()]}",
                                }
                                "{series.name}"
                            }
                        }
                    }
                }
            }

            if !hover_lines.is_empty() {
                div { class: "chart-panel__hover",
                    for line in hover_lines.iter() {
                        p { "{line}" }
                    }
                }
            }
        }
    }
}

fn plot_rect(chart: &ChartDescription) -> PlotRect {
    PlotRect {
        left: MARGIN_LEFT,
        top: chart.layout.margin_top as f64,
        width: VIEW_WIDTH - MARGIN_LEFT - MARGIN_RIGHT,
        height: VIEW_HEIGHT - chart.layout.margin_top as f64 - MARGIN_BOTTOM,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps dates and counts into plot-area pixels, honoring the layout's y-axis
/// scale. Log mode works in log10 space; non-positive values pin to the
/// baseline there (the measure markers sit at y = 0 by construction).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Projection {
    x_min: i32,
    x_span: i32,
    y_lo: f64,
    y_hi: f64,
    scale: ScaleMode,
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Projection {
    /// Fits the plot area to every visible point. `None` when nothing visible
    /// has data, which the panel renders as a placeholder instead of axes.
    pub(crate) fn fit(chart: &ChartDescription, rect: PlotRect) -> Option<Self> {
        let visible: Vec<&Series> = chart.series.iter().filter(|s| s.visible).collect();

        let days: Vec<i32> = visible
            .iter()
            .flat_map(|series| series.x.iter().map(|date| date.to_julian_day()))
            .collect();
        let x_min = *days.iter().min()?;
        let x_max = *days.iter().max()?;

        let scale = chart.layout.y_axis;
        let values = visible
            .iter()
            .flat_map(|series| series.points().map(|(_, value)| value));
        let (y_lo, y_hi) = match scale {
            ScaleMode::Linear => {
                let max = values.fold(0.0_f64, f64::max);
                (0.0, if max > 0.0 { max * 1.05 } else { 1.0 })
            }
            ScaleMode::Logarithmic => {
                let positive: Vec<f64> = values.filter(|value| *value > 0.0).collect();
                if positive.is_empty() {
                    (0.0, 1.0)
                } else {
                    let lo = positive.iter().copied().fold(f64::INFINITY, f64::min);
                    let hi = positive.iter().copied().fold(0.0_f64, f64::max);
                    let lo = lo.log10().floor();
                    let hi = hi.log10().ceil();
                    if lo == hi {
                        (lo, lo + 1.0)
                    } else {
                        (lo, hi)
                    }
                }
            }
        };

        Some(Self {
            x_min,
            x_span: x_max - x_min,
            y_lo,
            y_hi,
            scale,
            left: rect.left,
            top: rect.top,
            width: rect.width,
            height: rect.height,
        })
    }

    pub(crate) fn x(&self, date: Date) -> f64 {
        let frac = if self.x_span == 0 {
            0.5
        } else {
            (date.to_julian_day() - self.x_min) as f64 / self.x_span as f64
        };
        self.left + self.width * frac
    }

    pub(crate) fn y(&self, value: f64) -> f64 {
        let transformed = match self.scale {
            ScaleMode::Linear => value,
            ScaleMode::Logarithmic => {
                if value <= 0.0 {
                    self.y_lo
                } else {
                    value.log10()
                }
            }
        };
        let frac = ((transformed - self.y_lo) / (self.y_hi - self.y_lo)).clamp(0.0, 1.0);
        self.top + self.height * (1.0 - frac)
    }

    pub(crate) fn baseline(&self) -> f64 {
        self.top + self.height
    }

    /// Up to five evenly spaced date ticks.
    fn x_ticks(&self) -> Vec<(f64, String)> {
        let steps = if self.x_span == 0 { 0 } else { 4 };
        (0..=steps)
            .map(|step| {
                let day = self.x_min + self.x_span * step / steps.max(1);
                let date = Date::from_julian_day(day).unwrap_or(Date::MIN);
                (self.x(date), format::format_tick_date(date))
            })
            .collect()
    }

    /// Horizontal gridline positions with count labels; decade ticks in log
    /// mode, even divisions otherwise.
    fn y_ticks(&self) -> Vec<(f64, String)> {
        match self.scale {
            ScaleMode::Linear => (0..=4)
                .map(|step| {
                    let value = self.y_lo + (self.y_hi - self.y_lo) * step as f64 / 4.0;
                    (self.y(value), format::format_count(value))
                })
                .collect(),
            ScaleMode::Logarithmic => {
                let lo = self.y_lo as i32;
                let hi = self.y_hi.ceil() as i32;
                let span = (hi - lo).max(1);
                let step = (span as f64 / 5.0).ceil() as i32;
                (lo..=hi)
                    .step_by(step.max(1) as usize)
                    .map(|exponent| {
                        let value = 10f64.powi(exponent);
                        (self.y(value), format::format_count(value))
                    })
                    .collect()
            }
        }
    }
}

/// Splits a line series into polyline `points` strings, breaking at missing
/// values so gaps stay gaps instead of being interpolated across.
fn line_segments(series: &Series, projection: &Projection) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for (date, value) in series.x.iter().zip(&series.y) {
        match value {
            Some(value) => current.push(format!(
                "{:.1},{:.1}",
                projection.x(*date),
                projection.y(*value)
            )),
            None => {
                if current.len() > 1 {
                    segments.push(current.join(" "));
                }
                current.clear();
            }
        }
    }
    if current.len() > 1 {
        segments.push(current.join(" "));
    }
    segments
}

fn diamond_path(cx: f64, cy: f64, radius: f64) -> String {
    format!(
        "M {cx} {} L {} {cy} L {cx} {} L {} {cy} Z",
        cy - radius,
        cx + radius,
        cy + radius,
        cx - radius
    )
}
