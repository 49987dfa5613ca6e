//! The dashboard view: fetches the snapshot once, then re-renders the chart
//! from memory on every input change.

use std::rc::Rc;

use dioxus::prelude::*;

use api::model::DashboardData;

use crate::components::{ChartPanel, CountrySelect, ScaleRadio, SeriesToggle};
use crate::core::chart::{
    build_chart, ChartSelection, ScaleMode, CONFIRMED_SERIES, DEATHS_SERIES, MEASURES_SERIES,
    RECOVERED_SERIES,
};
use crate::core::dataset::Dataset;

/// Preselected country when the data contains it.
const DEFAULT_COUNTRY: &str = "Greece";

#[component]
pub fn Dashboard() -> Element {
    let snapshot = use_resource(api::dashboard_snapshot);

    rsx! {
        section { class: "page page-dashboard",
            h1 { "COVID-19 Pandemic Dashboard" }
            p { class: "page-dashboard__intro",
                "Choose a country to view graphs of the confirmed cases, deaths, or recovered "
                "patients, along with the government measures taken against the pandemic. "
                "Hover over a measure marker for details."
            }

            match &*snapshot.read_unchecked() {
                None => rsx! {
                    p { class: "page-dashboard__status", "Loading case data…" }
                },
                Some(Err(err)) => rsx! {
                    p { class: "page-dashboard__status page-dashboard__status--error",
                        "Couldn't load the dashboard data: {err}"
                    }
                },
                Some(Ok(data)) => rsx! {
                    DashboardLoaded { data: data.clone() }
                },
            }
        }
    }
}

#[component]
fn DashboardLoaded(data: DashboardData) -> Element {
    // The snapshot never changes after load; index it once.
    let dataset = use_hook(|| Rc::new(Dataset::new(data.clone())));

    let selected_country = use_signal(|| default_country(dataset.countries()));
    let scale = use_signal(|| ScaleMode::Linear);
    let confirmed = use_signal(|| true);
    let deaths = use_signal(|| false);
    let recovered = use_signal(|| false);
    let measures = use_signal(|| false);

    let selection = ChartSelection {
        country: selected_country(),
        scale: scale(),
        confirmed: confirmed(),
        deaths: deaths(),
        recovered: recovered(),
        measures: measures(),
    };
    let chart = build_chart(&dataset, &selection);

    rsx! {
        div { class: "dashboard__controls",
            CountrySelect {
                countries: dataset.countries().to_vec(),
                selected: selected_country,
            }
            fieldset { class: "controls__series",
                SeriesToggle { label: CONFIRMED_SERIES, checked: confirmed }
                SeriesToggle { label: DEATHS_SERIES, checked: deaths }
                SeriesToggle { label: RECOVERED_SERIES, checked: recovered }
                SeriesToggle { label: MEASURES_SERIES, checked: measures }
            }
            ScaleRadio { scale }
        }

        ChartPanel { chart }
    }
}

fn default_country(countries: &[String]) -> String {
    if countries.iter().any(|country| country == DEFAULT_COUNTRY) {
        DEFAULT_COUNTRY.to_string()
    } else {
        countries.first().cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::default_country;

    #[test]
    fn prefers_greece_when_present() {
        let countries = vec!["France".to_string(), "Greece".to_string()];
        assert_eq!(default_country(&countries), "Greece");
    }

    #[test]
    fn falls_back_to_first_entry() {
        let countries = vec!["France".to_string(), "Italy".to_string()];
        assert_eq!(default_country(&countries), "France");
        assert_eq!(default_country(&[]), "");
    }
}
