//! Read-only, indexed view over the loaded tables.

use std::collections::HashMap;

use api::model::{CaseRecord, DashboardData, MeasureRecord};

/// The dashboard's in-memory tables plus country → row indexes, so per-country
/// lookups don't scan the whole table on every input change. Built once when
/// the snapshot arrives and never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    data: DashboardData,
    cases_by_country: HashMap<String, Vec<usize>>,
    measures_by_country: HashMap<String, Vec<usize>>,
}

impl Dataset {
    pub fn new(data: DashboardData) -> Self {
        let mut cases_by_country: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, record) in data.cases.iter().enumerate() {
            cases_by_country
                .entry(record.country.clone())
                .or_default()
                .push(index);
        }

        let mut measures_by_country: HashMap<String, Vec<usize>> = HashMap::new();
        for (index, record) in data.measures.iter().enumerate() {
            measures_by_country
                .entry(record.country.clone())
                .or_default()
                .push(index);
        }

        Self {
            data,
            cases_by_country,
            measures_by_country,
        }
    }

    /// Distinct country names, sorted, as produced by the loader.
    pub fn countries(&self) -> &[String] {
        &self.data.countries
    }

    /// Case rows for one country, in source (chronological) order. Unknown
    /// countries yield an empty iterator.
    pub fn cases_for<'a>(&'a self, country: &str) -> impl Iterator<Item = &'a CaseRecord> {
        self.cases_by_country
            .get(country)
            .into_iter()
            .flatten()
            .map(|&index| &self.data.cases[index])
    }

    /// Measure rows for one country, in source order.
    pub fn measures_for<'a>(&'a self, country: &str) -> impl Iterator<Item = &'a MeasureRecord> {
        self.measures_by_country
            .get(country)
            .into_iter()
            .flatten()
            .map(|&index| &self.data.measures[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chart::tests::sample_data;

    #[test]
    fn lookup_returns_only_matching_rows() {
        let dataset = Dataset::new(sample_data());
        for country in dataset.countries() {
            assert!(dataset.cases_for(country).all(|r| &r.country == country));
            assert!(dataset
                .measures_for(country)
                .all(|r| &r.country == country));
        }
    }

    #[test]
    fn lookup_preserves_source_order() {
        let dataset = Dataset::new(sample_data());
        let dates: Vec<_> = dataset.cases_for("Greece").map(|r| r.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn unknown_country_yields_nothing() {
        let dataset = Dataset::new(sample_data());
        assert_eq!(dataset.cases_for("Atlantis").count(), 0);
        assert_eq!(dataset.measures_for("Atlantis").count(), 0);
    }
}
