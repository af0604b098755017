//! Visit counts per country/region, for chart buckets and heat-map legends.

use serde::Serialize;
use std::collections::BTreeMap;

use super::types::ResolvedRegion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyRow {
    pub country: String,
    pub region: String,
    pub visits: u64,
}

/// Counts keyed by display labels, iterated in sorted order.
#[derive(Debug, Default, Clone)]
pub struct RegionTally {
    counts: BTreeMap<(String, String), u64>,
}

impl RegionTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one visit. Empty countries are bucketed under the unknown label.
    pub fn record(&mut self, resolved: &ResolvedRegion) {
        let key = (resolved.country_label().to_string(), resolved.region.clone());
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn by_country(&self) -> BTreeMap<&str, u64> {
        let mut out = BTreeMap::new();
        for ((country, _), n) in &self.counts {
            *out.entry(country.as_str()).or_insert(0) += n;
        }
        out
    }

    /// Rows sorted by country, then region.
    pub fn iter(&self) -> impl Iterator<Item = TallyRow> + '_ {
        self.counts.iter().map(|((country, region), n)| TallyRow {
            country: country.clone(),
            region: region.clone(),
            visits: *n,
        })
    }
}

impl<'a> Extend<&'a ResolvedRegion> for RegionTally {
    fn extend<I: IntoIterator<Item = &'a ResolvedRegion>>(&mut self, iter: I) {
        for r in iter {
            self.record(r);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationResolver;
    use crate::region::{Coordinate, LabelMode};

    #[test]
    fn test_tally_buckets() {
        let points = [
            (14.6349, -90.5069),
            (14.60, -90.55),
            (21.0, -86.9),
            (18.0, -95.0),
            (0.0, 0.0),
        ];
        let resolved: Vec<_> = points
            .iter()
            .map(|&(lat, lng)| LocationResolver::classify(Coordinate::new(lat, lng), LabelMode::HeatMap))
            .collect();

        let mut tally = RegionTally::new();
        tally.extend(&resolved);

        assert_eq!(tally.total(), 5);
        let by_country = tally.by_country();
        assert_eq!(by_country.get("Guatemala"), Some(&2));
        assert_eq!(by_country.get("México"), Some(&2));
        assert_eq!(by_country.get("Desconocido"), Some(&1));

        let rows: Vec<_> = tally.iter().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].country, "Desconocido");
        let capital = rows.iter().find(|r| r.region == "Guatemala (Capital)").unwrap();
        assert_eq!(capital.visits, 2);
    }

    #[test]
    fn test_empty_tally() {
        let tally = RegionTally::new();
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.iter().count(), 0);
    }
}
