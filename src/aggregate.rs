//! Reduces ranked producer sales into one summary per region.

use std::collections::BTreeMap;

use crate::regions::{is_excluded, same_region};
use crate::sales::ProducerSale;

/// Only the first this-many sales seen per region count towards its averages.
pub const TOP_SALES_PER_REGION: usize = 10;

/// Per-region averages for the active auction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RegionStats {
    pub certified_avg: f64,
    pub non_certified_avg: f64,
    pub has_non_certified: bool,
}

impl RegionStats {
    /// Price used for colouring: the certified average when there is one,
    /// otherwise the non-certified average.
    pub fn display_metric(&self) -> f64 {
        if self.certified_avg > 0.0 {
            self.certified_avg
        } else {
            self.non_certified_avg
        }
    }

    pub fn has_data(&self) -> bool {
        self.certified_avg > 0.0 || self.non_certified_avg > 0.0
    }
}

#[derive(Default)]
struct Buckets {
    taken: usize,
    certified: Vec<f64>,
    non_certified: Vec<f64>,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Builds stats for exactly the recognised `regions`, keyed by their names.
///
/// Sales are expected to arrive in rank order; the first
/// [`TOP_SALES_PER_REGION`] per region are kept in input order and the rest
/// ignored. Sales for unknown regions or for the excluded territory are
/// dropped. Regions without sales get zeroed stats.
pub fn aggregate(sales: &[ProducerSale], regions: &[&str]) -> BTreeMap<String, RegionStats> {
    let mut buckets: BTreeMap<&str, Buckets> = regions
        .iter()
        .copied()
        .filter(|name| !is_excluded(name))
        .map(|name| (name, Buckets::default()))
        .collect();

    for sale in sales {
        if is_excluded(&sale.region) {
            log::trace!("ignoring sale in excluded territory {:?}", sale.region);
            continue;
        }
        let Some(bucket) = buckets
            .iter_mut()
            .find(|(name, _)| same_region(name, &sale.region))
            .map(|(_, b)| b)
        else {
            log::debug!("ignoring sale for unrecognised region {:?}", sale.region);
            continue;
        };
        if bucket.taken >= TOP_SALES_PER_REGION {
            log::trace!("{}: beyond top {TOP_SALES_PER_REGION}, skipped", sale.region);
            continue;
        }
        bucket.taken += 1;
        if sale.certified {
            bucket.certified.push(sale.price);
        } else {
            bucket.non_certified.push(sale.price);
        }
    }

    buckets
        .into_iter()
        .map(|(name, b)| {
            let stats = RegionStats {
                certified_avg: mean(&b.certified),
                non_certified_avg: mean(&b.non_certified),
                has_non_certified: !b.non_certified.is_empty(),
            };
            (name.to_string(), stats)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{EXCLUDED_TERRITORY, province_names};
    use approx::assert_abs_diff_eq;

    fn sale(region: &str, price: f64, certified: bool) -> ProducerSale {
        ProducerSale {
            region: region.to_string(),
            rank: 0,
            producer: "Producer".to_string(),
            district: "District".to_string(),
            price,
            micron: None,
            certified,
            buyer: "Buyer".to_string(),
        }
    }

    #[test]
    fn averages_certified_and_non_certified_separately() {
        let sales = vec![
            sale("A", 100.0, true),
            sale("A", 200.0, true),
            sale("A", 50.0, false),
        ];
        let stats = aggregate(&sales, &["A", "B"]);
        assert_eq!(
            stats["A"],
            RegionStats { certified_avg: 150.0, non_certified_avg: 50.0, has_non_certified: true }
        );
        assert_eq!(stats["B"], RegionStats::default());
        assert!(!stats["B"].has_non_certified);
    }

    #[test]
    fn output_covers_exactly_the_recognised_regions() {
        let sales = vec![
            sale("Eastern Cape", 250.0, true),
            sale("Atlantis", 999.0, true),
            sale(EXCLUDED_TERRITORY, 300.0, true),
        ];
        let names = province_names();
        let empty: Vec<ProducerSale> = Vec::new();
        for input in [&sales, &empty] {
            let stats = aggregate(input, &names);
            assert_eq!(stats.len(), 9);
            assert!(names.iter().all(|n| stats.contains_key(*n)));
            assert!(!stats.contains_key(EXCLUDED_TERRITORY));
            assert!(!stats.contains_key("Atlantis"));
        }
    }

    #[test]
    fn excluded_territory_is_dropped_even_when_listed() {
        let stats = aggregate(&[sale(EXCLUDED_TERRITORY, 300.0, true)], &["A", EXCLUDED_TERRITORY]);
        assert_eq!(stats.len(), 1);
        assert!(stats.contains_key("A"));
    }

    #[test]
    fn keeps_first_ten_per_region_in_input_order() {
        let mut sales: Vec<_> = (0..10).map(|_| sale("A", 100.0, true)).collect();
        sales.push(sale("A", 1000.0, false));
        sales.push(sale("B", 40.0, false));
        let stats = aggregate(&sales, &["A", "B"]);
        assert_abs_diff_eq!(stats["A"].certified_avg, 100.0);
        assert!(!stats["A"].has_non_certified);
        assert_abs_diff_eq!(stats["B"].non_certified_avg, 40.0);
    }

    #[test]
    fn matches_region_names_loosely() {
        let stats = aggregate(&[sale("  free state ", 80.0, true)], &["Free State"]);
        assert_abs_diff_eq!(stats["Free State"].certified_avg, 80.0);
    }

    #[test]
    fn display_metric_falls_back_to_non_certified() {
        let only_nc = RegionStats { certified_avg: 0.0, non_certified_avg: 70.0, has_non_certified: true };
        let both = RegionStats { certified_avg: 120.0, non_certified_avg: 70.0, has_non_certified: true };
        assert_abs_diff_eq!(only_nc.display_metric(), 70.0);
        assert_abs_diff_eq!(both.display_metric(), 120.0);
        assert!(!RegionStats::default().has_data());
    }
}
