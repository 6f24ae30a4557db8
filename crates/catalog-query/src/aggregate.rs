//! Summary values over an already-filtered sequence.

use std::collections::BTreeMap;

use catalog_core::types::{CatalogItem, SortDirection};

pub fn count(items: &[&CatalogItem]) -> usize {
    items.len()
}

/// Item with the lowest (ascending) or highest (descending) value of
/// `metric` among the items that define it. The first item wins ties.
/// `None` when no item defines the metric.
pub fn best_by_metric<'a>(
    items: &[&'a CatalogItem],
    metric: &str,
    direction: SortDirection,
) -> Option<&'a CatalogItem> {
    let mut best: Option<(&'a CatalogItem, f64)> = None;
    for &item in items {
        let Some(value) = item.metric(metric) else { continue };
        let better = match best {
            None => true,
            Some((_, current)) => match direction {
                SortDirection::Ascending => value < current,
                SortDirection::Descending => value > current,
            },
        };
        if better {
            best = Some((item, value));
        }
    }
    best.map(|(item, _)| item)
}

/// Number of items per category.
pub fn category_counts(items: &[&CatalogItem]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.category.clone()).or_insert(0) += 1;
    }
    counts
}
