//! Total order over items for a sort key and direction.
//!
//! Names compare case-insensitively by code point, never by locale
//! collation. Metrics compare numerically; an item missing the metric sorts
//! after every item that has it, in both directions.

use std::cmp::Ordering;

use catalog_core::types::{CatalogItem, SortDirection, SortKey};

pub struct Comparator<'q> {
    key: &'q SortKey,
    direction: SortDirection,
}

impl<'q> Comparator<'q> {
    pub fn new(key: &'q SortKey, direction: SortDirection) -> Self { Self { key, direction } }

    pub fn compare(&self, a: &CatalogItem, b: &CatalogItem) -> Ordering {
        match self.key {
            SortKey::Name => self.directed(compare_names(&a.name, &b.name)),
            SortKey::Metric(metric) => match (a.metric(metric), b.metric(metric)) {
                (Some(x), Some(y)) => self.directed(compare_metrics(x, y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// `-0.0` and `0.0` are equal keys; adding `0.0` folds the sign away
/// before `total_cmp`.
fn compare_metrics(x: f64, y: f64) -> Ordering {
    (x + 0.0).total_cmp(&(y + 0.0))
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars().flat_map(char::to_lowercase).cmp(b.chars().flat_map(char::to_lowercase))
}
