//! Filter, then stable sort, then aggregate.

use tracing::debug;

use catalog_core::error::Result;
use catalog_core::traits::{CatalogSource, QueryEngine};
use catalog_core::types::{AggregateRequest, Catalog, CatalogItem, QueryDescriptor, QueryResult};

use crate::aggregate;
use crate::comparator::Comparator;
use crate::predicate::Predicate;

/// Runs one query over `items`.
///
/// Aggregates are computed over the filtered, sorted sequence, so ties in
/// `best_by_metric` go to whichever item appears first in `items` of the
/// result. Requests repeating a metric overwrite earlier entries.
pub fn execute<'a>(
    items: &'a [CatalogItem],
    descriptor: &QueryDescriptor,
    aggregates: &[AggregateRequest],
) -> QueryResult<'a> {
    let predicate = Predicate::new(descriptor);
    let mut matched: Vec<&'a CatalogItem> = items.iter().filter(|item| predicate.matches(item)).collect();

    let comparator = Comparator::new(&descriptor.sort_key, descriptor.sort_direction);
    matched.sort_by(|a, b| comparator.compare(a, b));

    let mut best_by_metric = std::collections::BTreeMap::new();
    for request in aggregates {
        if let Some(best) = aggregate::best_by_metric(&matched, &request.metric, request.direction) {
            best_by_metric.insert(request.metric.clone(), best);
        }
    }
    let category_counts = aggregate::category_counts(&matched);
    let total_count = aggregate::count(&matched);

    debug!(
        candidates = items.len(),
        matched = total_count,
        aggregates = best_by_metric.len(),
        "catalog query executed"
    );

    QueryResult { items: matched, total_count, best_by_metric, category_counts }
}

/// [`QueryEngine`] front for [`execute`]. Holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogQueryEngine;

impl CatalogQueryEngine {
    pub fn new() -> Self { Self }

    /// Loads (and validates) from `source`, then hands the catalog to `f`
    /// together with the query result borrowed from it.
    pub fn execute_source<R>(
        &self,
        source: &dyn CatalogSource,
        descriptor: &QueryDescriptor,
        aggregates: &[AggregateRequest],
        f: impl FnOnce(&Catalog, QueryResult<'_>) -> R,
    ) -> Result<R> {
        let catalog = source.load()?;
        let result = execute(catalog.items(), descriptor, aggregates);
        Ok(f(&catalog, result))
    }
}

impl QueryEngine for CatalogQueryEngine {
    fn execute<'a>(
        &self,
        items: &'a [CatalogItem],
        descriptor: &QueryDescriptor,
        aggregates: &[AggregateRequest],
    ) -> QueryResult<'a> {
        execute(items, descriptor, aggregates)
    }
}
