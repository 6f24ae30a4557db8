use std::fmt::Write;

use catalog_core::types::{CatalogItem, QueryResult};

fn metrics_line(item: &CatalogItem) -> String {
    item.numeric_metrics
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plain-text listing: numbered items, then best-by-metric picks and
/// per-category counts.
pub fn render_text(result: &QueryResult<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found {} items", result.total_count);
    for (i, item) in result.items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}  id={}  category={}", i + 1, item.name, item.id, item.category);
        let metrics = metrics_line(item);
        if !metrics.is_empty() {
            let _ = writeln!(out, "     {}", metrics);
        }
    }
    if !result.best_by_metric.is_empty() {
        let _ = writeln!(out, "\nBest by metric:");
        for (metric, item) in &result.best_by_metric {
            let value = item.metric(metric).unwrap_or_default();
            let _ = writeln!(out, "  {}: {} ({})", metric, item.name, value);
        }
    }
    if !result.category_counts.is_empty() {
        let _ = writeln!(out, "\nCategories:");
        for (category, count) in &result.category_counts {
            let _ = writeln!(out, "  {}: {} items", category, count);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::types::{AggregateRequest, QueryDescriptor, SortDirection};
    use catalog_query::execute;

    #[test]
    fn text_lists_items_best_picks_and_counts() {
        let items = vec![
            CatalogItem::new("1", "Alpha", "gym").with_metric("price", 50.0),
            CatalogItem::new("2", "Beta", "gym").with_metric("price", 30.0),
        ];
        let descriptor = QueryDescriptor::new().sort("price", SortDirection::Ascending);
        let result = execute(&items, &descriptor, &[AggregateRequest::lowest("price")]);
        let text = render_text(&result);
        assert!(text.starts_with("Found 2 items\n  1. Beta  id=2  category=gym\n     price=30\n"));
        assert!(text.contains("  price: Beta (30)"));
        assert!(text.contains("  gym: 2 items"));
    }

    #[test]
    fn empty_result_prints_only_the_count() {
        let result = execute(&[], &QueryDescriptor::new(), &[AggregateRequest::lowest("price")]);
        assert_eq!(render_text(&result), "Found 0 items\n");
    }
}
