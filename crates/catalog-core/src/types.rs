//! Domain types shared by the query engine, loaders and front ends.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

pub type ItemId = String;
pub type Metrics = BTreeMap<String, f64>;
pub type Flags = BTreeMap<String, bool>;

/// Sentinel category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Sort key value selecting the name ordering instead of a metric.
pub const NAME_SORT_KEY: &str = "name";

/// A listed entity: store, coach, sport, deal or price-comparison option.
///
/// - `id`: unique within a collection, never changed after ingestion
/// - `name`: display text, always scanned by text search
/// - `description`: optional free text, scanned when a query asks for it
/// - `category`: single tag from a domain-specific closed set
/// - `tags`: specialties and features, used by any-of/all-of filters
/// - `numeric_metrics`: rating, distance, price, ... (must be finite)
/// - `flags`: verified, delivery, in-stock, ... (absent reads as `false`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub numeric_metrics: Metrics,
    #[serde(default)]
    pub flags: Flags,
}

impl CatalogItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: category.into(),
            tags: BTreeSet::new(),
            numeric_metrics: Metrics::new(),
            flags: Flags::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.numeric_metrics.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn with_flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.flags.insert(name.into(), value);
        self
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.numeric_metrics.get(name).copied()
    }

    /// Missing flags read as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Ingestion-time shape check. The query engine assumes items passed it.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidItem { id: self.id.clone(), reason: "id is empty".to_string() });
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidItem { id: self.id.clone(), reason: "name is empty".to_string() });
        }
        if let Some((metric, value)) = self.numeric_metrics.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidItem {
                id: self.id.clone(),
                reason: format!("metric '{metric}' is not a finite number ({value})"),
            });
        }
        Ok(())
    }
}

/// A validated collection of items with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(Error::DuplicateId(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[CatalogItem] { &self.items }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Distinct categories in sorted order.
    pub fn categories(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.items.iter().map(|item| item.category.as_str()).collect();
        set.into_iter().collect()
    }
}

/// Which optional fields text search scans besides `name`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFields {
    pub tags: bool,
    pub description: bool,
}

/// Category selection. `All` is the "no filter" sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CategoryRepr", into = "CategoryRepr")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
    AnyOf(BTreeSet<String>),
}

impl CategoryFilter {
    /// Multi-select over `labels`. A selection containing `"all"` is no filter.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: BTreeSet<String> = labels.into_iter().map(Into::into).collect();
        if labels.contains(ALL_CATEGORIES) {
            CategoryFilter::All
        } else {
            CategoryFilter::AnyOf(labels)
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    One(String),
    Many(BTreeSet<String>),
}

impl From<CategoryRepr> for CategoryFilter {
    fn from(repr: CategoryRepr) -> Self {
        match repr {
            CategoryRepr::One(value) => CategoryFilter::from(value.as_str()),
            CategoryRepr::Many(values) => CategoryFilter::from_labels(values),
        }
    }
}

impl From<CategoryFilter> for CategoryRepr {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => CategoryRepr::One(ALL_CATEGORIES.to_string()),
            CategoryFilter::Only(value) => CategoryRepr::One(value),
            CategoryFilter::AnyOf(values) => CategoryRepr::Many(values),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagMode {
    #[default]
    Any,
    All,
}

/// How category and tag labels are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMatch {
    #[default]
    Exact,
    IgnoreCase,
}

impl LabelMatch {
    pub fn labels_equal(self, a: &str, b: &str) -> bool {
        match self {
            LabelMatch::Exact => a == b,
            LabelMatch::IgnoreCase => a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// Inclusive numeric bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeBound {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeBound {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self { Self { min, max } }

    pub fn at_least(min: f64) -> Self { Self { min: Some(min), max: None } }

    pub fn at_most(max: f64) -> Self { Self { min: None, max: Some(max) } }

    /// An inverted bound (`min > max`) contains nothing.
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| min <= value) && self.max.map_or(true, |max| value <= max)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    #[default]
    Name,
    Metric(String),
}

impl From<String> for SortKey {
    fn from(value: String) -> Self {
        if value == NAME_SORT_KEY { SortKey::Name } else { SortKey::Metric(value) }
    }
}

impl From<&str> for SortKey {
    fn from(value: &str) -> Self { SortKey::from(value.to_string()) }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Name => NAME_SORT_KEY.to_string(),
            SortKey::Metric(metric) => metric,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// One catalog query. Built fresh per call; the engine keeps no reference to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryDescriptor {
    pub search_text: String,
    pub search_fields: SearchFields,
    #[serde(alias = "categoryFilter")]
    pub category: CategoryFilter,
    #[serde(alias = "tagFilter")]
    pub tags: BTreeSet<String>,
    pub tag_mode: TagMode,
    pub label_match: LabelMatch,
    #[serde(alias = "rangeFilters")]
    pub ranges: BTreeMap<String, RangeBound>,
    #[serde(alias = "flagFilters")]
    pub flags: BTreeMap<String, bool>,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
}

impl QueryDescriptor {
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    #[must_use]
    pub fn search_fields(mut self, fields: SearchFields) -> Self {
        self.search_fields = fields;
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category = CategoryFilter::from_labels(categories);
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    #[must_use]
    pub fn tag_mode(mut self, mode: TagMode) -> Self {
        self.tag_mode = mode;
        self
    }

    #[must_use]
    pub fn label_match(mut self, label_match: LabelMatch) -> Self {
        self.label_match = label_match;
        self
    }

    #[must_use]
    pub fn range(mut self, metric: impl Into<String>, bound: RangeBound) -> Self {
        self.ranges.insert(metric.into(), bound);
        self
    }

    #[must_use]
    pub fn flag(mut self, name: impl Into<String>, value: bool) -> Self {
        self.flags.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn sort(mut self, key: impl Into<SortKey>, direction: SortDirection) -> Self {
        self.sort_key = key.into();
        self.sort_direction = direction;
        self
    }
}

/// Requests the best item by one metric: ascending picks the minimum,
/// descending the maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRequest {
    pub metric: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl AggregateRequest {
    pub fn new(metric: impl Into<String>, direction: SortDirection) -> Self {
        Self { metric: metric.into(), direction }
    }

    pub fn lowest(metric: impl Into<String>) -> Self { Self::new(metric, SortDirection::Ascending) }

    pub fn highest(metric: impl Into<String>) -> Self { Self::new(metric, SortDirection::Descending) }
}

/// Output of one query. Borrows the caller's items.
///
/// `best_by_metric` only holds entries for requested metrics that at least
/// one matching item defines. `category_counts` counts matches per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<'a> {
    pub items: Vec<&'a CatalogItem>,
    pub total_count: usize,
    pub best_by_metric: BTreeMap<String, &'a CatalogItem>,
    pub category_counts: BTreeMap<String, usize>,
}

impl QueryResult<'_> {
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }
}
