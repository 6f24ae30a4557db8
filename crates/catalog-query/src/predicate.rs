//! Inclusion test built from a [`QueryDescriptor`].
//!
//! Sub-predicates (text, category, tags, ranges, flags) are ANDed. A
//! sub-predicate with nothing configured passes every item. Missing data
//! never errors: a missing metric fails its range check and a missing flag
//! reads as `false`.

use catalog_core::types::{CatalogItem, CategoryFilter, LabelMatch, QueryDescriptor, TagMode};

pub struct Predicate<'q> {
    descriptor: &'q QueryDescriptor,
    needle: Option<String>,
}

impl<'q> Predicate<'q> {
    pub fn new(descriptor: &'q QueryDescriptor) -> Self {
        let text = &descriptor.search_text;
        let needle = (!text.is_empty()).then(|| text.to_lowercase());
        Self { descriptor, needle }
    }

    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.matches_text(item)
            && self.matches_category(item)
            && self.matches_tags(item)
            && self.matches_ranges(item)
            && self.matches_flags(item)
    }

    fn matches_text(&self, item: &CatalogItem) -> bool {
        let Some(needle) = self.needle.as_deref() else { return true };
        let fields = self.descriptor.search_fields;
        contains_folded(&item.name, needle)
            || (fields.tags && item.tags.iter().any(|tag| contains_folded(tag, needle)))
            || (fields.description
                && item.description.as_deref().is_some_and(|d| contains_folded(d, needle)))
    }

    fn matches_category(&self, item: &CatalogItem) -> bool {
        let label_match = self.descriptor.label_match;
        match &self.descriptor.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => label_match.labels_equal(&item.category, category),
            CategoryFilter::AnyOf(categories) => {
                categories.is_empty()
                    || categories.iter().any(|c| label_match.labels_equal(&item.category, c))
            }
        }
    }

    fn matches_tags(&self, item: &CatalogItem) -> bool {
        let wanted = &self.descriptor.tags;
        if wanted.is_empty() {
            return true;
        }
        let label_match = self.descriptor.label_match;
        match self.descriptor.tag_mode {
            TagMode::Any => wanted.iter().any(|tag| item_has_tag(item, tag, label_match)),
            TagMode::All => wanted.iter().all(|tag| item_has_tag(item, tag, label_match)),
        }
    }

    fn matches_ranges(&self, item: &CatalogItem) -> bool {
        self.descriptor
            .ranges
            .iter()
            .all(|(metric, bound)| item.metric(metric).is_some_and(|value| bound.contains(value)))
    }

    fn matches_flags(&self, item: &CatalogItem) -> bool {
        self.descriptor.flags.iter().all(|(name, wanted)| item.flag(name) == *wanted)
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn item_has_tag(item: &CatalogItem, tag: &str, label_match: LabelMatch) -> bool {
    match label_match {
        LabelMatch::Exact => item.has_tag(tag),
        LabelMatch::IgnoreCase => item.tags.iter().any(|t| label_match.labels_equal(t, tag)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::types::{RangeBound, SearchFields};

    fn coach() -> CatalogItem {
        CatalogItem::new("c1", "Maya Lopez", "tennis")
            .with_description("Former collegiate player, clay court specialist")
            .with_tag("Footwork")
            .with_tag("serve")
            .with_metric("rating", 4.8)
            .with_flag("verified", true)
    }

    #[test]
    fn empty_descriptor_matches_everything() {
        let descriptor = QueryDescriptor::new();
        assert!(Predicate::new(&descriptor).matches(&coach()));
    }

    #[test]
    fn search_text_is_matched_verbatim() {
        let descriptor = QueryDescriptor::new().search("   ");
        assert!(!Predicate::new(&descriptor).matches(&coach()));
        let descriptor = QueryDescriptor::new().search("maya ");
        assert!(Predicate::new(&descriptor).matches(&coach()));
        let descriptor = QueryDescriptor::new().search("lopez ");
        assert!(!Predicate::new(&descriptor).matches(&coach()));
    }

    #[test]
    fn search_scans_optional_fields_only_when_enabled() {
        let by_tag = QueryDescriptor::new().search("SERVE");
        assert!(!Predicate::new(&by_tag).matches(&coach()));
        let by_tag = by_tag.search_fields(SearchFields { tags: true, description: false });
        assert!(Predicate::new(&by_tag).matches(&coach()));

        let by_desc = QueryDescriptor::new().search("clay");
        assert!(!Predicate::new(&by_desc).matches(&coach()));
        let by_desc = by_desc.search_fields(SearchFields { tags: false, description: true });
        assert!(Predicate::new(&by_desc).matches(&coach()));
    }

    #[test]
    fn tag_modes_and_label_matching() {
        let any = QueryDescriptor::new().tag("serve").tag("volley");
        assert!(Predicate::new(&any).matches(&coach()));

        let all = any.clone().tag_mode(TagMode::All);
        assert!(!Predicate::new(&all).matches(&coach()));

        let exact = QueryDescriptor::new().tag("footwork");
        assert!(!Predicate::new(&exact).matches(&coach()));
        let folded = exact.label_match(LabelMatch::IgnoreCase);
        assert!(Predicate::new(&folded).matches(&coach()));
    }

    #[test]
    fn missing_metric_fails_closed_and_missing_flag_is_false() {
        let by_price = QueryDescriptor::new().range("price", RangeBound::at_most(100.0));
        assert!(!Predicate::new(&by_price).matches(&coach()));

        let not_delivering = QueryDescriptor::new().flag("delivery", false);
        assert!(Predicate::new(&not_delivering).matches(&coach()));
        let delivering = QueryDescriptor::new().flag("delivery", true);
        assert!(!Predicate::new(&delivering).matches(&coach()));
    }

    #[test]
    fn empty_any_of_category_set_passes() {
        let descriptor = QueryDescriptor::new().categories(Vec::<String>::new());
        assert!(Predicate::new(&descriptor).matches(&coach()));
        let descriptor = QueryDescriptor::new().categories(["golf", "tennis"]);
        assert!(Predicate::new(&descriptor).matches(&coach()));
        let descriptor = QueryDescriptor::new().category("golf");
        assert!(!Predicate::new(&descriptor).matches(&coach()));
    }
}
