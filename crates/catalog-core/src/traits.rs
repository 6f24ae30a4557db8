use crate::error::Result;
use crate::types::{AggregateRequest, Catalog, CatalogItem, QueryDescriptor, QueryResult};

/// Anything that can hand over a validated catalog: a static list, a file
/// on disk, an API client.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<Catalog>;
}

impl CatalogSource for Catalog {
    fn load(&self) -> Result<Catalog> { Ok(self.clone()) }
}

pub trait QueryEngine: Send + Sync {
    fn execute<'a>(
        &self,
        items: &'a [CatalogItem],
        descriptor: &QueryDescriptor,
        aggregates: &[AggregateRequest],
    ) -> QueryResult<'a>;
}
