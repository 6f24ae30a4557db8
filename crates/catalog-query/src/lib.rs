//! catalog-query
//!
//! Filter, sort and aggregate in-memory catalogs. Everything here is pure:
//! inputs are borrowed, nothing is retained between calls, and the same
//! inputs always produce the same result.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod aggregate;
pub mod comparator;
pub mod engine;
pub mod predicate;

pub use comparator::Comparator;
pub use engine::{execute, CatalogQueryEngine};
pub use predicate::Predicate;
