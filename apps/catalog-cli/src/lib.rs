//! catalog-cli
//!
//! Argument parsing and rendering for the `catalog-cli` binary.

#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod args;
pub mod render;
