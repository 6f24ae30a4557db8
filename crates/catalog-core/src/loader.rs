//! JSON catalog ingestion.
//!
//! A catalog on disk is either one `.json` file holding an array of items or
//! a directory whose `.json` files (walked recursively, sorted by path) are
//! concatenated. Every item is validated here so queries never re-check.
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::traits::CatalogSource;
use crate::types::{Catalog, CatalogItem};

#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    path: PathBuf,
}

impl JsonCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

    fn list_json_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("json"))
            .map(|e| e.into_path())
            .collect();
        files.sort();
        files
    }
}

impl CatalogSource for JsonCatalogSource {
    fn load(&self) -> Result<Catalog> {
        if !self.path.exists() {
            return Err(Error::NotFound(self.path.display().to_string()));
        }
        let files = if self.path.is_dir() { self.list_json_files() } else { vec![self.path.clone()] };
        let mut items = Vec::new();
        for file in &files {
            let parsed = parse_items_file(file)?;
            debug!(path = %file.display(), items = parsed.len(), "catalog file parsed");
            items.extend(parsed);
        }
        let catalog = Catalog::new(items)?;
        info!(path = %self.path.display(), files = files.len(), items = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}

pub fn parse_items_file(path: &Path) -> Result<Vec<CatalogItem>> {
    let raw = fs::read_to_string(path)?;
    parse_items(&raw).map_err(|e| Error::Parse { path: path.to_path_buf(), message: e.to_string() })
}

/// Parses a JSON array of items without validating them.
pub fn parse_items(json: &str) -> std::result::Result<Vec<CatalogItem>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses and validates a JSON array of items into a catalog.
pub fn catalog_from_json(json: &str) -> Result<Catalog> {
    let items = parse_items(json)
        .map_err(|e| Error::Parse { path: PathBuf::from("<inline>"), message: e.to_string() })?;
    Catalog::new(items)
}
