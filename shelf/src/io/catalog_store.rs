//! Catalog load/save against a single JSON file.
//!
//! The whole catalog is rewritten on every save (temp file + rename). Loading
//! never fails: a missing file seeds a fresh catalog, and an unreadable or
//! malformed file degrades to an empty one.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::catalog::Catalog;
use crate::core::invariants::validate_invariants;
use crate::core::types::Book;
use crate::io::config::write_atomic;

pub const CATALOG_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/catalog/v1.schema.json"
));

const FORMAT_VERSION: u32 = 1;

/// On-disk catalog document.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    version: u32,
    books: Vec<Book>,
}

/// How [`CatalogStore::load`] obtained its catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from an existing catalog file.
    Existing,
    /// No file existed; seed records were created. Carries the save error, if
    /// persisting the seed failed.
    Seeded { save_error: Option<String> },
    /// The file existed but could not be used; started with an empty catalog.
    Fresh { reason: String },
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub catalog: Catalog,
    pub source: LoadSource,
}

/// File-backed catalog persistence.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog, seeding or falling back as needed. Never fails.
    pub fn load(&self) -> Loaded {
        debug!(path = %self.path.display(), "loading catalog");
        if !self.path.exists() {
            let catalog = Catalog::seeded();
            let save_error = self.save(&catalog).err().map(|err| format!("{err:#}"));
            match &save_error {
                None => info!(path = %self.path.display(), "seeded new catalog"),
                Some(err) => warn!(error = %err, "failed to persist seeded catalog"),
            }
            return Loaded {
                catalog,
                source: LoadSource::Seeded { save_error },
            };
        }

        match self.read() {
            Ok(catalog) => {
                debug!(books = catalog.len(), "catalog loaded");
                Loaded {
                    catalog,
                    source: LoadSource::Existing,
                }
            }
            Err(err) => {
                let reason = format!("{err:#}");
                warn!(path = %self.path.display(), error = %reason, "catalog unreadable, starting fresh");
                Loaded {
                    catalog: Catalog::new(),
                    source: LoadSource::Fresh { reason },
                }
            }
        }
    }

    /// Read the catalog file, checking its schema and invariants.
    pub fn read(&self) -> Result<Catalog> {
        let value = self.read_value()?;
        let errors = schema_errors(&value)?;
        if !errors.is_empty() {
            return Err(anyhow!(
                "catalog schema validation failed: {}",
                errors.join("; ")
            ));
        }
        let doc: CatalogDocument = serde_json::from_value(value)
            .with_context(|| format!("deserialize catalog {}", self.path.display()))?;
        let catalog = Catalog::from_books(doc.books);
        let violations = validate_invariants(&catalog);
        if !violations.is_empty() {
            return Err(anyhow!(
                "catalog invariants failed: {}",
                violations.join("; ")
            ));
        }
        Ok(catalog)
    }

    /// Parse the catalog file as raw JSON without any shape checks.
    pub fn read_value(&self) -> Result<Value> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("read catalog {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parse catalog {}", self.path.display()))
    }

    /// Overwrite the catalog file with `catalog`.
    pub fn save(&self, catalog: &Catalog) -> Result<()> {
        debug!(path = %self.path.display(), books = catalog.len(), "saving catalog");
        let doc = CatalogDocument {
            version: FORMAT_VERSION,
            books: catalog.books().to_vec(),
        };
        let mut buf = serde_json::to_string_pretty(&doc).context("serialize catalog")?;
        buf.push('\n');
        write_atomic(&self.path, &buf)
    }
}

/// Validate a JSON value against the embedded catalog schema.
pub fn schema_errors(value: &Value) -> Result<Vec<String>> {
    let schema: Value = serde_json::from_str(CATALOG_SCHEMA).context("parse catalog schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    Ok(compiled
        .iter_errors(value)
        .map(|err| err.to_string())
        .collect())
}
