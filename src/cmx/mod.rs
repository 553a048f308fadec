//! Catalog of character-making (CMX) objects.
//!
//! The catalog is rebuilt from a [`CmxSource`] and persisted to SQLite, one
//! table per kind of part.

pub mod catalog;
pub mod file_name;
pub mod guess;
pub mod names;
pub mod records;
pub mod source;

use std::path::PathBuf;

use thiserror::Error;

use crate::db::DbError;

pub use catalog::{BuildSummary, ObjectCatalog, CATALOG_FILE, SCHEMA_VERSION};
pub use file_name::{CmxFileName, CLASSIC_START, REBOOT_EX_START, REBOOT_START};
pub use guess::guess_object;
pub use names::{NameDict, NameText};
pub use records::{CmxAccessory, CmxBody, CmxObject, CmxObjectBase, CmxPart, Table};
pub use source::{CmxData, CmxDict, CmxSource, RawCmxObject};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("CMX data unavailable at {}: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("failed to parse CMX data: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
