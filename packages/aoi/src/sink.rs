//! Product persistence.
//!
//! A [`ProductSink`] durably stores the dataset and metadata records of a
//! [`Product`]. [`DirectorySink`] writes them as JSON files inside a
//! directory named after the product identifier.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use volcano_aoi_models::ProductId;

use crate::Product;

/// Errors that can occur while persisting a product.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The product directory could not be created.
    #[error("unable to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record file could not be created or written.
    #[error("unable to write {}: {source}", path.display())]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("unable to serialize {}: {source}", path.display())]
    Serialize {
        /// File the record was destined for.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Destination for assembled products.
pub trait ProductSink {
    /// Stores both records of `product`, replacing any previous copy.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the product cannot be stored.
    fn store(&mut self, product: &Product) -> Result<(), SinkError>;
}

/// Writes each product to `{root}/{id}/{id}.dataset.json` and
/// `{root}/{id}/{id}.met.json`.
///
/// Existing files are overwritten.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Creates a sink rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory a product with identifier `id` is written to.
    #[must_use]
    pub fn product_dir(&self, id: &ProductId) -> PathBuf {
        self.root.join(id.as_str())
    }
}

impl ProductSink for DirectorySink {
    fn store(&mut self, product: &Product) -> Result<(), SinkError> {
        let dir = self.product_dir(&product.id);
        std::fs::create_dir_all(&dir).map_err(|source| SinkError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let dataset_path = dir.join(product.id.dataset_file_name());
        write_json(&dataset_path, &product.dataset)?;
        log::info!("Wrote {}", dataset_path.display());

        let met_path = dir.join(product.id.met_file_name());
        write_json(&met_path, &product.metadata)?;
        log::info!("Wrote {}", met_path.display());

        Ok(())
    }
}

/// Serializes `value` as compact JSON to `path`, truncating any existing file.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SinkError> {
    let file = File::create(path).map_err(|source| SinkError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_json_to(BufWriter::new(file), path, value)
}

/// Serializes `value` into `writer` and flushes it. I/O failures surfacing
/// through the serializer are reported as [`SinkError::Write`].
fn write_json_to<W: Write, T: Serialize>(
    mut writer: W,
    path: &Path,
    value: &T,
) -> Result<(), SinkError> {
    serde_json::to_writer(&mut writer, value).map_err(|e| {
        if e.is_io() {
            SinkError::Write {
                path: path.to_path_buf(),
                source: e.into(),
            }
        } else {
            SinkError::Serialize {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    writer.flush().map_err(|source| SinkError::Write {
        path: path.to_path_buf(),
        source,
    })
}
