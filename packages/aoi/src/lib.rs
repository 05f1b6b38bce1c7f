#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Volcano AOI product assembly.
//!
//! Turns a volcano job context into an area-of-interest product: a circular
//! polygon of `radius_km` around the volcano plus descriptive metadata,
//! stored under a deterministic [`ProductId`].
//!
//! The pipeline is strictly sequential and fails fast:
//!
//! 1. [`context::load_context`] reads and parses the job context.
//! 2. [`assemble`] checks the product type, generates the ring and builds
//!    the records.
//! 3. A [`ProductSink`] persists the records.

pub mod context;
pub mod sink;

use std::path::Path;
use std::str::FromStr as _;

use volcano_aoi_geodesic::generate_ring;
use volcano_aoi_models::{
    AoiPolygon, AoiRequest, DatasetRecord, INPUT_PRODUCT_TYPE, MetadataRecord, ProductId,
    ProductType,
};

pub use context::ConfigError;
pub use sink::{DirectorySink, ProductSink, SinkError};

/// Errors that can occur while producing an AOI product.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// The job context could not be loaded.
    #[error("unable to load job context: {0}")]
    ConfigLoad(#[from] ConfigError),

    /// The job context declares a product type other than the expected one.
    #[error("input product type: {found} does not match: {expected}")]
    TypeMismatch {
        /// Product type found in the context.
        found: String,
        /// Product type the generator accepts.
        expected: ProductType,
    },

    /// The assembled product could not be persisted.
    #[error("unable to persist product: {0}")]
    Sink(#[from] SinkError),
}

/// An assembled AOI product, ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier, also the storage location name.
    pub id: ProductId,
    /// Dataset descriptor.
    pub dataset: DatasetRecord,
    /// Metadata descriptor.
    pub metadata: MetadataRecord,
}

/// Builds the AOI product for `request` without touching any storage.
///
/// # Errors
///
/// Returns [`AssembleError::TypeMismatch`] if the request's product type is
/// not `volcano` (case-insensitive).
pub fn assemble(request: &AoiRequest) -> Result<Product, AssembleError> {
    match ProductType::from_str(&request.product_type) {
        Ok(product_type) if product_type == INPUT_PRODUCT_TYPE => {}
        _ => {
            return Err(AssembleError::TypeMismatch {
                found: request.product_type.clone(),
                expected: INPUT_PRODUCT_TYPE,
            });
        }
    }

    let id = ProductId::new(&request.volcano_number, &request.clean_name);
    log::info!(
        "Generating {id}: {} km around ({}, {})",
        request.radius_km,
        request.latitude,
        request.longitude
    );

    let ring = generate_ring(request.latitude, request.longitude, request.radius_km);
    log::debug!("Generated {} ring vertices for {id}", ring.len());

    Ok(Product {
        dataset: DatasetRecord::new(id.clone(), AoiPolygon::from_ring(&ring)),
        metadata: MetadataRecord::from(request),
        id,
    })
}

/// Assembles the product for `request` and hands it to `sink`.
///
/// Nothing is stored if assembly fails.
///
/// # Errors
///
/// Returns [`AssembleError::TypeMismatch`] for a wrong product type and
/// [`AssembleError::Sink`] if storing fails.
pub fn assemble_and_persist(
    request: &AoiRequest,
    sink: &mut impl ProductSink,
) -> Result<ProductId, AssembleError> {
    let product = assemble(request)?;
    sink.store(&product)?;
    Ok(product.id)
}

/// Loads the job context at `context_path`, then assembles and stores the
/// product.
///
/// # Errors
///
/// Returns [`AssembleError::ConfigLoad`] before doing anything else if the
/// context cannot be loaded, otherwise any error of
/// [`assemble_and_persist`].
pub fn run(context_path: &Path, sink: &mut impl ProductSink) -> Result<ProductId, AssembleError> {
    let request = context::load_context(context_path)?;
    assemble_and_persist(&request, sink)
}
