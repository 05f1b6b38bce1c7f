#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Volcano area-of-interest types.
//!
//! Defines the job context request read from `_context.json`, the
//! deterministic [`ProductId`], and the two records persisted for every
//! product: the [`DatasetRecord`] descriptor and the [`MetadataRecord`].

pub mod timestamp;

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Product version tag embedded in every identifier and dataset record.
pub const VERSION: &str = "v1.0";

/// Prefix of every AOI product identifier.
pub const PRODUCT_PREFIX: &str = "AOI-GVN";

/// Default name of the job context document in the working directory.
pub const DEFAULT_CONTEXT_FILE: &str = "_context.json";

/// First day of the dataset validity window, starting at midnight UTC.
pub const STARTTIME_DATE: NaiveDate = timestamp::date(1990, 1, 1);

/// Last boundary of the dataset validity window, at midnight UTC.
pub const ENDTIME_DATE: NaiveDate = timestamp::date(2030, 1, 1);

/// Kind of input product an AOI can be generated from.
///
/// Parsing is ASCII case-insensitive, so `"Volcano"` and `"VOLCANO"` both
/// resolve to [`ProductType::Volcano`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProductType {
    /// A GVP volcano record.
    Volcano,
}

/// The only product type the AOI generator accepts as input.
pub const INPUT_PRODUCT_TYPE: ProductType = ProductType::Volcano;

/// GVP volcano number.
///
/// Job contexts carry it either as a string (`"0000-01"`) or as a bare
/// number (`283001`). The original JSON representation is kept so that it is
/// written back out unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VolcanoNumber {
    /// Numeric volcano number.
    Number(serde_json::Number),
    /// String volcano number.
    Text(String),
}

impl fmt::Display for VolcanoNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => n.fmt(f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for VolcanoNumber {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// An AOI request as read from the job context.
///
/// Numeric fields accept either JSON numbers or strings holding a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AoiRequest {
    /// Declared input product type, validated by the assembler.
    #[serde(rename = "type")]
    pub product_type: String,
    /// AOI radius in kilometers.
    #[serde(deserialize_with = "deserialize_coerced_f64")]
    pub radius_km: f64,
    /// Human-readable volcano name.
    pub volcano_name: String,
    /// GVP volcano number.
    pub volcano_number: VolcanoNumber,
    /// Filesystem-safe volcano name used in identifiers and paths.
    pub clean_name: String,
    /// Center latitude in degrees.
    #[serde(deserialize_with = "deserialize_coerced_f64")]
    pub latitude: f64,
    /// Center longitude in degrees.
    #[serde(deserialize_with = "deserialize_coerced_f64")]
    pub longitude: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Deserializes an `f64` from either a JSON number or a numeric string.
///
/// # Errors
///
/// Returns an error if the value is neither a number nor a string that
/// parses as one.
pub fn deserialize_coerced_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|e| D::Error::custom(format!("invalid number {text:?}: {e}"))),
    }
}

/// Deterministic product identifier, `AOI-GVN_{volcano_number}-{clean_name}-v1.0`.
///
/// Used both as the dataset label and as the output directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Builds the identifier for a volcano.
    #[must_use]
    pub fn new(volcano_number: &VolcanoNumber, clean_name: &str) -> Self {
        Self(format!(
            "{PRODUCT_PREFIX}_{volcano_number}-{clean_name}-{VERSION}"
        ))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the dataset descriptor, `{id}.dataset.json`.
    #[must_use]
    pub fn dataset_file_name(&self) -> String {
        format!("{}.dataset.json", self.0)
    }

    /// File name of the metadata descriptor, `{id}.met.json`.
    #[must_use]
    pub fn met_file_name(&self) -> String {
        format!("{}.met.json", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single-ring `GeoJSON` polygon.
///
/// Serializes as `{"type": "Polygon", "coordinates": [ring]}` with
/// `[longitude, latitude]` positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AoiPolygon(geojson::Geometry);

impl AoiPolygon {
    /// Wraps a ring of `[lon, lat]` pairs as the polygon's only ring.
    #[must_use]
    pub fn from_ring(ring: &[[f64; 2]]) -> Self {
        let ring: Vec<geojson::Position> = ring.iter().map(|p| p.to_vec()).collect();
        Self(geojson::Geometry::new(geojson::Value::Polygon(vec![ring])))
    }

    /// Returns the exterior ring, or an empty slice if the geometry is not a
    /// polygon (only possible for deserialized input).
    #[must_use]
    pub fn exterior(&self) -> &[geojson::Position] {
        match &self.0.value {
            geojson::Value::Polygon(rings) => {
                rings.first().map(Vec::as_slice).unwrap_or_default()
            }
            _ => &[],
        }
    }
}

/// Dataset descriptor, written to `{id}.dataset.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Product identifier.
    pub label: ProductId,
    /// Product version tag.
    pub version: String,
    /// AOI footprint.
    pub location: AoiPolygon,
    /// Start of the validity window.
    #[serde(with = "timestamp")]
    pub starttime: DateTime<Utc>,
    /// End of the validity window.
    #[serde(with = "timestamp")]
    pub endtime: DateTime<Utc>,
}

impl DatasetRecord {
    /// Builds a dataset record with the fixed version and validity window.
    #[must_use]
    pub fn new(label: ProductId, location: AoiPolygon) -> Self {
        Self {
            label,
            version: VERSION.to_string(),
            location,
            starttime: timestamp::midnight_utc(STARTTIME_DATE),
            endtime: timestamp::midnight_utc(ENDTIME_DATE),
        }
    }
}

/// Metadata descriptor, written to `{id}.met.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// Center latitude in degrees.
    pub latitude: f64,
    /// Center longitude in degrees.
    pub longitude: f64,
    /// Filesystem-safe volcano name.
    pub clean_name: String,
    /// GVP volcano number.
    pub volcano_number: VolcanoNumber,
    /// Human-readable volcano name.
    pub volcano_name: String,
    /// AOI radius in kilometers.
    pub radius: f64,
}

impl From<&AoiRequest> for MetadataRecord {
    fn from(request: &AoiRequest) -> Self {
        Self {
            latitude: request.latitude,
            longitude: request.longitude,
            clean_name: request.clean_name.clone(),
            volcano_number: request.volcano_number.clone(),
            volcano_name: request.volcano_name.clone(),
            radius: request.radius_km,
        }
    }
}
