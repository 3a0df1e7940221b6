//! Result descriptors and the layer metadata derived from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::datatype::{RasterDataType, ResultType, VectorColumnDataType, VectorDataType};
use crate::error::{WorkbenchError, WorkbenchResult};
use crate::measurement::Measurement;
use crate::spatial_reference::SpatialReference;

/// Result descriptor as returned by the backend for a registered workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDescriptorDict {
    /// Raster (`"U8"`, `"F32"`, ...) or vector (`"MultiPoint"`, ...) type code
    pub data_type: String,

    /// SRS string, e.g. `"EPSG:4326"`
    pub spatial_reference: String,

    /// Column name to column type code (vector results only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<BTreeMap<String, String>>,

    /// Meaning of raster values (raster results only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<Measurement>,
}

/// Whether a layer shows raster or vector data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerType {
    Raster,
    Vector,
}

/// Resolved schema of a raster result.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterLayerMetadata {
    pub data_type: RasterDataType,
    pub spatial_reference: SpatialReference,
    pub measurement: Measurement,
}

/// Resolved schema of a vector result.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorLayerMetadata {
    pub data_type: VectorDataType,
    pub spatial_reference: SpatialReference,
    pub columns: BTreeMap<String, VectorColumnDataType>,
}

impl VectorLayerMetadata {
    /// Names of columns holding numbers, in name order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, t)| t.is_numeric())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn result_type(&self) -> ResultType {
        self.data_type.result_type()
    }
}

/// Read-only metadata of a layer, derived from a [`ResultDescriptorDict`].
#[derive(Debug, Clone, PartialEq)]
pub enum LayerMetadata {
    Raster(RasterLayerMetadata),
    Vector(VectorLayerMetadata),
}

impl LayerMetadata {
    /// Pick the variant from the descriptor's data type code.
    ///
    /// Raster descriptors without a measurement are treated as unitless.
    pub fn from_dict(dict: &ResultDescriptorDict) -> WorkbenchResult<Self> {
        let spatial_reference = SpatialReference::from_srs_string(&dict.spatial_reference)?;

        if let Ok(data_type) = RasterDataType::from_code(&dict.data_type) {
            return Ok(LayerMetadata::Raster(RasterLayerMetadata {
                data_type,
                spatial_reference,
                measurement: dict.measurement.clone().unwrap_or_default(),
            }));
        }

        if let Ok(data_type) = VectorDataType::from_code(&dict.data_type) {
            let columns = dict
                .columns
                .iter()
                .flatten()
                .map(|(name, code)| {
                    VectorColumnDataType::from_code(code).map(|t| (name.clone(), t))
                })
                .collect::<WorkbenchResult<BTreeMap<_, _>>>()?;

            return Ok(LayerMetadata::Vector(VectorLayerMetadata {
                data_type,
                spatial_reference,
                columns,
            }));
        }

        Err(WorkbenchError::malformed(format!(
            "Invalid Data Type: {}",
            dict.data_type
        )))
    }

    pub fn to_dict(&self) -> ResultDescriptorDict {
        match self {
            LayerMetadata::Raster(m) => ResultDescriptorDict {
                data_type: m.data_type.code().to_string(),
                spatial_reference: m.spatial_reference.to_string(),
                columns: None,
                measurement: Some(m.measurement.clone()),
            },
            LayerMetadata::Vector(m) => ResultDescriptorDict {
                data_type: m.data_type.code().to_string(),
                spatial_reference: m.spatial_reference.to_string(),
                columns: Some(
                    m.columns
                        .iter()
                        .map(|(name, t)| (name.clone(), t.code().to_string()))
                        .collect(),
                ),
                measurement: None,
            },
        }
    }

    pub fn layer_type(&self) -> LayerType {
        match self {
            LayerMetadata::Raster(_) => LayerType::Raster,
            LayerMetadata::Vector(_) => LayerType::Vector,
        }
    }

    pub fn result_type(&self) -> ResultType {
        match self {
            LayerMetadata::Raster(_) => ResultType::Raster,
            LayerMetadata::Vector(m) => m.result_type(),
        }
    }

    pub fn spatial_reference(&self) -> &SpatialReference {
        match self {
            LayerMetadata::Raster(m) => &m.spatial_reference,
            LayerMetadata::Vector(m) => &m.spatial_reference,
        }
    }
}
