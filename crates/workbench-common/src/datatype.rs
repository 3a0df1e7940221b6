//! Closed sets of raster pixel types, vector geometry types and vector column types.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{WorkbenchError, WorkbenchResult};

// ============================================================================
// Result types
// ============================================================================

/// Kind of output a workflow produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultType {
    Raster,
    Points,
    Lines,
    Polygons,
    Data,
    Plot,
}

impl ResultType {
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            ResultType::Points | ResultType::Lines | ResultType::Polygons | ResultType::Data
        )
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultType::Raster => "Raster",
            ResultType::Points => "Points",
            ResultType::Lines => "Lines",
            ResultType::Polygons => "Polygons",
            ResultType::Data => "Data",
            ResultType::Plot => "Plot",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Raster data types
// ============================================================================

/// Pixel type of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RasterDataType {
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
}

impl RasterDataType {
    pub const ALL: [RasterDataType; 7] = [
        RasterDataType::Byte,
        RasterDataType::Int16,
        RasterDataType::UInt16,
        RasterDataType::Int32,
        RasterDataType::UInt32,
        RasterDataType::Float32,
        RasterDataType::Float64,
    ];

    /// Wire code, e.g. `"U8"`.
    pub fn code(&self) -> &'static str {
        match self {
            RasterDataType::Byte => "U8",
            RasterDataType::Int16 => "I16",
            RasterDataType::UInt16 => "U16",
            RasterDataType::Int32 => "I32",
            RasterDataType::UInt32 => "U32",
            RasterDataType::Float32 => "F32",
            RasterDataType::Float64 => "F64",
        }
    }

    /// Strict lookup by wire code.
    pub fn from_code(code: &str) -> WorkbenchResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| WorkbenchError::malformed(format!("Invalid Data Type: {}", code)))
    }

    /// Smallest representable value.
    ///
    /// Float types report `+inf` here and `-inf` from [`max`](Self::max),
    /// i.e. an empty range. Callers that need a usable bound for floats must
    /// not rely on these.
    pub fn min(&self) -> f64 {
        match self {
            RasterDataType::Byte => f64::from(u8::MIN),
            RasterDataType::Int16 => f64::from(i16::MIN),
            RasterDataType::UInt16 => f64::from(u16::MIN),
            RasterDataType::Int32 => f64::from(i32::MIN),
            RasterDataType::UInt32 => f64::from(u32::MIN),
            RasterDataType::Float32 | RasterDataType::Float64 => f64::INFINITY,
        }
    }

    /// Largest representable value. See [`min`](Self::min) for float types.
    pub fn max(&self) -> f64 {
        match self {
            RasterDataType::Byte => f64::from(u8::MAX),
            RasterDataType::Int16 => f64::from(i16::MAX),
            RasterDataType::UInt16 => f64::from(u16::MAX),
            RasterDataType::Int32 => f64::from(i32::MAX),
            RasterDataType::UInt32 => f64::from(u32::MAX),
            RasterDataType::Float32 | RasterDataType::Float64 => f64::NEG_INFINITY,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, RasterDataType::Float32 | RasterDataType::Float64)
    }

    /// Tagged no-data descriptor for this type.
    pub fn no_data(&self, value: f64) -> NoDataValue {
        NoDataValue {
            data_type: *self,
            value,
        }
    }
}

impl fmt::Display for RasterDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RasterDataType::Byte => "Byte",
            RasterDataType::Int16 => "Int 16",
            RasterDataType::UInt16 => "Unsigned Int 16",
            RasterDataType::Int32 => "Int 32",
            RasterDataType::UInt32 => "Unsigned Int 32",
            RasterDataType::Float32 => "Float 32",
            RasterDataType::Float64 => "Float 64",
        };
        f.write_str(name)
    }
}

impl FromStr for RasterDataType {
    type Err = WorkbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl TryFrom<String> for RasterDataType {
    type Error = WorkbenchError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_code(&code)
    }
}

impl From<RasterDataType> for String {
    fn from(t: RasterDataType) -> Self {
        t.code().to_string()
    }
}

/// A no-data value tagged with its pixel type; serializes as `{"<CODE>": value}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoDataValue {
    pub data_type: RasterDataType,
    pub value: f64,
}

impl Serialize for NoDataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.data_type.code(), &self.value)?;
        map.end()
    }
}

// ============================================================================
// Vector data types
// ============================================================================

/// Geometry type of a vector collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VectorDataType {
    Data,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl VectorDataType {
    pub const ALL: [VectorDataType; 4] = [
        VectorDataType::Data,
        VectorDataType::MultiPoint,
        VectorDataType::MultiLineString,
        VectorDataType::MultiPolygon,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            VectorDataType::Data => "Data",
            VectorDataType::MultiPoint => "MultiPoint",
            VectorDataType::MultiLineString => "MultiLineString",
            VectorDataType::MultiPolygon => "MultiPolygon",
        }
    }

    pub fn from_code(code: &str) -> WorkbenchResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| WorkbenchError::malformed(format!("Invalid Data Type: {}", code)))
    }

    pub fn result_type(&self) -> ResultType {
        match self {
            VectorDataType::Data => ResultType::Data,
            VectorDataType::MultiPoint => ResultType::Points,
            VectorDataType::MultiLineString => ResultType::Lines,
            VectorDataType::MultiPolygon => ResultType::Polygons,
        }
    }
}

impl fmt::Display for VectorDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for VectorDataType {
    type Error = WorkbenchError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_code(&code)
    }
}

impl From<VectorDataType> for String {
    fn from(t: VectorDataType) -> Self {
        t.code().to_string()
    }
}

// ============================================================================
// Vector column data types
// ============================================================================

/// Type of an attribute column in a vector collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum VectorColumnDataType {
    /// Integer numbers (`int`).
    Number,
    /// Floating point numbers (`float`).
    Decimal,
    Text,
    Categorical,
    Media,
    DateTime,
}

impl VectorColumnDataType {
    pub const ALL: [VectorColumnDataType; 6] = [
        VectorColumnDataType::Number,
        VectorColumnDataType::Decimal,
        VectorColumnDataType::Text,
        VectorColumnDataType::Categorical,
        VectorColumnDataType::Media,
        VectorColumnDataType::DateTime,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            VectorColumnDataType::Number => "int",
            VectorColumnDataType::Decimal => "float",
            VectorColumnDataType::Text => "text",
            VectorColumnDataType::Categorical => "category",
            VectorColumnDataType::Media => "media",
            VectorColumnDataType::DateTime => "dateTime",
        }
    }

    pub fn from_code(code: &str) -> WorkbenchResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| {
                WorkbenchError::malformed(format!("Invalid Column Data Type: {}", code))
            })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            VectorColumnDataType::Number | VectorColumnDataType::Decimal
        )
    }
}

impl fmt::Display for VectorColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for VectorColumnDataType {
    type Error = WorkbenchError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_code(&code)
    }
}

impl From<VectorColumnDataType> for String {
    fn from(t: VectorColumnDataType) -> Self {
        t.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_raster_code_idempotence() {
        for t in RasterDataType::ALL {
            assert_eq!(RasterDataType::from_code(t.code()).unwrap(), t);
        }
        assert_eq!(
            RasterDataType::from_code("U64").unwrap_err().kind(),
            ErrorKind::MalformedInput
        );
        // exact match only
        assert!(RasterDataType::from_code("u8").is_err());
    }

    #[test]
    fn test_raster_ranges() {
        assert_eq!(RasterDataType::Byte.min(), 0.0);
        assert_eq!(RasterDataType::Byte.max(), 255.0);
        assert_eq!(RasterDataType::Int16.min(), -32768.0);
        assert_eq!(RasterDataType::UInt32.max(), 4294967295.0);
        assert_eq!(RasterDataType::Float32.min(), f64::INFINITY);
        assert_eq!(RasterDataType::Float64.max(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_no_data_encoding() {
        let nd = RasterDataType::Int16.no_data(-9999.0);
        assert_eq!(
            serde_json::to_value(nd).unwrap(),
            serde_json::json!({"I16": -9999.0})
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(RasterDataType::UInt16.to_string(), "Unsigned Int 16");
        assert_eq!(RasterDataType::Float32.to_string(), "Float 32");
        assert_eq!(VectorDataType::MultiPoint.to_string(), "MultiPoint");
    }

    #[test]
    fn test_vector_result_types() {
        assert_eq!(VectorDataType::MultiPoint.result_type(), ResultType::Points);
        assert_eq!(
            VectorDataType::MultiPolygon.result_type(),
            ResultType::Polygons
        );
        assert!(VectorDataType::Data.result_type().is_vector());
        assert!(!ResultType::Raster.is_vector());
    }

    #[test]
    fn test_column_types() {
        for t in VectorColumnDataType::ALL {
            assert_eq!(VectorColumnDataType::from_code(t.code()).unwrap(), t);
        }
        assert!(VectorColumnDataType::Decimal.is_numeric());
        assert!(!VectorColumnDataType::Categorical.is_numeric());

        let parsed: VectorColumnDataType = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(parsed, VectorColumnDataType::Text);
        assert!(serde_json::from_str::<VectorColumnDataType>("\"blob\"").is_err());
    }
}
