//! Spatial reference systems as carried in result descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{WorkbenchError, WorkbenchResult};

/// An `AUTHORITY:code` spatial reference, e.g. `EPSG:4326`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpatialReference {
    authority: String,
    code: u32,
}

impl SpatialReference {
    pub fn new(authority: impl Into<String>, code: u32) -> Self {
        Self {
            authority: authority.into().to_uppercase(),
            code,
        }
    }

    /// WGS84 geographic (lat/lon in degrees).
    pub fn wgs84() -> Self {
        Self::new("EPSG", 4326)
    }

    /// Web Mercator.
    pub fn web_mercator() -> Self {
        Self::new("EPSG", 3857)
    }

    /// Parse an SRS string.
    ///
    /// Accepts formats like:
    /// - "EPSG:4326"
    /// - "epsg:4326"
    /// - "CRS:84" (treated as EPSG:4326)
    /// - "SR-ORG:81"
    pub fn from_srs_string(s: &str) -> WorkbenchResult<Self> {
        let normalized = s.trim().to_uppercase();
        if normalized == "CRS:84" {
            return Ok(Self::wgs84());
        }

        let (authority, code) = normalized
            .split_once(':')
            .ok_or_else(|| WorkbenchError::malformed(format!("Invalid SRS string: {}", s)))?;
        if authority.is_empty() {
            return Err(WorkbenchError::malformed(format!(
                "Invalid SRS string: {}",
                s
            )));
        }
        let code = code
            .parse::<u32>()
            .map_err(|_| WorkbenchError::malformed(format!("Invalid SRS code: {}", s)))?;

        Ok(Self::new(authority, code))
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    /// Check if this is a geographic (lat/lon) reference.
    pub fn is_geographic(&self) -> bool {
        self.authority == "EPSG" && matches!(self.code, 4326 | 4269)
    }
}

impl Default for SpatialReference {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

impl FromStr for SpatialReference {
    type Err = WorkbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_srs_string(s)
    }
}

impl TryFrom<String> for SpatialReference {
    type Error = WorkbenchError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_srs_string(&s)
    }
}

impl From<SpatialReference> for String {
    fn from(srs: SpatialReference) -> Self {
        srs.to_string()
    }
}
