//! Symbology for workbench layers.
//!
//! Maps feature attributes to visual parameters:
//! - Number and color parameters, static or attribute-derived
//! - Raster, point, line and polygon symbologies
//! - Per-feature stylers with collision-free cache keys
//! - A bounded style cache shared by all features of a render pass

pub mod config;
pub mod params;
pub mod style;
pub mod style_cache;
pub mod styler;
pub mod symbology;

pub use config::StyleCacheConfig;
pub use params::{ColorParam, ColorParamDict, FeatureAttributes, NumberParam};
pub use style::{CircleStyle, StrokeStyle, Style, TextStyle};
pub use style_cache::{CacheStats, StyleCache};
pub use styler::Styler;
pub use symbology::{
    IconStyle, LineSymbology, PointSymbology, PolygonSymbology, RasterSymbology, Stroke,
    Symbology, SymbologyDict, SymbologyType, TextSymbology, VectorSymbology,
};
