//! Common test fixtures for geo workbench tests.
//!
//! Wire-format fixtures are plain JSON values so that each crate decodes
//! them through its own public API.

/// Well-known colors (alpha in `[0, 1]`).
pub mod colors {
    use workbench_common::Color;

    pub const RED: Color = Color::new(255.0, 0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::new(0.0, 255.0, 0.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 255.0, 1.0);
    pub const GRAY: Color = Color::new(127.5, 127.5, 127.5, 1.0);
}

/// Colorizer fixtures.
pub mod colorizers {
    use serde_json::{json, Value};
    use workbench_common::{Color, ColorBreakpoint, Colorizer, LinearGradient, BLACK, WHITE};

    /// `[(0, BLACK), (100, WHITE)]` with the given no-data and default colors.
    pub fn black_to_white(no_data_color: Color, default_color: Color) -> Colorizer {
        LinearGradient::new(
            vec![
                ColorBreakpoint::new(0.0, BLACK),
                ColorBreakpoint::new(100.0, WHITE),
            ],
            no_data_color,
            default_color,
        )
        .expect("ascending breakpoints")
        .into()
    }

    pub fn linear_gradient_json() -> Value {
        json!({
            "LinearGradient": {
                "breakpoints": [
                    {"value": 0.0, "color": [0, 0, 0, 255]},
                    {"value": 50.0, "color": [0, 0, 255, 255]},
                    {"value": 100.0, "color": [255, 255, 255, 255]}
                ],
                "no_data_color": [0, 0, 0, 0],
                "default_color": [255, 0, 0, 255]
            }
        })
    }

    pub fn palette_json() -> Value {
        json!({
            "Palette": {
                "colors": {
                    "1": [255, 0, 0, 255],
                    "2": [0, 255, 0, 255],
                    "3.5": [0, 0, 255, 128]
                },
                "no_data_color": [0, 0, 0, 0],
                "default_color": [128, 128, 128, 255]
            }
        })
    }
}

/// Symbology fixtures in wire format.
pub mod symbologies {
    use serde_json::{json, Value};

    pub fn raster_json() -> Value {
        json!({
            "Raster": {
                "opacity": 0.75,
                "colorizer": super::colorizers::linear_gradient_json()
            }
        })
    }

    /// Points with a radius derived from `population` and a fill color
    /// derived from `category`, labelled with `name`.
    pub fn point_json() -> Value {
        json!({
            "Vector": {
                "Point": {
                    "clustered": false,
                    "radius": {"Derived": {"attribute": "population", "factor": 0.001, "default_value": 8.0}},
                    "fill_color": {"Derived": {
                        "attribute": "category",
                        "colorizer": super::colorizers::palette_json()
                    }},
                    "stroke": {"width": {"Static": 1.0}, "color": {"Static": [0, 0, 0, 255]}},
                    "text": {
                        "attribute": "name",
                        "fill_color": {"Static": [255, 255, 255, 255]},
                        "stroke": {"width": {"Static": 2.0}, "color": {"Static": [0, 0, 0, 255]}}
                    }
                }
            }
        })
    }

    pub fn line_json() -> Value {
        json!({
            "Vector": {
                "Line": {
                    "stroke": {"width": {"Static": 3.0}, "color": {"Static": [0, 0, 255, 255]}}
                }
            }
        })
    }

    pub fn polygon_json() -> Value {
        json!({
            "Vector": {
                "Polygon": {
                    "fill_color": {"Static": [0, 255, 0, 128]},
                    "stroke": {"width": {"Static": 1.0}, "color": {"Static": [0, 0, 0, 255]}}
                }
            }
        })
    }
}

/// Operator trees and dataset ids.
pub mod workflows {
    use uuid::Uuid;
    use workbench_common::{
        DataId, OperatorDict, SourceOperatorDict, WorkflowDict, WorkflowType,
    };

    pub const NDVI_DATASET: Uuid = Uuid::from_u128(0x36574dc3_560a_4b09_9d22_d5945f2b8093);
    pub const PORTS_DATASET: Uuid = Uuid::from_u128(0xa9623a5b_b6c5_404b_bc5a_313ff72e4e75);
    pub const COUNTRIES_DATASET: Uuid = Uuid::from_u128(0xb6191257_3d18_4ae3_a82b_d9f22b1ca24d);

    pub fn internal(dataset_id: Uuid) -> DataId {
        DataId::Internal { dataset_id }
    }

    /// A single raster source.
    pub fn ndvi_raster() -> WorkflowDict {
        WorkflowDict::new(
            WorkflowType::Raster,
            SourceOperatorDict::new("GdalSource", internal(NDVI_DATASET)),
        )
    }

    /// Ports filtered by country polygons: one operator over two sources.
    pub fn ports_in_countries() -> WorkflowDict {
        WorkflowDict::new(
            WorkflowType::Vector,
            OperatorDict::new("PointInPolygonFilter")
                .with_vector_source(SourceOperatorDict::new("OgrSource", internal(PORTS_DATASET)))
                .with_vector_source(SourceOperatorDict::new(
                    "OgrSource",
                    internal(COUNTRIES_DATASET),
                )),
        )
    }
}

/// Result descriptors in wire format.
pub mod descriptors {
    use serde_json::{json, Value};

    pub fn raster_json() -> Value {
        json!({
            "data_type": "U8",
            "spatial_reference": "EPSG:4326",
            "measurement": {"continuous": {"measurement": "NDVI"}}
        })
    }

    pub fn points_json() -> Value {
        json!({
            "data_type": "MultiPoint",
            "spatial_reference": "EPSG:4326",
            "columns": {"name": "text", "population": "int", "category": "category"}
        })
    }
}
