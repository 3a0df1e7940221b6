//! Rendering descriptions bound to layers.
//!
//! Wire form:
//! - `{"Raster": {"opacity": 1.0, "colorizer": {...}}}`
//! - `{"Vector": {"Point": {...}}}`, `{"Vector": {"Line": {...}}}`,
//!   `{"Vector": {"Polygon": {...}}}`

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use workbench_common::{Color, Colorizer, ColorizerDict, WorkbenchError, WorkbenchResult};

use crate::params::{text_attribute, ColorParam, ColorParamDict, FeatureAttributes, NumberParam};
use crate::style::Style;
use crate::style_cache::StyleCache;
use crate::styler::{LineStyler, PointStyler, PolygonStyler, StrokeStyler, Styler, TextStyler};

pub const DEFAULT_VECTOR_STROKE_COLOR: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const DEFAULT_VECTOR_FILL_COLOR: Color = Color::new(255.0, 0.0, 0.0, 1.0);
pub const DEFAULT_POINT_RADIUS: f64 = 8.0;
pub const MIN_POINT_RADIUS: f64 = 1.0;
pub const MAX_POINT_RADIUS: f64 = 100.0;
pub const MAX_ALLOWED_TEXT_LENGTH: usize = 25;

/// Discriminant of a [`Symbology`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbologyType {
    Raster,
    Point,
    Line,
    Polygon,
}

/// Legend icon parameters of a vector symbology.
#[derive(Debug, Clone, PartialEq)]
pub struct IconStyle {
    pub stroke_width: f64,
    pub stroke_color: Color,
    /// Absent for lines
    pub fill_color: Option<Color>,
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SymbologyDict {
    Raster(RasterSymbologyDict),
    Vector(VectorSymbologyDict),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VectorSymbologyDict {
    Point(PointSymbologyDict),
    Line(LineSymbologyDict),
    Polygon(PolygonSymbologyDict),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterSymbologyDict {
    pub opacity: f64,
    pub colorizer: ColorizerDict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeDict {
    pub width: NumberParam,
    pub color: ColorParamDict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSymbologyDict {
    pub attribute: String,
    pub fill_color: ColorParamDict,
    pub stroke: StrokeDict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSymbologyDict {
    pub clustered: bool,
    pub radius: NumberParam,
    pub fill_color: ColorParamDict,
    pub stroke: StrokeDict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextSymbologyDict>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSymbologyDict {
    pub stroke: StrokeDict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextSymbologyDict>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonSymbologyDict {
    pub fill_color: ColorParamDict,
    pub stroke: StrokeDict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextSymbologyDict>,
}

// ============================================================================
// Building blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub width: NumberParam,
    pub color: ColorParam,
}

impl Stroke {
    pub fn new(width: impl Into<NumberParam>, color: impl Into<ColorParam>) -> Self {
        Self {
            width: width.into(),
            color: color.into(),
        }
    }

    pub fn create_styler(&self, attributes: &FeatureAttributes) -> StrokeStyler {
        StrokeStyler {
            width: self.width.get_number(attributes),
            color: self.color.get_color(attributes),
        }
    }

    pub fn from_dict(dict: &StrokeDict) -> WorkbenchResult<Self> {
        Ok(Self {
            width: dict.width.clone(),
            color: ColorParam::from_dict(&dict.color)?,
        })
    }

    pub fn to_dict(&self) -> StrokeDict {
        StrokeDict {
            width: self.width.clone(),
            color: self.color.to_dict(),
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(1.0, DEFAULT_VECTOR_STROKE_COLOR)
    }
}

/// Label drawn from a feature attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSymbology {
    pub attribute: String,
    pub fill_color: ColorParam,
    pub stroke: Stroke,
}

impl TextSymbology {
    pub fn new(attribute: impl Into<String>, fill_color: impl Into<ColorParam>, stroke: Stroke) -> Self {
        Self {
            attribute: attribute.into(),
            fill_color: fill_color.into(),
            stroke,
        }
    }

    /// Features without a value for the attribute get an empty label.
    pub fn create_styler(&self, attributes: &FeatureAttributes) -> TextStyler {
        TextStyler {
            text: text_attribute(attributes, &self.attribute).unwrap_or_default(),
            fill_color: self.fill_color.get_color(attributes),
            stroke: self.stroke.create_styler(attributes),
        }
    }

    pub fn from_dict(dict: &TextSymbologyDict) -> WorkbenchResult<Self> {
        Ok(Self {
            attribute: dict.attribute.clone(),
            fill_color: ColorParam::from_dict(&dict.fill_color)?,
            stroke: Stroke::from_dict(&dict.stroke)?,
        })
    }

    pub fn to_dict(&self) -> TextSymbologyDict {
        TextSymbologyDict {
            attribute: self.attribute.clone(),
            fill_color: self.fill_color.to_dict(),
            stroke: self.stroke.to_dict(),
        }
    }
}

fn text_from_dict(dict: &Option<TextSymbologyDict>) -> WorkbenchResult<Option<TextSymbology>> {
    dict.as_ref().map(TextSymbology::from_dict).transpose()
}

// ============================================================================
// Raster
// ============================================================================

/// Uniform coloring of raster values.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSymbology {
    opacity: f64,
    colorizer: Colorizer,
}

impl RasterSymbology {
    /// `opacity` must lie in `[0, 1]`.
    pub fn new(opacity: f64, colorizer: Colorizer) -> WorkbenchResult<Self> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(WorkbenchError::out_of_range(format!(
                "opacity must be within [0, 1], got {}",
                opacity
            )));
        }
        Ok(Self { opacity, colorizer })
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn colorizer(&self) -> &Colorizer {
        &self.colorizer
    }

    pub fn with_opacity(&self, opacity: f64) -> WorkbenchResult<Self> {
        Self::new(opacity, self.colorizer.clone())
    }

    pub fn with_colorizer(&self, colorizer: Colorizer) -> Self {
        Self {
            opacity: self.opacity,
            colorizer,
        }
    }

    pub fn from_dict(dict: &RasterSymbologyDict) -> WorkbenchResult<Self> {
        Self::new(dict.opacity, Colorizer::from_dict(&dict.colorizer)?)
    }

    pub fn to_dict(&self) -> RasterSymbologyDict {
        RasterSymbologyDict {
            opacity: self.opacity,
            colorizer: self.colorizer.to_dict(),
        }
    }
}

// ============================================================================
// Vector
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PointSymbology {
    pub clustered: bool,
    pub radius: NumberParam,
    pub fill_color: ColorParam,
    pub stroke: Stroke,
    pub text: Option<TextSymbology>,
}

impl Default for PointSymbology {
    fn default() -> Self {
        Self {
            clustered: false,
            radius: NumberParam::Static(DEFAULT_POINT_RADIUS),
            fill_color: ColorParam::Static(DEFAULT_VECTOR_FILL_COLOR),
            stroke: Stroke::default(),
            text: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineSymbology {
    pub stroke: Stroke,
    pub text: Option<TextSymbology>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonSymbology {
    pub fill_color: ColorParam,
    pub stroke: Stroke,
    pub text: Option<TextSymbology>,
}

impl Default for PolygonSymbology {
    fn default() -> Self {
        Self {
            fill_color: ColorParam::Static(DEFAULT_VECTOR_FILL_COLOR),
            stroke: Stroke::default(),
            text: None,
        }
    }
}

/// Per-feature styling of vector data.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorSymbology {
    Point(PointSymbology),
    Line(LineSymbology),
    Polygon(PolygonSymbology),
}

impl VectorSymbology {
    pub fn text(&self) -> Option<&TextSymbology> {
        match self {
            VectorSymbology::Point(p) => p.text.as_ref(),
            VectorSymbology::Line(l) => l.text.as_ref(),
            VectorSymbology::Polygon(p) => p.text.as_ref(),
        }
    }

    /// Resolve every parameter against one feature.
    pub fn create_styler(&self, attributes: &FeatureAttributes) -> Styler {
        let text = self.text().map(|t| t.create_styler(attributes));
        match self {
            VectorSymbology::Point(p) => Styler::Point(PointStyler {
                clustered: p.clustered,
                radius: p.radius.get_number(attributes),
                fill_color: p.fill_color.get_color(attributes),
                stroke: p.stroke.create_styler(attributes),
                text,
            }),
            VectorSymbology::Line(l) => Styler::Line(LineStyler {
                stroke: l.stroke.create_styler(attributes),
                text,
            }),
            VectorSymbology::Polygon(p) => Styler::Polygon(PolygonStyler {
                fill_color: p.fill_color.get_color(attributes),
                stroke: p.stroke.create_styler(attributes),
                text,
            }),
        }
    }

    /// Style of one feature, shared through `cache` with every feature that
    /// resolves to the same parameters.
    #[instrument(level = "trace", skip_all)]
    pub fn style(&self, attributes: &FeatureAttributes, cache: &StyleCache) -> Arc<Style> {
        let styler = self.create_styler(attributes);
        cache.get_or_insert_with(&styler.cache_key(), || styler.create_style())
    }

    /// Highlight style of one feature. Shares `cache` with [`Self::style`]
    /// under distinct keys.
    #[instrument(level = "trace", skip_all)]
    pub fn highlight_style(
        &self,
        attributes: &FeatureAttributes,
        cache: &StyleCache,
    ) -> Arc<Style> {
        let styler = self.create_styler(attributes);
        cache.get_or_insert_with(&styler.highlight_cache_key(), || {
            styler.create_highlight_style()
        })
    }

    pub fn icon_style(&self) -> IconStyle {
        match self {
            VectorSymbology::Point(p) => IconStyle {
                stroke_width: p.stroke.width.get_default(),
                stroke_color: p.stroke.color.get_default(),
                fill_color: Some(p.fill_color.get_default()),
            },
            VectorSymbology::Line(l) => IconStyle {
                stroke_width: l.stroke.width.get_default(),
                stroke_color: l.stroke.color.get_default(),
                fill_color: None,
            },
            VectorSymbology::Polygon(p) => IconStyle {
                stroke_width: p.stroke.width.get_default(),
                stroke_color: p.stroke.color.get_default(),
                fill_color: Some(p.fill_color.get_default()),
            },
        }
    }

    pub fn from_dict(dict: &VectorSymbologyDict) -> WorkbenchResult<Self> {
        match dict {
            VectorSymbologyDict::Point(d) => Ok(VectorSymbology::Point(PointSymbology {
                clustered: d.clustered,
                radius: d.radius.clone(),
                fill_color: ColorParam::from_dict(&d.fill_color)?,
                stroke: Stroke::from_dict(&d.stroke)?,
                text: text_from_dict(&d.text)?,
            })),
            VectorSymbologyDict::Line(d) => Ok(VectorSymbology::Line(LineSymbology {
                stroke: Stroke::from_dict(&d.stroke)?,
                text: text_from_dict(&d.text)?,
            })),
            VectorSymbologyDict::Polygon(d) => Ok(VectorSymbology::Polygon(PolygonSymbology {
                fill_color: ColorParam::from_dict(&d.fill_color)?,
                stroke: Stroke::from_dict(&d.stroke)?,
                text: text_from_dict(&d.text)?,
            })),
        }
    }

    pub fn to_dict(&self) -> VectorSymbologyDict {
        let text = self.text().map(TextSymbology::to_dict);
        match self {
            VectorSymbology::Point(p) => VectorSymbologyDict::Point(PointSymbologyDict {
                clustered: p.clustered,
                radius: p.radius.clone(),
                fill_color: p.fill_color.to_dict(),
                stroke: p.stroke.to_dict(),
                text,
            }),
            VectorSymbology::Line(l) => VectorSymbologyDict::Line(LineSymbologyDict {
                stroke: l.stroke.to_dict(),
                text,
            }),
            VectorSymbology::Polygon(p) => VectorSymbologyDict::Polygon(PolygonSymbologyDict {
                fill_color: p.fill_color.to_dict(),
                stroke: p.stroke.to_dict(),
                text,
            }),
        }
    }
}

impl From<PointSymbology> for VectorSymbology {
    fn from(s: PointSymbology) -> Self {
        VectorSymbology::Point(s)
    }
}

impl From<LineSymbology> for VectorSymbology {
    fn from(s: LineSymbology) -> Self {
        VectorSymbology::Line(s)
    }
}

impl From<PolygonSymbology> for VectorSymbology {
    fn from(s: PolygonSymbology) -> Self {
        VectorSymbology::Polygon(s)
    }
}

// ============================================================================
// Symbology
// ============================================================================

/// Rendering description of a layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbology {
    Raster(RasterSymbology),
    Vector(VectorSymbology),
}

impl Symbology {
    pub fn symbology_type(&self) -> SymbologyType {
        match self {
            Symbology::Raster(_) => SymbologyType::Raster,
            Symbology::Vector(VectorSymbology::Point(_)) => SymbologyType::Point,
            Symbology::Vector(VectorSymbology::Line(_)) => SymbologyType::Line,
            Symbology::Vector(VectorSymbology::Polygon(_)) => SymbologyType::Polygon,
        }
    }

    /// Legend icon parameters. Raster symbologies have no icon.
    pub fn icon_style(&self) -> WorkbenchResult<IconStyle> {
        match self {
            Symbology::Raster(_) => Err(WorkbenchError::unsupported(
                "raster symbology has no icon style",
            )),
            Symbology::Vector(v) => Ok(v.icon_style()),
        }
    }

    pub fn from_dict(dict: &SymbologyDict) -> WorkbenchResult<Self> {
        match dict {
            SymbologyDict::Raster(r) => RasterSymbology::from_dict(r).map(Symbology::Raster),
            SymbologyDict::Vector(v) => VectorSymbology::from_dict(v).map(Symbology::Vector),
        }
    }

    pub fn to_dict(&self) -> SymbologyDict {
        match self {
            Symbology::Raster(r) => SymbologyDict::Raster(r.to_dict()),
            Symbology::Vector(v) => SymbologyDict::Vector(v.to_dict()),
        }
    }

    pub fn from_json(value: serde_json::Value) -> WorkbenchResult<Self> {
        let dict: SymbologyDict = serde_json::from_value(value)?;
        Self::from_dict(&dict)
    }

    pub fn to_json(&self) -> WorkbenchResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_dict())?)
    }
}

impl From<RasterSymbology> for Symbology {
    fn from(s: RasterSymbology) -> Self {
        Symbology::Raster(s)
    }
}

impl From<VectorSymbology> for Symbology {
    fn from(s: VectorSymbology) -> Self {
        Symbology::Vector(s)
    }
}
