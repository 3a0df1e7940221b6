//! Parameters that are either constant or derived from a feature attribute.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use workbench_common::{Color, Colorizer, ColorizerDict, RgbaColorDict, WorkbenchResult};

/// Attribute values of a single feature, keyed by column name.
pub type FeatureAttributes = serde_json::Map<String, Value>;

/// Read an attribute as a number.
///
/// Numbers are taken as-is and numeric strings are parsed. Missing, null
/// and non-numeric values yield `None`.
pub fn numeric_attribute(attributes: &FeatureAttributes, name: &str) -> Option<f64> {
    match attributes.get(name)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read an attribute as label text. Missing and null values yield `None`.
pub fn text_attribute(attributes: &FeatureAttributes, name: &str) -> Option<String> {
    match attributes.get(name)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        // integral floats print without a trailing ".0", like the integers
        Value::Number(n) if n.is_f64() => n.as_f64().map(|v| v.to_string()),
        other => Some(other.to_string()),
    }
}

// ============================================================================
// NumberParam
// ============================================================================

/// A number that is either constant or read from a feature attribute.
///
/// Wire form: `{"Static": 8}` or
/// `{"Derived": {"attribute": "pop", "factor": 0.1, "default_value": 5}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NumberParam {
    Static(f64),
    Derived(DerivedNumber),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedNumber {
    pub attribute: String,
    pub factor: f64,
    pub default_value: f64,
}

impl NumberParam {
    pub fn derived(attribute: impl Into<String>, factor: f64, default_value: f64) -> Self {
        NumberParam::Derived(DerivedNumber {
            attribute: attribute.into(),
            factor,
            default_value,
        })
    }

    /// Resolve against a feature. A derived value whose attribute is missing
    /// or not numeric falls back to `default_value`.
    pub fn get_number(&self, attributes: &FeatureAttributes) -> f64 {
        match self {
            NumberParam::Static(n) => *n,
            NumberParam::Derived(d) => numeric_attribute(attributes, &d.attribute)
                .map(|v| (v * d.factor).max(0.0))
                .unwrap_or(d.default_value),
        }
    }

    pub fn get_default(&self) -> f64 {
        match self {
            NumberParam::Static(n) => *n,
            NumberParam::Derived(d) => d.default_value,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, NumberParam::Static(_))
    }
}

impl From<f64> for NumberParam {
    fn from(n: f64) -> Self {
        NumberParam::Static(n)
    }
}

// ============================================================================
// ColorParam
// ============================================================================

/// Wire form of a [`ColorParam`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColorParamDict {
    Static(RgbaColorDict),
    Derived(DerivedColorDict),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedColorDict {
    pub attribute: String,
    pub colorizer: ColorizerDict,
}

/// A color that is either constant or mapped from a feature attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorParam {
    Static(Color),
    Derived(DerivedColor),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DerivedColor {
    pub attribute: String,
    pub colorizer: Colorizer,
}

impl ColorParam {
    pub fn derived(attribute: impl Into<String>, colorizer: Colorizer) -> Self {
        ColorParam::Derived(DerivedColor {
            attribute: attribute.into(),
            colorizer,
        })
    }

    /// Resolve against a feature. Derived colors pass the attribute value
    /// through the colorizer, so missing values get its no-data color.
    pub fn get_color(&self, attributes: &FeatureAttributes) -> Color {
        match self {
            ColorParam::Static(c) => *c,
            ColorParam::Derived(d) => d
                .colorizer
                .get_color(numeric_attribute(attributes, &d.attribute)),
        }
    }

    pub fn get_default(&self) -> Color {
        match self {
            ColorParam::Static(c) => *c,
            ColorParam::Derived(d) => d.colorizer.default_color(),
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, ColorParam::Static(_))
    }

    pub fn from_dict(dict: &ColorParamDict) -> WorkbenchResult<Self> {
        match dict {
            ColorParamDict::Static(c) => Ok(ColorParam::Static(Color::from_dict(*c))),
            ColorParamDict::Derived(d) => Ok(ColorParam::Derived(DerivedColor {
                attribute: d.attribute.clone(),
                colorizer: Colorizer::from_dict(&d.colorizer)?,
            })),
        }
    }

    pub fn to_dict(&self) -> ColorParamDict {
        match self {
            ColorParam::Static(c) => ColorParamDict::Static(c.to_dict()),
            ColorParam::Derived(d) => ColorParamDict::Derived(DerivedColorDict {
                attribute: d.attribute.clone(),
                colorizer: d.colorizer.to_dict(),
            }),
        }
    }
}

impl From<Color> for ColorParam {
    fn from(c: Color) -> Self {
        ColorParam::Static(c)
    }
}
