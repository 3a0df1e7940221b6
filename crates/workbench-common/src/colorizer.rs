//! Value-to-color mappings: linear gradients and discrete palettes.

use indexmap::IndexMap;
use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::breakpoint::{BreakpointDict, ColorBreakpoint};
use crate::color::{Color, RgbaColorDict, BLACK, TRANSPARENT};
use crate::error::{WorkbenchError, WorkbenchResult};

// ============================================================================
// Wire format
// ============================================================================

/// Wire form of a colorizer, tagged by variant name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColorizerDict {
    LinearGradient(LinearGradientDict),
    /// Declared by the backend but not supported here.
    LogarithmicGradient(LinearGradientDict),
    Palette(PaletteDict),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradientDict {
    pub breakpoints: Vec<BreakpointDict>,
    pub no_data_color: RgbaColorDict,
    pub default_color: RgbaColorDict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteDict {
    /// Keys are numbers rendered as strings, e.g. `"1"` or `"2.5"`.
    pub colors: IndexMap<String, RgbaColorDict>,
    pub no_data_color: RgbaColorDict,
    pub default_color: RgbaColorDict,
}

// ============================================================================
// Linear gradient
// ============================================================================

/// Interpolates linearly between ascending breakpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    breakpoints: Vec<ColorBreakpoint>,
    no_data_color: Color,
    default_color: Color,
}

impl LinearGradient {
    /// Create a gradient. Breakpoint values must be ascending and not NaN.
    pub fn new(
        breakpoints: Vec<ColorBreakpoint>,
        no_data_color: Color,
        default_color: Color,
    ) -> WorkbenchResult<Self> {
        if let Some(bp) = breakpoints.iter().find(|bp| bp.value.is_nan()) {
            return Err(WorkbenchError::malformed(format!(
                "breakpoint value must be a number, got {}",
                bp.value
            )));
        }
        if let Some(pair) = breakpoints.windows(2).find(|w| w[0].value > w[1].value) {
            return Err(WorkbenchError::malformed(format!(
                "breakpoints must be sorted ascending: {} > {}",
                pair[0].value, pair[1].value
            )));
        }

        Ok(Self {
            breakpoints,
            no_data_color,
            default_color,
        })
    }

    pub fn breakpoints(&self) -> &[ColorBreakpoint] {
        &self.breakpoints
    }

    pub fn no_data_color(&self) -> Color {
        self.no_data_color
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Map a value to a color.
    ///
    /// - missing or NaN value: `no_data_color`
    /// - outside `[first, last]` breakpoint (or no breakpoints): `default_color`
    /// - exactly on a breakpoint: that breakpoint's color
    /// - otherwise interpolated between the surrounding breakpoints
    pub fn get_color(&self, value: Option<f64>) -> Color {
        let value = match value {
            Some(v) if !v.is_nan() => v,
            _ => return self.no_data_color,
        };

        let (first, last) = match (self.breakpoints.first(), self.breakpoints.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return self.default_color,
        };
        if value < first.value || value > last.value {
            return self.default_color;
        }

        // Last breakpoint at or below the value is the lower bound; on an exact
        // match this yields a fraction of 0.
        let index = match self.breakpoints.iter().rposition(|bp| bp.value <= value) {
            Some(i) => i,
            None => return self.default_color,
        };
        let lower = &self.breakpoints[index];
        let upper = match self.breakpoints.get(index + 1) {
            Some(bp) => bp,
            None => return lower.color,
        };

        let fraction = (value - lower.value) / (upper.value - lower.value);
        Color::interpolate(lower.color, upper.color, fraction)
    }

    pub fn with_breakpoints(&self, breakpoints: Vec<ColorBreakpoint>) -> WorkbenchResult<Self> {
        Self::new(breakpoints, self.no_data_color, self.default_color)
    }

    pub fn with_no_data_color(&self, no_data_color: Color) -> Self {
        Self {
            no_data_color,
            ..self.clone()
        }
    }

    pub fn with_default_color(&self, default_color: Color) -> Self {
        Self {
            default_color,
            ..self.clone()
        }
    }

    pub fn from_dict(dict: &LinearGradientDict) -> WorkbenchResult<Self> {
        Self::new(
            dict.breakpoints
                .iter()
                .map(ColorBreakpoint::from_dict)
                .collect(),
            Color::from_dict(dict.no_data_color),
            Color::from_dict(dict.default_color),
        )
    }

    pub fn to_dict(&self) -> LinearGradientDict {
        LinearGradientDict {
            breakpoints: self.breakpoints.iter().map(ColorBreakpoint::to_dict).collect(),
            no_data_color: self.no_data_color.to_dict(),
            default_color: self.default_color.to_dict(),
        }
    }
}

// ============================================================================
// Palette
// ============================================================================

/// Exact-match lookup from discrete values to colors.
///
/// Iteration order is insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteColorizer {
    colors: IndexMap<NotNan<f64>, Color>,
    no_data_color: Color,
    default_color: Color,
}

impl PaletteColorizer {
    pub fn new(
        colors: IndexMap<NotNan<f64>, Color>,
        no_data_color: Color,
        default_color: Color,
    ) -> Self {
        Self {
            colors,
            no_data_color,
            default_color,
        }
    }

    /// Build from `(value, color)` pairs. NaN keys and duplicates are rejected.
    pub fn from_pairs(
        pairs: impl IntoIterator<Item = (f64, Color)>,
        no_data_color: Color,
        default_color: Color,
    ) -> WorkbenchResult<Self> {
        let mut colors = IndexMap::new();
        for (value, color) in pairs {
            let key = NotNan::new(value).map_err(|_| {
                WorkbenchError::malformed("palette key must be a number, got NaN")
            })?;
            if colors.insert(key, color).is_some() {
                return Err(WorkbenchError::malformed(format!(
                    "duplicate palette key {}",
                    value
                )));
            }
        }
        Ok(Self::new(colors, no_data_color, default_color))
    }

    pub fn colors(&self) -> &IndexMap<NotNan<f64>, Color> {
        &self.colors
    }

    pub fn no_data_color(&self) -> Color {
        self.no_data_color
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Missing or NaN values map to `no_data_color`, unknown keys to `default_color`.
    pub fn get_color(&self, value: Option<f64>) -> Color {
        let key = match value.and_then(|v| NotNan::new(v).ok()) {
            Some(key) => key,
            None => return self.no_data_color,
        };
        self.colors
            .get(&key)
            .copied()
            .unwrap_or(self.default_color)
    }

    pub fn with_no_data_color(&self, no_data_color: Color) -> Self {
        Self {
            no_data_color,
            ..self.clone()
        }
    }

    pub fn with_default_color(&self, default_color: Color) -> Self {
        Self {
            default_color,
            ..self.clone()
        }
    }

    pub fn from_dict(dict: &PaletteDict) -> WorkbenchResult<Self> {
        let pairs = dict
            .colors
            .iter()
            .map(|(key, color)| {
                key.trim()
                    .parse::<f64>()
                    .map(|value| (value, Color::from_dict(*color)))
                    .map_err(|_| {
                        WorkbenchError::malformed(format!("palette key is not a number: {:?}", key))
                    })
            })
            .collect::<WorkbenchResult<Vec<_>>>()?;

        Self::from_pairs(
            pairs,
            Color::from_dict(dict.no_data_color),
            Color::from_dict(dict.default_color),
        )
    }

    pub fn to_dict(&self) -> PaletteDict {
        PaletteDict {
            colors: self
                .colors
                .iter()
                .map(|(key, color)| (key.into_inner().to_string(), color.to_dict()))
                .collect(),
            no_data_color: self.no_data_color.to_dict(),
            default_color: self.default_color.to_dict(),
        }
    }
}

// ============================================================================
// Colorizer
// ============================================================================

/// A value-to-color mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Colorizer {
    LinearGradient(LinearGradient),
    Palette(PaletteColorizer),
}

impl Colorizer {
    pub fn get_color(&self, value: Option<f64>) -> Color {
        match self {
            Colorizer::LinearGradient(g) => g.get_color(value),
            Colorizer::Palette(p) => p.get_color(value),
        }
    }

    /// Breakpoints in legend order. For palettes, one per entry.
    pub fn get_breakpoints(&self) -> Vec<ColorBreakpoint> {
        match self {
            Colorizer::LinearGradient(g) => g.breakpoints.clone(),
            Colorizer::Palette(p) => p
                .colors
                .iter()
                .map(|(value, color)| ColorBreakpoint::new(value.into_inner(), *color))
                .collect(),
        }
    }

    pub fn get_color_at_index(&self, index: usize) -> WorkbenchResult<Color> {
        let color = match self {
            Colorizer::LinearGradient(g) => g.breakpoints.get(index).map(|bp| bp.color),
            Colorizer::Palette(p) => p.colors.get_index(index).map(|(_, color)| *color),
        };
        color.ok_or_else(|| {
            WorkbenchError::out_of_range(format!(
                "color index {} out of bounds for {} colors",
                index,
                self.get_number_of_colors()
            ))
        })
    }

    pub fn get_number_of_colors(&self) -> usize {
        match self {
            Colorizer::LinearGradient(g) => g.breakpoints.len(),
            Colorizer::Palette(p) => p.colors.len(),
        }
    }

    pub fn is_gradient(&self) -> bool {
        matches!(self, Colorizer::LinearGradient(_))
    }

    pub fn is_discrete(&self) -> bool {
        matches!(self, Colorizer::Palette(_))
    }

    pub fn is_continuous(&self) -> bool {
        !self.is_discrete()
    }

    pub fn no_data_color(&self) -> Color {
        match self {
            Colorizer::LinearGradient(g) => g.no_data_color,
            Colorizer::Palette(p) => p.no_data_color,
        }
    }

    pub fn default_color(&self) -> Color {
        match self {
            Colorizer::LinearGradient(g) => g.default_color,
            Colorizer::Palette(p) => p.default_color,
        }
    }

    /// Smallest breakpoint or palette key.
    pub fn min_value(&self) -> Option<f64> {
        self.get_breakpoints()
            .iter()
            .map(|bp| bp.value)
            .reduce(f64::min)
    }

    /// Largest breakpoint or palette key.
    pub fn max_value(&self) -> Option<f64> {
        self.get_breakpoints()
            .iter()
            .map(|bp| bp.value)
            .reduce(f64::max)
    }

    pub fn with_no_data_color(&self, color: Color) -> Self {
        match self {
            Colorizer::LinearGradient(g) => Colorizer::LinearGradient(g.with_no_data_color(color)),
            Colorizer::Palette(p) => Colorizer::Palette(p.with_no_data_color(color)),
        }
    }

    pub fn with_default_color(&self, color: Color) -> Self {
        match self {
            Colorizer::LinearGradient(g) => Colorizer::LinearGradient(g.with_default_color(color)),
            Colorizer::Palette(p) => Colorizer::Palette(p.with_default_color(color)),
        }
    }

    pub fn from_dict(dict: &ColorizerDict) -> WorkbenchResult<Self> {
        match dict {
            ColorizerDict::LinearGradient(g) => LinearGradient::from_dict(g).map(Self::from),
            ColorizerDict::Palette(p) => PaletteColorizer::from_dict(p).map(Self::from),
            ColorizerDict::LogarithmicGradient(_) => Err(WorkbenchError::unsupported(
                "LogarithmicGradient colorizer is not supported",
            )),
        }
    }

    pub fn to_dict(&self) -> ColorizerDict {
        match self {
            Colorizer::LinearGradient(g) => ColorizerDict::LinearGradient(g.to_dict()),
            Colorizer::Palette(p) => ColorizerDict::Palette(p.to_dict()),
        }
    }

    /// Decode from an untyped JSON value.
    pub fn from_json(value: serde_json::Value) -> WorkbenchResult<Self> {
        let dict: ColorizerDict = serde_json::from_value(value)?;
        Self::from_dict(&dict)
    }

    pub fn to_json(&self) -> WorkbenchResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_dict())?)
    }
}

impl Default for Colorizer {
    /// Black-to-white gradient over `[0, 1]`.
    fn default() -> Self {
        Colorizer::LinearGradient(LinearGradient {
            breakpoints: vec![
                ColorBreakpoint::new(0.0, BLACK),
                ColorBreakpoint::new(1.0, crate::color::WHITE),
            ],
            no_data_color: TRANSPARENT,
            default_color: TRANSPARENT,
        })
    }
}

impl From<LinearGradient> for Colorizer {
    fn from(gradient: LinearGradient) -> Self {
        Colorizer::LinearGradient(gradient)
    }
}

impl From<PaletteColorizer> for Colorizer {
    fn from(palette: PaletteColorizer) -> Self {
        Colorizer::Palette(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::WHITE;
    use crate::error::ErrorKind;

    const RED: Color = Color::rgb(255.0, 0.0, 0.0);
    const BLUE: Color = Color::rgb(0.0, 0.0, 255.0);

    fn black_to_white() -> LinearGradient {
        LinearGradient::new(
            vec![
                ColorBreakpoint::new(0.0, BLACK),
                ColorBreakpoint::new(100.0, WHITE),
            ],
            TRANSPARENT,
            RED,
        )
        .unwrap()
    }

    #[test]
    fn test_gradient_lookup() {
        let g = black_to_white();
        assert_eq!(g.get_color(Some(0.0)), BLACK);
        assert_eq!(g.get_color(Some(100.0)), WHITE);
        assert_eq!(
            g.get_color(Some(50.0)),
            Color::new(127.5, 127.5, 127.5, 1.0)
        );
        assert_eq!(g.get_color(None), TRANSPARENT);
        assert_eq!(g.get_color(Some(f64::NAN)), TRANSPARENT);
        assert_eq!(g.get_color(Some(-1.0)), RED);
        assert_eq!(g.get_color(Some(101.0)), RED);
    }

    #[test]
    fn test_gradient_exact_breakpoint_in_middle() {
        let g = LinearGradient::new(
            vec![
                ColorBreakpoint::new(0.0, BLACK),
                ColorBreakpoint::new(10.0, BLUE),
                ColorBreakpoint::new(20.0, WHITE),
            ],
            TRANSPARENT,
            RED,
        )
        .unwrap();
        assert_eq!(g.get_color(Some(10.0)), BLUE);
        assert_eq!(
            g.get_color(Some(15.0)),
            Color::interpolate(BLUE, WHITE, 0.5)
        );
    }

    #[test]
    fn test_gradient_empty_and_single() {
        let empty = LinearGradient::new(vec![], TRANSPARENT, RED).unwrap();
        assert_eq!(empty.get_color(Some(1.0)), RED);

        let single =
            LinearGradient::new(vec![ColorBreakpoint::new(5.0, BLUE)], TRANSPARENT, RED).unwrap();
        assert_eq!(single.get_color(Some(5.0)), BLUE);
        assert_eq!(single.get_color(Some(5.1)), RED);
    }

    #[test]
    fn test_gradient_rejects_unsorted() {
        let err = LinearGradient::new(
            vec![
                ColorBreakpoint::new(10.0, BLACK),
                ColorBreakpoint::new(0.0, WHITE),
            ],
            TRANSPARENT,
            RED,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_palette_lookup() {
        let p = PaletteColorizer::from_pairs([(1.0, RED)], TRANSPARENT, BLUE).unwrap();
        assert_eq!(p.get_color(Some(1.0)), RED);
        assert_eq!(p.get_color(Some(2.0)), BLUE);
        assert_eq!(p.get_color(None), TRANSPARENT);
    }

    #[test]
    fn test_palette_rejects_duplicate_keys() {
        let err = PaletteColorizer::from_pairs([(1.0, RED), (1.0, BLUE)], TRANSPARENT, BLUE)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_accessors() {
        let c = Colorizer::from(black_to_white());
        assert!(c.is_gradient());
        assert!(c.is_continuous());
        assert_eq!(c.get_number_of_colors(), 2);
        assert_eq!(c.get_color_at_index(1).unwrap(), WHITE);
        assert_eq!(
            c.get_color_at_index(2).unwrap_err().kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(c.min_value(), Some(0.0));
        assert_eq!(c.max_value(), Some(100.0));

        let p = Colorizer::from(
            PaletteColorizer::from_pairs([(3.0, RED), (1.0, BLUE)], TRANSPARENT, BLACK).unwrap(),
        );
        assert!(p.is_discrete());
        assert!(!p.is_continuous());
        assert_eq!(p.get_color_at_index(0).unwrap(), RED);
        assert_eq!(p.min_value(), Some(1.0));
    }

    #[test]
    fn test_logarithmic_is_unsupported() {
        let json = serde_json::json!({
            "LogarithmicGradient": {
                "breakpoints": [],
                "no_data_color": [0, 0, 0, 0],
                "default_color": [0, 0, 0, 0]
            }
        });
        let err = Colorizer::from_json(json).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedVariant);
    }

    #[test]
    fn test_unknown_variant_is_malformed() {
        let err = Colorizer::from_json(serde_json::json!({"Rainbow": {}})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }
}
