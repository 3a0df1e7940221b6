//! Value/color pairs used by gradient colorizers.

use serde::{Deserialize, Serialize};

use crate::color::{Color, RgbaColorDict};

/// Wire form of a breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointDict {
    pub value: f64,
    pub color: RgbaColorDict,
}

/// A value mapped to a color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBreakpoint {
    pub value: f64,
    pub color: Color,
}

impl ColorBreakpoint {
    pub fn new(value: f64, color: Color) -> Self {
        Self { value, color }
    }

    pub fn with_value(&self, value: f64) -> Self {
        Self { value, ..*self }
    }

    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..*self
        }
    }

    pub fn from_dict(dict: &BreakpointDict) -> Self {
        Self::new(dict.value, Color::from_dict(dict.color))
    }

    pub fn to_dict(&self) -> BreakpointDict {
        BreakpointDict {
            value: self.value,
            color: self.color.to_dict(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{BLACK, WHITE};

    #[test]
    fn test_with_methods_leave_original_untouched() {
        let bp = ColorBreakpoint::new(1.0, BLACK);
        let moved = bp.with_value(2.0).with_color(WHITE);

        assert_eq!(bp, ColorBreakpoint::new(1.0, BLACK));
        assert_eq!(moved, ColorBreakpoint::new(2.0, WHITE));
    }

    #[test]
    fn test_dict_roundtrip() {
        let json = serde_json::json!({"value": 0.5, "color": [255, 0, 0, 255]});
        let dict: BreakpointDict = serde_json::from_value(json.clone()).unwrap();
        let bp = ColorBreakpoint::from_dict(&dict);

        assert_eq!(bp.color, Color::rgb(255.0, 0.0, 0.0));
        assert_eq!(serde_json::to_value(bp.to_dict()).unwrap(), json);
    }
}
