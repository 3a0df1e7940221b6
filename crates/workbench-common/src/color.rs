//! RGBA colors, CSS color strings and the wire tuple encoding.
//!
//! Channel convention used throughout the model:
//! - `r`, `g`, `b` in `[0, 255]` (fractional values appear after interpolation)
//! - `a` in `[0, 1]`
//!
//! The wire tuple (`RgbaColorDict`) is the only place where alpha is encoded
//! as `0..=255`.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{WorkbenchError, WorkbenchResult};

/// Wire encoding of a color: `[r, g, b, a]` with every channel in `0..=255`.
pub type RgbaColorDict = [u8; 4];

/// Tuple form of a color in model units.
pub type RgbaTuple = [f64; 4];

/// Tuple form without the alpha channel.
pub type RgbTuple = [f64; 3];

/// An immutable RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
pub const WHITE: Color = Color::new(255.0, 255.0, 255.0, 1.0);
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from red, green and blue.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Normalize any [`RgbaLike`] input into a color.
    ///
    /// Missing alpha defaults to `1.0`. Inputs that match none of the
    /// recognized shapes fail with [`WorkbenchError::MalformedInput`].
    pub fn from_rgba_like(input: impl Into<RgbaLike>) -> WorkbenchResult<Self> {
        match input.into() {
            RgbaLike::Color(color) => Ok(color),
            RgbaLike::Tuple(values) => Self::from_tuple(&values),
            RgbaLike::Rgba { r, g, b, a } => Ok(Self::new(r, g, b, a)),
            RgbaLike::Rgb { r, g, b } => Ok(Self::rgb(r, g, b)),
            RgbaLike::Css(s) => string_to_rgba_struct(&s),
        }
    }

    /// Build a color from a 3- or 4-element tuple.
    pub fn from_tuple(values: &[f64]) -> WorkbenchResult<Self> {
        match *values {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            [r, g, b, a] => Ok(Self::new(r, g, b, a)),
            _ => Err(WorkbenchError::malformed(format!(
                "Invalid RGB(A) tuple size: {}",
                values.len()
            ))),
        }
    }

    /// Decode the wire tuple (alpha `0..=255`).
    pub fn from_dict(dict: RgbaColorDict) -> Self {
        let [r, g, b, a] = dict;
        Self::new(f64::from(r), f64::from(g), f64::from(b), f64::from(a) / 255.0)
    }

    /// Encode as wire tuple. Channels are rounded to the nearest integer.
    pub fn to_dict(&self) -> RgbaColorDict {
        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a * 255.0),
        ]
    }

    pub fn rgba_tuple(&self) -> RgbaTuple {
        [self.r, self.g, self.b, self.a]
    }

    pub fn rgb_tuple(&self) -> RgbTuple {
        [self.r, self.g, self.b]
    }

    /// Render as `rgba(r, g, b, a)`.
    pub fn rgba_css_string(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Linear per-channel interpolation between `a` (fraction 0) and `b` (fraction 1).
    ///
    /// The endpoints and equal inputs are returned unchanged so that no
    /// floating point drift is introduced.
    pub fn interpolate(a: Color, b: Color, fraction: f64) -> Color {
        if fraction == 0.0 {
            return a;
        }
        if fraction == 1.0 {
            return b;
        }
        if a == b {
            return a;
        }

        let lerp = |x: f64, y: f64| x * (1.0 - fraction) + y * fraction;
        Color::new(
            lerp(a.r, b.r),
            lerp(a.g, b.g),
            lerp(a.b, b.b),
            lerp(a.a, b.a),
        )
    }

    /// Sum of squared differences over r, g and b.
    ///
    /// Not perceptual; only meant for cheap similarity checks.
    pub fn color_difference(a: Color, b: Color) -> f64 {
        a.rgb_tuple()
            .iter()
            .zip(b.rgb_tuple().iter())
            .map(|(x, y)| (x - y).powi(2))
            .sum()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rgba_css_string())
    }
}

impl FromStr for Color {
    type Err = WorkbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        string_to_rgba_struct(s)
    }
}

/// Anything that can be normalized into a [`Color`].
#[derive(Debug, Clone, PartialEq)]
pub enum RgbaLike {
    Color(Color),
    /// `[r, g, b]` or `[r, g, b, a]`; other lengths are rejected on conversion.
    Tuple(Vec<f64>),
    Rgba { r: f64, g: f64, b: f64, a: f64 },
    Rgb { r: f64, g: f64, b: f64 },
    /// `rgb(...)`, `rgba(...)`, `#rgb` or `#rrggbb`.
    Css(String),
}

impl RgbaLike {
    /// Interpret an untyped JSON value.
    pub fn from_json(value: &serde_json::Value) -> WorkbenchResult<Self> {
        use serde_json::Value;

        let number = |v: &Value| {
            v.as_f64()
                .ok_or_else(|| WorkbenchError::malformed(format!("invalid RgbaLike {}", value)))
        };

        match value {
            Value::String(s) => Ok(RgbaLike::Css(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(number)
                .collect::<WorkbenchResult<Vec<_>>>()
                .map(RgbaLike::Tuple),
            Value::Object(map) => {
                let channel = |name: &str| {
                    map.get(name)
                        .ok_or_else(|| {
                            WorkbenchError::malformed(format!("invalid RgbaLike {}", value))
                        })
                        .and_then(number)
                };
                let (r, g, b) = (channel("r")?, channel("g")?, channel("b")?);
                match map.get("a") {
                    Some(a) => Ok(RgbaLike::Rgba {
                        r,
                        g,
                        b,
                        a: number(a)?,
                    }),
                    None => Ok(RgbaLike::Rgb { r, g, b }),
                }
            }
            _ => Err(WorkbenchError::malformed(format!(
                "invalid RgbaLike {}",
                value
            ))),
        }
    }
}

impl From<Color> for RgbaLike {
    fn from(color: Color) -> Self {
        RgbaLike::Color(color)
    }
}

impl From<&Color> for RgbaLike {
    fn from(color: &Color) -> Self {
        RgbaLike::Color(*color)
    }
}

impl From<RgbaTuple> for RgbaLike {
    fn from(tuple: RgbaTuple) -> Self {
        RgbaLike::Tuple(tuple.to_vec())
    }
}

impl From<RgbTuple> for RgbaLike {
    fn from(tuple: RgbTuple) -> Self {
        RgbaLike::Tuple(tuple.to_vec())
    }
}

impl From<Vec<f64>> for RgbaLike {
    fn from(values: Vec<f64>) -> Self {
        RgbaLike::Tuple(values)
    }
}

impl From<&str> for RgbaLike {
    fn from(s: &str) -> Self {
        RgbaLike::Css(s.to_string())
    }
}

impl From<String> for RgbaLike {
    fn from(s: String) -> Self {
        RgbaLike::Css(s)
    }
}

fn rgba_function_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^rgba?\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*(\d+(?:\.\d*)?|\.\d+)\s*)?\)$",
        )
        .expect("static regex")
    })
}

fn hex_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^#([0-9a-f]{3}|[0-9a-f]{6})$").expect("static regex"))
}

/// Parse a CSS color string.
///
/// Accepted forms: `rgba(r, g, b, a)`, `rgba(r, g, b)`, `rgb(r, g, b)`,
/// `#rgb` and `#rrggbb`. Hex forms are always opaque. The `rgba(...)` form
/// round-trips with [`Color::rgba_css_string`] for integer channels.
pub fn string_to_rgba_struct(css: &str) -> WorkbenchResult<Color> {
    if css.is_empty() {
        return Err(WorkbenchError::malformed(
            "cannot parse empty string into a color",
        ));
    }

    if let Some(caps) = rgba_function_regex().captures(css) {
        // `rgb(r, g, b, a)` is not a valid CSS form
        let is_rgba = css.trim_start()[..4].eq_ignore_ascii_case("rgba");
        if caps.get(4).is_some() && !is_rgba {
            return Err(WorkbenchError::malformed(format!(
                "cannot parse string into a color: {}",
                css
            )));
        }

        let channel = |i: usize| -> WorkbenchResult<f64> {
            caps[i]
                .parse::<f64>()
                .map_err(|e| WorkbenchError::malformed(format!("{}: {}", css, e)))
        };
        let alpha = match caps.get(4) {
            Some(a) => a
                .as_str()
                .parse::<f64>()
                .map_err(|e| WorkbenchError::malformed(format!("{}: {}", css, e)))?,
            None => 1.0,
        };
        return Ok(Color::new(channel(1)?, channel(2)?, channel(3)?, alpha));
    }

    if let Some(caps) = hex_regex().captures(css) {
        let digits = &caps[1];
        let parse = |s: &str| {
            u8::from_str_radix(s, 16)
                .map(f64::from)
                .map_err(|e| WorkbenchError::malformed(format!("{}: {}", css, e)))
        };

        return if digits.len() == 3 {
            // #rgb expands each nibble, e.g. 0xf -> 0xff
            let nibble = |i: usize| parse(&digits[i..=i]).map(|v| v * 17.0);
            Ok(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
        } else {
            Ok(Color::rgb(
                parse(&digits[0..2])?,
                parse(&digits[2..4])?,
                parse(&digits[4..6])?,
            ))
        };
    }

    Err(WorkbenchError::malformed(format!(
        "cannot parse string into a color: {}",
        css
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_from_rgba_like_shapes() {
        assert_eq!(Color::from_rgba_like([0.0, 0.0, 0.0, 1.0]).unwrap(), BLACK);
        assert_eq!(
            Color::from_rgba_like([255.0, 255.0, 255.0]).unwrap(),
            WHITE
        );
        assert_eq!(
            Color::from_rgba_like(RgbaLike::Rgb {
                r: 1.0,
                g: 2.0,
                b: 3.0
            })
            .unwrap(),
            Color::new(1.0, 2.0, 3.0, 1.0)
        );
        assert_eq!(Color::from_rgba_like("#fff").unwrap(), WHITE);

        let err = Color::from_rgba_like(vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let a = Color::new(0.0, 0.0, 0.0, 1.0);
        let b = Color::new(255.0, 255.0, 255.0, 1.0);

        assert_eq!(Color::interpolate(a, b, 0.0), a);
        assert_eq!(Color::interpolate(a, b, 1.0), b);
        assert_eq!(
            Color::interpolate(a, b, 0.5),
            Color::new(127.5, 127.5, 127.5, 1.0)
        );
        assert_eq!(Color::interpolate(a, a, 0.3), a);
    }

    #[test]
    fn test_color_difference() {
        assert_eq!(Color::color_difference(BLACK, BLACK), 0.0);
        assert_eq!(Color::color_difference(BLACK, WHITE), 3.0 * 255.0 * 255.0);
        // alpha is ignored
        assert_eq!(Color::color_difference(BLACK, TRANSPARENT), 0.0);
    }

    #[test]
    fn test_css_parsing() {
        assert_eq!(
            string_to_rgba_struct("rgba(10, 20, 30, 0.5)").unwrap(),
            Color::new(10.0, 20.0, 30.0, 0.5)
        );
        assert_eq!(
            string_to_rgba_struct("RGB( 1 ,2, 3 )").unwrap(),
            Color::rgb(1.0, 2.0, 3.0)
        );
        assert_eq!(
            string_to_rgba_struct("rgba(1,2,3)").unwrap(),
            Color::rgb(1.0, 2.0, 3.0)
        );
        assert_eq!(
            string_to_rgba_struct("#FF8000").unwrap(),
            Color::rgb(255.0, 128.0, 0.0)
        );
        assert_eq!(
            string_to_rgba_struct("#0f0").unwrap(),
            Color::rgb(0.0, 255.0, 0.0)
        );

        for bad in ["", "red", "#12", "rgb(1,2,3,4)", "rgba(1,2)", "#ggg"] {
            assert!(string_to_rgba_struct(bad).is_err(), "{bad:?} should fail");
        }
    }

    #[test]
    fn test_wire_alpha_conversion() {
        let c = Color::from_dict([10, 20, 30, 255]);
        assert_eq!(c, Color::new(10.0, 20.0, 30.0, 1.0));
        assert_eq!(c.to_dict(), [10, 20, 30, 255]);
        assert_eq!(TRANSPARENT.to_dict(), [0, 0, 0, 0]);
    }

    #[test]
    fn test_rgba_like_from_json() {
        let v = serde_json::json!({"r": 1, "g": 2, "b": 3, "a": 0});
        assert_eq!(
            Color::from_rgba_like(RgbaLike::from_json(&v).unwrap()).unwrap(),
            Color::new(1.0, 2.0, 3.0, 0.0)
        );

        let v = serde_json::json!([4, 5, 6]);
        assert_eq!(
            Color::from_rgba_like(RgbaLike::from_json(&v).unwrap()).unwrap(),
            Color::rgb(4.0, 5.0, 6.0)
        );

        assert!(RgbaLike::from_json(&serde_json::json!(42)).is_err());
        assert!(RgbaLike::from_json(&serde_json::json!({"g": 1, "b": 2})).is_err());
    }
}
