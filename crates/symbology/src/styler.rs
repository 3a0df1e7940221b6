//! Per-feature stylers: fully resolved visual parameters plus their cache key.
//!
//! Two stylers with equal parameters produce equal keys, and different
//! parameters produce different keys. Every field is written with a tag and
//! a terminator, and free text is length-prefixed, so no value can bleed
//! into the next field.

use workbench_common::Color;

use crate::style::{CircleStyle, StrokeStyle, Style, TextStyle};
use crate::symbology::{MAX_ALLOWED_TEXT_LENGTH, MAX_POINT_RADIUS, MIN_POINT_RADIUS};

/// Flip the color channels and keep the alpha.
fn invert_color(c: Color) -> Color {
    Color::new(255.0 - c.r, 255.0 - c.g, 255.0 - c.b, c.a)
}

struct CacheKey(String);

impl CacheKey {
    fn new(kind: &str) -> Self {
        Self(format!("{}|", kind))
    }

    fn flag(mut self, tag: &str, value: bool) -> Self {
        self.0.push_str(&format!("{}:{};", tag, u8::from(value)));
        self
    }

    // `+ 0.0` folds -0.0 into 0.0 so equal styles get equal keys
    fn number(mut self, tag: &str, value: f64) -> Self {
        self.0.push_str(&format!("{}:{};", tag, value + 0.0));
        self
    }

    fn color(mut self, tag: &str, c: Color) -> Self {
        self.0.push_str(&format!(
            "{}:{},{},{},{};",
            tag,
            c.r + 0.0,
            c.g + 0.0,
            c.b + 0.0,
            c.a + 0.0
        ));
        self
    }

    fn text(mut self, tag: &str, value: &str) -> Self {
        self.0
            .push_str(&format!("{}:{}:{};", tag, value.len(), value));
        self
    }

    fn optional_text(mut self, tag: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.text(tag, v),
            None => {
                self.0.push_str(&format!("{}:-;", tag));
                self
            }
        }
    }

    fn finish(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyler {
    pub width: f64,
    pub color: Color,
}

impl StrokeStyler {
    pub fn cache_key(&self) -> String {
        CacheKey::new("S")
            .number("w", self.width)
            .color("c", self.color)
            .finish()
    }

    pub fn create_style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.width,
            color: self.color,
        }
    }

    pub fn create_highlight_style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.width,
            color: invert_color(self.color),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyler {
    pub text: String,
    pub fill_color: Color,
    pub stroke: StrokeStyler,
}

impl TextStyler {
    pub fn cache_key(&self) -> String {
        CacheKey::new("T")
            .text("t", &self.text)
            .color("f", self.fill_color)
            .text("s", &self.stroke.cache_key())
            .finish()
    }

    /// Labels longer than [`MAX_ALLOWED_TEXT_LENGTH`] characters are cut.
    pub fn create_style(&self) -> TextStyle {
        TextStyle {
            text: self.text.chars().take(MAX_ALLOWED_TEXT_LENGTH).collect(),
            fill: self.fill_color,
            stroke: self.stroke.create_style(),
        }
    }

    pub fn create_highlight_style(&self) -> TextStyle {
        TextStyle {
            text: self.text.chars().take(MAX_ALLOWED_TEXT_LENGTH).collect(),
            fill: invert_color(self.fill_color),
            stroke: self.stroke.create_highlight_style(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointStyler {
    pub clustered: bool,
    pub radius: f64,
    pub fill_color: Color,
    pub stroke: StrokeStyler,
    pub text: Option<TextStyler>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStyler {
    pub stroke: StrokeStyler,
    pub text: Option<TextStyler>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonStyler {
    pub fill_color: Color,
    pub stroke: StrokeStyler,
    pub text: Option<TextStyler>,
}

/// Resolved visual parameters of one vector feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Styler {
    Point(PointStyler),
    Line(LineStyler),
    Polygon(PolygonStyler),
}

impl Styler {
    /// Deterministic key identifying the visual parameters.
    pub fn cache_key(&self) -> String {
        match self {
            Styler::Point(p) => CacheKey::new("P")
                .flag("c", p.clustered)
                .number("r", p.radius)
                .color("f", p.fill_color)
                .text("s", &p.stroke.cache_key())
                .optional_text("t", p.text.as_ref().map(TextStyler::cache_key).as_deref())
                .finish(),
            Styler::Line(l) => CacheKey::new("L")
                .text("s", &l.stroke.cache_key())
                .optional_text("t", l.text.as_ref().map(TextStyler::cache_key).as_deref())
                .finish(),
            Styler::Polygon(p) => CacheKey::new("Y")
                .color("f", p.fill_color)
                .text("s", &p.stroke.cache_key())
                .optional_text("t", p.text.as_ref().map(TextStyler::cache_key).as_deref())
                .finish(),
        }
    }

    /// Build the style. Point radii are clamped to the allowed range.
    pub fn create_style(&self) -> Style {
        match self {
            Styler::Point(p) => Style {
                image: Some(CircleStyle {
                    radius: p.radius.clamp(MIN_POINT_RADIUS, MAX_POINT_RADIUS),
                    fill: p.fill_color,
                    stroke: p.stroke.create_style(),
                }),
                text: p.text.as_ref().map(TextStyler::create_style),
                ..Style::default()
            },
            Styler::Line(l) => Style {
                stroke: Some(l.stroke.create_style()),
                text: l.text.as_ref().map(TextStyler::create_style),
                ..Style::default()
            },
            Styler::Polygon(p) => Style {
                fill: Some(p.fill_color),
                stroke: Some(p.stroke.create_style()),
                text: p.text.as_ref().map(TextStyler::create_style),
                ..Style::default()
            },
        }
    }

    /// Key of the highlight style. Never equal to any [`Styler::cache_key`],
    /// so both can live in one cache.
    pub fn highlight_cache_key(&self) -> String {
        CacheKey::new("H").text("k", &self.cache_key()).finish()
    }

    /// Selection style: fill and stroke colors are inverted, sizes are kept.
    pub fn create_highlight_style(&self) -> Style {
        match self {
            Styler::Point(p) => Style {
                image: Some(CircleStyle {
                    radius: p.radius.clamp(MIN_POINT_RADIUS, MAX_POINT_RADIUS),
                    fill: invert_color(p.fill_color),
                    stroke: p.stroke.create_highlight_style(),
                }),
                text: p.text.as_ref().map(TextStyler::create_highlight_style),
                ..Style::default()
            },
            Styler::Line(l) => Style {
                stroke: Some(l.stroke.create_highlight_style()),
                text: l.text.as_ref().map(TextStyler::create_highlight_style),
                ..Style::default()
            },
            Styler::Polygon(p) => Style {
                fill: Some(invert_color(p.fill_color)),
                stroke: Some(p.stroke.create_highlight_style()),
                text: p.text.as_ref().map(TextStyler::create_highlight_style),
                ..Style::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workbench_common::{BLACK, WHITE};

    fn stroke() -> StrokeStyler {
        StrokeStyler {
            width: 1.0,
            color: BLACK,
        }
    }

    fn point(radius: f64, text: Option<&str>) -> Styler {
        Styler::Point(PointStyler {
            clustered: false,
            radius,
            fill_color: WHITE,
            stroke: stroke(),
            text: text.map(|t| TextStyler {
                text: t.to_string(),
                fill_color: BLACK,
                stroke: stroke(),
            }),
        })
    }

    #[test]
    fn test_equal_parameters_equal_keys() {
        assert_eq!(point(8.0, None).cache_key(), point(8.0, None).cache_key());
        assert_eq!(
            point(8.0, Some("a")).cache_key(),
            point(8.0, Some("a")).cache_key()
        );
    }

    #[test]
    fn test_different_parameters_different_keys() {
        assert_ne!(point(8.0, None).cache_key(), point(9.0, None).cache_key());
        assert_ne!(point(8.0, None).cache_key(), point(8.0, Some("")).cache_key());
        assert_ne!(
            point(8.0, Some("a")).cache_key(),
            point(8.0, Some("b")).cache_key()
        );
    }

    #[test]
    fn test_text_cannot_collide_with_following_fields() {
        // plain concatenation gives "110,0,0,1..." for both
        let a = TextStyler {
            text: "1".to_string(),
            fill_color: Color::rgb(10.0, 0.0, 0.0),
            stroke: stroke(),
        };
        let b = TextStyler {
            text: "11".to_string(),
            fill_color: Color::rgb(0.0, 0.0, 0.0),
            stroke: stroke(),
        };
        assert_ne!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_variants_never_share_keys() {
        let line = Styler::Line(LineStyler {
            stroke: stroke(),
            text: None,
        });
        let polygon = Styler::Polygon(PolygonStyler {
            fill_color: WHITE,
            stroke: stroke(),
            text: None,
        });
        assert_ne!(line.cache_key(), polygon.cache_key());
    }

    #[test]
    fn test_create_style() {
        let long = "a label that is much longer than allowed";
        let style = point(500.0, Some(long)).create_style();

        let image = style.image.unwrap();
        assert_eq!(image.radius, MAX_POINT_RADIUS);
        assert_eq!(image.fill, WHITE);
        assert_eq!(
            style.text.unwrap().text.chars().count(),
            MAX_ALLOWED_TEXT_LENGTH
        );
        assert!(style.fill.is_none());
    }

    #[test]
    fn test_negative_zero_shares_key_with_zero() {
        assert_eq!(point(0.0, None).cache_key(), point(-0.0, None).cache_key());

        let a = StrokeStyler {
            width: 0.0,
            color: Color::new(0.0, 0.0, 0.0, 0.0),
        };
        let b = StrokeStyler {
            width: -0.0,
            color: Color::new(-0.0, 0.0, -0.0, -0.0),
        };
        assert_eq!(a.cache_key(), b.cache_key());
    }

    #[test]
    fn test_create_highlight_style() {
        let styler = point(8.0, Some("a"));
        let style = styler.create_highlight_style();

        let image = style.image.unwrap();
        assert_eq!(image.radius, 8.0);
        assert_eq!(image.fill, BLACK);
        assert_eq!(image.stroke.color, WHITE);
        assert_eq!(image.stroke.width, 1.0);

        let text = style.text.unwrap();
        assert_eq!(text.text, "a");
        assert_eq!(text.fill, WHITE);
        assert_eq!(text.stroke.color, WHITE);
    }

    #[test]
    fn test_highlight_keeps_alpha() {
        let polygon = Styler::Polygon(PolygonStyler {
            fill_color: Color::new(255.0, 0.0, 100.0, 0.5),
            stroke: stroke(),
            text: None,
        });

        let style = polygon.create_highlight_style();

        assert_eq!(style.fill, Some(Color::new(0.0, 255.0, 155.0, 0.5)));
        assert_eq!(style.stroke.unwrap().color, WHITE);
    }

    #[test]
    fn test_highlight_key_differs_from_style_key() {
        let styler = point(8.0, Some("a"));
        assert_ne!(styler.highlight_cache_key(), styler.cache_key());
        assert_eq!(
            styler.highlight_cache_key(),
            point(8.0, Some("a")).highlight_cache_key()
        );
        assert_ne!(
            styler.highlight_cache_key(),
            point(9.0, Some("a")).highlight_cache_key()
        );
    }
}
