//! Resolved, renderer-agnostic feature styles.
//!
//! A [`Style`] is what the map integration turns into its own style objects.
//! All values are final: no attribute lookups remain.

use workbench_common::Color;

/// Stroke of a line, polygon outline, circle outline or label halo.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
}

/// A filled circle marking a point.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleStyle {
    pub radius: f64,
    pub fill: Color,
    pub stroke: StrokeStyle,
}

/// A text label.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub text: String,
    pub fill: Color,
    pub stroke: StrokeStyle,
}

/// Complete style of one feature.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    /// Point marker
    pub image: Option<CircleStyle>,

    /// Polygon fill
    pub fill: Option<Color>,

    /// Line or polygon outline
    pub stroke: Option<StrokeStyle>,

    /// Label
    pub text: Option<TextStyle>,
}

