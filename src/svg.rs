//! # SVG Rendering
//!
//! Wraps the generated geometry in renderable SVG element handles and serialises them to a
//! standalone document. The handles carry a class list; the controller switches segments by
//! toggling the on/off class names, and styling those classes is left to the host page.
//!
//! Document structure:
//!
//! ```text
//! <svg viewBox="0 0 W H" width="W" height="H">
//!   <g transform="skewX(θ) translate(t)">   six bar polygons, a..g
//!   </g>
//!   <circle .../>                          decimal point, unskewed
//! </svg>
//! ```

use crate::controller::Renderable;
use crate::geometry::{self, Bounds, Circle, Polygon, SegmentShapeParams, SkewTransform};
use crate::{PartSet, SegmentName};
use std::borrow::Cow;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Escape text for use inside a double-quoted attribute value.
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Drawable primitive behind a part handle.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Polygon(Polygon),
    Circle(Circle),
}

/// A single SVG element with a mutable class list.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgPart {
    pub shape: Shape,
    classes: Vec<String>,
}

impl SvgPart {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            classes: Vec::new(),
        }
    }

    /// Current class names in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Serialise this element, tagged with its segment name.
    pub fn to_element(&self, name: SegmentName) -> String {
        let mut attrs = format!(r#"data-segment="{}""#, name);
        if !self.classes.is_empty() {
            let classes = self.classes.join(" ");
            attrs.push_str(&format!(r#" class="{}""#, escape_attr(&classes)));
        }
        match &self.shape {
            Shape::Polygon(polygon) => {
                format!(r#"<polygon {} points="{}"/>"#, attrs, polygon.to_points_attr())
            }
            Shape::Circle(circle) => format!(
                r#"<circle {} cx="{}" cy="{}" r="{}"/>"#,
                attrs, circle.cx, circle.cy, circle.r
            ),
        }
    }
}

impl Renderable for SvgPart {
    fn toggle_marker(&mut self, marker: &str, present: bool) {
        let position = self.classes.iter().position(|class| class == marker);
        match (present, position) {
            (true, None) => self.classes.push(marker.to_string()),
            (false, Some(index)) => {
                self.classes.remove(index);
            }
            _ => {}
        }
    }

    fn has_marker(&self, marker: &str) -> bool {
        self.classes.iter().any(|class| class == marker)
    }
}

/// Everything besides the parts needed to lay out a document.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DigitLayout {
    pub bounds: Bounds,
    pub skew: SkewTransform,
}

/// Output of [`create_seven_segment_svg`].
#[derive(Clone, Debug)]
pub struct SevenSegmentSvg {
    pub parts: PartSet<SvgPart>,
    pub layout: DigitLayout,
}

impl SevenSegmentSvg {
    pub fn to_document(&self) -> String {
        render_document(&self.parts, &self.layout)
    }
}

/// Generate the renderable parts and layout for a digit.
pub fn create_seven_segment_svg(params: &SegmentShapeParams) -> SevenSegmentSvg {
    let geometry = geometry::generate(params);
    let bars = geometry
        .bars
        .map(|polygon| SvgPart::new(Shape::Polygon(polygon)));
    SevenSegmentSvg {
        parts: PartSet::new(bars, Some(SvgPart::new(Shape::Circle(geometry.dp)))),
        layout: DigitLayout {
            bounds: geometry.bounds,
            skew: geometry.skew,
        },
    }
}

/// Serialise a part set to a standalone SVG document.
pub fn render_document(parts: &PartSet<SvgPart>, layout: &DigitLayout) -> String {
    let Bounds { width, height } = layout.bounds;
    let bars: String = parts
        .iter()
        .filter(|(name, _)| *name != SegmentName::Dp)
        .map(|(name, part)| format!("    {}\n", part.to_element(name)))
        .collect();
    let dp = parts
        .dp()
        .map(|dp| format!("  {}\n", dp.to_element(SegmentName::Dp)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<svg xmlns="{ns}" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            "\n",
            r#"  <g transform="{transform}">"#,
            "\n{bars}  </g>\n{dp}</svg>\n"
        ),
        ns = SVG_NS,
        w = width,
        h = height,
        transform = layout.skew.to_svg_attr(),
        bars = bars,
        dp = dp,
    )
}
