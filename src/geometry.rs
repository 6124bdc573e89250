//! # Seven Segment Geometry
//!
//! This module turns a small set of shape parameters into the coordinates of a complete
//! seven-segment digit: six chevron-ended bars, one decimal-point circle, the skew transform
//! applied to the bars and the viewbox that bounds everything.
//!
//! ## Bar Shape
//!
//! Every bar is a hexagon whose short ends come to a point. The `offset` pulls the corner
//! vertices inward so that perpendicular neighbours meet on a clean diagonal:
//!
//! ```text
//!        offset
//!       |<->|
//!           +-------------+
//!          /               \
//!         +                 +   <- mid-points of the short ends
//!          \               /
//!           +-------------+
//! ```
//!
//! ## Layout
//!
//! The `gap` is the uniform spacing between adjacent segments. Bars `a`, `d` and `g` share
//! the same x; `e`/`f` sit at x = 0 and `b`/`c` at the right edge. All parts share one
//! coordinate space whose origin is the top-left corner of the viewbox.
//!
//! ## Skew
//!
//! The slant is given as a horizontal pixel displacement between the top and bottom of the
//! digit rather than an angle, so the visual lean is independent of the digit's height:
//!
//! ```text
//! angle = asin(skew_distance / digit_height)   (degrees)
//! translate_x = max(0, -skew_distance)
//! ```
//!
//! The decimal point is drawn outside the skew and trails the digit by `|skew_distance|`.
//!
//! Nothing here can fail: any finite input yields a (possibly degenerate) digit.

use serde::{Deserialize, Serialize};

/// Width and height of one bar orientation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarSize {
    pub width: f64,
    pub height: f64,
}

/// Size and placement tweaks for the decimal point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DpParams {
    pub diameter: f64,
    /// Horizontal nudge away from the bottom-right corner of the digit
    pub nudge_x: f64,
    /// Vertical nudge away from the bottom of the vertical bars
    pub nudge_y: f64,
}

/// Geometric configuration of a digit.
///
/// No validation is applied. Zero sizes produce degenerate but well-defined geometry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentShapeParams {
    /// Spacing between adjacent segments
    pub gap: f64,
    /// Signed horizontal displacement of the digit's top relative to its bottom
    pub digit_skew_distance: f64,
    /// Size of the horizontal bars `a`, `d` and `g`
    pub horizontal_segment: BarSize,
    /// Size of the vertical bars `b`, `c`, `e` and `f`
    pub vertical_segment: BarSize,
    pub dp: DpParams,
}

impl Default for SegmentShapeParams {
    fn default() -> Self {
        SegmentShapeParams {
            horizontal_segment: BarSize {
                width: 6.0,
                height: 2.0,
            },
            vertical_segment: BarSize {
                width: 2.0,
                height: 7.0,
            },
            dp: DpParams {
                diameter: 2.0,
                nudge_x: -1.0,
                nudge_y: 0.0,
            },
            gap: 0.25,
            digit_skew_distance: -2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polygon {
    pub points: Vec<Point>,
}

impl Polygon {
    /// Points formatted for an SVG `points` attribute: `x,y` pairs joined by spaces.
    pub fn to_points_attr(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
}

/// Placement of a single bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentParameters {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// How far the corner vertices sit inward from each pointed end
    pub offset: f64,
}

/// Top-left placement of the decimal point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DpPlacement {
    pub x: f64,
    pub y: f64,
    pub diameter: f64,
}

/// Horizontal shear applied to the six bars: SVG `skewX(angle) translate(translate_x)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SkewTransform {
    pub angle_deg: f64,
    pub translate_x: f64,
}

impl SkewTransform {
    pub const IDENTITY: SkewTransform = SkewTransform {
        angle_deg: 0.0,
        translate_x: 0.0,
    };

    /// Derive the shear from a literal pixel displacement over a digit's height.
    ///
    /// The sine ratio is clamped to [-1, 1] and a zero height yields no shear, so every
    /// finite input maps to a finite angle.
    pub fn from_skew_distance(skew_distance: f64, digit_height: f64) -> Self {
        let angle_deg = if skew_distance == 0.0 || digit_height == 0.0 {
            0.0
        } else {
            (skew_distance / digit_height)
                .clamp(-1.0, 1.0)
                .asin()
                .to_degrees()
        };
        // max(0, -d), written out so a zero distance never yields -0
        let translate_x = if skew_distance < 0.0 {
            -skew_distance
        } else {
            0.0
        };
        SkewTransform {
            angle_deg,
            translate_x,
        }
    }

    /// Map a point from bar space into viewbox space.
    ///
    /// The translation is applied first, then the shear: `x' = x + t + y * tan(angle)`.
    pub fn apply(&self, point: Point) -> Point {
        Point {
            x: point.x + self.translate_x + point.y * self.angle_deg.to_radians().tan(),
            y: point.y,
        }
    }

    /// Value for an SVG `transform` attribute.
    pub fn to_svg_attr(&self) -> String {
        format!(
            "skewX({}) translate({})",
            self.angle_deg, self.translate_x
        )
    }
}

/// Viewbox size of a generated digit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

/// Complete geometry of one digit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DigitGeometry {
    /// Bars `a..=g` in canonical order, in unskewed bar space
    pub bars: [Polygon; 7],
    /// Decimal point in viewbox space
    pub dp: Circle,
    pub skew: SkewTransform,
    pub bounds: Bounds,
}

/// Build a vertical bar with pointed top and bottom ends.
pub fn vertical_segment(params: SegmentParameters) -> Polygon {
    let SegmentParameters {
        x,
        y,
        width,
        height,
        offset,
    } = params;
    Polygon {
        points: vec![
            Point::new(x + width / 2.0, y),
            Point::new(x + width, y + offset),
            Point::new(x + width, y + height - offset),
            Point::new(x + width / 2.0, y + height),
            Point::new(x, y + height - offset),
            Point::new(x, y + offset),
        ],
    }
}

/// Build a horizontal bar with pointed left and right ends.
pub fn horizontal_segment(params: SegmentParameters) -> Polygon {
    let SegmentParameters {
        x,
        y,
        width,
        height,
        offset,
    } = params;
    Polygon {
        points: vec![
            Point::new(x, y + height / 2.0),
            Point::new(x + offset, y),
            Point::new(x + width - offset, y),
            Point::new(x + width, y + height / 2.0),
            Point::new(x + width - offset, y + height),
            Point::new(x + offset, y + height),
        ],
    }
}

/// Convert a top-left placement into a center and radius.
pub fn decimal_point(placement: DpPlacement) -> Circle {
    let radius = placement.diameter / 2.0;
    Circle {
        cx: placement.x + radius,
        cy: placement.y + radius,
        r: radius,
    }
}

/// Height of the bar group before skewing.
pub fn digit_height(params: &SegmentShapeParams) -> f64 {
    params.vertical_segment.height * 2.0 + params.gap * 4.0 + params.horizontal_segment.height
}

/// Viewbox size for a digit.
///
/// Exact for non-negative nudges and skew; negative values may let geometry spill slightly
/// past the box.
pub fn bounds(params: &SegmentShapeParams) -> Bounds {
    let SegmentShapeParams {
        horizontal_segment: h,
        vertical_segment: v,
        dp,
        gap,
        digit_skew_distance,
    } = *params;
    Bounds {
        width: h.width + v.width + dp.nudge_x + digit_skew_distance.abs() + gap * 2.0 + dp.diameter,
        height: v.height * 2.0 + dp.nudge_y + gap * 4.0 + f64::max(h.height, dp.diameter),
    }
}

/// Compute every polygon, the decimal point, the skew and the viewbox for `params`.
pub fn generate(params: &SegmentShapeParams) -> DigitGeometry {
    let SegmentShapeParams {
        horizontal_segment: h,
        vertical_segment: v,
        dp,
        gap,
        digit_skew_distance,
    } = *params;

    let horizontal = |x: f64, y: f64| {
        horizontal_segment(SegmentParameters {
            x,
            y,
            width: h.width,
            height: h.height,
            offset: v.width / 2.0,
        })
    };
    let vertical = |x: f64, y: f64| {
        vertical_segment(SegmentParameters {
            x,
            y,
            width: v.width,
            height: v.height,
            offset: h.height / 2.0,
        })
    };

    let inner_x = v.width / 2.0 + gap;
    let right_x = h.width + gap * 2.0;
    let upper_y = h.height / 2.0 + gap;
    let lower_y = v.height + h.height / 2.0 + gap * 3.0;

    let bars = [
        horizontal(inner_x, 0.0),                        // a
        vertical(right_x, upper_y),                      // b
        vertical(right_x, lower_y),                      // c
        horizontal(inner_x, v.height * 2.0 + gap * 4.0), // d
        vertical(0.0, lower_y),                          // e
        vertical(0.0, upper_y),                          // f
        horizontal(inner_x, v.height + gap * 2.0),       // g
    ];

    let dp_circle = decimal_point(DpPlacement {
        x: h.width + v.width + digit_skew_distance.abs() + dp.nudge_x + gap * 2.0,
        y: v.height * 2.0 + dp.nudge_y + gap * 4.0,
        diameter: dp.diameter,
    });

    DigitGeometry {
        bars,
        dp: dp_circle,
        skew: SkewTransform::from_skew_distance(digit_skew_distance, digit_height(params)),
        bounds: bounds(params),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unskewed_params() -> SegmentShapeParams {
        SegmentShapeParams {
            digit_skew_distance: 0.0,
            ..SegmentShapeParams::default()
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_horizontal_segment_vertex_order() {
        let bar = horizontal_segment(SegmentParameters {
            x: 1.25,
            y: 0.0,
            width: 6.0,
            height: 2.0,
            offset: 1.0,
        });
        assert_eq!(
            bar.points,
            vec![
                Point::new(1.25, 1.0),
                Point::new(2.25, 0.0),
                Point::new(6.25, 0.0),
                Point::new(7.25, 1.0),
                Point::new(6.25, 2.0),
                Point::new(2.25, 2.0),
            ]
        );
        assert_eq!(bar.to_points_attr(), "1.25,1 2.25,0 6.25,0 7.25,1 6.25,2 2.25,2");
    }

    #[test]
    fn test_vertical_segment_vertex_order() {
        let bar = vertical_segment(SegmentParameters {
            x: 0.0,
            y: 1.25,
            width: 2.0,
            height: 7.0,
            offset: 1.0,
        });
        assert_eq!(
            bar.points,
            vec![
                Point::new(1.0, 1.25),
                Point::new(2.0, 2.25),
                Point::new(2.0, 7.25),
                Point::new(1.0, 8.25),
                Point::new(0.0, 7.25),
                Point::new(0.0, 2.25),
            ]
        );
    }

    #[test]
    fn test_decimal_point_center() {
        let circle = decimal_point(DpPlacement {
            x: 9.5,
            y: 15.0,
            diameter: 2.0,
        });
        assert_eq!(
            circle,
            Circle {
                cx: 10.5,
                cy: 16.0,
                r: 1.0
            }
        );
    }

    #[test]
    fn test_bar_placement() {
        let geometry = generate(&unskewed_params());
        let first = |i: usize| geometry.bars[i].points[0];
        // Horizontal bars start at their left mid-point, vertical bars at their top point.
        assert_eq!(first(0), Point::new(1.25, 1.0)); // a
        assert_eq!(first(1), Point::new(7.5, 1.25)); // b
        assert_eq!(first(2), Point::new(7.5, 8.75)); // c
        assert_eq!(first(3), Point::new(1.25, 16.0)); // d
        assert_eq!(first(4), Point::new(1.0, 8.75)); // e
        assert_eq!(first(5), Point::new(1.0, 1.25)); // f
        assert_eq!(first(6), Point::new(1.25, 8.5)); // g
    }

    #[test]
    fn test_bounds_match_demo_parameters() {
        let params = unskewed_params();
        let bounds = bounds(&params);
        assert_close(bounds.width, 6.0 + 2.0 - 1.0 + 0.0 + 0.5 + 2.0);
        assert_close(bounds.height, 14.0 + 0.0 + 1.0 + 2.0);
        assert_eq!(generate(&params).bounds, bounds);
    }

    #[test]
    fn test_no_skew_is_identity() {
        let geometry = generate(&unskewed_params());
        assert_eq!(geometry.skew, SkewTransform::IDENTITY);
        let p = Point::new(3.0, 4.0);
        assert_eq!(geometry.skew.apply(p), p);
    }

    #[test]
    fn test_skew_angle_from_distance() {
        let params = SegmentShapeParams::default();
        let height = digit_height(&params);
        assert_close(height, 17.0);

        let skew = generate(&params).skew;
        assert_close(skew.angle_deg, (-2.0f64 / 17.0).asin().to_degrees());
        assert_close(skew.translate_x, 2.0);

        let forward = SkewTransform::from_skew_distance(3.0, 17.0);
        assert_close(forward.angle_deg, (3.0f64 / 17.0).asin().to_degrees());
        assert_close(forward.translate_x, 0.0);
    }

    #[test]
    fn test_skew_keeps_top_inside_positive_space() {
        let skew = SkewTransform::from_skew_distance(-2.0, 17.0);
        let top_left = skew.apply(Point::new(0.0, 0.0));
        let bottom_left = skew.apply(Point::new(0.0, 17.0));
        assert_close(top_left.x, 2.0);
        assert!(bottom_left.x >= 0.0);
        assert!(bottom_left.x < top_left.x);
    }

    #[test]
    fn test_degenerate_skew_stays_finite() {
        let zero_height = SkewTransform::from_skew_distance(5.0, 0.0);
        assert_eq!(zero_height.angle_deg, 0.0);
        let too_steep = SkewTransform::from_skew_distance(50.0, 10.0);
        assert_close(too_steep.angle_deg, 90.0);
    }

    #[test]
    fn test_degenerate_params_produce_geometry() {
        let params = SegmentShapeParams {
            horizontal_segment: BarSize {
                width: 0.0,
                height: 0.0,
            },
            vertical_segment: BarSize {
                width: 0.0,
                height: 0.0,
            },
            dp: DpParams {
                diameter: 0.0,
                nudge_x: 0.0,
                nudge_y: 0.0,
            },
            gap: 0.0,
            digit_skew_distance: 0.0,
        };
        let geometry = generate(&params);
        assert_eq!(geometry.bounds, Bounds { width: 0.0, height: 0.0 });
        assert!(geometry
            .bars
            .iter()
            .all(|bar| bar.points.len() == 6 && bar.points.iter().all(|p| p.x == 0.0 && p.y == 0.0)));
        assert_eq!(geometry.dp.r, 0.0);
    }

    #[test]
    fn test_dp_trails_the_skew() {
        let geometry = generate(&SegmentShapeParams::default());
        // x = 6 + 2 + |−2| − 1 + 0.5, plus the radius
        assert_close(geometry.dp.cx, 9.5 + 1.0);
        assert_close(geometry.dp.cy, 15.0 + 1.0);
    }

    #[test]
    fn test_geometry_fits_bounds_for_non_negative_params() {
        let params = SegmentShapeParams {
            dp: DpParams {
                diameter: 1.5,
                nudge_x: 0.5,
                nudge_y: 0.25,
            },
            digit_skew_distance: 1.5,
            ..SegmentShapeParams::default()
        };
        let geometry = generate(&params);
        let b = geometry.bounds;
        for bar in &geometry.bars {
            for p in &bar.points {
                let q = geometry.skew.apply(*p);
                assert!(q.x >= -1e-9 && q.x <= b.width + 1e-9, "x {} outside {}", q.x, b.width);
                assert!(q.y >= -1e-9 && q.y <= b.height + 1e-9);
            }
        }
        assert!(geometry.dp.cx + geometry.dp.r <= b.width + 1e-9);
        assert!(geometry.dp.cy + geometry.dp.r <= b.height + 1e-9);
    }
}
