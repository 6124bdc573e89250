//! # Raster Rendering
//!
//! Draws the current state of a generated digit onto any `embedded-graphics` draw target,
//! so the same part set that feeds the SVG document can light up a framebuffer, a simulator
//! window or the terminal.
//!
//! Only parts carrying the on-marker are drawn; dark parts are left untouched. Bars are
//! skewed into viewbox space and filled as a fan of triangles (every bar hexagon is convex),
//! the decimal point is a filled circle.
//!
//! Projected vertices are clamped into a window around the target's bounding box and all
//! drawing goes through a clipped target, so extreme scales or near-vertical skews cost no
//! more than filling the target itself.

use crate::controller::{Renderable, StyleMarkers};
use crate::geometry;
use crate::svg::{DigitLayout, Shape, SvgPart};
use crate::{PartSet, SegmentName};
use embedded_graphics::{
    draw_target::DrawTargetExt,
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle, Rectangle, Triangle},
};
use std::convert::Infallible;
use std::fmt;

/// Largest width or height of an [`AsciiCanvas`], in pixels.
pub const MAX_CANVAS_SIDE: u32 = 2048;

/// Margin kept around the target when clamping vertices, capped so edge arithmetic
/// inside the primitives stays well within `i32`.
const MAX_MARGIN: u32 = 4096;

/// Pixel range that projected vertices are clamped into.
#[derive(Clone, Copy, Debug)]
struct Window {
    min: Point,
    max: Point,
}

impl Window {
    /// The target area grown by one area-size margin on every side.
    fn around(area: &Rectangle) -> Self {
        let margin = area.size.width.max(area.size.height).min(MAX_MARGIN) as i32;
        let Point { x, y } = area.top_left;
        let width = area.size.width.min(MAX_MARGIN) as i32;
        let height = area.size.height.min(MAX_MARGIN) as i32;
        Window {
            min: Point::new(x.saturating_sub(margin), y.saturating_sub(margin)),
            max: Point::new(
                x.saturating_add(width).saturating_add(margin),
                y.saturating_add(height).saturating_add(margin),
            ),
        }
    }

    /// Convert a viewbox coordinate into a pixel position inside the window.
    fn to_pixel(&self, point: geometry::Point, scale: f64) -> Point {
        // NaN clamps to NaN, which casts to 0
        let clamp = |v: f64, lo: i32, hi: i32| v.round().clamp(lo as f64, hi as f64) as i32;
        Point::new(
            clamp(point.x * scale, self.min.x, self.max.x),
            clamp(point.y * scale, self.min.y, self.max.y),
        )
    }

    /// Largest diameter worth drawing: anything wider covers the whole window.
    fn max_diameter(&self) -> u32 {
        let width = self.max.x.abs_diff(self.min.x);
        let height = self.max.y.abs_diff(self.min.y);
        width.max(height).saturating_mul(2)
    }
}

/// Fill a convex polygon as a triangle fan anchored at its first vertex.
fn fill_convex<D>(
    points: &[Point],
    style: PrimitiveStyle<BinaryColor>,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let Some((&anchor, rest)) = points.split_first() else {
        return Ok(());
    };
    for pair in rest.windows(2) {
        Triangle::new(anchor, pair[0], pair[1])
            .into_styled(style)
            .draw(target)?;
    }
    Ok(())
}

/// Draw every lit part of `parts` at `scale` pixels per viewbox unit.
pub fn draw_digit<D>(
    parts: &PartSet<SvgPart>,
    layout: &DigitLayout,
    markers: &StyleMarkers,
    scale: f64,
    target: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let fill = PrimitiveStyle::with_fill(BinaryColor::On);
    let area = target.bounding_box();
    let window = Window::around(&area);
    let mut target = target.clipped(&area);

    for (name, part) in parts.iter() {
        if !part.has_marker(&markers.on) {
            continue;
        }
        // Bars live inside the skewed group, the decimal point does not.
        let skew = if name == SegmentName::Dp {
            geometry::SkewTransform::IDENTITY
        } else {
            layout.skew
        };
        match &part.shape {
            Shape::Polygon(polygon) => {
                let points: Vec<Point> = polygon
                    .points
                    .iter()
                    .map(|p| window.to_pixel(skew.apply(*p), scale))
                    .collect();
                fill_convex(&points, fill, &mut target)?;
            }
            Shape::Circle(circle) => {
                let center = geometry::Point::new(circle.cx, circle.cy);
                let center = window.to_pixel(skew.apply(center), scale);
                let diameter = (circle.r * 2.0 * scale)
                    .round()
                    .clamp(0.0, window.max_diameter() as f64) as u32;
                Circle::with_center(center, diameter)
                    .into_styled(fill)
                    .draw(&mut target)?;
            }
        }
    }
    Ok(())
}

/// Fixed-size monochrome canvas that prints as text.
///
/// Each pixel is two columns wide to roughly square up terminal cells. Pixels drawn outside
/// the canvas are dropped, and neither side grows past [`MAX_CANVAS_SIDE`].
#[derive(Clone, Debug, PartialEq)]
pub struct AsciiCanvas {
    size: Size,
    pixels: Vec<bool>,
}

impl AsciiCanvas {
    pub fn new(size: Size) -> Self {
        let size = Size::new(
            size.width.min(MAX_CANVAS_SIDE),
            size.height.min(MAX_CANVAS_SIDE),
        );
        Self {
            size,
            pixels: vec![false; size.width as usize * size.height as usize],
        }
    }

    /// A canvas large enough for the whole viewbox at `scale`, up to [`MAX_CANVAS_SIDE`].
    pub fn for_layout(layout: &DigitLayout, scale: f64) -> Self {
        let extent = |v: f64| {
            ((v * scale).ceil().clamp(0.0, MAX_CANVAS_SIDE as f64) as u32).saturating_add(1)
        };
        Self::new(Size::new(
            extent(layout.bounds.width),
            extent(layout.bounds.height),
        ))
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y) = (u32::try_from(point.x).ok()?, u32::try_from(point.y).ok()?);
        (x < self.size.width && y < self.size.height).then(|| (y * self.size.width + x) as usize)
    }

    pub fn is_set(&self, point: Point) -> bool {
        self.index(point).is_some_and(|i| self.pixels[i])
    }

    /// Positions of every lit pixel, row by row.
    pub fn lit_pixels(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.size.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .filter(|(_, lit)| **lit)
            .map(move |(i, _)| Point::new((i as u32 % width) as i32, (i as u32 / width) as i32))
    }

    pub fn clear(&mut self) {
        self.pixels.fill(false);
    }
}

impl OriginDimensions for AsciiCanvas {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for AsciiCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = color.is_on();
            }
        }
        Ok(())
    }

    /// Scanline fills only touch the part of `area` that lies on the canvas.
    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        for point in drawable_area.points() {
            if let Some(i) = self.index(point) {
                self.pixels[i] = color.is_on();
            }
        }
        Ok(())
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.size.width as usize;
        if width == 0 {
            return Ok(());
        }
        for row in self.pixels.chunks(width) {
            let line: String = row
                .iter()
                .map(|lit| if *lit { "##" } else { "  " })
                .collect();
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
