//! # Segment Controller
//!
//! Drives the on/off visual state of a [`PartSet`] from a digit or an encoded mask.
//!
//! The controller keeps no "current digit". Every call is a complete projection of its input
//! onto the parts: each present handle ends up carrying exactly one of the two style markers,
//! so repeating a call changes nothing and a caller may stop between calls at any point.
//!
//! ## Markers
//!
//! A renderer only needs a binary "mark as on" / "mark as off" primitive per handle. The
//! concrete markers (CSS class names for the SVG renderer) are plain strings chosen by the
//! caller, defaulting to [`DEFAULT_ON_MARKER`] and [`DEFAULT_OFF_MARKER`].

use crate::{digit_mask, is_lit, PartSet, SegmentMask, SegmentName, ALL_OFF, ALL_ON};
use log::trace;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ON_MARKER: &str = "seven-seg--on";
pub const DEFAULT_OFF_MARKER: &str = "seven-seg--off";

/// A handle whose visual state can be switched by adding or removing a marker.
pub trait Renderable {
    /// Add `marker` when `present` is true, remove it otherwise.
    fn toggle_marker(&mut self, marker: &str, present: bool);

    fn has_marker(&self, marker: &str) -> bool;
}

/// Anything that can switch a whole display on or off.
pub trait DisplayController {
    /// Turn on all parts of the display.
    fn on(&mut self);

    /// Turn off all parts of the display.
    fn off(&mut self);
}

/// The pair of mutually exclusive markers applied to lit and dark parts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleMarkers {
    pub on: String,
    pub off: String,
}

impl Default for StyleMarkers {
    fn default() -> Self {
        StyleMarkers {
            on: DEFAULT_ON_MARKER.to_string(),
            off: DEFAULT_OFF_MARKER.to_string(),
        }
    }
}

/// Stateless projection of digits and segment masks onto a set of renderable parts.
///
/// # Example
/// ```
/// use seven_seg_lib::controller::SegmentController;
/// use seven_seg_lib::svg::create_seven_segment_svg;
/// use seven_seg_lib::geometry::SegmentShapeParams;
/// use seven_seg_lib::SegmentName;
///
/// let generated = create_seven_segment_svg(&SegmentShapeParams::default());
/// let mut controller = SegmentController::new(generated.parts);
///
/// controller.set_digit(1);
/// assert_eq!(controller.is_on(SegmentName::B), Some(true));
/// assert_eq!(controller.is_on(SegmentName::A), Some(false));
/// ```
#[derive(Debug)]
pub struct SegmentController<P> {
    parts: PartSet<P>,
    markers: StyleMarkers,
}

impl<P: Renderable> SegmentController<P> {
    /// Control `parts` with the default markers.
    pub fn new(parts: PartSet<P>) -> Self {
        Self::with_markers(parts, StyleMarkers::default())
    }

    pub fn with_markers(parts: PartSet<P>, markers: StyleMarkers) -> Self {
        Self { parts, markers }
    }

    /// Show the glyph for `digit`, wrapped into 0-9 with a non-negative remainder.
    pub fn set_digit(&mut self, digit: i64) {
        self.set_segments(digit_mask(digit));
    }

    /// Set every segment at once from an `abcdefgDP`-encoded mask.
    ///
    /// A set bit lights its segment. For example `0b1000_0000` lights only `a`:
    ///
    /// | a | b | c | d | e | f | g | dp |
    /// |---|---|---|---|---|---|---|----|
    /// | 1 | 0 | 0 | 0 | 0 | 0 | 0 | 0  |
    ///
    /// Segments without a handle (only `dp` can be missing) are skipped.
    pub fn set_segments(&mut self, encoded: SegmentMask) {
        trace!("set_segments {encoded:#010b}");
        for name in SegmentName::ALL {
            let lit = is_lit(encoded, name);
            if let Some(part) = self.parts.get_mut(name) {
                part.toggle_marker(&self.markers.on, lit);
                part.toggle_marker(&self.markers.off, !lit);
            }
        }
    }

    /// Whether `name` currently carries the on-marker, `None` if it has no handle.
    pub fn is_on(&self, name: SegmentName) -> Option<bool> {
        self.parts
            .get(name)
            .map(|part| part.has_marker(&self.markers.on))
    }

    pub fn parts(&self) -> &PartSet<P> {
        &self.parts
    }

    pub fn markers(&self) -> &StyleMarkers {
        &self.markers
    }
}

impl<P: Renderable> DisplayController for SegmentController<P> {
    fn on(&mut self) {
        self.set_segments(ALL_ON);
    }

    fn off(&mut self) {
        self.set_segments(ALL_OFF);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DIGITS;

    /// Marker list that keeps every toggle so tests can inspect the exact state.
    #[derive(Clone, Debug, Default, PartialEq)]
    struct Markers(Vec<String>);

    impl Renderable for Markers {
        fn toggle_marker(&mut self, marker: &str, present: bool) {
            let position = self.0.iter().position(|m| m == marker);
            match (present, position) {
                (true, None) => self.0.push(marker.to_string()),
                (false, Some(index)) => {
                    self.0.remove(index);
                }
                _ => {}
            }
        }

        fn has_marker(&self, marker: &str) -> bool {
            self.0.iter().any(|m| m == marker)
        }
    }

    fn controller() -> SegmentController<Markers> {
        SegmentController::new(PartSet::new(Default::default(), Some(Markers::default())))
    }

    fn lit_mask(controller: &SegmentController<Markers>) -> SegmentMask {
        SegmentName::ALL
            .into_iter()
            .filter(|name| controller.is_on(*name) == Some(true))
            .fold(0, |mask, name| mask | name.bit())
    }

    #[test]
    fn test_set_segments_applies_exactly_one_marker() {
        let mut controller = controller();
        for mask in 0..=255u8 {
            controller.set_segments(mask);
            for (name, part) in controller.parts().iter() {
                let lit = mask & (0x80 >> name.ordinal()) != 0;
                assert_eq!(part.has_marker(DEFAULT_ON_MARKER), lit, "{name} for {mask:#x}");
                assert_eq!(part.has_marker(DEFAULT_OFF_MARKER), !lit, "{name} for {mask:#x}");
                assert_eq!(part.0.len(), 1);
            }
        }
    }

    #[test]
    fn test_set_digit_uses_table() {
        let mut controller = controller();
        controller.set_digit(0);
        assert_eq!(lit_mask(&controller), 0b1111_1100);
        controller.set_digit(1);
        assert_eq!(lit_mask(&controller), 0b0110_0000);
        controller.set_digit(8);
        assert_eq!(lit_mask(&controller), 0b1111_1110);
    }

    #[test]
    fn test_set_digit_wraps_any_integer() {
        let mut wrapped = controller();
        let mut direct = controller();
        for n in -25..25 {
            wrapped.set_digit(n);
            direct.set_digit(n.rem_euclid(10));
            assert_eq!(wrapped.parts(), direct.parts(), "digit {n}");
        }
        wrapped.set_digit(-1);
        assert_eq!(lit_mask(&wrapped), DIGITS[9]);
    }

    #[test]
    fn test_on_off_match_masks() {
        let mut via_trait = controller();
        let mut via_mask = controller();

        via_trait.on();
        via_mask.set_segments(255);
        assert_eq!(via_trait.parts(), via_mask.parts());
        assert_eq!(lit_mask(&via_trait), ALL_ON);

        via_trait.off();
        via_mask.set_segments(0);
        assert_eq!(via_trait.parts(), via_mask.parts());
        assert_eq!(lit_mask(&via_trait), ALL_OFF);
    }

    #[test]
    fn test_set_segments_is_idempotent() {
        let mut controller = controller();
        controller.set_segments(0b1010_0101);
        let once = controller.parts().clone();
        controller.set_segments(0b1010_0101);
        assert_eq!(controller.parts(), &once);
    }

    #[test]
    fn test_missing_dp_is_skipped() {
        let mut controller = SegmentController::new(PartSet::new(
            <[Markers; 7]>::default(),
            None,
        ));
        controller.on();
        assert_eq!(controller.is_on(SegmentName::Dp), None);
        for name in SegmentName::BARS {
            assert_eq!(controller.is_on(name), Some(true));
        }
    }

    #[test]
    fn test_custom_markers() {
        let markers = StyleMarkers {
            on: "lit".to_string(),
            off: "dark".to_string(),
        };
        let mut controller = SegmentController::with_markers(
            PartSet::new(Default::default(), Some(Markers::default())),
            markers,
        );
        controller.set_segments(SegmentName::A.bit());
        let a = controller.parts().get(SegmentName::A).unwrap();
        let b = controller.parts().get(SegmentName::B).unwrap();
        assert_eq!(a.0, vec!["lit".to_string()]);
        assert_eq!(b.0, vec!["dark".to_string()]);
        assert!(!a.has_marker(DEFAULT_ON_MARKER));
    }
}
