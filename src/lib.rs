//! # Seven Segment Core Library
//!
//! This library procedurally generates a seven-segment digit as vector geometry and drives
//! the on/off state of each segment from a decimal digit or a raw 8-bit segment mask.
//!
//! ## Design Philosophy
//!
//! ### Two Components
//! - **Geometry generation** ([`geometry`], [`svg`]): a handful of shape parameters become six
//!   chevron-ended bar polygons, one decimal-point circle, a skew transform and a viewbox
//! - **Segment control** ([`controller`]): a stateless projection from a digit or mask onto the
//!   visual state of each renderable part
//!
//! ### Bit Order
//! Segments are always visited in the fixed order `a, b, c, d, e, f, g, dp`. That order is the
//! bit order of a [`SegmentMask`]: `a` is the most significant bit, `dp` the least.
//!
//! ```text
//!  bit:   7   6   5   4   3   2   1   0
//!        | a | b | c | d | e | f | g | dp |
//! ```
//!
//! ### Renderers
//! The core never touches a display. It decides which segments are lit and hands that decision
//! to a [`controller::Renderable`] handle. Two renderers ship with the crate:
//! - [`svg`]: class-toggled SVG elements serialised to a document
//! - [`raster`]: filled primitives on any `embedded-graphics` draw target
//!
//! ## Core Types
//! - [`SegmentName`]: the closed set of eight segment slots
//! - [`SegmentMask`] and [`DIGITS`]: the encoded segment states
//! - [`PartSet`]: one renderable handle per segment, with an optional decimal point

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Module declarations
pub mod config;
pub mod controller;
pub mod demo;
pub mod geometry;
pub mod raster;
pub mod svg;

/// 8-bit encoded segment state, `a` in the most significant bit and `dp` in the least.
pub type SegmentMask = u8;

/// Every segment lit, decimal point included.
pub const ALL_ON: SegmentMask = 0xFF;

/// Every segment dark.
pub const ALL_OFF: SegmentMask = 0x00;

/// Segment masks for the decimal digits 0-9 using the standard seven-segment font.
///
/// The decimal point bit is clear in every entry.
pub const DIGITS: [SegmentMask; 10] = [
    //abcdefgD
    0b1111_1100, // 0
    0b0110_0000, // 1
    0b1101_1010, // 2
    0b1111_0010, // 3
    0b0110_0110, // 4
    0b1011_0110, // 5
    0b1011_1110, // 6
    0b1110_0000, // 7
    0b1111_1110, // 8
    0b1111_0110, // 9
];

/// One of the eight segment slots of a seven-segment digit.
///
/// The declaration order is the canonical order and defines the bit order of a
/// [`SegmentMask`].
///
/// ```text
///    aaa
///   f   b
///    ggg
///   e   c
///    ddd  dp
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentName {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    Dp,
}

impl SegmentName {
    /// All segment names in canonical order.
    pub const ALL: [SegmentName; 8] = [
        SegmentName::A,
        SegmentName::B,
        SegmentName::C,
        SegmentName::D,
        SegmentName::E,
        SegmentName::F,
        SegmentName::G,
        SegmentName::Dp,
    ];

    /// The seven bar segments, decimal point excluded.
    pub const BARS: [SegmentName; 7] = [
        SegmentName::A,
        SegmentName::B,
        SegmentName::C,
        SegmentName::D,
        SegmentName::E,
        SegmentName::F,
        SegmentName::G,
    ];

    /// Position in the canonical order (`a` = 0, `dp` = 7).
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Mask bit for this segment: `0x80 >> ordinal`.
    pub const fn bit(self) -> SegmentMask {
        0x80 >> (self as u8)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SegmentName::A => "a",
            SegmentName::B => "b",
            SegmentName::C => "c",
            SegmentName::D => "d",
            SegmentName::E => "e",
            SegmentName::F => "f",
            SegmentName::G => "g",
            SegmentName::Dp => "dp",
        }
    }
}

impl fmt::Display for SegmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the eight segments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown segment name: {0:?}")]
pub struct ParseSegmentError(pub String);

impl FromStr for SegmentName {
    type Err = ParseSegmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SegmentName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ParseSegmentError(s.to_string()))
    }
}

/// Reduce an arbitrary integer to a [`SegmentMask`] by keeping its low 8 bits.
///
/// Negative values wrap the same way as a non-negative modulo 256.
///
/// ```
/// use seven_seg_lib::mask_from_raw;
///
/// assert_eq!(mask_from_raw(0x1FF), 0xFF);
/// assert_eq!(mask_from_raw(256), 0);
/// assert_eq!(mask_from_raw(-1), 0xFF);
/// ```
pub fn mask_from_raw(value: i64) -> SegmentMask {
    (value & 0xFF) as SegmentMask
}

/// Glyph mask for any integer, wrapped into 0-9 with a non-negative remainder.
///
/// ```
/// use seven_seg_lib::{digit_mask, DIGITS};
///
/// assert_eq!(digit_mask(10), DIGITS[0]);
/// assert_eq!(digit_mask(-1), DIGITS[9]);
/// ```
pub fn digit_mask(value: i64) -> SegmentMask {
    DIGITS[value.rem_euclid(10) as usize]
}

/// True when `name`'s bit is set in `mask`.
pub fn is_lit(mask: SegmentMask, name: SegmentName) -> bool {
    mask & name.bit() != 0
}

/// One renderable handle per segment.
///
/// The seven bars are mandatory and stored in canonical order. The decimal point is
/// optional: a set without one renders no dot and ignores every attempt to light it.
#[derive(Clone, Debug, PartialEq)]
pub struct PartSet<P> {
    bars: [P; 7],
    dp: Option<P>,
}

impl<P> PartSet<P> {
    /// Build a part set from bars ordered `a..=g` and an optional decimal point.
    pub fn new(bars: [P; 7], dp: Option<P>) -> Self {
        Self { bars, dp }
    }

    pub fn get(&self, name: SegmentName) -> Option<&P> {
        match name {
            SegmentName::Dp => self.dp.as_ref(),
            bar => self.bars.get(bar.ordinal()),
        }
    }

    pub fn get_mut(&mut self, name: SegmentName) -> Option<&mut P> {
        match name {
            SegmentName::Dp => self.dp.as_mut(),
            bar => self.bars.get_mut(bar.ordinal()),
        }
    }

    /// The bar handles in canonical order.
    pub fn bars(&self) -> &[P; 7] {
        &self.bars
    }

    pub fn dp(&self) -> Option<&P> {
        self.dp.as_ref()
    }

    /// Present handles in canonical order, the decimal point last.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentName, &P)> {
        SegmentName::BARS
            .into_iter()
            .zip(self.bars.iter())
            .chain(self.dp.iter().map(|dp| (SegmentName::Dp, dp)))
    }

    /// Drop the decimal point handle.
    pub fn without_dp(self) -> Self {
        Self {
            bars: self.bars,
            dp: None,
        }
    }

    /// Convert every handle, keeping names and presence.
    pub fn map<Q>(self, mut f: impl FnMut(SegmentName, P) -> Q) -> PartSet<Q> {
        let mut ordinal = 0;
        let bars = self.bars.map(|part| {
            let name = SegmentName::BARS[ordinal];
            ordinal += 1;
            f(name, part)
        });
        PartSet {
            bars,
            dp: self.dp.map(|dp| f(SegmentName::Dp, dp)),
        }
    }
}
