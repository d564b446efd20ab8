//! Plane color palette.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Named colors assigned to readout planes, in assignment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PlaneColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Indigo,
    Violet,
    Pink,
    Cyan,
    Magenta,
}

impl PlaneColor {
    /// The fixed palette, cycled through by first appearance of a plane.
    pub const PALETTE: [PlaneColor; 10] = [
        PlaneColor::Red,
        PlaneColor::Orange,
        PlaneColor::Yellow,
        PlaneColor::Green,
        PlaneColor::Blue,
        PlaneColor::Indigo,
        PlaneColor::Violet,
        PlaneColor::Pink,
        PlaneColor::Cyan,
        PlaneColor::Magenta,
    ];

    /// Color for the `index`-th distinct plane; wraps after ten.
    #[inline]
    #[must_use]
    pub fn cyclic(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    /// CSS color name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PlaneColor::Red => "red",
            PlaneColor::Orange => "orange",
            PlaneColor::Yellow => "yellow",
            PlaneColor::Green => "green",
            PlaneColor::Blue => "blue",
            PlaneColor::Indigo => "indigo",
            PlaneColor::Violet => "violet",
            PlaneColor::Pink => "pink",
            PlaneColor::Cyan => "cyan",
            PlaneColor::Magenta => "magenta",
        }
    }

    /// sRGB value of the CSS color of the same name.
    #[must_use]
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            PlaneColor::Red => [0xff, 0x00, 0x00],
            PlaneColor::Orange => [0xff, 0xa5, 0x00],
            PlaneColor::Yellow => [0xff, 0xff, 0x00],
            PlaneColor::Green => [0x00, 0x80, 0x00],
            PlaneColor::Blue => [0x00, 0x00, 0xff],
            PlaneColor::Indigo => [0x4b, 0x00, 0x82],
            PlaneColor::Violet => [0xee, 0x82, 0xee],
            PlaneColor::Pink => [0xff, 0xc0, 0xcb],
            PlaneColor::Cyan => [0x00, 0xff, 0xff],
            PlaneColor::Magenta => [0xff, 0x00, 0xff],
        }
    }
}

impl fmt::Display for PlaneColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Label-to-color assignment for one render pass.
///
/// Labels get colors in order of first appearance. A fresh assignment is built
/// for every projection, so colors are only stable within one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorAssignment {
    entries: Vec<(String, PlaneColor)>,
}

impl ColorAssignment {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the color of `label`, assigning the next palette entry if it is new.
    pub fn color_for(&mut self, label: &str) -> PlaneColor {
        if let Some((_, color)) = self.entries.iter().find(|(l, _)| l == label) {
            return *color;
        }
        let color = PlaneColor::cyclic(self.entries.len());
        self.entries.push((label.to_string(), color));
        color
    }

    /// Number of distinct labels seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no label was assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the assignment, returning `(label, color)` in first-appearance order.
    #[must_use]
    pub fn into_legend(self) -> Vec<(String, PlaneColor)> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_appearance_order() {
        let mut colors = ColorAssignment::new();
        assert_eq!(colors.color_for("Plane 6"), PlaneColor::Red);
        assert_eq!(colors.color_for("Plane 2"), PlaneColor::Orange);
        assert_eq!(colors.color_for("Plane 6"), PlaneColor::Red);
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn test_palette_wraps_after_ten() {
        let mut colors = ColorAssignment::new();
        for plane in 0..10 {
            colors.color_for(&format!("Plane {plane}"));
        }
        assert_eq!(colors.color_for("Plane 10"), PlaneColor::Red);
        assert_eq!(colors.color_for("Plane 11"), PlaneColor::Orange);
        assert_eq!(colors.len(), 12);
    }

    #[test]
    fn test_names() {
        assert_eq!(PlaneColor::Indigo.to_string(), "indigo");
        assert_eq!(PlaneColor::cyclic(9).name(), "magenta");
    }
}
