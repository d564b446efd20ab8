//! Plane palette to egui colors.

use eframe::egui::Color32;
use tdisview_core::PlaneColor;

/// egui color of a palette entry.
#[must_use]
pub fn plane_color32(color: PlaneColor) -> Color32 {
    let [r, g, b] = color.rgb();
    Color32::from_rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_colors_are_distinct() {
        let colors: Vec<_> = PlaneColor::PALETTE.iter().map(|c| plane_color32(*c)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_eq!(plane_color32(PlaneColor::Red), Color32::from_rgb(255, 0, 0));
    }
}
