//! Static detector outlines drawn behind the hits.

use std::sync::OnceLock;

use tdisview_core::geometry::{pad_centers, NUM_PLANES, PLANE_SPACING_CM};

/// Centers of every pad of the readout plane, as plot points.
pub fn pad_grid_points() -> &'static [[f64; 2]] {
    static POINTS: OnceLock<Vec<[f64; 2]>> = OnceLock::new();
    POINTS.get_or_init(|| pad_centers().map(|(_, _, c)| [c.x, c.y]).collect())
}

/// Longitudinal position of each readout plane (cm).
pub fn plane_positions() -> impl Iterator<Item = f64> {
    (0..NUM_PLANES).map(|plane| f64::from(plane) * PLANE_SPACING_CM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdisview_core::geometry::{NUM_PADS_PER_RING, NUM_RINGS};

    #[test]
    fn test_grid_covers_all_pads() {
        let expected = usize::try_from(NUM_RINGS * NUM_PADS_PER_RING).unwrap();
        assert_eq!(pad_grid_points().len(), expected);
    }

    #[test]
    fn test_plane_positions() {
        let z: Vec<_> = plane_positions().collect();
        assert_eq!(z.len(), 10);
        assert!((z[9] - 49.5).abs() < 1e-12);
    }
}
