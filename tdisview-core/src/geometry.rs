//! Pad-plane geometry of the mTPC readout.
//!
//! The readout plane is an annulus between 5 cm and 15 cm, divided into
//! 21 concentric rings of 122 pads each. Ring 0 is the innermost ring.
//! Pads are centered in their angular cell. Odd rings are rotated by half
//! a pad angle, giving a brick-laid layout:
//!
//! ```text
//! ring 1   |  0  |  1  |  2  |  3  |
//! ring 0 |  0  |  1  |  2  |  3  |
//!        0    Δθ   2Δθ   3Δθ         (φ)
//! ```
//!
//! Ten chambers are stacked along the beam axis, giving a 55 cm long detector.
//! Plane `n` sits at `n * PLANE_SPACING_CM`.

use std::f64::consts::PI;

use crate::error::{Error, IndexKind, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of concentric pad rings.
pub const NUM_RINGS: i32 = 21;
/// Number of pads in every ring.
pub const NUM_PADS_PER_RING: i32 = 122;
/// Inner radius of ring 0 (cm).
pub const FIRST_RING_INNER_RADIUS_CM: f64 = 5.0;
/// Outer radius of the last ring (cm).
pub const MAX_RADIUS_CM: f64 = 15.0;
/// Radial span covered by the rings (cm).
pub const TOTAL_RADIUS_CM: f64 = MAX_RADIUS_CM - FIRST_RING_INNER_RADIUS_CM;
/// Radial width of a single ring (cm).
pub const RING_WIDTH_CM: f64 = TOTAL_RADIUS_CM / NUM_RINGS as f64;
/// Angular width of a single pad (radians).
pub const DELTA_THETA: f64 = 2.0 * PI / NUM_PADS_PER_RING as f64;

/// Number of readout planes along the beam axis.
pub const NUM_PLANES: i32 = 10;
/// Total detector length along the beam axis (cm).
pub const DETECTOR_LENGTH_CM: f64 = 55.0;
/// Longitudinal offset between consecutive readout planes (cm).
pub const PLANE_SPACING_CM: f64 = DETECTOR_LENGTH_CM / NUM_PLANES as f64;

/// Center of a pad in the readout plane, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PadCoordinate {
    /// X coordinate (cm).
    pub x: f64,
    /// Y coordinate (cm).
    pub y: f64,
}

impl PadCoordinate {
    /// Creates a new pad coordinate.
    #[inline]
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the beam axis (cm).
    #[inline]
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Azimuthal angle in `(-π, π]`.
    #[inline]
    #[must_use]
    pub fn phi(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

fn check_ring(ring: i32) -> Result<()> {
    if (0..NUM_RINGS).contains(&ring) {
        Ok(())
    } else {
        Err(Error::InvalidIndex {
            kind: IndexKind::Ring,
            value: i64::from(ring),
            limit: NUM_RINGS,
        })
    }
}

fn check_pad(pad: i32) -> Result<()> {
    if (0..NUM_PADS_PER_RING).contains(&pad) {
        Ok(())
    } else {
        Err(Error::InvalidIndex {
            kind: IndexKind::Pad,
            value: i64::from(pad),
            limit: NUM_PADS_PER_RING,
        })
    }
}

/// Angular offset of a ring: zero for even rings, half a pad for odd rings.
#[inline]
fn theta_offset(ring: i32) -> f64 {
    if ring % 2 == 0 {
        0.0
    } else {
        DELTA_THETA / 2.0
    }
}

/// Computes the center of a pad from its ring and pad indices.
///
/// # Errors
/// Returns [`Error::InvalidIndex`] if `ring` is outside `0..NUM_RINGS` or
/// `pad` is outside `0..NUM_PADS_PER_RING`. The ring is checked first.
pub fn pad_center(ring: i32, pad: i32) -> Result<PadCoordinate> {
    check_ring(ring)?;
    check_pad(pad)?;

    let r_center = RING_WIDTH_CM * (f64::from(ring) + 0.5) + FIRST_RING_INNER_RADIUS_CM;
    let theta_center = DELTA_THETA / 2.0 + f64::from(pad) * DELTA_THETA + theta_offset(ring);

    Ok(PadCoordinate::new(
        r_center * theta_center.cos(),
        r_center * theta_center.sin(),
    ))
}

/// Radius of the middle of a ring (cm).
///
/// # Errors
/// Returns [`Error::InvalidIndex`] for a ring outside the pad plane.
pub fn ring_center_radius(ring: i32) -> Result<f64> {
    check_ring(ring)?;
    Ok(RING_WIDTH_CM * (f64::from(ring) + 0.5) + FIRST_RING_INNER_RADIUS_CM)
}

/// Inner and outer radius of a ring (cm).
///
/// # Errors
/// Returns [`Error::InvalidIndex`] for a ring outside the pad plane.
pub fn ring_radii(ring: i32) -> Result<(f64, f64)> {
    check_ring(ring)?;
    let inner = FIRST_RING_INNER_RADIUS_CM + f64::from(ring) * RING_WIDTH_CM;
    let outer = FIRST_RING_INNER_RADIUS_CM + f64::from(ring + 1) * RING_WIDTH_CM;
    Ok((inner, outer))
}

/// Angular start and end of a pad (radians).
///
/// # Errors
/// Returns [`Error::InvalidIndex`] for indices outside the pad plane.
pub fn pad_angular_bounds(ring: i32, pad: i32) -> Result<(f64, f64)> {
    check_ring(ring)?;
    check_pad(pad)?;
    let start = f64::from(pad) * DELTA_THETA + theta_offset(ring);
    Ok((start, start + DELTA_THETA))
}

/// Approximate pad width along the ring (arc length at the ring center, cm).
///
/// # Errors
/// Returns [`Error::InvalidIndex`] for a ring outside the pad plane.
pub fn pad_approx_width(ring: i32) -> Result<f64> {
    let r = ring_center_radius(ring)?;
    Ok(r * 2.0 * PI / f64::from(NUM_PADS_PER_RING))
}

/// Iterates over every pad of the readout plane as `(ring, pad, center)`.
pub fn pad_centers() -> impl Iterator<Item = (i32, i32, PadCoordinate)> {
    (0..NUM_RINGS).flat_map(|ring| {
        (0..NUM_PADS_PER_RING).filter_map(move |pad| {
            pad_center(ring, pad)
                .ok()
                .map(|center| (ring, pad, center))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_derived_constants() {
        assert_abs_diff_eq!(TOTAL_RADIUS_CM, 10.0);
        assert_abs_diff_eq!(RING_WIDTH_CM, 10.0 / 21.0);
        assert_abs_diff_eq!(DELTA_THETA, 2.0 * PI / 122.0);
        assert_abs_diff_eq!(PLANE_SPACING_CM, 5.5);
    }

    #[test]
    fn test_pad_center_deterministic() {
        let a = pad_center(7, 42).unwrap();
        let b = pad_center(7, 42).unwrap();
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
    }

    #[test]
    fn test_pad_center_bounds() {
        assert!(pad_center(0, 0).is_ok());
        assert!(pad_center(20, 121).is_ok());

        assert_eq!(
            pad_center(21, 0),
            Err(Error::InvalidIndex {
                kind: IndexKind::Ring,
                value: 21,
                limit: NUM_RINGS,
            })
        );
        assert_eq!(
            pad_center(0, 122),
            Err(Error::InvalidIndex {
                kind: IndexKind::Pad,
                value: 122,
                limit: NUM_PADS_PER_RING,
            })
        );
        assert!(matches!(
            pad_center(-1, 0),
            Err(Error::InvalidIndex {
                kind: IndexKind::Ring,
                value: -1,
                ..
            })
        ));
    }

    #[test]
    fn test_ring_checked_before_pad() {
        let err = pad_center(30, 500).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidIndex {
                kind: IndexKind::Ring,
                ..
            }
        ));
    }

    #[test]
    fn test_pad_center_first_pad() {
        let c = pad_center(0, 0).unwrap();
        let r = RING_WIDTH_CM * 0.5 + FIRST_RING_INNER_RADIUS_CM;
        let theta = DELTA_THETA / 2.0;
        assert_eq!(c.x.to_bits(), (r * theta.cos()).to_bits());
        assert_eq!(c.y.to_bits(), (r * theta.sin()).to_bits());
    }

    #[test]
    fn test_odd_rings_are_staggered() {
        for ring in (0..NUM_RINGS - 1).step_by(2) {
            for pad in [0, 17, 60, 121] {
                let even = pad_center(ring, pad).unwrap();
                let odd = pad_center(ring + 1, pad).unwrap();
                // phi wraps at ±π (pad 60 straddles it)
                let dphi = (odd.phi() - even.phi()).rem_euclid(2.0 * PI);
                assert_abs_diff_eq!(dphi, DELTA_THETA / 2.0, epsilon = 1e-12);
                assert_abs_diff_eq!(odd.radius() - even.radius(), RING_WIDTH_CM, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_ring_radii() {
        let (inner, outer) = ring_radii(0).unwrap();
        assert_abs_diff_eq!(inner, FIRST_RING_INNER_RADIUS_CM);
        assert_abs_diff_eq!(outer - inner, RING_WIDTH_CM);

        let (_, outer) = ring_radii(NUM_RINGS - 1).unwrap();
        assert_abs_diff_eq!(outer, MAX_RADIUS_CM, epsilon = 1e-12);

        assert!(ring_radii(NUM_RINGS).is_err());
    }

    #[test]
    fn test_pad_angular_bounds_contain_center() {
        let (start, end) = pad_angular_bounds(3, 10).unwrap();
        assert_abs_diff_eq!(end - start, DELTA_THETA, epsilon = 1e-15);

        let center = pad_center(3, 10).unwrap();
        assert!(center.phi() > start && center.phi() < end);
    }

    #[test]
    fn test_pad_approx_width_grows_outward() {
        let inner = pad_approx_width(0).unwrap();
        let outer = pad_approx_width(NUM_RINGS - 1).unwrap();
        assert!(outer > inner);
        assert_abs_diff_eq!(
            inner,
            ring_center_radius(0).unwrap() * DELTA_THETA,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_pad_centers_covers_plane() {
        let all: Vec<_> = pad_centers().collect();
        assert_eq!(all.len(), (NUM_RINGS * NUM_PADS_PER_RING) as usize);
        assert_eq!(all[0].0, 0);
        assert_eq!(all[0].1, 0);
        for (_, _, c) in &all {
            assert!(c.radius() > FIRST_RING_INNER_RADIUS_CM);
            assert!(c.radius() < MAX_RADIUS_CM);
        }
    }
}
