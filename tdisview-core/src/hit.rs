//! Hit records and decoded TPC hits.

use crate::error::{Error, IndexKind, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw numeric fields of one hit line, in input order.
///
/// Tokens that failed to parse are stored as `NaN`. The record does not know
/// its layout; see [`HitLayout`] and [`HitRecord::decode`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HitRecord {
    fields: Vec<f64>,
}

impl HitRecord {
    /// Creates a hit record from its numeric fields.
    #[inline]
    #[must_use]
    pub fn new(fields: Vec<f64>) -> Self {
        Self { fields }
    }

    /// Returns the numeric fields.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[f64] {
        &self.fields
    }

    /// Returns the number of fields.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Arrival time (field 0 in every layout), if present.
    #[inline]
    #[must_use]
    pub fn time_arrival(&self) -> Option<f64> {
        self.fields.first().copied()
    }

    /// Decodes the record with the given layout.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedHit`] if the record is shorter than the layout,
    /// or an index error if ring/pad are not integral.
    pub fn decode(&self, layout: HitLayout) -> Result<TpcHit> {
        TpcHit::from_fields(&self.fields, layout)
    }

    /// Decodes the record, picking the layout from its field count.
    ///
    /// # Errors
    /// See [`HitRecord::decode`].
    pub fn decode_detected(&self) -> Result<TpcHit> {
        self.decode(HitLayout::detect(self.len()))
    }
}

impl From<Vec<f64>> for HitRecord {
    fn from(fields: Vec<f64>) -> Self {
        Self::new(fields)
    }
}

/// Field layout of a hit line.
///
/// Compact is the default: fields past the sixth are ignored, so a display
/// line with extra trailing columns still reads ring and pad from columns 2
/// and 3. The extended layout is only used when asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HitLayout {
    /// `t amplitude ring pad plane zToGEM` (event display format).
    #[default]
    Compact,
    /// `t adc true_x true_y true_z ring pad plane zToGEM` (simulation output).
    Extended,
}

impl HitLayout {
    /// Number of fields the layout requires.
    #[must_use]
    pub const fn field_count(self) -> usize {
        match self {
            HitLayout::Compact => 6,
            HitLayout::Extended => 9,
        }
    }

    /// Picks a layout from the number of fields on a hit line.
    ///
    /// Only an exact nine-field line reads as extended; anything else,
    /// including longer lines, reads as compact.
    #[must_use]
    pub const fn detect(field_count: usize) -> Self {
        if field_count == HitLayout::Extended.field_count() {
            HitLayout::Extended
        } else {
            HitLayout::Compact
        }
    }

    const fn ring_index(self) -> usize {
        match self {
            HitLayout::Compact => 2,
            HitLayout::Extended => 5,
        }
    }
}

/// A hit with its fields interpreted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TpcHit {
    /// Arrival time (ns).
    pub time_arrival: f64,
    /// Signal amplitude (ADC).
    pub amplitude: f64,
    /// Ring index.
    pub ring: i32,
    /// Pad index within the ring.
    pub pad: i32,
    /// Readout plane. Kept as read so that labels match the input.
    pub plane: f64,
    /// Drift distance to the GEM plane (m).
    pub z_to_gem_m: f64,
    /// Simulated true position, present for the extended layout.
    pub true_position: Option<[f64; 3]>,
}

impl TpcHit {
    /// Interprets raw fields with the given layout.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedHit`] if `fields` is shorter than the layout,
    /// [`Error::NonIntegralIndex`] if ring or pad is not a whole number and
    /// [`Error::InvalidIndex`] if it does not fit an `i32`.
    pub fn from_fields(fields: &[f64], layout: HitLayout) -> Result<Self> {
        let required = layout.field_count();
        if fields.len() < required {
            return Err(Error::TruncatedHit {
                found: fields.len(),
                required,
            });
        }

        let base = layout.ring_index();
        let true_position = match layout {
            HitLayout::Compact => None,
            HitLayout::Extended => Some([fields[2], fields[3], fields[4]]),
        };

        Ok(Self {
            time_arrival: fields[0],
            amplitude: fields[1],
            ring: index_from_field(IndexKind::Ring, fields[base])?,
            pad: index_from_field(IndexKind::Pad, fields[base + 1])?,
            plane: fields[base + 2],
            z_to_gem_m: fields[base + 3],
            true_position,
        })
    }
}

/// Converts a numeric field into a ring/pad index without silent truncation.
///
/// Range checks against the pad plane happen in the geometry resolver; this
/// only rejects values that are not whole numbers or do not fit an `i32`.
///
/// # Errors
/// Returns [`Error::NonIntegralIndex`] or [`Error::InvalidIndex`].
#[allow(clippy::cast_possible_truncation)]
pub fn index_from_field(kind: IndexKind, value: f64) -> Result<i32> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(Error::NonIntegralIndex { kind, value });
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        let limit = match kind {
            IndexKind::Ring => crate::geometry::NUM_RINGS,
            IndexKind::Pad => crate::geometry::NUM_PADS_PER_RING,
        };
        return Err(Error::InvalidIndex {
            kind,
            // saturating float-to-int cast
            value: value as i64,
            limit,
        });
    }
    Ok(value as i32)
}
