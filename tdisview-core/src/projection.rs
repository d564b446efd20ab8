//! Time-sliced 2D projections of an event.
//!
//! A projection keeps the hits that arrived at or before a time cutoff and
//! places them in two views: the top view (X vs Y, looking along the beam) and
//! the side view (Z vs Y). Both point lists are index-aligned: entry `i` of
//! each list comes from the same hit.

use std::fmt;

use crate::error::Result;
use crate::event::EventRecord;
use crate::geometry::{pad_center, PLANE_SPACING_CM};
use crate::hit::{HitLayout, HitRecord, TpcHit};
use crate::palette::{ColorAssignment, PlaneColor};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const METERS_TO_CM: f64 = 100.0;

/// Legend label of a readout plane.
///
/// `-0.0` is labeled like `0.0`, so both share a legend entry and color.
#[must_use]
pub fn plane_label(plane: f64) -> String {
    // -0.0 + 0.0 is +0.0
    let plane = plane + 0.0;
    format!("Plane {plane}")
}

/// Longitudinal position of a hit (cm).
#[inline]
#[must_use]
pub fn hit_z_cm(plane: f64, z_to_gem_m: f64) -> f64 {
    plane * PLANE_SPACING_CM + z_to_gem_m * METERS_TO_CM
}

/// One plotted hit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotPoint {
    /// Horizontal coordinate (cm).
    pub x: f64,
    /// Vertical coordinate (cm).
    pub y: f64,
    /// Plane label, e.g. `Plane 3`.
    pub label: String,
    /// Color of the label in this projection.
    pub color: PlaneColor,
}

/// Which 2D view a point list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProjectionView {
    /// X vs Y.
    Top,
    /// Z vs Y.
    Side,
}

impl ProjectionView {
    /// Plot title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            ProjectionView::Top => "X vs Y",
            ProjectionView::Side => "Z vs Y",
        }
    }

    /// Horizontal axis title.
    #[must_use]
    pub const fn x_axis_title(self) -> &'static str {
        match self {
            ProjectionView::Top => "X (cm)",
            ProjectionView::Side => "Z (cm)",
        }
    }

    /// Vertical axis title.
    #[must_use]
    pub const fn y_axis_title(self) -> &'static str {
        "Y (cm)"
    }
}

impl fmt::Display for ProjectionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionView::Top => write!(f, "top"),
            ProjectionView::Side => write!(f, "side"),
        }
    }
}

/// The two views of an event at a given time cutoff.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Projection {
    /// X-Y points.
    pub top: Vec<PlotPoint>,
    /// Z-Y points, index-aligned with `top`.
    pub side: Vec<PlotPoint>,
    /// `(label, color)` in first-appearance order.
    pub legend: Vec<(String, PlaneColor)>,
}

impl Projection {
    /// Number of projected hits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.top.len()
    }

    /// Returns true if no hit passed the time cutoff.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    /// Points of one view.
    #[must_use]
    pub fn points(&self, view: ProjectionView) -> &[PlotPoint] {
        match view {
            ProjectionView::Top => &self.top,
            ProjectionView::Side => &self.side,
        }
    }

    /// Points of one view grouped by label, in legend order.
    ///
    /// Each group holds `[x, y]` pairs, ready for a scatter series.
    #[must_use]
    pub fn series(&self, view: ProjectionView) -> Vec<(&str, PlaneColor, Vec<[f64; 2]>)> {
        self.legend
            .iter()
            .map(|(label, color)| {
                let coords = self
                    .points(view)
                    .iter()
                    .filter(|p| &p.label == label)
                    .map(|p| [p.x, p.y])
                    .collect();
                (label.as_str(), *color, coords)
            })
            .collect()
    }
}

/// Configuration for projection building.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProjectionConfig {
    /// Hit layout to decode with. `None` detects it per hit from the field
    /// count. Defaults to the compact layout.
    pub layout: Option<HitLayout>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            layout: Some(HitLayout::Compact),
        }
    }
}

impl ProjectionConfig {
    /// Creates a configuration that decodes every hit as compact.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a hit layout.
    #[must_use]
    pub fn with_layout(mut self, layout: HitLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Picks the layout of each hit from its field count.
    #[must_use]
    pub fn with_detected_layout(mut self) -> Self {
        self.layout = None;
        self
    }
}

/// Builds projections with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct ProjectionBuilder {
    config: ProjectionConfig,
}

impl ProjectionBuilder {
    /// Creates a builder with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with a custom configuration.
    #[must_use]
    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    fn decode(&self, hit: &HitRecord) -> Result<TpcHit> {
        match self.config.layout {
            Some(layout) => hit.decode(layout),
            None => hit.decode_detected(),
        }
    }

    /// Projects the hits of `event` that arrived at or before `time_cutoff`.
    ///
    /// # Errors
    /// Returns the first decoding or geometry error; no partial projection is
    /// produced.
    pub fn build(&self, event: &EventRecord, time_cutoff: f64) -> Result<Projection> {
        let mut colors = ColorAssignment::new();
        let mut top = Vec::new();
        let mut side = Vec::new();

        for record in &event.hits {
            // NaN compares false, so untimed hits never pass
            if !record.time_arrival().is_some_and(|t| t <= time_cutoff) {
                continue;
            }
            let hit = self.decode(record)?;
            let center = pad_center(hit.ring, hit.pad)?;
            let z = hit_z_cm(hit.plane, hit.z_to_gem_m);
            let label = plane_label(hit.plane);
            let color = colors.color_for(&label);

            top.push(PlotPoint {
                x: center.x,
                y: center.y,
                label: label.clone(),
                color,
            });
            side.push(PlotPoint {
                x: z,
                y: center.y,
                label,
                color,
            });
        }

        Ok(Projection {
            top,
            side,
            legend: colors.into_legend(),
        })
    }
}

/// Projects an event, reading every hit with the compact layout.
///
/// # Errors
/// See [`ProjectionBuilder::build`].
pub fn build_projection(event: &EventRecord, time_cutoff: f64) -> Result<Projection> {
    ProjectionBuilder::new().build(event, time_cutoff)
}
