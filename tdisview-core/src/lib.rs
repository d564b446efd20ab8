//! tdisview-core: Data model and geometry for TDIS mTPC event display.
//!
//! This crate provides the event model, the pad-plane geometry resolver,
//! and the time-sliced projection builder.
//!

pub mod error;
pub mod event;
pub mod geometry;
pub mod hit;
pub mod palette;
pub mod projection;
pub mod summary;

pub use error::{Error, IndexKind, Result};
pub use event::{EventMapping, EventNumber, EventRecord, TrackFit};
pub use geometry::{pad_center, PadCoordinate};
pub use hit::{HitLayout, HitRecord, TpcHit};
pub use palette::{ColorAssignment, PlaneColor};
pub use projection::{
    build_projection, PlotPoint, Projection, ProjectionBuilder, ProjectionConfig, ProjectionView,
};
pub use summary::EventSummary;
