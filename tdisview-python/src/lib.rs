//! tdisview-python: PyO3 Python bindings for tdisview.
#![allow(
    clippy::doc_markdown,
    clippy::needless_pass_by_value,
    clippy::uninlined_format_args,
    clippy::elidable_lifetime_names
)]
//!
//! Exposes the event parser, the pad geometry, and the hit projection to
//! Python, returning numpy arrays padded with NaN where rows differ in length.

use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2, PyArray3, PyArrayMethods, PyReadonlyArray2};
use pyo3::prelude::*;
use pyo3::types::PyDict;
use tdisview_core::geometry;
use tdisview_core::{
    EventMapping, EventRecord, HitLayout, HitRecord, ProjectionBuilder, ProjectionConfig,
};
use tdisview_io::{EventFileReader, EventParser, ParserConfig};

fn io_error(context: &str, err: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyIOError::new_err(format!("{context}: {err}"))
}

fn value_error(context: &str, err: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(format!("{context}: {err}"))
}

/// Copy rows of unequal length into a row-major buffer of `width` columns.
fn pad_rows<'a>(rows: impl Iterator<Item = &'a [f64]>, width: usize, out: &mut Vec<f64>) {
    for row in rows {
        out.extend_from_slice(row);
        out.extend(std::iter::repeat(f64::NAN).take(width - row.len()));
    }
}

fn hit_width(record: &EventRecord) -> usize {
    record.hits.iter().map(HitRecord::len).max().unwrap_or(0)
}

fn hits_array(record: &EventRecord) -> PyResult<Array2<f64>> {
    let width = hit_width(record);
    let mut flat = Vec::with_capacity(record.hits.len() * width);
    pad_rows(record.hits.iter().map(HitRecord::fields), width, &mut flat);
    Array2::from_shape_vec((record.hits.len(), width), flat)
        .map_err(|e| value_error("parse_events: hits", e))
}

fn events_dict<'py>(py: Python<'py>, events: &EventMapping) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (number, record) in events {
        let event = PyDict::new(py);
        event.set_item(
            "track_params",
            PyArray1::from_slice(py, &record.track_params),
        )?;
        event.set_item("hits", hits_array(record)?.into_pyarray(py))?;
        dict.set_item(number, event)?;
    }
    Ok(dict)
}

/// Parse event text into `{event_number: {"track_params": ..., "hits": ...}}`.
///
/// `hits` is a 2-D array with one row per hit, padded with NaN to the
/// longest hit line of the event.
#[pyfunction]
fn parse_events<'py>(py: Python<'py>, text: &str) -> PyResult<Bound<'py, PyDict>> {
    let events = EventParser::new().parse(text);
    events_dict(py, &events)
}

/// Read an event file into a 2-D track array and a 3-D hit array.
///
/// Tracks have shape `(n_events, max_params)` and hits have shape
/// `(n_events, max_hits, max_fields)`; missing entries are NaN. Events are
/// ordered by event number.
#[pyfunction]
#[pyo3(signature = (path, n_events=None, skip_events=0))]
fn read_events_numpy<'py>(
    py: Python<'py>,
    path: &str,
    n_events: Option<usize>,
    skip_events: usize,
) -> PyResult<(Bound<'py, PyArray2<f64>>, Bound<'py, PyArray3<f64>>)> {
    let mut config = ParserConfig::new().with_skip_events(skip_events);
    if let Some(n) = n_events {
        config = config.with_max_events(n);
    }
    let reader = EventFileReader::open(path)
        .map_err(|e| io_error(&format!("read_events_numpy: open {path}"), e))?
        .with_config(config);
    let parsed = reader
        .read_events()
        .map_err(|e| value_error(&format!("read_events_numpy: parse {path}"), e))?;
    let events = parsed.events;

    let n = events.len();
    let param_width = events
        .iter()
        .map(|(_, r)| r.track_params.len())
        .max()
        .unwrap_or(0);
    let max_hits = events.iter().map(|(_, r)| r.hits.len()).max().unwrap_or(0);
    let field_width = events.iter().map(|(_, r)| hit_width(r)).max().unwrap_or(0);

    let mut tracks = Vec::with_capacity(n * param_width);
    pad_rows(
        events.iter().map(|(_, r)| r.track_params.as_slice()),
        param_width,
        &mut tracks,
    );

    let mut hits = Vec::with_capacity(n * max_hits * field_width);
    for (_, record) in &events {
        pad_rows(record.hits.iter().map(HitRecord::fields), field_width, &mut hits);
        let missing = (max_hits - record.hits.len()) * field_width;
        hits.extend(std::iter::repeat(f64::NAN).take(missing));
    }

    let tracks = PyArray1::from_vec(py, tracks).reshape([n, param_width])?;
    let hits = PyArray1::from_vec(py, hits).reshape([n, max_hits, field_width])?;
    Ok((tracks, hits))
}

/// Center `(x, y)` in cm of a pad.
#[pyfunction]
fn get_pad_center(ring: i32, pad: i32) -> PyResult<(f64, f64)> {
    let center = geometry::pad_center(ring, pad).map_err(|e| value_error("get_pad_center", e))?;
    Ok((center.x, center.y))
}

/// Inner and outer radius in cm of a ring.
#[pyfunction]
fn ring_radii(ring: i32) -> PyResult<(f64, f64)> {
    geometry::ring_radii(ring).map_err(|e| value_error("ring_radii", e))
}

/// Start and end angle in radians of a pad.
#[pyfunction]
fn pad_angular_bounds(ring: i32, pad: i32) -> PyResult<(f64, f64)> {
    geometry::pad_angular_bounds(ring, pad).map_err(|e| value_error("pad_angular_bounds", e))
}

/// Arc length in cm of a pad at the ring center.
#[pyfunction]
fn pad_approx_width(ring: i32) -> PyResult<f64> {
    geometry::pad_approx_width(ring).map_err(|e| value_error("pad_approx_width", e))
}

fn projection_config(layout: &str) -> PyResult<ProjectionConfig> {
    match layout {
        "compact" => Ok(ProjectionConfig::new().with_layout(HitLayout::Compact)),
        "extended" => Ok(ProjectionConfig::new().with_layout(HitLayout::Extended)),
        "auto" => Ok(ProjectionConfig::new().with_detected_layout()),
        other => Err(value_error(
            "project_hits",
            format!("unknown layout '{other}', expected 'compact', 'extended' or 'auto'"),
        )),
    }
}

/// Project the hits of one event, keeping those with `time <= time_cutoff`.
///
/// `hits` has one row per hit. Rows whose time is NaN (including padding
/// rows from [`read_events_numpy`]) are skipped. With the default
/// `layout="compact"` only the first six columns are read, so NaN padding
/// to a wider array does not move ring and pad. `"extended"` reads the
/// nine-column simulation layout and `"auto"` picks it per row.
///
/// Returns a dict with `x`, `y`, `z` arrays and `label`, `color` lists,
/// index-aligned.
#[pyfunction]
#[pyo3(signature = (hits, time_cutoff, layout="compact"))]
fn project_hits<'py>(
    py: Python<'py>,
    hits: PyReadonlyArray2<'py, f64>,
    time_cutoff: f64,
    layout: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let config = projection_config(layout)?;
    let view = hits.as_array();
    let records = view
        .rows()
        .into_iter()
        .map(|row| HitRecord::new(row.to_vec()))
        .collect();
    let record = EventRecord::new(Vec::new(), records);

    let projection = ProjectionBuilder::with_config(config)
        .build(&record, time_cutoff)
        .map_err(|e| value_error("project_hits", e))?;

    let x: Vec<f64> = projection.top.iter().map(|p| p.x).collect();
    let y: Vec<f64> = projection.top.iter().map(|p| p.y).collect();
    let z: Vec<f64> = projection.side.iter().map(|p| p.x).collect();
    let labels: Vec<&str> = projection.top.iter().map(|p| p.label.as_str()).collect();
    let colors: Vec<&str> = projection.top.iter().map(|p| p.color.name()).collect();

    let dict = PyDict::new(py);
    dict.set_item("x", PyArray1::from_vec(py, x))?;
    dict.set_item("y", PyArray1::from_vec(py, y))?;
    dict.set_item("z", PyArray1::from_vec(py, z))?;
    dict.set_item("label", labels)?;
    dict.set_item("color", colors)?;
    Ok(dict)
}

/// TDIS mTPC event parsing and pad geometry.
#[pymodule]
fn tdisview(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("NUM_RINGS", geometry::NUM_RINGS)?;
    m.add("NUM_PADS_PER_RING", geometry::NUM_PADS_PER_RING)?;
    m.add("NUM_PLANES", geometry::NUM_PLANES)?;
    m.add_function(wrap_pyfunction!(parse_events, m)?)?;
    m.add_function(wrap_pyfunction!(read_events_numpy, m)?)?;
    m.add_function(wrap_pyfunction!(get_pad_center, m)?)?;
    m.add_function(wrap_pyfunction!(ring_radii, m)?)?;
    m.add_function(wrap_pyfunction!(pad_angular_bounds, m)?)?;
    m.add_function(wrap_pyfunction!(pad_approx_width, m)?)?;
    m.add_function(wrap_pyfunction!(project_hits, m)?)?;
    Ok(())
}
