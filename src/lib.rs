//! PhotoMeasure crate root: re-exports and module wiring.
//!
//! An interactive on-screen ruler built on egui/eframe: display a
//! photograph, drag a reference segment of known real-world length over it,
//! and measure anything else in the image by proportion.
//!
//! Module layout:
//! - `data`: segments, calibration math, photo loading, session state
//! - `panels`: side-panel UI sections (calibration, segments)
//! - `app`: the eframe application and `run_photomeasure()` entry point
//! - `events`: subscribable UI events (segment moved, measurement updated, …)
//! - `controllers`: programmatic handles for external code
//! - `config`: top-level configuration
//! - `persistence`: JSON session save/load

pub mod app;
pub mod config;
pub mod controllers;
pub mod data;
pub mod events;
pub mod panels;
pub mod persistence;

// Public re-exports for a compact external API
pub use app::{run_photomeasure, PhotoMeasureApp};
pub use config::{Controllers, FeatureFlags, PhotoMeasureConfig, SegmentPlacement};
pub use controllers::{MeasureController, MeasureSnapshot};
pub use data::calibration::{format_length, parse_reference, scaled_length, CalibrationError};
pub use data::segment::{DraggableSegment, Handle, SegmentRole};
pub use data::session::SessionData;
pub use events::{EventController, EventFilter, EventKind, MeasureEvent};
