//! Configuration for the photo ruler UI.

use std::path::PathBuf;

use crate::controllers::MeasureController;
use crate::data::segment::DraggableSegment;
use crate::events::EventController;

// ─────────────────────────────────────────────────────────────────────────────
// Feature flags
// ─────────────────────────────────────────────────────────────────────────────

/// Toggle individual UI features on or off.
///
/// All features default to `true` (enabled). Disable features to create a
/// minimal, focused UI when embedding the measure view.
#[derive(Clone, Debug)]
pub struct FeatureFlags {
    /// Show the top menu bar (open photo, save/load session, panel toggles).
    pub menu_bar: bool,
    /// Enable the calibration panel (reference length + readout).
    pub calibration_panel: bool,
    /// Enable the segments panel (endpoint coordinates, grab range, reset).
    pub segments_panel: bool,
    /// Draw the per-segment label next to its midpoint handle.
    pub segment_labels: bool,
    /// Draw the computed length as an overlay next to the test segment.
    pub readout_overlay: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            menu_bar: true,
            calibration_panel: true,
            segments_panel: true,
            segment_labels: true,
            readout_overlay: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Initial segment placement
// ─────────────────────────────────────────────────────────────────────────────

/// Where a segment starts out, in image coordinates.
#[derive(Clone, Copy, Debug)]
pub struct SegmentPlacement {
    pub p1: [f64; 2],
    pub p2: [f64; 2],
}

impl SegmentPlacement {
    pub const fn new(p1: [f64; 2], p2: [f64; 2]) -> Self {
        Self { p1, p2 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Controllers sub-config
// ─────────────────────────────────────────────────────────────────────────────

/// Optional programmatic controllers attached to the UI.
#[derive(Clone, Default)]
pub struct Controllers {
    pub measure: Option<MeasureController>,
    pub event: Option<EventController>,
}

// ─────────────────────────────────────────────────────────────────────────────
// PhotoMeasureConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration for the photo ruler.
///
/// | Field           | Purpose |
/// |-----------------|---------|
/// | `image_path`    | Photo to display at startup |
/// | `features`      | Toggle individual UI features on/off |
/// | `controllers`   | Programmatic interaction handles |
#[derive(Clone)]
pub struct PhotoMeasureConfig {
    // ── Photo / measurement ──────────────────────────────────────────────
    /// Photo to load at startup. `None` starts with an empty canvas; the
    /// user can open one from the menu.
    pub image_path: Option<PathBuf>,
    /// Pre-filled reference length (the known real-world length).
    pub reference_length: f64,
    /// Optional unit label for readouts (e.g. "in", "cm"). Display only.
    pub unit: Option<String>,
    /// Grab range for the segment handles, in screen pixels.
    pub grab_range: f32,
    /// Initial placement of the reference segment.
    pub reference_placement: SegmentPlacement,
    /// Initial placement of the test segment.
    pub test_placement: SegmentPlacement,

    // ── Window / chrome ──────────────────────────────────────────────────
    /// Native window title.
    pub title: String,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,

    // ── Feature flags ────────────────────────────────────────────────────
    pub features: FeatureFlags,

    // ── Programmatic controllers ─────────────────────────────────────────
    pub controllers: Controllers,
}

impl Default for PhotoMeasureConfig {
    fn default() -> Self {
        Self {
            image_path: None,
            reference_length: 26.0,
            unit: None,
            grab_range: DraggableSegment::DEFAULT_GRAB_RANGE,
            reference_placement: SegmentPlacement::new([100.0, 100.0], [100.0, 400.0]),
            test_placement: SegmentPlacement::new([5.0, 5.0], [500.0, 500.0]),

            title: "PhotoMeasure".to_string(),
            native_options: None,

            features: FeatureFlags::default(),
            controllers: Controllers::default(),
        }
    }
}
