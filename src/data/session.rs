//! Shared per-frame measurement state handed to panels and the plot layer.

use std::path::PathBuf;

use crate::data::calibration::{self, CalibrationError};
use crate::data::segment::{DraggableSegment, SegmentRole};

/// Everything the panels and the plot need to render and mutate a
/// measurement session: the photo reference, both segments, and the
/// user-entered reference length.
pub struct SessionData {
    /// Path of the currently displayed photo, if one is loaded.
    pub image_path: Option<PathBuf>,
    /// Pixel size of the photo (width, height), once decoded.
    pub image_size: Option<[usize; 2]>,
    /// Segment of known real-world length.
    pub reference: DraggableSegment,
    /// Segment being measured.
    pub test: DraggableSegment,
    /// Raw text of the reference-length field. Parsed on every recompute;
    /// invalid text surfaces as a readout error, never a default.
    pub reference_text: String,
    /// Optional real-world unit label (e.g. "in", "cm"), display only.
    pub unit: Option<String>,
    /// Initial placements, kept so the panels can offer a reset.
    pub initial_reference: ([f64; 2], [f64; 2]),
    pub initial_test: ([f64; 2], [f64; 2]),
}

impl Default for SessionData {
    fn default() -> Self {
        let reference = ([100.0, 100.0], [100.0, 400.0]);
        let test = ([5.0, 5.0], [500.0, 500.0]);
        Self {
            image_path: None,
            image_size: None,
            reference: DraggableSegment::new(reference.0, reference.1),
            test: DraggableSegment::new(test.0, test.1),
            reference_text: "26".to_string(),
            unit: None,
            initial_reference: reference,
            initial_test: test,
        }
    }
}

impl SessionData {
    pub fn segment(&self, role: SegmentRole) -> &DraggableSegment {
        match role {
            SegmentRole::Reference => &self.reference,
            SegmentRole::Test => &self.test,
        }
    }

    pub fn segment_mut(&mut self, role: SegmentRole) -> &mut DraggableSegment {
        match role {
            SegmentRole::Reference => &mut self.reference,
            SegmentRole::Test => &mut self.test,
        }
    }

    /// Recompute the scaled test length from the current state.
    pub fn computed_length(&self) -> Result<f64, CalibrationError> {
        calibration::scaled_length(
            &self.reference_text,
            self.reference.length(),
            self.test.length(),
        )
    }

    /// Text for the read-only readout field: the formatted value, or the
    /// error that prevented computing one.
    pub fn readout_text(&self) -> String {
        match self.computed_length() {
            Ok(v) => calibration::format_length(v, self.unit.as_deref()),
            Err(e) => e.to_string(),
        }
    }

    /// Apply one grab range to both segments.
    pub fn set_grab_range(&mut self, grab_range: f32) {
        self.reference.set_grab_range(grab_range);
        self.test.set_grab_range(grab_range);
    }

    /// Put both segments back at their initial placements.
    pub fn reset_segments(&mut self) {
        let (r1, r2) = self.initial_reference;
        let (t1, t2) = self.initial_test;
        self.reference.set_endpoints(r1, r2);
        self.test.set_endpoints(t1, t2);
    }
}
