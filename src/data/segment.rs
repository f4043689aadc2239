//! Draggable measurement segment: two endpoints plus a derived midpoint
//! handle, with screen-space hit-testing and drag state.
//!
//! The segment is a pure data type. It knows nothing about rendering; the
//! plot layer supplies a projection closure (plot coords → screen pixels)
//! for hit-testing, and converts pointer positions back to plot coords for
//! dragging. This keeps the whole interaction model unit-testable without
//! an egui context.

use egui::Pos2;

/// One of the three draggable markers on a segment.
///
/// `Mid` is derived — it always sits at the arithmetic mean of the two
/// endpoints and dragging it translates the segment rigidly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Start,
    Mid,
    End,
}

impl Handle {
    /// All handles in hit-test order. Ties in the nearest-handle search are
    /// broken by the first minimum, i.e. in this order.
    pub const ALL: [Handle; 3] = [Handle::Start, Handle::Mid, Handle::End];
}

/// Which of the two segments a widget instance plays in the measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentRole {
    /// The segment whose real-world length the user knows.
    Reference,
    /// The segment being measured.
    Test,
}

impl SegmentRole {
    pub fn label(&self) -> &'static str {
        match self {
            SegmentRole::Reference => "Reference",
            SegmentRole::Test => "Test",
        }
    }
}

/// A two-point line segment with a grabbed-handle drag state.
///
/// Invariant: `midpoint() == mean(endpoints)` after every mutation.
#[derive(Debug, Clone)]
pub struct DraggableSegment {
    p1: [f64; 2],
    p2: [f64; 2],
    mid: [f64; 2],
    grabbed: Option<Handle>,
    grab_range: f32,
}

impl DraggableSegment {
    /// Default grab range for the handles, in screen pixels.
    pub const DEFAULT_GRAB_RANGE: f32 = 10.0;

    /// Create a segment from two endpoints in plot (image) coordinates.
    pub fn new(p1: [f64; 2], p2: [f64; 2]) -> Self {
        Self {
            p1,
            p2,
            mid: mean(p1, p2),
            grabbed: None,
            grab_range: Self::DEFAULT_GRAB_RANGE,
        }
    }

    pub fn with_grab_range(mut self, grab_range: f32) -> Self {
        self.grab_range = grab_range;
        self
    }

    /// The two endpoints (start, end).
    pub fn endpoints(&self) -> ([f64; 2], [f64; 2]) {
        (self.p1, self.p2)
    }

    /// Replace both endpoints (used by reset and session restore). Clears any
    /// active grab and recomputes the midpoint.
    pub fn set_endpoints(&mut self, p1: [f64; 2], p2: [f64; 2]) {
        self.p1 = p1;
        self.p2 = p2;
        self.mid = mean(p1, p2);
        self.grabbed = None;
    }

    /// The derived midpoint handle position.
    pub fn midpoint(&self) -> [f64; 2] {
        self.mid
    }

    /// All three handle positions in [`Handle::ALL`] order.
    pub fn handle_points(&self) -> [[f64; 2]; 3] {
        [self.p1, self.mid, self.p2]
    }

    /// Euclidean distance between the two endpoints, in plot units.
    pub fn length(&self) -> f64 {
        let dx = self.p2[0] - self.p1[0];
        let dy = self.p2[1] - self.p1[1];
        (dx * dx + dy * dy).sqrt()
    }

    /// Currently grabbed handle, or `None` between a release and the next
    /// successful grab.
    pub fn grabbed(&self) -> Option<Handle> {
        self.grabbed
    }

    /// Grab range for the handles in screen pixels.
    pub fn grab_range(&self) -> f32 {
        self.grab_range
    }

    pub fn set_grab_range(&mut self, grab_range: f32) {
        self.grab_range = grab_range;
    }

    /// Pointer-down: find the handle nearest to `pointer` in screen space.
    ///
    /// `project` maps plot coordinates to screen pixels (the plot transform).
    /// If the nearest handle is within the grab range it becomes grabbed,
    /// otherwise any previous grab is cleared. Returns the grabbed handle.
    pub fn press_at(&mut self, pointer: Pos2, project: impl Fn([f64; 2]) -> Pos2) -> Option<Handle> {
        let mut best: Option<(Handle, f32)> = None;
        for (handle, point) in Handle::ALL.iter().zip(self.handle_points()) {
            let d = project(point).distance(pointer);
            // Strict comparison keeps the first minimum on ties.
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((*handle, d));
            }
        }
        self.grabbed = match best {
            Some((handle, d)) if d < self.grab_range => Some(handle),
            _ => None,
        };
        self.grabbed
    }

    /// Pointer-move: drag the grabbed handle to `pos` (plot coordinates).
    ///
    /// Midpoint: translate both endpoints rigidly by the delta from the
    /// midpoint's last position. Endpoint: move only that endpoint and
    /// recompute the midpoint. Returns the new endpoints when the segment
    /// changed, so the caller can notify observers; `None` when nothing is
    /// grabbed.
    pub fn drag_to(&mut self, pos: [f64; 2]) -> Option<([f64; 2], [f64; 2])> {
        match self.grabbed? {
            Handle::Mid => {
                let dx = pos[0] - self.mid[0];
                let dy = pos[1] - self.mid[1];
                self.p1 = [self.p1[0] + dx, self.p1[1] + dy];
                self.p2 = [self.p2[0] + dx, self.p2[1] + dy];
            }
            Handle::Start => self.p1 = pos,
            Handle::End => self.p2 = pos,
        }
        self.mid = mean(self.p1, self.p2);
        Some((self.p1, self.p2))
    }

    /// Pointer-up: unconditionally clear the grabbed-handle state.
    pub fn release(&mut self) {
        self.grabbed = None;
    }
}

fn mean(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}
