//! Controllers for interacting with the UI from external code.
//!
//! A controller is a lightweight `Arc<Mutex<_>>` handle attached to the
//! config before launch. Non-UI code can read the current measurement state,
//! subscribe to updates, and push simple requests (set the reference length,
//! reset the segments); the UI drains requests and publishes state once per
//! frame.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};

/// Point-in-time view of the measurement state.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasureSnapshot {
    /// Reference segment endpoints, image coordinates.
    pub reference_endpoints: ([f64; 2], [f64; 2]),
    /// Test segment endpoints, image coordinates.
    pub test_endpoints: ([f64; 2], [f64; 2]),
    /// Raw reference-length field text.
    pub reference_text: String,
    /// Scaled test length, or `None` while the state is in error
    /// (unparsable reference text or zero-length reference segment).
    pub computed: Option<f64>,
}

/// Controller to read measurement state and push requests into the UI.
#[derive(Clone)]
pub struct MeasureController {
    pub(crate) inner: Arc<Mutex<MeasureCtrlInner>>, // crate-visible for UI
}

pub(crate) struct MeasureCtrlInner {
    pub(crate) snapshot: Option<MeasureSnapshot>,
    pub(crate) request_reference_length: Option<f64>,
    pub(crate) request_reset_segments: bool,
    pub(crate) listeners: Vec<Sender<MeasureSnapshot>>,
}

impl MeasureController {
    /// Create a fresh controller.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MeasureCtrlInner {
                snapshot: None,
                request_reference_length: None,
                request_reset_segments: false,
                listeners: Vec::new(),
            })),
        }
    }

    /// Last state the UI published, if it has rendered at least one frame.
    pub fn snapshot(&self) -> Option<MeasureSnapshot> {
        self.inner.lock().unwrap().snapshot.clone()
    }

    /// Request a new reference length. Applied by the UI on its next frame,
    /// overwriting the text field as if the user had typed the number.
    pub fn request_set_reference_length(&self, length: f64) {
        let mut inner = self.inner.lock().unwrap();
        inner.request_reference_length = Some(length);
    }

    /// Request that both segments return to their initial placements.
    pub fn request_reset_segments(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.request_reset_segments = true;
    }

    /// Subscribe to state updates. The returned receiver gets a
    /// [`MeasureSnapshot`] whenever the published state changes.
    pub fn subscribe(&self) -> std::sync::mpsc::Receiver<MeasureSnapshot> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.listeners.push(tx);
        rx
    }

    /// UI side: drain pending requests, returning
    /// `(reference_length, reset_segments)`.
    pub(crate) fn take_requests(&self) -> (Option<f64>, bool) {
        let mut inner = self.inner.lock().unwrap();
        let length = inner.request_reference_length.take();
        let reset = std::mem::take(&mut inner.request_reset_segments);
        (length, reset)
    }

    /// UI side: publish the current state and notify listeners when it
    /// changed. Listeners whose receiver was dropped are removed.
    pub(crate) fn publish(&self, snapshot: MeasureSnapshot) {
        let mut inner = self.inner.lock().unwrap();
        if inner.snapshot.as_ref() == Some(&snapshot) {
            return;
        }
        inner.snapshot = Some(snapshot.clone());
        inner
            .listeners
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

impl Default for MeasureController {
    fn default() -> Self {
        Self::new()
    }
}
