//! Event system for the photo ruler.
//!
//! The "line-changed" notification of the interaction model generalizes to a
//! subscriber list invoked synchronously on state change. Callers subscribe
//! via [`EventController`] with an [`EventFilter`]; each event carries a set
//! of [`EventKind`] flags (bitflags-style) so one occurrence can match
//! several categories (e.g. a drag that moves a segment is also the event
//! that updates the measurement). The filter is an OR mask: an event is
//! delivered when `event.kinds` intersects it.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::data::segment::{Handle, SegmentRole};

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    // ── Drag interaction ────────────────────────────────────────────────
    /// A handle was grabbed by a pointer press within the grab range.
    pub const HANDLE_GRABBED: Self = Self(1 << 0);
    /// The grabbed handle was released.
    pub const HANDLE_RELEASED: Self = Self(1 << 1);
    /// A segment's endpoints changed (any drag move).
    pub const SEGMENT_MOVED: Self = Self(1 << 2);
    /// Both segments were put back at their initial placements.
    pub const SEGMENTS_RESET: Self = Self(1 << 3);

    // ── Measurement ─────────────────────────────────────────────────────
    /// The reference-length field was edited.
    pub const REFERENCE_EDITED: Self = Self(1 << 4);
    /// A new scaled test length was computed.
    pub const MEASUREMENT_UPDATED: Self = Self(1 << 5);
    /// The measurement could not be computed (bad reference text or
    /// zero-length reference segment).
    pub const MEASUREMENT_FAILED: Self = Self(1 << 6);

    // ── Photo / session ─────────────────────────────────────────────────
    /// A photo was decoded and displayed.
    pub const PHOTO_LOADED: Self = Self(1 << 7);
    /// The session was saved to a file.
    pub const SESSION_SAVED: Self = Self(1 << 8);
    /// A session file was loaded and applied.
    pub const SESSION_LOADED: Self = Self(1 << 9);

    /// Wildcard: matches every event kind.
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether `self` has at least one bit in common with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::HANDLE_GRABBED, "HANDLE_GRABBED"),
            (EventKind::HANDLE_RELEASED, "HANDLE_RELEASED"),
            (EventKind::SEGMENT_MOVED, "SEGMENT_MOVED"),
            (EventKind::SEGMENTS_RESET, "SEGMENTS_RESET"),
            (EventKind::REFERENCE_EDITED, "REFERENCE_EDITED"),
            (EventKind::MEASUREMENT_UPDATED, "MEASUREMENT_UPDATED"),
            (EventKind::MEASUREMENT_FAILED, "MEASUREMENT_FAILED"),
            (EventKind::PHOTO_LOADED, "PHOTO_LOADED"),
            (EventKind::SESSION_SAVED, "SESSION_SAVED"),
            (EventKind::SESSION_LOADED, "SESSION_LOADED"),
        ];

        let mut names = Vec::new();
        let mut known_bits: u32 = 0;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }
        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata – per-event-type payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata attached to drag / segment events.
#[derive(Debug, Clone)]
pub struct SegmentMeta {
    /// Which of the two segments.
    pub role: SegmentRole,
    /// Handle involved (for grab/release events).
    pub handle: Option<Handle>,
    /// Endpoints after the change.
    pub p1: [f64; 2],
    pub p2: [f64; 2],
    /// Pixel length after the change.
    pub length_px: f64,
}

/// Metadata attached to measurement events.
#[derive(Debug, Clone)]
pub struct MeasurementMeta {
    /// Raw text of the reference-length field at recompute time.
    pub reference_text: String,
    /// Pixel lengths of the two segments.
    pub reference_px: f64,
    pub test_px: f64,
    /// Computed scaled length (set on MEASUREMENT_UPDATED).
    pub value: Option<f64>,
    /// Failure description (set on MEASUREMENT_FAILED).
    pub error: Option<String>,
}

/// Metadata attached to photo / session-file events.
#[derive(Debug, Clone)]
pub struct FileMeta {
    pub path: String,
    /// Photo pixel size, for PHOTO_LOADED.
    pub image_size: Option<[usize; 2]>,
}

// ─────────────────────────────────────────────────────────────────────────────
// MeasureEvent
// ─────────────────────────────────────────────────────────────────────────────

/// An event emitted by the photo ruler UI.
///
/// `kinds` is a bitflag set of [`EventKind`] categories; the optional
/// metadata fields carry details for the kinds that are set.
#[derive(Debug, Clone)]
pub struct MeasureEvent {
    pub kinds: EventKind,
    /// Seconds since app start, stamped by the controller on emit.
    pub timestamp: f64,
    pub segment: Option<SegmentMeta>,
    pub measurement: Option<MeasurementMeta>,
    pub file: Option<FileMeta>,
}

impl MeasureEvent {
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0,
            segment: None,
            measurement: None,
            file: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// Selects which event categories a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    /// Accept all events.
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    /// Accept only the specified event kinds.
    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &MeasureEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<MeasureEvent>,
}

/// Collects and distributes UI events to subscribers.
///
/// Attach it to [`PhotoMeasureConfig`](crate::config::PhotoMeasureConfig)
/// before launching the UI, then call [`subscribe`](Self::subscribe) to
/// receive matching events on an `mpsc` channel.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

impl EventController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    /// Subscribe to events matching the given filter.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<MeasureEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    /// Subscribe to all events, unfiltered.
    pub fn subscribe_all(&self) -> Receiver<MeasureEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Emit an event to all matching subscribers.
    ///
    /// Called by the UI on every state change; public so embedding code can
    /// inject synthetic events. Subscribers whose matching channel has been
    /// dropped are removed.
    pub fn emit(&self, mut event: MeasureEvent) {
        let mut inner = self.inner.lock().unwrap();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_union_and_intersection() {
        let moved = EventKind::SEGMENT_MOVED;
        let grabbed = EventKind::HANDLE_GRABBED;
        let combined = moved | grabbed;
        assert!(combined.contains(moved));
        assert!(combined.contains(grabbed));
        assert!(combined.intersects(moved));
        assert!(!EventKind::PHOTO_LOADED.intersects(moved));
    }

    #[test]
    fn event_kind_display_names() {
        let combined = EventKind::SEGMENT_MOVED | EventKind::MEASUREMENT_UPDATED;
        assert_eq!(combined.to_string(), "SEGMENT_MOVED|MEASUREMENT_UPDATED");
        assert_eq!(EventKind::ALL.to_string(), "ALL");
    }

    #[test]
    fn event_filter_matches() {
        let filter = EventFilter::only(EventKind::SEGMENT_MOVED | EventKind::SEGMENTS_RESET);
        assert!(filter.matches(&MeasureEvent::new(EventKind::SEGMENT_MOVED)));
        assert!(!filter.matches(&MeasureEvent::new(EventKind::PHOTO_LOADED)));
        // A multi-kind event matches when any of its bits pass the mask.
        assert!(filter.matches(&MeasureEvent::new(
            EventKind::SEGMENT_MOVED | EventKind::MEASUREMENT_UPDATED
        )));
    }

    #[test]
    fn event_controller_subscribe_and_emit() {
        let ctrl = EventController::new();
        let rx_all = ctrl.subscribe_all();
        let rx_moves = ctrl.subscribe(EventFilter::only(EventKind::SEGMENT_MOVED));
        let rx_photo = ctrl.subscribe(EventFilter::only(EventKind::PHOTO_LOADED));

        ctrl.emit(MeasureEvent::new(EventKind::SEGMENT_MOVED));

        assert!(rx_all.try_recv().is_ok());
        assert!(rx_moves.try_recv().is_ok());
        assert!(rx_photo.try_recv().is_err());
    }

    #[test]
    fn dropped_subscribers_are_pruned_on_emit() {
        let ctrl = EventController::new();
        drop(ctrl.subscribe_all());
        let rx = ctrl.subscribe_all();
        ctrl.emit(MeasureEvent::new(EventKind::SEGMENT_MOVED));
        ctrl.emit(MeasureEvent::new(EventKind::HANDLE_RELEASED));
        assert_eq!(rx.try_iter().count(), 2);
    }
}
