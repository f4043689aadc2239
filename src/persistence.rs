//! Session persistence: save and load a measurement session as JSON.
//!
//! Serializable mirror types for the runtime state (segments hold drag state
//! that has no business in a file), plus a small path-based API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::segment::DraggableSegment;
use crate::data::session::SessionData;

// ---------- Serializable mirror types ----------

/// Serializable version of a segment: endpoints only, no drag state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentSerde {
    pub p1: [f64; 2],
    pub p2: [f64; 2],
}

impl From<&DraggableSegment> for SegmentSerde {
    fn from(s: &DraggableSegment) -> Self {
        let (p1, p2) = s.endpoints();
        Self { p1, p2 }
    }
}

impl SegmentSerde {
    /// Apply the stored endpoints to a segment. The midpoint is recomputed
    /// and any active grab is cleared.
    pub fn apply_to(&self, s: &mut DraggableSegment) {
        s.set_endpoints(self.p1, self.p2);
    }
}

/// Full measurement session (for save/load).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSerde {
    /// File format version, bumped on incompatible change.
    pub version: u32,
    /// RFC 3339 timestamp of the save.
    pub saved_at: String,
    /// Photo the segments refer to, if one was loaded.
    pub image_path: Option<String>,
    /// Raw reference-length field text, saved verbatim (including text that
    /// does not parse).
    pub reference_text: String,
    pub reference: SegmentSerde,
    pub test: SegmentSerde,
}

pub const SESSION_VERSION: u32 = 1;

impl SessionSerde {
    /// Capture the current session state.
    pub fn from_session(data: &SessionData) -> Self {
        Self {
            version: SESSION_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            image_path: data
                .image_path
                .as_ref()
                .map(|p| p.display().to_string()),
            reference_text: data.reference_text.clone(),
            reference: SegmentSerde::from(&data.reference),
            test: SegmentSerde::from(&data.test),
        }
    }

    /// Apply stored state to a session. The photo itself is not reloaded
    /// here; the caller decides whether to follow `image_path`.
    pub fn apply_to(&self, data: &mut SessionData) {
        data.reference_text = self.reference_text.clone();
        self.reference.apply_to(&mut data.reference);
        self.test.apply_to(&mut data.test);
    }
}

// ---------- Public API ----------

/// Serialize a session as pretty JSON.
pub fn session_to_json(session: &SessionSerde) -> Result<String, String> {
    serde_json::to_string_pretty(session).map_err(|e| e.to_string())
}

/// Deserialize a session from JSON.
pub fn session_from_json(json: &str) -> Result<SessionSerde, String> {
    let session: SessionSerde = serde_json::from_str(json).map_err(|e| e.to_string())?;
    if session.version > SESSION_VERSION {
        return Err(format!(
            "session file version {} is newer than supported version {}",
            session.version, SESSION_VERSION
        ));
    }
    Ok(session)
}

/// Save a session to a JSON file at the given path.
pub fn save_session_to_path(session: &SessionSerde, path: &Path) -> Result<(), String> {
    let txt = session_to_json(session)?;
    std::fs::write(path, txt).map_err(|e| e.to_string())
}

/// Load a session from a JSON file at the given path.
pub fn load_session_from_path(path: &Path) -> Result<SessionSerde, String> {
    let txt = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    session_from_json(&txt)
}
