use photomeasure::persistence::{session_from_json, session_to_json, SessionSerde, SESSION_VERSION};
use photomeasure::SessionData;

#[test]
fn session_round_trip_restores_segments_and_reference_text() {
    let mut data = SessionData::default();
    data.reference_text = "12.5".to_string();
    data.reference.set_endpoints([1.0, 2.0], [3.0, 4.0]);
    data.test.set_endpoints([10.0, 20.0], [30.0, 40.0]);

    let json = session_to_json(&SessionSerde::from_session(&data)).unwrap();
    let restored = session_from_json(&json).unwrap();

    let mut target = SessionData::default();
    restored.apply_to(&mut target);
    assert_eq!(target.reference_text, "12.5");
    assert_eq!(target.reference.endpoints(), ([1.0, 2.0], [3.0, 4.0]));
    assert_eq!(target.test.endpoints(), ([10.0, 20.0], [30.0, 40.0]));
}

#[test]
fn unparseable_reference_text_is_saved_verbatim() {
    let mut data = SessionData::default();
    data.reference_text = "about 26".to_string();
    let snap = SessionSerde::from_session(&data);
    assert_eq!(snap.reference_text, "about 26");
}

#[test]
fn current_version_is_written() {
    let data = SessionData::default();
    let snap = SessionSerde::from_session(&data);
    assert_eq!(snap.version, SESSION_VERSION);
}

#[test]
fn newer_version_is_rejected() {
    let data = SessionData::default();
    let mut snap = SessionSerde::from_session(&data);
    snap.version = SESSION_VERSION + 1;
    let json = session_to_json(&snap).unwrap();
    let err = session_from_json(&json).unwrap_err();
    assert!(err.contains("newer than supported"));
}

#[test]
fn malformed_json_reports_an_error() {
    assert!(session_from_json("{ not json").is_err());
}

#[test]
fn applying_a_session_clears_active_grabs() {
    let mut data = SessionData::default();
    let snap = SessionSerde::from_session(&data);

    let mut target = SessionData::default();
    target
        .reference
        .press_at(egui::Pos2::new(100.0, 100.0), |p| {
            egui::Pos2::new(p[0] as f32, p[1] as f32)
        });
    assert!(target.reference.grabbed().is_some());
    snap.apply_to(&mut target);
    assert!(target.reference.grabbed().is_none());
}
