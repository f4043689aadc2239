use photomeasure::SessionData;

#[test]
fn readout_scales_test_length_by_the_reference() {
    let mut data = SessionData::default();
    data.reference_text = "26".to_string();
    data.reference.set_endpoints([0.0, 0.0], [26.0, 0.0]);
    data.test.set_endpoints([0.0, 0.0], [13.0, 0.0]);
    assert_eq!(data.computed_length().unwrap(), 13.0);
    assert_eq!(data.readout_text(), "13.00");
}

#[test]
fn readout_appends_the_unit_when_configured() {
    let mut data = SessionData::default();
    data.unit = Some("in".to_string());
    data.reference.set_endpoints([0.0, 0.0], [10.0, 0.0]);
    data.test.set_endpoints([0.0, 0.0], [5.0, 0.0]);
    data.reference_text = "2".to_string();
    assert_eq!(data.readout_text(), "1.00 in");
}

#[test]
fn readout_surfaces_a_parse_error_instead_of_a_value() {
    let mut data = SessionData::default();
    data.reference_text = "twenty-six".to_string();
    assert!(data.computed_length().is_err());
    assert!(data.readout_text().contains("not a number"));
}

#[test]
fn readout_surfaces_zero_reference_instead_of_infinity() {
    let mut data = SessionData::default();
    data.reference.set_endpoints([50.0, 50.0], [50.0, 50.0]);
    assert!(data.computed_length().is_err());
    assert!(data.readout_text().contains("zero length"));
}

#[test]
fn reset_restores_the_initial_placements() {
    let mut data = SessionData::default();
    let before_ref = data.reference.endpoints();
    let before_test = data.test.endpoints();
    data.reference.set_endpoints([1.0, 1.0], [2.0, 2.0]);
    data.test.set_endpoints([3.0, 3.0], [4.0, 4.0]);
    data.reset_segments();
    assert_eq!(data.reference.endpoints(), before_ref);
    assert_eq!(data.test.endpoints(), before_test);
}

#[test]
fn grab_range_applies_to_both_segments() {
    let mut data = SessionData::default();
    data.set_grab_range(25.0);
    assert_eq!(data.reference.grab_range(), 25.0);
    assert_eq!(data.test.grab_range(), 25.0);
}
