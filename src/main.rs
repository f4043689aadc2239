//! PhotoMeasure binary: open the photo next to the working directory and
//! measure against a reference of known length.

use std::path::PathBuf;

use photomeasure::{
    run_photomeasure, MeasureController, PhotoMeasureConfig, SegmentPlacement,
};

fn main() -> eframe::Result<()> {
    let measure = MeasureController::new();

    let mut cfg = PhotoMeasureConfig::default();
    cfg.image_path = Some(PathBuf::from("photo.jpg"));
    cfg.unit = Some("in".to_string());
    // The couch seat in the listing photo was stated as 26 inches deep.
    cfg.reference_length = 26.0;
    cfg.reference_placement = SegmentPlacement::new(
        [390.21691176470574, 592.6617647058823],
        [388.0611631016043, 927.7553475935829],
    );
    cfg.test_placement = SegmentPlacement::new([5.0, 5.0], [500.0, 500.0]);
    cfg.controllers.measure = Some(measure.clone());

    run_photomeasure(cfg)?;

    // Handy for hard-coding a better initial placement next run.
    if let Some(snap) = measure.snapshot() {
        let (p1, p2) = snap.reference_endpoints;
        println!(
            "reference endpoints: ({}, {}) -> ({}, {})",
            p1[0], p1[1], p2[0], p2[1]
        );
    }
    Ok(())
}
