pub mod calibration_ui;
pub mod panel_trait;
pub mod segments_ui;

pub use calibration_ui::CalibrationPanel;
pub use panel_trait::{Panel, PanelState};
pub use segments_ui::SegmentsPanel;
