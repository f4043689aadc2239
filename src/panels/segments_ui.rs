use super::panel_trait::{Panel, PanelState};
use crate::data::segment::SegmentRole;
use crate::data::session::SessionData;

/// Endpoint coordinates, grab range, and reset for both segments.
pub struct SegmentsPanel {
    state: PanelState,
    /// Set for one frame when the user clicks Reset; the app reads and
    /// clears it so it can emit the reset event.
    pub reset_requested: bool,
}

impl Default for SegmentsPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Segments"),
            reset_requested: false,
        }
    }
}

impl Panel for SegmentsPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, data: &mut SessionData) {
        for role in [SegmentRole::Reference, SegmentRole::Test] {
            let seg = data.segment(role);
            let (p1, p2) = seg.endpoints();
            ui.strong(role.label());
            ui.monospace(format!(
                "P1 ({:8.2}, {:8.2})   P2 ({:8.2}, {:8.2})",
                p1[0], p1[1], p2[0], p2[1]
            ));
            ui.monospace(format!("length {:.2} px", seg.length()));
            ui.add_space(4.0);
        }

        ui.separator();
        let mut grab_range = data.reference.grab_range();
        if ui
            .add(
                egui::Slider::new(&mut grab_range, 2.0..=50.0)
                    .text("Grab range (px)"),
            )
            .changed()
        {
            data.set_grab_range(grab_range);
        }

        ui.add_space(4.0);
        if ui
            .button("Reset segments")
            .on_hover_text("Put both segments back at their initial placements")
            .clicked()
        {
            data.reset_segments();
            self.reset_requested = true;
        }
    }
}
