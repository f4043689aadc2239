use egui::Color32;

use super::panel_trait::{Panel, PanelState};
use crate::data::session::SessionData;

/// Reference-length input and the computed-length readout.
pub struct CalibrationPanel {
    state: PanelState,
}

impl Default for CalibrationPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Calibration"),
        }
    }
}

impl Panel for CalibrationPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut egui::Ui, data: &mut SessionData) {
        ui.label("Set the reference segment over something of known length, then enter that length.");
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            ui.label("Reference length");
            ui.text_edit_singleline(&mut data.reference_text);
            if let Some(unit) = &data.unit {
                ui.label(unit);
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label("Test length");
            // Read-only readout: an immutable str buffer makes the field
            // selectable/copyable but not editable.
            let readout = data.readout_text();
            ui.add(egui::TextEdit::singleline(&mut readout.as_str()));
        });
        if let Err(e) = data.computed_length() {
            ui.colored_label(Color32::LIGHT_RED, e.to_string());
        }

        ui.add_space(6.0);
        ui.separator();
        ui.label(format!(
            "Reference: {:.1} px    Test: {:.1} px",
            data.reference.length(),
            data.test.length()
        ));
    }
}
