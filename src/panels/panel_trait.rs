use egui::Ui;

use crate::data::session::SessionData;

/// Visibility state shared by all panels.
#[derive(Debug, Clone)]
pub struct PanelState {
    pub title: String,
    pub visible: bool,
    /// Render in a floating window instead of the side panel.
    pub detached: bool,
}

impl PanelState {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            visible: true,
            detached: false,
        }
    }
}

/// A side-panel section of the photo ruler UI.
pub trait Panel {
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn title(&self) -> &str {
        &self.state().title
    }

    /// Render the panel body. `data` is the shared session state.
    fn render_panel(&mut self, ui: &mut Ui, data: &mut SessionData);
}
