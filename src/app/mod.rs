//! Main application module for PhotoMeasure.
//!
//! Split into focused sub-modules:
//!
//! | Sub-module | Responsibility |
//! | ---------- | -------------- |
//! | [`plot`]   | Central photo plot: image, segment overlays, drag handling |
//! | [`run`]    | Top-level [`run_photomeasure()`] entry point and icon loading |
//!
//! The app itself owns the session state, drains controller requests at the
//! start of each frame, and publishes state / emits events at the end.

mod plot;
mod run;

pub use run::run_photomeasure;

use std::path::PathBuf;

use eframe::egui;

use crate::config::{FeatureFlags, PhotoMeasureConfig};
use crate::controllers::{MeasureController, MeasureSnapshot};
use crate::data::photo;
use crate::data::session::SessionData;
use crate::events::{EventController, EventKind, FileMeta, MeasureEvent, MeasurementMeta};
use crate::panels::{CalibrationPanel, Panel, SegmentsPanel};
use crate::persistence;

/// The photo ruler application: one window with the photo, two draggable
/// segments, and the calibration/segments panels.
pub struct PhotoMeasureApp {
    data: SessionData,
    features: FeatureFlags,

    calibration_panel: CalibrationPanel,
    segments_panel: SegmentsPanel,

    measure_ctrl: Option<MeasureController>,
    event_ctrl: Option<EventController>,

    /// GPU texture of the current photo.
    texture: Option<egui::TextureHandle>,
    /// Photo waiting to be decoded and uploaded (startup path, menu open,
    /// or session load).
    pending_photo: Option<PathBuf>,

    /// Whether the pointer was within grab range of any handle last frame;
    /// plot panning is disabled while true so the drag goes to the handle.
    pointer_near_handle: bool,

    // Previous-frame values used to detect changes worth notifying about.
    last_reference_text: String,
    last_readout: Option<String>,
}

impl PhotoMeasureApp {
    pub fn from_config(cfg: &PhotoMeasureConfig) -> Self {
        let mut data = SessionData {
            reference_text: format_reference(cfg.reference_length),
            unit: cfg.unit.clone(),
            initial_reference: (cfg.reference_placement.p1, cfg.reference_placement.p2),
            initial_test: (cfg.test_placement.p1, cfg.test_placement.p2),
            ..SessionData::default()
        };
        data.reset_segments();
        data.set_grab_range(cfg.grab_range);

        let last_reference_text = data.reference_text.clone();
        Self {
            data,
            features: cfg.features.clone(),
            calibration_panel: CalibrationPanel::default(),
            segments_panel: SegmentsPanel::default(),
            measure_ctrl: cfg.controllers.measure.clone(),
            event_ctrl: cfg.controllers.event.clone(),
            texture: None,
            pending_photo: cfg.image_path.clone(),
            pointer_near_handle: false,
            last_reference_text,
            last_readout: None,
        }
    }

    /// Shared session state (for embedding and tests).
    pub fn data(&self) -> &SessionData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut SessionData {
        &mut self.data
    }

    pub(crate) fn emit(&self, event: MeasureEvent) {
        if let Some(ctrl) = &self.event_ctrl {
            ctrl.emit(event);
        }
    }

    // ── Controller requests ──────────────────────────────────────────────

    fn process_controller_requests(&mut self) {
        let Some(ctrl) = &self.measure_ctrl else {
            return;
        };
        let (reference_length, reset) = ctrl.take_requests();
        if let Some(length) = reference_length {
            self.data.reference_text = format_reference(length);
        }
        if reset {
            self.data.reset_segments();
            self.emit(MeasureEvent::new(EventKind::SEGMENTS_RESET));
        }
    }

    // ── Photo loading ────────────────────────────────────────────────────

    fn ensure_photo_texture(&mut self, ctx: &egui::Context) {
        let Some(path) = self.pending_photo.take() else {
            return;
        };
        match photo::load_photo(&path) {
            Ok(color_image) => {
                let size = color_image.size;
                self.texture = Some(ctx.load_texture(
                    "photo",
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
                self.data.image_path = Some(path.clone());
                self.data.image_size = Some(size);

                let mut ev = MeasureEvent::new(EventKind::PHOTO_LOADED);
                ev.file = Some(FileMeta {
                    path: path.display().to_string(),
                    image_size: Some(size),
                });
                self.emit(ev);
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    // ── Menu bar ─────────────────────────────────────────────────────────

    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        use egui_phosphor::regular::{FLOPPY_DISK, FOLDER_OPEN, IMAGE};

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button(format!("{IMAGE} Open photo…")).clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "tif", "tiff"])
                            .pick_file()
                        {
                            self.pending_photo = Some(path);
                        }
                        ui.close();
                    }
                    ui.separator();
                    if ui.button(format!("{FLOPPY_DISK} Save session…")).clicked() {
                        self.save_session_dialog();
                        ui.close();
                    }
                    if ui.button(format!("{FOLDER_OPEN} Load session…")).clicked() {
                        self.load_session_dialog();
                        ui.close();
                    }
                });

                ui.menu_button("Panels", |ui| {
                    for panel in [
                        &mut self.calibration_panel as &mut dyn Panel,
                        &mut self.segments_panel as &mut dyn Panel,
                    ] {
                        if ui
                            .selectable_label(panel.state().visible, panel.title())
                            .clicked()
                        {
                            panel.state_mut().visible = !panel.state().visible;
                        }
                    }
                });
            });
        });
    }

    fn save_session_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("measurement.json")
            .save_file()
        {
            let session = persistence::SessionSerde::from_session(&self.data);
            match persistence::save_session_to_path(&session, &path) {
                Ok(()) => {
                    let mut ev = MeasureEvent::new(EventKind::SESSION_SAVED);
                    ev.file = Some(FileMeta {
                        path: path.display().to_string(),
                        image_size: None,
                    });
                    self.emit(ev);
                }
                Err(e) => eprintln!("Failed to save session: {e}"),
            }
        }
    }

    fn load_session_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            match persistence::load_session_from_path(&path) {
                Ok(session) => {
                    session.apply_to(&mut self.data);
                    // Follow the stored photo path when it differs from the
                    // currently displayed one.
                    if let Some(image) = &session.image_path {
                        let image = PathBuf::from(image);
                        if self.data.image_path.as_ref() != Some(&image) {
                            self.pending_photo = Some(image);
                        }
                    }
                    let mut ev = MeasureEvent::new(EventKind::SESSION_LOADED);
                    ev.file = Some(FileMeta {
                        path: path.display().to_string(),
                        image_size: None,
                    });
                    self.emit(ev);
                }
                Err(e) => eprintln!("Failed to load session: {e}"),
            }
        }
    }

    // ── Side panels ──────────────────────────────────────────────────────

    fn render_side_panels(&mut self, ctx: &egui::Context) {
        let data = &mut self.data;
        let show_calibration = self.features.calibration_panel;
        let show_segments = self.features.segments_panel;

        let any_docked = (show_calibration
            && self.calibration_panel.state().visible
            && !self.calibration_panel.state().detached)
            || (show_segments
                && self.segments_panel.state().visible
                && !self.segments_panel.state().detached);

        if any_docked {
            let calibration_panel = &mut self.calibration_panel;
            let segments_panel = &mut self.segments_panel;
            egui::SidePanel::right("measure_panels")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| {
                    if show_calibration {
                        render_docked(ui, calibration_panel, &mut *data);
                    }
                    if show_segments {
                        render_docked(ui, segments_panel, &mut *data);
                    }
                });
        }

        if show_calibration {
            render_detached(ctx, &mut self.calibration_panel, &mut *data);
        }
        if show_segments {
            render_detached(ctx, &mut self.segments_panel, data);
        }

        if std::mem::take(&mut self.segments_panel.reset_requested) {
            self.emit(MeasureEvent::new(EventKind::SEGMENTS_RESET));
        }
    }

    // ── End-of-frame outputs ─────────────────────────────────────────────

    /// Detect changes since the previous frame, emit the corresponding
    /// events, and publish the controller snapshot.
    fn sync_outputs(&mut self) {
        if self.data.reference_text != self.last_reference_text {
            self.last_reference_text = self.data.reference_text.clone();
            self.emit(MeasureEvent::new(EventKind::REFERENCE_EDITED));
        }

        let computed = self.data.computed_length();
        let readout = self.data.readout_text();
        if self.last_readout.as_deref() != Some(&readout) {
            self.last_readout = Some(readout);
            let kind = if computed.is_ok() {
                EventKind::MEASUREMENT_UPDATED
            } else {
                EventKind::MEASUREMENT_FAILED
            };
            let mut ev = MeasureEvent::new(kind);
            ev.measurement = Some(MeasurementMeta {
                reference_text: self.data.reference_text.clone(),
                reference_px: self.data.reference.length(),
                test_px: self.data.test.length(),
                value: computed.as_ref().ok().copied(),
                error: computed.as_ref().err().map(|e| e.to_string()),
            });
            self.emit(ev);
        }

        if let Some(ctrl) = &self.measure_ctrl {
            ctrl.publish(MeasureSnapshot {
                reference_endpoints: self.data.reference.endpoints(),
                test_endpoints: self.data.test.endpoints(),
                reference_text: self.data.reference_text.clone(),
                computed: computed.ok(),
            });
        }
    }
}

impl eframe::App for PhotoMeasureApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_controller_requests();
        self.ensure_photo_texture(ctx);

        if self.features.menu_bar {
            self.render_menu_bar(ctx);
        }
        self.render_side_panels(ctx);
        self.render_central_plot(ctx);

        self.sync_outputs();
    }
}

/// Render a controller-provided reference length the way a user would have
/// typed it: no trailing zeros beyond what `f64` display produces.
fn format_reference(length: f64) -> String {
    format!("{length}")
}

/// Render one panel section inside the side panel, with a button to pop it
/// out into a floating window.
fn render_docked(ui: &mut egui::Ui, panel: &mut dyn Panel, data: &mut SessionData) {
    if !panel.state().visible || panel.state().detached {
        return;
    }
    ui.horizontal(|ui| {
        ui.heading(panel.title().to_string());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .small_button(egui_phosphor::regular::ARROW_SQUARE_OUT)
                .on_hover_text("Detach into a floating window")
                .clicked()
            {
                panel.state_mut().detached = true;
            }
        });
    });
    panel.render_panel(ui, data);
    ui.add_space(8.0);
    ui.separator();
}

/// Render one detached panel as a floating window. Closing the window docks
/// the panel back into the side panel.
fn render_detached(ctx: &egui::Context, panel: &mut dyn Panel, data: &mut SessionData) {
    if !panel.state().visible || !panel.state().detached {
        return;
    }
    let mut open = true;
    egui::Window::new(panel.title().to_string())
        .open(&mut open)
        .resizable(true)
        .show(ctx, |ui| {
            panel.render_panel(ui, data);
        });
    if !open {
        panel.state_mut().detached = false;
    }
}
