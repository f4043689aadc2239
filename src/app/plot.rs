//! Central photo plot: the image plane, segment overlays, and the
//! press/move/release drag interaction.
//!
//! Pan, scroll-zoom and box-zoom come from egui_plot. The plot's own primary
//! drag (panning) is disabled while the pointer is within grab range of a
//! handle, so the drag goes to the handle instead.

use egui::Color32;
use egui_plot::{Line, MarkerShape, Plot, PlotImage, PlotPoint, Points, Text};

use super::PhotoMeasureApp;
use crate::data::segment::SegmentRole;
use crate::events::{EventKind, MeasureEvent, SegmentMeta};

/// Marker/line colors per segment: a dark reference line and a red test
/// line that stays readable over most photos.
fn segment_color(role: SegmentRole) -> Color32 {
    match role {
        SegmentRole::Reference => Color32::from_rgb(20, 20, 20),
        SegmentRole::Test => Color32::from_rgb(214, 39, 40),
    }
}

impl PhotoMeasureApp {
    /// Render the central plot and apply drag interactions.
    pub(super) fn render_central_plot(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            // Handle drags ourselves when the pointer is on a handle or
            // a drag is already in progress.
            let dragging = self.data.reference.grabbed().is_some()
                || self.data.test.grabbed().is_some();
            let allow_pan = !(dragging || self.pointer_near_handle);

            let plot = Plot::new("photo_plot")
                .data_aspect(1.0)
                .show_grid(false)
                .show_axes(false)
                .allow_drag(allow_pan);

            let texture = self.texture.clone();
            let data = &self.data;
            let features = self.features.clone();
            let readout = self.data.readout_text();

            let plot_resp = plot.show(ui, |plot_ui| {
                if let Some(texture) = &texture {
                    let size = texture.size_vec2();
                    plot_ui.image(PlotImage::new(
                        "photo",
                        texture.id(),
                        PlotPoint::new(size.x as f64 / 2.0, size.y as f64 / 2.0),
                        size,
                    ));
                }

                let bounds = plot_ui.plot_bounds();
                let ox = 0.01 * (bounds.range_x().end() - bounds.range_x().start());
                let oy = 0.01 * (bounds.range_y().end() - bounds.range_y().start());

                for role in [SegmentRole::Reference, SegmentRole::Test] {
                    let seg = data.segment(role);
                    let (p1, p2) = seg.endpoints();
                    let color = segment_color(role);

                    plot_ui.line(
                        Line::new(role.label(), vec![p1, p2])
                            .color(color)
                            .width(2.0),
                    );
                    plot_ui.points(
                        Points::new(role.label(), seg.handle_points().to_vec())
                            .radius(5.0)
                            .shape(MarkerShape::Circle)
                            .color(color),
                    );

                    if features.segment_labels {
                        let mid = seg.midpoint();
                        plot_ui.text(
                            Text::new(
                                role.label(),
                                PlotPoint::new(mid[0] + ox, mid[1] + oy),
                                egui::RichText::new(role.label()).color(color),
                            )
                            .anchor(egui::Align2::LEFT_BOTTOM),
                        );
                    }
                }

                // Computed length next to the test segment.
                if features.readout_overlay {
                    let mid = data.test.midpoint();
                    plot_ui.text(
                        Text::new(
                            "readout",
                            PlotPoint::new(mid[0] + ox, mid[1] - oy),
                            egui::RichText::new(readout.clone())
                                .strong()
                                .color(segment_color(SegmentRole::Test)),
                        )
                        .anchor(egui::Align2::LEFT_TOP),
                    );
                }
            });

            self.handle_plot_interaction(&plot_resp);
        });
    }

    /// Press/move/release handling against both segments.
    ///
    /// Both segments hit-test every press independently, like two widgets
    /// subscribed to the same pointer events; a press can therefore grab one
    /// handle of each when they overlap.
    fn handle_plot_interaction(&mut self, plot_resp: &egui_plot::PlotResponse<()>) {
        let response = &plot_resp.response;
        let transform = plot_resp.transform;
        let project =
            move |p: [f64; 2]| transform.position_from_point(&PlotPoint::new(p[0], p[1]));

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(screen) = response.interact_pointer_pos() {
                for role in [SegmentRole::Reference, SegmentRole::Test] {
                    let grabbed = self.data.segment_mut(role).press_at(screen, project);
                    if let Some(handle) = grabbed {
                        self.emit_segment_event(EventKind::HANDLE_GRABBED, role, Some(handle));
                    }
                }
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(screen) = response.interact_pointer_pos() {
                let pos = transform.value_from_position(screen);
                for role in [SegmentRole::Reference, SegmentRole::Test] {
                    let moved = self.data.segment_mut(role).drag_to([pos.x, pos.y]);
                    if moved.is_some() {
                        self.emit_segment_event(EventKind::SEGMENT_MOVED, role, None);
                    }
                }
            }
        }

        if response.drag_stopped() {
            for role in [SegmentRole::Reference, SegmentRole::Test] {
                if let Some(handle) = self.data.segment(role).grabbed() {
                    self.emit_segment_event(EventKind::HANDLE_RELEASED, role, Some(handle));
                }
                self.data.segment_mut(role).release();
            }
        }

        // Remembered for next frame's allow_drag decision.
        self.pointer_near_handle = response.hover_pos().is_some_and(|screen| {
            [SegmentRole::Reference, SegmentRole::Test]
                .iter()
                .any(|role| {
                    let seg = self.data.segment(*role);
                    seg.handle_points()
                        .iter()
                        .any(|p| project(*p).distance(screen) < seg.grab_range())
                })
        });
    }

    fn emit_segment_event(
        &self,
        kind: EventKind,
        role: SegmentRole,
        handle: Option<crate::data::segment::Handle>,
    ) {
        let seg = self.data.segment(role);
        let (p1, p2) = seg.endpoints();
        let mut ev = MeasureEvent::new(kind);
        ev.segment = Some(SegmentMeta {
            role,
            handle,
            p1,
            p2,
            length_px: seg.length(),
        });
        self.emit(ev);
    }
}
