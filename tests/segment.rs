use egui::Pos2;
use photomeasure::data::segment::{DraggableSegment, Handle};

/// Identity projection: plot coordinates are already screen pixels.
fn ident(p: [f64; 2]) -> Pos2 {
    Pos2::new(p[0] as f32, p[1] as f32)
}

fn mid_of(seg: &DraggableSegment) -> [f64; 2] {
    let (p1, p2) = seg.endpoints();
    [(p1[0] + p2[0]) / 2.0, (p1[1] + p2[1]) / 2.0]
}

#[test]
fn midpoint_is_mean_of_endpoints_after_construction() {
    let seg = DraggableSegment::new([0.0, 0.0], [10.0, 4.0]);
    assert_eq!(seg.midpoint(), [5.0, 2.0]);
}

#[test]
fn length_is_euclidean_distance() {
    let seg = DraggableSegment::new([0.0, 0.0], [3.0, 4.0]);
    assert_eq!(seg.length(), 5.0);
}

#[test]
fn press_within_range_grabs_nearest_handle() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [100.0, 0.0]);
    let grabbed = seg.press_at(Pos2::new(98.0, 1.0), ident);
    assert_eq!(grabbed, Some(Handle::End));
    assert_eq!(seg.grabbed(), Some(Handle::End));
}

#[test]
fn press_beyond_range_clears_grab() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [100.0, 0.0]);
    seg.press_at(Pos2::new(1.0, 1.0), ident);
    assert_eq!(seg.grabbed(), Some(Handle::Start));
    let grabbed = seg.press_at(Pos2::new(30.0, 30.0), ident);
    assert_eq!(grabbed, None);
    assert_eq!(seg.grabbed(), None);
}

#[test]
fn press_exactly_at_grab_range_does_not_grab() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [100.0, 0.0]);
    let range = seg.grab_range() as f64;
    let grabbed = seg.press_at(Pos2::new(range as f32, 0.0), ident);
    assert_eq!(grabbed, None);
}

#[test]
fn tie_between_handles_grabs_the_first_in_order() {
    // Degenerate segment: all three handles coincide.
    let mut seg = DraggableSegment::new([50.0, 50.0], [50.0, 50.0]);
    let grabbed = seg.press_at(Pos2::new(52.0, 50.0), ident);
    assert_eq!(grabbed, Some(Handle::Start));
}

#[test]
fn endpoint_drag_moves_only_that_endpoint() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [100.0, 0.0]);
    seg.press_at(Pos2::new(0.0, 0.0), ident);
    let moved = seg.drag_to([10.0, 20.0]);
    assert_eq!(moved, Some(([10.0, 20.0], [100.0, 0.0])));
    assert_eq!(seg.midpoint(), mid_of(&seg));
}

#[test]
fn midpoint_drag_translates_rigidly_and_preserves_length() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [100.0, 0.0]);
    let len_before = seg.length();
    seg.press_at(Pos2::new(50.0, 0.0), ident);
    assert_eq!(seg.grabbed(), Some(Handle::Mid));
    seg.drag_to([70.0, 30.0]);
    let (p1, p2) = seg.endpoints();
    assert_eq!(p1, [20.0, 30.0]);
    assert_eq!(p2, [120.0, 30.0]);
    assert_eq!(seg.length(), len_before);
    assert_eq!(seg.midpoint(), [70.0, 30.0]);
}

#[test]
fn successive_midpoint_drags_accumulate_from_current_position() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [10.0, 0.0]);
    seg.press_at(Pos2::new(5.0, 0.0), ident);
    seg.drag_to([6.0, 1.0]);
    seg.drag_to([7.0, 2.0]);
    let (p1, p2) = seg.endpoints();
    assert_eq!(p1, [2.0, 2.0]);
    assert_eq!(p2, [12.0, 2.0]);
}

#[test]
fn drag_without_grab_is_a_no_op() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [10.0, 0.0]);
    assert_eq!(seg.drag_to([99.0, 99.0]), None);
    assert_eq!(seg.endpoints(), ([0.0, 0.0], [10.0, 0.0]));
}

#[test]
fn release_clears_grab_so_further_drags_are_ignored() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [10.0, 0.0]);
    seg.press_at(Pos2::new(0.0, 0.0), ident);
    seg.release();
    assert_eq!(seg.grabbed(), None);
    assert_eq!(seg.drag_to([5.0, 5.0]), None);
}

#[test]
fn release_without_grab_is_harmless() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [10.0, 0.0]);
    seg.release();
    assert_eq!(seg.grabbed(), None);
}

#[test]
fn midpoint_invariant_holds_after_every_mutation() {
    let mut seg = DraggableSegment::new([3.0, 7.0], [11.0, -1.0]);
    assert_eq!(seg.midpoint(), mid_of(&seg));
    seg.press_at(Pos2::new(3.0, 7.0), ident);
    seg.drag_to([4.0, 8.0]);
    assert_eq!(seg.midpoint(), mid_of(&seg));
    seg.set_endpoints([0.0, 0.0], [2.0, 6.0]);
    assert_eq!(seg.midpoint(), mid_of(&seg));
}

#[test]
fn set_endpoints_clears_any_active_grab() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [10.0, 0.0]);
    seg.press_at(Pos2::new(0.0, 0.0), ident);
    seg.set_endpoints([1.0, 1.0], [9.0, 9.0]);
    assert_eq!(seg.grabbed(), None);
}

#[test]
fn custom_grab_range_widens_the_hit_area() {
    let mut seg = DraggableSegment::new([0.0, 0.0], [100.0, 0.0]).with_grab_range(25.0);
    let grabbed = seg.press_at(Pos2::new(20.0, 0.0), ident);
    assert_eq!(grabbed, Some(Handle::Start));
}

#[test]
fn grab_range_respects_the_plot_transform() {
    // A projection that doubles plot coordinates: a pointer 15 screen px
    // from the projected handle must not grab even though the plot-space
    // distance is only 7.5.
    let mut seg = DraggableSegment::new([0.0, 0.0], [100.0, 0.0]);
    let double = |p: [f64; 2]| Pos2::new(2.0 * p[0] as f32, 2.0 * p[1] as f32);
    assert_eq!(seg.press_at(Pos2::new(15.0, 0.0), double), None);
    assert_eq!(seg.press_at(Pos2::new(8.0, 0.0), double), Some(Handle::Start));
}
