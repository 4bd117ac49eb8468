use nalgebra::{Point2, UnitQuaternion, Vector3};
use std::f32::consts::FRAC_PI_2;
use trackball_core::{PointerEvent, Transform, TrackballTracker, Viewport};

fn viewport() -> Viewport {
    Viewport::with_radius(300.0, 300.0, 100.0).unwrap()
}

#[test]
fn quarter_turn_drag_from_center_to_rim() {
    let viewport = viewport();
    let mut tracker = TrackballTracker::new();

    let start = tracker
        .begin_drag(Point2::new(150.0, 150.0), &viewport)
        .expect("press at the center starts a drag");
    assert!((start.vector() - Vector3::z()).norm() < 1e-6);

    let preview = tracker.update_drag(Point2::new(250.0, 150.0));
    let last = tracker.session().unwrap().last();
    assert!((last.vector() - Vector3::x()).norm() < 1e-6);

    // Nothing is persisted until release
    assert_eq!(tracker.rotation().orientation(), UnitQuaternion::identity());

    tracker.end_drag();
    let committed = tracker.rotation().orientation();
    assert_eq!(committed, preview);

    let expected = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2);
    assert!(committed.angle_to(&expected) < 1e-5);

    // The point that was under the pointer at press follows it to the rim
    assert!((committed * Vector3::z() - Vector3::x()).norm() < 1e-5);
}

#[test]
fn committed_rotation_feeds_model_matrix() {
    let viewport = viewport();
    let mut tracker = TrackballTracker::new();
    for event in [
        PointerEvent::Pressed { x: 150.0, y: 150.0 },
        PointerEvent::Moved { x: 200.0, y: 150.0 },
        PointerEvent::Moved { x: 250.0, y: 150.0 },
        PointerEvent::Released,
    ] {
        tracker.handle_event(event, &viewport);
    }

    let model = Transform::rotation_matrix(&tracker.current_rotation());
    let image = model.transform_vector(&Vector3::z());
    assert!((image - Vector3::x()).norm() < 1e-5);
}

#[test]
fn release_outside_a_drag_changes_nothing() {
    let viewport = viewport();
    let mut tracker = TrackballTracker::new();

    // Press lands off the canvas, so the following move and release are ignored
    tracker.handle_event(PointerEvent::Pressed { x: 400.0, y: 150.0 }, &viewport);
    tracker.handle_event(PointerEvent::Moved { x: 250.0, y: 150.0 }, &viewport);
    tracker.handle_event(PointerEvent::Released, &viewport);

    assert!(!tracker.is_dragging());
    assert_eq!(tracker.current_rotation(), UnitQuaternion::identity());
}
