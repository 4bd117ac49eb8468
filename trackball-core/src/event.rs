/// Platform-agnostic pointer events.
///
/// Hosts translate their native mouse events (terminal, DOM) into these and
/// hand them to [`TrackballTracker::handle_event`].
use nalgebra::{Point2, UnitQuaternion};

use crate::trackball::TrackballTracker;
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed at a pixel position.
    Pressed { x: f32, y: f32 },
    /// Pointer moved to a pixel position.
    Moved { x: f32, y: f32 },
    /// Primary button released.
    Released,
}

impl TrackballTracker {
    /// Dispatch a pointer event and return the rotation to render next
    pub fn handle_event(&mut self, event: PointerEvent, viewport: &Viewport) -> UnitQuaternion<f32> {
        match event {
            PointerEvent::Pressed { x, y } => {
                self.begin_drag(Point2::new(x, y), viewport);
            }
            PointerEvent::Moved { x, y } => {
                self.update_drag(Point2::new(x, y));
            }
            PointerEvent::Released => self.end_drag(),
        }
        self.current_rotation()
    }
}
