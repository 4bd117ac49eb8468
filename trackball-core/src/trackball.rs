//! Virtual trackball: turns 2D pointer drags into an accumulated 3D rotation.
//!
//! A press opens a drag session anchored on the hemisphere under the
//! pointer. Every move composes the rotation between the previous and the
//! current hemisphere points onto a preview, and the release commits that
//! preview into the persisted [`RotationState`].

use log::{debug, trace};
use nalgebra::{Point2, Unit, UnitQuaternion, Vector3};

use crate::transform::{compose, RotationState};
use crate::viewport::Viewport;

/// Cross products shorter than this are treated as "no rotation axis".
const AXIS_EPSILON: f32 = 1e-7;

/// A pointer position projected onto the trackball hemisphere, unit length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackballPoint(Unit<Vector3<f32>>);

impl TrackballPoint {
    pub fn project(pointer: &Point2<f32>, viewport: &Viewport) -> Self {
        Self(Unit::new_normalize(viewport.hemisphere_point(pointer)))
    }

    pub fn vector(&self) -> Vector3<f32> {
        self.0.into_inner()
    }

    /// Rotation carrying `self` onto `to`, or the identity when the two
    /// points do not define an axis (equal or numerically parallel).
    pub fn rotation_to(&self, to: &TrackballPoint) -> UnitQuaternion<f32> {
        let (from, to) = (self.vector(), to.vector());
        let axis = match Unit::try_new(from.cross(&to), AXIS_EPSILON) {
            Some(axis) => axis,
            None => return UnitQuaternion::identity(),
        };
        let angle = from.dot(&to).clamp(-1.0, 1.0).acos();
        UnitQuaternion::from_axis_angle(&axis, angle)
    }
}

/// State of a pointer-drag gesture in progress
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    viewport: Viewport,
    start: TrackballPoint,
    last: TrackballPoint,
    preview: UnitQuaternion<f32>,
}

impl DragSession {
    pub fn start(&self) -> TrackballPoint {
        self.start
    }

    pub fn last(&self) -> TrackballPoint {
        self.last
    }

    pub fn preview(&self) -> UnitQuaternion<f32> {
        self.preview
    }
}

/// Owns the persisted rotation and the optional drag session.
///
/// The input layer drives it through [`begin_drag`](Self::begin_drag),
/// [`update_drag`](Self::update_drag) and [`end_drag`](Self::end_drag); the
/// render loop reads [`current_rotation`](Self::current_rotation) once per frame.
#[derive(Debug, Clone, Default)]
pub struct TrackballTracker {
    rotation: RotationState,
    session: Option<DragSession>,
}

impl TrackballTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rotation(rotation: RotationState) -> Self {
        Self {
            rotation,
            session: None,
        }
    }

    /// Open a drag session at `pointer`.
    ///
    /// Returns `None` without touching any state when the pointer is outside
    /// `viewport`, or when a session is already open.
    pub fn begin_drag(
        &mut self,
        pointer: Point2<f32>,
        viewport: &Viewport,
    ) -> Option<TrackballPoint> {
        if self.session.is_some() {
            debug!("ignoring press at {pointer:?}: drag already in progress");
            return None;
        }
        if !viewport.contains(&pointer) {
            trace!("ignoring press at {pointer:?} outside the viewport");
            return None;
        }

        let point = TrackballPoint::project(&pointer, viewport);
        debug!("drag started at {pointer:?} -> {:?}", point.vector());
        self.session = Some(DragSession {
            viewport: *viewport,
            start: point,
            last: point,
            preview: self.rotation.orientation(),
        });
        Some(point)
    }

    /// Feed a pointer move into the open session and return the preview
    /// rotation. While idle this is a no-op returning the persisted rotation.
    pub fn update_drag(&mut self, pointer: Point2<f32>) -> UnitQuaternion<f32> {
        let Some(session) = self.session.as_mut() else {
            return self.rotation.orientation();
        };

        let point = TrackballPoint::project(&pointer, &session.viewport);
        let increment = session.last.rotation_to(&point);
        session.preview = compose(&increment, &session.preview);
        session.last = point;
        trace!(
            "drag moved to {pointer:?}, increment angle {:.4} rad",
            increment.angle()
        );
        session.preview
    }

    /// Commit the preview into the persisted rotation and close the session.
    /// No-op while idle.
    pub fn end_drag(&mut self) {
        if let Some(session) = self.session.take() {
            self.rotation = RotationState::new(session.preview);
            debug!(
                "drag committed, total angle {:.4} rad",
                self.rotation.orientation().angle()
            );
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// The persisted rotation, updated only when a drag ends
    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    /// Rotation to render this frame: the preview while dragging, otherwise
    /// the persisted rotation.
    pub fn current_rotation(&self) -> UnitQuaternion<f32> {
        self.session
            .as_ref()
            .map_or(self.rotation.orientation(), DragSession::preview)
    }

    /// Drop any open session and return to the identity rotation
    pub fn reset(&mut self) {
        self.session = None;
        self.rotation = RotationState::identity();
    }
}
