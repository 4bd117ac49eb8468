/// Trackball Core Library - Pointer-driven rotation and shared geometry
///
/// This library provides the virtual trackball that turns pointer drags into
/// a quaternion rotation, plus the transformation, projection, geometry and
/// lighting helpers the terminal and web hosts render with.

pub mod error;
pub mod event;
pub mod geometry;
pub mod lighting;
pub mod projection;
pub mod trackball;
pub mod transform;
pub mod viewport;

// Re-export commonly used types
pub use error::TrackballError;
pub use event::PointerEvent;
pub use geometry::{Mesh, Shape, Triangle, Vertex};
pub use lighting::PhongLight;
pub use projection::{Camera, ProjectionMode};
pub use trackball::{DragSession, TrackballPoint, TrackballTracker};
pub use transform::{RotationState, Transform};
pub use viewport::{TrackballConfig, Viewport};
