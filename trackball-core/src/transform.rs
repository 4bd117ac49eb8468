/// 3D transformation matrices and rotation state
use nalgebra::{Matrix3, Matrix4, UnitQuaternion, Vector3};

/// Accumulated rotation of the model, always a unit quaternion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    orientation: UnitQuaternion<f32>,
}

impl RotationState {
    pub fn new(orientation: UnitQuaternion<f32>) -> Self {
        Self { orientation }
    }

    pub fn identity() -> Self {
        Self {
            orientation: UnitQuaternion::identity(),
        }
    }

    pub fn orientation(&self) -> UnitQuaternion<f32> {
        self.orientation
    }

    /// Apply `increment` on top of the current rotation (left-multiplied)
    pub fn compose(&mut self, increment: &UnitQuaternion<f32>) {
        self.orientation = compose(increment, &self.orientation);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::identity()
    }
}

/// `normalize(increment * previous)`; the renormalization keeps drift from
/// accumulating over long drags.
pub fn compose(
    increment: &UnitQuaternion<f32>,
    previous: &UnitQuaternion<f32>,
) -> UnitQuaternion<f32> {
    UnitQuaternion::new_normalize(*(increment * previous).quaternion())
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a unit quaternion
    pub fn rotation_matrix(rotation: &UnitQuaternion<f32>) -> Matrix4<f32> {
        rotation.to_homogeneous()
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }

    /// Matrix that carries surface normals through `model`: the inverse
    /// transpose of its upper 3x3. Singular models fall back to the plain 3x3.
    pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix3<f32> {
        let linear: Matrix3<f32> = model.fixed_view::<3, 3>(0, 0).into_owned();
        match linear.try_inverse() {
            Some(inverse) => inverse.transpose(),
            None => linear,
        }
    }

    /// Flatten into the column-major layout graphics APIs expect for uniforms
    pub fn to_column_major(matrix: &Matrix4<f32>) -> [f32; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(matrix.as_slice());
        out
    }
}
