/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// View orientation as a unit quaternion.
pub type Rotation3 = nalgebra::UnitQuaternion<f64>;

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}

/// Returns the camera's forward axis: the Z basis vector of the view rotation.
#[must_use]
pub fn view_forward_axis(rotation: &Rotation3) -> Vector3 {
    rotation.to_rotation_matrix().matrix().column(2).into_owned()
}
