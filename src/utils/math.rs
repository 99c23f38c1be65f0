use nalgebra::{Matrix4, RealField, Vector3};
use num_traits::Float;

/// Right-handed perspective projection from a vertical field of view in
/// degrees, a viewport size and the near/far planes. The `-1` in the w-row
/// produces the perspective divide.
pub fn projection_matrix<T: RealField + Float + Copy>(
    fov_deg: T,
    width: T,
    height: T,
    near_plane: T,
    far_plane: T,
) -> Matrix4<T> {
    let two = T::one() + T::one();
    let f = T::one() / Float::tan(Float::to_radians(fov_deg) / two);

    let mut mtx = Matrix4::identity();
    mtx[(0, 0)] = f / (width / height);
    mtx[(1, 1)] = f;
    mtx[(2, 2)] = (far_plane + near_plane) / (near_plane - far_plane);
    mtx[(2, 3)] = (two * far_plane * near_plane) / (near_plane - far_plane);
    mtx[(3, 2)] = -T::one();
    mtx[(3, 3)] = T::zero();
    mtx
}

/// Orthographic projection from six clip planes.
pub fn ortho_matrix<T: RealField + Copy>(
    left: T,
    right: T,
    bottom: T,
    top: T,
    z_near: T,
    z_far: T,
) -> Matrix4<T> {
    let two = T::one() + T::one();

    let mut mtx = Matrix4::identity();
    mtx[(0, 0)] = two / (right - left);
    mtx[(1, 1)] = two / (top - bottom);
    mtx[(2, 2)] = -two / (z_far - z_near);
    mtx[(0, 3)] = -(right + left) / (right - left);
    mtx[(1, 3)] = -(top + bottom) / (top - bottom);
    mtx[(2, 3)] = -(z_far + z_near) / (z_far - z_near);
    mtx
}

/// View matrix looking from `eye` towards `center` with `up` as the rough
/// up direction. The rotation is the transpose of the camera basis and the
/// translation the negated basis-eye dot products, so no matrix inverse is
/// needed.
///
/// `up` must not be parallel to `center - eye`; the cross product degenerates
/// otherwise. Callers guarantee this.
pub fn look_at_matrix<T: RealField + Copy>(
    eye: &Vector3<T>,
    center: &Vector3<T>,
    up: &Vector3<T>,
) -> Matrix4<T> {
    let forward = (center - eye).normalize();
    let right = forward.cross(up);
    debug_assert!(right.norm_squared() > T::default_epsilon());
    let right = right.normalize();
    let up = right.cross(&forward);

    #[rustfmt::skip]
    let mtx = Matrix4::new(
        right.x,    right.y,    right.z,    -right.dot(eye),
        up.x,       up.y,       up.z,       -up.dot(eye),
        -forward.x, -forward.y, -forward.z, forward.dot(eye),
        T::zero(),  T::zero(),  T::zero(),  T::one(),
    );
    mtx
}
