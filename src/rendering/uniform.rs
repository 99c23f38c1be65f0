use crate::rendering::backend::GpuBackend;
use nalgebra::{Matrix4, Vector3};

/// A value that can be uploaded to a resolved uniform location.
///
/// Implemented for the scalar, vector and matrix types shaders declare;
/// gives [`Renderer::set_uniform`](crate::rendering::Renderer::set_uniform)
/// one typed entry point instead of a method per type.
pub trait UniformValue {
    fn upload(&self, backend: &mut dyn GpuBackend, location: i32);
}

impl UniformValue for i32 {
    fn upload(&self, backend: &mut dyn GpuBackend, location: i32) {
        backend.set_uniform_int(location, *self);
    }
}

impl UniformValue for f32 {
    fn upload(&self, backend: &mut dyn GpuBackend, location: i32) {
        backend.set_uniform_float(location, *self);
    }
}

impl UniformValue for Vector3<f32> {
    fn upload(&self, backend: &mut dyn GpuBackend, location: i32) {
        backend.set_uniform_vec3(location, self);
    }
}

impl UniformValue for Matrix4<f32> {
    fn upload(&self, backend: &mut dyn GpuBackend, location: i32) {
        backend.set_uniform_matrix(location, self);
    }
}

impl UniformValue for &[Matrix4<f32>] {
    fn upload(&self, backend: &mut dyn GpuBackend, location: i32) {
        backend.set_uniform_matrices(location, self);
    }
}

impl<const N: usize> UniformValue for [Matrix4<f32>; N] {
    fn upload(&self, backend: &mut dyn GpuBackend, location: i32) {
        backend.set_uniform_matrices(location, self.as_slice());
    }
}
