//! OpenGL 3.3 implementation of [`GpuBackend`].
//!
//! All state caching lives above this layer; every method here issues its
//! GL calls unconditionally.

use crate::rendering::backend::{
    AttributeKind, BufferId, GpuBackend, ProgramId, TEXTURE_UNITS, TextureId, VertexAttribute,
};
use crate::rendering::error::{CreateError, MissingFunctionErr};
use gl::types::{GLboolean, GLchar, GLsizei};
use nalgebra::{Matrix4, Vector3};
use snafu::ensure;
use std::ffi::{CStr, c_void};
use std::ptr;

#[derive(Debug, Default)]
pub struct GlBackend;

impl GlBackend {
    pub fn new() -> Self {
        GlBackend
    }
}

fn attribute_gl_type(kind: AttributeKind) -> u32 {
    match kind {
        AttributeKind::Float => gl::FLOAT,
        AttributeKind::Int => gl::INT,
        AttributeKind::UnsignedByte => gl::UNSIGNED_BYTE,
    }
}

impl GpuBackend for GlBackend {
    fn load_functions(
        &mut self,
        loader: &mut dyn FnMut(&str) -> *const c_void,
    ) -> Result<(), CreateError> {
        gl::load_with(|name| loader(name));

        // spot checks on the entry points the renderer cannot run without
        ensure!(
            gl::UseProgram::is_loaded(),
            MissingFunctionErr {
                name: "glUseProgram"
            }
        );
        ensure!(
            gl::BindBuffer::is_loaded(),
            MissingFunctionErr {
                name: "glBindBuffer"
            }
        );
        ensure!(
            gl::DrawElements::is_loaded(),
            MissingFunctionErr {
                name: "glDrawElements"
            }
        );
        ensure!(
            gl::VertexAttribPointer::is_loaded(),
            MissingFunctionErr {
                name: "glVertexAttribPointer"
            }
        );
        ensure!(
            gl::ActiveTexture::is_loaded(),
            MissingFunctionErr {
                name: "glActiveTexture"
            }
        );

        Ok(())
    }

    fn shading_language_version(&self) -> u32 {
        let version_str = unsafe { gl::GetString(gl::SHADING_LANGUAGE_VERSION) };
        if version_str.is_null() {
            return 0;
        }

        let version_str = unsafe { CStr::from_ptr(version_str as *const GLchar) };
        let mut version = 0;
        // "3.30 ..." parses as 330
        for group in version_str.to_string_lossy().split('.').take(2) {
            for c in group.chars() {
                match c.to_digit(10) {
                    Some(digit) => version = version * 10 + digit,
                    None => break,
                }
            }
        }
        version
    }

    fn bind_program(&mut self, program: ProgramId) {
        unsafe { gl::UseProgram(program.0) }
    }

    fn unbind_program(&mut self) {
        unsafe { gl::UseProgram(0) }
    }

    fn set_uniform_int(&mut self, location: i32, value: i32) {
        unsafe { gl::Uniform1i(location, value) }
    }

    fn set_uniform_float(&mut self, location: i32, value: f32) {
        unsafe { gl::Uniform1f(location, value) }
    }

    fn set_uniform_vec3(&mut self, location: i32, value: &Vector3<f32>) {
        unsafe { gl::Uniform3f(location, value.x, value.y, value.z) }
    }

    fn set_uniform_matrix(&mut self, location: i32, value: &Matrix4<f32>) {
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()) }
    }

    fn set_uniform_matrices(&mut self, location: i32, values: &[Matrix4<f32>]) {
        unsafe {
            gl::UniformMatrix4fv(
                location,
                values.len() as GLsizei,
                gl::FALSE,
                values.as_ptr() as *const f32,
            )
        }
    }

    fn bind_geometry_buffers(&mut self, vertices: BufferId, indices: BufferId) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, vertices.0);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, indices.0);
        }
    }

    fn unbind_geometry_buffers(&mut self) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0);
        }
    }

    fn enable_vertex_attribute(
        &mut self,
        location: u32,
        attribute: &VertexAttribute,
        stride: usize,
    ) {
        let gl_type = attribute_gl_type(attribute.kind);
        unsafe {
            match attribute.kind {
                AttributeKind::Float => gl::VertexAttribPointer(
                    location,
                    attribute.components,
                    gl_type,
                    attribute.normalized as GLboolean,
                    stride as GLsizei,
                    ptr::null::<c_void>().add(attribute.offset),
                ),
                _ if attribute.normalized => gl::VertexAttribPointer(
                    location,
                    attribute.components,
                    gl_type,
                    gl::TRUE,
                    stride as GLsizei,
                    ptr::null::<c_void>().add(attribute.offset),
                ),
                _ => gl::VertexAttribIPointer(
                    location,
                    attribute.components,
                    gl_type,
                    stride as GLsizei,
                    ptr::null::<c_void>().add(attribute.offset),
                ),
            }
            gl::EnableVertexAttribArray(location);
        }
    }

    fn disable_vertex_attribute(&mut self, location: u32) {
        unsafe { gl::DisableVertexAttribArray(location) }
    }

    fn set_attribute_divisor(&mut self, location: u32, divisor: u32) {
        unsafe { gl::VertexAttribDivisor(location, divisor) }
    }

    fn draw_triangles(&mut self, indices_offset: i32, vertex_count: i32) {
        let first = indices_offset as usize * size_of::<u32>();
        unsafe {
            gl::DrawElements(
                gl::TRIANGLES,
                vertex_count,
                gl::UNSIGNED_INT,
                ptr::null::<c_void>().add(first),
            );
        }
    }

    fn draw_triangles_instanced(
        &mut self,
        indices_offset: i32,
        vertex_count: i32,
        instance_count: i32,
    ) {
        let first = indices_offset as usize * size_of::<u32>();
        unsafe {
            gl::DrawElementsInstanced(
                gl::TRIANGLES,
                vertex_count,
                gl::UNSIGNED_INT,
                ptr::null::<c_void>().add(first),
                instance_count,
            );
        }
    }

    fn set_depth_test(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                gl::Enable(gl::DEPTH_TEST);
            } else {
                gl::Disable(gl::DEPTH_TEST);
            }
        }
    }

    fn set_blending(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                gl::Enable(gl::BLEND);
            } else {
                gl::Disable(gl::BLEND);
            }
        }
    }

    fn set_alpha_to_coverage(&mut self, enabled: bool) {
        unsafe {
            if enabled {
                gl::Enable(gl::MULTISAMPLE);
                gl::Enable(gl::SAMPLE_ALPHA_TO_COVERAGE);
            } else {
                gl::Disable(gl::MULTISAMPLE);
                gl::Disable(gl::SAMPLE_ALPHA_TO_COVERAGE);
            }
        }
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe { gl::Viewport(0, 0, width as GLsizei, height as GLsizei) }
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureId) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit);
            gl::BindTexture(gl::TEXTURE_2D, texture.0);
        }
    }

    fn unbind_textures(&mut self) {
        unsafe {
            for unit in 0..TEXTURE_UNITS {
                gl::ActiveTexture(gl::TEXTURE0 + unit);
                gl::BindTexture(gl::TEXTURE_2D, 0);
            }
            gl::ActiveTexture(gl::TEXTURE0);
        }
    }

    fn read_pixels(&mut self, width: u32, height: u32) -> Vec<u8> {
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        unsafe {
            gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
            gl::ReadPixels(
                0,
                0,
                width as GLsizei,
                height as GLsizei,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_mut_ptr() as *mut c_void,
            );
        }
        pixels
    }
}
