use crate::rendering::error::CreateError;
use nalgebra::{Matrix4, Vector3};
use std::ffi::c_void;

/// Attribute slots a single shader can declare.
pub const MAX_VERTEX_ATTRIBUTES: usize = 16;

/// 2D texture units the renderer resets during cleanup.
pub const TEXTURE_UNITS: u32 = 16;

/// GPU-side object ids. These are opaque to the renderer; the resource
/// loaders that create the objects hand them over.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttributeKind {
    Float,
    Int,
    UnsignedByte,
}

/// One entry of a vertex layout, as the GPU sees it.
#[derive(Debug, Copy, Clone)]
pub struct VertexAttribute {
    /// Interned attribute-name slot; see
    /// [`Renderer::attribute_name_index`](crate::rendering::Renderer::attribute_name_index).
    pub name_index: usize,
    pub components: i32,
    pub kind: AttributeKind,
    pub normalized: bool,
    pub offset: usize,
}

/// The device capability set the renderer drives: program binds, typed
/// uniform uploads, buffer/attribute binds, draw submission, raw state
/// toggles and pixel readback.
///
/// There is exactly one implementation talking to a real context
/// ([`GlBackend`](crate::rendering::GlBackend)); tests substitute a
/// recording double. The renderer owns the backend and threads it through
/// explicitly, which keeps the single-writer rule on device state without a
/// global.
pub trait GpuBackend {
    /// Resolves the device's function pointers through `loader`. Must be
    /// called with a live context before any other method.
    fn load_functions(
        &mut self,
        loader: &mut dyn FnMut(&str) -> *const c_void,
    ) -> Result<(), CreateError>;

    /// Shading-language version as `major * 100 + minor`, or 0 when the
    /// device does not report one.
    fn shading_language_version(&self) -> u32;

    fn bind_program(&mut self, program: ProgramId);
    fn unbind_program(&mut self);

    fn set_uniform_int(&mut self, location: i32, value: i32);
    fn set_uniform_float(&mut self, location: i32, value: f32);
    fn set_uniform_vec3(&mut self, location: i32, value: &Vector3<f32>);
    fn set_uniform_matrix(&mut self, location: i32, value: &Matrix4<f32>);
    fn set_uniform_matrices(&mut self, location: i32, values: &[Matrix4<f32>]);

    fn bind_geometry_buffers(&mut self, vertices: BufferId, indices: BufferId);
    fn unbind_geometry_buffers(&mut self);

    fn enable_vertex_attribute(
        &mut self,
        location: u32,
        attribute: &VertexAttribute,
        stride: usize,
    );
    fn disable_vertex_attribute(&mut self, location: u32);
    fn set_attribute_divisor(&mut self, location: u32, divisor: u32);

    /// Indexed triangle-list draw over `vertex_count` indices starting at
    /// index `indices_offset`.
    fn draw_triangles(&mut self, indices_offset: i32, vertex_count: i32);
    fn draw_triangles_instanced(
        &mut self,
        indices_offset: i32,
        vertex_count: i32,
        instance_count: i32,
    );

    fn set_depth_test(&mut self, enabled: bool);
    fn set_blending(&mut self, enabled: bool);
    fn set_alpha_to_coverage(&mut self, enabled: bool);
    fn set_viewport(&mut self, width: u32, height: u32);

    fn bind_texture(&mut self, unit: u32, texture: TextureId);
    /// Unbinds units `0..TEXTURE_UNITS` and leaves unit 0 active.
    fn unbind_textures(&mut self);

    /// Reads the current framebuffer as tightly-packed RGBA8.
    fn read_pixels(&mut self, width: u32, height: u32) -> Vec<u8>;
}
