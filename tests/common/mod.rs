#![allow(dead_code)]

use lustre::assets::{
    Geometry, HMaterial, Material, Mesh, Model, Shader, ShaderCombination, VertexLayout,
};
use lustre::rendering::{
    AttributeKind, BufferId, CreateError, GpuBackend, MAIN_PASS, ProgramId, Renderer, TextureId,
    VertexAttribute,
};
use lustre::utils::crc32_str;
use nalgebra::{Matrix4, Vector3};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::c_void;
use std::rc::Rc;

/// Every call the renderer can issue against the device, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuOp {
    BindProgram(u32),
    UnbindProgram,
    UniformInt(i32, i32),
    UniformFloat(i32, f32),
    UniformVec3(i32),
    UniformMatrix(i32),
    UniformMatrices(i32, usize),
    BindBuffers(u32, u32),
    UnbindBuffers,
    EnableAttribute(u32),
    DisableAttribute(u32),
    SetDivisor(u32, u32),
    Draw(i32, i32),
    DrawInstanced(i32, i32, i32),
    DepthTest(bool),
    Blending(bool),
    AlphaToCoverage(bool),
    Viewport(u32, u32),
    BindTexture(u32, u32),
    UnbindTextures,
    ReadPixels(u32, u32),
}

pub type OpLog = Rc<RefCell<Vec<GpuOp>>>;

/// Backend double that records every issued command so tests can count
/// actual device transitions.
pub struct RecordingBackend {
    ops: OpLog,
}

impl RecordingBackend {
    pub fn new() -> (Self, OpLog) {
        let ops: OpLog = Rc::default();
        (RecordingBackend { ops: ops.clone() }, ops)
    }

    fn push(&self, op: GpuOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl GpuBackend for RecordingBackend {
    fn load_functions(
        &mut self,
        _loader: &mut dyn FnMut(&str) -> *const c_void,
    ) -> Result<(), CreateError> {
        Ok(())
    }

    fn shading_language_version(&self) -> u32 {
        330
    }

    fn bind_program(&mut self, program: ProgramId) {
        self.push(GpuOp::BindProgram(program.0));
    }

    fn unbind_program(&mut self) {
        self.push(GpuOp::UnbindProgram);
    }

    fn set_uniform_int(&mut self, location: i32, value: i32) {
        self.push(GpuOp::UniformInt(location, value));
    }

    fn set_uniform_float(&mut self, location: i32, value: f32) {
        self.push(GpuOp::UniformFloat(location, value));
    }

    fn set_uniform_vec3(&mut self, location: i32, _value: &Vector3<f32>) {
        self.push(GpuOp::UniformVec3(location));
    }

    fn set_uniform_matrix(&mut self, location: i32, _value: &Matrix4<f32>) {
        self.push(GpuOp::UniformMatrix(location));
    }

    fn set_uniform_matrices(&mut self, location: i32, values: &[Matrix4<f32>]) {
        self.push(GpuOp::UniformMatrices(location, values.len()));
    }

    fn bind_geometry_buffers(&mut self, vertices: BufferId, indices: BufferId) {
        self.push(GpuOp::BindBuffers(vertices.0, indices.0));
    }

    fn unbind_geometry_buffers(&mut self) {
        self.push(GpuOp::UnbindBuffers);
    }

    fn enable_vertex_attribute(
        &mut self,
        location: u32,
        _attribute: &VertexAttribute,
        _stride: usize,
    ) {
        self.push(GpuOp::EnableAttribute(location));
    }

    fn disable_vertex_attribute(&mut self, location: u32) {
        self.push(GpuOp::DisableAttribute(location));
    }

    fn set_attribute_divisor(&mut self, location: u32, divisor: u32) {
        self.push(GpuOp::SetDivisor(location, divisor));
    }

    fn draw_triangles(&mut self, indices_offset: i32, vertex_count: i32) {
        self.push(GpuOp::Draw(indices_offset, vertex_count));
    }

    fn draw_triangles_instanced(
        &mut self,
        indices_offset: i32,
        vertex_count: i32,
        instance_count: i32,
    ) {
        self.push(GpuOp::DrawInstanced(indices_offset, vertex_count, instance_count));
    }

    fn set_depth_test(&mut self, enabled: bool) {
        self.push(GpuOp::DepthTest(enabled));
    }

    fn set_blending(&mut self, enabled: bool) {
        self.push(GpuOp::Blending(enabled));
    }

    fn set_alpha_to_coverage(&mut self, enabled: bool) {
        self.push(GpuOp::AlphaToCoverage(enabled));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.push(GpuOp::Viewport(width, height));
    }

    fn bind_texture(&mut self, unit: u32, texture: TextureId) {
        self.push(GpuOp::BindTexture(unit, texture.0));
    }

    fn unbind_textures(&mut self) {
        self.push(GpuOp::UnbindTextures);
    }

    fn read_pixels(&mut self, width: u32, height: u32) -> Vec<u8> {
        self.push(GpuOp::ReadPixels(width, height));
        vec![0x40; width as usize * height as usize * 4]
    }
}

pub fn recording_renderer() -> (Renderer, OpLog) {
    let _ = env_logger::builder().is_test(true).try_init();
    let (backend, ops) = RecordingBackend::new();
    (Renderer::new(Box::new(backend)), ops)
}

pub fn count(ops: &OpLog, pred: impl Fn(&GpuOp) -> bool) -> usize {
    ops.borrow().iter().filter(|op| pred(op)).count()
}

pub fn program_binds(ops: &OpLog) -> usize {
    count(ops, |op| matches!(op, GpuOp::BindProgram(_)))
}

pub fn buffer_binds(ops: &OpLog) -> usize {
    count(ops, |op| matches!(op, GpuOp::BindBuffers(_, _)))
}

pub fn draws(ops: &OpLog) -> usize {
    count(ops, |op| matches!(op, GpuOp::Draw(_, _)))
}

pub fn clear(ops: &OpLog) {
    ops.borrow_mut().clear();
}

/// A shader with one compiled combination for the MAIN pass: fixed uniforms
/// at locations 0..2, two named uniforms and four attributes.
pub fn ready_shader(name: &str, program: u32) -> Shader {
    let mut shader = Shader::new(name);
    shader.add_combination(
        ShaderCombination::builder()
            .pass(MAIN_PASS)
            .mask(0)
            .program(ProgramId(program))
            .uniform_locations(HashMap::from([
                (crc32_str("u_time"), 3),
                (crc32_str("u_color"), 4),
            ]))
            .fixed_locations([0, 1, 2])
            .attribute_locations(SmallVec::from_slice(&[0, 1]))
            .build(),
    );
    shader
}

/// Two-attribute position/normal layout matching [`ready_shader`].
pub fn test_layout() -> VertexLayout {
    VertexLayout::new(
        [
            VertexAttribute {
                name_index: 0,
                components: 3,
                kind: AttributeKind::Float,
                normalized: false,
                offset: 0,
            },
            VertexAttribute {
                name_index: 1,
                components: 3,
                kind: AttributeKind::Float,
                normalized: false,
                offset: 12,
            },
        ],
        24,
    )
}

/// Registers a ready shader + material pair in the renderer's stores.
pub fn ready_material(renderer: &Renderer, name: &str, program: u32) -> HMaterial {
    let assets = renderer.assets();
    let shader = assets.shaders.add(ready_shader(name, program));
    assets
        .materials
        .add(Material::builder().name(name).shader(shader).build())
}

/// A ready two-mesh model sharing one material over one geometry.
pub fn two_mesh_model(renderer: &Renderer, material: HMaterial) -> lustre::assets::HModel {
    let geometry = Geometry::new(BufferId(10), BufferId(11));
    let meshes = vec![
        Mesh::new(material, 0, 36, test_layout()),
        Mesh::new(material, 36, 12, test_layout()),
    ];
    let model = Model::builder()
        .geometry(geometry)
        .meshes(meshes)
        .ready(true)
        .build();
    renderer.assets().models.add(model)
}
