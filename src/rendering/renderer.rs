use crate::assets::{
    AssetRegistry, FixedUniform, Geometry, HModel, HShader, Material, MaterialValue, Mesh, Shader,
    Vertex3D, VertexLayout,
};
use crate::editor::{WorldEditor, register_property_descriptors};
use crate::rendering::backend::GpuBackend;
use crate::rendering::device::RenderDevice;
use crate::rendering::error::{CreateError, ScreenshotError};
use crate::rendering::frame_export::save_screenshot_tga;
use crate::rendering::state::BindState;
use crate::rendering::uniform::UniformValue;
use crate::utils::{crc32_str, look_at_matrix, projection_matrix};
use log::warn;
use nalgebra::Matrix4;
use std::cell::RefCell;
use std::ffi::c_void;
use std::path::Path;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// Pass shaders are compiled for when no pipeline has chosen one.
pub const MAIN_PASS: u32 = crc32_str("MAIN");

/// The rendering facade: owns the device backend, the bind caches, the
/// camera matrices and the asset registry, and exposes the primitive
/// drawing surface pipeline scripts compose into frames.
///
/// All methods must be called from the thread owning the device context;
/// nothing here blocks or suspends.
pub struct Renderer {
    assets: Arc<AssetRegistry>,
    backend: Box<dyn GpuBackend>,
    state: BindState,
    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
    current_pass: u32,
    render_device: Option<Weak<RefCell<dyn RenderDevice>>>,
    attribute_names: Vec<String>,
    editor_wireframe: bool,
}

impl Renderer {
    pub fn new(backend: Box<dyn GpuBackend>) -> Self {
        Renderer {
            assets: AssetRegistry::new(),
            backend,
            state: BindState::new(),
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
            current_pass: MAIN_PASS,
            render_device: None,
            attribute_names: Vec::new(),
            editor_wireframe: false,
        }
    }

    /// Resolves the device's function pointers and wires the optional editor
    /// collaborator. On failure the renderer stays constructed but unusable;
    /// the engine decides whether that aborts startup.
    pub fn create(
        &mut self,
        loader: &mut dyn FnMut(&str) -> *const c_void,
        editor: Option<&mut dyn WorldEditor>,
    ) -> Result<(), CreateError> {
        if let Some(editor) = editor {
            register_property_descriptors(editor);
        }

        self.backend.load_functions(loader)?;

        debug_assert!(self.assets.shaders.contains(HShader::DEBUG));
        Ok(())
    }

    pub fn assets(&self) -> &Arc<AssetRegistry> {
        &self.assets
    }

    // --- camera -----------------------------------------------------------

    pub fn set_view_matrix(&mut self, matrix: Matrix4<f32>) {
        self.view_matrix = matrix;
    }

    pub fn set_projection_matrix(&mut self, matrix: Matrix4<f32>) {
        self.projection_matrix = matrix;
    }

    pub fn view_matrix(&self) -> &Matrix4<f32> {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Matrix4<f32> {
        &self.projection_matrix
    }

    /// Derives both camera matrices from a camera world transform: the
    /// camera looks down its negative Z column with its Y column as up.
    pub fn set_projection(
        &mut self,
        width: f32,
        height: f32,
        fov: f32,
        near_plane: f32,
        far_plane: f32,
        camera_transform: &Matrix4<f32>,
    ) {
        self.projection_matrix = projection_matrix(fov, width, height, near_plane, far_plane);

        let position = camera_transform.column(3).xyz();
        let forward = camera_transform.column(2).xyz();
        let up = camera_transform.column(1).xyz();
        self.view_matrix = look_at_matrix(&position, &(position - forward), &up);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.backend.set_viewport(width, height);
    }

    // --- passes -----------------------------------------------------------

    pub fn pass(&self) -> u32 {
        self.current_pass
    }

    pub fn set_pass(&mut self, pass_hash: u32) {
        self.current_pass = pass_hash;
    }

    // --- frame lifecycle --------------------------------------------------

    pub fn set_render_device(&mut self, device: &Rc<RefCell<dyn RenderDevice>>) {
        self.render_device = Some(Rc::downgrade(device));
    }

    /// Runs one frame through the attached render device; a no-op when no
    /// device is attached or it has been dropped.
    pub fn render_game(&mut self) {
        let Some(device) = self.render_device.as_ref().and_then(Weak::upgrade) else {
            return;
        };
        let mut device = device.borrow_mut();
        device.begin_frame();
        self.render(&mut *device);
        device.end_frame();
    }

    /// Establishes the baseline raster state, runs the device's pipeline and
    /// cleans up afterwards.
    pub fn render(&mut self, device: &mut dyn RenderDevice) {
        self.backend.set_depth_test(true);
        self.backend.set_blending(false);

        device.pipeline().render(self);

        self.cleanup();
    }

    /// Resets every cached binding so the next frame (or an overlay drawing
    /// directly) starts from known-clean device state. Idempotent.
    pub fn cleanup(&mut self) {
        self.state.reset(self.backend.as_mut());
    }

    // --- uniforms ---------------------------------------------------------

    /// Uploads a named uniform. Absent uniforms (compiled out of the active
    /// combination) are skipped; the shader's program is bound first unless
    /// it already is the bound one.
    pub fn set_uniform(
        &mut self,
        shader: &Shader,
        name: &str,
        name_hash: u32,
        value: impl UniformValue,
    ) {
        debug_assert_eq!(crc32_str(name), name_hash, "stale hash for \"{name}\"");

        let Some(location) = shader.uniform_location(name_hash) else {
            return;
        };
        let Some(program) = shader.program_id() else {
            return;
        };

        self.state.ensure_program(self.backend.as_mut(), program);
        value.upload(self.backend.as_mut(), location);
    }

    /// Uploads one of the well-known per-frame/per-draw uniforms. Same
    /// binding rules as [`set_uniform`](Self::set_uniform), but the location
    /// comes from the fixed table instead of a hash lookup.
    pub fn set_fixed_uniform(
        &mut self,
        shader: &Shader,
        role: FixedUniform,
        value: impl UniformValue,
    ) {
        let Some(location) = shader.fixed_uniform_location(role) else {
            return;
        };
        let Some(program) = shader.program_id() else {
            return;
        };

        self.state.ensure_program(self.backend.as_mut(), program);
        value.upload(self.backend.as_mut(), location);
    }

    pub fn fixed_uniform_location(&self, shader: &Shader, role: FixedUniform) -> Option<i32> {
        shader.fixed_uniform_location(role)
    }

    /// Uploads straight to a resolved location on the currently bound
    /// program. No cache interaction; inner-loop pipeline code only.
    pub fn set_uniform_at(&mut self, location: i32, value: impl UniformValue) {
        value.upload(self.backend.as_mut(), location);
    }

    /// Selects `combination` of `shader` for the current pass and binds its
    /// program unconditionally; combination switches can reuse a program
    /// id, so the already-bound check must not apply. Re-uploads the view
    /// and projection matrices, which every combination declares.
    pub fn apply_shader(&mut self, shader: &mut Shader, combination: u32) {
        shader.set_current_combination(combination, self.current_pass);
        let Some(program) = shader.program_id() else {
            return;
        };

        self.state.force_program(self.backend.as_mut(), program);

        let view = self.view_matrix;
        let projection = self.projection_matrix;
        self.set_fixed_uniform(shader, FixedUniform::ViewMatrix, view);
        self.set_fixed_uniform(shader, FixedUniform::ProjectionMatrix, projection);
    }

    /// Applies a material: depth state, shader combination, texture units,
    /// then the material's uniform overrides. Must precede any per-object
    /// uniform for the mesh using it.
    pub fn apply_material(&mut self, material: &Material) {
        let assets = self.assets.clone();

        self.backend.set_depth_test(material.z_test);

        let Some(mut shader) = assets.shaders.try_get_mut(material.shader) else {
            warn!("Material \"{}\" references a missing shader", material.name);
            return;
        };
        self.apply_shader(&mut shader, material.shader_combination);

        for (unit, handle) in &material.textures {
            let Some(texture) = assets.textures.try_get(*handle) else {
                continue;
            };
            let Some(gpu_id) = texture.gpu_id else {
                continue;
            };
            self.backend.bind_texture(*unit, gpu_id);
        }

        for uniform in &material.uniforms {
            match uniform.value {
                MaterialValue::Int(v) => {
                    self.set_uniform(&shader, &uniform.name, uniform.name_hash, v)
                }
                MaterialValue::Float(v) => {
                    self.set_uniform(&shader, &uniform.name, uniform.name_hash, v)
                }
                MaterialValue::Vec3(v) => {
                    self.set_uniform(&shader, &uniform.name, uniform.name_hash, v)
                }
                MaterialValue::Matrix(v) => {
                    self.set_uniform(&shader, &uniform.name, uniform.name_hash, v)
                }
            }
        }
    }

    // --- geometry ---------------------------------------------------------

    /// Binds `geometry`'s buffers and begins `mesh`'s vertex layout, unless
    /// that exact mesh is already bound. A previously open layout is ended
    /// first, so exactly one layout is open at any time.
    pub fn bind_geometry(&mut self, geometry: &Geometry, mesh: &Mesh) {
        if self.state.bound_mesh() == Some(mesh.id()) {
            return;
        }

        self.state.end_open_layout(self.backend.as_mut());
        self.backend
            .bind_geometry_buffers(geometry.vertex_buffer, geometry.index_buffer);

        let assets = self.assets.clone();
        let enabled = assets
            .materials
            .try_get(mesh.material)
            .and_then(|material| assets.shaders.try_get(material.shader))
            .map(|shader| {
                mesh.layout
                    .begin(self.backend.as_mut(), &shader, mesh.attribute_array_offset)
            })
            .unwrap_or_default();

        self.state.record_geometry(geometry.id(), mesh.id(), enabled);
    }

    /// Indexed triangle-list draw over the bound geometry. Pure submission;
    /// callers guarantee the right geometry is bound.
    pub fn render_geometry(&mut self, indices_offset: i32, vertex_count: i32) {
        self.backend.draw_triangles(indices_offset, vertex_count);
    }

    /// As [`render_geometry`](Self::render_geometry), instanced. Resets the
    /// instancing divisor on every attribute the shader declares first, in
    /// case an earlier instanced draw left divisors set.
    pub fn render_instanced_geometry(
        &mut self,
        indices_offset: i32,
        vertex_count: i32,
        instance_count: i32,
        shader: &Shader,
    ) {
        for &location in shader.attribute_locations() {
            if location >= 0 {
                self.backend.set_attribute_divisor(location as u32, 0);
            }
        }
        self.backend
            .draw_triangles_instanced(indices_offset, vertex_count, instance_count);
    }

    /// Draws every mesh of `model` with `transform` as the world matrix.
    /// Skipped entirely while the model is still loading.
    pub fn render_model(&mut self, model: HModel, transform: &Matrix4<f32>) {
        let assets = self.assets.clone();
        let Some(model) = assets.models.try_get(model) else {
            return;
        };
        if !model.is_ready() {
            return;
        }

        let mut applied = None;
        for mesh in &model.meshes {
            // material first: the program must be active before the world
            // matrix upload and before the layout binds against it
            {
                let Some(material) = assets.materials.try_get(mesh.material) else {
                    continue;
                };
                if applied != Some(mesh.material) {
                    self.apply_material(&material);
                    applied = Some(mesh.material);
                }

                let Some(shader) = assets.shaders.try_get(material.shader) else {
                    continue;
                };
                self.set_fixed_uniform(&shader, FixedUniform::WorldMatrix, *transform);
            }

            self.bind_geometry(&model.geometry, mesh);
            self.render_geometry(mesh.indices_offset, mesh.index_count);
        }
    }

    // --- raster state -----------------------------------------------------

    pub fn enable_z_test(&mut self, enable: bool) {
        self.backend.set_depth_test(enable);
    }

    pub fn enable_alpha_to_coverage(&mut self, enable: bool) {
        self.backend.set_alpha_to_coverage(enable);
    }

    // --- misc -------------------------------------------------------------

    /// The built-in line/overlay shader used by debug drawing.
    pub fn debug_shader(&self) -> HShader {
        HShader::DEBUG
    }

    pub fn glsl_version(&self) -> u32 {
        self.backend.shading_language_version()
    }

    pub fn make_screenshot(
        &mut self,
        path: impl AsRef<Path>,
        width: u32,
        height: u32,
    ) -> Result<(), ScreenshotError> {
        save_screenshot_tga(self.backend.as_mut(), path, width, height)
    }

    /// Stable slot for a vertex-attribute name: the first occurrence appends
    /// to the table, later ones find it again. Exact, case-sensitive match.
    pub fn attribute_name_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.attribute_names.iter().position(|n| n == name) {
            return index;
        }
        self.attribute_names.push(name.to_string());
        self.attribute_names.len() - 1
    }

    pub fn attribute_name(&self, index: usize) -> Option<&str> {
        self.attribute_names.get(index).map(String::as_str)
    }

    /// [`VertexLayout`] for the standard [`Vertex3D`] format, with its
    /// attribute names interned into this renderer's table.
    pub fn vertex3d_layout(&mut self) -> VertexLayout {
        Vertex3D::layout(|name| self.attribute_name_index(name))
    }

    pub fn set_editor_wireframe(&mut self, wireframe: bool) {
        self.editor_wireframe = wireframe;
    }

    pub fn is_editor_wireframe(&self) -> bool {
        self.editor_wireframe
    }

    /// Read-only view of the bind cache, mostly for diagnostics.
    pub fn bind_state(&self) -> &BindState {
        &self.state
    }
}
