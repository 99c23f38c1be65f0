use crate::assets::{GeometryId, MeshId};
use crate::rendering::backend::{GpuBackend, MAX_VERTEX_ATTRIBUTES, ProgramId};
use smallvec::SmallVec;

/// Tracks what the device currently has bound so redundant transitions are
/// suppressed. Device state is one global resource; this cache is the single
/// writer's notebook, not a synchronization primitive.
#[derive(Debug, Default)]
pub struct BindState {
    program: Option<ProgramId>,
    geometry: Option<GeometryId>,
    mesh: Option<MeshId>,
    /// Attribute locations enabled by the currently open vertex layout.
    /// At most one layout is open at any time; it must be ended before
    /// another begins.
    open_attributes: SmallVec<[u32; MAX_VERTEX_ATTRIBUTES]>,
}

impl BindState {
    pub fn new() -> Self {
        BindState::default()
    }

    #[inline]
    pub fn bound_program(&self) -> Option<ProgramId> {
        self.program
    }

    #[inline]
    pub fn bound_geometry(&self) -> Option<GeometryId> {
        self.geometry
    }

    #[inline]
    pub fn bound_mesh(&self) -> Option<MeshId> {
        self.mesh
    }

    /// Binds `program` unless it is already the bound one.
    pub fn ensure_program(&mut self, backend: &mut dyn GpuBackend, program: ProgramId) {
        if self.program != Some(program) {
            backend.bind_program(program);
            self.program = Some(program);
        }
    }

    /// Binds `program` unconditionally. Combination switches reuse program
    /// ids, so the already-bound check must not apply.
    pub fn force_program(&mut self, backend: &mut dyn GpuBackend, program: ProgramId) {
        backend.bind_program(program);
        self.program = Some(program);
    }

    /// Disables the attribute arrays of the open vertex layout, if any.
    pub fn end_open_layout(&mut self, backend: &mut dyn GpuBackend) {
        for location in self.open_attributes.drain(..) {
            backend.disable_vertex_attribute(location);
        }
    }

    pub fn record_geometry(
        &mut self,
        geometry: GeometryId,
        mesh: MeshId,
        enabled: SmallVec<[u32; MAX_VERTEX_ATTRIBUTES]>,
    ) {
        debug_assert!(self.open_attributes.is_empty());
        self.geometry = Some(geometry);
        self.mesh = Some(mesh);
        self.open_attributes = enabled;
    }

    /// Returns the device to a known-clean state: no open layout, no bound
    /// buffers or program, no bound textures. Safe to call repeatedly.
    pub fn reset(&mut self, backend: &mut dyn GpuBackend) {
        self.end_open_layout(backend);
        self.geometry = None;
        self.mesh = None;
        backend.unbind_geometry_buffers();
        backend.unbind_program();
        self.program = None;
        backend.unbind_textures();
    }
}
