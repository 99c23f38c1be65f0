use crate::assets::store::{HandleName, StoreType};
use crate::assets::{H, HMaterial, Shader};
use crate::rendering::{
    AttributeKind, BufferId, GpuBackend, MAX_VERTEX_ATTRIBUTES, VertexAttribute,
};
use bon::Builder;
use bytemuck::{Pod, Zeroable};
use nalgebra::{Vector2, Vector3};
use smallvec::SmallVec;
use static_assertions::const_assert_eq;
use std::sync::atomic::{AtomicU32, Ordering};

/// Identity of a geometry buffer set, assigned at creation.
///
/// The bind cache compares these instead of references so it can outlive any
/// particular borrow of the geometry it last bound.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GeometryId(u32);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MeshId(u32);

static NEXT_GEOMETRY_ID: AtomicU32 = AtomicU32::new(0);
static NEXT_MESH_ID: AtomicU32 = AtomicU32::new(0);

/// A vertex/index buffer pair uploaded by the model loader.
#[derive(Debug, Clone)]
pub struct Geometry {
    id: GeometryId,
    pub vertex_buffer: BufferId,
    pub index_buffer: BufferId,
}

impl Geometry {
    pub fn new(vertex_buffer: BufferId, index_buffer: BufferId) -> Self {
        Geometry {
            id: GeometryId(NEXT_GEOMETRY_ID.fetch_add(1, Ordering::Relaxed)),
            vertex_buffer,
            index_buffer,
        }
    }

    #[inline]
    pub fn id(&self) -> GeometryId {
        self.id
    }
}

/// How one vertex buffer maps onto shader attribute slots.
#[derive(Debug, Clone, Default)]
pub struct VertexLayout {
    pub attributes: SmallVec<[VertexAttribute; 8]>,
    pub stride: usize,
}

impl VertexLayout {
    pub fn new(attributes: impl IntoIterator<Item = VertexAttribute>, stride: usize) -> Self {
        VertexLayout {
            attributes: attributes.into_iter().collect(),
            stride,
        }
    }

    /// Enables this layout's attribute arrays against `shader`, starting at
    /// attribute slot `base_offset`. Returns the locations that were
    /// enabled so the caller can disable exactly those later, without
    /// holding on to the mesh or shader.
    pub fn begin(
        &self,
        backend: &mut dyn GpuBackend,
        shader: &Shader,
        base_offset: usize,
    ) -> SmallVec<[u32; MAX_VERTEX_ATTRIBUTES]> {
        let locations = shader.attribute_locations();
        let mut enabled = SmallVec::new();

        for (slot, attribute) in self.attributes.iter().enumerate() {
            let Some(&location) = locations.get(base_offset + slot) else {
                continue;
            };
            if location < 0 {
                continue;
            }
            backend.enable_vertex_attribute(location as u32, attribute, self.stride);
            enabled.push(location as u32);
        }

        enabled
    }
}

/// A drawable slice of a geometry: an index range, the material to draw it
/// with and the vertex layout its shader expects.
#[derive(Debug, Clone)]
pub struct Mesh {
    id: MeshId,
    pub material: HMaterial,
    pub indices_offset: i32,
    pub index_count: i32,
    pub attribute_array_offset: usize,
    pub layout: VertexLayout,
}

impl Mesh {
    pub fn new(
        material: HMaterial,
        indices_offset: i32,
        index_count: i32,
        layout: VertexLayout,
    ) -> Self {
        Mesh {
            id: MeshId(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed)),
            material,
            indices_offset,
            index_count,
            attribute_array_offset: 0,
            layout,
        }
    }

    #[inline]
    pub fn id(&self) -> MeshId {
        self.id
    }
}

#[derive(Debug, Clone, Builder)]
pub struct Model {
    pub geometry: Geometry,
    #[builder(default)]
    pub meshes: Vec<Mesh>,
    /// Flipped by the model loader once geometry and materials are uploaded.
    #[builder(default = false)]
    ready: bool,
}

impl Model {
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn mesh(&self, index: usize) -> Option<&Mesh> {
        self.meshes.get(index)
    }
}

impl StoreType for Model {
    fn name() -> &'static str {
        "Model"
    }

    fn ident_fmt(handle: H<Self>) -> HandleName<Self> {
        HandleName::Id(handle)
    }

    fn is_builtin(_handle: H<Self>) -> bool {
        false
    }
}

/// The engine's standard interleaved vertex format.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex3D {
    pub position: Vector3<f32>,
    pub tex_coord: Vector2<f32>,
    pub normal: Vector3<f32>,
    pub tangent: Vector3<f32>,
}

const_assert_eq!(size_of::<Vertex3D>(), 44);

impl Vertex3D {
    pub const ATTRIBUTE_NAMES: [&'static str; 4] =
        ["in_position", "in_tex_coords", "in_normal", "in_tangent"];

    /// Builds the layout for this format. `intern` maps attribute names to
    /// stable slots; see
    /// [`Renderer::attribute_name_index`](crate::rendering::Renderer::attribute_name_index).
    pub fn layout(mut intern: impl FnMut(&str) -> usize) -> VertexLayout {
        let attributes = [
            VertexAttribute {
                name_index: intern(Self::ATTRIBUTE_NAMES[0]),
                components: 3,
                kind: AttributeKind::Float,
                normalized: false,
                offset: std::mem::offset_of!(Vertex3D, position),
            },
            VertexAttribute {
                name_index: intern(Self::ATTRIBUTE_NAMES[1]),
                components: 2,
                kind: AttributeKind::Float,
                normalized: false,
                offset: std::mem::offset_of!(Vertex3D, tex_coord),
            },
            VertexAttribute {
                name_index: intern(Self::ATTRIBUTE_NAMES[2]),
                components: 3,
                kind: AttributeKind::Float,
                normalized: false,
                offset: std::mem::offset_of!(Vertex3D, normal),
            },
            VertexAttribute {
                name_index: intern(Self::ATTRIBUTE_NAMES[3]),
                components: 3,
                kind: AttributeKind::Float,
                normalized: false,
                offset: std::mem::offset_of!(Vertex3D, tangent),
            },
        ];

        VertexLayout::new(attributes, size_of::<Vertex3D>())
    }
}
