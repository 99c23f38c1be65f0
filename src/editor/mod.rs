//! Editor property registration.
//!
//! When an editor is attached, the renderer describes the editable
//! properties of the scene-side render components as a declarative table.
//! Descriptors are data: a name, a type and getter/setter function pointers
//! over [`RenderScene`]. The editor owns presentation and undo; nothing
//! here renders UI.

use crate::scene::{EntityId, RenderScene};
use nalgebra::Vector3;

pub type Getter<T> = fn(&dyn RenderScene, EntityId) -> T;
pub type Setter<T> = fn(&mut dyn RenderScene, EntityId, T);
pub type StrSetter = fn(&mut dyn RenderScene, EntityId, &str);
pub type IndexedGetter<T> = fn(&dyn RenderScene, EntityId, usize) -> T;
pub type IndexedSetter<T> = fn(&mut dyn RenderScene, EntityId, usize, T);
pub type IndexedStrSetter = fn(&mut dyn RenderScene, EntityId, usize, &str);

/// One editable property of a component kind.
pub enum PropertyDescriptor {
    String {
        name: &'static str,
        get: Getter<String>,
        set: StrSetter,
    },
    Decimal {
        name: &'static str,
        get: Getter<f32>,
        set: Setter<f32>,
    },
    Bool {
        name: &'static str,
        get: Getter<bool>,
        set: Setter<bool>,
    },
    Color {
        name: &'static str,
        get: Getter<Vector3<f32>>,
        set: Setter<Vector3<f32>>,
    },
    /// A resource path, filtered in the editor's file picker.
    Resource {
        name: &'static str,
        filter: &'static str,
        get: Getter<String>,
        set: StrSetter,
    },
    /// A growable list of child property tuples.
    Array {
        name: &'static str,
        count: Getter<usize>,
        add: fn(&mut dyn RenderScene, EntityId),
        remove: fn(&mut dyn RenderScene, EntityId, usize),
        children: Vec<ArrayItemDescriptor>,
    },
}

/// A per-element property of an [`PropertyDescriptor::Array`].
pub enum ArrayItemDescriptor {
    Int {
        name: &'static str,
        get: IndexedGetter<i32>,
        set: IndexedSetter<i32>,
        /// Inclusive value limit, when the editor should clamp input.
        limit: Option<(i32, i32)>,
    },
    Resource {
        name: &'static str,
        filter: &'static str,
        get: IndexedGetter<String>,
        set: IndexedStrSetter,
    },
}

impl PropertyDescriptor {
    pub fn name(&self) -> &'static str {
        match self {
            PropertyDescriptor::String { name, .. }
            | PropertyDescriptor::Decimal { name, .. }
            | PropertyDescriptor::Bool { name, .. }
            | PropertyDescriptor::Color { name, .. }
            | PropertyDescriptor::Resource { name, .. }
            | PropertyDescriptor::Array { name, .. } => name,
        }
    }
}

/// The editor collaborator the renderer registers its descriptors with.
pub trait WorldEditor {
    fn register_property(&mut self, component: &'static str, descriptor: PropertyDescriptor);
}

/// Registers every render-component property the editor can touch. Called
/// once from [`Renderer::create`](crate::rendering::Renderer::create) when
/// an editor is attached.
pub fn register_property_descriptors(editor: &mut dyn WorldEditor) {
    editor.register_property(
        "camera",
        PropertyDescriptor::String {
            name: "slot",
            get: |scene, e| scene.camera_slot(e),
            set: |scene, e, v| scene.set_camera_slot(e, v),
        },
    );
    editor.register_property(
        "camera",
        PropertyDescriptor::Decimal {
            name: "fov",
            get: |scene, e| scene.camera_fov(e),
            set: |scene, e, v| scene.set_camera_fov(e, v),
        },
    );
    editor.register_property(
        "camera",
        PropertyDescriptor::Decimal {
            name: "near",
            get: |scene, e| scene.camera_near_plane(e),
            set: |scene, e, v| scene.set_camera_near_plane(e, v),
        },
    );
    editor.register_property(
        "camera",
        PropertyDescriptor::Decimal {
            name: "far",
            get: |scene, e| scene.camera_far_plane(e),
            set: |scene, e, v| scene.set_camera_far_plane(e, v),
        },
    );

    editor.register_property(
        "renderable",
        PropertyDescriptor::Resource {
            name: "source",
            filter: "Mesh (*.msh)",
            get: |scene, e| scene.renderable_path(e),
            set: |scene, e, v| scene.set_renderable_path(e, v),
        },
    );
    editor.register_property(
        "renderable",
        PropertyDescriptor::Bool {
            name: "is_always_visible",
            get: |scene, e| scene.is_renderable_always_visible(e),
            set: |scene, e, v| scene.set_renderable_always_visible(e, v),
        },
    );

    editor.register_property(
        "global_light",
        PropertyDescriptor::Decimal {
            name: "ambient_intensity",
            get: |scene, e| scene.ambient_intensity(e),
            set: |scene, e, v| scene.set_ambient_intensity(e, v),
        },
    );
    editor.register_property(
        "global_light",
        PropertyDescriptor::Decimal {
            name: "intensity",
            get: |scene, e| scene.global_light_intensity(e),
            set: |scene, e, v| scene.set_global_light_intensity(e, v),
        },
    );
    editor.register_property(
        "global_light",
        PropertyDescriptor::Decimal {
            name: "fog_density",
            get: |scene, e| scene.fog_density(e),
            set: |scene, e, v| scene.set_fog_density(e, v),
        },
    );
    editor.register_property(
        "global_light",
        PropertyDescriptor::Color {
            name: "ambient_color",
            get: |scene, e| scene.ambient_color(e),
            set: |scene, e, v| scene.set_ambient_color(e, v),
        },
    );
    editor.register_property(
        "global_light",
        PropertyDescriptor::Color {
            name: "color",
            get: |scene, e| scene.global_light_color(e),
            set: |scene, e, v| scene.set_global_light_color(e, v),
        },
    );
    editor.register_property(
        "global_light",
        PropertyDescriptor::Color {
            name: "fog_color",
            get: |scene, e| scene.fog_color(e),
            set: |scene, e, v| scene.set_fog_color(e, v),
        },
    );

    editor.register_property(
        "point_light",
        PropertyDescriptor::Decimal {
            name: "intensity",
            get: |scene, e| scene.point_light_intensity(e),
            set: |scene, e, v| scene.set_point_light_intensity(e, v),
        },
    );
    editor.register_property(
        "point_light",
        PropertyDescriptor::Color {
            name: "color",
            get: |scene, e| scene.point_light_color(e),
            set: |scene, e, v| scene.set_point_light_color(e, v),
        },
    );
    editor.register_property(
        "point_light",
        PropertyDescriptor::Decimal {
            name: "range",
            get: |scene, e| scene.light_range(e),
            set: |scene, e, v| scene.set_light_range(e, v),
        },
    );
    editor.register_property(
        "point_light",
        PropertyDescriptor::Decimal {
            name: "FOV",
            get: |scene, e| scene.light_fov(e),
            set: |scene, e, v| scene.set_light_fov(e, v),
        },
    );

    editor.register_property(
        "terrain",
        PropertyDescriptor::Resource {
            name: "material",
            filter: "Material (*.mat)",
            get: |scene, e| scene.terrain_material(e),
            set: |scene, e, v| scene.set_terrain_material(e, v),
        },
    );
    editor.register_property(
        "terrain",
        PropertyDescriptor::Decimal {
            name: "xz_scale",
            get: |scene, e| scene.terrain_xz_scale(e),
            set: |scene, e, v| scene.set_terrain_xz_scale(e, v),
        },
    );
    editor.register_property(
        "terrain",
        PropertyDescriptor::Decimal {
            name: "y_scale",
            get: |scene, e| scene.terrain_y_scale(e),
            set: |scene, e, v| scene.set_terrain_y_scale(e, v),
        },
    );

    editor.register_property(
        "terrain",
        PropertyDescriptor::Array {
            name: "grass",
            count: |scene, e| scene.grass_count(e),
            add: |scene, e| scene.add_grass(e),
            remove: |scene, e, i| scene.remove_grass(e, i),
            children: vec![
                ArrayItemDescriptor::Resource {
                    name: "mesh",
                    filter: "Mesh (*.msh)",
                    get: |scene, e, i| scene.grass_path(e, i),
                    set: |scene, e, i, v| scene.set_grass_path(e, i, v),
                },
                ArrayItemDescriptor::Int {
                    name: "ground",
                    get: |scene, e, i| scene.grass_ground(e, i),
                    set: |scene, e, i, v| scene.set_grass_ground(e, i, v),
                    limit: Some((0, 4)),
                },
                ArrayItemDescriptor::Int {
                    name: "density",
                    get: |scene, e, i| scene.grass_density(e, i),
                    set: |scene, e, i, v| scene.set_grass_density(e, i, v),
                    limit: None,
                },
            ],
        },
    );
}
