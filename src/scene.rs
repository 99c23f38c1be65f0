//! Interface to the scene component the renderer collaborates with.
//!
//! The scene graph lives outside this crate; the renderer only needs the
//! accessor surface below so editor property descriptors can bind to it.

use nalgebra::Vector3;

/// An entity owning scene-side render components. Allocation and meaning of
/// the id are the scene's business.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Accessor surface of the scene component, as bound by the editor property
/// descriptors in [`crate::editor`]. Object-safe on purpose: descriptors
/// store plain function pointers over `dyn RenderScene`.
pub trait RenderScene {
    // camera
    fn camera_slot(&self, camera: EntityId) -> String;
    fn set_camera_slot(&mut self, camera: EntityId, slot: &str);
    fn camera_fov(&self, camera: EntityId) -> f32;
    fn set_camera_fov(&mut self, camera: EntityId, fov: f32);
    fn camera_near_plane(&self, camera: EntityId) -> f32;
    fn set_camera_near_plane(&mut self, camera: EntityId, near: f32);
    fn camera_far_plane(&self, camera: EntityId) -> f32;
    fn set_camera_far_plane(&mut self, camera: EntityId, far: f32);

    // renderable
    fn renderable_path(&self, renderable: EntityId) -> String;
    fn set_renderable_path(&mut self, renderable: EntityId, path: &str);
    fn is_renderable_always_visible(&self, renderable: EntityId) -> bool;
    fn set_renderable_always_visible(&mut self, renderable: EntityId, visible: bool);

    // global light
    fn ambient_intensity(&self, light: EntityId) -> f32;
    fn set_ambient_intensity(&mut self, light: EntityId, intensity: f32);
    fn global_light_intensity(&self, light: EntityId) -> f32;
    fn set_global_light_intensity(&mut self, light: EntityId, intensity: f32);
    fn fog_density(&self, light: EntityId) -> f32;
    fn set_fog_density(&mut self, light: EntityId, density: f32);
    fn ambient_color(&self, light: EntityId) -> Vector3<f32>;
    fn set_ambient_color(&mut self, light: EntityId, color: Vector3<f32>);
    fn global_light_color(&self, light: EntityId) -> Vector3<f32>;
    fn set_global_light_color(&mut self, light: EntityId, color: Vector3<f32>);
    fn fog_color(&self, light: EntityId) -> Vector3<f32>;
    fn set_fog_color(&mut self, light: EntityId, color: Vector3<f32>);

    // point light
    fn point_light_intensity(&self, light: EntityId) -> f32;
    fn set_point_light_intensity(&mut self, light: EntityId, intensity: f32);
    fn point_light_color(&self, light: EntityId) -> Vector3<f32>;
    fn set_point_light_color(&mut self, light: EntityId, color: Vector3<f32>);
    fn light_range(&self, light: EntityId) -> f32;
    fn set_light_range(&mut self, light: EntityId, range: f32);
    fn light_fov(&self, light: EntityId) -> f32;
    fn set_light_fov(&mut self, light: EntityId, fov: f32);

    // terrain
    fn terrain_material(&self, terrain: EntityId) -> String;
    fn set_terrain_material(&mut self, terrain: EntityId, path: &str);
    fn terrain_xz_scale(&self, terrain: EntityId) -> f32;
    fn set_terrain_xz_scale(&mut self, terrain: EntityId, scale: f32);
    fn terrain_y_scale(&self, terrain: EntityId) -> f32;
    fn set_terrain_y_scale(&mut self, terrain: EntityId, scale: f32);

    // terrain grass array
    fn grass_count(&self, terrain: EntityId) -> usize;
    fn add_grass(&mut self, terrain: EntityId);
    fn remove_grass(&mut self, terrain: EntityId, index: usize);
    fn grass_path(&self, terrain: EntityId, index: usize) -> String;
    fn set_grass_path(&mut self, terrain: EntityId, index: usize, path: &str);
    fn grass_ground(&self, terrain: EntityId, index: usize) -> i32;
    fn set_grass_ground(&mut self, terrain: EntityId, index: usize, ground: i32);
    fn grass_density(&self, terrain: EntityId, index: usize) -> i32;
    fn set_grass_density(&mut self, terrain: EntityId, index: usize, density: i32);
}
