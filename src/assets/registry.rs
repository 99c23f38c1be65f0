use crate::assets::{BitmapFont, Material, Model, Pipeline, Shader, Store, Texture};
use log::trace;
use std::sync::Arc;

/// Stable identifiers the resource kinds are registered under. Engine
/// subsystems refer to managers by these, never by store type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum AssetKind {
    Texture = 0,
    Model = 1,
    Material = 2,
    Shader = 3,
    Pipeline = 4,
    Font = 5,
}

impl AssetKind {
    pub const fn name(self) -> &'static str {
        match self {
            AssetKind::Texture => "texture",
            AssetKind::Model => "model",
            AssetKind::Material => "material",
            AssetKind::Shader => "shader",
            AssetKind::Pipeline => "pipeline",
            AssetKind::Font => "font",
        }
    }
}

/// Owns one store per resource kind, registered in a fixed creation order
/// and torn down in reverse. The stores are `Arc`ed so pipeline and loader
/// code can hold references across frames without borrowing the renderer.
pub struct AssetRegistry {
    pub textures: Arc<Store<Texture>>,
    pub models: Arc<Store<Model>>,
    pub materials: Arc<Store<Material>>,
    pub shaders: Arc<Store<Shader>>,
    pub pipelines: Arc<Store<Pipeline>>,
    pub fonts: Arc<Store<BitmapFont>>,
    registered: Vec<AssetKind>,
}

impl AssetRegistry {
    pub fn new() -> Arc<AssetRegistry> {
        let registered = vec![
            AssetKind::Texture,
            AssetKind::Model,
            AssetKind::Material,
            AssetKind::Shader,
            AssetKind::Pipeline,
            AssetKind::Font,
        ];
        for kind in &registered {
            trace!("[Asset Registry] Registered {} manager", kind.name());
        }

        Arc::new(AssetRegistry {
            textures: Arc::new(Store::populated()),
            models: Arc::new(Store::empty()),
            materials: Arc::new(Store::populated()),
            shaders: Arc::new(Store::populated()),
            pipelines: Arc::new(Store::empty()),
            fonts: Arc::new(Store::empty()),
            registered,
        })
    }

    /// Registration order; teardown runs through this reversed.
    pub fn registered_kinds(&self) -> &[AssetKind] {
        &self.registered
    }

    fn clear_kind(&self, kind: AssetKind) {
        match kind {
            AssetKind::Texture => self.textures.clear(),
            AssetKind::Model => self.models.clear(),
            AssetKind::Material => self.materials.clear(),
            AssetKind::Shader => self.shaders.clear(),
            AssetKind::Pipeline => self.pipelines.clear(),
            AssetKind::Font => self.fonts.clear(),
        }
    }
}

impl Drop for AssetRegistry {
    fn drop(&mut self) {
        for kind in self.registered.iter().rev() {
            self.clear_kind(*kind);
            trace!("[Asset Registry] Unregistered {} manager", kind.name());
        }
    }
}
