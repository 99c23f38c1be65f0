use crate::assets::store::{HandleName, Store, StoreDefaults, StoreType};
use crate::assets::{H, HMaterial, HShader, HTexture};
use crate::store_add_checked;
use crate::utils::crc32_str;
use bon::Builder;
use nalgebra::{Matrix4, Vector3};
use smallvec::SmallVec;

/// A uniform override a material uploads after its shader is applied.
#[derive(Debug, Clone)]
pub struct MaterialUniform {
    pub name: String,
    pub name_hash: u32,
    pub value: MaterialValue,
}

#[derive(Debug, Clone)]
pub enum MaterialValue {
    Int(i32),
    Float(f32),
    Vec3(Vector3<f32>),
    Matrix(Matrix4<f32>),
}

impl MaterialUniform {
    pub fn new(name: impl Into<String>, value: MaterialValue) -> Self {
        let name = name.into();
        let name_hash = crc32_str(&name);
        MaterialUniform {
            name,
            name_hash,
            value,
        }
    }
}

/// Surface description binding a shader combination, texture units and
/// uniform overrides together. Applying a material is what activates a
/// shader for the current pass; see
/// [`Renderer::apply_material`](crate::rendering::Renderer::apply_material).
#[derive(Debug, Clone, Builder)]
pub struct Material {
    #[builder(into)]
    pub name: String,
    pub shader: HShader,
    /// Feature bitmask selecting the shader combination this material wants.
    #[builder(default = 0)]
    pub shader_combination: u32,
    /// `(texture unit, texture)` pairs bound before drawing.
    #[builder(default)]
    pub textures: SmallVec<[(u32, HTexture); 4]>,
    #[builder(default)]
    pub uniforms: Vec<MaterialUniform>,
    #[builder(default = true)]
    pub z_test: bool,
}

impl HMaterial {
    const FALLBACK_ID: u32 = 0;
    const MAX_BUILTIN_ID: u32 = 0;

    pub const FALLBACK: HMaterial = H::new(Self::FALLBACK_ID);
}

impl StoreDefaults for Material {
    fn populate(store: &mut Store<Self>) {
        let fallback = Material {
            name: "Fallback Material".to_string(),
            shader: HShader::DEBUG,
            shader_combination: 0,
            textures: SmallVec::new(),
            uniforms: Vec::new(),
            z_test: true,
        };

        store_add_checked!(store, HMaterial::FALLBACK_ID, fallback);
    }
}

impl StoreType for Material {
    fn name() -> &'static str {
        "Material"
    }

    fn ident_fmt(handle: H<Self>) -> HandleName<Self> {
        match handle.id() {
            HMaterial::FALLBACK_ID => HandleName::Static("Fallback Material"),
            _ => HandleName::Id(handle),
        }
    }

    fn is_builtin(handle: H<Self>) -> bool {
        handle.id() <= HMaterial::MAX_BUILTIN_ID
    }
}
