use crate::assets::store::{HandleName, Store, StoreDefaults, StoreType};
use crate::assets::{H, HTexture};
use crate::rendering::TextureId;
use crate::store_add_checked;
use bon::Builder;

/// A 2D texture as the renderer sees it: dimensions plus the GPU-side id the
/// decoding layer uploaded it under. Decoding and upload happen outside this
/// crate; until they finish the texture is not ready and draws that need it
/// are skipped.
#[derive(Debug, Clone, Builder)]
pub struct Texture {
    #[builder(into)]
    pub name: String,
    #[builder(default = 0)]
    pub width: u32,
    #[builder(default = 0)]
    pub height: u32,
    pub gpu_id: Option<TextureId>,
}

impl Texture {
    pub fn is_ready(&self) -> bool {
        self.gpu_id.is_some()
    }
}

impl HTexture {
    const FALLBACK_ID: u32 = 0;
    const MAX_BUILTIN_ID: u32 = 0;

    /// Bound in place of textures that are still loading.
    pub const FALLBACK: HTexture = H::new(Self::FALLBACK_ID);
}

impl StoreDefaults for Texture {
    fn populate(store: &mut Store<Self>) {
        let fallback = Texture {
            name: "Fallback Texture".to_string(),
            width: 1,
            height: 1,
            gpu_id: None,
        };

        store_add_checked!(store, HTexture::FALLBACK_ID, fallback);
    }
}

impl StoreType for Texture {
    fn name() -> &'static str {
        "Texture"
    }

    fn ident_fmt(handle: H<Self>) -> HandleName<Self> {
        match handle.id() {
            HTexture::FALLBACK_ID => HandleName::Static("Fallback Texture"),
            _ => HandleName::Id(handle),
        }
    }

    fn is_builtin(handle: H<Self>) -> bool {
        handle.id() <= HTexture::MAX_BUILTIN_ID
    }
}
