use crate::assets::store::{HandleName, StoreType};
use crate::assets::{H, HTexture};
use bon::Builder;

/// One glyph's placement inside a bitmap font atlas, in normalized UVs.
#[derive(Debug, Copy, Clone)]
pub struct Glyph {
    pub codepoint: char,
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
    pub advance: f32,
}

/// A pre-rasterized font atlas plus per-glyph metrics. Parsing the font
/// definition file happens outside this crate.
#[derive(Debug, Clone, Builder)]
pub struct BitmapFont {
    #[builder(into)]
    pub name: String,
    pub texture: HTexture,
    #[builder(default = 0.0)]
    pub line_height: f32,
    #[builder(default)]
    pub glyphs: Vec<Glyph>,
}

impl BitmapFont {
    pub fn is_ready(&self) -> bool {
        !self.glyphs.is_empty()
    }

    pub fn glyph(&self, codepoint: char) -> Option<&Glyph> {
        self.glyphs.iter().find(|g| g.codepoint == codepoint)
    }
}

impl StoreType for BitmapFont {
    fn name() -> &'static str {
        "Bitmap Font"
    }

    fn ident_fmt(handle: H<Self>) -> HandleName<Self> {
        HandleName::Id(handle)
    }

    fn is_builtin(_handle: H<Self>) -> bool {
        false
    }
}
