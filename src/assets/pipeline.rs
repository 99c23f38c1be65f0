use crate::assets::store::{HandleName, StoreType};
use crate::assets::H;
use bon::Builder;

/// A render-pipeline script resource. The script itself is compiled and
/// executed by the pipeline layer; the renderer only tracks it as a resource
/// kind so pipelines share the registry lifecycle of every other asset.
#[derive(Debug, Clone, Builder)]
pub struct Pipeline {
    #[builder(into)]
    pub name: String,
    #[builder(into, default)]
    pub source: String,
}

impl Pipeline {
    pub fn is_ready(&self) -> bool {
        !self.source.is_empty()
    }
}

impl StoreType for Pipeline {
    fn name() -> &'static str {
        "Pipeline"
    }

    fn ident_fmt(handle: H<Self>) -> HandleName<Self> {
        HandleName::Id(handle)
    }

    fn is_builtin(_handle: H<Self>) -> bool {
        false
    }
}
