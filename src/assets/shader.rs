use crate::assets::store::{HandleName, Store, StoreDefaults, StoreType};
use crate::assets::{H, HShader};
use crate::rendering::{MAX_VERTEX_ATTRIBUTES, ProgramId};
use crate::store_add_checked;
use bon::Builder;
use log::warn;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Well-known uniform slots every shader combination is expected to declare.
///
/// These are set once per frame or per draw, so they resolve through a fixed
/// table instead of the name-hash map.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(usize)]
pub enum FixedUniform {
    ViewMatrix = 0,
    ProjectionMatrix = 1,
    WorldMatrix = 2,
}

impl FixedUniform {
    pub const COUNT: usize = 3;

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One compiled variant of a shader, selected by a feature bitmask and the
/// render pass it was compiled for. The shader compiler (outside this crate)
/// resolves uniform and attribute locations and registers the result here.
#[derive(Debug, Clone, Builder)]
pub struct ShaderCombination {
    pub pass: u32,
    pub mask: u32,
    pub program: ProgramId,
    /// `crc32(name) -> location`; negative locations mean the uniform was
    /// compiled out of this variant.
    #[builder(default)]
    pub uniform_locations: HashMap<u32, i32>,
    #[builder(default = [-1; FixedUniform::COUNT])]
    pub fixed_locations: [i32; FixedUniform::COUNT],
    #[builder(default)]
    pub attribute_locations: SmallVec<[i32; MAX_VERTEX_ATTRIBUTES]>,
}

#[derive(Debug, Clone)]
pub struct Shader {
    pub name: String,
    combinations: Vec<ShaderCombination>,
    current: Option<usize>,
    ready: bool,
}

impl Shader {
    pub fn new(name: impl Into<String>) -> Self {
        Shader {
            name: name.into(),
            combinations: Vec::new(),
            current: None,
            ready: false,
        }
    }

    /// Registers a compiled variant. Called by the shader compiler once per
    /// (mask, pass) pair; the first registered variant marks the shader
    /// ready and becomes current until a pipeline selects another.
    pub fn add_combination(&mut self, combination: ShaderCombination) {
        self.combinations.push(combination);
        if self.current.is_none() {
            self.current = Some(self.combinations.len() - 1);
        }
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Selects the variant compiled for `(mask, pass)`. A miss leaves the
    /// shader without a current program, which downstream calls treat as
    /// not-ready.
    pub fn set_current_combination(&mut self, mask: u32, pass: u32) {
        self.current = self
            .combinations
            .iter()
            .position(|c| c.mask == mask && c.pass == pass);
        if self.current.is_none() {
            warn!(
                "Shader \"{}\" has no combination {:#x} for pass {:#010x}",
                self.name, mask, pass
            );
        }
    }

    pub fn current_combination(&self) -> Option<&ShaderCombination> {
        self.current.and_then(|i| self.combinations.get(i))
    }

    pub fn program_id(&self) -> Option<ProgramId> {
        self.current_combination().map(|c| c.program)
    }

    /// GPU location of a named uniform in the current combination, or `None`
    /// when the uniform is absent from the variant.
    pub fn uniform_location(&self, name_hash: u32) -> Option<i32> {
        let loc = *self
            .current_combination()?
            .uniform_locations
            .get(&name_hash)?;
        (loc >= 0).then_some(loc)
    }

    pub fn fixed_uniform_location(&self, role: FixedUniform) -> Option<i32> {
        let loc = self.current_combination()?.fixed_locations[role.index()];
        (loc >= 0).then_some(loc)
    }

    /// Attribute locations of the current combination, indexed by attribute
    /// slot. Negative entries are attributes the variant does not use.
    pub fn attribute_locations(&self) -> &[i32] {
        self.current_combination()
            .map(|c| c.attribute_locations.as_slice())
            .unwrap_or(&[])
    }
}

impl HShader {
    const DEBUG_ID: u32 = 0;
    const MAX_BUILTIN_ID: u32 = 0;

    /// Line/overlay shader used by debug drawing. Its combinations are
    /// compiled during [`Renderer::create`](crate::rendering::Renderer::create).
    pub const DEBUG: HShader = H::new(Self::DEBUG_ID);
}

impl StoreDefaults for Shader {
    fn populate(store: &mut Store<Self>) {
        let debug = Shader::new("debug");

        store_add_checked!(store, HShader::DEBUG_ID, debug);
    }
}

impl StoreType for Shader {
    fn name() -> &'static str {
        "Shader"
    }

    fn ident_fmt(handle: H<Self>) -> HandleName<Self> {
        match handle.id() {
            HShader::DEBUG_ID => HandleName::Static("Debug Shader"),
            _ => HandleName::Id(handle),
        }
    }

    fn is_builtin(handle: H<Self>) -> bool {
        handle.id() <= HShader::MAX_BUILTIN_ID
    }
}
