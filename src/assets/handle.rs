use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::assets::{BitmapFont, Material, Model, Pipeline, Shader, Texture};

/// A typed index into a [`Store`](crate::assets::Store).
///
/// Handles are plain `u32` ids; they stay valid for identity comparison even
/// after the asset they point at is removed, in which case lookups simply
/// fail. Built-in assets occupy fixed low ids.
pub struct H<T> {
    id: u32,
    _marker: PhantomData<fn() -> T>,
}

pub type HTexture = H<Texture>;
pub type HMaterial = H<Material>;
pub type HShader = H<Shader>;
pub type HModel = H<Model>;
pub type HFont = H<BitmapFont>;
pub type HPipeline = H<Pipeline>;

impl<T> H<T> {
    pub const fn new(id: u32) -> Self {
        H {
            id,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.id
    }
}

// manual impls so `T` needs no bounds
impl<T> Copy for H<T> {}

impl<T> Clone for H<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for H<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for H<T> {}

impl<T> Hash for H<T> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.id.hash(state);
    }
}

impl<T> Debug for H<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "H#{}", self.id)
    }
}

impl<T> Display for H<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
