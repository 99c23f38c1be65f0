#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
//! OpenGL rendering backend of the Lustre engine.
//!
//! Owns device state, shader/uniform binding, geometry draw submission and
//! the GPU resource registries. Scene graphs and pipeline scripts sit on
//! top and drive the [`Renderer`](rendering::Renderer) through its
//! primitive surface; resource decoding sits below and fills the
//! [`AssetRegistry`](assets::AssetRegistry).

pub mod assets;
pub mod editor;
pub mod rendering;
pub mod scene;
pub mod utils;

pub use assets::*;
pub use rendering::*;

pub use ::log;
pub use ::nalgebra;
