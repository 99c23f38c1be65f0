//! Device state tracking, binding caches and draw submission.
//!
//! The [`Renderer`] is the one object that talks to the GPU. Pipeline
//! scripts drive it through a small primitive surface (apply a shader
//! combination, set uniforms, bind geometry, submit draws) and the bind
//! caches inside it collapse redundant device transitions across those
//! calls.
//!
//! Device state is a single global resource; the caches exist to serialize
//! and deduplicate mutation of it within the one thread that owns the
//! context, not to coordinate across threads.
//!
//! Assets are addressed by handle (see [`crate::assets`]); the renderer
//! looks them up per call and holds no asset borrow across calls.

pub mod backend;
mod device;
mod error;
mod frame_export;
pub mod gl33;
pub mod renderer;
mod state;
mod uniform;

pub use backend::*;
pub use device::*;
pub use error::*;
pub use frame_export::*;
pub use gl33::GlBackend;
pub use renderer::*;
pub use state::*;
pub use uniform::*;
