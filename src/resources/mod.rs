//! Named Resources
//!
//! Lightweight handles for the resources the compositor maps by name:
//! textures, shaders, and uniforms, plus the quad geometry built by
//! [`ScreenQuadFactory`]. The compositor never loads, compiles, or uploads
//! any of these; it only hands them to passes and shaders by name. Identity
//! (for "is this uniform a built-in" style queries) is `Rc` pointer
//! identity.

pub mod quad;
pub mod uniform;

pub use quad::{Geometry, GeometryRef, PrimitiveMode, ScreenQuadFactory, StateOverrides};
pub use uniform::{Uniform, UniformRef, UniformValue};

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use uuid::Uuid;

/// Anything a render-target node can hold as traversable child content.
///
/// The compositor's quad geometry implements this; host engines attach
/// their own subgraph wrappers for custom passes.
pub trait Renderable: std::fmt::Debug {
    /// Human-readable label (for debugging and GPU markers).
    fn label(&self) -> &str;
}

/// Shared handle to a named texture.
pub type TextureRef = Rc<RefCell<Texture>>;

/// A named texture reference.
///
/// Creation, upload, and residency belong to the host renderer; the
/// compositor only routes these between passes by name.
#[derive(Debug, Clone)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, width: u32, height: u32) -> Self {
        Self { uuid: Uuid::new_v4(), name: name.into(), width, height }
    }

    /// Wraps the texture in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> TextureRef {
        Rc::new(RefCell::new(self))
    }
}

/// Shared handle to a named shader.
pub type ShaderRef = Rc<RefCell<Shader>>;

/// A named shader reference. Compilation and linking are host concerns.
#[derive(Debug, Clone)]
pub struct Shader {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,
    pub source: Cow<'static, str>,
}

impl Shader {
    #[must_use]
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        source: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self { uuid: Uuid::new_v4(), name: name.into(), source: source.into() }
    }

    /// Wraps the shader in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> ShaderRef {
        Rc::new(RefCell::new(self))
    }
}
