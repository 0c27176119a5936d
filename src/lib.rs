#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Multi-pass render effect compositor for retained-mode scene-graph
//! renderers.
//!
//! Client code groups named, orderable passes under named techniques; each
//! pass is a render-target node that renders the normal scene, its own
//! attached subgraph, or a fallback full-screen quad. The compositor
//! orchestrates *which* subgraph is visited by which host traversal and
//! *what camera-derived numbers* are exposed to shaders — it never submits
//! GPU work, compiles shaders, or manages resource residency itself.

pub mod camera;
pub mod compositor;
pub mod errors;
pub mod resources;
pub mod traversal;

pub use camera::{
    ClearFlags, ReferenceFrame, RenderOrder, RenderTargetImpl, RenderTargetNode,
    RenderTargetNodeRef,
};
pub use compositor::{
    Compositor, DepthRangePreserver, PassData, PassType, UniformSemantic,
};
pub use errors::{CompositorError, Result};
pub use resources::{
    Geometry, GeometryRef, Renderable, ScreenQuadFactory, Shader, ShaderRef, Texture,
    TextureRef, Uniform, UniformRef, UniformValue,
};
pub use traversal::{SceneWalker, TraversalContext, Viewport, VisitorKind};
