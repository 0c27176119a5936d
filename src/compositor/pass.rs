//! Pass Types & Construction Policy
//!
//! A pass is one named, typed, activatable render-target node inside a
//! technique's ordered list. The pass type fixes how its node is configured
//! at creation time and how the cull-time dispatch treats it afterwards
//! (see [`dispatch`](crate::compositor::dispatch)).

use std::rc::Rc;

use glam::Mat4;

use crate::camera::{
    ClearFlags, ReferenceFrame, RenderOrder, RenderTargetImpl, RenderTargetNode,
    RenderTargetNodeRef,
};
use crate::resources::{Renderable, ScreenQuadFactory};
use crate::traversal::Viewport;

/// The kind of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassType {
    /// Renders the ordinary navigable scene. The sole source of the true
    /// visible near/far depth range for a frame.
    Forward,
    /// Fixed to an absolute unit-square orthographic frame; renders a
    /// full-screen quad child by default.
    Deferred,
    /// Fully caller-configured; no implicit children or frame policy.
    Custom,
}

impl PassType {
    /// Type name (for debugging).
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Forward => "Forward",
            Self::Deferred => "Deferred",
            Self::Custom => "Custom",
        }
    }
}

/// One entry in a technique's pass list.
///
/// `name` is treated as a key by callers but uniqueness is not enforced;
/// lookups take the first match in list order.
#[derive(Debug, Clone)]
pub struct PassData {
    pub name: String,
    pub kind: PassType,
    pub activated: bool,
    pub node: RenderTargetNodeRef,
}

/// Compositor-wide render-target configuration, applied to passes at
/// creation time. Changing it affects subsequently created passes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTargetSettings {
    /// Viewport size given to new pass nodes.
    pub size: (u32, u32),
    /// Backing implementation for every created render target.
    pub target_impl: RenderTargetImpl,
}

impl Default for RenderTargetSettings {
    fn default() -> Self {
        Self { size: (1024, 1024), target_impl: RenderTargetImpl::FrameBufferObject }
    }
}

impl PassData {
    /// Creates a pass and its render-target node per the construction
    /// policy for `kind`.
    ///
    /// - `Forward`: relative reference frame, no children, identity
    ///   matrices — the node follows ordinary scene navigation.
    /// - `Deferred`: absolute reference frame, orthographic unit-square
    ///   projection, identity view, and one fresh unit quad child.
    /// - `Custom`: a bare node for the caller to configure.
    ///
    /// All types: pre-scene render order, color+depth clear, target
    /// implementation and viewport from `settings`.
    #[must_use]
    pub fn create(
        kind: PassType,
        name: impl Into<String>,
        settings: &RenderTargetSettings,
        quads: &ScreenQuadFactory,
    ) -> Self {
        let name = name.into();
        let mut node = RenderTargetNode::new(name.clone());
        node.render_order = RenderOrder::PreScene;
        node.clear_flags = ClearFlags::COLOR | ClearFlags::DEPTH;
        node.target_impl = settings.target_impl;
        node.viewport = Some(Viewport::new(
            0.0,
            0.0,
            settings.size.0 as f32,
            settings.size.1 as f32,
        ));

        match kind {
            PassType::Forward | PassType::Custom => {
                node.reference_frame = ReferenceFrame::Relative;
            }
            PassType::Deferred => {
                node.reference_frame = ReferenceFrame::Absolute;
                node.projection = Mat4::orthographic_rh(0.0, 1.0, 0.0, 1.0, -1.0, 1.0);
                node.view = Mat4::IDENTITY;
                // 1x1 with unit texture coordinates; infallible for these
                // dimensions.
                if let Ok(quad) = quads.create_quad(1.0, 1.0, 1.0) {
                    let quad: Rc<dyn Renderable> = quad;
                    node.add_child(quad);
                }
            }
        }

        Self { name, kind, activated: true, node: node.into_ref() }
    }
}
