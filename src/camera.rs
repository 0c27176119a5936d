//! Render-Target Node
//!
//! [`RenderTargetNode`] is the compositor's "camera-equivalent": a node that
//! owns a render target, a reference frame, and an ordinary child list. The
//! host scene-graph engine treats it as any other group node; the compositor
//! configures it once at pass creation time (see
//! [`PassType`](crate::compositor::PassType) construction policy) and the
//! caller may mutate it freely afterwards.

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use bitflags::bitflags;
use glam::Mat4;

use crate::resources::Renderable;
use crate::traversal::Viewport;

bitflags! {
    /// Buffers cleared before the pass renders.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ClearFlags: u32 {
        const COLOR   = 1 << 0;
        const DEPTH   = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Reference frame of the node's view and projection matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceFrame {
    /// Inherits the parent's frame; follows ordinary scene navigation and
    /// camera manipulation.
    Relative,
    /// Ignores the inherited frame entirely.
    Absolute,
}

/// Where the pass executes relative to the main draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderOrder {
    /// Before the node's own position in the main draw order. All
    /// compositor passes use this.
    PreScene,
    /// At the node's position in the main draw order.
    InScene,
    /// After the main draw order.
    PostScene,
}

/// Backing implementation of the node's render target.
///
/// One compositor-wide setting, applied uniformly to every created pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderTargetImpl {
    /// Offscreen framebuffer object (the default).
    #[default]
    FrameBufferObject,
    /// Offscreen pixel buffer.
    PixelBuffer,
    /// The window's own framebuffer.
    FrameBuffer,
}

/// Shared handle to a render-target node.
///
/// Single-threaded cooperative model: traversal and mutation never overlap,
/// so interior mutability through `RefCell` is sufficient.
pub type RenderTargetNodeRef = Rc<RefCell<RenderTargetNode>>;

/// A render-target node owned by one pass.
#[derive(Debug, Clone)]
pub struct RenderTargetNode {
    pub name: Cow<'static, str>,
    pub reference_frame: ReferenceFrame,
    pub render_order: RenderOrder,
    pub clear_flags: ClearFlags,
    pub target_impl: RenderTargetImpl,

    /// Window-space viewport; sized from the compositor's render-target
    /// settings at creation time.
    pub viewport: Option<Viewport>,

    pub projection: Mat4,
    pub view: Mat4,

    children: Vec<Rc<dyn Renderable>>,
}

impl RenderTargetNode {
    /// Creates a bare node with a relative frame and no children.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            reference_frame: ReferenceFrame::Relative,
            render_order: RenderOrder::PreScene,
            clear_flags: ClearFlags::COLOR | ClearFlags::DEPTH,
            target_impl: RenderTargetImpl::default(),
            viewport: None,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            children: Vec::new(),
        }
    }

    /// Wraps the node in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> RenderTargetNodeRef {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[Rc<dyn Renderable>] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Appends a child to the node's subgraph.
    #[inline]
    pub fn add_child(&mut self, child: Rc<dyn Renderable>) {
        self.children.push(child);
    }

    /// Removes a child by identity. Returns `false` if it was not attached.
    pub fn remove_child(&mut self, child: &Rc<dyn Renderable>) -> bool {
        if let Some(pos) = self.children.iter().position(|c| Rc::ptr_eq(c, child)) {
            self.children.remove(pos);
            true
        } else {
            false
        }
    }

    /// Drops all children.
    #[inline]
    pub fn clear_children(&mut self) {
        self.children.clear();
    }
}
