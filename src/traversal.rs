//! Host Traversal Boundary
//!
//! The compositor never walks a scene graph itself; it decides *what* the
//! host engine should traverse and in which reference frame. This module
//! defines that boundary:
//!
//! - [`VisitorKind`] — which visitor is currently running
//! - [`TraversalContext`] — the per-visit data the host exposes to the
//!   compositor (frame number, and during cull: matrices, viewport, camera
//!   vectors, computed clip distances)
//! - [`SceneWalker`] — the callback surface through which the compositor
//!   hands traversal back to the host
//!
//! All matrix conventions follow the renderer: right-handed, 0..1 clip
//! depth, as produced by [`glam::Mat4::perspective_rh`] and
//! [`glam::Mat4::orthographic_rh`].

use glam::{Mat4, Vec3};

use crate::camera::RenderTargetNodeRef;
use crate::resources::GeometryRef;

// ---------------------------------------------------------------------------
// VisitorKind
// ---------------------------------------------------------------------------

/// The kind of visitor currently traversing the graph.
///
/// Only [`Cull`](Self::Cull) carries camera-derived data; the other kinds
/// fall through to the host's default traversal unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitorKind {
    /// Visibility / draw-order determination. The only visitor for which
    /// the compositor substitutes traversal content and refreshes uniforms.
    Cull,
    /// Time-based update traversal.
    Update,
    /// Input / event delivery traversal.
    Event,
    /// Any other visitor the host engine defines.
    Other,
}

impl VisitorKind {
    /// Visitor name (for debugging).
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cull => "Cull",
            Self::Update => "Update",
            Self::Event => "Event",
            Self::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// A window-space viewport rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// NDC-to-window transform for this viewport.
    ///
    /// Maps x/y from [-1, 1] to the viewport rectangle; depth passes through
    /// unchanged (clip depth is already 0..1).
    #[must_use]
    pub fn window_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(self.x, self.y, 0.0))
            * Mat4::from_scale(Vec3::new(self.width * 0.5, self.height * 0.5, 1.0))
            * Mat4::from_translation(Vec3::new(1.0, 1.0, 0.0))
    }
}

// ---------------------------------------------------------------------------
// TraversalContext
// ---------------------------------------------------------------------------

/// Per-visit data exposed by the host engine.
///
/// Everything beyond `kind` and `frame_number` is optional: update and event
/// visitors carry none of it, and even a cull visitor may legitimately lack
/// a viewport or projection (e.g. while a window is being created). Missing
/// data degrades individual built-in uniform refreshes, never the traversal.
#[derive(Debug, Clone)]
pub struct TraversalContext {
    pub kind: VisitorKind,
    pub frame_number: u32,

    // === Cull-only data ===
    /// Near clip distance computed by the host's scene traversal.
    pub computed_near: Option<f32>,
    /// Far clip distance computed by the host's scene traversal.
    pub computed_far: Option<f32>,
    /// Current projection matrix.
    pub projection: Option<Mat4>,
    /// Current model-view matrix.
    pub model_view: Option<Mat4>,
    /// Current viewport rectangle.
    pub viewport: Option<Viewport>,
    /// Explicit window matrix; when absent it is derived from the viewport.
    pub window_matrix: Option<Mat4>,

    // === Camera vectors, local space ===
    pub eye_local: Option<Vec3>,
    pub view_point_local: Option<Vec3>,
    pub look_local: Option<Vec3>,
    pub up_local: Option<Vec3>,
}

impl TraversalContext {
    /// Creates a context with no cull data attached.
    #[must_use]
    pub fn new(kind: VisitorKind, frame_number: u32) -> Self {
        Self {
            kind,
            frame_number,
            computed_near: None,
            computed_far: None,
            projection: None,
            model_view: None,
            viewport: None,
            window_matrix: None,
            eye_local: None,
            view_point_local: None,
            look_local: None,
            up_local: None,
        }
    }

    /// Returns the window matrix: the explicit one when provided, else one
    /// derived from the viewport.
    #[must_use]
    pub fn window_matrix(&self) -> Option<Mat4> {
        self.window_matrix.or_else(|| self.viewport.map(|vp| vp.window_matrix()))
    }

    /// Extracts `(near, far)` from the current projection matrix.
    ///
    /// Handles both perspective and orthographic projections; returns `None`
    /// when no projection is set or the matrix is degenerate.
    #[must_use]
    pub fn projection_depth_range(&self) -> Option<(f32, f32)> {
        let m = self.projection?;
        if m.z_axis.z.abs() < f32::EPSILON {
            return None;
        }
        let near = m.w_axis.z / m.z_axis.z;
        let far = if m.w_axis.w == 0.0 {
            // Perspective: z.z = f / (n - f), w.z = n * f / (n - f)
            m.w_axis.z / (m.z_axis.z + 1.0)
        } else {
            // Orthographic: z.z = 1 / (n - f)
            near - 1.0 / m.z_axis.z
        };
        Some((near, far))
    }

    /// Extracts `(fov_y_radians, aspect_ratio)` from a perspective
    /// projection. Returns `None` for orthographic projections.
    #[must_use]
    pub fn projection_fov_aspect(&self) -> Option<(f32, f32)> {
        let m = self.projection?;
        if m.w_axis.w != 0.0 || m.x_axis.x.abs() < f32::EPSILON || m.y_axis.y.abs() < f32::EPSILON
        {
            return None;
        }
        let fov_y = 2.0 * (1.0 / m.y_axis.y).atan();
        let aspect = m.y_axis.y / m.x_axis.x;
        Some((fov_y, aspect))
    }

    /// Clamps the projection matrix to the given clip distances.
    ///
    /// The projection is rebuilt with the new near/far while preserving its
    /// other parameters: field of view and aspect ratio for perspective,
    /// the l/r/b/t extents for orthographic. A context without a projection
    /// is left untouched.
    ///
    /// Returns `true` when the projection was updated.
    pub fn clamp_projection(&mut self, near: f32, far: f32) -> bool {
        let Some(m) = self.projection else {
            return false;
        };
        if near <= 0.0 && m.w_axis.w == 0.0 {
            // A perspective projection cannot host a non-positive near plane.
            return false;
        }
        if near >= far {
            return false;
        }

        let clamped = if m.w_axis.w == 0.0 {
            let Some((fov_y, aspect)) = self.projection_fov_aspect() else {
                return false;
            };
            Mat4::perspective_rh(fov_y, aspect, near, far)
        } else {
            if m.x_axis.x.abs() < f32::EPSILON || m.y_axis.y.abs() < f32::EPSILON {
                return false;
            }
            let width = 2.0 / m.x_axis.x;
            let height = 2.0 / m.y_axis.y;
            let center_x = -m.w_axis.x * width * 0.5;
            let center_y = -m.w_axis.y * height * 0.5;
            Mat4::orthographic_rh(
                center_x - width * 0.5,
                center_x + width * 0.5,
                center_y - height * 0.5,
                center_y + height * 0.5,
                near,
                far,
            )
        };

        self.projection = Some(clamped);
        true
    }
}

// ---------------------------------------------------------------------------
// SceneWalker
// ---------------------------------------------------------------------------

/// The traversal callback surface implemented by the host engine.
///
/// The compositor's per-pass dispatch calls exactly one of these methods per
/// visit; the host performs the actual graph walk (and, during cull, writes
/// the computed near/far clip distances back into the context).
pub trait SceneWalker {
    /// Traverse the main scene graph as the node's default group traversal.
    fn traverse_scene(&mut self, ctx: &mut TraversalContext);

    /// Traverse only the pass node's own child list.
    fn traverse_children(&mut self, node: &RenderTargetNodeRef, ctx: &mut TraversalContext);

    /// Traverse a single quad geometry in place of any scene content.
    fn traverse_geometry(&mut self, geometry: &GeometryRef, ctx: &mut TraversalContext);

    /// Ordinary, unsubstituted traversal of the node.
    fn traverse_default(&mut self, node: &RenderTargetNodeRef, ctx: &mut TraversalContext);
}
