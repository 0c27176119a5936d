//! Built-in Uniform Binder
//!
//! Maps a closed set of camera/frustum/viewport semantics to shader uniform
//! handles and refreshes their values once per cull visit of the compositor
//! (not per pass). Duplicate bindings of one semantic are allowed — every
//! bound uniform is refreshed.
//!
//! A semantic whose source data is unavailable in the current traversal
//! context is skipped for that uniform without aborting the others; the same
//! holds for a uniform declared with a mismatching value type. The worst
//! outcome of a refresh is a stale uniform, never a failed traversal.

use std::rc::Rc;

use crate::compositor::depth_range::DepthRangePreserver;
use crate::resources::{UniformRef, UniformValue};
use crate::traversal::TraversalContext;

/// The closed set of camera-derived quantities a uniform can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformSemantic {
    /// Eye position in local space.
    EyePosition,
    /// View point (center of interest) in local space.
    ViewPoint,
    /// Normalized look vector.
    LookVector,
    /// Normalized up vector.
    UpVector,
    /// `look x up`.
    LeftVector,
    ViewportX,
    ViewportY,
    ViewportWidth,
    ViewportHeight,
    WindowMatrix,
    InverseWindowMatrix,
    /// Near clip distance; prefers the converged depth range when a report
    /// exists for the current frame.
    FrustumNear,
    /// Far clip distance; same substitution rule as [`FrustumNear`](Self::FrustumNear).
    FrustumFar,
    /// Vertical field of view in radians (perspective projections only).
    FovY,
    AspectRatio,
    ModelViewMatrix,
    InverseModelViewMatrix,
    ProjectionMatrix,
    InverseProjectionMatrix,
}

impl UniformSemantic {
    /// Semantic name (for debugging).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EyePosition => "EyePosition",
            Self::ViewPoint => "ViewPoint",
            Self::LookVector => "LookVector",
            Self::UpVector => "UpVector",
            Self::LeftVector => "LeftVector",
            Self::ViewportX => "ViewportX",
            Self::ViewportY => "ViewportY",
            Self::ViewportWidth => "ViewportWidth",
            Self::ViewportHeight => "ViewportHeight",
            Self::WindowMatrix => "WindowMatrix",
            Self::InverseWindowMatrix => "InverseWindowMatrix",
            Self::FrustumNear => "FrustumNear",
            Self::FrustumFar => "FrustumFar",
            Self::FovY => "FovY",
            Self::AspectRatio => "AspectRatio",
            Self::ModelViewMatrix => "ModelViewMatrix",
            Self::InverseModelViewMatrix => "InverseModelViewMatrix",
            Self::ProjectionMatrix => "ProjectionMatrix",
            Self::InverseProjectionMatrix => "InverseProjectionMatrix",
        }
    }
}

/// Ordered list of `(semantic, uniform)` bindings.
#[derive(Debug, Clone, Default)]
pub struct BuiltinUniformBinder {
    bindings: Vec<(UniformSemantic, UniformRef)>,
}

impl BuiltinUniformBinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a uniform for automatic refresh. One uniform may be bound
    /// more than once, and one semantic may drive several uniforms.
    pub fn add(&mut self, semantic: UniformSemantic, uniform: UniformRef) {
        self.bindings.push((semantic, uniform));
    }

    /// Removes every binding of `semantic`. Returns the number removed.
    pub fn remove_by_semantic(&mut self, semantic: UniformSemantic) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|(s, _)| *s != semantic);
        before - self.bindings.len()
    }

    /// Removes every binding of this exact uniform handle. Returns the
    /// number removed.
    pub fn remove_by_uniform(&mut self, uniform: &UniformRef) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|(_, u)| !Rc::ptr_eq(u, uniform));
        before - self.bindings.len()
    }

    /// Whether this exact uniform handle is registered as a built-in.
    #[must_use]
    pub fn is_builtin(&self, uniform: &UniformRef) -> bool {
        self.bindings.iter().any(|(_, u)| Rc::ptr_eq(u, uniform))
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Refreshes every bound uniform from the traversal context.
    ///
    /// Frustum near/far substitute the converged depth range when
    /// `depth_range` holds a report for the context's frame; otherwise the
    /// raw projection-derived distances are used.
    pub fn apply(&self, ctx: &TraversalContext, depth_range: &DepthRangePreserver) {
        for (semantic, uniform) in &self.bindings {
            let Some(value) = compute(*semantic, ctx, depth_range) else {
                log::debug!(
                    "Built-in uniform '{}' skipped: no {} in traversal context",
                    uniform.borrow().name,
                    semantic.name()
                );
                continue;
            };
            if let Err(err) = uniform.borrow_mut().set(value) {
                log::debug!("Built-in uniform refresh skipped: {err}");
            }
        }
    }
}

/// Computes the value of one semantic, or `None` when the context lacks the
/// source data.
fn compute(
    semantic: UniformSemantic,
    ctx: &TraversalContext,
    depth_range: &DepthRangePreserver,
) -> Option<UniformValue> {
    use UniformSemantic as S;
    use UniformValue as V;

    match semantic {
        S::EyePosition => ctx.eye_local.map(V::Vec3),
        S::ViewPoint => ctx.view_point_local.map(V::Vec3),
        S::LookVector => ctx.look_local.map(V::Vec3),
        S::UpVector => ctx.up_local.map(V::Vec3),
        S::LeftVector => match (ctx.look_local, ctx.up_local) {
            (Some(look), Some(up)) => Some(V::Vec3(look.cross(up))),
            _ => None,
        },

        S::ViewportX => ctx.viewport.map(|vp| V::Float(vp.x)),
        S::ViewportY => ctx.viewport.map(|vp| V::Float(vp.y)),
        S::ViewportWidth => ctx.viewport.map(|vp| V::Float(vp.width)),
        S::ViewportHeight => ctx.viewport.map(|vp| V::Float(vp.height)),

        S::WindowMatrix => ctx.window_matrix().map(V::Mat4),
        S::InverseWindowMatrix => ctx.window_matrix().map(|m| V::Mat4(m.inverse())),

        S::FrustumNear => frustum_range(ctx, depth_range).map(|(near, _)| V::Float(near)),
        S::FrustumFar => frustum_range(ctx, depth_range).map(|(_, far)| V::Float(far)),

        S::FovY => ctx.projection_fov_aspect().map(|(fov, _)| V::Float(fov)),
        S::AspectRatio => ctx.projection_fov_aspect().map(|(_, aspect)| V::Float(aspect)),

        S::ModelViewMatrix => ctx.model_view.map(V::Mat4),
        S::InverseModelViewMatrix => ctx.model_view.map(|m| V::Mat4(m.inverse())),
        S::ProjectionMatrix => ctx.projection.map(V::Mat4),
        S::InverseProjectionMatrix => ctx.projection.map(|m| V::Mat4(m.inverse())),
    }
}

/// Depth range for the current frame: the converged report when one exists,
/// else the raw projection-derived distances.
fn frustum_range(ctx: &TraversalContext, depth_range: &DepthRangePreserver) -> Option<(f32, f32)> {
    depth_range
        .get(ctx.frame_number)
        .or_else(|| ctx.projection_depth_range())
}
