//! Per-Pass Traversal Dispatch
//!
//! The traversal-time state machine: for each visit of a pass node, decide
//! what the host should traverse and in which reference frame, then perform
//! the forward pass's depth-range read-back. The decision is a pure function
//! of `(visitor kind, pass type, has own children)`; the only cross-frame
//! state is the epoch-scoped side effect on
//! [`DepthRangePreserver`](crate::compositor::DepthRangePreserver).
//!
//! # Decision table
//!
//! | Visitor        | Pass type   | Children | Decision       |
//! |----------------|-------------|----------|----------------|
//! | Cull           | Forward     | any      | main scene     |
//! | Cull           | non-Forward | yes      | own children   |
//! | Cull           | non-Forward | no       | fallback quad  |
//! | Update / Event | any         | any      | default        |
//! | other          | any         | any      | default        |

use crate::compositor::depth_range::DepthRangePreserver;
use crate::compositor::pass::{PassData, PassType};
use crate::resources::ScreenQuadFactory;
use crate::traversal::{SceneWalker, TraversalContext, VisitorKind};

/// What a pass visit traverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDecision {
    /// The main scene graph, as the node's default group traversal.
    MainScene,
    /// Only the pass node's own child subgraph.
    OwnChildren,
    /// The lazily created fallback full-screen quad.
    FallbackQuad,
    /// Ordinary, unsubstituted traversal.
    Default,
}

/// The decision table, keyed on `(visitor kind, pass type, has children)`.
///
/// Unknown visitor kinds fall through to the default traversal; that is the
/// defensive baseline, not an error.
#[must_use]
pub fn decide(visitor: VisitorKind, pass: PassType, has_children: bool) -> TraversalDecision {
    match (visitor, pass) {
        (VisitorKind::Cull, PassType::Forward) => TraversalDecision::MainScene,
        (VisitorKind::Cull, _) if has_children => TraversalDecision::OwnChildren,
        (VisitorKind::Cull, _) => TraversalDecision::FallbackQuad,
        _ => TraversalDecision::Default,
    }
}

/// Runs one pass visit: applies the decision table, and for a culled
/// forward pass reads the computed clip distances back out of the context,
/// clamps the projection to them, and reports them for depth-range
/// convergence.
pub(crate) fn run_pass(
    pass: &PassData,
    quads: &ScreenQuadFactory,
    depth_range: &mut DepthRangePreserver,
    ctx: &mut TraversalContext,
    walker: &mut dyn SceneWalker,
) {
    let has_children = pass.node.borrow().has_children();
    match decide(ctx.kind, pass.kind, has_children) {
        TraversalDecision::MainScene => {
            walker.traverse_scene(ctx);
            // Only a full scene traversal can compute the true visible
            // depth range; a host that did not fill it in reports nothing.
            if let (Some(near), Some(far)) = (ctx.computed_near, ctx.computed_far) {
                ctx.clamp_projection(near, far);
                depth_range.update(ctx.frame_number, near, far);
            }
        }
        TraversalDecision::OwnChildren => walker.traverse_children(&pass.node, ctx),
        TraversalDecision::FallbackQuad => {
            let quad = quads.shared_quad();
            walker.traverse_geometry(&quad, ctx);
        }
        TraversalDecision::Default => walker.traverse_default(&pass.node, ctx),
    }
}
