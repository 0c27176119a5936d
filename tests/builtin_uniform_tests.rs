//! Built-in Uniform Binder Integration Tests
//!
//! Tests for:
//! - Camera vector semantics (eye, look, up, left = look x up)
//! - Viewport and window-matrix semantics
//! - Frustum near/far with depth-range substitution
//! - Refresh scheduling: once per cull, never on update
//! - Degraded refresh: missing context data / type mismatches skip only the
//!   affected uniform
//! - Binding registration, duplicates, and removal by semantic or identity

use glam::{Mat4, Vec3};
use prism::{
    Compositor, GeometryRef, PassType, RenderTargetNodeRef, SceneWalker, TraversalContext,
    Uniform, UniformSemantic, UniformValue, Viewport, VisitorKind,
};

/// Walker that ignores every traversal request.
struct NullWalker;

impl SceneWalker for NullWalker {
    fn traverse_scene(&mut self, _: &mut TraversalContext) {}
    fn traverse_children(&mut self, _: &RenderTargetNodeRef, _: &mut TraversalContext) {}
    fn traverse_geometry(&mut self, _: &GeometryRef, _: &mut TraversalContext) {}
    fn traverse_default(&mut self, _: &RenderTargetNodeRef, _: &mut TraversalContext) {}
}

fn full_cull_context(frame: u32) -> TraversalContext {
    let mut ctx = TraversalContext::new(VisitorKind::Cull, frame);
    ctx.projection = Some(Mat4::perspective_rh(0.9, 1.6, 0.25, 400.0));
    ctx.model_view = Some(Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0)));
    ctx.viewport = Some(Viewport::new(10.0, 20.0, 640.0, 480.0));
    ctx.eye_local = Some(Vec3::new(1.0, 2.0, 3.0));
    ctx.view_point_local = Some(Vec3::new(0.0, 0.0, 0.0));
    ctx.look_local = Some(Vec3::NEG_Z);
    ctx.up_local = Some(Vec3::Y);
    ctx
}

// ============================================================================
// Camera vectors
// ============================================================================

#[test]
fn camera_vector_semantics_refresh_on_cull() {
    let mut compositor = Compositor::new();
    let eye = Uniform::new_ref("u_eye", UniformValue::Vec3(Vec3::ZERO));
    let look = Uniform::new_ref("u_look", UniformValue::Vec3(Vec3::ZERO));
    let left = Uniform::new_ref("u_left", UniformValue::Vec3(Vec3::ZERO));
    compositor.add_builtin_uniform(UniformSemantic::EyePosition, eye.clone());
    compositor.add_builtin_uniform(UniformSemantic::LookVector, look.clone());
    compositor.add_builtin_uniform(UniformSemantic::LeftVector, left.clone());

    compositor.traverse(&mut full_cull_context(1), &mut NullWalker);

    assert_eq!(eye.borrow().as_vec3(), Some(Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(look.borrow().as_vec3(), Some(Vec3::NEG_Z));
    // left = look x up = (-Z) x Y = X
    assert_eq!(left.borrow().as_vec3(), Some(Vec3::X));
}

// ============================================================================
// Viewport & window matrix
// ============================================================================

#[test]
fn viewport_semantics_expose_rectangle_components() {
    let mut compositor = Compositor::new();
    let x = Uniform::new_ref("u_vx", UniformValue::Float(0.0));
    let w = Uniform::new_ref("u_vw", UniformValue::Float(0.0));
    compositor.add_builtin_uniform(UniformSemantic::ViewportX, x.clone());
    compositor.add_builtin_uniform(UniformSemantic::ViewportWidth, w.clone());

    compositor.traverse(&mut full_cull_context(1), &mut NullWalker);

    assert_eq!(x.borrow().as_float(), Some(10.0));
    assert_eq!(w.borrow().as_float(), Some(640.0));
}

#[test]
fn window_matrix_and_inverse_are_consistent() {
    let mut compositor = Compositor::new();
    let wm = Uniform::new_ref("u_window", UniformValue::Mat4(Mat4::IDENTITY));
    let inv = Uniform::new_ref("u_window_inv", UniformValue::Mat4(Mat4::IDENTITY));
    compositor.add_builtin_uniform(UniformSemantic::WindowMatrix, wm.clone());
    compositor.add_builtin_uniform(UniformSemantic::InverseWindowMatrix, inv.clone());

    compositor.traverse(&mut full_cull_context(1), &mut NullWalker);

    let product = wm.borrow().as_mat4().unwrap() * inv.borrow().as_mat4().unwrap();
    assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-4));
}

// ============================================================================
// Frustum near/far substitution
// ============================================================================

#[test]
fn frustum_range_prefers_same_frame_depth_report() {
    let mut compositor = Compositor::new();
    compositor.create_new_pass(PassType::Forward, "scene");
    let near = Uniform::new_ref("u_near", UniformValue::Float(0.0));
    let far = Uniform::new_ref("u_far", UniformValue::Float(0.0));
    compositor.add_builtin_uniform(UniformSemantic::FrustumNear, near.clone());
    compositor.add_builtin_uniform(UniformSemantic::FrustumFar, far.clone());

    struct Reporting;
    impl SceneWalker for Reporting {
        fn traverse_scene(&mut self, ctx: &mut TraversalContext) {
            ctx.computed_near = Some(3.0);
            ctx.computed_far = Some(30.0);
        }
        fn traverse_children(&mut self, _: &RenderTargetNodeRef, _: &mut TraversalContext) {}
        fn traverse_geometry(&mut self, _: &GeometryRef, _: &mut TraversalContext) {}
        fn traverse_default(&mut self, _: &RenderTargetNodeRef, _: &mut TraversalContext) {}
    }

    // First cull of frame 9: no report yet, so the refresh that precedes the
    // pass traversal sees the raw projection-derived distances.
    compositor.traverse(&mut full_cull_context(9), &mut Reporting);
    assert!((near.borrow().as_float().unwrap() - 0.25).abs() < 1e-4);

    // Second cull of the same frame: the forward pass's report substitutes.
    compositor.traverse(&mut full_cull_context(9), &mut Reporting);
    assert_eq!(near.borrow().as_float(), Some(3.0));
    assert_eq!(far.borrow().as_float(), Some(30.0));

    // New frame, refresh precedes any report: back to projection values.
    compositor.traverse(&mut full_cull_context(10), &mut NullWalker);
    assert!((near.borrow().as_float().unwrap() - 0.25).abs() < 1e-4);
}

#[test]
fn fov_and_aspect_come_from_perspective_projection_only() {
    let mut compositor = Compositor::new();
    let fov = Uniform::new_ref("u_fov", UniformValue::Float(-1.0));
    let aspect = Uniform::new_ref("u_aspect", UniformValue::Float(-1.0));
    compositor.add_builtin_uniform(UniformSemantic::FovY, fov.clone());
    compositor.add_builtin_uniform(UniformSemantic::AspectRatio, aspect.clone());

    compositor.traverse(&mut full_cull_context(1), &mut NullWalker);
    assert!((fov.borrow().as_float().unwrap() - 0.9).abs() < 1e-5);
    assert!((aspect.borrow().as_float().unwrap() - 1.6).abs() < 1e-5);

    // Orthographic projection: both are skipped, values stay stale.
    let mut ctx = full_cull_context(2);
    ctx.projection = Some(Mat4::orthographic_rh(0.0, 1.0, 0.0, 1.0, -1.0, 1.0));
    compositor.traverse(&mut ctx, &mut NullWalker);
    assert!((fov.borrow().as_float().unwrap() - 0.9).abs() < 1e-5);
}

// ============================================================================
// Refresh scheduling & degradation
// ============================================================================

#[test]
fn no_refresh_outside_cull_visits() {
    let mut compositor = Compositor::new();
    let eye = Uniform::new_ref("u_eye", UniformValue::Vec3(Vec3::ZERO));
    compositor.add_builtin_uniform(UniformSemantic::EyePosition, eye.clone());

    let mut ctx = full_cull_context(1);
    ctx.kind = VisitorKind::Update;
    compositor.traverse(&mut ctx, &mut NullWalker);
    assert_eq!(eye.borrow().as_vec3(), Some(Vec3::ZERO));
}

#[test]
fn missing_context_data_skips_only_the_affected_uniform() {
    let mut compositor = Compositor::new();
    let eye = Uniform::new_ref("u_eye", UniformValue::Vec3(Vec3::ZERO));
    let vw = Uniform::new_ref("u_vw", UniformValue::Float(-1.0));
    compositor.add_builtin_uniform(UniformSemantic::EyePosition, eye.clone());
    compositor.add_builtin_uniform(UniformSemantic::ViewportWidth, vw.clone());

    // Context with camera vectors but no viewport.
    let mut ctx = full_cull_context(1);
    ctx.viewport = None;
    compositor.traverse(&mut ctx, &mut NullWalker);

    assert_eq!(eye.borrow().as_vec3(), Some(Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(vw.borrow().as_float(), Some(-1.0));
}

#[test]
fn type_mismatch_skips_without_aborting_others() {
    let mut compositor = Compositor::new();
    // Declared as Float but bound to a Vec3 semantic.
    let bad = Uniform::new_ref("u_bad", UniformValue::Float(7.0));
    let good = Uniform::new_ref("u_up", UniformValue::Vec3(Vec3::ZERO));
    compositor.add_builtin_uniform(UniformSemantic::EyePosition, bad.clone());
    compositor.add_builtin_uniform(UniformSemantic::UpVector, good.clone());

    compositor.traverse(&mut full_cull_context(1), &mut NullWalker);

    assert_eq!(bad.borrow().as_float(), Some(7.0));
    assert_eq!(good.borrow().as_vec3(), Some(Vec3::Y));
}

#[test]
fn duplicate_semantic_updates_every_bound_instance() {
    let mut compositor = Compositor::new();
    let a = Uniform::new_ref("u_eye_a", UniformValue::Vec3(Vec3::ZERO));
    let b = Uniform::new_ref("u_eye_b", UniformValue::Vec3(Vec3::ZERO));
    compositor.add_builtin_uniform(UniformSemantic::EyePosition, a.clone());
    compositor.add_builtin_uniform(UniformSemantic::EyePosition, b.clone());

    compositor.traverse(&mut full_cull_context(1), &mut NullWalker);

    assert_eq!(a.borrow().as_vec3(), Some(Vec3::new(1.0, 2.0, 3.0)));
    assert_eq!(b.borrow().as_vec3(), Some(Vec3::new(1.0, 2.0, 3.0)));
}

// ============================================================================
// Registration & removal
// ============================================================================

#[test]
fn removal_by_semantic_and_by_identity() {
    let mut compositor = Compositor::new();
    let eye = Uniform::new_ref("u_eye", UniformValue::Vec3(Vec3::ZERO));
    let near = Uniform::new_ref("u_near", UniformValue::Float(0.0));
    compositor.add_builtin_uniform(UniformSemantic::EyePosition, eye.clone());
    compositor.add_builtin_uniform(UniformSemantic::EyePosition, eye.clone());
    compositor.add_builtin_uniform(UniformSemantic::FrustumNear, near.clone());

    assert!(compositor.is_builtin_uniform(&eye));
    assert!(compositor.has_builtin_uniforms());

    assert_eq!(compositor.remove_builtin_uniform(&eye), 2);
    assert!(!compositor.is_builtin_uniform(&eye));

    assert_eq!(compositor.remove_builtin_uniforms(UniformSemantic::FrustumNear), 1);
    assert!(!compositor.has_builtin_uniforms());
}

#[test]
fn unregistered_uniform_is_not_builtin() {
    let compositor = Compositor::new();
    let stray = Uniform::new_ref("u_stray", UniformValue::Float(0.0));
    assert!(!compositor.is_builtin_uniform(&stray));
}
