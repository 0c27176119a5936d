//! Effect Compositor
//!
//! The top-level object client code talks to. It owns the pass registry, the
//! named resource maps (textures, uniforms, shaders), the built-in uniform
//! bindings, the shared quad factory, and the per-frame depth-range state,
//! and drives the per-visit sequence: refresh built-in uniforms (cull only),
//! then dispatch every activated pass of the active technique in list order.
//!
//! # Per-frame data flow
//!
//! A host traversal visits the compositor node and calls
//! [`Compositor::traverse`]. On cull, the [`BuiltinUniformBinder`] runs once
//! if any bindings exist; then each pass's dispatch decides independently
//! whether the host traverses the main scene, the pass's own children, or
//! the shared fallback quad. Forward passes report their computed near/far
//! back to the [`DepthRangePreserver`], whose converged value feeds the
//! *next* uniform refresh.

pub mod builtin;
pub mod depth_range;
pub mod dispatch;
pub mod pass;
pub mod registry;

pub use builtin::{BuiltinUniformBinder, UniformSemantic};
pub use depth_range::DepthRangePreserver;
pub use dispatch::{TraversalDecision, decide};
pub use pass::{PassData, PassType, RenderTargetSettings};
pub use registry::{DEFAULT_TECHNIQUE, PassList, PassRegistry};

use rustc_hash::FxHashMap;

use crate::camera::{RenderTargetImpl, RenderTargetNodeRef};
use crate::resources::{ScreenQuadFactory, ShaderRef, TextureRef, UniformRef};
use crate::traversal::{SceneWalker, TraversalContext, VisitorKind};

/// Multi-pass render effect compositor.
///
/// Cloning duplicates all maps shallowly: the clone shares pass nodes,
/// resources, and the cached quad through their reference-counted handles.
///
/// Single-threaded cooperative model: all work runs synchronously inside
/// whichever host traversal is currently visiting the compositor node;
/// mutation and traversal never overlap (single-writer contract).
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    registry: PassRegistry,
    quads: ScreenQuadFactory,
    depth_range: DepthRangePreserver,
    builtin: BuiltinUniformBinder,

    // === Named resources ===
    textures: FxHashMap<String, TextureRef>,
    uniforms: FxHashMap<String, UniformRef>,
    shaders: FxHashMap<String, ShaderRef>,

    settings: RenderTargetSettings,
}

impl Compositor {
    /// Creates a compositor with an empty `"default"` technique active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =======================================================================
    // Pass management (active technique)
    // =======================================================================

    /// Appends a new activated pass to the active technique and returns its
    /// render-target node, configured per the construction policy of `kind`
    /// and the current render-target settings.
    pub fn create_new_pass(
        &mut self,
        kind: PassType,
        name: impl Into<String>,
    ) -> RenderTargetNodeRef {
        let pass = PassData::create(kind, name, &self.settings, &self.quads);
        let node = pass.node.clone();
        self.registry.push(pass);
        node
    }

    /// Removes the first pass named `name`. Returns `false` if absent.
    pub fn remove_pass(&mut self, name: &str) -> bool {
        self.registry.remove_pass(name)
    }

    /// A clone of the first pass named `name` (the node handle is shared).
    #[must_use]
    pub fn get_pass_data(&self, name: &str) -> Option<PassData> {
        self.registry.get_pass_data(name)
    }

    /// Position of the first pass named `name` in the active list.
    #[must_use]
    pub fn get_pass_index(&self, name: &str) -> Option<usize> {
        self.registry.get_pass_index(name)
    }

    /// Moves the first pass named `name` to `index`. See
    /// [`PassRegistry::set_pass_index`].
    pub fn set_pass_index(&mut self, name: &str, index: usize) -> bool {
        self.registry.set_pass_index(name, index)
    }

    /// Toggles a pass's activation flag. Returns `false` for unknown names.
    pub fn set_pass_activated(&mut self, name: &str, activated: bool) -> bool {
        self.registry.set_pass_activated(name, activated)
    }

    /// A pass's activation flag; `false` for unknown names.
    #[must_use]
    pub fn get_pass_activated(&self, name: &str) -> bool {
        self.registry.get_pass_activated(name)
    }

    /// The active technique's pass list (shared empty list for an
    /// unregistered technique).
    #[must_use]
    pub fn pass_list(&self) -> &PassList {
        self.registry.pass_list()
    }

    /// Render-target nodes of the active technique's passes of type `kind`,
    /// in list order.
    #[must_use]
    pub fn cameras_by_type(&self, kind: PassType) -> Vec<RenderTargetNodeRef> {
        self.registry.cameras_by_type(kind)
    }

    // =======================================================================
    // Technique selection
    // =======================================================================

    /// Selects the technique subsequent pass operations target. Techniques
    /// are registered on first mutating access and never dropped by a
    /// switch.
    pub fn set_active_technique(&mut self, name: impl Into<String>) {
        self.registry.set_active_technique(name);
    }

    #[inline]
    #[must_use]
    pub fn active_technique(&self) -> &str {
        self.registry.active_technique()
    }

    /// Registered technique names, in arbitrary order.
    pub fn technique_names(&self) -> impl Iterator<Item = &str> {
        self.registry.technique_names()
    }

    // =======================================================================
    // Frame drive
    // =======================================================================

    /// Per-visit entry point, called from the host's traversal of the
    /// compositor node.
    ///
    /// On a cull visit with registered built-in uniforms, refreshes them
    /// once; then dispatches every *activated* pass of the active technique
    /// in list order. Deactivated passes are skipped entirely.
    pub fn traverse(&mut self, ctx: &mut TraversalContext, walker: &mut dyn SceneWalker) {
        let Self { registry, quads, depth_range, builtin, .. } = self;

        if ctx.kind == VisitorKind::Cull && !builtin.is_empty() {
            builtin.apply(ctx, depth_range);
        }

        for pass in registry.pass_list() {
            if !pass.activated {
                continue;
            }
            dispatch::run_pass(pass, quads, depth_range, ctx, walker);
        }
    }

    /// Dispatches a single named pass, for hosts that hook per-node
    /// traversal callbacks individually instead of letting the compositor
    /// walk its list. Returns `false` for unknown names.
    ///
    /// The activation flag is honored: a deactivated pass is not traversed
    /// (and the call still returns `true`).
    pub fn traverse_pass(
        &mut self,
        name: &str,
        ctx: &mut TraversalContext,
        walker: &mut dyn SceneWalker,
    ) -> bool {
        let Some(pass) = self.registry.get_pass_data(name) else {
            return false;
        };
        if pass.activated {
            dispatch::run_pass(&pass, &self.quads, &mut self.depth_range, ctx, walker);
        }
        true
    }

    /// The converged depth range for `frame`, when any forward pass has
    /// reported during that frame.
    #[must_use]
    pub fn converged_depth_range(&self, frame: u32) -> Option<(f32, f32)> {
        self.depth_range.get(frame)
    }

    // =======================================================================
    // Built-in uniforms
    // =======================================================================

    /// Registers a uniform for automatic per-cull refresh from `semantic`.
    pub fn add_builtin_uniform(&mut self, semantic: UniformSemantic, uniform: UniformRef) {
        self.builtin.add(semantic, uniform);
    }

    /// Removes every built-in binding of `semantic`; returns the count.
    pub fn remove_builtin_uniforms(&mut self, semantic: UniformSemantic) -> usize {
        self.builtin.remove_by_semantic(semantic)
    }

    /// Removes every built-in binding of this exact uniform handle; returns
    /// the count.
    pub fn remove_builtin_uniform(&mut self, uniform: &UniformRef) -> usize {
        self.builtin.remove_by_uniform(uniform)
    }

    /// Whether this exact uniform handle is registered as a built-in.
    #[must_use]
    pub fn is_builtin_uniform(&self, uniform: &UniformRef) -> bool {
        self.builtin.is_builtin(uniform)
    }

    #[inline]
    #[must_use]
    pub fn has_builtin_uniforms(&self) -> bool {
        !self.builtin.is_empty()
    }

    // =======================================================================
    // Named resources
    // =======================================================================

    /// Binds a texture under `name`. Returns `true` on fresh insert,
    /// `false` when an existing binding was overwritten.
    pub fn set_texture(&mut self, name: impl Into<String>, texture: TextureRef) -> bool {
        self.textures.insert(name.into(), texture).is_none()
    }

    pub fn remove_texture(&mut self, name: &str) -> bool {
        self.textures.remove(name).is_some()
    }

    #[must_use]
    pub fn get_texture(&self, name: &str) -> Option<TextureRef> {
        self.textures.get(name).cloned()
    }

    pub fn texture_names(&self) -> impl Iterator<Item = &str> {
        self.textures.keys().map(String::as_str)
    }

    /// Binds a uniform under `name`. Returns `true` on fresh insert.
    pub fn set_uniform(&mut self, name: impl Into<String>, uniform: UniformRef) -> bool {
        self.uniforms.insert(name.into(), uniform).is_none()
    }

    pub fn remove_uniform(&mut self, name: &str) -> bool {
        self.uniforms.remove(name).is_some()
    }

    #[must_use]
    pub fn get_uniform(&self, name: &str) -> Option<UniformRef> {
        self.uniforms.get(name).cloned()
    }

    pub fn uniform_names(&self) -> impl Iterator<Item = &str> {
        self.uniforms.keys().map(String::as_str)
    }

    /// Binds a shader under `name`. Returns `true` on fresh insert.
    pub fn set_shader(&mut self, name: impl Into<String>, shader: ShaderRef) -> bool {
        self.shaders.insert(name.into(), shader).is_none()
    }

    pub fn remove_shader(&mut self, name: &str) -> bool {
        self.shaders.remove(name).is_some()
    }

    #[must_use]
    pub fn get_shader(&self, name: &str) -> Option<ShaderRef> {
        self.shaders.get(name).cloned()
    }

    pub fn shader_names(&self) -> impl Iterator<Item = &str> {
        self.shaders.keys().map(String::as_str)
    }

    // =======================================================================
    // Render-target settings
    // =======================================================================

    /// Sets the viewport size given to subsequently created passes.
    pub fn set_render_target_size(&mut self, width: u32, height: u32) {
        self.settings.size = (width, height);
    }

    #[inline]
    #[must_use]
    pub fn render_target_size(&self) -> (u32, u32) {
        self.settings.size
    }

    /// Selects the render-target implementation for subsequently created
    /// passes. Already-created pass nodes are unaffected.
    pub fn set_render_target_impl(&mut self, target_impl: RenderTargetImpl) {
        self.settings.target_impl = target_impl;
    }

    #[inline]
    #[must_use]
    pub fn render_target_impl(&self) -> RenderTargetImpl {
        self.settings.target_impl
    }

    /// The quad factory shared by every pass of this compositor.
    #[inline]
    #[must_use]
    pub fn quad_factory(&self) -> &ScreenQuadFactory {
        &self.quads
    }
}
