//! Screen Quad Factory
//!
//! Full-screen and parametrized quad geometry used as fallback render
//! content. Two shapes are produced:
//!
//! - a shared unit quad with the texture coordinates aliased across all
//!   texture units, built lazily once per compositor and reused by every
//!   pass that needs a fallback full-screen surface;
//! - fresh parametrized quads with an independent texture-coordinate scale,
//!   used as the default child of deferred passes.

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::errors::{CompositorError, Result};
use crate::resources::Renderable;

/// Maximum number of aliased texture-coordinate channels on the shared quad.
pub const MAX_TEX_COORD_CHANNELS: usize = 8;

/// Shared handle to immutable quad geometry.
pub type GeometryRef = Rc<Geometry>;

/// How the quad's vertices are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveMode {
    #[default]
    TriangleStrip,
    TriangleList,
}

/// Render-state overrides attached to quad geometry.
///
/// The `protected` flag marks the overrides as non-overridable by
/// descendant state, so a pass shader cannot accidentally re-enable
/// lighting or wireframe on its fallback surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateOverrides {
    /// Force filled polygon rasterization.
    pub force_polygon_fill: bool,
    /// Disable fixed-function / material lighting.
    pub disable_lighting: bool,
    /// Descendant state may not override the flags above.
    pub protected: bool,
}

/// CPU-side quad geometry.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub label: Cow<'static, str>,
    pub positions: Vec<Vec3>,
    pub normal: Vec3,
    pub mode: PrimitiveMode,
    pub state: StateOverrides,
    tex_coords: SmallVec<[Rc<[Vec2]>; MAX_TEX_COORD_CHANNELS]>,
}

impl Geometry {
    /// Number of texture-coordinate channels.
    #[inline]
    #[must_use]
    pub fn tex_coord_channels(&self) -> usize {
        self.tex_coords.len()
    }

    /// Texture coordinates of one channel.
    #[inline]
    #[must_use]
    pub fn tex_coords(&self, channel: usize) -> Option<&[Vec2]> {
        self.tex_coords.get(channel).map(|c| &**c)
    }

    /// Returns `true` when two channels alias the same coordinate buffer.
    #[must_use]
    pub fn channels_aliased(&self, a: usize, b: usize) -> bool {
        match (self.tex_coords.get(a), self.tex_coords.get(b)) {
            (Some(ca), Some(cb)) => Rc::ptr_eq(ca, cb),
            _ => false,
        }
    }
}

impl Renderable for Geometry {
    fn label(&self) -> &str {
        &self.label
    }
}

/// Lazily builds and caches the reusable quad geometry.
#[derive(Debug, Clone, Default)]
pub struct ScreenQuadFactory {
    shared: RefCell<Option<GeometryRef>>,
}

impl ScreenQuadFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared full-screen fallback quad.
    ///
    /// Built once on first demand: a unit quad spanning corner (0,0) with
    /// width (1,0) and height (0,1), its texture coordinates aliased across
    /// all [`MAX_TEX_COORD_CHANNELS`] units so multi-layer shaders see the
    /// same coordinates on every sampler.
    #[must_use]
    pub fn shared_quad(&self) -> GeometryRef {
        let mut cached = self.shared.borrow_mut();
        if let Some(quad) = cached.as_ref() {
            return Rc::clone(quad);
        }

        let coords: Rc<[Vec2]> = Rc::from(quad_tex_coords(1.0));
        let tex_coords = (0..MAX_TEX_COORD_CHANNELS).map(|_| Rc::clone(&coords)).collect();

        let quad = Rc::new(Geometry {
            label: Cow::Borrowed("SharedScreenQuad"),
            positions: quad_positions(1.0, 1.0),
            normal: Vec3::Z,
            mode: PrimitiveMode::TriangleStrip,
            state: StateOverrides {
                force_polygon_fill: true,
                disable_lighting: true,
                protected: true,
            },
            tex_coords,
        });

        *cached = Some(Rc::clone(&quad));
        quad
    }

    /// Builds a fresh `width` x `height` quad with a single
    /// texture-coordinate channel scaled by `tex_coord_scale`.
    pub fn create_quad(
        &self,
        width: f32,
        height: f32,
        tex_coord_scale: f32,
    ) -> Result<GeometryRef> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(CompositorError::InvalidQuadSize { width, height });
        }

        let mut tex_coords: SmallVec<[Rc<[Vec2]>; MAX_TEX_COORD_CHANNELS]> = SmallVec::new();
        tex_coords.push(Rc::from(quad_tex_coords(tex_coord_scale)));

        Ok(Rc::new(Geometry {
            label: Cow::Borrowed("ScreenQuad"),
            positions: quad_positions(width, height),
            normal: Vec3::Z,
            mode: PrimitiveMode::TriangleStrip,
            state: StateOverrides {
                force_polygon_fill: true,
                disable_lighting: true,
                protected: true,
            },
            tex_coords,
        }))
    }
}

/// Strip-ordered quad vertices: corner, +width, +height, +both.
fn quad_positions(width: f32, height: f32) -> Vec<Vec3> {
    vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(width, 0.0, 0.0),
        Vec3::new(0.0, height, 0.0),
        Vec3::new(width, height, 0.0),
    ]
}

fn quad_tex_coords(scale: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(scale, 0.0),
        Vec2::new(0.0, scale),
        Vec2::new(scale, scale),
    ]
}
