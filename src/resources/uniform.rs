//! Shader Uniforms
//!
//! A [`Uniform`] is a named shader parameter with a typed value. The type is
//! fixed at construction; writing a value of a different variant is rejected
//! so a shader never silently receives reinterpreted data.

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3, Vec4};
use uuid::Uuid;

use crate::errors::{CompositorError, Result};

/// Shared handle to a uniform.
///
/// The compositor and the host's shader bindings hold the same handle;
/// built-in refreshes are visible to both without copying.
pub type UniformRef = Rc<RefCell<Uniform>>;

/// A typed uniform value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl UniformValue {
    /// Variant name (for diagnostics).
    #[inline]
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::Vec2(_) => "vec2",
            Self::Vec3(_) => "vec3",
            Self::Vec4(_) => "vec4",
            Self::Mat4(_) => "mat4",
        }
    }
}

/// A named, typed shader parameter.
#[derive(Debug, Clone)]
pub struct Uniform {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,
    value: UniformValue,
}

impl Uniform {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, value: UniformValue) -> Self {
        Self { uuid: Uuid::new_v4(), name: name.into(), value }
    }

    /// Creates a uniform and wraps it in a shared handle.
    #[must_use]
    pub fn new_ref(name: impl Into<Cow<'static, str>>, value: UniformValue) -> UniformRef {
        Rc::new(RefCell::new(Self::new(name, value)))
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &UniformValue {
        &self.value
    }

    /// Replaces the value. The new value must be of the variant the uniform
    /// was declared with.
    pub fn set(&mut self, value: UniformValue) -> Result<()> {
        if std::mem::discriminant(&self.value) != std::mem::discriminant(&value) {
            return Err(CompositorError::UniformTypeMismatch {
                name: self.name.to_string(),
                expected: self.value.type_name(),
                got: value.type_name(),
            });
        }
        self.value = value;
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        match self.value {
            UniformValue::Float(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self.value {
            UniformValue::Vec3(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_mat4(&self) -> Option<Mat4> {
        match self.value {
            UniformValue::Mat4(v) => Some(v),
            _ => None,
        }
    }
}
