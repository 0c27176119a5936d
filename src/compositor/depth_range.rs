//! Depth-Range Convergence
//!
//! Multiple forward passes within one frame each discover *a* visible
//! near/far depth range during their cull traversal. The usable shared range
//! is the intersection of all of them: [`DepthRangePreserver`] keeps one
//! `(epoch, near, far)` triple and tightens it monotonically while reports
//! stay within the same frame epoch. A report from a new frame replaces the
//! state wholesale.
//!
//! The merge is `max(near)` / `min(far)` — commutative and associative, so
//! the order of forward passes within a frame does not affect the converged
//! value. A same-frame report that is *wider* than the stored range is
//! deliberately ignored by the same rule.

/// Epoch-scoped near/far storage, one per compositor.
#[derive(Debug, Clone, Default)]
pub struct DepthRangePreserver {
    epoch: u32,
    near: f32,
    far: f32,
    reported: bool,
}

impl DepthRangePreserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a forward pass's report for `frame`.
    ///
    /// A report for a different frame than the stored epoch replaces the
    /// state; a repeated report within the same epoch tightens it.
    pub fn update(&mut self, frame: u32, near: f32, far: f32) {
        if !self.reported || frame != self.epoch {
            self.epoch = frame;
            self.near = near;
            self.far = far;
            self.reported = true;
        } else {
            self.near = self.near.max(near);
            self.far = self.far.min(far);
        }
    }

    /// The converged `(near, far)` for `frame`, if any forward pass has
    /// reported during that frame.
    #[must_use]
    pub fn get(&self, frame: u32) -> Option<(f32, f32)> {
        (self.reported && frame == self.epoch).then_some((self.near, self.far))
    }

    /// The epoch of the most recent report.
    #[inline]
    #[must_use]
    pub fn epoch(&self) -> u32 {
        self.epoch
    }
}
