//! Pan/zoom state over the resolved layout. Gestures compose against a
//! baseline snapshotted at gesture start, so per-frame updates are relative
//! and cannot drift. Programmatic centering produces a glide target the
//! presentation layer interpolates toward; a superseding request simply
//! overwrites the target.

use glam::Vec2;

use crate::graph::layout::LayoutBounds;

/// Scale + translation mapping layout space to screen space. Scaling is
/// applied around the layout's own geometric center, matching how the
/// rendered canvas is transformed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub scale: f32,
    pub translate: Vec2,
}

impl ViewportTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate: Vec2::ZERO,
    };
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Screen geometry supplied by the presentation layer. `chrome_height` is
/// the fixed chrome above the canvas (header + search bar); the centering
/// target sits in the middle of what remains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    pub width: f32,
    pub height: f32,
    pub chrome_height: f32,
}

impl ScreenGeometry {
    pub fn target_point(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, (self.height - self.chrome_height) * 0.5)
    }
}

pub struct Viewport {
    current: ViewportTransform,
    saved: ViewportTransform,
    glide: Option<ViewportTransform>,
    min_scale: f32,
    max_scale: f32,
}

impl Viewport {
    pub fn new(min_scale: f32, max_scale: f32) -> Self {
        Self {
            current: ViewportTransform::IDENTITY,
            saved: ViewportTransform::IDENTITY,
            glide: None,
            min_scale,
            max_scale,
        }
    }

    pub fn transform(&self) -> ViewportTransform {
        self.current
    }

    pub fn glide_target(&self) -> Option<ViewportTransform> {
        self.glide
    }

    /// Back to identity, baseline included. Used on every graph rebuild.
    pub fn reset_transform(&mut self) {
        self.current = ViewportTransform::IDENTITY;
        self.saved = ViewportTransform::IDENTITY;
        self.glide = None;
    }

    /// Pinch update: the delta multiplies the scale saved at gesture start,
    /// clamped to the configured range. An extreme delta clamps, it never
    /// overshoots.
    pub fn pinch(&mut self, delta: f32) {
        self.current.scale = (self.saved.scale * delta).clamp(self.min_scale, self.max_scale);
    }

    /// Pan update: raw screen-space deltas on top of the saved translation.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.current.translate = self.saved.translate + Vec2::new(dx, dy);
    }

    /// Gesture ended: the live transform becomes the next baseline.
    pub fn end_gesture(&mut self) {
        self.saved = self.current;
    }

    /// Where a layout point lands on screen under `t`. Scaling is around
    /// the layout center, so with `rel = pos - bounds.min` and
    /// `c = size / 2`: `screen = (rel - c) * scale + c + translate`.
    pub fn project_with(t: ViewportTransform, pos: Vec2, bounds: &LayoutBounds) -> Vec2 {
        let c = bounds.size() * 0.5;
        let rel = pos - bounds.min;
        (rel - c) * t.scale + c + t.translate
    }

    pub fn project(&self, pos: Vec2, bounds: &LayoutBounds) -> Vec2 {
        Self::project_with(self.current, pos, bounds)
    }

    /// The transform that puts `pos` on the screen target at scale `scale`:
    /// `translate = target - (rel - c) * scale - c`.
    pub fn centering_transform(
        scale: f32,
        pos: Vec2,
        screen: &ScreenGeometry,
        bounds: &LayoutBounds,
    ) -> ViewportTransform {
        let target = screen.target_point();
        let c = bounds.size() * 0.5;
        let rel = pos - bounds.min;
        ViewportTransform {
            scale,
            translate: target - (rel - c) * scale - c,
        }
    }

    /// Begin gliding toward the transform that centers `pos`, keeping the
    /// current scale. The saved baseline moves to the target immediately so
    /// the next gesture composes against where the glide lands. A call while
    /// a glide is in flight redirects it; last write wins.
    pub fn center_on(
        &mut self,
        pos: Vec2,
        screen: &ScreenGeometry,
        bounds: &LayoutBounds,
    ) -> ViewportTransform {
        let target = Self::centering_transform(self.current.scale, pos, screen, bounds);
        self.saved = target;
        self.glide = Some(target);
        target
    }

    /// Advance the glide by `alpha` in (0, 1]. Returns true while still in
    /// flight; `alpha = 1.0` jumps straight to the target (the strategy
    /// tests use in place of an eased animation).
    pub fn step_glide(&mut self, alpha: f32) -> bool {
        let Some(target) = self.glide else {
            return false;
        };
        let a = alpha.clamp(0.0, 1.0);
        self.current.scale += (target.scale - self.current.scale) * a;
        self.current.translate += (target.translate - self.current.translate) * a;

        let close = (target.scale - self.current.scale).abs() < 1e-3
            && (target.translate - self.current.translate).length() < 0.5;
        if close {
            self.current = target;
            self.glide = None;
        }
        self.glide.is_some()
    }

    pub fn snap_to_target(&mut self) {
        if let Some(target) = self.glide.take() {
            self.current = target;
        }
    }

    /// Reset affordance: scale back to 1 (live and baseline), then
    /// re-center on `pos`.
    pub fn reset(&mut self, pos: Vec2, screen: &ScreenGeometry, bounds: &LayoutBounds) {
        self.current.scale = 1.0;
        self.saved.scale = 1.0;
        self.center_on(pos, screen, bounds);
    }
}
