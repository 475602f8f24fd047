//! Shading parameter presets and the per-frame parameter snapshot

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Surface glossiness presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GlossLevel {
    Matte,
    #[default]
    SemiGloss,
    Glossy,
    HighGloss,
}

impl GlossLevel {
    pub fn value(self) -> f32 {
        match self {
            GlossLevel::Matte => 0.0,
            GlossLevel::SemiGloss => 0.3,
            GlossLevel::Glossy => 0.6,
            GlossLevel::HighGloss => 1.0,
        }
    }
}

/// Shadow darkness presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowOpacity {
    None,
    Faint,
    Soft,
    #[default]
    Strong,
    Heavy,
    Full,
}

impl ShadowOpacity {
    pub fn value(self) -> f32 {
        match self {
            ShadowOpacity::None => 0.0,
            ShadowOpacity::Faint => 0.2,
            ShadowOpacity::Soft => 0.4,
            ShadowOpacity::Strong => 0.6,
            ShadowOpacity::Heavy => 0.8,
            ShadowOpacity::Full => 1.0,
        }
    }
}

/// Radial fade presets as `(start, end)` in normalized shadow radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShadowFade {
    SuperSoft,
    Soft,
    #[default]
    Realistic,
    Dramatic,
}

impl ShadowFade {
    pub fn range(self) -> (f32, f32) {
        match self {
            ShadowFade::SuperSoft => (-0.5, 1.5),
            ShadowFade::Soft => (0.0, 1.0),
            ShadowFade::Realistic => (0.2, 1.1),
            ShadowFade::Dramatic => (0.3, 1.4),
        }
    }
}

/// Everything the render loop reads from the host each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingParameters {
    pub gloss: f32,
    pub shadow_opacity: f32,
    pub shadow_fade_start: f32,
    pub shadow_fade_end: f32,
    pub shadow_offset_x: f32,
    pub shadow_offset_y: f32,
    pub auto_rotate: bool,
}

impl ShadingParameters {
    /// Build from the enumerated presets, zero offset, auto-rotate on.
    pub fn from_presets(gloss: GlossLevel, opacity: ShadowOpacity, fade: ShadowFade) -> Self {
        let (shadow_fade_start, shadow_fade_end) = fade.range();
        Self {
            gloss: gloss.value(),
            shadow_opacity: opacity.value(),
            shadow_fade_start,
            shadow_fade_end,
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
            auto_rotate: true,
        }
    }

    /// The shadow pass runs only for a positive opacity.
    pub fn shadow_enabled(&self) -> bool {
        self.shadow_opacity > 0.0
    }

    pub fn with_shadow_offset(mut self, x: f32, y: f32) -> Self {
        self.shadow_offset_x = x;
        self.shadow_offset_y = y;
        self
    }

    pub fn with_auto_rotate(mut self, enabled: bool) -> Self {
        self.auto_rotate = enabled;
        self
    }
}

impl Default for ShadingParameters {
    fn default() -> Self {
        Self::from_presets(
            GlossLevel::default(),
            ShadowOpacity::default(),
            ShadowFade::default(),
        )
    }
}

/// Shared, atomically replaced parameter snapshot.
///
/// Writers publish a whole new snapshot; the render loop takes one
/// snapshot per frame, so a frame never sees half an update.
#[derive(Debug, Clone, Default)]
pub struct ParameterCell {
    inner: Arc<Mutex<Arc<ShadingParameters>>>,
}

impl ParameterCell {
    pub fn new(params: ShadingParameters) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Arc::new(params))),
        }
    }

    /// Publish a new snapshot.
    pub fn store(&self, params: ShadingParameters) {
        *self.inner.lock() = Arc::new(params);
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<ShadingParameters> {
        Arc::clone(&self.inner.lock())
    }

    /// Read-modify-write under the lock.
    pub fn update(&self, f: impl FnOnce(&mut ShadingParameters)) {
        let mut guard = self.inner.lock();
        let mut next = **guard;
        f(&mut next);
        *guard = Arc::new(next);
    }
}
