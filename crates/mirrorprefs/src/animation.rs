use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Seconds for one layer turn started by a gesture.
    pub twist_duration: f32,
    /// Seconds for one whole-cube rotation.
    pub whole_duration: f32,
    pub twist_interpolation: InterpolateFn,
}

impl AnimationPreferences {
    pub fn twist(&self) -> Duration {
        seconds(self.twist_duration)
    }
    pub fn whole(&self) -> Duration {
        seconds(self.whole_duration)
    }
}

fn seconds(s: f32) -> Duration {
    if s.is_finite() && s > 0.0 {
        Duration::from_secs_f32(s)
    } else {
        Duration::ZERO
    }
}

/// Easing function for animations.
#[derive(
    Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum InterpolateFn {
    Lerp,
    #[default]
    Cosine,
    Smoothstep,
}

impl InterpolateFn {
    /// Maps linear progress `t` (0 to 1) to eased progress (0 to 1).
    pub fn interpolate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            InterpolateFn::Lerp => t,
            InterpolateFn::Cosine => (1.0 - (t * std::f32::consts::PI).cos()) / 2.0,
            InterpolateFn::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }
}
