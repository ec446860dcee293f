use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Smallest share of the screen height either view may shrink to while
    /// dragging the divider.
    pub min_view_percent: f32,
}

impl InteractionPreferences {
    /// Clamps the front view's share of the screen so that both views keep at
    /// least `min_view_percent`.
    pub fn clamp_front_percent(&self, percent: f32) -> f32 {
        let min = self.min_view_percent.clamp(0.0, 0.5);
        percent.clamp(min, 1.0 - min)
    }
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ScramblePreferences {
    /// Number of random moves in a scramble.
    pub length: usize,
    /// Fixed RNG seed, for reproducible scrambles.
    pub seed: Option<u64>,
}
