use serde::{Deserialize, Serialize};

/// Screen layout. Lengths are in pixels unless noted.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutPreferences {
    /// Share of the screen height given to the front view at startup.
    pub initial_front_percent: f32,
    /// Thickness of the divider between the views.
    pub divider_height: f32,

    pub button_width: f32,
    pub button_height: f32,
    /// Gap between buttons and from the screen edge.
    pub button_margin: f32,

    /// Fraction of its view's height that a cube's edge spans.
    pub cube_fill: f32,
    /// Scale of the saved-state preview cube relative to a live cube.
    pub preview_scale: f32,
}
