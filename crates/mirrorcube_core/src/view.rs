/// Which of the two mirrored views a cube instance represents.
///
/// The front view shows the cube from the front; the end view shows the same
/// logical cube from behind.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumString,
)]
pub enum ViewKind {
    /// Upper view, showing the front of the cube.
    #[strum(serialize = "front-rubik")]
    Front,
    /// Lower view, showing the back of the cube.
    #[strum(serialize = "end-rubik")]
    End,
}

impl ViewKind {
    /// Returns the other view.
    pub const fn mirror(self) -> Self {
        match self {
            Self::Front => Self::End,
            Self::End => Self::Front,
        }
    }

    /// Returns the sign passed to `resize_height()` for this view: the front
    /// view grows downward from the top of the screen and the end view grows
    /// upward from the bottom.
    pub const fn layout_sign(self) -> f32 {
        match self {
            Self::Front => 1.0,
            Self::End => -1.0,
        }
    }
}
