use std::fmt;

use mirrorcube_core::{CUBELET_COUNT, SignedAxis};

use crate::Twist;

/// Sticker color.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum Color {
    #[strum(serialize = "R")]
    Red,
    #[strum(serialize = "O")]
    Orange,
    #[strum(serialize = "W")]
    White,
    #[strum(serialize = "Y")]
    Yellow,
    #[strum(serialize = "G")]
    Green,
    #[strum(serialize = "B")]
    Blue,
}

impl Color {
    /// Returns the color of the face pointing along `face` on a solved cube.
    pub const fn solved(face: SignedAxis) -> Self {
        match face {
            SignedAxis::PosX => Self::Red,
            SignedAxis::NegX => Self::Orange,
            SignedAxis::PosY => Self::White,
            SignedAxis::NegY => Self::Yellow,
            SignedAxis::PosZ => Self::Green,
            SignedAxis::NegZ => Self::Blue,
        }
    }
}

const fn slot(face: SignedAxis) -> usize {
    face.axis() * 2 + if face.is_positive() { 0 } else { 1 }
}

/// One of the 27 small cubes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Cubelet {
    /// Current position, each coordinate -1, 0, or 1.
    pub position: [i8; 3],
    stickers: [Option<Color>; 6],
}

impl Cubelet {
    /// Returns the cubelet with offset `offset` on a solved cube.
    fn solved(offset: u32) -> Self {
        let coord = |n: u32| (n % 3) as i8 - 1;
        let position = [coord(offset), coord(offset / 3), coord(offset / 9)];
        let mut stickers = [None; 6];
        for face in SignedAxis::ALL {
            if position[face.axis()] == face.unit()[face.axis()] {
                stickers[slot(face)] = Some(Color::solved(face));
            }
        }
        Self { position, stickers }
    }

    /// Returns the sticker facing `face`, if any.
    pub fn sticker(&self, face: SignedAxis) -> Option<Color> {
        self.stickers[slot(face)]
    }

    fn turn(&mut self, axis: SignedAxis) {
        self.position = axis.quarter_turn(self.position);
        let old = self.stickers;
        for face in SignedAxis::ALL {
            self.stickers[slot(face.rotated_about(axis))] = old[slot(face)];
        }
    }
}

/// Positions and stickers of every cubelet, indexed by offset from the cube's
/// lowest index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubeImage {
    cubelets: Vec<Cubelet>,
}

impl Default for CubeImage {
    fn default() -> Self {
        Self::solved()
    }
}

impl CubeImage {
    /// Returns a solved cube.
    pub fn solved() -> Self {
        Self {
            cubelets: (0..CUBELET_COUNT).map(Cubelet::solved).collect(),
        }
    }

    /// Returns the cubelet at `offset`.
    pub fn cubelet(&self, offset: u32) -> Option<&Cubelet> {
        self.cubelets.get(offset as usize)
    }

    /// Iterates over cubelets and their offsets.
    pub fn cubelets(&self) -> impl Iterator<Item = (u32, &Cubelet)> {
        (0..).zip(&self.cubelets)
    }

    /// Applies a quarter turn.
    pub fn apply(&mut self, twist: Twist) {
        for cubelet in &mut self.cubelets {
            if twist.grips(cubelet.position) {
                cubelet.turn(twist.axis);
            }
        }
    }

    /// Returns the stickers on one face, sorted by cubelet position.
    pub fn face(&self, face: SignedAxis) -> Vec<Color> {
        let mut stickers = self
            .cubelets
            .iter()
            .filter_map(|c| Some((c.position, c.sticker(face)?)))
            .collect::<Vec<_>>();
        stickers.sort_by_key(|&(pos, _)| pos);
        stickers.into_iter().map(|(_, color)| color).collect()
    }

    /// Returns whether every face shows a single color.
    pub fn is_solved(&self) -> bool {
        SignedAxis::ALL.into_iter().all(|face| {
            let stickers = self.face(face);
            stickers.len() == 9 && stickers.iter().all(|&c| c == stickers[0])
        })
    }
}

impl fmt::Display for CubeImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in SignedAxis::ALL.into_iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{face}:")?;
            for color in self.face(face) {
                write!(f, "{color}")?;
            }
        }
        Ok(())
    }
}
