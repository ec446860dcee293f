use std::fmt;

use cgmath::Vector3;

/// Positive or negative coordinate axis in a cube's local frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum SignedAxis {
    /// +X
    PosX,
    /// -X
    NegX,
    /// +Y
    PosY,
    /// -Y
    NegY,
    /// +Z
    PosZ,
    /// -Z
    NegZ,
}

impl SignedAxis {
    /// All six signed axes, in code order.
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Constructs a signed axis from an axis index (0, 1, or 2) and a sign.
    ///
    /// Axis indices above 2 wrap around.
    pub const fn new(axis: usize, positive: bool) -> Self {
        match (axis % 3, positive) {
            (0, true) => Self::PosX,
            (0, false) => Self::NegX,
            (1, true) => Self::PosY,
            (1, false) => Self::NegY,
            (_, true) => Self::PosZ,
            (_, false) => Self::NegZ,
        }
    }

    /// Returns the unsigned axis index: 0 for X, 1 for Y, 2 for Z.
    pub const fn axis(self) -> usize {
        match self {
            Self::PosX | Self::NegX => 0,
            Self::PosY | Self::NegY => 1,
            Self::PosZ | Self::NegZ => 2,
        }
    }

    /// Returns whether this is a positive axis.
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::PosX | Self::PosY | Self::PosZ)
    }

    /// Returns the axis pointing the other way.
    pub const fn opposite(self) -> Self {
        Self::new(self.axis(), !self.is_positive())
    }

    /// Returns the integer unit vector along this axis.
    pub const fn unit(self) -> [i8; 3] {
        let mut ret = [0; 3];
        ret[self.axis()] = if self.is_positive() { 1 } else { -1 };
        ret
    }

    /// Returns the unit vector along this axis.
    pub fn vector(self) -> Vector3<f32> {
        let [x, y, z] = self.unit();
        Vector3::new(x as f32, y as f32, z as f32)
    }

    /// Returns the signed axis closest to `v`, or `None` if `v` is zero or not
    /// finite.
    pub fn nearest(v: Vector3<f32>) -> Option<Self> {
        let components = [v.x, v.y, v.z];
        if components.iter().any(|c| !c.is_finite()) {
            return None;
        }
        let (axis, &value) = components
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))?;
        (value != 0.0).then(|| Self::new(axis, value > 0.0))
    }

    /// Returns the cross product `self × other`, or `None` if the two axes are
    /// parallel.
    pub const fn cross(self, other: Self) -> Option<Self> {
        let a = self.axis();
        let b = other.axis();
        if a == b {
            return None;
        }
        let cyclic = b == (a + 1) % 3;
        let positive = cyclic == (self.is_positive() == other.is_positive());
        Some(Self::new(3 - a - b, positive))
    }

    /// Rotates an integer vector a quarter turn counterclockwise (right-hand
    /// rule) around this axis.
    pub const fn quarter_turn(self, v: [i8; 3]) -> [i8; 3] {
        // v' = (u·v)u + u×v
        let u = self.unit();
        let dot = u[0] * v[0] + u[1] * v[1] + u[2] * v[2];
        [
            dot * u[0] + u[1] * v[2] - u[2] * v[1],
            dot * u[1] + u[2] * v[0] - u[0] * v[2],
            dot * u[2] + u[0] * v[1] - u[1] * v[0],
        ]
    }

    /// Returns where this axis points after a quarter turn counterclockwise
    /// around `axis`.
    pub const fn rotated_about(self, axis: Self) -> Self {
        let [x, y, z] = axis.quarter_turn(self.unit());
        match (x, y, z) {
            (1, _, _) => Self::PosX,
            (-1, _, _) => Self::NegX,
            (_, 1, _) => Self::PosY,
            (_, -1, _) => Self::NegY,
            (_, _, 1) => Self::PosZ,
            _ => Self::NegZ,
        }
    }
}

/// Rotation direction: a swipe along `motion` across a surface whose normal
/// is `plane`.
///
/// The two axes are always perpendicular, so there are exactly 24 directions.
/// Layer rotations and whole-view rotations share this value space; the cube
/// instance decides what to do with it.
///
/// Each direction has a two-part numeric code `M.P` (see [`Direction::code()`])
/// which is what gets printed in logs.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Direction {
    motion: SignedAxis,
    plane: SignedAxis,
}

impl fmt::Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Direction({self}: {} on {})", self.motion, self.plane)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.code();
        write!(f, "{major}.{minor}")
    }
}

impl Direction {
    /// Constructs a direction, or returns `None` if `motion` and `plane` are
    /// parallel.
    pub const fn new(motion: SignedAxis, plane: SignedAxis) -> Option<Self> {
        if motion.axis() == plane.axis() {
            None
        } else {
            Some(Self { motion, plane })
        }
    }

    /// Constructs a direction in a `const` table.
    ///
    /// # Panics
    ///
    /// Panics (at compile time, in a `const` context) if the axes are
    /// parallel.
    pub const fn from_axes(motion: SignedAxis, plane: SignedAxis) -> Self {
        match Self::new(motion, plane) {
            Some(d) => d,
            None => panic!("motion and plane must be perpendicular"),
        }
    }

    /// Iterates over all 24 directions in code order.
    pub fn iter() -> impl Iterator<Item = Self> {
        SignedAxis::ALL.into_iter().flat_map(|motion| {
            SignedAxis::ALL
                .into_iter()
                .filter_map(move |plane| Self::new(motion, plane))
        })
    }

    /// Returns the direction of the swipe.
    pub const fn motion(self) -> SignedAxis {
        self.motion
    }
    /// Returns the normal of the surface swiped across.
    pub const fn plane(self) -> SignedAxis {
        self.plane
    }

    /// Returns the axis around which a counterclockwise quarter turn carries
    /// the swiped surface along the swipe.
    pub const fn rotation_axis(self) -> SignedAxis {
        match self.plane.cross(self.motion) {
            Some(axis) => axis,
            None => unreachable!(),
        }
    }

    /// Returns the numeric code `(M, P)` for this direction.
    ///
    /// `M` is the swipe axis: 0 = +X, 1 = -X, 2 = +Y, 3 = -Y, 4 = +Z, 5 = -Z.
    ///
    /// `P` is the plane normal, counted from 1 over the two remaining axes in
    /// cyclic order after the swipe axis, positive before negative. For a swipe
    /// along X that is 1 = +Y, 2 = -Y, 3 = +Z, 4 = -Z.
    pub const fn code(self) -> (u8, u8) {
        let m = self.motion.axis();
        let major = (m * 2) as u8 + if self.motion.is_positive() { 0 } else { 1 };
        let offset = if self.plane.axis() == (m + 1) % 3 { 0 } else { 2 };
        let minor = 1 + offset + if self.plane.is_positive() { 0 } else { 1 };
        (major, minor)
    }

    /// Parses a numeric code as returned by [`Direction::code()`].
    pub const fn from_code(major: u8, minor: u8) -> Option<Self> {
        if major > 5 || minor == 0 || minor > 4 {
            return None;
        }
        let m = (major / 2) as usize;
        let motion = SignedAxis::new(m, major % 2 == 0);
        let plane_axis = if minor <= 2 { m + 1 } else { m + 2 };
        let plane = SignedAxis::new(plane_axis, minor % 2 == 1);
        Self::new(motion, plane)
    }
}
