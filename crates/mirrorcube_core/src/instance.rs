use std::fmt;

use cgmath::{Point3, Vector3};
use rand::Rng;
use smallvec::SmallVec;
use web_time::Duration;

use crate::{Completion, Direction, Group, Intersection, Ray, ViewKind};

/// Stable numeric identifier of a sub-cube.
///
/// Each cube instance owns a contiguous range of indices starting at its
/// [`CubeInstance::min_cube_index()`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CubeIndex(pub u32);

impl fmt::Display for CubeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Single layer move: turn the layer containing `index` in `direction`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Sub-cube that selects the layer.
    pub index: CubeIndex,
    /// Direction to turn.
    pub direction: Direction,
}

/// List of intersections, nearest first.
pub type Intersections = SmallVec<[Intersection; 8]>;

/// One rendered 3×3×3 cube.
///
/// Rotations are animated: `rotate_move()` and `rotate_move_whole()` return
/// immediately, and the completion (if any) fires from a later call to
/// [`CubeInstance::step()`] once the animation finishes.
pub trait CubeInstance {
    /// Returns which view this instance represents.
    fn view(&self) -> ViewKind;
    /// Returns the lowest sub-cube index owned by this instance.
    fn min_cube_index(&self) -> CubeIndex;
    /// Returns the number of sub-cube indices owned by this instance.
    fn cube_count(&self) -> u32;
    /// Returns the transform of the whole cube.
    fn group(&self) -> &Group;

    /// Sets the world height visible at the origin plane, which
    /// `resize_height()` scales against. Called when the screen size changes.
    fn set_origin_height(&mut self, origin_height: f32);
    /// Lays out the cube to fill `percent` of the screen height, anchored to
    /// the top (`sign > 0`) or bottom (`sign < 0`) of the screen.
    fn resize_height(&mut self, percent: f32, sign: f32);
    /// Returns the cube to its solved state.
    fn reset(&mut self);

    /// Intersects a world-space ray with every child of the cube, including
    /// the bounding shell. Results are nearest first and in the cube's local
    /// frame.
    fn hit_test(&self, ray: &Ray) -> Intersections;

    /// Infers which layer turn a swipe of `displacement` across a surface with
    /// normal `normal` means, or returns `None` if the swipe is ambiguous.
    fn direction(&self, displacement: Vector3<f32>, normal: Vector3<f32>) -> Option<Direction>;

    /// Starts turning the layer containing `index`.
    fn rotate_move(&mut self, index: CubeIndex, direction: Direction, done: Option<Completion>);
    /// Starts turning the whole cube around the pivot sub-cube `pivot`.
    fn rotate_move_whole(&mut self, pivot: CubeIndex, direction: Direction, done: Option<Completion>);

    /// Generates a random scramble of `len` moves, in this instance's index
    /// space. Does not modify the cube.
    fn random_rotate<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Vec<Move>;

    /// Copies the sticker state of `source` onto this cube. If `anchor` or
    /// `scale` is given, the cube is also moved there.
    fn save(&mut self, source: &Self, anchor: Option<Point3<f32>>, scale: Option<f32>)
    where
        Self: Sized;

    /// Advances animations by `delta`. Returns whether anything moved.
    fn step(&mut self, delta: Duration) -> bool;
    /// Returns whether any rotation is queued or animating.
    fn is_animating(&self) -> bool;
}
