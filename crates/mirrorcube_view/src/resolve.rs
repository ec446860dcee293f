//! Swipe to rotation direction.

use cgmath::{Angle, Deg, Point2};
use mirrorcube_core::{CubeIndex, CubeInstance, Direction, ScreenSize, ViewKind};

use crate::HitRecord;

/// Steepest angle from horizontal at which a swipe still counts as
/// horizontal.
const VERTICAL_THRESHOLD: Deg<f32> = Deg(30.0);

/// Sub-cube passed as the pivot of whole-view rotations on the front view.
pub const FRONT_PIVOT: CubeIndex = CubeIndex(10);
/// Sub-cube passed as the pivot of whole-view rotations on the end view.
pub const END_PIVOT: CubeIndex = CubeIndex(65);

/// Half of the screen a swipe started in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum ScreenHalf {
    /// Strictly right of center.
    Right,
    /// Left of center, or exactly on it.
    Left,
}

/// Dominant axis of a screen-space swipe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[allow(missing_docs)]
pub enum SwipeAxis {
    Vertical,
    Horizontal,
}

/// Screen-space swipe, reduced to its dominant axis and sign.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Swipe {
    /// Dominant axis.
    pub axis: SwipeAxis,
    /// For vertical swipes, whether the swipe goes up the screen. For
    /// horizontal swipes, whether it goes right.
    pub positive: bool,
}

const fn code(major: u8, minor: u8) -> Direction {
    match Direction::from_code(major, minor) {
        Some(d) => d,
        None => panic!("invalid direction code"),
    }
}

/// Whole-view rotation for each `[view][half][axis][sign]`, where `sign` is 0
/// for positive swipes and 1 for negative ones.
const VIEW_DIRECTIONS: [[[[Direction; 2]; 2]; 2]; 2] = [
    // front
    [
        [[code(2, 1), code(3, 1)], [code(0, 3), code(1, 3)]], // right
        [[code(2, 4), code(3, 4)], [code(4, 4), code(5, 4)]], // left
    ],
    // end
    [
        [[code(2, 2), code(3, 2)], [code(1, 4), code(0, 4)]], // right
        [[code(2, 3), code(3, 3)], [code(5, 3), code(4, 3)]], // left
    ],
];

/// Returns which half of the screen `x` is in. The exact center counts as
/// the left half.
pub fn screen_half(screen: ScreenSize, x: f32) -> ScreenHalf {
    if x > screen.width / 2.0 {
        ScreenHalf::Right
    } else {
        ScreenHalf::Left
    }
}

/// Classifies a swipe from `start` to `moved`, both in screen pixels (Y down).
///
/// A swipe is vertical iff `|Δy| > |Δx|·tan 30°`.
pub fn classify_swipe(start: Point2<f32>, moved: Point2<f32>) -> Swipe {
    let len_x = moved.x - start.x;
    let len_y = moved.y - start.y;
    if len_y.abs() > len_x.abs() * VERTICAL_THRESHOLD.tan() {
        Swipe {
            axis: SwipeAxis::Vertical,
            positive: len_y < 0.0,
        }
    } else {
        Swipe {
            axis: SwipeAxis::Horizontal,
            positive: len_x > 0.0,
        }
    }
}

/// Looks up the whole-view rotation for a swipe.
pub fn view_direction(view: ViewKind, half: ScreenHalf, swipe: Swipe) -> Direction {
    let v = match view {
        ViewKind::Front => 0,
        ViewKind::End => 1,
    };
    let h = match half {
        ScreenHalf::Right => 0,
        ScreenHalf::Left => 1,
    };
    let a = match swipe.axis {
        SwipeAxis::Vertical => 0,
        SwipeAxis::Horizontal => 1,
    };
    let s = if swipe.positive { 0 } else { 1 };
    VIEW_DIRECTIONS[v][h][a][s]
}

/// Resolves a whole-view rotation from a screen-space swipe on `view`.
pub fn resolve_view_rotation(
    view: ViewKind,
    screen: ScreenSize,
    start: Point2<f32>,
    moved: Point2<f32>,
) -> Direction {
    view_direction(view, screen_half(screen, start.x), classify_swipe(start, moved))
}

/// Returns the pivot passed to whole-view rotations on `view`.
pub fn view_pivot_index(view: ViewKind) -> CubeIndex {
    match view {
        ViewKind::Front => FRONT_PIVOT,
        ViewKind::End => END_PIVOT,
    }
}

/// Resolves a layer rotation by handing the swipe between two surface points
/// to the cube that was touched. The plane comes from the face under the
/// moved point.
pub fn resolve_layer_rotation<C: CubeInstance>(
    cube: &C,
    start: &HitRecord,
    moved: &HitRecord,
) -> Option<Direction> {
    cube.direction(moved.point - start.point, moved.normal)
}
