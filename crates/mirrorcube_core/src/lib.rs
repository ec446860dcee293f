//! Core types shared by the mirrored cube views: rotation directions, view
//! tags, screen and ray geometry, the cube instance contract, and the
//! rotation lock.

mod direction;
mod geom;
mod instance;
mod lock;
mod mirror;
mod view;


pub use direction::{Direction, SignedAxis};
pub use geom::{Body, Camera, Group, Intersection, Ray, ScreenRect, ScreenSize};
pub use instance::{CubeIndex, CubeInstance, Intersections, Move};
pub use lock::{Completion, LockError, RotationKind, RotationLock, Ticket};
pub use mirror::{MirrorError, MirrorMap};
pub use view::ViewKind;

/// Number of cubelets in a 3×3×3 cube.
pub const CUBELET_COUNT: u32 = 27;
