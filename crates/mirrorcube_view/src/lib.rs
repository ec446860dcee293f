//! Touch gesture handling for a pair of mirrored 3×3×3 cube views.
//!
//! The screen is split by a draggable divider into a front view (above) and
//! an end view (below) of the same logical cube. A swipe that starts on a
//! cube's surface turns a layer; a swipe that starts on empty space rotates
//! the whole cube. Either way, both views receive the same logical rotation,
//! and no new rotation starts until the previous one has finished on both.
//!
//! [`MirrorCubeController`] is the entry point. It is generic over the
//! [`CubeInstance`] implementation that draws the cubes.
//!
//! [`CubeInstance`]: mirrorcube_core::CubeInstance

mod controller;
pub mod controls;
mod orchestrator;
mod pair;
pub mod probe;
pub mod resolve;
mod sequencer;
mod session;

#[cfg(test)]
mod tests;

pub use controller::MirrorCubeController;
pub use controls::{Button, ButtonKind, Control, TouchLine};
pub use orchestrator::RotationOrchestrator;
pub use pair::CubePair;
pub use probe::HitRecord;
pub use sequencer::{MoveSequence, Preview, SequenceError};
pub use session::{GesturePoint, GestureSession};
