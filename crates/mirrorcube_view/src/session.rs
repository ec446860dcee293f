use cgmath::Point2;
use mirrorcube_core::ViewKind;

use crate::HitRecord;

/// Where a gesture point landed.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum GesturePoint {
    /// On a cube's surface.
    Surface(HitRecord),
    /// Off the cubes, in screen pixels.
    Screen(Point2<f32>),
}

/// State of the current single-finger gesture.
///
/// A session starts at touch-start and is cleared when the rotation it caused
/// completes. Lifting the finger does not clear it.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GestureSession {
    start: Option<GesturePoint>,
    moved: Option<GesturePoint>,
}

impl GestureSession {
    /// Starts a new gesture at `start`, discarding any previous one.
    pub fn begin(&mut self, start: GesturePoint) {
        *self = Self {
            start: Some(start),
            moved: None,
        };
    }

    /// Records the latest move point.
    pub fn record_move(&mut self, moved: GesturePoint) {
        self.moved = Some(moved);
    }

    /// Ends the gesture.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns the start point.
    pub fn start(&self) -> Option<&GesturePoint> {
        self.start.as_ref()
    }
    /// Returns the latest move point.
    pub fn moved(&self) -> Option<&GesturePoint> {
        self.moved.as_ref()
    }
    /// Returns whether no gesture is in progress.
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
    }

    /// Returns the view being manipulated, if known. For surface gestures this
    /// is the view touched at the start.
    pub fn target(&self) -> Option<ViewKind> {
        match self.start? {
            GesturePoint::Surface(hit) => Some(hit.view),
            GesturePoint::Screen(_) => None,
        }
    }
}
