use mirrorcube_core::{
    CubeInstance, MirrorMap, RotationKind, RotationLock, ScreenRect, ScreenSize, Ticket,
};

use crate::probe::region_at;
use crate::resolve::{resolve_layer_rotation, resolve_view_rotation, view_pivot_index};
use crate::{CubePair, GesturePoint, GestureSession};

/// Issues gesture rotations to both cubes, one at a time.
///
/// The view that was touched gets its rotation without a completion; the
/// mirrored view gets the same logical rotation with the completion. When
/// that completion arrives, [`RotationOrchestrator::finish()`] releases the
/// lock and clears the gesture.
#[derive(Debug)]
pub struct RotationOrchestrator {
    lock: RotationLock,
    mirror: MirrorMap,
    session: GestureSession,
}

impl RotationOrchestrator {
    /// Constructs an idle orchestrator with an empty gesture.
    pub fn new(mirror: MirrorMap) -> Self {
        Self {
            lock: RotationLock::new(),
            mirror,
            session: GestureSession::default(),
        }
    }

    /// Returns the rotation lock.
    pub fn lock(&self) -> &RotationLock {
        &self.lock
    }
    /// Returns the rotation lock mutably, for sequences that hold it.
    pub fn lock_mut(&mut self) -> &mut RotationLock {
        &mut self.lock
    }
    /// Returns the index mapping between the views.
    pub fn mirror(&self) -> &MirrorMap {
        &self.mirror
    }
    /// Returns the current gesture.
    pub fn session(&self) -> &GestureSession {
        &self.session
    }
    /// Returns the current gesture mutably.
    pub fn session_mut(&mut self) -> &mut GestureSession {
        &mut self.session
    }
    /// Returns whether any rotation is in flight.
    pub fn is_rotating(&self) -> bool {
        self.lock.is_rotating()
    }

    /// Turns the layer under the gesture's latest point on both views, if the
    /// gesture is a swipe across one view's surface.
    ///
    /// Returns the ticket holding the lock, or `None` if nothing was issued.
    pub fn rotate_layer<C: CubeInstance>(&mut self, cubes: &mut CubePair<C>) -> Option<Ticket> {
        if let Some(kind) = self.lock.kind() {
            log::trace!("not turning layer during {kind} rotation");
            return None;
        }
        let (Some(&GesturePoint::Surface(start)), Some(&GesturePoint::Surface(moved))) =
            (self.session.start(), self.session.moved())
        else {
            return None;
        };
        if moved.view != start.view || moved.point == start.point {
            return None;
        }

        let target = start.view;
        let Some(direction) = resolve_layer_rotation(cubes.get(target), &start, &moved) else {
            log::trace!("no layer direction for swipe on {target} yet");
            return None;
        };
        let Some(mirror_index) = self.mirror.map(target, moved.index) else {
            log::error!("{} has no mirror in {}", moved.index, target.mirror());
            return None;
        };

        let ticket = self.acquire(RotationKind::Layer)?;
        log::debug!(
            "turning layer of {} on {target} and {mirror_index} on {} ({direction})",
            moved.index,
            target.mirror(),
        );
        cubes.get_mut(target).rotate_move(moved.index, direction, None);
        cubes.get_mut(target.mirror()).rotate_move(
            mirror_index,
            direction,
            Some(self.lock.completion(ticket)),
        );
        Some(ticket)
    }

    /// Rotates both whole cubes, if the gesture is a swipe across empty
    /// screen space.
    ///
    /// The view is chosen by the start point's height relative to `divider`.
    /// Returns the ticket holding the lock, or `None` if nothing was issued.
    pub fn rotate_view<C: CubeInstance>(
        &mut self,
        cubes: &mut CubePair<C>,
        screen: ScreenSize,
        divider: &ScreenRect,
    ) -> Option<Ticket> {
        if let Some(kind) = self.lock.kind() {
            log::trace!("not rotating view during {kind} rotation");
            return None;
        }
        let (Some(&GesturePoint::Screen(start)), Some(&GesturePoint::Screen(moved))) =
            (self.session.start(), self.session.moved())
        else {
            return None;
        };
        if moved == start {
            return None;
        }
        let Some(target) = region_at(divider, start.y) else {
            log::trace!("view swipe started on the divider");
            return None;
        };

        let direction = resolve_view_rotation(target, screen, start, moved);
        let pivot = view_pivot_index(target);
        let ticket = self.acquire(RotationKind::View)?;
        log::debug!("rotating both views around {pivot} ({direction}) from {target}");
        cubes.get_mut(target).rotate_move_whole(pivot, direction, None);
        cubes.get_mut(target.mirror()).rotate_move_whole(
            pivot,
            direction,
            Some(self.lock.completion(ticket)),
        );
        Some(ticket)
    }

    /// Handles the completion of a gesture rotation: releases the lock and
    /// clears the gesture. Returns whether `ticket` held the lock.
    pub fn finish(&mut self, ticket: Ticket) -> bool {
        if self.lock.release(ticket) {
            self.session.clear();
            true
        } else {
            false
        }
    }

    fn acquire(&mut self, kind: RotationKind) -> Option<Ticket> {
        match self.lock.try_acquire(kind) {
            Ok(ticket) => Some(ticket),
            Err(e) => {
                log::warn!("{e}");
                None
            }
        }
    }
}
