//! Multi-step and out-of-band operations: scramble, save, restore, reset.

use std::collections::VecDeque;

use cgmath::Point3;
use mirrorcube_core::{
    CubeIndex, CubeInstance, LockError, MirrorMap, Move, RotationKind, RotationLock, Ticket,
    ViewKind,
};

use crate::CubePair;

/// Error refusing a sequencer operation.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Another rotation is in flight.
    #[error(transparent)]
    Busy(#[from] LockError),
    /// Restore was requested before anything was saved.
    #[error("nothing has been saved")]
    NothingSaved,
}

/// Returns an error if any rotation is in flight.
pub fn ensure_idle(lock: &RotationLock) -> Result<(), LockError> {
    match lock.kind() {
        Some(kind) => Err(LockError::Busy(kind)),
        None => Ok(()),
    }
}

/// Chain of moves replayed on both views one at a time.
///
/// Each step goes to the front view without a completion and to the end view
/// with one; the next step starts only when that completion arrives. The lock
/// is held with the same ticket from the first step until the last one
/// completes.
#[derive(Debug)]
pub struct MoveSequence {
    ticket: Ticket,
    /// Remaining steps: the move in the front view's index space and the same
    /// sub-cube in the end view's.
    pending: VecDeque<(Move, CubeIndex)>,
    issued: usize,
}

impl MoveSequence {
    /// Acquires the lock and issues the first of `moves`, which are in the
    /// front view's index space.
    ///
    /// Returns `None` (with the lock released again) if there is nothing to
    /// do.
    pub fn start<C: CubeInstance>(
        lock: &mut RotationLock,
        mirror: &MirrorMap,
        cubes: &mut CubePair<C>,
        moves: Vec<Move>,
    ) -> Result<Option<Self>, LockError> {
        let ticket = lock.try_acquire(RotationKind::Sequence)?;
        let pending = moves
            .into_iter()
            .filter_map(|m| match mirror.map(ViewKind::Front, m.index) {
                Some(end_index) => Some((m, end_index)),
                None => {
                    log::error!("dropping scramble move on {}: not in front view", m.index);
                    None
                }
            })
            .collect::<VecDeque<_>>();
        log::debug!("starting sequence of {} moves", pending.len());

        let mut sequence = Self {
            ticket,
            pending,
            issued: 0,
        };
        if sequence.issue_next(lock, cubes) {
            Ok(Some(sequence))
        } else {
            lock.release(ticket);
            Ok(None)
        }
    }

    /// Returns the ticket holding the lock for this sequence.
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
    /// Returns the number of steps issued so far.
    pub fn issued(&self) -> usize {
        self.issued
    }
    /// Returns the number of steps not yet issued.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Issues the next step. Returns `false` if the sequence is finished.
    pub fn issue_next<C: CubeInstance>(
        &mut self,
        lock: &RotationLock,
        cubes: &mut CubePair<C>,
    ) -> bool {
        let Some((m, end_index)) = self.pending.pop_front() else {
            return false;
        };
        self.issued += 1;
        log::trace!(
            "sequence step {}: {} / {end_index} ({})",
            self.issued,
            m.index,
            m.direction,
        );
        cubes.front.rotate_move(m.index, m.direction, None);
        cubes
            .end
            .rotate_move(end_index, m.direction, Some(lock.completion(self.ticket)));
        true
    }
}

/// Returns both live cubes to the solved state.
pub fn reset<C: CubeInstance>(
    lock: &RotationLock,
    cubes: &mut CubePair<C>,
) -> Result<(), SequenceError> {
    ensure_idle(lock)?;
    log::debug!("resetting both views");
    cubes.front.reset();
    cubes.end.reset();
    Ok(())
}

/// Miniature cube showing the last saved state.
#[derive(Debug)]
pub struct Preview<C> {
    cube: C,
    has_save: bool,
}

impl<C: CubeInstance> Preview<C> {
    /// Wraps a cube to use as the preview. It shows nothing until the first
    /// save.
    pub fn new(cube: C) -> Self {
        Self {
            cube,
            has_save: false,
        }
    }

    /// Returns the preview cube.
    pub fn cube(&self) -> &C {
        &self.cube
    }
    /// Returns the preview cube mutably.
    pub fn cube_mut(&mut self) -> &mut C {
        &mut self.cube
    }
    /// Returns whether anything has been saved.
    pub fn has_save(&self) -> bool {
        self.has_save
    }

    /// Copies the front cube's state into the preview and moves the preview
    /// to `anchor`, scaled by `scale` relative to the front cube.
    pub fn save(
        &mut self,
        lock: &RotationLock,
        front: &C,
        anchor: Option<Point3<f32>>,
        scale: f32,
    ) -> Result<(), SequenceError> {
        ensure_idle(lock)?;
        log::debug!("saving front view");
        self.cube.save(front, anchor, Some(scale));
        self.has_save = true;
        Ok(())
    }

    /// Copies the saved state into both live cubes.
    pub fn restore(
        &self,
        lock: &RotationLock,
        cubes: &mut CubePair<C>,
    ) -> Result<(), SequenceError> {
        ensure_idle(lock)?;
        if !self.has_save {
            return Err(SequenceError::NothingSaved);
        }
        log::debug!("restoring saved state to both views");
        cubes.front.save(&self.cube, None, None);
        cubes.end.save(&self.cube, None, None);
        Ok(())
    }
}
