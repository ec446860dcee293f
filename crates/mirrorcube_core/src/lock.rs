//! Single-rotation-at-a-time lock shared by both views.

use std::sync::mpsc;

/// Kind of operation holding the rotation lock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display)]
pub enum RotationKind {
    /// One layer turning on both views.
    #[strum(serialize = "layer")]
    Layer,
    /// Whole cube turning on both views.
    #[strum(serialize = "view")]
    View,
    /// Chain of layer moves (such as a scramble).
    #[strum(serialize = "sequence")]
    Sequence,
}

/// Proof that the rotation lock was acquired.
///
/// Tickets can only be obtained from [`RotationLock::try_acquire()`], and
/// [`Completion`]s can only be made from tickets, so nothing can hand a
/// completion to a cube without holding the lock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// One-shot signal that a rotation has finished.
///
/// Cube instances call [`Completion::complete()`] exactly once, when the
/// animation they were given this completion with has finished.
#[derive(Debug)]
pub struct Completion {
    ticket: Ticket,
    tx: mpsc::Sender<Ticket>,
}

impl Completion {
    /// Returns the ticket this completion reports.
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Signals completion.
    pub fn complete(self) {
        if self.tx.send(self.ticket).is_err() {
            log::warn!("rotation lock dropped before {:?} completed", self.ticket);
        }
    }
}

/// Error returned when the rotation lock cannot be acquired.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LockError {
    /// Another rotation is in flight.
    #[error("a {0} rotation is already in progress")]
    Busy(RotationKind),
}

/// Lock ensuring that at most one rotation (or rotation sequence) is in flight
/// across both views.
///
/// The lock is released only by [`RotationLock::release()`] with the ticket
/// that acquired it, which the owner does when the matching completion
/// arrives.
#[derive(Debug)]
pub struct RotationLock {
    state: Option<(RotationKind, Ticket)>,
    next_ticket: u64,
    tx: mpsc::Sender<Ticket>,
    rx: mpsc::Receiver<Ticket>,
}

impl Default for RotationLock {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationLock {
    /// Constructs an unlocked lock.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            state: None,
            next_ticket: 0,
            tx,
            rx,
        }
    }

    /// Returns whether a rotation is in flight.
    pub fn is_rotating(&self) -> bool {
        self.state.is_some()
    }
    /// Returns what kind of rotation holds the lock, if any.
    pub fn kind(&self) -> Option<RotationKind> {
        self.state.map(|(kind, _)| kind)
    }
    /// Returns whether `ticket` is the one currently holding the lock.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.state.is_some_and(|(_, t)| t == ticket)
    }

    /// Acquires the lock for a new rotation.
    pub fn try_acquire(&mut self, kind: RotationKind) -> Result<Ticket, LockError> {
        if let Some((busy, _)) = self.state {
            return Err(LockError::Busy(busy));
        }
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.state = Some((kind, ticket));
        log::trace!("acquired rotation lock for {kind} rotation ({ticket:?})");
        Ok(ticket)
    }

    /// Makes a completion that reports `ticket` back to this lock.
    pub fn completion(&self, ticket: Ticket) -> Completion {
        Completion {
            ticket,
            tx: self.tx.clone(),
        }
    }

    /// Returns the next completed ticket, if one has arrived. Never blocks.
    pub fn poll_completed(&self) -> Option<Ticket> {
        match self.rx.try_recv() {
            Ok(ticket) => Some(ticket),
            // The lock holds a sender, so the channel is never disconnected.
            Err(mpsc::TryRecvError::Empty | mpsc::TryRecvError::Disconnected) => None,
        }
    }

    /// Releases the lock if `ticket` holds it. Returns whether it did.
    pub fn release(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            log::trace!("released rotation lock ({ticket:?})");
            self.state = None;
            true
        } else {
            log::warn!("ignoring release with stale {ticket:?}");
            false
        }
    }
}
