use std::ops::Range;

use crate::{CubeIndex, CubeInstance, ViewKind};

/// Error constructing a [`MirrorMap`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MirrorError {
    /// The two instances own different numbers of sub-cubes.
    #[error("front view has {front} cubes but end view has {end}")]
    IncongruentRanges {
        /// Number of sub-cubes in the front view.
        front: u32,
        /// Number of sub-cubes in the end view.
        end: u32,
    },
    /// An instance was passed in the wrong slot.
    #[error("expected {expected} instance, got {got}")]
    WrongView {
        /// View expected in this slot.
        expected: ViewKind,
        /// View actually passed.
        got: ViewKind,
    },
    /// An index range runs past `u32::MAX`.
    #[error("cube index range of {0} view overflows")]
    Overflow(ViewKind),
}

/// Bijection between the sub-cube index spaces of the front and end views.
///
/// An index in one view maps to the index with the same offset from the other
/// view's [`CubeInstance::min_cube_index()`], so the same logical sub-cube is
/// addressed on both.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MirrorMap {
    front_min: u32,
    end_min: u32,
    count: u32,
}

impl MirrorMap {
    /// Constructs a mirror map between two instances, checking that they own
    /// the same number of sub-cubes.
    pub fn new(front: &impl CubeInstance, end: &impl CubeInstance) -> Result<Self, MirrorError> {
        for (expected, got) in [(ViewKind::Front, front.view()), (ViewKind::End, end.view())] {
            if expected != got {
                return Err(MirrorError::WrongView { expected, got });
            }
        }
        if front.cube_count() != end.cube_count() {
            return Err(MirrorError::IncongruentRanges {
                front: front.cube_count(),
                end: end.cube_count(),
            });
        }
        Self::from_ranges(
            front.min_cube_index(),
            end.min_cube_index(),
            front.cube_count(),
        )
    }

    /// Constructs a mirror map from the lowest index of each view and the
    /// number of sub-cubes per view.
    pub fn from_ranges(
        front_min: CubeIndex,
        end_min: CubeIndex,
        count: u32,
    ) -> Result<Self, MirrorError> {
        for (view, min) in [(ViewKind::Front, front_min), (ViewKind::End, end_min)] {
            if min.0.checked_add(count).is_none() {
                return Err(MirrorError::Overflow(view));
            }
        }
        Ok(Self {
            front_min: front_min.0,
            end_min: end_min.0,
            count,
        })
    }

    fn min(&self, view: ViewKind) -> u32 {
        match view {
            ViewKind::Front => self.front_min,
            ViewKind::End => self.end_min,
        }
    }

    /// Returns the range of raw indices owned by `view`.
    pub fn range(&self, view: ViewKind) -> Range<u32> {
        let min = self.min(view);
        min..min + self.count
    }

    /// Returns whether `index` belongs to `view`.
    pub fn contains(&self, view: ViewKind, index: CubeIndex) -> bool {
        self.range(view).contains(&index.0)
    }

    /// Maps an index in `from`'s space to the same sub-cube in the other view.
    ///
    /// Returns `None` if `index` does not belong to `from`.
    pub fn map(&self, from: ViewKind, index: CubeIndex) -> Option<CubeIndex> {
        if !self.contains(from, index) {
            return None;
        }
        Some(CubeIndex(index.0 - self.min(from) + self.min(from.mirror())))
    }
}
