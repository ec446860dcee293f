use mirrorcube_core::ViewKind;

/// The two live cube instances.
#[derive(Debug)]
pub struct CubePair<C> {
    /// Cube in the upper view.
    pub front: C,
    /// Cube in the lower view.
    pub end: C,
}

impl<C> CubePair<C> {
    /// Returns the cube for `view`.
    pub fn get(&self, view: ViewKind) -> &C {
        match view {
            ViewKind::Front => &self.front,
            ViewKind::End => &self.end,
        }
    }

    /// Returns the cube for `view` mutably.
    pub fn get_mut(&mut self, view: ViewKind) -> &mut C {
        match view {
            ViewKind::Front => &mut self.front,
            ViewKind::End => &mut self.end,
        }
    }

    /// Returns both cubes mutably, front first.
    pub fn both_mut(&mut self) -> [&mut C; 2] {
        [&mut self.front, &mut self.end]
    }
}
