use std::collections::VecDeque;

use mirrorcube_core::{Completion, SignedAxis};
use mirrorprefs::InterpolateFn;
use web_time::Duration;

use crate::CubeImage;

/// Quarter turn of some cubelets around an axis through the cube center.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twist {
    /// Axis to turn counterclockwise around.
    pub axis: SignedAxis,
    /// Coordinate along `axis` of the layer to turn (-1, 0, or 1), or `None`
    /// to turn the whole cube.
    pub layer: Option<i8>,
}

impl Twist {
    /// Returns whether a cubelet at `position` moves in this twist.
    pub fn grips(&self, position: [i8; 3]) -> bool {
        self.layer
            .is_none_or(|layer| position[self.axis.axis()] == layer)
    }
}

/// What a queued twist turns. Layers are picked by cubelet, so the layer is
/// only known once every earlier twist has been applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TwistTarget {
    /// Layer holding the cubelet at `cubelet` when the twist starts.
    Layer {
        /// Axis to turn counterclockwise around.
        axis: SignedAxis,
        /// Cubelet offset, which does not change as the cubelet moves.
        cubelet: u32,
    },
    /// Whole cube.
    Whole {
        /// Axis to turn counterclockwise around.
        axis: SignedAxis,
    },
}

impl TwistTarget {
    /// Returns the twist this target means for `image`.
    pub fn resolve(self, image: &CubeImage) -> Option<Twist> {
        match self {
            Self::Layer { axis, cubelet } => Some(Twist {
                axis,
                layer: Some(image.cubelet(cubelet)?.position[axis.axis()]),
            }),
            Self::Whole { axis } => Some(Twist { axis, layer: None }),
        }
    }
}

/// Queued twist animation.
#[derive(Debug)]
pub struct TwistAnimation {
    /// What to turn when the animation finishes, or `None` for an animation
    /// that only reports completion.
    pub target: Option<TwistTarget>,
    /// How long the animation takes.
    pub duration: Duration,
    /// Completion to fire when the animation finishes.
    pub done: Option<Completion>,
}

/// Queue of twist animations on one cube.
#[derive(Debug, Default)]
pub struct TwistAnimationState {
    /// Queue of twist animations to be displayed.
    queue: VecDeque<TwistAnimation>,
    /// Progress of the animation in the current twist, from 0.0 to 1.0.
    progress: f32,
}
impl TwistAnimationState {
    /// Steps the animation forward, calling `on_finish` for each animation
    /// that finishes, in order. Returns whether anything moved.
    ///
    /// Time left over after one animation finishes goes to the next one.
    pub fn proceed(
        &mut self,
        delta: Duration,
        mut on_finish: impl FnMut(TwistAnimation),
    ) -> bool {
        if self.queue.is_empty() {
            return false;
        }

        let mut remaining = delta.as_secs_f32();
        while let Some(anim) = self.queue.front() {
            let total = anim.duration.as_secs_f32();
            let needed = (1.0 - self.progress) * total;
            if total <= 0.0 || remaining >= needed {
                remaining -= needed.max(0.0);
                self.progress = 0.0;
                if let Some(anim) = self.queue.pop_front() {
                    on_finish(anim);
                }
            } else {
                self.progress += remaining / total;
                break;
            }
        }

        true
    }

    /// Queues an animation after the ones already queued.
    pub fn push(&mut self, anim: TwistAnimation) {
        self.queue.push_back(anim);
    }

    /// Returns the animation in progress and its eased progress.
    pub fn current(&self, interpolate: InterpolateFn) -> Option<(&TwistAnimation, f32)> {
        Some((self.queue.front()?, interpolate.interpolate(self.progress)))
    }

    /// Returns whether no animation is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Removes every queued animation without finishing it.
    pub fn drain(&mut self) -> impl Iterator<Item = TwistAnimation> + '_ {
        self.progress = 0.0;
        self.queue.drain(..)
    }
}
