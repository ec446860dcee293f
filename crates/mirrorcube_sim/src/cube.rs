use cgmath::{Deg, EuclideanSpace, Point3, Quaternion, Rotation3, Vector3};
use float_ord::FloatOrd;
use mirrorcube_core::*;
use mirrorprefs::{AnimationPreferences, Preferences};
use rand::Rng;
use web_time::Duration;

use crate::{CubeImage, Twist, TwistAnimation, TwistAnimationState, TwistTarget};

/// Half the edge length of a cubelet, in local units.
const CUBELET_HALF_EXTENT: f32 = 0.5;
/// Half the edge length of the bounding shell. Slightly larger than the cube so
/// that the shell is always struck before the cubelet behind it.
const SHELL_HALF_EXTENT: f32 = 1.51;
/// Edge length of the whole cube, in local units.
const CUBE_SIZE: f32 = 3.0;

/// Layout and animation parameters shared by cubes on the same screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SimCubeParams {
    /// World height visible at the origin plane.
    pub origin_height: f32,
    /// Fraction of its view's height that a cube's edge spans.
    pub cube_fill: f32,
    /// Animation timing.
    pub animation: AnimationPreferences,
}

impl SimCubeParams {
    /// Constructs parameters for cubes seen through `camera`.
    pub fn new(camera: &Camera, prefs: &Preferences) -> Self {
        Self {
            origin_height: camera.origin_height(),
            cube_fill: prefs.layout.cube_fill,
            animation: prefs.animation.clone(),
        }
    }
}

/// Headless 3×3×3 cube.
#[derive(Debug)]
pub struct SimCube {
    view: ViewKind,
    min_index: CubeIndex,
    params: SimCubeParams,

    state: CubeImage,
    group: Group,
    twist_anim: TwistAnimationState,
}

impl SimCube {
    /// Constructs a solved cube showing `view`, owning the indices starting at
    /// `min_index`.
    pub fn new(view: ViewKind, min_index: CubeIndex, params: SimCubeParams) -> Self {
        Self {
            view,
            min_index,
            params,

            state: CubeImage::solved(),
            group: Group {
                rotation: home_rotation(view),
                ..Group::default()
            },
            twist_anim: TwistAnimationState::default(),
        }
    }

    /// Returns the current sticker state. Queued turns are not included until
    /// they finish.
    pub fn image(&self) -> &CubeImage {
        &self.state
    }

    /// Returns whether the cube is solved.
    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }

    /// Returns the twist being animated and its eased progress from 0 to 1.
    pub fn animated_twist(&self) -> Option<(Twist, f32)> {
        let (anim, t) = self
            .twist_anim
            .current(self.params.animation.twist_interpolation)?;
        // Every twist queued before this one has already been applied.
        Some((anim.target?.resolve(&self.state)?, t))
    }

    /// Returns the world-space position of a point in this cube's local frame.
    pub fn local_to_world(&self, p: Point3<f32>) -> Point3<f32> {
        self.group.to_world_point(p)
    }

    fn offset(&self, index: CubeIndex) -> Option<u32> {
        let offset = index.0.checked_sub(self.min_index.0)?;
        (offset < CUBELET_COUNT).then_some(offset)
    }

    fn push_twist(
        &mut self,
        target: Option<TwistTarget>,
        duration: Duration,
        done: Option<Completion>,
    ) {
        self.twist_anim.push(TwistAnimation {
            target,
            duration,
            done,
        });
    }
}

/// Orientation that shows three faces of the cube: the front view looks at the
/// +X, +Y, and +Z faces and the end view at the opposite ones.
fn home_rotation(view: ViewKind) -> Quaternion<f32> {
    match view {
        ViewKind::Front => Quaternion::from_angle_x(Deg(25.0)) * Quaternion::from_angle_y(Deg(-45.0)),
        ViewKind::End => Quaternion::from_angle_x(Deg(-25.0)) * Quaternion::from_angle_y(Deg(135.0)),
    }
}

impl CubeInstance for SimCube {
    fn view(&self) -> ViewKind {
        self.view
    }
    fn min_cube_index(&self) -> CubeIndex {
        self.min_index
    }
    fn cube_count(&self) -> u32 {
        CUBELET_COUNT
    }
    fn group(&self) -> &Group {
        &self.group
    }

    fn set_origin_height(&mut self, origin_height: f32) {
        self.params.origin_height = origin_height;
    }
    fn resize_height(&mut self, percent: f32, sign: f32) {
        let origin_height = self.params.origin_height;
        self.group.position = Vector3::new(0.0, sign * (1.0 - percent) / 2.0 * origin_height, 0.0);
        self.group.scale = percent * origin_height * self.params.cube_fill / CUBE_SIZE;
    }

    fn reset(&mut self) {
        for anim in self.twist_anim.drain() {
            if let Some(done) = anim.done {
                done.complete();
            }
        }
        self.state = CubeImage::solved();
        self.group.rotation = home_rotation(self.view);
    }

    fn hit_test(&self, ray: &Ray) -> Intersections {
        let ray = self.group.to_local_ray(ray);
        let mut hits = Intersections::new();

        let shell = Point3::new(SHELL_HALF_EXTENT, SHELL_HALF_EXTENT, SHELL_HALF_EXTENT);
        let boxes = std::iter::once((Body::Shell, Point3::origin(), shell)).chain(
            self.state.cubelets().map(|(offset, cubelet)| {
                let [x, y, z] = cubelet.position.map(f32::from);
                let half = CUBELET_HALF_EXTENT;
                (
                    Body::Cubelet(CubeIndex(self.min_index.0 + offset)),
                    Point3::new(x, y, z),
                    Point3::new(half, half, half),
                )
            }),
        );
        for (body, center, half) in boxes {
            let min = center - half.to_vec();
            let max = center + half.to_vec();
            if let Some((distance, face)) = ray.intersect_box(min, max) {
                hits.push(Intersection {
                    distance,
                    point: ray.at(distance),
                    normal: face.vector(),
                    body,
                });
            }
        }

        hits.sort_by_key(|hit| FloatOrd(hit.distance));
        hits
    }

    fn direction(&self, displacement: Vector3<f32>, normal: Vector3<f32>) -> Option<Direction> {
        let plane = SignedAxis::nearest(normal)?;
        let mut in_plane = displacement;
        in_plane[plane.axis()] = 0.0;
        let motion = SignedAxis::nearest(in_plane)?;
        Direction::new(motion, plane)
    }

    fn rotate_move(&mut self, index: CubeIndex, direction: Direction, done: Option<Completion>) {
        let Some(cubelet) = self.offset(index) else {
            log::error!("{} cube has no cubelet {index}", self.view);
            // The caller still expects a completion.
            self.push_twist(None, Duration::ZERO, done);
            return;
        };
        // The layer is picked when the twist starts, after earlier queued
        // twists have moved the cubelet.
        let target = TwistTarget::Layer {
            axis: direction.rotation_axis(),
            cubelet,
        };
        log::trace!("{} cube turning {target:?} ({direction})", self.view);
        let duration = self.params.animation.twist();
        self.push_twist(Some(target), duration, done);
    }

    fn rotate_move_whole(&mut self, pivot: CubeIndex, direction: Direction, done: Option<Completion>) {
        let target = TwistTarget::Whole {
            axis: direction.rotation_axis(),
        };
        log::trace!(
            "{} cube turning around pivot {pivot}: {target:?} ({direction})",
            self.view,
        );
        let duration = self.params.animation.whole();
        self.push_twist(Some(target), duration, done);
    }

    fn random_rotate<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Vec<Move> {
        let directions = Direction::iter().collect::<Vec<_>>();
        (0..len)
            .map(|_| Move {
                index: CubeIndex(self.min_index.0 + rng.random_range(0..CUBELET_COUNT)),
                direction: directions[rng.random_range(0..directions.len())],
            })
            .collect()
    }

    fn save(&mut self, source: &Self, anchor: Option<Point3<f32>>, scale: Option<f32>) {
        self.state = source.state.clone();
        if let Some(anchor) = anchor {
            self.group.position = anchor.to_vec();
            self.group.rotation = source.group.rotation;
        }
        if let Some(scale) = scale {
            self.group.scale = source.group.scale * scale;
        }
    }

    fn step(&mut self, delta: Duration) -> bool {
        let state = &mut self.state;
        self.twist_anim.proceed(delta, |anim| {
            if let Some(twist) = anim.target.and_then(|target| target.resolve(state)) {
                state.apply(twist);
            }
            if let Some(done) = anim.done {
                done.complete();
            }
        })
    }

    fn is_animating(&self) -> bool {
        !self.twist_anim.is_empty()
    }
}
