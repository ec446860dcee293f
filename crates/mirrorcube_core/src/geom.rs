//! Screen-space and world-space geometry.

use cgmath::{
    Angle, Deg, EuclideanSpace, InnerSpace, Matrix4, Point2, Point3, Quaternion, SquareMatrix,
    Vector3, Vector4, Zero,
};

use crate::{CubeIndex, SignedAxis};

/// Size of the screen in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl ScreenSize {
    /// Converts a screen point (origin at the top left, Y down) to normalized
    /// device coordinates (origin at the center, Y up, range -1 to 1).
    pub fn to_ndc(self, p: Point2<f32>) -> Point2<f32> {
        Point2::new(p.x / self.width * 2.0 - 1.0, 1.0 - p.y / self.height * 2.0)
    }

    /// Converts normalized device coordinates back to a screen point.
    pub fn from_ndc(self, ndc: Point2<f32>) -> Point2<f32> {
        Point2::new(
            (ndc.x + 1.0) / 2.0 * self.width,
            (1.0 - ndc.y) / 2.0 * self.height,
        )
    }
}

/// Axis-aligned rectangle on the screen, in pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl ScreenRect {
    /// Returns the bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
    /// Returns the right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
    /// Returns the center of the rectangle.
    pub fn center(&self) -> Point2<f32> {
        Point2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
    /// Returns whether `p` is inside the rectangle, edges included.
    pub fn contains(&self, p: Point2<f32>) -> bool {
        (self.left..=self.right()).contains(&p.x) && (self.top..=self.bottom()).contains(&p.y)
    }
}

/// Half-line in 3D.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    /// Starting point.
    pub origin: Point3<f32>,
    /// Unit direction.
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Returns the point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Intersects the ray with the front faces of an axis-aligned box. Returns
    /// the distance to the entry point and the normal of the face entered.
    ///
    /// Returns `None` if the ray misses the box or starts inside it.
    pub fn intersect_box(&self, min: Point3<f32>, max: Point3<f32>) -> Option<(f32, SignedAxis)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut entry_face = None;

        for axis in 0..3 {
            let o = self.origin[axis];
            let d = self.direction[axis];
            if d == 0.0 {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let t_min = (min[axis] - o) / d;
            let t_max = (max[axis] - o) / d;
            let (near, far) = if d > 0.0 {
                (t_min, t_max)
            } else {
                (t_max, t_min)
            };
            if near > t_enter {
                t_enter = near;
                // Entering through the min face means the face points toward
                // negative infinity.
                entry_face = Some(SignedAxis::new(axis, d < 0.0));
            }
            t_exit = t_exit.min(far);
        }

        if t_enter > t_exit || t_enter < 0.0 {
            return None;
        }
        Some((t_enter, entry_face?))
    }
}

/// Position, orientation, and scale of a whole cube.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Group {
    /// World-space position of the cube center.
    pub position: Vector3<f32>,
    /// Orientation of the cube in world space.
    pub rotation: Quaternion<f32>,
    /// Uniform scale factor from cube-local units to world units.
    pub scale: f32,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl Group {
    /// Converts a world-space ray into the cube's local frame. Distances along
    /// the local ray are world distances divided by [`Group::scale`].
    pub fn to_local_ray(&self, ray: &Ray) -> Ray {
        let inv = self.rotation.conjugate();
        Ray {
            origin: Point3::from_vec(inv * ((ray.origin.to_vec() - self.position) / self.scale)),
            direction: (inv * ray.direction).normalize(),
        }
    }

    /// Converts a point in the cube's local frame to world space.
    pub fn to_world_point(&self, p: Point3<f32>) -> Point3<f32> {
        Point3::from_vec(self.rotation * (p.to_vec() * self.scale) + self.position)
    }
}

/// What a ray struck.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Body {
    /// Transparent bounding shell around the whole cube. Its face normal tells
    /// which plane a gesture is on.
    Shell,
    /// Visible cubelet.
    Cubelet(CubeIndex),
}

/// Intersection of a ray with one child of a cube instance.
///
/// Points, normals, and distances are in the cube's local frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Intersection {
    /// Distance along the ray.
    pub distance: f32,
    /// Point struck.
    pub point: Point3<f32>,
    /// Normal of the face struck.
    pub normal: Vector3<f32>,
    /// Object struck.
    pub body: Body,
}

/// Perspective camera looking at the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view.
    pub fov_y: Deg<f32>,
    /// Width divided by height.
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
    /// Camera position.
    pub eye: Point3<f32>,
    /// Point the camera looks at.
    pub target: Point3<f32>,
    /// Up direction.
    pub up: Vector3<f32>,
}

impl Camera {
    /// Constructs the default camera for a screen: 45° vertical field of view,
    /// placed on the +Z axis at `300 / aspect` looking at the origin.
    pub fn for_screen(screen: ScreenSize) -> Self {
        let aspect = screen.width / screen.height;
        Self {
            fov_y: Deg(45.0),
            aspect,
            near: 1.0,
            far: 1500.0,
            eye: Point3::new(0.0, 0.0, 300.0 / aspect),
            target: Point3::origin(),
            up: Vector3::unit_y(),
        }
    }

    /// Returns the combined view-projection matrix.
    pub fn view_projection(&self) -> Matrix4<f32> {
        cgmath::perspective(self.fov_y, self.aspect, self.near, self.far)
            * Matrix4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Returns the height of the world visible in the plane through the
    /// target, perpendicular to the view direction.
    pub fn origin_height(&self) -> f32 {
        (self.fov_y / 2.0).tan() * (self.eye - self.target).magnitude() * 2.0
    }
    /// Returns the width of the world visible in the plane through the target.
    pub fn origin_width(&self) -> f32 {
        self.origin_height() * self.aspect
    }

    /// Returns the ray from the camera through a point in normalized device
    /// coordinates, or `None` if the projection is degenerate.
    pub fn ray_through_ndc(&self, ndc: Point2<f32>) -> Option<Ray> {
        let inv = self.view_projection().invert()?;
        let p = Point3::from_homogeneous(inv * Vector4::new(ndc.x, ndc.y, 0.5, 1.0));
        let direction = (p - self.eye).normalize();
        (direction.x.is_finite() && direction.y.is_finite() && direction.z.is_finite()).then_some(
            Ray {
                origin: self.eye,
                direction,
            },
        )
    }

    /// Projects a world-space point to normalized device coordinates, or
    /// returns `None` if the point is behind the camera.
    pub fn project_to_ndc(&self, p: Point3<f32>) -> Option<Point2<f32>> {
        let clip = self.view_projection() * p.to_homogeneous();
        (clip.w > 0.0).then(|| Point2::new(clip.x / clip.w, clip.y / clip.w))
    }

    /// Returns where the ray through `ndc` crosses the plane `z = plane_z`.
    pub fn unproject_to_plane(&self, ndc: Point2<f32>, plane_z: f32) -> Option<Point3<f32>> {
        let ray = self.ray_through_ndc(ndc)?;
        if ray.direction.z == 0.0 {
            return None;
        }
        let t = (plane_z - ray.origin.z) / ray.direction.z;
        (t >= 0.0).then(|| ray.at(t))
    }
}
