//! Screen point to cube surface.

use cgmath::{Point2, Point3, Vector3};
use mirrorcube_core::{
    Body, Camera, CubeIndex, CubeInstance, Intersection, ScreenRect, ScreenSize, ViewKind,
};

use crate::CubePair;

/// Point on a cube's surface under a touch.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HitRecord {
    /// View that was touched.
    pub view: ViewKind,
    /// Point struck, in the cube's local frame.
    pub point: Point3<f32>,
    /// Sub-cube struck.
    pub index: CubeIndex,
    /// Normal of the bounding shell face the point lies under. This is the
    /// plane any swipe starting here is constrained to.
    pub normal: Vector3<f32>,
}

/// Returns which view's region contains screen height `y`, or `None` if `y`
/// is on the divider.
pub fn region_at(divider: &ScreenRect, y: f32) -> Option<ViewKind> {
    if y < divider.top {
        Some(ViewKind::Front)
    } else if y > divider.bottom() {
        Some(ViewKind::End)
    } else {
        None
    }
}

/// Pairs the two nearest intersections into a cubelet hit and a shell normal.
///
/// The shell may be either of the two. Returns `None` if there are fewer than
/// two intersections or if they are not exactly one shell and one cubelet.
pub fn pair_intersections(hits: &[Intersection]) -> Option<(Intersection, CubeIndex, Vector3<f32>)> {
    let [a, b] = hits.get(..2)? else {
        return None;
    };
    let (shell, visible, index) = match (a.body, b.body) {
        (Body::Shell, Body::Cubelet(i)) => (a, b, i),
        (Body::Cubelet(i), Body::Shell) => (b, a, i),
        _ => return None,
    };
    Some((*visible, index, shell.normal))
}

/// Finds the cube surface under a screen point.
pub fn probe<C: CubeInstance>(
    cubes: &CubePair<C>,
    camera: &Camera,
    screen: ScreenSize,
    divider: &ScreenRect,
    point: Point2<f32>,
) -> Option<HitRecord> {
    let view = region_at(divider, point.y)?;
    let ray = camera.ray_through_ndc(screen.to_ndc(point))?;
    let hits = cubes.get(view).hit_test(&ray);
    let (visible, index, normal) = pair_intersections(&hits)?;
    Some(HitRecord {
        view,
        point: visible.point,
        index,
        normal,
    })
}

#[cfg(test)]
mod tests {
    use mirrorcube_core::SignedAxis;
    use pretty_assertions::assert_eq;

    use super::*;

    fn hit(body: Body, distance: f32, normal: SignedAxis) -> Intersection {
        Intersection {
            distance,
            point: Point3::new(distance, 0.0, 0.0),
            normal: normal.vector(),
            body,
        }
    }

    #[test]
    fn test_region_boundaries() {
        let divider = ScreenRect {
            left: 0.0,
            top: 680.0,
            width: 1000.0,
            height: 80.0,
        };
        assert_eq!(Some(ViewKind::Front), region_at(&divider, 679.9));
        assert_eq!(None, region_at(&divider, 680.0));
        assert_eq!(None, region_at(&divider, 720.0));
        assert_eq!(None, region_at(&divider, 760.0));
        assert_eq!(Some(ViewKind::End), region_at(&divider, 760.1));
    }

    #[test]
    fn test_pair_intersections_in_either_order() {
        let shell = hit(Body::Shell, 1.0, SignedAxis::PosZ);
        let cubelet = hit(Body::Cubelet(CubeIndex(22)), 1.01, SignedAxis::PosX);
        let behind = hit(Body::Cubelet(CubeIndex(21)), 2.0, SignedAxis::PosY);

        let expected = Some((cubelet, CubeIndex(22), Vector3::unit_z()));
        assert_eq!(expected, pair_intersections(&[shell, cubelet, behind]));
        assert_eq!(expected, pair_intersections(&[cubelet, shell, behind]));

        assert_eq!(None, pair_intersections(&[shell]));
        assert_eq!(None, pair_intersections(&[cubelet, behind, shell]));
        assert_eq!(None, pair_intersections(&[shell, shell]));
        assert_eq!(None, pair_intersections(&[]));
    }
}
