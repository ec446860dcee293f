use cgmath::{EuclideanSpace, Point2, Point3, Vector2, Vector3};
use mirrorcube_core::*;
use mirrorcube_sim::{CubeImage, SimCube, SimCubeParams, Twist};
use mirrorprefs::Preferences;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::Rng;
use web_time::Duration;

use crate::*;

const SCREEN: ScreenSize = ScreenSize {
    width: 1000.0,
    height: 800.0,
};
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Copy, Clone, PartialEq)]
enum Command {
    Move(CubeIndex, Direction, bool),
    Whole(CubeIndex, Direction, bool),
    Reset,
    Save,
}

/// Cube that records every command it receives. Rotations complete on the
/// next step.
#[derive(Debug)]
struct MockCube {
    view: ViewKind,
    min: CubeIndex,
    count: u32,
    group: Group,
    /// Whether rays strike the cube.
    solid: bool,
    commands: Vec<Command>,
    pending: Vec<Completion>,
}

impl MockCube {
    fn new(view: ViewKind, min: u32) -> Self {
        Self {
            view,
            min: CubeIndex(min),
            count: CUBELET_COUNT,
            group: Group::default(),
            solid: false,
            commands: vec![],
            pending: vec![],
        }
    }

    fn solid(mut self) -> Self {
        self.solid = true;
        self
    }
}

impl CubeInstance for MockCube {
    fn view(&self) -> ViewKind {
        self.view
    }
    fn min_cube_index(&self) -> CubeIndex {
        self.min
    }
    fn cube_count(&self) -> u32 {
        self.count
    }
    fn group(&self) -> &Group {
        &self.group
    }
    fn set_origin_height(&mut self, _origin_height: f32) {}
    fn resize_height(&mut self, percent: f32, sign: f32) {
        self.group.scale = percent;
        self.group.position.y = sign;
    }
    fn reset(&mut self) {
        self.commands.push(Command::Reset);
    }

    fn hit_test(&self, ray: &Ray) -> Intersections {
        let mut hits = Intersections::new();
        if self.solid {
            // Distinct screen points give distinct surface points.
            let point = Point3::from_vec(ray.direction * 1000.0);
            hits.push(Intersection {
                distance: 1.01,
                point,
                normal: Vector3::unit_x(),
                body: Body::Cubelet(CubeIndex(self.min.0 + 4)),
            });
            hits.push(Intersection {
                distance: 1.0,
                point,
                normal: Vector3::unit_z(),
                body: Body::Shell,
            });
        }
        hits
    }

    fn direction(&self, displacement: Vector3<f32>, normal: Vector3<f32>) -> Option<Direction> {
        assert_eq!(Vector3::unit_z(), normal);
        (displacement.x > 0.0).then(|| Direction::from_code(0, 3).unwrap())
    }

    fn rotate_move(&mut self, index: CubeIndex, direction: Direction, done: Option<Completion>) {
        self.commands
            .push(Command::Move(index, direction, done.is_some()));
        self.pending.extend(done);
    }
    fn rotate_move_whole(&mut self, pivot: CubeIndex, direction: Direction, done: Option<Completion>) {
        self.commands
            .push(Command::Whole(pivot, direction, done.is_some()));
        self.pending.extend(done);
    }

    fn random_rotate<R: Rng + ?Sized>(&self, rng: &mut R, len: usize) -> Vec<Move> {
        let directions = Direction::iter().collect::<Vec<_>>();
        (0..len)
            .map(|_| Move {
                index: CubeIndex(self.min.0 + rng.random_range(0..self.count)),
                direction: directions[rng.random_range(0..directions.len())],
            })
            .collect()
    }

    fn save(&mut self, _source: &Self, _anchor: Option<Point3<f32>>, _scale: Option<f32>) {
        self.commands.push(Command::Save);
    }

    fn step(&mut self, _delta: Duration) -> bool {
        let any = !self.pending.is_empty();
        for done in self.pending.drain(..) {
            done.complete();
        }
        any
    }
    fn is_animating(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Preferences that put the divider at 680..760 on an 800 pixel screen.
fn prefs() -> Preferences {
    let mut prefs = Preferences::default();
    prefs.interaction.min_view_percent = 0.05;
    prefs.layout.initial_front_percent = 0.9;
    prefs.layout.divider_height = 80.0;
    prefs.scramble.length = 5;
    prefs.scramble.seed = Some(1);
    prefs
}

fn mock_controller(front_solid: bool) -> MirrorCubeController<MockCube> {
    let mut front = MockCube::new(ViewKind::Front, 0);
    if front_solid {
        front = front.solid();
    }
    let end = MockCube::new(ViewKind::End, 55);
    let preview = MockCube::new(ViewKind::Front, 200);
    MirrorCubeController::new(front, end, preview, SCREEN, prefs()).unwrap()
}

fn commands(c: &MirrorCubeController<MockCube>, view: ViewKind) -> &[Command] {
    &c.cube(view).commands
}

#[test]
fn test_construction_checks_congruence() {
    let front = MockCube::new(ViewKind::Front, 0);
    let mut end = MockCube::new(ViewKind::End, 55);
    end.count = 26;
    let preview = MockCube::new(ViewKind::Front, 200);
    let err = MirrorCubeController::new(front, end, preview, SCREEN, prefs()).unwrap_err();
    assert_eq!("front view has 27 cubes but end view has 26", err.to_string());

    let front = MockCube::new(ViewKind::End, 0);
    let end = MockCube::new(ViewKind::End, 55);
    let preview = MockCube::new(ViewKind::Front, 200);
    assert!(MirrorCubeController::new(front, end, preview, SCREEN, prefs()).is_err());
}

#[test]
fn test_initial_layout() {
    let c = mock_controller(false);
    let divider = c.touch_line().screen_rect();
    assert_eq!(680.0, divider.top);
    assert_eq!(80.0, divider.height);
    assert_eq!(0.9, c.cube(ViewKind::Front).group.scale);
    assert!((c.cube(ViewKind::End).group.scale - 0.1).abs() < 1e-6);
    assert!(c.session().is_empty());
    assert!(!c.is_rotating());
}

#[test]
fn test_layer_rotation_is_mirrored() {
    let mut c = mock_controller(true);
    c.touch_start(Point2::new(300.0, 300.0));
    assert!(matches!(
        c.session().start(),
        Some(GesturePoint::Surface(HitRecord {
            view: ViewKind::Front,
            ..
        }))
    ));

    // No displacement yet.
    c.touch_move(Point2::new(300.0, 300.0));
    assert!(!c.is_rotating());
    assert!(commands(&c, ViewKind::Front).is_empty());
    assert!(c.session().moved().is_some());

    // Swiping left gives no direction from this cube.
    c.touch_move(Point2::new(290.0, 300.0));
    assert!(!c.is_rotating());

    c.touch_move(Point2::new(320.0, 300.0));
    assert_eq!(Some(RotationKind::Layer), c.rotation_kind());
    let d = Direction::from_code(0, 3).unwrap();
    assert_eq!(
        [Command::Move(CubeIndex(4), d, false)],
        commands(&c, ViewKind::Front),
    );
    assert_eq!(
        [Command::Move(CubeIndex(59), d, true)],
        commands(&c, ViewKind::End),
    );

    // Lifting the finger does not end the rotation or the gesture.
    c.touch_end();
    assert!(c.is_rotating());
    assert!(!c.session().is_empty());

    c.step_by(FRAME);
    assert!(!c.is_rotating());
    assert!(c.session().is_empty());

    // Without a new touch, further moves do nothing.
    c.touch_move(Point2::new(360.0, 300.0));
    assert_eq!(1, commands(&c, ViewKind::Front).len());
}

#[test]
fn test_view_rotation_example() {
    let mut c = mock_controller(false);
    c.touch_start(Point2::new(500.0, 400.0));
    assert_eq!(
        Some(&GesturePoint::Screen(Point2::new(500.0, 400.0))),
        c.session().start(),
    );
    c.touch_move(Point2::new(560.0, 380.0));
    assert_eq!(Some(RotationKind::View), c.rotation_kind());

    let d = Direction::from_code(4, 4).unwrap();
    assert_eq!(
        [Command::Whole(CubeIndex(10), d, false)],
        commands(&c, ViewKind::Front),
    );
    assert_eq!(
        [Command::Whole(CubeIndex(10), d, true)],
        commands(&c, ViewKind::End),
    );

    c.step_by(FRAME);
    assert!(!c.is_rotating());
    assert!(c.session().is_empty());
}

#[test]
fn test_view_rotation_on_end_view() {
    let mut c = mock_controller(false);
    c.touch_start(Point2::new(800.0, 780.0));
    c.touch_move(Point2::new(800.0, 770.0));
    let d = Direction::from_code(2, 2).unwrap();
    assert_eq!(
        [Command::Whole(CubeIndex(65), d, false)],
        commands(&c, ViewKind::End),
    );
    assert_eq!(
        [Command::Whole(CubeIndex(65), d, true)],
        commands(&c, ViewKind::Front),
    );
}

#[test]
fn test_identical_points_never_rotate() {
    let mut c = mock_controller(false);
    c.touch_start(Point2::new(100.0, 100.0));
    for _ in 0..3 {
        c.touch_move(Point2::new(100.0, 100.0));
    }
    assert!(!c.is_rotating());
    assert!(commands(&c, ViewKind::Front).is_empty());
    assert!(commands(&c, ViewKind::End).is_empty());
    assert_eq!(
        Some(&GesturePoint::Screen(Point2::new(100.0, 100.0))),
        c.session().moved(),
    );

    c.touch_end();
    assert!(!c.session().is_empty());
}

#[test]
fn test_divider_drag() {
    let mut c = mock_controller(false);
    c.touch_start(Point2::new(500.0, 700.0));
    assert!(c.touch_line().is_active());

    c.touch_move(Point2::new(500.0, 400.0));
    assert_eq!(0.5, c.front_percent());
    assert_eq!(360.0, c.touch_line().screen_rect().top);
    assert_eq!(0.5, c.cube(ViewKind::Front).group.scale);
    assert_eq!(0.5, c.cube(ViewKind::End).group.scale);
    assert!(commands(&c, ViewKind::Front).is_empty());

    // Clamped to the minimum view size.
    c.touch_move(Point2::new(500.0, 0.0));
    assert_eq!(0.05, c.front_percent());

    c.touch_end();
    assert!(!c.touch_line().is_active());
    assert!(c.session().is_empty());
}

#[test]
fn test_divider_takes_priority() {
    let mut c = mock_controller(false);
    c.move_divider(30.0);
    // The divider now overlaps the buttons.
    let reset = c.button(ButtonKind::Reset).unwrap().position();
    c.touch_start(reset + Vector2::new(1.0, 1.0));
    assert!(c.touch_line().is_active());
    assert!(c.buttons().iter().all(|b| !b.is_active()));
    assert!(commands(&c, ViewKind::Front).is_empty());
}

#[test]
fn test_scramble_steps_in_order() {
    let mut c = mock_controller(false);
    c.scramble().unwrap();
    assert_eq!(Some(RotationKind::Sequence), c.rotation_kind());
    assert_eq!(
        Err(SequenceError::Busy(LockError::Busy(RotationKind::Sequence))),
        c.scramble(),
    );

    for step in 1..=5 {
        assert!(c.is_rotating(), "lock released before step {step}");
        assert_eq!(step, commands(&c, ViewKind::End).len());
        c.step_by(FRAME);
    }
    assert!(!c.is_rotating());
    assert!(c.sequence().is_none());

    // The end view got the same moves, re-based, in the same order, and only
    // its commands carried completions.
    let front = commands(&c, ViewKind::Front);
    let end = commands(&c, ViewKind::End);
    assert_eq!(5, front.len());
    assert_eq!(5, end.len());
    for (f, e) in front.iter().zip(end) {
        let (&Command::Move(fi, fd, false), &Command::Move(ei, ed, true)) = (f, e) else {
            panic!("unexpected commands {f:?} / {e:?}");
        };
        assert_eq!(fi.0 + 55, ei.0);
        assert_eq!(fd, ed);
    }
}

#[test]
fn test_scramble_is_reproducible() {
    let mut a = mock_controller(false);
    let mut b = mock_controller(false);
    a.scramble().unwrap();
    b.scramble().unwrap();
    for _ in 0..5 {
        a.step_by(FRAME);
        b.step_by(FRAME);
    }
    assert_eq!(commands(&a, ViewKind::End), commands(&b, ViewKind::End));
}

#[test]
fn test_buttons() {
    let mut c = mock_controller(false);
    let center = |c: &MirrorCubeController<MockCube>, kind| {
        let b = c.button(kind).unwrap();
        Point2::new(
            b.position().x + b.width() / 2.0,
            b.position().y + b.height() / 2.0,
        )
    };

    // Restore before any save does nothing.
    c.touch_start(center(&c, ButtonKind::Restore));
    c.touch_end();
    assert_eq!(Err(SequenceError::NothingSaved), c.restore());
    assert!(commands(&c, ViewKind::Front).is_empty());

    let p = center(&c, ButtonKind::Save);
    c.touch_start(p);
    assert!(c.button(ButtonKind::Save).unwrap().is_active());
    // Moving while a button is held does nothing.
    c.touch_move(p + Vector2::new(50.0, 50.0));
    c.touch_end();
    assert!(!c.button(ButtonKind::Save).unwrap().is_active());
    assert!(c.preview().has_save());
    assert_eq!([Command::Save], c.preview().cube().commands.as_slice());
    assert!(c.session().is_empty());

    c.touch_start(center(&c, ButtonKind::Restore));
    c.touch_end();
    assert_eq!([Command::Save], commands(&c, ViewKind::Front));
    assert_eq!([Command::Save], commands(&c, ViewKind::End));

    c.touch_start(center(&c, ButtonKind::Reset));
    c.touch_end();
    assert_eq!(
        [Command::Save, Command::Reset],
        commands(&c, ViewKind::Front),
    );

    // Buttons refuse while a rotation is in flight.
    c.touch_start(center(&c, ButtonKind::Disorganize));
    c.touch_end();
    assert!(c.is_rotating());
    c.touch_start(center(&c, ButtonKind::Reset));
    c.touch_end();
    assert_eq!(
        1,
        commands(&c, ViewKind::Front)
            .iter()
            .filter(|&&cmd| cmd == Command::Reset)
            .count(),
    );
}

proptest! {
    #[test]
    fn proptest_no_second_rotation_while_busy(
        events in prop::collection::vec((0_u8..3, 0.0_f32..1000.0, 0.0_f32..800.0), 1..40),
    ) {
        let mut c = mock_controller(true);
        c.touch_start(Point2::new(300.0, 300.0));
        c.touch_move(Point2::new(320.0, 300.0));
        prop_assert!(c.is_rotating());
        let front_before = commands(&c, ViewKind::Front).to_vec();
        let end_before = commands(&c, ViewKind::End).to_vec();

        for (kind, x, y) in events {
            let p = Point2::new(x, y);
            match kind {
                0 => c.touch_start(p),
                1 => c.touch_move(p),
                _ => c.touch_end(),
            }
            prop_assert!(c.is_rotating());
            // Button presses may enable a button, but no button action and
            // no rotation reaches the cubes.
            prop_assert_eq!(&front_before, &commands(&c, ViewKind::Front).to_vec());
            prop_assert_eq!(&end_before, &commands(&c, ViewKind::End).to_vec());
        }

        c.step_by(FRAME);
        prop_assert!(!c.is_rotating());
    }
}

fn sim_controller() -> MirrorCubeController<SimCube> {
    let mut prefs = Preferences::default();
    prefs.scramble.seed = Some(7);
    prefs.scramble.length = 8;
    let params = SimCubeParams::new(&Camera::for_screen(SCREEN), &prefs);
    let front = SimCube::new(ViewKind::Front, CubeIndex(0), params.clone());
    let end = SimCube::new(ViewKind::End, CubeIndex(55), params.clone());
    let preview = SimCube::new(ViewKind::Front, CubeIndex(200), params);
    MirrorCubeController::new(front, end, preview, SCREEN, prefs).unwrap()
}

fn screen_point(c: &MirrorCubeController<SimCube>, view: ViewKind, local: Point3<f32>) -> Point2<f32> {
    let world = c.cube(view).local_to_world(local);
    let ndc = c.camera().project_to_ndc(world).unwrap();
    c.screen().from_ndc(ndc)
}

fn settle(c: &mut MirrorCubeController<SimCube>) {
    for _ in 0..10_000 {
        if !c.is_rotating() {
            return;
        }
        c.step_by(FRAME);
    }
    panic!("rotation never finished");
}

#[test]
fn test_sim_probe_pairs_shell_normal() {
    let c = sim_controller();
    let p = screen_point(&c, ViewKind::Front, Point3::new(1.0, 0.0, 1.5));
    let hit = c.probe(p).unwrap();
    assert_eq!(ViewKind::Front, hit.view);
    // Cubelet at (1, 0, 1).
    assert_eq!(CubeIndex(23), hit.index);
    assert_eq!(Vector3::unit_z(), hit.normal);

    let p = screen_point(&c, ViewKind::End, Point3::new(-1.0, 0.0, -1.5));
    let hit = c.probe(p).unwrap();
    assert_eq!(ViewKind::End, hit.view);
    assert_eq!(CubeIndex(55 + 3), hit.index);
    assert_eq!(-Vector3::unit_z(), hit.normal);
}

#[test]
fn test_sim_edge_hit_takes_shell_normal() {
    let c = sim_controller();
    let cube = c.cube(ViewKind::Front);
    // Top front edge. Just above it, rays enter the shell through one face
    // and strike the cubelet on another.
    let edge = screen_point(&c, ViewKind::Front, Point3::new(0.0, 1.5, 1.5));
    let mut across_edge = 0;
    for i in -300..=300 {
        let p = Point2::new(edge.x, edge.y + i as f32 * 0.01);
        let Some(hit) = c.probe(p) else {
            continue;
        };
        let ray = c.camera().ray_through_ndc(c.screen().to_ndc(p)).unwrap();
        let hits = cube.hit_test(&ray);
        let shell = hits.iter().find(|h| h.body == Body::Shell).unwrap();
        let struck = hits
            .iter()
            .find(|h| matches!(h.body, Body::Cubelet(_)))
            .unwrap();

        assert_eq!(shell.normal, hit.normal);
        assert_eq!(Body::Cubelet(hit.index), struck.body);
        assert_eq!(struck.point, hit.point);
        if struck.normal != shell.normal {
            across_edge += 1;
        }
    }
    assert!(across_edge > 0, "no ray struck a cubelet face other than the shell's");
}

#[test]
fn test_sim_diagonal_swipe_turns_layer_under_moved_point() {
    let mut c = sim_controller();
    // Starts on cubelet (0, 0, 1) and ends on (1, 1, 1). The swipe is mostly
    // +X across the +Z face, which turns around Y.
    c.touch_start(screen_point(&c, ViewKind::Front, Point3::new(0.3, 0.2, 1.5)));
    c.touch_move(screen_point(&c, ViewKind::Front, Point3::new(0.9, 0.7, 1.5)));
    assert_eq!(Some(RotationKind::Layer), c.rotation_kind());
    settle(&mut c);

    let axis = Direction::new(SignedAxis::PosX, SignedAxis::PosZ)
        .unwrap()
        .rotation_axis();
    let mut expected = CubeImage::solved();
    expected.apply(Twist {
        axis,
        layer: Some(1),
    });
    let mut start_layer = CubeImage::solved();
    start_layer.apply(Twist {
        axis,
        layer: Some(0),
    });
    assert_ne!(start_layer, expected);

    assert_eq!(&expected, c.cube(ViewKind::Front).image());
    assert_eq!(&expected, c.cube(ViewKind::End).image());
}

#[test]
fn test_sim_layer_gesture_turns_both_views() {
    for (view, start, end) in [
        (
            ViewKind::Front,
            Point3::new(1.0, 0.0, 1.5),
            Point3::new(1.0, 0.6, 1.5),
        ),
        (
            ViewKind::End,
            Point3::new(-1.0, 0.0, -1.5),
            Point3::new(-1.0, 0.6, -1.5),
        ),
    ] {
        let mut c = sim_controller();
        c.touch_start(screen_point(&c, view, start));
        c.touch_move(screen_point(&c, view, end));
        assert_eq!(Some(RotationKind::Layer), c.rotation_kind());
        settle(&mut c);

        let front = c.cube(ViewKind::Front).image();
        let end = c.cube(ViewKind::End).image();
        assert_eq!(front, end);
        assert!(!front.is_solved());
        assert!(!c.cube(ViewKind::Front).is_animating());
    }
}

#[test]
fn test_sim_scramble_save_restore() {
    let mut c = sim_controller();
    c.scramble().unwrap();
    settle(&mut c);
    let scrambled = c.cube(ViewKind::Front).image().clone();
    assert_eq!(&scrambled, c.cube(ViewKind::End).image());
    assert!(!scrambled.is_solved());

    c.save().unwrap();
    assert_eq!(&scrambled, c.preview().cube().image());
    let front_scale = c.cube(ViewKind::Front).group().scale;
    let preview_scale = c.preview().cube().group().scale;
    assert!((preview_scale - front_scale * 0.25).abs() < 1e-4);

    c.reset().unwrap();
    assert!(c.cube(ViewKind::Front).is_solved());
    assert!(c.cube(ViewKind::End).is_solved());

    c.restore().unwrap();
    assert_eq!(&scrambled, c.cube(ViewKind::Front).image());
    assert_eq!(&scrambled, c.cube(ViewKind::End).image());
}

#[test]
fn test_sim_step_reports_motion() {
    let mut c = sim_controller();
    assert!(!c.step());
    c.touch_start(Point2::new(500.0, 30.0));
    c.touch_move(Point2::new(500.0, 10.0));
    assert_eq!(Some(RotationKind::View), c.rotation_kind());
    assert!(c.step());
    settle(&mut c);
    assert!(c.cube(ViewKind::Front).is_solved());
    assert_eq!(c.cube(ViewKind::Front).image(), c.cube(ViewKind::End).image());
}

#[test]
fn test_resize_screen_keeps_views_proportional() {
    let mut c = sim_controller();
    let before = c.cube(ViewKind::Front).group().position.y;
    c.resize_screen(500.0, 400.0);
    assert_eq!(SCREEN.width / 2.0, c.touch_line().screen_rect().width);
    assert_eq!(200.0, c.touch_line().screen_rect().center().y);
    let after = c.cube(ViewKind::Front).group().position.y;
    // Same aspect ratio, so the same world layout.
    assert!((before - after).abs() < 1e-3);
    assert!(after > 0.0);
}
