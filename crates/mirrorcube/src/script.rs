//! Scripted touch sessions, played against headless cubes.

use cgmath::Point2;
use eyre::{Result, bail};
use mirrorcube_core::{Camera, CubeIndex, CubeInstance, RotationKind, ScreenSize, ViewKind};
use mirrorcube_sim::{SimCube, SimCubeParams};
use mirrorcube_view::MirrorCubeController;
use mirrorprefs::Preferences;
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Simulated time per frame.
pub const FRAME: Duration = Duration::from_micros(16_667);
/// Frames to wait for animations to finish before giving up.
const MAX_SETTLE_FRAMES: usize = 10_000;

const END_MIN_INDEX: CubeIndex = CubeIndex(55);
const PREVIEW_MIN_INDEX: CubeIndex = CubeIndex(200);

/// Sequence of touch events on a screen of a given size.
///
/// ```yaml
/// screen: [1000, 800]
/// events:
///   - start: [500, 400]
///   - move: [560, 380]
///   - end
///   - settle
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TouchScript {
    /// Screen width and height in pixels.
    pub screen: [f32; 2],
    #[serde(with = "serde_norway::with::singleton_map_recursive")]
    pub events: Vec<TouchEvent>,
}

impl Default for TouchScript {
    fn default() -> Self {
        Self {
            screen: [1000.0, 800.0],
            events: vec![],
        }
    }
}

impl TouchScript {
    pub fn from_yaml(s: &str) -> Result<Self> {
        Ok(serde_norway::from_str(s)?)
    }

    pub fn screen(&self) -> ScreenSize {
        let [width, height] = self.screen;
        ScreenSize { width, height }
    }
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TouchEvent {
    /// Finger down at a screen point.
    Start([f32; 2]),
    /// Finger moved to a screen point.
    Move([f32; 2]),
    /// Finger up.
    End,
    /// Advance animations by some number of milliseconds.
    Wait(u64),
    /// Advance animations until everything has stopped moving.
    Settle,
    /// Change the screen size.
    Resize([f32; 2]),
}

/// Constructs a controller driving two headless cubes, plus a headless
/// preview.
pub fn headless_controller(
    screen: ScreenSize,
    prefs: Preferences,
) -> Result<MirrorCubeController<SimCube>> {
    let params = SimCubeParams::new(&Camera::for_screen(screen), &prefs);
    let front = SimCube::new(ViewKind::Front, CubeIndex(0), params.clone());
    let end = SimCube::new(ViewKind::End, END_MIN_INDEX, params.clone());
    let preview = SimCube::new(ViewKind::Front, PREVIEW_MIN_INDEX, params);
    MirrorCubeController::new(front, end, preview, screen, prefs)
}

fn is_idle(controller: &MirrorCubeController<SimCube>) -> bool {
    !controller.is_rotating()
        && !controller.cubes().front.is_animating()
        && !controller.cubes().end.is_animating()
        && !controller.preview().cube().is_animating()
}

/// Steps the controller until no rotation is in flight and nothing is
/// animating.
pub fn settle(controller: &mut MirrorCubeController<SimCube>) -> Result<()> {
    for _ in 0..MAX_SETTLE_FRAMES {
        if is_idle(controller) {
            return Ok(());
        }
        controller.step_by(FRAME);
    }
    bail!("animations did not finish after {MAX_SETTLE_FRAMES} frames")
}

/// Plays every event in `script`. Returns the rotations that were started, in
/// order.
pub fn play(
    controller: &mut MirrorCubeController<SimCube>,
    script: &TouchScript,
) -> Result<Vec<RotationKind>> {
    let mut rotations = vec![];
    for (i, event) in script.events.iter().enumerate() {
        log::debug!("event {i}: {event:?}");
        let was_rotating = controller.is_rotating();
        match *event {
            TouchEvent::Start([x, y]) => controller.touch_start(Point2::new(x, y)),
            TouchEvent::Move([x, y]) => controller.touch_move(Point2::new(x, y)),
            TouchEvent::End => controller.touch_end(),
            TouchEvent::Wait(ms) => {
                let mut remaining = Duration::from_millis(ms);
                while !remaining.is_zero() {
                    let delta = remaining.min(FRAME);
                    controller.step_by(delta);
                    remaining -= delta;
                }
            }
            TouchEvent::Settle => settle(controller)?,
            TouchEvent::Resize([width, height]) => controller.resize_screen(width, height),
        }
        if !was_rotating && let Some(kind) = controller.rotation_kind() {
            log::info!("event {i} started a {kind} rotation");
            rotations.push(kind);
        }
    }
    Ok(rotations)
}
