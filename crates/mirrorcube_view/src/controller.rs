use cgmath::Point2;
use eyre::{Result, bail};
use mirrorcube_core::{Camera, CubeInstance, MirrorMap, RotationKind, ScreenSize, Ticket, ViewKind};
use mirrorprefs::Preferences;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use web_time::{Duration, Instant};

use crate::sequencer::{self, ensure_idle};
use crate::{
    Button, ButtonKind, Control, CubePair, GesturePoint, GestureSession, HitRecord, MoveSequence,
    Preview, RotationOrchestrator, SequenceError, TouchLine, probe,
};

/// Frame rate to assume for the first frame of an animation, when there is no
/// previous frame to measure from.
const ASSUMED_FPS: f32 = 120.0;

/// Touch-driven controller for a pair of mirrored cube views.
///
/// The host forwards the first touch point of each touch event and calls
/// [`MirrorCubeController::step()`] once per frame.
#[derive(Debug)]
pub struct MirrorCubeController<C> {
    prefs: Preferences,
    screen: ScreenSize,
    camera: Camera,
    /// Share of the screen height given to the front view.
    front_percent: f32,

    cubes: CubePair<C>,
    preview: Preview<C>,

    touch_line: TouchLine,
    /// Buttons, in hover priority order.
    buttons: Vec<Button>,

    orchestrator: RotationOrchestrator,
    sequence: Option<MoveSequence>,
    rng: ChaCha12Rng,

    last_frame_time: Option<Instant>,
}

impl<C: CubeInstance> MirrorCubeController<C> {
    /// Constructs a controller and lays out the cubes.
    ///
    /// Returns an error if the front and end cubes do not have congruent index
    /// ranges or if `preview` cannot hold the front cube's state.
    pub fn new(front: C, end: C, preview: C, screen: ScreenSize, prefs: Preferences) -> Result<Self> {
        let mirror = MirrorMap::new(&front, &end)?;
        if preview.cube_count() != front.cube_count() {
            bail!(
                "preview has {} cubes but front view has {}",
                preview.cube_count(),
                front.cube_count(),
            );
        }

        let seed = prefs.scramble.seed.unwrap_or_else(|| rand::rng().random());
        log::debug!("scramble seed: {seed}");

        let camera = Camera::for_screen(screen);
        let front_percent = prefs
            .interaction
            .clamp_front_percent(prefs.layout.initial_front_percent);

        let mut this = Self {
            screen,
            camera,
            front_percent,

            cubes: CubePair { front, end },
            preview: Preview::new(preview),

            touch_line: TouchLine::new(
                screen,
                front_percent * screen.height,
                prefs.layout.divider_height,
            ),
            buttons: Button::layout(screen, &prefs.layout),

            orchestrator: RotationOrchestrator::new(mirror),
            sequence: None,
            rng: ChaCha12Rng::seed_from_u64(seed),

            last_frame_time: None,

            prefs,
        };
        this.update_origin_height();
        this.layout_cubes();
        Ok(this)
    }

    /// Returns the two live cubes.
    pub fn cubes(&self) -> &CubePair<C> {
        &self.cubes
    }
    /// Returns the cube for `view`.
    pub fn cube(&self, view: ViewKind) -> &C {
        self.cubes.get(view)
    }
    /// Returns the saved-state preview.
    pub fn preview(&self) -> &Preview<C> {
        &self.preview
    }
    /// Returns the divider.
    pub fn touch_line(&self) -> &TouchLine {
        &self.touch_line
    }
    /// Returns the action buttons.
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }
    /// Returns the button bound to `kind`.
    pub fn button(&self, kind: ButtonKind) -> Option<&Button> {
        self.buttons.iter().find(|b| b.kind() == kind)
    }
    /// Returns the screen size.
    pub fn screen(&self) -> ScreenSize {
        self.screen
    }
    /// Returns the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }
    /// Returns the share of the screen height given to the front view.
    pub fn front_percent(&self) -> f32 {
        self.front_percent
    }
    /// Returns the current gesture.
    pub fn session(&self) -> &GestureSession {
        self.orchestrator.session()
    }
    /// Returns whether any rotation is in flight.
    pub fn is_rotating(&self) -> bool {
        self.orchestrator.is_rotating()
    }
    /// Returns what kind of rotation is in flight, if any.
    pub fn rotation_kind(&self) -> Option<RotationKind> {
        self.orchestrator.lock().kind()
    }
    /// Returns the running move sequence, if any.
    pub fn sequence(&self) -> Option<&MoveSequence> {
        self.sequence.as_ref()
    }

    /// Finds the cube surface under a screen point.
    pub fn probe(&self, point: Point2<f32>) -> Option<HitRecord> {
        probe::probe(
            &self.cubes,
            &self.camera,
            self.screen,
            &self.touch_line.screen_rect(),
            point,
        )
    }

    /// Handles the start of a touch.
    pub fn touch_start(&mut self, point: Point2<f32>) {
        if self.touch_line.is_hover(point) {
            log::trace!("dragging divider");
            self.touch_line.enable();
            return;
        }

        if let Some(button) = self.buttons.iter_mut().find(|b| b.is_hover(point)) {
            button.enable();
            let kind = button.kind();
            if let Err(e) = self.run_action(kind) {
                log::debug!("{kind} refused: {e}");
            }
            return;
        }

        if let Some(kind) = self.rotation_kind() {
            log::trace!("ignoring touch during {kind} rotation");
            return;
        }
        let start = match self.probe(point) {
            Some(hit) => {
                log::trace!("gesture starts on {} in {}", hit.index, hit.view);
                GesturePoint::Surface(hit)
            }
            None => {
                log::trace!("gesture starts off the cubes at {point:?}");
                GesturePoint::Screen(point)
            }
        };
        self.orchestrator.session_mut().begin(start);
    }

    /// Handles touch movement.
    pub fn touch_move(&mut self, point: Point2<f32>) {
        if self.touch_line.is_active() {
            self.move_divider(point.y);
            return;
        }
        if self.buttons.iter().any(|b| b.is_active()) || self.is_rotating() {
            return;
        }

        let hit = self.probe(point);
        let moved = match (self.session().start(), hit) {
            (Some(GesturePoint::Surface(_)), Some(hit)) => GesturePoint::Surface(hit),
            (Some(GesturePoint::Screen(_)), None) => GesturePoint::Screen(point),
            // No gesture, or the finger crossed between a cube and empty
            // space.
            _ => return,
        };
        self.orchestrator.session_mut().record_move(moved);

        match moved {
            GesturePoint::Surface(_) => {
                self.orchestrator.rotate_layer(&mut self.cubes);
            }
            GesturePoint::Screen(_) => {
                let divider = self.touch_line.screen_rect();
                self.orchestrator
                    .rotate_view(&mut self.cubes, self.screen, &divider);
            }
        }
    }

    /// Handles the end of a touch. Rotations in flight keep going.
    pub fn touch_end(&mut self) {
        self.touch_line.disable();
        for button in &mut self.buttons {
            button.disable();
        }
    }

    /// Advances animations using the time since the last frame. Returns
    /// whether anything moved.
    pub fn step(&mut self) -> bool {
        let now = Instant::now();
        let delta = match self.last_frame_time {
            Some(then) => now - then,
            None => Duration::from_secs_f32(1.0 / ASSUMED_FPS),
        };

        let needs_redraw = self.step_by(delta);

        if needs_redraw {
            self.last_frame_time = Some(now);
        } else {
            self.last_frame_time = None;
        }

        needs_redraw
    }

    /// Advances animations by `delta` and handles any rotations that
    /// finished. Returns whether anything moved.
    pub fn step_by(&mut self, delta: Duration) -> bool {
        let mut needs_redraw = false;
        for cube in self.cubes.both_mut() {
            needs_redraw |= cube.step(delta);
        }
        needs_redraw |= self.preview.cube_mut().step(delta);

        while let Some(ticket) = self.orchestrator.lock().poll_completed() {
            self.on_completed(ticket);
        }

        needs_redraw
    }

    /// Handles a change in screen size.
    pub fn resize_screen(&mut self, width: f32, height: f32) {
        self.screen = ScreenSize { width, height };
        self.camera = Camera::for_screen(self.screen);
        self.update_origin_height();

        self.touch_line.set_width(width);
        self.touch_line.move_to(self.front_percent * height);
        self.buttons = Button::layout(self.screen, &self.prefs.layout);
        self.layout_cubes();
    }

    /// Moves the divider to screen height `y` and resizes both views, keeping
    /// each view at least the minimum size.
    pub fn move_divider(&mut self, y: f32) {
        let percent = self
            .prefs
            .interaction
            .clamp_front_percent(y / self.screen.height);
        self.front_percent = percent;
        self.touch_line.move_to(percent * self.screen.height);
        self.layout_cubes();
    }

    /// Returns both cubes to the solved state.
    pub fn reset(&mut self) -> Result<(), SequenceError> {
        sequencer::reset(self.orchestrator.lock(), &mut self.cubes)
    }

    /// Scrambles both cubes, one move at a time.
    pub fn scramble(&mut self) -> Result<(), SequenceError> {
        ensure_idle(self.orchestrator.lock())?;
        let moves = self
            .cubes
            .front
            .random_rotate(&mut self.rng, self.prefs.scramble.length);
        let mirror = *self.orchestrator.mirror();
        self.sequence =
            MoveSequence::start(self.orchestrator.lock_mut(), &mirror, &mut self.cubes, moves)?;
        Ok(())
    }

    /// Copies the front cube into the preview, next to the save button.
    pub fn save(&mut self) -> Result<(), SequenceError> {
        let anchor = self.preview_anchor();
        self.preview.save(
            self.orchestrator.lock(),
            &self.cubes.front,
            anchor,
            self.prefs.layout.preview_scale,
        )
    }

    /// Copies the preview into both cubes.
    pub fn restore(&mut self) -> Result<(), SequenceError> {
        self.preview
            .restore(self.orchestrator.lock(), &mut self.cubes)
    }

    fn run_action(&mut self, kind: ButtonKind) -> Result<(), SequenceError> {
        match kind {
            ButtonKind::Reset => self.reset(),
            ButtonKind::Disorganize => self.scramble(),
            ButtonKind::Save => self.save(),
            ButtonKind::Restore => self.restore(),
        }
    }

    fn on_completed(&mut self, ticket: Ticket) {
        if let Some(sequence) = &mut self.sequence
            && sequence.ticket() == ticket
        {
            if sequence.issue_next(self.orchestrator.lock(), &mut self.cubes) {
                return;
            }
            log::debug!("sequence of {} moves finished", sequence.issued());
            self.sequence = None;
            self.orchestrator.lock_mut().release(ticket);
            return;
        }

        if self.orchestrator.finish(ticket) {
            log::trace!("rotation finished");
        }
    }

    /// Returns the world-space point just below the save button, where the
    /// preview is drawn.
    fn preview_anchor(&self) -> Option<cgmath::Point3<f32>> {
        let button = self.button(ButtonKind::Save)?;
        let screen_point = Point2::new(
            button.position().x + button.width() / 2.0,
            button.position().y + button.height() * 2.0,
        );
        let anchor = self
            .camera
            .unproject_to_plane(self.screen.to_ndc(screen_point), 0.0);
        if anchor.is_none() {
            log::warn!("cannot place preview at {screen_point:?}");
        }
        anchor
    }

    fn update_origin_height(&mut self) {
        let origin_height = self.camera.origin_height();
        for cube in self.cubes.both_mut() {
            cube.set_origin_height(origin_height);
        }
        self.preview.cube_mut().set_origin_height(origin_height);
    }

    fn layout_cubes(&mut self) {
        let p = self.front_percent;
        self.cubes
            .front
            .resize_height(p, ViewKind::Front.layout_sign());
        self.cubes
            .end
            .resize_height(1.0 - p, ViewKind::End.layout_sign());
    }
}
