//! On-screen controls: the divider between the views and the action buttons.

use cgmath::Point2;
use mirrorcube_core::{ScreenRect, ScreenSize};
use mirrorprefs::LayoutPreferences;

/// Control that can be pressed.
pub trait Control {
    /// Returns whether `point` is over the control.
    fn is_hover(&self, point: Point2<f32>) -> bool;
    /// Returns whether the control is being pressed.
    fn is_active(&self) -> bool;
    /// Marks the control as pressed.
    fn enable(&mut self);
    /// Marks the control as released.
    fn disable(&mut self);
}

/// Draggable horizontal bar separating the front view (above) from the end
/// view (below).
#[derive(Debug, Clone, PartialEq)]
pub struct TouchLine {
    screen_rect: ScreenRect,
    active: bool,
}

impl TouchLine {
    /// Constructs a divider spanning the width of the screen, centered at
    /// `center_y`.
    pub fn new(screen: ScreenSize, center_y: f32, thickness: f32) -> Self {
        Self {
            screen_rect: ScreenRect {
                left: 0.0,
                top: center_y - thickness / 2.0,
                width: screen.width,
                height: thickness,
            },
            active: false,
        }
    }

    /// Returns the divider's screen rectangle.
    pub fn screen_rect(&self) -> ScreenRect {
        self.screen_rect
    }

    /// Moves the divider so that it is centered at `center_y`.
    pub fn move_to(&mut self, center_y: f32) {
        self.screen_rect.top = center_y - self.screen_rect.height / 2.0;
    }

    /// Stretches the divider across a new screen width.
    pub fn set_width(&mut self, width: f32) {
        self.screen_rect.width = width;
    }
}

impl Control for TouchLine {
    fn is_hover(&self, point: Point2<f32>) -> bool {
        self.screen_rect.contains(point)
    }
    fn is_active(&self) -> bool {
        self.active
    }
    fn enable(&mut self) {
        self.active = true;
    }
    fn disable(&mut self) {
        self.active = false;
    }
}

/// Action bound to a button.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ButtonKind {
    /// Return both cubes to the solved state.
    Reset,
    /// Scramble both cubes.
    Disorganize,
    /// Copy the front cube into the preview.
    Save,
    /// Copy the preview into both cubes.
    Restore,
}

/// Rectangular action button.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    kind: ButtonKind,
    position: Point2<f32>,
    width: f32,
    height: f32,
    active: bool,
}

impl Button {
    /// Constructs a button with its top left corner at `position`.
    pub fn new(kind: ButtonKind, position: Point2<f32>, width: f32, height: f32) -> Self {
        Self {
            kind,
            position,
            width,
            height,
            active: false,
        }
    }

    /// Lays out all buttons along the top of the screen: reset and disorganize
    /// from the left edge, save and restore from the right edge. The result is
    /// in hover priority order.
    pub fn layout(screen: ScreenSize, prefs: &LayoutPreferences) -> Vec<Self> {
        let w = prefs.button_width;
        let h = prefs.button_height;
        let m = prefs.button_margin;
        let left = |i: f32| Point2::new(m + i * (w + m), m);
        let right = |i: f32| Point2::new(screen.width - (i + 1.0) * (w + m), m);
        vec![
            Self::new(ButtonKind::Reset, left(0.0), w, h),
            Self::new(ButtonKind::Disorganize, left(1.0), w, h),
            Self::new(ButtonKind::Save, right(1.0), w, h),
            Self::new(ButtonKind::Restore, right(0.0), w, h),
        ]
    }

    /// Returns what the button does.
    pub fn kind(&self) -> ButtonKind {
        self.kind
    }
    /// Returns the top left corner.
    pub fn position(&self) -> Point2<f32> {
        self.position
    }
    /// Returns the width in pixels.
    pub fn width(&self) -> f32 {
        self.width
    }
    /// Returns the height in pixels.
    pub fn height(&self) -> f32 {
        self.height
    }

    fn screen_rect(&self) -> ScreenRect {
        ScreenRect {
            left: self.position.x,
            top: self.position.y,
            width: self.width,
            height: self.height,
        }
    }
}

impl Control for Button {
    fn is_hover(&self, point: Point2<f32>) -> bool {
        self.screen_rect().contains(point)
    }
    fn is_active(&self) -> bool {
        self.active
    }
    fn enable(&mut self) {
        self.active = true;
    }
    fn disable(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SCREEN: ScreenSize = ScreenSize {
        width: 1000.0,
        height: 800.0,
    };

    #[test]
    fn test_touch_line() {
        let mut line = TouchLine::new(SCREEN, 720.0, 80.0);
        assert_eq!(680.0, line.screen_rect().top);
        assert!(line.is_hover(Point2::new(3.0, 700.0)));
        assert!(!line.is_hover(Point2::new(3.0, 600.0)));

        line.move_to(400.0);
        assert_eq!(360.0, line.screen_rect().top);
        assert_eq!(80.0, line.screen_rect().height);

        line.enable();
        assert!(line.is_active());
        line.disable();
        assert!(!line.is_active());
    }

    #[test]
    fn test_button_layout() {
        let prefs = mirrorprefs::Preferences::default().layout;
        let buttons = Button::layout(SCREEN, &prefs);
        let kinds = buttons.iter().map(|b| b.kind()).collect::<Vec<_>>();
        assert_eq!(
            vec![
                ButtonKind::Reset,
                ButtonKind::Disorganize,
                ButtonKind::Save,
                ButtonKind::Restore,
            ],
            kinds,
        );
        // No two buttons overlap and all are on screen.
        for (i, a) in buttons.iter().enumerate() {
            assert!(a.position().x >= 0.0);
            assert!(a.position().x + a.width() <= SCREEN.width);
            for b in &buttons[i + 1..] {
                assert!(!a.is_hover(b.position()), "{} overlaps {}", a.kind(), b.kind());
            }
        }
    }
}
