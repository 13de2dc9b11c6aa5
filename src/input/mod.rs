mod gesture;

pub use gesture::{GestureState, InputEvent, TouchPoint};

use macroquad::input::{Touch, TouchPhase, simulate_mouse_with_touch, touches};
use macroquad::prelude::*;

/// Window-level commands that are not viewport gestures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Randomize,
    ResetView,
    ToggleOverlay,
    Quit,
}

/// Polls macroquad once per frame and turns what it sees into `InputEvent`s.
pub struct MacroquadInput {
    last_mouse: (f32, f32),
}

impl MacroquadInput {
    pub fn new() -> Self {
        // Touches arrive as touches only, never as a fake left button
        simulate_mouse_with_touch(false);
        Self {
            last_mouse: mouse_position(),
        }
    }

    /// Gesture events since the previous frame, in arrival order
    pub fn poll(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let (mx, my) = mouse_position();
        let (x, y) = (mx as f64, my as f64);

        // macroquad reports wheel-up as positive; gestures expect browser sign
        let (_, wheel) = mouse_wheel();
        if wheel != 0.0 {
            events.push(InputEvent::Wheel { delta_y: -wheel as f64, x, y });
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            events.push(InputEvent::PointerDown { x, y });
        } else if is_mouse_button_down(MouseButton::Left) && (mx, my) != self.last_mouse {
            events.push(InputEvent::PointerMove { x, y });
        }
        if is_mouse_button_released(MouseButton::Left) {
            events.push(InputEvent::PointerUp);
        }
        self.last_mouse = (mx, my);

        events.extend(touch_events(&touches()));
        events
    }

    /// Keyboard shortcuts pressed this frame
    pub fn commands(&self) -> Vec<Command> {
        [
            (KeyCode::Space, Command::TogglePause),
            (KeyCode::R, Command::Randomize),
            (KeyCode::H, Command::ResetView),
            (KeyCode::O, Command::ToggleOverlay),
            (KeyCode::Escape, Command::Quit),
        ]
        .into_iter()
        .filter(|(key, _)| is_key_pressed(*key))
        .map(|(_, command)| command)
        .collect()
    }
}

impl Default for MacroquadInput {
    fn default() -> Self {
        Self::new()
    }
}

fn touch_events(touches: &[Touch]) -> Vec<InputEvent> {
    if touches.is_empty() {
        return Vec::new();
    }

    let active: Vec<TouchPoint> = touches
        .iter()
        .filter(|t| !matches!(t.phase, TouchPhase::Ended | TouchPhase::Cancelled))
        .map(|t| TouchPoint::new(t.id, t.position.x as f64, t.position.y as f64))
        .collect();
    let any = |phase: fn(&TouchPhase) -> bool| touches.iter().any(|t| phase(&t.phase));

    let mut events = Vec::new();
    if any(|p| matches!(p, TouchPhase::Started)) {
        events.push(InputEvent::TouchStart(active.clone()));
    }
    if any(|p| matches!(p, TouchPhase::Moved)) {
        events.push(InputEvent::TouchMove(active.clone()));
    }
    if any(|p| matches!(p, TouchPhase::Ended | TouchPhase::Cancelled)) {
        events.push(InputEvent::TouchEnd(active));
    }
    events
}
