//! Gesture state machine.
//!
//! Raw input arrives as a normalized [`InputEvent`] stream; [`GestureState`]
//! remembers only what it needs to turn consecutive events into deltas
//! (last pointer position, last pinch distance and midpoint) and applies
//! them to a [`Viewport`]. Mouse and touch are tracked independently.

use crate::application::{Viewport, ZoomDirection};
use crate::error::ViewportError;

/// One active touch in screen coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// Input normalized away from any windowing backend.
/// Touch variants carry the touches still down after the event.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    Wheel { delta_y: f64, x: f64, y: f64 },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    PointerLeave,
    TouchStart(Vec<TouchPoint>),
    TouchMove(Vec<TouchPoint>),
    TouchEnd(Vec<TouchPoint>),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum TouchGesture {
    Idle,
    Pan { last: (f64, f64) },
    Pinch { distance: f64, midpoint: (f64, f64) },
}

fn distance(a: &TouchPoint, b: &TouchPoint) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

fn midpoint(a: &TouchPoint, b: &TouchPoint) -> (f64, f64) {
    ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Tracks drag and pinch state between events
#[derive(Clone, Debug)]
pub struct GestureState {
    zoom_factor: f64,
    pan_speed: f64,
    drag: Option<(f64, f64)>,
    touch: TouchGesture,
}

impl GestureState {
    pub fn new(zoom_factor: f64, pan_speed: f64) -> Self {
        Self {
            zoom_factor,
            pan_speed,
            drag: None,
            touch: TouchGesture::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_touch_panning(&self) -> bool {
        matches!(self.touch, TouchGesture::Pan { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.touch, TouchGesture::Pinch { .. })
    }

    /// Feed one event, updating the viewport in place
    pub fn apply(&mut self, event: &InputEvent, viewport: &mut Viewport) -> Result<(), ViewportError> {
        match event {
            InputEvent::Wheel { delta_y, x, y } => {
                // Zero deltas come from horizontal-only scrolls
                if *delta_y < 0.0 {
                    viewport.zoom_at(*x, *y, ZoomDirection::In, self.zoom_factor)?;
                } else if *delta_y > 0.0 {
                    viewport.zoom_at(*x, *y, ZoomDirection::Out, self.zoom_factor)?;
                }
            }
            InputEvent::PointerDown { x, y } => {
                log::debug!("drag start at ({x:.1}, {y:.1})");
                self.drag = Some((*x, *y));
            }
            InputEvent::PointerMove { x, y } => {
                if let Some(last) = self.drag {
                    self.pan_towards(viewport, last, (*x, *y));
                    self.drag = Some((*x, *y));
                }
            }
            InputEvent::PointerUp | InputEvent::PointerLeave => {
                if self.drag.take().is_some() {
                    log::debug!("drag end");
                }
            }
            InputEvent::TouchStart(points) | InputEvent::TouchEnd(points) => {
                self.begin_touch(points);
            }
            InputEvent::TouchMove(points) => {
                self.move_touch(points, viewport)?;
            }
        }
        Ok(())
    }

    /// Content follows the hand: moving right drags the view left
    fn pan_towards(&self, viewport: &mut Viewport, from: (f64, f64), to: (f64, f64)) {
        viewport.pan_by((from.0 - to.0) * self.pan_speed, (from.1 - to.1) * self.pan_speed);
    }

    fn begin_touch(&mut self, points: &[TouchPoint]) {
        let next = match points {
            [] => TouchGesture::Idle,
            [only] => TouchGesture::Pan { last: (only.x, only.y) },
            [a, b, ..] => TouchGesture::Pinch {
                distance: distance(a, b),
                midpoint: midpoint(a, b),
            },
        };
        if std::mem::discriminant(&next) != std::mem::discriminant(&self.touch) {
            log::debug!("touch gesture {:?} -> {:?}", self.touch, next);
        }
        self.touch = next;
    }

    fn move_touch(&mut self, points: &[TouchPoint], viewport: &mut Viewport) -> Result<(), ViewportError> {
        match (self.touch, points) {
            (TouchGesture::Pan { last }, [only]) => {
                self.pan_towards(viewport, last, (only.x, only.y));
                self.touch = TouchGesture::Pan { last: (only.x, only.y) };
            }
            (TouchGesture::Pinch { distance: previous, midpoint: last_mid }, [a, b, ..]) => {
                let current = distance(a, b);
                let mid = midpoint(a, b);
                let zoomed = if current != previous {
                    viewport.pinch_update(current, previous, mid.0, mid.1, self.zoom_factor)
                } else {
                    Ok(())
                };
                // Pan and remember this move even when the zoom was refused
                self.pan_towards(viewport, last_mid, mid);
                self.touch = TouchGesture::Pinch { distance: current, midpoint: mid };
                return zoomed;
            }
            // Count changed without a start/end event: reseed from here
            _ => self.begin_touch(points),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (GestureState, Viewport) {
        (GestureState::new(1.2, 1.0), Viewport::new(50, 50, 16.0).unwrap())
    }

    fn feed(gestures: &mut GestureState, viewport: &mut Viewport, events: &[InputEvent]) {
        for event in events {
            gestures.apply(event, viewport).unwrap();
        }
    }

    #[test]
    fn test_wheel_up_zooms_in_at_cursor() {
        let (mut gestures, mut vp) = setup();
        let before = vp.screen_to_grid(200.0, 300.0);
        feed(&mut gestures, &mut vp, &[InputEvent::Wheel { delta_y: -120.0, x: 200.0, y: 300.0 }]);
        assert_eq!(vp.zoom(), 1.2);
        let after = vp.screen_to_grid(200.0, 300.0);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_down_zooms_out_and_zero_is_ignored() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[
            InputEvent::Wheel { delta_y: 0.0, x: 0.0, y: 0.0 },
            InputEvent::Wheel { delta_y: 3.0, x: 0.0, y: 0.0 },
        ]);
        assert_eq!(vp.zoom(), 1.0 / 1.2);
    }

    #[test]
    fn test_drag_pans_against_motion() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[
            InputEvent::PointerDown { x: 100.0, y: 100.0 },
            InputEvent::PointerMove { x: 130.0, y: 90.0 },
        ]);
        assert!(gestures.is_dragging());
        assert_eq!(vp.offset(), (-30.0, 10.0));

        feed(&mut gestures, &mut vp, &[
            InputEvent::PointerMove { x: 100.0, y: 100.0 },
            InputEvent::PointerUp,
        ]);
        assert!(!gestures.is_dragging());
        assert_eq!(vp.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[InputEvent::PointerMove { x: 50.0, y: 50.0 }]);
        assert_eq!(vp.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_leave_ends_drag() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::PointerLeave,
            InputEvent::PointerMove { x: 40.0, y: 40.0 },
        ]);
        assert_eq!(vp.offset(), (0.0, 0.0));
    }

    #[test]
    fn test_pan_speed_and_zoom_scale_drag() {
        let mut gestures = GestureState::new(1.2, 1.5);
        let mut vp = Viewport::new(50, 50, 16.0).unwrap();
        vp.zoom_at(0.0, 0.0, ZoomDirection::In, 2.0).unwrap();
        feed(&mut gestures, &mut vp, &[
            InputEvent::PointerDown { x: 10.0, y: 10.0 },
            InputEvent::PointerMove { x: 0.0, y: 10.0 },
        ]);
        assert_eq!(vp.offset(), (7.5, 0.0));
    }

    #[test]
    fn test_single_touch_pans() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[
            InputEvent::TouchStart(vec![TouchPoint::new(1, 50.0, 50.0)]),
            InputEvent::TouchMove(vec![TouchPoint::new(1, 40.0, 70.0)]),
        ]);
        assert!(gestures.is_touch_panning());
        assert_eq!(vp.offset(), (10.0, -20.0));
    }

    #[test]
    fn test_pinch_spread_zooms_in_around_midpoint() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[InputEvent::TouchStart(vec![
            TouchPoint::new(1, 100.0, 200.0),
            TouchPoint::new(2, 200.0, 200.0),
        ])]);
        assert!(gestures.is_pinching());

        let before = vp.screen_to_grid(150.0, 200.0);
        feed(&mut gestures, &mut vp, &[InputEvent::TouchMove(vec![
            TouchPoint::new(1, 80.0, 200.0),
            TouchPoint::new(2, 220.0, 200.0),
        ])]);
        assert_eq!(vp.zoom(), 1.2);
        let after = vp.screen_to_grid(150.0, 200.0);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
    }

    #[test]
    fn test_pinch_pinch_in_zooms_out() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[
            InputEvent::TouchStart(vec![TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 100.0, 0.0)]),
            InputEvent::TouchMove(vec![TouchPoint::new(1, 10.0, 0.0), TouchPoint::new(2, 90.0, 0.0)]),
        ]);
        assert_eq!(vp.zoom(), 1.0 / 1.2);
    }

    #[test]
    fn test_two_finger_pan_keeps_zoom() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[
            InputEvent::TouchStart(vec![TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 100.0, 0.0)]),
            InputEvent::TouchMove(vec![TouchPoint::new(1, 20.0, 30.0), TouchPoint::new(2, 120.0, 30.0)]),
        ]);
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.offset(), (-20.0, -30.0));
    }

    #[test]
    fn test_lifting_finger_ends_pinch() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[
            InputEvent::TouchStart(vec![TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 100.0, 0.0)]),
            InputEvent::TouchEnd(vec![TouchPoint::new(1, 0.0, 0.0)]),
        ]);
        assert!(!gestures.is_pinching());
        assert!(gestures.is_touch_panning());

        // Remaining finger pans from where it is, no jump
        feed(&mut gestures, &mut vp, &[InputEvent::TouchMove(vec![TouchPoint::new(1, 5.0, 0.0)])]);
        assert_eq!(vp.zoom(), 1.0);
        assert_eq!(vp.offset(), (-5.0, 0.0));

        feed(&mut gestures, &mut vp, &[InputEvent::TouchEnd(vec![])]);
        assert!(!gestures.is_touch_panning());
    }

    #[test]
    fn test_single_touch_never_pinches() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[
            InputEvent::TouchMove(vec![TouchPoint::new(1, 5.0, 5.0)]),
            InputEvent::TouchMove(vec![TouchPoint::new(1, 50.0, 500.0)]),
        ]);
        assert_eq!(vp.zoom(), 1.0);
        assert!(!gestures.is_pinching());
    }

    #[test]
    fn test_mouse_and_touch_are_independent() {
        let (mut gestures, mut vp) = setup();
        feed(&mut gestures, &mut vp, &[
            InputEvent::PointerDown { x: 0.0, y: 0.0 },
            InputEvent::TouchStart(vec![TouchPoint::new(1, 0.0, 0.0), TouchPoint::new(2, 10.0, 0.0)]),
            InputEvent::TouchEnd(vec![]),
        ]);
        assert!(gestures.is_dragging());
        assert!(!gestures.is_pinching());
    }

    #[test]
    fn test_refused_pinch_zoom_still_tracks_fingers() {
        let mut gestures = GestureState::new(1.0, 1.0);
        let mut vp = Viewport::new(50, 50, 16.0).unwrap();
        feed(&mut gestures, &mut vp, &[InputEvent::TouchStart(vec![
            TouchPoint::new(1, 0.0, 0.0),
            TouchPoint::new(2, 100.0, 0.0),
        ])]);

        let spread = InputEvent::TouchMove(vec![TouchPoint::new(1, 0.0, 20.0), TouchPoint::new(2, 140.0, 20.0)]);
        assert!(gestures.apply(&spread, &mut vp).is_err());
        assert_eq!(vp.zoom(), 1.0);
        // Midpoint went (50, 0) -> (70, 20)
        assert_eq!(vp.offset(), (-20.0, -20.0));

        // Same fingers again: nothing built up, no jump
        gestures.apply(&spread, &mut vp).unwrap();
        assert_eq!(vp.offset(), (-20.0, -20.0));
        assert!(gestures.is_pinching());
    }

    #[test]
    fn test_invalid_factor_surfaces_error() {
        let mut gestures = GestureState::new(1.0, 1.0);
        let mut vp = Viewport::new(10, 10, 10.0).unwrap();
        let err = gestures
            .apply(&InputEvent::Wheel { delta_y: -1.0, x: 0.0, y: 0.0 }, &mut vp)
            .unwrap_err();
        assert_eq!(err, ViewportError::InvalidZoomFactor(1.0));
    }
}
