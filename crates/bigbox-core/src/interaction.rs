//! Rotation and zoom state driven by drag/pinch gestures
//!
//! Gestures are produced on the input thread and consumed on the graphics
//! thread. [`GestureSender`] pushes them into a channel; the render loop
//! calls [`InteractionController::apply_pending`] once per frame, which
//! applies them strictly in arrival order.

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use serde::{Deserialize, Serialize};

use crate::constants::{
    AUTO_ROTATE_DELTA, DEFAULT_ANGLE_X, DEFAULT_ANGLE_Y, DEFAULT_ZOOM, EQUATORIAL_PITCH_LIMIT,
    FULL_PITCH_LIMIT, MAX_ZOOM, MIN_ZOOM, ROTATION_SENSITIVITY,
};

/// Current orientation and zoom of the box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionState {
    /// Pitch in degrees.
    pub angle_x: f32,
    /// Yaw in degrees, unbounded.
    pub angle_y: f32,
    pub zoom_factor: f32,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            angle_x: DEFAULT_ANGLE_X,
            angle_y: DEFAULT_ANGLE_Y,
            zoom_factor: DEFAULT_ZOOM,
        }
    }
}

/// Tunables for the controller, loadable from the renderer config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Degrees per pixel of drag.
    pub sensitivity: f32,
    pub initial_angle_x: f32,
    pub initial_angle_y: f32,
    pub initial_zoom: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            sensitivity: ROTATION_SENSITIVITY,
            initial_angle_x: DEFAULT_ANGLE_X,
            initial_angle_y: DEFAULT_ANGLE_Y,
            initial_zoom: DEFAULT_ZOOM,
        }
    }
}

/// Which gesture currently owns the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
    Pinching,
}

/// A recognized gesture step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// Pointer moved by (`dx`, `dy`) pixels while dragging.
    Drag { dx: f32, dy: f32 },
    DragEnd,
    PinchBegin,
    /// Multiplicative zoom change since the previous pinch step.
    Pinch { scale_delta: f32 },
    PinchEnd,
}

/// Cloneable producer side of the gesture queue.
#[derive(Debug, Clone)]
pub struct GestureSender {
    tx: Sender<GestureEvent>,
}

impl GestureSender {
    /// Queue an event. Returns `false` once the controller is gone.
    pub fn send(&self, event: GestureEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Applies gestures to an [`InteractionState`] under the pitch/zoom limits.
#[derive(Debug)]
pub struct InteractionController {
    state: InteractionState,
    phase: GesturePhase,
    sensitivity: f32,
    pitch_limit: f32,
    tx: Sender<GestureEvent>,
    rx: Receiver<GestureEvent>,
}

impl InteractionController {
    /// Controller with default angles. `supports_full_x_rotation` selects
    /// the ±90° or ±7° pitch range.
    pub fn new(supports_full_x_rotation: bool) -> Self {
        Self::with_config(supports_full_x_rotation, &InteractionConfig::default())
    }

    pub fn with_config(supports_full_x_rotation: bool, config: &InteractionConfig) -> Self {
        let pitch_limit = if supports_full_x_rotation {
            FULL_PITCH_LIMIT
        } else {
            EQUATORIAL_PITCH_LIMIT
        };
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut controller = Self {
            state: InteractionState::default(),
            phase: GesturePhase::Idle,
            sensitivity: config.sensitivity,
            pitch_limit,
            tx,
            rx,
        };
        controller.set_state(InteractionState {
            angle_x: config.initial_angle_x,
            angle_y: config.initial_angle_y,
            zoom_factor: config.initial_zoom,
        });
        controller
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn pitch_limit(&self) -> f32 {
        self.pitch_limit
    }

    /// Replace the state, clamping pitch and zoom into range.
    pub fn set_state(&mut self, state: InteractionState) {
        self.state = InteractionState {
            angle_x: state.angle_x.clamp(-self.pitch_limit, self.pitch_limit),
            angle_y: state.angle_y,
            zoom_factor: state.zoom_factor.clamp(MIN_ZOOM, MAX_ZOOM),
        };
    }

    /// Rotate by a drag delta in pixels.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.state.angle_y += dx * self.sensitivity;
        self.state.angle_x =
            (self.state.angle_x + dy * self.sensitivity).clamp(-self.pitch_limit, self.pitch_limit);
    }

    /// Scale zoom by `scale_delta`.
    pub fn apply_pinch(&mut self, scale_delta: f32) {
        self.state.zoom_factor = (self.state.zoom_factor * scale_delta).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Apply one gesture event, tracking the phase.
    ///
    /// A pinch wins over a drag: drag deltas that arrive mid-pinch are
    /// dropped.
    pub fn handle(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Drag { dx, dy } => match self.phase {
                GesturePhase::Pinching => {}
                _ => {
                    self.phase = GesturePhase::Dragging;
                    self.apply_drag(dx, dy);
                }
            },
            GestureEvent::DragEnd => {
                if self.phase == GesturePhase::Dragging {
                    self.phase = GesturePhase::Idle;
                }
            }
            GestureEvent::PinchBegin => self.phase = GesturePhase::Pinching,
            GestureEvent::Pinch { scale_delta } => {
                self.phase = GesturePhase::Pinching;
                self.apply_pinch(scale_delta);
            }
            GestureEvent::PinchEnd => {
                if self.phase == GesturePhase::Pinching {
                    self.phase = GesturePhase::Idle;
                }
            }
        }
    }

    /// Whether a drag or pinch is in progress.
    pub fn gesture_active(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    /// Advance the idle spin by one frame. Does nothing mid-gesture.
    pub fn tick_auto_rotate(&mut self) {
        if !self.gesture_active() {
            self.apply_drag(AUTO_ROTATE_DELTA, 0.0);
        }
    }

    /// Producer handle for the input thread.
    pub fn sender(&self) -> GestureSender {
        GestureSender {
            tx: self.tx.clone(),
        }
    }

    /// Drain every queued gesture in order. Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    self.handle(event);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if applied > 0 {
            tracing::trace!("Applied {} gesture events", applied);
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let c = InteractionController::new(true);
        assert_eq!(c.state(), InteractionState::default());
        assert_eq!(c.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_initial_pitch_clamped_for_equatorial() {
        let c = InteractionController::new(false);
        assert_eq!(c.state().angle_x, 7.0);
    }

    #[test]
    fn test_drag_converges_to_pole() {
        let mut c = InteractionController::new(true);
        for _ in 0..10 {
            c.apply_drag(0.0, 1000.0);
        }
        assert_eq!(c.state().angle_x, 90.0);
        c.apply_drag(0.0, -1000.0);
        assert_eq!(c.state().angle_x, -90.0);
    }

    #[test]
    fn test_equatorial_pitch_limit() {
        let mut c = InteractionController::new(false);
        c.apply_drag(0.0, -100.0);
        assert_eq!(c.state().angle_x, -7.0);
    }

    #[test]
    fn test_yaw_is_unbounded() {
        let mut c = InteractionController::new(true);
        c.apply_drag(1000.0, 0.0);
        assert!((c.state().angle_y - 430.0).abs() < 1e-3);
    }

    #[test]
    fn test_pinch_clamps_zoom() {
        let mut c = InteractionController::new(true);
        c.apply_pinch(10.0);
        c.apply_pinch(10.0);
        assert_eq!(c.state().zoom_factor, 3.0);
        c.apply_pinch(0.01);
        assert_eq!(c.state().zoom_factor, 0.5);
    }

    #[test]
    fn test_drag_dropped_while_pinching() {
        let mut c = InteractionController::new(true);
        let before = c.state();
        c.handle(GestureEvent::PinchBegin);
        c.handle(GestureEvent::Drag { dx: 50.0, dy: 50.0 });
        assert_eq!(c.state(), before);
        c.handle(GestureEvent::PinchEnd);
        assert!(!c.gesture_active());
    }

    #[test]
    fn test_auto_rotate_pauses_during_gesture() {
        let mut c = InteractionController::new(true);
        c.tick_auto_rotate();
        assert!((c.state().angle_y - 30.16).abs() < 1e-4);

        c.handle(GestureEvent::Drag { dx: 0.0, dy: 0.0 });
        let during = c.state();
        c.tick_auto_rotate();
        assert_eq!(c.state(), during);

        c.handle(GestureEvent::DragEnd);
        c.tick_auto_rotate();
        assert!(c.state().angle_y > during.angle_y);
    }

    #[test]
    fn test_pending_events_applied_in_order() {
        let mut c = InteractionController::new(true);
        let sender = c.sender();
        std::thread::spawn(move || {
            sender.send(GestureEvent::Pinch { scale_delta: 2.0 });
            sender.send(GestureEvent::PinchEnd);
            sender.send(GestureEvent::Drag { dx: 10.0, dy: 0.0 });
        })
        .join()
        .unwrap();

        assert_eq!(c.apply_pending(), 3);
        assert_eq!(c.state().zoom_factor, 2.0);
        assert!((c.state().angle_y - 34.0).abs() < 1e-4);
        assert_eq!(c.phase(), GesturePhase::Dragging);
        assert_eq!(c.apply_pending(), 0);
    }

    #[test]
    fn test_config_overrides() {
        let config = InteractionConfig {
            sensitivity: 1.0,
            initial_angle_x: 0.0,
            initial_angle_y: 0.0,
            initial_zoom: 9.0,
        };
        let mut c = InteractionController::with_config(true, &config);
        assert_eq!(c.state().zoom_factor, 3.0);
        c.apply_drag(5.0, 0.0);
        assert_eq!(c.state().angle_y, 5.0);
    }
}
