//! Raw pointer events to drag/pinch gestures

use glam::Vec2;

use crate::interaction::GestureEvent;

/// Platform-neutral touch/mouse input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
    Cancel,
    ScaleBegin,
    /// Scale factor since the previous scale event.
    Scale { factor: f32 },
    ScaleEnd,
}

/// Result of feeding one pointer event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recognized {
    pub gestures: Vec<GestureEvent>,
    /// Set when [`GestureRecognizer::is_active`] flipped on this event.
    pub active_changed: Option<bool>,
}

/// Turns pointer streams into [`GestureEvent`]s.
///
/// A scale gesture cancels any drag in progress; pointer moves are ignored
/// until the scale gesture ends and a new `Down` arrives.
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    last: Option<Vec2>,
    scaling: bool,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drag or scale gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.last.is_some() || self.scaling
    }

    pub fn feed(&mut self, event: PointerEvent) -> Recognized {
        let was_active = self.is_active();
        let mut gestures = Vec::new();

        match event {
            PointerEvent::Down { x, y } => {
                if !self.scaling {
                    self.last = Some(Vec2::new(x, y));
                }
            }
            PointerEvent::Move { x, y } => {
                if let Some(prev) = self.last {
                    let pos = Vec2::new(x, y);
                    let delta = pos - prev;
                    self.last = Some(pos);
                    gestures.push(GestureEvent::Drag {
                        dx: delta.x,
                        dy: delta.y,
                    });
                }
            }
            PointerEvent::Up | PointerEvent::Cancel => {
                if self.last.take().is_some() {
                    gestures.push(GestureEvent::DragEnd);
                }
            }
            PointerEvent::ScaleBegin => {
                if self.last.take().is_some() {
                    gestures.push(GestureEvent::DragEnd);
                }
                self.scaling = true;
                gestures.push(GestureEvent::PinchBegin);
            }
            PointerEvent::Scale { factor } => {
                if !self.scaling {
                    self.last = None;
                    self.scaling = true;
                    gestures.push(GestureEvent::PinchBegin);
                }
                gestures.push(GestureEvent::Pinch {
                    scale_delta: factor,
                });
            }
            PointerEvent::ScaleEnd => {
                if self.scaling {
                    self.scaling = false;
                    gestures.push(GestureEvent::PinchEnd);
                }
            }
        }

        let now_active = self.is_active();
        Recognized {
            gestures,
            active_changed: (now_active != was_active).then_some(now_active),
        }
    }
}
