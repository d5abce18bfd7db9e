use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Tracks the mouse state the orbit controller reads.
#[derive(Default)]
pub struct Input {
    buttons_down: HashSet<MouseButton>,
    cursor_position: Vec2,
    mouse_delta: Vec2,
    scroll_delta: Vec2,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call once per frame, after the tick, to reset per-frame deltas.
    pub fn begin_frame(&mut self) {
        self.mouse_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => {
                    self.buttons_down.insert(*button);
                }
                ElementState::Released => {
                    self.buttons_down.remove(button);
                }
            },
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                self.mouse_delta += new_pos - self.cursor_position;
                self.cursor_position = new_pos;
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let d = match delta {
                    winit::event::MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                    winit::event::MouseScrollDelta::PixelDelta(pos) => {
                        Vec2::new(pos.x as f32, pos.y as f32) / 120.0
                    }
                };
                self.scroll_delta += d;
            }
            _ => {}
        }
    }

    /// Returns true if the mouse button is currently held down.
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Cursor position in physical window coordinates.
    pub fn cursor_position(&self) -> Vec2 {
        self.cursor_position
    }

    /// Mouse movement delta this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Scroll wheel delta this frame (in "lines").
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }
}
