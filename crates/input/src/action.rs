use flagflight_common::{Axis, ControlInput};
use tracing::debug;

/// Keys the scene responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    A,
    D,
    Space,
    LeftControl,
    R,
    M,
    L,
}

/// Transition reported by the windowing layer for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Press,
    Repeat,
    Release,
}

/// A flight control held down by a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Faster,
    Slower,
    Left,
    Right,
    Up,
    Down,
}

impl Control {
    const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }
}

/// A one-shot scene action triggered on key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Cycle between shaded color and surface normals.
    CycleRenderMode,
    /// Switch between day and night lighting.
    ToggleDaylight,
    /// Switch the plane's navigation lights.
    TogglePlaneLights,
}

/// Held flight controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; Control::COUNT],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key event. Control keys update the held set; action keys
    /// return their action on press only.
    pub fn handle_key(&mut self, key: Key, event: KeyEvent) -> Option<Action> {
        let down = matches!(event, KeyEvent::Press | KeyEvent::Repeat);
        let control = match key {
            Key::W => Control::Faster,
            Key::S => Control::Slower,
            Key::A => Control::Left,
            Key::D => Control::Right,
            Key::Space => Control::Up,
            Key::LeftControl => Control::Down,
            Key::R | Key::M | Key::L => {
                if event != KeyEvent::Press {
                    return None;
                }
                let action = match key {
                    Key::R => Action::CycleRenderMode,
                    Key::M => Action::ToggleDaylight,
                    _ => Action::TogglePlaneLights,
                };
                debug!(?action, "scene action");
                return Some(action);
            }
        };
        self.held[control.index()] = down;
        None
    }

    pub fn is_held(&self, control: Control) -> bool {
        self.held[control.index()]
    }

    /// Release everything, e.g. when the window loses focus.
    pub fn clear(&mut self) {
        self.held = [false; Control::COUNT];
    }

    /// Current controls: each axis is its positive key minus its negative key.
    pub fn controls(&self) -> ControlInput {
        ControlInput {
            throttle: Axis::from_keys(self.is_held(Control::Faster), self.is_held(Control::Slower)),
            turn: Axis::from_keys(self.is_held(Control::Left), self.is_held(Control::Right)),
            pitch: Axis::from_keys(self.is_held(Control::Up), self.is_held(Control::Down)),
        }
    }
}
