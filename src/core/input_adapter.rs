use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use super::controller::{InputEvent, InputKind, Key, Modifiers, MouseButton, WheelDirection};

/// Adapter that turns Winit window events into navigator input events
#[derive(Debug, Clone, Default)]
pub struct WinitTranslator {
    /// Last cursor position seen (region pixels)
    cursor: Option<(f32, f32)>,
    /// Modifier state from the latest ModifiersChanged
    modifiers: Modifiers,
}

impl WinitTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate one window event. Events the navigator does not consume yield `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        let kind = match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = map_modifiers(modifiers.state());
                return None;
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return None;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                let key = map_key(code)?;
                match event.state {
                    ElementState::Pressed => InputKind::KeyDown { key },
                    ElementState::Released => InputKind::KeyUp { key },
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = map_mouse_button(*button)?;
                match state {
                    ElementState::Pressed => InputKind::ButtonDown { button },
                    ElementState::Released => InputKind::ButtonUp { button },
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                let (dx, dy) = match self.cursor {
                    Some((px, py)) => (x - px, y - py),
                    None => (0.0, 0.0),
                };
                self.cursor = Some((x, y));
                InputKind::Motion { x, y, dx, dy }
            }
            WindowEvent::MouseWheel { delta, .. } => InputKind::Wheel {
                direction: wheel_direction(delta)?,
            },
            _ => return None,
        };
        Some(InputEvent::with_modifiers(kind, self.modifiers))
    }

    /// Record a cursor warp so the next motion delta is measured from the warp target
    pub fn note_warp(&mut self, x: f32, y: f32) {
        self.cursor = Some((x, y));
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

pub fn map_modifiers(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
    }
}

pub fn map_mouse_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    use winit::event::MouseButton as W;
    match button {
        W::Left => Some(MouseButton::Lmb),
        W::Right => Some(MouseButton::Rmb),
        W::Middle => Some(MouseButton::Mmb),
        W::Back => Some(MouseButton::Mb4),
        W::Forward => Some(MouseButton::Mb5),
        W::Other(6) => Some(MouseButton::Mb6),
        W::Other(7) => Some(MouseButton::Mb7),
        W::Other(_) => None,
    }
}

/// Scroll away from the user (positive y) is wheel-up
pub fn wheel_direction(delta: &MouseScrollDelta) -> Option<WheelDirection> {
    let y = match delta {
        MouseScrollDelta::LineDelta(_, y) => *y as f64,
        MouseScrollDelta::PixelDelta(position) => position.y,
    };
    if y > 0.0 {
        Some(WheelDirection::Up)
    } else if y < 0.0 {
        Some(WheelDirection::Down)
    } else {
        None
    }
}

pub fn map_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::KeyA => Key::Letter('A'),
        KeyCode::KeyB => Key::Letter('B'),
        KeyCode::KeyC => Key::Letter('C'),
        KeyCode::KeyD => Key::Letter('D'),
        KeyCode::KeyE => Key::Letter('E'),
        KeyCode::KeyF => Key::Letter('F'),
        KeyCode::KeyG => Key::Letter('G'),
        KeyCode::KeyH => Key::Letter('H'),
        KeyCode::KeyI => Key::Letter('I'),
        KeyCode::KeyJ => Key::Letter('J'),
        KeyCode::KeyK => Key::Letter('K'),
        KeyCode::KeyL => Key::Letter('L'),
        KeyCode::KeyM => Key::Letter('M'),
        KeyCode::KeyN => Key::Letter('N'),
        KeyCode::KeyO => Key::Letter('O'),
        KeyCode::KeyP => Key::Letter('P'),
        KeyCode::KeyQ => Key::Letter('Q'),
        KeyCode::KeyR => Key::Letter('R'),
        KeyCode::KeyS => Key::Letter('S'),
        KeyCode::KeyT => Key::Letter('T'),
        KeyCode::KeyU => Key::Letter('U'),
        KeyCode::KeyV => Key::Letter('V'),
        KeyCode::KeyW => Key::Letter('W'),
        KeyCode::KeyX => Key::Letter('X'),
        KeyCode::KeyY => Key::Letter('Y'),
        KeyCode::KeyZ => Key::Letter('Z'),
        KeyCode::Digit0 | KeyCode::Numpad0 => Key::Digit(0),
        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit(1),
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit(2),
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit(3),
        KeyCode::Digit4 | KeyCode::Numpad4 => Key::Digit(4),
        KeyCode::Digit5 | KeyCode::Numpad5 => Key::Digit(5),
        KeyCode::Digit6 | KeyCode::Numpad6 => Key::Digit(6),
        KeyCode::Digit7 | KeyCode::Numpad7 => Key::Digit(7),
        KeyCode::Digit8 | KeyCode::Numpad8 => Key::Digit(8),
        KeyCode::Digit9 | KeyCode::Numpad9 => Key::Digit(9),
        KeyCode::F1 => Key::Function(1),
        KeyCode::F2 => Key::Function(2),
        KeyCode::F3 => Key::Function(3),
        KeyCode::F4 => Key::Function(4),
        KeyCode::F5 => Key::Function(5),
        KeyCode::F6 => Key::Function(6),
        KeyCode::F7 => Key::Function(7),
        KeyCode::F8 => Key::Function(8),
        KeyCode::F9 => Key::Function(9),
        KeyCode::F10 => Key::Function(10),
        KeyCode::F11 => Key::Function(11),
        KeyCode::F12 => Key::Function(12),
        KeyCode::Space => Key::Space,
        KeyCode::Escape => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        _ => return None,
    };
    Some(key)
}
