use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mouse button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Lmb,
    Rmb,
    Mmb,
    Mb4,
    Mb5,
    Mb6,
    Mb7,
}

impl MouseButton {
    pub const ALL: [MouseButton; 7] = [
        MouseButton::Lmb,
        MouseButton::Rmb,
        MouseButton::Mmb,
        MouseButton::Mb4,
        MouseButton::Mb5,
        MouseButton::Mb6,
        MouseButton::Mb7,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            MouseButton::Lmb => "lmb",
            MouseButton::Rmb => "rmb",
            MouseButton::Mmb => "mmb",
            MouseButton::Mb4 => "mb4",
            MouseButton::Mb5 => "mb5",
            MouseButton::Mb6 => "mb6",
            MouseButton::Mb7 => "mb7",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of mouse buttons currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ButtonSet(u8);

impl ButtonSet {
    pub const EMPTY: ButtonSet = ButtonSet(0);

    pub fn single(button: MouseButton) -> Self {
        ButtonSet(button.bit())
    }

    pub fn pair(a: MouseButton, b: MouseButton) -> Self {
        ButtonSet(a.bit() | b.bit())
    }

    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.bit();
    }

    pub fn contains(&self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = MouseButton> + '_ {
        MouseButton::ALL.into_iter().filter(|b| self.contains(*b))
    }
}

impl FromIterator<MouseButton> for ButtonSet {
    fn from_iter<I: IntoIterator<Item = MouseButton>>(iter: I) -> Self {
        iter.into_iter().fold(ButtonSet::EMPTY, |mut set, b| {
            set.insert(b);
            set
        })
    }
}

/// Keyboard key identifier, written in settings as `W`, `3`, `SPACE`, `ESC`, `F5`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    /// Latin letter, stored upper-case
    Letter(char),
    Digit(u8),
    Function(u8),
    Space,
    Escape,
    Tab,
    Enter,
    Backspace,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown input name `{0}`")]
pub struct ParseInputError(pub String);

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Letter(c) => write!(f, "{c}"),
            Key::Digit(d) => write!(f, "{d}"),
            Key::Function(n) => write!(f, "F{n}"),
            Key::Space => f.write_str("SPACE"),
            Key::Escape => f.write_str("ESC"),
            Key::Tab => f.write_str("TAB"),
            Key::Enter => f.write_str("RETURN"),
            Key::Backspace => f.write_str("BACK_SPACE"),
        }
    }
}

impl FromStr for Key {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let mut chars = upper.chars();
        let key = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Key::Letter(c),
            (Some(c), None) if c.is_ascii_digit() => Key::Digit(c as u8 - b'0'),
            _ => match upper.as_str() {
                "SPACE" => Key::Space,
                "ESC" | "ESCAPE" => Key::Escape,
                "TAB" => Key::Tab,
                "RETURN" | "ENTER" => Key::Enter,
                "BACK_SPACE" | "BACKSPACE" => Key::Backspace,
                other => match other.strip_prefix('F').map(str::parse::<u8>) {
                    Some(Ok(n)) if (1..=24).contains(&n) => Key::Function(n),
                    _ => return Err(ParseInputError(s.to_string())),
                },
            },
        };
        Ok(key)
    }
}

impl TryFrom<String> for Key {
    type Error = ParseInputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// Input that can start a navigation session: a key or a mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Trigger {
    Key(Key),
    Button(MouseButton),
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Key(key) => key.fmt(f),
            Trigger::Button(button) => button.fmt(f),
        }
    }
}

impl FromStr for Trigger {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        MouseButton::ALL
            .into_iter()
            .find(|b| b.name() == lower)
            .map(Trigger::Button)
            .map_or_else(|| s.parse().map(Trigger::Key), Ok)
    }
}

impl TryFrom<String> for Trigger {
    type Error = ParseInputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Trigger> for String {
    fn from(trigger: Trigger) -> Self {
        trigger.to_string()
    }
}

/// Modifier keys held during an event.
///
/// Shift is the "faster" modifier, Ctrl the "slower" one and Alt the "alternate" one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
    };

    /// Faster applies only when slower is not held as well
    pub fn faster(&self) -> bool {
        self.shift && !self.ctrl
    }

    /// Slower applies only when faster is not held as well
    pub fn slower(&self) -> bool {
        self.ctrl && !self.shift
    }

    pub fn alternate(&self) -> bool {
        self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    pub fn sign(self) -> i32 {
        match self {
            WheelDirection::Up => 1,
            WheelDirection::Down => -1,
        }
    }
}

/// Discrete input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputKind {
    ButtonDown { button: MouseButton },
    ButtonUp { button: MouseButton },
    /// Cursor position in region pixels (y down) and the delta since the previous event
    Motion { x: f32, y: f32, dx: f32, dy: f32 },
    Wheel { direction: WheelDirection },
    KeyDown { key: Key },
    KeyUp { key: Key },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub modifiers: Modifiers,
}

impl InputEvent {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(kind: InputKind, modifiers: Modifiers) -> Self {
        Self { kind, modifiers }
    }

    pub fn key_down(key: Key) -> Self {
        Self::new(InputKind::KeyDown { key })
    }

    pub fn key_up(key: Key) -> Self {
        Self::new(InputKind::KeyUp { key })
    }

    pub fn button_down(button: MouseButton) -> Self {
        Self::new(InputKind::ButtonDown { button })
    }

    pub fn button_up(button: MouseButton) -> Self {
        Self::new(InputKind::ButtonUp { button })
    }

    pub fn motion(x: f32, y: f32, dx: f32, dy: f32) -> Self {
        Self::new(InputKind::Motion { x, y, dx, dy })
    }

    pub fn wheel(direction: WheelDirection) -> Self {
        Self::new(InputKind::Wheel { direction })
    }

    /// True when this event presses `trigger`
    pub fn presses(&self, trigger: Trigger) -> bool {
        match (self.kind, trigger) {
            (InputKind::KeyDown { key }, Trigger::Key(k)) => key == k,
            (InputKind::ButtonDown { button }, Trigger::Button(b)) => button == b,
            _ => false,
        }
    }

    /// True when this event releases `trigger`
    pub fn releases(&self, trigger: Trigger) -> bool {
        match (self.kind, trigger) {
            (InputKind::KeyUp { key }, Trigger::Key(k)) => key == k,
            (InputKind::ButtonUp { button }, Trigger::Button(b)) => button == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_set_tracks_presses() {
        let mut set = ButtonSet::EMPTY;
        set.insert(MouseButton::Lmb);
        set.insert(MouseButton::Mb6);
        set.insert(MouseButton::Lmb);

        assert_eq!(set.len(), 2);
        assert!(set.contains(MouseButton::Mb6));
        assert!(!set.contains(MouseButton::Rmb));

        set.remove(MouseButton::Lmb);
        assert_eq!(set, ButtonSet::single(MouseButton::Mb6));
        set.remove(MouseButton::Mb6);
        assert!(set.is_empty());
    }

    #[test]
    fn test_button_set_order_independent() {
        assert_eq!(
            ButtonSet::pair(MouseButton::Lmb, MouseButton::Rmb),
            ButtonSet::pair(MouseButton::Rmb, MouseButton::Lmb)
        );
        let collected: ButtonSet = [MouseButton::Mmb, MouseButton::Mb4].into_iter().collect();
        assert_eq!(collected.iter().collect::<Vec<_>>(), vec![MouseButton::Mmb, MouseButton::Mb4]);
    }

    #[test]
    fn test_key_names_round_trip() {
        for name in ["W", "3", "SPACE", "ESC", "TAB", "F5", "RETURN", "BACK_SPACE"] {
            let key: Key = name.parse().unwrap();
            assert_eq!(key.to_string(), name);
        }
        assert_eq!("w".parse::<Key>().unwrap(), Key::Letter('W'));
        assert!("F99".parse::<Key>().is_err());
        assert!("WHEELUP".parse::<Key>().is_err());
    }

    #[test]
    fn test_trigger_prefers_mouse_buttons() {
        assert_eq!("mb4".parse::<Trigger>().unwrap(), Trigger::Button(MouseButton::Mb4));
        assert_eq!("space".parse::<Trigger>().unwrap(), Trigger::Key(Key::Space));
    }

    #[test]
    fn test_key_serde_uses_names() {
        let json = serde_json::to_string(&Key::Letter('C')).unwrap();
        assert_eq!(json, "\"C\"");
        let trigger: Trigger = serde_json::from_str("\"MB5\"").unwrap();
        assert_eq!(trigger, Trigger::Button(MouseButton::Mb5));
    }

    #[test]
    fn test_faster_and_slower_cancel() {
        let both = Modifiers { shift: true, ctrl: true, alt: false };
        assert!(!both.faster());
        assert!(!both.slower());
        let fast = Modifiers { shift: true, ..Modifiers::NONE };
        assert!(fast.faster());
    }

    #[test]
    fn test_event_presses_trigger() {
        let space = Trigger::Key(Key::Space);
        assert!(InputEvent::key_down(Key::Space).presses(space));
        assert!(!InputEvent::key_up(Key::Space).presses(space));
        assert!(InputEvent::key_up(Key::Space).releases(space));
        assert!(InputEvent::button_down(MouseButton::Mb4).presses(Trigger::Button(MouseButton::Mb4)));
    }

    #[test]
    fn test_input_kind_json_shape() {
        let kind: InputKind = serde_json::from_str(r#"{"kind":"button_down","button":"rmb"}"#).unwrap();
        assert_eq!(kind, InputKind::ButtonDown { button: MouseButton::Rmb });
    }
}
