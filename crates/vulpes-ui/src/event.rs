//! Device-independent input and the UI events the canvas reports back.

use bitflags::bitflags;
use vulpes_core::math::IVec2;

use crate::control::ControlId;

/// Number of mouse buttons tracked for click timing.
pub const MAX_MOUSE_BUTTONS: usize = 5;

/// Mouse button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl MouseButton {
    pub fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Right => 1,
            MouseButton::Middle => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
        }
    }
}

/// Keys the core routes by identity. Printable text arrives separately
/// through [`InputEvent::Char`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Backspace,
    Delete,
    Space,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Shift,
    Control,
    Alt,
    /// A letter or digit key, for accelerators and widget shortcuts.
    Character(char),
    /// Raw platform key code.
    Other(u32),
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
    }
}

impl Modifiers {
    pub(crate) fn from_key(key: Key) -> Modifiers {
        match key {
            Key::Shift => Modifiers::SHIFT,
            Key::Control => Modifiers::CTRL,
            Key::Alt => Modifiers::ALT,
            _ => Modifiers::empty(),
        }
    }

    /// Accelerator prefix in the form `CTRL+SHIFT+`.
    pub fn accelerator_prefix(self) -> String {
        let mut prefix = String::new();
        if self.contains(Modifiers::CTRL) {
            prefix.push_str("CTRL+");
        }
        if self.contains(Modifiers::SHIFT) {
            prefix.push_str("SHIFT+");
        }
        if self.contains(Modifiers::ALT) {
            prefix.push_str("ALT+");
        }
        prefix
    }
}

/// Cursor a host should display, as requested by the hovered control or an
/// active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorIcon {
    #[default]
    Default,
    Pointer,
    Text,
    Move,
    ResizeHorizontal,
    ResizeVertical,
    NotAllowed,
}

/// Raw input fed to [`Canvas::handle_input`](crate::Canvas::handle_input).
/// Coordinates are window pixels before canvas scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseMoved { position: IVec2, delta: IVec2 },
    MouseButton { button: MouseButton, pressed: bool },
    MouseWheel { delta: i32 },
    Key { key: Key, pressed: bool },
    Char(char),
}

/// Events emitted by the canvas for hosts to observe. Each transition is
/// recorded exactly once; drain with [`Canvas::drain_events`](crate::Canvas::drain_events).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    MouseEnter(ControlId),
    MouseLeave(ControlId),
    MouseDown { control: ControlId, button: MouseButton },
    MouseUp { control: ControlId, button: MouseButton },
    Click { control: ControlId, button: MouseButton },
    DoubleClick { control: ControlId, button: MouseButton },
    FocusGained(ControlId),
    FocusLost(ControlId),
    Accelerator { control: ControlId, action: String },
    DragStarted { source: ControlId },
    DragEnter { target: ControlId },
    DragLeave { target: ControlId },
    Dropped { source: ControlId, target: Option<ControlId>, success: bool },
    Destroyed(ControlId),
}
