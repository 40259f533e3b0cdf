use crate::input::keys::KeyState;

/// Input event types the engine understands.
/// Generic, with no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A custom event from the page (resize, UI buttons, etc.).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events plus the live key state they produce.
///
/// Key events update [`KeyState`] the moment they are pushed; the queue only
/// keeps the event list for games that want edges or custom events.
pub struct InputQueue {
    events: Vec<InputEvent>,
    keys: KeyState,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::with_keys(KeyState::new())
    }

    pub fn with_keys(keys: KeyState) -> Self {
        Self {
            events: Vec::with_capacity(32),
            keys,
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key_code } => {
                self.keys.press(key_code);
            }
            InputEvent::KeyUp { key_code } => self.keys.release(key_code),
            InputEvent::Custom { .. } => {}
        }
        self.events.push(event);
    }

    /// Drain all pending events. Key state is left untouched.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Keys held right now.
    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
