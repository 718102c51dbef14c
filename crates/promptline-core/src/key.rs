//! Terminal-agnostic keyboard input.
//!
//! [`KeyInput`] is the only thing the prompt state machines ever see. Drivers
//! either translate their terminal library's events into it, or feed raw
//! stdin bytes through a [`KeyDecoder`].

/// Keyboard input abstraction.
///
/// Decouples prompt logic from terminal libraries (crossterm, termion, raw
/// byte streams) enabling deterministic simulation testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    /// Printable character. Space arrives as `Char(' ')`.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Tab key. Confirms like Enter.
    Tab,
    /// Backspace key (drop the last buffered character).
    Backspace,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Control-C. Terminates regardless of prompt kind or edit state.
    Interrupt,
}

impl KeyInput {
    /// Whether this key confirms the current prompt.
    pub fn is_confirm(self) -> bool {
        matches!(self, Self::Enter | Self::Tab)
    }
}

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;

/// Longest escape sequence held back waiting for its final byte.
const MAX_ESCAPE_LEN: usize = 16;

/// Incremental decoder from raw terminal bytes to [`KeyInput`]s.
///
/// Bytes are fed in whatever chunks the terminal delivers them. Incomplete
/// UTF-8 characters and escape sequences are held back until the rest
/// arrives, so a read boundary never splits a key.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    pending: Vec<u8>,
}

impl KeyDecoder {
    /// Create a decoder with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes held back waiting for the rest of a sequence.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Feed a chunk of bytes and return every key completed by it, in
    /// arrival order.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<KeyInput> {
        self.pending.extend_from_slice(bytes);

        let mut keys = Vec::new();
        let mut pos = 0;
        while pos < self.pending.len() {
            match decode_one(&self.pending[pos..]) {
                Decoded::Key(key, used) => {
                    keys.push(key);
                    pos += used;
                },
                Decoded::Skip(used) => pos += used,
                Decoded::Incomplete => break,
            }
        }
        self.pending.drain(..pos);
        keys
    }
}

enum Decoded {
    Key(KeyInput, usize),
    Skip(usize),
    Incomplete,
}

fn decode_one(buf: &[u8]) -> Decoded {
    let Some(&first) = buf.first() else {
        return Decoded::Incomplete;
    };

    match first {
        b'\r' | b'\n' => Decoded::Key(KeyInput::Enter, 1),
        b'\t' => Decoded::Key(KeyInput::Tab, 1),
        BACKSPACE | DELETE => Decoded::Key(KeyInput::Backspace, 1),
        CTRL_C => Decoded::Key(KeyInput::Interrupt, 1),
        ESC => decode_escape(buf),
        0x00..=0x1f => Decoded::Skip(1),
        _ => decode_utf8(buf),
    }
}

/// CSI (`ESC [`) and SS3 (`ESC O`) arrow keys. Anything else starting with
/// ESC is consumed up to its final byte and dropped.
fn decode_escape(buf: &[u8]) -> Decoded {
    let Some(&intro) = buf.get(1) else {
        return Decoded::Incomplete;
    };
    if intro != b'[' && intro != b'O' {
        // Lone ESC or Alt+key: not a prompt key.
        return Decoded::Skip(1);
    }

    // Parameters and intermediates (0x20..=0x3f) run until a final byte in
    // 0x40..=0x7e. Any other byte ends a malformed sequence and is kept.
    let mut len = None;
    for (i, &b) in buf.iter().enumerate().skip(2).take(MAX_ESCAPE_LEN - 2) {
        match b {
            0x20..=0x3f => {},
            0x40..=0x7e => {
                len = Some(i + 1);
                break;
            },
            _ => return Decoded::Skip(i),
        }
    }
    let Some(len) = len else {
        if buf.len() < MAX_ESCAPE_LEN {
            return Decoded::Incomplete;
        }
        // Overlong: drop it along with the rest of its parameter bytes.
        let run = buf[2..].iter().take_while(|b| (0x20..=0x3f).contains(*b)).count();
        return Decoded::Skip(2 + run);
    };
    let key = match buf[len - 1] {
        b'A' => KeyInput::Up,
        b'B' => KeyInput::Down,
        b'C' => KeyInput::Right,
        b'D' => KeyInput::Left,
        _ => return Decoded::Skip(len),
    };
    Decoded::Key(key, len)
}

fn decode_utf8(buf: &[u8]) -> Decoded {
    let width = match buf[0] {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Decoded::Skip(1),
    };
    if buf.len() < width {
        return Decoded::Incomplete;
    }
    match std::str::from_utf8(&buf[..width]).ok().and_then(|s| s.chars().next()) {
        Some(c) => Decoded::Key(KeyInput::Char(c), width),
        None => Decoded::Skip(1),
    }
}
