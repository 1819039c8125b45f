// Keystroke abstraction shared by the picker and the monitor loop.

use std::collections::VecDeque;

use anyhow::{bail, Result};

/// A keystroke, reduced to what the interactive screens care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    /// Ctrl+C. In raw mode this arrives as a key, not a signal.
    Interrupt,
    Other,
}

/// Blocking source of keystrokes.
pub trait KeySource {
    fn next_key(&mut self) -> Result<Key>;
}

/// Scripted input: keys are handed out in order, and running dry is an error
/// so a test cannot hang waiting for input that never comes.
impl KeySource for VecDeque<Key> {
    fn next_key(&mut self) -> Result<Key> {
        match self.pop_front() {
            Some(key) => Ok(key),
            None => bail!("key input exhausted"),
        }
    }
}

/// Turn a string into scripted keystrokes, one `Key::Char` per character.
pub fn keys_from_str(s: &str) -> VecDeque<Key> {
    s.chars().map(Key::Char).collect()
}
