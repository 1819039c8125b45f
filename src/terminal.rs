// Raw-mode keyboard input backed by crossterm.
//
// `TerminalKeys` owns raw mode for as long as it lives: it is switched on in
// `acquire` and switched off again in `Drop`, so every way out of a screen
// (quit, switch, error, panic unwinding) leaves the terminal usable.

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::warn;

use crate::input::{Key, KeySource};

#[derive(Debug)]
pub struct TerminalKeys {
    _private: (),
}

impl TerminalKeys {
    pub fn acquire() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw terminal mode")?;
        Ok(TerminalKeys { _private: () })
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to restore terminal mode: {}", e);
        }
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(key) = event::read().context("Failed to read terminal input")? {
                // Windows reports releases as well as presses.
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                return Ok(map_key(key));
            }
        }
    }
}

fn map_key(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Key::Interrupt
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        _ => Key::Other,
    }
}
