// Monitor loop: show one location's occupancy and react to r / s / q.

use std::io::Write;

use anyhow::Result;
use crossterm::style::Stylize;
use log::{debug, warn};

use crate::api::{Location, OccupancySource};
use crate::input::{Key, KeySource};
use crate::render::{render_occupancy_frame, NL};

/// How the user left the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorExit {
    /// Go back and pick another location.
    Switch,
    Quit,
}

/// Command a keystroke maps to while the monitor is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Refresh,
    Switch,
    Quit,
}

impl Command {
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Interrupt => Some(Command::Quit),
            Key::Char(c) => match c.to_ascii_lowercase() {
                'r' => Some(Command::Refresh),
                's' => Some(Command::Switch),
                'q' => Some(Command::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Fetch a reading and draw it. A failed fetch prints an error line below
/// whatever is on screen and leaves the rest of the display alone.
pub fn refresh<S, W>(source: &S, location: &Location, out: &mut W) -> Result<()>
where
    S: OccupancySource + ?Sized,
    W: Write,
{
    match source.fetch_occupancy(&location.id) {
        Ok(reading) => {
            debug!(
                "{}: {} people, {}%",
                location.name, reading.current, reading.percentage_used
            );
            out.write_all(render_occupancy_frame(location, &reading).as_bytes())?;
        }
        Err(e) => {
            warn!("occupancy fetch for {} failed: {}", location.id, e);
            let line = format!("Error fetching data: Failed to fetch occupancy: {e}");
            write!(out, "{}{NL}", line.red())?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Run the monitor until the user switches location or quits.
pub fn monitor_location<K, S, W>(
    keys: &mut K,
    source: &S,
    location: &Location,
    out: &mut W,
) -> Result<MonitorExit>
where
    K: KeySource,
    S: OccupancySource + ?Sized,
    W: Write,
{
    refresh(source, location, out)?;

    loop {
        match Command::from_key(keys.next_key()?) {
            Some(Command::Refresh) => refresh(source, location, out)?,
            Some(Command::Switch) => return Ok(MonitorExit::Switch),
            Some(Command::Quit) => return Ok(MonitorExit::Quit),
            None => {}
        }
    }
}
