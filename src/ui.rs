// Application flow: load locations, pick one, monitor it, and start over
// when the user asks to switch.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::style::Stylize;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::api::{ApiClient, Location, OccupancySource};
use crate::config::Config;
use crate::monitor::{monitor_location, MonitorExit};
use crate::picker::select_location;
use crate::render::render_occupancy_frame;
use crate::terminal::TerminalKeys;

/// Main interactive loop. Returns when the user quits or interrupts; any
/// error is fatal and left to the caller to report.
pub fn run(config: &Config) -> Result<()> {
    let api = ApiClient::new(&config.base_url, &config.operator_id)
        .context("Failed to build HTTP client")?;

    if config.once {
        return print_once(&api, config, &mut io::stdout().lock());
    }

    let mut preselected = config.location_id.clone();
    let mut stdout = io::stdout();

    loop {
        let locations = load_locations(&api)?;

        let location = match preselected.take() {
            Some(id) => find_location(&locations, &id)?,
            None => {
                // Raw mode only lives as long as `keys`.
                let mut keys = TerminalKeys::acquire()?;
                match select_location(&mut keys, &locations, &mut stdout)? {
                    Some(location) => location,
                    None => return Ok(()),
                }
            }
        };
        info!("monitoring {} ({})", location.name, location.id);

        let exit = {
            let mut keys = TerminalKeys::acquire()?;
            monitor_location(&mut keys, &api, &location, &mut stdout)?
        };
        match exit {
            MonitorExit::Switch => continue,
            MonitorExit::Quit => return Ok(()),
        }
    }
}

/// Fetch the location list behind a spinner. An empty list is an error
/// since nothing could ever be picked from it.
fn load_locations(api: &ApiClient) -> Result<Vec<Location>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Loading locations...".dim().to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = api.fetch_locations();
    spinner.finish_and_clear();

    let locations = ensure_locations(result.context("Failed to fetch locations")?)?;
    info!("loaded {} locations", locations.len());
    Ok(locations)
}

/// Refuse an empty list: the picker would have nothing to resolve to.
pub fn ensure_locations(locations: Vec<Location>) -> Result<Vec<Location>> {
    if locations.is_empty() {
        bail!("No locations returned for this operator");
    }
    Ok(locations)
}

fn find_location(locations: &[Location], id: &str) -> Result<Location> {
    match locations.iter().find(|loc| loc.id == id) {
        Some(location) => Ok(location.clone()),
        None => bail!("Unknown location id \"{}\"", id),
    }
}

/// Headless mode: one frame to `out`, no raw mode.
pub fn print_once<W: Write>(api: &ApiClient, config: &Config, out: &mut W) -> Result<()> {
    let id = match &config.location_id {
        Some(id) => id,
        None => bail!("--once needs --location-id"),
    };
    let locations = api.fetch_locations().context("Failed to fetch locations")?;
    let locations = ensure_locations(locations)?;
    let location = find_location(&locations, id)?;
    let reading = api
        .fetch_occupancy(&location.id)
        .context("Failed to fetch occupancy")?;

    out.write_all(render_occupancy_frame(&location, &reading).as_bytes())?;
    out.flush()?;
    Ok(())
}

/// Error report printed before exiting with a failure code.
pub fn troubleshooting(err: &anyhow::Error, config: &Config) -> String {
    let mut out = String::new();
    out.push_str(&format!("\nError: {:#}", err).red().to_string());
    out.push('\n');
    let lines = [
        "\nTroubleshooting:".to_string(),
        "  1. Check your internet connection".to_string(),
        "  2. Verify curl is installed: curl --version".to_string(),
        "  3. Test the API manually:".to_string(),
        format!("     {}", config.manual_request()),
    ];
    for line in lines {
        out.push_str(&line.dim().to_string());
        out.push('\n');
    }
    out
}
