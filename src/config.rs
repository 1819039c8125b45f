// Runtime configuration: command-line flags with environment fallbacks.

use anyhow::{bail, Result};
use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "https://visits.evofitness.no";
pub const DEFAULT_OPERATOR_ID: &str = "5336003e-0105-4402-809f-93bf6498af34";

#[derive(Debug, Parser, Clone)]
#[command(name = "gym-checker")]
#[command(about = "Live gym occupancy in the terminal")]
pub struct Config {
    /// API host, e.g. https://visits.evofitness.no
    #[arg(long, env = "GYM_CHECKER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    /// Operator whose locations are listed.
    #[arg(long, env = "GYM_CHECKER_OPERATOR_ID", default_value = DEFAULT_OPERATOR_ID)]
    pub operator_id: String,
    /// Skip the picker and monitor this location straight away.
    #[arg(long, env = "GYM_CHECKER_LOCATION_ID")]
    pub location_id: Option<String>,
    /// Print one reading for --location-id and exit, without raw mode.
    #[arg(long)]
    pub once: bool,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.once && self.location_id.is_none() {
            bail!("--once needs --location-id");
        }
        if self.base_url.trim().is_empty() {
            bail!("base URL must not be empty");
        }
        Ok(())
    }

    /// Command the troubleshooting text suggests for a manual check.
    pub fn manual_request(&self) -> String {
        format!(
            "curl \"{}/api/v1/locations?operator={}\"",
            self.base_url.trim_end_matches('/'),
            self.operator_id
        )
    }
}
