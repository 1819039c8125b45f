// Entrypoint: parse configuration, set up logging and hand over to the UI
// loop. Fatal errors get the troubleshooting checklist and exit code 1.

use std::process::ExitCode;

use clap::Parser;
use gym_checker::{config::Config, ui};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    let result = config.validate().and_then(|()| ui::run(&config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", ui::troubleshooting(&err, &config));
            ExitCode::FAILURE
        }
    }
}
