use std::error::Error;
use std::io;

use deskwm::config::{self, Config, ConfigError};
use deskwm::shell::ShellAdapter;
use deskwm::DeskWm;
use log::{info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    let (config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e @ ConfigError::TomlSyntaxError(_)) => return Err(e.into()),
        Err(e) => (Config::default(), Some(e)),
    };

    let _log2 = log2::open(config.log_file.as_str())
        .level(config.log_level.as_str())
        .start();
    if let Some(e) = config_error {
        warn!("{}, running with defaults", e);
    }
    info!("starting deskwm");

    let stdin = io::stdin();
    let server = ShellAdapter::new(stdin.lock(), io::stdout());
    let mut wm = DeskWm::new(server, &config)?;
    wm.run()?;
    info!("exiting with {} window(s) open", wm.registry().len());
    Ok(())
}
