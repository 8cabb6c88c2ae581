use std::{error::Error, io};

use clap::Parser;
use log::info;
use rmemsim::{Config, Shell, Simulator, logging};

fn main() -> Result<(), Box<dyn Error>> {
  let config = Config::parse();
  config.validate()?;
  logging::init(config.log_level)?;
  info!("starting with {:?}", config);

  let mut sim = Simulator::new(config.memory_size);
  let shell = Shell::new(!config.no_prompt);
  shell.run(&mut sim, io::stdin().lock(), io::stdout().lock())?;

  info!("session ended");
  Ok(())
}
